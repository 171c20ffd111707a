//! Coded agent output to normalized itinerary.

use crate::{
    error::{PlannerError, Result},
    types::{
        coded::{CodedActivity, CodedChildActivity, CodedTrip},
        codes::{ActivityType, TransportType},
        itinerary::{Activity, ChildActivity, Itinerary, LatLng},
    },
};
use chrono::{DateTime, Duration, Utc};

/// Whole minutes in `seconds`, truncating any remainder.
pub fn minutes_from_seconds(seconds: u64) -> u64 {
    seconds / 60
}

/// Translate a decoded agent reply. The first invalid activity fails the whole trip.
pub fn translate(coded: CodedTrip) -> Result<Itinerary> {
    let activities = coded
        .activities
        .into_iter()
        .enumerate()
        .map(|(idx, activity)| {
            translate_activity(activity).map_err(|err| match err {
                PlannerError::Validation(msg) => {
                    PlannerError::Validation(format!("activities[{}]: {}", idx, msg))
                }
                PlannerError::CodeOutOfRange {
                    field,
                    code,
                    table_len,
                    ..
                } => PlannerError::CodeOutOfRange {
                    activity: Some(idx),
                    field,
                    code,
                    table_len,
                },
                other => other,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Itinerary {
        title: coded.trip.name,
        activities,
    })
}

fn translate_activity(coded: CodedActivity) -> Result<Activity> {
    let activity_type = ActivityType::from_code(coded.activity_type)?;
    let transport_type = coded
        .transport_type
        .map(TransportType::from_code)
        .transpose()?;

    let start_time_utc = timestamp_from_millis(coded.start_time_utc)?;
    let end_time_utc = end_time(start_time_utc, coded.duration_in_seconds)?;

    let lat_lng = match (coded.latitude, coded.longitude) {
        (Some(lat), Some(lng)) => Some(LatLng { lat, lng }),
        _ => None,
    };

    Ok(Activity {
        activity_type,
        location: coded.location,
        start_time_utc,
        end_time_utc,
        duration: minutes_from_seconds(coded.duration_in_seconds),
        time_zone: coded.time_zone,
        transport_type,
        note: coded.note,
        child_activities: coded
            .child_activities
            .into_iter()
            .map(translate_child)
            .collect(),
        lat_lng,
        place_uri: coded.place_uri,
    })
}

fn translate_child(coded: CodedChildActivity) -> ChildActivity {
    ChildActivity {
        name: coded.name,
        duration: minutes_from_seconds(coded.duration_in_seconds),
    }
}

fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        PlannerError::Validation(format!(
            "startTimeUtc {} is not a representable timestamp",
            millis
        ))
    })
}

fn end_time(start: DateTime<Utc>, duration_in_seconds: u64) -> Result<DateTime<Utc>> {
    i64::try_from(duration_in_seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|span| start.checked_add_signed(span))
        .ok_or_else(|| {
            PlannerError::Validation(format!(
                "durationInSeconds {} overflows the end time",
                duration_in_seconds
            ))
        })
}
