//! Fixed code tables shared with the agent.
//!
//! The agent emits activity and transport categories as integer indices into
//! these tables. Order is part of the wire contract: never reorder entries.

use crate::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a scheduled trip event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityType {
    Sightseeing,
    Restaurant,
    Shopping,
    Accommodation,
    FreeTime,
    Transport,
    Other,
}

impl ActivityType {
    /// Table order, indexed by the agent's integer code.
    pub const ALL: [ActivityType; 7] = [
        ActivityType::Sightseeing,
        ActivityType::Restaurant,
        ActivityType::Shopping,
        ActivityType::Accommodation,
        ActivityType::FreeTime,
        ActivityType::Transport,
        ActivityType::Other,
    ];

    pub fn from_code(code: u32) -> Result<Self> {
        lookup(&Self::ALL, "type", code)
    }

    pub fn code(self) -> u32 {
        position(&Self::ALL, self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Sightseeing => "sightseeing",
            ActivityType::Restaurant => "restaurant",
            ActivityType::Shopping => "shopping",
            ActivityType::Accommodation => "accommodation",
            ActivityType::FreeTime => "freeTime",
            ActivityType::Transport => "transport",
            ActivityType::Other => "other",
        }
    }
}

/// Means of travel for a transport leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransportType {
    Train,
    HighSpeedTrain,
    Flight,
    Bus,
    Taxi,
    Bike,
    Walk,
    Car,
    Boat,
    Motorcycle,
    Other,
}

impl TransportType {
    /// Table order, indexed by the agent's integer code.
    pub const ALL: [TransportType; 11] = [
        TransportType::Train,
        TransportType::HighSpeedTrain,
        TransportType::Flight,
        TransportType::Bus,
        TransportType::Taxi,
        TransportType::Bike,
        TransportType::Walk,
        TransportType::Car,
        TransportType::Boat,
        TransportType::Motorcycle,
        TransportType::Other,
    ];

    pub fn from_code(code: u32) -> Result<Self> {
        lookup(&Self::ALL, "transportType", code)
    }

    pub fn code(self) -> u32 {
        position(&Self::ALL, self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportType::Train => "train",
            TransportType::HighSpeedTrain => "highSpeedTrain",
            TransportType::Flight => "flight",
            TransportType::Bus => "bus",
            TransportType::Taxi => "taxi",
            TransportType::Bike => "bike",
            TransportType::Walk => "walk",
            TransportType::Car => "car",
            TransportType::Boat => "boat",
            TransportType::Motorcycle => "motorcycle",
            TransportType::Other => "other",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn lookup<T: Copy>(table: &[T], field: &'static str, code: u32) -> Result<T> {
    usize::try_from(code)
        .ok()
        .and_then(|idx| table.get(idx).copied())
        .ok_or(PlannerError::CodeOutOfRange {
            activity: None,
            field,
            code,
            table_len: table.len(),
        })
}

fn position<T: PartialEq>(table: &[T], value: T) -> u32 {
    table
        .iter()
        .position(|entry| *entry == value)
        .map(|idx| idx as u32)
        .unwrap_or_default()
}

/// One line per entry, `code = name`, for prompting the agent.
pub fn describe_code_tables() -> String {
    let activities: Vec<String> = ActivityType::ALL
        .iter()
        .map(|kind| format!("{} = {}", kind.code(), kind))
        .collect();
    let transports: Vec<String> = TransportType::ALL
        .iter()
        .map(|kind| format!("{} = {}", kind.code(), kind))
        .collect();

    format!(
        "Activity type codes: {}\nTransport type codes: {}",
        activities.join(", "),
        transports.join(", ")
    )
}
