pub mod coded;
pub mod codes;
pub mod itinerary;
pub mod result;

pub use coded::{CodedActivity, CodedChildActivity, CodedTrip, TripHeader};
pub use codes::{ActivityType, TransportType};
pub use itinerary::{Activity, ChildActivity, Itinerary, LatLng};
pub use result::PlanOutcome;
