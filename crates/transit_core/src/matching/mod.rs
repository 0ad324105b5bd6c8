pub mod best_eta;
pub mod types;

pub use best_eta::{assign, stops_ahead};
pub use types::{Assignment, BusCandidate};
