// Spaced-repetition study core: SM-2 scheduling, due-card triage,
// session sizing, and the progress records they operate on.

pub mod error;
pub mod progress;
pub mod review;
pub mod schedule;
pub mod stats;

pub use error::Error;
pub use progress::{CardMastery, Progress};
pub use review::TriagedCards;
pub use schedule::{Quality, Response, Schedule};
