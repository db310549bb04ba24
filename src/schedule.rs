// SM-2 spaced repetition scheduling.
// Interval growth follows the simplified variant where the mastery level,
// not the previous interval, is multiplied by the ease factor.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::error::Error;

const MIN_EASE_FACTOR: f64 = 1.3;
const FORGOT_EASE_PENALTY: f64 = 0.2;
const RECALL_THRESHOLD: u8 = 3;

/// Ease factor assigned to a card the first time it is rated.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Self-rated recall quality on the 0-5 SM-2 scale.
/// Values above 5 are clamped at construction; u8 rules out negatives.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Quality {
        Quality(value.min(5))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// The four study buttons, in increasing order of recall quality.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Response {
    DontKnow,
    Hard,
    Good,
    Easy,
}

impl Response {
    pub fn quality(self) -> Quality {
        Quality(match self {
            Response::DontKnow => 0,
            Response::Hard => 3,
            Response::Good => 4,
            Response::Easy => 5,
        })
    }
}

impl FromStr for Response {
    type Err = Error;

    fn from_str(s: &str) -> Result<Response, Error> {
        match s {
            "dont-know" => Ok(Response::DontKnow),
            "hard" => Ok(Response::Hard),
            "good" => Ok(Response::Good),
            "easy" => Ok(Response::Easy),
            other => Err(Error::UnknownResponse(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub level: u32,
    pub ease_factor: f64,
    pub interval_days: i64,
    pub next_review: DateTime<Utc>,
}

pub fn next_review(level: u32, ease_factor: f64, quality: Quality, now: DateTime<Utc>) -> Schedule {
    if quality.value() < RECALL_THRESHOLD {
        // Forgot: progress resets and the card comes straight back.
        return Schedule {
            level: 0,
            ease_factor: (ease_factor - FORGOT_EASE_PENALTY).max(MIN_EASE_FACTOR),
            interval_days: 0,
            next_review: now,
        };
    }

    // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
    let q = quality.value() as f64;
    let new_ease =
        (ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02))).max(MIN_EASE_FACTOR);

    let interval_days = match level {
        0 => 1,
        1 => 6,
        _ => (level as f64 * new_ease).round() as i64,
    };

    Schedule {
        level: level + 1,
        ease_factor: new_ease,
        interval_days,
        next_review: now + Duration::days(interval_days),
    }
}
