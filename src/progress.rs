// Caller-side study progress: the record set the scheduler reads from
// and writes back into. Plain data plus update operations; where it is
// persisted is the host application's business.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::schedule::{self, Response, Schedule};

/// Mastery state of one flashcard. Serialized in camelCase to match the
/// host application's snapshot format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMastery {
    pub card_id: String,
    pub level: u32,
    pub last_reviewed: DateTime<Utc>,
    pub next_review: DateTime<Utc>,
    pub review_count: u32,
    pub ease_factor: f64,
}

/// One finished quiz, kept for the score history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub timestamp: DateTime<Utc>,
    pub category: String,
    pub correct: u32,
    pub total: u32,
    pub questions: Vec<String>,
}

/// A practice problem the user has worked through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemCompletion {
    pub problem_id: String,
    pub completed_at: DateTime<Utc>,
    /// Minutes spent on the problem.
    pub time_spent: u32,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Topics,
    Flashcards,
    Practice,
    Quiz,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub activity: Activity,
    pub items_studied: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

/// User preferences. The theme is carried as data for the host UI;
/// nothing here acts on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub interview_date: Option<NaiveDate>,
    /// Daily study goal in minutes.
    pub daily_goal: u32,
    pub theme: Theme,
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            interview_date: None,
            daily_goal: 30,
            theme: Theme::Dark,
            notifications: true,
        }
    }
}

/// Everything the application tracks about one learner. Fields default
/// individually so a partial snapshot from an older install still loads,
/// missing sections filling in with defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(default)]
    pub topics_completed: Vec<String>,
    #[serde(default)]
    pub flashcard_progress: HashMap<String, CardMastery>,
    #[serde(default)]
    pub quiz_scores: Vec<QuizScore>,
    #[serde(default)]
    pub problems_completed: HashMap<String, ProblemCompletion>,
    #[serde(default)]
    pub study_sessions: Vec<StudySession>,
    #[serde(default)]
    pub settings: Settings,
}

impl Progress {
    /// Run one rating through the scheduler and store the updated
    /// mastery record. A card rated for the first time starts from
    /// level 0 and the initial ease factor.
    pub fn record_review(&mut self, card_id: &str, response: Response, now: DateTime<Utc>) -> Schedule {
        let (level, ease_factor, review_count) = match self.flashcard_progress.get(card_id) {
            Some(mastery) => (mastery.level, mastery.ease_factor, mastery.review_count),
            None => (0, schedule::INITIAL_EASE_FACTOR, 0),
        };

        let next = schedule::next_review(level, ease_factor, response.quality(), now);
        self.flashcard_progress.insert(
            card_id.to_string(),
            CardMastery {
                card_id: card_id.to_string(),
                level: next.level,
                last_reviewed: now,
                next_review: next.next_review,
                review_count: review_count + 1,
                ease_factor: next.ease_factor,
            },
        );

        debug!(
            "review recorded for {card_id}: level {}, next in {} day(s)",
            next.level, next.interval_days
        );
        next
    }

    pub fn mark_topic_complete(&mut self, topic_id: &str) {
        if !self.topics_completed.iter().any(|t| t == topic_id) {
            self.topics_completed.push(topic_id.to_string());
        }
    }

    pub fn add_quiz_score(&mut self, score: QuizScore) {
        self.quiz_scores.push(score);
    }

    pub fn mark_problem_complete(&mut self, completion: ProblemCompletion) {
        self.problems_completed
            .insert(completion.problem_id.clone(), completion);
    }

    /// Open a session record. The end time starts equal to the start
    /// time and is moved forward by `end_session`.
    pub fn start_session(&mut self, activity: Activity, now: DateTime<Utc>) {
        self.study_sessions.push(StudySession {
            start_time: now,
            end_time: now,
            activity,
            items_studied: 0,
        });
    }

    /// Close the most recently opened session. No-op on an empty history.
    pub fn end_session(&mut self, items_studied: u32, now: DateTime<Utc>) {
        if let Some(session) = self.study_sessions.last_mut() {
            session.end_time = now;
            session.items_studied = items_studied;
        }
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Export the full progress state as a pretty-printed JSON snapshot.
    pub fn to_json(&self) -> Result<String, Error> {
        let json = serde_json::to_string_pretty(self)?;
        debug!("exported progress snapshot ({} bytes)", json.len());
        Ok(json)
    }

    /// Import a snapshot previously produced by `to_json` or by the host
    /// application's exporter. Malformed input is an error, never a
    /// silent default.
    pub fn from_json(json: &str) -> Result<Progress, Error> {
        let progress: Progress = serde_json::from_str(json)?;
        debug!(
            "imported progress snapshot: {} cards, {} sessions",
            progress.flashcard_progress.len(),
            progress.study_sessions.len()
        );
        Ok(progress)
    }
}
