// Analytics over a progress value. Day-based figures take an injected
// `today` so callers and tests control the clock.

use chrono::NaiveDate;

use crate::progress::Progress;

// A card is considered mastered from this level up.
const MASTERED_LEVEL: u32 = 4;

/// Percentage of the topic catalog marked complete. The catalog lives
/// outside this crate, so the caller supplies its size.
pub fn topic_completion_rate(progress: &Progress, total_topics: usize) -> f64 {
    if total_topics == 0 {
        return 0.0;
    }
    (progress.topics_completed.len() as f64 / total_topics as f64) * 100.0
}

/// Percentage of tracked cards at mastered level, 0 when nothing is
/// tracked yet.
pub fn mastery_rate(progress: &Progress) -> f64 {
    let cards = &progress.flashcard_progress;
    if cards.is_empty() {
        return 0.0;
    }
    let mastered = cards.values().filter(|c| c.level >= MASTERED_LEVEL).count();
    (mastered as f64 / cards.len() as f64) * 100.0
}

/// Consecutive days with at least one study session, counting back from
/// `today` through the session history (newest first).
pub fn study_streak(progress: &Progress, today: NaiveDate) -> u32 {
    let mut streak: u32 = 0;

    for session in progress.study_sessions.iter().rev() {
        let session_day = session.start_time.date_naive();
        let days_back = (today - session_day).num_days();

        if days_back == streak as i64 {
            streak += 1;
        } else if days_back > streak as i64 {
            break;
        }
        // days_back < streak: another session on an already-counted day
    }

    streak
}

/// Total minutes across all recorded sessions.
pub fn total_study_minutes(progress: &Progress) -> f64 {
    progress
        .study_sessions
        .iter()
        .map(|s| (s.end_time - s.start_time).num_seconds() as f64 / 60.0)
        .sum()
}

/// Days from `today` to the configured interview date; negative once the
/// date has passed, None when no date is set.
pub fn days_until_interview(progress: &Progress, today: NaiveDate) -> Option<i64> {
    let interview = progress.settings.interview_date?;
    Some((interview - today).num_days())
}
