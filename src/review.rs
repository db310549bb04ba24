use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;

use crate::progress::CardMastery;

// Aim for 20-30 cards per sitting: fill from overdue first, then
// due-today, then new cards.
const SESSION_TARGET: usize = 25;
const SESSION_CAP: usize = 30;
const MAX_NEW_PER_QUEUE: usize = 10;

/// Candidate cards bucketed ahead of a study session, each bucket in
/// input order. Cards due after `today` land in no bucket at all: they
/// are not study candidates, and in particular are not "new".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriagedCards {
    pub overdue: Vec<String>,
    pub due_today: Vec<String>,
    pub unseen: Vec<String>,
}

pub fn triage(
    all_card_ids: &[String],
    progress: &HashMap<String, CardMastery>,
    today: NaiveDate,
) -> TriagedCards {
    let mut triaged = TriagedCards::default();

    for card_id in all_card_ids {
        match progress.get(card_id) {
            None => triaged.unseen.push(card_id.clone()),
            Some(mastery) => {
                let due_day = mastery.next_review.date_naive();
                if due_day < today {
                    triaged.overdue.push(card_id.clone());
                } else if due_day == today {
                    triaged.due_today.push(card_id.clone());
                }
                // else: scheduled for a future day, excluded entirely
            }
        }
    }

    debug!(
        "triaged {} candidates: {} overdue, {} due today, {} unseen",
        all_card_ids.len(),
        triaged.overdue.len(),
        triaged.due_today.len(),
        triaged.unseen.len()
    );
    triaged
}

/// How many cards to study in one sitting, by priority: overdue, then
/// due-today, then new. Never more than 30.
pub fn recommended_session_size(overdue: usize, due_today: usize, unseen: usize) -> usize {
    if overdue >= SESSION_TARGET {
        return overdue.min(SESSION_CAP);
    }
    if overdue + due_today >= SESSION_TARGET {
        return overdue + due_today.min(SESSION_TARGET - overdue);
    }
    overdue + due_today + unseen.min(SESSION_TARGET - overdue - due_today)
}

/// Assemble the ordered study queue for a triaged deck: overdue, then
/// due-today, then at most ten new cards, cut to the recommended size.
pub fn build_queue(triaged: &TriagedCards) -> Vec<String> {
    let size = recommended_session_size(
        triaged.overdue.len(),
        triaged.due_today.len(),
        triaged.unseen.len(),
    );

    triaged
        .overdue
        .iter()
        .chain(triaged.due_today.iter())
        .chain(triaged.unseen.iter().take(MAX_NEW_PER_QUEUE))
        .take(size)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn mastery(card_id: &str, next_review: DateTime<Utc>) -> CardMastery {
        CardMastery {
            card_id: card_id.to_string(),
            level: 1,
            last_reviewed: next_review - chrono::Duration::days(1),
            next_review,
            review_count: 1,
            ease_factor: 2.5,
        }
    }

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn triage_buckets_by_due_day() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let mut progress = HashMap::new();
        progress.insert("a".to_string(), mastery("a", noon(2025, 6, 9)));
        progress.insert("b".to_string(), mastery("b", noon(2025, 6, 10)));

        let triaged = triage(&ids(&["a", "b", "c"]), &progress, today);
        assert_eq!(triaged.overdue, ids(&["a"]));
        assert_eq!(triaged.due_today, ids(&["b"]));
        assert_eq!(triaged.unseen, ids(&["c"]));
    }

    #[test]
    fn future_cards_land_in_no_bucket() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let mut progress = HashMap::new();
        progress.insert("a".to_string(), mastery("a", noon(2025, 6, 9)));
        progress.insert("c".to_string(), mastery("c", noon(2025, 6, 11)));

        let triaged = triage(&ids(&["a", "b", "c"]), &progress, today);
        assert_eq!(triaged.overdue, ids(&["a"]));
        assert!(triaged.due_today.is_empty());
        // "c" is tracked but not due yet, so it must not count as new
        assert_eq!(triaged.unseen, ids(&["b"]));
    }

    #[test]
    fn triage_preserves_input_order() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let mut progress = HashMap::new();
        for id in ["d", "b"] {
            progress.insert(id.to_string(), mastery(id, noon(2025, 6, 1)));
        }

        let triaged = triage(&ids(&["d", "a", "b", "c"]), &progress, today);
        assert_eq!(triaged.overdue, ids(&["d", "b"]));
        assert_eq!(triaged.unseen, ids(&["a", "c"]));
    }

    #[test]
    fn triage_buckets_are_disjoint() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let mut progress = HashMap::new();
        progress.insert("a".to_string(), mastery("a", noon(2025, 6, 10)));

        let triaged = triage(&ids(&["a", "b"]), &progress, today);
        let total = triaged.overdue.len() + triaged.due_today.len() + triaged.unseen.len();
        assert_eq!(total, 2);
        assert!(!triaged.overdue.contains(&"a".to_string()));
    }

    #[test]
    fn empty_progress_means_all_unseen() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let triaged = triage(&ids(&["a", "b"]), &HashMap::new(), today);
        assert_eq!(triaged.unseen, ids(&["a", "b"]));
        assert!(triaged.overdue.is_empty());
        assert!(triaged.due_today.is_empty());
    }

    #[test]
    fn session_size_overdue_backlog_capped_at_30() {
        assert_eq!(recommended_session_size(30, 10, 5), 30);
        assert_eq!(recommended_session_size(100, 0, 0), 30);
        assert_eq!(recommended_session_size(25, 0, 0), 25);
    }

    #[test]
    fn session_size_fills_from_due_today() {
        assert_eq!(recommended_session_size(20, 10, 50), 25);
        assert_eq!(recommended_session_size(10, 15, 0), 25);
    }

    #[test]
    fn session_size_fills_remainder_with_new() {
        assert_eq!(recommended_session_size(5, 5, 100), 25);
        assert_eq!(recommended_session_size(5, 5, 3), 13);
        assert_eq!(recommended_session_size(0, 0, 0), 0);
    }

    #[test]
    fn session_size_is_monotone_in_each_argument() {
        let base = recommended_session_size(4, 6, 8);
        assert!(recommended_session_size(5, 6, 8) >= base);
        assert!(recommended_session_size(4, 7, 8) >= base);
        assert!(recommended_session_size(4, 6, 9) >= base);
    }

    #[test]
    fn session_size_never_exceeds_cap() {
        for overdue in [0, 10, 24, 25, 29, 30, 80] {
            for due_today in [0, 10, 30] {
                for unseen in [0, 10, 30] {
                    assert!(recommended_session_size(overdue, due_today, unseen) <= SESSION_CAP);
                }
            }
        }
    }

    #[test]
    fn queue_prioritizes_overdue_then_due_then_new() {
        let triaged = TriagedCards {
            overdue: ids(&["o1", "o2"]),
            due_today: ids(&["d1"]),
            unseen: ids(&["n1", "n2"]),
        };
        assert_eq!(build_queue(&triaged), ids(&["o1", "o2", "d1", "n1", "n2"]));
    }

    #[test]
    fn queue_takes_at_most_ten_new_cards() {
        let triaged = TriagedCards {
            overdue: Vec::new(),
            due_today: Vec::new(),
            unseen: (0..40).map(|i| format!("n{i}")).collect(),
        };
        let queue = build_queue(&triaged);
        assert_eq!(queue.len(), 10);
        assert_eq!(queue[0], "n0");
        assert_eq!(queue[9], "n9");
    }

    #[test]
    fn queue_is_cut_to_recommended_size() {
        let triaged = TriagedCards {
            overdue: (0..40).map(|i| format!("o{i}")).collect(),
            due_today: ids(&["d1"]),
            unseen: Vec::new(),
        };
        let queue = build_queue(&triaged);
        assert_eq!(queue.len(), 30);
        assert!(queue.iter().all(|id| id.starts_with('o')));
    }
}
