use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::ids::QuizId;
use crate::model::session::{Session, SessionMode};

/// Days covered by the dashboard activity strip.
pub const ACTIVITY_WINDOW_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub sessions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizActivity {
    pub quiz_id: QuizId,
    pub sessions: u32,
    pub average_score: Option<f64>,
}

/// Dashboard aggregates derived from the user's sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_sessions: u32,
    pub completed_sessions: u32,
    pub learn_sessions: u32,
    pub test_sessions: u32,
    pub average_score: Option<f64>,
    pub best_score: Option<f64>,
    pub current_streak_days: u32,
    pub activity: Vec<DailyActivity>,
    pub per_quiz: Vec<QuizActivity>,
}

impl DashboardStats {
    /// Aggregate sessions as seen on `today` (UTC calendar day).
    #[must_use]
    pub fn from_sessions(sessions: &[Session], today: NaiveDate) -> Self {
        let mut completed_sessions = 0_u32;
        let mut learn_sessions = 0_u32;
        let mut test_sessions = 0_u32;
        let mut scores = Vec::new();
        let mut completed_days = BTreeSet::new();
        let mut per_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
        let mut per_quiz: BTreeMap<QuizId, (u32, Vec<f64>)> = BTreeMap::new();

        for session in sessions {
            match session.mode {
                SessionMode::Learn => learn_sessions = learn_sessions.saturating_add(1),
                SessionMode::Test => test_sessions = test_sessions.saturating_add(1),
            }
            if session.completed {
                completed_sessions = completed_sessions.saturating_add(1);
                let day = session
                    .completed_at
                    .unwrap_or(session.started_at)
                    .date_naive();
                completed_days.insert(day);
            }
            let entry = per_day.entry(session.started_at.date_naive()).or_default();
            *entry = entry.saturating_add(1);

            let quiz = per_quiz.entry(session.quiz_id).or_default();
            quiz.0 = quiz.0.saturating_add(1);
            if let Some(score) = session.test_score() {
                scores.push(score);
                quiz.1.push(score);
            }
        }

        let mut per_quiz: Vec<QuizActivity> = per_quiz
            .into_iter()
            .map(|(quiz_id, (count, quiz_scores))| QuizActivity {
                quiz_id,
                sessions: count,
                average_score: mean(&quiz_scores),
            })
            .collect();
        per_quiz.sort_by(|a, b| b.sessions.cmp(&a.sessions).then(a.quiz_id.cmp(&b.quiz_id)));

        Self {
            total_sessions: u32::try_from(sessions.len()).unwrap_or(u32::MAX),
            completed_sessions,
            learn_sessions,
            test_sessions,
            average_score: mean(&scores),
            best_score: scores.iter().copied().reduce(f64::max),
            current_streak_days: streak(&completed_days, today),
            activity: activity_window(&per_day, today),
            per_quiz,
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let len = values.len() as f64;
    Some(values.iter().sum::<f64>() / len)
}

/// Consecutive days with a completed session, ending today or yesterday.
fn streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let yesterday = today.checked_sub_days(Days::new(1));
    let mut cursor = if days.contains(&today) {
        Some(today)
    } else if yesterday.is_some_and(|d| days.contains(&d)) {
        yesterday
    } else {
        return 0;
    };

    let mut count = 0_u32;
    while let Some(day) = cursor.filter(|d| days.contains(d)) {
        count = count.saturating_add(1);
        cursor = day.checked_sub_days(Days::new(1));
    }
    count
}

fn activity_window(per_day: &BTreeMap<NaiveDate, u32>, today: NaiveDate) -> Vec<DailyActivity> {
    (0..ACTIVITY_WINDOW_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| DailyActivity {
            date,
            sessions: per_day.get(&date).copied().unwrap_or(0),
        })
        .collect()
}
