use quiz_core::model::{QuizId, Session, SessionId};
use services::Dashboard;

use crate::vm::time_fmt::{format_datetime, format_day};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCardVm {
    pub label: &'static str,
    pub value: String,
    pub hint: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityBarVm {
    pub day_label: String,
    pub sessions: u32,
    /// Bar height relative to the busiest day, 0..=100.
    pub height_pct: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentSessionVm {
    pub id: SessionId,
    pub quiz_id: QuizId,
    pub quiz_title: String,
    pub mode_label: &'static str,
    pub started_str: String,
    pub status_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub stat_cards: Vec<StatCardVm>,
    pub activity: Vec<ActivityBarVm>,
    pub recent: Vec<RecentSessionVm>,
    pub has_quizzes: bool,
}

fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| "--".to_string(), |s| format!("{s:.0}%"))
}

/// Row for a session list, either on the dashboard or under one quiz.
#[must_use]
pub fn map_recent_session(session: &Session, quiz_title: &str) -> RecentSessionVm {
    RecentSessionVm {
        id: session.id,
        quiz_id: session.quiz_id,
        quiz_title: quiz_title.to_string(),
        mode_label: if session.mode.is_test() {
            "Test"
        } else {
            "Learn"
        },
        started_str: format_datetime(session.started_at),
        status_label: match (session.completed, session.test_score()) {
            (true, Some(score)) => format_score(Some(score)),
            (true, None) => "Done".to_string(),
            (false, _) => "Unfinished".to_string(),
        },
    }
}

#[must_use]
pub fn map_dashboard(dashboard: &Dashboard) -> DashboardVm {
    let stats = &dashboard.stats;
    let streak_hint = match stats.current_streak_days {
        0 => None,
        1 => Some("1 day streak".to_string()),
        days => Some(format!("{days} day streak")),
    };
    let stat_cards = vec![
        StatCardVm {
            label: "Quizzes",
            value: dashboard.quiz_count.to_string(),
            hint: Some(format!("{} flashcards", dashboard.flashcard_count)),
        },
        StatCardVm {
            label: "Sessions",
            value: stats.total_sessions.to_string(),
            hint: Some(format!(
                "{} learn · {} test",
                stats.learn_sessions, stats.test_sessions
            )),
        },
        StatCardVm {
            label: "Completed",
            value: stats.completed_sessions.to_string(),
            hint: streak_hint,
        },
        StatCardVm {
            label: "Average score",
            value: format_score(stats.average_score),
            hint: stats
                .best_score
                .map(|best| format!("Best {}", format_score(Some(best)))),
        },
    ];

    let busiest = stats
        .activity
        .iter()
        .map(|day| day.sessions)
        .max()
        .unwrap_or(0);
    let activity = stats
        .activity
        .iter()
        .map(|day| ActivityBarVm {
            day_label: format_day(day.date),
            sessions: day.sessions,
            height_pct: if busiest == 0 {
                0
            } else {
                day.sessions.saturating_mul(100) / busiest
            },
        })
        .collect();

    let recent = dashboard
        .recent
        .iter()
        .map(|session| {
            let title = dashboard.quiz_title(session.quiz_id).unwrap_or("Deleted quiz");
            map_recent_session(session, title)
        })
        .collect();

    DashboardVm {
        stat_cards,
        activity,
        recent,
        has_quizzes: dashboard.quiz_count > 0,
    }
}
