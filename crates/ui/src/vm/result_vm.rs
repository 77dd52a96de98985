use quiz_core::model::{BreakdownItem, FlashcardId, TestResult, Verdict};

use crate::vm::time_fmt::format_duration;

/// One row of the per-question breakdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub flashcard_id: FlashcardId,
    pub number: usize,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub verdict_label: &'static str,
    pub verdict_class: &'static str,
    pub feedback: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub score_label: String,
    pub summary_label: String,
    pub headline: &'static str,
    pub skipped_label: Option<String>,
    pub duration_label: Option<String>,
    pub rows: Vec<ResultRowVm>,
}

#[must_use]
pub fn map_result(result: &TestResult) -> ResultVm {
    let skipped = result.skipped();
    ResultVm {
        score_label: format!("{}%", result.final_score()),
        summary_label: format!("{} of {} correct", result.correct(), result.total()),
        headline: headline(result.final_score()),
        skipped_label: (skipped > 0).then(|| {
            if skipped == 1 {
                "1 question skipped".to_string()
            } else {
                format!("{skipped} questions skipped")
            }
        }),
        duration_label: result
            .duration_secs()
            .map(|secs| format!("Time: {}", format_duration(secs))),
        rows: result
            .breakdown()
            .iter()
            .enumerate()
            .map(|(idx, item)| map_row(idx, item))
            .collect(),
    }
}

fn map_row(idx: usize, item: &BreakdownItem) -> ResultRowVm {
    let (verdict_label, verdict_class) = match item.verdict {
        Verdict::Correct => ("Correct", "verdict-correct"),
        Verdict::Incorrect => ("Incorrect", "verdict-incorrect"),
        Verdict::Skipped => ("Skipped", "verdict-skipped"),
    };
    let user_answer = if item.user_answer.is_empty() {
        "I don't know".to_string()
    } else {
        item.user_answer.clone()
    };
    ResultRowVm {
        flashcard_id: item.flashcard_id,
        number: idx + 1,
        question: item.question.clone(),
        user_answer,
        correct_answer: item.correct_answer.clone(),
        verdict_label,
        verdict_class,
        feedback: item.feedback.clone(),
    }
}

fn headline(score: u32) -> &'static str {
    match score {
        90.. => "Excellent!",
        70..=89 => "Well done",
        50..=69 => "Getting there",
        _ => "Keep practicing",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn item(id: u64, verdict: Verdict, user_answer: &str) -> BreakdownItem {
        BreakdownItem {
            flashcard_id: FlashcardId::new(id),
            question: format!("Q{id}"),
            user_answer: user_answer.into(),
            correct_answer: format!("A{id}"),
            verdict,
            feedback: None,
        }
    }

    #[test]
    fn maps_labels_and_rows() {
        let result = TestResult::from_breakdown(
            vec![
                item(1, Verdict::Correct, "A1"),
                item(2, Verdict::Incorrect, "nope"),
                item(3, Verdict::Skipped, ""),
                item(4, Verdict::Correct, "A4"),
            ],
            Some(Duration::seconds(95)),
        )
        .unwrap();

        let vm = map_result(&result);
        assert_eq!(vm.score_label, "50%");
        assert_eq!(vm.summary_label, "2 of 4 correct");
        assert_eq!(vm.headline, "Getting there");
        assert_eq!(vm.skipped_label.as_deref(), Some("1 question skipped"));
        assert_eq!(vm.duration_label.as_deref(), Some("Time: 1m 35s"));
        assert_eq!(vm.rows.len(), 4);
        assert_eq!(vm.rows[2].user_answer, "I don't know");
        assert_eq!(vm.rows[2].verdict_label, "Skipped");
        assert_eq!(vm.rows[3].number, 4);
    }

    #[test]
    fn perfect_score_has_no_skip_label() {
        let result =
            TestResult::from_breakdown(vec![item(1, Verdict::Correct, "A1")], None).unwrap();
        let vm = map_result(&result);
        assert_eq!(vm.headline, "Excellent!");
        assert_eq!(vm.skipped_label, None);
        assert_eq!(vm.duration_label, None);
    }
}
