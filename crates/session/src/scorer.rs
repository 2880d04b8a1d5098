use crate::SESSION_DURATION;
use model::{AnswerMap, Completion, Question, ResultSummary, Topic};

/// Rounds `correct / total` to a whole percentage, halves rounding up.
pub fn percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (correct * 200 + total) / (total * 2);
    u8::try_from(rounded).unwrap_or(100)
}

/// Tallies the answers against the questions. Unanswered questions count as
/// incorrect, so `correct + incorrect == total` always holds.
pub fn score(
    topic: &Topic,
    questions: &[Question],
    answers: &AnswerMap,
    remaining: u32,
    completion: Completion,
) -> ResultSummary {
    let total = questions.len();
    let correct = questions.iter().filter(|question| answers.get(&question.id) == Some(&question.answer)).count();
    ResultSummary {
        topic: topic.clone(),
        total,
        correct,
        incorrect: total - correct,
        percentage: percentage(correct, total),
        elapsed: SESSION_DURATION.saturating_sub(remaining),
        answers: answers.clone(),
        completion,
    }
}

#[cfg(test)]
mod tests {
    use super::{percentage, score};
    use model::{AnswerMap, Completion, Question, Topic};

    fn question(id: u32, answer: u8) -> Question {
        Question {
            id,
            prompt: format!("Question {id}"),
            options: [String::from("A"), String::from("B"), String::from("C"), String::from("D")],
            answer,
            difficulty: None,
            category: None,
        }
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(percentage(3, 5), 60);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 7), 0);
        assert_eq!(percentage(7, 7), 100);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn unanswered_questions_are_incorrect() {
        let questions = [question(1, 0), question(2, 1), question(3, 2)];
        let answers = AnswerMap::from([(1, 0)]);
        let summary = score(&Topic::Java, &questions, &answers, 1000, Completion::Expired);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.incorrect, 2);
        assert_eq!(summary.percentage, 33);
        assert_eq!(summary.elapsed, 200);
        assert_eq!(summary.completion, Completion::Expired);
    }

    #[test]
    fn elapsed_time_never_underflows() {
        let questions = [question(1, 0)];
        let summary = score(&Topic::Java, &questions, &AnswerMap::new(), 5000, Completion::Submitted);
        assert_eq!(summary.elapsed, 0);
    }
}
