use crate::{QuestionId, Topic};
use alloc::collections::BTreeMap;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Selected option index for each answered question.
pub type AnswerMap = BTreeMap<QuestionId, u8>;

/// How a session came to an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// The user finished the last question (or finished early).
    Submitted,
    /// The countdown reached zero.
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grade {
    Excellent,
    Good,
    KeepPracticing,
}

impl Grade {
    pub const fn from_percentage(percentage: u8) -> Self {
        match percentage {
            80.. => Self::Excellent,
            60.. => Self::Good,
            _ => Self::KeepPracticing,
        }
    }

    pub const fn headline(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent Work!",
            Self::Good => "Good Job!",
            Self::KeepPracticing => "Keep Practicing!",
        }
    }
}

/// Final statistics of a finished session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub topic: Topic,
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Rounded half-up.
    pub percentage: u8,
    /// Seconds spent before completion.
    pub elapsed: u32,
    pub answers: AnswerMap,
    pub completion: Completion,
}

impl ResultSummary {
    pub const fn grade(&self) -> Grade {
        Grade::from_percentage(self.percentage)
    }
}

fn as_iso_millis<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Body of a result submission to the collector.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission<'a> {
    pub topic: &'a str,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub incorrect_answers: usize,
    pub percentage: u8,
    pub time_spent: u32,
    pub user_answers: &'a AnswerMap,
    #[serde(serialize_with = "as_iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl<'a> Submission<'a> {
    pub fn new(summary: &'a ResultSummary, timestamp: DateTime<Utc>) -> Self {
        Self {
            topic: summary.topic.id(),
            total_questions: summary.total,
            correct_answers: summary.correct,
            incorrect_answers: summary.incorrect,
            percentage: summary.percentage,
            time_spent: summary.elapsed,
            user_answers: &summary.answers,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AnswerMap, Completion, Grade, ResultSummary, Submission};
    use crate::Topic;
    use chrono::DateTime;

    #[test]
    fn grades_by_percentage() {
        assert_eq!(Grade::from_percentage(100), Grade::Excellent);
        assert_eq!(Grade::from_percentage(80), Grade::Excellent);
        assert_eq!(Grade::from_percentage(79), Grade::Good);
        assert_eq!(Grade::from_percentage(60), Grade::Good);
        assert_eq!(Grade::from_percentage(59), Grade::KeepPracticing);
        assert_eq!(Grade::from_percentage(0), Grade::KeepPracticing);
    }

    #[test]
    fn submission_uses_collector_field_names() {
        let answers = AnswerMap::from([(11, 2), (12, 0)]);
        let summary = ResultSummary {
            topic: Topic::Java,
            total: 2,
            correct: 1,
            incorrect: 1,
            percentage: 50,
            elapsed: 95,
            answers,
            completion: Completion::Submitted,
        };
        let timestamp = DateTime::from_timestamp(1_700_000_000, 123_000_000).unwrap();
        let json = serde_json::to_value(Submission::new(&summary, timestamp)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "topic": "java",
                "totalQuestions": 2,
                "correctAnswers": 1,
                "incorrectAnswers": 1,
                "percentage": 50,
                "timeSpent": 95,
                "userAnswers": { "11": 2, "12": 0 },
                "timestamp": "2023-11-14T22:13:20.123Z",
            })
        );
    }
}
