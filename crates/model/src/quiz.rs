use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Deserializer, Serialize};

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

pub type QuestionId = u32;

fn deserialize_nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?;
    Ok(text.unwrap_or_default())
}

/// Question record as served by the question service.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    pub id: QuestionId,
    #[serde(default, deserialize_with = "deserialize_nullable_text")]
    pub question_title: String,
    #[serde(default, deserialize_with = "deserialize_nullable_text")]
    pub option_a: String,
    #[serde(default, deserialize_with = "deserialize_nullable_text")]
    pub option_b: String,
    #[serde(default, deserialize_with = "deserialize_nullable_text")]
    pub option_c: String,
    #[serde(default, deserialize_with = "deserialize_nullable_text")]
    pub option_d: String,
    /// Either a letter from `A` to `D` or the literal text of the right option.
    #[serde(default, deserialize_with = "deserialize_nullable_text")]
    pub right_answer: String,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Canonical question with a resolved answer index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub options: [String; OPTION_COUNT],
    /// Index of the correct option. Always within `0..OPTION_COUNT`.
    pub answer: u8,
    pub difficulty: Option<String>,
    pub category: Option<String>,
}

/// Resolves the answer indicator against the options in source order.
///
/// A single letter from `A` to `D` (in any case) wins outright. Otherwise the
/// indicator is compared case-insensitively against the option texts, and the
/// first match wins. If nothing matches, the first option is assumed correct.
pub fn resolve_answer(indicator: &str, options: &[String]) -> u8 {
    if let [letter] = indicator.as_bytes() {
        if let b'A'..=b'D' = letter.to_ascii_uppercase() {
            return letter.to_ascii_uppercase() - b'A';
        }
    }

    let needle = indicator.to_lowercase();
    options
        .iter()
        .position(|option| option.to_lowercase() == needle)
        .and_then(|index| u8::try_from(index).ok())
        .unwrap_or(0)
}

impl From<RawQuestion> for Question {
    fn from(raw: RawQuestion) -> Self {
        let RawQuestion {
            id,
            question_title,
            option_a,
            option_b,
            option_c,
            option_d,
            right_answer,
            difficulty_level,
            category,
        } = raw;
        let options = [option_a, option_b, option_c, option_d];
        let answer = resolve_answer(&right_answer, &options);
        Self { id, prompt: question_title, options, answer, difficulty: difficulty_level, category }
    }
}

/// Converts service records into canonical questions. Never fails.
pub fn normalize(raw: Vec<RawQuestion>) -> Vec<Question> {
    raw.into_iter().map(Question::from).collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize, resolve_answer, Question, RawQuestion};

    fn raw(right_answer: &str) -> RawQuestion {
        RawQuestion {
            id: 7,
            question_title: String::from("Which keyword declares a constant in Java?"),
            option_a: String::from("const"),
            option_b: String::from("final"),
            option_c: String::from("static"),
            option_d: String::from("B"),
            right_answer: String::from(right_answer),
            difficulty_level: Some(String::from("Easy")),
            category: Some(String::from("Java")),
        }
    }

    fn options() -> [String; 4] {
        [String::from("Alpha"), String::from("Beta"), String::from("Gamma"), String::from("Delta")]
    }

    #[test]
    fn resolves_letters_in_any_case() {
        for (letter, index) in [("A", 0), ("b", 1), ("C", 2), ("d", 3)] {
            assert_eq!(resolve_answer(letter, &options()), index);
        }
    }

    #[test]
    fn letters_win_over_option_text() {
        // Option D literally reads "B", but the letter still points at option B.
        assert_eq!(Question::from(raw("B")).answer, 1);
    }

    #[test]
    fn resolves_option_text_case_insensitively() {
        assert_eq!(resolve_answer("gamma", &options()), 2);
        assert_eq!(resolve_answer("DELTA", &options()), 3);
        assert_eq!(Question::from(raw("Final")).answer, 1);
    }

    #[test]
    fn falls_back_to_first_option() {
        assert_eq!(resolve_answer("E", &options()), 0);
        assert_eq!(resolve_answer("", &options()), 0);
        assert_eq!(resolve_answer("Epsilon", &options()), 0);
        assert_eq!(resolve_answer(" B", &options()), 0);
    }

    #[test]
    fn keeps_source_order_and_metadata() {
        let question = Question::from(raw("a"));
        assert_eq!(question.id, 7);
        assert_eq!(question.prompt, "Which keyword declares a constant in Java?");
        assert_eq!(question.options, ["const", "final", "static", "B"]);
        assert_eq!(question.answer, 0);
        assert_eq!(question.difficulty.as_deref(), Some("Easy"));
        assert_eq!(question.category.as_deref(), Some("Java"));
    }

    #[test]
    fn parses_service_records() {
        let json = r#"[
            {
                "id": 3,
                "questionTitle": "What does SQL stand for?",
                "optionA": "Structured Query Language",
                "optionB": "Simple Query Language",
                "optionC": "Sequential Query Logic",
                "optionD": null,
                "rightAnswer": "structured query language",
                "difficultyLevel": "Easy",
                "category": "DBMS"
            },
            {
                "id": 4,
                "questionTitle": "Which normal form removes transitive dependencies?",
                "optionA": "1NF",
                "optionB": "2NF",
                "optionC": "3NF",
                "optionD": "BCNF",
                "rightAnswer": "C"
            }
        ]"#;
        let raw: Vec<RawQuestion> = serde_json::from_str(json).unwrap();
        let questions = normalize(raw);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].answer, 0);
        assert_eq!(questions[0].options[3], "");
        assert_eq!(questions[1].answer, 2);
        assert!(questions[1].difficulty.is_none());
        assert!(questions[1].category.is_none());
    }
}
