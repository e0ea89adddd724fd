// models.rs
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub question: String,
    pub options: Vec<PollOption>,
    /// Vote counter per option id. Holds exactly one entry per option.
    pub responses: HashMap<String, u64>,
}

impl Poll {
    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }

    pub fn total_votes(&self) -> u64 {
        self.responses.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionTally {
    pub option_id: String,
    pub text: String,
    pub votes: u64,
    pub percentage: f64,
}

/// Tally of a poll, in option order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResults {
    pub poll_id: String,
    pub question: String,
    pub total: u64,
    pub options: Vec<OptionTally>,
}

impl PollResults {
    pub fn from_poll(poll: &Poll) -> Self {
        let total = poll.total_votes();
        let options = poll
            .options
            .iter()
            .map(|option| {
                let votes = poll.responses.get(&option.id).copied().unwrap_or(0);
                let percentage = if total == 0 {
                    0.0
                } else {
                    votes as f64 / total as f64 * 100.0
                };
                OptionTally {
                    option_id: option.id.clone(),
                    text: option.text.clone(),
                    votes,
                    percentage,
                }
            })
            .collect();

        Self {
            poll_id: poll.id.clone(),
            question: poll.question.clone(),
            total,
            options,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    ShortAnswer,
    LongAnswer,
    Number,
    #[serde(rename = "radio", alias = "single-choice")]
    SingleChoice,
}

/// A question as submitted by a form author, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct NewQuestion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub text: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl NewQuestion {
    pub fn new(kind: QuestionType, text: impl Into<String>) -> Self {
        Self {
            id: None,
            kind,
            text: text.into(),
            options: None,
            required: None,
            placeholder: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: String,
    pub title: String,
    pub questions: Vec<FormQuestion>,
}

/// A single answer. Values are stored exactly as submitted; numbers keep
/// their JSON representation, so `30` stays an integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Number(Number),
    Null,
}

impl AnswerValue {
    /// Whether this value satisfies a required question.
    pub fn is_answered(&self) -> bool {
        match self {
            AnswerValue::Text(text) => !text.trim().is_empty(),
            AnswerValue::Number(_) => true,
            AnswerValue::Null => false,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        AnswerValue::Number(value.into())
    }
}

impl From<Number> for AnswerValue {
    fn from(value: Number) -> Self {
        AnswerValue::Number(value)
    }
}

/// Answers keyed by question id.
pub type Answers = HashMap<String, AnswerValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: String,
    pub form_id: String,
    pub submitted_at: DateTime<Utc>,
    pub answers: Answers,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn question_type_uses_radio_on_the_wire() {
        let kind: QuestionType = serde_json::from_value(json!("single-choice")).unwrap();
        assert_eq!(kind, QuestionType::SingleChoice);
        assert_eq!(serde_json::to_value(kind).unwrap(), json!("radio"));

        let kind: QuestionType = serde_json::from_value(json!("long-answer")).unwrap();
        assert_eq!(kind, QuestionType::LongAnswer);
    }

    #[test]
    fn answer_values_deserialize_from_json_scalars() {
        let answers: Answers =
            serde_json::from_value(json!({ "a": "hi", "b": 4, "c": null })).unwrap();
        assert_eq!(answers["a"], AnswerValue::Text("hi".into()));
        assert_eq!(answers["b"], AnswerValue::from(4i64));
        assert_eq!(answers["c"], AnswerValue::Null);
    }

    #[test]
    fn numeric_answers_keep_their_json_form() {
        let raw = r#"{"age":30,"big":9007199254740993,"ratio":2.5}"#;
        let answers: Answers = serde_json::from_str(raw).unwrap();
        let back = serde_json::to_value(&answers).unwrap();

        assert_eq!(back, json!({ "age": 30, "big": 9007199254740993u64, "ratio": 2.5 }));
        assert_eq!(back["age"].to_string(), "30");
        assert_eq!(back["big"].to_string(), "9007199254740993");
    }

    #[test]
    fn blank_text_is_not_an_answer() {
        assert!(!AnswerValue::from("   ").is_answered());
        assert!(!AnswerValue::Null.is_answered());
        assert!(AnswerValue::from(0i64).is_answered());
        assert!(AnswerValue::from(" x ").is_answered());
    }

    #[test]
    fn results_of_an_untouched_poll_are_all_zero() {
        let poll = Poll {
            id: "poll-1".into(),
            question: "Q".into(),
            options: vec![
                PollOption {
                    id: "a".into(),
                    text: "A".into(),
                },
                PollOption {
                    id: "b".into(),
                    text: "B".into(),
                },
            ],
            responses: HashMap::from([("a".into(), 0), ("b".into(), 0)]),
        };
        let results = PollResults::from_poll(&poll);
        assert_eq!(results.total, 0);
        assert!(results.options.iter().all(|o| o.percentage == 0.0));
    }
}
