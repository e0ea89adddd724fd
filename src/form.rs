// src/form.rs
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, StoreError};
use crate::ids::{IdGenerator, UuidIds};
use crate::models::{Answers, Form, FormQuestion, FormResponse, NewQuestion, QuestionType};

/// In-memory collection of forms and their submitted responses.
///
/// Responses are append-only and only point back at their form by id.
pub struct FormStore {
    forms: Vec<Form>,
    responses: Vec<FormResponse>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStore {
    pub fn new() -> Self {
        Self::with_parts(Arc::new(UuidIds), Arc::new(SystemClock))
    }

    pub fn with_parts(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            forms: Vec::new(),
            responses: Vec::new(),
            ids,
            clock,
        }
    }

    /// Validates and normalizes `questions`, then stores a new form.
    pub fn create(&mut self, title: &str, questions: Vec<NewQuestion>) -> Result<String> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyFormTitle);
        }
        if questions.is_empty() {
            return Err(StoreError::NoQuestions);
        }

        let mut normalized = Vec::with_capacity(questions.len());
        let mut seen = HashSet::new();
        for (index, question) in questions.into_iter().enumerate() {
            let question = self.normalize(index + 1, question)?;
            if !seen.insert(question.id.clone()) {
                return Err(StoreError::DuplicateQuestionId(question.id));
            }
            normalized.push(question);
        }

        let form = Form {
            id: self.ids.next_id("form"),
            title: title.to_string(),
            questions: normalized,
        };
        let id = form.id.clone();

        info!(form_id = %id, questions = form.questions.len(), "Form added");
        self.forms.push(form);
        Ok(id)
    }

    fn normalize(&self, position: usize, question: NewQuestion) -> Result<FormQuestion> {
        let text = question.text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyQuestionText { position });
        }

        let options = match question.kind {
            QuestionType::SingleChoice => {
                let choices: Vec<String> = question
                    .options
                    .unwrap_or_default()
                    .iter()
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect();
                if choices.is_empty() {
                    return Err(StoreError::MissingChoices {
                        question: text.to_string(),
                    });
                }
                Some(choices)
            }
            _ => None,
        };

        let id = question
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.ids.next_id("q"));

        Ok(FormQuestion {
            id,
            kind: question.kind,
            text: text.to_string(),
            options,
            required: question.required.unwrap_or(false),
            placeholder: question
                .placeholder
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        })
    }

    /// Stores a submission and returns the new response id.
    ///
    /// Every required question must have a non-null, non-blank answer. Extra
    /// or missing optional answers are accepted as-is.
    pub fn submit_response(&mut self, form_id: &str, answers: Answers) -> Result<String> {
        let form = self
            .forms
            .iter()
            .find(|f| f.id == form_id)
            .ok_or_else(|| StoreError::FormNotFound(form_id.to_string()))?;

        if let Some(q) = form.questions.iter().find(|q| {
            q.required && !answers.get(&q.id).is_some_and(|a| a.is_answered())
        }) {
            return Err(StoreError::UnansweredQuestion {
                question_id: q.id.clone(),
                question: q.text.clone(),
            });
        }

        if answers.len() != form.questions.len() {
            warn!(
                %form_id,
                answers = answers.len(),
                questions = form.questions.len(),
                "Number of answers doesn't match number of questions"
            );
        }

        let response = FormResponse {
            id: self.ids.next_id("resp"),
            form_id: form_id.to_string(),
            submitted_at: self.clock.now(),
            answers,
        };
        let id = response.id.clone();

        debug!(%form_id, response_id = %id, "Form response added");
        self.responses.push(response);
        Ok(id)
    }

    pub fn get(&self, form_id: &str) -> Option<&Form> {
        self.forms.iter().find(|f| f.id == form_id)
    }

    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    /// All responses in submission order.
    pub fn responses(&self) -> &[FormResponse] {
        &self.responses
    }

    /// Responses for one form, most recent first. Equal timestamps keep the
    /// later submission first.
    pub fn responses_for(&self, form_id: &str) -> Vec<&FormResponse> {
        let mut matching: Vec<&FormResponse> = self
            .responses
            .iter()
            .rev()
            .filter(|r| r.form_id == form_id)
            .collect();
        matching.sort_by_key(|r| Reverse(r.submitted_at));
        matching
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::ids::SequentialIds;
    use crate::models::AnswerValue;
    use chrono::{Duration, TimeZone, Utc};

    fn store() -> (FormStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        ));
        let store = FormStore::with_parts(Arc::new(SequentialIds::new()), clock.clone());
        (store, clock)
    }

    #[test]
    fn normalization_drops_options_from_free_text_questions() {
        let (mut forms, _) = store();
        let id = forms
            .create(
                " Survey ",
                vec![
                    NewQuestion::new(QuestionType::ShortAnswer, " Name ")
                        .with_options(["ignored"])
                        .with_placeholder("   "),
                    NewQuestion::new(QuestionType::SingleChoice, "Pick")
                        .with_options([" Yes ", "", "No"])
                        .required(),
                    NewQuestion::new(QuestionType::Number, "Age").with_placeholder("  42 "),
                ],
            )
            .unwrap();

        let form = forms.get(&id).unwrap();
        assert_eq!(form.title, "Survey");
        assert_eq!(form.questions[0].text, "Name");
        assert_eq!(form.questions[0].options, None);
        assert_eq!(form.questions[0].placeholder, None);
        assert!(!form.questions[0].required);
        assert_eq!(
            form.questions[1].options,
            Some(vec!["Yes".to_string(), "No".to_string()])
        );
        assert!(form.questions[1].required);
        assert_eq!(form.questions[2].placeholder.as_deref(), Some("42"));
    }

    #[test]
    fn provided_question_ids_are_kept_and_blank_ones_replaced() {
        let (mut forms, _) = store();
        let id = forms
            .create(
                "T",
                vec![
                    NewQuestion::new(QuestionType::Number, "Age").with_id("age"),
                    NewQuestion::new(QuestionType::LongAnswer, "Story").with_id("  "),
                ],
            )
            .unwrap();

        let form = forms.get(&id).unwrap();
        assert_eq!(form.questions[0].id, "age");
        assert_eq!(form.questions[1].id, "q-1");
    }

    #[test]
    fn duplicate_question_ids_are_rejected() {
        let (mut forms, _) = store();
        let err = forms
            .create(
                "T",
                vec![
                    NewQuestion::new(QuestionType::Number, "A").with_id("x"),
                    NewQuestion::new(QuestionType::Number, "B").with_id("x"),
                ],
            )
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateQuestionId("x".into()));
        assert!(forms.is_empty());
    }

    #[test]
    fn empty_question_text_reports_its_position() {
        let (mut forms, _) = store();
        let err = forms
            .create(
                "T",
                vec![
                    NewQuestion::new(QuestionType::Number, "A"),
                    NewQuestion::new(QuestionType::Number, "  "),
                ],
            )
            .unwrap_err();
        assert_eq!(err, StoreError::EmptyQuestionText { position: 2 });
    }

    #[test]
    fn responses_for_lists_most_recent_first() {
        let (mut forms, clock) = store();
        let form_id = forms
            .create("T", vec![NewQuestion::new(QuestionType::ShortAnswer, "Q")])
            .unwrap();

        let first = forms.submit_response(&form_id, Answers::new()).unwrap();
        clock.advance(Duration::minutes(5));
        let second = forms.submit_response(&form_id, Answers::new()).unwrap();
        let third = forms.submit_response(&form_id, Answers::new()).unwrap();

        let order: Vec<&str> = forms
            .responses_for(&form_id)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(order, [third.as_str(), second.as_str(), first.as_str()]);
    }

    #[test]
    fn answers_are_stored_without_coercion() {
        let (mut forms, _) = store();
        let form_id = forms
            .create("T", vec![NewQuestion::new(QuestionType::Number, "N").with_id("n")])
            .unwrap();
        let answers = Answers::from([
            ("n".to_string(), AnswerValue::Text("12".into())),
            ("extra".to_string(), AnswerValue::Null),
        ]);
        forms.submit_response(&form_id, answers.clone()).unwrap();

        assert_eq!(forms.responses()[0].answers, answers);
    }
}
