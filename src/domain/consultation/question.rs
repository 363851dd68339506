//! Question - the single prompt currently on offer to the user.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::askable::{AskableOption, AskableSpec, QuestionKind};
use crate::domain::foundation::AskableId;

/// Sequence number of the seeded welcome placeholder.
pub const PLACEHOLDER_SEQ: u64 = 0;

/// The current prompt, replaced (never mutated) each time the engine advances.
///
/// `seq` identifies the question instance. The same askable asked twice
/// produces two questions with distinct `seq` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub seq: u64,
    pub id: AskableId,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: Option<QuestionKind>,
    #[serde(default)]
    pub options: Vec<AskableOption>,
    #[serde(default)]
    pub default: Option<Value>,
    /// Extra line shown above the prompt, e.g. why a previous answer was refused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl Question {
    /// The seeded placeholder shown before the first real question.
    pub fn welcome(text: impl Into<String>) -> Self {
        Self {
            seq: PLACEHOLDER_SEQ,
            id: AskableId::placeholder(),
            text: text.into(),
            kind: None,
            options: Vec::new(),
            default: None,
            notice: None,
        }
    }

    pub fn from_spec(seq: u64, spec: &AskableSpec) -> Self {
        Self {
            seq,
            id: spec.id.clone(),
            text: spec.text.clone(),
            kind: Some(spec.kind),
            options: spec.options.clone(),
            default: spec.default.clone(),
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.seq == PLACEHOLDER_SEQ
    }

    /// Input control appropriate to this question. `None` for the placeholder.
    pub fn widget(&self) -> Option<InputWidget> {
        let kind = self.kind?;
        let widget = match kind {
            QuestionKind::SingleChoice => InputWidget::ExclusiveChoice {
                options: self.options.clone(),
            },
            QuestionKind::MultiChoice => InputWidget::MultiSelect {
                options: self.options.clone(),
            },
            QuestionKind::Number | QuestionKind::Date => InputWidget::Freeform {
                default: self.default.as_ref().map(default_text),
            },
        };
        Some(widget)
    }
}

fn default_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Input control the presentation layer builds for a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputWidget {
    /// Exactly one option may be picked.
    ExclusiveChoice { options: Vec<AskableOption> },
    /// Any subset of options, kept in pick order.
    MultiSelect { options: Vec<AskableOption> },
    /// Free text; `default` is used when the user enters nothing.
    Freeform { default: Option<String> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(kind: QuestionKind, default: Option<Value>) -> AskableSpec {
        let options = if kind.is_choice() {
            vec![AskableOption::new("dry", "Dry"), AskableOption::new("oily", "Oily")]
        } else {
            vec![]
        };
        AskableSpec::new(AskableId::new("q").unwrap(), "Question?", kind, options, default).unwrap()
    }

    #[test]
    fn welcome_is_placeholder_without_widget() {
        let q = Question::welcome("Hello");
        assert!(q.is_placeholder());
        assert_eq!(q.widget(), None);
        assert_eq!(q.id, AskableId::placeholder());
    }

    #[test]
    fn from_spec_copies_fields() {
        let q = Question::from_spec(4, &spec(QuestionKind::SingleChoice, None));
        assert_eq!(q.seq, 4);
        assert_eq!(q.text, "Question?");
        assert_eq!(q.kind, Some(QuestionKind::SingleChoice));
        assert_eq!(q.options.len(), 2);
        assert!(!q.is_placeholder());
    }

    #[test]
    fn widget_follows_kind() {
        let single = Question::from_spec(1, &spec(QuestionKind::SingleChoice, None));
        assert!(matches!(single.widget(), Some(InputWidget::ExclusiveChoice { .. })));

        let multi = Question::from_spec(1, &spec(QuestionKind::MultiChoice, None));
        assert!(matches!(multi.widget(), Some(InputWidget::MultiSelect { .. })));

        let date = Question::from_spec(1, &spec(QuestionKind::Date, Some(json!("2024-01-01"))));
        assert_eq!(
            date.widget(),
            Some(InputWidget::Freeform { default: Some("2024-01-01".to_string()) })
        );

        let number = Question::from_spec(1, &spec(QuestionKind::Number, Some(json!(30))));
        assert_eq!(number.widget(), Some(InputWidget::Freeform { default: Some("30".to_string()) }));
    }

    #[test]
    fn serializes_kind_under_type_key() {
        let q = Question::from_spec(2, &spec(QuestionKind::Number, None));
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["type"], json!("number"));
        assert_eq!(value["id"], json!("q"));
        assert!(value.get("notice").is_none());
    }
}
