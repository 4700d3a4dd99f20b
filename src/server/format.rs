//! Flattening of stored questions into response records.

use serde::Serialize;

use crate::db::{JoinedQuestion, Question};

/// Either the display name (when the listing joined categories) or the raw id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Name(String),
    Id(i64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedQuestion {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub difficulty: i64,
    pub category: CategoryRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

impl From<Question> for FormattedQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            answer: q.answer,
            difficulty: q.difficulty,
            category: CategoryRef::Id(q.category),
            category_id: None,
        }
    }
}

impl From<JoinedQuestion> for FormattedQuestion {
    fn from(joined: JoinedQuestion) -> Self {
        let q = joined.question;
        Self {
            id: q.id,
            question: q.question,
            answer: q.answer,
            difficulty: q.difficulty,
            category: CategoryRef::Name(joined.category_type),
            category_id: Some(q.category),
        }
    }
}
