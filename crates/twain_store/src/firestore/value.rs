//! Firestore REST typed-value encoding.
//!
//! Document fields travel as single-key objects naming their type, e.g.
//! `{"integerValue": "3"}`. Integers are decimal strings on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use twain_core::{NewQuestionGroup, QuestionGroup};
use twain_error::{StoreError, StoreErrorKind};

/// A typed Firestore field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    /// Explicit null
    NullValue(()),
    /// Boolean
    BooleanValue(bool),
    /// 64-bit integer, encoded as a decimal string
    IntegerValue(String),
    /// Double
    DoubleValue(f64),
    /// RFC 3339 timestamp
    TimestampValue(DateTime<Utc>),
    /// UTF-8 string
    StringValue(String),
    /// Ordered list of values
    ArrayValue(ArrayValue),
}

/// Payload of [`Value::ArrayValue`]; an empty array omits `values`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrayValue {
    /// Elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::StringValue(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::IntegerValue(value.to_string())
    }
}

/// A document as read from or written to the REST API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name; empty on writes
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Field map
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Document {
    /// Last path segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    fn invalid(&self, detail: impl std::fmt::Display) -> StoreError {
        StoreError::new(StoreErrorKind::InvalidDocument(format!(
            "{}: {}",
            self.id(),
            detail
        )))
    }

    fn string(&self, field: &str) -> Result<String, StoreError> {
        match self.fields.get(field) {
            Some(Value::StringValue(s)) => Ok(s.clone()),
            Some(other) => Err(self.invalid(format!("{} is not a string: {:?}", field, other))),
            None => Err(self.invalid(format!("missing {}", field))),
        }
    }

    fn parsed<T: FromStr>(&self, field: &str) -> Result<T, StoreError> {
        let raw = self.string(field)?;
        raw.parse()
            .map_err(|_| self.invalid(format!("unknown {} {:?}", field, raw)))
    }

    fn integer_or_zero(&self, field: &str) -> Result<i64, StoreError> {
        match self.fields.get(field) {
            None | Some(Value::NullValue(())) => Ok(0),
            Some(Value::IntegerValue(s)) => s
                .parse()
                .map_err(|_| self.invalid(format!("{} is not an integer: {}", field, s))),
            Some(Value::DoubleValue(d)) => Ok(*d as i64),
            Some(other) => Err(self.invalid(format!("{} is not a number: {:?}", field, other))),
        }
    }
}

/// Encode a new group as a document body.
pub fn encode_group(group: &NewQuestionGroup) -> Document {
    let mut fields = BTreeMap::new();
    fields.insert("title".to_string(), Value::from(group.title.as_str()));
    fields.insert(
        "questions".to_string(),
        Value::ArrayValue(ArrayValue {
            values: group
                .questions
                .iter()
                .map(|q| Value::from(q.as_str()))
                .collect(),
        }),
    );
    fields.insert("theme".to_string(), Value::from(group.theme.as_ref()));
    fields.insert(
        "difficulty".to_string(),
        Value::from(group.difficulty.as_ref()),
    );
    fields.insert("caption".to_string(), Value::from(group.caption.as_str()));
    fields.insert(
        "createdAt".to_string(),
        Value::TimestampValue(group.created_at),
    );
    fields.insert("order".to_string(), Value::from(group.order));
    fields.insert("isActive".to_string(), Value::BooleanValue(group.is_active));
    Document {
        name: String::new(),
        fields,
    }
}

/// Decode a stored document.
///
/// A missing `order` reads as 0 and a missing `isActive` as true.
pub fn decode_group(document: &Document) -> Result<QuestionGroup, StoreError> {
    let questions = match document.fields.get("questions") {
        Some(Value::ArrayValue(array)) => array
            .values
            .iter()
            .map(|value| match value {
                Value::StringValue(s) => Ok(s.clone()),
                other => Err(document.invalid(format!("question is not a string: {:?}", other))),
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(document.invalid("questions is not an array")),
    };

    let created_at = match document.fields.get("createdAt") {
        Some(Value::TimestampValue(ts)) => *ts,
        _ => return Err(document.invalid("createdAt is not a timestamp")),
    };

    let is_active = match document.fields.get("isActive") {
        Some(Value::BooleanValue(b)) => *b,
        _ => true,
    };

    Ok(QuestionGroup {
        id: document.id().to_string(),
        title: document.string("title")?,
        questions,
        theme: document.parsed("theme")?,
        difficulty: document.parsed("difficulty")?,
        caption: document.string("caption").unwrap_or_default(),
        created_at,
        order: document.integer_or_zero("order")?,
        is_active,
    })
}

/// Document body containing only an `order` field.
pub fn order_patch(order: i64) -> Document {
    let mut fields = BTreeMap::new();
    fields.insert("order".to_string(), Value::from(order));
    Document {
        name: String::new(),
        fields,
    }
}

/// Encode a write probe.
pub fn encode_probe(probe: &crate::WriteProbe) -> Document {
    let mut fields = BTreeMap::new();
    fields.insert("test".to_string(), Value::BooleanValue(probe.test));
    fields.insert(
        "timestamp".to_string(),
        Value::TimestampValue(probe.timestamp),
    );
    fields.insert("userId".to_string(), Value::from(probe.user_id.as_str()));
    Document {
        name: String::new(),
        fields,
    }
}
