//! Message arguments passed to level methods.

use serde::Serialize;

use crate::error::LogResult;
use crate::pretty::Value;

/// One argument of a log call.
///
/// Text is printed verbatim; everything else goes through the
/// pretty-printer. Build mixed lists with [`messages!`](crate::messages).
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Text(String),
    Structured(Value),
}

impl Message {
    /// Convert a serializable value into a structured message.
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> LogResult<Self> {
        Ok(Self::Structured(Value::from_serialize(value)?))
    }

    /// Structured message describing an error and its sources.
    pub fn error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::Structured(Value::from_error(err))
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for Message {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

impl From<serde_json::Value> for Message {
    fn from(value: serde_json::Value) -> Self {
        Self::Structured(value.into())
    }
}

macro_rules! impl_from_structured {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Message {
                fn from(value: $ty) -> Self {
                    Self::Structured(Value::from(value))
                }
            }
        )*
    };
}

impl_from_structured!(bool, i32, i64, u32, u64, usize, f64);

/// Build a `Vec<Message>` from mixed arguments.
///
/// ```ignore
/// use nicelog::{create_logger, messages};
/// use serde_json::json;
///
/// let log = create_logger("DB");
/// log.info(messages!["connected", json!({"port": 5432})])?;
/// ```
#[macro_export]
macro_rules! messages {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::Message::from($arg)),*]
    };
}
