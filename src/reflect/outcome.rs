//! Results of forwarded calls.

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;

use crate::Result;

/// What a member returned.
///
/// Members that start asynchronous work return `Pending`; the facade hands the
/// future back without polling it, so the caller decides when (and whether)
/// to await.
pub enum Outcome {
    Ready(Value),
    Pending(BoxFuture<'static, Result<Value>>),
}

impl Outcome {
    pub fn ready(value: impl Into<Value>) -> Self {
        Outcome::Ready(value.into())
    }

    pub fn unit() -> Self {
        Outcome::Ready(Value::Null)
    }

    /// Encode a typed return value.
    pub fn serialize<R: Serialize + ?Sized>(value: &R) -> Result<Self> {
        Ok(Outcome::Ready(serde_json::to_value(value)?))
    }

    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value>> + Send + 'static,
    {
        Outcome::Pending(Box::pin(future))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending(_))
    }

    /// The value of a ready outcome; `None` if the outcome is still pending.
    pub fn into_ready(self) -> Option<Value> {
        match self {
            Outcome::Ready(value) => Some(value),
            Outcome::Pending(_) => None,
        }
    }

    /// Await the outcome if it is pending.
    pub async fn resolve(self) -> Result<Value> {
        match self {
            Outcome::Ready(value) => Ok(value),
            Outcome::Pending(future) => future.await,
        }
    }

    pub async fn resolve_as<R: DeserializeOwned>(self) -> Result<R> {
        let value = self.resolve().await?;
        Ok(serde_json::from_value(value)?)
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Outcome::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

impl From<Value> for Outcome {
    fn from(value: Value) -> Self {
        Outcome::Ready(value)
    }
}
