//! Positional call arguments.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result};

/// Ordered call arguments, forwarded to members unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Vec<Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Append one argument.
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Decode the argument at `index`. A missing position decodes from `null`,
    /// so `Option<_>` parameters may be omitted by the caller.
    pub fn arg<A: DeserializeOwned>(&self, member: &str, index: usize) -> Result<A> {
        let value = self.values.get(index).cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| Error::argument(member, index, e.to_string()))
    }

    /// Sequential decoder used by generated member adapters.
    pub fn reader<'a>(&'a self, member: &'a str) -> ArgReader<'a> {
        ArgReader {
            args: self,
            member,
            index: 0,
        }
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self::from_values(values)
    }
}

impl FromIterator<Value> for Args {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(iter.into_iter().collect())
    }
}

impl IntoIterator for Args {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Walks [`Args`] left to right, decoding one position per `take`.
pub struct ArgReader<'a> {
    args: &'a Args,
    member: &'a str,
    index: usize,
}

impl ArgReader<'_> {
    pub fn take<A: DeserializeOwned>(&mut self) -> Result<A> {
        let value = self.args.arg(self.member, self.index);
        self.index += 1;
        value
    }
}

/// Build [`Args`] from anything convertible into a JSON value.
///
/// ```rust
/// use instance_actions::args;
///
/// let args = args!["name", 3, true];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::reflect::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::reflect::Args::from_values(::std::vec![
            $(::std::convert::Into::<$crate::reflect::Value>::into($value)),+
        ])
    };
}
