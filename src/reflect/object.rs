//! Objects assembled at runtime.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::{Args, Member, Outcome, Reflect};
use crate::Result;

type ObjectFn = Arc<dyn Fn(Args) -> Result<Outcome> + Send + Sync>;

#[derive(Clone)]
enum Slot {
    Function(ObjectFn),
    Value(Value),
}

/// String keyed object whose members are closures or plain values.
///
/// Useful for instances whose shape is only known at runtime, and for test
/// doubles of real components.
#[derive(Clone, Default)]
pub struct DynamicObject {
    slots: HashMap<String, Slot>,
}

impl DynamicObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fn<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Args) -> Result<Outcome> + Send + Sync + 'static,
    {
        self.insert_fn(name, f);
        self
    }

    pub fn with_async_fn<F, Fut>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.insert_async_fn(name, f);
        self
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_value(name, value);
        self
    }

    pub fn insert_fn<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(Args) -> Result<Outcome> + Send + Sync + 'static,
    {
        self.slots.insert(name.into(), Slot::Function(Arc::new(f)));
    }

    pub fn insert_async_fn<F, Fut>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.insert_fn(name, move |args| Ok(Outcome::pending(f(args))));
    }

    pub fn insert_value(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.slots.insert(name.into(), Slot::Value(value.into()));
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.slots.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Reflect for DynamicObject {
    fn member(&self, name: &str) -> Option<Member<'_>> {
        match self.slots.get(name)? {
            Slot::Function(f) => {
                let f = Arc::clone(f);
                Some(Member::function(move |args| f(args)))
            }
            Slot::Value(value) => Some(Member::Value(value.clone())),
        }
    }

    fn member_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for DynamicObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicObject")
            .field("members", &self.member_names())
            .finish()
    }
}
