//! Dynamic member model.
//!
//! Rust has no runtime property interception, so instances opt in to name
//! based lookup by implementing [`Reflect`]. A lookup yields a [`Member`]:
//! either a function bound to the instance, or a plain value. The facade only
//! forwards calls to functions; anything else is reported as not callable.
//!
//! Three ways to implement [`Reflect`]:
//!
//! | Approach | Use when |
//! |----------|----------|
//! | [`impl_reflect!`](crate::impl_reflect) | a concrete type with a fixed set of methods and fields |
//! | [`MemberTable`] | hand-written adapters (custom argument handling, fallible members) |
//! | [`DynamicObject`] | ad-hoc objects assembled at runtime |

mod args;
mod object;
mod outcome;
mod table;

pub use args::{ArgReader, Args};
pub use object::DynamicObject;
pub use outcome::Outcome;
pub use serde_json::Value;
pub use table::{to_value_lossy, MemberTable};

use crate::Result;
use std::fmt;

/// A function bound to one instance, consumed by a single call.
pub type MemberFn<'a> = Box<dyn FnOnce(Args) -> Result<Outcome> + 'a>;

/// A member resolved by name on a live instance.
pub enum Member<'a> {
    Function(MemberFn<'a>),
    Value(Value),
}

impl<'a> Member<'a> {
    pub fn function<F>(f: F) -> Self
    where
        F: FnOnce(Args) -> Result<Outcome> + 'a,
    {
        Member::Function(Box::new(f))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Member::Function(_))
    }
}

impl fmt::Debug for Member<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Function(_) => f.write_str("Function(..)"),
            Member::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// Name based member lookup on an instance.
pub trait Reflect: Send + Sync + 'static {
    /// Resolve `name` against this instance. `None` means no such member.
    fn member(&self, name: &str) -> Option<Member<'_>>;

    /// Names this instance currently answers to, sorted.
    fn member_names(&self) -> Vec<String> {
        Vec::new()
    }
}
