//! Minimal prelude for application code.
//!
//! Goal: reduce import noise without hiding important concepts.

pub use crate::cell::{BindingState, InstanceCell, InstanceRef};
pub use crate::facade::{create_facade, use_instance, Action, Facade, FacadeConfig, Property};
pub use crate::reflect::{Args, DynamicObject, Member, MemberTable, Outcome, Reflect};
pub use crate::{args, impl_reflect, instance_actions};
pub use crate::{Error, Result};
