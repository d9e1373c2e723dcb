//! # instance-actions
//!
//! Deferred-binding handles for instances that only exist after a lifecycle
//! event, such as a UI component that has to mount before it can be driven.
//!
//! ## Overview
//!
//! The collaborator that owns the instance lifecycle keeps an
//! [`InstanceCell`] and mounts or unmounts the instance as it comes and goes.
//! Everyone else gets a [`Facade`] immediately and calls through it later.
//! Each call reads the cell at call time, so a handle never holds on to a
//! stale instance.
//!
//! ## Core Behavior
//!
//! - **Deferred**: handles are created before the instance exists
//! - **Fresh**: every call resolves against the instance mounted right now
//! - **Predictable failures**: [`Error::Unmounted`] when nothing is mounted,
//!   [`Error::NotAFunction`] when the member is missing or not callable
//! - **Transparent**: arguments and results, including pending futures, pass
//!   through untouched
//!
//! ## Quick Start
//!
//! ```rust
//! use instance_actions::prelude::*;
//!
//! let (cell, table) = use_instance::<DynamicObject>("Table");
//!
//! let err = table.call("reload", args![]).unwrap_err();
//! assert_eq!(err.to_string(), "Component instance Table has not been mounted yet");
//!
//! cell.mount(
//!     DynamicObject::new()
//!         .with_fn("reload", |_| Ok(Outcome::ready("ok")))
//!         .with_value("total", 5),
//! );
//! assert_eq!(table.call("reload", args![]).unwrap().into_ready(), Some("ok".into()));
//! assert_eq!(
//!     table.call("total", args![]).unwrap_err().to_string(),
//!     "total is not a function"
//! );
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cell`] | Single-writer reference cell and its read-only view |
//! | [`reflect`] | Name based member lookup, call arguments and outcomes |
//! | [`facade`] | Forwarding handles, typed action handles and configuration |
//! | [`error`] | Error taxonomy |

pub mod cell;
pub mod facade;
pub mod reflect;

pub use cell::{BindingState, InstanceCell, InstanceRef};
pub use facade::prelude;
pub use facade::{create_facade, use_instance, Action, Facade, FacadeConfig, Property};
pub use reflect::{Args, Outcome, Reflect};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
