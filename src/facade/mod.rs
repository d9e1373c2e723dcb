//! Deferred method-forwarding facade.
//!
//! A [`Facade`] is handed out before the instance it fronts exists. Every call
//! made through it reads the [`InstanceRef`] at call time:
//!
//! - nothing mounted: [`Error::Unmounted`] carrying the facade name
//! - member missing or not a function: [`Error::NotAFunction`] carrying the member name
//! - otherwise the member runs with the arguments unchanged and its
//!   [`Outcome`] is returned as-is (pending outcomes are not awaited)
//!
//! Getting a property never fails; only calling it can.
//!
//! ```rust
//! use instance_actions::facade::use_instance;
//! use instance_actions::reflect::{DynamicObject, Outcome};
//! use instance_actions::args;
//!
//! let (cell, table) = use_instance::<DynamicObject>("Table");
//! let reload = table.action("reload");
//! assert!(reload.call(args![]).unwrap_err().is_unmounted());
//!
//! cell.mount(DynamicObject::new().with_fn("reload", |_| Ok(Outcome::ready("ok"))));
//! assert_eq!(reload.call(args![]).unwrap().into_ready(), Some("ok".into()));
//! ```

pub mod config;
pub mod prelude;
mod typed;

pub use config::{FacadeConfig, DEFAULT_RAW_ACCESSOR};

use std::fmt;
use std::sync::Arc;

use crate::cell::{BindingState, InstanceCell, InstanceRef};
use crate::reflect::{Args, Member, Outcome, Reflect};
use crate::{Error, Result};

/// Build a facade over `cell` named `name`, with the default raw accessor.
pub fn create_facade<T>(cell: InstanceRef<T>, name: impl Into<String>) -> Facade<T> {
    Facade::new(cell, name)
}

/// Create an unset cell together with a facade over it.
///
/// The collaborator that owns the instance lifecycle keeps the cell; callers
/// get the facade.
pub fn use_instance<T>(name: impl Into<String>) -> (InstanceCell<T>, Facade<T>) {
    let cell = InstanceCell::new();
    let facade = Facade::new(cell.reader(), name);
    (cell, facade)
}

/// Handle forwarding calls to whatever instance the cell holds at call time.
pub struct Facade<T> {
    cell: InstanceRef<T>,
    name: Arc<str>,
    raw_accessor: Option<Arc<str>>,
}

impl<T> Facade<T> {
    pub fn new(cell: InstanceRef<T>, name: impl Into<String>) -> Self {
        Self {
            cell,
            name: Arc::from(name.into()),
            raw_accessor: Some(Arc::from(DEFAULT_RAW_ACCESSOR)),
        }
    }

    pub fn from_config(cell: InstanceRef<T>, config: &FacadeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cell,
            name: Arc::from(config.name.as_str()),
            raw_accessor: config.raw_accessor.as_deref().map(Arc::<str>::from),
        })
    }

    pub fn with_raw_accessor(mut self, accessor: impl Into<String>) -> Self {
        self.raw_accessor = Some(Arc::from(accessor.into()));
        self
    }

    /// Forward every property name, including the default accessor name.
    pub fn without_raw_accessor(mut self) -> Self {
        self.raw_accessor = None;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw_accessor(&self) -> Option<&str> {
        self.raw_accessor.as_deref()
    }

    pub fn state(&self) -> BindingState {
        self.cell.state()
    }

    pub fn is_mounted(&self) -> bool {
        self.cell.is_mounted()
    }

    /// The mounted instance itself.
    pub fn instance(&self) -> Result<Arc<T>> {
        self.cell.load().ok_or_else(|| Error::unmounted(&*self.name))
    }

    pub fn try_instance(&self) -> Option<Arc<T>> {
        self.cell.load()
    }

    /// Run `f` against a snapshot of the mounted instance. This is the typed
    /// path used by [`instance_actions!`](crate::instance_actions).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R> {
        let instance = self.instance()?;
        tracing::trace!(facade = %self.name, "forwarding typed call");
        Ok(f(&instance))
    }
}

impl<T: Reflect> Facade<T> {
    /// Property access. Returns the raw instance for the reserved accessor
    /// name while something is mounted, and a forwarding [`Action`] otherwise.
    pub fn get(&self, property: &str) -> Property<T> {
        if self.raw_accessor.as_deref() == Some(property) {
            if let Some(instance) = self.cell.load() {
                return Property::Instance(instance);
            }
        }
        Property::Action(self.action(property))
    }

    /// Forwarder for `property`. Nothing is resolved until it is called.
    pub fn action(&self, property: impl Into<String>) -> Action<T> {
        Action {
            cell: self.cell.clone(),
            name: Arc::clone(&self.name),
            property: Arc::from(property.into()),
        }
    }

    pub fn call(&self, property: &str, args: Args) -> Result<Outcome> {
        self.action(property).call(args)
    }
}

impl<T> Clone for Facade<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            name: Arc::clone(&self.name),
            raw_accessor: self.raw_accessor.clone(),
        }
    }
}

impl<T> fmt::Debug for Facade<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facade")
            .field("name", &self.name)
            .field("raw_accessor", &self.raw_accessor)
            .field("state", &self.cell.state())
            .finish()
    }
}

/// Result of [`Facade::get`].
pub enum Property<T> {
    /// The reserved accessor, answered with the mounted instance.
    Instance(Arc<T>),
    Action(Action<T>),
}

impl<T> Property<T> {
    pub fn into_instance(self) -> Option<Arc<T>> {
        match self {
            Property::Instance(instance) => Some(instance),
            Property::Action(_) => None,
        }
    }

    pub fn into_action(self) -> Option<Action<T>> {
        match self {
            Property::Instance(_) => None,
            Property::Action(action) => Some(action),
        }
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Instance(_) => f.write_str("Instance(..)"),
            Property::Action(action) => f.debug_tuple("Action").field(action).finish(),
        }
    }
}

/// A forwarding function for one property name.
pub struct Action<T> {
    cell: InstanceRef<T>,
    name: Arc<str>,
    property: Arc<str>,
}

impl<T> Action<T> {
    pub fn property(&self) -> &str {
        &self.property
    }
}

impl<T: Reflect> Action<T> {
    /// Resolve the property on the instance mounted right now and invoke it.
    pub fn call(&self, args: Args) -> Result<Outcome> {
        let instance = self
            .cell
            .load()
            .ok_or_else(|| Error::unmounted(&*self.name))?;

        tracing::trace!(
            facade = %self.name,
            member = %self.property,
            args = args.len(),
            "forwarding call"
        );

        let member = instance.member(&self.property);
        match member {
            Some(Member::Function(f)) => f(args),
            Some(Member::Value(_)) | None => Err(Error::not_a_function(&*self.property)),
        }
    }
}

impl<T> Clone for Action<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            name: Arc::clone(&self.name),
            property: Arc::clone(&self.property),
        }
    }
}

impl<T> fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("facade", &self.name)
            .field("property", &self.property)
            .finish()
    }
}
