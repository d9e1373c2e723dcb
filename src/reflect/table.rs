//! Per-type member registry.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use super::{Args, Member, Outcome};
use crate::Result;

type MethodFn<T> = Arc<dyn Fn(&T, Args) -> Result<Outcome> + Send + Sync>;
type FieldFn<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

enum Slot<T> {
    Method(MethodFn<T>),
    Field(FieldFn<T>),
}

/// Member registry for a concrete type, usually built once in a static.
///
/// ```rust
/// use instance_actions::reflect::MemberTable;
///
/// struct Counter { step: u32 }
///
/// impl Counter {
///     fn next(&self, from: u32) -> u32 { from + self.step }
/// }
///
/// let table = MemberTable::<Counter>::new()
///     .sync_method("next", |c, args| Ok(c.next(args.arg("next", 0)?)))
///     .field("step", |c| c.step.into());
///
/// let counter = Counter { step: 2 };
/// assert!(table.resolve(&counter, "next").unwrap().is_function());
/// assert!(!table.resolve(&counter, "step").unwrap().is_function());
/// ```
pub struct MemberTable<T> {
    slots: HashMap<&'static str, Slot<T>>,
}

impl<T: 'static> MemberTable<T> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Register a raw method adapter.
    pub fn method<F>(mut self, name: &'static str, f: F) -> Self
    where
        F: Fn(&T, Args) -> Result<Outcome> + Send + Sync + 'static,
    {
        self.slots.insert(name, Slot::Method(Arc::new(f)));
        self
    }

    /// Register a method whose typed result is serialized into a ready outcome.
    pub fn sync_method<F, R>(self, name: &'static str, f: F) -> Self
    where
        F: Fn(&T, Args) -> Result<R> + Send + Sync + 'static,
        R: Serialize,
    {
        self.method(name, move |target, args| {
            let value = f(target, args)?;
            Outcome::serialize(&value)
        })
    }

    /// Register a method that starts work and returns a future. The future must
    /// own everything it needs (`'static`); it is returned to the caller as a
    /// pending outcome and never polled here.
    pub fn async_method<F, Fut, R>(self, name: &'static str, f: F) -> Self
    where
        F: Fn(&T, Args) -> Result<Fut> + Send + Sync + 'static,
        Fut: Future<Output = Result<R>> + Send + 'static,
        R: Serialize,
    {
        self.method(name, move |target, args| {
            let future = f(target, args)?;
            Ok(Outcome::pending(async move {
                let value = future.await?;
                Ok(serde_json::to_value(value)?)
            }))
        })
    }

    /// Register a non-callable member.
    pub fn field<F>(mut self, name: &'static str, f: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.slots.insert(name, Slot::Field(Arc::new(f)));
        self
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

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.keys().map(|k| k.to_string()).collect();
        names.sort();
        names
    }

    /// Bind `name` to `target`.
    pub fn resolve<'a>(&self, target: &'a T, name: &str) -> Option<Member<'a>> {
        match self.slots.get(name)? {
            Slot::Method(method) => {
                let method = Arc::clone(method);
                Some(Member::function(move |args| method(target, args)))
            }
            Slot::Field(field) => Some(Member::Value(field(target))),
        }
    }
}

impl<T: 'static> Default for MemberTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a field for reflection; values that cannot be represented read
/// as `null`.
pub fn to_value_lossy<V: Serialize + ?Sized>(value: &V) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Implement [`Reflect`](crate::reflect::Reflect) for a concrete type from a
/// member list.
///
/// - `fn name(arg: Type, ..);` forwards to a method returning a serializable value.
/// - `fallible fn name(..);` forwards to a method returning `instance_actions::Result<_>`.
/// - `async fn name(..);` forwards to a method returning a `'static` future of a
///   serializable value; the call yields a pending outcome.
/// - `field name;` exposes a serializable field as a non-callable member.
///
/// Groups must appear in that order. Arguments are decoded positionally from
/// [`Args`]; missing positions decode from `null`.
#[macro_export]
macro_rules! impl_reflect {
    (
        $ty:ty {
            $( fn $method:ident ( $( $arg:ident : $arg_ty:ty ),* $(,)? ) ; )*
            $( fallible fn $try_method:ident ( $( $try_arg:ident : $try_arg_ty:ty ),* $(,)? ) ; )*
            $( async fn $async_method:ident ( $( $async_arg:ident : $async_arg_ty:ty ),* $(,)? ) ; )*
            $( field $field:ident ; )*
        }
    ) => {
        const _: () = {
            static TABLE: $crate::__private::Lazy<$crate::reflect::MemberTable<$ty>> =
                $crate::__private::Lazy::new(|| {
                    $crate::reflect::MemberTable::<$ty>::new()
                    $(
                        .sync_method(stringify!($method), |this: &$ty, args: $crate::reflect::Args| {
                            #[allow(unused_mut, unused_variables)]
                            let mut reader = args.reader(stringify!($method));
                            $( let $arg: $arg_ty = reader.take()?; )*
                            ::std::result::Result::Ok(this.$method($($arg),*))
                        })
                    )*
                    $(
                        .method(stringify!($try_method), |this: &$ty, args: $crate::reflect::Args| {
                            #[allow(unused_mut, unused_variables)]
                            let mut reader = args.reader(stringify!($try_method));
                            $( let $try_arg: $try_arg_ty = reader.take()?; )*
                            let value = this.$try_method($($try_arg),*)?;
                            $crate::reflect::Outcome::serialize(&value)
                        })
                    )*
                    $(
                        .async_method(stringify!($async_method), |this: &$ty, args: $crate::reflect::Args| {
                            #[allow(unused_mut, unused_variables)]
                            let mut reader = args.reader(stringify!($async_method));
                            $( let $async_arg: $async_arg_ty = reader.take()?; )*
                            let future = this.$async_method($($async_arg),*);
                            ::std::result::Result::Ok(async move { $crate::Result::Ok(future.await) })
                        })
                    )*
                    $(
                        .field(stringify!($field), |this: &$ty| {
                            $crate::reflect::to_value_lossy(&this.$field)
                        })
                    )*
                });

            impl $crate::reflect::Reflect for $ty {
                fn member(&self, name: &str) -> ::std::option::Option<$crate::reflect::Member<'_>> {
                    TABLE.resolve(self, name)
                }

                fn member_names(&self) -> ::std::vec::Vec<::std::string::String> {
                    TABLE.names()
                }
            }
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Reflect;
    use crate::Error;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Grid {
        total: usize,
        reloads: AtomicUsize,
    }

    impl Grid {
        fn reload(&self) -> String {
            self.reloads.fetch_add(1, Ordering::SeqCst);
            "ok".to_string()
        }

        fn scroll_to(&self, row: usize, column: Option<String>) -> String {
            format!("{}:{}", row, column.unwrap_or_default())
        }

        fn remove(&self, row: usize) -> crate::Result<usize> {
            if row >= self.total {
                return Err(Error::invocation("remove", "row out of range"));
            }
            Ok(row)
        }

        fn load_data(&self, rows: Vec<u32>) -> impl std::future::Future<Output = usize> + Send + 'static {
            async move { rows.len() }
        }
    }

    crate::impl_reflect! {
        Grid {
            fn reload();
            fn scroll_to(row: usize, column: Option<String>);
            fallible fn remove(row: usize);
            async fn load_data(rows: Vec<u32>);
            field total;
        }
    }

    fn grid() -> Grid {
        Grid {
            total: 5,
            reloads: AtomicUsize::new(0),
        }
    }

    fn call(grid: &Grid, name: &str, args: Args) -> Result<Outcome> {
        match grid.member(name) {
            Some(Member::Function(f)) => f(args),
            other => panic!("{} resolved to {:?}", name, other),
        }
    }

    #[test]
    fn test_table_registration() {
        let table = MemberTable::<Grid>::new()
            .sync_method("reload", |g, _| Ok(g.reload()))
            .field("total", |g| json!(g.total));
        assert_eq!(table.len(), 2);
        assert!(table.contains("reload"));
        assert!(!table.contains("missing"));
        assert_eq!(table.names(), vec!["reload", "total"]);
    }

    #[test]
    fn test_macro_sync_method() {
        let g = grid();
        let outcome = call(&g, "reload", Args::new()).unwrap();
        assert_eq!(outcome.into_ready(), Some(json!("ok")));
        assert_eq!(g.reloads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_macro_optional_argument() {
        let g = grid();
        let outcome = call(&g, "scroll_to", crate::args![3]).unwrap();
        assert_eq!(outcome.into_ready(), Some(json!("3:")));
        let outcome = call(&g, "scroll_to", crate::args![3, "name"]).unwrap();
        assert_eq!(outcome.into_ready(), Some(json!("3:name")));
    }

    #[test]
    fn test_macro_try_method_propagates_member_error() {
        let g = grid();
        assert_eq!(
            call(&g, "remove", crate::args![2]).unwrap().into_ready(),
            Some(json!(2))
        );
        let err = call(&g, "remove", crate::args![9]).unwrap_err();
        assert_eq!(err.to_string(), "remove failed: row out of range");
    }

    #[test]
    fn test_macro_async_method_is_pending() {
        let g = grid();
        let outcome = call(&g, "load_data", crate::args![json!([1, 2, 3])]).unwrap();
        assert!(outcome.is_pending());
        assert_eq!(tokio_test::block_on(outcome.resolve()).unwrap(), json!(3));
    }

    #[test]
    fn test_macro_field_is_value() {
        let g = grid();
        match g.member("total") {
            Some(Member::Value(v)) => assert_eq!(v, json!(5)),
            other => panic!("unexpected {:?}", other),
        }
        assert!(g.member("missing").is_none());
        assert_eq!(
            g.member_names(),
            vec!["load_data", "reload", "remove", "scroll_to", "total"]
        );
    }
}
