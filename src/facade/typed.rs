//! Statically typed action handles.
//!
//! [`instance_actions!`](crate::instance_actions) generates a handle exposing
//! exactly the methods listed for a target type. Each generated method
//! snapshots the cell, fails with `Unmounted` when nothing is mounted and
//! otherwise calls the method on the instance, returning its value unchanged
//! (futures included, un-awaited). Members not listed simply do not exist on
//! the handle, so there is no `NotAFunction` path here.

/// Declare a typed action handle over [`Facade<T>`](crate::facade::Facade).
///
/// ```rust
/// use instance_actions::facade::use_instance;
/// use instance_actions::instance_actions;
///
/// pub struct Grid { total: usize }
///
/// impl Grid {
///     pub fn reload(&self) -> &'static str { "ok" }
///     pub fn page_count(&self, page_size: usize) -> usize { self.total.div_ceil(page_size) }
/// }
///
/// instance_actions! {
///     /// Actions available on a mounted grid.
///     pub struct GridActions for Grid {
///         fn reload(&self) -> &'static str;
///         fn page_count(&self, page_size: usize) -> usize;
///     }
/// }
///
/// let (cell, facade) = use_instance::<Grid>("Grid");
/// let actions = GridActions::new(facade);
/// assert!(actions.reload().unwrap_err().is_unmounted());
///
/// cell.mount(Grid { total: 25 });
/// assert_eq!(actions.reload().unwrap(), "ok");
/// assert_eq!(actions.page_count(10).unwrap(), 3);
/// ```
#[macro_export]
macro_rules! instance_actions {
    (@ret) => { () };
    (@ret $ret:ty) => { $ret };
    (
        $(#[$meta:meta])*
        $vis:vis struct $actions:ident for $target:ty {
            $(
                $(#[$fn_meta:meta])*
                fn $method:ident ( &self $(, $arg:ident : $arg_ty:ty )* $(,)? ) $( -> $ret:ty )? ;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        $vis struct $actions {
            facade: $crate::facade::Facade<$target>,
        }

        impl $actions {
            pub fn new(facade: $crate::facade::Facade<$target>) -> Self {
                Self { facade }
            }

            pub fn facade(&self) -> &$crate::facade::Facade<$target> {
                &self.facade
            }

            $(
                $(#[$fn_meta])*
                pub fn $method(&self $(, $arg: $arg_ty)*) -> $crate::Result<$crate::instance_actions!(@ret $($ret)?)> {
                    self.facade.with(move |target| target.$method($($arg),*))
                }
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::facade::use_instance;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Table {
        loads: Arc<AtomicUsize>,
        rows: Vec<String>,
    }

    impl Table {
        fn clear(&self) {
            self.loads.store(0, Ordering::SeqCst);
        }

        fn row(&self, index: usize) -> Option<String> {
            self.rows.get(index).cloned()
        }

        fn load_column(&self, columns: Vec<String>) -> BoxFuture<'static, usize> {
            let loads = Arc::clone(&self.loads);
            async move {
                loads.fetch_add(1, Ordering::SeqCst);
                columns.len()
            }
            .boxed()
        }
    }

    crate::instance_actions! {
        struct TableActions for Table {
            fn clear(&self);
            fn row(&self, index: usize) -> Option<String>;
            /// Returns the loader future without polling it.
            fn load_column(&self, columns: Vec<String>) -> BoxFuture<'static, usize>;
        }
    }

    fn table(loads: &Arc<AtomicUsize>) -> Table {
        Table {
            loads: Arc::clone(loads),
            rows: vec!["a".into(), "b".into()],
        }
    }

    #[test]
    fn test_unmounted_typed_call() {
        let (_cell, facade) = use_instance::<Table>("Table");
        let actions = TableActions::new(facade);
        let err = actions.row(0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Component instance Table has not been mounted yet"
        );
    }

    #[test]
    fn test_typed_call_after_mount() {
        let loads = Arc::new(AtomicUsize::new(3));
        let (cell, facade) = use_instance::<Table>("Table");
        let actions = TableActions::new(facade);
        cell.mount(table(&loads));

        assert_eq!(actions.row(1).unwrap(), Some("b".to_string()));
        assert_eq!(actions.row(5).unwrap(), None);
        actions.clear().unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_future_returned_unpolled() {
        let loads = Arc::new(AtomicUsize::new(0));
        let (cell, facade) = use_instance::<Table>("Table");
        let actions = TableActions::new(facade);
        cell.mount(table(&loads));

        let pending = actions.load_column(vec!["id".into(), "name".into()]).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 0);
        assert_eq!(tokio_test::block_on(pending), 2);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_follows_remount() {
        let loads = Arc::new(AtomicUsize::new(0));
        let (cell, facade) = use_instance::<Table>("Table");
        let actions = TableActions::new(facade);

        cell.mount(table(&loads));
        assert_eq!(actions.row(0).unwrap(), Some("a".to_string()));

        cell.unmount();
        assert!(actions.row(0).unwrap_err().is_unmounted());

        cell.mount(Table {
            loads: Arc::clone(&loads),
            rows: vec!["z".into()],
        });
        assert_eq!(actions.row(0).unwrap(), Some("z".to_string()));
        assert_eq!(actions.facade().name(), "Table");
    }
}
