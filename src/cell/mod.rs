//! Reference cell holding a lazily-available instance.
//!
//! The cell is split into a writer half and a reader half:
//!
//! - [`InstanceCell`] is owned by the collaborator that controls the instance
//!   lifecycle. It is the only type able to mount or unmount, and it is not
//!   `Clone`, so there is exactly one writer.
//! - [`InstanceRef`] is a cheap, cloneable read-only view handed to facades.
//!
//! Both halves share one `ArcSwapOption`, so readers take lock-free snapshots
//! and a snapshot stays valid for as long as the reader holds it, even if the
//! writer unmounts in the meantime.

use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;

/// Binding state of a cell, as observed at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingState {
    /// No instance is mounted.
    Unbound,
    /// An instance is mounted.
    Bound,
}

impl BindingState {
    fn of<T>(slot: &ArcSwapOption<T>) -> Self {
        if slot.load().is_some() {
            BindingState::Bound
        } else {
            BindingState::Unbound
        }
    }
}

/// Writer half of the reference cell.
pub struct InstanceCell<T> {
    slot: Arc<ArcSwapOption<T>>,
}

impl<T> InstanceCell<T> {
    /// Create an unset cell.
    pub fn new() -> Self {
        Self {
            slot: Arc::new(ArcSwapOption::empty()),
        }
    }

    /// Mount `instance`, replacing any instance that is currently bound.
    pub fn mount(&self, instance: T) -> Arc<T> {
        let instance = Arc::new(instance);
        self.mount_arc(Arc::clone(&instance));
        instance
    }

    /// Mount an already shared instance.
    pub fn mount_arc(&self, instance: Arc<T>) {
        let previous = self.slot.swap(Some(instance));
        tracing::debug!(
            instance = std::any::type_name::<T>(),
            remount = previous.is_some(),
            "instance mounted"
        );
    }

    /// Clear the cell, returning the instance that was bound, if any.
    pub fn unmount(&self) -> Option<Arc<T>> {
        let previous = self.slot.swap(None);
        if previous.is_some() {
            tracing::debug!(instance = std::any::type_name::<T>(), "instance unmounted");
        }
        previous
    }

    /// Read-only view for facades.
    pub fn reader(&self) -> InstanceRef<T> {
        InstanceRef {
            slot: Arc::clone(&self.slot),
        }
    }

    pub fn load(&self) -> Option<Arc<T>> {
        self.slot.load_full()
    }

    pub fn state(&self) -> BindingState {
        BindingState::of(&self.slot)
    }

    pub fn is_mounted(&self) -> bool {
        self.state() == BindingState::Bound
    }
}

impl<T> Default for InstanceCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for InstanceCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceCell")
            .field("instance", &std::any::type_name::<T>())
            .field("state", &self.state())
            .finish()
    }
}

/// Reader half of the reference cell.
pub struct InstanceRef<T> {
    slot: Arc<ArcSwapOption<T>>,
}

impl<T> InstanceRef<T> {
    /// Snapshot of the current instance.
    pub fn load(&self) -> Option<Arc<T>> {
        self.slot.load_full()
    }

    pub fn state(&self) -> BindingState {
        BindingState::of(&self.slot)
    }

    pub fn is_mounted(&self) -> bool {
        self.state() == BindingState::Bound
    }
}

impl<T> Clone for InstanceRef<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> fmt::Debug for InstanceRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceRef")
            .field("instance", &std::any::type_name::<T>())
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[derive(Debug, PartialEq)]
    struct Grid {
        rows: usize,
    }

    #[test]
    fn test_cell_starts_unbound() {
        let cell: InstanceCell<Grid> = InstanceCell::new();
        assert_eq!(cell.state(), BindingState::Unbound);
        assert!(cell.load().is_none());
        assert!(!cell.reader().is_mounted());
    }

    #[test]
    fn test_reader_observes_mount_and_unmount() {
        let cell = InstanceCell::new();
        let reader = cell.reader();

        let mounted = cell.mount(Grid { rows: 3 });
        assert_eq!(reader.state(), BindingState::Bound);
        assert!(Arc::ptr_eq(&reader.load().unwrap(), &mounted));

        let previous = cell.unmount().unwrap();
        assert!(Arc::ptr_eq(&previous, &mounted));
        assert_eq!(reader.state(), BindingState::Unbound);
        assert!(cell.unmount().is_none());
    }

    #[test]
    fn test_remount_replaces_instance() {
        let cell = InstanceCell::new();
        let reader = cell.reader();
        cell.mount(Grid { rows: 1 });
        cell.mount(Grid { rows: 2 });
        assert_eq!(reader.load().unwrap().rows, 2);
    }

    #[test]
    fn test_snapshot_survives_unmount() {
        let cell = InstanceCell::new();
        let reader = cell.reader();
        cell.mount(Grid { rows: 7 });

        let snapshot = reader.load().unwrap();
        cell.unmount();
        assert_eq!(snapshot.rows, 7);
        assert!(reader.load().is_none());
    }

    #[test]
    fn test_readers_across_threads() {
        let cell = InstanceCell::new();
        cell.mount(Grid { rows: 4 });

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reader = cell.reader();
                thread::spawn(move || reader.load().map(|g| g.rows))
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap(), Some(4));
        }
    }
}
