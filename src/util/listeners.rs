//! Single-threaded observer registry.
//!
//! `emit` snapshots the registered callbacks before invoking them, so a
//! callback may subscribe, unsubscribe, or trigger a nested `emit` without
//! hitting a `RefCell` double borrow.

#[cfg(test)]
#[path = "listeners_test.rs"]
mod listeners_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`Listeners::add`]; pass it back to remove the callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<A> = Rc<dyn Fn(&A)>;

pub struct Listeners<A: ?Sized> {
    next: Cell<u64>,
    entries: RefCell<Vec<(ListenerId, Callback<A>)>>,
}

impl<A: ?Sized> Default for Listeners<A> {
    fn default() -> Self {
        Self { next: Cell::new(0), entries: RefCell::new(Vec::new()) }
    }
}

impl<A: ?Sized> Listeners<A> {
    pub fn add(&self, callback: impl Fn(&A) + 'static) -> ListenerId {
        let id = ListenerId(self.next.get());
        self.next.set(id.0 + 1);
        self.entries.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Returns `true` if `id` was registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry, _)| *entry != id);
        entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn emit(&self, arg: &A) {
        let snapshot: Vec<Callback<A>> = self.entries.borrow().iter().map(|(_, cb)| cb.clone()).collect();
        for callback in snapshot {
            callback(arg);
        }
    }
}
