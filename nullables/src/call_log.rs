//! Shared call recording.

use std::cell::RefCell;
use std::rc::Rc;

/// Calls recorded by a nullable after it has been boxed into a backend.
///
/// Clones share the same log, so a test keeps one handle and hands the
/// nullable itself to the code under test.
#[derive(Debug)]
pub struct CallLog<T> {
    entries: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone> CallLog<T> {
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn record(&self, entry: T) {
        self.entries.borrow_mut().push(entry);
    }

    pub fn entries(&self) -> Vec<T> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl<T> Clone for CallLog<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<T: Clone> Default for CallLog<T> {
    fn default() -> Self {
        Self::new()
    }
}
