//! Multi-observer notification channels.
//!
//! Every event of a generated interface is exposed as a [`Signal`]. Any
//! number of observers may connect to it; when the native library delivers
//! the event, the generated callback calls [`Signal::emit`] and every
//! connected observer runs, in connection order, on the dispatching thread.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use wlbind::Signal;
//!
//! let on_done: Signal<u32> = Signal::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let sink = Rc::clone(&seen);
//! on_done.connect(move |data| sink.set(*data));
//! on_done.emit(&42);
//!
//! assert_eq!(seen.get(), 42);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

type Slot<A> = Rc<RefCell<dyn FnMut(&A)>>;

/// Identifier returned by [`Signal::connect`], used to disconnect an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Connection(u64);

/// A notification channel carrying payloads of type `A`.
///
/// Payloads are passed to observers by reference, so owned values such as
/// `String` or `Vec<u8>` are built once per delivery regardless of how many
/// observers are connected.
pub struct Signal<A> {
    slots: RefCell<Vec<(Connection, Slot<A>)>>,
    next_id: Cell<u64>,
}

impl<A> Default for Signal<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Signal<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("observers", &self.len())
            .finish()
    }
}

impl<A> Signal<A> {
    /// Create a signal with no observers.
    pub fn new() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Connect an observer.
    ///
    /// Observers connected while an emission is in progress are first called
    /// on the next emission.
    pub fn connect<F>(&self, observer: F) -> Connection
    where
        F: FnMut(&A) + 'static,
    {
        let id = Connection(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let slot: Slot<A> = Rc::new(RefCell::new(observer));
        self.slots.borrow_mut().push((id, slot));
        id
    }

    /// Disconnect an observer. Returns `false` if it was not connected.
    pub fn disconnect(&self, connection: Connection) -> bool {
        let mut slots = self.slots.borrow_mut();
        let before = slots.len();
        slots.retain(|(id, _)| *id != connection);
        slots.len() != before
    }

    /// Disconnect every observer.
    pub fn disconnect_all(&self) {
        self.slots.borrow_mut().clear();
    }

    /// Deliver `payload` to every connected observer, in connection order.
    ///
    /// An observer that re-emits the same signal from inside its own call
    /// is skipped for the nested emission.
    pub fn emit(&self, payload: &A) {
        let snapshot: Vec<Slot<A>> = self
            .slots
            .borrow()
            .iter()
            .map(|(_, slot)| Rc::clone(slot))
            .collect();

        for slot in snapshot {
            if let Ok(mut observer) = slot.try_borrow_mut() {
                (*observer)(payload);
            }
        }
    }

    /// Number of connected observers.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Whether no observer is connected.
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_every_observer_in_order() {
        let signal: Signal<i32> = Signal::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            signal.connect(move |value| log.borrow_mut().push(format!("{}{}", tag, value)));
        }

        signal.emit(&7);

        assert_eq!(*log.borrow(), vec!["a7", "b7", "c7"]);
    }

    #[test]
    fn test_disconnect_removes_only_that_observer() {
        let signal: Signal<()> = Signal::new();
        let hits = Rc::new(Cell::new(0));

        let first = {
            let hits = Rc::clone(&hits);
            signal.connect(move |_| hits.set(hits.get() + 1))
        };
        {
            let hits = Rc::clone(&hits);
            signal.connect(move |_| hits.set(hits.get() + 10));
        }

        assert!(signal.disconnect(first));
        assert!(!signal.disconnect(first));
        signal.emit(&());

        assert_eq!(hits.get(), 10);
        assert_eq!(signal.len(), 1);
    }

    #[test]
    fn test_connect_during_emit_is_deferred() {
        let signal: Rc<Signal<u8>> = Rc::new(Signal::new());
        let late_hits = Rc::new(Cell::new(0));

        {
            let inner = Rc::clone(&signal);
            let late_hits = Rc::clone(&late_hits);
            signal.connect(move |_| {
                let late_hits = Rc::clone(&late_hits);
                inner.connect(move |_| late_hits.set(late_hits.get() + 1));
            });
        }

        signal.emit(&0);
        assert_eq!(late_hits.get(), 0);
        assert_eq!(signal.len(), 2);

        signal.emit(&0);
        assert_eq!(late_hits.get(), 1);
    }

    #[test]
    fn test_reentrant_emit_skips_running_observer() {
        let signal: Rc<Signal<u8>> = Rc::new(Signal::new());
        let depth = Rc::new(Cell::new(0));

        {
            let inner = Rc::clone(&signal);
            let depth = Rc::clone(&depth);
            signal.connect(move |level| {
                depth.set(depth.get() + 1);
                if *level == 0 {
                    inner.emit(&1);
                }
            });
        }

        signal.emit(&0);
        assert_eq!(depth.get(), 1);
    }

    #[test]
    fn test_empty_signal() {
        let signal: Signal<String> = Signal::default();
        assert!(signal.is_empty());
        signal.emit(&"nobody listens".to_string());
        signal.disconnect_all();
        assert_eq!(format!("{:?}", signal), "Signal { observers: 0 }");
    }
}
