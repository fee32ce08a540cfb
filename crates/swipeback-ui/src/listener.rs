use smallvec::SmallVec;
use std::rc::Rc;

use crate::drag::DragState;
use crate::edge::Edge;

/// Observer for swipe progress. Every method defaults to a no-op.
pub trait SwipeListener {
    /// Progress changed; `percent` is 0.0 at rest and reaches 1.0 when dismissed.
    fn on_swipe(&self, _percent: f32) {}

    /// The drag engine changed state. `edge` is the edge being tracked, if any.
    fn on_state_change(&self, _edge: Option<Edge>, _state: DragState) {}

    /// Progress went over the threshold during an active drag.
    fn on_swipe_over_threshold(&self) {}

    /// Progress reached 1.0. Fired once per layout.
    fn on_finish(&self) {}
}

pub(crate) type Snapshot = SmallVec<[Rc<dyn SwipeListener>; 4]>;

/// Ordered listener handles. Insertion order is notification order and the
/// same handle may be registered more than once.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: SmallVec<[Rc<dyn SwipeListener>; 2]>,
}

impl ListenerRegistry {
    pub fn add(&mut self, listener: Rc<dyn SwipeListener>) {
        self.listeners.push(listener);
    }

    /// Removes the first registration of `listener`. Returns whether one was found.
    pub fn remove(&mut self, listener: &Rc<dyn SwipeListener>) -> bool {
        match self.listeners.iter().position(|l| Rc::ptr_eq(l, listener)) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        self.listeners.iter().cloned().collect()
    }
}
