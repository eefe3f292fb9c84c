//! Event bus between the tutor controller and the UI.
//!
//! Single-threaded (WASM), shared through `Rc<RefCell<..>>`. The controller
//! pushes and the UI drains once per frame. Browsers stop calling the frame
//! loop for hidden tabs, so the queue is bounded and sheds its oldest
//! events once full.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tutor_types::event::TutorEvent;

/// Events kept while nobody drains
pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<TutorEvent>>>,
    capacity: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            queue: Rc::new(RefCell::new(VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)))),
            capacity,
        }
    }

    pub fn emit(&self, event: TutorEvent) {
        let mut queue = self.queue.borrow_mut();
        if queue.len() >= self.capacity {
            if let Some(dropped) = queue.pop_front() {
                log::debug!("Event queue full, dropping {:?}", dropped);
            }
        }
        queue.push_back(event);
    }

    /// Everything pending, oldest first.
    pub fn drain(&self) -> Vec<TutorEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_pending()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
