//! Interrupt-safe queue of requested effects.
//!
//! A button handler or another interrupt context pushes effect slots; the
//! [`Sequencer`](crate::Sequencer) takes the oldest request at the next effect
//! boundary. Built on `critical-section` and `heapless::Deque`, so it can
//! live in a `static`.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::effect::EffectSlot;

/// Returned when the queue already holds `SIZE` requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueFull(pub EffectSlot);

/// Bounded queue of effect requests
pub struct EffectQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<EffectSlot, SIZE>>>,
}

impl<const SIZE: usize> EffectQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a copyable handle for the requesting side
    pub const fn requester(&self) -> Requester<'_, SIZE> {
        Requester { queue: self }
    }

    /// Queue an effect to play after the current one
    pub fn request(&self, slot: EffectSlot) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(slot).map_err(QueueFull)
        })
    }

    /// Take the oldest pending request
    pub fn next_request(&self) -> Option<EffectSlot> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of pending requests
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every pending request
    pub fn clear(&self) {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().clear());
    }
}

impl<const SIZE: usize> Default for EffectQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Requesting handle for an [`EffectQueue`]
#[derive(Clone, Copy)]
pub struct Requester<'a, const SIZE: usize> {
    queue: &'a EffectQueue<SIZE>,
}

impl<const SIZE: usize> Requester<'_, SIZE> {
    /// Queue an effect to play after the current one
    pub fn request(&self, slot: EffectSlot) -> Result<(), QueueFull> {
        self.queue.request(slot)
    }
}
