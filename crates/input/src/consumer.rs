use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Keeps a pushed consumer alive.
///
/// The stack owns the consumer closure; this guard owns its liveness. Once
/// the guard is dropped the consumer is treated as expired and is pruned
/// the next time a dispatch reaches it, without being called.
#[must_use = "dropping the subscription expires the consumer immediately"]
pub struct Subscription {
    alive: Rc<Cell<bool>>,
}

impl Subscription {
    /// True while the consumer is still registered: not finished, not
    /// pruned and its stack not dropped.
    pub fn is_active(&self) -> bool {
        self.alive.get()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

struct Entry<E> {
    alive: Rc<Cell<bool>>,
    consumer: Rc<RefCell<dyn FnMut(&E) -> bool>>,
}

impl<E> Entry<E> {
    fn expired(&self) -> bool {
        !self.alive.get()
    }
}

impl<E> Drop for Entry<E> {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

/// Most-recent-first chain of consumers for one event kind.
///
/// A dispatch offers the event to the topmost live consumer only. Expired
/// consumers above it are discarded on the way down. A consumer returning
/// `true` is finished and removed after its call.
///
/// The stack is not borrowed while a consumer runs, so a consumer may push
/// onto the stack that is calling it. A consumer pushed that way is on top
/// for the next dispatch.
pub struct ConsumerStack<E> {
    // The last element is the top of the stack.
    entries: RefCell<Vec<Entry<E>>>,
}

impl<E> ConsumerStack<E> {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Put `consumer` on top of the stack.
    pub fn push<F>(&self, consumer: F) -> Subscription
    where
        F: FnMut(&E) -> bool + 'static,
    {
        let alive = Rc::new(Cell::new(true));
        self.entries.borrow_mut().push(Entry {
            alive: alive.clone(),
            consumer: Rc::new(RefCell::new(consumer)),
        });
        Subscription { alive }
    }

    /// Offer `event` to the topmost live consumer.
    ///
    /// Returns whether a live consumer was called. A consumer that is
    /// already running further up the call stack is not re-entered; the
    /// nested event is dropped.
    pub fn dispatch(&self, event: &E) -> bool {
        loop {
            let (alive, consumer) = {
                let mut entries = self.entries.borrow_mut();
                let Some(top) = entries.last() else {
                    return false;
                };
                if top.expired() {
                    let gone = entries.pop();
                    drop(entries);
                    drop(gone);
                    tracing::trace!("pruned expired consumer");
                    continue;
                }
                (top.alive.clone(), top.consumer.clone())
            };

            let done = match consumer.try_borrow_mut() {
                Ok(mut consumer) => (&mut *consumer)(event),
                Err(_) => {
                    tracing::warn!("consumer is already handling an event, nested event dropped");
                    return false;
                }
            };
            if done {
                self.remove(&alive);
            }
            return true;
        }
    }

    // Removes by identity: the consumer may have pushed others above itself.
    fn remove(&self, alive: &Rc<Cell<bool>>) {
        let removed = {
            let mut entries = self.entries.borrow_mut();
            let index = entries.iter().position(|e| Rc::ptr_eq(&e.alive, alive));
            index.map(|i| entries.remove(i))
        };
        drop(removed);
    }

    /// Drop every expired consumer without dispatching. Returns how many went.
    pub fn prune(&self) -> usize {
        let expired: Vec<Entry<E>> = {
            let mut entries = self.entries.borrow_mut();
            let (live, expired): (Vec<_>, Vec<_>) =
                entries.drain(..).partition(|e| !e.expired());
            *entries = live;
            expired
        };
        expired.len()
    }

    /// Number of stored consumers, including expired ones not yet pruned.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl<E> Default for ConsumerStack<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for ConsumerStack<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerStack")
            .field("len", &self.len())
            .finish()
    }
}
