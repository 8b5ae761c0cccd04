//! Listener bookkeeping and scoped subscription handles.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

pub(crate) type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub(crate) struct ListenerSlot {
    id: u64,
    active: Arc<AtomicBool>,
    listener: Listener,
}

impl ListenerSlot {
    /// Run the listener unless it was unsubscribed in the meantime.
    pub(crate) fn notify(&self) {
        if self.active.load(Ordering::Acquire) {
            (self.listener)();
        }
    }
}

/// Listeners in registration order.
#[derive(Default)]
pub(crate) struct ListenerList {
    slots: Vec<ListenerSlot>,
    next_id: u64,
}

impl ListenerList {
    pub(crate) fn add(list: &Arc<Mutex<ListenerList>>, listener: Listener) -> Subscription {
        let active = Arc::new(AtomicBool::new(true));
        let mut guard = list.lock();
        let id = guard.next_id;
        guard.next_id += 1;
        guard.slots.push(ListenerSlot {
            id,
            active: Arc::clone(&active),
            listener,
        });
        Subscription {
            id,
            active,
            list: Arc::downgrade(list),
        }
    }

    fn remove(&mut self, id: u64) {
        self.slots.retain(|slot| slot.id != id);
    }

    /// Copy of the current slots, so listeners run without the lock held.
    pub(crate) fn snapshot(&self) -> Vec<ListenerSlot> {
        self.slots.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}

/// Handle to one registered listener.
///
/// The listener stays registered for as long as the handle lives. Dropping
/// the handle or calling [`Subscription::unsubscribe`] removes it; repeated
/// calls are no-ops.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
    list: Weak<Mutex<ListenerList>>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(list) = self.list.upgrade() {
            list.lock().remove(self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, Listener) {
        let count = Arc::new(AtomicUsize::new(0));
        let listener_count = Arc::clone(&count);
        let listener: Listener = Arc::new(move || {
            listener_count.fetch_add(1, Ordering::SeqCst);
        });
        (count, listener)
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let list = Arc::new(Mutex::new(ListenerList::default()));
        let (_, listener) = counter();
        let subscription = ListenerList::add(&list, listener);
        assert_eq!(list.lock().len(), 1);

        subscription.unsubscribe();
        subscription.unsubscribe();
        assert!(!subscription.is_active());
        assert_eq!(list.lock().len(), 0);
    }

    #[test]
    fn drop_releases_the_listener() {
        let list = Arc::new(Mutex::new(ListenerList::default()));
        let (_, listener) = counter();
        {
            let _subscription = ListenerList::add(&list, listener);
            assert_eq!(list.lock().len(), 1);
        }
        assert_eq!(list.lock().len(), 0);
    }

    #[test]
    fn snapshot_skips_listeners_unsubscribed_after_it_was_taken() {
        let list = Arc::new(Mutex::new(ListenerList::default()));
        let (count, listener) = counter();
        let subscription = ListenerList::add(&list, listener);

        let snapshot = list.lock().snapshot();
        subscription.unsubscribe();
        for slot in &snapshot {
            slot.notify();
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsubscribe_after_list_is_gone_is_harmless() {
        let list = Arc::new(Mutex::new(ListenerList::default()));
        let (_, listener) = counter();
        let subscription = ListenerList::add(&list, listener);
        drop(list);
        subscription.unsubscribe();
        assert!(!subscription.is_active());
    }
}
