use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::log::EditLogHandle;

/// Token returned by [`EditNotifier::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Rc<RefCell<dyn FnMut(&EditLogHandle)>>;

#[derive(Default)]
struct NotifierState {
    next_id: u64,
    subscribers: BTreeMap<SubscriptionId, Subscriber>,
}

thread_local! {
    static NOTIFIER: RefCell<NotifierState> = RefCell::new(NotifierState::default());
}

/// Per-thread broadcast of finalized edit logs
///
/// Subscribers run in subscription order. A subscriber may subscribe,
/// unsubscribe or open transactions from inside its callback; it is not
/// re-entered for logs published while it is running.
pub struct EditNotifier;

impl EditNotifier {
    pub fn subscribe<F>(callback: F) -> SubscriptionId
    where
        F: FnMut(&EditLogHandle) + 'static,
    {
        let subscriber: Subscriber = Rc::new(RefCell::new(callback));
        NOTIFIER.with(|notifier| {
            let mut state = notifier.borrow_mut();
            let id = SubscriptionId(state.next_id);
            state.next_id += 1;
            state.subscribers.insert(id, subscriber);
            id
        })
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(id: SubscriptionId) -> bool {
        NOTIFIER.with(|notifier| notifier.borrow_mut().subscribers.remove(&id).is_some())
    }

    pub fn subscriber_count() -> usize {
        NOTIFIER.with(|notifier| notifier.borrow().subscribers.len())
    }

    /// Deliver `handle` to every subscriber; returns how many received it
    pub fn publish(handle: &EditLogHandle) -> usize {
        let snapshot: Vec<(SubscriptionId, Subscriber)> = NOTIFIER.with(|notifier| {
            notifier
                .borrow()
                .subscribers
                .iter()
                .map(|(id, subscriber)| (*id, subscriber.clone()))
                .collect()
        });

        let mut delivered = 0;
        for (id, subscriber) in snapshot {
            let still_subscribed =
                NOTIFIER.with(|notifier| notifier.borrow().subscribers.contains_key(&id));
            if !still_subscribed {
                continue;
            }
            if let Ok(mut callback) = subscriber.try_borrow_mut() {
                (&mut *callback)(handle);
                delivered += 1;
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::EditLog;

    #[test]
    fn test_subscribers_receive_published_handles() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = EditNotifier::subscribe(move |handle| sink.borrow_mut().push(handle.clone()));

        let handle = EditLogHandle::from(EditLog::new());
        assert_eq!(EditNotifier::publish(&handle), 1);
        assert!(seen.borrow()[0].ptr_eq(&handle));

        assert!(EditNotifier::unsubscribe(id));
        assert!(!EditNotifier::unsubscribe(id));
        assert_eq!(EditNotifier::publish(&handle), 0);
    }

    #[test]
    fn test_subscriber_may_unsubscribe_another_during_delivery() {
        let calls = Rc::new(RefCell::new(0));
        let second_id: Rc<RefCell<Option<SubscriptionId>>> = Rc::new(RefCell::new(None));

        let target = second_id.clone();
        EditNotifier::subscribe(move |_| {
            if let Some(id) = *target.borrow() {
                EditNotifier::unsubscribe(id);
            }
        });
        let counter = calls.clone();
        let id = EditNotifier::subscribe(move |_| *counter.borrow_mut() += 1);
        *second_id.borrow_mut() = Some(id);

        EditNotifier::publish(&EditLogHandle::from(EditLog::new()));
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(EditNotifier::subscriber_count(), 1);
    }
}
