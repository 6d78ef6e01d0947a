//! Single-producer notification channel for per-frame snapshots.
//!
//! Subscribers are plain closures run synchronously, in subscription order,
//! from the same frame tick that produced the value.

/// Handle returned by [`TelemetryChannel::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Subscriber<T> = Box<dyn FnMut(&T)>;

pub struct TelemetryChannel<T> {
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    next_id: u32,
}

impl<T> Default for TelemetryChannel<T> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> TelemetryChannel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, f: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Returns false if the id was not subscribed (already removed).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn publish(&mut self, value: &T) {
        for (_, f) in self.subscribers.iter_mut() {
            f(value);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Drop every subscriber (and whatever state their closures own).
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}
