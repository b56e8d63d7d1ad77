use std::collections::{BTreeMap, HashMap};

/// Virtual time in milliseconds
pub type Millis = u64;

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Cancellable one-shot timers over a virtual clock
///
/// Nothing fires on its own: the owner drains due entries with
/// [`TimerQueue::pop_due`], which also moves the clock to each entry's
/// deadline. Entries with equal deadlines fire in scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Millis,
    next_id: u64,
    pending: BTreeMap<(Millis, TimerId), T>,
    deadlines: HashMap<TimerId, Millis>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_id: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Schedule `payload` to fire `delay` milliseconds from now
    pub fn schedule(&mut self, delay: Millis, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now.saturating_add(delay);
        self.pending.insert((deadline, id), payload);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancel a pending timer, returning its payload if it had not fired
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let deadline = self.deadlines.remove(&id)?;
        self.pending.remove(&(deadline, id))
    }

    #[inline]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Remove the earliest timer due at or before `until`
    ///
    /// The clock moves forward to that timer's deadline.
    pub fn pop_due(&mut self, until: Millis) -> Option<(TimerId, T)> {
        let (&(deadline, id), _) = self.pending.iter().next()?;
        if deadline > until {
            return None;
        }
        let payload = self.pending.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        self.now = self.now.max(deadline);
        Some((id, payload))
    }

    /// Move the clock forward without firing anything
    ///
    /// The clock never goes backwards.
    pub fn set_now(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.pending.clear();
        self.deadlines.clear();
    }
}
