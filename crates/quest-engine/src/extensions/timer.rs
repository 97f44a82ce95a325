// extensions/timer.rs
//
// One-shot timer scheduler driven by elapsed milliseconds.
// Owns every pending timer: dropping the scheduler cancels them all.
//
// Usage:
//   let mut timers = Scheduler::new();
//   let id = timers.schedule_after(2000, Cue::Next);
//   for cue in timers.advance(dt_ms) { ... }   // fired in due order
//   timers.cancel(id);

/// Handle to a scheduled timer, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    due_ms: u64,
    payload: T,
}

/// Manages pending one-shot timers.
#[derive(Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    timers: Vec<Timer<T>>,
    next_id: u32,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            timers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed since the scheduler was created.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `payload` to fire `delay_ms` from now. Returns a handle for cancellation.
    pub fn schedule_after(&mut self, delay_ms: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due_ms: self.now_ms.saturating_add(delay_ms),
            payload,
        });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.timers.iter().position(|t| t.id == id) {
            Some(index) => {
                self.timers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Cancel every pending timer.
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Whether the timer is still waiting to fire.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Due time of the earliest pending timer.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_ms).min()
    }

    /// Advance time and return the payloads of every timer that came due,
    /// ordered by due time, then by scheduling order.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<T> {
        self.now_ms = self.now_ms.saturating_add(dt_ms);
        let now = self.now_ms;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.due_ms <= now);
        self.timers = pending;

        due.sort_by_key(|t| (t.due_ms, t.id));
        due.into_iter().map(|t| t.payload).collect()
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether there are no pending timers.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_when_due_not_before() {
        let mut timers = Scheduler::new();
        timers.schedule_after(100, "ping");

        assert!(timers.advance(99).is_empty());
        assert_eq!(timers.advance(1), vec!["ping"]);
        assert!(timers.is_empty());
        assert!(timers.advance(1000).is_empty());
    }

    #[test]
    fn fires_in_due_order_within_one_step() {
        let mut timers = Scheduler::new();
        timers.schedule_after(300, 3);
        timers.schedule_after(100, 1);
        timers.schedule_after(200, 2);

        assert_eq!(timers.advance(5000), vec![1, 2, 3]);
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut timers = Scheduler::new();
        timers.schedule_after(50, 'a');
        timers.schedule_after(50, 'b');
        assert_eq!(timers.advance(50), vec!['a', 'b']);
    }

    #[test]
    fn delay_is_relative_to_now() {
        let mut timers = Scheduler::new();
        timers.advance(1000);
        timers.schedule_after(500, ());
        assert_eq!(timers.next_due_ms(), Some(1500));
        assert!(timers.advance(499).is_empty());
        assert_eq!(timers.advance(1).len(), 1);
    }

    #[test]
    fn cancel_single_timer() {
        let mut timers = Scheduler::new();
        let keep = timers.schedule_after(10, "keep");
        let drop = timers.schedule_after(10, "drop");

        assert!(timers.cancel(drop));
        assert!(!timers.cancel(drop));
        assert!(timers.is_pending(keep));
        assert!(!timers.is_pending(drop));
        assert_eq!(timers.advance(10), vec!["keep"]);
        assert!(!timers.cancel(keep));
    }

    #[test]
    fn cancel_all_leaves_nothing_to_fire() {
        let mut timers = Scheduler::new();
        timers.schedule_after(10, 1);
        timers.schedule_after(20, 2);
        timers.cancel_all();

        assert_eq!(timers.len(), 0);
        assert!(timers.advance(100).is_empty());
        assert_eq!(timers.now_ms(), 100);
    }
}
