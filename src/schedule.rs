//! Time sources for the engines.
//!
//! The host calls each engine once per animation frame with a `performance.now()`
//! timestamp. A [`Cadence`] turns that into whole fixed-period ticks (the way a
//! beat clock turns elapsed time into beats) and a [`Timeline`] holds delayed
//! one-shot work. Dropping either drops every pending tick with it.

/// Fixed-period tick source.
///
/// Backlog is bounded in time rather than in ticks: one call to [`Cadence::due`]
/// replays at most `max_catch_up_ms` worth of periods (always at least one), so
/// fast and slow cadences sharing a budget fall behind at the same moment.
#[derive(Clone, Debug)]
pub struct Cadence {
    period_ms: f64,
    next_due_ms: Option<f64>,
    max_catch_up: u32,
}

impl Cadence {
    pub fn new(period_ms: f64, max_catch_up_ms: f64) -> Self {
        let period_ms = period_ms.max(1.0);
        let max_catch_up = (max_catch_up_ms / period_ms).floor().clamp(1.0, u32::MAX as f64) as u32;
        Self {
            period_ms,
            next_due_ms: None,
            max_catch_up,
        }
    }

    /// Start (or restart) the period at `now`; the first tick lands one period later.
    pub fn arm(&mut self, now: f64) {
        self.next_due_ms = Some(now + self.period_ms);
    }

    pub fn disarm(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Number of whole periods elapsed up to `now`. A backlog longer than the
    /// catch-up budget (tab in background, stalled page) is dropped and the
    /// period restarts from `now`.
    pub fn due(&mut self, now: f64) -> u32 {
        let Some(mut next) = self.next_due_ms else {
            return 0;
        };
        let mut count = 0;
        while next <= now {
            count += 1;
            next += self.period_ms;
            if count >= self.max_catch_up {
                if next <= now {
                    next = now + self.period_ms;
                }
                break;
            }
        }
        self.next_due_ms = Some(next);
        count
    }
}

/// Delayed one-shot events ordered by due time.
#[derive(Clone, Debug)]
pub struct Timeline<T> {
    pending: Vec<(f64, T)>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self { pending: Vec::new() }
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at_ms: f64, item: T) {
        // Stable for equal due times: insert after existing entries at the same instant.
        let idx = self.pending.partition_point(|(due, _)| *due <= at_ms);
        self.pending.insert(idx, (at_ms, item));
    }

    /// Remove and return every item due at or before `now`, earliest first.
    pub fn drain_due(&mut self, now: f64) -> Vec<T> {
        let split = self.pending.partition_point(|(due, _)| *due <= now);
        self.pending.drain(..split).map(|(_, item)| item).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_counts_whole_periods() {
        let mut c = Cadence::new(100.0, 800.0);
        assert_eq!(c.due(1_000.0), 0, "unarmed cadence never fires");
        c.arm(1_000.0);
        assert_eq!(c.due(1_050.0), 0);
        assert_eq!(c.due(1_100.0), 1);
        assert_eq!(c.due(1_350.0), 2);
        assert_eq!(c.due(1_399.0), 0);
        assert_eq!(c.due(1_400.0), 1);
    }

    #[test]
    fn cadence_drops_large_backlog() {
        let mut c = Cadence::new(16.0, 64.0);
        c.arm(0.0);
        assert_eq!(c.due(10_000.0), 4);
        // Period restarted from 10_000.
        assert_eq!(c.due(10_015.0), 0);
        assert_eq!(c.due(10_016.0), 1);
    }

    #[test]
    fn budget_is_shared_in_time_not_ticks() {
        let mut fast = Cadence::new(16.0, 1_000.0);
        let mut slow = Cadence::new(1_000.0, 1_000.0);
        fast.arm(0.0);
        slow.arm(0.0);
        // A 250 ms frame is within budget for both.
        assert_eq!(fast.due(256.0), 16);
        assert_eq!(slow.due(256.0), 0);
        // A budget shorter than the period still allows one tick.
        let mut rare = Cadence::new(5_000.0, 1_000.0);
        rare.arm(0.0);
        assert_eq!(rare.due(60_000.0), 1);
    }

    #[test]
    fn rearming_restarts_the_period() {
        let mut c = Cadence::new(800.0, 6_400.0);
        c.arm(0.0);
        assert_eq!(c.due(700.0), 0);
        c.arm(700.0);
        assert_eq!(c.due(1_000.0), 0);
        assert_eq!(c.due(1_500.0), 1);
        c.disarm();
        assert!(!c.is_armed());
        assert_eq!(c.due(5_000.0), 0);
    }

    #[test]
    fn timeline_releases_in_due_order() {
        let mut t = Timeline::new();
        t.schedule(300.0, "c");
        t.schedule(100.0, "a");
        t.schedule(200.0, "b");
        t.schedule(100.0, "a2");
        assert!(t.drain_due(50.0).is_empty());
        assert_eq!(t.drain_due(150.0), vec!["a", "a2"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.drain_due(1_000.0), vec!["b", "c"]);
        assert!(t.is_empty());
    }
}
