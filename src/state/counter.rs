/// Count-up animation for the statistics panel
///
/// Each counter climbs from 0 to its target over a fixed duration in fixed
/// ticks. The per-tick increment is `target / (duration / tick)`, the shown
/// value is floored, and the last tick lands exactly on the target.
use std::time::{Duration, Instant};

pub const COUNTER_DURATION: Duration = Duration::from_millis(1000);
pub const COUNTER_TICK: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    started: Instant,
}

impl CounterAnimation {
    pub fn start(target: u64, now: Instant) -> Self {
        Self { target, started: now }
    }

    /// Value after `ticks` timer ticks
    fn value_after_ticks(&self, ticks: u64) -> (u64, bool) {
        let steps = COUNTER_DURATION.as_secs_f64() / COUNTER_TICK.as_secs_f64();
        let increment = self.target as f64 / steps;
        let current = increment * ticks as f64;

        if current >= self.target as f64 {
            (self.target, true)
        } else {
            (current.floor() as u64, false)
        }
    }

    fn ticks_at(&self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_millis() / COUNTER_TICK.as_millis()) as u64
    }

    /// Displayed value at `now`
    pub fn value(&self, now: Instant) -> u64 {
        self.value_after_ticks(self.ticks_at(now)).0
    }

    /// True once the counter has reached its target
    pub fn is_finished(&self, now: Instant) -> bool {
        let ticks = self.ticks_at(now);
        // the first tick is the earliest a zero target can finish
        ticks > 0 && self.value_after_ticks(ticks).1
    }

    /// Displayed value with thousands grouping
    pub fn label(&self, now: Instant) -> String {
        group_thousands(self.value(now))
    }
}

/// Format with comma thousands separators ("1,234,567")
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_counter_climbs_and_lands_on_target() {
        let start = Instant::now();
        let counter = CounterAnimation::start(1000, start);

        assert_eq!(counter.value(start), 0);
        // one tick: 1000 / 62.5 = 16
        assert_eq!(counter.value(start + COUNTER_TICK), 16);
        // halfway-ish is floored
        let mid = counter.value(start + Duration::from_millis(500));
        assert!(mid > 400 && mid < 600, "mid = {mid}");

        let end = start + Duration::from_millis(1100);
        assert_eq!(counter.value(end), 1000);
        assert!(counter.is_finished(end));
        assert_eq!(counter.label(end), "1,000");
    }

    #[test]
    fn test_counter_floors_intermediate_values() {
        let start = Instant::now();
        let counter = CounterAnimation::start(10, start);

        // 10 / 62.5 = 0.16 per tick; three ticks = 0.48
        assert_eq!(counter.value(start + COUNTER_TICK * 3), 0);
        // seven ticks = 1.12
        assert_eq!(counter.value(start + COUNTER_TICK * 7), 1);
    }

    #[test]
    fn test_zero_target_finishes_on_first_tick() {
        let start = Instant::now();
        let counter = CounterAnimation::start(0, start);

        assert!(!counter.is_finished(start));
        assert!(counter.is_finished(start + COUNTER_TICK));
        assert_eq!(counter.value(start + COUNTER_TICK), 0);
    }
}
