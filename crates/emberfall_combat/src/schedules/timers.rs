//! Deferred transitions keyed by simulation-time deadline.
//!
//! Replaces "wait N seconds, then continue": a controller schedules a
//! `TimerAction` for an entity, and `fire_due_timers` applies it on the first
//! tick whose clock is at or past the deadline (overshoot ≤ one tick).
//! Timers are never cancelled; handlers ignore stale ones.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy::prelude::*;

/// State transition to apply when a timer fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerAction {
    /// Weapon: Active → Cooldown
    ActiveWindowElapsed,
    /// Weapon: Cooldown → Idle
    CooldownElapsed,
    /// Combatant: Invulnerable → Vulnerable (only if `deadline` is still current)
    InvulnerabilityElapsed { deadline: f64 },
}

/// Pending timer
#[derive(Debug, Clone, Copy)]
pub struct ScheduledTimer {
    pub deadline: f64,
    pub target: Entity,
    pub action: TimerAction,
    seq: u64,
}

impl PartialEq for ScheduledTimer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledTimer {}

impl PartialOrd for ScheduledTimer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTimer {
    // Reversed: BinaryHeap pops the earliest deadline, FIFO for equal deadlines
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .total_cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Scheduler resource: min-heap of pending timers
#[derive(Resource, Debug, Default)]
pub struct TimerQueue {
    pending: BinaryHeap<ScheduledTimer>,
    next_seq: u64,
}

impl TimerQueue {
    /// Schedule `action` on `target` after `delay` seconds from `now`.
    ///
    /// Negative delays are clamped to 0 (fires on the next drain).
    /// Returns the deadline.
    pub fn schedule(&mut self, now: f64, delay: f32, target: Entity, action: TimerAction) -> f64 {
        let deadline = now + delay.max(0.0) as f64;
        self.schedule_at(deadline, target, action);
        deadline
    }

    pub fn schedule_at(&mut self, deadline: f64, target: Entity, action: TimerAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(ScheduledTimer {
            deadline,
            target,
            action,
            seq,
        });
    }

    /// Pop the earliest timer with `deadline <= now`.
    pub fn pop_due(&mut self, now: f64) -> Option<ScheduledTimer> {
        if self.pending.peek()?.deadline <= now {
            self.pending.pop()
        } else {
            None
        }
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.pending.peek().map(|timer| timer.deadline)
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
    fn test_pops_in_deadline_order() {
        let mut queue = TimerQueue::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);

        queue.schedule(0.0, 0.5, a, TimerAction::CooldownElapsed);
        queue.schedule(0.0, 0.25, b, TimerAction::ActiveWindowElapsed);

        assert_eq!(queue.next_deadline(), Some(0.25));
        assert!(queue.pop_due(0.1).is_none());

        let first = queue.pop_due(1.0).unwrap();
        assert_eq!(first.target, b);
        assert_eq!(first.action, TimerAction::ActiveWindowElapsed);

        let second = queue.pop_due(1.0).unwrap();
        assert_eq!(second.target, a);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_equal_deadlines_fire_fifo() {
        let mut queue = TimerQueue::default();
        for index in 0..4 {
            queue.schedule_at(1.0, Entity::from_raw(index), TimerAction::CooldownElapsed);
        }

        let order: Vec<u32> = std::iter::from_fn(|| queue.pop_due(1.0))
            .map(|timer| timer.target.index())
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_negative_delay_is_clamped() {
        let mut queue = TimerQueue::default();
        let deadline = queue.schedule(2.0, -0.3, Entity::from_raw(7), TimerAction::CooldownElapsed);

        assert_eq!(deadline, 2.0);
        assert!(queue.pop_due(2.0).is_some());
    }

    #[test]
    fn test_deadline_exactly_now_is_due() {
        let mut queue = TimerQueue::default();
        queue.schedule(0.0, 0.25, Entity::from_raw(3), TimerAction::ActiveWindowElapsed);

        assert!(queue.pop_due(0.24).is_none());
        assert!(queue.pop_due(0.25).is_some());
        assert_eq!(queue.len(), 0);
    }
}
