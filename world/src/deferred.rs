//! Deferred one-shot actions fired by the tick loop.
//!
//! The player respawn and boss removal delays live on an explicit queue keyed
//! by the accumulated simulation clock. Entries carry stable identifiers
//! rather than entity references, so a target removed by other means degrades
//! to a no-op.

use std::time::Duration;

use wildgrove_core::BossId;

/// Action fired once when the simulation clock passes its deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DeferredKind {
    /// Return the player to their stored checkpoint at full health.
    RespawnPlayer,
    /// Remove the identified boss from the live collection, if still present.
    RemoveBoss(BossId),
}

#[derive(Clone, Copy, Debug)]
struct DeferredAction {
    fire_at: Duration,
    kind: DeferredKind,
}

/// FIFO queue of pending deferred actions.
#[derive(Debug, Default)]
pub(crate) struct DeferredQueue {
    pending: Vec<DeferredAction>,
}

impl DeferredQueue {
    pub(crate) fn schedule(&mut self, fire_at: Duration, kind: DeferredKind) {
        self.pending.push(DeferredAction { fire_at, kind });
    }

    /// Removes and returns every action due at `now`, preserving the order
    /// in which they were scheduled. Each action is yielded at most once.
    pub(crate) fn drain_due(&mut self, now: Duration) -> Vec<DeferredKind> {
        let mut due = Vec::new();
        self.pending.retain(|action| {
            if action.fire_at <= now {
                due.push(action.kind);
                false
            } else {
                true
            }
        });
        due
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{DeferredKind, DeferredQueue};
    use std::time::Duration;
    use wildgrove_core::BossId;

    #[test]
    fn actions_fire_only_once_their_deadline_passes() {
        let mut queue = DeferredQueue::default();
        queue.schedule(Duration::from_millis(1000), DeferredKind::RespawnPlayer);

        assert!(queue.drain_due(Duration::from_millis(999)).is_empty());
        assert_eq!(
            queue.drain_due(Duration::from_millis(1000)),
            vec![DeferredKind::RespawnPlayer],
        );
        assert!(queue.drain_due(Duration::from_millis(2000)).is_empty());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn due_actions_preserve_scheduling_order() {
        let mut queue = DeferredQueue::default();
        queue.schedule(
            Duration::from_millis(500),
            DeferredKind::RemoveBoss(BossId::new(1)),
        );
        queue.schedule(Duration::from_millis(250), DeferredKind::RespawnPlayer);

        assert_eq!(
            queue.drain_due(Duration::from_millis(600)),
            vec![
                DeferredKind::RemoveBoss(BossId::new(1)),
                DeferredKind::RespawnPlayer,
            ],
        );
    }

    #[test]
    fn undue_actions_stay_queued() {
        let mut queue = DeferredQueue::default();
        queue.schedule(
            Duration::from_millis(900),
            DeferredKind::RemoveBoss(BossId::new(7)),
        );
        let _ = queue.drain_due(Duration::from_millis(100));
        assert_eq!(queue.len(), 1);
    }
}
