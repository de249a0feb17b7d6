#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Progression system bridging upgrade offers to the input boundary.
//!
//! Upgrades resolve in two phases. The world answers a `RequestUpgrade` with
//! either an offer or a rejection; this system presents each offer to the
//! boundary for confirmation and, when accepted, emits the `ConfirmUpgrade`
//! that actually spends the leaves. The world re-validates affordability on
//! confirmation, so a stale acceptance degrades to a rejection rather than a
//! negative balance.

use wildgrove_core::{Command, Event};

/// Pure system that turns confirmed upgrade offers into commands.
#[derive(Debug, Default)]
pub struct Progression;

impl Progression {
    /// Consumes events, asking `confirm` whether each offered upgrade should
    /// be purchased at its quoted cost.
    pub fn handle(
        &mut self,
        events: &[Event],
        confirm: &mut impl FnMut(u32) -> bool,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if let Event::UpgradeOffered { cost } = event {
                if confirm(*cost) {
                    out.push(Command::ConfirmUpgrade);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declined_offers_emit_nothing() {
        let mut progression = Progression::default();
        let mut commands = Vec::new();

        progression.handle(
            &[Event::UpgradeOffered { cost: 100 }],
            &mut |_| false,
            &mut commands,
        );

        assert!(commands.is_empty());
    }

    #[test]
    fn accepted_offers_emit_a_confirmation() {
        let mut progression = Progression::default();
        let mut commands = Vec::new();
        let mut quoted = Vec::new();

        progression.handle(
            &[
                Event::UpgradeOffered { cost: 100 },
                Event::UpgradeRejected {
                    required: 200,
                    available: 0,
                },
            ],
            &mut |cost| {
                quoted.push(cost);
                true
            },
            &mut commands,
        );

        assert_eq!(commands, vec![Command::ConfirmUpgrade]);
        assert_eq!(quoted, vec![100], "rejections are never presented");
    }
}
