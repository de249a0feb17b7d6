#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Wildgrove experience.

use wildgrove_core::Command;
use wildgrove_world::{query, TileGrid, World};

/// Produces data and commands required to start a fresh session.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Commands the host should apply once, immediately after constructing
    /// the world. Seeds the regional legend bosses.
    #[must_use]
    pub fn startup_commands(&self) -> Vec<Command> {
        vec![Command::SpawnLegendBosses]
    }

    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the tile grid configuration required for rendering.
    #[must_use]
    pub fn tile_grid<'world>(&self, world: &'world World) -> &'world TileGrid {
        query::tile_grid(world)
    }
}
