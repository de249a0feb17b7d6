//! Static tile map and checkpoint markers.

use rand::Rng;

use wildgrove_core::{BoundingBox, Region};

/// Contents of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    /// Impassable-looking tile drawn as terrain clutter. Blocked tiles only
    /// affect display; movement is constrained solely by the outer bounds.
    Blocked,
    /// Open tile carrying its display region.
    Walkable(Region),
}

/// Immutable tile map generated once at world construction.
#[derive(Clone, Debug)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tile_size: f32,
    cells: Vec<TileKind>,
}

impl TileGrid {
    /// Generates a grid where each cell is independently blocked with
    /// probability `blocked_chance` and walkable cells take the region band
    /// of their row.
    pub(crate) fn generate(
        columns: u32,
        rows: u32,
        tile_size: f32,
        blocked_chance: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let capacity = columns as usize * rows as usize;
        let mut cells = Vec::with_capacity(capacity);
        for row in 0..rows {
            let region = Region::for_row(row, rows);
            for _ in 0..columns {
                let kind = if rng.gen_bool(blocked_chance) {
                    TileKind::Blocked
                } else {
                    TileKind::Walkable(region)
                };
                cells.push(kind);
            }
        }
        Self {
            columns,
            rows,
            tile_size,
            cells,
        }
    }

    /// Number of tile columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square tile in world units.
    #[must_use]
    pub const fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Total width of the world in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// Total height of the world in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Retrieves the tile at the provided column and row, if in bounds.
    #[must_use]
    pub fn tile(&self, column: u32, row: u32) -> Option<TileKind> {
        if column < self.columns && row < self.rows {
            let index = row as usize * self.columns as usize + column as usize;
            self.cells.get(index).copied()
        } else {
            None
        }
    }

    /// Picks the world-space origin of a uniformly random grid cell.
    pub(crate) fn random_cell_origin(&self, rng: &mut impl Rng) -> (f32, f32) {
        let column = rng.gen_range(0..self.columns);
        let row = rng.gen_range(0..self.rows);
        (
            column as f32 * self.tile_size,
            row as f32 * self.tile_size,
        )
    }

    /// Clamps a box so it lies fully within the world bounds.
    ///
    /// Applied to the player every frame. Enemies and bosses are deliberately
    /// never clamped and may chase the player past the edge of the map.
    pub(crate) fn clamp_within(&self, x: &mut f32, y: &mut f32, width: f32, height: f32) {
        let max_x = self.width() - width;
        let max_y = self.height() - height;
        *x = x.clamp(0.0, max_x.max(0.0));
        *y = y.clamp(0.0, max_y.max(0.0));
    }
}

/// World marker that becomes the player's respawn point once touched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Checkpoint {
    x: f32,
    y: f32,
    size: f32,
    active: bool,
}

impl Checkpoint {
    /// Horizontal position of the marker.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical position of the marker.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Side length of the square marker.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Whether the player has ever touched this checkpoint.
    #[must_use]
    pub const fn active(&self) -> bool {
        self.active
    }

    /// Bounding box used for the player-overlap test.
    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.size, self.size)
    }

    pub(crate) const fn at(x: f32, y: f32, size: f32) -> Self {
        Self {
            x,
            y,
            size,
            active: false,
        }
    }

    pub(crate) fn activate(&mut self) -> bool {
        let was_active = self.active;
        self.active = true;
        !was_active
    }
}

/// Places `count` one-tile checkpoints at uniformly random grid cells.
///
/// Markers may land on blocked tiles or on top of each other; neither
/// reachability nor uniqueness is validated.
pub(crate) fn place_checkpoints(
    count: u32,
    grid: &TileGrid,
    rng: &mut impl Rng,
) -> Vec<Checkpoint> {
    (0..count)
        .map(|_| {
            let (x, y) = grid.random_cell_origin(rng);
            Checkpoint::at(x, y, grid.tile_size())
        })
        .collect()
}
