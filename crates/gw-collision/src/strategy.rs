//! Movement profiles over the collision flag word.
//!
//! A strategy decides whether a tile's flags permit entry given a
//! direction-specific block mask. Most movement uses [`CollisionStrategy::Normal`];
//! the other profiles reinterpret the same flag word for swimming NPCs,
//! indoor-only and outdoor-only wanderers, and projectile paths.

use crate::flags;

/// How a mover interprets collision flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionStrategy {
    /// Walk on open ground, blocked by walls, locs and unwalkable floor.
    #[default]
    Normal,
    /// Move only on unwalkable floor (swimming, lava creatures). Inverts
    /// the [`flags::FLOOR`] test while keeping every other blocker.
    Blocked,
    /// As [`CollisionStrategy::Normal`], but only on roofed tiles.
    Indoors,
    /// As [`CollisionStrategy::Normal`], but never on roofed tiles.
    Outdoors,
    /// Projectile flight: only the route-blocker wall tier blocks,
    /// ordinary walls and locs do not.
    LineOfSight,
}

impl CollisionStrategy {
    /// Returns `true` if a tile with flags `tile_flags` can be entered
    /// against the direction mask `block_flags`.
    #[must_use]
    pub fn can_move(self, tile_flags: u32, block_flags: u32) -> bool {
        match self {
            Self::Normal => tile_flags & block_flags == 0,
            Self::Blocked => {
                tile_flags & (block_flags & !flags::FLOOR) == 0
                    && tile_flags & flags::FLOOR != 0
            }
            Self::Indoors => {
                tile_flags & block_flags == 0 && tile_flags & flags::ROOF != 0
            }
            Self::Outdoors => tile_flags & (block_flags | flags::ROOF) == 0,
            Self::LineOfSight => {
                // Swap plain wall/loc bits in the mask for their
                // route-blocker counterparts; only those stop flight.
                let blockers = (block_flags & flags::WALL_OR_LOC) << flags::ROUTE_SHIFT;
                let rest = block_flags & !flags::WALL_OR_LOC;
                tile_flags & (blockers | rest) == 0
            }
        }
    }
}
