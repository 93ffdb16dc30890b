//! Per-tile collision flag bits and composite block masks.
//!
//! Each tile carries a 32-bit flag word. The low eight bits are wall
//! segments on the tile's sides and corners; walls exist in three tiers:
//!
//! - plain wall bits block movement,
//! - projectile-blocker bits (plain bits `<< 9`) additionally block
//!   line of sight and ranged interaction,
//! - route-blocker bits (plain bits `<< 22`) mark obstructions that also
//!   break route-finding, distinguishing them from purely visual ones.
//!
//! Queries select which bits count as blocking by passing a mask, so the
//! same map answers walk, flight and sight questions without duplicate
//! storage.

/// Wall on the north-west corner of the tile.
pub const WALL_NORTH_WEST: u32 = 0x1;
/// Wall on the north side of the tile.
pub const WALL_NORTH: u32 = 0x2;
/// Wall on the north-east corner of the tile.
pub const WALL_NORTH_EAST: u32 = 0x4;
/// Wall on the east side of the tile.
pub const WALL_EAST: u32 = 0x8;
/// Wall on the south-east corner of the tile.
pub const WALL_SOUTH_EAST: u32 = 0x10;
/// Wall on the south side of the tile.
pub const WALL_SOUTH: u32 = 0x20;
/// Wall on the south-west corner of the tile.
pub const WALL_SOUTH_WEST: u32 = 0x40;
/// Wall on the west side of the tile.
pub const WALL_WEST: u32 = 0x80;

/// Tile occupied by a location (scenery object).
pub const LOC: u32 = 0x100;

/// Projectile-blocking wall tier (sight blockers). Plain wall bits `<< 9`.
pub const WALL_NORTH_WEST_PROJ_BLOCKER: u32 = WALL_NORTH_WEST << PROJ_SHIFT;
/// See [`WALL_NORTH_WEST_PROJ_BLOCKER`].
pub const WALL_NORTH_PROJ_BLOCKER: u32 = WALL_NORTH << PROJ_SHIFT;
/// See [`WALL_NORTH_WEST_PROJ_BLOCKER`].
pub const WALL_NORTH_EAST_PROJ_BLOCKER: u32 = WALL_NORTH_EAST << PROJ_SHIFT;
/// See [`WALL_NORTH_WEST_PROJ_BLOCKER`].
pub const WALL_EAST_PROJ_BLOCKER: u32 = WALL_EAST << PROJ_SHIFT;
/// See [`WALL_NORTH_WEST_PROJ_BLOCKER`].
pub const WALL_SOUTH_EAST_PROJ_BLOCKER: u32 = WALL_SOUTH_EAST << PROJ_SHIFT;
/// See [`WALL_NORTH_WEST_PROJ_BLOCKER`].
pub const WALL_SOUTH_PROJ_BLOCKER: u32 = WALL_SOUTH << PROJ_SHIFT;
/// See [`WALL_NORTH_WEST_PROJ_BLOCKER`].
pub const WALL_SOUTH_WEST_PROJ_BLOCKER: u32 = WALL_SOUTH_WEST << PROJ_SHIFT;
/// See [`WALL_NORTH_WEST_PROJ_BLOCKER`].
pub const WALL_WEST_PROJ_BLOCKER: u32 = WALL_WEST << PROJ_SHIFT;
/// Location that blocks projectiles and line of sight.
pub const LOC_PROJ_BLOCKER: u32 = LOC << PROJ_SHIFT;

/// Blocking ground decoration.
pub const GROUND_DECOR: u32 = 0x40000;
/// Tile occupied by an NPC.
pub const NPC: u32 = 0x80000;
/// Tile occupied by a player.
pub const PLAYER: u32 = 0x100000;
/// Unwalkable floor (water, cliff and similar terrain).
pub const FLOOR: u32 = 0x200000;

/// Route-breaking wall tier. Plain wall bits `<< 22`.
pub const WALL_NORTH_WEST_ROUTE_BLOCKER: u32 = WALL_NORTH_WEST << ROUTE_SHIFT;
/// See [`WALL_NORTH_WEST_ROUTE_BLOCKER`].
pub const WALL_NORTH_ROUTE_BLOCKER: u32 = WALL_NORTH << ROUTE_SHIFT;
/// See [`WALL_NORTH_WEST_ROUTE_BLOCKER`].
pub const WALL_NORTH_EAST_ROUTE_BLOCKER: u32 = WALL_NORTH_EAST << ROUTE_SHIFT;
/// See [`WALL_NORTH_WEST_ROUTE_BLOCKER`].
pub const WALL_EAST_ROUTE_BLOCKER: u32 = WALL_EAST << ROUTE_SHIFT;
/// See [`WALL_NORTH_WEST_ROUTE_BLOCKER`].
pub const WALL_SOUTH_EAST_ROUTE_BLOCKER: u32 = WALL_SOUTH_EAST << ROUTE_SHIFT;
/// See [`WALL_NORTH_WEST_ROUTE_BLOCKER`].
pub const WALL_SOUTH_ROUTE_BLOCKER: u32 = WALL_SOUTH << ROUTE_SHIFT;
/// See [`WALL_NORTH_WEST_ROUTE_BLOCKER`].
pub const WALL_SOUTH_WEST_ROUTE_BLOCKER: u32 = WALL_SOUTH_WEST << ROUTE_SHIFT;
/// See [`WALL_NORTH_WEST_ROUTE_BLOCKER`].
pub const WALL_WEST_ROUTE_BLOCKER: u32 = WALL_WEST << ROUTE_SHIFT;
/// Location that also breaks route-finding.
pub const LOC_ROUTE_BLOCKER: u32 = LOC << ROUTE_SHIFT;

/// Tile is under a roof. Affects indoor/outdoor movement profiles only,
/// never path-blocking on its own.
pub const ROOF: u32 = 0x8000_0000;

/// Shift from a plain wall/loc bit to its projectile-blocker tier.
pub const PROJ_SHIFT: u32 = 9;
/// Shift from a plain wall/loc bit to its route-blocker tier.
pub const ROUTE_SHIFT: u32 = 22;

/// All eight plain wall bits plus [`LOC`]. The bits eligible for tier
/// shifting via [`PROJ_SHIFT`] and [`ROUTE_SHIFT`].
pub const WALL_OR_LOC: u32 = 0x1FF;

/// Anything that makes the tile itself unwalkable.
pub const BLOCK_WALK: u32 = LOC | FLOOR | GROUND_DECOR;

/// Blocks a step west: the entered tile's east wall, or an occupied tile.
pub const BLOCK_WEST: u32 = WALL_EAST | BLOCK_WALK;
/// Blocks a step east.
pub const BLOCK_EAST: u32 = WALL_WEST | BLOCK_WALK;
/// Blocks a step south.
pub const BLOCK_SOUTH: u32 = WALL_NORTH | BLOCK_WALK;
/// Blocks a step north.
pub const BLOCK_NORTH: u32 = WALL_SOUTH | BLOCK_WALK;

/// Blocks a step south-west: entering across the tile's north-east corner.
pub const BLOCK_SOUTH_WEST: u32 = WALL_NORTH_EAST | WALL_NORTH | WALL_EAST | BLOCK_WALK;
/// Blocks a step south-east.
pub const BLOCK_SOUTH_EAST: u32 = WALL_NORTH_WEST | WALL_NORTH | WALL_WEST | BLOCK_WALK;
/// Blocks a step north-west.
pub const BLOCK_NORTH_WEST: u32 = WALL_SOUTH_EAST | WALL_SOUTH | WALL_EAST | BLOCK_WALK;
/// Blocks a step north-east.
pub const BLOCK_NORTH_EAST: u32 = WALL_SOUTH_WEST | WALL_SOUTH | WALL_WEST | BLOCK_WALK;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_are_disjoint() {
        let plain = WALL_OR_LOC;
        let proj = WALL_OR_LOC << PROJ_SHIFT;
        let route = WALL_OR_LOC << ROUTE_SHIFT;
        assert_eq!(plain & proj, 0);
        assert_eq!(plain & route, 0);
        assert_eq!(proj & route, 0);
    }

    #[test]
    fn test_shifted_tiers_match_named_bits() {
        assert_eq!(WALL_WEST << PROJ_SHIFT, WALL_WEST_PROJ_BLOCKER);
        assert_eq!(LOC << PROJ_SHIFT, LOC_PROJ_BLOCKER);
        assert_eq!(WALL_NORTH << ROUTE_SHIFT, WALL_NORTH_ROUTE_BLOCKER);
        assert_eq!(LOC << ROUTE_SHIFT, LOC_ROUTE_BLOCKER);
    }

    #[test]
    fn test_no_bit_collisions() {
        let all = [
            GROUND_DECOR,
            NPC,
            PLAYER,
            FLOOR,
            ROOF,
            WALL_OR_LOC,
            WALL_OR_LOC << PROJ_SHIFT,
            WALL_OR_LOC << ROUTE_SHIFT,
        ];
        let mut seen = 0u32;
        for bits in all {
            assert_eq!(seen & bits, 0);
            seen |= bits;
        }
        assert_eq!(seen, u32::MAX);
    }
}
