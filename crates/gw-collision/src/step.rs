//! Single-step movement validation for arbitrary mover footprints.
//!
//! A mover occupies a `width x length` rectangle of tiles with its
//! south-west corner at `(x, z)`. A step moves the whole rectangle by one
//! tile in one of eight directions; it is allowed only if every tile of
//! the leading edge can be entered, including the wall segments between
//! edge tiles that a wide mover must slide across.

use crate::flags::{
    BLOCK_EAST, BLOCK_NORTH, BLOCK_NORTH_EAST, BLOCK_NORTH_WEST, BLOCK_SOUTH,
    BLOCK_SOUTH_EAST, BLOCK_SOUTH_WEST, BLOCK_WEST,
};
use crate::map::CollisionMap;
use crate::strategy::CollisionStrategy;

/// Returns `true` if a square mover of side `size` at `(x, z)` can step
/// by `(dx, dz)`, where both offsets are in `-1..=1`.
///
/// `extra_flag` is OR-ed into every block mask; pass occupancy bits such
/// as [`crate::flags::NPC`] to keep movers out of occupied tiles. A zero
/// step is rejected.
///
/// # Example
///
/// ```
/// use gw_collision::{can_travel, CollisionMap, CollisionStrategy, LocAngle};
///
/// let mut map = CollisionMap::new();
/// map.change_wall_straight(1, 0, 0, LocAngle::West, false, false, true);
/// let normal = CollisionStrategy::Normal;
/// assert!(!can_travel(&map, 0, 0, 0, 1, 0, 1, 0, normal));
/// assert!(can_travel(&map, 0, 0, 0, 0, 1, 1, 0, normal));
/// ```
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn can_travel(
    map: &CollisionMap,
    plane: u8,
    x: i32,
    z: i32,
    dx: i32,
    dz: i32,
    size: i32,
    extra_flag: u32,
    strategy: CollisionStrategy,
) -> bool {
    can_travel_rect(map, plane, x, z, dx, dz, size, size, extra_flag, strategy)
}

/// As [`can_travel`], for a rectangular `width x length` mover.
///
/// Diagonal steps require the horizontal step, the vertical step and the
/// far corner tile to all be clear, so a wide mover never cuts a corner
/// its footprint could not actually slide around.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn can_travel_rect(
    map: &CollisionMap,
    plane: u8,
    x: i32,
    z: i32,
    dx: i32,
    dz: i32,
    width: i32,
    length: i32,
    extra_flag: u32,
    strategy: CollisionStrategy,
) -> bool {
    match (dx, dz) {
        (-1, 0) => step_horizontal(map, plane, x - 1, z, length, false, extra_flag, strategy),
        (1, 0) => step_horizontal(map, plane, x + width, z, length, true, extra_flag, strategy),
        (0, -1) => step_vertical(map, plane, x, z - 1, width, false, extra_flag, strategy),
        (0, 1) => step_vertical(map, plane, x, z + length, width, true, extra_flag, strategy),
        (-1, -1) | (-1, 1) | (1, -1) | (1, 1) => {
            let corner_x = if dx < 0 { x - 1 } else { x + width };
            let corner_z = if dz < 0 { z - 1 } else { z + length };
            let corner_mask = match (dx, dz) {
                (-1, -1) => BLOCK_SOUTH_WEST,
                (-1, 1) => BLOCK_NORTH_WEST,
                (1, -1) => BLOCK_SOUTH_EAST,
                _ => BLOCK_NORTH_EAST,
            };
            can_travel_rect(map, plane, x, z, dx, 0, width, length, extra_flag, strategy)
                && can_travel_rect(map, plane, x, z, 0, dz, width, length, extra_flag, strategy)
                && strategy.can_move(
                    map.get(corner_x, corner_z, plane),
                    corner_mask | extra_flag,
                )
        }
        _ => false,
    }
}

/// Checks the vertical leading edge at column `edge_x`, rows
/// `z..z + length`, for a step west (`east = false`) or east.
#[allow(clippy::too_many_arguments)]
fn step_horizontal(
    map: &CollisionMap,
    plane: u8,
    edge_x: i32,
    z: i32,
    length: i32,
    east: bool,
    extra_flag: u32,
    strategy: CollisionStrategy,
) -> bool {
    let (plain, low, high) = if east {
        (BLOCK_EAST, BLOCK_SOUTH_EAST, BLOCK_NORTH_EAST)
    } else {
        (BLOCK_WEST, BLOCK_SOUTH_WEST, BLOCK_NORTH_WEST)
    };
    if length == 1 {
        return strategy.can_move(map.get(edge_x, z, plane), plain | extra_flag);
    }
    if !strategy.can_move(map.get(edge_x, z, plane), low | extra_flag)
        || !strategy.can_move(map.get(edge_x, z + length - 1, plane), high | extra_flag)
    {
        return false;
    }
    (z + 1..z + length - 1)
        .all(|mid_z| strategy.can_move(map.get(edge_x, mid_z, plane), low | high | extra_flag))
}

/// Checks the horizontal leading edge at row `edge_z`, columns
/// `x..x + width`, for a step south (`north = false`) or north.
#[allow(clippy::too_many_arguments)]
fn step_vertical(
    map: &CollisionMap,
    plane: u8,
    x: i32,
    edge_z: i32,
    width: i32,
    north: bool,
    extra_flag: u32,
    strategy: CollisionStrategy,
) -> bool {
    let (plain, low, high) = if north {
        (BLOCK_NORTH, BLOCK_NORTH_WEST, BLOCK_NORTH_EAST)
    } else {
        (BLOCK_SOUTH, BLOCK_SOUTH_WEST, BLOCK_SOUTH_EAST)
    };
    if width == 1 {
        return strategy.can_move(map.get(x, edge_z, plane), plain | extra_flag);
    }
    if !strategy.can_move(map.get(x, edge_z, plane), low | extra_flag)
        || !strategy.can_move(map.get(x + width - 1, edge_z, plane), high | extra_flag)
    {
        return false;
    }
    (x + 1..x + width - 1)
        .all(|mid_x| strategy.can_move(map.get(mid_x, edge_z, plane), low | high | extra_flag))
}
