//! Grid raycasting for line of sight and line of walk.
//!
//! The ray runs from the nearest tile of the source footprint to the
//! nearest perimeter tile of the destination footprint, stepping one tile
//! at a time along the major axis with 16-bit fixed-point tracking of the
//! minor axis. Each entered tile is checked against the wall segment
//! facing the ray; when the minor coordinate advances mid-step, the
//! vertically entered tile is checked as well, so the ray cannot slip
//! through the seam between two diagonal blockers.

use crate::coord::TileCoord;
use crate::flags;
use crate::map::CollisionMap;

const SCALE_SHIFT: u32 = 16;
const HALF_TILE: i32 = 1 << (SCALE_SHIFT - 1);

const fn scale_up(tiles: i32) -> i32 {
    tiles << SCALE_SHIFT
}

const fn scale_down(scaled: i32) -> i32 {
    scaled >> SCALE_SHIFT
}

/// Nearest coordinate of a `size`-tile footprint anchored at `a` to the
/// point `b`.
const fn coordinate(a: i32, b: i32, size: i32) -> i32 {
    if b <= a {
        a
    } else if b >= a + size - 1 {
        a + size - 1
    } else {
        b
    }
}

/// Directional blocker masks for one ray flavour.
struct RayMasks {
    /// Checked on tiles entered travelling west.
    west: u32,
    /// Checked on tiles entered travelling east.
    east: u32,
    /// Checked on tiles entered travelling south.
    south: u32,
    /// Checked on tiles entered travelling north.
    north: u32,
    /// Checked on every entered tile regardless of direction.
    object: u32,
}

/// Projectiles are stopped only by the proj-blocker wall tier and locs
/// flagged as blocking ranged attacks.
const SIGHT_MASKS: RayMasks = RayMasks {
    west: flags::WALL_EAST_PROJ_BLOCKER,
    east: flags::WALL_WEST_PROJ_BLOCKER,
    south: flags::WALL_NORTH_PROJ_BLOCKER,
    north: flags::WALL_SOUTH_PROJ_BLOCKER,
    object: flags::LOC_PROJ_BLOCKER,
};

/// Walk lines respect ordinary walls and anything occupying the ground.
const WALK_MASKS: RayMasks = RayMasks {
    west: flags::WALL_EAST,
    east: flags::WALL_WEST,
    south: flags::WALL_NORTH,
    north: flags::WALL_SOUTH,
    object: flags::LOC | flags::FLOOR | flags::GROUND_DECOR,
};

/// The tiles a ray entered, in order, excluding the start tile.
///
/// `blocked_at` indexes the first tile whose entry was obstructed, if
/// any; the trace always runs to the destination so callers can render
/// or debug the full line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RayTrace {
    /// Entered tiles, source side first.
    pub tiles: Vec<TileCoord>,
    /// Index into `tiles` of the first obstructed entry.
    pub blocked_at: Option<usize>,
}

impl RayTrace {
    /// Returns `true` if the ray reached its destination unobstructed.
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        self.blocked_at.is_none()
    }
}

/// Walks the ray, invoking `visit` for every entered tile with its
/// blocked state. Stops early when `visit` returns `false`.
#[allow(clippy::too_many_arguments)]
fn ray_cast(
    map: &CollisionMap,
    plane: u8,
    start_x: i32,
    start_z: i32,
    end_x: i32,
    end_z: i32,
    masks: &RayMasks,
    extra_flag: u32,
    mut visit: impl FnMut(TileCoord, bool) -> bool,
) {
    let delta_x = end_x - start_x;
    let delta_z = end_z - start_z;
    let x_mask = if delta_x >= 0 { masks.east } else { masks.west } | masks.object | extra_flag;
    let z_mask = if delta_z >= 0 { masks.north } else { masks.south } | masks.object | extra_flag;
    if delta_x.abs() > delta_z.abs() {
        let offset_x = if delta_x >= 0 { 1 } else { -1 };
        let tangent = scale_up(delta_z) / delta_x.abs();
        let mut scaled_z = scale_up(start_z) + HALF_TILE;
        if delta_z < 0 {
            // Truncating division rounds toward zero; nudge the scaled
            // coordinate so downward rays floor consistently.
            scaled_z -= 1;
        }
        let mut curr_x = start_x;
        while curr_x != end_x {
            curr_x += offset_x;
            let curr_z = scale_down(scaled_z);
            let blocked = map.is_flagged(curr_x, curr_z, plane, x_mask);
            if !visit(TileCoord::new(curr_x, curr_z), blocked) {
                return;
            }
            scaled_z += tangent;
            let next_z = scale_down(scaled_z);
            if next_z != curr_z {
                let blocked = map.is_flagged(curr_x, next_z, plane, z_mask);
                if !visit(TileCoord::new(curr_x, next_z), blocked) {
                    return;
                }
            }
        }
    } else if delta_z != 0 {
        let offset_z = if delta_z >= 0 { 1 } else { -1 };
        let tangent = scale_up(delta_x) / delta_z.abs();
        let mut scaled_x = scale_up(start_x) + HALF_TILE;
        if delta_x < 0 {
            scaled_x -= 1;
        }
        let mut curr_z = start_z;
        while curr_z != end_z {
            curr_z += offset_z;
            let curr_x = scale_down(scaled_x);
            let blocked = map.is_flagged(curr_x, curr_z, plane, z_mask);
            if !visit(TileCoord::new(curr_x, curr_z), blocked) {
                return;
            }
            scaled_x += tangent;
            let next_x = scale_down(scaled_x);
            if next_x != curr_x {
                let blocked = map.is_flagged(next_x, curr_z, plane, x_mask);
                if !visit(TileCoord::new(next_x, curr_z), blocked) {
                    return;
                }
            }
        }
    }
}

struct Endpoints {
    start_x: i32,
    start_z: i32,
    end_x: i32,
    end_z: i32,
}

#[allow(clippy::too_many_arguments)]
fn endpoints(
    src_x: i32,
    src_z: i32,
    src_width: i32,
    src_length: i32,
    dest_x: i32,
    dest_z: i32,
    dest_width: i32,
    dest_length: i32,
) -> Endpoints {
    let start_x = coordinate(src_x, dest_x, src_width);
    let start_z = coordinate(src_z, dest_z, src_length);
    Endpoints {
        start_x,
        start_z,
        end_x: coordinate(dest_x, start_x, dest_width),
        end_z: coordinate(dest_z, start_z, dest_length),
    }
}

#[allow(clippy::too_many_arguments)]
fn has_line(
    map: &CollisionMap,
    plane: u8,
    src_x: i32,
    src_z: i32,
    src_width: i32,
    src_length: i32,
    dest_x: i32,
    dest_z: i32,
    dest_width: i32,
    dest_length: i32,
    extra_flag: u32,
    masks: &RayMasks,
) -> bool {
    let ep = endpoints(
        src_x, src_z, src_width, src_length, dest_x, dest_z, dest_width, dest_length,
    );
    let mut clear = true;
    ray_cast(
        map,
        plane,
        ep.start_x,
        ep.start_z,
        ep.end_x,
        ep.end_z,
        masks,
        extra_flag,
        |_, blocked| {
            clear = !blocked;
            clear
        },
    );
    clear
}

#[allow(clippy::too_many_arguments)]
fn trace_line(
    map: &CollisionMap,
    plane: u8,
    src_x: i32,
    src_z: i32,
    src_width: i32,
    src_length: i32,
    dest_x: i32,
    dest_z: i32,
    dest_width: i32,
    dest_length: i32,
    extra_flag: u32,
    masks: &RayMasks,
) -> RayTrace {
    let ep = endpoints(
        src_x, src_z, src_width, src_length, dest_x, dest_z, dest_width, dest_length,
    );
    let mut trace = RayTrace::default();
    ray_cast(
        map,
        plane,
        ep.start_x,
        ep.start_z,
        ep.end_x,
        ep.end_z,
        masks,
        extra_flag,
        |tile, blocked| {
            if blocked && trace.blocked_at.is_none() {
                trace.blocked_at = Some(trace.tiles.len());
            }
            trace.tiles.push(tile);
            true
        },
    );
    trace
}

/// Returns `true` if a projectile can travel between the two footprints.
///
/// `extra_flag` is OR-ed into every tile check, as for
/// [`crate::can_travel`]. Coincident footprints always see each other.
///
/// # Example
///
/// ```
/// use gw_collision::{has_line_of_sight, CollisionMap, LocAngle};
///
/// let mut map = CollisionMap::new();
/// assert!(has_line_of_sight(&map, 0, 0, 0, 1, 1, 4, 0, 1, 1, 0));
///
/// // A range-blocking wall across the line stops it.
/// map.change_wall_straight(2, 0, 0, LocAngle::West, true, false, true);
/// assert!(!has_line_of_sight(&map, 0, 0, 0, 1, 1, 4, 0, 1, 1, 0));
/// ```
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn has_line_of_sight(
    map: &CollisionMap,
    plane: u8,
    src_x: i32,
    src_z: i32,
    src_width: i32,
    src_length: i32,
    dest_x: i32,
    dest_z: i32,
    dest_width: i32,
    dest_length: i32,
    extra_flag: u32,
) -> bool {
    has_line(
        map, plane, src_x, src_z, src_width, src_length, dest_x, dest_z, dest_width,
        dest_length, extra_flag, &SIGHT_MASKS,
    )
}

/// Returns `true` if the straight walk line between the two footprints
/// crosses no walls, locs, blocked floor or ground decoration.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn has_line_of_walk(
    map: &CollisionMap,
    plane: u8,
    src_x: i32,
    src_z: i32,
    src_width: i32,
    src_length: i32,
    dest_x: i32,
    dest_z: i32,
    dest_width: i32,
    dest_length: i32,
    extra_flag: u32,
) -> bool {
    has_line(
        map, plane, src_x, src_z, src_width, src_length, dest_x, dest_z, dest_width,
        dest_length, extra_flag, &WALK_MASKS,
    )
}

/// Traces the sight line tile by tile. See [`RayTrace`].
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn line_of_sight(
    map: &CollisionMap,
    plane: u8,
    src_x: i32,
    src_z: i32,
    src_width: i32,
    src_length: i32,
    dest_x: i32,
    dest_z: i32,
    dest_width: i32,
    dest_length: i32,
    extra_flag: u32,
) -> RayTrace {
    trace_line(
        map, plane, src_x, src_z, src_width, src_length, dest_x, dest_z, dest_width,
        dest_length, extra_flag, &SIGHT_MASKS,
    )
}

/// Traces the walk line tile by tile. See [`RayTrace`].
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn line_of_walk(
    map: &CollisionMap,
    plane: u8,
    src_x: i32,
    src_z: i32,
    src_width: i32,
    src_length: i32,
    dest_x: i32,
    dest_z: i32,
    dest_width: i32,
    dest_length: i32,
    extra_flag: u32,
) -> RayTrace {
    trace_line(
        map, plane, src_x, src_z, src_width, src_length, dest_x, dest_z, dest_width,
        dest_length, extra_flag, &WALK_MASKS,
    )
}
