//! Shape-aware arrival tests.
//!
//! Whether a mover has "reached" its target depends on what the target
//! is: a creature is reached from any adjacent tile, a door only from
//! the side its face is on, a lectern only from the faces its definition
//! leaves open. [`reached`] encodes those rules and is used by the path
//! finder as its arrival test, so routes stop on the correct tile for
//! the interaction that requested them.

use gw_collision::flags::{WALL_EAST, WALL_NORTH, WALL_SOUTH, WALL_WEST};
use gw_collision::{CollisionMap, LocAngle, LocLayer, LocShape};

/// Access-block bit: the target's north face cannot be approached.
pub const BLOCK_ACCESS_NORTH: u32 = 0x1;
/// Access-block bit: the target's east face cannot be approached.
pub const BLOCK_ACCESS_EAST: u32 = 0x2;
/// Access-block bit: the target's south face cannot be approached.
pub const BLOCK_ACCESS_SOUTH: u32 = 0x4;
/// Access-block bit: the target's west face cannot be approached.
pub const BLOCK_ACCESS_WEST: u32 = 0x8;

/// What kind of footprint the route is trying to arrive at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetShape {
    /// A plain rectangle (creatures, ground items, walk-to points).
    /// Overlapping the rectangle counts as arrival.
    #[default]
    Rectangle,
    /// A rectangle that must be approached from outside, never stood
    /// upon (combat with melee-range checks, picking up from tables).
    RectangleExclusive,
    /// A loc with a render shape and rotation; arrival follows the
    /// shape's open faces.
    Loc {
        /// The target loc's render shape.
        shape: LocShape,
        /// The target loc's rotation.
        angle: LocAngle,
    },
}

/// Returns `true` if a `src_size` square mover at `(src_x, src_z)` has
/// arrived at the target footprint anchored at `(dest_x, dest_z)`.
///
/// `dest_width`/`dest_length` are the target's unrotated dimensions; for
/// loc targets they are rotated by the loc's angle internally, as are
/// the `block_access_flags` face bits.
///
/// # Example
///
/// ```
/// use gw_collision::{CollisionMap, LocAngle, LocShape};
/// use gw_pathfind::{reached, TargetShape};
///
/// let map = CollisionMap::new();
/// let door = TargetShape::Loc {
///     shape: LocShape::WallStraight,
///     angle: LocAngle::West,
/// };
/// // A west-facing door is reached from the tile west of it...
/// assert!(reached(&map, 0, 2, 3, 1, 3, 3, 1, 1, door, 0));
/// // ...but not from the east.
/// assert!(!reached(&map, 0, 4, 3, 1, 3, 3, 1, 1, door, 0));
/// ```
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn reached(
    map: &CollisionMap,
    plane: u8,
    src_x: i32,
    src_z: i32,
    src_size: i32,
    dest_x: i32,
    dest_z: i32,
    dest_width: i32,
    dest_length: i32,
    target: TargetShape,
    block_access_flags: u32,
) -> bool {
    let exclusive = matches!(target, TargetShape::RectangleExclusive);
    if !exclusive && src_x == dest_x && src_z == dest_z {
        return true;
    }
    match target {
        TargetShape::Rectangle | TargetShape::RectangleExclusive => reach_rectangle(
            map,
            plane,
            src_x,
            src_z,
            src_size,
            dest_x,
            dest_z,
            dest_width,
            dest_length,
            block_access_flags,
            exclusive,
        ),
        TargetShape::Loc { shape, angle } => match shape.layer() {
            LocLayer::Wall => {
                reach_wall(map, plane, src_x, src_z, src_size, dest_x, dest_z, shape, angle)
            }
            LocLayer::WallDecor => reach_wall_decor(
                map, plane, src_x, src_z, src_size, dest_x, dest_z, shape, angle,
            ),
            LocLayer::Ground | LocLayer::GroundDecor => {
                let (width, length) = angle.rotate_footprint(dest_width, dest_length);
                reach_rectangle(
                    map,
                    plane,
                    src_x,
                    src_z,
                    src_size,
                    dest_x,
                    dest_z,
                    width,
                    length,
                    rotate_access_flags(angle, block_access_flags),
                    false,
                )
            }
        },
    }
}

/// Rotates the N/E/S/W access-block bits with the loc, so a face stays
/// blocked no matter which way the loc is turned.
const fn rotate_access_flags(angle: LocAngle, flags: u32) -> u32 {
    let flags = flags & 0xF;
    match angle {
        LocAngle::West => flags,
        LocAngle::North => ((flags << 1) | (flags >> 3)) & 0xF,
        LocAngle::East => ((flags << 2) | (flags >> 2)) & 0xF,
        LocAngle::South => ((flags << 3) | (flags >> 1)) & 0xF,
    }
}

/// Arrival against a plain rectangle: overlap (unless exclusive), or
/// face adjacency with the approach face open and no wall between the
/// footprints.
#[allow(clippy::too_many_arguments)]
fn reach_rectangle(
    map: &CollisionMap,
    plane: u8,
    src_x: i32,
    src_z: i32,
    src_size: i32,
    dest_x: i32,
    dest_z: i32,
    dest_width: i32,
    dest_length: i32,
    access: u32,
    exclusive: bool,
) -> bool {
    let src_east = src_x + src_size - 1;
    let src_north = src_z + src_size - 1;
    let dest_east = dest_x + dest_width - 1;
    let dest_north = dest_z + dest_length - 1;

    let overlaps =
        src_x <= dest_east && dest_x <= src_east && src_z <= dest_north && dest_z <= src_north;
    if overlaps {
        return !exclusive;
    }

    let z_lo = src_z.max(dest_z);
    let z_hi = src_north.min(dest_north);
    let x_lo = src_x.max(dest_x);
    let x_hi = src_east.min(dest_east);

    // Approaching the target's west face from the west.
    if src_east == dest_x - 1 && z_lo <= z_hi && access & BLOCK_ACCESS_WEST == 0 {
        for z in z_lo..=z_hi {
            if map.get(src_east, z, plane) & WALL_EAST == 0 {
                return true;
            }
        }
    }
    if src_x == dest_east + 1 && z_lo <= z_hi && access & BLOCK_ACCESS_EAST == 0 {
        for z in z_lo..=z_hi {
            if map.get(src_x, z, plane) & WALL_WEST == 0 {
                return true;
            }
        }
    }
    if src_north == dest_z - 1 && x_lo <= x_hi && access & BLOCK_ACCESS_SOUTH == 0 {
        for x in x_lo..=x_hi {
            if map.get(x, src_north, plane) & WALL_NORTH == 0 {
                return true;
            }
        }
    }
    if src_z == dest_north + 1 && x_lo <= x_hi && access & BLOCK_ACCESS_NORTH == 0 {
        for x in x_lo..=x_hi {
            if map.get(x, src_z, plane) & WALL_SOUTH == 0 {
                return true;
            }
        }
    }
    false
}

/// Arrival at a wall-layer loc: the open sides depend on the shape
/// family and rotation.
#[allow(clippy::too_many_arguments)]
fn reach_wall(
    map: &CollisionMap,
    plane: u8,
    src_x: i32,
    src_z: i32,
    src_size: i32,
    dest_x: i32,
    dest_z: i32,
    shape: LocShape,
    angle: LocAngle,
) -> bool {
    let src = SrcRect {
        x: src_x,
        z: src_z,
        size: src_size,
    };
    match shape {
        LocShape::WallStraight => match angle {
            LocAngle::West => {
                src.abuts_west(dest_x, dest_z)
                    || src.contains(dest_x, dest_z + 1)
                        && map.get(dest_x, dest_z + 1, plane) & WALL_SOUTH == 0
                    || src.contains(dest_x, dest_z - 1)
                        && map.get(dest_x, dest_z - 1, plane) & WALL_NORTH == 0
            }
            LocAngle::North => {
                src.abuts_north(dest_x, dest_z)
                    || src.contains(dest_x - 1, dest_z)
                        && map.get(dest_x - 1, dest_z, plane) & WALL_EAST == 0
                    || src.contains(dest_x + 1, dest_z)
                        && map.get(dest_x + 1, dest_z, plane) & WALL_WEST == 0
            }
            LocAngle::East => {
                src.abuts_east(dest_x, dest_z)
                    || src.contains(dest_x, dest_z + 1)
                        && map.get(dest_x, dest_z + 1, plane) & WALL_SOUTH == 0
                    || src.contains(dest_x, dest_z - 1)
                        && map.get(dest_x, dest_z - 1, plane) & WALL_NORTH == 0
            }
            LocAngle::South => {
                src.abuts_south(dest_x, dest_z)
                    || src.contains(dest_x - 1, dest_z)
                        && map.get(dest_x - 1, dest_z, plane) & WALL_EAST == 0
                    || src.contains(dest_x + 1, dest_z)
                        && map.get(dest_x + 1, dest_z, plane) & WALL_WEST == 0
            }
        },
        LocShape::WallL => match angle {
            // The two walled sides are the open interaction faces.
            LocAngle::West => src.abuts_west(dest_x, dest_z) || src.abuts_north(dest_x, dest_z),
            LocAngle::North => src.abuts_north(dest_x, dest_z) || src.abuts_east(dest_x, dest_z),
            LocAngle::East => src.abuts_east(dest_x, dest_z) || src.abuts_south(dest_x, dest_z),
            LocAngle::South => src.abuts_south(dest_x, dest_z) || src.abuts_west(dest_x, dest_z),
        },
        // Corner pieces are reached from either side of their corner.
        _ => match angle {
            LocAngle::West => src.abuts_west(dest_x, dest_z) || src.abuts_north(dest_x, dest_z),
            LocAngle::North => src.abuts_north(dest_x, dest_z) || src.abuts_east(dest_x, dest_z),
            LocAngle::East => src.abuts_east(dest_x, dest_z) || src.abuts_south(dest_x, dest_z),
            LocAngle::South => src.abuts_south(dest_x, dest_z) || src.abuts_west(dest_x, dest_z),
        },
    }
}

/// Arrival at a wall decoration: straight decor follows its wall's open
/// side, diagonal decor is approached across the facing corner.
#[allow(clippy::too_many_arguments)]
fn reach_wall_decor(
    map: &CollisionMap,
    plane: u8,
    src_x: i32,
    src_z: i32,
    src_size: i32,
    dest_x: i32,
    dest_z: i32,
    shape: LocShape,
    angle: LocAngle,
) -> bool {
    let src = SrcRect {
        x: src_x,
        z: src_z,
        size: src_size,
    };
    match shape {
        LocShape::WallDecorStraightNoOffset | LocShape::WallDecorStraightOffset => reach_wall(
            map,
            plane,
            src_x,
            src_z,
            src_size,
            dest_x,
            dest_z,
            LocShape::WallStraight,
            angle,
        ),
        LocShape::WallDecorDiagonalBoth => {
            src.contains(dest_x - 1, dest_z + 1)
                || src.contains(dest_x + 1, dest_z + 1)
                || src.contains(dest_x + 1, dest_z - 1)
                || src.contains(dest_x - 1, dest_z - 1)
        }
        _ => {
            let (diag_x, diag_z) = match angle {
                LocAngle::West => (dest_x - 1, dest_z + 1),
                LocAngle::North => (dest_x + 1, dest_z + 1),
                LocAngle::East => (dest_x + 1, dest_z - 1),
                LocAngle::South => (dest_x - 1, dest_z - 1),
            };
            src.contains(diag_x, diag_z)
        }
    }
}

/// A square source footprint, for the adjacency predicates the wall
/// rules are written in.
struct SrcRect {
    x: i32,
    z: i32,
    size: i32,
}

impl SrcRect {
    /// Source covers the given tile.
    fn contains(&self, x: i32, z: i32) -> bool {
        x >= self.x && x < self.x + self.size && z >= self.z && z < self.z + self.size
    }

    /// Source's east edge abuts the tile from the west.
    fn abuts_west(&self, x: i32, z: i32) -> bool {
        self.x + self.size == x && z >= self.z && z < self.z + self.size
    }

    /// Source's west edge abuts the tile from the east.
    fn abuts_east(&self, x: i32, z: i32) -> bool {
        self.x == x + 1 && z >= self.z && z < self.z + self.size
    }

    /// Source's north edge abuts the tile from the south.
    fn abuts_south(&self, x: i32, z: i32) -> bool {
        self.z + self.size == z && x >= self.x && x < self.x + self.size
    }

    /// Source's south edge abuts the tile from the north.
    fn abuts_north(&self, x: i32, z: i32) -> bool {
        self.z == z + 1 && x >= self.x && x < self.x + self.size
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gw_collision::LocAngle;

    #[test]
    fn test_rectangle_adjacency_all_faces() {
        let map = CollisionMap::new();
        for (sx, sz) in [(4, 5), (6, 5), (5, 4), (5, 6)] {
            assert!(reached(
                &map,
                0,
                sx,
                sz,
                1,
                5,
                5,
                1,
                1,
                TargetShape::Rectangle,
                0
            ));
        }
        // Diagonal neighbours are not adjacent.
        assert!(!reached(
            &map,
            0,
            4,
            4,
            1,
            5,
            5,
            1,
            1,
            TargetShape::Rectangle,
            0
        ));
    }

    #[test]
    fn test_rectangle_overlap_counts_unless_exclusive() {
        let map = CollisionMap::new();
        assert!(reached(
            &map,
            0,
            5,
            5,
            1,
            4,
            4,
            3,
            3,
            TargetShape::Rectangle,
            0
        ));
        assert!(!reached(
            &map,
            0,
            5,
            5,
            1,
            4,
            4,
            3,
            3,
            TargetShape::RectangleExclusive,
            0
        ));
        // Adjacency still works for exclusive targets.
        assert!(reached(
            &map,
            0,
            3,
            5,
            1,
            4,
            4,
            3,
            3,
            TargetShape::RectangleExclusive,
            0
        ));
    }

    #[test]
    fn test_access_flags_veto_faces() {
        let map = CollisionMap::new();
        assert!(!reached(
            &map,
            0,
            4,
            5,
            1,
            5,
            5,
            1,
            1,
            TargetShape::Rectangle,
            BLOCK_ACCESS_WEST
        ));
        assert!(reached(
            &map,
            0,
            6,
            5,
            1,
            5,
            5,
            1,
            1,
            TargetShape::Rectangle,
            BLOCK_ACCESS_WEST
        ));
    }

    #[test]
    fn test_wall_between_vetoes_face() {
        let mut map = CollisionMap::new();
        map.change_wall_straight(5, 5, 0, LocAngle::West, false, false, true);
        assert!(!reached(
            &map,
            0,
            4,
            5,
            1,
            5,
            5,
            1,
            1,
            TargetShape::Rectangle,
            0
        ));
        assert!(reached(
            &map,
            0,
            6,
            5,
            1,
            5,
            5,
            1,
            1,
            TargetShape::Rectangle,
            0
        ));
    }

    #[test]
    fn test_large_source_adjacency() {
        let map = CollisionMap::new();
        // A 2x2 mover at (3, 4) has its east edge on column 4, touching
        // a target at (5, 5).
        assert!(reached(
            &map,
            0,
            3,
            4,
            2,
            5,
            5,
            1,
            1,
            TargetShape::Rectangle,
            0
        ));
        assert!(!reached(
            &map,
            0,
            2,
            4,
            2,
            5,
            5,
            1,
            1,
            TargetShape::Rectangle,
            0
        ));
    }

    #[test]
    fn test_straight_wall_faces() {
        let map = CollisionMap::new();
        let west_door = TargetShape::Loc {
            shape: LocShape::WallStraight,
            angle: LocAngle::West,
        };
        // Open side.
        assert!(reached(&map, 0, 2, 3, 1, 3, 3, 1, 1, west_door, 0));
        // Side approaches along the wall's own column.
        assert!(reached(&map, 0, 3, 4, 1, 3, 3, 1, 1, west_door, 0));
        assert!(reached(&map, 0, 3, 2, 1, 3, 3, 1, 1, west_door, 0));
        // Behind the wall.
        assert!(!reached(&map, 0, 4, 3, 1, 3, 3, 1, 1, west_door, 0));
        // Standing on the wall tile itself counts.
        assert!(reached(&map, 0, 3, 3, 1, 3, 3, 1, 1, west_door, 0));
    }

    #[test]
    fn test_straight_wall_side_approach_respects_walls() {
        let mut map = CollisionMap::new();
        // Wall south of (3, 4) blocks stepping down onto the door tile.
        map.change_wall_straight(3, 4, 0, LocAngle::South, false, false, true);
        let west_door = TargetShape::Loc {
            shape: LocShape::WallStraight,
            angle: LocAngle::West,
        };
        assert!(!reached(&map, 0, 3, 4, 1, 3, 3, 1, 1, west_door, 0));
        assert!(reached(&map, 0, 3, 2, 1, 3, 3, 1, 1, west_door, 0));
    }

    #[test]
    fn test_wall_l_two_faces() {
        let map = CollisionMap::new();
        let corner = TargetShape::Loc {
            shape: LocShape::WallL,
            angle: LocAngle::West,
        };
        assert!(reached(&map, 0, 2, 3, 1, 3, 3, 1, 1, corner, 0));
        assert!(reached(&map, 0, 3, 4, 1, 3, 3, 1, 1, corner, 0));
        assert!(!reached(&map, 0, 4, 3, 1, 3, 3, 1, 1, corner, 0));
        assert!(!reached(&map, 0, 3, 2, 1, 3, 3, 1, 1, corner, 0));
    }

    #[test]
    fn test_diagonal_decor_reached_across_corner() {
        let map = CollisionMap::new();
        let decor = TargetShape::Loc {
            shape: LocShape::WallDecorDiagonalNoOffset,
            angle: LocAngle::North,
        };
        assert!(reached(&map, 0, 4, 4, 1, 3, 3, 1, 1, decor, 0));
        assert!(!reached(&map, 0, 2, 2, 1, 3, 3, 1, 1, decor, 0));
    }

    #[test]
    fn test_ground_loc_rotation_swaps_footprint() {
        let map = CollisionMap::new();
        let loc = |angle| TargetShape::Loc {
            shape: LocShape::CentrepieceStraight,
            angle,
        };
        // A 3x1 loc at (5, 5): unrotated it spans x 5..8.
        assert!(reached(&map, 0, 8, 5, 1, 5, 5, 3, 1, loc(LocAngle::West), 0));
        // Rotated a quarter turn it spans z 5..8 instead.
        assert!(!reached(&map, 0, 8, 5, 1, 5, 5, 3, 1, loc(LocAngle::North), 0));
        assert!(reached(&map, 0, 5, 8, 1, 5, 5, 3, 1, loc(LocAngle::North), 0));
    }

    #[test]
    fn test_rotate_access_flags() {
        assert_eq!(
            rotate_access_flags(LocAngle::North, BLOCK_ACCESS_NORTH),
            BLOCK_ACCESS_EAST
        );
        assert_eq!(
            rotate_access_flags(LocAngle::South, BLOCK_ACCESS_NORTH),
            BLOCK_ACCESS_WEST
        );
        assert_eq!(
            rotate_access_flags(LocAngle::East, BLOCK_ACCESS_WEST),
            BLOCK_ACCESS_EAST
        );
        assert_eq!(rotate_access_flags(LocAngle::West, 0xF), 0xF);
    }
}
