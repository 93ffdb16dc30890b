//! Greedy straight-line route stepping.
//!
//! The naive finder walks directly toward the destination one step at a
//! time, preferring the diagonal and falling back to each axis. It never
//! searches: the first position where no candidate step makes progress
//! fails the whole route. NPCs use it for chase movement, where hugging
//! an obstacle is the desired behavior and a full search would be both
//! wasted work and visibly too clever.

use gw_collision::{can_travel_rect, CollisionMap, CollisionStrategy, TileCoord};

use crate::route::Route;

/// Upper bound on steps, a safety net against degenerate inputs.
const MAX_STEPS: usize = 512;

/// Walks greedily from the source rectangle toward the destination
/// rectangle, returning the route walked.
///
/// Arrival is the source rectangle overlapping or touching the
/// destination rectangle, including corners. If at any point neither
/// the diagonal toward the destination nor either axis step is allowed,
/// the route fails.
///
/// # Example
///
/// ```
/// use gw_collision::{CollisionMap, CollisionStrategy, TileCoord};
/// use gw_pathfind::find_naive_path;
///
/// let map = CollisionMap::new();
/// let route = find_naive_path(
///     &map, 0, 10, 10, 1, 1, 14, 13, 1, 1, 0, CollisionStrategy::Normal,
/// );
/// assert!(route.success);
/// assert_eq!(route.arrival(), Some(TileCoord::new(13, 13)));
/// ```
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn find_naive_path(
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
    strategy: CollisionStrategy,
) -> Route {
    let arrived = |x: i32, z: i32| {
        x <= dest_x + dest_width && dest_x <= x + src_width
            && z <= dest_z + dest_length && dest_z <= z + src_length
    };

    let mut route = Route {
        success: true,
        ..Route::default()
    };
    let mut x = src_x;
    let mut z = src_z;
    let mut segment_dir = (0, 0);
    for _ in 0..MAX_STEPS {
        if arrived(x, z) {
            if segment_dir != (0, 0) {
                route.waypoints.push(TileCoord::new(x, z));
            }
            return route;
        }
        let dx = (dest_x - x).signum();
        let dz = (dest_z - z).signum();
        let step = [(dx, dz), (dx, 0), (0, dz)].into_iter().find(|&(sx, sz)| {
            (sx != 0 || sz != 0)
                && can_travel_rect(
                    map, plane, x, z, sx, sz, src_width, src_length, extra_flag, strategy,
                )
        });
        let Some((sx, sz)) = step else {
            return Route::failure();
        };
        if segment_dir != (0, 0) && (sx, sz) != segment_dir {
            route.waypoints.push(TileCoord::new(x, z));
        }
        segment_dir = (sx, sz);
        x += sx;
        z += sz;
    }
    Route::failure()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gw_collision::LocAngle;

    const NORMAL: CollisionStrategy = CollisionStrategy::Normal;

    #[test]
    fn test_diagonal_then_straight() {
        let map = CollisionMap::new();
        let route = find_naive_path(&map, 0, 10, 10, 1, 1, 16, 12, 1, 1, 0, NORMAL);
        assert!(route.success);
        // Two diagonal steps to align, then straight east, stopping
        // adjacent to the destination.
        assert_eq!(route.arrival(), Some(TileCoord::new(15, 12)));
        assert_eq!(route.waypoints.len(), 2);
        assert_eq!(route.waypoints[0], TileCoord::new(12, 12));
    }

    #[test]
    fn test_already_adjacent_is_empty_success() {
        let map = CollisionMap::new();
        let route = find_naive_path(&map, 0, 10, 10, 1, 1, 11, 11, 1, 1, 0, NORMAL);
        assert!(route.success);
        assert!(route.waypoints.is_empty());
    }

    #[test]
    fn test_blocked_route_fails_entirely() {
        let mut map = CollisionMap::new();
        // A wall line the greedy stepper cannot resolve.
        for z in 5..=15 {
            map.change_wall_straight(13, z, 0, LocAngle::West, false, false, true);
        }
        let route = find_naive_path(&map, 0, 10, 10, 1, 1, 16, 10, 1, 1, 0, NORMAL);
        assert!(route.is_failure());
        assert!(route.waypoints.is_empty());
    }

    #[test]
    fn test_axis_fallback_slides_along_wall() {
        let mut map = CollisionMap::new();
        // Wall segment blocking the diagonal and east steps at the
        // meeting row, letting the stepper slide north along it.
        map.change_wall_straight(13, 10, 0, LocAngle::West, false, false, true);
        map.change_wall_straight(13, 11, 0, LocAngle::West, false, false, true);
        let route = find_naive_path(&map, 0, 12, 10, 1, 1, 16, 12, 1, 1, 0, NORMAL);
        assert!(route.success);
    }

    #[test]
    fn test_wide_mover_uses_rect_steps() {
        let mut map = CollisionMap::new();
        map.change_loc(13, 11, 0, 1, 1, false, false, true).unwrap();
        // The 2x2 mover's east edge hits the loc; a 1x1 mover in the
        // same lane does not.
        let narrow = find_naive_path(&map, 0, 10, 10, 1, 1, 16, 10, 1, 1, 0, NORMAL);
        assert!(narrow.success);
        let wide = find_naive_path(&map, 0, 10, 10, 2, 2, 16, 10, 1, 1, 0, NORMAL);
        assert!(wide.is_failure());
    }

    #[test]
    fn test_extra_flag_respected() {
        let mut map = CollisionMap::new();
        map.change_player(13, 10, 0, 1, true);
        let free = find_naive_path(&map, 0, 10, 10, 1, 1, 16, 10, 1, 1, 0, NORMAL);
        assert!(free.success);
        let blocked = find_naive_path(
            &map,
            0,
            10,
            10,
            1,
            1,
            16,
            10,
            1,
            1,
            gw_collision::flags::PLAYER,
            NORMAL,
        );
        assert!(blocked.is_failure());
    }
}
