//! Route finding over [`gw_collision`] maps.
//!
//! Three movement queries build on the collision map's step validation:
//!
//! - [`PathFinder`]: breadth-first search in a bounded window, with
//!   shape-aware arrival, deterministic tie-breaking and a move-near
//!   fallback for unreachable targets. The player walk engine.
//! - [`find_naive_path`]: the greedy chase stepper NPCs use.
//! - [`reached`]: the arrival test itself, shared with interaction
//!   range checks.
//!
//! # Example
//!
//! ```
//! use gw_collision::{CollisionMap, TileCoord};
//! use gw_pathfind::{PathFinder, RouteQuery};
//!
//! let map = CollisionMap::new();
//! let mut finder = PathFinder::new();
//! let route = finder.find_path(
//!     &map,
//!     &RouteQuery::new(0, TileCoord::new(3200, 3200), TileCoord::new(3205, 3203)),
//! );
//! assert!(route.success);
//! ```

#![warn(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod bfs;
pub mod naive;
pub mod reach;
pub mod route;

pub use bfs::PathFinder;
pub use naive::find_naive_path;
pub use reach::{
    reached, TargetShape, BLOCK_ACCESS_EAST, BLOCK_ACCESS_NORTH, BLOCK_ACCESS_SOUTH,
    BLOCK_ACCESS_WEST,
};
pub use route::{Route, RouteQuery, DEFAULT_MAX_WAYPOINTS};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gw_collision::{can_travel, CollisionMap, CollisionStrategy, LocAngle, TileCoord};

    /// Walks a route waypoint by waypoint, asserting every step is a
    /// legal `can_travel` move for the given mover size.
    fn assert_walkable(map: &CollisionMap, src: TileCoord, route: &Route, size: i32) {
        let mut pos = src;
        for &waypoint in &route.waypoints {
            while pos != waypoint {
                let dx = (waypoint.x - pos.x).signum();
                let dz = (waypoint.z - pos.z).signum();
                assert!(
                    can_travel(
                        map,
                        0,
                        pos.x,
                        pos.z,
                        dx,
                        dz,
                        size,
                        0,
                        CollisionStrategy::Normal
                    ),
                    "illegal step from {pos:?} toward {waypoint:?}"
                );
                pos = pos.translate(dx, dz);
            }
        }
    }

    #[test]
    fn test_route_segments_are_walkable() {
        let mut map = CollisionMap::new();
        for z in 5..15 {
            if z != 12 {
                map.change_wall_straight(13, z, 0, LocAngle::West, false, false, true);
            }
        }
        map.change_loc(12, 13, 0, 2, 1, false, false, true).unwrap();
        let mut finder = PathFinder::new();
        let src = TileCoord::new(10, 10);
        let route = finder.find_path(&map, &RouteQuery::new(0, src, TileCoord::new(16, 10)));
        assert!(route.success);
        assert_walkable(&map, src, &route, 1);
    }

    #[test]
    fn test_find_path_and_naive_agree_on_open_ground() {
        let map = CollisionMap::new();
        let mut finder = PathFinder::new();
        let bfs = finder.find_path(
            &map,
            &RouteQuery::new(0, TileCoord::new(10, 10), TileCoord::new(15, 10)),
        );
        let naive = find_naive_path(
            &map,
            0,
            10,
            10,
            1,
            1,
            15,
            10,
            1,
            1,
            0,
            CollisionStrategy::Normal,
        );
        assert!(bfs.success && naive.success);
        assert_eq!(bfs.arrival(), Some(TileCoord::new(14, 10)));
        assert_eq!(naive.arrival(), Some(TileCoord::new(14, 10)));
    }

    #[test]
    fn test_add_remove_round_trip_restores_routes() {
        let mut map = CollisionMap::new();
        let mut finder = PathFinder::new();
        let q = RouteQuery::new(0, TileCoord::new(10, 10), TileCoord::new(15, 10));
        let before = finder.find_path(&map, &q);

        map.change_loc(12, 9, 0, 3, 3, false, true, true).unwrap();
        let during = finder.find_path(&map, &q);
        map.change_loc(12, 9, 0, 3, 3, false, true, false).unwrap();
        let after = finder.find_path(&map, &q);

        assert!(before.success && during.success && after.success);
        assert_ne!(before, during);
        assert_eq!(before, after);
    }
}
