//! Breadth-first route finding over a bounded search window.

use gw_collision::{can_travel, CollisionMap, TileCoord};
use tracing::trace;

use crate::reach::reached;
use crate::route::{Route, RouteQuery};

/// Side length of the search window, centered on the source.
const WINDOW: i32 = 128;
/// Tiles in the window.
const WINDOW_TILES: usize = (WINDOW * WINDOW) as usize;
/// Distance value for unvisited tiles.
const UNREACHED: i32 = 99_999_999;
/// Direction code marking the source tile during backtracking.
const DIR_START: u8 = u8::MAX;
/// Search radius of the move-near fallback, in tiles around the target.
const MOVE_NEAR_RADIUS: i32 = 10;

/// Step offsets in expansion order. The order is part of the engine's
/// observable behavior: when several shortest paths exist, ties resolve
/// toward the earlier direction, so routes look the same on every
/// server running the same world state.
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Breadth-first path finder with reusable per-window buffers.
///
/// A `PathFinder` owns roughly 80 KiB of scratch space sized to the
/// search window; keep one per worker thread and reuse it across
/// queries.
///
/// # Example
///
/// ```
/// use gw_collision::{CollisionMap, TileCoord};
/// use gw_pathfind::{PathFinder, RouteQuery};
///
/// let map = CollisionMap::new();
/// let mut finder = PathFinder::new();
/// let query = RouteQuery::new(0, TileCoord::new(10, 10), TileCoord::new(15, 10));
/// let route = finder.find_path(&map, &query);
/// assert!(route.success);
/// assert_eq!(route.arrival(), Some(TileCoord::new(14, 10)));
/// ```
#[derive(Debug, Clone)]
pub struct PathFinder {
    directions: Vec<u8>,
    distances: Vec<i32>,
    queue_x: Vec<i32>,
    queue_z: Vec<i32>,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self {
            directions: vec![0; WINDOW_TILES],
            distances: vec![UNREACHED; WINDOW_TILES],
            queue_x: Vec::with_capacity(WINDOW_TILES),
            queue_z: Vec::with_capacity(WINDOW_TILES),
        }
    }
}

impl PathFinder {
    /// Creates a path finder with freshly allocated buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a route satisfying `query`, searching at most the 128x128
    /// tile window centered on the source.
    ///
    /// On an unreachable target the result is a failed route, or a
    /// best-effort `alternative` route toward the closest visited tile
    /// within ten tiles of the target when `query.move_near` is set.
    pub fn find_path(&mut self, map: &CollisionMap, query: &RouteQuery) -> Route {
        self.directions.fill(0);
        self.distances.fill(UNREACHED);
        self.queue_x.clear();
        self.queue_z.clear();

        let base_x = query.src.x - WINDOW / 2;
        let base_z = query.src.z - WINDOW / 2;
        let src_local_x = query.src.x - base_x;
        let src_local_z = query.src.z - base_z;

        let index = |lx: i32, lz: i32| (lz * WINDOW + lx) as usize;
        self.directions[index(src_local_x, src_local_z)] = DIR_START;
        self.distances[index(src_local_x, src_local_z)] = 0;
        self.queue_x.push(src_local_x);
        self.queue_z.push(src_local_z);

        let mut head = 0;
        let mut arrival = None;
        while head < self.queue_x.len() {
            let lx = self.queue_x[head];
            let lz = self.queue_z[head];
            head += 1;
            let abs_x = base_x + lx;
            let abs_z = base_z + lz;
            if reached(
                map,
                query.plane,
                abs_x,
                abs_z,
                query.src_size,
                query.dest.x,
                query.dest.z,
                query.dest_width,
                query.dest_length,
                query.target,
                query.block_access_flags,
            ) {
                arrival = Some((lx, lz));
                break;
            }
            let next_distance = self.distances[index(lx, lz)] + 1;
            for (dir, &(dx, dz)) in DIRECTIONS.iter().enumerate() {
                let nx = lx + dx;
                let nz = lz + dz;
                if nx < 0 || nz < 0 || nx >= WINDOW || nz >= WINDOW {
                    continue;
                }
                let ni = index(nx, nz);
                if self.directions[ni] != 0 {
                    continue;
                }
                if !can_travel(
                    map,
                    query.plane,
                    abs_x,
                    abs_z,
                    dx,
                    dz,
                    query.src_size,
                    0,
                    query.strategy,
                ) {
                    continue;
                }
                #[allow(clippy::cast_possible_truncation)]
                {
                    self.directions[ni] = dir as u8 + 1;
                }
                self.distances[ni] = next_distance;
                self.queue_x.push(nx);
                self.queue_z.push(nz);
            }
        }

        let (end, alternative) = match arrival {
            Some(end) => (end, false),
            None if query.move_near => {
                match self.closest_approach(query, base_x, base_z) {
                    Some(end) => (end, true),
                    None => return Route::failure(),
                }
            }
            None => {
                trace!(src = ?query.src, dest = ?query.dest, "no route in window");
                return Route::failure();
            }
        };

        let mut route = self.backtrack(query, base_x, base_z, end);
        route.alternative = alternative;
        route
    }

    /// Scans the visited tiles around the target for the best
    /// stand-in arrival: smallest squared distance to the target
    /// rectangle, ties broken by shorter walking distance.
    fn closest_approach(
        &self,
        query: &RouteQuery,
        base_x: i32,
        base_z: i32,
    ) -> Option<(i32, i32)> {
        let index = |lx: i32, lz: i32| (lz * WINDOW + lx) as usize;
        let dest_east = query.dest.x + query.dest_width - 1;
        let dest_north = query.dest.z + query.dest_length - 1;
        let mut best = None;
        let mut best_cost = i32::MAX;
        let mut best_distance = i32::MAX;
        for z in query.dest.z - MOVE_NEAR_RADIUS..=dest_north + MOVE_NEAR_RADIUS {
            for x in query.dest.x - MOVE_NEAR_RADIUS..=dest_east + MOVE_NEAR_RADIUS {
                let lx = x - base_x;
                let lz = z - base_z;
                if lx < 0 || lz < 0 || lx >= WINDOW || lz >= WINDOW {
                    continue;
                }
                let distance = self.distances[index(lx, lz)];
                if distance == UNREACHED {
                    continue;
                }
                let dx = (query.dest.x - x).max(x - dest_east).max(0);
                let dz = (query.dest.z - z).max(z - dest_north).max(0);
                let cost = dx * dx + dz * dz;
                if cost < best_cost || (cost == best_cost && distance < best_distance) {
                    best = Some((lx, lz));
                    best_cost = cost;
                    best_distance = distance;
                }
            }
        }
        best
    }

    /// Rebuilds the walked path from the stored predecessor directions,
    /// emitting a waypoint at every turn.
    fn backtrack(
        &self,
        query: &RouteQuery,
        base_x: i32,
        base_z: i32,
        end: (i32, i32),
    ) -> Route {
        let index = |lx: i32, lz: i32| (lz * WINDOW + lx) as usize;
        let (mut lx, mut lz) = end;
        let mut route = Route {
            success: true,
            ..Route::default()
        };
        let mut segment_dir = self.directions[index(lx, lz)];
        if segment_dir == DIR_START {
            // Source already satisfied the arrival test.
            return route;
        }
        route.waypoints.push(TileCoord::new(base_x + lx, base_z + lz));
        loop {
            let dir = self.directions[index(lx, lz)];
            if dir == DIR_START {
                break;
            }
            if dir != segment_dir {
                route
                    .waypoints
                    .push(TileCoord::new(base_x + lx, base_z + lz));
                segment_dir = dir;
            }
            let (dx, dz) = DIRECTIONS[(dir - 1) as usize];
            lx -= dx;
            lz -= dz;
        }
        route.waypoints.reverse();
        route.waypoints.truncate(query.max_waypoints);
        route
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::reach::TargetShape;
    use gw_collision::{CollisionStrategy, LocAngle};

    fn query(src: (i32, i32), dest: (i32, i32)) -> RouteQuery {
        RouteQuery::new(0, TileCoord::new(src.0, src.1), TileCoord::new(dest.0, dest.1))
    }

    #[test]
    fn test_straight_route() {
        let map = CollisionMap::new();
        let mut finder = PathFinder::new();
        let route = finder.find_path(&map, &query((10, 10), (15, 10)));
        assert!(route.success);
        assert!(!route.alternative);
        // One straight segment, stopping adjacent to the target.
        assert_eq!(route.waypoints.len(), 1);
        assert_eq!(route.arrival(), Some(TileCoord::new(14, 10)));
    }

    #[test]
    fn test_source_already_arrived() {
        let map = CollisionMap::new();
        let mut finder = PathFinder::new();
        let route = finder.find_path(&map, &query((10, 10), (10, 11)));
        assert!(route.success);
        assert!(route.waypoints.is_empty());
    }

    #[test]
    fn test_route_bends_through_gap() {
        let mut map = CollisionMap::new();
        // A wall line spanning the whole search window, with a single
        // gap at z = 25.
        for z in -60..70 {
            if z != 25 {
                map.change_wall_straight(13, z, 0, LocAngle::West, false, false, true);
            }
        }
        let mut finder = PathFinder::new();
        let route = finder.find_path(&map, &query((10, 10), (15, 10)));
        assert!(route.success);
        assert!(route.waypoints.len() > 1);
        // The detour has to climb to the gap row before crossing.
        assert!(route.waypoints.iter().any(|w| w.z >= 20));
        assert_eq!(
            route.arrival().unwrap().chebyshev_distance(TileCoord::new(15, 10)),
            1
        );
    }

    #[test]
    fn test_walled_in_target_fails_without_move_near() {
        let mut map = CollisionMap::new();
        for angle in [LocAngle::West, LocAngle::North, LocAngle::East, LocAngle::South] {
            map.change_wall_straight(20, 20, 0, angle, false, false, true);
        }
        let mut finder = PathFinder::new();
        let route = finder.find_path(&map, &query((10, 10), (20, 20)));
        assert!(route.is_failure());
        assert!(route.waypoints.is_empty());
    }

    #[test]
    fn test_move_near_stops_beside_walled_in_target() {
        let mut map = CollisionMap::new();
        for angle in [LocAngle::West, LocAngle::North, LocAngle::East, LocAngle::South] {
            map.change_wall_straight(20, 20, 0, angle, false, false, true);
        }
        let mut finder = PathFinder::new();
        let route = finder.find_path(&map, &query((10, 10), (20, 20)).with_move_near(true));
        assert!(route.success);
        assert!(route.alternative);
        let arrival = route.arrival().unwrap();
        assert_eq!(arrival.chebyshev_distance(TileCoord::new(20, 20)), 1);
    }

    #[test]
    fn test_direction_order_is_deterministic() {
        let map = CollisionMap::new();
        let mut finder = PathFinder::new();
        // Multiple shortest paths exist; the locked expansion order must
        // always produce the same one.
        let first = finder.find_path(&map, &query((10, 10), (14, 14)));
        let second = finder.find_path(&map, &query((10, 10), (14, 14)));
        assert_eq!(first, second);
        assert!(first.success);
    }

    #[test]
    fn test_max_waypoints_cap() {
        let mut map = CollisionMap::new();
        // A comb of walls forcing many turns.
        for i in 0..12 {
            let x = 12 + i * 2;
            for z in 0..40 {
                let (lo, hi) = if i % 2 == 0 { (0, 30) } else { (10, 40) };
                if z >= lo && z < hi {
                    map.change_wall_straight(x, z, 0, LocAngle::West, false, false, true);
                }
            }
        }
        let mut finder = PathFinder::new();
        let q = query((10, 20), (40, 20)).with_max_waypoints(4);
        let route = finder.find_path(&map, &q);
        assert!(route.success);
        assert!(route.waypoints.len() <= 4);
    }

    #[test]
    fn test_target_outside_window_fails() {
        let map = CollisionMap::new();
        let mut finder = PathFinder::new();
        let route = finder.find_path(&map, &query((10, 10), (500, 10)));
        assert!(route.is_failure());
    }

    #[test]
    fn test_blocked_strategy_swims_on_floor() {
        let mut map = CollisionMap::new();
        // A channel of blocked floor from source to target.
        for x in 10..=15 {
            map.change_floor(x, 10, 0, true);
        }
        let mut finder = PathFinder::new();
        let q = query((10, 10), (15, 10)).with_strategy(CollisionStrategy::Blocked);
        let route = finder.find_path(&map, &q);
        assert!(route.success);
    }

    #[test]
    fn test_large_mover_needs_wide_gap() {
        let mut map = CollisionMap::new();
        // Corridor walls leaving a single open column at z = 10.
        for x in 12..=13 {
            map.change_loc(x, 9, 0, 1, 1, false, false, true).unwrap();
            map.change_loc(x, 11, 0, 1, 1, false, false, true).unwrap();
        }
        let mut finder = PathFinder::new();
        let one = finder.find_path(&map, &query((10, 10), (15, 10)));
        assert!(one.success);
        let two = finder.find_path(
            &map,
            &query((10, 10), (15, 10))
                .with_src_size(2)
                .with_dest_footprint(1, 1),
        );
        // The 2x2 mover cannot fit through the one-tile gap and must
        // route around the obstacle cluster.
        assert!(two.success);
        let touches_gap = two
            .waypoints
            .iter()
            .any(|w| (12..=13).contains(&w.x) && w.z == 10);
        assert!(!touches_gap);
    }

    #[test]
    fn test_reaches_loc_target_open_face() {
        let mut map = CollisionMap::new();
        map.change_wall_straight(20, 10, 0, LocAngle::West, false, false, true);
        let mut finder = PathFinder::new();
        let q = query((10, 10), (20, 10)).with_target(TargetShape::Loc {
            shape: gw_collision::LocShape::WallStraight,
            angle: LocAngle::West,
        });
        let route = finder.find_path(&map, &q);
        assert!(route.success);
        assert_eq!(route.arrival(), Some(TileCoord::new(19, 10)));
    }
}
