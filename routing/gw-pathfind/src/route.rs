//! Route results and path queries.

use gw_collision::{CollisionStrategy, TileCoord};
use smallvec::SmallVec;

use crate::reach::TargetShape;

/// Default cap on emitted waypoints.
pub const DEFAULT_MAX_WAYPOINTS: usize = 25;

/// The outcome of a path query.
///
/// Waypoints are the turning points of the walked path, ordered from the
/// first turn after the source to the arrival tile. A successful route
/// with no waypoints means the source already satisfied the arrival
/// test.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    /// Turning points, source side first. Each waypoint is reachable
    /// from its predecessor by repeated single steps in one direction.
    pub waypoints: SmallVec<[TileCoord; DEFAULT_MAX_WAYPOINTS]>,
    /// Whether the arrival test was satisfied.
    pub success: bool,
    /// Whether this is a best-effort route near an unreachable target
    /// rather than a route to it.
    pub alternative: bool,
}

impl Route {
    /// A failed route with no waypoints.
    #[must_use]
    pub fn failure() -> Self {
        Self::default()
    }

    /// Returns `true` if no usable route was found.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.success
    }

    /// The tile the route ends on, if it moved at all.
    #[must_use]
    pub fn arrival(&self) -> Option<TileCoord> {
        self.waypoints.last().copied()
    }
}

/// A path-finding request.
///
/// Built with the `with_*` methods from a source, destination and plane;
/// everything else defaults to a 1x1 mover walking normally to a plain
/// rectangle.
///
/// # Example
///
/// ```
/// use gw_collision::TileCoord;
/// use gw_pathfind::RouteQuery;
///
/// let query = RouteQuery::new(0, TileCoord::new(10, 10), TileCoord::new(15, 10))
///     .with_src_size(2)
///     .with_move_near(true);
/// assert_eq!(query.src_size, 2);
/// assert!(query.move_near);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteQuery {
    /// Plane to search on.
    pub plane: u8,
    /// South-west corner of the mover.
    pub src: TileCoord,
    /// Anchor tile of the target footprint.
    pub dest: TileCoord,
    /// Side length of the square mover.
    pub src_size: i32,
    /// Unrotated width of the target footprint.
    pub dest_width: i32,
    /// Unrotated length of the target footprint.
    pub dest_length: i32,
    /// What the route is arriving at.
    pub target: TargetShape,
    /// Face bits vetoing approaches to the target.
    pub block_access_flags: u32,
    /// Fall back to the closest visited tile near an unreachable target.
    pub move_near: bool,
    /// Cap on emitted waypoints; longer paths are cut short.
    pub max_waypoints: usize,
    /// Movement profile for step validation.
    pub strategy: CollisionStrategy,
}

impl RouteQuery {
    /// Creates a query with default mover and target parameters.
    #[must_use]
    pub fn new(plane: u8, src: TileCoord, dest: TileCoord) -> Self {
        Self {
            plane,
            src,
            dest,
            src_size: 1,
            dest_width: 1,
            dest_length: 1,
            target: TargetShape::Rectangle,
            block_access_flags: 0,
            move_near: false,
            max_waypoints: DEFAULT_MAX_WAYPOINTS,
            strategy: CollisionStrategy::Normal,
        }
    }

    /// Sets the mover's square footprint side length.
    #[must_use]
    pub fn with_src_size(mut self, src_size: i32) -> Self {
        self.src_size = src_size;
        self
    }

    /// Sets the target's unrotated footprint.
    #[must_use]
    pub fn with_dest_footprint(mut self, width: i32, length: i32) -> Self {
        self.dest_width = width;
        self.dest_length = length;
        self
    }

    /// Sets the target shape the arrival test dispatches on.
    #[must_use]
    pub fn with_target(mut self, target: TargetShape) -> Self {
        self.target = target;
        self
    }

    /// Sets the face bits vetoing approaches to the target.
    #[must_use]
    pub fn with_block_access_flags(mut self, flags: u32) -> Self {
        self.block_access_flags = flags;
        self
    }

    /// Enables or disables the move-near fallback.
    #[must_use]
    pub fn with_move_near(mut self, move_near: bool) -> Self {
        self.move_near = move_near;
        self
    }

    /// Overrides the waypoint cap.
    #[must_use]
    pub fn with_max_waypoints(mut self, max_waypoints: usize) -> Self {
        self.max_waypoints = max_waypoints;
        self
    }

    /// Sets the movement profile.
    #[must_use]
    pub fn with_strategy(mut self, strategy: CollisionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
