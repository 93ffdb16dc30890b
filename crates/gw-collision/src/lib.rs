//! Tile collision map for grid worlds.
//!
//! Collision state lives in a sparse store of 8x8-tile zones, one `u32`
//! flag word per tile. Obstacles are added and removed through typed
//! mutation operations (floors, locs, walls, entities) backed by per-bit
//! reference counts, so overlapping obstacles compose and removal always
//! restores the prior state. On top of the flag store sit the movement
//! primitives shared by the navigation crates: single-step validation
//! for arbitrary footprints and fixed-point raycasts for line of sight
//! and line of walk.
//!
//! # Example
//!
//! ```
//! use gw_collision::{can_travel, CollisionMap, CollisionStrategy, LocAngle};
//!
//! let mut map = CollisionMap::new();
//! map.change_wall_straight(3, 3, 0, LocAngle::North, false, false, true);
//!
//! let normal = CollisionStrategy::Normal;
//! // The wall blocks the north step across the tile boundary.
//! assert!(!can_travel(&map, 0, 3, 3, 0, 1, 1, 0, normal));
//! assert!(can_travel(&map, 0, 3, 3, 1, 0, 1, 0, normal));
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for the coordinate and trace
//!   types.

#![warn(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod coord;
pub mod error;
pub mod flags;
pub mod map;
pub mod rayline;
pub mod shape;
pub mod step;
pub mod strategy;
mod zone;

pub use coord::{TileCoord, ZoneKey};
pub use error::CollisionError;
pub use map::CollisionMap;
pub use rayline::{has_line_of_sight, has_line_of_walk, line_of_sight, line_of_walk, RayTrace};
pub use shape::{LocAngle, LocLayer, LocShape};
pub use step::{can_travel, can_travel_rect};
pub use strategy::CollisionStrategy;
pub use zone::{Zone, ZoneGrid};
