//! The collision map: flag storage plus the obstacle mutation surface.

use tracing::debug;

use crate::coord::ZoneKey;
use crate::error::CollisionError;
use crate::flags;
use crate::shape::{LocAngle, LocShape};
use crate::zone::{Zone, ZoneGrid};

/// Sparse world collision map.
///
/// Flags live in 8x8-tile zones allocated on demand. The surrounding
/// server is expected to allocate zones explicitly as regions stream in
/// ([`CollisionMap::allocate_zone`]); writes to an unallocated zone still
/// take effect, but are logged as a fault since they usually indicate a
/// region lifecycle bug.
///
/// Obstacle mutations come in add/remove pairs backed by per-bit
/// reference counts, so overlapping obstacles compose: removing one of
/// two locs that both flag a tile leaves the tile flagged.
///
/// # Example
///
/// ```
/// use gw_collision::{flags, CollisionMap};
///
/// let mut map = CollisionMap::new();
/// map.change_floor(10, 10, 0, true);
/// assert!(map.is_flagged(10, 10, 0, flags::FLOOR));
/// map.change_floor(10, 10, 0, false);
/// assert!(!map.is_flagged(10, 10, 0, flags::FLOOR));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CollisionMap {
    zones: ZoneGrid,
}

impl CollisionMap {
    /// Creates an empty map with no zones allocated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the zone containing `(zone_x * 8, zone_z * 8)` on `plane`.
    pub fn allocate_zone(&mut self, key: ZoneKey) {
        self.zones.allocate_if_absent(key);
    }

    /// Frees a zone and every flag stored in it.
    pub fn deallocate_zone(&mut self, key: ZoneKey) {
        self.zones.deallocate_if_present(key);
    }

    /// Returns `true` if the given zone is currently allocated.
    #[must_use]
    pub fn is_zone_allocated(&self, key: ZoneKey) -> bool {
        self.zones.is_allocated(key)
    }

    /// Returns the flag word at a tile. Unallocated zones read as zero.
    #[must_use]
    pub fn get(&self, x: i32, z: i32, plane: u8) -> u32 {
        let key = ZoneKey::containing(x, z, plane);
        self.zones
            .get(key)
            .map_or(0, |zone| zone.get(ZoneKey::tile_index(x, z)))
    }

    /// Returns `true` if any bit of `mask` is set at the tile.
    #[must_use]
    pub fn is_flagged(&self, x: i32, z: i32, plane: u8, mask: u32) -> bool {
        self.get(x, z, plane) & mask != 0
    }

    /// Increments the refcounts of `mask` at a tile, setting its bits.
    pub fn add(&mut self, x: i32, z: i32, plane: u8, mask: u32) {
        let key = ZoneKey::containing(x, z, plane);
        if !self.zones.is_allocated(key) {
            debug!(?key, x, z, "flag add in unallocated zone");
        }
        self.zones
            .get_or_allocate(key)
            .add(ZoneKey::tile_index(x, z), mask);
    }

    /// Decrements the refcounts of `mask` at a tile, clearing bits whose
    /// count reaches zero. A no-op in unallocated zones.
    pub fn remove(&mut self, x: i32, z: i32, plane: u8, mask: u32) {
        let key = ZoneKey::containing(x, z, plane);
        let Some(zone) = self.zones.get_mut(key) else {
            debug!(?key, x, z, "flag remove in unallocated zone");
            return;
        };
        zone.remove(ZoneKey::tile_index(x, z), mask);
    }

    /// Overwrites a tile's flag word, resetting its refcounts.
    ///
    /// For bulk loads of static map data; dynamic obstacles should use
    /// the add/remove pairs instead.
    pub fn set(&mut self, x: i32, z: i32, plane: u8, mask: u32) {
        let key = ZoneKey::containing(x, z, plane);
        self.zones
            .get_or_allocate(key)
            .set(ZoneKey::tile_index(x, z), mask);
    }

    fn change(&mut self, x: i32, z: i32, plane: u8, mask: u32, add: bool) {
        if add {
            self.add(x, z, plane, mask);
        } else {
            self.remove(x, z, plane, mask);
        }
    }

    /// Adds or removes unwalkable floor at a tile.
    pub fn change_floor(&mut self, x: i32, z: i32, plane: u8, add: bool) {
        self.change(x, z, plane, flags::FLOOR, add);
    }

    /// Adds or removes a blocking ground decoration at a tile.
    pub fn change_ground_decor(&mut self, x: i32, z: i32, plane: u8, add: bool) {
        self.change(x, z, plane, flags::GROUND_DECOR, add);
    }

    /// Adds or removes an NPC occupying a `size x size` square with its
    /// south-west corner at `(x, z)`.
    pub fn change_npc(&mut self, x: i32, z: i32, plane: u8, size: i32, add: bool) {
        self.change_square(x, z, plane, size, flags::NPC, add);
    }

    /// Adds or removes a player occupying a `size x size` square with
    /// its south-west corner at `(x, z)`.
    pub fn change_player(&mut self, x: i32, z: i32, plane: u8, size: i32, add: bool) {
        self.change_square(x, z, plane, size, flags::PLAYER, add);
    }

    fn change_square(&mut self, x: i32, z: i32, plane: u8, size: i32, mask: u32, add: bool) {
        for dz in 0..size {
            for dx in 0..size {
                self.change(x + dx, z + dz, plane, mask, add);
            }
        }
    }

    /// Adds or removes roof cover at a tile.
    pub fn change_roof(&mut self, x: i32, z: i32, plane: u8, add: bool) {
        self.change(x, z, plane, flags::ROOF, add);
    }

    /// Adds or removes a loc covering `width x length` tiles with its
    /// south-west corner at `(x, z)`.
    ///
    /// `block_range` marks the loc as also blocking projectiles and line
    /// of sight; `break_route_finding` marks it as breaking route-finding
    /// for the navigation-aware movement checks.
    ///
    /// Callers pass the footprint already rotated for the loc's angle
    /// (see [`LocAngle::rotate_footprint`]).
    ///
    /// # Errors
    ///
    /// Returns [`CollisionError::InvalidFootprint`] if either dimension
    /// is less than one. The map is not modified on error.
    pub fn change_loc(
        &mut self,
        x: i32,
        z: i32,
        plane: u8,
        width: i32,
        length: i32,
        block_range: bool,
        break_route_finding: bool,
        add: bool,
    ) -> Result<(), CollisionError> {
        if width < 1 || length < 1 {
            return Err(CollisionError::InvalidFootprint { width, length });
        }
        let mut mask = flags::LOC;
        if block_range {
            mask |= flags::LOC_PROJ_BLOCKER;
        }
        if break_route_finding {
            mask |= flags::LOC_ROUTE_BLOCKER;
        }
        for dz in 0..length {
            for dx in 0..width {
                self.change(x + dx, z + dz, plane, mask, add);
            }
        }
        Ok(())
    }

    /// Expands a plain wall mask into its flagged tiers.
    ///
    /// Projectile-blocker bits are added only for walls tall enough to
    /// stop ranged attacks; route-blocker bits only for walls that break
    /// route-finding rather than merely decorating it.
    const fn wall_mask(base: u32, block_range: bool, break_route_finding: bool) -> u32 {
        let mut mask = base;
        if block_range {
            mask |= base << flags::PROJ_SHIFT;
        }
        if break_route_finding {
            mask |= base << flags::ROUTE_SHIFT;
        }
        mask
    }

    fn change_wall_pair(
        &mut self,
        a: (i32, i32, u32),
        b: (i32, i32, u32),
        plane: u8,
        block_range: bool,
        break_route_finding: bool,
        add: bool,
    ) {
        let (ax, az, abase) = a;
        let (bx, bz, bbase) = b;
        let amask = Self::wall_mask(abase, block_range, break_route_finding);
        let bmask = Self::wall_mask(bbase, block_range, break_route_finding);
        self.change(ax, az, plane, amask, add);
        self.change(bx, bz, plane, bmask, add);
    }

    /// Adds or removes a straight wall on one side of tile `(x, z)`.
    ///
    /// The wall is mirrored onto the neighbouring tile's opposite side,
    /// so stepping across the boundary is blocked from both directions.
    pub fn change_wall_straight(
        &mut self,
        x: i32,
        z: i32,
        plane: u8,
        angle: LocAngle,
        block_range: bool,
        break_route_finding: bool,
        add: bool,
    ) {
        let (here, there) = match angle {
            LocAngle::West => ((x, z, flags::WALL_WEST), (x - 1, z, flags::WALL_EAST)),
            LocAngle::North => ((x, z, flags::WALL_NORTH), (x, z + 1, flags::WALL_SOUTH)),
            LocAngle::East => ((x, z, flags::WALL_EAST), (x + 1, z, flags::WALL_WEST)),
            LocAngle::South => ((x, z, flags::WALL_SOUTH), (x, z - 1, flags::WALL_NORTH)),
        };
        self.change_wall_pair(here, there, plane, block_range, break_route_finding, add);
    }

    /// Adds or removes a corner wall piece on tile `(x, z)`.
    ///
    /// Corner walls block the diagonal step across the corner; the
    /// mirror lands on the diagonal neighbour's opposite corner.
    pub fn change_wall_corner(
        &mut self,
        x: i32,
        z: i32,
        plane: u8,
        angle: LocAngle,
        block_range: bool,
        break_route_finding: bool,
        add: bool,
    ) {
        let (here, there) = match angle {
            LocAngle::West => (
                (x, z, flags::WALL_NORTH_WEST),
                (x - 1, z + 1, flags::WALL_SOUTH_EAST),
            ),
            LocAngle::North => (
                (x, z, flags::WALL_NORTH_EAST),
                (x + 1, z + 1, flags::WALL_SOUTH_WEST),
            ),
            LocAngle::East => (
                (x, z, flags::WALL_SOUTH_EAST),
                (x + 1, z - 1, flags::WALL_NORTH_WEST),
            ),
            LocAngle::South => (
                (x, z, flags::WALL_SOUTH_WEST),
                (x - 1, z - 1, flags::WALL_NORTH_EAST),
            ),
        };
        self.change_wall_pair(here, there, plane, block_range, break_route_finding, add);
    }

    /// Adds or removes an L-shaped wall occupying two adjacent sides of
    /// tile `(x, z)`, with both sides mirrored onto their neighbours.
    pub fn change_wall_l(
        &mut self,
        x: i32,
        z: i32,
        plane: u8,
        angle: LocAngle,
        block_range: bool,
        break_route_finding: bool,
        add: bool,
    ) {
        let (here, first, second) = match angle {
            LocAngle::West => (
                (x, z, flags::WALL_NORTH | flags::WALL_WEST),
                (x - 1, z, flags::WALL_EAST),
                (x, z + 1, flags::WALL_SOUTH),
            ),
            LocAngle::North => (
                (x, z, flags::WALL_NORTH | flags::WALL_EAST),
                (x, z + 1, flags::WALL_SOUTH),
                (x + 1, z, flags::WALL_WEST),
            ),
            LocAngle::East => (
                (x, z, flags::WALL_SOUTH | flags::WALL_EAST),
                (x + 1, z, flags::WALL_WEST),
                (x, z - 1, flags::WALL_NORTH),
            ),
            LocAngle::South => (
                (x, z, flags::WALL_SOUTH | flags::WALL_WEST),
                (x, z - 1, flags::WALL_NORTH),
                (x - 1, z, flags::WALL_EAST),
            ),
        };
        let (hx, hz, hbase) = here;
        let hmask = Self::wall_mask(hbase, block_range, break_route_finding);
        self.change(hx, hz, plane, hmask, add);
        self.change_wall_pair(first, second, plane, block_range, break_route_finding, add);
    }

    /// Adds or removes a wall loc, dispatching on its render shape.
    ///
    /// Non-wall shapes are logged and ignored; their collision comes
    /// from [`CollisionMap::change_loc`] instead.
    #[allow(clippy::too_many_arguments)]
    pub fn change_wall(
        &mut self,
        x: i32,
        z: i32,
        plane: u8,
        angle: LocAngle,
        shape: LocShape,
        block_range: bool,
        break_route_finding: bool,
        add: bool,
    ) {
        match shape {
            LocShape::WallStraight => {
                self.change_wall_straight(x, z, plane, angle, block_range, break_route_finding, add);
            }
            LocShape::WallDiagonalCorner | LocShape::WallSquareCorner => {
                self.change_wall_corner(x, z, plane, angle, block_range, break_route_finding, add);
            }
            LocShape::WallL => {
                self.change_wall_l(x, z, plane, angle, block_range, break_route_finding, add);
            }
            _ => {
                debug!(?shape, x, z, "change_wall with non-wall shape");
            }
        }
    }

    /// Returns the zone at `key`, if allocated. Primarily for tooling
    /// that inspects or serializes raw zone contents.
    #[must_use]
    pub fn zone(&self, key: ZoneKey) -> Option<&Zone> {
        self.zones.get(key)
    }
}
