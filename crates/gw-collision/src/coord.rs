//! Tile and zone coordinate types.

/// A discrete tile coordinate on one plane of the world grid.
///
/// Uses `i32` coordinates so callers can address any region of the world
/// without worrying about map bounds; tiles that were never written simply
/// carry no collision flags.
///
/// # Example
///
/// ```
/// use gw_collision::TileCoord;
///
/// let tile = TileCoord::new(3200, 3200);
/// assert_eq!(tile.x, 3200);
/// assert_eq!(tile.z, 3200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    /// X coordinate (west-east axis).
    pub x: i32,
    /// Z coordinate (south-north axis).
    pub z: i32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Returns the tile offset by `(dx, dz)`.
    ///
    /// # Example
    ///
    /// ```
    /// use gw_collision::TileCoord;
    ///
    /// let tile = TileCoord::new(10, 20);
    /// assert_eq!(tile.translate(1, -1), TileCoord::new(11, 19));
    /// ```
    #[must_use]
    pub const fn translate(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// Returns the Chebyshev (king-move) distance to another tile.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

/// Identifies one 8x8-tile zone on one plane.
///
/// Zones are the unit of sparse allocation: the [`crate::CollisionMap`]
/// stores flag grids per zone, and the surrounding server allocates and
/// deallocates zones as world regions stream in and out of memory.
///
/// # Example
///
/// ```
/// use gw_collision::ZoneKey;
///
/// // Tiles (0..8, 0..8) on plane 0 all live in the same zone.
/// assert_eq!(ZoneKey::containing(0, 0, 0), ZoneKey::containing(7, 7, 0));
/// assert_ne!(ZoneKey::containing(7, 7, 0), ZoneKey::containing(8, 7, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneKey {
    /// Zone x coordinate (tile x >> 3).
    pub x: i32,
    /// Zone z coordinate (tile z >> 3).
    pub z: i32,
    /// Plane (height level), typically 0..=3.
    pub plane: u8,
}

impl ZoneKey {
    /// Width and length of a zone, in tiles.
    pub const DIM: i32 = 8;

    /// Number of tiles in a zone.
    pub const TILES: usize = 64;

    /// Creates a zone key from zone-grid coordinates.
    #[must_use]
    pub const fn new(x: i32, z: i32, plane: u8) -> Self {
        Self { x, z, plane }
    }

    /// Returns the key of the zone containing the given absolute tile.
    #[must_use]
    pub const fn containing(tile_x: i32, tile_z: i32, plane: u8) -> Self {
        Self::new(tile_x >> 3, tile_z >> 3, plane)
    }

    /// Index of an absolute tile within its zone's flat 64-entry grid.
    #[must_use]
    pub const fn tile_index(tile_x: i32, tile_z: i32) -> usize {
        (((tile_z & 0x7) << 3) | (tile_x & 0x7)) as usize
    }

    /// The south-west corner tile of this zone.
    #[must_use]
    pub const fn base_tile(self) -> TileCoord {
        TileCoord::new(self.x << 3, self.z << 3)
    }
}
