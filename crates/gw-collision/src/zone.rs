//! Sparse zone storage with per-bit reference counts.
//!
//! The world is divided into 8x8-tile zones, allocated on demand and keyed
//! by [`ZoneKey`]. Each zone stores one `u32` flag word per tile plus a
//! small reference count per flag bit, so that two overlapping obstacles
//! contributing the same bit only clear it after both are removed.

use hashbrown::HashMap;

use crate::coord::ZoneKey;

/// Number of distinct flag bits tracked per tile.
const BITS_PER_TILE: usize = 32;

/// Collision flags and refcounts for one 8x8-tile zone.
///
/// The flag word for a tile has a bit set exactly when that bit's refcount
/// is nonzero. Counts saturate at `u8::MAX` rather than wrapping; a zone
/// that ever saturates a count will keep the bit set until a bulk
/// [`Zone::set`] resets it, which matches how map reloads are performed.
#[derive(Debug, Clone)]
pub struct Zone {
    flags: [u32; ZoneKey::TILES],
    counts: Box<[u8; ZoneKey::TILES * BITS_PER_TILE]>,
}

impl Default for Zone {
    fn default() -> Self {
        Self {
            flags: [0; ZoneKey::TILES],
            counts: Box::new([0; ZoneKey::TILES * BITS_PER_TILE]),
        }
    }
}

impl Zone {
    /// Creates an empty zone with every tile unflagged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the flag word for the tile at `index` (0..64).
    #[must_use]
    pub fn get(&self, index: usize) -> u32 {
        self.flags[index]
    }

    /// Increments the refcount of every bit in `mask` for the tile at
    /// `index`, setting the corresponding flag bits.
    pub fn add(&mut self, index: usize, mask: u32) {
        let mut bits = mask;
        while bits != 0 {
            let bit = bits.trailing_zeros() as usize;
            let count = &mut self.counts[index * BITS_PER_TILE + bit];
            *count = count.saturating_add(1);
            bits &= bits - 1;
        }
        self.flags[index] |= mask;
    }

    /// Decrements the refcount of every bit in `mask` for the tile at
    /// `index`, clearing each flag bit whose count reaches zero.
    ///
    /// Removing a bit that was never added is a no-op for that bit.
    pub fn remove(&mut self, index: usize, mask: u32) {
        let mut bits = mask;
        while bits != 0 {
            let bit = bits.trailing_zeros() as usize;
            let count = &mut self.counts[index * BITS_PER_TILE + bit];
            if *count > 0 && *count < u8::MAX {
                *count -= 1;
            }
            if *count == 0 {
                self.flags[index] &= !(1 << bit);
            }
            bits &= bits - 1;
        }
    }

    /// Overwrites the tile at `index` with exactly `mask`, resetting each
    /// bit's refcount to one (set) or zero (clear).
    ///
    /// Used for bulk loads from static map data, where the incoming word
    /// is authoritative.
    pub fn set(&mut self, index: usize, mask: u32) {
        for bit in 0..BITS_PER_TILE {
            self.counts[index * BITS_PER_TILE + bit] = u8::from(mask & (1 << bit) != 0);
        }
        self.flags[index] = mask;
    }
}

/// Sparse map from zone keys to allocated zones.
#[derive(Debug, Clone, Default)]
pub struct ZoneGrid {
    zones: HashMap<ZoneKey, Zone>,
}

impl ZoneGrid {
    /// Creates an empty grid with no zones allocated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the zone at `key`, if allocated.
    #[must_use]
    pub fn get(&self, key: ZoneKey) -> Option<&Zone> {
        self.zones.get(&key)
    }

    /// Returns `true` if the zone at `key` is allocated.
    #[must_use]
    pub fn is_allocated(&self, key: ZoneKey) -> bool {
        self.zones.contains_key(&key)
    }

    /// Returns the zone at `key`, allocating an empty one if absent.
    pub fn get_or_allocate(&mut self, key: ZoneKey) -> &mut Zone {
        self.zones.entry(key).or_default()
    }

    /// Returns the zone at `key` mutably, without allocating.
    pub fn get_mut(&mut self, key: ZoneKey) -> Option<&mut Zone> {
        self.zones.get_mut(&key)
    }

    /// Allocates an empty zone at `key` if one is not already present.
    pub fn allocate_if_absent(&mut self, key: ZoneKey) {
        self.zones.entry(key).or_default();
    }

    /// Frees the zone at `key`, discarding all of its flags.
    pub fn deallocate_if_present(&mut self, key: ZoneKey) {
        self.zones.remove(&key);
    }

    /// Number of currently allocated zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Returns `true` if no zones are allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
