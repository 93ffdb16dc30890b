//! Loc shapes, render layers and rotations.

use crate::error::CollisionError;

/// The render shape of a loc (scenery object), as stored in map data.
///
/// The shape determines both which collision footprint a loc contributes
/// and which [`LocLayer`] it occupies for interaction purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum LocShape {
    /// A straight wall along one side of a tile.
    WallStraight = 0,
    /// A diagonal corner wall piece.
    WallDiagonalCorner = 1,
    /// An L-shaped wall occupying two adjacent sides.
    WallL = 2,
    /// A square corner wall piece.
    WallSquareCorner = 3,
    /// Straight wall decoration, no offset.
    WallDecorStraightNoOffset = 4,
    /// Straight wall decoration, offset from the wall.
    WallDecorStraightOffset = 5,
    /// Diagonal wall decoration, offset.
    WallDecorDiagonalOffset = 6,
    /// Diagonal wall decoration, no offset.
    WallDecorDiagonalNoOffset = 7,
    /// Wall decoration rendered on both diagonal faces.
    WallDecorDiagonalBoth = 8,
    /// A free-standing diagonal wall.
    WallDiagonal = 9,
    /// A straight centrepiece loc (most scenery).
    CentrepieceStraight = 10,
    /// A diagonal centrepiece loc.
    CentrepieceDiagonal = 11,
    /// Straight roof section.
    RoofStraight = 12,
    /// Diagonal roof section with a ridge.
    RoofDiagonalWithRoofEdge = 13,
    /// Diagonal roof section.
    RoofDiagonal = 14,
    /// Concave L-shaped roof section.
    RoofLConcave = 15,
    /// Convex L-shaped roof section.
    RoofLConvex = 16,
    /// Flat roof section.
    RoofFlat = 17,
    /// Straight roof edge.
    RoofEdgeStraight = 18,
    /// Diagonal corner roof edge.
    RoofEdgeDiagonalCorner = 19,
    /// L-shaped roof edge.
    RoofEdgeL = 20,
    /// Square corner roof edge.
    RoofEdgeSquareCorner = 21,
    /// Ground decoration (rocks, mushrooms and similar).
    GroundDecor = 22,
}

impl LocShape {
    /// Returns the render layer this shape occupies.
    #[must_use]
    pub const fn layer(self) -> LocLayer {
        match self {
            Self::WallStraight
            | Self::WallDiagonalCorner
            | Self::WallL
            | Self::WallSquareCorner => LocLayer::Wall,
            Self::WallDecorStraightNoOffset
            | Self::WallDecorStraightOffset
            | Self::WallDecorDiagonalOffset
            | Self::WallDecorDiagonalNoOffset
            | Self::WallDecorDiagonalBoth => LocLayer::WallDecor,
            Self::GroundDecor => LocLayer::GroundDecor,
            _ => LocLayer::Ground,
        }
    }
}

impl TryFrom<i32> for LocShape {
    type Error = CollisionError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::WallStraight,
            1 => Self::WallDiagonalCorner,
            2 => Self::WallL,
            3 => Self::WallSquareCorner,
            4 => Self::WallDecorStraightNoOffset,
            5 => Self::WallDecorStraightOffset,
            6 => Self::WallDecorDiagonalOffset,
            7 => Self::WallDecorDiagonalNoOffset,
            8 => Self::WallDecorDiagonalBoth,
            9 => Self::WallDiagonal,
            10 => Self::CentrepieceStraight,
            11 => Self::CentrepieceDiagonal,
            12 => Self::RoofStraight,
            13 => Self::RoofDiagonalWithRoofEdge,
            14 => Self::RoofDiagonal,
            15 => Self::RoofLConcave,
            16 => Self::RoofLConvex,
            17 => Self::RoofFlat,
            18 => Self::RoofEdgeStraight,
            19 => Self::RoofEdgeDiagonalCorner,
            20 => Self::RoofEdgeL,
            21 => Self::RoofEdgeSquareCorner,
            22 => Self::GroundDecor,
            other => return Err(CollisionError::UnknownShape(other)),
        })
    }
}

/// The interaction layer a [`LocShape`] belongs to.
///
/// Two locs can share a tile as long as they occupy different layers, so
/// reachability checks need the layer to know which loc a click refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocLayer {
    /// Walls and fences (shapes 0..=3).
    Wall,
    /// Decorations attached to walls (shapes 4..=8).
    WallDecor,
    /// Free-standing scenery, including roofs (shapes 9..=21).
    Ground,
    /// Ground decoration (shape 22).
    GroundDecor,
}

/// The rotation of a loc, in quarter turns.
///
/// For straight walls the angle names the side of the tile the wall sits
/// on; for corners it names the corner counter-clockwise of the angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum LocAngle {
    /// No rotation. Straight walls face west.
    West = 0,
    /// Quarter turn. Straight walls face north.
    North = 1,
    /// Half turn. Straight walls face east.
    East = 2,
    /// Three-quarter turn. Straight walls face south.
    South = 3,
}

impl LocAngle {
    /// Applies this rotation to a loc footprint, swapping the dimensions
    /// for quarter and three-quarter turns.
    #[must_use]
    pub const fn rotate_footprint(self, width: i32, length: i32) -> (i32, i32) {
        match self {
            Self::West | Self::East => (width, length),
            Self::North | Self::South => (length, width),
        }
    }
}

impl TryFrom<i32> for LocAngle {
    type Error = CollisionError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::West),
            1 => Ok(Self::North),
            2 => Ok(Self::East),
            3 => Ok(Self::South),
            other => Err(CollisionError::InvalidAngle(other)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_round_trip() {
        for id in 0..=22 {
            let shape = LocShape::try_from(id).unwrap();
            assert_eq!(shape as i32, id);
        }
    }

    #[test]
    fn test_unknown_shape_rejected() {
        assert_eq!(
            LocShape::try_from(23),
            Err(CollisionError::UnknownShape(23))
        );
        assert_eq!(
            LocShape::try_from(-1),
            Err(CollisionError::UnknownShape(-1))
        );
    }

    #[test]
    fn test_layer_mapping() {
        assert_eq!(LocShape::WallStraight.layer(), LocLayer::Wall);
        assert_eq!(LocShape::WallSquareCorner.layer(), LocLayer::Wall);
        assert_eq!(LocShape::WallDecorDiagonalBoth.layer(), LocLayer::WallDecor);
        assert_eq!(LocShape::WallDiagonal.layer(), LocLayer::Ground);
        assert_eq!(LocShape::RoofEdgeSquareCorner.layer(), LocLayer::Ground);
        assert_eq!(LocShape::GroundDecor.layer(), LocLayer::GroundDecor);
    }

    #[test]
    fn test_angle_rotates_footprint() {
        assert_eq!(LocAngle::West.rotate_footprint(2, 3), (2, 3));
        assert_eq!(LocAngle::North.rotate_footprint(2, 3), (3, 2));
        assert_eq!(LocAngle::East.rotate_footprint(2, 3), (2, 3));
        assert_eq!(LocAngle::South.rotate_footprint(2, 3), (3, 2));
    }

    #[test]
    fn test_invalid_angle_rejected() {
        assert_eq!(LocAngle::try_from(4), Err(CollisionError::InvalidAngle(4)));
    }
}
