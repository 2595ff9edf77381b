//! Layer masks for collision filtering.
//!
//! Every solid in the world sits on one or more layers. Sweeps carry a mask
//! and only report solids whose layers intersect it.

use serde::{Deserialize, Serialize};

/// Bit set of collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// No layers.
    pub const NONE: Self = Self(0);

    /// Walkable terrain: floors, walls, ceilings.
    pub const GROUND: Self = Self(1 << 0);

    /// One-off obstacles that block movement but are not terrain.
    pub const OBSTACLE: Self = Self(1 << 1);

    /// Grapple props (crates, anchors). Not solid for the player by default.
    pub const PROP: Self = Self(1 << 2);

    /// Trigger volumes.
    pub const TRIGGER: Self = Self(1 << 3);

    /// Everything.
    pub const ALL: Self = Self(u32::MAX);

    /// Standard mask for player movement sweeps.
    pub const MASK_PLAYER_SOLID: Self = Self(Self::GROUND.0 | Self::OBSTACLE.0);

    /// Check if these layers contain all of `other`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given layers are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Combine two masks.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for LayerMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_operations() {
        let combined = LayerMask::GROUND | LayerMask::PROP;

        assert!(combined.contains(LayerMask::GROUND));
        assert!(combined.contains(LayerMask::PROP));
        assert!(!combined.contains(LayerMask::TRIGGER));
        assert!(combined.intersects(LayerMask::GROUND));
        assert!(!LayerMask::NONE.intersects(LayerMask::ALL));
    }

    #[test]
    fn test_player_mask() {
        let mask = LayerMask::MASK_PLAYER_SOLID;
        assert!(mask.contains(LayerMask::GROUND));
        assert!(mask.contains(LayerMask::OBSTACLE));
        assert!(!mask.intersects(LayerMask::PROP));
    }
}
