//! Layer/category bitmask used to pre-filter spatial queries.

use std::fmt;

/// A set of up to 32 entity layers.
///
/// Every entity belongs to exactly one layer (`0..32`); a query passes a mask
/// and only entities whose layer bit is set are returned.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL:  LayerMask = LayerMask(u32::MAX);

    /// Mask containing the single layer `layer`.  Layers ≥ 32 yield `NONE`.
    #[inline]
    pub fn only(layer: u8) -> Self {
        LayerMask(1u32.checked_shl(layer as u32).unwrap_or(0))
    }

    /// Mask containing every layer in `layers`.
    pub fn from_layers(layers: &[u8]) -> Self {
        layers.iter().fold(Self::NONE, |mask, &l| mask.with(l))
    }

    /// Copy of `self` with `layer` added.
    #[inline]
    pub fn with(self, layer: u8) -> Self {
        LayerMask(self.0 | Self::only(layer).0)
    }

    #[inline]
    pub fn contains(self, layer: u8) -> bool {
        self.0 & Self::only(layer).0 != 0
    }
}

impl fmt::Display for LayerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
