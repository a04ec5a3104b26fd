//! Minutia model
//!
//! A minutia is a local ridge discontinuity: a ridge that ends, or one that
//! splits in two. The detector emits them in a specific order and the order is
//! part of the contract, so [`Minutiae`] is an insertion-ordered sequence that
//! never sorts itself.

use alloc::vec::Vec;
use core::ops::Deref;

use crate::errors::{NfiqError, NfiqResult};

/// Number of compass octants used for minutia direction.
pub const NUM_DIRECTIONS: u8 = 16;

/// Minutia direction as one of 16 equally spaced compass octants.
///
/// Octant 0 points along the positive x axis; octants advance
/// counter-clockwise in steps of 22.5 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Direction(u8);

impl Direction {
    /// Create a direction, rejecting octants outside `0..16`
    pub fn new(octant: u8) -> NfiqResult<Self> {
        if octant >= NUM_DIRECTIONS {
            return Err(NfiqError::InvalidInput {
                reason: "minutia direction outside 16 octants",
            });
        }
        Ok(Self(octant))
    }

    /// Raw octant index
    pub fn octant(&self) -> u8 {
        self.0
    }

    /// Direction in degrees, `[0, 360)`
    pub fn to_degrees(&self) -> f64 {
        self.0 as f64 * (360.0 / NUM_DIRECTIONS as f64)
    }
}

impl TryFrom<u8> for Direction {
    type Error = NfiqError;

    fn try_from(octant: u8) -> NfiqResult<Self> {
        Self::new(octant)
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> u8 {
        direction.0
    }
}

/// Kind of ridge discontinuity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MinutiaType {
    /// Ridge terminates
    RidgeEnding,
    /// Ridge splits into two
    Bifurcation,
}

/// Single detected minutia. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMinutia"))]
pub struct Minutia {
    /// Column in the binarized image
    pub x: u32,
    /// Row in the binarized image
    pub y: u32,
    /// Ridge direction
    pub direction: Direction,
    /// Detector reliability in `[0, 1]`
    pub reliability: f64,
    /// Ending or bifurcation
    pub kind: MinutiaType,
    /// Whether the feature appears (true) or disappears along the scan
    pub appearing: bool,
}

impl Minutia {
    /// Create a minutia, validating reliability
    pub fn new(
        x: u32,
        y: u32,
        direction: Direction,
        reliability: f64,
        kind: MinutiaType,
        appearing: bool,
    ) -> NfiqResult<Self> {
        if !(0.0..=1.0).contains(&reliability) {
            return Err(NfiqError::InvalidInput {
                reason: "minutia reliability outside [0, 1]",
            });
        }
        Ok(Self { x, y, direction, reliability, kind, appearing })
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMinutia {
    x: u32,
    y: u32,
    direction: Direction,
    reliability: f64,
    kind: MinutiaType,
    appearing: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMinutia> for Minutia {
    type Error = NfiqError;

    fn try_from(raw: RawMinutia) -> NfiqResult<Self> {
        Self::new(raw.x, raw.y, raw.direction, raw.reliability, raw.kind, raw.appearing)
    }
}

/// Insertion-ordered list of minutiae for one image
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Minutiae {
    items: Vec<Minutia>,
}

impl Minutiae {
    /// Empty list
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Empty list with room for `capacity` minutiae
    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity) }
    }

    /// Append a minutia, preserving detector order
    pub fn push(&mut self, minutia: Minutia) {
        self.items.push(minutia);
    }

    /// Borrow as a slice in detector order
    pub fn as_slice(&self) -> &[Minutia] {
        &self.items
    }
}

impl Deref for Minutiae {
    type Target = [Minutia];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl From<Vec<Minutia>> for Minutiae {
    fn from(items: Vec<Minutia>) -> Self {
        Self { items }
    }
}

impl FromIterator<Minutia> for Minutiae {
    fn from_iter<I: IntoIterator<Item = Minutia>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Minutiae {
    type Item = &'a Minutia;
    type IntoIter = core::slice::Iter<'a, Minutia>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
