//! Three-dimensional capacity demand.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// One of the three capacity axes a container is bounded by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Dimension {
    Weight,
    Volume,
    Pallets,
}

impl Dimension {
    /// All dimensions, in the order they are checked.
    pub const ALL: [Dimension; 3] = [Dimension::Weight, Dimension::Volume, Dimension::Pallets];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Weight => "weight",
            Dimension::Volume => "volume",
            Dimension::Pallets => "pallets",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A `(weight, volume, pallets)` triple.
///
/// Used for order demands, container remaining capacity and the capacity
/// limits themselves.
///
/// # Example
///
/// ```
/// use loadforge_core::Demand;
///
/// let limit = Demand::new(100.0, 100.0, 10.0);
/// let load = Demand::new(60.0, 10.0, 1.0) + Demand::new(10.0, 10.0, 1.0);
///
/// assert!(load.fits_within(&limit));
/// assert_eq!(limit - load, Demand::new(30.0, 80.0, 8.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Demand {
    pub weight: f64,
    pub volume: f64,
    pub pallets: f64,
}

impl Demand {
    pub const ZERO: Demand = Demand {
        weight: 0.0,
        volume: 0.0,
        pallets: 0.0,
    };

    pub const fn new(weight: f64, volume: f64, pallets: f64) -> Self {
        Self {
            weight,
            volume,
            pallets,
        }
    }

    /// Returns the component for `dimension`.
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Weight => self.weight,
            Dimension::Volume => self.volume,
            Dimension::Pallets => self.pallets,
        }
    }

    /// Iterates the components together with their dimension.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Returns true if every component is at most the matching one in `other`.
    pub fn fits_within(&self, other: &Demand) -> bool {
        self.weight <= other.weight && self.volume <= other.volume && self.pallets <= other.pallets
    }

    /// Returns the first dimension in which `self` exceeds `limit`.
    pub fn first_exceeded(&self, limit: &Demand) -> Option<Dimension> {
        Dimension::ALL
            .into_iter()
            .find(|&d| self.get(d) > limit.get(d))
    }

    pub fn is_zero(&self) -> bool {
        self.weight == 0.0 && self.volume == 0.0 && self.pallets == 0.0
    }
}

impl Add for Demand {
    type Output = Demand;

    fn add(self, rhs: Demand) -> Demand {
        Demand::new(
            self.weight + rhs.weight,
            self.volume + rhs.volume,
            self.pallets + rhs.pallets,
        )
    }
}

impl AddAssign for Demand {
    fn add_assign(&mut self, rhs: Demand) {
        *self = *self + rhs;
    }
}

impl Sub for Demand {
    type Output = Demand;

    fn sub(self, rhs: Demand) -> Demand {
        Demand::new(
            self.weight - rhs.weight,
            self.volume - rhs.volume,
            self.pallets - rhs.pallets,
        )
    }
}

impl SubAssign for Demand {
    fn sub_assign(&mut self, rhs: Demand) {
        *self = *self - rhs;
    }
}

impl std::iter::Sum for Demand {
    fn sum<I: Iterator<Item = Demand>>(iter: I) -> Self {
        iter.fold(Demand::ZERO, Add::add)
    }
}

impl fmt::Display for Demand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}w/{}v/{}p",
            self.weight, self.volume, self.pallets
        )
    }
}
