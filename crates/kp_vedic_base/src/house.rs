//! House sets, cusps and house-of-degree lookup.

use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

use crate::error::VedicError;
use crate::sidereal::SiderealPosition;
use crate::util::arc_forward;

const ALL_HOUSES_MASK: u16 = 0b1_1111_1111_1110;

/// Validate a 1-based house number.
pub fn validate_house(house: u8) -> Result<u8, VedicError> {
    if (1..=12).contains(&house) {
        Ok(house)
    } else {
        Err(VedicError::InvalidHouse(house))
    }
}

/// A set of house numbers 1..=12, stored as a bitmask.
///
/// Iteration and serialization are in ascending house order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HouseSet(u16);

impl HouseSet {
    pub const EMPTY: Self = Self(0);

    pub fn single(house: u8) -> Self {
        let mut s = Self::EMPTY;
        s.insert(house);
        s
    }

    /// Insert a house; numbers outside 1..=12 are ignored and return false.
    pub fn insert(&mut self, house: u8) -> bool {
        if !(1..=12).contains(&house) {
            return false;
        }
        let before = self.0;
        self.0 |= 1 << house;
        before != self.0
    }

    pub fn remove(&mut self, house: u8) {
        if (1..=12).contains(&house) {
            self.0 &= !(1 << house);
        }
    }

    pub fn contains(&self, house: u8) -> bool {
        (1..=12).contains(&house) && self.0 & (1 << house) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 & ALL_HOUSES_MASK == 0
    }

    pub fn len(&self) -> usize {
        (self.0 & ALL_HOUSES_MASK).count_ones() as usize
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn contains_any(&self, other: &Self) -> bool {
        !self.intersection(*other).is_empty()
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=12u8).filter(move |&h| self.contains(h))
    }
}

impl FromIterator<u8> for HouseSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut s = Self::EMPTY;
        for h in iter {
            s.insert(h);
        }
        s
    }
}

impl<const N: usize> From<[u8; N]> for HouseSet {
    fn from(houses: [u8; N]) -> Self {
        houses.into_iter().collect()
    }
}

impl fmt::Debug for HouseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for HouseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|h| h.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

impl Serialize for HouseSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for h in self.iter() {
            seq.serialize_element(&h)?;
        }
        seq.end()
    }
}

/// One house cusp with its KP lord chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cusp {
    pub house_number: u8,
    pub position: SiderealPosition,
}

/// House (1..=12) whose circular cusp interval contains `longitude`.
///
/// House `h` spans `[cusp[h], cusp[h+1])`, wrapping at 360. A degenerate
/// cusp table where no interval matches logs a warning and yields house 1.
pub fn house_of_degree(cusp_longitudes: &[f64; 12], longitude: f64) -> u8 {
    for i in 0..12 {
        let start = cusp_longitudes[i];
        let width = arc_forward(start, cusp_longitudes[(i + 1) % 12]);
        if width > 0.0 && arc_forward(start, longitude) < width {
            return (i + 1) as u8;
        }
    }
    tracing::warn!(longitude, "no cusp interval contains longitude; using house 1");
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lagna::compute_equal;

    #[test]
    fn cusp_and_house_set_serialize() {
        let cusp = Cusp {
            house_number: 2,
            position: SiderealPosition::from_longitude(50.0),
        };
        let v = serde_json::to_value(cusp).unwrap();
        assert_eq!(v["house_number"], 2);
        assert_eq!(v["position"]["star_lord"], "Chandra");
        let set = serde_json::to_value(HouseSet::from([11, 2, 7])).unwrap();
        assert_eq!(set, serde_json::json!([2, 7, 11]));
    }

    #[test]
    fn insert_and_iterate_sorted() {
        let s = HouseSet::from([11, 2, 7, 2]);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![2, 7, 11]);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn out_of_range_ignored() {
        let mut s = HouseSet::EMPTY;
        assert!(!s.insert(0));
        assert!(!s.insert(13));
        assert!(s.is_empty());
        assert!(!s.contains(0));
    }

    #[test]
    fn subset_and_union() {
        let a = HouseSet::from([1, 2]);
        let b = HouseSet::from([1, 2, 3]);
        assert!(a.is_subset(&b));
        assert!(!b.is_subset(&a));
        assert!(HouseSet::EMPTY.is_subset(&a));
        assert_eq!(a.union(HouseSet::single(3)), b);
        assert!(a.contains_any(&b));
    }

    #[test]
    fn validate_house_range() {
        assert_eq!(validate_house(12), Ok(12));
        assert_eq!(validate_house(0), Err(VedicError::InvalidHouse(0)));
    }

    #[test]
    fn display_lists_houses() {
        assert_eq!(HouseSet::from([3, 1]).to_string(), "[1, 3]");
    }

    #[test]
    fn house_lookup_with_wrap() {
        let cusps = compute_equal(350.0);
        assert_eq!(house_of_degree(&cusps, 350.0), 1);
        assert_eq!(house_of_degree(&cusps, 5.0), 1);
        assert_eq!(house_of_degree(&cusps, 20.0), 2);
        assert_eq!(house_of_degree(&cusps, 349.999), 12);
    }

    #[test]
    fn degenerate_cusps_fall_back_to_first_house() {
        assert_eq!(house_of_degree(&[42.0; 12], 100.0), 1);
    }
}
