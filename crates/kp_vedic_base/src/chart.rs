//! Immutable chart snapshot: nine planets and twelve cusps at one instant.

use serde::Serialize;

use crate::graha::{ALL_GRAHAS, Graha};
use crate::house::{Cusp, HouseSet, house_of_degree};
use crate::sidereal::{SiderealPosition, tropical_to_sidereal};

/// Sidereal positions of all grahas and cusps at one instant.
///
/// Planets are indexed by [`Graha::index`]; cusp `h` sits at index `h - 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSnapshot {
    pub jd_utc: f64,
    pub ayanamsha_deg: f64,
    pub planets: [SiderealPosition; 9],
    pub cusps: [Cusp; 12],
}

impl ChartSnapshot {
    /// Build from sidereal longitudes.
    pub fn from_sidereal(jd_utc: f64, planet_lons: [f64; 9], cusp_lons: [f64; 12]) -> Self {
        Self::from_tropical(jd_utc, 0.0, planet_lons, cusp_lons)
    }

    /// Build from tropical longitudes and an ayanamsha.
    pub fn from_tropical(
        jd_utc: f64,
        ayanamsha_deg: f64,
        planet_lons: [f64; 9],
        cusp_lons: [f64; 12],
    ) -> Self {
        let planets = planet_lons.map(|lon| SiderealPosition::from_tropical(lon, ayanamsha_deg));
        let cusps = std::array::from_fn(|i| Cusp {
            house_number: (i + 1) as u8,
            position: SiderealPosition::from_longitude(tropical_to_sidereal(
                cusp_lons[i],
                ayanamsha_deg,
            )),
        });
        Self {
            jd_utc,
            ayanamsha_deg,
            planets,
            cusps,
        }
    }

    pub fn planet(&self, graha: Graha) -> &SiderealPosition {
        &self.planets[usize::from(graha.index())]
    }

    /// Cusp of a 1-based house; numbers outside 1..=12 clamp into range.
    pub fn cusp(&self, house: u8) -> &Cusp {
        &self.cusps[usize::from(house.clamp(1, 12) - 1)]
    }

    pub fn ascendant(&self) -> &SiderealPosition {
        &self.cusps[0].position
    }

    pub fn cusp_longitudes(&self) -> [f64; 12] {
        self.cusps.map(|c| c.position.longitude)
    }

    /// House containing a sidereal longitude.
    pub fn house_of_degree(&self, longitude: f64) -> u8 {
        house_of_degree(&self.cusp_longitudes(), longitude)
    }

    /// House occupied by a graha.
    pub fn house_of(&self, graha: Graha) -> u8 {
        self.house_of_degree(self.planet(graha).longitude)
    }

    /// Houses where `lord` is any of the cusp's sign/star/sub/sub-sub lords.
    pub fn houses_with_lord(&self, lord: Graha) -> HouseSet {
        self.cusps
            .iter()
            .filter(|c| c.position.has_lord(lord))
            .map(|c| c.house_number)
            .collect()
    }

    /// Iterate `(graha, position)` in traditional order.
    pub fn planets_iter(&self) -> impl Iterator<Item = (Graha, &SiderealPosition)> {
        ALL_GRAHAS.into_iter().zip(self.planets.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lagna::compute_equal;

    fn sample() -> ChartSnapshot {
        let planets = [10.0, 50.0, 100.0, 130.0, 200.0, 250.0, 300.0, 80.0, 260.0];
        ChartSnapshot::from_sidereal(2_451_545.0, planets, compute_equal(0.0))
    }

    #[test]
    fn planets_indexed_by_graha() {
        let c = sample();
        assert!((c.planet(Graha::Chandra).longitude - 50.0).abs() < 1e-12);
        assert!((c.planet(Graha::Ketu).longitude - 260.0).abs() < 1e-12);
    }

    #[test]
    fn cusps_numbered_from_one() {
        let c = sample();
        assert_eq!(c.cusp(1).house_number, 1);
        assert_eq!(c.cusp(12).house_number, 12);
        assert!((c.cusp(2).position.longitude - 30.0).abs() < 1e-12);
    }

    #[test]
    fn occupied_houses() {
        let c = sample();
        assert_eq!(c.house_of(Graha::Surya), 1);
        assert_eq!(c.house_of(Graha::Chandra), 2);
        assert_eq!(c.house_of(Graha::Shani), 11);
    }

    #[test]
    fn tropical_applies_ayanamsha() {
        let c = ChartSnapshot::from_tropical(2_451_545.0, 24.0, [74.0; 9], compute_equal(24.0));
        assert!((c.planet(Graha::Surya).longitude - 50.0).abs() < 1e-12);
        assert!(c.ascendant().longitude.abs() < 1e-12);
    }

    #[test]
    fn lordship_scan() {
        let c = sample();
        // Cusp 1 at 0° Aries: Mars sign, Ketu star/sub/sub-sub.
        let ketu = c.houses_with_lord(Graha::Ketu);
        assert!(ketu.contains(1));
        let mars = c.houses_with_lord(Graha::Mangal);
        assert!(mars.contains(1) && mars.contains(8));
    }
}
