//! Ascendant, MC and house cusps from local sidereal time.
//!
//! Formulas (ecliptic longitudes, LST = RAMC):
//! - `Asc = atan2(cos(LST), -(sin(LST)*cos(eps) + tan(phi)*sin(eps)))`
//! - `MC  = atan2(sin(LST), cos(LST)*cos(eps))`
//!
//! Three house systems are supported. Placidus is the KP default; Porphyry
//! (Sripati) and Equal are available for comparison.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ayanamsha::jd_to_centuries;
use crate::error::VedicError;
use crate::util::{arc_forward, normalize_360};

/// House division method, identified by its single-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HouseSystem {
    /// Time-based trisection of diurnal/nocturnal semi-arcs.
    #[default]
    #[serde(rename = "P")]
    Placidus,
    /// Trisection of the ecliptic quadrants (Sripati).
    #[serde(rename = "O")]
    Porphyry,
    /// 30-degree houses from the ascendant.
    #[serde(rename = "E")]
    Equal,
}

impl HouseSystem {
    pub const fn code(self) -> char {
        match self {
            Self::Placidus => 'P',
            Self::Porphyry => 'O',
            Self::Equal => 'E',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Placidus => "Placidus",
            Self::Porphyry => "Porphyry",
            Self::Equal => "Equal",
        }
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = VedicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p" | "placidus" => Ok(Self::Placidus),
            "o" | "porphyry" | "sripati" => Ok(Self::Porphyry),
            "e" | "equal" => Ok(Self::Equal),
            _ => Err(VedicError::UnknownHouseSystem(s.to_string())),
        }
    }
}

/// Mean obliquity of the ecliptic (IAU 2006), degrees.
pub fn mean_obliquity_deg(jd: f64) -> f64 {
    let t = jd_to_centuries(jd);
    let arcsec = 84381.406 - 46.836769 * t - 0.0001831 * t * t + 0.002_003_40 * t * t * t;
    arcsec / 3600.0
}

/// Tropical ascendant in degrees.
pub fn ascendant_deg(lst_deg: f64, latitude_deg: f64, obliquity_deg: f64) -> f64 {
    let lst = lst_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    let phi = latitude_deg.to_radians();
    let asc = f64::atan2(
        lst.cos(),
        -(lst.sin() * eps.cos() + phi.tan() * eps.sin()),
    );
    normalize_360(asc.to_degrees())
}

/// Tropical midheaven in degrees.
pub fn mc_deg(lst_deg: f64, obliquity_deg: f64) -> f64 {
    let lst = lst_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    normalize_360(f64::atan2(lst.sin(), lst.cos() * eps.cos()).to_degrees())
}

/// Twelve tropical cusp longitudes (index 0 = house 1).
pub fn house_cusps_deg(
    system: HouseSystem,
    lst_deg: f64,
    latitude_deg: f64,
    obliquity_deg: f64,
) -> Result<[f64; 12], VedicError> {
    let asc = ascendant_deg(lst_deg, latitude_deg, obliquity_deg);
    match system {
        HouseSystem::Equal => Ok(compute_equal(asc)),
        HouseSystem::Porphyry => Ok(compute_porphyry(asc, mc_deg(lst_deg, obliquity_deg))),
        HouseSystem::Placidus => compute_placidus(
            asc,
            mc_deg(lst_deg, obliquity_deg),
            lst_deg.to_radians(),
            latitude_deg.to_radians(),
            obliquity_deg.to_radians(),
        ),
    }
}

/// Equal house division: cusp[i] = start + i*30.
pub fn compute_equal(start_deg: f64) -> [f64; 12] {
    std::array::from_fn(|i| normalize_360(start_deg + (i as f64) * 30.0))
}

/// Porphyry: trisect the four quadrant arcs between Asc/IC/Desc/MC.
fn compute_porphyry(asc_deg: f64, mc_deg: f64) -> [f64; 12] {
    let desc_deg = normalize_360(asc_deg + 180.0);
    let ic_deg = normalize_360(mc_deg + 180.0);

    let mut cusps = [0.0; 12];
    // (quadrant start, quadrant end, index of start cusp)
    for (from, to, idx) in [
        (asc_deg, ic_deg, 0),
        (ic_deg, desc_deg, 3),
        (desc_deg, mc_deg, 6),
        (mc_deg, asc_deg, 9),
    ] {
        let arc = arc_forward(from, to);
        cusps[idx] = from;
        cusps[idx + 1] = normalize_360(from + arc / 3.0);
        cusps[idx + 2] = normalize_360(from + 2.0 * arc / 3.0);
    }
    cusps
}

/// Placidus: houses 11/12 trisect the diurnal semi-arc measured from the
/// MC, houses 2/3 the nocturnal semi-arc measured back from the IC.
fn compute_placidus(
    asc_deg: f64,
    mc_deg: f64,
    ramc: f64,
    lat: f64,
    eps: f64,
) -> Result<[f64; 12], VedicError> {
    if lat.abs() >= PI / 2.0 - eps {
        return Err(VedicError::InvalidLocation(
            "Placidus houses are undefined inside the polar circles",
        ));
    }

    let mut cusps = [0.0; 12];
    cusps[0] = asc_deg;
    cusps[9] = mc_deg;
    cusps[10] = placidus_cusp(ramc, lat, eps, 1.0 / 3.0, true);
    cusps[11] = placidus_cusp(ramc, lat, eps, 2.0 / 3.0, true);
    cusps[1] = placidus_cusp(ramc, lat, eps, 2.0 / 3.0, false);
    cusps[2] = placidus_cusp(ramc, lat, eps, 1.0 / 3.0, false);

    // Opposite houses mirror across the axis.
    for i in [0, 1, 2, 9, 10, 11] {
        cusps[(i + 6) % 12] = normalize_360(cusps[i] + 180.0);
    }
    Ok(cusps)
}

/// One intermediate Placidus cusp by fixed-point iteration on right ascension.
fn placidus_cusp(ramc: f64, lat: f64, eps: f64, fraction: f64, above_horizon: bool) -> f64 {
    let ra_for = |semi_arc: f64| {
        if above_horizon {
            ramc + fraction * semi_arc
        } else {
            ramc + PI - fraction * (PI - semi_arc)
        }
    };

    let mut ra = ra_for(PI / 2.0);
    for _ in 0..50 {
        let dec = (eps.tan() * ra.sin()).atan();
        let new_ra = ra_for(diurnal_semi_arc_rad(dec, lat));
        let done = (new_ra - ra).abs() < 1e-12;
        ra = new_ra;
        if done {
            break;
        }
    }
    normalize_360(ecliptic_longitude_of_ra(ra, eps).to_degrees())
}

/// Diurnal semi-arc `acos(-tan(dec) * tan(lat))`, radians.
fn diurnal_semi_arc_rad(dec: f64, lat: f64) -> f64 {
    (-(dec.tan() * lat.tan())).clamp(-1.0, 1.0).acos()
}

/// Ecliptic longitude of the ecliptic point with right ascension `ra`.
fn ecliptic_longitude_of_ra(ra: f64, eps: f64) -> f64 {
    f64::atan2(ra.sin(), ra.cos() * eps.cos())
}
