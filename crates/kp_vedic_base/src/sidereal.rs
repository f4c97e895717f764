//! Tropical → sidereal conversion and the per-degree KP position snapshot.

use serde::Serialize;

use crate::graha::{Graha, rashi_lord};
use crate::nakshatra::Nakshatra;
use crate::rashi::Rashi;
use crate::sublord::sub_lord_chain;
use crate::util::normalize_360;

/// Sidereal longitude from a tropical longitude and an ayanamsha.
pub fn tropical_to_sidereal(tropical_deg: f64, ayanamsha_deg: f64) -> f64 {
    normalize_360(tropical_deg - ayanamsha_deg)
}

/// A sidereal degree with its full KP lord chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SiderealPosition {
    /// Sidereal longitude in [0, 360).
    pub longitude: f64,
    pub rashi: Rashi,
    pub sign_lord: Graha,
    pub nakshatra: Nakshatra,
    pub star_lord: Graha,
    pub sub_lord: Graha,
    pub sub_sub_lord: Graha,
    pub sookshma_lord: Graha,
}

impl SiderealPosition {
    pub fn from_longitude(sidereal_lon_deg: f64) -> Self {
        let longitude = normalize_360(sidereal_lon_deg);
        let rashi = Rashi::from_longitude(longitude);
        let chain = sub_lord_chain(longitude);
        Self {
            longitude,
            rashi,
            sign_lord: rashi_lord(rashi),
            nakshatra: chain.nakshatra,
            star_lord: chain.star_lord,
            sub_lord: chain.sub_lord,
            sub_sub_lord: chain.sub_sub_lord,
            sookshma_lord: chain.sookshma_lord,
        }
    }

    pub fn from_tropical(tropical_deg: f64, ayanamsha_deg: f64) -> Self {
        Self::from_longitude(tropical_to_sidereal(tropical_deg, ayanamsha_deg))
    }

    /// Sign, star, sub and sub-sub lords, the four lords used for cuspal
    /// signification.
    pub fn lords(&self) -> [Graha; 4] {
        [self.sign_lord, self.star_lord, self.sub_lord, self.sub_sub_lord]
    }

    /// True if `graha` is any of the four cuspal lords of this position.
    pub fn has_lord(&self, graha: Graha) -> bool {
        self.lords().contains(&graha)
    }

    /// Degrees within the rashi, [0, 30).
    pub fn degrees_in_rashi(&self) -> f64 {
        self.longitude - f64::from(self.rashi.index()) * 30.0
    }
}
