//! Chart inputs and snapshot construction from an ephemeris.

use serde::Serialize;

use kp_config::KpConfig;
use kp_vedic_base::{
    ChartSnapshot, DashaWindow, GeoLocation, Graha, HORARY_MAX, VedicError, horary_ascendant_deg,
    normalize_360, rotate_cusps,
};

use crate::ephemeris::Ephemeris;
use crate::error::SearchError;

/// Birth chart or KP horary chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Birth,
    /// Horary number in `1..=2193`.
    Horary { number: u32 },
}

/// Everything needed to cast the subject chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartInput {
    pub kind: ChartKind,
    /// Birth instant or horary query instant.
    pub jd_utc: f64,
    pub location: GeoLocation,
    /// Local civil offset, used for the weekday lord and formatted times.
    pub utc_offset_hours: f64,
}

impl ChartInput {
    pub fn birth(jd_utc: f64, location: GeoLocation, utc_offset_hours: f64) -> Self {
        Self {
            kind: ChartKind::Birth,
            jd_utc,
            location,
            utc_offset_hours,
        }
    }

    pub fn horary(
        number: u32,
        jd_utc: f64,
        location: GeoLocation,
        utc_offset_hours: f64,
    ) -> Result<Self, VedicError> {
        if !(1..=HORARY_MAX).contains(&number) {
            return Err(VedicError::HoraryOutOfRange(number));
        }
        Ok(Self {
            kind: ChartKind::Horary { number },
            jd_utc,
            location,
            utc_offset_hours,
        })
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if let ChartKind::Horary { number } = self.kind {
            horary_ascendant_deg(number)?;
        }
        self.location.validate()?;
        kp_time::weekday_of_jd(self.jd_utc, self.utc_offset_hours)?;
        Ok(())
    }

    /// Display window the subject's dasha tree is pruned to.
    pub fn dasha_window(&self, config: &KpConfig) -> DashaWindow {
        match self.kind {
            ChartKind::Birth => DashaWindow::birth(self.jd_utc, config.dasha.birth_window_years),
            ChartKind::Horary { .. } => {
                DashaWindow::horary(self.jd_utc, config.dasha.horary_window_years)
            }
        }
    }
}

/// Graha order the ephemeris is queried in; Ketu is derived from Rahu.
const QUERIED: [Graha; 8] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
];

/// Cast the real sky at `jd_utc` for `location`.
///
/// Used for the subject chart of a birth input and for every instant the
/// transit and interlink stages visit.
pub fn snapshot_at(
    ephemeris: &dyn Ephemeris,
    jd_utc: f64,
    location: &GeoLocation,
    config: &KpConfig,
) -> Result<ChartSnapshot, SearchError> {
    let ayanamsha = ephemeris.ayanamsha_deg(jd_utc) - config.ayanamsha.correction_deg;
    let mut lons = [0.0; 9];
    for graha in QUERIED {
        lons[usize::from(graha.index())] = ephemeris.tropical_longitude(jd_utc, graha)?;
    }
    lons[usize::from(Graha::Ketu.index())] =
        normalize_360(lons[usize::from(Graha::Rahu.index())] + 180.0);

    let cusps = ephemeris.tropical_cusps(jd_utc, location, config.chart.house_system)?;
    Ok(ChartSnapshot::from_tropical(jd_utc, ayanamsha, lons, cusps))
}

/// Cast the subject chart for `input`.
///
/// Horary charts keep the planets of the query instant but move cusp 1 to
/// the sidereal degree of the horary number, shifting the other cusps by
/// the same amount.
pub fn build_chart(
    ephemeris: &dyn Ephemeris,
    input: &ChartInput,
    config: &KpConfig,
) -> Result<ChartSnapshot, SearchError> {
    input.validate()?;
    let chart = snapshot_at(ephemeris, input.jd_utc, &input.location, config)?;
    let ChartKind::Horary { number } = input.kind else {
        return Ok(chart);
    };

    let asc_sidereal = horary_ascendant_deg(number)?;
    let tropical_cusps = chart.cusp_longitudes().map(|c| c + chart.ayanamsha_deg);
    let rotated = rotate_cusps(&tropical_cusps, asc_sidereal + chart.ayanamsha_deg);
    let planets = chart.planets.map(|p| p.longitude + chart.ayanamsha_deg);
    tracing::debug!(number, asc_sidereal, "cast horary chart");
    Ok(ChartSnapshot::from_tropical(
        chart.jd_utc,
        chart.ayanamsha_deg,
        planets,
        rotated,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::MeanMotionEphemeris;
    use kp_time::J2000_JD;
    use kp_vedic_base::{HouseSystem, arc_forward};

    fn delhi() -> GeoLocation {
        GeoLocation::new(28.61, 77.21).unwrap()
    }

    #[test]
    fn ketu_opposes_rahu() {
        let chart = snapshot_at(&MeanMotionEphemeris, J2000_JD, &delhi(), &KpConfig::default())
            .unwrap();
        let rahu = chart.planet(Graha::Rahu).longitude;
        let ketu = chart.planet(Graha::Ketu).longitude;
        assert!((arc_forward(rahu, ketu) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn ayanamsha_includes_correction() {
        let mut config = KpConfig::default();
        config.ayanamsha.correction_deg = 0.0;
        let raw = snapshot_at(&MeanMotionEphemeris, J2000_JD, &delhi(), &config).unwrap();
        let corrected =
            snapshot_at(&MeanMotionEphemeris, J2000_JD, &delhi(), &KpConfig::default()).unwrap();
        assert!((raw.ayanamsha_deg - corrected.ayanamsha_deg - 0.1).abs() < 1e-12);
    }

    #[test]
    fn horary_moves_ascendant_and_keeps_spacing() {
        let mut config = KpConfig::default();
        config.chart.house_system = HouseSystem::Equal;
        let input = ChartInput::horary(100, J2000_JD, delhi(), 5.5).unwrap();
        let chart = build_chart(&MeanMotionEphemeris, &input, &config).unwrap();
        let expected = horary_ascendant_deg(100).unwrap();
        let asc = chart.ascendant().longitude;
        assert!(arc_forward(expected, asc).min(arc_forward(asc, expected)) < 1e-9);
        let cusps = chart.cusp_longitudes();
        assert!((arc_forward(cusps[0], cusps[1]) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn horary_keeps_planets() {
        let config = KpConfig::default();
        let natal = snapshot_at(&MeanMotionEphemeris, J2000_JD, &delhi(), &config).unwrap();
        let input = ChartInput::horary(1500, J2000_JD, delhi(), 5.5).unwrap();
        let horary = build_chart(&MeanMotionEphemeris, &input, &config).unwrap();
        for (a, b) in natal.planets.iter().zip(horary.planets.iter()) {
            assert!((a.longitude - b.longitude).abs() < 1e-9);
        }
    }

    #[test]
    fn horary_number_is_checked() {
        assert_eq!(
            ChartInput::horary(0, J2000_JD, delhi(), 0.0),
            Err(VedicError::HoraryOutOfRange(0))
        );
        assert!(ChartInput::horary(2194, J2000_JD, delhi(), 0.0).is_err());
    }

    #[test]
    fn bad_offset_is_rejected() {
        let input = ChartInput::birth(J2000_JD, delhi(), 20.0);
        assert!(matches!(input.validate(), Err(SearchError::Time(_))));
    }

    #[test]
    fn dasha_window_depends_on_kind() {
        let config = KpConfig::default();
        let birth = ChartInput::birth(J2000_JD, delhi(), 5.5).dasha_window(&config);
        assert_eq!(birth.start_jd, J2000_JD);
        let horary = ChartInput::horary(1, J2000_JD, delhi(), 5.5)
            .unwrap()
            .dasha_window(&config);
        assert!(horary.start_jd < J2000_JD && horary.end_jd > J2000_JD);
    }
}
