//! KP significators: the houses each planet signifies.
//!
//! A planet signifies the houses whose cusps are held (as sign, star, sub
//! or sub-sub lord) by its own star lord. Houses immediately following a
//! house held by its sub lord are negated. Planets with positional status
//! also signify their occupied house and the cusps they hold themselves.
//! Rahu and Ketu finally take over the significations of their sign and
//! star lords.

use serde::Serialize;

use crate::chart::ChartSnapshot;
use crate::graha::{ALL_GRAHAS, Graha};
use crate::house::HouseSet;
use crate::util::nth_house;

/// Signification sets for one planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignificatorSet {
    pub star_sigs: HouseSet,
    pub sub_sigs: HouseSet,
    pub final_sigs: HouseSet,
    pub positional_status: bool,
}

/// Significators of all nine grahas for one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Significators {
    sets: [SignificatorSet; 9],
}

impl Significators {
    pub fn get(&self, graha: Graha) -> &SignificatorSet {
        &self.sets[usize::from(graha.index())]
    }

    pub fn final_sigs(&self, graha: Graha) -> HouseSet {
        self.get(graha).final_sigs
    }

    pub fn iter(&self) -> impl Iterator<Item = (Graha, &SignificatorSet)> {
        ALL_GRAHAS.into_iter().zip(self.sets.iter())
    }

    /// Build from precomputed sets, indexed by [`Graha::index`].
    pub fn from_sets(sets: [SignificatorSet; 9]) -> Self {
        Self { sets }
    }
}

/// Drop each star house whose preceding house is held by the sub lord
/// while the house itself is not.
///
/// House 2 survives when both `2 ∈ star_sigs` and `1 ∈ sub_sigs`.
/// Idempotent: `negate(negate(s, b), b) == negate(s, b)`.
pub fn negate(star_sigs: HouseSet, sub_sigs: HouseSet) -> HouseSet {
    let keep_second = star_sigs.contains(2) && sub_sigs.contains(1);
    star_sigs
        .iter()
        .filter(|&h| {
            let prev = nth_house(h, -1);
            let dropped = sub_sigs.contains(prev) && !sub_sigs.contains(h);
            !dropped || (h == 2 && keep_second)
        })
        .collect()
}

/// Positional status: own star lord, star lord of no other planet, or
/// mutual star lords with another planet.
pub fn has_positional_status(chart: &ChartSnapshot, graha: Graha) -> bool {
    let star = chart.planet(graha).star_lord;
    if star == graha {
        return true;
    }
    let lords_another = ALL_GRAHAS
        .into_iter()
        .any(|other| other != graha && chart.planet(other).star_lord == graha);
    if !lords_another {
        return true;
    }
    chart.planet(star).star_lord == graha
}

/// Compute star/sub/final significations for all nine grahas.
pub fn compute_significators(chart: &ChartSnapshot) -> Significators {
    let mut sets = ALL_GRAHAS.map(|g| planet_significators(chart, g));

    // Nodes act for their sign and star lords, read before any override.
    let base: [HouseSet; 9] = sets.map(|s| s.final_sigs);
    for node in [Graha::Rahu, Graha::Ketu] {
        let pos = chart.planet(node);
        let mut agency = HouseSet::EMPTY;
        for lord in [pos.sign_lord, pos.star_lord] {
            if !lord.is_node() {
                agency = agency.union(base[usize::from(lord.index())]);
            }
        }
        sets[usize::from(node.index())].final_sigs = agency;
    }

    Significators { sets }
}

fn planet_significators(chart: &ChartSnapshot, graha: Graha) -> SignificatorSet {
    let pos = chart.planet(graha);

    let mut star_sigs = chart.houses_with_lord(pos.star_lord);
    if star_sigs.is_empty() {
        star_sigs = HouseSet::single(chart.house_of(graha));
    }
    let sub_sigs = chart.houses_with_lord(pos.sub_lord);

    let positional_status = has_positional_status(chart, graha);
    let mut final_sigs = negate(star_sigs, sub_sigs);
    if positional_status {
        final_sigs.insert(chart.house_of(graha));
        final_sigs = final_sigs.union(chart.houses_with_lord(graha));
    }

    SignificatorSet {
        star_sigs,
        sub_sigs,
        final_sigs,
        positional_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lagna::compute_equal;

    #[test]
    fn negation_drops_house_after_sub_house() {
        let star = HouseSet::from([3, 5, 9]);
        let sub = HouseSet::from([4]);
        assert_eq!(negate(star, sub), HouseSet::from([3, 9]));
    }

    #[test]
    fn negation_keeps_house_also_held_by_sub() {
        let star = HouseSet::from([5]);
        let sub = HouseSet::from([4, 5]);
        assert_eq!(negate(star, sub), HouseSet::from([5]));
    }

    #[test]
    fn negation_wraps_twelve_to_one() {
        let star = HouseSet::from([1, 6]);
        let sub = HouseSet::from([12]);
        assert_eq!(negate(star, sub), HouseSet::from([6]));
    }

    #[test]
    fn second_house_carve_out() {
        let star = HouseSet::from([2, 3]);
        let sub = HouseSet::from([1, 2]);
        // sub holds 1 and 2 → 3 is dropped; 2 is held by sub so not dropped.
        assert_eq!(negate(star, sub), HouseSet::from([2]));
        // sub holds only 1 → 2 would be dropped, carve-out keeps it.
        assert_eq!(negate(star, HouseSet::from([1])), HouseSet::from([2, 3]));
    }

    #[test]
    fn negation_is_idempotent() {
        for star_bits in [0b1010_1010_1010u16, 0b0111_0001_1110, 0b1111_1111_1110] {
            for sub_bits in [0b0000_0000_0010u16, 0b1001_0010_0100, 0b0100_0100_0100] {
                let star: HouseSet = (1..=12).filter(|h| star_bits & (1 << h) != 0).collect();
                let sub: HouseSet = (1..=12).filter(|h| sub_bits & (1 << h) != 0).collect();
                let once = negate(star, sub);
                assert_eq!(negate(once, sub), once, "star={star} sub={sub}");
            }
        }
    }

    fn sample_chart() -> ChartSnapshot {
        // Su, Mo, Ma, Me, Ju, Ve, Sa, Ra, Ke
        let planets = [10.0, 50.0, 100.0, 130.0, 200.0, 250.0, 300.0, 80.0, 260.0];
        ChartSnapshot::from_sidereal(2_451_545.0, planets, compute_equal(5.0))
    }

    #[test]
    fn star_sigs_never_empty() {
        let chart = sample_chart();
        let sigs = compute_significators(&chart);
        for (g, s) in sigs.iter() {
            assert!(!s.star_sigs.is_empty(), "{g} has empty star sigs");
        }
    }

    #[test]
    fn star_sigs_fall_back_to_occupied_house() {
        // Cusps just past the starts of Ketu, Venus, Sun and Moon stars:
        // no cusp has Rahu among its four lords.
        let span = crate::nakshatra::NAKSHATRA_SPAN_27;
        let cusps = [0, 1, 2, 3, 9, 10, 11, 12, 18, 19, 20, 21].map(|k| k as f64 * span + 1e-6);
        // Sun at 70° is in Ardra (Rahu's star), inside house 4.
        let planets = [70.0, 50.0, 100.0, 130.0, 200.0, 250.0, 300.0, 80.0, 260.0];
        let chart = ChartSnapshot::from_sidereal(2_451_545.0, planets, cusps);
        assert!(chart.houses_with_lord(Graha::Rahu).is_empty());
        let sigs = compute_significators(&chart);
        assert_eq!(sigs.get(Graha::Surya).star_sigs, HouseSet::single(4));
    }

    #[test]
    fn own_star_lord_has_positional_status() {
        let chart = sample_chart();
        // Moon at 50° sits in its own star (Rohini).
        assert!(has_positional_status(&chart, Graha::Chandra));
    }

    /// Star lords: Sun Ketu, Moon Mars, Mars Moon, Mercury Venus,
    /// Jupiter Saturn, Venus Rahu, Saturn Mercury, Rahu Mars, Ketu Saturn.
    fn status_chart() -> ChartSnapshot {
        let planets = [6.0, 60.0, 45.0, 20.0, 100.0, 190.0, 115.0, 300.0, 215.0];
        ChartSnapshot::from_sidereal(2_451_545.0, planets, compute_equal(0.5))
    }

    #[test]
    fn status_when_star_lord_of_no_other_planet() {
        let chart = status_chart();
        assert_eq!(chart.planet(Graha::Surya).star_lord, Graha::Ketu);
        // No planet occupies a Sun star.
        assert!(has_positional_status(&chart, Graha::Surya));
        assert!(has_positional_status(&chart, Graha::Guru));
    }

    #[test]
    fn status_for_mutual_star_lords() {
        let chart = status_chart();
        assert_eq!(chart.planet(Graha::Chandra).star_lord, Graha::Mangal);
        assert_eq!(chart.planet(Graha::Mangal).star_lord, Graha::Chandra);
        assert!(has_positional_status(&chart, Graha::Chandra));
        assert!(has_positional_status(&chart, Graha::Mangal));
    }

    #[test]
    fn no_status_when_lording_others_without_mutuality() {
        let chart = status_chart();
        // Saturn lords Jupiter and Ketu; its own star lord Mercury is in a Venus star.
        assert!(!has_positional_status(&chart, Graha::Shani));
        // Venus lords Mercury; its own star lord Rahu is in a Mars star.
        assert!(!has_positional_status(&chart, Graha::Shukra));
    }

    #[test]
    fn node_override_uses_sign_and_star_lords() {
        let chart = sample_chart();
        let sigs = compute_significators(&chart);
        let rahu = chart.planet(Graha::Rahu);
        let mut expected = HouseSet::EMPTY;
        let pre = ALL_GRAHAS.map(|g| planet_significators(&chart, g).final_sigs);
        for lord in [rahu.sign_lord, rahu.star_lord] {
            if !lord.is_node() {
                expected = expected.union(pre[usize::from(lord.index())]);
            }
        }
        assert_eq!(sigs.final_sigs(Graha::Rahu), expected);
    }

    #[test]
    fn final_includes_occupied_house_with_status() {
        let chart = sample_chart();
        let sigs = compute_significators(&chart);
        for g in ALL_GRAHAS.into_iter().filter(|g| !g.is_node()) {
            if sigs.get(g).positional_status {
                assert!(sigs.final_sigs(g).contains(chart.house_of(g)), "{g}");
            }
        }
    }
}
