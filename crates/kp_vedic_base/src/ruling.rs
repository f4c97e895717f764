//! Ruling Planets ranked into strength tiers.
//!
//! Base RPs come from the ascendant, the weekday, the Moon, the Sun and
//! Jupiter. Stronger tiers are derived from cuspal sub lords and from
//! significations of the primary and secondary cusps. Each planet keeps
//! only the highest tier it reaches, and the final list is sorted by tier
//! then by graha order, so identical inputs give identical output.

use std::collections::BTreeMap;

use kp_time::Weekday;
use serde::Serialize;

use crate::chart::ChartSnapshot;
use crate::classification::{Classification, Classified, CuspContext};
use crate::graha::{ALL_GRAHAS, Graha, weekday_lord};
use crate::significator::Significators;

/// Strength tier, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RpTier {
    StrongestOfStrongest,
    Strongest,
    Derived,
    SecondStrong,
    Weak,
    Other,
}

impl RpTier {
    pub const fn name(self) -> &'static str {
        match self {
            Self::StrongestOfStrongest => "Strongest of Strongest",
            Self::Strongest => "Strongest",
            Self::Derived => "Derived",
            Self::SecondStrong => "Second Strong",
            Self::Weak => "Weak",
            Self::Other => "Other",
        }
    }

    /// True if this tier is `floor` or stronger.
    pub fn at_least(self, floor: RpTier) -> bool {
        self <= floor
    }
}

/// One ranked ruling planet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RulingPlanet {
    pub planet: Graha,
    pub tier: RpTier,
    pub rationale: String,
}

/// Ranked ruling planets for one chart and cusp context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RulingPlanets {
    /// Sorted by tier, then graha order.
    pub planets: Vec<RulingPlanet>,
}

impl RulingPlanets {
    pub fn tier_of(&self, graha: Graha) -> Option<RpTier> {
        self.planets.iter().find(|rp| rp.planet == graha).map(|rp| rp.tier)
    }

    pub fn contains(&self, graha: Graha) -> bool {
        self.tier_of(graha).is_some()
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}

type Ranked = BTreeMap<Graha, (RpTier, String)>;

/// Keep the strongest tier seen for `graha`.
fn promote(ranked: &mut Ranked, graha: Graha, tier: RpTier, why: String) {
    match ranked.get(&graha) {
        Some((current, _)) if *current <= tier => {}
        _ => {
            ranked.insert(graha, (tier, why));
        }
    }
}

/// Collect base RPs with the reasons each qualifies.
pub fn base_ruling_planets(chart: &ChartSnapshot, weekday: Weekday) -> BTreeMap<Graha, Vec<String>> {
    let mut base: BTreeMap<Graha, Vec<String>> = BTreeMap::new();
    let mut add = |g: Graha, why: &str| base.entry(g).or_default().push(why.to_string());

    let asc = chart.ascendant();
    let level_names = ["sign", "star", "sub", "sub-sub"];
    for (lord, level) in asc.lords().into_iter().zip(level_names) {
        add(lord, &format!("ascendant {level} lord"));
    }
    add(weekday_lord(weekday), &format!("{} lord", weekday.name()));
    let moon = chart.planet(Graha::Chandra);
    for (lord, level) in moon.lords().into_iter().zip(level_names) {
        add(lord, &format!("Moon {level} lord"));
    }
    let sun = chart.planet(Graha::Surya);
    add(sun.sub_lord, "Sun sub lord");
    add(sun.sub_sub_lord, "Sun sub-sub lord");
    add(chart.planet(Graha::Guru).sub_lord, "Jupiter sub lord");
    base
}

/// Rank the ruling planets.
///
/// `classifications` is indexed by [`Graha::index`].
pub fn rank_ruling_planets(
    chart: &ChartSnapshot,
    significators: &Significators,
    classifications: &[Classified; 9],
    ctx: &CuspContext,
    weekday: Weekday,
) -> RulingPlanets {
    let base = base_ruling_planets(chart, weekday);
    let mut ranked: Ranked = BTreeMap::new();

    // Strongest: sub lords of {1, PC} ∪ SC whose star lord is a base RP.
    let mut strongest = Vec::new();
    for house in ctx.ruling_cusps().iter() {
        let sub = chart.cusp(house).position.sub_lord;
        let star = chart.planet(sub).star_lord;
        if base.contains_key(&star) {
            strongest.push(sub);
            promote(
                &mut ranked,
                sub,
                RpTier::Strongest,
                format!("sub lord of cusp {house}; star lord {star} is a base RP"),
            );
        }
    }

    // Strongest of strongest: star lord is a base/strongest RP that
    // signifies PC, and the planet signifies PC and every secondary.
    let wanted = ctx.primary_and_secondary();
    let ranked_lord = |g: Graha| base.contains_key(&g) || strongest.contains(&g);
    for a in ALL_GRAHAS {
        let b = chart.planet(a).star_lord;
        if ranked_lord(b)
            && significators.final_sigs(b).contains(ctx.primary)
            && wanted.is_subset(&significators.final_sigs(a))
        {
            promote(
                &mut ranked,
                a,
                RpTier::StrongestOfStrongest,
                format!("star lord {b} is an RP signifying cusp {}; signifies {wanted}", ctx.primary),
            );
        }
    }

    // Derived: nodes whose sign and star lords are both RPs.
    for node in [Graha::Rahu, Graha::Ketu] {
        let pos = chart.planet(node);
        let is_rp = |g: Graha| base.contains_key(&g) || ranked.contains_key(&g);
        if is_rp(pos.sign_lord) && is_rp(pos.star_lord) {
            if wanted.is_subset(&significators.final_sigs(node)) {
                promote(
                    &mut ranked,
                    node,
                    RpTier::StrongestOfStrongest,
                    format!("node agent of {} and {}; signifies {wanted}", pos.sign_lord, pos.star_lord),
                );
            } else {
                promote(
                    &mut ranked,
                    node,
                    RpTier::Derived,
                    format!("node agent of RPs {} and {}", pos.sign_lord, pos.star_lord),
                );
            }
        }
    }

    // Remaining base RPs split by their own classification.
    for (g, reasons) in &base {
        if ranked.contains_key(g) {
            continue;
        }
        let class = classifications[usize::from(g.index())];
        let tier = match class.classification {
            Classification::Positive => RpTier::SecondStrong,
            Classification::Neutral => RpTier::Weak,
            Classification::Negative => RpTier::Other,
        };
        promote(
            &mut ranked,
            *g,
            tier,
            format!("{}; {} ({})", reasons.join(", "), class.classification, class.rule.description()),
        );
    }

    let mut planets: Vec<RulingPlanet> = ranked
        .into_iter()
        .map(|(planet, (tier, rationale))| RulingPlanet {
            planet,
            tier,
            rationale,
        })
        .collect();
    planets.sort_by_key(|rp| (rp.tier, rp.planet));

    tracing::debug!(count = planets.len(), "ranked ruling planets");
    RulingPlanets { planets }
}
