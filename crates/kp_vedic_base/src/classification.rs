//! Positive / Neutral / Negative classification of a planet against a
//! primary cusp and a set of secondary cusps.
//!
//! Rules are evaluated in a fixed priority order and the first match wins.
//! Every input yields exactly one label; the fall-through is Negative.

use std::fmt;

use serde::Serialize;

use crate::error::VedicError;
use crate::graha::ALL_GRAHAS;
use crate::house::{HouseSet, validate_house};
use crate::significator::Significators;
use crate::util::nth_house;

/// Outcome of classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Classification {
    Positive,
    Neutral,
    Negative,
}

impl Classification {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }

    /// Positive or Neutral.
    pub const fn is_favourable(self) -> bool {
        matches!(self, Self::Positive | Self::Neutral)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The rule that produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ClassificationRule {
    /// PC is 8 or 12 and is signified.
    PositiveDusthanaQuery,
    /// Disease query on house 6, and 8 or 12 signified.
    PositiveDiseaseQuery,
    /// PC with the 11th and 12th from it.
    PositivePrimaryWithGain,
    /// PC with every secondary cusp.
    PositiveAllSecondaries,
    /// PC with the 2nd/3rd from it or the 11th house.
    PositivePrimarySupported,
    /// PC is 8 (or 12) and only the other of the pair is signified.
    NeutralDusthanaMirror,
    /// 11th and 12th from PC without PC itself.
    NeutralGainWithoutPrimary,
    /// PC is 2 and not signified.
    NeutralSecondHouse,
    /// Not PC, but the 2nd, 3rd or 11th from it.
    NeutralAdjacent,
    /// Neither PC, the house before it, nor any secondary.
    NeutralUninvolved,
    /// Neither the 8th from PC nor the 12th from PC or the ascendant.
    NeutralNoLoss,
    /// Only the 12th from PC and/or the 12th house.
    NegativeLoss,
    /// No rule matched.
    NegativeDefault,
}

impl ClassificationRule {
    pub const fn classification(self) -> Classification {
        match self {
            Self::PositiveDusthanaQuery
            | Self::PositiveDiseaseQuery
            | Self::PositivePrimaryWithGain
            | Self::PositiveAllSecondaries
            | Self::PositivePrimarySupported => Classification::Positive,
            Self::NeutralDusthanaMirror
            | Self::NeutralGainWithoutPrimary
            | Self::NeutralSecondHouse
            | Self::NeutralAdjacent
            | Self::NeutralUninvolved
            | Self::NeutralNoLoss => Classification::Neutral,
            Self::NegativeLoss | Self::NegativeDefault => Classification::Negative,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::PositiveDusthanaQuery => "signifies the 8th/12th house being asked about",
            Self::PositiveDiseaseQuery => "disease query: signifies 8 or 12 for house 6",
            Self::PositivePrimaryWithGain => "signifies PC with the 11th and 12th from it",
            Self::PositiveAllSecondaries => "signifies PC and every secondary cusp",
            Self::PositivePrimarySupported => "signifies PC with the 2nd/3rd from it or the 11th",
            Self::NeutralDusthanaMirror => "signifies the opposite dusthana of an 8/12 query",
            Self::NeutralGainWithoutPrimary => "signifies the 11th and 12th from PC but not PC",
            Self::NeutralSecondHouse => "house 2 query without signifying 2",
            Self::NeutralAdjacent => "signifies houses adjoining PC but not PC",
            Self::NeutralUninvolved => "signifies neither PC, the house before it, nor any secondary",
            Self::NeutralNoLoss => "signifies no 8th-from-PC or 12th-house loss",
            Self::NegativeLoss => "signifies only 12th-house loss",
            Self::NegativeDefault => "no supporting signification",
        }
    }
}

/// A classification together with the rule that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classified {
    pub classification: Classification,
    pub rule: ClassificationRule,
}

impl From<ClassificationRule> for Classified {
    fn from(rule: ClassificationRule) -> Self {
        Self {
            classification: rule.classification(),
            rule,
        }
    }
}

/// The primary/secondary cusp context a classification is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CuspContext {
    pub primary: u8,
    pub secondary: HouseSet,
    pub disease_query: bool,
}

impl CuspContext {
    pub fn new(primary: u8, secondary: &[u8]) -> Result<Self, VedicError> {
        validate_house(primary)?;
        for &h in secondary {
            validate_house(h)?;
        }
        Ok(Self {
            primary,
            secondary: secondary.iter().copied().collect(),
            disease_query: false,
        })
    }

    pub fn with_disease_query(mut self, disease_query: bool) -> Self {
        self.disease_query = disease_query;
        self
    }

    /// `{PC} ∪ SC`.
    pub fn primary_and_secondary(&self) -> HouseSet {
        self.secondary.union(HouseSet::single(self.primary))
    }

    /// `{1, PC} ∪ SC`.
    pub fn ruling_cusps(&self) -> HouseSet {
        self.primary_and_secondary().union(HouseSet::single(1))
    }

    /// House `k` steps from PC.
    pub fn rel(&self, k: i32) -> u8 {
        nth_house(self.primary, k)
    }
}

/// Classify one planet's final significations.
pub fn classify(final_sigs: HouseSet, ctx: &CuspContext) -> Classified {
    classify_rule(final_sigs, ctx).into()
}

fn classify_rule(sigs: HouseSet, ctx: &CuspContext) -> ClassificationRule {
    use ClassificationRule::*;

    let pc = ctx.primary;
    let has = |h: u8| sigs.contains(h);
    let has_pc = has(pc);
    let r1 = ctx.rel(1);
    let r2 = ctx.rel(2);
    let r10 = ctx.rel(10);
    let r11 = ctx.rel(11);
    let eleventh = nth_house(1, 10);
    let twelfth = nth_house(1, 11);

    // Positive
    if (pc == 8 || pc == 12) && has_pc {
        return PositiveDusthanaQuery;
    }
    if ctx.disease_query && pc == 6 && (has(8) || has(12)) {
        return PositiveDiseaseQuery;
    }
    if has_pc && has(r10) && has(r11) {
        return PositivePrimaryWithGain;
    }
    if has_pc && !ctx.secondary.is_empty() && ctx.secondary.is_subset(&sigs) {
        return PositiveAllSecondaries;
    }
    if has_pc && (has(r1) || has(r2) || has(eleventh)) {
        return PositivePrimarySupported;
    }

    // Neutral
    if (pc == 8 && has(12) && !has(8)) || (pc == 12 && has(8) && !has(12)) {
        return NeutralDusthanaMirror;
    }
    if has(r10) && has(r11) && !has_pc {
        return NeutralGainWithoutPrimary;
    }
    if pc == 2 && !has_pc {
        return NeutralSecondHouse;
    }
    if !has_pc && (has(r1) || has(r2) || has(r10)) {
        return NeutralAdjacent;
    }
    if !has_pc && !has(ctx.rel(-1)) && !sigs.contains_any(&ctx.secondary) {
        return NeutralUninvolved;
    }
    if !has(ctx.rel(7)) && !has(r11) && !has(twelfth) {
        return NeutralNoLoss;
    }

    // Negative
    let loss = HouseSet::from([r11, twelfth]);
    if !has_pc && !sigs.is_empty() && sigs.is_subset(&loss) {
        return NegativeLoss;
    }
    NegativeDefault
}

/// Classify all nine grahas, indexed by [`crate::Graha::index`].
pub fn classify_all(significators: &Significators, ctx: &CuspContext) -> [Classified; 9] {
    ALL_GRAHAS.map(|g| classify(significators.final_sigs(g), ctx))
}
