//! Vimshottari dasha: a 120-year, five-level planetary-period tree.
//!
//! - [`balance`]: how much of the Moon's starting mahadasha remains
//! - [`types`]: levels, nodes, display windows and leaf spans
//! - [`tree`]: proportional construction, window pruning and queries

pub mod balance;
pub mod tree;
pub mod types;

pub use balance::{DashaBalance, vimshottari_balance};
pub use tree::DashaTree;
pub use types::{
    ALL_DASHA_LEVELS, BIRTH_WINDOW_YEARS, DashaLevel, DashaNode, DashaSpan, DashaWindow,
    HORARY_WINDOW_YEARS,
};
