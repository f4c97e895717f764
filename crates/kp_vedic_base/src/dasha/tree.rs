//! Vimshottari tree construction, pruning and queries.
//!
//! Mahadashas run in ring order from the Moon's star lord; the first is cut
//! to the balance fraction. Every deeper level splits its parent into nine
//! children in ring order starting at the parent's own lord, each lasting
//! `(child_years / 120) * parent_duration`.

use serde::Serialize;

use kp_time::years_to_days;

use crate::graha::Graha;
use crate::vimshottari::{VIMSHOTTARI_TOTAL_YEARS, cycle_from, vimshottari_years};

use super::balance::{DashaBalance, vimshottari_balance};
use super::types::{DashaLevel, DashaNode, DashaSpan, DashaWindow};

/// A built (and possibly pruned) Vimshottari tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaTree {
    pub subject_jd: f64,
    pub balance: DashaBalance,
    pub roots: Vec<DashaNode>,
}

impl DashaTree {
    /// Build the full five-level tree.
    pub fn build(moon_sidereal_lon: f64, subject_jd: f64) -> Self {
        Self::build_inner(moon_sidereal_lon, subject_jd, None)
    }

    /// Build only the nodes overlapping `window`.
    ///
    /// Equivalent to `build(..).pruned(window)` without materializing the
    /// discarded subtrees.
    pub fn build_windowed(moon_sidereal_lon: f64, subject_jd: f64, window: DashaWindow) -> Self {
        Self::build_inner(moon_sidereal_lon, subject_jd, Some(&window))
    }

    fn build_inner(moon_sidereal_lon: f64, subject_jd: f64, window: Option<&DashaWindow>) -> Self {
        let balance = vimshottari_balance(moon_sidereal_lon);
        let mut roots = Vec::with_capacity(9);
        let mut cursor = subject_jd;

        for (i, lord) in cycle_from(balance.start_lord).into_iter().enumerate() {
            let years = if i == 0 {
                balance.balance_years()
            } else {
                vimshottari_years(lord)
            };
            let end = cursor + years_to_days(years);
            let mut node = DashaNode {
                lord,
                level: DashaLevel::Mahadasha,
                start_jd: cursor,
                end_jd: end,
                children: Vec::new(),
            };
            cursor = end;

            if window.is_some_and(|w| !w.overlaps(&node)) {
                continue;
            }
            expand(&mut node, window);
            roots.push(node);
        }

        tracing::debug!(
            start_lord = %balance.start_lord,
            balance_years = balance.balance_years(),
            roots = roots.len(),
            "built vimshottari tree"
        );

        Self {
            subject_jd,
            balance,
            roots,
        }
    }

    /// Discard every subtree that does not overlap `window`.
    pub fn prune(&mut self, window: &DashaWindow) {
        prune_nodes(&mut self.roots, window);
    }

    pub fn pruned(mut self, window: DashaWindow) -> Self {
        self.prune(&window);
        self
    }

    /// Start of the first remaining mahadasha.
    pub fn start_jd(&self) -> Option<f64> {
        self.roots.first().map(|n| n.start_jd)
    }

    /// End of the last remaining mahadasha.
    pub fn end_jd(&self) -> Option<f64> {
        self.roots.last().map(|n| n.end_jd)
    }

    /// Total number of nodes at every level.
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[DashaNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }

    /// The running MD..PrD chain at `jd`, if the tree still holds it.
    pub fn active_chain(&self, jd: f64) -> Option<DashaSpan> {
        let mut lords = [Graha::Ketu; 5];
        let mut nodes = &self.roots;
        for slot in lords.iter_mut() {
            let node = nodes.iter().find(|n| n.contains(jd))?;
            *slot = node.lord;
            if node.level == DashaLevel::Pranadasha {
                return Some(DashaSpan {
                    lords,
                    start_jd: node.start_jd,
                    end_jd: node.end_jd,
                });
            }
            nodes = &node.children;
        }
        None
    }

    /// Every Pranadasha leaf in chronological order.
    pub fn leaves(&self) -> Vec<DashaSpan> {
        let mut out = Vec::new();
        let mut lords = [Graha::Ketu; 5];
        collect_leaves(&self.roots, &mut lords, &mut out);
        out
    }
}

/// Materialize the children of `node` (recursively, down to Pranadasha).
fn expand(node: &mut DashaNode, window: Option<&DashaWindow>) {
    let Some(child_level) = node.level.child_level() else {
        return;
    };
    let parent_duration = node.duration_days();
    let mut children = Vec::with_capacity(9);
    let mut cursor = node.start_jd;

    for lord in cycle_from(node.lord) {
        let end = cursor + vimshottari_years(lord) / VIMSHOTTARI_TOTAL_YEARS * parent_duration;
        children.push(DashaNode {
            lord,
            level: child_level,
            start_jd: cursor,
            end_jd: end,
            children: Vec::new(),
        });
        cursor = end;
    }
    // Absorb floating-point drift.
    if let Some(last) = children.last_mut() {
        last.end_jd = node.end_jd;
    }

    if let Some(w) = window {
        children.retain(|c| w.overlaps(c));
    }
    for child in &mut children {
        expand(child, window);
    }
    node.children = children;
}

fn prune_nodes(nodes: &mut Vec<DashaNode>, window: &DashaWindow) {
    nodes.retain(|n| window.overlaps(n));
    for n in nodes.iter_mut() {
        prune_nodes(&mut n.children, window);
    }
}

fn collect_leaves(nodes: &[DashaNode], lords: &mut [Graha; 5], out: &mut Vec<DashaSpan>) {
    for node in nodes {
        let depth = node.level.depth();
        lords[depth] = node.lord;
        if node.level == DashaLevel::Pranadasha {
            out.push(DashaSpan {
                lords: *lords,
                start_jd: node.start_jd,
                end_jd: node.end_jd,
            });
        } else {
            collect_leaves(&node.children, lords, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kp_time::DAYS_PER_YEAR;

    const JD: f64 = 2_451_545.0;

    #[test]
    fn first_mahadasha_is_balance() {
        let tree = DashaTree::build(50.0, JD);
        assert_eq!(tree.roots.len(), 9);
        let first = &tree.roots[0];
        assert_eq!(first.lord, Graha::Chandra);
        assert!((first.duration_years() - 2.5).abs() < 1e-9);
        assert_eq!(tree.roots[1].lord, Graha::Mangal);
        assert!((tree.roots[1].duration_years() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn roots_are_contiguous() {
        let tree = DashaTree::build(123.4, JD);
        assert_eq!(tree.roots[0].start_jd, JD);
        for w in tree.roots.windows(2) {
            assert!((w[0].end_jd - w[1].start_jd).abs() < 1e-9);
        }
    }

    #[test]
    fn children_start_with_parent_lord() {
        let tree = DashaTree::build(200.0, JD);
        for root in &tree.roots {
            assert_eq!(root.children[0].lord, root.lord);
            assert_eq!(root.children.len(), 9);
        }
    }

    #[test]
    fn full_tree_has_five_levels() {
        let tree = DashaTree::build(10.0, JD);
        // 9 + 81 + 729 + 6561 + 59049
        assert_eq!(tree.node_count(), 66_429);
        assert_eq!(tree.leaves().len(), 59_049);
    }

    #[test]
    fn prune_keeps_overlap_only() {
        let window = DashaWindow::birth(JD, 5.0);
        let tree = DashaTree::build(50.0, JD).pruned(window);
        // Moon 2.5y then Mars 7y; Rahu starts after the window.
        assert_eq!(tree.roots.len(), 2);
        for leaf in tree.leaves() {
            assert!(leaf.start_jd < window.end_jd && leaf.end_jd > window.start_jd);
        }
    }

    #[test]
    fn windowed_build_matches_prune() {
        let window = DashaWindow::horary(JD + 3.0 * DAYS_PER_YEAR, 1.0);
        let a = DashaTree::build(77.7, JD).pruned(window);
        let b = DashaTree::build_windowed(77.7, JD, window);
        assert_eq!(a, b);
    }

    #[test]
    fn active_chain_at_subject_instant() {
        let tree = DashaTree::build(50.0, JD);
        let span = tree.active_chain(JD).unwrap();
        assert_eq!(span.lords[0], Graha::Chandra);
        assert_eq!(span.lords[1], Graha::Chandra);
        assert_eq!(span.start_jd, JD);
    }

    #[test]
    fn active_chain_outside_tree() {
        let tree = DashaTree::build(50.0, JD);
        assert!(tree.active_chain(JD - 1.0).is_none());
    }

    #[test]
    fn leaves_are_ordered_and_contiguous() {
        let tree = DashaTree::build_windowed(300.0, JD, DashaWindow::birth(JD, 2.0));
        let leaves = tree.leaves();
        assert!(!leaves.is_empty());
        for w in leaves.windows(2) {
            assert!((w[0].end_jd - w[1].start_jd).abs() < 1e-6);
        }
    }
}
