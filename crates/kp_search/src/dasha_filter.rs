//! Stage 1: Pranadasha spans whose whole lord chain is favourable.
//!
//! Depth-first over the pruned dasha tree. A branch whose lord is Negative
//! is not descended, so every surviving leaf has five Positive/Neutral
//! lords. Only leaves overlapping the search range are kept.

use kp_vedic_base::{ALL_GRAHAS, Classified, DashaLevel, DashaNode, DashaSpan, DashaTree, Graha};

use crate::progress::{CancelToken, ProgressSink, Stage, StageMeter};
use crate::search_types::{SearchRange, StageOutput};

struct DashaWalk<'a> {
    favourable: [bool; 9],
    range: SearchRange,
    cancel: &'a CancelToken,
    meter: StageMeter,
    sink: &'a mut dyn ProgressSink,
    lords: [Graha; 5],
    spans: Vec<DashaSpan>,
    cancelled: bool,
}

impl DashaWalk<'_> {
    fn visit(&mut self, nodes: &[DashaNode]) {
        for node in nodes {
            if self.cancel.is_cancelled() {
                self.cancelled = true;
                return;
            }
            self.meter.tick(self.sink);

            if !kept(&self.favourable, &self.range, node) {
                continue;
            }
            self.lords[node.level.depth()] = node.lord;
            if node.level == DashaLevel::Pranadasha {
                self.spans.push(DashaSpan {
                    lords: self.lords,
                    start_jd: node.start_jd,
                    end_jd: node.end_jd,
                });
            } else {
                self.visit(&node.children);
                if self.cancelled {
                    return;
                }
            }
        }
    }
}

/// Favourable lord and overlapping the range.
fn kept(favourable: &[bool; 9], range: &SearchRange, node: &DashaNode) -> bool {
    favourable[usize::from(node.lord.index())] && node.overlaps(range.start_jd, range.end_jd)
}

/// Number of nodes the walk will visit: every sibling of a kept node,
/// recursing only into kept ones.
fn visit_count(favourable: &[bool; 9], range: &SearchRange, nodes: &[DashaNode]) -> u64 {
    nodes
        .iter()
        .map(|n| {
            let below = if kept(favourable, range, n) {
                visit_count(favourable, range, &n.children)
            } else {
                0
            };
            1 + below
        })
        .sum()
}

/// Collect favourable Pranadasha spans overlapping `range`, in date order.
pub fn filter_dasha(
    tree: &DashaTree,
    classifications: &[Classified; 9],
    range: &SearchRange,
    cancel: &CancelToken,
    progress: &mut dyn ProgressSink,
    progress_every: u64,
) -> StageOutput<DashaSpan> {
    let favourable = ALL_GRAHAS.map(|g| {
        classifications[usize::from(g.index())]
            .classification
            .is_favourable()
    });
    let mut walk = DashaWalk {
        favourable,
        range: *range,
        cancel,
        meter: StageMeter::new(
            Stage::Dasha,
            visit_count(&favourable, range, &tree.roots),
            progress_every,
        ),
        sink: progress,
        lords: [Graha::Ketu; 5],
        spans: Vec::new(),
        cancelled: false,
    };
    walk.visit(&tree.roots);
    walk.meter.finish(walk.sink);

    tracing::debug!(
        spans = walk.spans.len(),
        cancelled = walk.cancelled,
        "dasha filter done"
    );
    StageOutput::new(walk.spans, walk.cancelled)
}
