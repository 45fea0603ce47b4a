use std::collections::BTreeMap;

use serde::Serialize;
use tourney_api::Match;

use crate::layout::{BracketLayout, CONNECTOR_STUB};
use crate::projection::{PotentialMatch, SlotKey};
use crate::selection::Selection;

/// One axis-aligned line segment, in the same units as the layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    fn horizontal(x1: f64, x2: f64, y: f64) -> Self {
        Self {
            x1,
            y1: y,
            x2,
            y2: y,
        }
    }

    fn vertical(x: f64, y1: f64, y2: f64) -> Self {
        Self {
            x1: x,
            y1,
            x2: x,
            y2,
        }
    }
}

/// The drawn geometry joining two child slots to their parent slot:
///
/// ```text
///   upper child ──┐
///                 │
///                 ├── parent
///                 │
///   lower child ──┘
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorSet {
    /// The fed slot in the next round.
    pub parent: SlotKey,
    /// Upper-child stub, lower-child stub, the vertical spine joining the
    /// two child centers, and the inbound segment into the parent.
    pub segments: [Segment; 4],
    pub highlighted: bool,
}

/// Connector geometry from `round` into `round + 1`; empty for the final.
///
/// The skeleton is drawn for every expected parent slot regardless of how
/// many matches exist yet. `round_matches` (the round's slot-ordered match
/// list) and `projections` feed only the highlight flags.
pub fn build_connectors(
    round: u32,
    layout: &BracketLayout,
    round_matches: &[&Match],
    projections: &BTreeMap<SlotKey, PotentialMatch>,
    selection: Selection,
) -> Vec<ConnectorSet> {
    let parent_count = layout.matches_in_round(round + 1);
    let mut sets = Vec::with_capacity(parent_count as usize);

    let cell_right = layout.column_x(round) + layout.profile().round_width;
    let spine_x = cell_right + CONNECTOR_STUB;
    let parent_left = spine_x + CONNECTOR_STUB;

    for k in 0..parent_count {
        let parent = SlotKey::new(round + 1, k);
        let upper_y = layout.center_y(round, 2 * k);
        let lower_y = layout.center_y(round, 2 * k + 1);
        let parent_y = layout.center_y(round + 1, k);

        let segments = [
            Segment::horizontal(cell_right, spine_x, upper_y),
            Segment::horizontal(cell_right, spine_x, lower_y),
            Segment::vertical(spine_x, upper_y, lower_y),
            Segment::horizontal(spine_x, parent_left, parent_y),
        ];

        let highlighted = is_highlighted(k, round_matches, projections.get(&parent), selection);
        sets.push(ConnectorSet {
            parent,
            segments,
            highlighted,
        });
    }

    sets
}

/// A connector lights up when either child match involves the selected
/// participant, or the parent slot could still be reached by them.
fn is_highlighted(
    parent_index: u32,
    round_matches: &[&Match],
    projection: Option<&PotentialMatch>,
    selection: Selection,
) -> bool {
    let Some(id) = selection.selected() else {
        return false;
    };
    let child = |i: u32| round_matches.get(i as usize);
    if child(2 * parent_index).is_some_and(|m| m.involves(id))
        || child(2 * parent_index + 1).is_some_and(|m| m.involves(id))
    {
        return true;
    }
    projection.is_some_and(|p| p.possible_participants.contains(&id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;

    fn played(id: u64, round: u32, a: u64, b: u64, winner: Option<u64>) -> Match {
        Match {
            id,
            round_number: round,
            participant_a: Some(a),
            participant_b: Some(b),
            winner_id: winner,
            ..Default::default()
        }
    }

    #[test]
    fn one_connector_set_per_parent_slot() {
        let layout = BracketLayout::new(3, 8);
        let sets = build_connectors(1, &layout, &[], &BTreeMap::new(), Selection::Unselected);
        assert_eq!(sets.len(), 4);
        let sets = build_connectors(2, &layout, &[], &BTreeMap::new(), Selection::Unselected);
        assert_eq!(sets.len(), 2);
    }

    #[test]
    fn segments_tile_the_gutter_exactly() {
        let layout = BracketLayout::new(2, 4);
        let sets = build_connectors(1, &layout, &[], &BTreeMap::new(), Selection::Unselected);
        let [upper, lower, spine, inbound] = sets[0].segments;

        let cell_right = layout.column_x(1) + layout.profile().round_width;
        assert_eq!(upper.x1, cell_right);
        assert_eq!(upper.x2 - upper.x1, CONNECTOR_STUB);
        assert_eq!(lower.x2, spine.x1);
        assert_eq!(spine.y1, layout.center_y(1, 0));
        assert_eq!(spine.y2, layout.center_y(1, 1));
        assert_eq!(inbound.x2, layout.column_x(2));
        assert_eq!(inbound.y1, layout.center_y(2, 0));
    }

    #[test]
    fn parent_center_is_the_midpoint_of_its_children() {
        // Uniform slot indexing keeps the pitch-scaling layout equal to
        // true child centering; connectors rely on that to stay straight.
        let layout = BracketLayout::new(4, 16);
        for round in 1..4 {
            for k in 0..layout.matches_in_round(round + 1) {
                let mid =
                    (layout.center_y(round, 2 * k) + layout.center_y(round, 2 * k + 1)) / 2.0;
                assert_eq!(layout.center_y(round + 1, k), mid, "round {round} parent {k}");
            }
        }
    }

    #[test]
    fn highlight_tracks_child_matches_and_projections() {
        let matches = vec![played(1, 1, 1, 2, Some(1)), played(2, 1, 3, 4, None)];
        let layout = BracketLayout::new(2, 4);
        let projections = project(&matches, 2);
        let refs: Vec<&Match> = matches.iter().collect();

        // Participant 3 plays in the second child match.
        let sets = build_connectors(1, &layout, &refs, &projections, Selection::Selected(3));
        assert!(sets[0].highlighted);

        // Participant 1 no longer plays in round 1's slot 0 pair, but won
        // through to the projected parent slot.
        let sets = build_connectors(1, &layout, &refs[1..], &projections, Selection::Selected(1));
        assert!(sets[0].highlighted);

        // An uninvolved participant lights nothing.
        let sets = build_connectors(1, &layout, &refs, &projections, Selection::Selected(9));
        assert!(!sets[0].highlighted);

        let sets = build_connectors(1, &layout, &refs, &projections, Selection::Unselected);
        assert!(!sets[0].highlighted);
    }
}
