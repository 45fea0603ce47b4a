use std::collections::BTreeMap;

use serde::Serialize;
use tourney_api::Match;

use crate::connectors::{ConnectorSet, build_connectors};
use crate::layout::BracketLayout;
use crate::projection::{PotentialMatch, SlotKey, project};
use crate::rounds::{group_by_round, round_name, total_rounds};
use crate::selection::Selection;

// ---------------------------------------------------------------------------
// Assembled per-snapshot output
// ---------------------------------------------------------------------------

/// What occupies a slot right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SlotContent<'a> {
    /// A recorded match is bound to this position.
    Match(&'a Match),
    /// No match yet, but the previous round constrains who can land here.
    Potential(PotentialMatch),
    /// Nothing known — rendered as a generic awaiting-results placeholder.
    Placeholder,
}

/// One addressable position with its computed vertical offset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotView<'a> {
    pub key: SlotKey,
    pub top: f64,
    pub content: SlotContent<'a>,
    pub highlighted: bool,
}

/// One bracket column, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundView<'a> {
    pub number: u32,
    pub name: String,
    pub slots: Vec<SlotView<'a>>,
    /// Connectors from this round into the next; empty for the final.
    pub connectors: Vec<ConnectorSet>,
}

/// Everything the rendering layer needs for one snapshot of the match
/// list. Recomputed from scratch on every change; identical snapshots
/// yield identical views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketView<'a> {
    pub total_rounds: u32,
    pub layout: BracketLayout,
    pub rounds: Vec<RoundView<'a>>,
    /// The next-round frontier, keyed by slot.
    pub projections: BTreeMap<SlotKey, PotentialMatch>,
}

/// Assemble the full bracket view for one snapshot.
///
/// Slots are bound to real matches where one exists at the position,
/// otherwise to the projected potential match, otherwise to a generic
/// placeholder. Extra matches beyond a round's expected count are ignored,
/// matching the grouper's tolerance for irregular data.
pub fn build_bracket_view<'a>(
    matches: &'a [Match],
    participant_count: usize,
    selection: Selection,
) -> BracketView<'a> {
    let total = total_rounds(participant_count);
    let layout = BracketLayout::new(total, participant_count);
    let grouped = group_by_round(matches, total);
    let projections = project(matches, total);

    let mut rounds = Vec::with_capacity(total as usize);
    for (&round, bucket) in &grouped {
        let expected = layout.matches_in_round(round);
        let mut slots = Vec::with_capacity(expected as usize);
        for index in 0..expected {
            let key = SlotKey::new(round, index);
            let (content, highlighted) = match bucket.get(index as usize).copied() {
                Some(m) => (SlotContent::Match(m), selection.highlights_match(m)),
                None => match projections.get(&key) {
                    Some(p) => {
                        let lit = selection
                            .selected()
                            .is_some_and(|id| p.possible_participants.contains(&id));
                        (SlotContent::Potential(p.clone()), lit)
                    }
                    None => (SlotContent::Placeholder, false),
                },
            };
            slots.push(SlotView {
                key,
                top: layout.top_position(round, index),
                content,
                highlighted,
            });
        }

        let connectors = if round < total {
            build_connectors(round, &layout, bucket, &projections, selection)
        } else {
            Vec::new()
        };

        rounds.push(RoundView {
            number: round,
            name: round_name(round, total),
            slots,
            connectors,
        });
    }

    BracketView {
        total_rounds: total,
        layout,
        rounds,
        projections,
    }
}
