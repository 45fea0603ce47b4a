use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Serialize, Serializer};
use tourney_api::{Match, ParticipantId};

use crate::rounds::group_by_round;

// ---------------------------------------------------------------------------
// Slot addressing
// ---------------------------------------------------------------------------

/// An addressable bracket position: `round` in `[1, total_rounds]`,
/// `index` in `[0, matches_in_round)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub round: u32,
    pub index: u32,
}

impl SlotKey {
    pub fn new(round: u32, index: u32) -> Self {
        Self { round, index }
    }
}

/// Rendered as `"round-index"`, which is also the wire form the web client
/// keys its placeholder map by.
impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.round, self.index)
    }
}

impl Serialize for SlotKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Potential-match projection
// ---------------------------------------------------------------------------

/// Who could still occupy a future slot, given current results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PotentialMatch {
    pub slot: SlotKey,
    pub possible_participants: BTreeSet<ParticipantId>,
}

/// Project one round ahead: for every adjacent pair of matches within a
/// round, the set of participants who could occupy the slot that pair
/// feeds.
///
/// Pairs are walked in slot order as `(2k, 2k+1)`; a round's odd trailing
/// match feeds nothing until its sibling exists. Only a single round of
/// look-ahead is computed per pass — the projector is re-run against the
/// full match list whenever results change, so the frontier advances round
/// by round as real matches are created.
pub fn project(matches: &[Match], total_rounds: u32) -> BTreeMap<SlotKey, PotentialMatch> {
    let mut projections = BTreeMap::new();

    for (round, bucket) in group_by_round(matches, total_rounds) {
        if round >= total_rounds {
            break; // the final feeds no further slot
        }
        for (k, pair) in bucket.chunks_exact(2).enumerate() {
            let slot = SlotKey::new(round + 1, k as u32);
            let mut possible = BTreeSet::new();
            for m in pair {
                contribute(m, &mut possible);
            }
            projections.insert(
                slot,
                PotentialMatch {
                    slot,
                    possible_participants: possible,
                },
            );
        }
    }

    projections
}

/// A decided match contributes only its winner; an undecided one
/// contributes every participant recorded so far (an absent participant is
/// simply skipped).
fn contribute(m: &Match, possible: &mut BTreeSet<ParticipantId>) {
    match m.winner_id {
        Some(winner) => {
            possible.insert(winner);
        }
        None => possible.extend(m.participants()),
    }
}
