pub mod client;
pub mod wire;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the service wire format
// ---------------------------------------------------------------------------

pub type MatchId = u64;
pub type ParticipantId = u64;

/// One recorded bracket match, as supplied by the match-generation /
/// result-entry service. The engine treats these as read-only input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Unique id, assigned monotonically in creation order. Within a round
    /// this ordering is the fallback slot ordering.
    pub id: MatchId,
    /// 1 = earliest round.
    pub round_number: u32,
    /// Explicit bracket position within the round. Older tournaments
    /// predate this field; when absent, id order decides the slot.
    pub slot_index: Option<u32>,
    pub participant_a: Option<ParticipantId>,
    pub participant_b: Option<ParticipantId>,
    pub winner_id: Option<ParticipantId>,
    pub loser_id: Option<ParticipantId>,
    pub score_a: Option<i32>,
    pub score_b: Option<i32>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Match {
    pub fn is_decided(&self) -> bool {
        self.winner_id.is_some()
    }

    /// Participants recorded so far. A bye slot yields fewer than two.
    pub fn participants(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participant_a.into_iter().chain(self.participant_b)
    }

    pub fn involves(&self, id: ParticipantId) -> bool {
        self.participant_a == Some(id) || self.participant_b == Some(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

/// `id → display name` lookup built from the tournament roster.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    names: HashMap<ParticipantId, String>,
}

impl Roster {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self {
            names: participants.into_iter().map(|p| (p.id, p.name)).collect(),
        }
    }

    pub fn name(&self, id: ParticipantId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
