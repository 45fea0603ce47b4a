/// Tournament service raw wire types — serde shapes for deserializing the
/// web app's proxy-route responses. These map to our clean domain types via
/// the functions in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Matches  (/tournaments/{id}/matches)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct MatchesResponse {
    pub matches: Option<Vec<WireMatch>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireMatch {
    pub id: Option<u64>,
    #[serde(rename = "roundNumber")]
    pub round_number: Option<i64>,
    /// Newer service versions send an explicit bracket position; older
    /// tournaments rely on id order alone.
    #[serde(rename = "slotIndex")]
    pub slot_index: Option<i64>,
    #[serde(rename = "participantA")]
    pub participant_a: Option<u64>,
    #[serde(rename = "participantB")]
    pub participant_b: Option<u64>,
    #[serde(rename = "winnerId")]
    pub winner_id: Option<u64>,
    #[serde(rename = "loserId")]
    pub loser_id: Option<u64>,
    #[serde(rename = "scoreA")]
    pub score_a: Option<i32>,
    #[serde(rename = "scoreB")]
    pub score_b: Option<i32>,
    #[serde(rename = "scheduledAt")]
    pub scheduled_at: Option<String>, // ISO 8601
}

// ---------------------------------------------------------------------------
// Participants  (/tournaments/{id}/participants)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ParticipantsResponse {
    pub participants: Option<Vec<WireParticipant>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireParticipant {
    pub id: Option<u64>,
    pub name: Option<String>,
    /// Some routes send the profile display name instead.
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}
