use crate::wire::{MatchesResponse, ParticipantsResponse, WireMatch, WireParticipant};
use crate::{Match, Participant};
use chrono::{DateTime, Utc};
use log::warn;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api";

/// Tournament service client backed by the web app's proxy routes.
#[derive(Debug, Clone)]
pub struct TourneyApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for TourneyApi {
    fn default() -> Self {
        let base_url = std::env::var("KNOCKOUT_API_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self {
            client: Client::builder()
                .user_agent("knockout/0.1 (bracket engine)")
                .build()
                .unwrap_or_default(),
            base_url,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl TourneyApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client pinned to an explicit base URL, bypassing `KNOCKOUT_API_BASE`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Fetch the recorded matches for a tournament.
    ///
    /// `KNOCKOUT_MATCHES_JSON` overrides the network fetch with a local
    /// snapshot file in the same wire format — useful for offline work and
    /// for replaying a tournament mid-progress.
    pub async fn fetch_matches(&self, tournament_id: u64) -> ApiResult<Vec<Match>> {
        if let Ok(path) = std::env::var("KNOCKOUT_MATCHES_JSON")
            && !path.trim().is_empty()
        {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| ApiError::NotFound(format!("could not read {path}: {e}")))?;
            let raw: MatchesResponse = serde_json::from_str(&content)
                .map_err(|e| ApiError::NotFound(format!("invalid matches json at {path}: {e}")))?;
            return Ok(map_matches(raw.matches.unwrap_or_default()));
        }

        let url = format!("{}/tournaments/{tournament_id}/matches", self.base_url);
        let raw: MatchesResponse = self.get(&url).await?;
        Ok(map_matches(raw.matches.unwrap_or_default()))
    }

    /// Fetch the tournament roster.
    pub async fn fetch_participants(&self, tournament_id: u64) -> ApiResult<Vec<Participant>> {
        let url = format!("{}/tournaments/{tournament_id}/participants", self.base_url);
        let raw: ParticipantsResponse = self.get(&url).await?;
        let participants = raw
            .participants
            .unwrap_or_default()
            .iter()
            .filter_map(map_participant)
            .collect();
        Ok(participants)
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: service wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_matches(raw: Vec<WireMatch>) -> Vec<Match> {
    raw.iter().filter_map(map_match).collect()
}

/// Rows without an id or with a non-positive round number cannot be placed
/// in a bracket; they are dropped here so the engine only ever sees
/// well-formed rounds.
fn map_match(m: &WireMatch) -> Option<Match> {
    let Some(id) = m.id else {
        warn!("dropping match row without an id");
        return None;
    };
    let Some(round_number) = m
        .round_number
        .and_then(|r| u32::try_from(r).ok())
        .filter(|r| *r >= 1)
    else {
        warn!("dropping match {id}: round number {:?} is not positive", m.round_number);
        return None;
    };

    Some(Match {
        id,
        round_number,
        slot_index: m.slot_index.and_then(|s| u32::try_from(s).ok()),
        participant_a: m.participant_a,
        participant_b: m.participant_b,
        winner_id: m.winner_id,
        loser_id: m.loser_id,
        score_a: m.score_a,
        score_b: m.score_b,
        scheduled_at: m
            .scheduled_at
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            .map(|dt| dt.with_timezone(&Utc)),
    })
}

fn map_participant(p: &WireParticipant) -> Option<Participant> {
    let id = p.id?;
    let name = p
        .name
        .clone()
        .or_else(|| p.display_name.clone())
        .unwrap_or_else(|| format!("Participant {id}"));
    Some(Participant { id, name })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_match(id: u64, round: i64) -> WireMatch {
        WireMatch {
            id: Some(id),
            round_number: Some(round),
            ..Default::default()
        }
    }

    #[test]
    fn map_match_keeps_well_formed_rows() {
        let raw = WireMatch {
            id: Some(3),
            round_number: Some(2),
            slot_index: Some(1),
            participant_a: Some(10),
            participant_b: None,
            winner_id: Some(10),
            loser_id: None,
            score_a: Some(21),
            score_b: Some(9),
            scheduled_at: Some("2026-05-01T18:30:00Z".into()),
        };
        let m = map_match(&raw).expect("row should map");
        assert_eq!(m.id, 3);
        assert_eq!(m.round_number, 2);
        assert_eq!(m.slot_index, Some(1));
        assert_eq!(m.participant_a, Some(10));
        assert!(m.participant_b.is_none());
        assert_eq!(m.winner_id, Some(10));
        assert_eq!(m.score_a, Some(21));
        assert!(m.scheduled_at.is_some());
    }

    #[test]
    fn map_match_drops_rows_without_id_or_round() {
        assert!(map_match(&WireMatch::default()).is_none());
        let no_round = WireMatch {
            id: Some(1),
            ..Default::default()
        };
        assert!(map_match(&no_round).is_none());
    }

    #[test]
    fn map_match_drops_non_positive_round_numbers() {
        assert!(map_match(&wire_match(1, 0)).is_none());
        assert!(map_match(&wire_match(2, -3)).is_none());
        assert!(map_match(&wire_match(3, 1)).is_some());
    }

    #[test]
    fn map_participant_falls_back_to_display_name() {
        let p = WireParticipant {
            id: Some(7),
            name: None,
            display_name: Some("Dana".into()),
        };
        assert_eq!(map_participant(&p).unwrap().name, "Dana");
    }

    #[test]
    fn map_participant_synthesizes_a_name_when_missing() {
        let p = WireParticipant {
            id: Some(9),
            ..Default::default()
        };
        assert_eq!(map_participant(&p).unwrap().name, "Participant 9");
    }

    #[tokio::test]
    async fn fetch_matches_maps_the_matches_route() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tournaments/7/matches")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"matches":[
                    {"id":1,"roundNumber":1,"participantA":10,"participantB":11,"winnerId":10},
                    {"id":2,"roundNumber":1,"participantA":12,"participantB":13}
                ]}"#,
            )
            .create_async()
            .await;

        let api = TourneyApi::with_base_url(server.url());
        let matches = api.fetch_matches(7).await.expect("fetch should succeed");

        mock.assert_async().await;
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].winner_id, Some(10));
        assert!(matches[1].winner_id.is_none());
    }

    #[tokio::test]
    async fn fetch_participants_tolerates_a_missing_tournament() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tournaments/99/participants")
            .with_status(404)
            .create_async()
            .await;

        let api = TourneyApi::with_base_url(server.url());
        let participants = api
            .fetch_participants(99)
            .await
            .expect("client errors fall back to an empty response");

        mock.assert_async().await;
        assert!(participants.is_empty());
    }
}
