//! Developer preview for the bracket engine: fetch (or load) a tournament
//! snapshot, run the projection + layout pipeline, and print the result as
//! a textual outline or a JSON dump for the web client to consume.

use anyhow::{Context, Result};
use knockout::selection::Selection;
use knockout::view::{SlotContent, build_bracket_view};
use log::info;
use tourney_api::{Match, Roster, client::TourneyApi};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut tournament_id: u64 = 1;
    let mut as_json = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => as_json = true,
            "-h" | "--help" => {
                println!("{}", usage_text());
                return Ok(());
            }
            other => {
                tournament_id = other
                    .parse()
                    .with_context(|| format!("tournament id must be an integer, got {other:?}"))?;
            }
        }
    }

    let api = TourneyApi::new();
    let matches = api.fetch_matches(tournament_id).await?;
    let participants = api.fetch_participants(tournament_id).await?;
    let roster = Roster::new(participants);
    info!(
        "tournament {tournament_id}: {} matches, {} participants",
        matches.len(),
        roster.len()
    );

    let view = build_bracket_view(&matches, roster.len(), Selection::Unselected);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.rounds.is_empty() {
        println!("Fewer than two participants - nothing to draw.");
        return Ok(());
    }

    for round in &view.rounds {
        println!(
            "{} - {} slot(s), column x={:.0}",
            round.name,
            round.slots.len(),
            view.layout.column_x(round.number)
        );
        for slot in &round.slots {
            println!(
                "  [{:>3}] y={:>7.1}  {}",
                slot.key.index,
                slot.top,
                describe_slot(&slot.content, &roster)
            );
        }
    }

    Ok(())
}

fn describe_slot(content: &SlotContent, roster: &Roster) -> String {
    match content {
        SlotContent::Match(m) => describe_match(m, roster),
        SlotContent::Potential(p) => {
            let names: Vec<String> = p
                .possible_participants
                .iter()
                .map(|&id| display_name(roster, id))
                .collect();
            if names.is_empty() {
                "awaiting results".to_owned()
            } else {
                format!("one of: {}", names.join(", "))
            }
        }
        SlotContent::Placeholder => "awaiting results".to_owned(),
    }
}

fn describe_match(m: &Match, roster: &Roster) -> String {
    let side = |p: Option<u64>| {
        p.map(|id| display_name(roster, id))
            .unwrap_or_else(|| "bye".to_owned())
    };
    let mut line = format!("{} vs {}", side(m.participant_a), side(m.participant_b));
    match (m.score_a, m.score_b) {
        (Some(a), Some(b)) => line.push_str(&format!("  {a}-{b}")),
        _ => {
            if let Some(at) = m.scheduled_at {
                line.push_str(&format!("  ({})", at.format("%Y-%m-%d %H:%M")));
            }
        }
    }
    if let Some(winner) = m.winner_id {
        line.push_str(&format!("  winner: {}", display_name(roster, winner)));
    }
    line
}

fn display_name(roster: &Roster, id: u64) -> String {
    roster
        .name(id)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("#{id}"))
}

fn usage_text() -> &'static str {
    "preview - bracket engine snapshot inspector

Usage:
  preview [tournament-id]
  preview [tournament-id] --json

Environment:
  KNOCKOUT_API_BASE      Tournament service base URL (default http://127.0.0.1:3000/api)
  KNOCKOUT_MATCHES_JSON  Path to a local matches JSON snapshot (skips the network)
  RUST_LOG               env_logger filter, e.g. knockout=debug"
}
