use std::collections::BTreeMap;

use log::warn;
use tourney_api::{Match, MatchId};

// ---------------------------------------------------------------------------
// Round classification
// ---------------------------------------------------------------------------

/// Number of rounds needed for `participant_count` players: ceil(log2(n)).
/// Fewer than two participants cannot form a bracket and yield zero rounds.
pub fn total_rounds(participant_count: usize) -> u32 {
    if participant_count < 2 {
        return 0;
    }
    (participant_count as u64).next_power_of_two().trailing_zeros()
}

/// Display name for `round` in a bracket of `total_rounds` rounds.
///
/// Names count backward from the final:
///
/// ```text
///   distance 0  Final
///   distance 1  Semifinal
///   distance 2  Quarterfinal
///   distance 3  Round of 16
///   distance 4  Round of 32
///   distance 5  Round of 64
///   further     Round N
/// ```
///
/// The opening round always reads "Round 1" (unless it is itself the
/// final), so an 8-player bracket shows Round 1 / Semifinal / Final.
pub fn round_name(round: u32, total_rounds: u32) -> String {
    if round == 0 || round > total_rounds {
        return format!("Round {round}");
    }
    if round == 1 && total_rounds > 1 {
        return "Round 1".to_owned();
    }
    match total_rounds - round {
        0 => "Final".to_owned(),
        1 => "Semifinal".to_owned(),
        2 => "Quarterfinal".to_owned(),
        3 => "Round of 16".to_owned(),
        4 => "Round of 32".to_owned(),
        5 => "Round of 64".to_owned(),
        _ => format!("Round {round}"),
    }
}

// ---------------------------------------------------------------------------
// Match grouping
// ---------------------------------------------------------------------------

/// Partition `matches` into per-round, slot-ordered buckets.
///
/// Every round `1..=total_rounds` is present even when nothing has been
/// recorded for it yet. Matches tagged with a round outside that range are
/// dropped with a warning — they indicate an upstream data inconsistency,
/// not a reason to fail. Within a bucket, ascending id is the slot-index
/// source of truth; a bucket where every match carries an explicit
/// `slot_index` is ordered by that instead.
pub fn group_by_round<'a>(
    matches: &'a [Match],
    total_rounds: u32,
) -> BTreeMap<u32, Vec<&'a Match>> {
    let mut rounds: BTreeMap<u32, Vec<&Match>> =
        (1..=total_rounds).map(|r| (r, Vec::new())).collect();

    for m in matches {
        match rounds.get_mut(&m.round_number) {
            Some(bucket) => bucket.push(m),
            None => warn!(
                "dropping match {}: round {} outside 1..={total_rounds}",
                m.id, m.round_number
            ),
        }
    }

    for (round, bucket) in &mut rounds {
        bucket.sort_by_key(|m| m.id);
        apply_explicit_slots(*round, bucket);
    }

    rounds
}

/// Re-order a bucket by explicit slot indices when the whole round carries
/// them. A disagreement with the id ordering means the match service
/// assigned ids out of bracket order; the explicit index wins, but the
/// divergence is logged like any other upstream inconsistency.
fn apply_explicit_slots(round: u32, bucket: &mut [&Match]) {
    if bucket.is_empty() || !bucket.iter().any(|m| m.slot_index.is_some()) {
        return;
    }
    if !bucket.iter().all(|m| m.slot_index.is_some()) {
        warn!("round {round}: ignoring partial slot indices, falling back to id order");
        return;
    }

    let by_id: Vec<MatchId> = bucket.iter().map(|m| m.id).collect();
    bucket.sort_by_key(|m| (m.slot_index, m.id));
    if bucket.iter().map(|m| m.id).ne(by_id.iter().copied()) {
        warn!("round {round}: explicit slot indices diverge from id order");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_in_round(id: MatchId, round: u32) -> Match {
        Match {
            id,
            round_number: round,
            ..Default::default()
        }
    }

    #[test]
    fn total_rounds_is_ceil_log2() {
        assert_eq!(total_rounds(2), 1);
        assert_eq!(total_rounds(3), 2);
        assert_eq!(total_rounds(4), 2);
        assert_eq!(total_rounds(5), 3);
        assert_eq!(total_rounds(8), 3);
        assert_eq!(total_rounds(9), 4);
        assert_eq!(total_rounds(16), 4);
        assert_eq!(total_rounds(129), 8);
        assert_eq!(total_rounds(500), 9);
    }

    #[test]
    fn degenerate_fields_have_zero_rounds() {
        assert_eq!(total_rounds(0), 0);
        assert_eq!(total_rounds(1), 0);
    }

    #[test]
    fn eight_player_bracket_names() {
        let names: Vec<String> = (1..=3).map(|r| round_name(r, 3)).collect();
        assert_eq!(names, vec!["Round 1", "Semifinal", "Final"]);
    }

    #[test]
    fn round_name_lookup_table_for_128_players() {
        // The full backward-counting table, verbatim.
        let names: Vec<String> = (1..=7).map(|r| round_name(r, 7)).collect();
        assert_eq!(
            names,
            vec![
                "Round 1",
                "Round of 64",
                "Round of 32",
                "Round of 16",
                "Quarterfinal",
                "Semifinal",
                "Final",
            ]
        );
    }

    #[test]
    fn rounds_beyond_the_table_fall_back_to_generic_labels() {
        // 256 players → 8 rounds; round 2 is further out than a Round of 64.
        assert_eq!(round_name(2, 8), "Round 2");
        assert_eq!(round_name(3, 8), "Round of 64");
    }

    #[test]
    fn a_two_player_bracket_is_just_the_final() {
        assert_eq!(round_name(1, 1), "Final");
    }

    #[test]
    fn grouping_initializes_every_round() {
        let grouped = group_by_round(&[], 4);
        assert_eq!(grouped.len(), 4);
        assert!(grouped.values().all(Vec::is_empty));
    }

    #[test]
    fn grouping_sorts_each_bucket_by_id() {
        let matches = vec![
            match_in_round(9, 1),
            match_in_round(4, 2),
            match_in_round(7, 1),
            match_in_round(8, 1),
        ];
        let grouped = group_by_round(&matches, 2);
        let round1: Vec<MatchId> = grouped[&1].iter().map(|m| m.id).collect();
        assert_eq!(round1, vec![7, 8, 9]);
        assert_eq!(grouped[&2].len(), 1);
    }

    #[test]
    fn grouping_drops_out_of_range_rounds() {
        let matches = vec![
            match_in_round(1, 1),
            match_in_round(2, 0),
            match_in_round(3, 5),
        ];
        let grouped = group_by_round(&matches, 2);
        assert_eq!(grouped[&1].len(), 1);
        assert_eq!(grouped[&2].len(), 0);
        assert_eq!(grouped.values().map(Vec::len).sum::<usize>(), 1);
    }

    #[test]
    fn explicit_slot_indices_override_id_order() {
        let mut a = match_in_round(10, 1);
        a.slot_index = Some(1);
        let mut b = match_in_round(11, 1);
        b.slot_index = Some(0);
        let matches = vec![a, b];

        let grouped = group_by_round(&matches, 1);
        let ids: Vec<MatchId> = grouped[&1].iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![11, 10]);
    }

    #[test]
    fn partial_slot_indices_fall_back_to_id_order() {
        let mut a = match_in_round(10, 1);
        a.slot_index = Some(1);
        let b = match_in_round(11, 1);
        let matches = vec![a, b];

        let grouped = group_by_round(&matches, 1);
        let ids: Vec<MatchId> = grouped[&1].iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }
}
