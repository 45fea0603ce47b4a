use serde::Serialize;

// ---------------------------------------------------------------------------
// Density tiers
// ---------------------------------------------------------------------------

/// Cell and gap sizing for one bracket, picked from the participant-count
/// tier table. Units are pixel-independent; the web client maps them onto
/// whatever surface it renders to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutProfile {
    /// Height of one match cell.
    pub cell_height: f64,
    /// Width of one round column, excluding the connector gutter.
    pub round_width: f64,
    /// Base vertical gap between adjacent cells.
    pub row_gap: f64,
}

/// Boundary-inclusive thresholds on participant count. A 32-player field
/// still gets the generous profile; 33 tips into the medium one.
const DENSITY_TIERS: [(usize, LayoutProfile); 3] = [
    (
        32,
        LayoutProfile {
            cell_height: 56.0,
            round_width: 220.0,
            row_gap: 24.0,
        },
    ),
    (
        128,
        LayoutProfile {
            cell_height: 44.0,
            round_width: 190.0,
            row_gap: 16.0,
        },
    ),
    (
        512,
        LayoutProfile {
            cell_height: 32.0,
            round_width: 160.0,
            row_gap: 10.0,
        },
    ),
];

/// Fallback profile for fields beyond 512 participants.
const MINIMAL_PROFILE: LayoutProfile = LayoutProfile {
    cell_height: 24.0,
    round_width: 140.0,
    row_gap: 6.0,
};

/// Horizontal length of one connector stub. Two stubs (outbound from the
/// child column, inbound to the parent column) tile the gutter between
/// adjacent round columns.
pub const CONNECTOR_STUB: f64 = 12.0;

fn profile_for(participant_count: usize) -> LayoutProfile {
    DENSITY_TIERS
        .iter()
        .find(|(limit, _)| participant_count <= *limit)
        .map(|(_, profile)| *profile)
        .unwrap_or(MINIMAL_PROFILE)
}

// ---------------------------------------------------------------------------
// Bracket geometry
// ---------------------------------------------------------------------------

/// Pre-computed 2-D geometry for one bracket.
///
/// Vertical positions are derived from round 1's total height: every later
/// round divides that same height evenly among its expected slots, so the
/// slot pitch doubles each round. A parent therefore sits between its
/// uniformly indexed child slots rather than between the particular matches
/// that happen to exist — byes and missing matches do not bend the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BracketLayout {
    total_rounds: u32,
    profile: LayoutProfile,
}

impl BracketLayout {
    pub fn new(total_rounds: u32, participant_count: usize) -> Self {
        Self {
            total_rounds,
            profile: profile_for(participant_count),
        }
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn profile(&self) -> LayoutProfile {
        self.profile
    }

    /// Expected number of slots in `round`: 2^(total_rounds − round).
    /// Zero for rounds outside the bracket.
    pub fn matches_in_round(&self, round: u32) -> u32 {
        if round == 0 || round > self.total_rounds {
            return 0;
        }
        1 << (self.total_rounds - round)
    }

    /// Total height of `round`'s column. Round 1 doubles the row gap to
    /// keep first-round pairs visually separated.
    pub fn round_height(&self, round: u32) -> f64 {
        let m = self.matches_in_round(round);
        if m == 0 {
            return 0.0;
        }
        let gap = if round == 1 {
            self.profile.row_gap * 2.0
        } else {
            self.profile.row_gap
        };
        f64::from(m) * self.profile.cell_height + f64::from(m - 1) * gap
    }

    /// The canvas height every round is measured against.
    pub fn canvas_height(&self) -> f64 {
        self.round_height(1)
    }

    /// Vertical span allotted to one slot of `round`: round 1's total
    /// height divided evenly among the round's expected slots.
    pub fn height_per_match(&self, round: u32) -> f64 {
        let m = self.matches_in_round(round);
        if m == 0 {
            return 0.0;
        }
        self.round_height(1) / f64::from(m)
    }

    /// Top offset of slot `index` in `round`: the cell sits centered
    /// inside its share of the canvas.
    pub fn top_position(&self, round: u32, index: u32) -> f64 {
        let per = self.height_per_match(round);
        f64::from(index) * per + (per - self.profile.cell_height) / 2.0
    }

    /// Vertical center of slot `(round, index)`.
    pub fn center_y(&self, round: u32, index: u32) -> f64 {
        self.top_position(round, index) + self.profile.cell_height / 2.0
    }

    /// Left edge of `round`'s column. Columns sit on a fixed pitch of
    /// `round_width + 2 × CONNECTOR_STUB` so the connector gutter tiles
    /// exactly between them.
    pub fn column_x(&self, round: u32) -> f64 {
        f64::from(round.saturating_sub(1)) * (self.profile.round_width + 2.0 * CONNECTOR_STUB)
    }

    /// Total canvas width across all round columns.
    pub fn canvas_width(&self) -> f64 {
        if self.total_rounds == 0 {
            return 0.0;
        }
        self.column_x(self.total_rounds) + self.profile.round_width
    }
}
