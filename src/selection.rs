use serde::Serialize;
use tourney_api::{Match, ParticipantId};

/// The single focused participant, threaded through layout and connector
/// calls as a plain value — there is no ambient selection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(ParticipantId),
}

impl Selection {
    /// Pick a participant. Re-picking the current one clears the
    /// selection; picking anyone else focuses them directly.
    #[must_use]
    pub fn pick(self, id: ParticipantId) -> Self {
        if self == Selection::Selected(id) {
            Selection::Unselected
        } else {
            Selection::Selected(id)
        }
    }

    #[must_use]
    pub fn clear(self) -> Self {
        Selection::Unselected
    }

    pub fn selected(self) -> Option<ParticipantId> {
        match self {
            Selection::Selected(id) => Some(id),
            Selection::Unselected => None,
        }
    }

    pub fn is_selected(self, id: ParticipantId) -> bool {
        self == Selection::Selected(id)
    }

    /// Whether `m` should be emphasized under this selection.
    pub fn highlights_match(self, m: &Match) -> bool {
        self.selected().is_some_and(|id| m.involves(id))
    }
}
