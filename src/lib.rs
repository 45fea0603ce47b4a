//! Single-elimination bracket projection & layout engine.
//!
//! Given the flat, round-tagged match list the tournament service records,
//! this crate rebuilds the logical bracket tree, projects which participants
//! can still meet one round ahead, and computes a deterministic 2-D layout
//! (vertical slot offsets, column positions, connector geometry) that the
//! web client renders. Everything here is pure, synchronous computation over
//! an immutable snapshot; fetching lives in the `tourney-api` crate.

pub mod connectors;
pub mod layout;
pub mod projection;
pub mod rounds;
pub mod selection;
pub mod view;

pub use connectors::{ConnectorSet, Segment, build_connectors};
pub use layout::{BracketLayout, CONNECTOR_STUB, LayoutProfile};
pub use projection::{PotentialMatch, SlotKey, project};
pub use rounds::{group_by_round, round_name, total_rounds};
pub use selection::Selection;
pub use view::{BracketView, RoundView, SlotContent, SlotView, build_bracket_view};
