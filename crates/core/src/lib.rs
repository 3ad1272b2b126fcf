// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod proposer;
mod rollover;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, preview_closure};
pub use command::Command;
pub use error::CoreError;
pub use proposer::{GroupProposal, propose_group, propose_movements, ranked_members, recompute_group_ranking};
pub use rollover::{PlannedGroup, PlannedMember, RolloverPlan, plan_rollover};
pub use state::{RolloverRecord, State, StateChange, TransitionResult};
