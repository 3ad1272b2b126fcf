// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event persistence
//! - `league`: Seasons, groups, players, memberships and matches
//! - `closure`: Closure creation, versioned edits and approval
//! - `rollover`: Writing a rollover plan
//! - `transition`: Dispatching a `TransitionResult` to the above

pub mod audit;
pub mod closure;
pub mod league;
pub mod rollover;
pub mod transition;

pub use transition::{PersistTransitionResult, persist_transition};
