//! # tnf-sync
//!
//! Owns the dashboard's application state and keeps it in step with the
//! backend.
//!
//! - [`AppState`]: live record set, filter settings, selection
//! - [`SyncController`]: fetch on load, optimistic status updates, and the
//!   unconditional refetch that follows every write
//!
//! Everything runs on one logical thread of control. The controller is
//! driven through `&mut self`, so the live set is swapped whole between
//! suspension points and never observed half-replaced.

mod controller;
mod state;

pub use controller::{
    FetchOutcome, MutationOutcome, PendingUpdate, SyncController, SyncOptions, SyncPhase,
    WriteResult,
};
pub use state::AppState;
