//! # tnf-core
//!
//! Client-side state for the TrackNFix dashboard.
//!
//! This crate holds everything that can be computed without a network:
//! - The [`Record`](record::Record) model and its identity type
//! - Status and confidence enums
//! - Backend row normalization ([`normalize`])
//! - The filter pipeline and aggregate counts ([`filter`])
//! - Selection tracking across live-set replacements ([`selection`])
//!
//! Fetching and mutation live in `tnf-sync`; the HTTP transport lives in
//! `tnf-backend`.

pub mod enums;
pub mod errors;
pub mod fields;
pub mod filter;
pub mod normalize;
pub mod record;
pub mod selection;
pub mod time;
