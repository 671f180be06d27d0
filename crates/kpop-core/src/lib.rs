//! # kpop-core
//!
//! Core record types, ID generation, and error types for kpopnet.
//!
//! This crate provides the foundational types shared across all kpopnet crates:
//! - Record structs for the current schema revision (idols, groups, memberships)
//! - Record structs for the legacy revision, kept for reading old dumps
//! - Entity kind and schema revision enums
//! - Stable ID generation and profile URLs
//! - Wire date parsing (full and partial dates)
//! - A borrowed lookup index over a loaded snapshot
//! - CLI response types
//! - Cross-cutting error types

pub mod dates;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod index;
pub mod legacy;
pub mod responses;
