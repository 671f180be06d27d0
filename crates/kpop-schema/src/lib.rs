//! # kpop-schema
//!
//! Validation, schema revisions, and JSON Schema registry for kpopnet.
//!
//! This crate provides:
//! - `Validator`: structural and referential checks turning raw JSON into typed `Profiles`
//! - `check_integrity`: referential checks on an already typed snapshot
//! - Revision detection plus explicit `upgrade` / `downgrade` between the legacy and current shapes
//! - `load_str` / `load_value`: detect, validate and migrate in one step
//! - `SchemaRegistry`: JSON Schemas of every record and response type
//!
//! ## Architecture
//!
//! Record types are defined in `kpop-core` with `#[derive(JsonSchema)]`.
//! This crate imports those types and provides the validation, migration and
//! export layer. Consumer crates (kpop-publish, kpop-cli) depend on
//! kpop-schema for load-time validation.

mod error;
mod fields;
mod integrity;
mod loader;
pub mod migrate;
mod registry;
mod validator;

pub use error::{SchemaError, ValidationError, ValidationFailure};
pub use fields::{FieldKind, FieldSpec, RecordSpec};
pub use integrity::{check_integrity, check_legacy_integrity};
pub use loader::{Loaded, load_str, load_value};
pub use registry::SchemaRegistry;
pub use validator::{Validator, ValidatorOptions};
