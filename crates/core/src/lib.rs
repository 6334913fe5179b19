//! CareLink Core - Shared types library.
//!
//! This crate provides the domain types used across all CareLink components:
//! - `registry` - Store/service layer and the postal-lookup server
//! - `cli` - Command-line front-end for the registry use cases
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. Validation happens at construction time so the rest of the
//! workspace can rely on well-formed values.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, natural keys, emails, postal codes
//!   and the patient/caregiver role

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
