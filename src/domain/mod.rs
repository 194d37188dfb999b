//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `catalog` - Products, tiers, questions and the common-question table
//! - `qualification` - Session state and the qualification engine

pub mod catalog;
pub mod foundation;
pub mod qualification;
