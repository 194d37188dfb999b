//! Insurance Qualifier - Tiered product qualification service
//!
//! Walks an applicant through disqualifying yes/no questions for a catalog
//! of insurance products ordered best tier first, and settles on the best
//! product they qualify for.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
