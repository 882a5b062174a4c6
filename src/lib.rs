//! Triply trip playlist generator
//!
//! This library provides the request-orchestration core of the triply
//! service: a retrying call wrapper for unreliable AI services, the two-stage
//! playlist then cover image pipeline with stale-result protection, and a
//! debounced destination autocomplete.

pub mod app_state;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
