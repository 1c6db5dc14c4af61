//! Core of the VibeCheck backend: records emotional check-in/check-out
//! submissions, pairs them into practice sessions with computed durations,
//! and serves the professor-facing session queries.
//!
//! The HTTP layer, login flow and identity provider live elsewhere; they
//! consume [`services::SubmissionService`], [`services::LifecycleService`]
//! and [`strategies::SessionQueries`] through the store traits defined in
//! [`repositories`].

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod strategies;
pub mod types;
pub mod utils;
pub mod validation;
