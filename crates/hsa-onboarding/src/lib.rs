//! HSA onboarding decisioning library.
//!
//! The crate owns the deterministic part of onboarding a Health Savings Account
//! applicant: comparing the data a person typed into the enrollment form against
//! the fields a vision/OCR collaborator extracted from their uploaded documents,
//! and turning the comparison into exactly one of approve, reject, or manual
//! review. Everything that blocks (document OCR, persistence, notification) sits
//! behind traits so the engine itself stays pure and safe to call concurrently.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
