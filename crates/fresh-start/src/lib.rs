//! Bankruptcy lead intake and preliminary eligibility assessment.
//!
//! The crate is organized around a single workflow: a prospective client
//! submits an intake questionnaire, the service stores the lead, and the
//! eligibility engine converts the reported financial facts into a
//! preliminary Chapter 7/13 recommendation for staff follow-up.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
