//! Deployment Advisor - DBMS deployment model questionnaire
//!
//! This crate walks a user through a button-driven checklist of deployment
//! criteria, scores On-Premise, Private Cloud and Public Cloud with a
//! weighted sum, and asks a language model for a second opinion.

pub mod adapters;
pub mod application;
pub mod bench;
pub mod config;
pub mod domain;
pub mod ports;
