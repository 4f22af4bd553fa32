//! Cycle Assessment - Menstrual cycle questionnaire and pattern assessment
//!
//! This crate runs a six-step questionnaire, classifies the answers into a
//! cycle pattern, attaches recommendations and persists the finished
//! assessment through a pluggable submitter.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
