//! # Wasla Support
//!
//! Shared utilities for the Wasla injector.
//!
//! This crate provides:
//! - Lexical path normalization for specification paths
//! - Name suggestion helpers for error messages

pub mod paths;
pub mod text;
