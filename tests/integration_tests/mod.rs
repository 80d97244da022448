//! Integration tests module
//!
//! End-to-end tests for the newsmorph crawler and processing pipeline:
//! - Complete crawl → parse → process run against a mock site
//! - Dataset validation and failure scenarios

pub mod error_scenarios;
pub mod fixtures;
pub mod pipeline_test;
