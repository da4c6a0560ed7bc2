//! Integration tests for AutoDoc
//!
//! These tests drive the complete router over a temporary data directory,
//! with the external renderer and dereferencer replaced by shell scripts.

mod artifacts;
mod export;
