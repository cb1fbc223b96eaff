//! Common test utilities for tplstack CLI tests.
//!
//! This module provides:
//! - `TestEnv`: an isolated crate in a temp directory plus CLI helpers
//! - Assertion macros: `assert_generated!`, `assert_output_contains!`
//! - Fixtures: reusable file contents

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
