//! Testing utilities for plugin developers
//!
//! This module provides a scriptable mock plugin and a shared call journal
//! for asserting hook ordering across several plugins.

pub mod mocks;

pub use mocks::{Journal, MockBehavior, MockPlugin};
