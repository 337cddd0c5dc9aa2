//! Integration test suite for the SwiftJS transpiler
//!
//! This crate provides integration tests that verify components work
//! together correctly across component boundaries.

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use swiftjs_cli;
    pub use transpiler;
}
