//! Swift subset transpiler CLI Library
//!
//! Provides the Session struct and the build, REPL and pipe front ends
//! used by the `swiftjs` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod build;
pub mod cli;
pub mod error;
pub mod pipe;
pub mod repl;
pub mod session;

pub use build::{BuildOptions, BuildReport};
pub use cli::{AstFormat, Cli, Command};
pub use error::{CliError, CliResult};
pub use session::{Compilation, Session};
