//! Command line argument model

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Swift subset to JavaScript transpiler
#[derive(Parser, Debug)]
#[command(name = "swiftjs", version, about = "Swift subset to JavaScript transpiler")]
pub struct Cli {
    /// What to do; prints usage when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print the token sequence before compiling
    #[arg(long, global = true)]
    pub print_tokens: bool,

    /// Print the AST before the generated code
    #[arg(long, global = true)]
    pub print_ast: bool,

    /// Format used by --print-ast
    #[arg(long, value_enum, default_value_t = AstFormat::Tree, global = true)]
    pub ast_format: AstFormat,

    /// Spaces per indentation level in generated code
    #[arg(long, default_value_t = 2, global = true)]
    pub indent: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compile every source file in a directory to a sibling output file
    Build {
        /// Directory to search
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Extension of generated files
        #[arg(long, default_value = "js")]
        extension: String,

        /// Extension of source files
        #[arg(long, default_value = "swift")]
        source_extension: String,
    },

    /// Start an interactive session
    Repl,

    /// Compile source read from standard input
    Pipe,

    /// Compile inline source code
    Eval {
        /// Source text
        code: String,
    },

    /// Compile a single source file
    Compile {
        /// Source file
        file: PathBuf,

        /// Write output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// AST dump format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AstFormat {
    /// Indented node tree
    #[default]
    Tree,
    /// serde_json rendering of the statement list
    Json,
}

impl Cli {
    /// Maximum log level selected by `-v` repetitions
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Filter directive for the subscriber; a non-empty `RUST_LOG` value wins over `-v`
    pub fn log_filter(&self, rust_log: Option<&str>) -> String {
        match rust_log.map(str::trim) {
            Some(directive) if !directive.is_empty() => directive.to_string(),
            _ => self.log_level().to_string().to_lowercase(),
        }
    }
}
