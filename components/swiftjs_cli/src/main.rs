//! SwiftJS transpiler CLI
//!
//! Entry point for the transpiler. Parses CLI arguments, installs logging
//! and delegates to the Session and the front ends.

use clap::Parser as ClapParser;
use std::io::Write;
use std::process::ExitCode;
use swiftjs_cli::build::run_build;
use swiftjs_cli::pipe::run_pipe;
use swiftjs_cli::repl::run_repl;
use swiftjs_cli::session::write_diagnostics;
use swiftjs_cli::{BuildOptions, Cli, CliError, CliResult, Command, Compilation, Session};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.log_filter(rust_log.as_deref())))
        .with_writer(std::io::stderr)
        .init();

    let session = Session::new()
        .with_print_tokens(cli.print_tokens)
        .with_print_ast(cli.print_ast)
        .with_ast_format(cli.ast_format)
        .with_indent_width(cli.indent);

    let Some(command) = cli.command else {
        print_usage();
        return ExitCode::SUCCESS;
    };

    match run(&session, command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Diagnostics { count }) => {
            tracing::debug!(count, "exiting after syntax errors");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(session: &Session, command: Command) -> CliResult<()> {
    match command {
        Command::Build {
            dir,
            recursive,
            extension,
            source_extension,
        } => {
            let options = BuildOptions {
                dir,
                recursive,
                extension,
                source_extension,
            };
            let report = run_build(
                session,
                &options,
                &mut std::io::stdout().lock(),
                &mut std::io::stderr().lock(),
            )?;
            if report.failed > 0 {
                eprintln!("{} file(s) failed to build", report.failed);
            }
            if report.is_success() {
                Ok(())
            } else {
                Err(CliError::Diagnostics {
                    count: report.diagnostics + report.failed,
                })
            }
        }
        Command::Repl => run_repl(session),
        Command::Pipe => run_pipe(session),
        Command::Eval { code } => {
            let compilation = session.compile_string(&code)?;
            emit(session, &compilation, true)
        }
        Command::Compile { file, output } => {
            let compilation = session.compile_file(&file)?;
            write_diagnostics(
                &compilation.diagnostics,
                Some(file.as_path()),
                &mut std::io::stderr().lock(),
            )?;
            match output {
                Some(path) => {
                    std::fs::write(&path, format!("{}\n", compilation.output))?;
                    tracing::info!(path = %path.display(), "wrote output");
                    finish(&compilation)
                }
                None => emit(session, &compilation, false),
            }
        }
    }
}

/// Print dumps and output to stdout, and diagnostics to stderr when asked
fn emit(
    session: &Session,
    compilation: &Compilation,
    report_diagnostics: bool,
) -> CliResult<()> {
    if report_diagnostics {
        write_diagnostics(&compilation.diagnostics, None, &mut std::io::stderr().lock())?;
    }
    let mut stdout = std::io::stdout().lock();
    session.write_dumps(compilation, &mut stdout)?;
    writeln!(stdout, "{}", compilation.output)?;
    finish(compilation)
}

fn finish(compilation: &Compilation) -> CliResult<()> {
    if compilation.is_clean() {
        Ok(())
    } else {
        Err(CliError::Diagnostics {
            count: compilation.diagnostics.len(),
        })
    }
}

fn print_usage() {
    println!("SwiftJS transpiler v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage:");
    println!("  swiftjs build [DIR]        Compile every .swift file in DIR to .js");
    println!("  swiftjs repl               Start interactive REPL");
    println!("  swiftjs pipe               Compile source piped into stdin");
    println!("  swiftjs eval <CODE>        Compile inline source code");
    println!("  swiftjs compile <FILE>     Compile a single file");
    println!();
    println!("Run 'swiftjs --help' for more options.");
}
