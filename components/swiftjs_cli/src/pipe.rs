//! Standard input mode

use crate::error::{CliError, CliResult};
use crate::session::{write_diagnostics, Session};
use std::io::{IsTerminal, Read, Write};

/// Compile everything piped into stdin, printing the AST and the output
///
/// # Errors
/// Returns `CliError::NoInput` when stdin is an interactive terminal or
/// carries no data
pub fn run_pipe(session: &Session) -> CliResult<()> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(CliError::NoInput);
    }

    let mut source = String::new();
    stdin.lock().read_to_string(&mut source)?;

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    compile_piped(session, &source, &mut stdout.lock(), &mut stderr.lock())
}

/// Compile `source` and write the `=== AST ===` and `=== Generated JS ===`
/// sections
pub fn compile_piped(
    session: &Session,
    source: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> CliResult<()> {
    if source.trim().is_empty() {
        return Err(CliError::NoInput);
    }

    let compilation = session.compile_string(source)?;
    write_diagnostics(&compilation.diagnostics, None, err)?;

    writeln!(out, "=== AST ===")?;
    write!(out, "{}", session.render_ast(&compilation.statements)?)?;
    writeln!(out)?;
    writeln!(out, "=== Generated JS ===")?;
    writeln!(out, "{}", compilation.output)?;

    if compilation.is_clean() {
        Ok(())
    } else {
        Err(CliError::Diagnostics {
            count: compilation.diagnostics.len(),
        })
    }
}
