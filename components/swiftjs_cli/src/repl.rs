//! REPL (Read-Compile-Print Loop) implementation

use crate::error::{CliError, CliResult};
use crate::session::{write_diagnostics, Session};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;

const EXIT_WORDS: [&str; 5] = [":quit", "quit", "exit", "bye", "goodbye"];

/// Run the interactive REPL
///
/// # Arguments
/// * `session` - The Session used to compile each input
///
/// # Returns
/// `Ok(())` when REPL exits normally
pub fn run_repl(session: &Session) -> CliResult<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::Repl(format!("Failed to initialize editor: {}", e)))?;

    println!("SwiftJS REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type Swift-subset code or ':quit' to exit.");
    println!();

    let mut line_buffer = String::new();
    let mut in_multiline = false;

    loop {
        let prompt = if in_multiline { "... " } else { "> " };

        match editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                if !in_multiline && is_exit_command(trimmed) {
                    println!("Goodbye!");
                    break;
                }

                if !in_multiline && trimmed.is_empty() {
                    continue;
                }

                // Accumulate input
                if in_multiline {
                    line_buffer.push('\n');
                }
                line_buffer.push_str(&line);

                if is_input_complete(&line_buffer) {
                    in_multiline = false;

                    let _ = editor.add_history_entry(&line_buffer);

                    let stdout = std::io::stdout();
                    if let Err(e) = evaluate(session, &line_buffer, &mut stdout.lock()) {
                        eprintln!("Error: {}", e);
                    }

                    line_buffer.clear();
                } else {
                    in_multiline = true;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C
                if in_multiline {
                    println!("^C");
                    line_buffer.clear();
                    in_multiline = false;
                } else {
                    println!("Press Ctrl-D or type ':quit' to exit");
                }
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                return Err(CliError::Repl(format!("Readline error: {}", err)));
            }
        }
    }

    Ok(())
}

/// Compile one complete input and write what the user should see.
///
/// Diagnostics replace the output; otherwise the enabled dumps are followed
/// by the generated code.
pub fn evaluate(session: &Session, input: &str, out: &mut impl Write) -> CliResult<()> {
    let compilation = session.compile_string(input)?;

    if !compilation.is_clean() {
        return write_diagnostics(&compilation.diagnostics, None, out);
    }

    session.write_dumps(&compilation, out)?;
    if !compilation.output.is_empty() {
        writeln!(out, "{}", compilation.output)?;
    }
    Ok(())
}

fn is_exit_command(input: &str) -> bool {
    EXIT_WORDS.contains(&input)
}

/// Check if the input appears to be complete
///
/// This is a simple heuristic that checks for balanced braces/parens and a
/// closed string literal
fn is_input_complete(input: &str) -> bool {
    let mut brace_count = 0;
    let mut paren_count = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for c in input.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }

        if c == '\\' && in_string {
            escape_next = true;
            continue;
        }

        if !in_string {
            match c {
                '"' => in_string = true,
                '{' => brace_count += 1,
                '}' => brace_count -= 1,
                '(' => paren_count += 1,
                ')' => paren_count -= 1,
                _ => {}
            }
        } else if c == '"' {
            in_string = false;
        }
    }

    brace_count <= 0 && paren_count <= 0 && !in_string
}
