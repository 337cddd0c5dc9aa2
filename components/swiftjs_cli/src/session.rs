//! Configured compilation pipeline shared by every front end

use crate::cli::AstFormat;
use crate::error::CliResult;
use std::io::Write;
use std::path::Path;
use transpiler::{AstPrinter, CodeGenerator, Diagnostic, Lexer, Parser, SpannedToken, Statement};

/// Everything one compilation produced
#[derive(Debug, Clone)]
pub struct Compilation {
    /// Tokens with their positions, ending with the end marker
    pub tokens: Vec<SpannedToken>,
    /// Parsed statements
    pub statements: Vec<Statement>,
    /// Syntax diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Generated JavaScript, without a trailing newline
    pub output: String,
}

impl Compilation {
    /// True if parsing reported no diagnostics
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Compilation settings and the pipeline that applies them
#[derive(Debug, Clone)]
pub struct Session {
    /// Whether to dump tokens before the output
    print_tokens: bool,
    /// Whether to dump the AST before the output
    print_ast: bool,
    /// How the AST dump is rendered
    ast_format: AstFormat,
    /// Generator carrying the indentation setting
    generator: CodeGenerator,
}

impl Session {
    /// Create a session with default settings
    ///
    /// # Example
    /// ```
    /// use swiftjs_cli::Session;
    ///
    /// let session = Session::new();
    /// let compilation = session.compile_string("print 1 + 2").unwrap();
    /// assert_eq!(compilation.output, "console.log((1 + 2));");
    /// ```
    pub fn new() -> Self {
        Self {
            print_tokens: false,
            print_ast: false,
            ast_format: AstFormat::Tree,
            generator: CodeGenerator::new(),
        }
    }

    /// Enable token printing
    pub fn with_print_tokens(mut self, enabled: bool) -> Self {
        self.print_tokens = enabled;
        self
    }

    /// Enable AST printing
    pub fn with_print_ast(mut self, enabled: bool) -> Self {
        self.print_ast = enabled;
        self
    }

    /// Choose the AST dump format
    pub fn with_ast_format(mut self, format: AstFormat) -> Self {
        self.ast_format = format;
        self
    }

    /// Set the indentation width of generated code
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.generator = CodeGenerator::with_indent_width(width);
        self
    }

    /// Compile a source file
    ///
    /// # Errors
    /// Returns `CliError` if the file cannot be read or does not tokenize
    pub fn compile_file(&self, path: impl AsRef<Path>) -> CliResult<Compilation> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), "compiling file");
        self.compile_string(&source)
    }

    /// Compile a source string.
    ///
    /// Syntax errors do not fail the call; they are returned as
    /// diagnostics next to the output generated for the recovered
    /// statements.
    ///
    /// # Errors
    /// Returns `CliError::Lex` if the source does not tokenize
    pub fn compile_string(&self, source: &str) -> CliResult<Compilation> {
        let tokens = Lexer::new(source).tokenize_spanned()?;
        let (statements, diagnostics) = Parser::with_positions(tokens.clone()).parse_program();
        let output = self.generator.generate(&statements);

        Ok(Compilation {
            tokens,
            statements,
            diagnostics,
            output,
        })
    }

    /// Render `statements` in the configured AST format
    pub fn render_ast(&self, statements: &[Statement]) -> CliResult<String> {
        match self.ast_format {
            AstFormat::Tree => Ok(AstPrinter::print(statements)),
            AstFormat::Json => Ok(serde_json::to_string_pretty(statements)? + "\n"),
        }
    }

    /// Write the enabled token and AST dumps for `compilation`
    pub fn write_dumps(&self, compilation: &Compilation, out: &mut impl Write) -> CliResult<()> {
        if self.print_tokens {
            for spanned in &compilation.tokens {
                writeln!(out, "{}\t{}", spanned.position, spanned.token)?;
            }
        }
        if self.print_ast {
            write!(out, "{}", self.render_ast(&compilation.statements)?)?;
        }
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Write one line per diagnostic, prefixed with `origin` when given
pub fn write_diagnostics(
    diagnostics: &[Diagnostic],
    origin: Option<&Path>,
    out: &mut impl Write,
) -> CliResult<()> {
    for diagnostic in diagnostics {
        match origin {
            Some(path) => writeln!(out, "{}:{}", path.display(), diagnostic)?,
            None => writeln!(out, "{}", diagnostic)?,
        }
    }
    Ok(())
}
