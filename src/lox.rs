//! Driver tying the phases together: scan, parse, resolve, interpret.
//!
//! One [`Lox`] owns one interpreter, so globals defined by an earlier
//! [`Lox::run`] stay visible to later ones (the REPL relies on this).

use std::io::Write;

use log::{debug, info};
use thiserror::Error;

use crate::error::{Diagnostics, LoxError, RuntimeError};
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::scan_tokens;

/// Why a call to [`Lox::run`] failed.
#[derive(Debug, Error)]
pub enum RunError {
    /// Lex, parse or resolve errors.  Nothing was executed.
    #[error("{} static error(s)", .0.len())]
    Static(Vec<LoxError>),

    /// Execution stopped at the first runtime error.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl RunError {
    /// Conventional process exit code: 65 for static, 70 for runtime errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Static(_) => 65,
            RunError::Runtime(_) => 70,
        }
    }
}

pub struct Lox {
    interpreter: Interpreter,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lox {
    pub fn new() -> Self {
        Lox {
            interpreter: Interpreter::new(),
        }
    }

    /// `print` output goes to `out` instead of stdout.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        Lox {
            interpreter: Interpreter::with_output(out),
        }
    }

    pub fn run(&mut self, source: &str) -> Result<(), RunError> {
        let mut diagnostics = Diagnostics::new();

        let tokens = scan_tokens(source, &mut diagnostics);
        debug!("Scanned {} tokens", tokens.len());

        let statements = Parser::new(tokens, &mut diagnostics).parse();

        if diagnostics.has_errors() {
            info!("Stopping after parse: {} error(s)", diagnostics.errors().len());
            return Err(RunError::Static(diagnostics.take()));
        }

        Resolver::new(&mut self.interpreter, &mut diagnostics).resolve(&statements);

        if diagnostics.has_errors() {
            info!("Stopping after resolve: {} error(s)", diagnostics.errors().len());
            return Err(RunError::Static(diagnostics.take()));
        }

        self.interpreter.interpret(&statements)?;

        Ok(())
    }
}
