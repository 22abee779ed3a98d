//! # algo
//!
//! An interpreter for Algo, a small pseudo-code language used to teach
//! algorithm writing. A program names itself, declares its constants and
//! variables, and lists statements between `Begin` and `End`:
//!
//! ```text
//! Algorithm Greeting;
//! Variables
//!     name: String;
//! Begin
//!     Write("Who are you? ");
//!     Read(name);
//!     Write("Hello, ", name, "!\n");
//! End
//! ```

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// The checked program representation
pub mod algorithm;
/// Environment-driven settings
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Error types for checking and running programs
pub mod error;
/// Expression compilation and evaluation
pub mod expression;
/// Structural checking of Algo source
pub mod interpreter;
/// For all parsers used
pub mod parsers;
/// Statement execution
pub mod runtime;
/// Token and line reader for `Read`
pub mod scanner;
/// Source loading and comment stripping
pub mod source;
/// Data types, values and the symbol table
pub mod value;

use std::{
    io::{BufRead, Write},
    path::Path,
};

pub use algorithm::Algorithm;
pub use config::Config;
pub use error::InterpretError;
pub use interpreter::Interpreter;
pub use value::{Bindings, DataType, Value};

/// Locates and checks the `.algo` file at `path` using the process-wide
/// configuration.
pub fn check_file(path: impl AsRef<Path>) -> Result<Algorithm, InterpretError> {
    let path = source::locate(path)?;
    Interpreter::new(config::get().clone()).check_file(&path)
}

/// Locates, checks and runs the `.algo` file at `path` using the process-wide
/// configuration.
pub fn run_file<R: BufRead, W: Write>(
    path: impl AsRef<Path>,
    input: R,
    output: W,
) -> Result<Bindings, InterpretError> {
    let path = source::locate(path)?;
    let interpreter = Interpreter::new(config::get().clone());
    let algorithm = interpreter.check_file(&path)?;
    interpreter.run(&algorithm, input, output)
}
