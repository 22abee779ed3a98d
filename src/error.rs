#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use crate::value::DataType;

/// Errors raised while turning a literal into a value.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TokenizeError {
    /// literal declared `Integer` does not parse as one
    #[error("Illegal integer type '{0}'")]
    IllegalInteger(String),
    /// literal declared `Real` does not parse as one
    #[error("Illegal real number type '{0}'")]
    IllegalReal(String),
    /// literal declared `String` is not a well-formed quoted string
    #[error("Illegal string type '{0}'")]
    IllegalString(String),
}

/// A problem with a single source line, found while checking the program.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LineError {
    /// something other than the header came first
    #[error("The file should start with 'Algorithm <algorithm name>'")]
    HeaderNotFirst,
    /// header without a trailing `;`
    #[error("Semicolon ';' is missing in the end of the line.")]
    MissingHeaderSemicolon,
    /// header name contains characters outside `[A-Za-z0-9_]`
    #[error("Invalid algorithm name '{0}'")]
    InvalidAlgorithmName(String),
    /// header name starts with a digit
    #[error("Algorithm name should not start with a number.")]
    NameStartsWithNumber,
    /// a second header after the sections started
    #[error("Algorithm name should be first")]
    AlgorithmNotFirst,
    /// `Constants`, `Variables` or `Begin` seen twice
    #[error("{0} keyword duplication")]
    DuplicateKeyword(&'static str),
    /// a non-blank line between the header and `Begin` that belongs to no
    /// section
    #[error("Unexpected line outside of a section")]
    OutsideSection,
    /// wrong number of leading spaces
    #[error("Expected {expected} white spaces, but found {found}")]
    Indentation {
        /// configured indent width
        expected: usize,
        /// leading spaces on the line
        found:    usize,
    },
    /// declaration that does not look like `name: Type;`
    #[error("Invalid format")]
    InvalidFormat,
    /// declaration with `=` but no value
    #[error("Variable is not identified")]
    NotIdentified,
    /// declaration name that is not an identifier
    #[error("Invalid variable name '{0}'")]
    InvalidVariableName(String),
    /// name declared twice across both sections
    #[error("Variable name duplication '{0}'")]
    DuplicateName(String),
    /// unknown type name
    #[error("Invalid data type '{0}'")]
    InvalidDataType(String),
    /// initial value does not match its declared type
    #[error("Failed to tokenize: {0}")]
    Tokenize(#[from] TokenizeError),
    /// constant declared without a value
    #[error("Constant '{0}' must be initialized")]
    UninitializedConstant(String),
    /// statement without a trailing `;`
    #[error("Line should end with ';'")]
    MissingSemicolon,
    /// assignment to a constant
    #[error("Modifying constant '{0}'")]
    ModifyingConstant(String),
    /// assignment target or expression operand that was never declared
    #[error("Undefined variable '{0}'")]
    UndefinedVariable(String),
    /// `Read` into a constant
    #[error("Cannot read a constant value '{0}'")]
    ReadConstant(String),
    /// `Read`/`Write` of an undeclared name
    #[error("Invalid variable '{0}'")]
    InvalidVariable(String),
    /// right-hand side rejected by the expression compiler
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),
    /// body line matching no statement form
    #[error("Invalid statement")]
    InvalidStatement,
    /// non-blank line after `End`
    #[error("Unexpected statement after End")]
    AfterEnd,
}

/// A failure while executing a statement.
#[derive(thiserror::Error, Debug)]
pub enum RuntimeError {
    /// a variable was used before anything was assigned to it
    #[error("Variable '{0}' has no value assigned")]
    Unassigned(String),
    /// expression result does not fit the target's type
    #[error("Wrong data type, cannot assign {found} to {expected} variable '{name}'")]
    WrongDataType {
        /// assignment target
        name:     String,
        /// declared type of the target
        expected: DataType,
        /// type name of the produced value
        found:    String,
    },
    /// the expression engine reported an error
    #[error("Failed to evaluate expression: {0}")]
    Eval(String),
    /// input token could not be parsed as the variable's type
    #[error("Expected {expected} for '{name}' but read '{input}'")]
    BadInput {
        /// variable being read
        name:     String,
        /// its declared type
        expected: DataType,
        /// the offending token
        input:    String,
    },
    /// input ran out during `Read`
    #[error("Unexpected end of input while reading '{0}'")]
    EndOfInput(String),
    /// reading from the input stream failed
    #[error("Failed to read input")]
    Input(#[source] std::io::Error),
    /// writing to the output stream failed
    #[error("Failed to write output")]
    Output(#[source] std::io::Error),
}

/// Top-level error for checking and running an algorithm.
#[derive(thiserror::Error, Debug)]
pub enum InterpretError {
    /// source path without the `.algo` extension
    #[error("Please specify a valid file, file name should end with '.algo'")]
    InvalidExtension(PathBuf),
    /// source path that does not exist
    #[error("Cannot find a file with this name.")]
    NotFound(PathBuf),
    /// source could not be read
    #[error("Could not read {}", path.display())]
    Io {
        /// the file being read
        path:   PathBuf,
        /// underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// only blank lines
    #[error("File is empty")]
    EmptyFile,
    /// no `Algorithm <name>;` line anywhere
    #[error("Algorithm name is missing")]
    MissingAlgorithm,
    /// no `Begin` line anywhere
    #[error("Algorithm begin body is missing")]
    MissingBegin,
    /// `Begin` without a matching `End`
    #[error(
        "Algorithm has Begin body without End close\nSuggestion: Add `End` keyword to the end of \
         your algorithm"
    )]
    MissingEnd,
    /// a check failed on a specific line
    #[error("Error in line {line}: {error}\n{text}")]
    AtLine {
        /// 1-based line number
        line:  usize,
        /// raw text of the line
        text:  String,
        /// what went wrong
        #[source]
        error: LineError,
    },
    /// a statement failed while running
    #[error("Runtime error in line {line}: {error}\n{text}")]
    Runtime {
        /// 1-based line number of the statement
        line:  usize,
        /// raw text of the statement
        text:  String,
        /// what went wrong
        #[source]
        error: RuntimeError,
    },
}

impl InterpretError {
    /// Returns the line-level error, if this error points at a line.
    pub fn line_error(&self) -> Option<&LineError> {
        match self {
            InterpretError::AtLine { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns the line number this error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            InterpretError::AtLine { line, .. } | InterpretError::Runtime { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }
}
