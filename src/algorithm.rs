#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::Serialize;

use crate::value::{BindingRow, Bindings};

/// One argument of a `Write` statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteArg {
    /// literal text, escapes already resolved
    Literal(String),
    /// a constant or variable whose value is written
    Name(String),
}

/// What a statement does.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatementKind {
    /// `Write(args...);`
    Write {
        /// values to concatenate and print
        args: Vec<WriteArg>,
    },
    /// `Read(names...);`
    Read {
        /// variables to fill, in order
        names: Vec<String>,
    },
    /// `target = expression;`
    Assign {
        /// variable being assigned
        target:     String,
        /// expression source text
        expression: String,
        /// bindings the expression reads
        references: Vec<String>,
        /// compiled form of `expression`
        #[serde(skip)]
        ast:        rhai::AST,
    },
}

/// A checked statement of the algorithm body.
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    /// 1-based source line
    pub line: usize,
    /// the statement as written, without indentation
    pub text: String,
    /// what the statement does
    #[serde(flatten)]
    pub kind: StatementKind,
}

/// A fully checked program, ready to run.
#[derive(Debug, Clone, Serialize)]
pub struct Algorithm {
    /// name from the header line
    name:       String,
    /// declared constants and variables with their initial values
    bindings:   Bindings,
    /// body statements in source order
    statements: Vec<Statement>,
}

impl Algorithm {
    /// Assembles a checked algorithm.
    pub(crate) fn new(name: String, bindings: Bindings, statements: Vec<Statement>) -> Self {
        Self {
            name,
            bindings,
            statements,
        }
    }

    /// Name from the `Algorithm <name>;` header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared constants and variables with their initial values.
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Body statements in source order.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Table rows describing every binding.
    pub fn binding_rows(&self) -> Vec<BindingRow> {
        self.bindings.iter().map(BindingRow::from).collect()
    }
}
