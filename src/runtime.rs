#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::io::{BufRead, Write};

use rhai::{AST, Engine};
use tracing::{debug, trace};

use crate::{
    algorithm::{Statement, StatementKind, WriteArg},
    error::{InterpretError, RuntimeError},
    expression,
    scanner::InputScanner,
    value::{Bindings, DataType, Value},
};

/// Executes the statements of a checked algorithm against an input and an
/// output stream.
pub struct Runtime<'e, R, W> {
    /// engine used for assignment expressions
    engine:   &'e Engine,
    /// current state of every constant and variable
    bindings: Bindings,
    /// source of `Read` values
    input:    InputScanner<R>,
    /// sink for `Write` output
    output:   W,
}

impl<'e, R: BufRead, W: Write> Runtime<'e, R, W> {
    /// Creates a runtime starting from `bindings`.
    pub fn new(engine: &'e Engine, bindings: Bindings, input: R, output: W) -> Self {
        Self {
            engine,
            bindings,
            input: InputScanner::new(input),
            output,
        }
    }

    /// Runs `statements` in order, stopping at the first failure.
    pub fn execute(mut self, statements: &[Statement]) -> Result<Bindings, InterpretError> {
        for statement in statements {
            debug!("line {}: {}", statement.line, statement.text);
            self.step(statement)
                .map_err(|error| InterpretError::Runtime {
                    line: statement.line,
                    text: statement.text.clone(),
                    error,
                })?;
        }
        Ok(self.bindings)
    }

    /// Runs a single statement.
    fn step(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
        match &statement.kind {
            StatementKind::Write { args } => self.write(args),
            StatementKind::Read { names } => names.iter().try_for_each(|name| self.read(name)),
            StatementKind::Assign {
                target,
                references,
                ast,
                ..
            } => self.assign(target, references, ast),
        }
    }

    /// Returns the value of `name` or an error if nothing was assigned yet.
    fn value_of(&self, name: &str) -> Result<&Value, RuntimeError> {
        self.bindings
            .value(name)
            .ok_or_else(|| RuntimeError::Unassigned(name.to_string()))
    }

    /// Concatenates `args` and writes them without a trailing newline.
    fn write(&mut self, args: &[WriteArg]) -> Result<(), RuntimeError> {
        let text = args
            .iter()
            .map(|arg| match arg {
                WriteArg::Literal(s) => Ok(s.clone()),
                WriteArg::Name(name) => self.value_of(name).map(Value::to_string),
            })
            .collect::<Result<Vec<_>, _>>()?
            .concat();

        self.output
            .write_all(text.as_bytes())
            .map_err(RuntimeError::Output)?;
        // prompts must be visible before the next Read blocks
        self.output.flush().map_err(RuntimeError::Output)
    }

    /// Reads one value for `name` from the input.
    fn read(&mut self, name: &str) -> Result<(), RuntimeError> {
        let data_type = self
            .bindings
            .get(name)
            .map(|b| b.data_type)
            .ok_or_else(|| RuntimeError::Unassigned(name.to_string()))?;

        let value = match data_type {
            DataType::String => self
                .input
                .next_line()
                .map_err(RuntimeError::Input)?
                .map(Value::String)
                .ok_or_else(|| RuntimeError::EndOfInput(name.to_string()))?,
            DataType::Integer | DataType::Real => {
                let token = self
                    .input
                    .next_token()
                    .map_err(RuntimeError::Input)?
                    .ok_or_else(|| RuntimeError::EndOfInput(name.to_string()))?;
                parse_token(name, data_type, token)?
            }
        };

        trace!("read {name} = {value}");
        self.bindings.assign(name, value);
        Ok(())
    }

    /// Evaluates an assignment and stores the result.
    fn assign(&mut self, target: &str, references: &[String], ast: &AST) -> Result<(), RuntimeError> {
        for name in references {
            self.value_of(name)?;
        }

        let data_type = self
            .bindings
            .get(target)
            .map(|b| b.data_type)
            .ok_or_else(|| RuntimeError::Unassigned(target.to_string()))?;

        let value = expression::evaluate(self.engine, ast, &self.bindings, target, data_type)?;
        self.bindings.assign(target, value);
        Ok(())
    }
}

/// Parses an input token as a number of `data_type`.
fn parse_token(name: &str, data_type: DataType, token: String) -> Result<Value, RuntimeError> {
    let parsed = match data_type {
        DataType::Integer => token.parse::<i64>().ok().map(Value::Integer),
        DataType::Real => token.parse::<f64>().ok().map(Value::Real),
        DataType::String => Some(Value::String(token.clone())),
    };

    parsed.ok_or(RuntimeError::BadInput {
        name: name.to_string(),
        expected: data_type,
        input: token,
    })
}
