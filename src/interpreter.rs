#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    io::{BufRead, Write},
    path::Path,
};

use itertools::Itertools;
use rhai::Engine;
use tracing::{debug, info};

use crate::{
    algorithm::{Algorithm, Statement, StatementKind, WriteArg},
    config::Config,
    constants::{
        ALGORITHM_PREFIX, BEGIN_KEYWORD, CONSTANTS_KEYWORD, END_KEYWORD, VARIABLES_KEYWORD,
    },
    error::{InterpretError, LineError},
    expression,
    parsers::{RawWriteArg, parser},
    runtime::Runtime,
    source::{Source, SourceLine},
    value::{Binding, Bindings, DataType, tokenize, unescape_literal},
};

/// The declaration section a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// lines after `Constants`
    Constants,
    /// lines after `Variables`
    Variables,
}

/// Where the checker is in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// waiting for `Algorithm <name>;`
    Header,
    /// between the header and `Begin`, possibly inside a section
    Declarations(Option<Section>),
    /// between `Begin` and `End`
    Body,
    /// after `End`
    Done,
}

/// Wraps a line-level error with the line it happened on.
fn at(line: &SourceLine, error: LineError) -> InterpretError {
    InterpretError::AtLine {
        line: line.number,
        text: line.raw.clone(),
        error,
    }
}

/// Checks Algo source into an [`Algorithm`] and runs it.
pub struct Interpreter {
    /// indentation and engine limits
    config: Config,
    /// expression engine shared by checking and running
    engine: Engine,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Interpreter {
    /// Creates an interpreter using `config`.
    pub fn new(config: Config) -> Self {
        let engine = expression::create_engine(&config);
        Self { config, engine }
    }

    /// Reads and checks the file at `path`.
    pub fn check_file(&self, path: &Path) -> Result<Algorithm, InterpretError> {
        let source = Source::read(path)?;
        self.check(&source)
    }

    /// Checks a program held in memory.
    pub fn check_str(&self, code: &str) -> Result<Algorithm, InterpretError> {
        self.check(&Source::parse(code))
    }

    /// Validates the structure of `source` and builds the algorithm it
    /// describes. Nothing is executed.
    pub fn check(&self, source: &Source) -> Result<Algorithm, InterpretError> {
        if source.is_empty() {
            return Err(InterpretError::EmptyFile);
        }

        let lines = source.lines();
        if !lines.iter().any(|l| l.text.starts_with(ALGORITHM_PREFIX)) {
            return Err(InterpretError::MissingAlgorithm);
        }
        if !lines.iter().any(|l| l.text == BEGIN_KEYWORD) {
            return Err(InterpretError::MissingBegin);
        }

        let mut state = State::Header;
        let mut name = String::new();
        let mut bindings = Bindings::new();
        let mut statements = Vec::new();
        let mut seen_constants = false;
        let mut seen_variables = false;

        for line in lines {
            let text = line.text.as_str();

            match state {
                State::Header => {
                    if line.is_blank() {
                        continue;
                    }
                    name = self.header(line)?;
                    debug!("algorithm `{name}` declared on line {}", line.number);
                    state = State::Declarations(None);
                }
                State::Declarations(section) => {
                    if line.is_blank() {
                        state = State::Declarations(None);
                        continue;
                    }
                    if text.starts_with(ALGORITHM_PREFIX) {
                        return Err(at(line, LineError::AlgorithmNotFirst));
                    }

                    match text {
                        CONSTANTS_KEYWORD => {
                            if seen_constants {
                                return Err(at(line, LineError::DuplicateKeyword(CONSTANTS_KEYWORD)));
                            }
                            seen_constants = true;
                            state = State::Declarations(Some(Section::Constants));
                        }
                        VARIABLES_KEYWORD => {
                            if seen_variables {
                                return Err(at(line, LineError::DuplicateKeyword(VARIABLES_KEYWORD)));
                            }
                            seen_variables = true;
                            state = State::Declarations(Some(Section::Variables));
                        }
                        BEGIN_KEYWORD => state = State::Body,
                        _ => match section {
                            Some(section) => self.declaration(line, section, &mut bindings)?,
                            None => return Err(at(line, LineError::OutsideSection)),
                        },
                    }
                }
                State::Body => {
                    if line.is_blank() {
                        continue;
                    }
                    if text.eq_ignore_ascii_case(END_KEYWORD) {
                        state = State::Done;
                        continue;
                    }
                    if text == BEGIN_KEYWORD {
                        return Err(at(line, LineError::DuplicateKeyword(BEGIN_KEYWORD)));
                    }
                    statements.push(self.statement(line, &bindings)?);
                }
                State::Done => {
                    if !line.is_blank() {
                        return Err(at(line, LineError::AfterEnd));
                    }
                }
            }
        }

        if state != State::Done {
            return Err(InterpretError::MissingEnd);
        }

        info!(
            "checked `{name}`: {} bindings, {} statements",
            bindings.len(),
            statements.len()
        );
        Ok(Algorithm::new(name, bindings, statements))
    }

    /// Executes a checked algorithm, reading from `input` and writing to
    /// `output`. Returns the bindings as they stand after the last statement.
    pub fn run<R: BufRead, W: Write>(
        &self,
        algorithm: &Algorithm,
        input: R,
        output: W,
    ) -> Result<Bindings, InterpretError> {
        info!("running `{}`", algorithm.name());
        Runtime::new(&self.engine, algorithm.bindings().clone(), input, output)
            .execute(algorithm.statements())
    }

    /// Checks `code` and runs it in one go.
    pub fn run_str<R: BufRead, W: Write>(
        &self,
        code: &str,
        input: R,
        output: W,
    ) -> Result<Bindings, InterpretError> {
        let algorithm = self.check_str(code)?;
        self.run(&algorithm, input, output)
    }

    /// Parses the header line and returns the algorithm name.
    fn header(&self, line: &SourceLine) -> Result<String, InterpretError> {
        let text = line.text.as_str();
        if !text.starts_with(ALGORITHM_PREFIX) {
            return Err(at(line, LineError::HeaderNotFirst));
        }
        if !text.ends_with(';') {
            return Err(at(line, LineError::MissingHeaderSemicolon));
        }

        let written = &text[ALGORITHM_PREFIX.len()..text.len() - 1];
        let name = parser::header(text)
            .map_err(|_| at(line, LineError::InvalidAlgorithmName(written.to_string())))?;

        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(at(line, LineError::InvalidAlgorithmName(name.to_string())));
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(at(line, LineError::NameStartsWithNumber));
        }

        Ok(name.to_string())
    }

    /// Returns an error unless `line` is indented by exactly the configured
    /// width.
    fn expect_indent(&self, line: &SourceLine) -> Result<(), InterpretError> {
        let found = line.indent();
        let expected = self.config.indent();
        if found != expected {
            return Err(at(line, LineError::Indentation { expected, found }));
        }
        Ok(())
    }

    /// Parses one declaration and adds it to `bindings`.
    fn declaration(
        &self,
        line: &SourceLine,
        section: Section,
        bindings: &mut Bindings,
    ) -> Result<(), InterpretError> {
        self.expect_indent(line)?;

        let text = line.text.trim();
        if !text.contains(':') || !text.contains(';') {
            return Err(at(line, LineError::InvalidFormat));
        }

        let raw = parser::declaration(text).map_err(|_| at(line, LineError::InvalidFormat))?;
        if parser::identifier(raw.name).is_err() {
            return Err(at(line, LineError::InvalidVariableName(raw.name.to_string())));
        }
        if bindings.contains(raw.name) {
            return Err(at(line, LineError::DuplicateName(raw.name.to_string())));
        }

        let data_type = DataType::from_name(raw.type_name)
            .ok_or_else(|| at(line, LineError::InvalidDataType(raw.type_name.to_string())))?;

        let value = match raw.value {
            Some("") => return Err(at(line, LineError::NotIdentified)),
            Some(literal) => {
                Some(tokenize(data_type, literal).map_err(|e| at(line, LineError::Tokenize(e)))?)
            }
            None => None,
        };

        let binding = match section {
            Section::Constants => {
                let value = value.ok_or_else(|| {
                    at(line, LineError::UninitializedConstant(raw.name.to_string()))
                })?;
                Binding::constant(raw.name, value)
            }
            Section::Variables => Binding::variable(raw.name, data_type, value),
        };

        debug!("declared {:?} on line {}", binding, line.number);
        bindings.declare(binding);
        Ok(())
    }

    /// Parses one body statement and checks every name it uses against
    /// `bindings`.
    fn statement(&self, line: &SourceLine, bindings: &Bindings) -> Result<Statement, InterpretError> {
        self.expect_indent(line)?;

        let text = line.text.trim_start();
        if !text.ends_with(';') {
            return Err(at(line, LineError::MissingSemicolon));
        }

        let kind = if let Ok((target, expression)) = parser::assignment(text) {
            self.assignment(line, bindings, target, expression)?
        } else if let Ok(args) = parser::write_call(text) {
            let args = args
                .into_iter()
                .map(|arg| match arg {
                    RawWriteArg::Literal(literal) => unescape_literal(literal)
                        .map(WriteArg::Literal)
                        .map_err(|e| at(line, LineError::Tokenize(e))),
                    RawWriteArg::Name(name) if bindings.contains(name) => {
                        Ok(WriteArg::Name(name.to_string()))
                    }
                    RawWriteArg::Name(name) => {
                        Err(at(line, LineError::InvalidVariable(name.to_string())))
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            StatementKind::Write { args }
        } else if let Ok(names) = parser::read_call(text) {
            for name in &names {
                match bindings.get(name) {
                    None => return Err(at(line, LineError::InvalidVariable(name.to_string()))),
                    Some(b) if b.constant => {
                        return Err(at(line, LineError::ReadConstant(name.to_string())));
                    }
                    Some(_) => {}
                }
            }
            StatementKind::Read {
                names: names.into_iter().map(str::to_string).collect(),
            }
        } else {
            return Err(at(line, LineError::InvalidStatement));
        };

        Ok(Statement {
            line: line.number,
            text: text.to_string(),
            kind,
        })
    }

    /// Checks an assignment and compiles its expression.
    fn assignment(
        &self,
        line: &SourceLine,
        bindings: &Bindings,
        target: &str,
        expression: &str,
    ) -> Result<StatementKind, InterpretError> {
        match bindings.get(target) {
            None => return Err(at(line, LineError::UndefinedVariable(target.to_string()))),
            Some(b) if b.constant => {
                return Err(at(line, LineError::ModifyingConstant(target.to_string())));
            }
            Some(_) => {}
        }

        let ast = expression::compile(&self.engine, expression)
            .map_err(|e| at(line, LineError::InvalidExpression(e)))?;

        let references = parser::references(expression)
            .map_err(|e| at(line, LineError::InvalidExpression(e.to_string())))?
            .into_iter()
            .unique()
            .map(str::to_string)
            .collect::<Vec<_>>();

        if let Some(unknown) = references.iter().find(|r| !bindings.contains(r)) {
            return Err(at(line, LineError::UndefinedVariable(unknown.clone())));
        }

        Ok(StatementKind::Assign {
            target: target.to_string(),
            expression: expression.to_string(),
            references,
            ast,
        })
    }
}
