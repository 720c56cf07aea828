//! Template files: one `name = pattern` definition per line.
//!
//! ```text
//! # comments start with '#'
//! digit    = [0-9]
//! user_id  = usr-$digit{6}
//! greeting = (hello|hi) $user_id
//! ```
//!
//! Each definition is compiled against the environment as it stands when
//! the line is read, optimized, and bound under its name. References are
//! resolved only at evaluation time, so a pattern may use a name defined on
//! a later line. Loading stops at the first bad line.

use crate::compiler::{compile, CompileError};
use crate::environment::Environment;
use crate::generators::Generator;
use crate::optimizer::optimize;
use crate::random::SourceFactory;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

// ============================================================================
// Error Types
// ============================================================================

/// Error type for template operations.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Error reading the template
    #[error("Failed to read template: {0}")]
    Io(#[from] std::io::Error),

    /// A line that is neither blank, a comment, nor a definition
    #[error("Line {line}: {kind}")]
    MalformedLine { line: usize, kind: LineError },

    /// A definition whose pattern does not compile
    #[error("Line {line}: invalid pattern for '{name}': {source}")]
    Pattern {
        line: usize,
        name: String,
        #[source]
        source: CompileError,
    },

    /// No definition with the requested name
    #[error("Generator not found: {0}")]
    GeneratorNotFound(String),
}

/// Ways a single line can fail to be a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("unexpected characters after variable name")]
    UnexpectedAfterName,

    #[error("line ended before a pattern was given")]
    MissingPattern,
}

// ============================================================================
// Line Parsing
// ============================================================================

/// One `name = pattern` line as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub pattern: String,
    /// 1-based line number; 0 for definitions added programmatically.
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    Start,
    Name,
    AfterName,
    BeforePattern,
}

fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Split one line into `(name, pattern)`.
///
/// Returns `Ok(None)` for blank and comment lines. The pattern runs to the
/// end of the line verbatim, apart from a trailing carriage return.
pub fn parse_line(line: &str) -> Result<Option<(String, String)>, LineError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut state = LineState::Start;
    let mut name = String::new();

    for (index, ch) in line.char_indices() {
        match state {
            LineState::Start => match ch {
                _ if is_blank(ch) => {}
                '#' => return Ok(None),
                _ => {
                    name.push(ch);
                    state = LineState::Name;
                }
            },
            LineState::Name => match ch {
                _ if is_blank(ch) => state = LineState::AfterName,
                '=' => state = LineState::BeforePattern,
                _ => name.push(ch),
            },
            LineState::AfterName => match ch {
                _ if is_blank(ch) => {}
                '=' => state = LineState::BeforePattern,
                _ => return Err(LineError::UnexpectedAfterName),
            },
            LineState::BeforePattern => {
                if !is_blank(ch) {
                    return Ok(Some((name, line[index..].to_string())));
                }
            }
        }
    }

    match state {
        LineState::Start => Ok(None),
        _ => Err(LineError::MissingPattern),
    }
}

// ============================================================================
// Template File
// ============================================================================

/// A loaded template: its definitions and the environment they compile into.
pub struct TemplateFile {
    environment: Environment,
    definitions: Vec<Definition>,
    sources: Box<dyn SourceFactory>,
}

impl TemplateFile {
    /// An empty template whose choice nodes draw from `sources`.
    pub fn new(sources: impl SourceFactory + 'static) -> Self {
        Self {
            environment: Environment::new(),
            definitions: Vec::new(),
            sources: Box::new(sources),
        }
    }

    /// Load a template from a file.
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        sources: impl SourceFactory + 'static,
    ) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading template file");
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), sources)
    }

    /// Load a template from any buffered reader.
    pub fn from_reader<R: BufRead>(
        reader: R,
        sources: impl SourceFactory + 'static,
    ) -> Result<Self, TemplateError> {
        let mut template = Self::new(sources);
        template.load(reader)?;
        Ok(template)
    }

    /// Load a template from in-memory text.
    pub fn from_text(text: &str, sources: impl SourceFactory + 'static) -> Result<Self, TemplateError> {
        Self::from_reader(text.as_bytes(), sources)
    }

    /// Read every line of `reader`, stopping at the first error.
    pub fn load<R: BufRead>(&mut self, reader: R) -> Result<(), TemplateError> {
        for (index, line) in reader.lines().enumerate() {
            self.read_line(&line?, index + 1)?;
        }
        info!(
            definitions = self.definitions.len(),
            generators = self.environment.len(),
            "loaded template"
        );
        Ok(())
    }

    /// Process one line; `line_number` is used in errors only.
    pub fn read_line(&mut self, line: &str, line_number: usize) -> Result<(), TemplateError> {
        let Some((name, pattern)) = parse_line(line).map_err(|kind| TemplateError::MalformedLine {
            line: line_number,
            kind,
        })?
        else {
            return Ok(());
        };

        self.define_at(name, pattern, line_number)
    }

    /// Compile `pattern` and bind it under `name`, replacing any earlier
    /// definition.
    pub fn define(&mut self, name: impl Into<String>, pattern: impl Into<String>) -> Result<(), TemplateError> {
        self.define_at(name.into(), pattern.into(), 0)
    }

    fn define_at(&mut self, name: String, pattern: String, line: usize) -> Result<(), TemplateError> {
        let generator = self
            .compile(&pattern)
            .map_err(|source| TemplateError::Pattern {
                line,
                name: name.clone(),
                source,
            })?;

        debug!(%name, %pattern, nodes = generator.node_count(), "defined generator");
        if self.environment.define(name.clone(), generator).is_some() {
            debug!(%name, "redefined generator");
        }
        self.definitions.push(Definition {
            name,
            pattern,
            line,
        });
        Ok(())
    }

    /// Compile and optimize `pattern` against this template's environment
    /// without binding it.
    pub fn compile(&mut self, pattern: &str) -> Result<Generator, CompileError> {
        let mut generator = compile(pattern, &self.environment, self.sources.as_mut())?;
        optimize(&mut generator);
        Ok(generator)
    }

    /// Definitions in the order they were read, redefinitions included.
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Evaluate the generator bound to `name`.
    pub fn generate(&self, name: &str) -> Result<String, TemplateError> {
        self.environment
            .generate(name)
            .ok_or_else(|| TemplateError::GeneratorNotFound(name.to_string()))
    }

    /// Structural description of the generator bound to `name`.
    pub fn describe(&self, name: &str) -> Result<String, TemplateError> {
        self.environment
            .with(name, Generator::to_string)
            .ok_or_else(|| TemplateError::GeneratorNotFound(name.to_string()))
    }
}

impl fmt::Debug for TemplateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateFile")
            .field("environment", &self.environment)
            .field("definitions", &self.definitions)
            .finish_non_exhaustive()
    }
}
