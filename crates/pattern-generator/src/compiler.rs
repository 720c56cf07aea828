//! Pattern compiler.
//!
//! Turns one pattern string into a generator tree with a single left-to-right
//! pass. The compiler is a small state machine:
//!
//! ```text
//!            '['            '\'
//!   Default ─────▶ CharClass ───▶ Escape
//!    │  │  ▲          ']'          │
//!    │  │  └───────────────────────┘ (one char, then back)
//!    │  │ '$'
//!    │  └────▶ VariableName   (first non-name char is reprocessed)
//!    │ '{'
//!    └───────▶ RepetitionSpec (rewraps the previous node on '}')
//! ```
//!
//! Entering a context saves the current state on a stack and leaving it
//! restores the saved one. Groups save `Default` as well, so a `)` returns
//! to whatever state was active before the matching `(`.
//!
//! Nodes are collected in frames. Each frame holds the finished branches of
//! one alternation and the branch currently being built; the top level is
//! an implicit group, so the result is always an [`Alternation`] of
//! [`Series`], even for patterns without `|`.

use crate::environment::Environment;
use crate::generators::{Alternation, CharClass, Constant, Generator, Repetition, Series, Variable};
use crate::random::SourceFactory;
use std::mem;
use tracing::trace;

/// Reasons a pattern is rejected.
///
/// Offsets count characters from the start of the pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// `)` without a matching `(`
    #[error("unmatched ')' at offset {offset}")]
    UnmatchedGroupClose { offset: usize },

    /// `(` still open at the end of the pattern
    #[error("{open} group(s) left open at end of pattern")]
    UnclosedGroup { open: usize },

    /// Anything but digits, `,` and `}` inside `{...}`
    #[error("unexpected {found:?} in repetition bounds at offset {offset}")]
    InvalidRepetitionChar { offset: usize, found: char },

    /// `{a,b,c}`
    #[error("repetition at offset {offset} has more than two bounds")]
    TooManyBounds { offset: usize },

    /// `{5,2}`
    #[error("repetition at offset {offset} has min {min} greater than max {max}")]
    InvertedBounds { offset: usize, min: u32, max: u32 },

    /// A bound that does not fit in `u32`
    #[error("repetition bound at offset {offset} is too large")]
    BoundTooLarge { offset: usize },

    /// `{` with no preceding node in the current branch
    #[error("repetition at offset {offset} has nothing to repeat")]
    NothingToRepeat { offset: usize },

    /// End of pattern inside `{...}`
    #[error("repetition at offset {offset} is never closed")]
    UnterminatedRepetition { offset: usize },

    /// Pattern ends with `\`
    #[error("pattern ends with a dangling escape")]
    DanglingEscape,

    /// `$` followed by a non-name character
    #[error("'$' at offset {offset} is not followed by a variable name")]
    EmptyVariableName { offset: usize },
}

/// Compile `pattern` into a tree rooted at an [`Alternation`].
///
/// Variable references bind to `environment` weakly and are resolved when
/// the tree is evaluated; the environment itself is never modified. Every
/// choice node gets its own source from `sources`.
pub fn compile(
    pattern: &str,
    environment: &Environment,
    sources: &mut dyn SourceFactory,
) -> Result<Generator, CompileError> {
    let tree = PatternCompiler::new(environment, sources).compile(pattern)?;
    trace!(pattern, tree = %tree, "compiled pattern");
    Ok(tree)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    CharClass,
    VariableName,
    RepetitionSpec,
    Escape,
}

/// Nodes collected for one alternation.
#[derive(Debug, Default)]
struct Frame {
    /// Finished branches, each already wrapped in a [`Series`].
    branches: Vec<Generator>,
    /// The branch being built.
    current: Vec<Generator>,
}

/// Working state for compiling one pattern.
pub struct PatternCompiler<'a> {
    environment: &'a Environment,
    sources: &'a mut dyn SourceFactory,

    state: State,
    saved: Vec<State>,

    frame: Frame,
    enclosing: Vec<Frame>,

    offset: usize,
    /// Pending literal run in `Default`.
    text: String,
    name: String,
    name_start: usize,
    digits: String,
    bounds: Vec<u32>,
    repetition_start: usize,
    charset: Vec<char>,
    range_pending: bool,
}

impl<'a> PatternCompiler<'a> {
    pub fn new(environment: &'a Environment, sources: &'a mut dyn SourceFactory) -> Self {
        Self {
            environment,
            sources,
            state: State::Default,
            saved: Vec::new(),
            frame: Frame::default(),
            enclosing: Vec::new(),
            offset: 0,
            text: String::new(),
            name: String::new(),
            name_start: 0,
            digits: String::new(),
            bounds: Vec::new(),
            repetition_start: 0,
            charset: Vec::new(),
            range_pending: false,
        }
    }

    pub fn compile(mut self, pattern: &str) -> Result<Generator, CompileError> {
        for (offset, ch) in pattern.chars().enumerate() {
            self.offset = offset;
            self.process(ch)?;
        }
        self.offset = pattern.chars().count();
        self.finish()
    }

    fn enter(&mut self, state: State) {
        self.saved.push(self.state);
        self.state = state;
    }

    fn restore(&mut self) {
        self.state = self.saved.pop().unwrap_or(State::Default);
    }

    fn process(&mut self, ch: char) -> Result<(), CompileError> {
        match self.state {
            State::Default => self.default_char(ch),
            State::CharClass => {
                self.class_char(ch);
                Ok(())
            }
            State::VariableName => {
                if is_name_char(ch) {
                    self.name.push(ch);
                    Ok(())
                } else {
                    self.flush_variable()?;
                    self.restore();
                    self.process(ch)
                }
            }
            State::RepetitionSpec => self.repetition_char(ch),
            State::Escape => {
                self.restore();
                if self.state == State::CharClass {
                    self.charset.push(ch);
                    self.range_pending = false;
                } else {
                    self.text.push(ch);
                }
                Ok(())
            }
        }
    }

    fn default_char(&mut self, ch: char) -> Result<(), CompileError> {
        match ch {
            '\\' => self.enter(State::Escape),
            '$' => {
                self.flush_text();
                self.name_start = self.offset;
                self.enter(State::VariableName);
            }
            '(' => {
                self.flush_text();
                self.enter(State::Default);
                self.enclosing.push(mem::take(&mut self.frame));
            }
            ')' => {
                self.flush_text();
                let outer = self
                    .enclosing
                    .pop()
                    .ok_or(CompileError::UnmatchedGroupClose {
                        offset: self.offset,
                    })?;
                self.close_branch();
                let group = mem::replace(&mut self.frame, outer);
                let alternation = self.alternation(group.branches);
                self.frame.current.push(alternation);
                self.restore();
            }
            '{' => {
                self.flush_text();
                self.repetition_start = self.offset;
                self.enter(State::RepetitionSpec);
            }
            '[' => {
                self.flush_text();
                self.enter(State::CharClass);
            }
            '|' => {
                self.flush_text();
                self.close_branch();
            }
            _ => self.text.push(ch),
        }
        Ok(())
    }

    fn class_char(&mut self, ch: char) {
        match ch {
            '\\' => self.enter(State::Escape),
            '-' => self.range_pending = true,
            ']' => {
                self.restore();
                self.flush_class();
            }
            _ if self.range_pending => {
                self.range_pending = false;
                match self.charset.last().copied() {
                    Some(from) if from < ch => self.charset.extend((from..=ch).skip(1)),
                    // A reversed range is dropped whole, start included.
                    Some(from) => {
                        self.charset.pop();
                        trace!(%from, to = %ch, offset = self.offset, "dropping reversed range");
                    }
                    // A leading '-' has no start, so the char stands alone.
                    None => self.charset.push(ch),
                }
            }
            _ => self.charset.push(ch),
        }
    }

    fn repetition_char(&mut self, ch: char) -> Result<(), CompileError> {
        match ch {
            '0'..='9' => self.digits.push(ch),
            ',' | '}' => {
                let bound = if self.digits.is_empty() {
                    0
                } else {
                    self.digits
                        .parse::<u32>()
                        .map_err(|_| CompileError::BoundTooLarge {
                            offset: self.offset,
                        })?
                };
                self.digits.clear();
                self.bounds.push(bound);
                if self.bounds.len() > 2 {
                    return Err(CompileError::TooManyBounds {
                        offset: self.repetition_start,
                    });
                }
                if ch == '}' {
                    self.close_repetition()?;
                }
            }
            found => {
                return Err(CompileError::InvalidRepetitionChar {
                    offset: self.offset,
                    found,
                })
            }
        }
        Ok(())
    }

    fn close_repetition(&mut self) -> Result<(), CompileError> {
        let offset = self.repetition_start;
        let (min, max) = match self.bounds[..] {
            [exact] => (exact, exact),
            [min, max] => (min, max),
            _ => return Err(CompileError::TooManyBounds { offset }),
        };
        self.bounds.clear();
        if min > max {
            return Err(CompileError::InvertedBounds { offset, min, max });
        }
        let child = self
            .frame
            .current
            .pop()
            .ok_or(CompileError::NothingToRepeat { offset })?;
        let repetition = Repetition::new(min, max, child, self.sources.source());
        self.frame.current.push(repetition.into());
        self.restore();
        Ok(())
    }

    /// Handle end of input in whatever context is still open.
    fn finish(mut self) -> Result<Generator, CompileError> {
        loop {
            match self.state {
                State::Default => break,
                State::Escape => return Err(CompileError::DanglingEscape),
                State::RepetitionSpec => {
                    return Err(CompileError::UnterminatedRepetition {
                        offset: self.repetition_start,
                    })
                }
                State::VariableName => {
                    self.flush_variable()?;
                    self.restore();
                }
                // An unclosed class still counts as a class.
                State::CharClass => {
                    self.restore();
                    self.flush_class();
                }
            }
        }

        self.flush_text();
        if !self.enclosing.is_empty() {
            return Err(CompileError::UnclosedGroup {
                open: self.enclosing.len(),
            });
        }
        self.close_branch();
        let branches = mem::take(&mut self.frame.branches);
        Ok(self.alternation(branches))
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = mem::take(&mut self.text);
            self.frame.current.push(Constant::new(text).into());
        }
    }

    fn flush_class(&mut self) {
        let chars = mem::take(&mut self.charset);
        self.range_pending = false;
        let class = CharClass::new(chars, self.sources.source());
        self.frame.current.push(class.into());
    }

    fn flush_variable(&mut self) -> Result<(), CompileError> {
        if self.name.is_empty() {
            return Err(CompileError::EmptyVariableName {
                offset: self.name_start,
            });
        }
        let name = mem::take(&mut self.name);
        let variable = Variable::new(name, self.environment.downgrade());
        self.frame.current.push(variable.into());
        Ok(())
    }

    /// Move the current branch into the frame's branch list as a series.
    fn close_branch(&mut self) {
        let children = mem::take(&mut self.frame.current);
        self.frame.branches.push(Series::new(children).into());
    }

    fn alternation(&mut self, branches: Vec<Generator>) -> Generator {
        Alternation::new(branches, self.sources.source()).into()
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
