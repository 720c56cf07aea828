//! Randomized text from regex-like templates.
//!
//! This crate compiles a small pattern language into trees of generator
//! nodes. Evaluating a tree produces random text that satisfies the pattern:
//! literal runs, character classes, bounded repetition, alternation,
//! grouping and references to other named patterns.
//!
//! # Architecture
//!
//! ```text
//! template line "name = pattern"
//!        │
//!        ▼
//! ┌──────────────────┐     ┌──────────────┐
//! │ PatternCompiler  │◀────│ SourceFactory│  one RandomSource per choice node
//! └────────┬─────────┘     └──────────────┘
//!          │ Generator tree (alt → seq → ...)
//!          ▼
//!      optimize()
//!          │
//!          ▼
//!    Environment[name]  ◀── weak handles from $references
//! ```
//!
//! # Example
//!
//! ```rust
//! use pattern_generator::{SeededSources, TemplateFile};
//!
//! let template = TemplateFile::from_text(
//!     r#"
//! digit = [0-9]
//! order = ORD-$digit{4}(-[A-Z]{2}|)
//! "#,
//!     SeededSources::new(42),
//! )
//! .unwrap();
//!
//! let id = template.generate("order").unwrap();
//! assert!(id.starts_with("ORD-"));
//! ```
//!
//! # Pattern syntax
//!
//! - `abc` - literal text; `\` escapes any special character
//! - `[a-z_]` - one character from the class
//! - `(ab|cd)` - one of the branches
//! - `x{3}`, `x{2,5}`, `x{,2}` - repetition of the previous atom
//! - `$name` - the generator bound to `name`, resolved when evaluated

pub mod compiler;
pub mod environment;
pub mod generators;
pub mod optimizer;
pub mod random;
pub mod template;

// Re-exports for convenience
pub use compiler::{compile, CompileError, PatternCompiler};
pub use environment::{Environment, WeakEnvironment};
pub use generators::{Generate, Generator};
pub use optimizer::optimize;
pub use random::{
    Counter, CountingSources, EntropySource, EntropySources, RandomSource, SeededSource,
    SeededSources, SourceFactory,
};
pub use template::{Definition, LineError, TemplateError, TemplateFile};
