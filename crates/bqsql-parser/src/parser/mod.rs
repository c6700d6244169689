//! Lexer, token cursor and diagnostics.
//!
//! ```text
//! Source text → Lexer → Tokens + Comments → Cursor → grammar rules → AST
//! ```
//!
//! - [`lexer`]: Logos-based tokenizer producing `Token { kind, span }` pairs.
//!   Tokens are zero-copy; text is sliced from source only when a rule reads it.
//! - [`cursor`]: index-based view over the significant tokens with
//!   save/restore, which the ordered-alternation grammar relies on.
//! - [`error`]: `SyntaxError` and its annotate-snippets rendering.
//!
//! # Error Handling
//!
//! Parsing stops at the first failure. There is no recovery and no partial
//! tree; callers handling several inputs report per input.

pub mod cursor;
pub mod error;
pub mod keywords;
pub mod lexer;
pub mod syntax_kind;

#[cfg(test)]
mod lexer_tests;

pub use cursor::{Cursor, Mark};
pub use error::{SyntaxError, render_errors};

/// Maximum nesting of expressions, queries and types. Input nested this deep
/// still parses on a 2 MiB thread stack in a debug build.
pub const MAX_DEPTH: u32 = 32;
