//! vcl-parser
//!
//! This crate implements:
//!  1) A byte-oriented scanner (`Lexer`) for VCL-style configuration text,
//!  2) The AST and a Pratt parser that collects `SyntaxError`s instead of aborting,
//!  3) The body-content extractor (`traversal`) turning a `Program` into a
//!     `vcl_schema::BodyContent` tree.
//!
//! ```
//! let (program, errors) = vcl_parser::parse("acl local { \"localhost\"; }");
//! assert!(errors.is_empty());
//!
//! let content = vcl_parser::traversal::content(&program);
//! assert_eq!(content.blocks[0].block_type, "acl");
//! assert_eq!(content.blocks[0].labels, vec!["local"]);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod traversal;

pub use error::SyntaxError;
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, Parser};
pub use token::{Token, TokenKind};
