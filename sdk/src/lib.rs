//! vcl
//!
//! Parses VCL-style configuration text and decodes it into tagged Rust
//! records or into a dynamic [`Map`].
//!
//! - `parse` / `decode` / `from_str` / `from_path` / `to_json`
//! - `#[derive(Decode)]` with `#[vcl("name,kind")]` field tags, where `kind`
//!   is one of `attr` (the default), `block`, `label`, `flat` or `comment`
//! - `implied_body_schema` and `verify_content` for pre-flight checks
//!
//! ```
//! use vcl::Decode;
//!
//! #[derive(Debug, Default, Decode)]
//! struct Acl {
//!     #[vcl("type,label")]
//!     name:    String,
//!     #[vcl(",flat")]
//!     entries: Vec<String>,
//! }
//!
//! #[derive(Debug, Default, Decode)]
//! struct Config {
//!     #[vcl("x")]
//!     x:    i64,
//!     #[vcl("acl,block")]
//!     acls: Vec<Acl>,
//! }
//!
//! let mut config = Config::default();
//! vcl::from_str("x = 1;\nacl local { \"local\"; \"localhost\"; }", &mut config).unwrap();
//!
//! assert_eq!(config.x, 1);
//! assert_eq!(config.acls[0].name, "local");
//! assert_eq!(config.acls[0].entries, vec!["local", "localhost"]);
//! ```

extern crate self as vcl;

pub mod decode;
pub mod dynamic;
pub mod error;
pub mod implied;
pub mod verifier;

pub use decode::{Decode, FieldDescriptor, Target};
pub use error::{DecodeError, Error};
pub use implied::implied_body_schema;
pub use verifier::verify_content;
pub use vcl_derive::Decode;

pub use vcl_parser::ast::Program;
pub use vcl_parser::{ast, traversal, SyntaxError, Token, TokenKind};
pub use vcl_schema::{
    Attribute, AttributeSchema, Block, BlockHeaderSchema, BodyContent, BodySchema, FieldTag, Flat,
    Map, TagKind, Value,
};

use log::debug;

use std::path::Path;

/// Parses a document. Errors never stop parsing, so a best-effort program is
/// always returned next to them.
pub fn parse(text: &str) -> (Program, Vec<SyntaxError>) {
    vcl_parser::parse(text)
}

/// Extracts the program's root body and decodes it into `target`.
pub fn decode<T: Target + ?Sized>(program: &Program, target: &mut T) -> Vec<DecodeError> {
    let content = traversal::content(program);
    target.decode_content(&content)
}

/// Parses and decodes in one step. Syntax errors are reported before any
/// decoding is attempted.
pub fn from_str<T: Target + ?Sized>(text: &str, target: &mut T) -> Result<(), Error> {
    let (program, errors) = parse(text);
    if !errors.is_empty() {
        return Err(Error::Syntax(errors));
    }

    let errors = decode(&program, target);
    if !errors.is_empty() {
        return Err(Error::Decode(errors));
    }
    Ok(())
}

/// Reads a document from disk and decodes it into `target`.
pub fn from_path<T: Target + ?Sized, P: AsRef<Path>>(path: P, target: &mut T) -> Result<(), Error> {
    let path = path.as_ref();
    debug!("loading {}", path.display());
    let text = std::fs::read_to_string(path)?;
    from_str(&text, target)
}

/// Decode a document into a dynamic map and pretty-print it as JSON.
pub fn to_json(text: &str) -> Result<String, Error> {
    let mut map = Map::new();
    from_str(text, &mut map)?;
    Ok(serde_json::to_string_pretty(&map)?)
}
