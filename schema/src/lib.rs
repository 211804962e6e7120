//! Data types shared by the VCL parser and decoder.
//!
//! A parsed document is extracted into a tree of [BodyContent] values, one per
//! nesting level. Each level buckets its statements into attributes, blocks,
//! flat entries and comments:
//!
//! ```
//! use vcl_schema::*;
//!
//! let mut content = BodyContent::default();
//! content.attributes.insert("x".to_owned(), Attribute { name: "x".to_owned(), value: Value::Int(1) });
//! content.flats.push(Flat::Scalar(Value::from("localhost")));
//!
//! assert_eq!(content.attributes["x"].value.as_int(), 1);
//! assert_eq!(format!("{:?}", content.flats[0]), "Scalar(\"localhost\")");
//! ```

pub mod body;
pub mod schema;
pub mod tag;
pub mod value;

pub use body::*;
pub use schema::*;
pub use tag::*;
pub use value::*;
