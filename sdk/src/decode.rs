//! Record decoding.
//!
//! `#[derive(Decode)]` generates a [`Decode`] impl whose `decode_body` calls
//! one helper of this module per tagged field. The field's Rust type selects
//! the behavior through the [`AttrField`], [`BlockField`] and [`FlatElem`]
//! traits, so shapes the decoder cannot handle fail to compile.

use crate::error::DecodeError;

use log::debug;
use vcl_schema::{Attribute, Block, BodyContent, FieldTag, Flat, Value};

/// One tagged field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field:       &'static str,
    pub tag:         FieldTag,
    /// Only meaningful for attributes: the field is an `Option`.
    pub optional:    bool,
    /// Only meaningful for blocks: label names of the nested record.
    pub label_names: Vec<String>,
}

impl FieldDescriptor {
    pub fn new(field: &'static str, tag: FieldTag) -> Self {
        FieldDescriptor {
            field,
            tag,
            optional: false,
            label_names: Vec::new(),
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn label_names(mut self, label_names: Vec<String>) -> Self {
        self.label_names = label_names;
        self
    }
}

/// A record with tagged fields. Implemented by `#[derive(Decode)]`.
pub trait Decode: Default {
    /// Every tagged field, in declaration order.
    fn fields() -> Vec<FieldDescriptor>;

    /// Names of the label-tagged fields, in declaration order.
    fn label_names() -> Vec<String>;

    /// Fills `self` from one body and the labels of the block header that
    /// introduced it. Data errors are appended to `errors`.
    fn decode_body(&mut self, content: &BodyContent, labels: &[String], errors: &mut Vec<DecodeError>);
}

/// Anything a document root can be decoded into: a derived record or a
/// dynamic [`Map`](vcl_schema::Map).
pub trait Target {
    fn decode_content(&mut self, content: &BodyContent) -> Vec<DecodeError>;
}

impl<T: Decode> Target for T {
    fn decode_content(&mut self, content: &BodyContent) -> Vec<DecodeError> {
        let mut errors = Vec::new();
        self.decode_body(content, &[], &mut errors);
        errors
    }
}

/// Decodes a fresh record from one body.
pub fn decode_record<T: Decode>(
    content: &BodyContent,
    labels: &[String],
    errors: &mut Vec<DecodeError>,
) -> T {
    let mut record = T::default();
    record.decode_body(content, labels, errors);
    record
}

fn push_error(errors: &mut Vec<DecodeError>, err: DecodeError) {
    debug!("{}", err);
    errors.push(err);
}

/// Types an attribute value can be assigned to.
pub trait AttrField: Sized {
    /// Whether a missing attribute is expected (used by schema inference).
    const OPTIONAL: bool = false;

    /// `None` when the value does not fit the type.
    fn from_attribute(attr: &Attribute) -> Option<Self>;
}

impl AttrField for String {
    fn from_attribute(attr: &Attribute) -> Option<Self> {
        match attr.value {
            Value::String(ref value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl AttrField for bool {
    fn from_attribute(attr: &Attribute) -> Option<Self> {
        match attr.value {
            Value::Bool(value) => Some(value),
            _ => None,
        }
    }
}

impl AttrField for Value {
    fn from_attribute(attr: &Attribute) -> Option<Self> {
        Some(attr.value.clone())
    }
}

/// The raw wrapper takes any value.
impl AttrField for Attribute {
    fn from_attribute(attr: &Attribute) -> Option<Self> {
        Some(attr.clone())
    }
}

impl<T: AttrField> AttrField for Option<T> {
    const OPTIONAL: bool = true;

    fn from_attribute(attr: &Attribute) -> Option<Self> {
        T::from_attribute(attr).map(Some)
    }
}

macro_rules! impl_integer_fields {
    ($($ty:ty),*) => {
        $(
            impl AttrField for $ty {
                fn from_attribute(attr: &Attribute) -> Option<Self> {
                    match attr.value {
                        Value::Int(value) => <$ty>::try_from(value).ok(),
                        _ => None,
                    }
                }
            }

            impl FlatElem for $ty {
                fn from_flat(flat: &Flat, _errors: &mut Vec<DecodeError>) -> Option<Self> {
                    match flat {
                        Flat::Scalar(Value::Int(value)) => <$ty>::try_from(*value).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_integer_fields!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

/// Absent attributes reset the field to its default. Present values that do
/// not fit the field type leave it untouched.
pub fn decode_attribute<T: AttrField + Default>(field: &mut T, content: &BodyContent, name: &str) {
    match content.attributes.get(name) {
        None => *field = T::default(),
        Some(attr) => match T::from_attribute(attr) {
            Some(value) => *field = value,
            None => debug!(
                "attribute \"{}\" = {:?} does not fit the field type, leaving it unset",
                name, attr.value
            ),
        },
    }
}

/// A record that one matched block decodes into: the derived record itself
/// or a `Box` of it.
pub trait BlockElem: Default {
    fn decode_block(block: &Block, errors: &mut Vec<DecodeError>) -> Self;
    fn block_labels() -> Vec<String>;
}

impl<B: Decode> BlockElem for Box<B> {
    fn decode_block(block: &Block, errors: &mut Vec<DecodeError>) -> Self {
        Box::new(decode_record(&block.body, &block.labels, errors))
    }

    fn block_labels() -> Vec<String> {
        B::label_names()
    }
}

/// The shape of a block-tagged field: required (`R`, `Box<R>`), optional
/// (`Option<_>`) or a sequence (`Vec<_>`).
pub trait BlockField {
    fn decode_blocks(&mut self, block_type: &str, blocks: &[&Block], errors: &mut Vec<DecodeError>);
    fn block_labels() -> Vec<String>;
}

impl<B: Decode> BlockField for Box<B> {
    fn decode_blocks(&mut self, block_type: &str, blocks: &[&Block], errors: &mut Vec<DecodeError>) {
        decode_required_block(self, block_type, blocks, errors);
    }

    fn block_labels() -> Vec<String> {
        B::label_names()
    }
}

impl<T: BlockElem> BlockField for Option<T> {
    fn decode_blocks(&mut self, block_type: &str, blocks: &[&Block], errors: &mut Vec<DecodeError>) {
        *self = match blocks {
            [] => None,
            [block] => Some(T::decode_block(block, errors)),
            _ => {
                push_error(errors, too_many(block_type, blocks.len()));
                None
            }
        };
    }

    fn block_labels() -> Vec<String> {
        T::block_labels()
    }
}

impl<T: BlockElem> BlockField for Vec<T> {
    fn decode_blocks(&mut self, _block_type: &str, blocks: &[&Block], errors: &mut Vec<DecodeError>) {
        *self = blocks
            .iter()
            .map(|block| T::decode_block(block, errors))
            .collect();
    }

    fn block_labels() -> Vec<String> {
        T::block_labels()
    }
}

/// Exactly one block must match; otherwise the field is reset to its default
/// and the mismatch is reported.
pub fn decode_required_block<T: BlockElem>(
    field: &mut T,
    block_type: &str,
    blocks: &[&Block],
    errors: &mut Vec<DecodeError>,
) {
    match blocks {
        [block] => *field = T::decode_block(block, errors),
        [] => {
            *field = T::default();
            push_error(
                errors,
                DecodeError::MissingBlock {
                    block_type: block_type.to_owned(),
                },
            );
        }
        _ => {
            *field = T::default();
            push_error(errors, too_many(block_type, blocks.len()));
        }
    }
}

fn too_many(block_type: &str, count: usize) -> DecodeError {
    DecodeError::TooManyBlocks {
        block_type: block_type.to_owned(),
        count,
    }
}

pub fn decode_blocks<F: BlockField>(
    field: &mut F,
    content: &BodyContent,
    block_type: &str,
    errors: &mut Vec<DecodeError>,
) {
    let blocks = content.blocks_of_type(block_type);
    field.decode_blocks(block_type, &blocks, errors);
}

/// Binds the `index`-th header label; missing labels leave the field empty.
pub fn decode_label(field: &mut String, labels: &[String], index: usize) {
    *field = labels.get(index).cloned().unwrap_or_default();
}

/// Element types of a flat-tagged `Vec`.
pub trait FlatElem: Sized {
    /// `None` skips an entry of the wrong shape.
    fn from_flat(flat: &Flat, errors: &mut Vec<DecodeError>) -> Option<Self>;
}

impl FlatElem for String {
    fn from_flat(flat: &Flat, _errors: &mut Vec<DecodeError>) -> Option<Self> {
        match flat {
            Flat::Scalar(Value::String(value)) => Some(value.clone()),
            _ => None,
        }
    }
}

impl FlatElem for bool {
    fn from_flat(flat: &Flat, _errors: &mut Vec<DecodeError>) -> Option<Self> {
        match flat {
            Flat::Scalar(Value::Bool(value)) => Some(*value),
            _ => None,
        }
    }
}

/// Objects are decoded dynamically.
impl FlatElem for Value {
    fn from_flat(flat: &Flat, _errors: &mut Vec<DecodeError>) -> Option<Self> {
        match flat {
            Flat::Scalar(value) => Some(value.clone()),
            Flat::Object(body) => Some(crate::dynamic::body_to_value(body)),
        }
    }
}

impl<B: Decode> FlatElem for Box<B> {
    fn from_flat(flat: &Flat, errors: &mut Vec<DecodeError>) -> Option<Self> {
        flat.as_object()
            .map(|body| Box::new(decode_record(body, &[], errors)))
    }
}

pub fn decode_flats<E: FlatElem>(field: &mut Vec<E>, content: &BodyContent, errors: &mut Vec<DecodeError>) {
    *field = content
        .flats
        .iter()
        .filter_map(|flat| {
            let elem = E::from_flat(flat, errors);
            if elem.is_none() {
                debug!("skipping flat entry {:?} of a different shape", flat);
            }
            elem
        })
        .collect();
}

/// Comments of this nesting level only.
pub fn decode_comments(field: &mut Vec<String>, content: &BodyContent) {
    *field = content.comments.clone();
}
