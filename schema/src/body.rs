use crate::value::Value;
use serde::Serialize;

use std::collections::HashMap;

/// A `name = value` (or `"name": value`) binding inside a body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Attribute {
    pub name:  String,
    pub value: Value,
}

/// A block header (type and labels) together with its extracted body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub block_type: String,
    pub labels:     Vec<String>,
    pub body:       BodyContent,
}

/// An unnamed entry of a body: either a bare scalar or an anonymous `{ … }`
/// object whose statements were extracted into their own body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Flat {
    Scalar(Value),
    Object(BodyContent),
}

impl Flat {
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Flat::Scalar(value) => Some(value),
            Flat::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&BodyContent> {
        match self {
            Flat::Object(body) => Some(body),
            Flat::Scalar(_) => None,
        }
    }
}

/// The categorized content of one nesting level.
///
/// Attributes are keyed by name and the last write wins; blocks, flats and
/// comments keep their source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BodyContent {
    pub attributes: HashMap<String, Attribute>,
    pub blocks:     Vec<Block>,
    pub flats:      Vec<Flat>,
    pub comments:   Vec<String>,
}

impl BodyContent {
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
            && self.blocks.is_empty()
            && self.flats.is_empty()
            && self.comments.is_empty()
    }

    /// Blocks of the given type, in source order.
    pub fn blocks_of_type<'a>(&'a self, block_type: &str) -> Vec<&'a Block> {
        self.blocks
            .iter()
            .filter(|block| block.block_type == block_type)
            .collect()
    }

    /// Groups the blocks by type name. Groups are ordered by the first
    /// appearance of their type and keep source order internally.
    pub fn blocks_by_type(&self) -> Vec<(&str, Vec<&Block>)> {
        let mut groups: Vec<(&str, Vec<&Block>)> = Vec::new();
        for block in &self.blocks {
            match groups
                .iter_mut()
                .find(|(block_type, _)| *block_type == block.block_type)
            {
                Some((_, blocks)) => blocks.push(block),
                None => groups.push((block.block_type.as_str(), vec![block])),
            }
        }
        groups
    }
}
