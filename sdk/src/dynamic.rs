//! Decoding into an open-ended [`Map`].

use crate::decode::Target;
use crate::error::DecodeError;

use log::debug;
use vcl_schema::{Block, BodyContent, Flat, Map, Value};

impl Target for Map {
    /// Dynamic decoding has no cardinality rules, so it never reports errors.
    fn decode_content(&mut self, content: &BodyContent) -> Vec<DecodeError> {
        decode_map(self, content);
        Vec::new()
    }
}

/// Merges one body into `map`.
///
/// Attributes become entries. Blocks are grouped by type: an unlabeled group
/// holds the single body (or a list of bodies), a labeled group is keyed by
/// the first label and every further label nests one more map level.
pub fn decode_map(map: &mut Map, content: &BodyContent) {
    for (name, attr) in &content.attributes {
        merge(map, name, attr.value.clone());
    }

    for (block_type, blocks) in content.blocks_by_type() {
        merge(map, block_type, group_value(&blocks));
    }
}

/// A body that holds only flat entries has no key space and becomes a list;
/// anything else becomes a map.
pub fn body_to_value(body: &BodyContent) -> Value {
    if body.attributes.is_empty() && body.blocks.is_empty() && !body.flats.is_empty() {
        return Value::List(body.flats.iter().map(flat_to_value).collect());
    }

    let mut map = Map::new();
    decode_map(&mut map, body);
    Value::Map(map)
}

fn flat_to_value(flat: &Flat) -> Value {
    match flat {
        Flat::Scalar(value) => value.clone(),
        Flat::Object(body) => body_to_value(body),
    }
}

fn group_value(blocks: &[&Block]) -> Value {
    if blocks.iter().all(|block| block.labels.is_empty()) {
        return match blocks {
            [block] => body_to_value(&block.body),
            _ => Value::List(blocks.iter().map(|block| body_to_value(&block.body)).collect()),
        };
    }

    let mut map = Map::new();
    for block in blocks {
        let mut value = body_to_value(&block.body);
        for label in block.labels.iter().skip(1).rev() {
            let mut level = Map::new();
            level.insert(label.clone(), value);
            value = Value::Map(level);
        }

        // Unlabeled blocks mixed into a labeled group sit under the empty key.
        let key = block.labels.first().map_or("", String::as_str);
        merge(&mut map, key, value);
    }
    Value::Map(map)
}

/// Inserts `value` under `key`. Maps merge recursively and lists are
/// extended; any other pair is replaced by the incoming value, so a block
/// group wins over an attribute of the same name.
fn merge(map: &mut Map, key: &str, value: Value) {
    let Some(existing) = map.get_mut(key) else {
        map.insert(key.to_owned(), value);
        return;
    };

    match (existing, value) {
        (Value::Map(existing), Value::Map(incoming)) => {
            for (name, value) in incoming {
                merge(existing, &name, value);
            }
        }
        (Value::List(existing), Value::List(incoming)) => existing.extend(incoming),
        (existing, value) => {
            debug!("\"{}\": {:?} replaced by {:?}", key, existing, value);
            *existing = value;
        }
    }
}
