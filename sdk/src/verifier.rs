use crate::error::DecodeError;

use vcl_schema::{BodySchema, BodyContent};

/// Checks one body against a schema before decoding it.
///
/// Returns every problem found: required attributes that are absent and
/// blocks whose header carries fewer labels than the schema declares.
/// Anything the schema does not mention is accepted.
pub fn verify_content(schema: &BodySchema, content: &BodyContent) -> Vec<DecodeError> {
    let mut errors = Vec::new();

    for attr in &schema.attributes {
        if attr.required && !content.attributes.contains_key(&attr.name) {
            errors.push(DecodeError::MissingAttribute {
                name: attr.name.clone(),
            });
        }
    }

    for header in &schema.blocks {
        for block in content.blocks_of_type(&header.block_type) {
            if block.labels.len() < header.label_names.len() {
                errors.push(DecodeError::MissingLabels {
                    block_type: header.block_type.clone(),
                    expected:   header.label_names.len(),
                    found:      block.labels.len(),
                });
            }
        }
    }

    errors
}
