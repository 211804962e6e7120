use crate::decode::Decode;

use vcl_schema::{AttributeSchema, BlockHeaderSchema, BodySchema, TagKind};

/// Projects the field tags of `T` into the schema of the body it expects.
///
/// Attributes are required unless the field is an `Option`. Block headers
/// carry the label names of the nested record in declaration order.
pub fn implied_body_schema<T: Decode>() -> BodySchema {
    let mut schema = BodySchema::default();

    for field in T::fields() {
        match field.tag.kind {
            TagKind::Attr => schema.attributes.push(AttributeSchema {
                name:     field.tag.name,
                required: !field.optional,
            }),
            TagKind::Block => schema.blocks.push(BlockHeaderSchema {
                block_type:  field.tag.name,
                label_names: field.label_names,
            }),
            TagKind::Label | TagKind::Flat | TagKind::Comment => {}
        }
    }

    schema.attributes.sort_by(|a, b| a.name.cmp(&b.name));
    schema.attributes.dedup_by(|a, b| a.name == b.name);
    schema.blocks.sort_by(|a, b| a.block_type.cmp(&b.block_type));
    schema.blocks.dedup_by(|a, b| a.block_type == b.block_type);
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Decode;

    #[derive(Debug, Default, Decode)]
    struct Resource {
        #[vcl("type,label")]
        kind:        String,
        #[vcl("middelname")]
        middle_name: String,
    }

    #[derive(Debug, Default, Decode)]
    struct Root {
        #[vcl("type,label")]
        kind:     String,
        #[vcl("name")]
        name:     String,
        #[vcl("timeout")]
        timeout:  Option<i64>,
        #[vcl("resource,block")]
        resource: Option<Box<Resource>>,
        #[vcl("backend,block")]
        backends: Vec<Resource>,
        #[vcl(",comment")]
        comments: Vec<String>,
        untagged: bool,
    }

    #[test]
    fn attributes_and_blocks_are_sorted() {
        let schema = implied_body_schema::<Root>();

        let attrs: Vec<(&str, bool)> = schema
            .attributes
            .iter()
            .map(|attr| (attr.name.as_str(), attr.required))
            .collect();
        assert_eq!(attrs, vec![("name", true), ("timeout", false)]);

        let blocks: Vec<&str> = schema.blocks.iter().map(|b| b.block_type.as_str()).collect();
        assert_eq!(blocks, vec!["backend", "resource"]);
        assert_eq!(schema.block("resource").map(|b| b.label_names.clone()), Some(vec!["type".to_owned()]));
    }

    #[test]
    fn record_without_tags() {
        #[derive(Default, Decode)]
        struct Empty {
            _ignored: String,
        }

        assert_eq!(implied_body_schema::<Empty>(), BodySchema::default());
    }
}
