use serde::Serialize;

/// The structure a target type expects from one body, as implied by its
/// field tags. Attributes and blocks are sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BodySchema {
    pub attributes: Vec<AttributeSchema>,
    pub blocks:     Vec<BlockHeaderSchema>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSchema {
    pub name:     String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockHeaderSchema {
    #[serde(rename = "type")]
    pub block_type:  String,
    pub label_names: Vec<String>,
}

impl BodySchema {
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    pub fn block(&self, block_type: &str) -> Option<&BlockHeaderSchema> {
        self.blocks.iter().find(|block| block.block_type == block_type)
    }
}
