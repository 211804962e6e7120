use thiserror::Error;

use std::fmt;
use std::str::FromStr;

/// Which bucket of a `BodyContent` feeds a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Attr,
    Block,
    Label,
    Flat,
    Comment,
}

impl TagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::Attr    => "attr",
            TagKind::Block   => "block",
            TagKind::Label   => "label",
            TagKind::Flat    => "flat",
            TagKind::Comment => "comment",
        }
    }

    /// Attribute and block tags look entries up by name; the other kinds are
    /// positional or take a whole collection.
    pub fn requires_name(&self) -> bool {
        matches!(self, TagKind::Attr | TagKind::Block)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagKind {
    type Err = TagError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "attr"    => Ok(TagKind::Attr),
            "block"   => Ok(TagKind::Block),
            "label"   => Ok(TagKind::Label),
            "flat"    => Ok(TagKind::Flat),
            "comment" => Ok(TagKind::Comment),
            other     => Err(TagError::UnknownKind(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("Unknown tag kind \"{0}\"")]
    UnknownKind(String),

    #[error("A \"{0}\" tag needs a name")]
    MissingName(TagKind),
}

/// Field metadata of the form `name` (an attribute) or `name,kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTag {
    pub name: String,
    pub kind: TagKind,
}

impl FieldTag {
    /// Parses a tag that is known to be well formed.
    ///
    /// Panics on an unknown kind or a missing attribute/block name: those are
    /// mistakes in a type definition, not in the document being decoded.
    pub fn parse(tag: &str) -> FieldTag {
        match tag.parse() {
            Ok(tag) => tag,
            Err(err) => panic!("invalid field tag {:?}: {}", tag, err),
        }
    }
}

impl FromStr for FieldTag {
    type Err = TagError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let (name, kind) = match tag.split_once(',') {
            Some((name, kind)) => (name.trim(), kind.trim().parse()?),
            None => (tag.trim(), TagKind::Attr),
        };

        if name.is_empty() && kind.requires_name() {
            return Err(TagError::MissingName(kind));
        }

        Ok(FieldTag {
            name: name.to_owned(),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags() {
        assert_eq!(
            FieldTag::parse("x"),
            FieldTag { name: "x".to_owned(), kind: TagKind::Attr }
        );
        assert_eq!(FieldTag::parse(".quorum,attr").name, ".quorum");
        assert_eq!(FieldTag::parse("acl,block").kind, TagKind::Block);
        assert_eq!(FieldTag::parse("type,label").kind, TagKind::Label);
        assert_eq!(FieldTag::parse(",flat").name, "");
        assert_eq!(FieldTag::parse(",comment").kind, TagKind::Comment);
    }

    #[test]
    fn reject_bad_tags() {
        assert_eq!(
            "x,blob".parse::<FieldTag>(),
            Err(TagError::UnknownKind("blob".to_owned()))
        );
        assert_eq!(
            ",block".parse::<FieldTag>(),
            Err(TagError::MissingName(TagKind::Block))
        );
        assert_eq!("".parse::<FieldTag>(), Err(TagError::MissingName(TagKind::Attr)));
    }

    #[test]
    #[should_panic(expected = "invalid field tag")]
    fn parse_panics_on_unknown_kind() {
        FieldTag::parse("x,nope");
    }
}
