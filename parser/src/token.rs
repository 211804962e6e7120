use lazy_static::lazy_static;

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    Ident,
    Int,
    Percentage,
    String,
    Cidr,
    True,
    False,

    Assign,
    Match,
    Plus,
    Bang,
    Equal,
    And,
    Or,

    Comma,
    Semicolon,
    Colon,
    Hash,

    CommentLine,
    LMultiComment,
    RMultiComment,
    LParen,
    RParen,
    LBrace,
    RBrace,

    If,
    Else,

    Return,
    Import,
    Table,
    Acl,
    Backend,
    Subroutine,
    Call,
    Director,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Illegal       => "ILLEGAL",
            TokenKind::Eof           => "EOF",
            TokenKind::Ident         => "IDENT",
            TokenKind::Int           => "INT",
            TokenKind::Percentage    => "PERCENTAGE",
            TokenKind::String        => "STRING",
            TokenKind::Cidr          => "CIDR",
            TokenKind::True          => "TRUE",
            TokenKind::False         => "FALSE",
            TokenKind::Assign        => "=",
            TokenKind::Match         => "~",
            TokenKind::Plus          => "+",
            TokenKind::Bang          => "!",
            TokenKind::Equal         => "==",
            TokenKind::And           => "&&",
            TokenKind::Or            => "||",
            TokenKind::Comma         => ",",
            TokenKind::Semicolon     => ";",
            TokenKind::Colon         => ":",
            TokenKind::Hash          => "#",
            TokenKind::CommentLine   => "//",
            TokenKind::LMultiComment => "/*",
            TokenKind::RMultiComment => "*/",
            TokenKind::LParen        => "(",
            TokenKind::RParen        => ")",
            TokenKind::LBrace        => "{",
            TokenKind::RBrace        => "}",
            TokenKind::If            => "IF",
            TokenKind::Else          => "ELSE",
            TokenKind::Return        => "RETURN",
            TokenKind::Import        => "IMPORT",
            TokenKind::Table         => "TABLE",
            TokenKind::Acl           => "ACL",
            TokenKind::Backend       => "BACKEND",
            TokenKind::Subroutine    => "SUBROUTINE",
            TokenKind::Call          => "CALL",
            TokenKind::Director      => "DIRECTOR",
        }
    }

    /// Keywords that introduce a labeled block (`acl name { … }`).
    pub fn is_block_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Subroutine
                | TokenKind::Acl
                | TokenKind::Backend
                | TokenKind::Director
                | TokenKind::Table
                | TokenKind::Import
        )
    }

    pub fn is_comment_start(&self) -> bool {
        matches!(
            self,
            TokenKind::Hash | TokenKind::CommentLine | TokenKind::LMultiComment
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single VCL token. `line` and `column` are 1-based and count bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind:    TokenKind,
    pub literal: String,
    pub line:    usize,
    pub column:  usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            literal: literal.into(),
            line,
            column,
        }
    }
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenKind> = {
        let mut keywords = HashMap::new();
        keywords.insert("sub",      TokenKind::Subroutine);
        keywords.insert("call",     TokenKind::Call);
        keywords.insert("true",     TokenKind::True);
        keywords.insert("false",    TokenKind::False);
        keywords.insert("if",       TokenKind::If);
        keywords.insert("else",     TokenKind::Else);
        keywords.insert("return",   TokenKind::Return);
        keywords.insert("table",    TokenKind::Table);
        keywords.insert("import",   TokenKind::Import);
        keywords.insert("acl",      TokenKind::Acl);
        keywords.insert("backend",  TokenKind::Backend);
        keywords.insert("director", TokenKind::Director);
        keywords
    };
}

/// Returns the keyword kind for `ident`, or `Ident` when it is not reserved.
pub fn lookup_ident(ident: &str) -> TokenKind {
    KEYWORDS.get(ident).copied().unwrap_or(TokenKind::Ident)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_keywords() {
        assert_eq!(lookup_ident("sub"), TokenKind::Subroutine);
        assert_eq!(lookup_ident("director"), TokenKind::Director);
        assert_eq!(lookup_ident("true"), TokenKind::True);
        assert_eq!(lookup_ident("client.ip"), TokenKind::Ident);
        assert_eq!(lookup_ident("Sub"), TokenKind::Ident);
    }

    #[test]
    fn test_block_keywords() {
        assert!(TokenKind::Acl.is_block_keyword());
        assert!(TokenKind::Import.is_block_keyword());
        assert!(!TokenKind::LBrace.is_block_keyword());
        assert!(!TokenKind::If.is_block_keyword());
    }

    #[test]
    fn test_display() {
        assert_eq!(TokenKind::Equal.to_string(), "==");
        assert_eq!(TokenKind::Ident.to_string(), "IDENT");
    }
}
