use crate::token::{lookup_ident, Token, TokenKind};

/// Byte-cursor scanner producing one token per call to [`Lexer::next_token`].
///
/// The scanner never fails: bytes it has no rule for come back as `Illegal`
/// tokens and the parser reports them.
pub struct Lexer<'a> {
    input:      &'a str,
    pos:        usize,
    read_pos:   usize,
    ch:         u8,
    line:       usize,
    line_start: usize,
    done:       bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input,
            pos: 0,
            read_pos: 0,
            ch: 0,
            line: 1,
            line_start: 0,
            done: false,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        if self.ch == b'\n' && self.pos < self.input.len() {
            self.line += 1;
            self.line_start = self.read_pos;
        }
        self.ch = self.input.as_bytes().get(self.read_pos).copied().unwrap_or(0);
        self.pos = self.read_pos;
        self.read_pos += 1;
    }

    fn peek_char(&self) -> u8 {
        self.input.as_bytes().get(self.read_pos).copied().unwrap_or(0)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn slice(&self, start: usize) -> &'a str {
        &self.input[start..self.pos.min(self.input.len())]
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let line   = self.line;
        let column = self.pos - self.line_start + 1;
        let start  = self.pos;

        let kind = match self.ch {
            b'=' => self.pair(b'=', TokenKind::Equal, TokenKind::Assign),
            b'&' => self.pair(b'&', TokenKind::And, TokenKind::Illegal),
            b'|' => self.pair(b'|', TokenKind::Or, TokenKind::Illegal),
            b'*' => self.pair(b'/', TokenKind::RMultiComment, TokenKind::Illegal),
            b'/' => match self.peek_char() {
                b'/' => {
                    self.read_char();
                    TokenKind::CommentLine
                }
                b'*' => {
                    self.read_char();
                    TokenKind::LMultiComment
                }
                _ => TokenKind::Illegal,
            },
            b':' => TokenKind::Colon,
            b'~' => TokenKind::Match,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'#' => TokenKind::Hash,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'!' => TokenKind::Bang,
            b'+' => TokenKind::Plus,
            b'"' => return self.read_string(line, column),
            0 if self.at_end() => {
                return Token::new(TokenKind::Eof, "", line, column);
            }
            c if is_letter(c) => {
                let ident = self.read_identifier();
                return Token::new(lookup_ident(ident), ident, line, column);
            }
            c if is_digit(c) => return self.read_number(line, column),
            _ => {
                // Consume the whole character so the cursor stays on a UTF-8 boundary.
                let width = self.input[start..].chars().next().map_or(1, char::len_utf8);
                for _ in 1..width {
                    self.read_char();
                }
                TokenKind::Illegal
            }
        };

        self.read_char();
        Token::new(kind, self.slice(start), line, column)
    }

    /// Two-character operator when the next byte is `second`, otherwise the
    /// single-character fallback.
    fn pair(&mut self, second: u8, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek_char() == second {
            self.read_char();
            double
        } else {
            single
        }
    }

    fn read_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while is_letter(self.ch) || is_digit(self.ch) {
            self.read_char();
        }
        self.slice(start)
    }

    fn read_number(&mut self, line: usize, column: usize) -> Token {
        let start = self.pos;
        while is_digit(self.ch) {
            self.read_char();
        }
        if self.ch == b'%' {
            self.read_char();
            return Token::new(TokenKind::Percentage, self.slice(start), line, column);
        }
        Token::new(TokenKind::Int, self.slice(start), line, column)
    }

    /// Reads from the opening quote until a `;` or an unescaped closing quote
    /// that is not directly followed by `/`. Text containing a `/` becomes a
    /// CIDR literal that keeps its opening quote, e.g. `"35.0.0.0"/24`.
    fn read_string(&mut self, line: usize, column: usize) -> Token {
        self.read_char();
        let content_start = self.pos;

        let content = loop {
            match self.ch {
                0 if self.at_end() => break self.slice(content_start),
                b';' => break self.slice(content_start),
                b'\\' => {
                    self.read_char();
                    if !self.at_end() {
                        self.read_char();
                    }
                }
                b'"' if self.peek_char() == b'/' => self.read_char(),
                b'"' => {
                    let content = self.slice(content_start);
                    self.read_char();
                    break content;
                }
                _ => self.read_char(),
            }
        };

        if content.contains('/') {
            return Token::new(TokenKind::Cidr, format!("\"{}", content), line, column);
        }
        Token::new(TokenKind::String, content, line, column)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    /// Yields every token including the terminal `Eof`, then `None`.
    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.done = true;
        }
        Some(token)
    }
}

/// Scans the whole input. The last token is always `Eof`.
pub fn tokenize(text: &str) -> Vec<Token> {
    Lexer::new(text).collect()
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_' || ch == b'.'
}

fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use TokenKind::*;

    // `TokenKind::String` shadows the std type in this module.
    type Text = std::string::String;

    fn kinds_and_literals(input: &str) -> Vec<(TokenKind, Text)> {
        tokenize(input)
            .into_iter()
            .map(|tok| (tok.kind, tok.literal))
            .collect()
    }

    fn expect(input: &str, expected: &[(TokenKind, &str)]) {
        let mut expected: Vec<(TokenKind, Text)> = expected
            .iter()
            .map(|(kind, literal)| (*kind, literal.to_string()))
            .collect();
        expected.push((Eof, Text::new()));
        assert_eq!(kinds_and_literals(input), expected, "input: {:?}", input);
    }

    #[test]
    fn test_operators_and_literals() {
        expect(
            r#"=~,; call == && || 10 "keke" false ! "35.0.0.0"/23; server1 K_backend1 50% table"#,
            &[
                (Assign, "="),
                (Match, "~"),
                (Comma, ","),
                (Semicolon, ";"),
                (Call, "call"),
                (Equal, "=="),
                (And, "&&"),
                (Or, "||"),
                (Int, "10"),
                (String, "keke"),
                (False, "false"),
                (Bang, "!"),
                (Cidr, "\"35.0.0.0\"/23"),
                (Semicolon, ";"),
                (Ident, "server1"),
                (Ident, "K_backend1"),
                (Percentage, "50%"),
                (Table, "table"),
            ],
        );
    }

    #[test]
    fn test_subroutine() {
        expect(
            "sub pipe_if_local {\n\tif (client.ip ~ local) {\n\t\treturn (pipe);\n\t}\n}\n",
            &[
                (Subroutine, "sub"),
                (Ident, "pipe_if_local"),
                (LBrace, "{"),
                (If, "if"),
                (LParen, "("),
                (Ident, "client.ip"),
                (Match, "~"),
                (Ident, "local"),
                (RParen, ")"),
                (LBrace, "{"),
                (Return, "return"),
                (LParen, "("),
                (Ident, "pipe"),
                (RParen, ")"),
                (Semicolon, ";"),
                (RBrace, "}"),
                (RBrace, "}"),
            ],
        );
    }

    #[test]
    fn test_director_and_table() {
        expect(
            "director my_dir random {\n  .retries = 3;\n}",
            &[
                (Director, "director"),
                (Ident, "my_dir"),
                (Ident, "random"),
                (LBrace, "{"),
                (Ident, ".retries"),
                (Assign, "="),
                (Int, "3"),
                (Semicolon, ";"),
                (RBrace, "}"),
            ],
        );
        expect(
            "table my_id {\n  \"key1\": \"value 1\",\n}",
            &[
                (Table, "table"),
                (Ident, "my_id"),
                (LBrace, "{"),
                (String, "key1"),
                (Colon, ":"),
                (String, "value 1"),
                (Comma, ","),
                (RBrace, "}"),
            ],
        );
    }

    #[test]
    fn test_comment_markers() {
        expect(
            "import directors; # load the directors",
            &[
                (Import, "import"),
                (Ident, "directors"),
                (Semicolon, ";"),
                (Hash, "#"),
                (Ident, "load"),
                (Ident, "the"),
                (Ident, "directors"),
            ],
        );
        expect(
            "// a /* b */",
            &[
                (CommentLine, "//"),
                (Ident, "a"),
                (LMultiComment, "/*"),
                (Ident, "b"),
                (RMultiComment, "*/"),
            ],
        );
    }

    #[rstest]
    #[case("\"/health\"", Cidr, "\"/health")]
    #[case("\"10.0.0.0/8\"", Cidr, "\"10.0.0.0/8")]
    #[case("\"10.0.0.0\"/8", Cidr, "\"10.0.0.0\"/8")]
    #[case("\"a\"/b\"", Cidr, "\"a\"/b")]
    #[case("\"a \\\" b\"", String, "a \\\" b")]
    #[case("\"unterminated", String, "unterminated")]
    #[case("7%", Percentage, "7%")]
    #[case("42", Int, "42")]
    #[case("_private", Ident, "_private")]
    #[case(".port", Ident, ".port")]
    fn test_single_token(#[case] input: &str, #[case] kind: TokenKind, #[case] literal: &str) {
        let tokens = tokenize(input);
        assert_eq!(tokens.len(), 2, "tokens: {:?}", tokens);
        assert_eq!(tokens[0].kind, kind);
        assert_eq!(tokens[0].literal, literal);
    }

    #[test]
    fn test_string_stops_at_semicolon() {
        expect(
            "\"abc; x",
            &[(String, "abc"), (Semicolon, ";"), (Ident, "x")],
        );
    }

    #[rstest]
    #[case("/")]
    #[case("*")]
    #[case("&")]
    #[case("|")]
    #[case("@")]
    #[case("é")]
    fn test_illegal(#[case] input: &str) {
        let tokens = tokenize(input);
        assert_eq!(tokens[0].kind, Illegal);
        assert_eq!(tokens[0].literal, input);
        assert_eq!(tokens[1].kind, Eof);
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("x = 1;\n  acl local {}");
        let positions: Vec<(usize, usize)> = tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(
            positions,
            vec![(1, 1), (1, 3), (1, 5), (1, 6), (2, 3), (2, 7), (2, 13), (2, 14), (2, 15)]
        );
    }

    #[test]
    fn test_iterator_is_fused_after_eof() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next().map(|t| t.kind), Some(Ident));
        assert_eq!(lexer.next().map(|t| t.kind), Some(Eof));
        assert_eq!(lexer.next(), None);
        assert_eq!(lexer.next(), None);
        // next_token keeps answering Eof
        assert_eq!(lexer.next_token().kind, Eof);
    }
}
