use crate::ast::*;
use crate::error::SyntaxError;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    Sum,
    Prefix,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Equal | TokenKind::Match | TokenKind::And | TokenKind::Or => Precedence::Equals,
        TokenKind::Plus => Precedence::Sum,
        _ => Precedence::Lowest,
    }
}

/// Pratt parser over a [`Lexer`] with one token of lookahead.
///
/// Parsing never stops at the first problem: every error is recorded, the
/// offending statement is dropped and parsing resumes with the next token.
pub struct Parser<'a> {
    lexer:  Lexer<'a>,
    cur:    Token,
    peek:   Token,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let cur  = lexer.next_token();
        let peek = lexer.next_token();
        Parser {
            lexer,
            cur,
            peek,
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<SyntaxError> {
        self.errors
    }

    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();
        while !self.cur_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt);
            }
            self.next_token();
        }
        program
    }

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur = std::mem::replace(&mut self.peek, next);
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advances when the next token is `kind`, otherwise records an error.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.next_token();
            return true;
        }
        let err = SyntaxError::unexpected(kind.as_str(), &self.peek);
        self.error(err);
        false
    }

    fn skip_peek(&mut self, kind: TokenKind) {
        if self.peek_is(kind) {
            self.next_token();
        }
    }

    fn error(&mut self, err: SyntaxError) {
        debug!("{}", err);
        self.errors.push(err);
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur.kind {
            TokenKind::Ident if self.peek_is(TokenKind::Assign) => self.parse_assign_statement(),
            TokenKind::String if self.peek_is(TokenKind::Colon) => {
                self.parse_assign_field_statement()
            }
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Call => self.parse_call_statement(),
            TokenKind::Semicolon => None,
            kind if kind.is_comment_start() => Some(self.parse_comment_statement()),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_assign_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        let name = Identifier {
            token: token.clone(),
            value: token.literal.clone(),
        };

        self.next_token();
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_peek(TokenKind::Semicolon);

        Some(Statement::Assign(AssignStatement { token, name, value }))
    }

    fn parse_assign_field_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        let name = Identifier {
            token: token.clone(),
            value: token.literal.clone(),
        };

        self.next_token();
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(TokenKind::Comma) || self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Statement::AssignField(AssignFieldStatement { token, name, value }))
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        self.skip_peek(TokenKind::Semicolon);

        Some(Statement::Return(ReturnStatement { token, value }))
    }

    fn parse_call_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_peek(TokenKind::Semicolon);

        Some(Statement::Call(CallStatement { token, value }))
    }

    /// `#` and `//` capture the rest of their line, `/*` captures everything
    /// up to the matching `*/`. Captured token literals are joined by spaces.
    fn parse_comment_statement(&mut self) -> Statement {
        let token = self.cur.clone();
        let mut words = Vec::new();

        if token.kind == TokenKind::LMultiComment {
            while !self.peek_is(TokenKind::RMultiComment) && !self.peek_is(TokenKind::Eof) {
                self.next_token();
                words.push(self.cur.literal.clone());
            }
            self.expect_peek(TokenKind::RMultiComment);
        } else {
            while self.peek.line == token.line && !self.peek_is(TokenKind::Eof) {
                self.next_token();
                words.push(self.cur.literal.clone());
            }
        }

        Statement::Comment(CommentStatement {
            token,
            value: words.join(" "),
        })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_peek(TokenKind::Semicolon);

        Some(Statement::Expression(ExpressionStatement { token, expression }))
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < precedence_of(self.peek.kind) {
            self.next_token();
            left = self.parse_infix_expression(left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let expr = match token.kind {
            TokenKind::Ident => Expression::Identifier(Identifier {
                value: token.literal.clone(),
                token,
            }),
            TokenKind::Int => return self.parse_integer_literal(),
            TokenKind::String => Expression::String(StringLiteral {
                value: token.literal.clone(),
                token,
            }),
            TokenKind::Cidr => Expression::Cidr(CidrLiteral {
                value: token.literal.clone(),
                token,
            }),
            TokenKind::Percentage => Expression::Percentage(PercentageLiteral {
                value: token.literal.clone(),
                token,
            }),
            TokenKind::True | TokenKind::False => Expression::Boolean(BooleanLiteral {
                value: token.kind == TokenKind::True,
                token,
            }),
            TokenKind::Bang => return self.parse_prefix_expression(),
            TokenKind::LParen => return self.parse_grouped_expression(),
            TokenKind::If => return self.parse_if_expression(),
            TokenKind::LBrace => return self.parse_object_expression(),
            kind if kind.is_block_keyword() => return self.parse_block_expression(),
            kind => {
                self.error(SyntaxError::NoPrefixParse {
                    kind,
                    literal: token.literal,
                    line:    token.line,
                    column:  token.column,
                });
                return None;
            }
        };
        Some(expr)
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Integer(IntegerLiteral { token, value })),
            Err(_) => {
                self.error(SyntaxError::InvalidInteger {
                    literal: token.literal,
                    line:    token.line,
                    column:  token.column,
                });
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix(PrefixExpression {
            operator: token.literal.clone(),
            token,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        let precedence = precedence_of(token.kind);
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(InfixExpression {
            operator: token.literal.clone(),
            token,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) || !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement()?;

        let mut alternative = None;
        if self.peek_is(TokenKind::Else) {
            self.next_token();
            if self.peek_is(TokenKind::If) {
                // `else if` becomes an alternative holding a single nested if.
                self.next_token();
                let nested_token = self.cur.clone();
                let nested = self.parse_if_expression()?;
                alternative = Some(BlockStatement {
                    token:      nested_token.clone(),
                    statements: vec![Statement::Expression(ExpressionStatement {
                        token:      nested_token,
                        expression: nested,
                    })],
                });
            } else {
                if !self.expect_peek(TokenKind::LBrace) {
                    return None;
                }
                alternative = Some(self.parse_block_statement()?);
            }
        }

        Some(Expression::If(IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    /// `keyword label* { … }` or the body-less `keyword label*;`.
    fn parse_block_expression(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let mut labels = Vec::new();

        while !self.peek_is(TokenKind::LBrace) && !self.peek_is(TokenKind::Semicolon) {
            if self.peek_is(TokenKind::Eof) || self.peek_is(TokenKind::RBrace) {
                let err = SyntaxError::unexpected("{ or ;", &self.peek);
                self.error(err);
                return None;
            }
            self.next_token();
            labels.push(self.cur.literal.clone());
        }

        if self.peek_is(TokenKind::Semicolon) {
            return Some(Expression::Block(BlockExpression {
                token,
                labels,
                body: None,
            }));
        }

        self.next_token();
        let body = self.parse_block_statement()?;
        Some(Expression::Block(BlockExpression {
            token,
            labels,
            body: Some(body),
        }))
    }

    fn parse_object_expression(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let body = self.parse_block_statement()?;
        Some(Expression::Block(BlockExpression {
            token,
            labels: Vec::new(),
            body: Some(body),
        }))
    }

    /// Expects `cur` on the opening brace and leaves it on the closing one.
    fn parse_block_statement(&mut self) -> Option<BlockStatement> {
        let token = self.cur.clone();
        let mut statements = Vec::new();

        self.next_token();
        while !self.cur_is(TokenKind::RBrace) {
            if self.cur_is(TokenKind::Eof) {
                let err = SyntaxError::unexpected("}", &self.cur);
                self.error(err);
                return None;
            }
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        Some(BlockStatement { token, statements })
    }
}

/// Parses a whole document, returning the program together with every
/// syntax error encountered along the way.
pub fn parse(text: &str) -> (Program, Vec<SyntaxError>) {
    let mut parser = Parser::new(Lexer::new(text));
    let program = parser.parse_program();
    (program, parser.into_errors())
}
