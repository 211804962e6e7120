use crate::token::Token;

use std::fmt;

/// The root of a parsed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assign(AssignStatement),
    AssignField(AssignFieldStatement),
    Return(ReturnStatement),
    Call(CallStatement),
    Comment(CommentStatement),
    Expression(ExpressionStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Boolean(BooleanLiteral),
    String(StringLiteral),
    Cidr(CidrLiteral),
    Percentage(PercentageLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    Block(BlockExpression),
}

/// `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStatement {
    pub token: Token,
    pub name:  Identifier,
    pub value: Expression,
}

/// `"name": value`, as found in table bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignFieldStatement {
    pub token: Token,
    pub name:  Identifier,
    pub value: Expression,
}

/// `return (value)`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Expression,
}

/// `call value`
#[derive(Debug, Clone, PartialEq)]
pub struct CallStatement {
    pub token: Token,
    pub value: Expression,
}

/// `token` is the comment marker; `value` is the captured text.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentStatement {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub token:      Token,
    pub expression: Expression,
}

/// A brace-delimited statement list; `token` is the opening `{`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token:      Token,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

/// Stored with its quotes, e.g. `"35.0.0.0"/24`.
#[derive(Debug, Clone, PartialEq)]
pub struct CidrLiteral {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PercentageLiteral {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub token:    Token,
    pub operator: String,
    pub right:    Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub token:    Token,
    pub operator: String,
    pub left:     Box<Expression>,
    pub right:    Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    pub token:       Token,
    pub condition:   Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

/// A keyworded block (`acl name { … }`, `backend default none;`) or an
/// anonymous object (`{ … }`, where `token` is the `{` itself).
#[derive(Debug, Clone, PartialEq)]
pub struct BlockExpression {
    pub token:  Token,
    pub labels: Vec<String>,
    pub body:   Option<BlockStatement>,
}

impl BlockExpression {
    pub fn is_anonymous(&self) -> bool {
        self.token.kind == crate::token::TokenKind::LBrace
    }
}

impl Program {
    /// The literal of the first statement's token, or `""` for an empty program.
    pub fn token_literal(&self) -> &str {
        self.statements.first().map_or("", Statement::token_literal)
    }
}

macro_rules! impl_token_literal {
    ($($node:ident),*) => {
        $(
            impl $node {
                pub fn token_literal(&self) -> &str {
                    &self.token.literal
                }
            }
        )*
    };
}

impl_token_literal!(
    AssignStatement,
    AssignFieldStatement,
    ReturnStatement,
    CallStatement,
    CommentStatement,
    ExpressionStatement,
    BlockStatement,
    Identifier,
    IntegerLiteral,
    BooleanLiteral,
    StringLiteral,
    CidrLiteral,
    PercentageLiteral,
    PrefixExpression,
    InfixExpression,
    IfExpression,
    BlockExpression
);

impl Statement {
    pub fn token(&self) -> &Token {
        match self {
            Statement::Assign(stmt) => &stmt.token,
            Statement::AssignField(stmt) => &stmt.token,
            Statement::Return(stmt) => &stmt.token,
            Statement::Call(stmt) => &stmt.token,
            Statement::Comment(stmt) => &stmt.token,
            Statement::Expression(stmt) => &stmt.token,
        }
    }

    pub fn token_literal(&self) -> &str {
        &self.token().literal
    }
}

impl Expression {
    pub fn token(&self) -> &Token {
        match self {
            Expression::Identifier(expr) => &expr.token,
            Expression::Integer(expr) => &expr.token,
            Expression::Boolean(expr) => &expr.token,
            Expression::String(expr) => &expr.token,
            Expression::Cidr(expr) => &expr.token,
            Expression::Percentage(expr) => &expr.token,
            Expression::Prefix(expr) => &expr.token,
            Expression::Infix(expr) => &expr.token,
            Expression::If(expr) => &expr.token,
            Expression::Block(expr) => &expr.token,
        }
    }

    pub fn token_literal(&self) -> &str {
        &self.token().literal
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            writeln!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Assign(stmt) => write!(f, "{} = {};", stmt.name.value, stmt.value),
            Statement::AssignField(stmt) => write!(f, "\"{}\": {},", stmt.name.value, stmt.value),
            Statement::Return(stmt) => write!(f, "return ({});", stmt.value),
            Statement::Call(stmt) => write!(f, "call {};", stmt.value),
            Statement::Comment(stmt) => match stmt.token.literal.as_str() {
                "/*" => write!(f, "/* {} */", stmt.value),
                marker => write!(f, "{} {}", marker, stmt.value),
            },
            Statement::Expression(stmt) => match stmt.expression {
                Expression::Block(_) | Expression::If(_) => write!(f, "{}", stmt.expression),
                _ => write!(f, "{};", stmt.expression),
            },
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for stmt in &self.statements {
            write!(f, " {}", stmt)?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(expr) => f.write_str(&expr.value),
            Expression::Integer(expr) => f.write_str(&expr.token.literal),
            Expression::Boolean(expr) => f.write_str(&expr.token.literal),
            Expression::String(expr) => write!(f, "\"{}\"", expr.value),
            Expression::Cidr(expr) => f.write_str(&expr.value),
            Expression::Percentage(expr) => f.write_str(&expr.value),
            Expression::Prefix(expr) => write!(f, "({}{})", expr.operator, expr.right),
            Expression::Infix(expr) => {
                write!(f, "({} {} {})", expr.left, expr.operator, expr.right)
            }
            Expression::If(expr) => {
                write!(f, "if ({}) {}", expr.condition, expr.consequence)?;
                if let Some(alternative) = &expr.alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            Expression::Block(expr) => {
                if !expr.is_anonymous() {
                    f.write_str(&expr.token.literal)?;
                    for label in &expr.labels {
                        write!(f, " {}", label)?;
                    }
                }
                match &expr.body {
                    Some(body) if expr.is_anonymous() => write!(f, "{}", body),
                    Some(body) => write!(f, " {}", body),
                    None => f.write_str(";"),
                }
            }
        }
    }
}
