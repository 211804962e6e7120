use crate::ast::{BlockExpression, Expression, Program, Statement};
use crate::token::Token;

use log::trace;
use vcl_schema::{Attribute, Block, BodyContent, Flat, Value};

/// Extracts the root body of a parsed program.
pub fn content(program: &Program) -> BodyContent {
    convert_body(&program.statements)
}

/// Buckets one nesting level of statements into attributes, blocks, flat
/// entries and comments, recursing into every block body.
pub fn convert_body(statements: &[Statement]) -> BodyContent {
    let mut content = BodyContent::default();

    for stmt in statements {
        match stmt {
            Statement::Assign(assign) => {
                convert_assignment(&mut content, &assign.token, &assign.name.value, &assign.value)
            }
            Statement::AssignField(field) => {
                convert_assignment(&mut content, &field.token, &field.name.value, &field.value)
            }
            Statement::Comment(comment) => content.comments.push(comment.value.clone()),
            Statement::Expression(stmt) => match &stmt.expression {
                Expression::Block(block) if block.is_anonymous() => {
                    content.flats.push(Flat::Object(block_body(block)))
                }
                Expression::Block(block) => content.blocks.push(Block {
                    block_type: block.token.literal.clone(),
                    labels:     block.labels.clone(),
                    body:       block_body(block),
                }),
                expr => match scalar(expr) {
                    Some(value) => content.flats.push(Flat::Scalar(value)),
                    None => trace!("skipping `{}` expression statement", expr.token_literal()),
                },
            },
            Statement::Return(_) | Statement::Call(_) => {
                trace!("skipping `{}` statement", stmt.token_literal())
            }
        }
    }

    content
}

/// An assigned block is keyed by the assignment's own name, so
/// `.probe = { … }` yields a block of type `.probe`.
fn convert_assignment(content: &mut BodyContent, token: &Token, name: &str, value: &Expression) {
    if let Expression::Block(block) = value {
        content.blocks.push(Block {
            block_type: token.literal.clone(),
            labels:     block.labels.clone(),
            body:       block_body(block),
        });
        return;
    }

    match scalar(value) {
        Some(value) => {
            content.attributes.insert(
                name.to_owned(),
                Attribute {
                    name: name.to_owned(),
                    value,
                },
            );
        }
        None => trace!("skipping non-literal value assigned to `{}`", name),
    }
}

fn block_body(block: &BlockExpression) -> BodyContent {
    block
        .body
        .as_ref()
        .map(|body| convert_body(&body.statements))
        .unwrap_or_default()
}

fn scalar(expr: &Expression) -> Option<Value> {
    match expr {
        Expression::Identifier(ident) => Some(Value::String(ident.value.clone())),
        Expression::Integer(lit) => Some(Value::Int(lit.value)),
        Expression::Boolean(lit) => Some(Value::Bool(lit.value)),
        Expression::String(lit) => Some(Value::String(lit.value.clone())),
        Expression::Cidr(lit) => Some(Value::String(lit.value.clone())),
        Expression::Percentage(lit) => Some(Value::String(lit.value.clone())),
        Expression::Prefix(_) | Expression::Infix(_) | Expression::If(_) | Expression::Block(_) => {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn extract(input: &str) -> BodyContent {
        let (program, errors) = parse(input);
        assert!(errors.is_empty(), "input {:?} produced errors: {:?}", input, errors);
        content(&program)
    }

    fn scalars(flats: &[Flat]) -> Vec<Value> {
        flats
            .iter()
            .map(|flat| flat.as_scalar().cloned().expect("scalar flat"))
            .collect()
    }

    #[test]
    fn test_attributes() {
        let content = extract(
            "x = 1;\n.host = \"example.com\";\nok = true;\nquorum = 50%;\nnet = \"10.0.0.0\"/8;\nwho = anonymous;",
        );
        assert_eq!(content.attributes.len(), 6);
        assert_eq!(content.attributes["x"].value, Value::Int(1));
        assert_eq!(content.attributes[".host"].value, Value::from("example.com"));
        assert_eq!(content.attributes["ok"].value, Value::Bool(true));
        assert_eq!(content.attributes["quorum"].value, Value::from("50%"));
        assert_eq!(content.attributes["net"].value, Value::from("\"10.0.0.0\"/8"));
        assert_eq!(content.attributes["who"].value, Value::from("anonymous"));
        assert!(content.blocks.is_empty());
        assert!(content.flats.is_empty());
    }

    #[test]
    fn test_last_attribute_wins() {
        let content = extract("x = 1; x = 2;");
        assert_eq!(content.attributes.len(), 1);
        assert_eq!(content.attributes["x"].value, Value::Int(2));
    }

    #[test]
    fn test_acl_block_with_flats() {
        let content = extract(r#"acl local { "local"; "localhost"; }"#);
        assert_eq!(content.blocks.len(), 1);

        let block = &content.blocks[0];
        assert_eq!(block.block_type, "acl");
        assert_eq!(block.labels, vec!["local"]);
        assert_eq!(
            scalars(&block.body.flats),
            vec![Value::from("local"), Value::from("localhost")]
        );
    }

    #[test]
    fn test_flat_scalars_keep_order() {
        let content = extract("acl a { local; 1; true; \"10.0.0.0\"/8; }");
        assert_eq!(
            scalars(&content.blocks[0].body.flats),
            vec![
                Value::from("local"),
                Value::Int(1),
                Value::Bool(true),
                Value::from("\"10.0.0.0\"/8"),
            ]
        );
    }

    #[test]
    fn test_director_with_object_flat() {
        let content = extract(
            "director my_dir random {\n  .quorum = 50%;\n  .retries = 3;\n  { .backend = K_backend1; .weight = 1; }\n}",
        );
        let director = &content.blocks[0];
        assert_eq!(director.block_type, "director");
        assert_eq!(director.labels, vec!["my_dir", "random"]);
        assert_eq!(director.body.attributes[".retries"].value, Value::Int(3));

        assert_eq!(director.body.flats.len(), 1);
        let object = director.body.flats[0].as_object().expect("object flat");
        assert_eq!(object.attributes[".backend"].value, Value::from("K_backend1"));
        assert_eq!(object.attributes[".weight"].value, Value::Int(1));
    }

    #[test]
    fn test_assigned_object_becomes_block() {
        let content = extract("backend server1 {\n  .probe = { .url = \"/\"; };\n}");
        let backend = &content.blocks[0];
        assert_eq!(backend.body.blocks.len(), 1);

        let probe = &backend.body.blocks[0];
        assert_eq!(probe.block_type, ".probe");
        assert!(probe.labels.is_empty());
        assert_eq!(probe.body.attributes[".url"].value, Value::from("/"));
        assert!(backend.body.attributes.is_empty());
    }

    #[test]
    fn test_label_only_blocks() {
        let content = extract("backend default none;\nimport directors;");
        assert_eq!(content.blocks.len(), 2);
        assert_eq!(content.blocks[0].labels, vec!["default", "none"]);
        assert!(content.blocks[0].body.is_empty());
        assert_eq!(content.blocks[1].block_type, "import");
        assert_eq!(content.blocks[1].labels, vec!["directors"]);
    }

    #[test]
    fn test_table_fields() {
        let content = extract("table my_id {\n  \"key1\": \"value 1\",\n  \"key2\": 2;\n}");
        let table = &content.blocks[0].body;
        assert_eq!(table.attributes["key1"].value, Value::from("value 1"));
        assert_eq!(table.attributes["key2"].value, Value::Int(2));
    }

    #[test]
    fn test_comments_stay_at_their_level() {
        let content = extract("# top\nacl a {\n  /* inner */\n  \"x\";\n}");
        assert_eq!(content.comments, vec!["top"]);
        assert_eq!(content.blocks[0].body.comments, vec!["inner"]);
    }

    #[test]
    fn test_procedural_statements_are_skipped() {
        let content = extract(
            "sub vcl_recv {\n  if (req.http.host) { return (pass); }\n  call other;\n  x = a + b;\n  !done;\n}",
        );
        let sub = &content.blocks[0];
        assert_eq!(sub.block_type, "sub");
        assert_eq!(sub.labels, vec!["vcl_recv"]);
        assert!(sub.body.is_empty(), "body: {:?}", sub.body);
    }

    #[test]
    fn test_nested_blocks_recurse() {
        let content = extract("director d round {\n  backend inner { .port = 80; }\n}");
        let inner = &content.blocks[0].body.blocks[0];
        assert_eq!(inner.block_type, "backend");
        assert_eq!(inner.body.attributes[".port"].value, Value::Int(80));
    }
}
