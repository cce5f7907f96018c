//! Function-like entity extraction.
//!
//! An entity is a named function: a declaration, a class or object method,
//! or an arrow/function expression bound to a name (variable declarator,
//! object pair, assignment, class field). Unbound literals such as inline
//! callbacks are not entities; calls inside them belong to the nearest
//! enclosing entity.

use tree_sitter::Node;

use super::types::{end_line, start_line, ParsedFile};
use crate::call_graph::types::{Entity, EntityKind};

/// Name, kind, and start line: everything needed to rebuild an entity id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FunctionIdentity {
    pub name: String,
    pub kind: EntityKind,
    pub start_line: u32,
}

/// Node kinds that introduce a function body.
pub(crate) fn is_function_like(kind: &str) -> bool {
    matches!(
        kind,
        "function_declaration"
            | "generator_function_declaration"
            | "method_definition"
            | "arrow_function"
            | "function_expression"
            | "function"
            | "generator_function"
    )
}

/// Identity of a function-like node, or `None` when it has no usable name.
pub(crate) fn function_identity(node: Node<'_>, file: &ParsedFile) -> Option<FunctionIdentity> {
    let (name, kind) = match node.kind() {
        "function_declaration" | "generator_function_declaration" => {
            let name = node.child_by_field_name("name")?;
            (file.text(name).to_string(), EntityKind::Declaration)
        }
        "method_definition" => (method_name(node, file)?, EntityKind::Method),
        "arrow_function" => (binding_name(node, file)?, EntityKind::Arrow),
        "function_expression" | "function" | "generator_function" => {
            (binding_name(node, file)?, EntityKind::Expression)
        }
        _ => return None,
    };
    if name.is_empty() {
        return None;
    }
    Some(FunctionIdentity {
        name,
        kind,
        start_line: start_line(node),
    })
}

/// Every entity in `file`, in document order. Entities nest: a method's
/// inner named arrow is an entity of its own.
pub fn extract_entities(file: &ParsedFile) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut stack = vec![file.root_node()];

    while let Some(node) = stack.pop() {
        if is_function_like(node.kind()) {
            if let Some(identity) = function_identity(node, file) {
                entities.push(Entity::new(
                    identity.name,
                    file.relative_path.clone(),
                    file.group.clone(),
                    identity.kind,
                    identity.start_line,
                    end_line(node),
                    parameters(node, file),
                ));
            }
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    entities
}

fn method_name(node: Node<'_>, file: &ParsedFile) -> Option<String> {
    let name = node.child_by_field_name("name")?;
    match name.kind() {
        "property_identifier" | "private_property_identifier" | "identifier" | "number" => {
            Some(file.text(name).to_string())
        }
        "string" => Some(unquote(file.text(name))),
        // `[Symbol.iterator]()` and friends have no static name.
        _ => None,
    }
}

/// Name a function literal is bound to by its immediate syntactic parent.
fn binding_name(node: Node<'_>, file: &ParsedFile) -> Option<String> {
    let mut value = node;
    let mut parent = node.parent()?;
    while is_transparent_wrapper(parent.kind()) {
        value = parent;
        parent = parent.parent()?;
    }

    match parent.kind() {
        "variable_declarator" => {
            if parent.child_by_field_name("value") != Some(value) {
                return None;
            }
            let name = parent.child_by_field_name("name")?;
            (name.kind() == "identifier").then(|| file.text(name).to_string())
        }
        "pair" => {
            if parent.child_by_field_name("value") != Some(value) {
                return None;
            }
            let key = parent.child_by_field_name("key")?;
            match key.kind() {
                "property_identifier" | "identifier" | "number" => Some(file.text(key).to_string()),
                "string" => Some(unquote(file.text(key))),
                _ => None,
            }
        }
        "assignment_expression" => {
            if parent.child_by_field_name("right") != Some(value) {
                return None;
            }
            let left = parent.child_by_field_name("left")?;
            match left.kind() {
                "identifier" => Some(file.text(left).to_string()),
                "member_expression" => {
                    let property = left.child_by_field_name("property")?;
                    Some(file.text(property).to_string())
                }
                _ => None,
            }
        }
        "public_field_definition" | "field_definition" => {
            if parent.child_by_field_name("value") != Some(value) {
                return None;
            }
            let name = parent
                .child_by_field_name("name")
                .or_else(|| parent.child_by_field_name("property"))?;
            match name.kind() {
                "property_identifier" | "private_property_identifier" => {
                    Some(file.text(name).to_string())
                }
                "string" => Some(unquote(file.text(name))),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Expressions that wrap a value without changing what it is bound to:
/// `(f)`, `f as T`, `f satisfies T`, `f!`, `<T>f`.
fn is_transparent_wrapper(kind: &str) -> bool {
    matches!(
        kind,
        "parenthesized_expression"
            | "as_expression"
            | "satisfies_expression"
            | "non_null_expression"
            | "type_assertion"
    )
}

/// Parameter names as written, defaults and type annotations dropped.
fn parameters(node: Node<'_>, file: &ParsedFile) -> Vec<String> {
    if let Some(single) = node.child_by_field_name("parameter") {
        return vec![file.text(single).to_string()];
    }
    let Some(list) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };

    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter_map(|param| parameter_text(param, file))
        .collect()
}

fn parameter_text(param: Node<'_>, file: &ParsedFile) -> Option<String> {
    let target = match param.kind() {
        "comment" | "decorator" => return None,
        "required_parameter" | "optional_parameter" => param.child_by_field_name("pattern")?,
        "assignment_pattern" => param.child_by_field_name("left")?,
        _ => param,
    };
    let text = match target.kind() {
        "assignment_pattern" => file.text(target.child_by_field_name("left")?),
        _ => file.text(target),
    };
    Some(normalize_whitespace(text))
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn unquote(text: &str) -> String {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`').to_string()
}
