//! Call-site extraction.
//!
//! Only syntactically nameable calls are kept: a bare identifier (`f()`) or
//! the property of a member expression (`obj.f()`, `this.f()`,
//! `a.b.f()`). Computed and dynamic callees are counted but not resolved.

use tree_sitter::Node;

use super::functions::{function_identity, is_function_like};
use super::types::{start_line, ParsedFile};
use crate::call_graph::types::Entity;

/// One call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Id of the innermost enclosing entity, `None` for top-level code.
    pub caller_id: Option<String>,
    pub callee_name: String,
    /// Receiver text for member calls, e.g. `this` or `api.client`.
    pub receiver: Option<String>,
    pub line: u32,
}

/// Call sites of one file, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCalls {
    pub sites: Vec<CallSite>,
    /// Calls whose callee has no static name (`fns[i]()`, `(a || b)()`).
    pub dynamic_calls: usize,
}

pub fn extract_call_sites(file: &ParsedFile) -> FileCalls {
    let mut calls = FileCalls::default();
    let mut stack = vec![file.root_node()];

    while let Some(node) = stack.pop() {
        if node.kind() == "call_expression" {
            match callee(node, file) {
                Some((callee_name, receiver)) => calls.sites.push(CallSite {
                    caller_id: containing_entity(node, file),
                    callee_name,
                    receiver,
                    line: start_line(node),
                }),
                None => calls.dynamic_calls += 1,
            }
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    calls
}

fn callee(call: Node<'_>, file: &ParsedFile) -> Option<(String, Option<String>)> {
    let function = call.child_by_field_name("function")?;
    match function.kind() {
        "identifier" => Some((file.text(function).to_string(), None)),
        "member_expression" => {
            let property = function.child_by_field_name("property")?;
            if !matches!(property.kind(), "property_identifier" | "private_property_identifier") {
                return None;
            }
            let receiver = function
                .child_by_field_name("object")
                .map(|o| file.text(o).to_string());
            Some((file.text(property).to_string(), receiver))
        }
        _ => None,
    }
}

/// Id of the nearest ancestor that is itself an entity. Unbound function
/// literals are walked through, so a call inside `items.map(x => f(x))`
/// belongs to the function containing the `map` call.
fn containing_entity(node: Node<'_>, file: &ParsedFile) -> Option<String> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if is_function_like(ancestor.kind()) {
            if let Some(identity) = function_identity(ancestor, file) {
                return Some(Entity::make_id(
                    &file.relative_path,
                    &identity.name,
                    identity.start_line,
                ));
            }
        }
        current = ancestor.parent();
    }
    None
}
