// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Pulls parameter declarations out of a pipeline template.


use tracing::{debug, warn};

use crate::{
    error::Error,
    template::{Parameter, TemplateDocument},
    yaml_tree::{self, Node, NodeKind, NodeTag},
};

const PARAMETERS_KEY: &str = "parameters";

/// Parses a template and returns its parameters in declaration order.
///
/// Two declaration styles are understood. A sequence of objects:
///
/// ```yaml
/// parameters:
/// # Description of the parameter.
/// - name: graph
///   type: string
///   default: ""
/// ```
///
/// and a flat mapping of names to default values, with the type inferred from
/// the value:
///
/// ```yaml
/// parameters:
///   # Description of the parameter.
///   useRover: false
/// ```
///
/// A template without a `parameters` section yields an empty document.
pub fn parse(filename: &str, input: &[u8]) -> Result<TemplateDocument, Error> {
    let source = std::str::from_utf8(input).map_err(|source| Error::Encoding {
        filename: filename.to_string(),
        source,
    })?;

    let Some(root) = yaml_tree::load(filename, source)? else {
        debug!(filename, "template is empty");
        return Ok(TemplateDocument::default());
    };

    let Some(parameters_node) = find_parameters(&root) else {
        debug!(filename, "template has no parameters section");
        return Ok(TemplateDocument::default());
    };

    let parameters = match parameters_node.children.first() {
        None => Vec::new(),
        Some(first) if !first.children.is_empty() => parse_object_list(parameters_node),
        Some(_) => parse_flat_map(parameters_node),
    };

    debug!(filename, count = parameters.len(), "extracted parameters");
    Ok(TemplateDocument { parameters })
}

// The node following the `parameters` key of the root mapping.
fn find_parameters(root: &Node) -> Option<&Node> {
    if root.kind != NodeKind::Mapping {
        return None;
    }

    let index = root
        .children
        .iter()
        .step_by(2)
        .position(|key| key.is_scalar() && key.value == PARAMETERS_KEY)?;
    root.children.get(index * 2 + 1)
}

fn parse_object_list(parameters_node: &Node) -> Vec<Parameter> {
    parameters_node
        .children
        .iter()
        .map(|item| {
            let mut parameter = decode_object(item);
            parameter.description = strip_comment_markers(&item.head_comment);
            parameter
        })
        .collect()
}

// Decodes whatever fields are usable and leaves the rest at their defaults.
fn decode_object(item: &Node) -> Parameter {
    let mut parameter = Parameter::default();
    if item.kind != NodeKind::Mapping {
        debug!(line = item.line, "parameter entry is not a mapping");
        return parameter;
    }

    for (key, value) in item.entries() {
        match key.value.as_str() {
            "name" => {
                if let Some(name) = scalar_text(value) {
                    parameter.name = name;
                }
            }
            "type" => {
                if let Some(param_type) = scalar_text(value) {
                    parameter.param_type = param_type;
                }
            }
            "default" => {
                parameter.default = match value.kind {
                    NodeKind::Scalar if value.is_null() => None,
                    _ => Some(default_text(value)),
                };
            }
            _ => {}
        }
    }
    parameter
}

fn scalar_text(value: &Node) -> Option<String> {
    match value.kind {
        NodeKind::Scalar if value.is_null() => Some(String::new()),
        NodeKind::Scalar => Some(value.value.clone()),
        _ => {
            debug!(line = value.line, "expected a scalar field value");
            None
        }
    }
}

fn parse_flat_map(parameters_node: &Node) -> Vec<Parameter> {
    if parameters_node.children.len() % 2 != 0 {
        warn!(line = parameters_node.line, "dropping parameter key without a value");
    }

    parameters_node
        .entries()
        .map(|(key, value)| Parameter {
            name: key.value.clone(),
            description: key.head_comment.clone(),
            param_type: infer_type(value).to_string(),
            default: Some(default_text(value)),
        })
        .collect()
}

// Collections have no scalar text, so they are shown in flow style.
fn default_text(value: &Node) -> String {
    match value.kind {
        NodeKind::Scalar => value.value.clone(),
        _ => value.to_flow_string(),
    }
}

fn infer_type(value: &Node) -> &'static str {
    match value.tag {
        NodeTag::Str => "string",
        NodeTag::Bool => "boolean",
        _ => "",
    }
}

// Removes the leading "# " of every comment line.
fn strip_comment_markers(comment: &str) -> String {
    comment
        .lines()
        .map(|line| line.strip_prefix("# ").unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}
