// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

/// A documented pipeline-template parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub description: String,
    pub param_type: String,
    // `None` when the template declares no default.
    pub default: Option<String>,
}

impl Parameter {
    pub fn required(&self) -> bool {
        self.default.is_none()
    }
}

/// Parameters of one template, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateDocument {
    pub parameters: Vec<Parameter>,
}
