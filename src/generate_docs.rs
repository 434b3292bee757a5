// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::io::Write;

use crate::{error::Error, extractor::parse, formatter::render};

/// Extracts the parameters of a template and writes them as a table.
///
/// Returns the number of parameters written.
pub fn generate_docs(filename: &str, template: &[u8], writer: &mut impl Write) -> Result<usize, Error> {
    let document = parse(filename, template)?;
    render(&document, writer)?;
    Ok(document.parameters.len())
}

#[cfg(test)]
pub fn generate_docs_string(filename: &str, template: &[u8]) -> Result<String, Error> {
    let mut out = Vec::new();
    generate_docs(filename, template, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
