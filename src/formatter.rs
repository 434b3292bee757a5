// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

#[cfg(test)]
mod tests;

use std::io::Write;

use crate::{
    error::Error,
    template::{Parameter, TemplateDocument},
};

const HEADER: [&str; 5] = ["Name", "Description", "Type", "Default", "Required"];
const LINE_BREAK: &str = "<br/>";

/// Writes the parameters as a pipe-delimited table, one row per parameter.
pub fn render(document: &TemplateDocument, writer: &mut impl Write) -> Result<(), Error> {
    let rows: Vec<[String; 5]> = document.parameters.iter().map(to_row).collect();

    let mut widths = HEADER.map(|title| title.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(writer, &HEADER, &widths)?;
    write_separator(writer, &widths)?;
    for row in &rows {
        write_row(writer, row, &widths)?;
    }
    Ok(())
}

fn to_row(parameter: &Parameter) -> [String; 5] {
    [
        parameter.name.clone(),
        parameter.description.replace("\r\n", "\n").replace('\n', LINE_BREAK),
        parameter.param_type.clone(),
        parameter.default.clone().unwrap_or_default(),
        parameter.required().to_string(),
    ]
}

fn write_row(writer: &mut impl Write, cells: &[impl AsRef<str>], widths: &[usize]) -> Result<(), Error> {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        line.push_str(&format!(" {:<width$} |", cell.as_ref(), width = *width));
    }
    writeln!(writer, "{}", line).map_err(Error::Write)
}

fn write_separator(writer: &mut impl Write, widths: &[usize]) -> Result<(), Error> {
    let mut line = String::from("|");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('|');
    }
    writeln!(writer, "{}", line).map_err(Error::Write)
}
