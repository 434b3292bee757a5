use std::io;

use super::*;

fn render_to_string(document: &TemplateDocument) -> String {
    let mut out = Vec::new();
    render(document, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn sample_document() -> TemplateDocument {
    TemplateDocument {
        parameters: vec![
            Parameter {
                name: "a".to_string(),
                description: "line one\nline two".to_string(),
                param_type: "string".to_string(),
                default: None,
            },
            Parameter {
                name: "flag".to_string(),
                description: String::new(),
                param_type: "boolean".to_string(),
                default: Some("false".to_string()),
            },
        ],
    }
}

#[test]
fn renders_rows_in_order() {
    let expected = concat!(
        "| Name | Description           | Type    | Default | Required |\n",
        "|------|-----------------------|---------|---------|----------|\n",
        "| a    | line one<br/>line two | string  |         | true     |\n",
        "| flag |                       | boolean | false   | false    |\n",
    );
    assert_eq!(render_to_string(&sample_document()), expected);
}

#[test]
fn empty_document_renders_header_only() {
    let expected = concat!(
        "| Name | Description | Type | Default | Required |\n",
        "|------|-------------|------|---------|----------|\n",
    );
    assert_eq!(render_to_string(&TemplateDocument::default()), expected);
}

#[test]
fn empty_default_and_missing_default_differ_only_in_required() {
    let document = TemplateDocument {
        parameters: vec![
            Parameter {
                name: "x".to_string(),
                default: Some(String::new()),
                ..Parameter::default()
            },
            Parameter {
                name: "y".to_string(),
                ..Parameter::default()
            },
        ],
    };

    let output = render_to_string(&document);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[2], "| x    |             |      |         | false    |");
    assert_eq!(lines[3], "| y    |             |      |         | true     |");
}

#[test]
fn windows_line_endings_become_line_breaks() {
    let document = TemplateDocument {
        parameters: vec![Parameter {
            name: "crlf".to_string(),
            description: "one\r\ntwo\r\nthree".to_string(),
            ..Parameter::default()
        }],
    };

    let output = render_to_string(&document);
    assert!(output.contains("| one<br/>two<br/>three |"));
    assert_eq!(output.lines().count(), 3);
}

#[test]
fn widths_count_characters() {
    let document = TemplateDocument {
        parameters: vec![Parameter {
            name: "größe".to_string(),
            ..Parameter::default()
        }],
    };

    let output = render_to_string(&document);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "| Name  | Description | Type | Default | Required |");
    assert_eq!(lines[2], "| größe |             |      |         | true     |");
}

#[test]
fn rendering_is_idempotent() {
    let document = sample_document();
    assert_eq!(render_to_string(&document), render_to_string(&document));
}

struct FailingWriter;

impl io::Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_failure_is_reported() {
    let result = render(&sample_document(), &mut FailingWriter);
    assert!(matches!(result, Err(Error::Write(ref err)) if err.kind() == io::ErrorKind::BrokenPipe));
}
