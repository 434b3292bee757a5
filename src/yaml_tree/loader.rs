// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::{cell::Cell, str::Chars};

use saphyr::Yaml;
use saphyr_parser::{Event, Marker, Parser as YamlParser, ScanError, TScalarStyle, Tag};
use tracing::debug;

use super::{Node, NodeKind, NodeTag};
use crate::error::Error;

const CORE_SCHEMA_PREFIX: &str = "tag:yaml.org,2002:";

/// Loads the first document of `source` into a node tree.
///
/// Returns `None` when the stream holds no document at all.
pub fn load(filename: &str, source: &str) -> Result<Option<Node>, Error> {
    let run = LoaderRun::new(source);
    run.load().map_err(|source| Error::Syntax {
        filename: filename.to_string(),
        source,
    })
}

struct LoaderRun<'a> {
    source: &'a str,
    lines: Vec<&'a str>,
    chars: Vec<char>,
    // Last source line taken up by a scalar parsed so far. Head comments never reach above it.
    consumed_through: Cell<usize>,
}

impl<'a> LoaderRun<'a> {
    fn new(source: &'a str) -> LoaderRun<'a> {
        LoaderRun {
            source,
            lines: source.lines().collect(),
            chars: source.chars().collect(),
            consumed_through: Cell::new(0),
        }
    }

    fn load(&self) -> Result<Option<Node>, ScanError> {
        let yaml_parser = &mut YamlParser::new(self.source.chars());

        // Skip stream and document markers until the root node.
        loop {
            let (event, _) = yaml_parser.peek()?;
            match event {
                Event::SequenceStart(..) | Event::MappingStart(..) | Event::Scalar(..) | Event::Alias(..) => {
                    let root = self.parse_node(yaml_parser)?;

                    // Parse DocumentEnd. Only the first document is read.
                    yaml_parser.next_token()?;
                    if !matches!(yaml_parser.peek()?, (Event::StreamEnd, _)) {
                        debug!("ignoring documents after the first");
                    }
                    return Ok(Some(root));
                }
                Event::StreamEnd => return Ok(None),
                _ => {
                    yaml_parser.next_token()?;
                }
            }
        }
    }

    fn parse_node(&self, yaml_parser: &mut YamlParser<Chars>) -> Result<Node, ScanError> {
        let (event, _) = yaml_parser.peek()?;
        match event {
            Event::SequenceStart(..) => self.parse_sequence(yaml_parser),
            Event::MappingStart(..) => self.parse_mapping(yaml_parser),
            Event::Scalar(..) => self.parse_scalar(yaml_parser),
            Event::Alias(..) => self.parse_alias(yaml_parser),
            _ => unreachable!(),
        }
    }

    fn parse_sequence(&self, yaml_parser: &mut YamlParser<Chars>) -> Result<Node, ScanError> {
        // Parse SequenceStart.
        let (seq_start, start) = yaml_parser.next_token()?;
        assert!(matches!(seq_start, Event::SequenceStart(..)));
        let floor = self.consumed_through.get();

        // Parse nodes.
        let mut children = Vec::new();
        loop {
            let (event, _) = yaml_parser.peek()?;
            match event {
                Event::SequenceEnd => break,
                _ => children.push(self.parse_node(yaml_parser)?),
            }
        }

        // Parse SequenceEnd.
        let (seq_end, _) = yaml_parser.next_token()?;
        assert!(matches!(seq_end, Event::SequenceEnd));

        Ok(self.collection(NodeKind::Sequence, NodeTag::Seq, &start, floor, children))
    }

    fn parse_mapping(&self, yaml_parser: &mut YamlParser<Chars>) -> Result<Node, ScanError> {
        // Parse MappingStart.
        let (map_start, start) = yaml_parser.next_token()?;
        assert!(matches!(map_start, Event::MappingStart(..)));
        let floor = self.consumed_through.get();

        // Parse entries. Keys and values alternate.
        let mut children = Vec::new();
        loop {
            let (event, _) = yaml_parser.peek()?;
            match event {
                Event::MappingEnd => break,
                _ => children.push(self.parse_node(yaml_parser)?),
            }
        }

        // Parse MappingEnd.
        let (map_end, _) = yaml_parser.next_token()?;
        assert!(matches!(map_end, Event::MappingEnd));

        Ok(self.collection(NodeKind::Mapping, NodeTag::Map, &start, floor, children))
    }

    fn parse_scalar(&self, yaml_parser: &mut YamlParser<Chars>) -> Result<Node, ScanError> {
        // Parse Scalar.
        let (scalar, start) = yaml_parser.next_token()?;
        let Event::Scalar(value, style, _, tag) = scalar else {
            unreachable!()
        };

        // The parser reports a missing value as a plain "~". Only a '~' actually present
        // in the source is kept as text.
        let is_plain = matches!(style, TScalarStyle::Plain);
        let value = if is_plain && value == "~" && self.chars.get(start.index()) != Some(&'~') {
            String::new()
        } else {
            value
        };

        let tag = match &tag {
            Some(tag) => Self::explicit_tag(tag),
            None if is_plain => Self::resolve_plain(&value),
            None => NodeTag::Str,
        };

        let line = start.line();
        let head_comment = self.head_comment(line, self.consumed_through.get());

        let end_line = match style {
            TScalarStyle::Literal | TScalarStyle::Folded => self.block_scalar_end(line),
            _ => line,
        };
        self.consumed_through.set(self.consumed_through.get().max(end_line));

        Ok(Node {
            kind: NodeKind::Scalar,
            tag,
            value,
            children: Vec::new(),
            head_comment,
            line,
        })
    }

    fn parse_alias(&self, yaml_parser: &mut YamlParser<Chars>) -> Result<Node, ScanError> {
        let (alias, start) = yaml_parser.next_token()?;
        assert!(matches!(alias, Event::Alias(..)));

        debug!(line = start.line(), "yaml aliases are not resolved");

        let line = start.line();
        Ok(Node {
            kind: NodeKind::Scalar,
            tag: NodeTag::Alias,
            value: String::new(),
            children: Vec::new(),
            head_comment: self.head_comment(line, self.consumed_through.get()),
            line,
        })
    }

    fn collection(&self, kind: NodeKind, tag: NodeTag, start: &Marker, floor: usize, children: Vec<Node>) -> Node {
        // In YAML, you don't know that you are parsing a map until you see the first colon ':' character.
        // So, the start mark can lie past the first key.
        let line = match children.first() {
            Some(first) if first.line < start.line() => first.line,
            _ => start.line(),
        };

        Node {
            kind,
            tag,
            value: String::new(),
            children,
            head_comment: self.head_comment(line, floor),
            line,
        }
    }

    // Collects the run of comment-only lines immediately above `line`, stopping at `floor`.
    fn head_comment(&self, line: usize, floor: usize) -> String {
        let above = line.saturating_sub(1).min(self.lines.len());
        let floor = floor.min(above);

        let mut comments: Vec<&str> = self.lines[floor..above]
            .iter()
            .rev()
            .map(|source_line| source_line.trim())
            .take_while(|source_line| source_line.starts_with('#'))
            .collect();
        comments.reverse();
        comments.join("\n")
    }

    // Last line of a `|` or `>` scalar whose indicator sits on `indicator_line`.
    // Content runs while lines are blank or indented at least as deep as the first content line.
    fn block_scalar_end(&self, indicator_line: usize) -> usize {
        let parent_indent = self.lines.get(indicator_line - 1).map_or(0, |line| Self::indent(line));

        let mut content = self.lines.iter().enumerate().skip(indicator_line);
        let Some((first, first_line)) = content.find(|(_, line)| !line.trim().is_empty()) else {
            return indicator_line;
        };
        let content_indent = Self::indent(first_line);
        if content_indent <= parent_indent {
            return indicator_line;
        }

        let mut end = first + 1;
        for (index, line) in content {
            if line.trim().is_empty() {
                continue;
            }
            if Self::indent(line) < content_indent {
                break;
            }
            end = index + 1;
        }
        end
    }

    fn indent(line: &str) -> usize {
        line.len() - line.trim_start_matches(' ').len()
    }

    fn explicit_tag(tag: &Tag) -> NodeTag {
        let is_core = tag.handle == "!!" || tag.handle == CORE_SCHEMA_PREFIX;
        match tag.suffix.as_str() {
            "str" if is_core => NodeTag::Str,
            "bool" if is_core => NodeTag::Bool,
            "int" if is_core => NodeTag::Int,
            "float" if is_core => NodeTag::Float,
            "null" if is_core => NodeTag::Null,
            _ => NodeTag::Other(format!("{}{}", tag.handle, tag.suffix)),
        }
    }

    fn resolve_plain(value: &str) -> NodeTag {
        if value.is_empty() {
            return NodeTag::Null;
        }

        match Yaml::from_str(value) {
            Yaml::Boolean(_) => NodeTag::Bool,
            Yaml::Integer(_) => NodeTag::Int,
            Yaml::Real(_) => NodeTag::Float,
            Yaml::Null => NodeTag::Null,
            _ => NodeTag::Str,
        }
    }
}
