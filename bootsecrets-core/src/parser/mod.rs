//! Loading configuration documents into [`ConfigNode`] trees and rendering them back.
//!
//! YAML carries the two shapes JSON cannot express through local tags:
//! `!tuple [..]` for tuples and `!atom name` for symbols.

use serde_yaml::value::{Tag, TaggedValue};

use crate::error::ParseError;
use crate::node::ConfigNode;

const TUPLE_TAG: &str = "!tuple";
const ATOM_TAG: &str = "!atom";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedConfig {
    pub root: ConfigNode,
    pub format: ConfigFormat,
}

pub fn parse_config_str(input: &str, format: ConfigFormat) -> Result<ParsedConfig, ParseError> {
    match format {
        ConfigFormat::Json => Ok(ParsedConfig {
            root: parse_json(input)?,
            format,
        }),
        ConfigFormat::Yaml => Ok(ParsedConfig {
            root: parse_yaml(input)?,
            format,
        }),
        ConfigFormat::Auto => parse_config_auto(input),
    }
}

fn parse_config_auto(input: &str) -> Result<ParsedConfig, ParseError> {
    // JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match parse_json(input) {
            Ok(root) => Ok(ParsedConfig {
                root,
                format: ConfigFormat::Json,
            }),
            Err(json_err) => match parse_yaml(input) {
                Ok(root) => Ok(ParsedConfig {
                    root,
                    format: ConfigFormat::Yaml,
                }),
                Err(_) => Err(json_err),
            },
        };
    }

    match parse_yaml(input) {
        Ok(root) => Ok(ParsedConfig {
            root,
            format: ConfigFormat::Yaml,
        }),
        Err(yaml_err) => match parse_json(input) {
            Ok(root) => Ok(ParsedConfig {
                root,
                format: ConfigFormat::Json,
            }),
            Err(_) => Err(yaml_err),
        },
    }
}

fn parse_json(input: &str) -> Result<ConfigNode, ParseError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    from_json_value(&value)
}

fn parse_yaml(input: &str) -> Result<ConfigNode, ParseError> {
    let value: serde_yaml::Value = serde_yaml::from_str(input)?;
    from_yaml_value(&value)
}

pub fn from_json_value(value: &serde_json::Value) -> Result<ConfigNode, ParseError> {
    use serde_json::Value;
    Ok(match value {
        Value::Null => ConfigNode::Null,
        Value::Bool(b) => ConfigNode::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ConfigNode::Integer(i)
            } else if let Some(u) = n.as_u64() {
                ConfigNode::Unsigned(u)
            } else {
                ConfigNode::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => ConfigNode::String(s.clone()),
        Value::Array(items) => ConfigNode::List(
            items
                .iter()
                .map(from_json_value)
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => ConfigNode::Map(
            map.iter()
                .map(|(k, v)| Ok((ConfigNode::String(k.clone()), from_json_value(v)?)))
                .collect::<Result<_, ParseError>>()?,
        ),
    })
}

pub fn from_yaml_value(value: &serde_yaml::Value) -> Result<ConfigNode, ParseError> {
    use serde_yaml::Value;
    Ok(match value {
        Value::Null => ConfigNode::Null,
        Value::Bool(b) => ConfigNode::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ConfigNode::Integer(i)
            } else if let Some(u) = n.as_u64() {
                ConfigNode::Unsigned(u)
            } else {
                ConfigNode::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => ConfigNode::String(s.clone()),
        Value::Sequence(items) => ConfigNode::List(
            items
                .iter()
                .map(from_yaml_value)
                .collect::<Result<_, _>>()?,
        ),
        Value::Mapping(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (k, v) in map {
                entries.push((yaml_key(k)?, from_yaml_value(v)?));
            }
            ConfigNode::Map(entries)
        }
        Value::Tagged(tagged) => from_tagged(tagged)?,
    })
}

fn from_tagged(tagged: &TaggedValue) -> Result<ConfigNode, ParseError> {
    use serde_yaml::Value;
    if tagged.tag == TUPLE_TAG {
        match &tagged.value {
            Value::Sequence(items) => Ok(ConfigNode::Tuple(
                items
                    .iter()
                    .map(from_yaml_value)
                    .collect::<Result<_, _>>()?,
            )),
            _ => Err(ParseError::UnsupportedTag(format!(
                "{} on a non-sequence value",
                tagged.tag
            ))),
        }
    } else if tagged.tag == ATOM_TAG {
        match &tagged.value {
            Value::String(s) if !s.is_empty() => Ok(ConfigNode::Symbol(s.clone())),
            other => Err(ParseError::InvalidAtom(format!("{other:?}"))),
        }
    } else {
        Err(ParseError::UnsupportedTag(tagged.tag.to_string()))
    }
}

fn yaml_key(key: &serde_yaml::Value) -> Result<ConfigNode, ParseError> {
    use serde_yaml::Value;
    match key {
        Value::Sequence(_) => Err(ParseError::UnsupportedKey("sequence".to_string())),
        Value::Mapping(_) => Err(ParseError::UnsupportedKey("mapping".to_string())),
        Value::Tagged(t) if t.tag == TUPLE_TAG => {
            Err(ParseError::UnsupportedKey(t.tag.to_string()))
        }
        scalar => from_yaml_value(scalar),
    }
}

/// Render a tree as YAML, keeping tuples and symbols tagged.
pub fn to_yaml_value(node: &ConfigNode) -> serde_yaml::Value {
    use serde_yaml::Value;
    match node {
        ConfigNode::Null => Value::Null,
        ConfigNode::Bool(b) => Value::Bool(*b),
        ConfigNode::Integer(i) => Value::Number((*i).into()),
        ConfigNode::Unsigned(u) => Value::Number((*u).into()),
        ConfigNode::Float(f) => Value::Number((*f).into()),
        ConfigNode::String(s) => Value::String(s.clone()),
        ConfigNode::Symbol(s) => Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(ATOM_TAG),
            value: Value::String(s.clone()),
        })),
        ConfigNode::List(items) => Value::Sequence(items.iter().map(to_yaml_value).collect()),
        ConfigNode::Map(entries) => Value::Mapping(
            entries
                .iter()
                .map(|(k, v)| (to_yaml_value(k), to_yaml_value(v)))
                .collect(),
        ),
        ConfigNode::Tuple(items) => Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(TUPLE_TAG),
            value: Value::Sequence(items.iter().map(to_yaml_value).collect()),
        })),
    }
}

/// Render a tree as JSON. Tuples become arrays, symbols become strings and
/// map keys become their text, so the result cannot be parsed back into the
/// same tree.
pub fn to_json_value(node: &ConfigNode) -> serde_json::Value {
    use serde_json::Value;
    match node {
        ConfigNode::Null => Value::Null,
        ConfigNode::Bool(b) => Value::Bool(*b),
        ConfigNode::Integer(i) => Value::Number((*i).into()),
        ConfigNode::Unsigned(u) => Value::Number((*u).into()),
        ConfigNode::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ConfigNode::String(s) | ConfigNode::Symbol(s) => Value::String(s.clone()),
        ConfigNode::List(items) | ConfigNode::Tuple(items) => {
            Value::Array(items.iter().map(to_json_value).collect())
        }
        ConfigNode::Map(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.key_text(), to_json_value(v)))
                .collect(),
        ),
    }
}
