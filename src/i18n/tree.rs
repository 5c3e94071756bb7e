// SPDX-License-Identifier: MPL-2.0
//! Nested translation data for one language.

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// A node of a translation tree: a display string or a nested table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    Text(String),
    Table(BTreeMap<String, TranslationNode>),
}

/// The whole translation table for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTree {
    root: BTreeMap<String, TranslationNode>,
}

impl TranslationTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a locale file. The top level must be a JSON object; values
    /// that are neither strings nor objects are dropped and can never
    /// resolve.
    pub fn from_json(code: &str, content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|e| Error::locale(code, e))?;
        match value {
            Value::Object(map) => Ok(Self {
                root: convert_object(map),
            }),
            other => Err(Error::locale(
                code,
                format!("expected a JSON object at top level, found {}", kind(&other)),
            )),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Walks `path` one dot-separated segment at a time.
    ///
    /// Returns `None` when a segment is absent, when an intermediate segment
    /// lands on a string, or when the walk ends on a table.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut node = self.root.get(first)?;
        for segment in segments {
            match node {
                TranslationNode::Table(children) => node = children.get(segment)?,
                TranslationNode::Text(_) => return None,
            }
        }
        match node {
            TranslationNode::Text(text) => Some(text),
            TranslationNode::Table(_) => None,
        }
    }

    /// Every dotted path that resolves to a string, in sorted order.
    pub fn key_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_paths(&self.root, &mut String::new(), &mut out);
        out
    }
}

fn convert_object(map: serde_json::Map<String, Value>) -> BTreeMap<String, TranslationNode> {
    map.into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key, TranslationNode::Text(text))),
            Value::Object(children) => Some((key, TranslationNode::Table(convert_object(children)))),
            other => {
                tracing::debug!(key = %key, kind = kind(&other), "skipping non-string translation value");
                None
            }
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn collect_paths(
    table: &BTreeMap<String, TranslationNode>,
    prefix: &mut String,
    out: &mut Vec<String>,
) {
    for (key, node) in table {
        let len = prefix.len();
        if !prefix.is_empty() {
            prefix.push('.');
        }
        prefix.push_str(key);
        match node {
            TranslationNode::Text(_) => out.push(prefix.clone()),
            TranslationNode::Table(children) => collect_paths(children, prefix, out),
        }
        prefix.truncate(len);
    }
}
