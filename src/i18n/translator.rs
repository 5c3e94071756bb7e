// SPDX-License-Identifier: MPL-2.0
//! Key path resolution against the active and fallback trees.

use super::registry::{is_test_code, Direction};
use super::state::LocaleState;
use super::tree::TranslationTree;
use crate::config::BuildMode;
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Values substituted into `{{key}}` placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substitutions(Map<String, Value>);

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the value for `key`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replaces every `{{key}}` in `template` in a single left-to-right
    /// pass. Inserted values are never scanned again, and placeholders with
    /// no matching key are kept verbatim.
    pub fn apply(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            match self.0.iter().find(|(key, _)| is_placeholder_for(tail, key)) {
                Some((key, value)) => {
                    out.push_str(&display_value(value));
                    rest = &tail[key.len() + 4..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }

    /// `"k":"v",...` rendering used by the test locale echo.
    fn echo_arguments(&self) -> String {
        let json = Value::Object(self.0.clone()).to_string();
        json[1..json.len() - 1].to_string()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Substitutions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn is_placeholder_for(tail: &str, key: &str) -> bool {
    tail.starts_with("{{") && tail[2..].starts_with(key) && tail[2 + key.len()..].starts_with("}}")
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Resolves key paths for one published [`LocaleState`].
///
/// A translator is a cheap snapshot: it keeps reading the tree it was
/// created with even if a language switch publishes a new one.
#[derive(Debug, Clone)]
pub struct Translator {
    state: Arc<LocaleState>,
    fallback: Arc<TranslationTree>,
    mode: BuildMode,
}

impl Translator {
    pub fn new(state: Arc<LocaleState>, fallback: Arc<TranslationTree>, mode: BuildMode) -> Self {
        Self {
            state,
            fallback,
            mode,
        }
    }

    pub fn code(&self) -> &str {
        &self.state.code
    }

    /// Resolves `path` without substitutions or fallback text.
    #[track_caller]
    pub fn translate(&self, path: &str) -> String {
        self.translate_with(path, None, None)
    }

    /// Resolves `path`, reporting a missing translation per build mode:
    /// development panics, production logs a warning and yields `""`.
    #[track_caller]
    pub fn translate_with(
        &self,
        path: &str,
        substitutions: Option<&Substitutions>,
        fallback_text: Option<&str>,
    ) -> String {
        match self.try_translate(path, substitutions, fallback_text) {
            Ok(text) => text,
            Err(err) if self.mode.is_development() => panic!("{err}"),
            Err(err) => {
                tracing::warn!(path, code = %self.state.code, "{err}");
                String::new()
            }
        }
    }

    /// Resolves `path`, returning [`Error::MissingTranslation`] when neither
    /// tree nor `fallback_text` provides a string.
    pub fn try_translate(
        &self,
        path: &str,
        substitutions: Option<&Substitutions>,
        fallback_text: Option<&str>,
    ) -> Result<String> {
        if is_test_code(&self.state.code) {
            return Ok(self.echo(path, substitutions));
        }

        let resolved = self
            .state
            .tree
            .lookup(path)
            .or_else(|| self.fallback.lookup(path))
            .or(fallback_text)
            .ok_or_else(|| Error::MissingTranslation(path.to_string()))?;

        Ok(match substitutions {
            Some(subs) => subs.apply(resolved),
            None => resolved.to_string(),
        })
    }

    fn echo(&self, path: &str, substitutions: Option<&Substitutions>) -> String {
        let name = match substitutions {
            Some(subs) => format!("{path}({})", subs.echo_arguments()),
            None => path.to_string(),
        };
        match self.state.document.dir {
            Direction::Rtl => format!("\u{202a}[[{name}]]\u{202c}"),
            Direction::Ltr => format!("[[{name}]]"),
        }
    }
}
