// SPDX-License-Identifier: MPL-2.0
//! Where locale files come from.

use super::tree::TranslationTree;
use crate::config::{I18nConfig, DEFAULT_LANGUAGE_CODE};
use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(RustEmbed)]
#[folder = "assets/locales/"]
struct Asset;

/// A provider of `<code>.json` locale documents.
#[derive(Debug, Clone, Default)]
pub enum LocaleSource {
    /// Files compiled into the binary from `assets/locales/`.
    #[default]
    Embedded,
    /// Files read from a directory at switch time.
    Directory(PathBuf),
    /// Documents held in memory, keyed by language code.
    Memory(HashMap<String, String>),
}

impl LocaleSource {
    /// Directory override from settings, else the embedded files.
    pub fn from_config(config: &I18nConfig) -> Self {
        match &config.locales_dir {
            Some(dir) => LocaleSource::Directory(dir.clone()),
            None => LocaleSource::Embedded,
        }
    }

    /// Fetches and parses the document for `code`.
    pub async fn load(&self, code: &str) -> Result<TranslationTree> {
        let content = match self {
            LocaleSource::Embedded => embedded_document(code)?,
            LocaleSource::Directory(dir) => {
                let path = dir.join(format!("{code}.json"));
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| Error::locale(code, format!("{}: {}", path.display(), e)))?
            }
            LocaleSource::Memory(documents) => documents
                .get(code)
                .cloned()
                .ok_or_else(|| Error::locale(code, "no such document"))?,
        };
        TranslationTree::from_json(code, &content)
    }

    /// Codes this source has documents for, sorted.
    pub fn available_codes(&self) -> Result<Vec<String>> {
        let mut codes: Vec<String> = match self {
            LocaleSource::Embedded => Asset::iter()
                .filter_map(|file| file.strip_suffix(".json").map(str::to_string))
                .collect(),
            LocaleSource::Directory(dir) => {
                let mut codes = Vec::new();
                for entry in std::fs::read_dir(dir)? {
                    let name = entry?.file_name();
                    if let Some(code) = name.to_string_lossy().strip_suffix(".json") {
                        codes.push(code.to_string());
                    }
                }
                codes
            }
            LocaleSource::Memory(documents) => documents.keys().cloned().collect(),
        };
        codes.sort();
        Ok(codes)
    }
}

fn embedded_document(code: &str) -> Result<String> {
    let file = Asset::get(&format!("{code}.json"))
        .ok_or_else(|| Error::locale(code, "no embedded locale file"))?;
    String::from_utf8(file.data.into_owned()).map_err(|e| Error::locale(code, e))
}

/// The always-available default language tree, parsed from the embedded
/// `en.json` regardless of which source serves the other languages.
pub fn fallback_tree() -> Result<TranslationTree> {
    let content = embedded_document(DEFAULT_LANGUAGE_CODE)?;
    TranslationTree::from_json(DEFAULT_LANGUAGE_CODE, &content)
}
