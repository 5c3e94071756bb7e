// SPDX-License-Identifier: MPL-2.0
//! The ordered set of languages offered to the user.

use crate::config::{BuildMode, DEFAULT_LANGUAGE_CODE, DEFAULT_LANGUAGE_LABEL, TEST_LANGUAGE_CODE};
use crate::error::{Error, Result};
use unic_langid::LanguageIdentifier;

/// Text direction of a language, mirrored into the document attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDescriptor {
    pub code: String,
    pub label: String,
    pub rtl: bool,
}

impl LanguageDescriptor {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            rtl: false,
        }
    }

    pub fn rtl(mut self) -> Self {
        self.rtl = true;
        self
    }

    pub fn direction(&self) -> Direction {
        if self.rtl {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    /// Whether this is one of the synthetic development locales.
    pub fn is_test_locale(&self) -> bool {
        is_test_code(&self.code)
    }
}

pub fn is_test_code(code: &str) -> bool {
    code.starts_with(TEST_LANGUAGE_CODE)
}

/// Static, ordered language list. Index 0 of the built-in languages is the
/// default; test locales, when present, are listed before it.
#[derive(Debug, Clone)]
pub struct Registry {
    languages: Vec<LanguageDescriptor>,
    default_index: usize,
}

impl Registry {
    /// Built-in languages, plus the test locales in development mode.
    pub fn new(mode: BuildMode) -> Self {
        let mut languages = vec![
            LanguageDescriptor::new(DEFAULT_LANGUAGE_CODE, DEFAULT_LANGUAGE_LABEL),
            LanguageDescriptor::new("pt-BR", "Português (Brasil)"),
            LanguageDescriptor::new("es", "Español"),
            LanguageDescriptor::new("ar", "العربية").rtl(),
        ];
        let mut default_index = 0;

        if mode.is_development() {
            let test_locales = [
                LanguageDescriptor::new(TEST_LANGUAGE_CODE, "test language"),
                LanguageDescriptor::new(
                    format!("{TEST_LANGUAGE_CODE}.rtl"),
                    "\u{202a}test language (rtl)\u{202c}",
                )
                .rtl(),
            ];
            default_index = test_locales.len();
            languages = test_locales.into_iter().chain(languages).collect();
        }

        Self {
            languages,
            default_index,
        }
    }

    /// Builds a registry from an explicit list. When `default_code` is not
    /// listed the first entry becomes the default.
    pub fn from_languages(languages: Vec<LanguageDescriptor>, default_code: &str) -> Result<Self> {
        if languages.is_empty() {
            return Err(Error::Config("registry needs at least one language".to_string()));
        }
        let default_index = languages
            .iter()
            .position(|lang| lang.code == default_code)
            .unwrap_or(0);
        Ok(Self {
            languages,
            default_index,
        })
    }

    pub fn list_languages(&self) -> &[LanguageDescriptor] {
        &self.languages
    }

    pub fn default_language(&self) -> &LanguageDescriptor {
        &self.languages[self.default_index]
    }

    pub fn find(&self, code: &str) -> Option<&LanguageDescriptor> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Looks up `code`, falling back to the default language.
    pub fn resolve(&self, code: &str) -> &LanguageDescriptor {
        self.find(code).unwrap_or_else(|| {
            tracing::debug!(code, "unknown language code, using default");
            self.default_language()
        })
    }

    /// Picks a registered language for an OS or user locale tag such as
    /// `es_MX.UTF-8` or `pt-BR`: exact tag first, then primary language.
    /// Test locales never match.
    pub fn match_locale(&self, tag: &str) -> Option<&LanguageDescriptor> {
        let cleaned = tag.split('.').next().unwrap_or(tag).replace('_', "-");
        let wanted: LanguageIdentifier = cleaned.parse().ok()?;

        let candidates = || {
            self.languages
                .iter()
                .filter(|lang| !lang.is_test_locale())
                .filter_map(|lang| {
                    lang.code
                        .parse::<LanguageIdentifier>()
                        .ok()
                        .map(|id| (lang, id))
                })
        };

        candidates()
            .find(|(_, id)| *id == wanted)
            .or_else(|| candidates().find(|(_, id)| id.language == wanted.language))
            .map(|(lang, _)| lang)
    }
}
