// SPDX-License-Identifier: MPL-2.0
//! Key coverage of a locale against the default language tree.

use super::registry::Registry;
use super::source::LocaleSource;
use super::tree::TranslationTree;
use crate::error::Result;
use std::collections::BTreeSet;

/// Keys a locale lacks or carries beyond the reference tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    pub code: String,
    /// Paths present in the reference but absent from the locale.
    pub missing: Vec<String>,
    /// Paths present in the locale but unknown to the reference.
    pub extra: Vec<String>,
}

impl Coverage {
    /// True when nothing is missing. Extra keys do not count against it.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

pub fn compare(code: &str, reference: &TranslationTree, candidate: &TranslationTree) -> Coverage {
    let expected: BTreeSet<String> = reference.key_paths().into_iter().collect();
    let present: BTreeSet<String> = candidate.key_paths().into_iter().collect();

    Coverage {
        code: code.to_string(),
        missing: expected.difference(&present).cloned().collect(),
        extra: present.difference(&expected).cloned().collect(),
    }
}

/// Checks every real, non-default language of `registry` in registry order.
pub async fn check_all(
    registry: &Registry,
    source: &LocaleSource,
    reference: &TranslationTree,
) -> Vec<(String, Result<Coverage>)> {
    let default_code = &registry.default_language().code;
    let mut reports = Vec::new();
    for language in registry.list_languages() {
        if language.is_test_locale() || &language.code == default_code {
            continue;
        }
        let report = source
            .load(&language.code)
            .await
            .map(|tree| compare(&language.code, reference, &tree));
        reports.push((language.code.clone(), report));
    }
    reports
}

/// Codes `source` has documents for that `registry` does not list.
pub fn unregistered(registry: &Registry, source: &LocaleSource) -> Result<Vec<String>> {
    Ok(source
        .available_codes()?
        .into_iter()
        .filter(|code| registry.find(code).is_none())
        .collect())
}
