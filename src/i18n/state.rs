// SPDX-License-Identifier: MPL-2.0
//! The published locale snapshot.

use super::registry::{is_test_code, Direction};
use super::tree::TranslationTree;
use std::sync::Arc;

/// Lifecycle of the active locale.
///
/// `Idle` only exists before the first switch; afterwards the state moves
/// between `Loading` and `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
}

/// Document-level locale attributes consumed by rendering layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAttributes {
    /// Text direction, rendered as `rtl` or `ltr`.
    pub dir: Direction,
    /// Language tag, equal to the active code.
    pub lang: String,
}

/// Everything a reader needs about the active locale, published as one
/// immutable value so a switch is never observed half-applied.
#[derive(Debug, Clone)]
pub struct LocaleState {
    pub code: String,
    pub tree: Arc<TranslationTree>,
    pub document: DocumentAttributes,
    pub phase: Phase,
}

impl LocaleState {
    pub(crate) fn idle(code: &str, dir: Direction, tree: Arc<TranslationTree>) -> Self {
        Self {
            code: code.to_string(),
            tree,
            document: DocumentAttributes {
                dir,
                lang: code.to_string(),
            },
            phase: Phase::Idle,
        }
    }

    /// True until a switch has settled.
    pub fn is_loading(&self) -> bool {
        self.phase != Phase::Ready
    }

    pub fn is_test_locale(&self) -> bool {
        is_test_code(&self.code)
    }
}
