// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration and locale handling.

// ==========================================================================
// Locale Defaults
// ==========================================================================

/// Code of the language whose data is always bundled and used as fallback.
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Display label of the default language.
pub const DEFAULT_LANGUAGE_LABEL: &str = "English";

/// Storage slot holding the last requested language code.
pub const LANGUAGE_STORAGE_KEY: &str = "lang";

/// Code prefix reserved for the synthetic development locales.
pub const TEST_LANGUAGE_CODE: &str = "__test__";

// ==========================================================================
// Switch Timing Defaults
// ==========================================================================

/// Minimum time a language switch stays in the loading phase (milliseconds).
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 100;

/// Upper bound accepted for the settling delay (milliseconds).
pub const MAX_SETTLE_DELAY_MS: u64 = 5_000;
