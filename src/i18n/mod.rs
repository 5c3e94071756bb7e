// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! Translations are nested JSON tables addressed by dotted key paths such as
//! `messages.hello`. One language is active at a time; lookups that miss in
//! the active tree retry against the bundled default language.
//!
//! # Features
//!
//! - Ordered language registry with right-to-left flags
//! - Runtime language switching with a published loading phase
//! - Fallback to the default locale for missing keys or unloadable files
//! - `{{placeholder}}` substitution
//! - Synthetic test locales in development mode that echo key paths
//!
//! # Examples
//!
//! ```no_run
//! use lingo::i18n::{I18n, Substitutions};
//!
//! # async fn demo() -> lingo::error::Result<()> {
//! let i18n = I18n::builder().build().await?;
//! i18n.request_language_change("es").await;
//! let subs = Substitutions::new().with("name", "Ana");
//! println!("{}", i18n.translate_with("messages.welcome", Some(&subs), None));
//! # Ok(())
//! # }
//! ```

pub mod coverage;
pub mod registry;
pub mod source;
pub mod state;
pub mod store;
pub mod switcher;
pub mod translator;
pub mod tree;

pub use registry::{Direction, LanguageDescriptor, Registry};
pub use source::LocaleSource;
pub use state::{DocumentAttributes, LocaleState, Phase};
pub use store::{I18n, I18nBuilder};
pub use translator::{Substitutions, Translator};
pub use tree::{TranslationNode, TranslationTree};
