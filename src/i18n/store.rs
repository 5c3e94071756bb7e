// SPDX-License-Identifier: MPL-2.0
//! The handle handed to UI code.

use super::registry::{LanguageDescriptor, Registry};
use super::source::{fallback_tree, LocaleSource};
use super::state::{DocumentAttributes, LocaleState};
use super::switcher::Switcher;
use super::translator::{Substitutions, Translator};
use super::tree::TranslationTree;
use crate::config::{BuildMode, Config, DEFAULT_SETTLE_DELAY_MS, LANGUAGE_STORAGE_KEY};
use crate::error::Result;
use crate::storage::{FileStorage, MemoryStorage, Storage};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Shared access to the active locale. Cloning is cheap; all clones see
/// the same state.
#[derive(Clone)]
pub struct I18n {
    switcher: Arc<Switcher>,
    mode: BuildMode,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("mode", &self.mode)
            .field("state", &self.switcher.current())
            .finish()
    }
}

impl I18n {
    pub fn builder() -> I18nBuilder {
        I18nBuilder::default()
    }

    /// Builds the store the way the binary does: settings from `config`,
    /// the remembered language from `storage.toml` in the data directory.
    pub async fn from_config(config: &Config, cli_lang: Option<String>) -> Result<Self> {
        I18n::builder()
            .mode(config.general.mode)
            .settle_delay(config.i18n.settle_delay())
            .source(LocaleSource::from_config(&config.i18n))
            .storage(Arc::new(FileStorage::open_default()?))
            .cli_language(cli_lang)
            .detect_system_locale(true)
            .build()
            .await
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn registry(&self) -> &Registry {
        self.switcher.registry()
    }

    pub fn list_languages(&self) -> &[LanguageDescriptor] {
        self.switcher.registry().list_languages()
    }

    pub fn default_language(&self) -> &LanguageDescriptor {
        self.switcher.registry().default_language()
    }

    pub fn current_language_code(&self) -> String {
        self.switcher.current().code.clone()
    }

    pub fn document(&self) -> DocumentAttributes {
        self.switcher.current().document.clone()
    }

    /// True while a language switch is in flight. Render gates on this.
    pub fn is_loading(&self) -> bool {
        self.switcher.current().is_loading()
    }

    /// Notifies on every published snapshot (loading and settled).
    pub fn subscribe(&self) -> watch::Receiver<Arc<LocaleState>> {
        self.switcher.subscribe()
    }

    /// Switches language and resolves once the switch has settled. A
    /// switch that has started settles even if this future is dropped.
    pub async fn request_language_change(&self, code: &str) {
        self.switcher.switch_language(code).await;
    }

    /// Snapshot translator for the current state.
    pub fn translator(&self) -> Translator {
        Translator::new(
            self.switcher.current(),
            Arc::clone(self.switcher.fallback()),
            self.mode,
        )
    }

    #[track_caller]
    pub fn translate(&self, path: &str) -> String {
        self.translator().translate(path)
    }

    #[track_caller]
    pub fn translate_with(
        &self,
        path: &str,
        substitutions: Option<&Substitutions>,
        fallback_text: Option<&str>,
    ) -> String {
        self.translator()
            .translate_with(path, substitutions, fallback_text)
    }

    pub fn try_translate(
        &self,
        path: &str,
        substitutions: Option<&Substitutions>,
        fallback_text: Option<&str>,
    ) -> Result<String> {
        self.translator()
            .try_translate(path, substitutions, fallback_text)
    }
}

/// Assembles an [`I18n`] and performs the startup switch.
pub struct I18nBuilder {
    mode: BuildMode,
    registry: Option<Registry>,
    source: LocaleSource,
    storage: Arc<dyn Storage>,
    fallback: Option<TranslationTree>,
    settle_delay: Duration,
    cli_lang: Option<String>,
    detect_system_locale: bool,
}

impl Default for I18nBuilder {
    fn default() -> Self {
        Self {
            mode: BuildMode::default(),
            registry: None,
            source: LocaleSource::default(),
            storage: Arc::new(MemoryStorage::new()),
            fallback: None,
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            cli_lang: None,
            detect_system_locale: false,
        }
    }
}

impl I18nBuilder {
    pub fn mode(mut self, mode: BuildMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replaces the built-in language list for this mode.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn source(mut self, source: LocaleSource) -> Self {
        self.source = source;
        self
    }

    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = storage;
        self
    }

    /// Replaces the embedded default language tree.
    pub fn fallback_tree(mut self, tree: TranslationTree) -> Self {
        self.fallback = Some(tree);
        self
    }

    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Language to start with, taking precedence over the stored one.
    pub fn cli_language(mut self, code: Option<String>) -> Self {
        self.cli_lang = code;
        self
    }

    /// Consult the OS locale when neither CLI nor storage names a language.
    pub fn detect_system_locale(mut self, enabled: bool) -> Self {
        self.detect_system_locale = enabled;
        self
    }

    /// Builds the store and switches to the initial language before
    /// returning, so callers never see the `Idle` phase.
    pub async fn build(self) -> Result<I18n> {
        let fallback = match self.fallback {
            Some(tree) => tree,
            None => fallback_tree()?,
        };
        let registry = Arc::new(self.registry.unwrap_or_else(|| Registry::new(self.mode)));
        let initial = initial_language(
            &registry,
            self.storage.as_ref(),
            self.cli_lang.as_deref(),
            self.detect_system_locale.then(sys_locale::get_locale).flatten(),
        );

        let switcher = Arc::new(Switcher::new(
            registry,
            self.source,
            self.storage,
            Arc::new(fallback),
            self.settle_delay,
        ));
        tracing::debug!(code = %initial, "starting with language");
        switcher.switch_language(&initial).await;

        Ok(I18n {
            switcher,
            mode: self.mode,
        })
    }
}

/// The CLI choice first, then the stored code, then the OS locale, then the
/// default. CLI and stored codes are returned verbatim, even if unknown.
fn initial_language(
    registry: &Registry,
    storage: &dyn Storage,
    cli_lang: Option<&str>,
    system_locale: Option<String>,
) -> String {
    if let Some(code) = cli_lang {
        return code.to_string();
    }
    if let Some(stored) = storage.get(LANGUAGE_STORAGE_KEY) {
        return stored;
    }
    system_locale
        .as_deref()
        .and_then(|tag| registry.match_locale(tag))
        .unwrap_or_else(|| registry.default_language())
        .code
        .clone()
}
