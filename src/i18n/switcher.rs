// SPDX-License-Identifier: MPL-2.0
//! The single writer of [`LocaleState`].
//!
//! A switch runs as `Ready -> Loading -> Ready`: the loading snapshot keeps
//! the previous code and tree, and the resolved language, its tree and its
//! document attributes are published together once the switch settles.
//! Overlapping requests queue behind the in-flight switch in arrival order.
//! Once a switch holds the queue it runs on its own task, so it settles even
//! if the caller stops waiting for it.

use super::registry::Registry;
use super::source::LocaleSource;
use super::state::{DocumentAttributes, LocaleState, Phase};
use super::tree::TranslationTree;
use crate::config::LANGUAGE_STORAGE_KEY;
use crate::storage::Storage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};

pub struct Switcher {
    registry: Arc<Registry>,
    source: LocaleSource,
    storage: Arc<dyn Storage>,
    fallback: Arc<TranslationTree>,
    settle_delay: Duration,
    state_tx: watch::Sender<Arc<LocaleState>>,
    queue: Arc<Mutex<()>>,
}

impl Switcher {
    /// Creates a switcher in the `Idle` phase, showing the default language
    /// and the fallback tree.
    pub fn new(
        registry: Arc<Registry>,
        source: LocaleSource,
        storage: Arc<dyn Storage>,
        fallback: Arc<TranslationTree>,
        settle_delay: Duration,
    ) -> Self {
        let default = registry.default_language();
        let initial = LocaleState::idle(&default.code, default.direction(), Arc::clone(&fallback));
        let (state_tx, _) = watch::channel(Arc::new(initial));
        Self {
            registry,
            source,
            storage,
            fallback,
            settle_delay,
            state_tx,
            queue: Arc::new(Mutex::new(())),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn fallback(&self) -> &Arc<TranslationTree> {
        &self.fallback
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// The latest published snapshot.
    pub fn current(&self) -> Arc<LocaleState> {
        Arc::clone(&self.state_tx.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<LocaleState>> {
        self.state_tx.subscribe()
    }

    /// Switches to `requested`, falling back to the default language for
    /// unknown codes and to the fallback tree when loading fails.
    ///
    /// The requested code, not the resolved one, is what gets persisted.
    /// Dropping the returned future while queued skips the switch; dropping
    /// it after the switch has started leaves the switch running.
    pub async fn switch_language(self: &Arc<Self>, requested: &str) {
        let turn = Arc::clone(&self.queue).lock_owned().await;
        let switcher = Arc::clone(self);
        let requested = requested.to_string();

        let task = tokio::spawn(async move {
            let _turn = turn;
            switcher.run_switch(&requested).await;
        });
        if let Err(err) = task.await {
            if err.is_panic() {
                std::panic::resume_unwind(err.into_panic());
            }
        }
    }

    async fn run_switch(&self, requested: &str) {
        let previous = self.current();
        self.publish(LocaleState {
            phase: Phase::Loading,
            ..(*previous).clone()
        });

        let language = self.registry.resolve(requested).clone();
        let document = DocumentAttributes {
            dir: language.direction(),
            lang: language.code.clone(),
        };

        let tree = if language.is_test_locale() {
            Arc::new(TranslationTree::new())
        } else {
            match self.source.load(&language.code).await {
                Ok(tree) => Arc::new(tree),
                Err(err) => {
                    tracing::error!(code = %requested, error = %err, "failed to load language");
                    Arc::clone(&self.fallback)
                }
            }
        };

        if let Err(err) = self.storage.set(LANGUAGE_STORAGE_KEY, requested) {
            tracing::warn!(code = %requested, error = %err, "failed to persist language");
        }

        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        tracing::debug!(requested, code = %language.code, dir = %document.dir, "language switched");
        self.publish(LocaleState {
            code: language.code,
            tree,
            document,
            phase: Phase::Ready,
        });
    }

    fn publish(&self, state: LocaleState) {
        self.state_tx.send_replace(Arc::new(state));
    }
}
