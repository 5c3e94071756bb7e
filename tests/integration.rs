// SPDX-License-Identifier: MPL-2.0
use lingo::config::{self, BuildMode, Config, I18nConfig};
use lingo::i18n::{Direction, I18n, LocaleSource, Substitutions};
use lingo::storage::{FileStorage, MemoryStorage, Storage};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

async fn store(mode: BuildMode, storage: Arc<dyn Storage>) -> I18n {
    I18n::builder()
        .mode(mode)
        .settle_delay(Duration::ZERO)
        .storage(storage)
        .build()
        .await
        .expect("embedded locales build")
}

#[tokio::test]
async fn every_reference_key_resolves_to_non_empty_text() {
    let i18n = store(BuildMode::Development, Arc::new(MemoryStorage::new())).await;
    assert_eq!(i18n.current_language_code(), "en");

    let reference = lingo::i18n::source::fallback_tree().expect("en.json parses");
    for path in reference.key_paths() {
        assert!(!i18n.translate(&path).is_empty(), "{path} is empty");
    }
}

#[tokio::test]
async fn missing_key_is_empty_in_production() {
    let i18n = store(BuildMode::Production, Arc::new(MemoryStorage::new())).await;
    assert_eq!(i18n.translate("messages.does_not_exist"), "");
    assert_eq!(
        i18n.translate_with("messages.does_not_exist", None, Some("fallback")),
        "fallback"
    );
}

#[tokio::test]
#[should_panic(expected = "Can't find translation for messages.does_not_exist")]
async fn missing_key_panics_in_development() {
    let i18n = store(BuildMode::Development, Arc::new(MemoryStorage::new())).await;
    i18n.translate("messages.does_not_exist");
}

#[tokio::test]
async fn substitutions_fill_bundled_strings() {
    let i18n = store(BuildMode::Production, Arc::new(MemoryStorage::new())).await;
    let subs = Substitutions::new().with("name", "Ana").with("unused", "x");
    assert_eq!(
        i18n.translate_with("messages.welcome", Some(&subs), None),
        "Welcome back, Ana."
    );
    assert_eq!(
        i18n.translate_with("messages.unread", Some(&subs), None),
        "You have {{count}} unread messages."
    );
}

#[tokio::test]
async fn unsupported_code_settles_on_default() {
    let i18n = store(BuildMode::Production, Arc::new(MemoryStorage::new())).await;
    i18n.request_language_change("es").await;
    i18n.request_language_change("xx-ZZ").await;

    assert_eq!(i18n.current_language_code(), "en");
    assert!(!i18n.is_loading());
    assert_eq!(i18n.translate("messages.hello"), "Hello!");
}

#[tokio::test]
async fn supported_code_round_trips() {
    let i18n = store(BuildMode::Production, Arc::new(MemoryStorage::new())).await;
    for code in ["pt-BR", "es", "ar", "en"] {
        i18n.request_language_change(code).await;
        assert_eq!(i18n.current_language_code(), code);
        assert!(!i18n.is_loading());
    }
}

#[tokio::test]
async fn rtl_language_updates_document_attributes() {
    let i18n = store(BuildMode::Production, Arc::new(MemoryStorage::new())).await;
    i18n.request_language_change("ar").await;

    let document = i18n.document();
    assert_eq!(document.dir, Direction::Rtl);
    assert_eq!(document.lang, "ar");

    i18n.request_language_change("es").await;
    assert_eq!(i18n.document().dir, Direction::Ltr);
}

#[tokio::test]
async fn test_locale_echoes_key_paths() {
    let i18n = store(BuildMode::Development, Arc::new(MemoryStorage::new())).await;
    assert_eq!(i18n.list_languages()[0].code, "__test__");

    i18n.request_language_change("__test__").await;
    let echoed = i18n.translate("messages.hello");
    assert!(echoed.contains("messages.hello"));
    assert!(i18n.translate("no.such.key").contains("no.such.key"));
}

#[tokio::test]
async fn test_locale_is_unknown_in_production() {
    let i18n = store(BuildMode::Production, Arc::new(MemoryStorage::new())).await;
    i18n.request_language_change("__test__").await;
    assert_eq!(i18n.current_language_code(), "en");
    assert_eq!(i18n.translate("messages.hello"), "Hello!");
}

#[tokio::test]
async fn broken_locale_file_falls_back_to_default_tree() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(dir.path().join("es.json"), "{ \"messages\": ").expect("write es");

    let i18n = I18n::builder()
        .mode(BuildMode::Production)
        .settle_delay(Duration::ZERO)
        .source(LocaleSource::Directory(dir.path().to_path_buf()))
        .build()
        .await
        .expect("build");

    // en.json is absent from the directory too, so startup already fell back.
    assert_eq!(i18n.translate("messages.hello"), "Hello!");

    i18n.request_language_change("es").await;
    assert_eq!(i18n.current_language_code(), "es");
    assert!(!i18n.is_loading());
    assert_eq!(i18n.translate("messages.hello"), "Hello!");
}

#[tokio::test]
async fn chosen_language_survives_restart() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let storage_path = dir.path().join("storage.toml");

    {
        let storage = Arc::new(FileStorage::open(&storage_path).expect("open storage"));
        let i18n = store(BuildMode::Production, storage).await;
        i18n.request_language_change("es").await;
    }

    let storage = Arc::new(FileStorage::open(&storage_path).expect("reopen storage"));
    assert_eq!(storage.get("lang"), Some("es".to_string()));
    let restarted = store(BuildMode::Production, storage).await;
    assert_eq!(restarted.current_language_code(), "es");
    assert_eq!(restarted.translate("messages.hello"), "¡Hola!");
}

#[tokio::test]
async fn cli_language_overrides_remembered_one() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let storage_path = dir.path().join("storage.toml");

    {
        let storage = Arc::new(FileStorage::open(&storage_path).expect("open storage"));
        let first = store(BuildMode::Production, storage).await;
        assert_eq!(first.current_language_code(), "en");
    }

    let storage = Arc::new(FileStorage::open(&storage_path).expect("reopen storage"));
    assert_eq!(storage.get("lang"), Some("en".to_string()));
    let second = I18n::builder()
        .mode(BuildMode::Production)
        .settle_delay(Duration::ZERO)
        .storage(storage.clone())
        .cli_language(Some("ar".to_string()))
        .build()
        .await
        .expect("second run");

    assert_eq!(second.current_language_code(), "ar");
    assert_eq!(second.document().dir, Direction::Rtl);
    assert_eq!(storage.get("lang"), Some("ar".to_string()));
}

#[tokio::test]
async fn requested_code_is_persisted_even_when_unknown() {
    let storage = Arc::new(MemoryStorage::new());
    let i18n = store(BuildMode::Production, storage.clone()).await;
    i18n.request_language_change("xx-ZZ").await;
    assert_eq!(storage.get("lang"), Some("xx-ZZ".to_string()));
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_loading_then_ready() {
    let i18n = I18n::builder()
        .mode(BuildMode::Production)
        .settle_delay(Duration::from_millis(100))
        .build()
        .await
        .expect("build");
    let mut rx = i18n.subscribe();

    let switching = tokio::spawn({
        let i18n = i18n.clone();
        async move { i18n.request_language_change("pt-BR").await }
    });

    rx.changed().await.expect("loading published");
    assert!(rx.borrow_and_update().is_loading());
    assert_eq!(i18n.current_language_code(), "en");

    rx.changed().await.expect("ready published");
    let ready = rx.borrow_and_update().clone();
    assert!(!ready.is_loading());
    assert_eq!(ready.code, "pt-BR");

    switching.await.expect("switch task");
}

#[tokio::test]
async fn locales_dir_setting_serves_documents() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(
        dir.path().join("es.json"),
        r#"{"messages": {"hello": "Hola desde disco"}}"#,
    )
    .expect("write es");

    let config_dir = tempdir().expect("Failed to create config directory");
    let cfg = Config {
        general: config::GeneralConfig {
            mode: BuildMode::Production,
        },
        i18n: I18nConfig {
            settle_delay_ms: 0,
            locales_dir: Some(dir.path().to_path_buf()),
        },
    };
    config::save_with_override(&cfg, Some(config_dir.path().to_path_buf())).expect("save");
    let (loaded, warning) = config::load_with_override(Some(config_dir.path().to_path_buf()));
    assert!(warning.is_none());

    let i18n = I18n::builder()
        .mode(loaded.general.mode)
        .settle_delay(loaded.i18n.settle_delay())
        .source(LocaleSource::from_config(&loaded.i18n))
        .cli_language(Some("es".to_string()))
        .build()
        .await
        .expect("build");

    assert_eq!(i18n.current_language_code(), "es");
    assert_eq!(i18n.translate("messages.hello"), "Hola desde disco");
    assert_eq!(i18n.translate("language.label"), "Language");
}
