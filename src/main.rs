// SPDX-License-Identifier: MPL-2.0
use lingo::config::{self, BuildMode};
use lingo::i18n::{coverage, I18n, LocaleSource, Substitutions};
use lingo::paths;
use std::process::ExitCode;

const HELP: &str = "\
lingo - inspect and switch translations

USAGE:
  lingo [OPTIONS] <COMMAND>

COMMANDS:
  list                         List languages, marking the active one
  get <path> [key=value...]    Translate a dotted key path
  switch <code>                Switch language and remember the choice
  check                        Report missing keys and unregistered locale files

OPTIONS:
  --lang <code>                Language to start with, over the remembered one
  --mode <mode>                development or production
  --fallback <text>            Text used by `get` when no translation exists
  --locales-dir <dir>          Read <code>.json files from this directory
  --config-dir <dir>           Directory holding settings.toml
  --data-dir <dir>             Directory holding storage.toml
  -h, --help                   Print this help
";

struct Flags {
    lang: Option<String>,
    mode: Option<BuildMode>,
    fallback: Option<String>,
    locales_dir: Option<String>,
    config_dir: Option<String>,
    data_dir: Option<String>,
    command: Vec<String>,
}

fn parse_mode(raw: &str) -> Result<BuildMode, String> {
    match raw {
        "development" | "dev" => Ok(BuildMode::Development),
        "production" | "prod" => Ok(BuildMode::Production),
        other => Err(format!("unknown mode: {other}")),
    }
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    Ok(Some(Flags {
        lang: args.opt_value_from_str("--lang")?,
        mode: args.opt_value_from_fn("--mode", parse_mode)?,
        fallback: args.opt_value_from_str("--fallback")?,
        locales_dir: args.opt_value_from_str("--locales-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        command: args
            .finish()
            .into_iter()
            .filter_map(|s| s.into_string().ok())
            .collect(),
    }))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    let (mut cfg, warning) = config::load();
    if let Some(warning) = warning {
        tracing::warn!("{warning}");
    }
    if let Some(mode) = flags.mode {
        cfg.general.mode = mode;
    }
    if let Some(dir) = &flags.locales_dir {
        cfg.i18n.locales_dir = Some(dir.into());
    }

    let i18n = match I18n::from_config(&cfg, flags.lang.clone()).await {
        Ok(i18n) => i18n,
        Err(err) => {
            tracing::error!(error = %err, "failed to initialize translations");
            return ExitCode::FAILURE;
        }
    };

    let command: Vec<&str> = flags.command.iter().map(String::as_str).collect();
    match command.as_slice() {
        ["list"] => {
            let current = i18n.current_language_code();
            for lang in i18n.list_languages() {
                let marker = if lang.code == current { '*' } else { ' ' };
                let dir = lang.direction().as_str();
                println!("{marker} {:<14} {:<4} {}", lang.code, dir, lang.label);
            }
            ExitCode::SUCCESS
        }
        ["get", path, pairs @ ..] => {
            let substitutions = match parse_substitutions(pairs) {
                Ok(subs) => subs,
                Err(bad) => {
                    eprintln!("expected key=value, got `{bad}`");
                    return ExitCode::from(2);
                }
            };
            let subs = (!substitutions.is_empty()).then_some(&substitutions);
            match i18n.try_translate(path, subs, flags.fallback.as_deref()) {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("{err}");
                    ExitCode::FAILURE
                }
            }
        }
        ["switch", code] => {
            i18n.request_language_change(code).await;
            let document = i18n.document();
            println!(
                "{} (dir={}, lang={})",
                i18n.current_language_code(),
                document.dir,
                document.lang
            );
            ExitCode::SUCCESS
        }
        ["check"] => run_check(&i18n, &cfg).await,
        _ => {
            eprint!("{HELP}");
            ExitCode::from(2)
        }
    }
}

fn parse_substitutions<'a>(pairs: &[&'a str]) -> Result<Substitutions, &'a str> {
    pairs
        .iter()
        .map(|pair| pair.split_once('=').ok_or(*pair))
        .collect::<Result<Vec<_>, _>>()
        .map(|pairs| pairs.into_iter().collect())
}

async fn run_check(i18n: &I18n, cfg: &config::Config) -> ExitCode {
    let source = LocaleSource::from_config(&cfg.i18n);
    let reference = match source.load(&i18n.default_language().code).await {
        Ok(tree) => tree,
        Err(err) => {
            tracing::error!(error = %err, "cannot load reference language");
            return ExitCode::FAILURE;
        }
    };

    let mut complete = true;
    for (code, report) in coverage::check_all(i18n.registry(), &source, &reference).await {
        match report {
            Ok(coverage) => {
                complete &= coverage.is_complete();
                println!(
                    "{code}: {} missing, {} extra",
                    coverage.missing.len(),
                    coverage.extra.len()
                );
                for path in &coverage.missing {
                    println!("  - {path}");
                }
                for path in &coverage.extra {
                    println!("  + {path}");
                }
            }
            Err(err) => {
                complete = false;
                println!("{code}: {err}");
            }
        }
    }

    match coverage::unregistered(i18n.registry(), &source) {
        Ok(codes) => {
            for code in codes {
                println!("{code}: locale file not registered");
            }
        }
        Err(err) => tracing::warn!(error = %err, "cannot list locale files"),
    }

    if complete {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
