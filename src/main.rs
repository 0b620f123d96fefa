use anyhow::{bail, Result};
use kudosim_i18n::config::Config;
use kudosim_i18n::i18n::{FilePreferenceStore, I18n, LanguageChange, NamespaceStatus};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

fn print_usage() {
    eprintln!("Usage: kudosim-i18n [--lang <code>] [--languages] <namespace>...");
    eprintln!();
    eprintln!("Resolves the given translation namespaces and prints them as JSON.");
    eprintln!("  --lang <code>   switch (and persist) the active language first");
    eprintln!("  --languages     list the supported languages and exit");
}

struct Args {
    language: Option<String>,
    list_languages: bool,
    namespaces: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args {
        language: None,
        list_languages: false,
        namespaces: Vec::new(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--lang" => match iter.next() {
                Some(code) => parsed.language = Some(code.clone()),
                None => bail!("--lang needs a language code"),
            },
            "--languages" => parsed.list_languages = true,
            other if other.starts_with("--") => bail!("Unknown option: {}", other),
            ns => parsed.namespaces.push(ns.to_string()),
        }
    }

    Ok(parsed)
}

fn print_namespaces(i18n: &I18n, status: &NamespaceStatus) -> Result<()> {
    let language = i18n.active_language();
    let mut output = BTreeMap::new();
    for ns in &status.loaded_namespaces {
        if let Some(table) = i18n.loader().table().namespace(&language, ns) {
            output.insert(ns.clone(), table.into_iter().collect::<BTreeMap<_, _>>());
        }
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Apply `--lang` before mounting, so each namespace resolves once.
async fn resolve(i18n: &I18n, args: &Args) -> NamespaceStatus {
    if let Some(code) = &args.language {
        if let LanguageChange::Ignored(reason) = i18n.set_active_language(code).await {
            warn!("Language '{}' not applied: {:?}", code, reason);
        }
    }
    i18n.use_namespaces(args.namespaces.as_slice()).await
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kudosim_i18n=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) if args.list_languages || !args.namespaces.is_empty() => args,
        Ok(_) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            print_usage();
            return Err(e);
        }
    };

    let config = Config::from_env()?;
    let store = config.build_store()?;
    let preferences = Arc::new(FilePreferenceStore::new(&config.preference_path));
    let i18n = I18n::connect(store, preferences, config.session_ttl()).await;

    if args.list_languages {
        println!("{}", serde_json::to_string_pretty(i18n.languages())?);
        return Ok(());
    }

    let status = resolve(&i18n, &args).await;
    if let Some(e) = &status.error {
        warn!("Some namespaces use fallback strings: {}", e);
    }

    info!(
        "Resolved {} namespace(s) for '{}'",
        status.loaded_namespaces.len(),
        i18n.active_language()
    );
    print_namespaces(&i18n, &status)?;

    let report = i18n.loader().metrics().report();
    info!("Metrics: {}", serde_json::to_string(&report)?);

    Ok(())
}
