//! Command-line driver for the generation store
//!
//! Runs one command against the configured API and prints what landed in
//! the store. Session state persists between runs under the data directory.

use anyhow::{Context, Result};
use branding::{
    BrandingAction, BrandingConfig, BrandingState, BrandingStore, FileStorage,
    open_store_with_poll_interval,
};
use brandkit_api::{ApiClient, GenerationKind, Preferences};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "branding", about = "Generate brand assets from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the session
    Login {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// Sign out and clear the persisted session
    Logout,
    /// Generate a logo
    Logo {
        /// Logo description
        prompt: String,
        /// Style (modern, minimal, vintage, ...)
        #[arg(long)]
        style: Option<String>,
    },
    /// Generate slogans
    Slogan {
        /// Brand description
        prompt: String,
        /// Tone (professional, casual, creative, luxury)
        #[arg(long)]
        style: Option<String>,
    },
    /// Generate a color palette
    Colors {
        /// Industry
        industry: String,
        /// Preferences as key=value pairs
        #[arg(long = "pref", value_parser = parse_preference)]
        preferences: Vec<(String, String)>,
    },
    /// Suggest domains
    Domains {
        /// Business name
        business_name: String,
    },
    /// Generate business names
    Names {
        /// Industry
        industry: String,
        /// Keywords to include
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },
    /// List brands
    Brands,
}

fn parse_preference(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))
}

impl Command {
    fn into_action(self) -> BrandingAction {
        match self {
            Self::Login { email, password } => BrandingAction::Login { email, password },
            Self::Logout => BrandingAction::Logout,
            Self::Logo { prompt, style } => BrandingAction::GenerateLogo { prompt, style },
            Self::Slogan { prompt, style } => BrandingAction::GenerateSlogan { prompt, style },
            Self::Colors {
                industry,
                preferences,
            } => {
                let preferences: Preferences = preferences
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::String(v)))
                    .collect();
                BrandingAction::GenerateColors {
                    industry,
                    preferences: (!preferences.is_empty()).then_some(preferences),
                }
            },
            Self::Domains { business_name } => BrandingAction::GenerateDomains { business_name },
            Self::Names { industry, keywords } => {
                BrandingAction::GenerateBusinessNames { industry, keywords }
            },
            Self::Brands => BrandingAction::FetchBrands,
        }
    }
}

fn report(state: &BrandingState) {
    if let Some(error) = &state.error {
        println!("error: {error}");
    }
    if let Some(user) = &state.user {
        println!("signed in as {} <{}>", user.name, user.email);
    }
    for brand in &state.brands {
        println!("brand {}: {}", brand.id, brand.name);
    }
    for kind in GenerationKind::ALL {
        for generation in state.generations_of(kind) {
            println!("{kind} generation {} ({:?})", generation.id, generation.status);
        }
    }
    for logo in state.logos() {
        println!("  logo: {}", logo.url);
    }
    for slogan in state.slogan_items() {
        println!("  slogan: {}", slogan.text);
    }
    for palette in state.palettes() {
        let slots: Vec<String> = palette
            .slots()
            .iter()
            .map(|(name, color)| format!("{name}={color}"))
            .collect();
        println!("  palette: {}", slots.join(" "));
    }
    for domain in state.domain_suggestions() {
        let availability = if domain.available { "available" } else { "taken" };
        println!("  domain: {} ({availability})", domain.domain);
    }
    for name in state.business_names() {
        println!("  name: {}", name.name);
    }
}

async fn watch_changes(store: BrandingStore) {
    let mut changes = store.subscribe_changes();
    while changes.changed().await.is_ok() {
        let revision = *changes.borrow_and_update();
        let (generating, loading) = store
            .state(|s| (s.is_generating(), s.is_loading))
            .await;
        tracing::debug!(revision, generating, loading, "State changed");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "branding=info,brandkit_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = BrandingConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        api = %config.api.base_url,
        data_dir = %config.data_dir.display(),
        tracking = %config.tracking,
        "Starting branding client"
    );

    let store = open_store_with_poll_interval(
        Arc::new(ApiClient::new(config.api.clone())),
        Arc::new(FileStorage::new(&config.data_dir)),
        config.tracking,
        config.poll_interval,
    );

    let watcher = tokio::spawn(watch_changes(store.clone()));

    let mut handle = store
        .send_cascading(cli.command.into_action())
        .await
        .context("store rejected the command")?;
    handle.wait().await;

    let settled = futures::future::join(
        store.state(BrandingState::clone),
        store.shutdown(Duration::from_secs(5)),
    )
    .await;
    settled.1.context("store did not shut down cleanly")?;
    report(&settled.0);

    watcher.abort();
    Ok(())
}
