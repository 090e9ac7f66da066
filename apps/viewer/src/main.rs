use anyhow::Result;
use clap::Parser;
use client_core::{ApiClient, HeaderState, LanguageContext, NavRoute, PageLocation, TermsApi};
use shared::domain::Language;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    /// Page the client runs on. Its host picks the API base URL, its path the active link.
    #[arg(long, default_value = "http://localhost:5173/terms")]
    page_url: String,
    #[arg(long, default_value = "en")]
    language: Language,
    /// Flip the language once before rendering, like pressing the flag button.
    #[arg(long)]
    toggle_language: bool,
    /// Render with the hamburger menu open.
    #[arg(long)]
    open_menu: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let location = PageLocation::parse(&args.page_url)?;
    let mut language = LanguageContext::new(args.language);
    if args.toggle_language {
        language.toggle_language();
    }
    let mut header = HeaderState::new();
    if args.open_menu {
        header.toggle_menu();
    }

    println!("{}", header.render(language.language(), &location.pathname));

    if !NavRoute::Terms.is_active(&location.pathname) {
        return Ok(());
    }

    let api = TermsApi::new(ApiClient::for_location(&location)?);
    let terms = match api.list_terms().await {
        Ok(terms) => terms,
        Err(err) => {
            error!(%err, base_url = api.client().base_url(), "failed to load terms");
            eprintln!("{}", load_failed_text(language.language()));
            return Err(err.into());
        }
    };

    println!();
    println!("{}", NavRoute::Terms.label(language.language()));
    if terms.is_empty() {
        println!("{}", empty_text(language.language()));
    }
    for term in terms {
        println!("{:>4}. {}", term.order, term.content);
    }

    Ok(())
}

fn empty_text(language: Language) -> &'static str {
    match language {
        Language::En => "No terms published yet.",
        Language::Sv => "Inga villkor publicerade ännu.",
    }
}

fn load_failed_text(language: Language) -> &'static str {
    match language {
        Language::En => "Could not load terms. Please try again.",
        Language::Sv => "Kunde inte ladda villkoren. Försök igen.",
    }
}
