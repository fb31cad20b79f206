//! Resolve command handler
//!
//! Resolves one piece of input the same way the picker does and prints
//! the candidates.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, Suggestions};
use crate::geo::get_geocoder;
use crate::picker::{Query, Resolver};
use clap::Args;
use std::sync::Arc;

/// Resolve command arguments
#[derive(Args)]
pub struct ResolveArgs {
    /// Place name or "lat, lon"
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Maximum number of place results
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,

    /// Preferred result language (e.g. "en")
    #[arg(long)]
    pub language: Option<String>,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,
}

/// Run the resolve command
pub async fn run(args: ResolveArgs) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(limit) = args.limit {
        config.picker.result_limit = limit;
    }
    if let Some(language) = args.language {
        config.geocoder.language = language;
    }

    let formatter = get_formatter(&args.format).ok_or_else(|| {
        let names: Vec<_> = available_formats().into_iter().map(|f| f.name).collect();
        Error::Config(format!(
            "Unknown format: {} (available: {})",
            args.format,
            names.join(", ")
        ))
    })?;

    let query = Query::new(&args.text.join(" "));
    if query.is_empty() {
        return Err(Error::Config("Nothing to resolve".to_string()));
    }

    let geocoder = Arc::new(get_geocoder(&config.geocoder)?);
    let resolver = Resolver::new(geocoder, config.picker.result_limit);
    let lookup = resolver.lookup(&query).await;

    if lookup.failed {
        eprintln!("Place search failed; see log output for details");
    }

    let suggestions = Suggestions {
        query: query.text().to_string(),
        candidates: lookup.candidates,
    };
    println!("{}", formatter.format_suggestions(&suggestions)?.trim_end());

    Ok(())
}
