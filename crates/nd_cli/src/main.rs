use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::time::Instant;
use chrono::Local;
use clap::Parser;
use nd_core::{Result, ResultExporter};
use nd_export::{default_export_path, CsvExporter};
use nd_inference::create_inference;
use nd_pipeline::ArticleProcessor;
use nd_sources::{NewsApiSource, SourceConfig};
use tracing::{error, info};

mod cli;
mod display;
mod logging;

use cli::{Cli, Prompt};

const MODEL_API_KEY_VAR: &str = "MODEL_API_KEY";

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    ExitCode::from(exit_status(&run(cli).await))
}

/// Report a failed run once and map it to the process status.
fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("❌ {}", e);
            1
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    println!("AI News Summarizer Bot");
    println!("======================");

    // Credentials are checked before anything is asked or fetched.
    let source_config = SourceConfig::from_env()?.with_fetch_body(!cli.no_fetch_body);
    let source = NewsApiSource::new(source_config)?;

    let inference_config = nd_inference::Config {
        model: cli.model,
        model_url: cli.model_url.clone(),
        api_key: std::env::var(MODEL_API_KEY_VAR).ok(),
        ..Default::default()
    };
    let (summarizer, classifier) = create_inference(&inference_config)?;
    info!("🧠 Inference model initialized successfully (using {})", summarizer.model_name());
    let processor = ArticleProcessor::new(summarizer, classifier);

    let mut prompt = Prompt::new(io::stdin().lock(), io::stdout());
    let query = if cli.interactive {
        prompt.query(cli.query())?
    } else {
        cli.query()
    };

    println!(
        "\nFetching {} {} news articles from {}...",
        query.count(),
        query.category,
        query.country.as_str().to_uppercase()
    );
    let started = Instant::now();
    let results = processor.run(&source, &query).await?;
    println!(
        "Processed {} articles in {:.2} seconds",
        results.len(),
        started.elapsed().as_secs_f64()
    );

    let color = io::stdout().is_terminal();
    display::print_results(&mut io::stdout().lock(), &results, Local::now().naive_local(), color)?;

    let wants_export = match &cli.export {
        Some(_) => true,
        None => cli.interactive && prompt.confirm_export()?,
    };

    if wants_export {
        let destination = cli
            .export
            .clone()
            .flatten()
            .unwrap_or_else(|| default_export_path(Local::now().naive_local()));
        if results.is_empty() {
            println!("No articles to save.");
        } else {
            match CsvExporter::new().export(&results, &destination) {
                Ok(()) => println!("Saved {} summaries to {}", results.len(), destination.display()),
                // The displayed results stay valid; only the export is lost.
                Err(e) => error!("❌ {}", e),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::Error;

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(())), 0);
        assert_eq!(exit_status(&Err(Error::SourceUnavailable("provider answered 401".to_string()))), 1);
        assert_eq!(exit_status(&Err(Error::Configuration("NEWS_API_KEY is required".to_string()))), 1);
    }
}
