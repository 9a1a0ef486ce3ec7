// Entrypoint for `pinecone-search`.
// - Parses the query and flags, fills the gaps from `Config::from_env`.
// - Runs the blocking search on a worker thread so Ctrl-C can end the
//   process right away instead of waiting for the HTTP timeout.
// - Any error is printed once here and turned into exit code 1.

use anyhow::{Context, Result};
use clap::Parser;
use pinecone_hook::models::SearchResult;
use pinecone_hook::{init_logging, ui, Config, WebhookClient};
use std::io;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "pinecone-search",
    version,
    about = "Search the knowledge base stored in Pinecone through an n8n webhook"
)]
struct Cli {
    /// Search query
    query: String,

    /// Pinecone namespace (default: PINECONE_NAMESPACE or "default")
    #[arg(long)]
    namespace: Option<String>,

    /// Number of results to return (default: SEARCH_TOP_K or 5)
    #[arg(long)]
    top_k: Option<usize>,

    /// Minimum relevance score (default: SEARCH_MIN_SCORE or 0.0)
    #[arg(long, allow_negative_numbers = true)]
    min_score: Option<f64>,

    /// Search webhook URL (default: N8N_SEARCH_WEBHOOK_URL)
    #[arg(long)]
    url: Option<String>,

    /// Print the full text of every result
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("\n❌ Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_logging(&config);

    let namespace = cli.namespace.unwrap_or_else(|| config.namespace.clone());
    let top_k = cli.top_k.unwrap_or(config.top_k);
    let min_score = cli.min_score.unwrap_or(config.min_score);

    let mut client = WebhookClient::new(&config).context("Failed to build HTTP client")?;
    if let Some(url) = cli.url {
        client = client.with_search_url(url);
    }

    ui::print_search_banner(&mut io::stdout(), &cli.query, &namespace, top_k, min_score)?;

    let Some(results) = search_until_interrupted(client, cli.query, namespace, top_k, min_score)? else {
        println!("\n\n👋 Search cancelled");
        return Ok(());
    };

    let mut stdout = io::stdout();
    if results.is_empty() {
        ui::print_no_results_hint(&mut stdout)?;
    } else {
        println!("\n✅ Results found: {}", results.len());
        println!("{}", "=".repeat(80));
        ui::print_results(&mut stdout, &results, cli.verbose)?;
    }
    Ok(())
}

/// `Ok(None)` means the user pressed Ctrl-C before the webhook answered.
fn search_until_interrupted(
    client: WebhookClient,
    query: String,
    namespace: String,
    top_k: usize,
    min_score: f64,
) -> Result<Option<Vec<SearchResult>>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    let outcome = runtime.block_on(async move {
        let search = tokio::task::spawn_blocking(move || {
            ui::with_spinner("Searching...", || {
                client.search(&query, &namespace, top_k, min_score)
            })
        });
        tokio::select! {
            joined = search => Some(joined),
            Ok(()) = tokio::signal::ctrl_c() => None,
        }
    });
    // Do not wait for an abandoned request to hit its timeout
    runtime.shutdown_background();

    match outcome {
        None => Ok(None),
        Some(joined) => {
            let results = joined
                .context("Search task failed")?
                .context("Search request failed")?;
            Ok(Some(results))
        }
    }
}
