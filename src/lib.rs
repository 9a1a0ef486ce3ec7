// Library root
// -----------
// Shared code for the two binaries: `pinecone-upload` sends a directory of
// text files to the n8n upload webhook, `pinecone-search` queries the n8n
// search webhook. Chunking, embedding and the vector index itself all live
// behind those webhooks.
//
// Module responsibilities:
// - `config`: defaults plus environment overrides, built once per process.
// - `collector`: scans a directory and reads eligible files.
// - `api`: blocking HTTP client for the upload and search webhooks.
// - `search`: query prefixing and client-side result filtering.
// - `models`: request/response types as they appear on the wire.
// - `ui`: terminal output (banners, result listing, spinner).
pub mod api;
pub mod collector;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod ui;

pub use api::WebhookClient;
pub use config::Config;
pub use error::ClientError;

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. `RUST_LOG` takes precedence over
/// the configured level. Output goes to stderr so stdout only carries the
/// report.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    // Ignore the error if a subscriber is already set (tests, repeated calls)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
