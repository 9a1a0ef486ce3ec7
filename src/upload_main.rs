// Entrypoint for `pinecone-upload`.
// No flags: the data directory, webhook URL and namespace come from
// DATA_DIR, N8N_UPLOAD_WEBHOOK_URL and PINECONE_NAMESPACE (see `Config`).

use anyhow::{Context, Result};
use pinecone_hook::collector::collect_files;
use pinecone_hook::{init_logging, ui, Config, WebhookClient};
use std::io;
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("\n❌ Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_logging(&config);
    debug!(
        model = %config.embedding_model,
        dimension = config.embedding_dimension,
        "remote index embedding settings"
    );

    let mut stdout = io::stdout();
    ui::print_upload_banner(&mut stdout, &config.data_dir, &config.upload_url, &config.namespace)?;

    let files = collect_files(&config.data_dir, &config)?;

    let client = WebhookClient::new(&config).context("Failed to build HTTP client")?;
    ui::print_upload_start(
        &mut stdout,
        files.len(),
        client.upload_url(),
        &config.namespace,
        &config,
    )?;

    let result = ui::with_spinner("Uploading...", || client.upload(files, &config.namespace))
        .context("Upload request failed")?;

    ui::print_upload_result(&mut stdout, &result)?;
    Ok(())
}
