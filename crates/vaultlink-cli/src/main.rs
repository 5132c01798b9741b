use anyhow::Result;
use clap::{Parser, Subcommand};
use vaultlink_cli::{parse_item, ConsoleObserver};
use vaultlink_client::queue::UploadBatch;
use vaultlink_client::ApiClient;

#[derive(Parser, Debug)]
#[command(name = "vaultlink")]
#[command(about = "Submit files and folders to the archive endpoint")]
struct Cli {
    /// API base URL (defaults to VAULTLINK_API_URL or http://localhost:4000)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Acting owner (defaults to VAULTLINK_OWNER)
    #[arg(long, global = true)]
    owner: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit one or more files/folders by id, sequentially, aborting on the
    /// first failure
    Submit {
        /// Items as <file_id> or <file_id>:<display name>
        #[arg(required = true, value_parser = parse_item)]
        items: Vec<vaultlink_client::queue::BatchItem>,

        /// Comment logged with each submission
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Check connectivity to the archive endpoint
    Status,
    /// List files the endpoint holds for the owner
    ListFiles,
    /// Validate one stored file by its remote id
    ValidateFile { remote_id: String },
    /// Validate the endpoint's whole store
    ValidateFiles,
}

#[tokio::main]
async fn main() -> Result<()> {
    vaultlink_cli::init_tracing();

    let cli = Cli::parse();
    let client = build_client(&cli)?;

    match cli.command {
        Command::Submit { items, comment } => {
            let mut batch = UploadBatch::new();
            for item in items {
                batch.push(item.with_comment(comment.clone()));
            }

            let outcome = batch.run(&client, &ConsoleObserver, None).await;
            if let Some(failure) = outcome.failure {
                anyhow::bail!(
                    "Batch aborted at {}: {} ({} item(s) abandoned)",
                    failure.name,
                    failure.message,
                    failure.abandoned
                );
            }
        }
        Command::Status => {
            if client.connected().await? {
                println!("Connected to archive endpoint");
            } else {
                anyhow::bail!("Archive endpoint not reachable");
            }
        }
        Command::ListFiles => {
            let files = client.list_files().await?;
            println!("{}", serde_json::to_string_pretty(&files)?);
        }
        Command::ValidateFile { remote_id } => {
            let result = client.validate_file(&remote_id).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::ValidateFiles => {
            let result = client.validate_files().await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

fn build_client(cli: &Cli) -> Result<ApiClient> {
    match (&cli.api_url, &cli.owner) {
        (Some(url), Some(owner)) => ApiClient::new(url.clone(), owner.clone()),
        (Some(url), None) => {
            let owner = std::env::var("VAULTLINK_OWNER")
                .map_err(|_| anyhow::anyhow!("Missing owner. Pass --owner or set VAULTLINK_OWNER"))?;
            ApiClient::new(url.clone(), owner)
        }
        (None, Some(owner)) => {
            let url = std::env::var("VAULTLINK_API_URL")
                .unwrap_or_else(|_| "http://localhost:4000".to_string());
            ApiClient::new(url, owner.clone())
        }
        (None, None) => ApiClient::from_env(),
    }
}
