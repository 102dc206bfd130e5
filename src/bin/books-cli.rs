use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "books-cli")]
#[command(about = "Command-line client for the book search proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service status
    Status,
    /// Search the catalog
    Search {
        /// Search query (Google Books syntax, e.g. "intitle:dune")
        query: String,

        #[arg(long, default_value_t = 0)]
        start_index: u64,

        #[arg(long, default_value_t = 20)]
        max_results: u32,
    },
    /// Show curated recommendation sections
    Recommendations,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Status => client.get(format!("{}/health", base)).send().await?,
        Commands::Search {
            query,
            start_index,
            max_results,
        } => {
            client
                .get(format!("{}/api/search", base))
                .query(&[
                    ("q", query),
                    ("startIndex", start_index.to_string()),
                    ("maxResults", max_results.to_string()),
                ])
                .send()
                .await?
        }
        Commands::Recommendations => {
            client
                .get(format!("{}/api/recommendations", base))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
