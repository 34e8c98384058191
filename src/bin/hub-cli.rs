use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "hub-cli")]
#[command(about = "Query a running splortshub instance", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check hub status
    Status,
    /// List all teams
    Teams,
    /// Show one team by id
    Team { id: String },
    /// Search a team by full name
    FindTeam { full_name: String },
    /// List all players
    Players,
    /// Show one player by id
    Player { id: String },
    /// Search a player by name
    FindPlayer { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match &cli.command {
        Commands::Status => client.get(format!("{}/api/v1beta/status/", base)),
        Commands::Teams => client.get(format!("{}/api/v1beta/teams/", base)),
        Commands::Team { id } => client.get(format!("{}/api/v1beta/team/{}", base, id)),
        Commands::FindTeam { full_name } => client
            .get(format!("{}/api/v1beta/teams/search/", base))
            .query(&[("full_name", full_name)]),
        Commands::Players => client.get(format!("{}/api/v1beta/players", base)),
        Commands::Player { id } => client.get(format!("{}/api/v1beta/player/{}", base, id)),
        Commands::FindPlayer { name } => client
            .get(format!("{}/api/v1beta/players/search/", base))
            .query(&[("name", name)]),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: hub returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
