use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::Value;

use health_mesh::health::PeerStatusReport;

#[derive(Parser)]
#[command(name = "mesh-cli")]
#[command(about = "Operator CLI for health-mesh nodes", long_about = None)]
struct Cli {
    /// Base URL of the node to query.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Route name of the node behind --url.
    #[arg(short, long, default_value = "api1")]
    node: String,

    /// Owner identifier used in probe routes.
    #[arg(short, long, default_value = "202300653")]
    owner: String,

    /// Client-side timeout in seconds.
    #[arg(short, long, default_value_t = 10)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the node's own health report
    Health,
    /// Ask the node to probe one peer
    Probe {
        /// Peer route name, e.g. api2
        peer: String,
    },
    /// Ask the node to probe several peers; fails if any is unreachable
    Sweep {
        /// Peer route names
        #[arg(required = true)]
        peers: Vec<String>,
    },
}

impl Cli {
    fn probe_url(&self, peer: &str) -> String {
        format!(
            "{}/{}/{}/call-{}",
            self.url.trim_end_matches('/'),
            self.node.to_lowercase(),
            self.owner,
            peer.to_lowercase()
        )
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .build()?;

    match &cli.command {
        Commands::Health => {
            let res = client
                .get(format!("{}/health", cli.url.trim_end_matches('/')))
                .send()
                .await?;
            return print_response(res).await;
        }
        Commands::Probe { peer } => {
            let res = client.get(cli.probe_url(peer)).send().await?;
            return print_response(res).await;
        }
        Commands::Sweep { peers } => {
            let mut unreachable = 0;
            for peer in peers {
                let res = client.get(cli.probe_url(peer)).send().await?;
                if !res.status().is_success() {
                    eprintln!("{:<8} route returned {}", peer, res.status());
                    unreachable += 1;
                    continue;
                }

                let report: PeerStatusReport = res.json().await?;
                let mark = if report.reachable { "ok" } else { "FAIL" };
                println!("{:<8} {:<4} {}", report.peer_name, mark, report.message);
                if !report.reachable {
                    unreachable += 1;
                }
            }

            if unreachable > 0 {
                eprintln!("{} of {} peers not working", unreachable, peers.len());
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: node returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(ExitCode::FAILURE);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(ExitCode::SUCCESS)
}
