use std::path::PathBuf;

use clap::Parser;
use numquest::prelude::*;
use tracing_subscriber::EnvFilter;

/// Multiplayer number-guessing server.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// IP address to bind to
    #[clap(short = 'H', long, default_value = "0.0.0.0")]
    host: String,
    /// Port to listen on
    #[clap(short, long, default_value = "8080")]
    port: u16,
    /// File holding personal bests
    #[clap(short, long, default_value = "leaderboard.json")]
    leaderboard: PathBuf,
    /// Entries sent in each LEADERBOARD message
    #[clap(short, long, default_value = "10")]
    top: usize,
    /// Seed for target draws (random if omitted)
    #[clap(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let leaderboard = JsonFileLeaderboard::open(args.leaderboard.clone())?;
    let config = GameConfig {
        leaderboard_size: args.top,
        seed: args.seed,
        ..GameConfig::default()
    };

    let address = format!("{}:{}", args.host, args.port);
    let server = NumquestServer::builder()
        .bind(&address)
        .game_config(config)
        .build(leaderboard)
        .await?;

    tracing::info!(
        addr = %server.local_addr()?,
        leaderboard = %args.leaderboard.display(),
        "listening"
    );

    server.run().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["numquest-server"]);
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.port, 8080);
        assert_eq!(args.leaderboard, PathBuf::from("leaderboard.json"));
        assert_eq!(args.top, 10);
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from([
            "numquest-server",
            "--host",
            "127.0.0.1",
            "-p",
            "9000",
            "--leaderboard",
            "/tmp/board.json",
            "--top",
            "5",
            "--seed",
            "42",
        ]);
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 9000);
        assert_eq!(args.top, 5);
        assert_eq!(args.seed, Some(42));
    }
}
