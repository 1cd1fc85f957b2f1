use anyhow::Result;
use clap::{Parser, Subcommand};
use sui_chatbot_client::{ChatbotClient, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[command(version, about = "Ask the Sui chatbot service a question")]
struct Args {
    #[arg(long, env = "CHATBOT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a question to the chat endpoint
    Ask {
        query: String,
        /// Forwarded in the request body
        #[arg(long, env = "CHATBOT_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// Check that the service is up
    Health,
    /// Show what the service says about itself
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = ChatbotClient::new(args.base_url);

    run(&client, args.command).await
}

async fn run(client: &ChatbotClient, command: Command) -> Result<()> {
    match command {
        Command::Ask { query, api_key } => {
            let result = client.ask(&query, api_key.as_deref()).await?;
            println!("Response: {}", result.response);
            println!("Processing time: {} seconds", result.processing_time);
        }
        Command::Health => {
            let health = client.health().await?;
            println!("{} v{}: {} ({})", health.app_name, health.version, health.status, health.timestamp);
        }
        Command::Info => {
            let info = client.info().await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }
    Ok(())
}
