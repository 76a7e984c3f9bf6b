//! Ask a single question from the command line.
//!
//! Usage: `cargo run --example ask -- [--template plain-answer] "What is a binary search?"`
//! Reads the prompt from stdin when no question is given.

use speech_completion::{CompletionClient, PromptTemplate};
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut template = PromptTemplate::default();
    let mut words = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--template" {
            let name = args.next().ok_or("--template needs a value")?;
            template = name.parse()?;
        } else {
            words.push(arg);
        }
    }

    let prompt = if words.is_empty() {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        input.trim().to_string()
    } else {
        words.join(" ")
    };

    let client = CompletionClient::from_env()?.with_template(template);
    println!("{}", client.get_completion(&prompt).await);

    Ok(())
}
