use std::path::PathBuf;

use clap::Parser;

use alb_bridge::event::{InboundEvent, OutboundEvent};

#[derive(Parser)]
#[command(name = "alb-invoke")]
#[command(about = "Send an invocation event to a running alb-bridge runtime", long_about = None)]
struct Cli {
    /// Inbound event JSON file
    event: PathBuf,

    #[arg(short, long, default_value = "http://127.0.0.1:9000")]
    url: String,

    /// Print the decoded body instead of the raw outbound event
    #[arg(short, long)]
    decode_body: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let event: InboundEvent = serde_json::from_str(&std::fs::read_to_string(&cli.event)?)?;
    let res = reqwest::Client::new()
        .post(format!("{}{}", cli.url, alb_bridge::runtime::INVOKE_PATH))
        .json(&event)
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: runtime returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let outbound: OutboundEvent = res.json().await?;
    if cli.decode_body {
        println!("{}", outbound.status_description);
        for (name, value) in outbound.headers.pairs() {
            println!("{}: {}", name, value);
        }
        println!();
        println!("{}", String::from_utf8_lossy(&outbound.decoded_body()?));
    } else {
        println!("{}", serde_json::to_string_pretty(&outbound)?);
    }
    Ok(())
}
