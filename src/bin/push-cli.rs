use clap::Parser;
use reqwest::header::{HeaderMap, HeaderValue};

use pubsub_push::pubsub::{Envelope, PubsubMessage, CE_ID};

/// Send a Pub/Sub push envelope to a running service.
#[derive(Parser)]
#[command(name = "push-cli")]
#[command(about = "Deliver a test Pub/Sub push message", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// CloudEvents id. A random UUID when omitted.
    #[arg(long)]
    ce_id: Option<String>,

    /// CloudEvents source attribute.
    #[arg(long, default_value = "//pubsub.googleapis.com/projects/local/topics/hello")]
    ce_source: String,

    /// Send MESSAGE as the `data` field verbatim instead of encoding it.
    #[arg(long)]
    raw: bool,

    /// Message attributes as key=value pairs.
    #[arg(short, long = "attribute", value_parser = parse_attribute)]
    attributes: Vec<(String, String)>,

    /// Message text. Empty greets the default name.
    #[arg(default_value = "")]
    message: String,
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let ce_id = cli
        .ce_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let mut message = if cli.raw {
        PubsubMessage {
            data: Some(cli.message),
            ..PubsubMessage::default()
        }
    } else {
        PubsubMessage::from_payload(cli.message.as_bytes())
    };
    if !cli.attributes.is_empty() {
        message.attributes = Some(cli.attributes.into_iter().collect());
    }
    message.message_id = Some(ce_id.clone());
    let envelope = Envelope::new(message);

    let mut headers = HeaderMap::new();
    headers.insert(CE_ID, HeaderValue::from_str(&ce_id)?);
    headers.insert("ce-specversion", HeaderValue::from_static("1.0"));
    headers.insert(
        "ce-type",
        HeaderValue::from_static("google.cloud.pubsub.topic.v1.messagePublished"),
    );
    headers.insert("ce-source", HeaderValue::from_str(&cli.ce_source)?);

    let res = reqwest::Client::new()
        .post(&cli.url)
        .headers(headers)
        .json(&envelope)
        .send()
        .await?;

    let status = res.status();
    let text = res.text().await?;
    if status.is_success() {
        print!("{}", text);
    } else {
        eprintln!("Error: service returned status {}", status);
        eprint!("Response: {}", text);
        std::process::exit(1);
    }

    Ok(())
}
