use axum::http::Method;
use clap::Parser;
use rpc_bridge::client::{Call, ClientError};
use rpc_bridge::RpcClient;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "rpc-cli")]
#[command(about = "Call an endpoint exposed by rpc-bridge", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// HTTP method.
    #[arg(short = 'X', long, default_value = "GET")]
    method: Method,

    /// Path template, e.g. `/v1/sum/{a}/{b}`.
    template: String,

    /// Path parameters as `name=value`.
    #[arg(short, long = "param", value_parser = parse_pair)]
    params: Vec<(String, String)>,

    /// Query parameters as `name=value`.
    #[arg(short, long = "query", value_parser = parse_pair)]
    query: Vec<(String, String)>,

    /// JSON request body.
    #[arg(short, long)]
    data: Option<String>,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = RpcClient::new(cli.url);

    let mut call = Call::new(cli.method, &cli.template);
    for (name, value) in cli.params {
        call = call.path_param(name, value);
    }
    for (name, value) in cli.query {
        call = call.query_param(name, value);
    }

    let result: Result<Value, ClientError> = match cli.data {
        Some(data) => {
            let body: Value = serde_json::from_str(&data)?;
            client.call_with_body(&call, &body).await
        }
        None => client.call(&call).await,
    };

    match result {
        Ok(json) => {
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(())
        }
        Err(ClientError::Remote { status, source }) => {
            eprintln!("Error ({}): {}", status, source);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
