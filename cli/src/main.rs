use std::fs;
use std::io::{self, Read};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to read {path}: {source}")]
    Input { path: String, source: io::Error },
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "painter-cli", about = "Send command scripts to a painter server")]
struct Cli {
    #[arg(long, env = "PAINTER_BASE_URL", default_value = "http://127.0.0.1:17000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Post one script.
    Send(SendArgs),
    /// Move a single figure diagonally across the canvas.
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
struct SendArgs {
    #[arg(long, default_value = "-", help = "Script file path, or - for stdin")]
    input: String,
}

#[derive(Args, Debug)]
struct DemoArgs {
    #[arg(long, default_value_t = 5)]
    steps: usize,

    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,
}

/// Demo starting position, as a fraction of the canvas.
const DEMO_START: f64 = 0.5;
/// Demo offset per step along both axes.
const DEMO_STEP: f64 = 0.03;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base_url = cli.base_url.trim_end_matches('/');

    match cli.command {
        Command::Ping => run_ping(&client, base_url).await,
        Command::Send(args) => run_send(&client, base_url, &args).await,
        Command::Demo(args) => run_demo(&client, base_url, &args).await,
    }
}

async fn run_ping(client: &reqwest::Client, base_url: &str) -> Result<(), CliError> {
    let response = client.get(format!("{base_url}/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: "health check failed".to_owned() });
    }
    println!("ok");
    Ok(())
}

async fn run_send(client: &reqwest::Client, base_url: &str, args: &SendArgs) -> Result<(), CliError> {
    let script = read_input(&args.input)?;
    let reply = post_script(client, base_url, script).await?;
    print_json(&reply)
}

async fn run_demo(client: &reqwest::Client, base_url: &str, args: &DemoArgs) -> Result<(), CliError> {
    let interval = Duration::from_millis(args.interval_ms);
    for step in 0..args.steps {
        // A failed step is reported and the animation continues.
        match post_script(client, base_url, demo_script(step)).await {
            Ok(_) => eprintln!("step {}/{} sent", step + 1, args.steps),
            Err(error) => eprintln!("step {}/{} failed: {error}", step + 1, args.steps),
        }
        if step + 1 < args.steps {
            tokio::time::sleep(interval).await;
        }
    }
    Ok(())
}

async fn post_script(client: &reqwest::Client, base_url: &str, script: String) -> Result<Value, CliError> {
    let response = client
        .post(format!("{base_url}/"))
        .header(reqwest::header::CONTENT_TYPE, "text/plain")
        .body(script)
        .send()
        .await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: error_message(&body) });
    }
    Ok(serde_json::from_str::<Value>(&body)?)
}

/// The server's `error` field, or the raw body when it is not JSON.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_owned())
}

fn read_input(path: &str) -> Result<String, CliError> {
    let to_error = |source| CliError::Input { path: path.to_owned(), source };
    if path == "-" {
        let mut script = String::new();
        io::stdin().read_to_string(&mut script).map_err(to_error)?;
        return Ok(script);
    }
    fs::read_to_string(path).map_err(to_error)
}

/// One animation frame: clear, white background, figure at the step's
/// position, publish.
fn demo_script(step: usize) -> String {
    #[allow(clippy::cast_precision_loss)]
    let offset = DEMO_START + step as f64 * DEMO_STEP;
    format!("reset\nwhite\nfigure {offset:.2} {offset:.2}\nupdate")
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
