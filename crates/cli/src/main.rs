use std::io;
use std::process::ExitCode;

use clap::Parser;
use pagedown_core::scrape_to_markdown;
use tracing_subscriber::EnvFilter;

/// Render a web page and print its main content as clean Markdown
#[derive(Parser, Debug)]
#[command(name = "pagedown")]
#[command(author = "Pagedown Contributors")]
#[command(version)]
#[command(about = "Render a web page and print its main content as Markdown", long_about = None)]
struct Args {
    /// URL of the page to convert
    #[arg(value_name = "URL")]
    url: String,
}

/// Log to stderr so stdout carries nothing but the Markdown.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
}

async fn run(args: &Args) -> anyhow::Result<String> {
    let markdown = scrape_to_markdown(&args.url).await?;
    Ok(markdown)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    match run(&args).await {
        Ok(markdown) => {
            println!("{}", markdown);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
