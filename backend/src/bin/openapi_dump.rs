//! Print the OpenAPI document as JSON.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use signup_backend::ApiDoc;
use utoipa::OpenApi;

/// Export the signup API's OpenAPI document.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump")]
struct Cli {
    /// Write the document to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let doc = ApiDoc::openapi();
    let json = if cli.pretty {
        doc.to_pretty_json()
    } else {
        doc.to_json()
    }
    .wrap_err("serialise OpenAPI document")?;

    match cli.output {
        Some(path) => fs::write(&path, json)
            .wrap_err_with(|| format!("write OpenAPI document to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
