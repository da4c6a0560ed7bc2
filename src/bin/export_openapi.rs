//! Export the AutoDoc OpenAPI specification to a static JSON file
//!
//! Usage: cargo run --bin export_openapi
//!
//! Generates docs/openapi.json for client generation and API linting.

use std::fs;

use anyhow::{Context, Result};
use autodoc::docs::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("failed to serialise OpenAPI document to JSON")?;

    fs::create_dir_all("docs").context("failed to create docs directory")?;
    fs::write("docs/openapi.json", json).context("failed to write docs/openapi.json")?;

    println!("Exported OpenAPI spec to docs/openapi.json");
    Ok(())
}
