//! services/api/src/bin/openapi.rs
//!
//! This binary generates the OpenAPI 3.0 specification for the REST API
//! and saves it to a file named `openapi.json`.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = "openapi.json";
    let spec_json = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(path, spec_json)?;
    println!("OpenAPI specification written to {}", path);
    Ok(())
}
