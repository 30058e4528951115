use anyhow::Result;
use tracing::debug;
use utoipa::OpenApi;

use crate::cli::OpenApiFormat;
use crate::schemas::ApiDoc;

/// Render the OpenAPI document in the requested format.
pub fn render_openapi(format: OpenApiFormat) -> Result<String> {
    let doc = ApiDoc::openapi();
    let rendered = match format {
        OpenApiFormat::Json => serde_json::to_string_pretty(&doc)?,
        OpenApiFormat::Yaml => serde_yaml::to_string(&doc)?,
    };
    Ok(rendered)
}

pub fn print_openapi(format: OpenApiFormat) -> Result<()> {
    debug!("Rendering OpenAPI document as {:?}", format);
    println!("{}", render_openapi(format)?);
    Ok(())
}
