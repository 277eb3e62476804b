//! `wclook maps` - navigation links for one toilet.

use crate::map_links::{apple_maps_url, google_maps_app_url, google_maps_web_url};
use anyhow::anyhow;
use owo_colors::OwoColorize;
use serde_json::json;
use wclook_cli::output::Status;

pub async fn run(id: &str, format: &str) -> anyhow::Result<()> {
    let client = super::catalog_client()?;
    let toilets = client.fetch_all().await.map_err(|e| anyhow!("{e}"))?;

    let toilet = toilets
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| anyhow!("no toilet with id {id}"))?;

    if toilet.location.latitude == 0.0 {
        Status::warning("this toilet has no recorded position; links point at (0, 0)");
    }

    let apple = apple_maps_url(&toilet.location);
    let google_app = google_maps_app_url(&toilet.location);
    let google_web = google_maps_web_url(&toilet.location);

    if format == "json" {
        let links = json!({
            "apple_maps": apple,
            "google_maps_app": google_app,
            "google_maps_web": google_web,
        });
        println!("{}", serde_json::to_string_pretty(&links)?);
    } else {
        Status::header(&toilet.name);
        println!("Apple Maps       {}", apple.cyan());
        println!("Google Maps app  {}", google_app.cyan());
        println!("Google Maps web  {}", google_web.cyan());
    }
    Ok(())
}
