//! `wclook list` - the ranked toilet list.

use anyhow::bail;
use owo_colors::OwoColorize;
use std::sync::Arc;
use wclook_catalog::Toilet;
use wclook_cli::output::{format_distance, format_walk_duration};
use wclook_cli::progress::spinner;
use wclook_geo::Coordinate;
use wclook_location::{FixedLocationProvider, LocationProvider};
use wclook_ranking::{FeedState, ToiletFeed};

pub async fn run(
    lat: f64,
    lon: f64,
    force: bool,
    limit: Option<usize>,
    format: &str,
) -> anyhow::Result<()> {
    let client = super::catalog_client()?;
    let provider: Arc<dyn LocationProvider> =
        Arc::new(FixedLocationProvider::new(Coordinate::new(lat, lon)));
    let feed = ToiletFeed::new(client, provider);

    let pb = spinner("Recherche des toilettes...");
    let state = feed.refresh(force).await;
    pb.finish_and_clear();

    match state {
        FeedState::Ready(mut toilets) => {
            if let Some(limit) = limit {
                toilets.truncate(limit);
            }
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&toilets)?);
            } else {
                render_list(&toilets);
            }
            Ok(())
        }
        FeedState::Failed(failure) => bail!("{failure}"),
        FeedState::Idle | FeedState::Loading => bail!("fetch cycle did not complete"),
    }
}

fn render_list(toilets: &[Toilet]) {
    for (index, toilet) in toilets.iter().enumerate() {
        let distance = toilet
            .distance
            .map_or_else(|| "?".to_string(), format_distance);
        let walk = toilet
            .walk_duration()
            .map_or_else(String::new, |d| format!(" · {} walk", format_walk_duration(d)));

        let open = if toilet.is_open {
            "open".green().to_string()
        } else {
            "closed".red().to_string()
        };
        let access = if toilet.is_accessible { " · ♿" } else { "" };

        println!(
            "{:>3}. {}  {}{}",
            index + 1,
            toilet.name.bold(),
            distance.cyan(),
            walk.dimmed()
        );
        println!(
            "     {} · {} · {}{}",
            toilet.address.dimmed(),
            toilet.cleanliness.label(),
            open,
            access
        );
    }
}
