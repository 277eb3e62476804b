//! `wclook show` - details for one toilet.

use anyhow::anyhow;
use owo_colors::OwoColorize;
use wclook_catalog::Toilet;
use wclook_cli::output::{format_distance, format_walk_duration, Status};
use wclook_geo::Coordinate;
use wclook_ranking::rank_from;

pub async fn run(id: &str, position: Option<(f64, f64)>, format: &str) -> anyhow::Result<()> {
    let client = super::catalog_client()?;
    let toilets = client.fetch_all().await.map_err(|e| anyhow!("{e}"))?;

    // With a position we run a ranking pass so the record carries its
    // distance; without one the raw snapshot is shown as-is.
    let toilets = match position {
        Some((lat, lon)) => rank_from(toilets, Coordinate::new(lat, lon)),
        None => toilets,
    };

    let toilet = toilets
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| anyhow!("no toilet with id {id}"))?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&toilet)?);
    } else {
        render_details(&toilet);
    }
    Ok(())
}

fn render_details(toilet: &Toilet) {
    Status::header(&toilet.name);
    println!("id            {}", toilet.id.dimmed());
    println!("address       {}", toilet.address);
    if let Some(distance) = toilet.distance {
        let walk = toilet
            .walk_duration()
            .map_or_else(String::new, |d| format!(" ({} walk)", format_walk_duration(d)));
        println!("distance      {}{walk}", format_distance(distance).cyan());
    }
    println!("cleanliness   {}", toilet.cleanliness.label());
    println!("quality       {}", "★".repeat(usize::from(toilet.quality)));
    println!(
        "state         {}",
        if toilet.is_open {
            "open".green().to_string()
        } else {
            "closed".red().to_string()
        }
    );
    println!(
        "accessible    {}",
        if toilet.is_accessible { "yes" } else { "no" }
    );
    if !toilet.note.is_empty() {
        println!("note          {}", toilet.note);
    }

    if let Some(hours) = &toilet.opening_hours {
        Status::subheader("Opening hours");
        for (day, entry) in [
            ("monday", &hours.monday),
            ("tuesday", &hours.tuesday),
            ("wednesday", &hours.wednesday),
            ("thursday", &hours.thursday),
            ("friday", &hours.friday),
            ("saturday", &hours.saturday),
            ("sunday", &hours.sunday),
        ] {
            if !entry.is_empty() {
                println!("{day:<12}  {entry}");
            }
        }
    }

    if !toilet.reviews.is_empty() {
        Status::subheader(&format!("Reviews ({})", toilet.reviews.len()));
        for review in &toilet.reviews {
            println!(
                "{} {} {}",
                format!("{}/5", review.rating).yellow(),
                review.date.format("%Y-%m-%d").to_string().dimmed(),
                review.comment
            );
        }
    }
}
