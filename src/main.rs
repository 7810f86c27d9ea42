mod collector;
mod config;
mod error;
mod geo_location;
mod record;
mod sheet;
#[cfg(test)]
mod test_support;
mod weather;

use std::io;

use chrono::Local;
use tracing::{Instrument, info, info_span, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    collector::Prompter,
    config::Config,
    record::{AuxData, Column, TripRecord},
    sheet::GoogleSheet,
};

/// Records one fishing trip: asks the angler for the catch details, looks up
/// location and current weather, and appends the row to the trip spreadsheet.
///
/// Lookups are best effort; anything that cannot be fetched is stored as
/// `null`. Configuration comes from the environment (see [`Config`]).
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env()?;
    let client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;

    // opened before any prompt so a bad token fails fast
    let mut store = GoogleSheet::open(client.clone(), &config.sheet)
        .instrument(info_span!("open_sheet"))
        .await?;

    let fields = info_span!("collect").in_scope(|| {
        let stdin = io::stdin();
        Prompter::new(stdin.lock(), io::stdout()).collect_trip()
    })?;

    let aux = enrich(&client, &config.geo_endpoint, &config.weather_endpoint)
        .instrument(info_span!("enrich"))
        .await;

    let record = TripRecord::assemble(fields, aux, Local::now().naive_local());
    let missing = record.values().iter().filter(|c| c.is_sentinel()).count();
    if missing > 0 {
        warn!("{} field(s) could not be fetched and are recorded as null", missing);
    }
    info!(location = %record.get(Column::Location), "Trip assembled");
    println!("\n{}\n", record.summary());

    let report = config
        .write_mode
        .write(&mut store, &config.sheet.worksheet, &record)
        .instrument(info_span!("write", mode = %config.write_mode))
        .await?;

    if report.is_complete() {
        println!("Trip saved to '{}'.", config.sheet.worksheet);
    } else {
        let skipped: Vec<&str> = report.skipped.iter().map(Column::name).collect();
        println!(
            "Trip saved to '{}' without: {}",
            config.sheet.worksheet,
            skipped.join(", ")
        );
    }

    Ok(())
}

/// Location first, then weather at that location. Neither lookup can fail the
/// run; a failed location still leads to a (failing) weather attempt.
async fn enrich(client: &reqwest::Client, geo_endpoint: &str, weather_endpoint: &str) -> AuxData {
    let location = geo_location::fetch_location(client, geo_endpoint).await;
    let weather =
        weather::fetch_weather(client, weather_endpoint, location.latitude, location.longitude)
            .await;
    AuxData { location, weather }
}
