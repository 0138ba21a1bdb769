//! Command line front end
//!
//! Ranks Car Buddy garages and shops around a reference point.
//!
//! Usage:
//!     car-buddy-nearby --lat 40.7128 --lon=-74.0060 --radius 5
//!     car-buddy-nearby --place "Brooklyn" --pick 0 --kind auto-parts
//!     car-buddy-nearby --lat 40.7128 --lon=-74.0060 --kind detailing --from-file shops.json

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use car_buddy_proximity::api::{ApiClient, EntitySource, JsonFileSource};
use car_buddy_proximity::ranker::{AutoPartsShop, DetailingShop, Garage};
use car_buddy_proximity::reference::{NominatimGeocoder, PlaceSearch};
use car_buddy_proximity::*;

/// Find garages and shops near you
#[derive(Parser, Debug)]
#[command(name = "car-buddy-nearby")]
#[command(version)]
#[command(about = "Rank Car Buddy garages and shops by distance", long_about = None)]
#[command(group(ArgGroup::new("reference").required(true).args(["lat", "place"])))]
struct Cli {
    /// Latitude of the reference point in degrees
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<String>,

    /// Longitude of the reference point in degrees
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<String>,

    /// Search for a place to use as reference point
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    place: Option<String>,

    /// Position of the place search result to use, lists the results when absent
    #[arg(long, requires = "place")]
    pick: Option<usize>,

    /// Search radius in kilometers [default: from configuration]
    #[arg(long, allow_hyphen_values = true)]
    radius: Option<f64>,

    /// What to look for
    #[arg(long, value_enum, default_value_t = Kind::Garages)]
    kind: Kind,

    /// Read entities from a JSON file instead of the Car Buddy API
    #[arg(long)]
    from_file: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Kind {
    Garages,
    AutoParts,
    Detailing,
}

/// The fields printed for each ranked entity.
trait Listing {
    fn name(&self) -> &str;
    fn address(&self) -> &str;
    fn rating(&self) -> f64;
}

macro_rules! impl_listing {
    ($($entity:ty),+) => {
        $(impl Listing for $entity {
            fn name(&self) -> &str {
                &self.name
            }

            fn address(&self) -> &str {
                &self.address
            }

            fn rating(&self) -> f64 {
                self.rating
            }
        })+
    };
}

impl_listing!(Garage, AutoPartsShop, DetailingShop);

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Will use default config settings if no environment vars are found.
    let config = Config::try_from_env().context("Failed to load configuration from environment")?;

    // Try to load log configuration from the provided log file.
    // Will keep info logging on stderr if the file can not be loaded.
    if let Err(e) = load_logger_config_from_file(config.log_config.as_str()).await {
        log::error!("(main) {}", e);
    }
    log::info!("(main) {:?}", cli);

    let result = run(&cli, &config).await;
    if let Err(e) = &result {
        log::error!("(main) {:#}", e);
    }

    // Make sure all log message are written/ displayed before shutdown
    log::logger().flush();

    result
}

async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let Some(reference) = resolve_reference(cli, config).await? else {
        return Ok(());
    };
    let ranker = ProximityRanker::new(cli.radius.unwrap_or(config.default_radius_km));

    match (cli.kind, &cli.from_file) {
        (Kind::Garages, Some(path)) => {
            let source = JsonFileSource::new(path.clone());
            rank_and_print::<Garage, _>(&ranker, &source, &reference, cli.json).await
        }
        (Kind::Garages, None) => {
            let source = ApiClient::new(config)?;
            rank_and_print::<Garage, _>(&ranker, &source, &reference, cli.json).await
        }
        (Kind::AutoParts, Some(path)) => {
            let source = JsonFileSource::new(path.clone());
            rank_and_print::<AutoPartsShop, _>(&ranker, &source, &reference, cli.json).await
        }
        (Kind::AutoParts, None) => {
            let source = ApiClient::new(config)?;
            rank_and_print::<AutoPartsShop, _>(&ranker, &source, &reference, cli.json).await
        }
        (Kind::Detailing, Some(path)) => {
            let source = JsonFileSource::new(path.clone());
            rank_and_print::<DetailingShop, _>(&ranker, &source, &reference, cli.json).await
        }
        (Kind::Detailing, None) => {
            bail!("Detailing shops are not served by the API, pass --from-file")
        }
    }
}

/// Resolves the reference point, `None` when place candidates were only
/// listed.
async fn resolve_reference(cli: &Cli, config: &Config) -> Result<Option<ReferencePoint>> {
    let selector = ReferencePointSelector::new();

    if let (Some(latitude), Some(longitude)) = (&cli.lat, &cli.lon) {
        selector
            .set_manual(ReferencePoint::from_manual_input(latitude, longitude)?)
            .await;
    } else if let Some(query) = &cli.place {
        let geocoder = NominatimGeocoder::new(config)?;
        let search = PlaceSearch::run(&geocoder, query).await?;

        let Some(index) = cli.pick else {
            print_candidates(&search);
            return Ok(None);
        };
        selector.select_place(&search, index).await?;
    }

    selector
        .current()
        .await
        .map(Some)
        .ok_or_else(|| anyhow!("No reference point, pass --lat and --lon or --place"))
}

fn print_candidates(search: &PlaceSearch) {
    if search.candidates().is_empty() {
        println!("No places found for \"{}\"", search.query());
        return;
    }

    println!("Places matching \"{}\", choose one with --pick:", search.query());
    for (index, candidate) in search.candidates().iter().enumerate() {
        println!(
            "{:>3}  {}  ({})",
            index, candidate.display_name, candidate.location
        );
    }
}

async fn rank_and_print<T, S>(
    ranker: &ProximityRanker,
    source: &S,
    reference: &ReferencePoint,
    json: bool,
) -> Result<()>
where
    T: Located + Listing + Clone + Serialize,
    S: EntitySource<T>,
{
    let result = ranker.rank_from(source, reference).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Reference point: {} ({})", reference, reference.precise());
    println!("{}", result.message());
    for (position, ranked) in result.matched.iter().enumerate() {
        println!(
            "{:>3}. {:<32} {:>8.2} km  {:.1}*  {}",
            position + 1,
            ranked.entity.name(),
            ranked.distance_km.into_inner(),
            ranked.entity.rating(),
            ranked.entity.address()
        );
    }

    Ok(())
}
