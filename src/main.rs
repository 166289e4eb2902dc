use clap::Parser;
use hsinchu_bus_map::{
    sdk::config::OsrmConfig,
    sdk::dataset::{load_routes, load_stops},
    sdk::render::build_route_map,
    sdk::routing::{batch::BatchFetcher, cache::GeometryCache, provider::OsrmProvider},
    sdk::util::{limit::ConcurrencyLimiter, log::init_logging, rate_limit::osrm_limiter},
};
use std::fs;
use std::sync::Arc;

/// Renders one bus route direction from the Hsinchu County dataset as
/// GeoJSON: stop markers plus road-following polylines between stops.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Route identifier (e.g., "HSZ0187")
    #[arg(short, long)]
    route: String,

    /// Direction flag: 0 = outbound, 1 = inbound
    #[arg(short, long, default_value_t = 0)]
    direction: u8,

    /// Path to the TDX stop dataset
    #[arg(long, default_value = "data/BusStop_City_HsinchuCounty.json")]
    stops: String,

    /// Path to the TDX route dataset
    #[arg(long, default_value = "data/BusRoute_City_HsinchuCounty.json")]
    routes: String,

    /// Output GeoJSON file
    #[arg(short, long, default_value = "route_map.geojson")]
    out: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Start with our custom logger
    init_logging();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let direction = hsinchu_bus_map::Direction::from_flag(cli.direction)
        .ok_or_else(|| anyhow::anyhow!("direction must be 0 (outbound) or 1 (inbound)"))?;

    // --- 1. Dependency initialization ---
    let config = OsrmConfig::from_env().map_err(|e| anyhow::anyhow!("{}", e))?;
    let limiter = Arc::new(ConcurrencyLimiter::new(config.max_concurrency));
    let provider = Arc::new(OsrmProvider::new(&config, osrm_limiter()));
    let fetcher = BatchFetcher::new(provider, limiter);
    let cache = GeometryCache::new(config.cache_ttl);

    // --- 2. Dataset load and join ---
    let index = load_stops(&cli.stops)?;
    log::info!("Loaded {} stops from {}", index.len(), cli.stops);

    let table = load_routes(&cli.routes, &index)?;
    log::info!("Loaded {} route directions from {}", table.len(), cli.routes);

    let route = table.get(&cli.route, direction)?;
    log::info!(
        "Route {} \"{}\" ({}) has {} stops",
        route.route_id,
        route.route_name,
        route.direction,
        route.stops.len()
    );

    // --- 3. Fetch geometry and assemble the render model ---
    let results = cache.get_or_fetch(&fetcher, route).await?;
    let available = results.iter().filter(|r| r.is_available()).count();
    log::info!(
        "Fetched geometry for {}/{} segments",
        available,
        results.len()
    );

    let map = build_route_map(route, results.as_slice());

    // --- 4. Output ---
    let geojson = serde_json::to_string_pretty(&map.to_geojson())?;
    fs::write(&cli.out, geojson)?;
    log::info!(
        "Wrote {} markers and {} polylines to {}",
        map.markers.len(),
        map.polylines.len(),
        cli.out
    );

    Ok(())
}
