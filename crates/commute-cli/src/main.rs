use anyhow::Result;

use commute_compose::RouteWeatherComposer;
use commute_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    commute_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    let composer = RouteWeatherComposer::from_config(&config)?;

    let view = match composer.compose().await {
        Ok(view) => view,
        Err(e) => {
            tracing::error!("composition failed: {e}");
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    };

    println!("Commute at {}", view.generated_at);
    println!(
        "  {} ({} without traffic), {}, traffic: {}",
        view.summary.duration_label(),
        view.summary.static_duration_minutes,
        view.summary.distance_label,
        view.summary.congestion.css_name(),
    );
    println!("  {} traffic segments", view.segments.len());
    for waypoint in &view.waypoints {
        println!("  {} {}", waypoint.role, waypoint.coordinate);
        println!("    now: {}", waypoint.weather.now.label());
        println!("    +8h: {}", waypoint.weather.in_eight_hours.label());
    }

    Ok(())
}
