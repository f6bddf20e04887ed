//! `trailbridge status` command implementation.

use trailbridge_client::ControlPlane;
use trailbridge_core::TrailConfiguration;

/// Render the labelled status lines for a trail.
pub fn render_status(config: &TrailConfiguration) -> String {
    let mut out = String::new();

    out.push_str(&format!("Trail:      {}\n", config.name));
    out.push_str(&format!(
        "Region:     {}\n",
        config.home_region.as_deref().unwrap_or("(unknown)")
    ));
    out.push_str(&format!("Event bus:  {}\n", config.event_bus_enabled));

    if let Some(multi_region) = config.multi_region {
        out.push_str(&format!("All-region: {multi_region}\n"));
    }
    if let Some(is_logging) = config.is_logging {
        out.push_str(&format!("Logging:    {is_logging}\n"));
    }
    if let Some(updated_at) = config.updated_at {
        out.push_str(&format!("Updated:    {updated_at}\n"));
    }

    out
}

/// Fetch and print the trail's configuration. Diagnostics only: errors are
/// printed and absorbed.
pub async fn run(client: &dyn ControlPlane, trail: &str, json: bool) {
    match client.get_trail(trail).await {
        Ok(config) => {
            if json {
                match serde_json::to_string_pretty(&config) {
                    Ok(body) => println!("{body}"),
                    Err(error) => println!("Error: {error}"),
                }
            } else {
                print!("{}", render_status(&config));
            }
        }
        Err(error) => println!("Error: {error}"),
    }
}
