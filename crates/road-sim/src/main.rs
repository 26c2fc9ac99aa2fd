//! Road Simulator Client
//!
//! Drives a running server with synthetic windows:
//!
//! ```text
//! road-sim [server-url] [windows]
//! ```
//!
//! Alternates smooth-road and pothole windows along a short stretch of
//! road and logs each verdict.

use road_sim::RoadProfile;
use serde::Deserialize;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Deserialize)]
struct Verdict {
    is_pothole: bool,
    confidence: f64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let mut args = std::env::args().skip(1);
    let base_url = args
        .next()
        .unwrap_or_else(|| "http://127.0.0.1:8080".to_string());
    let windows: usize = args.next().as_deref().unwrap_or("10").parse()?;

    info!(%base_url, windows, "starting road simulator");

    let client = reqwest::Client::new();
    let mut profile = RoadProfile::new();

    // Drive a short stretch near the demo route
    let mut lat = 12.9853;
    let mut lng = 79.9698;

    for i in 0..windows {
        let samples = if i % 2 == 0 {
            profile.normal_window()
        } else {
            profile.pothole_window()
        };

        let body = serde_json::json!({
            "accelerometer_data": samples,
            "latitude": lat,
            "longitude": lng,
        });

        let response = client
            .post(format!("{base_url}/api/detect"))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "detect request rejected");
            continue;
        }

        let verdict: Verdict = response.json().await?;
        info!(
            window = i,
            sent = if i % 2 == 0 { "normal" } else { "pothole" },
            is_pothole = verdict.is_pothole,
            confidence = verdict.confidence,
            "verdict"
        );

        // Creep south-east along the road between windows
        lat -= 0.0005;
        lng += 0.0002;

        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    }

    Ok(())
}
