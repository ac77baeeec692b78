use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use camera::Viewport;
use catalog::{Catalog, world_catalog};
use foundation::math::{GeoPoint, format_distance};
use foundation::{Attitude, AttitudeSignal};
use runtime::{Engine, Frame, FrameUpdate};

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank and project world POIs for a viewer on the globe")]
struct Args {
    /// Viewer latitude in degrees
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    lat: Option<f64>,

    /// Viewer longitude in degrees
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lng: Option<f64>,

    /// Device yaw (compass heading) in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    alpha_deg: f64,

    /// Device pitch in degrees; 90 holds the device upright
    #[arg(long, default_value_t = 90.0, allow_hyphen_values = true)]
    beta_deg: f64,

    /// Device roll in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    gamma_deg: f64,

    /// Yaw added per simulated frame, in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    yaw_rate_deg: f64,

    /// Number of display frames to simulate
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 390.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 844.0)]
    height: f64,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Load a catalog file instead of the bundled world dataset
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Simulate the orientation provider reporting itself unavailable
    #[arg(long)]
    attitude_unavailable: bool,
}

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let loaded;
    let catalog: &Catalog = match &args.catalog {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
            loaded = Catalog::from_json_str(&text).map_err(|e| format!("catalog {path:?}: {e}"))?;
            &loaded
        }
        None => world_catalog(),
    };

    let location = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        _ => None,
    };
    let viewport = Viewport::new(args.width, args.height);

    let engine = Engine::new(catalog);
    engine.on_location(location);

    let mut frame = Frame::new(0, 1.0 / 60.0);
    for i in 0..args.frames.max(1) {
        let signal = if args.attitude_unavailable {
            AttitudeSignal::Unavailable
        } else {
            AttitudeSignal::Available(Attitude::new(
                (args.alpha_deg + args.yaw_rate_deg * i as f64).to_radians(),
                args.beta_deg.to_radians(),
                args.gamma_deg.to_radians(),
            ))
        };
        engine.on_attitude(signal);

        let update = engine.render_frame(frame, viewport);
        if args.json {
            print_json(frame, &update);
        } else {
            print_table(frame, &update);
        }
        frame = frame.next();
    }

    Ok(())
}

fn print_table(frame: Frame, update: &FrameUpdate) {
    match update {
        FrameUpdate::Idle => println!("frame {}: idle", frame.index),
        FrameUpdate::AttitudeUnavailable => {
            println!("frame {}: orientation unavailable", frame.index)
        }
        FrameUpdate::AwaitingLocation => {
            println!("frame {}: waiting for a location fix", frame.index)
        }
        FrameUpdate::Refresh(view) => {
            println!(
                "frame {}: {} selected, look {:+.3} {:+.3} {:+.3}",
                frame.index,
                view.selected.len(),
                view.pose.look_dir().x,
                view.pose.look_dir().y,
                view.pose.look_dir().z,
            );
            for (rank, (poi, label)) in view.selected.iter().zip(&view.labels).enumerate() {
                let mut flags = String::new();
                if poi.is_horizon {
                    flags.push_str(" [horizon]");
                }
                if poi.is_antipodal {
                    flags.push_str(" [antipodal]");
                }
                let screen = if label.visible {
                    format!("({:.0}, {:.0})", label.x, label.y)
                } else {
                    "off-screen".to_string()
                };
                println!(
                    "  {:>2}. {:<24} {:<16} {:>8.1}  {:>10}  {}{}",
                    rank + 1,
                    poi.poi.name,
                    poi.poi.country,
                    poi.score,
                    format_distance(poi.distance_km),
                    screen,
                    flags,
                );
            }
        }
    }
}

fn print_json(frame: Frame, update: &FrameUpdate) {
    let payload = match update {
        FrameUpdate::Idle => json!({ "frame": frame.index, "status": "idle" }),
        FrameUpdate::AttitudeUnavailable => {
            json!({ "frame": frame.index, "status": "attitude_unavailable" })
        }
        FrameUpdate::AwaitingLocation => {
            json!({ "frame": frame.index, "status": "awaiting_location" })
        }
        FrameUpdate::Refresh(view) => {
            let pose = &view.pose;
            let selection: Vec<serde_json::Value> = view
                .selected
                .iter()
                .zip(&view.labels)
                .map(|(poi, label)| {
                    json!({
                        "id": poi.poi.id,
                        "name": poi.poi.name,
                        "country": poi.poi.country,
                        "score": poi.score,
                        "distance_km": poi.distance_km,
                        "distance": format_distance(poi.distance_km),
                        "is_horizon": poi.is_horizon,
                        "is_antipodal": poi.is_antipodal,
                        "label": {
                            "x": label.x,
                            "y": label.y,
                            "visible": label.visible,
                        },
                    })
                })
                .collect();
            json!({
                "frame": frame.index,
                "status": "refresh",
                "pose": {
                    "position": [pose.position.x, pose.position.y, pose.position.z],
                    "up": [pose.up.x, pose.up.y, pose.up.z],
                    "look_target": [pose.look_target.x, pose.look_target.y, pose.look_target.z],
                    "roll_rad": pose.roll_rad,
                },
                "selection": selection,
            })
        }
    };
    println!("{payload}");
}
