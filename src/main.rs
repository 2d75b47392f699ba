mod config;
mod pass;
mod projection;
mod scene;
mod tracking;
mod view;
mod web;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::scene::IconDirectory;
use crate::tracking::{Snapshot, TrackingData};
use crate::view::{
    Collaborators, FixedContainer, ManualScheduler, OutboundEvent, RenderLoop, SceneStore,
    ViewContext,
};

#[derive(Parser)]
#[command(name = "polar-view")]
#[command(about = "Polar azimuth/elevation sky plot")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the polar view over HTTP
    Serve {
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
    },
    /// Render one scene from a snapshot and print it as JSON
    Render {
        #[arg(short, long)]
        config: Option<String>,
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        #[arg(long)]
        planets: bool,
    },
    /// Validate a tracking snapshot file
    Validate { snapshot: PathBuf },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config),
        Commands::Render {
            config,
            snapshot,
            width,
            height,
            planets,
        } => render(config.as_deref(), snapshot, width, height, planets),
        Commands::Validate { snapshot } => validate(&snapshot),
    }
}

fn load_config(path: &str) -> Option<Config> {
    match Config::from_file(path) {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            None
        }
    }
}

fn serve(path: &str) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn render(
    config: Option<&str>,
    snapshot: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    planets: bool,
) -> ExitCode {
    let mut config = match config {
        Some(path) => match load_config(path) {
            Some(c) => c,
            None => return ExitCode::FAILURE,
        },
        None => Config::default(),
    };
    if snapshot.is_some() {
        config.snapshot = snapshot;
    }

    let data = match &config.snapshot {
        Some(path) => match Snapshot::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading snapshot {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Snapshot::default(),
    };

    let collaborators = Collaborators {
        icons: Box::new(IconDirectory::from_config(&config.icons)),
        events: Box::new(Arc::new(Mutex::new(Vec::<OutboundEvent>::new()))),
        container: Box::new(FixedContainer {
            width: width.unwrap_or(config.view.width),
            height: height.unwrap_or(config.view.height),
        }),
    };
    let context = ViewContext::new(
        config.view.margin,
        config.settings.clone(),
        planets || config.view.show_planets,
    );

    let mut view = RenderLoop::new(
        context,
        ManualScheduler::default(),
        SceneStore::default(),
        data,
        collaborators,
    );
    view.start();
    view.stop();

    let Some(scene) = view.renderer().scene() else {
        eprintln!("Nothing to render: viewport has no usable size");
        return ExitCode::FAILURE;
    };

    match serde_json::to_string_pretty(scene) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error encoding scene: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn validate(path: &Path) -> ExitCode {
    match Snapshot::from_file(path) {
        Ok(snapshot) => {
            println!(
                "Snapshot is valid ({} satellites, {} planets)",
                snapshot.satellites.len(),
                snapshot.planets.len()
            );
            for satellite in snapshot.satellites() {
                let pass = match &satellite.next_pass {
                    Some(p) => format!("{} samples", p.samples.len()),
                    None => "no pass".to_string(),
                };
                println!(
                    "  {} ({}): az {:.1} el {:.1}, {}",
                    satellite.name,
                    satellite.catalog_number,
                    satellite.azimuth_deg,
                    satellite.elevation_deg,
                    pass
                );
            }
            if let Some(following) = snapshot.following() {
                println!("Following {}", following.name);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Invalid snapshot: {}", e);
            ExitCode::FAILURE
        }
    }
}
