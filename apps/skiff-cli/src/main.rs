use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::{Mat4, Vec3};
use skiff_common::SceneConfig;
use skiff_kernel::{CameraRig, SceneState, Vehicle};
use skiff_render::{DebugTextRenderer, MeshId};
use skiff_tools::SceneInspector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod script;

#[derive(Parser)]
#[command(name = "skiff-cli", about = "Headless tools for the skiff boat scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene configuration file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, crate info and the active configuration
    Info,
    /// Replay a key script against a fresh scene and dump the result
    Simulate {
        /// Whitespace-separated tokens: up, left, +x, -x, tick:10, ...
        #[arg(allow_hyphen_values = true)]
        script: String,
        /// Viewport aspect ratio for the frame dump
        #[arg(long, default_value = "1.0")]
        aspect: f32,
        /// Print the final state as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the view matrix a rig produces at a given boat pose
    View {
        /// Rig name (freeRoam, overhead, chase, original)
        #[arg(long, default_value = "freeRoam")]
        rig: String,
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        x: f32,
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        z: f32,
        /// Heading in degrees
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        heading: f32,
    },
}

fn print_matrix(m: &Mat4) {
    for row in 0..4 {
        let r = m.row(row);
        println!("  [{:9.4} {:9.4} {:9.4} {:9.4}]", r.x, r.y, r.z, r.w);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = SceneConfig::load_or_default(cli.config.as_deref())
        .context("loading scene configuration")?;
    config.validate()?;

    match cli.command {
        Commands::Info => {
            println!("skiff-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", skiff_render::crate_info());
            println!("tools: {}", skiff_tools::crate_info());
            println!("rigs: {}", CameraRig::ALL.map(|r| r.name()).join(", "));
            let triangles: u32 = MeshId::ALL.iter().map(|m| m.triangle_count()).sum();
            println!("meshes: {} ({triangles} triangles)", MeshId::ALL.len());
            println!(
                "tick: {} ms, fov {:.0}° in [{:.0}, {:.0}], water |x| < {}, |z| < {}",
                config.tick_period_ms,
                config.camera.fov_degrees,
                config.camera.fov_range.min,
                config.camera.fov_range.max,
                config.vehicle.bounds.half_x,
                config.vehicle.bounds.half_z
            );
        }
        Commands::Simulate {
            script,
            aspect,
            json,
        } => {
            let steps = script::parse(&script);
            tracing::info!("replaying {} steps", steps.len());

            let mut scene = SceneState::new(&config);
            script::run(&mut scene, &steps);

            let summary = SceneInspector::summary(&scene);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", DebugTextRenderer::render(&scene, aspect));
                println!("{summary}");
            }
        }
        Commands::View {
            rig,
            x,
            z,
            heading,
        } => {
            let vehicle = Vehicle::new(&config.vehicle).with_pose(Vec3::new(x, 0.0, z), heading);
            let scene = SceneState::new(&config).with_vehicle(vehicle);
            let view = scene.view_matrix_by_name(&rig);
            println!("view[{rig}] boat=({x:.2}, {z:.2}) heading={heading:.1}");
            print_matrix(&view);
        }
    }

    Ok(())
}
