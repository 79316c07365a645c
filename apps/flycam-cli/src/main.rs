use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use flycam_camera::{Camera, CameraConfig, Projection};
use flycam_input::{FlyController, InputScript};
use flycam_render::{DebugTextRenderer, FrameView, Renderer, Scene, SceneKind};
use tracing_subscriber::EnvFilter;

/// Walk forward, look right, zoom in, strafe left, then quit.
const DEMO_SCRIPT: &str = "
frames:
  - dt: 0.25
    events:
      - { event: key_pressed, key: W }
  - dt: 0.25
  - dt: 0.25
    events:
      - { event: key_released, key: W }
      - { event: mouse_motion, dx: 300.0, dy: 0.0 }
  - dt: 0.016
    events:
      - { event: mouse_motion, dx: 0.0, dy: -150.0 }
      - { event: scroll, delta: 20.0 }
  - dt: 0.5
    events:
      - { event: key_pressed, key: A }
  - dt: 0.016
    events:
      - { event: key_released, key: A }
      - { event: key_pressed, key: Escape }
";

#[derive(Parser)]
#[command(name = "flycam-cli", about = "Headless tooling for the fly camera")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the default camera config as YAML
    Config,
    /// Replay a recorded input script and print each frame
    Replay {
        /// Input script (YAML)
        #[arg(short, long)]
        script: PathBuf,
        /// Camera config to start from (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Scene used for visibility reports
        #[arg(long, default_value = "cubes")]
        scene: SceneKind,
        /// Print camera states as JSON instead of frame reports
        #[arg(long)]
        json: bool,
    },
    /// Replay the built-in demo script
    Demo {
        /// Print camera states as JSON instead of frame reports
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("flycam-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("camera: {}", flycam_camera::crate_info());
            println!("input: {}", flycam_input::crate_info());
            println!("render: {}", flycam_render::crate_info());
        }
        Commands::Config => {
            print!("{}", CameraConfig::default().to_yaml_string()?);
        }
        Commands::Replay {
            script,
            config,
            scene,
            json,
        } => {
            let input = InputScript::load(&script)
                .with_context(|| format!("loading input script {}", script.display()))?;
            let config = match config {
                Some(path) => CameraConfig::load(&path)
                    .with_context(|| format!("loading camera config {}", path.display()))?,
                None => CameraConfig::default(),
            };
            replay(&input, Camera::from_config(&config)?, &Scene::new(scene), json)?;
        }
        Commands::Demo { json } => {
            let input = InputScript::from_yaml_str(DEMO_SCRIPT)?;
            replay(&input, Camera::default(), &Scene::cubes(), json)?;
        }
    }

    Ok(())
}

fn replay(
    input: &InputScript,
    mut camera: Camera,
    scene: &Scene,
    json: bool,
) -> anyhow::Result<()> {
    let mut controller = FlyController::default();

    if json {
        let states = input.run(&mut controller, &mut camera);
        println!("{}", serde_json::to_string_pretty(&states)?);
        return Ok(());
    }

    let projection = Projection::default();
    let renderer = DebugTextRenderer::new();
    let frames = input.run_with(&mut controller, &mut camera, |index, camera| {
        let view = FrameView::from_camera(camera, &projection);
        println!("--- frame {index} ---");
        print!("{}", renderer.render(scene, &view));
    });

    tracing::info!(frames, total = input.frames.len(), "replay finished");
    Ok(())
}
