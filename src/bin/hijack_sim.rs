//! Hijack Simulator - Headless Scenario Runner
//!
//! Drives the spectator hijack mod against an in-memory scene loaded from a
//! JSON scenario, with scripted input and scene events, and logs every state
//! change. No window or GPU is needed.
//!
//! Run with: `cargo run --bin hijack_sim -- assets/scenarios/patrol.json`
//!
//! Options:
//! - `--seed N`: deterministic overlay noise
//! - `--dump-noise PATH`: write the generated noise texture as a PNG
//! - `--debug`: debug logging (honours `RUST_LOG`)
//!
//! Scenario format:
//!
//! ```json
//! {
//!   "frames": 120,
//!   "dt": 0.016,
//!   "scene": { "player": 1, "nodes": [...], "characters": [...] },
//!   "events": [
//!     { "frame": 10, "action": "engage" },
//!     { "frame": 40, "action": "next" },
//!     { "frame": 60, "action": "destroy", "character": 3 }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glam::Vec3;
use serde::Deserialize;
use tracing::info;

use spectator_hijack_engine::game::{HijackState, ModBehaviour, ModEntryPoint, ModRuntime, SpectatorHijackController};
use spectator_hijack_engine::host::{CameraRig, CharacterRef, FrameTime, HostFrame, SandboxCamera, SandboxCursor, SandboxScene, Scene};
use spectator_hijack_engine::input::{InputState, KeyCode, MouseButton};
use spectator_hijack_engine::logging;
use spectator_hijack_engine::render::RecordingSurface;

fn default_frames() -> u32 {
    120
}

fn default_dt() -> f32 {
    1.0 / 60.0
}

fn default_screen() -> [f32; 2] {
    [1280.0, 720.0]
}

#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default = "default_frames")]
    frames: u32,
    #[serde(default = "default_dt")]
    dt: f32,
    #[serde(default = "default_screen")]
    screen: [f32; 2],
    scene: SandboxScene,
    #[serde(default)]
    events: Vec<ScheduledEvent>,
}

#[derive(Debug, Deserialize)]
struct ScheduledEvent {
    frame: u32,
    #[serde(flatten)]
    action: Action,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Action {
    Engage,
    Cancel,
    Next,
    Previous,
    Deactivate { character: CharacterRef },
    Activate { character: CharacterRef },
    Destroy { character: CharacterRef },
    Teleport { character: CharacterRef, position: Vec3 },
    RenameRoot { character: CharacterRef, name: String },
    /// Camera singleton goes away (e.g. loading screen)
    DropCamera,
    RestoreCamera,
}

struct Args {
    scenario: Option<PathBuf>,
    dump_noise: Option<PathBuf>,
    seed: Option<u64>,
    debug: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        scenario: None,
        dump_noise: None,
        seed: None,
        debug: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--dump-noise" => {
                let path = iter.next().context("--dump-noise needs a path")?;
                args.dump_noise = Some(PathBuf::from(path));
            }
            "--seed" => {
                let seed = iter.next().context("--seed needs a value")?;
                args.seed = Some(seed.parse().with_context(|| format!("invalid seed '{seed}'"))?);
            }
            "--debug" => args.debug = true,
            other if other.starts_with("--") => bail!("unknown option '{other}'"),
            other => args.scenario = Some(PathBuf::from(other)),
        }
    }

    if args.scenario.is_none() && args.dump_noise.is_none() {
        bail!("usage: hijack_sim [SCENARIO.json] [--seed N] [--dump-noise PATH] [--debug]");
    }
    Ok(args)
}

fn main() -> Result<()> {
    let args = parse_args()?;
    logging::init(args.debug);

    let seed = args.seed;
    let mut entry = ModEntryPoint::with_factory(move || {
        Ok(match seed {
            Some(seed) => SpectatorHijackController::with_seed(seed),
            None => SpectatorHijackController::new(),
        })
    });
    let mut runtime = ModRuntime::new();
    entry.on_after_setup(&mut runtime);
    if !runtime.is_installed() {
        bail!("controller was not installed");
    }

    if let Some(path) = &args.dump_noise {
        dump_noise(&mut runtime, path)?;
    }

    if let Some(path) = &args.scenario {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        let scenario: Scenario = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse scenario {}", path.display()))?;
        run(&mut runtime, scenario);
    }

    Ok(())
}

fn dump_noise(runtime: &mut ModRuntime, path: &Path) -> Result<()> {
    let controller = runtime.controller_mut().context("controller missing")?;
    let texture = controller.noise_texture();
    let image = image::RgbaImage::from_raw(texture.width(), texture.height(), texture.as_bytes().to_vec())
        .context("noise texture has an unexpected size")?;
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Noise texture written to {}", path.display());
    Ok(())
}

fn run(runtime: &mut ModRuntime, scenario: Scenario) {
    let Scenario {
        frames,
        dt,
        screen,
        mut scene,
        mut events,
    } = scenario;
    events.sort_by_key(|e| e.frame);

    let mut camera = SandboxCamera::default();
    let mut camera_present = true;
    let mut cursor = SandboxCursor::default();
    let mut input = InputState::new();
    let mut surface = RecordingSurface::new(screen[0], screen[1]);

    let mut state = HijackState::Idle;
    let mut target = None;
    let mut overlay_frames = 0u32;
    let mut pending = events.into_iter().peekable();

    for frame_index in 0..frames {
        while let Some(event) = pending.next_if(|e| e.frame <= frame_index) {
            apply_action(event.action, &mut scene, &mut input, &mut camera_present);
        }

        let now = frame_index as f64 * dt as f64;
        let mut frame = HostFrame {
            scene: &mut scene,
            camera: if camera_present { Some(&mut camera as &mut dyn CameraRig) } else { None },
            cursor: &mut cursor,
            input: &input,
            time: FrameTime::new(now, dt),
        };
        runtime.update(&mut frame);
        runtime.draw(&mut surface);

        if !surface.calls.is_empty() {
            overlay_frames += 1;
        }
        surface.clear();
        input.end_frame();

        let Some(controller) = runtime.controller() else {
            break;
        };
        if controller.state() != state {
            state = controller.state();
            info!(frame = frame_index, "State -> {:?}", state);
        }
        if controller.current_target() != target {
            target = controller.current_target();
            if let Some(t) = target {
                info!(frame = frame_index, "Camera on {}", scene.display_name(t));
            }
        }
    }

    info!(
        "Done: {} frames, final state {:?}, overlay drawn on {} frames, cursor {:?}",
        frames, state, overlay_frames, cursor.state
    );
}

fn apply_action(action: Action, scene: &mut SandboxScene, input: &mut InputState, camera_present: &mut bool) {
    match action {
        Action::Engage => input.click(MouseButton::Middle),
        Action::Cancel => input.tap_key(KeyCode::Escape),
        Action::Next => input.tap_key(KeyCode::D),
        Action::Previous => input.tap_key(KeyCode::A),
        Action::Deactivate { character } => scene.set_active(character, false),
        Action::Activate { character } => scene.set_active(character, true),
        Action::Destroy { character } => scene.destroy(character),
        Action::Teleport { character, position } => scene.teleport(character, position),
        Action::RenameRoot { character, name } => scene.rename_root(character, &name),
        Action::DropCamera => *camera_present = false,
        Action::RestoreCamera => *camera_present = true,
    }
}
