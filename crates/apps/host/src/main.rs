//! Headless host for the photo globe: loads a photo manifest, wires the
//! interaction controller to a scene, and drives it with a scripted
//! pointer/zoom/tick session instead of a real render loop.

use std::env;
use std::fs;

use anyhow::{Context, Result, bail};
use controller::{Config, Controller, FOV_Y_DEG, InteractionMode, PickCamera, ScenePicker};
use foundation::math::{Vec2, to_radians};
use gpu::{OrbitCamera, RenderCommand, Renderer};
use markers::{MarkerRegistry, PhotoManifest};
use runtime::event_bus::EventBus;
use runtime::frame::Frame;
use scene::World;

const DEMO_MANIFEST: &str = r#"{
    "version": "1",
    "photos": {
        "london.jpg": { "lat": 51.5, "lon": -0.13 },
        "nyc.jpg": { "lat": 40.7, "lon": -74.0 },
        "tokyo.jpg": { "lat": 35.7, "lon": 139.7 }
    }
}"#;

const DEMO_SCRIPT: &str = "
# photos arrive out of order; tokyo's never does
attach nyc.jpg 0.75
attach london.jpg 1.5
fail tokyo.jpg

# drag east, release, coast
down 200 200
move 40 10
tick 0.016 5
up
tick 0.016 30
print

# click the New York photo (near the center of view) and ease over to it
rotate 35 -70
down 640 360
tick 0.016 80
print

# pull back and re-scale the markers
zoom 800
render
";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = real_main() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        bail!(usage());
    }

    let cmd = args.remove(0);
    match cmd.as_str() {
        "demo" => run_demo(),
        "run" => cmd_run(args),
        _ => bail!(usage()),
    }
}

fn usage() -> String {
    "usage:\n  \
     photoglobe demo\n  \
     photoglobe run --manifest FILE [--script FILE] [--config FILE] [--viewport W H] [--trace]"
        .to_string()
}

fn run_demo() -> Result<()> {
    let manifest = PhotoManifest::from_json_str(DEMO_MANIFEST)?;
    let mut session = Session::new(manifest, Config::default(), Vec2::new(1280.0, 720.0), true);
    session.run_script(DEMO_SCRIPT)?;
    session.print_trace();
    Ok(())
}

fn cmd_run(args: Vec<String>) -> Result<()> {
    let mut manifest_path: Option<String> = None;
    let mut script_path: Option<String> = None;
    let mut config_path: Option<String> = None;
    let mut viewport = Vec2::new(1280.0, 720.0);
    let mut trace = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--manifest" => {
                i += 1;
                manifest_path = Some(flag_value(&args, i, "--manifest")?);
            }
            "--script" => {
                i += 1;
                script_path = Some(flag_value(&args, i, "--script")?);
            }
            "--config" => {
                i += 1;
                config_path = Some(flag_value(&args, i, "--config")?);
            }
            "--viewport" => {
                let w: f64 = flag_value(&args, i + 1, "--viewport")?.parse()?;
                let h: f64 = flag_value(&args, i + 2, "--viewport")?.parse()?;
                viewport = Vec2::new(w, h);
                i += 2;
            }
            "--trace" => trace = true,
            s => bail!("unknown arg: {s}\n\n{}", usage()),
        }
        i += 1;
    }

    let manifest_path = manifest_path.context("run requires --manifest")?;
    let manifest_json = fs::read_to_string(&manifest_path)
        .with_context(|| format!("read {manifest_path:?}"))?;
    let manifest = PhotoManifest::from_json_str(&manifest_json)
        .with_context(|| format!("parse {manifest_path:?}"))?;

    let cfg = match config_path {
        Some(path) => {
            let json = fs::read_to_string(&path).with_context(|| format!("read {path:?}"))?;
            serde_json::from_str(&json).with_context(|| format!("parse {path:?}"))?
        }
        None => Config::default(),
    };

    let script = match script_path {
        Some(path) => fs::read_to_string(&path).with_context(|| format!("read {path:?}"))?,
        None => DEMO_SCRIPT.to_string(),
    };

    let mut session = Session::new(manifest, cfg, viewport, trace);
    session.run_script(&script)?;
    session.print_trace();
    Ok(())
}

fn flag_value(args: &[String], i: usize, flag: &str) -> Result<String> {
    args.get(i)
        .cloned()
        .with_context(|| format!("{flag} requires a value"))
}

struct Session {
    world: World,
    registry: MarkerRegistry,
    controller: Controller,
    frame: Frame,
    bus: EventBus,
    viewport: Vec2,
    trace: bool,
}

impl Session {
    fn new(manifest: PhotoManifest, cfg: Config, viewport: Vec2, trace: bool) -> Self {
        let mut world = World::new();
        let registry = MarkerRegistry::from_manifest(&mut world, &manifest);
        log::info!("registered {} photo markers", registry.len());

        Self {
            world,
            registry,
            controller: Controller::new(cfg),
            frame: Frame::first(0.0),
            bus: EventBus::new(),
            viewport,
            trace,
        }
    }

    fn run_script(&mut self, script: &str) -> Result<()> {
        for (line_no, line) in script.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.run_command(line)
                .with_context(|| format!("script line {}: {line:?}", line_no + 1))?;
        }
        Ok(())
    }

    fn run_command(&mut self, line: &str) -> Result<()> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&verb) = tokens.first() else {
            return Ok(());
        };
        let num = |i: usize, what: &str| -> Result<f64> {
            let tok = tokens
                .get(i)
                .with_context(|| format!("{verb} needs {what}"))?;
            tok.parse::<f64>()
                .with_context(|| format!("{what} {tok:?} is not a number"))
        };

        match verb {
            "attach" => {
                let id = *tokens.get(1).context("attach needs an image id")?;
                let aspect = num(2, "an aspect ratio")?;
                if !self.registry.attach_asset(&mut self.world, id, aspect) {
                    bail!("cannot attach {id:?}");
                }
            }
            "fail" => {
                let id = *tokens.get(1).context("fail needs an image id")?;
                if !self.registry.fail_asset(id) {
                    bail!("cannot fail {id:?}");
                }
            }
            "down" => {
                let pos = Vec2::new(num(1, "x")?, num(2, "y")?);
                let camera = PickCamera::new(
                    self.viewport,
                    self.controller.camera_distance(),
                    self.controller.orientation(),
                );
                let picker = ScenePicker::new(&self.world, camera);
                self.controller.on_pointer_down(pos, &picker);
                self.emit("pointer", format!("down -> {:?}", self.controller.mode()));
            }
            "move" => {
                let (dx, dy) = (num(1, "dx")?, num(2, "dy")?);
                self.controller.on_pointer_move(dx, dy);
            }
            "up" => {
                self.controller.on_pointer_up();
                self.emit("pointer", format!("up -> {:?}", self.controller.mode()));
            }
            "tick" => {
                let dt = num(1, "dt")?;
                let count = tokens
                    .get(2)
                    .map(|t| t.parse::<u32>())
                    .transpose()?
                    .unwrap_or(1);
                for _ in 0..count {
                    self.frame = self.frame.advance(dt);
                    if self.controller.tick(dt).transition_finished {
                        let c = self.controller.orientation();
                        self.emit(
                            "transition",
                            format!("finished at {:.2},{:.2}", c.lat_deg, c.lon_deg),
                        );
                    }
                }
            }
            "zoom" => {
                let factor = self.controller.zoom_by(num(1, "a delta")?);
                self.registry.set_scale(&mut self.world, factor);
                self.emit(
                    "zoom",
                    format!(
                        "distance {:.3}, marker scale {factor:.3}",
                        self.controller.camera_distance()
                    ),
                );
            }
            "rotate" => {
                let (lat, lon) = (num(1, "lat")?, num(2, "lon")?);
                self.controller.rotate_to(lat, lon);
            }
            "print" => {
                let c = self.controller.orientation();
                println!(
                    "frame {:>4}  lat {:>8.3}  lon {:>8.3}  distance {:.3}  mode {:?}",
                    self.frame.index,
                    c.lat_deg,
                    c.lon_deg,
                    self.controller.camera_distance(),
                    self.controller.mode()
                );
            }
            "render" => {
                let camera = OrbitCamera::at_distance(
                    self.controller.camera_distance(),
                    to_radians(FOV_Y_DEG),
                );
                let frame = Renderer::collect(&self.world, self.controller.orientation(), camera);
                let billboards = frame
                    .commands
                    .iter()
                    .filter(|c| matches!(c, RenderCommand::Billboard { .. }))
                    .count();
                println!(
                    "render: {} commands ({billboards} billboards) at distance {:.3}",
                    frame.commands.len(),
                    camera.distance
                );
            }
            other => bail!("unknown command {other:?}"),
        }
        Ok(())
    }

    fn emit(&mut self, kind: &'static str, message: String) {
        if self.trace {
            self.bus.emit(self.frame, kind, message);
        }
    }

    fn print_trace(&mut self) {
        if !self.trace {
            return;
        }
        for event in self.bus.drain() {
            println!("[{:>4}] {:<10} {}", event.frame_index, event.kind, event.message);
        }
        let idle = self.controller.mode() == InteractionMode::Idle;
        log::info!("session ended (idle: {idle})");
    }
}
