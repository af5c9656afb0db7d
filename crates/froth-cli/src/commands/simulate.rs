//! Headless simulation command

use super::load_config;
use anyhow::{bail, Result};
use froth_host::{
    run_pending_frames, BubbleController, HeadlessHost, MountRegistry, RecordingRenderer,
};
use froth_particles::BubbleSystem;
use froth_runtime::{EventBus, HostEvent};
use serde::Serialize;

/// A scripted pointer press: CSS pixel position and the frame it happens before
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopAt {
    pub x: f32,
    pub y: f32,
    pub frame: u32,
}

pub struct SimulateArgs {
    pub config: Option<String>,
    pub frames: u32,
    pub width: f32,
    pub height: f32,
    pub fps: f64,
    pub device_pixel_ratio: f32,
    pub seed: Option<u64>,
    pub reduced_motion: bool,
    pub hide_at: Option<u32>,
    pub show_at: Option<u32>,
    pub lose_device_at: Option<u32>,
    pub restart_at: Option<u32>,
    pub pops: Vec<PopAt>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    frames_requested: u32,
    frames_drawn: u64,
    final_state: String,
    active: usize,
    target: usize,
    capacity: usize,
    spawned: usize,
    expired: usize,
    retired: usize,
    popped: usize,
    peak_instances: usize,
    half_width: f32,
    half_height: f32,
    pixel_ratio: f32,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if args.fps <= 0.0 || !args.fps.is_finite() {
        bail!("--fps must be positive, got {}", args.fps);
    }

    let mut config = load_config(args.config.as_deref())?;
    if !args.pops.is_empty() && !config.pop.enabled {
        tracing::info!("pointer events given; enabling popping");
        config.pop.enabled = true;
    }

    let mut host = HeadlessHost::new(&config.mount_id).with_size(args.width, args.height);
    host.device_pixel_ratio = args.device_pixel_ratio;
    host.reduced_motion = args.reduced_motion;

    let system = match args.seed {
        Some(seed) => BubbleSystem::with_seed(config, seed),
        None => BubbleSystem::new(config),
    };
    let mut controller = BubbleController::new(
        host,
        RecordingRenderer::default(),
        system,
        MountRegistry::new(),
    );

    if !controller.start() {
        bail!("bubble layer declined to start");
    }

    let frame_time = 1.0 / args.fps;
    let mut bus = EventBus::new();
    let mut spawned = 0;
    let mut expired = 0;
    let mut retired = 0;
    let mut popped = 0;

    for frame in 0..args.frames {
        if args.hide_at == Some(frame) {
            bus.push(HostEvent::VisibilityChanged(false));
        }
        if args.show_at == Some(frame) {
            bus.push(HostEvent::VisibilityChanged(true));
        }
        if args.lose_device_at == Some(frame) {
            bus.push(HostEvent::DeviceLost);
        }
        for pop in args.pops.iter().filter(|p| p.frame == frame) {
            bus.push(HostEvent::Pointer { x: pop.x, y: pop.y });
        }

        for event in bus.drain() {
            tracing::debug!(frame, ?event, "host event");
            let is_pointer = matches!(event, HostEvent::Pointer { .. });
            let before = controller.system().active_count();
            controller.handle_event(event);
            if is_pointer && controller.system().active_count() < before {
                popped += 1;
            }
        }

        if args.restart_at == Some(frame) && !controller.restart() {
            tracing::warn!(frame, "restart had no effect");
        }

        let now = frame as f64 * frame_time;
        if run_pending_frames(&mut controller, now) > 0 {
            let report = controller.system().last_report();
            spawned += report.spawned;
            expired += report.expired;
            retired += report.retired;
        }
    }

    let system = controller.system();
    let summary = Summary {
        frames_requested: args.frames,
        frames_drawn: controller.frames_drawn(),
        final_state: controller.state().name().to_string(),
        active: system.active_count(),
        target: system.target(),
        capacity: system.pool().capacity(),
        spawned,
        expired,
        retired,
        popped,
        peak_instances: controller.renderer().peak_instance_count,
        half_width: system.bounds().half_width,
        half_height: system.bounds().half_height,
        pixel_ratio: system.pixel_ratio(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    controller.dispose();
    Ok(())
}

fn print_summary(s: &Summary) {
    println!(
        "Simulated {} frame(s), drew {} ({})",
        s.frames_requested, s.frames_drawn, s.final_state
    );
    println!(
        "  active {}/{} (target {}), peak drawn {}",
        s.active, s.capacity, s.target, s.peak_instances
    );
    println!(
        "  spawned {}, expired {}, retired {}, popped {}",
        s.spawned, s.expired, s.retired, s.popped
    );
    println!(
        "  bounds ±{:.3} x ±{:.3}, pixel ratio {}",
        s.half_width, s.half_height, s.pixel_ratio
    );
}

/// Parse `X,Y@FRAME`
pub fn parse_pop(s: &str) -> Result<PopAt, String> {
    let (coords, frame) = s
        .split_once('@')
        .ok_or_else(|| format!("expected X,Y@FRAME, got '{}'", s))?;
    let (x, y) = coords
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y before '@', got '{}'", coords))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    let frame: u32 = frame
        .trim()
        .parse()
        .map_err(|e| format!("invalid frame: {}", e))?;
    Ok(PopAt { x, y, frame })
}
