//! Froth Particles - pooled bubble simulation
//!
//! Provides a fixed-capacity bubble pool with:
//! - Edge spawning in normalized viewport space
//! - Position integration, breathing scale, and a fade-in/fade-out curve
//! - Expiry by age or by leaving the viewport, with replenishment to a target
//! - Pointer popping with an optional burst effect
//! - GPU instance packing for instanced draw calls

pub mod config;
pub mod curves;
pub mod particle;
pub mod pop;
pub mod random;
pub mod render;
pub mod spawn;
pub mod update;
pub mod viewport;

use froth_core::Result;
use froth_runtime::{RuntimeSystem, ViewportInfo};

pub use config::{BubbleConfig, DensityConfig, PopConfig};
pub use particle::{Bubble, BubbleInstance, BubblePool};
pub use pop::PopEffect;
pub use random::BubbleRng;
pub use render::{BubbleRenderer, FrameData, InstanceBuffer};
pub use spawn::Edge;
pub use update::TickReport;
pub use viewport::{ViewportBounds, ViewportModel};

/// The bubble layer. Implements RuntimeSystem for integration with the frame loop.
pub struct BubbleSystem {
    config: BubbleConfig,
    pool: BubblePool,
    viewport: ViewportModel,
    rng: BubbleRng,
    target: usize,
    pixel_ratio: f32,
    instances: InstanceBuffer,
    pops: Vec<PopEffect>,
    last_report: TickReport,
}

impl BubbleSystem {
    /// Bubble system seeded from the operating system
    pub fn new(config: BubbleConfig) -> Self {
        Self::with_rng(config, BubbleRng::from_entropy())
    }

    /// Reproducible bubble system
    pub fn with_seed(config: BubbleConfig, seed: u64) -> Self {
        Self::with_rng(config, BubbleRng::new(seed))
    }

    fn with_rng(config: BubbleConfig, rng: BubbleRng) -> Self {
        let capacity = config.capacity();
        Self {
            target: config.target_active,
            pool: BubblePool::new(capacity),
            viewport: ViewportModel::default(),
            rng,
            pixel_ratio: 1.0,
            instances: InstanceBuffer::with_capacity(capacity),
            pops: Vec::new(),
            last_report: TickReport::default(),
            config,
        }
    }

    pub fn config(&self) -> &BubbleConfig {
        &self.config
    }

    pub fn pool(&self) -> &BubblePool {
        &self.pool
    }

    /// Direct pool access for hosts that seed or inspect bubbles
    pub fn pool_mut(&mut self) -> &mut BubblePool {
        &mut self.pool
    }

    pub fn viewport(&self) -> &ViewportModel {
        &self.viewport
    }

    pub fn bounds(&self) -> ViewportBounds {
        self.viewport.bounds()
    }

    /// Bubbles the replenisher currently aims for
    pub fn target(&self) -> usize {
        self.target
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn last_report(&self) -> TickReport {
        self.last_report
    }

    /// Adopt new viewport facts: bounds, target, and pixel ratio.
    /// Returns whether the bounds changed.
    pub fn apply_viewport(&mut self, info: &ViewportInfo) -> bool {
        let changed = self.viewport.recompute(info.size);
        self.target =
            spawn::target_for_viewport(&self.config, self.viewport.size(), info.reduced_motion);
        self.pixel_ratio =
            spawn::pixel_ratio(&self.config, info.device_pixel_ratio, info.reduced_motion);
        changed
    }

    /// Spawn up to the target without advancing time
    pub fn replenish(&mut self) -> usize {
        let bounds = self.viewport.bounds();
        let spawned = spawn::replenish(
            &mut self.pool,
            &bounds,
            &self.config,
            &mut self.rng,
            self.target,
        );
        self.instances.pack(&self.pool);
        spawned
    }

    /// Advance the simulation by `dt` seconds (clamped) and repack instances
    pub fn step(&mut self, dt: f32) -> TickReport {
        let bounds = self.viewport.bounds();
        let report = update::tick(
            &mut self.pool,
            &bounds,
            &self.config,
            &mut self.rng,
            self.target,
            dt,
        );
        self.instances.pack(&self.pool);
        self.last_report = report;
        tracing::trace!(
            dt = report.dt,
            expired = report.expired,
            retired = report.retired,
            spawned = report.spawned,
            active = report.active,
            "bubble tick"
        );
        report
    }

    /// Pop the bubble under a CSS pixel coordinate. Returns whether one
    /// popped. Always false while popping is disabled.
    pub fn pop_at_pixel(&mut self, x: f32, y: f32) -> bool {
        if !self.config.pop.enabled {
            return false;
        }
        let point = self.viewport.to_normalized(x, y);
        let Some(effect) = pop::pop_at(&mut self.pool, point, self.config.pop.hit_scale) else {
            return false;
        };
        tracing::debug!(x = effect.position[0], y = effect.position[1], "bubble popped");
        if self.config.pop.burst {
            self.pops.push(effect);
        }
        self.instances.pack(&self.pool);
        true
    }

    /// Data for the renderer for the current frame
    pub fn frame_data(&self) -> FrameData<'_> {
        FrameData {
            instances: self.instances.as_slice(),
            pops: &self.pops,
            bounds: self.viewport.bounds(),
        }
    }

    /// Forget burst effects once the renderer has consumed them
    pub fn clear_effects(&mut self) {
        self.pops.clear();
    }
}

impl RuntimeSystem for BubbleSystem {
    fn initialize(&mut self, viewport: &ViewportInfo) -> Result<()> {
        self.apply_viewport(viewport);
        let spawned = self.replenish();
        tracing::info!(
            capacity = self.pool.capacity(),
            target = self.target,
            spawned,
            "[bubbles] initialized"
        );
        Ok(())
    }

    fn resize(&mut self, viewport: &ViewportInfo) -> Result<()> {
        if self.apply_viewport(viewport) {
            tracing::debug!(
                half_width = self.viewport.bounds().half_width,
                target = self.target,
                "[bubbles] viewport changed"
            );
        }
        Ok(())
    }

    fn update(&mut self, dt: f64) -> Result<()> {
        self.step(dt as f32);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.pool.clear();
        self.instances.clear();
        self.pops.clear();
        Ok(())
    }

    fn name(&self) -> &str {
        "bubbles"
    }
}
