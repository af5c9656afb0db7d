//! Per-frame lifecycle update: integrate, fade, expire, replenish.

use crate::config::BubbleConfig;
use crate::curves::{breathing_scale, fade_factor};
use crate::particle::{Bubble, BubblePool};
use crate::random::BubbleRng;
use crate::spawn::replenish;
use crate::viewport::ViewportBounds;
use serde::Serialize;

/// What one tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TickReport {
    /// Step actually applied after clamping
    pub dt: f32,
    pub expired: usize,
    /// Healthy bubbles removed because the target dropped below the active count
    pub retired: usize,
    pub spawned: usize,
    /// Active bubbles after replenishment
    pub active: usize,
}

/// Advance one bubble by `dt` and refresh its derived scale and opacity
pub fn integrate(b: &mut Bubble, dt: f32, config: &BubbleConfig) {
    b.position[0] += b.velocity[0] * dt;
    b.position[1] += b.velocity[1] * dt;

    b.phase += dt * config.breathing_rate;
    b.scale = breathing_scale(b.base_size, b.phase, config.breathing_amplitude);

    b.age += dt;
    let t = if b.lifetime > 0.0 { b.age / b.lifetime } else { 1.0 };
    b.opacity = config.opacity_max * fade_factor(t, config.fade_in, config.fade_out);
}

/// Integrate every active bubble and deactivate the expired ones in the same
/// pass. Returns `(clamped dt, expired count)`.
pub fn advance(
    pool: &mut BubblePool,
    bounds: &ViewportBounds,
    config: &BubbleConfig,
    dt: f32,
) -> (f32, usize) {
    let dt = dt.clamp(0.0, config.max_dt);
    let margin = config.exit_margin;
    let expired = pool.retain_active(|b| {
        integrate(b, dt, config);
        !b.is_expired(bounds, margin)
    });
    (dt, expired)
}

/// Deactivate bubbles until no more than `min(target, capacity)` remain,
/// furthest through their lifetime first. Returns how many were removed.
pub fn retire_excess(pool: &mut BubblePool, target: usize) -> usize {
    let goal = target.min(pool.capacity());
    let mut retired = 0;
    while pool.active_count() > goal {
        let oldest = pool
            .active_slice()
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.age_ratio().total_cmp(&b.age_ratio()))
            .map(|(slot, _)| slot);
        let Some(slot) = oldest else {
            break;
        };
        pool.deactivate(slot);
        retired += 1;
    }
    retired
}

/// Full tick: advance, trim down to `target`, then spawn back up to it.
pub fn tick(
    pool: &mut BubblePool,
    bounds: &ViewportBounds,
    config: &BubbleConfig,
    rng: &mut BubbleRng,
    target: usize,
    dt: f32,
) -> TickReport {
    let (dt, expired) = advance(pool, bounds, config, dt);
    let retired = retire_excess(pool, target);
    let spawned = replenish(pool, bounds, config, rng, target);
    TickReport {
        dt,
        expired,
        retired,
        spawned,
        active: pool.active_count(),
    }
}
