//! Spawn policy: where new bubbles appear, how they move, and how many
//! should be alive.

use crate::config::BubbleConfig;
use crate::particle::{Bubble, BubblePool};
use crate::random::BubbleRng;
use crate::viewport::ViewportBounds;
use froth_core::PixelSize;

/// Viewport edge a bubble enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn random(rng: &mut BubbleRng) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }
}

/// Build the initial state for a bubble entering from `edge`.
///
/// The bubble starts `spawn_pad` outside that edge with an inward velocity
/// component in `[speed_min, speed_max)` and a small lateral component, so
/// it always crosses the visible area.
pub fn bubble_at_edge(
    edge: Edge,
    bounds: &ViewportBounds,
    config: &BubbleConfig,
    rng: &mut BubbleRng,
) -> Bubble {
    let pad = config.spawn_pad;
    let inward = rng.range(config.speed_min, config.speed_max);
    let lateral = rng.spread(config.lateral_spread);

    let (x, y, vx, vy) = match edge {
        Edge::Top => (
            rng.range(-bounds.half_width, bounds.half_width),
            bounds.half_height + pad,
            lateral,
            -inward,
        ),
        Edge::Bottom => (
            rng.range(-bounds.half_width, bounds.half_width),
            -bounds.half_height - pad,
            lateral,
            inward,
        ),
        Edge::Right => (
            bounds.half_width + pad,
            rng.range(-bounds.half_height, bounds.half_height),
            -inward,
            lateral,
        ),
        Edge::Left => (
            -bounds.half_width - pad,
            rng.range(-bounds.half_height, bounds.half_height),
            inward,
            lateral,
        ),
    };

    let z = rng.range(-config.depth_jitter, config.depth_jitter);
    let base_size = rng.range(config.size_min, config.size_max);

    Bubble {
        active: true,
        position: [x, y, z],
        velocity: [vx, vy],
        age: 0.0,
        lifetime: rng.range(config.lifetime_min, config.lifetime_max),
        base_size,
        phase: rng.angle(),
        opacity: 0.0,
        scale: base_size,
    }
}

/// Spawn one bubble entering from `edge`. No-op when the pool is saturated.
pub fn spawn_at_edge(
    edge: Edge,
    pool: &mut BubblePool,
    bounds: &ViewportBounds,
    config: &BubbleConfig,
    rng: &mut BubbleRng,
) -> Option<usize> {
    pool.find_free_slot()?;
    pool.activate(bubble_at_edge(edge, bounds, config, rng))
}

/// Spawn one bubble from a uniformly chosen edge. No-op when saturated.
pub fn spawn_one(
    pool: &mut BubblePool,
    bounds: &ViewportBounds,
    config: &BubbleConfig,
    rng: &mut BubbleRng,
) -> Option<usize> {
    let edge = Edge::random(rng);
    spawn_at_edge(edge, pool, bounds, config, rng)
}

/// Spawn until `min(target, capacity)` bubbles are active.
/// Returns how many were spawned.
pub fn replenish(
    pool: &mut BubblePool,
    bounds: &ViewportBounds,
    config: &BubbleConfig,
    rng: &mut BubbleRng,
    target: usize,
) -> usize {
    let goal = target.min(pool.capacity());
    let mut spawned = 0;
    while pool.active_count() < goal {
        if spawn_one(pool, bounds, config, rng).is_none() {
            break;
        }
        spawned += 1;
    }
    spawned
}

/// Number of bubbles to keep alive for a viewport.
///
/// With area scaling the target grows with pixel area relative to the
/// reference area, clamped to the density range. Reduced motion scales the
/// result down, keeping at least one bubble.
pub fn target_for_viewport(config: &BubbleConfig, size: PixelSize, reduced_motion: bool) -> usize {
    let density = &config.density;
    let base = if density.scale_with_area && size.is_usable() {
        let scaled = config.target_active as f32 * size.area() / density.reference_area;
        (scaled.round() as usize).clamp(density.target_min, density.target_max)
    } else {
        config.target_active
    };

    if reduced_motion {
        ((base as f32 * density.reduced_motion_factor).round() as usize).max(1)
    } else {
        base
    }
}

/// Render pixel ratio: the device ratio capped at `max_pixel_ratio`, or 1
/// when reduced motion disables upscaling.
pub fn pixel_ratio(config: &BubbleConfig, device_pixel_ratio: f32, reduced_motion: bool) -> f32 {
    if reduced_motion || !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
        return 1.0;
    }
    device_pixel_ratio.min(config.max_pixel_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide() -> ViewportBounds {
        ViewportBounds {
            half_width: 1.6,
            half_height: 1.0,
        }
    }

    #[test]
    fn edge_spawns_start_outside_and_head_inward() {
        let config = BubbleConfig::default();
        let bounds = wide();
        let mut rng = BubbleRng::new(11);

        for _ in 0..50 {
            let top = bubble_at_edge(Edge::Top, &bounds, &config, &mut rng);
            assert!((top.position[1] - 1.12).abs() < 1e-6);
            assert!(top.velocity[1] <= -0.15 && top.velocity[1] > -0.35);
            assert!(top.position[0].abs() <= 1.6);

            let bottom = bubble_at_edge(Edge::Bottom, &bounds, &config, &mut rng);
            assert!((bottom.position[1] + 1.12).abs() < 1e-6);
            assert!(bottom.velocity[1] >= 0.15);

            let right = bubble_at_edge(Edge::Right, &bounds, &config, &mut rng);
            assert!((right.position[0] - 1.72).abs() < 1e-6);
            assert!(right.velocity[0] <= -0.15);
            assert!(right.position[1].abs() <= 1.0);

            let left = bubble_at_edge(Edge::Left, &bounds, &config, &mut rng);
            assert!((left.position[0] + 1.72).abs() < 1e-6);
            assert!(left.velocity[0] >= 0.15);
            assert!(left.velocity[1].abs() <= 0.125);
        }
    }

    #[test]
    fn spawned_attributes_within_ranges() {
        let config = BubbleConfig::default();
        let mut rng = BubbleRng::new(5);
        for _ in 0..200 {
            let edge = Edge::random(&mut rng);
            let b = bubble_at_edge(edge, &wide(), &config, &mut rng);
            assert!(b.active);
            assert_eq!(b.age, 0.0);
            assert_eq!(b.opacity, 0.0);
            assert!(b.base_size >= 0.06 && b.base_size < 0.18);
            assert!(b.lifetime >= 6.0 && b.lifetime < 12.0);
            assert!(b.position[2].abs() <= 0.3);
            assert!(b.phase >= 0.0 && b.phase < std::f32::consts::TAU);
        }
    }

    #[test]
    fn spawn_is_noop_when_saturated() {
        let config = BubbleConfig::default();
        let mut pool = BubblePool::new(2);
        let mut rng = BubbleRng::new(1);
        assert!(spawn_one(&mut pool, &wide(), &config, &mut rng).is_some());
        assert!(spawn_one(&mut pool, &wide(), &config, &mut rng).is_some());
        assert!(spawn_one(&mut pool, &wide(), &config, &mut rng).is_none());
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn replenish_reaches_target() {
        let config = BubbleConfig::default();
        let mut pool = BubblePool::new(config.capacity());
        let mut rng = BubbleRng::new(2);
        assert_eq!(pool.active_count(), 0);
        let spawned = replenish(&mut pool, &wide(), &config, &mut rng, 10);
        assert_eq!(spawned, 10);
        assert_eq!(pool.active_count(), 10);

        // Already satisfied
        assert_eq!(replenish(&mut pool, &wide(), &config, &mut rng, 10), 0);
    }

    #[test]
    fn replenish_stops_at_capacity() {
        let config = BubbleConfig::default();
        let mut pool = BubblePool::new(4);
        let mut rng = BubbleRng::new(2);
        assert_eq!(replenish(&mut pool, &wide(), &config, &mut rng, 10), 4);
        assert!(pool.is_saturated());
    }

    #[test]
    fn fixed_target_ignores_area() {
        let config = BubbleConfig::default();
        assert_eq!(
            target_for_viewport(&config, PixelSize::new(320.0, 640.0), false),
            10
        );
        assert_eq!(
            target_for_viewport(&config, PixelSize::new(3840.0, 2160.0), false),
            10
        );
    }

    #[test]
    fn area_scaled_target_is_clamped() {
        let mut config = BubbleConfig::default();
        config.density.scale_with_area = true;

        let reference = target_for_viewport(&config, PixelSize::new(1920.0, 1080.0), false);
        assert_eq!(reference, 10);

        let phone = target_for_viewport(&config, PixelSize::new(390.0, 844.0), false);
        assert_eq!(phone, config.density.target_min);

        let huge = target_for_viewport(&config, PixelSize::new(7680.0, 4320.0), false);
        assert_eq!(huge, config.density.target_max);
    }

    #[test]
    fn reduced_motion_lowers_target() {
        let config = BubbleConfig::default();
        assert_eq!(
            target_for_viewport(&config, PixelSize::new(1920.0, 1080.0), true),
            5
        );

        let tiny = BubbleConfig {
            target_active: 1,
            ..Default::default()
        };
        assert_eq!(
            target_for_viewport(&tiny, PixelSize::new(1920.0, 1080.0), true),
            1
        );
    }

    #[test]
    fn pixel_ratio_is_capped() {
        let config = BubbleConfig::default();
        assert_eq!(pixel_ratio(&config, 3.0, false), 2.0);
        assert_eq!(pixel_ratio(&config, 1.5, false), 1.5);
        assert_eq!(pixel_ratio(&config, 3.0, true), 1.0);
        assert_eq!(pixel_ratio(&config, 0.0, false), 1.0);
    }
}
