//! Pointer-driven popping
//!
//! A pop deactivates a bubble immediately, bypassing age and bounds expiry.
//! The optional burst is only a record handed to the renderer; it never
//! occupies a pool slot.

use crate::particle::BubblePool;
use froth_core::Vec2;
use serde::Serialize;

/// Visual burst left behind by a popped bubble
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopEffect {
    pub position: [f32; 3],
    /// Rendered scale of the bubble when it popped
    pub size: f32,
}

/// Slot of the active bubble whose circular hit region contains `point`,
/// preferring the one whose centre is nearest.
pub fn hit_test(pool: &BubblePool, point: Vec2, hit_scale: f32) -> Option<usize> {
    pool.active_slice()
        .iter()
        .enumerate()
        .filter_map(|(slot, b)| {
            let centre = Vec2::new(b.position[0], b.position[1]);
            let dist_sq = centre.distance_squared(&point);
            let radius = b.scale.abs() * hit_scale;
            (dist_sq <= radius * radius).then_some((slot, dist_sq))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(slot, _)| slot)
}

/// Deactivate the bubble under `point`, returning where it was
pub fn pop_at(pool: &mut BubblePool, point: Vec2, hit_scale: f32) -> Option<PopEffect> {
    let slot = hit_test(pool, point, hit_scale)?;
    let b = &pool.active_slice()[slot];
    let effect = PopEffect {
        position: b.position,
        size: b.scale,
    };
    pool.deactivate(slot);
    Some(effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Bubble;

    fn at(x: f32, y: f32, scale: f32, age: f32) -> Bubble {
        Bubble {
            position: [x, y, 0.0],
            base_size: scale,
            scale,
            age,
            lifetime: 10.0,
            ..Bubble::dead()
        }
    }

    #[test]
    fn miss_returns_none() {
        let mut pool = BubblePool::new(4);
        pool.activate(at(0.0, 0.0, 0.1, 1.0));
        assert!(hit_test(&pool, Vec2::new(0.5, 0.5), 1.0).is_none());
        assert!(pop_at(&mut pool, Vec2::new(0.5, 0.5), 1.0).is_none());
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn nearest_overlapping_bubble_wins() {
        let mut pool = BubblePool::new(4);
        pool.activate(at(0.0, 0.0, 0.2, 1.0));
        pool.activate(at(0.1, 0.0, 0.2, 1.0));
        let slot = hit_test(&pool, Vec2::new(0.08, 0.0), 1.0);
        assert_eq!(slot, Some(1));
    }

    #[test]
    fn pop_ignores_fade_phase() {
        let mut pool = BubblePool::new(4);
        // Brand new bubble, still fully transparent
        pool.activate(at(0.3, -0.2, 0.1, 0.0));
        let effect = pop_at(&mut pool, Vec2::new(0.32, -0.2), 1.0).unwrap();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(effect.position, [0.3, -0.2, 0.0]);
        assert!((effect.size - 0.1).abs() < 1e-6);
    }

    #[test]
    fn hit_scale_widens_region() {
        let mut pool = BubblePool::new(4);
        pool.activate(at(0.0, 0.0, 0.1, 1.0));
        assert!(hit_test(&pool, Vec2::new(0.15, 0.0), 1.0).is_none());
        assert_eq!(hit_test(&pool, Vec2::new(0.15, 0.0), 2.0), Some(0));
    }
}
