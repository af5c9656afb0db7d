//! Bubble types: CPU simulation state, the fixed pool, and GPU instance data

use crate::viewport::ViewportBounds;
use bytemuck::{Pod, Zeroable};

/// CPU-side bubble state (not sent to GPU)
#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    pub active: bool,
    /// Normalized viewport position; z is fixed at spawn
    pub position: [f32; 3],
    /// Units per second in x and y
    pub velocity: [f32; 2],
    pub age: f32,
    pub lifetime: f32,
    /// Steady-state scale assigned at spawn
    pub base_size: f32,
    /// Breathing oscillation accumulator (radians)
    pub phase: f32,
    /// Derived from the fade curve every tick
    pub opacity: f32,
    /// Rendered scale (base size with breathing applied)
    pub scale: f32,
}

impl Bubble {
    pub fn dead() -> Self {
        Self {
            active: false,
            position: [0.0; 3],
            velocity: [0.0; 2],
            age: 0.0,
            lifetime: 0.0,
            base_size: 0.0,
            phase: 0.0,
            opacity: 0.0,
            scale: 0.0,
        }
    }

    /// Normalized age in [0, 1]
    pub fn age_ratio(&self) -> f32 {
        if self.lifetime <= 0.0 {
            1.0
        } else {
            (self.age / self.lifetime).min(1.0)
        }
    }

    /// Lifetime used up, or drifted further than `margin` past the bounds
    pub fn is_expired(&self, bounds: &ViewportBounds, margin: f32) -> bool {
        self.age >= self.lifetime || !bounds.contains(self.position[0], self.position[1], margin)
    }
}

/// GPU instance data, one per active bubble.
/// 32 bytes, 2 rows of vec4.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct BubbleInstance {
    /// xyz = position, w = rendered scale
    pub pos_scale: [f32; 4],
    /// x = opacity, y = phase, z = age ratio, w = unused
    pub params: [f32; 4],
}

impl BubbleInstance {
    pub fn from_bubble(b: &Bubble) -> Self {
        Self {
            pos_scale: [b.position[0], b.position[1], b.position[2], b.scale],
            params: [b.opacity, b.phase, b.age_ratio(), 0.0],
        }
    }
}

/// Fixed-capacity arena of bubble slots.
///
/// Active bubbles occupy the contiguous prefix `[0, active_count)`; the first
/// free slot is always `active_count`. Deactivation swap-removes, so slot
/// indices of other active bubbles may change when one expires.
pub struct BubblePool {
    bubbles: Vec<Bubble>,
    active_count: usize,
}

impl BubblePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            bubbles: vec![Bubble::dead(); capacity],
            active_count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.bubbles.len()
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn is_saturated(&self) -> bool {
        self.active_count >= self.bubbles.len()
    }

    /// First inactive slot, or None when every slot is in use
    pub fn find_free_slot(&self) -> Option<usize> {
        (!self.is_saturated()).then_some(self.active_count)
    }

    /// Write `bubble` into a free slot in one assignment and mark it active.
    /// Returns None (dropping the bubble) if the pool is saturated.
    pub fn activate(&mut self, mut bubble: Bubble) -> Option<usize> {
        let slot = self.find_free_slot()?;
        bubble.active = true;
        self.bubbles[slot] = bubble;
        self.active_count += 1;
        Some(slot)
    }

    /// Return an active slot to the free region. Stale data stays in place.
    /// Returns false if `slot` is not active.
    pub fn deactivate(&mut self, slot: usize) -> bool {
        if slot >= self.active_count {
            return false;
        }
        self.bubbles[slot].active = false;
        self.active_count -= 1;
        if slot < self.active_count {
            self.bubbles.swap(slot, self.active_count);
        }
        true
    }

    /// Visit every active bubble; deactivate those for which `keep` returns
    /// false. Returns the number deactivated.
    pub fn retain_active<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&mut Bubble) -> bool,
    {
        let mut removed = 0;
        let mut i = 0;
        while i < self.active_count {
            if keep(&mut self.bubbles[i]) {
                i += 1;
            } else {
                self.deactivate(i);
                removed += 1;
                // Don't increment i; the swapped-in bubble needs checking
            }
        }
        removed
    }

    /// Deactivate every bubble
    pub fn clear(&mut self) {
        for b in &mut self.bubbles[..self.active_count] {
            b.active = false;
        }
        self.active_count = 0;
    }

    /// Active bubbles (first `active_count` slots)
    pub fn active_slice(&self) -> &[Bubble] {
        &self.bubbles[..self.active_count]
    }

    /// Active bubbles, mutably
    pub fn active_slice_mut(&mut self) -> &mut [Bubble] {
        &mut self.bubbles[..self.active_count]
    }
}
