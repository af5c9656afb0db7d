//! Bridges the simulation to a renderer: instance packing and the renderer
//! collaborator interface.

use crate::particle::{BubbleInstance, BubblePool};
use crate::pop::PopEffect;
use crate::viewport::ViewportBounds;
use froth_core::PixelSize;

/// Everything a renderer needs to draw one frame
pub struct FrameData<'a> {
    pub instances: &'a [BubbleInstance],
    /// Pops since the previous frame (empty unless bursts are enabled)
    pub pops: &'a [PopEffect],
    /// Orthographic extents the instances are expressed in
    pub bounds: ViewportBounds,
}

/// The scene-graph collaborator that draws bubbles.
///
/// Material appearance and lighting are entirely the renderer's concern.
pub trait BubbleRenderer {
    /// Match the drawing surface to the viewport
    fn resize(&mut self, size: PixelSize, pixel_ratio: f32);

    /// Draw one frame
    fn draw(&mut self, frame: &FrameData<'_>);

    /// Release GPU and scene resources. Called once on dispose.
    fn release(&mut self);
}

/// Reusable buffer of packed instances, rebuilt once per frame
#[derive(Default)]
pub struct InstanceBuffer {
    instances: Vec<BubbleInstance>,
}

impl InstanceBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    /// Pack active bubbles. Call this after the tick.
    pub fn pack(&mut self, pool: &BubblePool) {
        self.instances.clear();
        self.instances
            .extend(pool.active_slice().iter().map(BubbleInstance::from_bubble));
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn as_slice(&self) -> &[BubbleInstance] {
        &self.instances
    }

    /// Raw bytes for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances[..])
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Bubble;

    #[test]
    fn pack_matches_active_set() {
        let mut pool = BubblePool::new(8);
        for i in 0..3 {
            pool.activate(Bubble {
                position: [i as f32, 0.5, 0.1],
                scale: 0.1,
                opacity: 0.2,
                lifetime: 4.0,
                age: 1.0,
                ..Bubble::dead()
            });
        }
        let mut buffer = InstanceBuffer::with_capacity(pool.capacity());
        buffer.pack(&pool);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.as_slice()[2].pos_scale, [2.0, 0.5, 0.1, 0.1]);
        assert!((buffer.as_slice()[0].params[0] - 0.2).abs() < 1e-6);
        assert!((buffer.as_slice()[0].params[2] - 0.25).abs() < 1e-6);
        assert_eq!(buffer.as_bytes().len(), 3 * 32);

        pool.deactivate(0);
        buffer.pack(&pool);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn empty_pool_packs_nothing() {
        let pool = BubblePool::new(4);
        let mut buffer = InstanceBuffer::default();
        buffer.pack(&pool);
        assert!(buffer.is_empty());
    }
}
