//=========================================================================
// Renderer
//=========================================================================
//
// Owns the ordered list of render batches and places newly visible
// objects into them.
//
// Placement is first-fit: batches are scanned in creation order and the
// sprite goes into the first one with room. When every batch is full a
// new one is created, started and appended. Sprites never move between
// batches once placed, and batch order is draw order.
//
//=========================================================================

use std::sync::Arc;

use log::{debug, info};

use super::batch::RenderBatch;
use super::camera::Camera;
use super::gpu::GraphicsDevice;
use super::shader::ShaderSource;
use crate::core::error::RenderError;
use crate::core::object::{GameObject, SpriteRenderer};

/// Default number of sprites per batch.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

pub struct Renderer {
    max_batch_size: usize,
    shader: Arc<ShaderSource>,
    batches: Vec<RenderBatch>,
}

impl Renderer {
    /// # Panics
    ///
    /// Panics if `max_batch_size == 0`.
    pub fn new(max_batch_size: usize, shader: Arc<ShaderSource>) -> Self {
        assert!(max_batch_size > 0, "Batch size must be positive");
        Self {
            max_batch_size,
            shader,
            batches: Vec::new(),
        }
    }

    /// Registers the object's sprite with a batch.
    ///
    /// Returns `Ok(false)` when the object has no [`SpriteRenderer`].
    ///
    /// # Errors
    ///
    /// The shader of a newly created batch failed to compile or link.
    pub fn add(
        &mut self,
        device: &mut dyn GraphicsDevice,
        object: &GameObject,
    ) -> Result<bool, RenderError> {
        let Some(sprite) = object.get_component::<SpriteRenderer>() else {
            return Ok(false);
        };

        if let Some(batch) = self.batches.iter_mut().find(|b| b.has_room()) {
            return Ok(batch.add_sprite(object.id(), &object.transform, sprite));
        }

        let mut batch = RenderBatch::new(self.max_batch_size, Arc::clone(&self.shader));
        batch.start(device)?;
        let added = batch.add_sprite(object.id(), &object.transform, sprite);
        self.batches.push(batch);

        debug!(
            target: "render",
            "Allocated batch {} (capacity {})",
            self.batches.len(),
            self.max_batch_size
        );

        Ok(added)
    }

    /// Draws every batch in creation order.
    pub fn render_batches(&mut self, device: &mut dyn GraphicsDevice, camera: &Camera) {
        for batch in &mut self.batches {
            batch.render(device, camera);
        }
    }

    pub fn batches(&self) -> &[RenderBatch] {
        &self.batches
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Total sprites across all batches.
    pub fn sprite_count(&self) -> usize {
        self.batches.iter().map(RenderBatch::len).sum()
    }

    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    pub fn dispose(&mut self, device: &mut dyn GraphicsDevice) {
        if self.batches.is_empty() {
            return;
        }

        info!(target: "render", "Releasing {} batches", self.batches.len());
        for mut batch in self.batches.drain(..) {
            batch.dispose(device);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
