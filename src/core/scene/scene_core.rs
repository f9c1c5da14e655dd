//=========================================================================
// Scene Core
//=========================================================================
//
// State shared by every concrete scene: the object list, the renderer
// the objects are drawn with, and the camera.
//
// Objects held before start() are started and registered in bulk when
// the scene starts. Objects added afterwards are started and registered
// immediately.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== External Crates =====================================================

use glam::Vec2;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{SceneConfig, SceneInstanceId};
use crate::core::error::RenderError;
use crate::core::object::{GameObject, ObjectId};
use crate::core::render::{Camera, GraphicsDevice, Renderer, ShaderSource};

//=== SceneCore ===========================================================

pub struct SceneCore {
    instance: SceneInstanceId,
    objects: Vec<GameObject>,
    renderer: Renderer,
    camera: Camera,
    running: bool,
}

impl SceneCore {
    //--- Construction -----------------------------------------------------

    pub fn new(max_batch_size: usize, shader: Arc<ShaderSource>, camera: Camera) -> Self {
        Self {
            instance: SceneInstanceId::next(),
            objects: Vec::new(),
            renderer: Renderer::new(max_batch_size, shader),
            camera,
            running: false,
        }
    }

    /// Builds a core with the configured renderer and a camera at the origin.
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(
            config.max_batch_size,
            Arc::clone(&config.shader),
            Camera::with_viewport(Vec2::ZERO, config.viewport),
        )
    }

    //--- Lifecycle --------------------------------------------------------

    /// Starts every held object, in insertion order, and registers it
    /// with the renderer. Calling it on a running scene does nothing.
    ///
    /// # Errors
    ///
    /// A newly allocated batch failed to compile its shader. The scene
    /// stays not running.
    pub fn start(&mut self, device: &mut dyn GraphicsDevice) -> Result<(), RenderError> {
        if self.running {
            return Ok(());
        }

        for object in &mut self.objects {
            object.start();
            self.renderer.add(device, object)?;
        }
        self.running = true;

        info!(
            target: "scene",
            "Scene started: {} objects in {} batches",
            self.objects.len(),
            self.renderer.batch_count()
        );
        Ok(())
    }

    /// Adds an object, starting and registering it right away when the
    /// scene is already running.
    ///
    /// # Errors
    ///
    /// Registration needed a new batch and its shader failed.
    pub fn add_game_object(
        &mut self,
        mut object: GameObject,
        device: &mut dyn GraphicsDevice,
    ) -> Result<ObjectId, RenderError> {
        let id = object.id();

        if self.running {
            object.start();
            self.renderer.add(device, &object)?;
            debug!(target: "scene", "Added '{}' ({}) to running scene", object.name(), id);
        }

        self.objects.push(object);
        Ok(id)
    }

    /// Queues an object for the bulk start. Used while building a scene.
    pub(crate) fn stage(&mut self, object: GameObject) {
        debug_assert!(!self.running, "stage() called on a running scene");
        self.objects.push(object);
    }

    /// Ticks every object in insertion order.
    pub fn tick_game_objects(&mut self, dt: f32) {
        for object in &mut self.objects {
            object.tick(dt);
        }
    }

    /// Draws every batch with this scene's camera.
    pub fn render(&mut self, device: &mut dyn GraphicsDevice) {
        self.renderer.render_batches(device, &self.camera);
    }

    pub fn dispose(&mut self, device: &mut dyn GraphicsDevice) {
        self.renderer.dispose(device);
    }

    //--- Accessors --------------------------------------------------------

    pub fn instance(&self) -> SceneInstanceId {
        self.instance
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
