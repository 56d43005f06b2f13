//! Scene orchestration.
//!
//! [`Scene`] owns everything the animation core is responsible for: the
//! background starfield and its simulator, the two foreground models, the
//! pointer state, the scroll timeline, and the camera. Rendering itself is
//! a collaborator behind the [`RenderBackend`] trait; the scene tells it
//! what to add, remove, and upload, and asks it to draw once per tick.
//!
//! All entry points are safe to call at any frequency, in any order, and
//! after [`dispose`](Scene::dispose) (they become no-ops). Nothing here
//! panics on missing collaborators or out-of-range input.
//!
//! ```ignore
//! let profile = DeviceProfile::detect();
//! let mut scene = Scene::new(MyBackend::new(surface), &profile, 1280, 720)?;
//!
//! // Host scroll handler:
//! scene.set_progress(0.37);
//!
//! // Host render loop, once per frame:
//! scene.set_pointer(ndc_x, ndc_y);
//! scene.advance(elapsed_seconds);
//! ```

use crate::device::DeviceProfile;
use crate::error::{RenderError, SceneError};
use crate::field::ParticleField;
use crate::input::PointerState;
use crate::model::{Material, ParticleModel};
use crate::scroll::{self, ScrollTimeline, Transform};
use crate::simulation::{FieldSimulator, SimulatorParams};
use crate::spawn::{self, CloudConfig, HumanoidConfig, Shape, SphereShellConfig};
use crate::sprite::SpriteTexture;
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Identifies one of the scene's particle fields at the render seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldHandle {
    Background,
    Primary,
    Secondary,
}

/// Perspective camera state handed to the render backend.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    fov_y_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    parallax: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, 50.0),
            fov_y_degrees: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
            parallax: 2.0,
        };
        camera.set_viewport(width, height);
        camera
    }

    /// Recompute projection parameters for a new viewport size.
    /// Degenerate sizes are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Nudge the camera sideways toward the smoothed pointer.
    fn follow_pointer(&mut self, smoothed: Vec2) {
        self.position.x = smoothed.x * self.parallax;
        self.position.y = smoothed.y * self.parallax;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }
}

/// Render collaborator contract.
///
/// The scene calls `add_to_scene`/`remove_from_scene` once per field
/// lifetime, `upload_positions`/`set_transform` as state changes, and
/// `render` once per tick. A backend that has lost its surface returns
/// [`RenderError::MissingSurface`] and the scene degrades to a skipped
/// frame rather than failing.
pub trait RenderBackend {
    fn add_to_scene(&mut self, handle: FieldHandle, field: &ParticleField, material: &Material);
    fn remove_from_scene(&mut self, handle: FieldHandle);
    fn upload_positions(&mut self, handle: FieldHandle, bytes: &[u8]);
    fn set_transform(&mut self, handle: FieldHandle, transform: &Transform);
    fn render(&mut self, camera: &Camera) -> Result<(), RenderError>;
}

/// Backend that draws nothing. Stands in when no render surface exists.
#[derive(Debug, Default)]
pub struct NullBackend;

impl RenderBackend for NullBackend {
    fn add_to_scene(&mut self, _: FieldHandle, _: &ParticleField, _: &Material) {}
    fn remove_from_scene(&mut self, _: FieldHandle) {}
    fn upload_positions(&mut self, _: FieldHandle, _: &[u8]) {}
    fn set_transform(&mut self, _: FieldHandle, _: &Transform) {}
    fn render(&mut self, _: &Camera) -> Result<(), RenderError> {
        Ok(())
    }
}

/// The animation core's root object.
pub struct Scene<B: RenderBackend> {
    backend: B,
    camera: Camera,
    background: Option<ParticleModel>,
    primary: Option<ParticleModel>,
    secondary: Option<ParticleModel>,
    simulator: FieldSimulator<SmallRng>,
    pointer: PointerState,
    timeline: ScrollTimeline,
    disposed: bool,
}

impl<B: RenderBackend> Scene<B> {
    /// Build the full scene: background cloud, sphere-shell primary model,
    /// humanoid secondary model, all registered with the backend and set to
    /// their progress-zero transforms.
    ///
    /// Refuses with [`SceneError::UnsupportedDevice`] when the profile
    /// reports no graphics support. All fields are generated before the
    /// backend sees any of them, so a generation failure leaves no partial
    /// scene behind.
    pub fn new(
        backend: B,
        profile: &DeviceProfile,
        width: u32,
        height: u32,
    ) -> Result<Self, SceneError> {
        if !profile.supports_required_graphics_api() {
            return Err(SceneError::UnsupportedDevice);
        }

        let mut rng = SmallRng::from_entropy();
        let background_field = spawn::generate(
            &Shape::Cloud(CloudConfig::default()),
            profile.background_budget(),
            &mut rng,
        )?;
        let primary_field = spawn::generate(
            &Shape::SphereShell(SphereShellConfig::default()),
            profile.model_budget(),
            &mut rng,
        )?;
        let secondary_field = spawn::generate(
            &Shape::Humanoid(HumanoidConfig::default()),
            profile.model_budget(),
            &mut rng,
        )?;

        let background = ParticleModel::new(
            background_field,
            Material::background(SpriteTexture::primary()),
        );
        let mut primary =
            ParticleModel::new(primary_field, Material::foreground(SpriteTexture::primary()));
        let mut secondary = ParticleModel::new(
            secondary_field,
            Material::foreground(SpriteTexture::secondary()),
        );

        let initial = scroll::evaluate(0.0);
        primary.apply(&initial.primary);
        secondary.apply(&initial.secondary);

        let mut scene = Self {
            backend,
            camera: Camera::new(width, height),
            background: Some(background),
            primary: Some(primary),
            secondary: Some(secondary),
            simulator: FieldSimulator::new(SimulatorParams::default()),
            pointer: PointerState::new(),
            timeline: ScrollTimeline::new(),
            disposed: false,
        };

        for (handle, model) in [
            (FieldHandle::Background, scene.background.as_ref()),
            (FieldHandle::Primary, scene.primary.as_ref()),
            (FieldHandle::Secondary, scene.secondary.as_ref()),
        ] {
            if let Some(model) = model {
                scene.backend.add_to_scene(handle, model.field(), model.material());
                scene.backend.set_transform(handle, model.transform());
            }
        }

        Ok(scene)
    }

    /// Update the scroll progress and re-derive both models' transforms.
    ///
    /// Returns silently when either foreground model is absent or the scene
    /// is disposed; out-of-range progress is clamped.
    pub fn set_progress(&mut self, progress: f32) {
        if self.disposed || self.primary.is_none() || self.secondary.is_none() {
            return;
        }
        let targets = self.timeline.update(progress);

        if let Some(primary) = &mut self.primary {
            primary.apply(&targets.primary);
            self.backend
                .set_transform(FieldHandle::Primary, primary.transform());
        }
        if let Some(secondary) = &mut self.secondary {
            secondary.apply(&targets.secondary);
            self.backend
                .set_transform(FieldHandle::Secondary, secondary.transform());
        }
    }

    /// Register a callback fired once per progress update.
    pub fn set_progress_observer<F: FnMut(f32) + 'static>(&mut self, observer: F) {
        self.timeline.set_observer(observer);
    }

    /// Set the raw pointer position in normalized [-1,1] coordinates.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        if self.disposed {
            return;
        }
        self.pointer.set_target(x, y);
    }

    /// Feed a swipe delta into both foreground models.
    pub fn swipe(&mut self, delta_x: f32, delta_y: f32) {
        if self.disposed {
            return;
        }
        if let Some(primary) = &mut self.primary {
            primary.swipe(delta_x, delta_y);
        }
        if let Some(secondary) = &mut self.secondary {
            secondary.swipe(delta_x, delta_y);
        }
    }

    /// Recompute projection parameters for a resized viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.disposed {
            return;
        }
        self.camera.set_viewport(width, height);
    }

    /// Advance one render tick at `elapsed` seconds of animation time:
    /// smooth the pointer, simulate the background, animate the models,
    /// follow the camera, and ask the backend to draw.
    pub fn advance(&mut self, elapsed: f32) {
        if self.disposed {
            return;
        }

        self.pointer.tick();

        if let Some(background) = &mut self.background {
            self.simulator
                .step(background.field_mut(), &self.pointer, elapsed);
            self.backend
                .upload_positions(FieldHandle::Background, background.field().position_bytes());
        }

        if let Some(primary) = &mut self.primary {
            primary.animate();
            self.backend
                .set_transform(FieldHandle::Primary, primary.transform());
        }
        if let Some(secondary) = &mut self.secondary {
            secondary.animate();
            self.backend
                .set_transform(FieldHandle::Secondary, secondary.transform());
        }

        self.camera.follow_pointer(self.pointer.smoothed());

        if let Err(e) = self.backend.render(&self.camera) {
            match e {
                // No surface means nothing to draw this frame; keep going.
                RenderError::MissingSurface => {}
                RenderError::Backend(_) => eprintln!("render error: {}", e),
            }
        }
    }

    /// Remove the primary model from the scene and return it.
    pub fn detach_primary(&mut self) -> Option<ParticleModel> {
        let model = self.primary.take();
        if model.is_some() {
            self.backend.remove_from_scene(FieldHandle::Primary);
        }
        model
    }

    /// Remove the secondary model from the scene and return it.
    pub fn detach_secondary(&mut self) -> Option<ParticleModel> {
        let model = self.secondary.take();
        if model.is_some() {
            self.backend.remove_from_scene(FieldHandle::Secondary);
        }
        model
    }

    /// Release every field and unregister them from the backend. Further
    /// calls on the scene are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if self.background.take().is_some() {
            self.backend.remove_from_scene(FieldHandle::Background);
        }
        if self.primary.take().is_some() {
            self.backend.remove_from_scene(FieldHandle::Primary);
        }
        if self.secondary.take().is_some() {
            self.backend.remove_from_scene(FieldHandle::Secondary);
        }
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Last clamped scroll progress.
    pub fn progress(&self) -> f32 {
        self.timeline.progress()
    }

    pub fn background(&self) -> Option<&ParticleModel> {
        self.background.as_ref()
    }

    pub fn primary(&self) -> Option<&ParticleModel> {
        self.primary.as_ref()
    }

    pub fn secondary(&self) -> Option<&ParticleModel> {
        self.secondary.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::f32::consts::FRAC_PI_4;
    use std::rc::Rc;

    #[derive(Default)]
    struct BackendLog {
        added: Vec<FieldHandle>,
        removed: Vec<FieldHandle>,
        uploads: usize,
        renders: usize,
        transforms: Vec<(FieldHandle, Transform)>,
    }

    struct RecordingBackend {
        log: Rc<RefCell<BackendLog>>,
        surface_missing: bool,
    }

    impl RecordingBackend {
        fn new() -> (Self, Rc<RefCell<BackendLog>>) {
            let log = Rc::new(RefCell::new(BackendLog::default()));
            (
                Self {
                    log: Rc::clone(&log),
                    surface_missing: false,
                },
                log,
            )
        }
    }

    impl RenderBackend for RecordingBackend {
        fn add_to_scene(&mut self, handle: FieldHandle, _: &ParticleField, _: &Material) {
            self.log.borrow_mut().added.push(handle);
        }

        fn remove_from_scene(&mut self, handle: FieldHandle) {
            self.log.borrow_mut().removed.push(handle);
        }

        fn upload_positions(&mut self, _: FieldHandle, _: &[u8]) {
            self.log.borrow_mut().uploads += 1;
        }

        fn set_transform(&mut self, handle: FieldHandle, transform: &Transform) {
            self.log.borrow_mut().transforms.push((handle, *transform));
        }

        fn render(&mut self, _: &Camera) -> Result<(), RenderError> {
            if self.surface_missing {
                return Err(RenderError::MissingSurface);
            }
            self.log.borrow_mut().renders += 1;
            Ok(())
        }
    }

    fn test_scene() -> (Scene<RecordingBackend>, Rc<RefCell<BackendLog>>) {
        let (backend, log) = RecordingBackend::new();
        let profile = DeviceProfile::detect();
        let scene = Scene::new(backend, &profile, 1280, 720).unwrap();
        (scene, log)
    }

    #[test]
    fn test_unsupported_device_refuses_construction() {
        let (backend, log) = RecordingBackend::new();
        let profile = DeviceProfile::detect().with_graphics_supported(false);
        let result = Scene::new(backend, &profile, 1280, 720);

        assert!(matches!(result, Err(SceneError::UnsupportedDevice)));
        assert!(log.borrow().added.is_empty(), "no partial scene allowed");
    }

    #[test]
    fn test_construction_registers_three_fields() {
        let (scene, log) = test_scene();
        assert_eq!(log.borrow().added.len(), 3);
        assert_eq!(scene.background().unwrap().field().count(), 100);
        assert_eq!(scene.primary().unwrap().field().count(), 3000);
        assert_eq!(scene.secondary().unwrap().field().count(), 3000);
    }

    #[test]
    fn test_initial_model_states() {
        let (scene, _) = test_scene();
        let primary = scene.primary().unwrap().transform();
        assert_eq!(primary.opacity, 1.0);
        assert_eq!(primary.scale, Vec3::ONE);

        let secondary = scene.secondary().unwrap().transform();
        assert_eq!(secondary.opacity, 0.0);
        assert_eq!(secondary.scale, Vec3::splat(0.1));
        assert!((secondary.rotation.y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!(scene.secondary().unwrap().material().transparent);
    }

    #[test]
    fn test_mid_entry_progress() {
        let (mut scene, _) = test_scene();
        scene.set_progress(0.7);

        let primary = scene.primary().unwrap().transform();
        assert_eq!(primary.scale, Vec3::splat(3.0));
        assert_eq!(primary.opacity, 0.0);

        let secondary = scene.secondary().unwrap().transform();
        assert!((secondary.scale.x - 0.55).abs() < 1e-3);
        assert!((secondary.rotation.y - FRAC_PI_4).abs() < 1e-3);
        assert!((secondary.opacity - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_progress_idempotent() {
        let (mut scene, _) = test_scene();
        scene.set_progress(0.45);
        let first = *scene.primary().unwrap().transform();
        scene.set_progress(0.45);
        assert_eq!(first, *scene.primary().unwrap().transform());
    }

    #[test]
    fn test_progress_clamped() {
        let (mut scene, _) = test_scene();
        scene.set_progress(-0.5);
        let clamped_low = *scene.primary().unwrap().transform();
        scene.set_progress(0.0);
        assert_eq!(clamped_low, *scene.primary().unwrap().transform());

        scene.set_progress(1.5);
        assert_eq!(scene.progress(), 1.0);
    }

    #[test]
    fn test_zero_elapsed_frames_leave_background_static() {
        let (mut scene, log) = test_scene();
        let initial = scene.background().unwrap().field().positions().to_vec();

        for _ in 0..100 {
            scene.advance(0.0);
        }

        assert_eq!(
            scene.background().unwrap().field().positions(),
            initial.as_slice()
        );
        assert_eq!(log.borrow().uploads, 100);
        assert_eq!(log.borrow().renders, 100);
    }

    #[test]
    fn test_advance_moves_background_over_time() {
        let (mut scene, _) = test_scene();
        let initial = scene.background().unwrap().field().positions().to_vec();

        scene.advance(0.0);
        scene.advance(1.0 / 60.0);

        assert_ne!(
            scene.background().unwrap().field().positions(),
            initial.as_slice()
        );
    }

    #[test]
    fn test_camera_parallax_follows_pointer() {
        let (mut scene, _) = test_scene();
        scene.set_pointer(1.0, -1.0);
        for _ in 0..500 {
            scene.advance(0.0);
        }
        assert!((scene.camera().position().x - 2.0).abs() < 0.01);
        assert!((scene.camera().position().y + 2.0).abs() < 0.01);
    }

    #[test]
    fn test_swipe_rotates_models() {
        let (mut scene, _) = test_scene();
        scene.swipe(300.0, 0.0);
        scene.advance(0.0);
        assert!(scene.primary().unwrap().transform().rotation.y > 0.001);
        assert!(scene.secondary().unwrap().transform().rotation.y > 0.001);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let (mut scene, _) = test_scene();
        scene.resize(1000, 500);
        assert_eq!(scene.camera().aspect(), 2.0);
        // Degenerate sizes are ignored.
        scene.resize(0, 0);
        assert_eq!(scene.camera().aspect(), 2.0);
    }

    #[test]
    fn test_dispose_releases_everything() {
        let (mut scene, log) = test_scene();
        scene.dispose();

        assert!(scene.is_disposed());
        assert_eq!(log.borrow().removed.len(), 3);
        assert!(scene.background().is_none());

        // Further calls are silent no-ops.
        let renders_before = log.borrow().renders;
        scene.set_progress(0.7);
        scene.advance(1.0);
        scene.dispose();
        assert_eq!(log.borrow().renders, renders_before);
        assert_eq!(log.borrow().removed.len(), 3);
    }

    #[test]
    fn test_progress_ignored_without_both_models() {
        let (mut scene, _) = test_scene();

        let fired = Rc::new(RefCell::new(0));
        let fired_clone = Rc::clone(&fired);
        scene.set_progress_observer(move |_| *fired_clone.borrow_mut() += 1);

        scene.detach_primary();
        scene.set_progress(0.7);

        assert_eq!(*fired.borrow(), 0);
        // The remaining model keeps its previous transform.
        assert_eq!(scene.secondary().unwrap().transform().opacity, 0.0);
    }

    #[test]
    fn test_missing_surface_degrades_to_noop() {
        let (mut backend, log) = RecordingBackend::new();
        backend.surface_missing = true;
        let profile = DeviceProfile::detect();
        let mut scene = Scene::new(backend, &profile, 800, 600).unwrap();

        scene.advance(0.0);
        scene.advance(1.0 / 60.0);

        assert_eq!(log.borrow().renders, 0);
        // Simulation still ran even though nothing was drawn.
        assert_eq!(log.borrow().uploads, 2);
    }

    #[test]
    fn test_observer_fires_per_update() {
        let (mut scene, _) = test_scene();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        scene.set_progress_observer(move |p| seen_clone.borrow_mut().push(p));

        scene.set_progress(0.2);
        scene.set_progress(0.2);
        scene.set_progress(1.7);

        assert_eq!(seen.borrow().as_slice(), &[0.2f32, 0.2, 1.0][..]);
    }
}
