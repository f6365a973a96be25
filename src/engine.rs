//! The window table and event surface the host compositor drives.

use crate::config::Config;
use crate::edge::EdgeMask;
use crate::error::EngineError;
use crate::float::Float;
use crate::geometry::{Rect, Workspace};
use crate::integrator::StepResult;
use crate::model::Model;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::tessellation::{self, Mesh, TextureTransform};
use crate::vec::Vec2;
use alloc::collections::BTreeMap;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// Fixed seed for the default random source; the engine is `no_std` and
/// has no entropy of its own. Inject a source via [`Engine::with_rng`] to
/// pin the snap-escape damping in tests.
const DEFAULT_RNG_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Opaque identity of a window, assigned by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

/// Coarse window classification; only normal application windows are
/// eligible for magnetic snapping.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WindowKind {
    Normal,
    Dialog,
    Dock,
    Other,
}

impl WindowKind {
    pub fn snaps(self) -> bool {
        matches!(self, WindowKind::Normal)
    }
}

/// The deformation engine: one spring-grid model per animated window,
/// advanced once per repaint by the host's render loop.
///
/// Models share no state with each other; everything here is
/// single-threaded and non-blocking. The host owns lifecycle decisions:
/// models exist from [`Engine::reset`] until [`Engine::remove`] (or an
/// eligibility failure on resize).
pub struct Engine<F: Float, R: RngCore = SmallRng> {
    models: BTreeMap<WindowId, Model<F>>,
    config: Config<F>,
    snapping: bool,
    rng: R,
}

impl<F: Float> Engine<F, SmallRng> {
    pub fn new(config: Config<F>) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(DEFAULT_RNG_SEED))
    }
}

impl<F: Float, R: RngCore> Engine<F, R> {
    /// Create an engine with an explicit random source for the snap-escape
    /// damping.
    pub fn with_rng(config: Config<F>, rng: R) -> Self {
        Engine {
            models: BTreeMap::new(),
            config,
            snapping: false,
            rng,
        }
    }

    /// Cheap eligibility verdict for applying the effect at all. Tiny,
    /// fully off-screen, and screen-covering windows render rigidly.
    pub fn check_eligible(rect: Rect<F>, screen: Rect<F>) -> Result<(), EngineError> {
        let one = F::one();
        if rect.width <= one || rect.height <= one {
            return Err(EngineError::WindowTooSmall);
        }
        if !rect.intersects(&screen) {
            return Err(EngineError::WindowOffScreen);
        }
        if rect.covers(&screen) {
            return Err(EngineError::WindowCoversScreen);
        }
        Ok(())
    }

    /// (Re)initialize the model for a window spanning `rect`: all sixteen
    /// nodes and every spring rebuilt at rest, anchored in the middle (or
    /// at the four corners while maximized).
    pub fn reset(
        &mut self,
        id: WindowId,
        rect: Rect<F>,
        screen: Rect<F>,
        kind: WindowKind,
        maximized: bool,
    ) -> Result<(), EngineError> {
        Self::check_eligible(rect, screen)?;
        let mask = if kind.snaps() { EdgeMask::ALL } else { EdgeMask::NONE };
        let mut model = Model::new(rect, maximized, mask);
        model.refresh_node_masks(self.snapping);
        log::debug!("model reset for window {:?}", id);
        self.models.insert(id, model);
        Ok(())
    }

    /// React to a window resize. A maximize-state flip switches anchor
    /// mode before reinitializing; an active grab keeps its anchor. A
    /// window that resizing made ineligible loses its model.
    pub fn resized(
        &mut self,
        id: WindowId,
        rect: Rect<F>,
        screen: Rect<F>,
        maximized: bool,
    ) -> Result<(), EngineError> {
        if let Err(err) = Self::check_eligible(rect, screen) {
            if self.models.remove(&id).is_some() {
                log::debug!("model dropped for window {:?}: {}", id, err);
            }
            return Err(err);
        }
        let snapping = self.snapping;
        let model = self.models.get_mut(&id).ok_or(EngineError::UnknownWindow)?;
        model.resize(rect, maximized);
        model.refresh_node_masks(snapping);
        Ok(())
    }

    /// Move the window by `(dx, dy)`. Grabbed windows drag their anchor
    /// and let the springs propagate; ungrabbed moves (workspace switches)
    /// translate rigidly. Unknown windows are ignored.
    pub fn moved(&mut self, id: WindowId, dx: F, dy: F, grabbed: bool) -> bool {
        match self.models.get_mut(&id) {
            Some(model) => {
                model.move_by(Vec2::new(dx, dy), grabbed);
                true
            }
            None => false,
        }
    }

    /// Begin a pointer grab: the node nearest `pointer` becomes the pinned
    /// anchor.
    pub fn grab_begin(&mut self, id: WindowId, pointer: Vec2<F>) -> bool {
        let snapping = self.snapping;
        match self.models.get_mut(&id) {
            Some(model) => {
                model.begin_grab(pointer);
                model.refresh_node_masks(snapping);
                true
            }
            None => false,
        }
    }

    /// End a pointer grab: the anchor unpins and the sheet gets its
    /// release flick.
    pub fn grab_end(&mut self, id: WindowId) -> bool {
        let snapping = self.snapping;
        match self.models.get_mut(&id) {
            Some(model) => {
                model.end_grab();
                model.refresh_node_masks(snapping);
                true
            }
            None => false,
        }
    }

    /// Advance one window's simulation by `elapsed_ms` against the current
    /// frame's workspace. The host keeps repainting while either returned
    /// flag is set.
    pub fn step(
        &mut self,
        id: WindowId,
        elapsed_ms: F,
        workspace: &Workspace<'_, F>,
    ) -> Result<StepResult, EngineError> {
        self.step_observed(id, elapsed_ms, workspace, &mut NoOpStepObserver)
    }

    /// [`Engine::step`] with an observer receiving sub-step and snap
    /// callbacks.
    pub fn step_observed<O: StepObserver>(
        &mut self,
        id: WindowId,
        elapsed_ms: F,
        workspace: &Workspace<'_, F>,
        observer: &mut O,
    ) -> Result<StepResult, EngineError> {
        let model = self.models.get_mut(&id).ok_or(EngineError::UnknownWindow)?;
        Ok(model.step(elapsed_ms, workspace, &self.config, &mut self.rng, observer))
    }

    /// Produce render geometry for one window over the given clip
    /// rectangles and texture layers.
    pub fn tessellate(
        &self,
        id: WindowId,
        clips: &[Rect<F>],
        layers: &[TextureTransform<F>],
        cell_size: F,
        min_cell_count: usize,
        mesh: &mut Mesh<F>,
    ) -> Result<(), EngineError> {
        let model = self.models.get(&id).ok_or(EngineError::UnknownWindow)?;
        tessellation::tessellate(model, clips, layers, cell_size, min_cell_count, mesh)
    }

    /// Toggle magnetic snapping globally. Enabling recomputes every node's
    /// permitted directions; disabling additionally releases every active
    /// snap without escape-velocity checks.
    pub fn set_snapping(&mut self, enabled: bool) {
        if self.snapping == enabled {
            return;
        }
        self.snapping = enabled;
        log::debug!("magnetic snapping {}", if enabled { "enabled" } else { "disabled" });
        for model in self.models.values_mut() {
            if !enabled {
                model.release_all_snaps();
            }
            model.refresh_node_masks(enabled);
        }
    }

    pub fn snapping(&self) -> bool {
        self.snapping
    }

    /// Drop a window's model (window destroyed, or effect no longer
    /// needed).
    pub fn remove(&mut self, id: WindowId) -> bool {
        let removed = self.models.remove(&id).is_some();
        if removed {
            log::debug!("model removed for window {:?}", id);
        }
        removed
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.models.contains_key(&id)
    }

    pub fn model(&self, id: WindowId) -> Option<&Model<F>> {
        self.models.get(&id)
    }

    pub fn model_mut(&mut self, id: WindowId) -> Option<&mut Model<F>> {
        self.models.get_mut(&id)
    }

    pub fn config(&self) -> &Config<F> {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config<F> {
        &mut self.config
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
