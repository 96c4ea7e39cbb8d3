//! The model display controller: what is loaded, what is shown, and when.
//!
//! A controller owns the [`SceneRenderer`] of one viewer and decides which
//! decoded fragment it displays. It guarantees that at most one load runs at a
//! time, that a fragment is only swapped in once fully decoded, and that
//! nothing touches the renderer after [`dispose`](ModelDisplayController::dispose).
//!
//! Operations starting a decode return futures that own their state handles:
//! the host may drive them on any single-threaded executor and may dispose the
//! controller while they are pending.

use crate::camera::{CameraPose, ViewCamera};
use crate::config::Placement;
use crate::error::{ConfigError, DecodeError, ViewerError};
use crate::loader::ModelDecoder;
use crate::renderer::{FragmentId, SceneRenderer};
use crate::scene::SceneFragment;
use crate::source::ModelSource;
use crate::timer::CycleTimer;
use std::cell::{Ref, RefCell, RefMut};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use web_time::Instant;

/// Where a controller stands in its load lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LoadStatus {
    /// Nothing was loaded yet.
    Idle,
    /// A decode (or a cycle preload) is in flight.
    Loading,
    /// A model is displayed.
    Loaded,
    /// The last load failed.
    Error,
    /// The controller was disposed. Terminal.
    Disposed,
}

/// A request to load and display a single model.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadRequest {
    /// The model to load.
    pub source: ModelSource,
    /// Where to put the model in the scene.
    pub placement: Placement,
    /// Whether to move the camera so that the model is fully visible.
    pub refit_camera: bool,
}

impl LoadRequest {
    /// A request placing `source` at the origin and refitting the camera.
    pub fn new(source: impl Into<ModelSource>) -> Self {
        LoadRequest {
            source: source.into(),
            placement: Placement::IDENTITY,
            refit_camera: true,
        }
    }

    /// Sets the placement.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Sets whether the camera is refitted.
    pub fn with_refit_camera(mut self, refit_camera: bool) -> Self {
        self.refit_camera = refit_camera;
        self
    }
}

/// The model currently displayed by a controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayHandle {
    /// Identifier of the fragment in the renderer.
    pub fragment: FragmentId,
    /// Index of the model in the controller's source list.
    pub index: usize,
    /// Name of the displayed fragment.
    pub name: String,
    /// Number of animation clips of the model.
    pub animations: usize,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum CycleState {
    Inactive,
    Preloading,
    Running(CycleTimer),
}

struct State<R> {
    status: LoadStatus,
    current_index: Option<usize>,
    sources: Vec<ModelSource>,
    preloaded: Vec<Option<Rc<SceneFragment>>>,
    placement: Placement,
    cycle: CycleState,
    last_error: Option<ViewerError>,
    // Bumped whenever in-flight decodes must be ignored once they resolve.
    epoch: u64,
    displayed: Option<DisplayHandle>,
    renderer: R,
    camera: ViewCamera,
}

impl<R: SceneRenderer> State<R> {
    /// Adds `fragment` to the renderer, then releases the previous display.
    fn display(
        &mut self,
        fragment: &SceneFragment,
        index: usize,
        placement: &Placement,
        refit_camera: bool,
    ) -> DisplayHandle {
        let id = self.renderer.add_fragment(fragment, placement);

        if let Some(previous) = self.displayed.take() {
            self.renderer.remove_fragment(previous.fragment);
        }

        if refit_camera {
            if let Some(pose) = self.camera.frame(&fragment.placed_bounds(placement)) {
                self.renderer.set_camera(pose);
            }
        }

        if !fragment.animations.is_empty() {
            self.renderer.play_animation(id, 0);
        }

        let handle = DisplayHandle {
            fragment: id,
            index,
            name: fragment.name.clone(),
            animations: fragment.animations.len(),
        };
        self.current_index = Some(index);
        self.displayed = Some(handle.clone());
        handle
    }

    fn fail(&mut self, err: ViewerError) -> ViewerError {
        self.status = LoadStatus::Error;
        self.last_error = Some(err.clone());
        err
    }
}

impl<R> State<R> {
    /// Stops the cycle, whatever its stage. Returns `false` if none was active.
    fn halt_cycle(&mut self) -> bool {
        match self.cycle {
            CycleState::Inactive => return false,
            CycleState::Preloading => {
                self.epoch += 1;
                self.status = if self.displayed.is_some() {
                    LoadStatus::Loaded
                } else {
                    LoadStatus::Idle
                };
                log::info!("Model preload aborted.");
            }
            CycleState::Running(_) => log::info!("Model cycle stopped."),
        }

        self.cycle = CycleState::Inactive;
        self.preloaded.clear();
        true
    }
}

/// Owned by a load future while its decode is in flight.
///
/// If the future is dropped before the load completes, the controller leaves
/// [`LoadStatus::Loading`] again: a preload is aborted, a single load restores
/// the status it started from.
struct PendingLoad<R> {
    state: Rc<RefCell<State<R>>>,
    epoch: u64,
    resume: LoadStatus,
    armed: bool,
}

impl<R> PendingLoad<R> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl<R> Drop for PendingLoad<R> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut state = match self.state.try_borrow_mut() {
            Ok(state) => state,
            Err(_) => {
                log::warn!("Could not cancel a load: the controller is borrowed.");
                return;
            }
        };

        if state.epoch != self.epoch || state.status != LoadStatus::Loading {
            return;
        }

        if !state.halt_cycle() {
            state.status = self.resume;
        }
        log::debug!("Load cancelled before it completed.");
    }
}

enum CyclePlan<R> {
    Single,
    Preload(PendingLoad<R>),
}

/// The load/display/cycle state machine of one viewer.
///
/// Cloning a controller gives another handle to the same state.
pub struct ModelDisplayController<R, D> {
    state: Rc<RefCell<State<R>>>,
    decoder: Rc<D>,
}

impl<R, D> Clone for ModelDisplayController<R, D> {
    fn clone(&self) -> Self {
        ModelDisplayController {
            state: self.state.clone(),
            decoder: self.decoder.clone(),
        }
    }
}

impl<R: SceneRenderer + 'static, D: ModelDecoder + 'static> ModelDisplayController<R, D> {
    /// Creates an idle controller.
    ///
    /// `renderer` must already be attached; the controller detaches it on
    /// [`dispose`](Self::dispose).
    pub fn new(renderer: R, decoder: D, camera: ViewCamera) -> Self {
        ModelDisplayController {
            state: Rc::new(RefCell::new(State {
                status: LoadStatus::Idle,
                current_index: None,
                sources: Vec::new(),
                preloaded: Vec::new(),
                placement: Placement::IDENTITY,
                cycle: CycleState::Inactive,
                last_error: None,
                epoch: 0,
                displayed: None,
                renderer,
                camera,
            })),
            decoder: Rc::new(decoder),
        }
    }

    /// Loads and displays a single model.
    ///
    /// The request is rejected immediately with [`ViewerError::AlreadyLoading`]
    /// while another load is in flight, and with [`ViewerError::Disposed`]
    /// after disposal; no decode starts in either case. Any running cycle is
    /// stopped when the load starts.
    ///
    /// Once decoded, the new fragment replaces the displayed one, which is
    /// released. On failure the previous display is left untouched and the
    /// controller enters [`LoadStatus::Error`].
    ///
    /// Dropping the returned future before it resolves cancels the load: the
    /// controller goes back to the status it had before the call.
    pub fn load_single(
        &self,
        request: LoadRequest,
    ) -> impl Future<Output = Result<DisplayHandle, ViewerError>> {
        let start = self.begin_load(&request);
        let state = self.state.clone();
        let decoder = self.decoder.clone();

        async move {
            let mut pending = start?;
            let decoded = decoder.decode(request.source.clone()).await;
            pending.disarm();
            Self::finish_load(&state, pending.epoch, request, decoded)
        }
    }

    fn begin_load(&self, request: &LoadRequest) -> Result<PendingLoad<R>, ViewerError> {
        let mut state = self.state.borrow_mut();

        match state.status {
            LoadStatus::Disposed => return Err(ViewerError::Disposed),
            LoadStatus::Loading => {
                log::warn!("Ignoring load of {}: a model is already loading.", request.source);
                return Err(ViewerError::AlreadyLoading);
            }
            LoadStatus::Idle | LoadStatus::Loaded | LoadStatus::Error => {}
        }

        let _ = state.halt_cycle();
        let resume = state.status;
        state.status = LoadStatus::Loading;
        log::info!("Loading model {}.", request.source);

        Ok(PendingLoad {
            state: self.state.clone(),
            epoch: state.epoch,
            resume,
            armed: true,
        })
    }

    fn finish_load(
        state: &RefCell<State<R>>,
        epoch: u64,
        request: LoadRequest,
        decoded: Result<SceneFragment, DecodeError>,
    ) -> Result<DisplayHandle, ViewerError> {
        let mut state = state.borrow_mut();

        if state.epoch != epoch || state.status == LoadStatus::Disposed {
            log::debug!("Discarding {}: the viewer was disposed while it loaded.", request.source);
            return Err(ViewerError::Disposed);
        }

        match decoded {
            Ok(fragment) => {
                let handle = state.display(&fragment, 0, &request.placement, request.refit_camera);
                state.sources = vec![request.source];
                state.preloaded.clear();
                state.placement = request.placement;
                state.status = LoadStatus::Loaded;
                state.last_error = None;
                log::info!(
                    "Loaded model {} ({} triangles).",
                    handle.name,
                    fragment.num_triangles()
                );
                Ok(handle)
            }
            Err(err) => {
                log::warn!("Failed to load model {}: {}", request.source, err);
                Err(state.fail(err.into()))
            }
        }
    }

    /// Preloads every source, then displays them in turn every `interval`.
    ///
    /// The cycle is rejected immediately, with a warning, when it cannot
    /// start: [`ViewerError::Disposed`] after disposal,
    /// [`ViewerError::CycleActive`] while a cycle preloads or runs,
    /// [`ViewerError::AlreadyLoading`] while a load is in flight, and
    /// [`ViewerError::InvalidConfig`] for a zero `interval`. An empty list
    /// fails with [`ViewerError::NoSourceSpecified`], which is also recorded as
    /// [`last_error`](Self::last_error). A single source is loaded like
    /// [`load_single`](Self::load_single) and arms no timer.
    ///
    /// Sources are decoded one after the other. Failed ones are logged,
    /// recorded as [`last_error`](Self::last_error) and skipped when cycling.
    /// The first model that decoded is displayed with a camera refit; later
    /// swaps keep the camera where it is. The future resolves to `Ok` once a
    /// model is displayed and the timer armed, or when
    /// [`stop_cycle`](Self::stop_cycle) aborts the preload. If no model could
    /// be decoded, it resolves to the last decode error; the timer is armed
    /// anyway.
    ///
    /// Dropping the returned future before it resolves aborts the preload.
    pub fn start_cycle(
        &self,
        sources: Vec<ModelSource>,
        interval: Duration,
        placement: Placement,
    ) -> impl Future<Output = Result<(), ViewerError>> {
        let plan = self.begin_cycle(&sources, interval, &placement);
        let single = match (&plan, sources.first()) {
            (Ok(CyclePlan::Single), Some(source)) => Some(self.load_single(
                LoadRequest::new(source.clone()).with_placement(placement),
            )),
            _ => None,
        };
        let decoder = self.decoder.clone();

        async move {
            match plan? {
                CyclePlan::Single => match single {
                    Some(load) => load.await.map(|_| ()),
                    None => Err(ViewerError::NoSourceSpecified),
                },
                CyclePlan::Preload(pending) => {
                    Self::preload(pending, decoder, sources, interval).await
                }
            }
        }
    }

    fn begin_cycle(
        &self,
        sources: &[ModelSource],
        interval: Duration,
        placement: &Placement,
    ) -> Result<CyclePlan<R>, ViewerError> {
        let mut state = self.state.borrow_mut();

        if state.status == LoadStatus::Disposed {
            log::warn!("Ignoring model cycle: the viewer was disposed.");
            return Err(ViewerError::Disposed);
        }
        if state.cycle != CycleState::Inactive {
            log::warn!("Ignoring model cycle: a cycle is already running.");
            return Err(ViewerError::CycleActive);
        }
        if state.status == LoadStatus::Loading {
            log::warn!("Ignoring model cycle: a model is already loading.");
            return Err(ViewerError::AlreadyLoading);
        }
        if interval.is_zero() {
            log::warn!("Ignoring model cycle: the interval must be positive.");
            return Err(ConfigError::ZeroInterval.into());
        }

        match sources.len() {
            0 => {
                log::warn!("Ignoring model cycle: no model source specified.");
                state.last_error = Some(ViewerError::NoSourceSpecified);
                Err(ViewerError::NoSourceSpecified)
            }
            1 => Ok(CyclePlan::Single),
            n => {
                let resume = state.status;
                state.cycle = CycleState::Preloading;
                state.status = LoadStatus::Loading;
                state.sources = sources.to_vec();
                state.preloaded = vec![None; n];
                state.placement = *placement;
                state.last_error = None;
                log::info!("Preloading {} models for cycling.", n);

                Ok(CyclePlan::Preload(PendingLoad {
                    state: self.state.clone(),
                    epoch: state.epoch,
                    resume,
                    armed: true,
                }))
            }
        }
    }

    async fn preload(
        mut pending: PendingLoad<R>,
        decoder: Rc<D>,
        sources: Vec<ModelSource>,
        interval: Duration,
    ) -> Result<(), ViewerError> {
        let state = pending.state.clone();

        for (index, source) in sources.into_iter().enumerate() {
            let decoded = decoder.decode(source.clone()).await;
            let mut state = state.borrow_mut();

            if state.epoch != pending.epoch {
                log::debug!("Discarding {}: the cycle was stopped while it loaded.", source);
                pending.disarm();
                return match state.status {
                    LoadStatus::Disposed => Err(ViewerError::Disposed),
                    _ => Ok(()),
                };
            }

            match decoded {
                Ok(fragment) => {
                    if let Some(slot) = state.preloaded.get_mut(index) {
                        *slot = Some(Rc::new(fragment));
                    }
                }
                Err(err) => {
                    log::warn!("Failed to preload model {}: {}", source, err);
                    state.last_error = Some(err.into());
                }
            }
        }

        pending.disarm();
        let mut state = state.borrow_mut();

        let first = state
            .preloaded
            .iter()
            .enumerate()
            .find_map(|(i, f)| f.clone().map(|f| (i, f)));

        let result = match first {
            Some((index, fragment)) => {
                let placement = state.placement;
                let _ = state.display(&fragment, index, &placement, true);
                state.status = LoadStatus::Loaded;
                Ok(())
            }
            None => {
                log::warn!("None of the cycled models could be loaded.");
                state.status = LoadStatus::Error;
                Err(state.last_error.clone().unwrap_or_else(|| ViewerError::DecodeFailure {
                    reason: "no model could be loaded".to_string(),
                }))
            }
        };

        state.cycle = CycleState::Running(CycleTimer::new(interval, Instant::now()));
        log::info!(
            "Cycling through {} models every {:?}.",
            state.preloaded.iter().filter(|f| f.is_some()).count(),
            interval
        );
        result
    }

    /// Displays the next preloaded model, skipping the ones that failed.
    ///
    /// Does nothing outside of a running cycle, or when no other model is
    /// available. The camera is not moved.
    pub fn tick(&self) {
        let mut state = self.state.borrow_mut();

        if !matches!(state.cycle, CycleState::Running(_)) || state.preloaded.is_empty() {
            return;
        }

        let count = state.preloaded.len();
        let current = state.current_index.unwrap_or(count - 1);
        let next = (1..=count)
            .map(|k| (current + k) % count)
            .find(|&i| state.preloaded[i].is_some());

        if let Some(index) = next {
            if Some(index) == state.current_index {
                return;
            }

            if let Some(fragment) = state.preloaded[index].clone() {
                let placement = state.placement;
                let handle = state.display(&fragment, index, &placement, false);
                log::debug!("Cycled to model {} ({}).", index, handle.name);
            }
        }
    }

    /// Runs [`tick`](Self::tick) if the cycle timer is due at `now`.
    ///
    /// Meant to be called from the host's frame loop. Returns whether the
    /// timer fired.
    pub fn poll_timer(&self, now: Instant) -> bool {
        let due = match &mut self.state.borrow_mut().cycle {
            CycleState::Running(timer) => timer.fire(now),
            _ => false,
        };

        if due {
            self.tick();
        }

        due
    }

    /// Stops cycling, or aborts a preload in progress.
    ///
    /// The displayed model stays on screen. Calling this without an active
    /// cycle does nothing.
    pub fn stop_cycle(&self) {
        let _ = self.state.borrow_mut().halt_cycle();
    }

    /// Tears the controller down.
    ///
    /// Stops the cycle, releases every fragment and detaches the renderer.
    /// Pending loads resolve to [`ViewerError::Disposed`] without touching
    /// the renderer. Disposing twice does nothing.
    pub fn dispose(&self) {
        let mut state = self.state.borrow_mut();
        if state.status == LoadStatus::Disposed {
            return;
        }

        let _ = state.halt_cycle();
        state.epoch += 1;
        state.preloaded.clear();

        if let Some(displayed) = state.displayed.take() {
            state.renderer.remove_fragment(displayed.fragment);
        }

        state.renderer.detach();
        state.current_index = None;
        state.status = LoadStatus::Disposed;
        log::info!("Viewer disposed.");
    }

    /// Plays the animation clip `clip` of the displayed model.
    ///
    /// Returns `false` if no model is displayed or if it has no such clip.
    pub fn play_animation(&self, clip: usize) -> bool {
        let mut state = self.state.borrow_mut();
        match state.displayed.clone() {
            Some(displayed) if clip < displayed.animations => {
                state.renderer.play_animation(displayed.fragment, clip);
                true
            }
            _ => false,
        }
    }

    /// Stops the animations of the displayed model.
    pub fn stop_animation(&self) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = state.displayed.as_ref().map(|d| d.fragment) {
            state.renderer.stop_animation(id);
        }
    }

    /// Updates the camera aspect ratio and forwards the new size to the renderer.
    ///
    /// Zero sizes are ignored.
    pub fn resize(&self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        let mut state = self.state.borrow_mut();
        state.camera.set_viewport(width, height);
        if state.status != LoadStatus::Disposed {
            state.renderer.resize(width, height);
        }
    }

    /// The current load status.
    pub fn status(&self) -> LoadStatus {
        self.state.borrow().status
    }

    /// Index of the displayed model in the source list, if any.
    pub fn current_index(&self) -> Option<usize> {
        self.state.borrow().current_index
    }

    /// The displayed model, if any.
    pub fn displayed(&self) -> Option<DisplayHandle> {
        self.state.borrow().displayed.clone()
    }

    /// Whether a cycle is running or preloading.
    pub fn is_cycling(&self) -> bool {
        self.state.borrow().cycle != CycleState::Inactive
    }

    /// The most recent error, cleared when a load or a cycle starts afresh.
    pub fn last_error(&self) -> Option<ViewerError> {
        self.state.borrow().last_error.clone()
    }

    /// Number of sources of the last load or cycle.
    pub fn source_count(&self) -> usize {
        self.state.borrow().sources.len()
    }

    /// The camera of the viewer.
    pub fn camera(&self) -> ViewCamera {
        self.state.borrow().camera
    }

    /// The camera pose as last reported by the renderer.
    pub fn camera_pose(&self) -> CameraPose {
        self.state.borrow().renderer.camera()
    }

    /// The renderer.
    ///
    /// The borrow must be released before driving any controller future.
    pub fn renderer(&self) -> Ref<'_, R> {
        Ref::map(self.state.borrow(), |state| &state.renderer)
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&self) -> RefMut<'_, R> {
        RefMut::map(self.state.borrow_mut(), |state| &mut state.renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{HeadlessRenderer, SceneSetup};
    use crate::scene::Aabb;
    use crate::ViewerConfig;
    use glamx::Vec3;
    use std::future;

    /// Decodes instantly; fails for names containing "broken".
    struct InstantDecoder;

    impl ModelDecoder for InstantDecoder {
        fn decode(
            &self,
            source: ModelSource,
        ) -> impl Future<Output = Result<SceneFragment, DecodeError>> {
            let name = source.file_name().to_string();
            future::ready(if name.contains("broken") {
                Err(DecodeError::new("network error"))
            } else {
                Ok(SceneFragment::new(name)
                    .with_bounds(Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)))
                    .with_animation("idle", 1.0))
            })
        }
    }

    fn controller() -> ModelDisplayController<HeadlessRenderer, InstantDecoder> {
        let mut renderer = HeadlessRenderer::new();
        renderer.attach(&SceneSetup::from(&ViewerConfig::default()));
        ModelDisplayController::new(renderer, InstantDecoder, ViewCamera::default())
    }

    #[test]
    fn loading_replaces_the_displayed_model() {
        let controller = controller();
        assert_eq!(controller.status(), LoadStatus::Idle);
        assert_eq!(controller.current_index(), None);

        let first = pollster::block_on(controller.load_single(LoadRequest::new("a.glb"))).unwrap();
        let second = pollster::block_on(controller.load_single(LoadRequest::new("b.glb"))).unwrap();

        assert_ne!(first.fragment, second.fragment);
        assert_eq!(controller.status(), LoadStatus::Loaded);
        assert_eq!(controller.current_index(), Some(0));
        assert_eq!(controller.renderer().live_names(), vec!["b.glb"]);
        assert_eq!(controller.renderer().removed_count(), 1);
        assert_eq!(
            controller.renderer().fragment(second.fragment).unwrap().animation,
            Some(0)
        );
    }

    #[test]
    fn refit_moves_the_camera_to_the_model() {
        let controller = controller();
        let request = LoadRequest::new("a.glb")
            .with_placement(Placement::IDENTITY.with_position(Vec3::new(10.0, 0.0, 0.0)));
        let _ = pollster::block_on(controller.load_single(request)).unwrap();
        assert_eq!(controller.camera_pose().target, Vec3::new(10.0, 0.0, 0.0));

        let still = controller.camera_pose();
        let request = LoadRequest::new("b.glb").with_refit_camera(false);
        let _ = pollster::block_on(controller.load_single(request)).unwrap();
        assert_eq!(controller.camera_pose(), still);
    }

    #[test]
    fn failure_keeps_the_previous_display() {
        let controller = controller();
        let _ = pollster::block_on(controller.load_single(LoadRequest::new("a.glb"))).unwrap();

        let err = pollster::block_on(controller.load_single(LoadRequest::new("broken.glb")));
        assert_eq!(
            err,
            Err(ViewerError::DecodeFailure {
                reason: "network error".to_string()
            })
        );
        assert_eq!(controller.status(), LoadStatus::Error);
        assert_eq!(controller.renderer().live_names(), vec!["a.glb"]);
        assert_eq!(controller.last_error(), err.err());
    }

    #[test]
    fn second_load_is_rejected_synchronously() {
        let controller = controller();
        let pending = controller.load_single(LoadRequest::new("a.glb"));
        let rejected = controller.load_single(LoadRequest::new("b.glb"));

        assert_eq!(pollster::block_on(rejected), Err(ViewerError::AlreadyLoading));
        assert!(pollster::block_on(pending).is_ok());
        assert_eq!(controller.renderer().added_count(), 1);
    }

    #[test]
    fn a_dropped_load_can_be_started_again() {
        let controller = controller();
        let _ = pollster::block_on(controller.load_single(LoadRequest::new("a.glb"))).unwrap();

        drop(controller.load_single(LoadRequest::new("b.glb")));
        assert_eq!(controller.status(), LoadStatus::Loaded);

        let _ = pollster::block_on(controller.load_single(LoadRequest::new("broken.glb")));
        drop(controller.load_single(LoadRequest::new("c.glb")));
        assert_eq!(controller.status(), LoadStatus::Error);

        let handle = pollster::block_on(controller.load_single(LoadRequest::new("c.glb"))).unwrap();
        assert_eq!(handle.name, "c.glb");
        assert_eq!(controller.status(), LoadStatus::Loaded);
    }

    #[test]
    fn cycling_skips_failed_models() {
        let controller = controller();
        let sources = vec!["a.glb".into(), "broken.glb".into(), "c.glb".into()];
        let started = pollster::block_on(controller.start_cycle(
            sources,
            Duration::from_secs(1),
            Placement::IDENTITY,
        ));

        assert_eq!(started, Ok(()));

        assert!(controller.is_cycling());
        assert_eq!(controller.current_index(), Some(0));

        let mut visited = Vec::new();
        for _ in 0..4 {
            controller.tick();
            visited.push(controller.current_index().unwrap());
        }
        assert_eq!(visited, vec![2, 0, 2, 0]);
        assert_eq!(controller.renderer().live_fragments(), 1);
    }

    #[test]
    fn cycle_start_is_guarded() {
        let controller = controller();
        let sources: Vec<ModelSource> = vec!["a.glb".into(), "b.glb".into()];
        let started = pollster::block_on(controller.start_cycle(
            sources.clone(),
            Duration::from_secs(1),
            Placement::IDENTITY,
        ));
        assert_eq!(started, Ok(()));
        let added = controller.renderer().added_count();

        let again =
            pollster::block_on(controller.start_cycle(sources, Duration::from_secs(1), Placement::IDENTITY));
        assert_eq!(again, Err(ViewerError::CycleActive));
        assert_eq!(controller.renderer().added_count(), added);

        controller.stop_cycle();
        controller.stop_cycle();
        assert!(!controller.is_cycling());
        assert_eq!(controller.renderer().live_fragments(), 1);
    }

    #[test]
    fn empty_or_zero_interval_cycles_are_ignored() {
        let controller = controller();
        let empty =
            pollster::block_on(controller.start_cycle(Vec::new(), Duration::from_secs(1), Placement::IDENTITY));
        assert_eq!(empty, Err(ViewerError::NoSourceSpecified));
        assert_eq!(controller.last_error(), Some(ViewerError::NoSourceSpecified));

        let sources = vec!["a.glb".into(), "b.glb".into()];
        let zero = pollster::block_on(controller.start_cycle(sources, Duration::ZERO, Placement::IDENTITY));
        assert_eq!(zero, Err(ViewerError::InvalidConfig(ConfigError::ZeroInterval)));
        assert!(!controller.is_cycling());
        assert_eq!(controller.status(), LoadStatus::Idle);
    }

    #[test]
    fn timer_drives_the_cycle() {
        let controller = controller();
        let sources = vec!["a.glb".into(), "b.glb".into()];
        let started = pollster::block_on(controller.start_cycle(
            sources,
            Duration::from_millis(10),
            Placement::IDENTITY,
        ));
        assert_eq!(started, Ok(()));

        let later = Instant::now() + Duration::from_secs(1);
        assert!(controller.poll_timer(later));
        assert_eq!(controller.current_index(), Some(1));
        assert!(!controller.poll_timer(later));
    }

    #[test]
    fn dispose_releases_everything() {
        let controller = controller();
        let _ = pollster::block_on(controller.load_single(LoadRequest::new("a.glb"))).unwrap();
        controller.dispose();
        controller.dispose();

        assert_eq!(controller.status(), LoadStatus::Disposed);
        assert_eq!(controller.current_index(), None);
        assert!(!controller.renderer().is_attached());
        assert_eq!(controller.renderer().live_fragments(), 0);
        assert_eq!(
            pollster::block_on(controller.load_single(LoadRequest::new("b.glb"))),
            Err(ViewerError::Disposed)
        );
    }

    #[test]
    fn animations_follow_the_displayed_model() {
        let controller = controller();
        assert!(!controller.play_animation(0));

        let handle = pollster::block_on(controller.load_single(LoadRequest::new("a.glb"))).unwrap();
        controller.stop_animation();
        assert_eq!(controller.renderer().fragment(handle.fragment).unwrap().animation, None);
        assert!(controller.play_animation(0));
        assert!(!controller.play_animation(1));
    }
}
