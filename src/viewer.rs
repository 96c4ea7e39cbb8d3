//! A viewer: one container, its configuration, controller and overlay.

use crate::camera::{OrbitLimits, ViewCamera};
use crate::config::{Placement, ViewerConfig};
use crate::controller::{LoadRequest, LoadStatus, ModelDisplayController};
use crate::error::ViewerError;
use crate::event::ViewerEvent;
use crate::loader::ModelDecoder;
use crate::overlay::Overlay;
use crate::renderer::{SceneRenderer, SceneSetup};
use crate::source::ModelSource;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures::future::{self, FutureExt, LocalBoxFuture};
use image::ImageFormat;
use std::cell::{Ref, RefCell};
use std::io::Cursor;
use std::rc::Rc;
use web_time::Instant;

/// A pending load, to be driven by the host's executor.
///
/// Dropping a task cancels its load. The overlay keeps showing the loading
/// indicator until the next load resolves.
pub type LoadTask = LocalBoxFuture<'static, Result<(), ViewerError>>;

/// Prefix of the URLs returned by [`Viewer::export_image`].
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Size of the images exported when no size is given.
pub const DEFAULT_EXPORT_SIZE: (u32, u32) = (1920, 1080);

/// An embeddable model viewer.
///
/// # Example
/// ```
/// # use glb_viewer::prelude::*;
/// # struct NoDecoder;
/// # impl ModelDecoder for NoDecoder {
/// #     fn decode(&self, _: ModelSource) -> impl std::future::Future<Output = Result<SceneFragment, DecodeError>> {
/// #         std::future::ready(Err(DecodeError::new("offline")))
/// #     }
/// # }
/// let config = ViewerConfig::default().with_model_source("anvil.glb");
/// let viewer = Viewer::new("anvil", HeadlessRenderer::new(), NoDecoder, config).unwrap();
///
/// // Nothing loads until the play button is pressed.
/// assert!(viewer.overlay().play_button());
/// assert_eq!(viewer.controller().status(), LoadStatus::Idle);
/// ```
pub struct Viewer<R, D> {
    id: String,
    config: ViewerConfig,
    controller: ModelDisplayController<R, D>,
    overlay: Rc<RefCell<Overlay>>,
}

impl<R: SceneRenderer + 'static, D: ModelDecoder + 'static> Viewer<R, D> {
    /// Creates a viewer for the container `id`.
    ///
    /// The configuration is validated, then `renderer` is attached with the
    /// scene setup derived from it. No model is loaded yet: with
    /// [`auto_load`](ViewerConfig::auto_load) the host should call
    /// [`play`](Self::play) right away, otherwise the play button is shown.
    pub fn new(
        id: impl Into<String>,
        mut renderer: R,
        decoder: D,
        config: ViewerConfig,
    ) -> Result<Self, ViewerError> {
        config.validate()?;
        let id = id.into();

        renderer.attach(&SceneSetup::from(&config));

        let camera = ViewCamera::new(config.fov_degrees.to_radians(), config.width, config.height)
            .with_limits(OrbitLimits {
                min_distance: config.min_distance,
                max_distance: config.max_distance,
            });
        let overlay = Overlay::new(!config.auto_load, config.error_display);

        log::info!(
            "Created viewer '{}' with {} model source(s).",
            id,
            config.model_sources.len()
        );

        Ok(Viewer {
            id,
            controller: ModelDisplayController::new(renderer, decoder, camera),
            overlay: Rc::new(RefCell::new(overlay)),
            config,
        })
    }

    /// Identifier of the container.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The configuration the viewer was created with.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// The model display controller.
    pub fn controller(&self) -> &ModelDisplayController<R, D> {
        &self.controller
    }

    /// What the host should draw over the viewer.
    pub fn overlay(&self) -> Ref<'_, Overlay> {
        self.overlay.borrow()
    }

    /// Loads the configured models.
    ///
    /// A single source is loaded on its own; several are preloaded and
    /// cycled. Failures show the retry button and an error banner.
    pub fn play(&self) -> LoadTask {
        self.overlay.borrow_mut().begin_load();

        match self.config.model_sources.as_slice() {
            [] => {
                log::warn!("Viewer '{}' has no model source.", self.id);
                let err = ViewerError::NoSourceSpecified;
                self.overlay
                    .borrow_mut()
                    .finish_load::<()>(&Err(err.clone()), Instant::now());
                future::ready(Err(err)).boxed_local()
            }
            [source] => {
                let request = LoadRequest::new(source.clone())
                    .with_placement(self.config.placement)
                    .with_refit_camera(self.config.refit_camera);
                self.load(request)
            }
            sources => {
                let cycle = self.controller.start_cycle(
                    sources.to_vec(),
                    self.config.cycle_interval,
                    self.config.placement,
                );
                let overlay = self.overlay.clone();

                async move {
                    let result = cycle.await;
                    overlay.borrow_mut().finish_load(&result, Instant::now());
                    result
                }
                .boxed_local()
            }
        }
    }

    /// Hides the retry button and plays again.
    pub fn retry(&self) -> LoadTask {
        self.overlay.borrow_mut().dismiss_retry();
        self.play()
    }

    /// Loads a model dropped by the user at the origin, refitting the camera.
    ///
    /// Files without a `.glb` or `.gltf` extension are rejected with an error
    /// banner.
    pub fn load_dropped(&self, source: ModelSource, now: Instant) -> Result<LoadTask, ViewerError> {
        let mut overlay = self.overlay.borrow_mut();
        overlay.set_drop_highlight(false);

        if let Err(err) = source.ensure_model_file() {
            log::warn!("Viewer '{}' rejected a dropped file: {}", self.id, err);
            overlay.show_error(&err, now);
            return Err(err);
        }

        overlay.begin_load();
        drop(overlay);

        let request = LoadRequest::new(source)
            .with_placement(Placement::IDENTITY)
            .with_refit_camera(true);
        Ok(self.load(request))
    }

    fn load(&self, request: LoadRequest) -> LoadTask {
        let load = self.controller.load_single(request);
        let overlay = self.overlay.clone();

        async move {
            let result = load.await.map(|_| ());
            overlay.borrow_mut().finish_load(&result, Instant::now());
            result
        }
        .boxed_local()
    }

    /// Reacts to a user event.
    ///
    /// Returns the load it started, if any.
    pub fn handle_event(&self, event: ViewerEvent, now: Instant) -> Option<LoadTask> {
        match event {
            ViewerEvent::PlayPressed if self.overlay.borrow().play_button() => Some(self.play()),
            ViewerEvent::RetryPressed if self.overlay.borrow().retry_button() => Some(self.retry()),
            ViewerEvent::PlayPressed | ViewerEvent::RetryPressed => None,
            ViewerEvent::FileHovered => {
                self.overlay.borrow_mut().set_drop_highlight(true);
                None
            }
            ViewerEvent::FileHoverCancelled => {
                self.overlay.borrow_mut().set_drop_highlight(false);
                None
            }
            ViewerEvent::FileDropped(source) => self.load_dropped(source, now).ok(),
            ViewerEvent::Resized { width, height } => {
                self.controller.resize(width, height);
                None
            }
        }
    }

    /// Per-frame housekeeping: advances the model cycle and hides expired
    /// error banners.
    pub fn update(&self, now: Instant) {
        let _ = self.controller.poll_timer(now);
        let _ = self.overlay.borrow_mut().expire(now);
    }

    /// Renders a frame and returns it as a PNG data URL.
    ///
    /// A zero `width` or `height` exports at [`DEFAULT_EXPORT_SIZE`].
    pub fn export_image(&self, width: u32, height: u32) -> Result<String, ViewerError> {
        if self.controller.status() == LoadStatus::Disposed {
            return Err(ViewerError::Disposed);
        }

        let (width, height) = if width == 0 || height == 0 {
            DEFAULT_EXPORT_SIZE
        } else {
            (width, height)
        };

        let image = self
            .controller
            .renderer_mut()
            .snapshot(width, height)
            .ok_or(ViewerError::SnapshotUnavailable)?;

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(format!("{}{}", PNG_DATA_URL_PREFIX, BASE64.encode(png)))
    }

    /// Stops everything and detaches the renderer.
    pub fn dispose(&self) {
        self.controller.dispose();
        self.overlay.borrow_mut().clear();
    }
}
