//! Viewers of a page, keyed by container identifier.

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::loader::ModelDecoder;
use crate::renderer::SceneRenderer;
use crate::viewer::Viewer;
use std::collections::btree_map::{BTreeMap, Entry};
use std::future::Future;

/// The environment viewers are embedded in.
///
/// A host knows which containers exist and creates a renderer drawing into
/// one of them.
pub trait SurfaceHost {
    /// The renderer created for each container.
    type Renderer: SceneRenderer + 'static;

    /// Creates a renderer for the container `container_id`, or returns `None`
    /// if there is no such container.
    fn attach(&mut self, container_id: &str) -> Option<Self::Renderer>;
}

/// The viewers created on a host.
///
/// Every viewer shares a clone of the same decoder.
pub struct ViewerRegistry<H: SurfaceHost, D> {
    host: H,
    decoder: D,
    viewers: BTreeMap<String, Viewer<H::Renderer, D>>,
}

impl<H: SurfaceHost, D: ModelDecoder + Clone + 'static> ViewerRegistry<H, D> {
    /// Creates an empty registry on a ready host.
    pub fn new(host: H, decoder: D) -> Self {
        ViewerRegistry {
            host,
            decoder,
            viewers: BTreeMap::new(),
        }
    }

    /// Waits for the host to be ready, then creates an empty registry.
    pub async fn when_ready(host: impl Future<Output = H>, decoder: D) -> Self {
        let host = host.await;
        log::debug!("Viewer host ready.");
        Self::new(host, decoder)
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Creates a viewer in the container `id`.
    ///
    /// A viewer already registered under `id` is disposed and replaced.
    pub fn create(
        &mut self,
        id: &str,
        config: ViewerConfig,
    ) -> Result<&mut Viewer<H::Renderer, D>, ViewerError> {
        config.validate()?;

        let renderer = self.host.attach(id).ok_or_else(|| {
            log::warn!("No container '{}' to create a viewer in.", id);
            ViewerError::ContainerNotFound(id.to_string())
        })?;
        let viewer = Viewer::new(id, renderer, self.decoder.clone(), config)?;

        match self.viewers.entry(id.to_string()) {
            Entry::Occupied(mut entry) => {
                log::info!("Replacing viewer '{}'.", id);
                entry.insert(viewer).dispose();
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => Ok(entry.insert(viewer)),
        }
    }

    /// The viewer of container `id`.
    pub fn get(&self, id: &str) -> Option<&Viewer<H::Renderer, D>> {
        self.viewers.get(id)
    }

    /// The viewer of container `id`, mutably.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Viewer<H::Renderer, D>> {
        self.viewers.get_mut(id)
    }

    /// Disposes and forgets the viewer of container `id`.
    ///
    /// Returns `false` if there was none.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.viewers.remove(id) {
            Some(viewer) => {
                viewer.dispose();
                true
            }
            None => false,
        }
    }

    /// Disposes and forgets every viewer.
    pub fn dispose_all(&mut self) {
        for (_, viewer) in std::mem::take(&mut self.viewers) {
            viewer.dispose();
        }
    }

    /// Number of viewers.
    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    /// Whether the registry has no viewer.
    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }

    /// Container identifiers, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.viewers.keys().map(String::as_str)
    }

    /// Advances every viewer, see [`Viewer::update`].
    pub fn update(&self, now: web_time::Instant) {
        for viewer in self.viewers.values() {
            viewer.update(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::LoadStatus;
    use crate::error::DecodeError;
    use crate::renderer::HeadlessRenderer;
    use crate::scene::SceneFragment;
    use crate::source::ModelSource;
    use std::future;

    struct Page {
        containers: Vec<&'static str>,
    }

    impl SurfaceHost for Page {
        type Renderer = HeadlessRenderer;

        fn attach(&mut self, container_id: &str) -> Option<HeadlessRenderer> {
            self.containers
                .iter()
                .any(|c| *c == container_id)
                .then(HeadlessRenderer::new)
        }
    }

    #[derive(Clone)]
    struct EmptyDecoder;

    impl ModelDecoder for EmptyDecoder {
        fn decode(
            &self,
            source: ModelSource,
        ) -> impl Future<Output = Result<SceneFragment, DecodeError>> {
            future::ready(Ok(SceneFragment::new(source.file_name())))
        }
    }

    fn registry() -> ViewerRegistry<Page, EmptyDecoder> {
        let page = Page {
            containers: vec!["left", "right"],
        };
        pollster::block_on(ViewerRegistry::when_ready(future::ready(page), EmptyDecoder))
    }

    #[test]
    fn unknown_containers_are_reported() {
        let mut registry = registry();
        assert_eq!(
            registry.create("middle", ViewerConfig::default()).err(),
            Some(ViewerError::ContainerNotFound("middle".to_string()))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn viewers_are_keyed_by_container() {
        let mut registry = registry();
        let _ = registry.create("right", ViewerConfig::embedded()).unwrap();
        let _ = registry.create("left", ViewerConfig::block()).unwrap();
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["left", "right"]);
        assert_eq!(registry.get("left").unwrap().id(), "left");

        assert!(registry.remove("left"));
        assert!(!registry.remove("left"));
        assert_eq!(registry.len(), 1);

        registry.dispose_all();
        assert!(registry.is_empty());
    }

    #[test]
    fn recreating_disposes_the_previous_viewer() {
        let mut registry = registry();
        let first = registry
            .create("left", ViewerConfig::default())
            .unwrap()
            .controller()
            .clone();
        let _ = registry.create("left", ViewerConfig::default()).unwrap();

        assert_eq!(first.status(), LoadStatus::Disposed);
        assert_eq!(registry.len(), 1);
    }
}
