#![allow(dead_code)]

use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use glb_viewer::prelude::*;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;

type Reply = Result<SceneFragment, DecodeError>;

/// A decoder whose decodes stay pending until the test answers them.
#[derive(Clone, Default)]
pub struct ScriptedDecoder {
    pending: Rc<RefCell<VecDeque<(ModelSource, oneshot::Sender<Reply>)>>>,
    started: Rc<RefCell<Vec<String>>>,
}

impl ScriptedDecoder {
    /// Names of every source a decode was started for.
    pub fn started(&self) -> Vec<String> {
        self.started.borrow().clone()
    }

    /// Number of decodes waiting for an answer.
    pub fn in_flight(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Answers the oldest pending decode with a fragment named after its source.
    pub fn succeed(&self) {
        let (source, reply) = self.next();
        let fragment = SceneFragment::new(source.file_name())
            .with_bounds(Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)));
        let _ = reply.send(Ok(fragment));
    }

    /// Fails the oldest pending decode.
    pub fn fail(&self, reason: &str) {
        let (_, reply) = self.next();
        let _ = reply.send(Err(DecodeError::new(reason)));
    }

    fn next(&self) -> (ModelSource, oneshot::Sender<Reply>) {
        self.pending
            .borrow_mut()
            .pop_front()
            .expect("no decode in flight")
    }
}

impl ModelDecoder for ScriptedDecoder {
    fn decode(&self, source: ModelSource) -> impl Future<Output = Reply> {
        let (tx, rx) = oneshot::channel();
        self.started.borrow_mut().push(source.file_name().to_string());
        self.pending.borrow_mut().push_back((source, tx));

        async move {
            rx.await
                .unwrap_or_else(|_| Err(DecodeError::new("decode cancelled")))
        }
    }
}

/// Spawns `future` on `pool`; its output lands in the returned slot.
pub fn spawn<T: 'static>(
    pool: &LocalPool,
    future: impl Future<Output = T> + 'static,
) -> Rc<RefCell<Option<T>>> {
    let slot = Rc::new(RefCell::new(None));
    let output = slot.clone();
    pool.spawner()
        .spawn_local(async move {
            *output.borrow_mut() = Some(future.await);
        })
        .expect("failed to spawn");
    slot
}

pub fn attached_renderer() -> HeadlessRenderer {
    let mut renderer = HeadlessRenderer::new();
    renderer.attach(&SceneSetup::from(&ViewerConfig::default()));
    renderer
}

pub fn controller(
    decoder: &ScriptedDecoder,
) -> ModelDisplayController<HeadlessRenderer, ScriptedDecoder> {
    ModelDisplayController::new(attached_renderer(), decoder.clone(), ViewCamera::default())
}
