use crate::controllers::interactive::bridge::engine::{EngineRenderError, RenderEngine};
use crate::controllers::interactive::bridge::port::{BridgeError, RenderBridge};
use crate::controllers::interactive::bridge::protocol::EngineRequest;
use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::errors::render::RenderError;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::event_waker::EventWaker;
use crate::core::actions::cancellation::{CancelToken, GenerationToken};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Hosts a [`RenderEngine`] on its own thread.
///
/// Requests and events travel over channels; only `superseded_through` and
/// `shutdown` are shared, so a running render can notice it is no longer
/// wanted without waiting for its turn in the request queue.
pub struct WorkerBridge {
    requests: Sender<EngineRequest>,
    events: Receiver<RenderEvent>,
    superseded_through: Arc<AtomicU64>,
    shutdown: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

struct WorkerContext {
    requests: Receiver<EngineRequest>,
    events: Sender<RenderEvent>,
    superseded_through: Arc<AtomicU64>,
    shutdown: Arc<AtomicBool>,
    waker: Arc<dyn EventWaker>,
}

impl WorkerBridge {
    pub fn spawn<E>(engine: E, waker: Arc<dyn EventWaker>) -> Self
    where
        E: RenderEngine + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let superseded_through = Arc::new(AtomicU64::new(0));
        let shutdown = Arc::new(AtomicBool::new(false));

        let context = WorkerContext {
            requests: request_rx,
            events: event_tx,
            superseded_through: Arc::clone(&superseded_through),
            shutdown: Arc::clone(&shutdown),
            waker,
        };

        let worker = thread::spawn(move || {
            Self::worker_loop(engine, &context);
        });

        Self {
            requests: request_tx,
            events: event_rx,
            superseded_through,
            shutdown,
            worker: Some(worker),
        }
    }

    /// Stops the engine thread and waits for it. Later calls report
    /// [`BridgeError::EngineUnavailable`].
    pub fn shutdown(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        let _ = self.requests.send(EngineRequest::Shutdown);

        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("render worker panicked");
            }
        }
    }

    fn send(&self, request: EngineRequest) -> Result<(), BridgeError> {
        self.requests
            .send(request)
            .map_err(|_| BridgeError::EngineUnavailable)
    }

    fn worker_loop<E: RenderEngine>(mut engine: E, context: &WorkerContext) {
        info!("render worker started");
        context.emit(RenderEvent::Ready);

        while let Ok(request) = context.requests.recv() {
            match request {
                EngineRequest::Resize { width, height } => engine.resize(width, height),
                EngineRequest::ChangeView { delta_x, delta_y } => {
                    engine.change_view(delta_x, delta_y);
                }
                EngineRequest::ChangeZoom { factor } => engine.change_zoom(factor),
                EngineRequest::SetMaxIterations { max_iterations } => {
                    engine.set_max_iterations(max_iterations);
                }
                EngineRequest::Render { generation } => {
                    let event = Self::render(&mut engine, generation, context);
                    if !context.emit(event) {
                        break;
                    }
                }
                EngineRequest::Shutdown => break,
            }

            if context.shutdown.load(Ordering::Acquire) {
                break;
            }
        }

        info!("render worker stopped");
    }

    fn render<E: RenderEngine>(
        engine: &mut E,
        generation: u64,
        context: &WorkerContext,
    ) -> RenderEvent {
        let token = GenerationToken::new(
            generation,
            Arc::clone(&context.superseded_through),
            Arc::clone(&context.shutdown),
        );

        if token.is_cancelled() {
            debug!("render {} superseded before it started", generation);
            return RenderEvent::Cancelled { generation };
        }

        let start = Instant::now();
        let result = engine.render(&token);
        let render_duration = start.elapsed();

        match result {
            Ok(buffer) => RenderEvent::Frame(FrameData {
                generation,
                buffer,
                render_duration,
            }),
            Err(EngineRenderError::Cancelled) => {
                debug!("render {} cancelled after {:?}", generation, render_duration);
                RenderEvent::Cancelled { generation }
            }
            Err(err) => RenderEvent::Error(RenderError {
                generation,
                message: err.to_string(),
            }),
        }
    }
}

impl WorkerContext {
    fn emit(&self, event: RenderEvent) -> bool {
        let delivered = self.events.send(event).is_ok();
        if delivered {
            self.waker.wake();
        }
        delivered
    }
}

impl RenderBridge for WorkerBridge {
    fn resize(&mut self, width: u32, height: u32) -> Result<(), BridgeError> {
        self.send(EngineRequest::Resize { width, height })
    }

    fn change_view(&mut self, delta_x: f64, delta_y: f64) -> Result<(), BridgeError> {
        self.send(EngineRequest::ChangeView { delta_x, delta_y })
    }

    fn change_zoom(&mut self, factor: f64) -> Result<(), BridgeError> {
        self.send(EngineRequest::ChangeZoom { factor })
    }

    fn set_max_iterations(&mut self, max_iterations: u32) -> Result<(), BridgeError> {
        self.send(EngineRequest::SetMaxIterations { max_iterations })
    }

    fn render(&mut self, generation: u64) -> Result<(), BridgeError> {
        self.send(EngineRequest::Render { generation })
    }

    fn supersede(&mut self, generation: u64) -> Result<(), BridgeError> {
        if self.worker.as_ref().is_none_or(JoinHandle::is_finished) {
            return Err(BridgeError::EngineUnavailable);
        }
        self.superseded_through
            .fetch_max(generation, Ordering::AcqRel);
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<RenderEvent>, BridgeError> {
        match self.events.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(BridgeError::EngineUnavailable),
        }
    }

    fn wait_event(&mut self, timeout: Duration) -> Result<Option<RenderEvent>, BridgeError> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(BridgeError::EngineUnavailable),
        }
    }
}

impl Drop for WorkerBridge {
    fn drop(&mut self) {
        self.shutdown();
    }
}
