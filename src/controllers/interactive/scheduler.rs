use crate::controllers::interactive::bridge::{BridgeError, RenderBridge};
use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::interactive::errors::render::RenderError;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::core::view::Viewport;
use log::{debug, warn};
use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    /// The user is manipulating the view; nothing is rendered until release.
    Dragging,
    PendingDebounce { deadline: Instant },
    RenderInFlight { generation: u64 },
}

/// What the controller should do with an engine event.
#[derive(Debug)]
#[must_use]
pub enum Disposition {
    /// The frame answers the live request and should be painted.
    Composite(FrameData),
    /// Answers a request that is no longer eligible.
    Stale,
    Cancelled,
    Failed(RenderError),
    EngineReady,
}

/// Decides when the expensive render runs.
///
/// Input only moves the preview; the render is issued once input has been
/// quiet for the debounce window. Each render carries a fresh generation and
/// only the newest one may be composited. Older requests are superseded at the
/// engine and whatever they still produce is reported as stale.
#[derive(Debug)]
pub struct RenderScheduler {
    state: SchedulerState,
    debounce: Duration,
    last_generation: u64,
    last_request: Option<RenderRequest>,
}

impl RenderScheduler {
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: SchedulerState::Idle,
            debounce,
            last_generation: 0,
            last_request: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// The generation that may still be composited, if any.
    #[must_use]
    pub fn live_generation(&self) -> Option<u64> {
        match self.state {
            SchedulerState::RenderInFlight { generation } => Some(generation),
            _ => None,
        }
    }

    #[must_use]
    pub fn last_generation(&self) -> u64 {
        self.last_generation
    }

    #[must_use]
    pub fn last_request(&self) -> Option<&RenderRequest> {
        self.last_request.as_ref()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            SchedulerState::PendingDebounce { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Enters `Dragging`, dropping any pending timer and revoking the request
    /// in flight.
    pub fn begin_interaction<B>(&mut self, bridge: &mut B) -> Result<(), BridgeError>
    where
        B: RenderBridge + ?Sized,
    {
        let previous = self.state;
        self.state = SchedulerState::Dragging;

        if let SchedulerState::RenderInFlight { generation } = previous {
            debug!("superseding render {}", generation);
            bridge.supersede(generation)?;
        }

        Ok(())
    }

    pub fn end_interaction(&mut self, now: Instant) {
        self.state = SchedulerState::PendingDebounce {
            deadline: now + self.debounce,
        };
    }

    /// Issues the render once the debounce deadline has passed.
    pub fn poll<B>(
        &mut self,
        now: Instant,
        viewport: &Viewport,
        bridge: &mut B,
    ) -> Result<Option<RenderRequest>, BridgeError>
    where
        B: RenderBridge + ?Sized,
    {
        let SchedulerState::PendingDebounce { deadline } = self.state else {
            return Ok(None);
        };

        if now < deadline {
            return Ok(None);
        }

        self.last_generation += 1;
        let request = RenderRequest {
            generation: self.last_generation,
            target_viewport: *viewport,
        };

        if let Err(err) = bridge.render(request.generation) {
            warn!("could not dispatch render {}: {}", request.generation, err);
            self.state = SchedulerState::Idle;
            return Err(err);
        }

        debug!(
            "render {} dispatched at center ({}, {}) zoom {}",
            request.generation,
            viewport.center_x(),
            viewport.center_y(),
            viewport.zoom()
        );
        self.state = SchedulerState::RenderInFlight {
            generation: request.generation,
        };
        self.last_request = Some(request);

        Ok(Some(request))
    }

    pub fn handle_event(&mut self, event: RenderEvent, now: Instant) -> Disposition {
        let live = self.live_generation();

        match event {
            RenderEvent::Ready => {
                if self.state == SchedulerState::Idle {
                    self.state = SchedulerState::PendingDebounce { deadline: now };
                }
                Disposition::EngineReady
            }
            RenderEvent::Frame(frame) if Some(frame.generation) == live => {
                self.state = SchedulerState::Idle;
                Disposition::Composite(frame)
            }
            RenderEvent::Cancelled { generation } if Some(generation) == live => {
                debug!("live render {} cancelled", generation);
                self.state = SchedulerState::Idle;
                Disposition::Cancelled
            }
            RenderEvent::Error(error) if Some(error.generation) == live => {
                warn!("{}", error);
                self.state = SchedulerState::Idle;
                Disposition::Failed(error)
            }
            stale => {
                debug!(
                    "discarding stale response for generation {:?} (live: {:?})",
                    stale.generation(),
                    live
                );
                Disposition::Stale
            }
        }
    }

    /// Forwards a new surface size and schedules a render for it.
    ///
    /// An active drag stays in `Dragging`; releasing the pointer schedules.
    pub fn resize<B>(
        &mut self,
        width: u32,
        height: u32,
        bridge: &mut B,
        now: Instant,
    ) -> Result<(), BridgeError>
    where
        B: RenderBridge + ?Sized,
    {
        let previous = self.state;
        self.state = match previous {
            SchedulerState::Dragging => SchedulerState::Dragging,
            _ if width == 0 || height == 0 => SchedulerState::Idle,
            _ => SchedulerState::PendingDebounce {
                deadline: now + self.debounce,
            },
        };

        let result = match previous {
            SchedulerState::RenderInFlight { generation } => bridge
                .supersede(generation)
                .and_then(|()| bridge.resize(width, height)),
            _ => bridge.resize(width, height),
        };

        if result.is_err() {
            self.state = SchedulerState::Idle;
        }
        result
    }

    /// The engine went away; whatever was in flight will never arrive.
    pub fn engine_lost(&mut self) {
        if let Some(generation) = self.live_generation() {
            warn!("render {} abandoned, engine unavailable", generation);
        }
        self.state = SchedulerState::Idle;
    }
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::interactive::bridge::EngineRequest;
    use crate::controllers::interactive::test_support::{BridgeCall, MockBridge};
    use crate::core::data::pixel_buffer::PixelBuffer;

    fn viewport() -> Viewport {
        Viewport::new(-0.5, 0.0, 0.8, 64).unwrap()
    }

    fn frame(generation: u64) -> RenderEvent {
        RenderEvent::Frame(FrameData {
            generation,
            buffer: PixelBuffer::new(2, 2),
            render_duration: Duration::from_millis(3),
        })
    }

    /// Drives one drag-release-debounce cycle and returns the issued generation.
    fn interact_and_render(
        scheduler: &mut RenderScheduler,
        bridge: &mut MockBridge,
        now: Instant,
    ) -> u64 {
        scheduler.begin_interaction(bridge).unwrap();
        scheduler.end_interaction(now);
        scheduler
            .poll(now + DEFAULT_DEBOUNCE, &viewport(), bridge)
            .unwrap()
            .expect("debounce elapsed")
            .generation
    }

    #[test]
    fn starts_idle_without_deadline() {
        let scheduler = RenderScheduler::default();

        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.next_deadline(), None);
        assert_eq!(scheduler.last_generation(), 0);
    }

    #[test]
    fn poll_waits_for_the_debounce_deadline() {
        let mut scheduler = RenderScheduler::default();
        let mut bridge = MockBridge::default();
        let now = Instant::now();

        scheduler.begin_interaction(&mut bridge).unwrap();
        scheduler.end_interaction(now);

        assert_eq!(scheduler.next_deadline(), Some(now + DEFAULT_DEBOUNCE));
        let early = scheduler
            .poll(now + Duration::from_millis(499), &viewport(), &mut bridge)
            .unwrap();
        assert!(early.is_none());
        assert!(bridge.renders().is_empty());

        let request = scheduler
            .poll(now + DEFAULT_DEBOUNCE, &viewport(), &mut bridge)
            .unwrap()
            .unwrap();
        assert_eq!(request.generation, 1);
        assert_eq!(request.target_viewport, viewport());
        assert_eq!(
            scheduler.state(),
            SchedulerState::RenderInFlight { generation: 1 }
        );
        assert_eq!(bridge.renders(), vec![1]);
    }

    #[test]
    fn debounce_coalesces_bursts_into_one_render() {
        let mut scheduler = RenderScheduler::default();
        let mut bridge = MockBridge::default();
        let start = Instant::now();

        let mut now = start;
        for _ in 0..20 {
            scheduler.begin_interaction(&mut bridge).unwrap();
            scheduler.end_interaction(now);
            now += Duration::from_millis(40);
            let issued = scheduler.poll(now, &viewport(), &mut bridge).unwrap();
            assert!(issued.is_none());
        }

        scheduler
            .poll(now + DEFAULT_DEBOUNCE, &viewport(), &mut bridge)
            .unwrap();
        scheduler
            .poll(now + DEFAULT_DEBOUNCE * 2, &viewport(), &mut bridge)
            .unwrap();

        assert_eq!(bridge.renders(), vec![1]);
    }

    #[test]
    fn request_snapshots_viewport_at_dispatch() {
        let mut scheduler = RenderScheduler::default();
        let mut bridge = MockBridge::default();
        let now = Instant::now();
        let mut view = viewport();
        assert!(scheduler.last_request().is_none());

        scheduler.end_interaction(now);
        scheduler
            .poll(now + DEFAULT_DEBOUNCE, &view, &mut bridge)
            .unwrap();
        let dispatched = view;
        view.pan(0.5, 0.0);

        let request = scheduler.last_request().unwrap();
        assert_eq!(request.generation, 1);
        assert_eq!(request.target_viewport, dispatched);
        assert_ne!(request.target_viewport, view);
    }

    #[test]
    fn dragging_never_fires_the_timer() {
        let mut scheduler = RenderScheduler::default();
        let mut bridge = MockBridge::default();
        let now = Instant::now();

        scheduler.end_interaction(now);
        scheduler.begin_interaction(&mut bridge).unwrap();

        let issued = scheduler
            .poll(now + Duration::from_secs(10), &viewport(), &mut bridge)
            .unwrap();
        assert!(issued.is_none());
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn only_the_newest_generation_is_composited() {
        let mut scheduler = RenderScheduler::default();
        let mut bridge = MockBridge::default();
        let now = Instant::now();

        let first = interact_and_render(&mut scheduler, &mut bridge, now);
        let second = interact_and_render(&mut scheduler, &mut bridge, now);
        let third = interact_and_render(&mut scheduler, &mut bridge, now);
        assert_eq!((first, second, third), (1, 2, 3));

        assert!(matches!(
            scheduler.handle_event(frame(3), now),
            Disposition::Composite(FrameData { generation: 3, .. })
        ));
        assert!(matches!(
            scheduler.handle_event(frame(1), now),
            Disposition::Stale
        ));
        assert!(matches!(
            scheduler.handle_event(frame(2), now),
            Disposition::Stale
        ));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn begin_interaction_supersedes_render_in_flight() {
        let mut scheduler = RenderScheduler::default();
        let mut bridge = MockBridge::default();
        let now = Instant::now();

        let generation = interact_and_render(&mut scheduler, &mut bridge, now);
        scheduler.begin_interaction(&mut bridge).unwrap();

        assert!(bridge.calls.contains(&BridgeCall::Supersede(generation)));
        assert_eq!(scheduler.live_generation(), None);
        assert!(matches!(
            scheduler.handle_event(frame(generation), now),
            Disposition::Stale
        ));
    }

    #[test]
    fn ready_while_idle_schedules_immediate_render() {
        let mut scheduler = RenderScheduler::default();
        let mut bridge = MockBridge::default();
        let now = Instant::now();

        assert!(matches!(
            scheduler.handle_event(RenderEvent::Ready, now),
            Disposition::EngineReady
        ));

        let request = scheduler.poll(now, &viewport(), &mut bridge).unwrap();
        assert_eq!(request.map(|r| r.generation), Some(1));
    }

    #[test]
    fn ready_while_dragging_keeps_dragging() {
        let mut scheduler = RenderScheduler::default();
        let mut bridge = MockBridge::default();
        scheduler.begin_interaction(&mut bridge).unwrap();

        let _ = scheduler.handle_event(RenderEvent::Ready, Instant::now());

        assert_eq!(scheduler.state(), SchedulerState::Dragging);
    }

    #[test]
    fn live_error_and_cancellation_return_to_idle() {
        let mut scheduler = RenderScheduler::default();
        let mut bridge = MockBridge::default();
        let now = Instant::now();

        let generation = interact_and_render(&mut scheduler, &mut bridge, now);
        let error = RenderError {
            generation,
            message: "boom".to_string(),
        };
        assert!(matches!(
            scheduler.handle_event(RenderEvent::Error(error.clone()), now),
            Disposition::Failed(e) if e == error
        ));
        assert_eq!(scheduler.state(), SchedulerState::Idle);

        let generation = interact_and_render(&mut scheduler, &mut bridge, now);
        assert!(matches!(
            scheduler.handle_event(RenderEvent::Cancelled { generation }, now),
            Disposition::Cancelled
        ));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn bridge_failure_on_dispatch_returns_to_idle() {
        let mut scheduler = RenderScheduler::default();
        let mut bridge = MockBridge {
            unavailable: true,
            ..MockBridge::default()
        };
        let now = Instant::now();
        scheduler.end_interaction(now);

        let result = scheduler.poll(now + DEFAULT_DEBOUNCE, &viewport(), &mut bridge);

        assert_eq!(result, Err(BridgeError::EngineUnavailable));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn resize_sends_size_and_debounces() {
        let mut scheduler = RenderScheduler::default();
        let mut bridge = MockBridge::default();
        let now = Instant::now();

        let generation = interact_and_render(&mut scheduler, &mut bridge, now);
        scheduler.resize(1024, 768, &mut bridge, now).unwrap();

        assert!(bridge.calls.contains(&BridgeCall::Supersede(generation)));
        assert!(bridge.calls.contains(&BridgeCall::Request(EngineRequest::Resize {
            width: 1024,
            height: 768
        })));
        assert_eq!(scheduler.next_deadline(), Some(now + DEFAULT_DEBOUNCE));
    }

    #[test]
    fn resize_during_drag_stays_dragging() {
        let mut scheduler = RenderScheduler::default();
        let mut bridge = MockBridge::default();
        scheduler.begin_interaction(&mut bridge).unwrap();

        scheduler.resize(640, 480, &mut bridge, Instant::now()).unwrap();

        assert_eq!(scheduler.state(), SchedulerState::Dragging);
    }

    #[test]
    fn resize_to_empty_surface_does_not_schedule() {
        let mut scheduler = RenderScheduler::default();
        let mut bridge = MockBridge::default();

        scheduler.resize(0, 480, &mut bridge, Instant::now()).unwrap();

        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn engine_lost_abandons_render_in_flight() {
        let mut scheduler = RenderScheduler::default();
        let mut bridge = MockBridge::default();
        let now = Instant::now();
        let generation = interact_and_render(&mut scheduler, &mut bridge, now);

        scheduler.engine_lost();

        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(matches!(
            scheduler.handle_event(frame(generation), now),
            Disposition::Stale
        ));
    }
}
