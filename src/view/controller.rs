use serde::Serialize;
use strum_macros::Display;
use utoipa::ToSchema;

use crate::config::Settings;
use crate::projection::{ScreenPoint, ViewportGeometry};
use crate::scene::{
    marker_at, CursorReadout, CursorTracker, IconCache, Layer, MarkerHit, SceneBuilder,
};
use crate::tracking::TrackingData;

use super::events::{EventSink, OutboundEvent, ViewEvent};
use super::renderer::{RenderUpdate, Renderer};
use super::scheduler::FrameScheduler;

const DEBUG_FRAME_INTERVAL: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    Stopped,
    Running,
}

/// Size of the element hosting the view.
pub trait Container {
    fn size(&self) -> (u32, u32);
}

#[derive(Debug, Clone, Copy)]
pub struct FixedContainer {
    pub width: u32,
    pub height: u32,
}

impl Container for FixedContainer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

pub struct Collaborators {
    pub icons: Box<dyn IconCache + Send + Sync>,
    pub events: Box<dyn EventSink + Send + Sync>,
    pub container: Box<dyn Container + Send + Sync>,
}

/// Mutable state owned by one polar view.
#[derive(Debug)]
pub struct ViewContext {
    pub margin: u32,
    pub settings: Settings,
    pub show_planets: bool,
    geometry: Option<ViewportGeometry>,
    cursor: CursorTracker,
    markers: Vec<MarkerHit>,
}

impl ViewContext {
    pub fn new(margin: u32, settings: Settings, show_planets: bool) -> Self {
        Self {
            margin,
            settings,
            show_planets,
            geometry: None,
            cursor: CursorTracker::default(),
            markers: Vec::new(),
        }
    }

    fn drawable_geometry(&self) -> Option<ViewportGeometry> {
        self.geometry.filter(ViewportGeometry::is_drawable)
    }
}

/// Drives the polar view: redraws on events and resizes, and refreshes the
/// cursor readout once per frame while running.
pub struct RenderLoop<S, R, D> {
    state: LoopState,
    context: ViewContext,
    scheduler: S,
    renderer: R,
    data: D,
    collaborators: Collaborators,
    frame_pending: bool,
    frames: u64,
}

impl<S, R, D> RenderLoop<S, R, D>
where
    S: FrameScheduler,
    R: Renderer,
    D: TrackingData,
{
    pub fn new(
        context: ViewContext,
        scheduler: S,
        renderer: R,
        data: D,
        collaborators: Collaborators,
    ) -> Self {
        Self {
            state: LoopState::Stopped,
            context,
            scheduler,
            renderer,
            data,
            collaborators,
            frame_pending: false,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn geometry(&self) -> Option<ViewportGeometry> {
        self.context.geometry
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    /// Mutable access to the tracking data; follow up with the matching event.
    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    pub fn settings(&self) -> &Settings {
        &self.context.settings
    }

    /// Replaces the settings; a running view redraws with them at once.
    pub fn set_settings(&mut self, settings: Settings) {
        self.context.settings = settings;
        if self.is_running() {
            self.redraw();
        }
    }

    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        log::info!("Starting polar view");
        self.state = LoopState::Running;
        self.resize(None, None);
        self.context.cursor.invalidate();
        self.tick();
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            log::info!("Stopping polar view after {} frames", self.frames);
        }
        self.state = LoopState::Stopped;
    }

    /// Frame callback. Does nothing and schedules nothing once stopped.
    pub fn frame(&mut self) {
        self.frame_pending = false;
        self.tick();
    }

    fn tick(&mut self) {
        if !self.is_running() {
            return;
        }

        self.frames += 1;
        if heartbeat_due(self.context.settings.debug_level, self.frames) {
            log::info!("Polar view frame {}", self.frames);
        }

        let geometry = self.context.drawable_geometry();
        if let Some(text) = self.context.cursor.refresh(geometry.as_ref()) {
            self.renderer.draw(RenderUpdate::Cursor(text));
        }

        if !self.frame_pending {
            self.frame_pending = true;
            self.scheduler.schedule_next_frame();
        }
    }

    /// Recomputes the geometry and redraws. Missing dimensions come from the
    /// container; a zero-sized result leaves everything untouched.
    pub fn resize(&mut self, width: Option<u32>, height: Option<u32>) -> Option<ViewportGeometry> {
        let (width, height) = match (width, height) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                let (cw, ch) = self.collaborators.container.size();
                (width.unwrap_or(cw), height.unwrap_or(ch))
            }
        };

        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return None;
        }

        let geometry = ViewportGeometry::new(width, height, self.context.margin);
        self.context.geometry = Some(geometry);
        self.redraw();
        Some(geometry)
    }

    pub fn handle(&mut self, event: ViewEvent) {
        log::debug!("Polar view event: {} ({})", event, self.state);
        match event {
            ViewEvent::DataUpdated | ViewEvent::FollowingChanged => {
                if self.is_running() {
                    self.redraw();
                } else {
                    // Hit regions describe satellites that may no longer exist.
                    self.context.markers.clear();
                }
            }
            ViewEvent::PassSetReloaded => self.renderer.draw(RenderUpdate::Clear(Layer::Passes)),
            ViewEvent::ShowPlanets(show) => {
                if self.is_running() && self.context.settings.have_canvas {
                    self.context.show_planets = show;
                    self.redraw_planets();
                }
            }
        }
    }

    /// Swaps in a new tracking snapshot and redraws.
    pub fn replace_data(&mut self, data: D) {
        self.data = data;
        self.handle(ViewEvent::DataUpdated);
    }

    pub fn pointer_moved(&mut self, point: ScreenPoint) {
        self.context.cursor.pointer_moved(point);
    }

    pub fn pointer_left(&mut self) {
        self.context.cursor.pointer_left();
    }

    pub fn readout(&self) -> CursorReadout {
        self.context.cursor.readout(self.context.drawable_geometry().as_ref())
    }

    /// Reports the satellite whose marker is under `point`, if any.
    pub fn click(&mut self, point: ScreenPoint) -> Option<u32> {
        let catalog_number = marker_at(&self.context.markers, point)?.catalog_number;

        log::info!("Satellite {} clicked", catalog_number);
        self.collaborators
            .events
            .publish(OutboundEvent::SatelliteClicked { catalog_number });
        Some(catalog_number)
    }

    fn redraw(&mut self) {
        let Some(geometry) = self.context.drawable_geometry() else {
            return;
        };

        let builder = SceneBuilder::new(
            &geometry,
            &self.context.settings,
            self.collaborators.icons.as_ref(),
        );
        let scene = builder.build(&self.data, self.context.show_planets);
        self.context.markers = scene.markers.clone();
        self.renderer.draw(RenderUpdate::Scene(scene));
    }

    fn redraw_planets(&mut self) {
        let Some(geometry) = self.context.drawable_geometry() else {
            return;
        };

        let builder = SceneBuilder::new(
            &geometry,
            &self.context.settings,
            self.collaborators.icons.as_ref(),
        );
        let shapes = builder.planets(self.data.planets(), self.context.show_planets);
        self.renderer.draw(RenderUpdate::Layer(Layer::Planets, shapes));
    }
}

fn heartbeat_due(debug_level: u8, frames: u64) -> bool {
    debug_level > 0 && frames % DEBUG_FRAME_INTERVAL == 0
}
