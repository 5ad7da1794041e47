//! The render seam: emit-primitive sink and draw style.
//!
//! The geometry engine never talks to a graphics API. Draw dispatch emits
//! ordered vertices and per-face colors through `RenderSink`, and adapters
//! decide what those primitives become (a GL context, a frame dump, a test
//! recording).

use crate::color::Color;

/// Fill/outline toggles shared by the 1/2/3D draw dispatchers.
#[derive(Clone, Copy, Debug)]
pub struct DrawStyle {
    pub fill: bool,
    pub outline: bool,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            fill: true,
            outline: false,
        }
    }
}

/// Consumer of the engine's draw primitives.
///
/// Vertices between a begin/end pair form one polygon or line loop, in the
/// order emitted. Colors apply to the primitives that follow.
pub trait RenderSink {
    fn set_color(&mut self, color: Color);
    fn begin_polygon(&mut self);
    fn end_polygon(&mut self);
    fn begin_line_loop(&mut self);
    fn end_line_loop(&mut self);
    fn vertex(&mut self, x: f64, y: f64, z: f64);
}

/// One recorded sink call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawEvent {
    SetColor(Color),
    BeginPolygon,
    EndPolygon,
    BeginLineLoop,
    EndLineLoop,
    Vertex(f64, f64, f64),
}

/// A sink that records every call, for headless consumers and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Vec<DrawEvent>,
}

impl RecordingSink {
    pub fn events(&self) -> &[DrawEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<DrawEvent> {
        self.events
    }
}

impl RenderSink for RecordingSink {
    fn set_color(&mut self, color: Color) {
        self.events.push(DrawEvent::SetColor(color));
    }
    fn begin_polygon(&mut self) {
        self.events.push(DrawEvent::BeginPolygon);
    }
    fn end_polygon(&mut self) {
        self.events.push(DrawEvent::EndPolygon);
    }
    fn begin_line_loop(&mut self) {
        self.events.push(DrawEvent::BeginLineLoop);
    }
    fn end_line_loop(&mut self) {
        self.events.push(DrawEvent::EndLineLoop);
    }
    fn vertex(&mut self, x: f64, y: f64, z: f64) {
        self.events.push(DrawEvent::Vertex(x, y, z));
    }
}
