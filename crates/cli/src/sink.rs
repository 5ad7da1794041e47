//! Frame dumps: the recorded draw stream as JSON.

use std::fs;
use std::path::Path;

use adsoda::render::DrawEvent;
use anyhow::Result;
use serde::Serialize;

/// One sink call, in serializable form.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    SetColor { red: f64, green: f64, blue: f64 },
    BeginPolygon,
    EndPolygon,
    BeginLineLoop,
    EndLineLoop,
    Vertex { x: f64, y: f64, z: f64 },
}

impl From<DrawEvent> for DrawOp {
    fn from(event: DrawEvent) -> Self {
        match event {
            DrawEvent::SetColor(color) => DrawOp::SetColor {
                red: color.red,
                green: color.green,
                blue: color.blue,
            },
            DrawEvent::BeginPolygon => DrawOp::BeginPolygon,
            DrawEvent::EndPolygon => DrawOp::EndPolygon,
            DrawEvent::BeginLineLoop => DrawOp::BeginLineLoop,
            DrawEvent::EndLineLoop => DrawOp::EndLineLoop,
            DrawEvent::Vertex(x, y, z) => DrawOp::Vertex { x, y, z },
        }
    }
}

/// Everything one frame emitted.
#[derive(Debug, Serialize)]
pub struct FrameDump {
    pub frame: usize,
    pub ops: Vec<DrawOp>,
}

impl FrameDump {
    pub fn new(frame: usize, events: Vec<DrawEvent>) -> Self {
        Self {
            frame,
            ops: events.into_iter().map(Into::into).collect(),
        }
    }
}

/// Write the frame dumps as pretty JSON, creating parent directories.
pub fn write_frames(path: &Path, frames: &[FrameDump]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(frames)?)?;
    Ok(())
}
