//! The per-frame processing cascade.
//!
//! Each frame walks the scene down the dimensions: rotate (optional), remove
//! hidden solids (optional), project to the next space down, and remember the
//! spaces that were marked for drawing. The demo scene itself is never
//! mutated; every frame starts from a copy.

use adsoda::color::Color;
use adsoda::light::Light;
use adsoda::render::{DrawStyle, RenderSink};
use adsoda::space::Space;
use adsoda::transform::rotation;
use anyhow::Result;
use nalgebra::dvector;

/// Which stages run, mirrored from the command line.
#[derive(Clone, Copy, Debug, Default)]
pub struct PipelineCfg {
    pub draw1d: bool,
    pub draw2d: bool,
    pub draw3d: bool,
    pub rotate2d: bool,
    pub rotate3d: bool,
    pub rotate4d: bool,
    pub remove_hidden2d: bool,
    pub remove_hidden3d: bool,
    pub remove_hidden4d: bool,
}

/// The spaces one frame marked for drawing, adjacency state frozen.
#[derive(Debug, Default)]
pub struct FrameSpaces {
    pub space3: Option<Space>,
    pub space2: Option<Space>,
    pub space1: Option<Space>,
}

impl FrameSpaces {
    /// Emit every marked space, highest dimension first.
    pub fn draw(&self, sink: &mut dyn RenderSink, style: DrawStyle) {
        if let Some(space) = &self.space3 {
            space.draw_3d(sink, style);
        }
        if let Some(space) = &self.space2 {
            space.draw_2d(sink, style);
        }
        if let Some(space) = &self.space1 {
            space.draw_1d(sink);
        }
    }
}

/// Frame-to-frame pipeline state: the demo scene and the rotation angles.
pub struct Pipeline {
    cfg: PipelineCfg,
    demo: Space,
    theta: f64,
    rho: f64,
    phi: f64,
}

impl Pipeline {
    pub fn new(demo: Space, cfg: PipelineCfg) -> Self {
        Self {
            cfg,
            demo,
            theta: 0.0,
            rho: 0.0,
            phi: 0.0,
        }
    }

    /// Run one frame of the cascade and return the spaces to draw.
    pub fn prepare_frame(&mut self) -> Result<FrameSpaces> {
        let mut frame = FrameSpaces::default();
        let mut current: Option<Space> = Some(self.demo.clone());

        if matches!(&current, Some(space) if space.dim() == 4) {
            current = self.process_4d(current.take().unwrap())?;
        }
        if matches!(&current, Some(space) if space.dim() == 3) {
            current = self.process_3d(current.take().unwrap(), &mut frame)?;
        }
        if matches!(&current, Some(space) if space.dim() == 2) {
            current = self.process_2d(current.take().unwrap(), &mut frame)?;
        }
        if matches!(&current, Some(space) if space.dim() == 1) {
            self.process_1d(current.take().unwrap(), &mut frame);
        }

        // Freeze derived state so drawing never observes stale adjacencies.
        for space in [&mut frame.space3, &mut frame.space2, &mut frame.space1]
            .into_iter()
            .flatten()
        {
            space.ensure_adjacencies();
        }
        Ok(frame)
    }

    fn process_4d(&mut self, mut space: Space) -> Result<Option<Space>> {
        if self.cfg.rotate4d {
            let m = rotation(4, 0, 3, 3.0 * self.rho)
                * rotation(4, 0, 2, 2.0 * self.theta)
                * rotation(4, 0, 1, self.phi);
            space.transform(&m)?;
            self.theta += 0.01;
            self.rho += 0.02;
            self.phi -= 0.015;
        }

        if self.cfg.remove_hidden4d {
            space.remove_hidden_solids();
        }

        let lower = if self.cfg.draw3d {
            let mut volume = Space::new(3, Color::grey(0.2));
            volume.add_light(Light::new(dvector![-100.0, -100.0, -100.0], Color::WHITE));
            space.project_to(&mut volume);
            tracing::debug!(solids = volume.solids().len(), "projected 4d scene");
            Some(volume)
        } else {
            None
        };

        self.theta += -0.01;
        Ok(lower)
    }

    fn process_3d(&mut self, mut space: Space, frame: &mut FrameSpaces) -> Result<Option<Space>> {
        if self.cfg.rotate3d {
            let m1 = rotation(3, 1, 2, self.theta);
            self.theta += -0.01;
            let m2 = rotation(3, 0, 2, 2.0 * self.theta);
            self.theta += -0.01;
            space.transform(&(m1 * m2))?;
        }

        if self.cfg.remove_hidden3d {
            space.remove_hidden_solids();
        }

        let lower = if self.cfg.draw2d {
            let mut plane = Space::new(2, Color::grey(0.1));
            space.project_to(&mut plane);
            tracing::debug!(solids = plane.solids().len(), "projected 3d scene");
            Some(plane)
        } else {
            None
        };

        if self.cfg.draw3d {
            frame.space3 = Some(space);
        }
        Ok(lower)
    }

    fn process_2d(&mut self, mut space: Space, frame: &mut FrameSpaces) -> Result<Option<Space>> {
        if self.cfg.rotate2d {
            space.transform(&rotation(2, 0, 1, self.theta))?;
            self.theta += 0.01;
        }

        if self.cfg.remove_hidden2d {
            space.remove_hidden_solids();
        }

        let lower = if self.cfg.draw1d {
            let mut line = Space::new(1, Color::grey(0.1));
            space.project_to(&mut line);
            Some(line)
        } else {
            None
        };

        if self.cfg.draw2d {
            frame.space2 = Some(space);
        }
        Ok(lower)
    }

    fn process_1d(&mut self, space: Space, frame: &mut FrameSpaces) {
        if self.cfg.draw1d {
            frame.space1 = Some(space);
        }
    }
}

/// Overlay a white wireframe unit cube, in emitted (post-scale) coordinates.
pub fn draw_reference_cube(sink: &mut dyn RenderSink) {
    const CORNERS: [[f64; 3]; 8] = [
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ];
    const FACES: [[usize; 4]; 6] = [
        [0, 1, 2, 3],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [2, 3, 7, 6],
        [0, 3, 7, 4],
        [1, 2, 6, 5],
    ];

    sink.set_color(Color::WHITE);
    for face in FACES {
        sink.begin_line_loop();
        for ci in face {
            let [x, y, z] = CORNERS[ci];
            sink.vertex(x, y, z);
        }
        sink.end_line_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::{draw_reference_cube, Pipeline, PipelineCfg};
    use crate::scene::{demo_2d, demo_3d, demo_4d};
    use adsoda::render::{DrawEvent, DrawStyle, RecordingSink};

    #[test]
    fn three_dimensional_scene_cascades_to_every_marked_space() {
        let cfg = PipelineCfg {
            draw1d: true,
            draw2d: true,
            draw3d: true,
            ..PipelineCfg::default()
        };
        let mut pipeline = Pipeline::new(demo_3d(), cfg);
        let frame = pipeline.prepare_frame().unwrap();

        let space3 = frame.space3.as_ref().expect("3d space marked");
        assert_eq!(space3.solids().len(), 2);
        let space2 = frame.space2.as_ref().expect("2d space marked");
        // One projected solid per visible cube face.
        assert_eq!(space2.solids().len(), 2);
        assert!(frame.space1.is_some());

        let mut sink = RecordingSink::default();
        frame.draw(&mut sink, DrawStyle::default());
        assert!(!sink.events().is_empty());
    }

    #[test]
    fn rotation_advances_the_angles_between_frames() {
        let cfg = PipelineCfg {
            draw2d: true,
            rotate2d: true,
            ..PipelineCfg::default()
        };
        let mut pipeline = Pipeline::new(demo_2d(), cfg);

        let first = pipeline.prepare_frame().unwrap();
        let second = pipeline.prepare_frame().unwrap();
        let corner_of = |frame: &super::FrameSpaces| {
            frame.space2.as_ref().unwrap().solids()[0].corners()[0].clone()
        };
        // Frame zero rotates by θ = 0; frame one by θ = 0.01.
        let delta = (corner_of(&first) - corner_of(&second)).norm();
        assert!(delta > 1e-6);
    }

    #[test]
    fn four_dimensional_scene_projects_to_a_volume() {
        let cfg = PipelineCfg {
            draw3d: true,
            ..PipelineCfg::default()
        };
        let mut pipeline = Pipeline::new(demo_4d(), cfg);
        let frame = pipeline.prepare_frame().unwrap();

        let volume = frame.space3.as_ref().expect("projected volume");
        assert_eq!(volume.dim(), 3);
        // One visible cell per tesseract.
        assert_eq!(volume.solids().len(), 2);
    }

    #[test]
    fn hidden_solid_removal_prunes_occluded_geometry() {
        let cfg = PipelineCfg {
            draw3d: true,
            remove_hidden4d: true,
            ..PipelineCfg::default()
        };
        let mut pipeline = Pipeline::new(demo_4d(), cfg);
        let frame = pipeline.prepare_frame().unwrap();
        assert!(frame.space3.is_some());
    }

    #[test]
    fn reference_cube_is_six_white_loops() {
        let mut sink = RecordingSink::default();
        draw_reference_cube(&mut sink);
        let events = sink.events();
        assert_eq!(events[0], DrawEvent::SetColor(adsoda::color::Color::WHITE));
        let loops = events
            .iter()
            .filter(|e| **e == DrawEvent::BeginLineLoop)
            .count();
        assert_eq!(loops, 6);
    }
}
