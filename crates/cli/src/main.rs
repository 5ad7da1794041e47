use std::path::PathBuf;

use adsoda::render::{DrawStyle, RecordingSink};
use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::fmt::SubscriberBuilder;

mod pipeline;
mod scene;
mod sink;

use pipeline::{draw_reference_cube, Pipeline, PipelineCfg};
use sink::FrameDump;

#[derive(Parser)]
#[command(name = "adsoda")]
#[command(about = "Arbitrary-dimensional solid display pipeline")]
struct Cmd {
    /// Working dimension of the demo scene (2, 3, or 4)
    #[arg(long, default_value_t = 4)]
    dim: usize,

    /// Render the 1D space
    #[arg(long)]
    draw1d: bool,
    /// Render the 2D space
    #[arg(long)]
    draw2d: bool,
    /// Render the 3D space
    #[arg(long)]
    draw3d: bool,

    /// Animate rotation of the 2D space
    #[arg(long)]
    rotate2d: bool,
    /// Animate rotation of the 3D space
    #[arg(long)]
    rotate3d: bool,
    /// Animate rotation of the 4D space
    #[arg(long)]
    rotate4d: bool,

    /// Remove hidden solids in the 2D space
    #[arg(long)]
    remove_hidden2d: bool,
    /// Remove hidden solids in the 3D space
    #[arg(long)]
    remove_hidden3d: bool,
    /// Remove hidden solids in the 4D space
    #[arg(long)]
    remove_hidden4d: bool,

    /// Disable polygon fills
    #[arg(long)]
    no_fill: bool,
    /// Disable polygon outlines
    #[arg(long)]
    no_outline: bool,
    /// Overlay a unit reference cube
    #[arg(long)]
    draw_cube: bool,

    /// Number of frames to process
    #[arg(long, default_value_t = 1)]
    frames: usize,
    /// Write the frame dump here instead of standard output
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();

    let demo = match cmd.dim {
        2 => scene::demo_2d(),
        3 => scene::demo_3d(),
        4 => scene::demo_4d(),
        other => bail!("no demo scene for dimension {other} (supported: 2, 3, 4)"),
    };

    let cfg = PipelineCfg {
        draw1d: cmd.draw1d,
        draw2d: cmd.draw2d,
        draw3d: cmd.draw3d,
        rotate2d: cmd.rotate2d,
        rotate3d: cmd.rotate3d,
        rotate4d: cmd.rotate4d,
        remove_hidden2d: cmd.remove_hidden2d,
        remove_hidden3d: cmd.remove_hidden3d,
        remove_hidden4d: cmd.remove_hidden4d,
    };
    let style = DrawStyle {
        fill: !cmd.no_fill,
        outline: !cmd.no_outline,
    };

    let mut pipeline = Pipeline::new(demo, cfg);
    let mut frames = Vec::with_capacity(cmd.frames);
    for index in 0..cmd.frames {
        let frame = pipeline.prepare_frame()?;
        tracing::info!(
            frame = index,
            solids3 = frame.space3.as_ref().map_or(0, |s| s.solids().len()),
            solids2 = frame.space2.as_ref().map_or(0, |s| s.solids().len()),
            solids1 = frame.space1.as_ref().map_or(0, |s| s.solids().len()),
            "frame"
        );

        let mut recording = RecordingSink::default();
        if cmd.draw_cube {
            draw_reference_cube(&mut recording);
        }
        frame.draw(&mut recording, style);
        frames.push(FrameDump::new(index, recording.into_events()));
    }

    match &cmd.out {
        Some(path) => sink::write_frames(path, &frames)?,
        None => println!("{}", serde_json::to_string_pretty(&frames)?),
    }
    Ok(())
}
