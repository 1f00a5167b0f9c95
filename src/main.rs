//! Walk a wall map in the terminal.
//!
//! ```bash
//! cargo run --release -- <scene.space> [--save <scene.space>]
//! ```
//!
//! W/S move, A/D strafe, Q/E turn, Esc quits.  `--boxes [--pitch <deg>]`
//! prints the scene's boxes as seen from the origin instead.

use std::{
    io::{self, Write},
    path::PathBuf,
    time::Instant,
};

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use yacast::{
    MotionConfig, ViewConfig,
    engine::{BoxFrame, HeightRange, WallFrame, render_boxes, render_walls, try_step},
    renderer::{ScreenBuffer, terminal::TerminalDisplay, terminal::write_frame},
    save,
    world::{Camera, Eye, Scene},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Scene file to explore
    #[arg(value_name = "FILE")]
    scene: PathBuf,

    /// Horizontal field of view in degrees (overrides the scene header)
    #[arg(long)]
    fov: Option<f64>,

    /// Number of rays, i.e. screen columns (overrides the scene header)
    #[arg(long)]
    rays: Option<usize>,

    /// Screen height in rows (overrides the scene header)
    #[arg(long)]
    rows: Option<usize>,

    /// World units per step
    #[arg(long, default_value_t = 0.1)]
    step: f64,

    /// Degrees per turn
    #[arg(long, default_value_t = 2.0)]
    turn: f64,

    /// Closest distance the camera may get to a wall
    #[arg(long, default_value_t = 0.1)]
    radius: f64,

    /// Walk through walls
    #[arg(long)]
    no_collision: bool,

    /// Print a single frame to stdout and exit
    #[arg(long)]
    once: bool,

    /// Print the scene's boxes seen from the origin, then exit
    #[arg(long)]
    boxes: bool,

    /// Pitch of the box view in degrees, positive looks up
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, requires = "boxes")]
    pitch: f64,

    /// Write the scene (including the final pose) here on exit
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let opts = Opts::parse();

    let motion = MotionConfig {
        step: opts.step,
        turn_deg: opts.turn,
        collision_radius: opts.radius,
        collide: !opts.no_collision,
    }
    .validate()?;

    let (mut scene, warnings) = save::load(&opts.scene)?;
    if !warnings.is_empty() {
        log::warn!("{} line(s) of `{}` skipped", warnings.len(), opts.scene.display());
    }
    apply_view_overrides(&mut scene, &opts)?;

    if opts.boxes {
        let eye = Eye::new(*scene.camera.view());
        let mut screen = ScreenBuffer::default();
        let range = render_boxes(&scene.boxes, &eye, opts.pitch, &mut BoxFrame::new(), &mut screen);
        let mut out = io::stdout().lock();
        write_frame(&screen, &mut out)?;
        writeln!(out, "{}", height_range(range))?;
        return Ok(());
    }

    if opts.once {
        let mut screen = ScreenBuffer::default();
        render_walls(&scene.walls, &scene.camera, &mut WallFrame::new(), &mut screen);
        write_frame(&screen, &mut io::stdout().lock())?;
        return Ok(());
    }

    explore(&mut scene, &motion)?;

    if let Some(path) = &opts.save {
        save::save(&scene, path)?;
    }
    Ok(())
}

fn apply_view_overrides(scene: &mut Scene, opts: &Opts) -> anyhow::Result<()> {
    if opts.fov.is_none() && opts.rays.is_none() && opts.rows.is_none() {
        return Ok(());
    }
    let current = scene.camera.view();
    let view = ViewConfig::new(
        opts.fov.unwrap_or(current.fov_deg()),
        opts.rays.unwrap_or(current.ray_count()),
        opts.rows.unwrap_or(current.screen_height()),
    )
    .context("invalid view override")?;
    scene.camera = Camera::new(scene.camera.pos(), scene.camera.heading(), view);
    Ok(())
}

/// Interactive loop: redraw, wait for a key, apply it.
fn explore(scene: &mut Scene, motion: &MotionConfig) -> anyhow::Result<()> {
    let mut display = TerminalDisplay::stdout();
    display.enter()?;

    let mut frame = WallFrame::new();
    let mut screen = ScreenBuffer::default();

    loop {
        let t0 = Instant::now();
        render_walls(&scene.walls, &scene.camera, &mut frame, &mut screen);
        display.present(&screen, &status(&scene.camera))?;
        log::debug!("frame drawn in {:.2} ms", t0.elapsed().as_secs_f64() * 1000.0);

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let (walls, camera) = (&scene.walls, &mut scene.camera);
        match key.code {
            KeyCode::Char('w') => {
                try_step(walls, camera, 1.0, 0.0, motion);
            }
            KeyCode::Char('s') => {
                try_step(walls, camera, -1.0, 0.0, motion);
            }
            KeyCode::Char('a') => {
                try_step(walls, camera, 0.0, 1.0, motion);
            }
            KeyCode::Char('d') => {
                try_step(walls, camera, 0.0, -1.0, motion);
            }
            KeyCode::Char('q') => camera.turn(motion.turn_deg),
            KeyCode::Char('e') => camera.turn(-motion.turn_deg),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
            KeyCode::Esc => break,
            _ => {}
        }
    }

    display.leave()?;
    Ok(())
}

fn status(camera: &Camera) -> String {
    let p = camera.pos();
    // Whole degrees, rounded down: 359.6 must not read as 360.
    format!(
        "Position: ({:.2}, {:.2}) Towards: {}",
        p.x,
        p.y,
        camera.heading().trunc() as u32
    )
}

fn height_range(range: Option<HeightRange>) -> String {
    match range {
        Some(r) => format!("Height range: [{}, {}]", r.min, r.max),
        None => "Height range: none".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn status_rounds_heading_down() {
        let cam = Camera::new(DVec2::new(1.0, -2.5), 359.6, ViewConfig::default());
        assert_eq!(status(&cam), "Position: (1.00, -2.50) Towards: 359");

        let cam = Camera::new(DVec2::ZERO, 89.99, ViewConfig::default());
        assert!(status(&cam).ends_with("Towards: 89"));
    }

    #[test]
    fn height_range_line() {
        assert_eq!(
            height_range(Some(HeightRange { min: 0.5, max: 4.0 })),
            "Height range: [0.5, 4]"
        );
        assert_eq!(height_range(None), "Height range: none");
    }

    #[test]
    fn pitch_needs_box_mode() {
        assert!(Opts::try_parse_from(["yacast", "room.space", "--pitch", "10"]).is_err());
        let opts = Opts::try_parse_from(["yacast", "room.space", "--boxes", "--pitch", "-15"]).unwrap();
        assert!(opts.boxes);
        assert_eq!(opts.pitch, -15.0);
    }
}
