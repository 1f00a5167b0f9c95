// ──────────────────────────────────────────────────────────────────────────
// save/scene_file.rs
//
//   Viewpoint <fov> <rays> <rows> <x> <y> <heading>     (header, optional)
//   Wall <x1> <y1> <x2> <y2>                            (zero or more)
//   Box <x1> <y1> <z1> <x2> <y2> <z2> <brightness>     (zero or more)
//
//   *   Whitespace separated, one record per line.
//   *   Unknown leading tokens and blank lines are skipped silently.
//   *   A recognised record that does not parse is skipped with a warning.
// ──────────────────────────────────────────────────────────────────────────

use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    str::{FromStr, SplitWhitespace},
};

use glam::{DVec2, DVec3};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    config::{ConfigError, ViewConfig},
    world::{Camera, GeometryError, Scene},
};

const VIEWPOINT: &str = "Viewpoint";
const WALL: &str = "Wall";
const BOX: &str = "Box";

/*──────────────────────────── Error types ──────────────────────────*/

#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("cannot read scene file `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write scene file `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A record that was skipped while loading.  Loading carries on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadWarning {
    #[error("line {line}: `{record}` record has a missing or malformed `{field}`")]
    Malformed {
        line: usize,
        record: &'static str,
        field: &'static str,
    },

    #[error("line {line}: viewpoint ignored, {source}")]
    View {
        line: usize,
        #[source]
        source: ConfigError,
    },

    #[error("line {line}: wall ignored, {source}")]
    Wall {
        line: usize,
        #[source]
        source: GeometryError,
    },

    #[error("line {line}: box ignored, {source}")]
    Box {
        line: usize,
        #[source]
        source: GeometryError,
    },
}

/// Files rarely carry more than a couple of bad lines.
pub type Warnings = SmallVec<[LoadWarning; 4]>;

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// Build a scene from scene-file text.
///
/// Never fails: bad records are reported in the returned warnings and the
/// scene keeps whatever parsed.  Without a usable header the camera is
/// `Scene::default()`'s.  When several headers appear the last one wins.
pub fn parse(text: &str) -> (Scene, Warnings) {
    let mut scene = Scene::default();
    let mut warnings = Warnings::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let mut tokens = raw.split_whitespace();
        let outcome = match tokens.next() {
            Some(VIEWPOINT) => parse_viewpoint(line, &mut tokens, &mut scene),
            Some(WALL) => parse_wall(line, &mut tokens, &mut scene),
            Some(BOX) => parse_box(line, &mut tokens, &mut scene),
            _ => Ok(()),
        };
        if let Err(w) = outcome {
            log::warn!("{w}");
            warnings.push(w);
        }
    }

    (scene, warnings)
}

/// Serialise `scene`.  Numbers use the shortest form that parses back to the
/// same `f64`, so `parse(write(s)) == s`.
pub fn write<W: Write>(scene: &Scene, out: &mut W) -> io::Result<()> {
    let cam = &scene.camera;
    let view = cam.view();
    writeln!(
        out,
        "{VIEWPOINT} {} {} {} {} {} {}",
        view.fov_deg(),
        view.ray_count(),
        view.screen_height(),
        cam.pos().x,
        cam.pos().y,
        cam.heading()
    )?;
    for wall in &scene.walls {
        writeln!(out, "{WALL} {} {} {} {}", wall.a.x, wall.a.y, wall.b.x, wall.b.y)?;
    }
    for b in &scene.boxes {
        writeln!(
            out,
            "{BOX} {} {} {} {} {} {} {}",
            b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z, b.brightness
        )?;
    }
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> Result<(Scene, Warnings), SceneFileError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SceneFileError::Read {
        path: path.to_owned(),
        source,
    })?;
    let (scene, warnings) = parse(&text);
    log::info!(
        "loaded `{}`: {} walls, {} boxes, {} warnings",
        path.display(),
        scene.walls.len(),
        scene.boxes.len(),
        warnings.len()
    );
    Ok((scene, warnings))
}

pub fn save(scene: &Scene, path: impl AsRef<Path>) -> Result<(), SceneFileError> {
    let path = path.as_ref();
    let to_err = |source| SceneFileError::Write {
        path: path.to_owned(),
        source,
    };
    let mut out = BufWriter::new(fs::File::create(path).map_err(to_err)?);
    write(scene, &mut out)
        .and_then(|()| out.flush())
        .map_err(to_err)?;
    log::info!(
        "saved `{}`: {} walls, {} boxes",
        path.display(),
        scene.walls.len(),
        scene.boxes.len()
    );
    Ok(())
}

/*====================================================================*/
/*                       Record parsers                               */
/*====================================================================*/

/// Pull the next token and parse it, naming the field on failure.
fn field<T: FromStr>(
    tokens: &mut SplitWhitespace<'_>,
    line: usize,
    record: &'static str,
    field: &'static str,
) -> Result<T, LoadWarning> {
    tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or(LoadWarning::Malformed {
            line,
            record,
            field,
        })
}

fn parse_viewpoint(
    line: usize,
    tokens: &mut SplitWhitespace<'_>,
    scene: &mut Scene,
) -> Result<(), LoadWarning> {
    let fov: f64 = field(tokens, line, VIEWPOINT, "angle")?;
    let rays: usize = field(tokens, line, VIEWPOINT, "line count")?;
    let rows: usize = field(tokens, line, VIEWPOINT, "screen height")?;
    let x: f64 = field(tokens, line, VIEWPOINT, "x")?;
    let y: f64 = field(tokens, line, VIEWPOINT, "y")?;
    let heading: f64 = field(tokens, line, VIEWPOINT, "towards")?;

    for (name, v) in [("x", x), ("y", y), ("towards", heading)] {
        if !v.is_finite() {
            return Err(LoadWarning::Malformed {
                line,
                record: VIEWPOINT,
                field: name,
            });
        }
    }

    // A bad view still leaves a usable pose.
    let view = match ViewConfig::new(fov, rays, rows) {
        Ok(view) => view,
        Err(source) => {
            scene.camera = Camera::new(DVec2::new(x, y), heading, *scene.camera.view());
            return Err(LoadWarning::View { line, source });
        }
    };
    scene.camera = Camera::new(DVec2::new(x, y), heading, view);
    Ok(())
}

fn parse_wall(
    line: usize,
    tokens: &mut SplitWhitespace<'_>,
    scene: &mut Scene,
) -> Result<(), LoadWarning> {
    let x1 = field(tokens, line, WALL, "x1")?;
    let y1 = field(tokens, line, WALL, "y1")?;
    let x2 = field(tokens, line, WALL, "x2")?;
    let y2 = field(tokens, line, WALL, "y2")?;
    scene
        .walls
        .add_segment(x1, y1, x2, y2)
        .map(|_| ())
        .map_err(|source| LoadWarning::Wall { line, source })
}

fn parse_box(
    line: usize,
    tokens: &mut SplitWhitespace<'_>,
    scene: &mut Scene,
) -> Result<(), LoadWarning> {
    let min = DVec3::new(
        field(tokens, line, BOX, "x1")?,
        field(tokens, line, BOX, "y1")?,
        field(tokens, line, BOX, "z1")?,
    );
    let max = DVec3::new(
        field(tokens, line, BOX, "x2")?,
        field(tokens, line, BOX, "y2")?,
        field(tokens, line, BOX, "z2")?,
    );
    let brightness = field(tokens, line, BOX, "brightness")?;
    scene
        .boxes
        .add_box(min, max, brightness)
        .map(|_| ())
        .map_err(|source| LoadWarning::Box { line, source })
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
