//! Reference manipulation sequence
//!
//! Drives an environment through a fixed series of edits and captures one
//! frame after each:
//!
//! 0. empty canvas
//! 1. `object_a` created and colored blue
//! 2. `object_a` resized to 0.2
//! 3. `object_a` moved to (0.5, -0.55, 1.0)
//! 4. `object_b` created green at (-0.25, 0.25, 0.0) with radius 0.1
//! 5. `object_b` moved to (0.35, -0.35, 1.0), overlapping `object_a`

use std::path::{Path, PathBuf};

use sphereview_core::{Result, Rgba};
use sphereview_environment::Environment;
use tracing::info;

/// Number of frames the sequence produces.
pub const FRAME_COUNT: usize = 6;

pub const OBJECT_A: &str = "object_a";
pub const OBJECT_B: &str = "object_b";

/// Runs the sequence, calling `on_frame` after each step has been flushed.
pub fn run<F>(env: &mut Environment, mut on_frame: F) -> Result<()>
where
    F: FnMut(usize, &Environment) -> Result<()>,
{
    let mut frame = 0usize;
    flush_frame(env, &mut frame, &mut on_frame)?;

    env.initialize_object(OBJECT_A)?
        .set_color(Rgba::opaque(0.0, 0.0, 1.0)?);
    flush_frame(env, &mut frame, &mut on_frame)?;

    env.sphere_mut(OBJECT_A)?.set_radius(0.2)?;
    flush_frame(env, &mut frame, &mut on_frame)?;

    env.sphere_mut(OBJECT_A)?.set_position((0.5, -0.55, 1.0))?;
    flush_frame(env, &mut frame, &mut on_frame)?;

    let b = env.initialize_object(OBJECT_B)?;
    b.set_color(Rgba::opaque(0.0, 1.0, 0.0)?);
    b.set_position((-0.25, 0.25, 0.0))?;
    b.set_radius(0.1)?;
    flush_frame(env, &mut frame, &mut on_frame)?;

    env.sphere_mut(OBJECT_B)?.set_position((0.35, -0.35, 1.0))?;
    flush_frame(env, &mut frame, &mut on_frame)?;

    Ok(())
}

fn flush_frame<F>(env: &mut Environment, frame: &mut usize, on_frame: &mut F) -> Result<()>
where
    F: FnMut(usize, &Environment) -> Result<()>,
{
    env.update()?;
    on_frame(*frame, env)?;
    *frame += 1;
    Ok(())
}

/// Runs the sequence and writes `frame_<n>.png` files into `out_dir`.
pub fn render_frames(env: &mut Environment, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(FRAME_COUNT);
    run(env, |index, env| {
        let path = out_dir.join(format!("frame_{}.png", index));
        env.save_png(&path)?;
        info!(frame = index, path = %path.display(), "frame written");
        written.push(path);
        Ok(())
    })?;
    Ok(written)
}
