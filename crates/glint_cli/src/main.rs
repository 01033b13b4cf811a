mod cli;
mod scene_file;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::Args;
use scene_file::SceneFile;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Glint");

    let mut file = match &args.scene {
        Some(path) => SceneFile::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, rendering the built-in demo");
            SceneFile::demo()?
        }
    };

    if args.width.is_some() || args.height.is_some() {
        let [width, height] = file.resolution;
        file.resolution = [args.width.unwrap_or(width), args.height.unwrap_or(height)];
    }

    let mut scene = file.build().context("Failed to build scene")?;
    if args.sequential {
        let mut settings = *scene.settings();
        settings.parallel = false;
        scene.set_settings(settings);
    }

    scene.render();

    let output = &args.output;
    let written = if args.grayscale {
        let is_bmp = output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("bmp"));
        if !is_bmp {
            bail!("Grayscale output is only written as BMP, got {}", output.display());
        }
        scene.export_grayscale_bmp(output)
    } else {
        scene.pixels().save(output)
    };
    written.with_context(|| format!("Failed to write {}", output.display()))?;

    log::info!("Saved {}", output.display());
    Ok(())
}
