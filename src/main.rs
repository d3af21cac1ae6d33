use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use rtcore::*;

mod cli;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    cli::logger(args.log_level, std::env::var("RUST_LOG").ok().as_deref()).init();

    let config = args.apply(RenderConfig::default());
    config.validate().context("invalid render settings")?;

    let nx = config.width;
    let ny = config.image_height();

    let world = random_scene(&mut scene_rng(config.seed));
    let camera = config.camera();

    log::info!(
        "rendering {}x{} at {} spp, depth {}",
        nx,
        ny,
        config.samples,
        config.max_depth
    );
    let start = Instant::now();
    let image = if config.parallel {
        par_cast(nx, ny, config.samples, &camera, &world, config.max_depth, config.seed)
    } else {
        cast(nx, ny, config.samples, &camera, &world, config.max_depth, config.seed)
    };
    log::info!("done in {:.2?}", start.elapsed());

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_ppm(&image, &mut out)
                .and_then(|_| out.flush())
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_ppm(&image, &mut out)
                .and_then(|_| out.flush())
                .context("writing to stdout")?;
        }
    }
    Ok(())
}
