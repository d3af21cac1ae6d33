use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use rtcore::RenderConfig;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Renders the random sphere field to a PPM image.
#[derive(Debug, Parser)]
#[command(name = "rtcore")]
pub struct Args {
    /// Image width in pixels.
    #[arg(long)]
    pub width: Option<usize>,

    /// Aspect ratio, as `W:H` or a decimal.
    #[arg(long, value_parser = parse_aspect)]
    pub aspect: Option<f64>,

    /// Samples per pixel.
    #[arg(short, long)]
    pub samples: Option<usize>,

    /// Maximum number of bounces per sample.
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for scene layout and sampling.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub aperture: Option<f64>,

    #[arg(long)]
    pub focus_dist: Option<f64>,

    /// Vertical field of view in degrees.
    #[arg(long)]
    pub vfov: Option<f64>,

    /// Render on one thread.
    #[arg(long)]
    pub sequential: bool,

    /// Output file. Writes to stdout if omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overrides the global level from `RUST_LOG`. Defaults to info when
    /// neither is set.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

impl Args {
    /// Folds the flags that were given over `base`.
    pub fn apply(&self, base: RenderConfig) -> RenderConfig {
        RenderConfig {
            width: self.width.unwrap_or(base.width),
            aspect: self.aspect.unwrap_or(base.aspect),
            samples: self.samples.unwrap_or(base.samples),
            max_depth: self.max_depth.unwrap_or(base.max_depth),
            seed: self.seed.unwrap_or(base.seed),
            aperture: self.aperture.unwrap_or(base.aperture),
            focus_dist: self.focus_dist.unwrap_or(base.focus_dist),
            vfov: self.vfov.unwrap_or(base.vfov),
            parallel: base.parallel && !self.sequential,
            ..base
        }
    }
}

/// Builds the logger: info by default, then `env_filters` (the `RUST_LOG`
/// syntax), then an explicit `--log-level` on top.
pub fn logger(flag: Option<LogLevel>, env_filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Info);
    if let Some(filters) = env_filters {
        builder.parse_filters(filters);
    }
    if let Some(level) = flag {
        builder.filter_level(level.into());
    }
    builder
}

fn parse_aspect(s: &str) -> Result<f64, String> {
    let parse = |x: &str| {
        x.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad number {:?}: {}", x, e))
    };
    match s.split_once(':') {
        Some((w, h)) => Ok(parse(w)? / parse(h)?),
        None => parse(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_forms() {
        assert_eq!(parse_aspect("3:2"), Ok(1.5));
        assert_eq!(parse_aspect("1.5"), Ok(1.5));
        assert!(parse_aspect("wide").is_err());
        assert!(parse_aspect("16:").is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from(["rtcore", "--width", "64", "--aspect", "16:9", "--sequential"]);
        let config = args.apply(RenderConfig::default());
        assert_eq!(config.width, 64);
        assert_eq!(config.aspect, 16. / 9.);
        assert!(!config.parallel);
        assert_eq!(config.samples, RenderConfig::default().samples);
        assert!(args.log_level.is_none());
    }

    #[test]
    fn env_level_survives_without_flag() {
        assert_eq!(logger(None, None).build().filter(), LevelFilter::Info);
        assert_eq!(logger(None, Some("warn")).build().filter(), LevelFilter::Warn);
        assert_eq!(
            logger(Some(LogLevel::Debug), Some("warn")).build().filter(),
            LevelFilter::Debug
        );
        assert_eq!(
            logger(Some(LogLevel::Error), None).build().filter(),
            LevelFilter::Error
        );
    }

    #[test]
    fn log_level_flag_parses() {
        let args = Args::parse_from(["rtcore", "--log-level", "trace"]);
        assert!(matches!(args.log_level, Some(LogLevel::Trace)));
    }
}
