extern crate clap;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use error_stack::{Report, ResultExt};
use log::info;

use smoothline::config::SimplifyConfig;
use smoothline::deviation::ErrorMetric;
use smoothline::error::{CliError, ConfigError};
use smoothline::polyline_io::{read_points, write_points, write_points_csv};
use smoothline::simplify::{simplify_with, Selection, SimplifyOptions};

#[derive(Parser)]
#[clap(version, about = "Remove polyline points that deviate less than a tolerance")]
struct Opts {
    /// Input polyline (.csv with x,y header, or .geojson LineString)
    input: PathBuf,

    /// Maximum permissible deviation of a removed point
    #[clap(short, long)]
    tolerance: Option<f64>,

    /// Stop after removing this many points
    #[clap(short, long)]
    max_steps: Option<usize>,

    /// Range error used to score points
    #[clap(long, value_enum)]
    metric: Option<ErrorMetric>,

    /// Candidate selection strategy
    #[clap(long, value_enum)]
    selection: Option<Selection>,

    /// JSON file with default options
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Output path (.csv or .geojson), CSV on stdout when omitted
    #[clap(short, long)]
    output: Option<PathBuf>,
}

impl Opts {
    /// Flag values as a config layer; unset flags stay `None`.
    fn overrides(&self) -> SimplifyConfig {
        SimplifyConfig {
            tolerance: self.tolerance,
            max_steps: self.max_steps,
            metric: self.metric,
            selection: self.selection,
        }
    }

    fn resolve(&self) -> Result<SimplifyOptions, Report<ConfigError>> {
        let file_config = match &self.config {
            Some(path) => SimplifyConfig::load(path)?,
            None => SimplifyConfig::default(),
        };
        file_config.merge(self.overrides()).into_options()
    }
}

fn main() -> Result<(), Report<CliError>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts: Opts = Opts::parse();

    let options = opts.resolve().change_context(CliError)?;

    let points = read_points(&opts.input).change_context(CliError)?;
    info!("read {} points from {}", points.len(), opts.input.display());

    let result = simplify_with(&points, &options);
    info!(
        "kept {} of {} points after {} steps, stopped: {:?}",
        result.points.len(), points.len(), result.steps, result.stop
    );

    match &opts.output {
        Some(path) => {
            let mut properties = serde_json::Map::new();
            properties.insert(String::from("tolerance"), serde_json::Value::from(options.tolerance));
            properties.insert(String::from("metric"), serde_json::to_value(options.metric).change_context(CliError)?);
            properties.insert(String::from("original_points"), serde_json::Value::from(points.len()));
            properties.insert(String::from("kept_points"), serde_json::Value::from(result.points.len()));
            properties.insert(String::from("steps"), serde_json::Value::from(result.steps));
            properties.insert(String::from("stop"), serde_json::to_value(result.stop).change_context(CliError)?);

            write_points(path, &result.points, properties).change_context(CliError)?;
            info!("wrote {}", path.display());
        }
        None => write_points_csv(io::stdout().lock(), &result.points).change_context(CliError)?,
    }

    Ok(())
}
