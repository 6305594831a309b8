#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the choropleth map tool.
//!
//! Runs the interactive prompts when no subcommand is given.

use std::path::{Path, PathBuf};

use choropleth_cli::{ChoroplethError, MapOptions};
use choropleth_render::RenderConfig;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "choropleth", about = "Choropleth map generator")]
struct Cli {
    /// TOML file with render settings (colors, canvas size, legend title)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the attributes of a dataset
    Attributes {
        /// Path to a `.shp` or `.geojson` file
        path: PathBuf,
    },
    /// Classify an attribute and print the class ranges
    Classify(ClassifyArgs),
    /// Classify an attribute and draw the choropleth map as SVG
    Map {
        #[command(flatten)]
        classify: ClassifyArgs,
        /// Output SVG path (defaults to `<input>_<attribute>.svg`)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ClassifyArgs {
    /// Path to a `.shp` or `.geojson` file
    path: PathBuf,
    /// Quantitative attribute to classify
    #[arg(long, short)]
    attribute: String,
    /// Number of classes
    #[arg(long, short, default_value = "5")]
    classes: usize,
    /// Classification method (`equal_interval` or `quantile`)
    #[arg(long, short, default_value = "equal_interval")]
    method: String,
}

impl ClassifyArgs {
    fn options(&self) -> MapOptions {
        MapOptions {
            attribute: self.attribute.clone(),
            classes: self.classes,
            method: self.method.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };

    let Some(command) = cli.command else {
        return choropleth_cli::interactive::run(&config);
    };

    let outcome = match command {
        Commands::Attributes { path } => print_attributes(&path),
        Commands::Classify(args) => print_classes(&args, &config),
        Commands::Map { classify, output } => {
            let output = output.unwrap_or_else(|| {
                choropleth_cli::default_output_path(&classify.path, &classify.attribute)
            });
            draw(&classify, &output, &config)
        }
    };

    if let Err(e) = outcome {
        log::debug!("{e:?}");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}

fn print_attributes(path: &Path) -> Result<(), ChoroplethError> {
    let features = choropleth_cli::load_dataset(path)?;
    println!(
        "Attributes: {}",
        choropleth_cli::attribute_names(&features).join(", ")
    );
    Ok(())
}

fn print_classes(args: &ClassifyArgs, config: &RenderConfig) -> Result<(), ChoroplethError> {
    let features = choropleth_cli::load_dataset(&args.path)?;
    let result = choropleth_cli::classify(&features, &args.options(), config)?;

    println!("{} ({})", result.attribute, result.method);
    for line in choropleth_cli::legend_lines(&result) {
        println!("  {line}");
    }
    Ok(())
}

fn draw(args: &ClassifyArgs, output: &Path, config: &RenderConfig) -> Result<(), ChoroplethError> {
    let result = choropleth_cli::draw_map(&args.path, output, &args.options(), config)?;

    for line in choropleth_cli::legend_lines(&result) {
        println!("  {line}");
    }
    println!("Map written to {}", output.display());
    Ok(())
}
