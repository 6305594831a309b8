//! Interactive prompts for drawing a map.
//!
//! Walks the user through picking a dataset, an attribute, a class count,
//! and a classification method with `dialoguer`, then renders the map.
//! Input mistakes are reported and the user may try again.

use std::path::PathBuf;

use choropleth_classify_models::ClassMethod;
use choropleth_render::RenderConfig;
use dialoguer::{Confirm, Input, Select};

use crate::{MapOptions, attribute_names, default_output_path, load_dataset};

/// Runs the interactive session.
///
/// # Errors
///
/// Returns an error if reading from the terminal fails. Dataset and
/// classification problems are printed instead of returned.
pub fn run(config: &RenderConfig) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        println!();
        draw_one(config)?;

        let again = Confirm::new()
            .with_prompt("Draw another map?")
            .default(false)
            .interact()?;
        if !again {
            return Ok(());
        }
    }
}

fn draw_one(config: &RenderConfig) -> Result<(), Box<dyn std::error::Error>> {
    let path: String = Input::new()
        .with_prompt("Enter the path to a .shp or .geojson file")
        .interact_text()?;
    let path = PathBuf::from(path.trim());

    let features = match load_dataset(&path) {
        Ok(features) => features,
        Err(e) => {
            log::debug!("{e:?}");
            println!("{}", e.user_message());
            return Ok(());
        }
    };

    println!();
    println!("Attributes: {}", attribute_names(&features).join(", "));

    let attribute: String = Input::new()
        .with_prompt("Enter a quantitative attribute to classify")
        .interact_text()?;

    let classes: usize = Input::new()
        .with_prompt(format!(
            "Enter the number of classes (1-{})",
            config.capacity()
        ))
        .interact_text()?;

    let labels: Vec<&str> = ClassMethod::all().iter().map(|m| m.label()).collect();
    let idx = Select::new()
        .with_prompt("Select the classification method")
        .items(&labels)
        .default(0)
        .interact()?;
    let method = ClassMethod::all()[idx];

    let options = MapOptions {
        attribute: attribute.trim().to_string(),
        classes,
        method: method.to_string(),
    };

    let result = match crate::classify(&features, &options, config) {
        Ok(result) => result,
        Err(e) => {
            log::debug!("{e:?}");
            println!("{}", e.user_message());
            return Ok(());
        }
    };

    for line in crate::legend_lines(&result) {
        println!("  {line}");
    }

    let output: String = Input::new()
        .with_prompt("Output SVG path")
        .default(
            default_output_path(&path, &options.attribute)
                .display()
                .to_string(),
        )
        .interact_text()?;
    let output = PathBuf::from(output.trim());

    match choropleth_render::write_svg(&output, &features, &result, config) {
        Ok(()) => println!("Map written to {}", output.display()),
        Err(e) => println!("Failed to write map: {e}"),
    }

    Ok(())
}
