//! `dronify` - CLI for the Open-category compliance checker
//!
//! This binary browses the drone catalogue and reports per-epoch
//! subcategory verdicts for a model and a set of credentials.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;

use dronify::cli::{AssessCommand, Cli, Command, ConfigCommand, ListCommand, ShowCommand};
use dronify::eligibility::{Assessment, Epoch, Evaluator};
use dronify::{init_logging, render, Catalogue, Config, Taxonomy};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::List(list_cmd) => handle_list(&config, &list_cmd),
        Command::Show(show_cmd) => handle_show(&config, &show_cmd),
        Command::Assess(assess_cmd) => handle_assess(&config, &assess_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let catalogue = Catalogue::load(config.catalogue_path())?;
    let taxonomy = Taxonomy::load(config.taxonomy_path())?;

    match (&cmd.segment, &cmd.series) {
        (None, _) => list_segments(&taxonomy, cmd.json),
        (Some(segment), None) => list_series(&taxonomy, &catalogue, segment, cmd.json),
        (Some(segment), Some(series)) => list_models(&catalogue, segment, series, cmd.json),
    }
}

fn list_segments(taxonomy: &Taxonomy, json: bool) -> anyhow::Result<()> {
    if json {
        let segments: Vec<_> = taxonomy
            .segments
            .iter()
            .map(|s| serde_json::json!({ "key": s.key, "label": s.label }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&segments)?);
    } else {
        println!("Segments:");
        for segment in &taxonomy.segments {
            println!("  {:<12} {}", segment.key, segment.label);
        }
    }
    Ok(())
}

fn list_series(
    taxonomy: &Taxonomy,
    catalogue: &Catalogue,
    segment: &str,
    json: bool,
) -> anyhow::Result<()> {
    let Some(segment) = taxonomy.segment(segment) else {
        println!("No segment matching '{segment}'.");
        println!("Known segments:");
        for known in &taxonomy.segments {
            println!("  {}", known.key);
        }
        return Ok(());
    };

    let present = segment.series_present(catalogue);
    if json {
        let series: Vec<_> = present
            .iter()
            .map(|s| serde_json::json!({ "key": s.key, "label": s.label }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&series)?);
    } else {
        println!("Series in {}:", segment.label);
        for series in present {
            println!("  {:<12} {}", series.key, series.label);
        }
    }
    Ok(())
}

fn list_models(
    catalogue: &Catalogue,
    segment: &str,
    series: &str,
    json: bool,
) -> anyhow::Result<()> {
    let models = catalogue.models_in(segment, series);
    if models.is_empty() {
        println!("No models in segment '{segment}', series '{series}'.");
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
    } else {
        for model in models {
            let mass = model
                .mtom_g_nominal
                .map_or_else(|| "-".to_string(), |m| format!("{m} g"));
            let eu = model.eu_class_marking.map_or("-", |c| c.as_str());
            let uk = model.uk_class_marking.map_or("-", |c| c.as_str());
            println!(
                "  {:<24} {:<24} EU {eu:<4} UK {uk:<4} {mass}",
                model.model_key, model.marketing_name
            );
        }
    }
    Ok(())
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let catalogue = Catalogue::load(config.catalogue_path())?;

    let Some(record) = catalogue.get(&cmd.model) else {
        print_unknown_model(&catalogue, &cmd.model);
        return Ok(());
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        print!("{}", render::render_record(record));
    }
    Ok(())
}

fn handle_assess(config: &Config, cmd: &AssessCommand) -> anyhow::Result<()> {
    let catalogue = Catalogue::load(config.catalogue_path())?;

    let Some(record) = catalogue.get(&cmd.model) else {
        print_unknown_model(&catalogue, &cmd.model);
        return Ok(());
    };

    let evaluator = Evaluator::with_thresholds(config.rules);
    let credentials = cmd.credentials();
    let entries: Vec<(Epoch, Assessment)> = cmd
        .epochs()
        .into_iter()
        .map(|epoch| (epoch, evaluator.evaluate(record, credentials, epoch)))
        .collect();

    if cmd.json {
        let report = render::AssessmentReport::new(record, &entries);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render::render_grid(record, &entries));
    }
    Ok(())
}

/// Unknown model keys are not an error: fall back to showing what exists.
fn print_unknown_model(catalogue: &Catalogue, key: &str) {
    println!("No drone matching model key '{key}'.");
    println!("Known model keys:");
    for known in catalogue.model_keys() {
        println!("  {known}");
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Data]");
                println!("  Catalogue:     {}", config.catalogue_path().display());
                println!("  Taxonomy:      {}", config.taxonomy_path().display());
                println!();
                println!("[Rules]");
                println!("  ID exemption below:    {} g", config.rules.id_exempt_below_g);
                println!("  A1 mass limit:         {} g", config.rules.a1_mass_limit_g);
                println!(
                    "  A2 transitional limit: {} g",
                    config.rules.a2_transitional_limit_g
                );
                println!(
                    "  A2 bridge mass limit:  {} g",
                    config.rules.a2_bridge_mass_limit_g
                );
                println!("  A3 mass limit:         {} g", config.rules.a3_mass_limit_g);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
