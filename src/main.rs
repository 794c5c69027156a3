use bbmap::cli::{Cli, Commands};
use bbmap::config::Config;
use bbmap::error::Result;
use bbmap::taxonomy::Taxonomy;
use bbmap::{ingest, pipeline};
use clap::Parser;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Classify { input, output, json } => {
            if let Some(path) = input {
                config.platforms_file = path;
            }
            set_output_dir(&mut config, output);
            run_classify(&config, cli.verbose, json.as_deref())?;
        }

        Commands::MapTargets { input, output, json } => {
            if let Some(path) = input {
                config.targets_file = path;
            }
            set_output_dir(&mut config, output);
            run_map_targets(&config, cli.verbose, json.as_deref())?;
        }

        Commands::Run { output } => {
            set_output_dir(&mut config, output);
            run_classify(&config, cli.verbose, None)?;
            println!();
            run_map_targets(&config, cli.verbose, None)?;
        }
    }

    Ok(())
}

fn set_output_dir(config: &mut Config, output: Option<PathBuf>) {
    if let Some(dir) = output {
        config.output_dir = dir;
    }
}

fn run_classify(config: &Config, verbose: bool, json: Option<&Path>) -> Result<()> {
    println!("🏗️ bbmap - B&B segment classification\n");
    let taxonomy = Taxonomy::construction();

    println!("[1/2] Classifying {}...", config.platforms_file.display());
    let outcome = pipeline::run_classify(config, &taxonomy)?;
    println!(
        "✔ {} companies across {} segments, {} investors\n",
        outcome.companies.len(),
        outcome.distinct_segments(),
        outcome.distinct_investors()
    );

    if let Some(count) =
        ingest::count_investors(&config.investors_file, config.investors_header_row)
    {
        println!("- Investor register lists {} investors", count);
    }

    if verbose {
        for (segment, count) in &outcome.segment_stats {
            println!("  {:>4}  {}", count, segment);
        }
        println!();
    }

    println!("[2/2] Writing outputs...");
    pipeline::write_classify_outputs(config, &outcome, &taxonomy)?;
    println!("✔ Workbook: {}", config.initiatives_workbook().display());
    println!("✔ Keywords: {}", config.segments_csv().display());
    println!("✔ Report:   {}", config.initiatives_html().display());

    if let Some(path) = json {
        std::fs::write(path, serde_json::to_string_pretty(&outcome)?)?;
        println!("✔ JSON:     {}", path.display());
    }

    println!("\n✅ Classification complete");
    Ok(())
}

fn run_map_targets(config: &Config, verbose: bool, json: Option<&Path>) -> Result<()> {
    println!("🎯 bbmap - target mapping\n");
    let taxonomy = Taxonomy::construction();

    println!("[1/2] Mapping {}...", config.targets_file.display());
    let outcome = pipeline::run_map_targets(config, &taxonomy)?;
    println!(
        "✔ {} of {} targets mapped ({} unmapped NACE, {} general only)\n",
        outcome.targets.len(),
        outcome.total_loaded,
        outcome.dropped_unmapped,
        outcome.dropped_general
    );

    if verbose {
        for target in outcome.targets.iter().take(20) {
            println!(
                "  {:>5.1}%  {} [{} / {}]",
                target.exit_probability, target.name, target.segment, target.subcategory
            );
        }
        println!();
    }

    println!("[2/2] Writing outputs...");
    pipeline::write_targets_outputs(config, &outcome)?;
    println!("✔ Report:   {}", config.targets_html().display());
    println!("✔ Workbook: {}", config.targets_workbook().display());

    if let Some(path) = json {
        std::fs::write(path, serde_json::to_string_pretty(&outcome)?)?;
        println!("✔ JSON:     {}", path.display());
    }

    println!("\n✅ Target mapping complete");
    Ok(())
}
