//! # Hearth CLI
//!
//! Command-line front end for the heat-loss and furnace sizing engine.
//!
//! ```bash
//! hearth evaluate --area 120 --t-out -30 --species birch --report-dir reports
//! hearth evaluate --input room.json --json
//! hearth evaluate --interactive
//! hearth catalog
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hearth_core::calculations::burn::BURN_DURATION_OPTIONS_H;
use hearth_core::calculations::recommendation::Recommendation;
use hearth_core::calculations::wall::{WallConstruction, WOOL_THICKNESS_OPTIONS_CM};
use hearth_core::materials::{FirewoodSpecies, WallMaterial};
use hearth_core::{
    evaluate, load_catalog, load_input, render_report, save_report, Catalog, Evaluation,
    EvaluationInput, ReportOptions,
};

#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "Room heat loss and wood-furnace sizing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate heat loss and recommend a furnace
    Evaluate(EvaluateArgs),
    /// List the furnace catalog
    Catalog {
        /// TOML catalog to list instead of the builtin one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// List wall materials and firewood species
    Materials,
}

#[derive(clap::Args)]
struct EvaluateArgs {
    /// JSON file with the input set; flags below override its fields
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Ask for each value on the terminal
    #[arg(long, conflicts_with = "input")]
    interactive: bool,

    /// Floor area, m²
    #[arg(long)]
    area: Option<f64>,

    /// Ceiling height, m
    #[arg(long)]
    height: Option<f64>,

    /// Wall construction (brick, aerated-concrete, timber, sandwich-panel, clad-mineral-wool)
    #[arg(long)]
    construction: Option<String>,

    /// Wall thickness, or insulation thickness for clad mineral wool, cm
    #[arg(long)]
    thickness: Option<f64>,

    /// Indoor temperature, °C
    #[arg(long)]
    t_in: Option<f64>,

    /// Outdoor temperature, °C
    #[arg(long, allow_hyphen_values = true)]
    t_out: Option<f64>,

    /// Firewood species (softwood, birch, oak)
    #[arg(long)]
    species: Option<String>,

    /// Firebox fill, %
    #[arg(long)]
    fill: Option<f64>,

    /// Furnace efficiency, %
    #[arg(long)]
    efficiency: Option<f64>,

    /// Burn duration of one charge, h
    #[arg(long)]
    burn_hours: Option<f64>,

    /// Floor thermal resistance, m²·K/W
    #[arg(long)]
    floor_r: Option<f64>,

    /// Ceiling thermal resistance, m²·K/W
    #[arg(long)]
    ceiling_r: Option<f64>,

    /// TOML furnace catalog to use instead of the builtin one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print the full evaluation as JSON
    #[arg(long)]
    json: bool,

    /// Print the burn curve of the recommended model
    #[arg(long)]
    curve: bool,

    /// Save the report into this directory
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Leave the per-model table and formulas out of the saved report
    #[arg(long)]
    summary: bool,
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(&format!("{} [{}]: ", prompt, default))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Ask for every field, offering the current value as default
fn prompt_input(base: EvaluationInput) -> EvaluationInput {
    let construction = prompt_line(&format!("Wall construction [{}]: ", base.construction))
        .map(|s| WallConstruction::from_name_or_default(&s))
        .unwrap_or(base.construction);

    let thickness_prompt = if construction.is_composite() {
        format!("Insulation thickness, cm {:?}", WOOL_THICKNESS_OPTIONS_CM)
    } else {
        "Wall thickness, cm".to_string()
    };

    EvaluationInput {
        area_m2: prompt_f64("Floor area, m²", base.area_m2),
        height_m: prompt_f64("Ceiling height, m", base.height_m),
        construction,
        thickness_cm: prompt_f64(&thickness_prompt, base.thickness_cm),
        t_in_c: prompt_f64("Indoor temperature, °C", base.t_in_c),
        t_out_c: prompt_f64("Outdoor temperature, °C", base.t_out_c),
        species: prompt_line(&format!("Firewood [{}]: ", base.species))
            .map(|s| FirewoodSpecies::from_str_flexible(&s).unwrap_or(base.species))
            .unwrap_or(base.species),
        fill_percent: prompt_f64("Firebox fill, %", base.fill_percent),
        efficiency_percent: prompt_f64("Furnace efficiency, %", base.efficiency_percent),
        burn_hours: prompt_f64(
            &format!("Burn duration, h {:?}", BURN_DURATION_OPTIONS_H),
            base.burn_hours,
        ),
        ..base
    }
}

/// Apply command-line overrides onto `base`
fn apply_flags(mut input: EvaluationInput, args: &EvaluateArgs) -> Result<EvaluationInput> {
    if let Some(name) = &args.construction {
        input.construction = WallConstruction::from_str_flexible(name)
            .with_context(|| format!("unknown wall construction '{}'", name))?;
    }
    if let Some(name) = &args.species {
        input.species = FirewoodSpecies::from_str_flexible(name)
            .with_context(|| format!("unknown firewood species '{}'", name))?;
    }

    let overrides = [
        (args.area, &mut input.area_m2),
        (args.height, &mut input.height_m),
        (args.thickness, &mut input.thickness_cm),
        (args.t_in, &mut input.t_in_c),
        (args.t_out, &mut input.t_out_c),
        (args.fill, &mut input.fill_percent),
        (args.efficiency, &mut input.efficiency_percent),
        (args.burn_hours, &mut input.burn_hours),
        (args.floor_r, &mut input.floor_r),
        (args.ceiling_r, &mut input.ceiling_r),
    ];
    for (value, field) in overrides {
        if let Some(v) = value {
            *field = v;
        }
    }
    Ok(input)
}

fn print_evaluation(input: &EvaluationInput, evaluation: &Evaluation, show_curve: bool) {
    println!("═══════════════════════════════════════");
    println!("  HEAT LOSS");
    println!("═══════════════════════════════════════");
    println!("  Room:      {:.1} m² × {:.1} m, {}", input.area_m2, input.height_m, input.construction);
    println!("  Wall R:    {:.3} m²·K/W", evaluation.wall.total_resistance);
    println!("  Walls:     {:.0} W", evaluation.heat_loss.walls_w);
    println!("  Floor:     {:.0} W", evaluation.heat_loss.floor_w);
    println!("  Ceiling:   {:.0} W", evaluation.heat_loss.ceiling_w);
    println!("  Total:     {:.2} kW", evaluation.heat_loss.total_kw);
    println!("  Required:  {:.2} kW (with margin)", evaluation.required_load_kw);
    println!();
    println!("  {:<14} {:>8} {:>10} {:>10}", "Model", "Vol, L", "Avg, kW", "Peak, kW");
    for run in &evaluation.runs {
        println!(
            "  {:<14} {:>8.0} {:>10.2} {:>10.2}",
            run.name(),
            run.model.volume_l,
            run.average_power_kw(),
            run.burn.peak_power_kw
        );
    }
    println!();
    println!("═══════════════════════════════════════");
    match &evaluation.recommendation {
        Recommendation::Single {
            model,
            average_power_kw,
            refuel_interval_h,
        } => {
            println!("  RECOMMENDED: {} ({:.2} kW average)", model, average_power_kw);
            println!("  Refuel every {:.1} h", refuel_interval_h);
        }
        Recommendation::Cascade(cascade) => {
            println!("  No single model suffices");
            println!(
                "  CASCADE: {} ({:.2} kW combined)",
                cascade.descriptor(),
                cascade.total_average_power_kw()
            );
        }
        Recommendation::None => println!("  No recommendation"),
    }
    println!("═══════════════════════════════════════");

    if show_curve {
        if let Some(run) = evaluation.recommended_run() {
            println!();
            println!("  Burn curve, {}:", run.name());
            for sample in &run.burn.curve.samples {
                let marker = if sample.power_kw >= evaluation.required_load_kw { "" } else { "  < load" };
                println!("  {:>5.1} h  {:>8.2} kW{}", sample.time_h, sample.power_kw, marker);
            }
        }
    }
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    let base = match &args.input {
        Some(path) => load_input(path).with_context(|| format!("reading input {}", path.display()))?,
        None => EvaluationInput::default(),
    };
    let base = if args.interactive { prompt_input(base) } else { base };
    let input = apply_flags(base, &args)?;

    let custom_catalog = match &args.catalog {
        Some(path) => Some(load_catalog(path).with_context(|| format!("reading catalog {}", path.display()))?),
        None => None,
    };
    let catalog = custom_catalog.as_ref().unwrap_or(Catalog::builtin());

    let evaluation = evaluate(&input, catalog).context("evaluation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        print_evaluation(&input, &evaluation, args.curve);
    }

    if let Some(dir) = &args.report_dir {
        let options = if args.summary {
            ReportOptions::summary()
        } else {
            ReportOptions::default()
        }
        .stamped();
        let text = render_report(&input, &evaluation, &options);
        let path = save_report(dir, &input, &text).context("saving report")?;
        if !args.json {
            println!();
            println!("Report saved to {}", path.display());
        }
    }

    Ok(())
}

fn run_catalog(path: Option<PathBuf>) -> Result<()> {
    let loaded = match &path {
        Some(p) => Some(load_catalog(p).with_context(|| format!("reading catalog {}", p.display()))?),
        None => None,
    };
    let catalog = loaded.as_ref().unwrap_or(Catalog::builtin());

    println!("{:<14} {:>8} {:>12}", "Model", "Vol, L", "Flue ducts");
    for model in catalog.iter() {
        println!(
            "{:<14} {:>8.0} {:>6} × {:.0} mm",
            model.name, model.volume_l, model.duct_count, model.duct_diameter_mm
        );
    }
    Ok(())
}

fn run_materials() {
    println!("Wall materials (λ, W/(m·K)):");
    for material in WallMaterial::ALL {
        println!("  {:<28} {:>7.3}", material.display_name(), material.conductivity());
    }
    println!();
    println!("Wall constructions:");
    for construction in WallConstruction::ALL {
        println!("  {}", construction);
    }
    println!();
    println!("Firewood (ρ kg/m³, q MJ/kg):");
    for species in FirewoodSpecies::ALL {
        println!(
            "  {:<28} {:>5.0} {:>6.1}",
            species.display_name(),
            species.density_kg_m3(),
            species.specific_energy_mj_kg()
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearth_core=info,hearth=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate(args) => run_evaluate(args)?,
        Commands::Catalog { catalog } => run_catalog(catalog)?,
        Commands::Materials => run_materials(),
    }

    Ok(())
}
