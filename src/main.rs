use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use urbanistika::engine::evaluate;
use urbanistika::export::{export_csv, export_json, render_text};
use urbanistika::model::{ParkingScenario, ProjectInputs, UnitsMode};
use urbanistika::parser::{load_project_file, to_project_json};
use urbanistika::ui::App;

#[derive(Parser, Debug)]
#[command(name = "urbanistika")]
#[command(about = "Urbanistika - urban-planning and investment feasibility calculator")]
#[command(version)]
struct Args {
    /// Path to project JSON file
    #[arg(required_unless_present = "template")]
    file: Option<PathBuf>,

    /// Override the parking scenario (BASEMENT_1, BASEMENT_1_PLUS_SURFACE, BASEMENT_2)
    #[arg(long)]
    scenario: Option<ParkingScenario>,

    /// Override the units mode (AUTO, MANUAL)
    #[arg(long)]
    units_mode: Option<UnitsMode>,

    /// Manual unit count (implies MANUAL unless --units-mode says otherwise)
    #[arg(long, value_name = "N")]
    units: Option<u32>,

    /// Export to CSV (optional output path)
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Export to JSON (optional output path)
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Print a plain-text report instead of opening the dashboard
    #[arg(long)]
    summary: bool,

    /// Print the reference project file and exit
    #[arg(long, conflicts_with = "file")]
    template: bool,
}

impl Args {
    fn apply_overrides(&self, inputs: &mut ProjectInputs) {
        if let Some(scenario) = self.scenario {
            inputs.scenario = scenario;
        }
        if let Some(units) = self.units {
            inputs.program.manual_unit_count = Some(units);
            inputs.program.mode = UnitsMode::Manual;
        }
        if let Some(mode) = self.units_mode {
            inputs.program.mode = mode;
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    if args.template {
        println!("{}", to_project_json(&ProjectInputs::default())?);
        return Ok(());
    }

    let Some(path) = &args.file else {
        return Ok(());
    };
    let mut inputs = load_project_file(path)?;
    args.apply_overrides(&mut inputs);
    tracing::info!(path = %path.display(), scenario = %inputs.scenario, "loaded project");

    let result = evaluate(&inputs)?;

    if let Some(csv_path) = &args.csv {
        export_csv(&inputs, &result, csv_path)?;
        println!("Exported to CSV: {}", csv_path.display());
    }

    if let Some(json_path) = &args.json {
        export_json(&inputs, &result, json_path)?;
        println!("Exported to JSON: {}", json_path.display());
    }

    if args.summary {
        print!("{}", render_text(&inputs, &result));
    }

    if args.csv.is_some() || args.json.is_some() || args.summary {
        return Ok(());
    }

    let terminal = ratatui::init();
    let outcome = App::new(inputs).run(terminal);
    ratatui::restore();
    outcome
}
