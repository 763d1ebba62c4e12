use clap::{Parser, Subcommand};
use hs_app::{
    AppResult, CandidateOutcome, CandidateQuery, FeasibleDesign, Objective, SearchOptions,
    SweepRequest, SweepResponse, compile_project, execute_sweep, flow_summary, list_catalog,
    project_service, solve_candidate,
};
use hs_components::PumpTarget;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "hydrosweep")]
#[command(about = "Pipe, heat exchanger and pump sizing for a buried distribution loop", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and values
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// List heat exchangers and pumps in a project
    Catalog {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Show the design flow and the velocity in every candidate pipe
    Flow {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Sweep the design space and report the optimal designs
    Sweep {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Pump selection target (cost or power); defaults to the project's
        #[arg(long)]
        target: Option<PumpTarget>,
        /// Evaluate candidates in parallel
        #[arg(long)]
        parallel: bool,
        /// Write the full report as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only print the optimal designs
        #[arg(short, long)]
        quiet: bool,
    },
    /// Solve one candidate and print per-section detail
    Section {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Outer diameter in inches
        #[arg(long)]
        od: f64,
        /// Pipe schedule (40 or 80)
        #[arg(long, default_value_t = 40)]
        schedule: u32,
        /// Pipe material (Steel or PVC)
        #[arg(long, default_value = "Steel")]
        material: String,
        /// Heat exchanger name
        #[arg(long)]
        hx: String,
        /// Pump selection target (cost or power); defaults to the project's
        #[arg(long)]
        target: Option<PumpTarget>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Catalog { project_path } => cmd_catalog(&project_path),
        Commands::Flow { project_path } => cmd_flow(&project_path),
        Commands::Sweep {
            project_path,
            target,
            parallel,
            output,
            quiet,
        } => cmd_sweep(&project_path, target, parallel, output.as_deref(), quiet),
        Commands::Section {
            project_path,
            od,
            schedule,
            material,
            hx,
            target,
        } => cmd_section(
            &project_path,
            CandidateQuery {
                outer_diameter_in: od,
                schedule,
                material,
                heat_exchanger: hx,
                target,
            },
        ),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    compile_project(&project)?;

    let summary = project_service::summarize_project(&project);
    println!("✓ Project is valid: {}", summary.name);
    println!(
        "  {} sections, {} heat exchangers, {} pumps, {} candidates",
        summary.section_count,
        summary.heat_exchanger_count,
        summary.pump_count,
        summary.candidate_count
    );
    Ok(())
}

fn cmd_catalog(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let runtime = compile_project(&project)?;
    let catalog = list_catalog(&runtime);

    println!("Heat exchangers:");
    for line in &catalog.heat_exchangers {
        println!("  {}", line);
    }
    println!("Pumps:");
    for line in &catalog.pumps {
        println!("  {}", line);
    }
    Ok(())
}

fn cmd_flow(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let runtime = compile_project(&project)?;
    let flow = flow_summary(&runtime)?;

    println!("Annual energy: {:.0} kWh/yr", flow.annual_energy_kwh);
    println!(
        "Design flow:   {:.6} m³/hr ({:.7} m³/s)",
        flow.flow_m3_per_hour, flow.flow_m3_per_s
    );
    println!();
    println!(
        "{:<24} {:>12} {:>12} {:>12}",
        "Pipe", "ID [m]", "v [m/s]", "Rating [m]"
    );
    for pipe in &flow.pipes {
        println!(
            "{:<24} {:>12.5} {:>12.3} {:>12.2}",
            pipe.label, pipe.inner_diameter_m, pipe.velocity_m_per_s, pipe.max_head_m
        );
    }
    Ok(())
}

fn cmd_sweep(
    project_path: &Path,
    target: Option<PumpTarget>,
    parallel: bool,
    output: Option<&Path>,
    quiet: bool,
) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let response = execute_sweep(&SweepRequest {
        project: &project,
        target,
        options: SearchOptions { parallel },
    })?;
    info!(elapsed_s = response.elapsed_s, "sweep complete");

    if !quiet {
        print_outcomes(&response);
        println!();
    }

    println!(
        "✓ {} candidates: {} feasible, {} rejected (target: {}, {:.2}s)",
        response.report.candidate_count,
        response.report.feasible_count,
        response.report.rejected_count,
        response.runtime.target,
        response.elapsed_s
    );
    print_optima(&response);

    if let Some(path) = output {
        response.report.write_json(path)?;
        println!("✓ Report written to {}", path.display());
    }
    Ok(())
}

fn print_outcomes(response: &SweepResponse) {
    println!(
        "{:>4}  {:<24} {:<10} {:>10} {:>14} {:>12} {:>16} {:>10}",
        "#", "Pipe", "HX", "Length", "Capital [$]", "Op [$/hr]", "Lifetime [$]", "Power [kW]"
    );
    for outcome in &response.sweep.outcomes {
        let candidate = outcome.candidate();
        match outcome {
            CandidateOutcome::Feasible(design) => println!(
                "{:>4}  {:<24} {:<10} {:>10.1} {:>14.2} {:>12.2} {:>16.2} {:>10.3}",
                candidate.index,
                candidate.pipe.to_string(),
                candidate.heat_exchanger.name,
                design.totals.length_m,
                design.totals.capital_cost,
                design.totals.operating_cost,
                design.totals.lifetime_cost,
                design.totals.power_kw
            ),
            CandidateOutcome::Rejected { failure, .. } => println!(
                "{:>4}  {:<24} {:<10} ✗ {}",
                candidate.index,
                candidate.pipe.to_string(),
                candidate.heat_exchanger.name,
                failure
            ),
        }
    }
}

fn print_optima(response: &SweepResponse) {
    if response.sweep.optima.is_empty() {
        println!("No feasible design found");
        return;
    }
    for objective in Objective::ALL {
        if let Some(design) = response.sweep.optima.best(objective) {
            println!(
                "  Best {:<15} {:>16.3} {:<5} #{:<4} {}",
                format!("{objective}:"),
                objective.key(&design.totals),
                objective.unit(),
                design.candidate.index,
                design.candidate.label()
            );
        }
    }
}

fn cmd_section(project_path: &Path, query: CandidateQuery) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let (runtime, outcome) = solve_candidate(&project, &query)?;

    println!("Candidate: {}", outcome.candidate().label());
    println!("Target:    {}", runtime.target);

    match outcome {
        CandidateOutcome::Feasible(design) => print_design(&design),
        CandidateOutcome::Rejected { failure, .. } => {
            println!("✗ Rejected ({}): {}", failure.kind(), failure);
            println!("{}", serde_json::to_string_pretty(&failure)?);
        }
    }
    Ok(())
}

fn print_design(design: &FeasibleDesign) {
    println!("Exchanger inlet head: {:.3} m", design.p2_head_m);
    for section in &design.sections {
        let seg0 = &section.segment0;
        let seg1 = &section.segment1;
        println!();
        println!("Section {}", section.route_id);
        println!("  Length of segment 0: {:.3} m", seg0.length.value);
        println!(
            "  Slant:               {:.4} m (unclamped {:.4} m)",
            seg0.slant.value, seg0.raw_slant.value
        );
        println!(
            "  Iterations:          {} (final error {:.2e})",
            seg0.iterations, seg0.final_error
        );
        println!("  Length of segment 1: {:.3} m", seg1.length.value);
        println!("  Head loss:           {:.4} m", seg1.head_loss.value);
        println!("  Pump head:           {:.4} m", seg1.required_head.value);
        println!("  Selected pump:       {}", section.pump.name);
        println!("  Capital cost:        {:.2} $", section.pump.capital_cost);
        println!("  Operating cost:      {:.4} $/hr", section.operating_cost());
        println!("  Lifetime cost:       {:.2} $", section.pump.total_cost());
        println!("  Power:               {:.4} kW", section.power_kw());
    }
    println!();
    let t = &design.totals;
    println!("✓ Total length {:.1} m", t.length_m);
    println!("  Capital {:.2} $, operating {:.4} $/hr", t.capital_cost, t.operating_cost);
    println!("  Lifetime {:.2} $, power {:.4} kW", t.lifetime_cost, t.power_kw);
}
