//! Binary entry point for the Contagion rollout CLI.
#![forbid(unsafe_code)]

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use contagion::{
    cli::import_export::{run_export, run_import},
    logging::init_logging,
    Component, Config, InfectionReport, SiteVersion, TraversalOrder, UserGraph,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "contagion",
    version,
    about = "Roll a site version out across connected cohorts of users",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "CONTAGION_GRAPH",
        help = "JSON graph description to load"
    )]
    graph: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for structured responses"
    )]
    format: OutputFormat,

    #[arg(
        long,
        global = true,
        default_value = "warn",
        env = "CONTAGION_LOG",
        help = "Tracing filter directive"
    )]
    log_level: String,

    #[command(flatten)]
    engine: EngineArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct EngineArgs {
    #[arg(long, global = true, help = "Walk components breadth-first")]
    breadth_first: bool,

    #[arg(
        long,
        global = true,
        value_name = "CELLS",
        help = "Refuse selection tables larger than this many cells"
    )]
    max_table_cells: Option<usize>,
}

#[derive(Args, Debug)]
struct TotalCmd {
    #[arg(long, value_name = "ID", help = "User the infection starts from")]
    start: String,

    #[arg(long, allow_hyphen_values = true, help = "Site version to serve")]
    version: SiteVersion,

    #[arg(long, value_name = "FILE", help = "Write the updated graph here")]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LimitedCmd {
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Number of users to infect"
    )]
    budget: i64,

    #[arg(long, allow_hyphen_values = true, help = "Site version to serve")]
    version: SiteVersion,

    #[arg(long, value_name = "FILE", help = "Write the updated graph here")]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show user, edge and component counts.
    Stats,
    /// List connected components in discovery order.
    Components,
    /// Infect the whole component of one user.
    Total(TotalCmd),
    /// Infect whole components covering at most the budget.
    Limited(LimitedCmd),
    /// Infect whole components covering exactly the budget.
    Perfect(LimitedCmd),
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct StatsReport {
    users: usize,
    edges: usize,
    components: usize,
    largest_component: usize,
}

#[derive(Serialize)]
struct TotalReport {
    start: String,
    version: SiteVersion,
    infected: usize,
}

#[derive(Serialize)]
struct Outcome<'a, T: Serialize> {
    result: &'a T,
    users: Vec<UserVersion>,
}

#[derive(Serialize)]
struct UserVersion {
    id: String,
    version: SiteVersion,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let path = cli
        .graph
        .as_ref()
        .ok_or("--graph is required (or set CONTAGION_GRAPH)")?;
    let (mut graph, _) = run_import(path, build_config(&cli.engine))?;

    match cli.command {
        Command::Stats => {
            let components = graph.connected_components();
            let report = StatsReport {
                users: graph.size(),
                edges: graph.edge_count(),
                components: components.len(),
                largest_component: components.iter().map(|c| c.size).max().unwrap_or(0),
            };
            emit(cli.format, &report, |r| {
                println!(
                    "users={} edges={} components={} largest_component={}",
                    r.users, r.edges, r.components, r.largest_component
                );
            })?;
        }
        Command::Components => {
            let components = graph.connected_components();
            let graph_ref = &graph;
            emit(cli.format, &components, |list: &Vec<Component>| {
                for c in list {
                    let label = graph_ref.label(c.representative).unwrap_or("?");
                    println!("#{} representative={} size={}", c.index, label, c.size);
                }
            })?;
        }
        Command::Total(cmd) => {
            let start = graph
                .lookup(&cmd.start)
                .ok_or_else(|| format!("unknown user '{}'", cmd.start))?;
            let infected = graph.total_infection(start, cmd.version)?;
            let report = TotalReport {
                start: cmd.start.clone(),
                version: cmd.version,
                infected,
            };
            emit_outcome(cli.format, &graph, &report, |r| {
                println!(
                    "infected {} users from {} with version {}",
                    r.infected, r.start, r.version
                );
            })?;
            save(cmd.output.as_ref(), &graph)?;
        }
        Command::Limited(cmd) => {
            let report = graph.limited_infection(cmd.budget, cmd.version)?;
            emit_outcome(cli.format, &graph, &report, |r| print_infection(&graph, r))?;
            save(cmd.output.as_ref(), &graph)?;
        }
        Command::Perfect(cmd) => {
            let report = graph.perfect_limited_infection(cmd.budget, cmd.version)?;
            emit_outcome(cli.format, &graph, &report, |r| print_infection(&graph, r))?;
            save(cmd.output.as_ref(), &graph)?;
        }
    }
    Ok(())
}

fn build_config(args: &EngineArgs) -> Config {
    let mut config = Config::default();
    if args.breadth_first {
        config.traversal = TraversalOrder::BreadthFirst;
    }
    config.max_table_cells = args.max_table_cells;
    config
}

fn save(output: Option<&PathBuf>, graph: &UserGraph) -> Result<(), Box<dyn Error>> {
    if let Some(path) = output {
        run_export(path, graph)?;
    }
    Ok(())
}

fn print_infection(graph: &UserGraph, report: &InfectionReport) {
    println!(
        "selected {} components, infected {} users (budget {}, version {})",
        report.selected.len(),
        report.infected,
        report.budget,
        report.version
    );
    for c in &report.selected {
        let label = graph.label(c.representative).unwrap_or("?");
        println!("  #{} representative={} size={}", c.index, label, c.size);
    }
}

fn emit<T, F>(format: OutputFormat, value: &T, printer: F) -> Result<(), Box<dyn Error>>
where
    T: Serialize,
    F: FnOnce(&T),
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{json}");
        }
        OutputFormat::Text => printer(value),
    }
    Ok(())
}

fn emit_outcome<T, F>(
    format: OutputFormat,
    graph: &UserGraph,
    result: &T,
    printer: F,
) -> Result<(), Box<dyn Error>>
where
    T: Serialize,
    F: FnOnce(&T),
{
    let users: Vec<UserVersion> = graph
        .users()
        .map(|u| UserVersion {
            id: u.label.clone(),
            version: u.version,
        })
        .collect();
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&Outcome { result, users })?;
            println!("{json}");
        }
        OutputFormat::Text => {
            printer(result);
            for user in users {
                println!("{} {}", user.id, user.version);
            }
        }
    }
    Ok(())
}
