//! Feng Shui Planner CLI
//!
//! Usage:
//!   fengshui-planner [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>  Planner configuration (TOML format)
//!   -j, --json           Print the full result as JSON
//!   --json-input         Read the request as JSON even without a .json extension
//!   --uuid-ids           Use random UUIDs for layout ids
//!   -v, --verbose        More logging (-v, -vv, -vvv)
//!   -h, --help           Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use fengshui_planner::request::is_json_path;
use fengshui_planner::{
    plan_with_config, IdScheme, Layout, PlanConfig, PlanRequest, PlanResult, PlannerConfig,
};

#[derive(Parser)]
#[command(name = "fengshui-planner")]
#[command(about = "Feng shui furniture layouts for a single room")]
struct Cli {
    /// Request file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Planner configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the full result as JSON instead of a text report
    #[arg(short, long)]
    json: bool,

    /// Treat the request as JSON regardless of its file extension
    #[arg(long)]
    json_input: bool,

    /// Use random UUIDs for layout ids
    #[arg(long)]
    uuid_ids: bool,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return ExitCode::SUCCESS;
    }

    let planner = match &cli.config {
        Some(path) => match PlannerConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => PlannerConfig::default(),
    };

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                return ExitCode::FAILURE;
            }
            (buffer, "<stdin>".to_string())
        }
    };

    let is_json = cli.json_input || cli.input.as_deref().is_some_and(is_json_path);
    let request = match PlanRequest::parse(&source, is_json) {
        Ok(r) => r,
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            return ExitCode::FAILURE;
        }
    };

    let ids = if cli.uuid_ids {
        IdScheme::Uuid
    } else {
        IdScheme::Sequential
    };
    let config = PlanConfig::new().with_planner(planner).with_ids(ids);

    match plan_with_config(&request, &config) {
        Ok(result) if cli.json => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error encoding result: {}", e);
                return ExitCode::FAILURE;
            }
        },
        Ok(result) => print_report(&result),
        Err(failure) => {
            eprintln!("Error: {}", failure);
            for rec in &failure.recommendations {
                eprintln!("  - {}: {}", rec.title, rec.description);
            }
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn print_report(result: &PlanResult) {
    let analysis = &result.analysis;
    println!(
        "Room {:.2} x {:.2} m, top edge faces {}",
        analysis.width, analysis.length, analysis.orientation
    );
    match &result.kua {
        Some(kua) => println!(
            "Kua {} ({:?} group), favorable: {}",
            kua.number,
            kua.group,
            kua.favorable
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        None => println!("No kua profile"),
    }
    for layout in &result.layouts {
        println!();
        print_layout(layout);
    }
}

fn print_layout(layout: &Layout) {
    println!("== {} [{}] score {} ==", layout.id, layout.strategy, layout.score);
    for p in &layout.placements {
        let mut notes = vec![p.quality.to_string()];
        if p.in_command_position {
            notes.push("command".to_string());
        }
        if p.against_wall {
            notes.push("wall".to_string());
        }
        if let Some(area) = p.bagua_area {
            notes.push(area.to_string());
        }
        println!(
            "  {:<20} ({:.2}, {:.2}) {:.2} x {:.2} rot {:>3}  {}",
            p.item_id,
            p.rect.x,
            p.rect.y,
            p.rect.width,
            p.rect.height,
            p.rotation.degrees(),
            notes.join(", ")
        );
    }
    for t in &layout.tradeoffs {
        println!(
            "  ! [{}] {}: {} ({})",
            t.severity, t.issue, t.description, t.mitigation
        );
    }
}

fn print_intro() {
    println!(
        r#"Feng Shui Planner - furniture layouts for a single room

USAGE:
    fengshui-planner [OPTIONS] [FILE]
    cat request.toml | fengshui-planner

OPTIONS:
    -c, --config      Planner configuration (TOML file)
    -j, --json        Print the full result as JSON
    --json-input      Read the request as JSON
    --uuid-ids        Use random UUIDs for layout ids
    -v, --verbose     More logging (repeat for more)
    -h, --help        Print help

REQUEST:
    [room]
    width = 4.0
    length = 5.0
    orientation = "N"

    [[room.elements]]
    kind = "door"
    x = 1.5
    y = 4.9
    width = 0.9
    height = 0.1

    [furniture.queen_bed]
    width = 1.6
    height = 2.0"#
    );
}
