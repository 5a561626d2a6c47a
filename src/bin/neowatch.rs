//! neowatch CLI - explore near-Earth object close approaches
//!
//! Two instruments, matching how the data gets used:
//! - `inspect` fetches a single NEO by designation or name
//! - `query` streams the close approaches matching a set of criteria,
//!   printed to the terminal or written to CSV/JSON

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand};

use neowatch::{build_database, filters, write_results, Criteria, NeoDatabase};

/// Explore near-Earth objects and their close approaches to Earth.
#[derive(Parser, Debug)]
#[command(name = "neowatch")]
#[command(version = neowatch::VERSION)]
#[command(about = "Explore near-Earth objects and their close approaches")]
#[command(after_help = "EXAMPLES:
  # Look up an object by primary designation
  neowatch inspect --pdes 433

  # Look up an object by name, listing its known approaches
  neowatch inspect --name Eros --verbose

  # The ten nearest-term approaches of hazardous objects in 2029
  neowatch query --start-date 2029-01-01 --end-date 2029-12-31 --hazardous

  # Everything passing within 0.1 au, saved as CSV
  neowatch query --max-distance 0.1 --limit 0 --outfile results.csv
")]
struct Cli {
    /// Path to the NEO catalog CSV file
    #[arg(
        long = "neofile",
        value_name = "FILE",
        default_value = "data/neos.csv",
        global = true
    )]
    neofile: PathBuf,

    /// Path to the close approach JSON dataset
    #[arg(
        long = "cadfile",
        value_name = "FILE",
        default_value = "data/cad.json",
        global = true
    )]
    cadfile: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect a single NEO by designation or by name
    Inspect(InspectArgs),
    /// Query close approaches matching every given criterion
    Query(QueryArgs),
}

#[derive(Args, Debug)]
#[command(group = ArgGroup::new("target").required(true).multiple(false))]
struct InspectArgs {
    /// Primary designation of the object
    #[arg(long, value_name = "DESIGNATION", group = "target")]
    pdes: Option<String>,

    /// IAU name of the object
    #[arg(long, value_name = "NAME", group = "target")]
    name: Option<String>,

    /// Also list every known close approach of the object
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// Approaches on exactly this date
    #[arg(long, value_name = "YYYY-MM-DD", help_heading = "DATE FILTERS")]
    date: Option<NaiveDate>,

    /// Approaches on or after this date
    #[arg(long = "start-date", value_name = "YYYY-MM-DD", help_heading = "DATE FILTERS")]
    start_date: Option<NaiveDate>,

    /// Approaches on or before this date
    #[arg(long = "end-date", value_name = "YYYY-MM-DD", help_heading = "DATE FILTERS")]
    end_date: Option<NaiveDate>,

    /// Minimum approach distance in astronomical units
    #[arg(long = "min-distance", value_name = "AU", help_heading = "RANGE FILTERS")]
    min_distance: Option<f64>,

    /// Maximum approach distance in astronomical units
    #[arg(long = "max-distance", value_name = "AU", help_heading = "RANGE FILTERS")]
    max_distance: Option<f64>,

    /// Minimum relative velocity in km/s
    #[arg(long = "min-velocity", value_name = "KM_S", help_heading = "RANGE FILTERS")]
    min_velocity: Option<f64>,

    /// Maximum relative velocity in km/s
    #[arg(long = "max-velocity", value_name = "KM_S", help_heading = "RANGE FILTERS")]
    max_velocity: Option<f64>,

    /// Minimum NEO diameter in kilometers
    #[arg(long = "min-diameter", value_name = "KM", help_heading = "RANGE FILTERS")]
    min_diameter: Option<f64>,

    /// Maximum NEO diameter in kilometers
    #[arg(long = "max-diameter", value_name = "KM", help_heading = "RANGE FILTERS")]
    max_diameter: Option<f64>,

    /// Only approaches by potentially hazardous objects
    #[arg(long, conflicts_with = "not_hazardous", help_heading = "HAZARD FILTER")]
    hazardous: bool,

    /// Only approaches by objects not marked hazardous
    #[arg(long = "not-hazardous", help_heading = "HAZARD FILTER")]
    not_hazardous: bool,

    /// Maximum number of results; 0 means unlimited
    #[arg(short, long, value_name = "N", help_heading = "OUTPUT")]
    limit: Option<usize>,

    /// Write results to this file (.csv or .json) instead of printing
    #[arg(short, long, value_name = "FILE", help_heading = "OUTPUT")]
    outfile: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Fix broken pipe panic when piping to head/tail/etc.
    // Reset SIGPIPE to default behavior (terminate quietly)
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    run()
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let database = build_database(&cli.neofile, &cli.cadfile).with_context(|| {
        format!(
            "loading datasets from {} and {}",
            cli.neofile.display(),
            cli.cadfile.display()
        )
    })?;

    match cli.command {
        Command::Inspect(args) => inspect(&database, &args),
        Command::Query(args) => query(&database, &args),
    }
}

fn inspect(database: &NeoDatabase, args: &InspectArgs) -> anyhow::Result<()> {
    let neo = match (&args.pdes, &args.name) {
        (Some(pdes), _) => database.get_neo_by_designation(pdes),
        (_, Some(name)) => database.get_neo_by_name(name),
        // clap's arg group guarantees one of the two is present
        _ => unreachable!(),
    };

    match neo {
        Some(neo) => {
            println!("{neo}");
            if args.verbose {
                for approach in neo.approaches() {
                    println!("- {approach}");
                }
            }
        }
        None => println!("No matching NEOs exist in the database."),
    }
    Ok(())
}

fn query(database: &NeoDatabase, args: &QueryArgs) -> anyhow::Result<()> {
    let criteria = Criteria {
        date: args.date,
        start_date: args.start_date,
        end_date: args.end_date,
        min_distance: args.min_distance,
        max_distance: args.max_distance,
        min_velocity: args.min_velocity,
        max_velocity: args.max_velocity,
        min_diameter: args.min_diameter,
        max_diameter: args.max_diameter,
        hazardous: hazard_flag(args),
    };
    let query_filters = criteria.build();

    match &args.outfile {
        Some(path) => {
            // Writers default to unlimited; an explicit --limit still caps
            let cap = args.limit.unwrap_or(0);
            let mut count = 0usize;
            let results = filters::limit(database.query(&query_filters), cap)
                .inspect(|_| count += 1);
            write_results(results, path)
                .with_context(|| format!("writing results to {}", path.display()))?;
            eprintln!("Wrote {} approaches to {}", count, path.display());
        }
        None => {
            // Terminal output defaults to the first 10 matches
            let cap = args.limit.unwrap_or(10);
            let mut any = false;
            for approach in filters::limit(database.query(&query_filters), cap) {
                any = true;
                println!("{approach}");
            }
            if !any {
                println!("No close approaches match the given criteria.");
            }
        }
    }
    Ok(())
}

/// Collapse the two hazard switches into an optional criterion.
fn hazard_flag(args: &QueryArgs) -> Option<bool> {
    match (args.hazardous, args.not_hazardous) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
