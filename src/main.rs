use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use realty_assistant::chart;
use realty_assistant::config::Config;
use realty_assistant::estimate::{self, PropertyInput};
use realty_assistant::export;
use realty_assistant::ingestion::{self, ParseOutcome, SAMPLE_FILE_NAME};
use realty_assistant::logging::init_logging;
use realty_assistant::query::QueryResult;
use realty_assistant::session::{self, ChatCommand, Session, QUICK_QUERIES};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "realty")]
#[command(about = "Ask questions about real-estate market spreadsheets")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer one question
    Ask {
        /// The question, e.g. "Compare Aundh and Baner demand trends"
        query: String,

        /// Spreadsheet to query instead of the demo data (.xlsx, .xls, .csv)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Print the full result (records and charts) as JSON
        #[arg(long)]
        json: bool,

        /// Also write the result's table as CSV
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Validate a spreadsheet and report accepted and skipped rows
    Ingest {
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },
    /// Write the sample workbook
    Sample {
        #[arg(default_value = SAMPLE_FILE_NAME)]
        out: PathBuf,
    },
    /// List the areas in the active dataset
    Areas {
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Interactive question loop over stdin
    Chat {
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Rough property value from size, bedrooms and a location factor
    Estimate {
        /// Built-up area in sqft
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        area: String,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        bedrooms: String,

        /// 1 (outskirts) to 5 (prime)
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        location_factor: String,

        #[arg(long)]
        json: bool,
    },
    /// Short help reply for a free-text message
    Advise { message: String },
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_logging();

    if let Err(e) = run(Args::parse()).await {
        error!("{:#}", e);
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::from_env();

    match args.command {
        Commands::Ask {
            query,
            data,
            json,
            export,
        } => {
            let session = open_session(&config, data).await?;
            let result = session.ask(&query);
            print_result(&result, json)?;
            if let Some(path) = export {
                export::write_csv(&path, &result.table_data)?;
                info!("Exported {} records to {}", result.table_data.len(), path.display());
            }
            Ok(())
        }
        Commands::Ingest { file, json } => {
            let outcome = ingestion::load_file(&config, &file).await?;
            print_outcome(&outcome, json)
        }
        Commands::Sample { out } => write_sample(&out),
        Commands::Areas { data } => {
            let session = open_session(&config, data).await?;
            for area in session.available_areas() {
                println!("{}", area);
            }
            Ok(())
        }
        Commands::Chat { data } => {
            let session = open_session(&config, data).await?;
            chat(&config, session).await
        }
        Commands::Estimate {
            area,
            bedrooms,
            location_factor,
            json,
        } => {
            let input = PropertyInput::from_values(
                &Value::String(area),
                &Value::String(bedrooms),
                &Value::String(location_factor),
            );
            let result = estimate::estimate(&input);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.message);
            }
            Ok(())
        }
        Commands::Advise { message } => {
            println!("{}", estimate::assistant_reply(&message));
            Ok(())
        }
    }
}

/// Demo data unless a file is given on the command line or in the environment.
async fn open_session(config: &Config, data: Option<PathBuf>) -> Result<Session> {
    let mut session = Session::new();
    if let Some(path) = data.or_else(|| config.data_file.clone()) {
        let outcome = ingestion::load_file(config, &path).await?;
        eprintln!("{}", session::load_status(&outcome));
        session.load(outcome);
    }
    Ok(session)
}

fn print_result(result: &QueryResult, as_json: bool) -> Result<()> {
    if as_json {
        let payload = json!({
            "result": result,
            "charts": chart::build(result),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{}", result.summary);
    if result.has_data() {
        println!();
        println!("{} records found", result.table_data.len());
        println!("{}", export::to_csv(&result.table_data)?);
    }
    Ok(())
}

fn print_outcome(outcome: &ParseOutcome, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    println!("{}", session::load_status(outcome));
    if !outcome.skipped.is_empty() {
        println!("Skipped {} rows:", outcome.skipped.len());
        for err in &outcome.skipped {
            println!("  {}", err);
        }
    }
    Ok(())
}

fn write_sample(out: &Path) -> Result<()> {
    let bytes = ingestion::sample_workbook()?;
    std::fs::write(out, bytes).with_context(|| format!("Failed to write {}", out.display()))?;
    println!("Sample file written to {}", out.display());
    Ok(())
}

async fn chat(config: &Config, mut session: Session) -> Result<()> {
    println!("{}", session::welcome_message());
    println!();
    println!("Quick queries: {}", QUICK_QUERIES.join(" | "));
    println!("Commands: :load FILE, :reset (demo data), :areas, :quit");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let Some(command) = ChatCommand::parse(&line) else {
            continue;
        };

        match command {
            ChatCommand::Quit => break,
            ChatCommand::Reset => println!("{}", session.reset()),
            ChatCommand::Areas => println!("{}", session.available_areas().join(", ")),
            ChatCommand::LoadUsage => println!("Usage: :load FILE (.xlsx, .xls or .csv)"),
            ChatCommand::Load(path) => match ingestion::load_file(config, &path).await {
                Ok(outcome) => {
                    println!("{}", session::load_status(&outcome));
                    println!("{}", session.load(outcome));
                }
                // the previous dataset stays active
                Err(e) => println!("{}", e),
            },
            ChatCommand::Ask(question) => print_result(&session.ask(question), false)?,
        }
        println!();
    }
    Ok(())
}
