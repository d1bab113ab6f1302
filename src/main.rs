//! CardioCheck: Cardiovascular risk assessment
//!
//! Command-line entry point.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiocheck::adapters::sanitize::SanitizingMakeWriter;
use cardiocheck::adapters::JsonPatientSource;
use cardiocheck::application::{AssessmentService, CohortSummary, PatientAssessment};
use cardiocheck::config::{LogMode, OutputFormat, Settings};
use cardiocheck::domain::{categorize, PatientData};
use cardiocheck::report;

const USAGE: &str = "\
Usage: cardiocheck [--json] <command>

Commands:
  assess <patient.json>        Assess one patient record
  roster [roster.json]         Assess every patient on a roster
  patient <id> [roster.json]   Assess one roster patient by id
  categorize <percent>         Guideline category for a 10-year risk";

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Assess(PathBuf),
    Roster(Option<PathBuf>),
    Patient(String, Option<PathBuf>),
    Categorize(f64),
}

fn parse_args(args: Vec<String>, output: &mut OutputFormat) -> Result<Command> {
    let mut positional = Vec::with_capacity(args.len());
    for arg in args {
        match arg.as_str() {
            "--json" => *output = OutputFormat::Json,
            "-h" | "--help" => return Ok(Command::Help),
            _ => positional.push(arg),
        }
    }

    let mut rest = positional.into_iter();
    let command = rest.next().unwrap_or_default();
    let first = rest.next();
    let second = rest.next();
    if rest.next().is_some() {
        bail!("Too many arguments\n\n{USAGE}");
    }

    match (command.as_str(), first, second) {
        ("assess", Some(path), None) => Ok(Command::Assess(PathBuf::from(path))),
        ("roster", path, None) => Ok(Command::Roster(path.map(PathBuf::from))),
        ("patient", Some(id), path) => Ok(Command::Patient(id, path.map(PathBuf::from))),
        ("categorize", Some(value), None) => {
            let percent: f64 = value
                .parse()
                .with_context(|| format!("Not a percentage: {value}"))?;
            Ok(Command::Categorize(percent))
        }
        _ => bail!("{USAGE}"),
    }
}

fn init_logging(settings: &Settings) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    // Reports go to stdout, so logs stay off it unless asked for.
    let (writer, guard) = match settings.log_mode {
        LogMode::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogMode::Auto | LogMode::Stderr => tracing_appender::non_blocking(std::io::stderr()),
        LogMode::File => {
            if let Some(parent) = settings.log_file.parent() {
                // Best-effort: the open below reports the real failure.
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&settings.log_file)
                .with_context(|| format!("Failed to open log file {:?}", settings.log_file))?;
            tracing_appender::non_blocking(file)
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    Ok(guard)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
struct RosterReport<'a> {
    patients: &'a [PatientAssessment],
    summary: CohortSummary,
}

fn roster_service(path: Option<PathBuf>, settings: &Settings) -> AssessmentService<JsonPatientSource> {
    let path = path.unwrap_or_else(|| settings.roster_path.clone());
    AssessmentService::new(Arc::new(JsonPatientSource::from_path(path)))
}

fn run(command: Command, settings: &Settings, output: OutputFormat) -> Result<()> {
    match command {
        Command::Help => println!("{USAGE}"),
        Command::Assess(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let patient: PatientData = serde_json::from_str(&raw)
                .with_context(|| format!("Malformed patient record in {}", path.display()))?;

            let entry = PatientAssessment::for_patient(&patient)?;
            match output {
                OutputFormat::Json => print_json(&entry)?,
                OutputFormat::Text => print!("{}", report::render_text(&entry)),
            }
        }
        Command::Roster(path) => {
            let service = roster_service(path, settings);
            let entries = service.assess_roster()?;
            let summary = CohortSummary::from_assessments(&entries);
            match output {
                OutputFormat::Json => print_json(&RosterReport {
                    patients: &entries,
                    summary,
                })?,
                OutputFormat::Text => {
                    print!("{}", report::render_roster(&entries));
                    println!();
                    print!("{}", report::render_summary(&summary));
                }
            }
        }
        Command::Patient(id, path) => {
            let service = roster_service(path, settings);
            let entry = service.assess_by_id(&id)?;
            match output {
                OutputFormat::Json => print_json(&entry)?,
                OutputFormat::Text => print!("{}", report::render_text(&entry)),
            }
        }
        Command::Categorize(percent) => {
            let category = categorize(percent);
            match output {
                OutputFormat::Json => print_json(&category)?,
                OutputFormat::Text => println!("{} ({})", category.category, category.description),
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let settings = Settings::from_env_or_default();
    let mut output = settings.output;
    let command = parse_args(std::env::args().skip(1).collect(), &mut output)?;

    let _guard = init_logging(&settings)?;
    tracing::debug!("Starting CardioCheck...");

    run(command, &settings, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> (Result<Command>, OutputFormat) {
        let mut output = OutputFormat::Text;
        let command = parse_args(args.iter().map(ToString::to_string).collect(), &mut output);
        (command, output)
    }

    #[test]
    fn test_help_is_not_an_error() {
        for flag in ["-h", "--help"] {
            let (command, _) = parse(&["assess", flag]);
            assert_eq!(command.expect("Help should parse"), Command::Help);
        }
    }

    #[test]
    fn test_commands_and_json_flag() {
        let (command, output) = parse(&["patient", "--json", "patient-2"]);
        assert_eq!(
            command.expect("Should parse"),
            Command::Patient("patient-2".to_string(), None)
        );
        assert_eq!(output, OutputFormat::Json);

        let (command, _) = parse(&["categorize", "15"]);
        assert_eq!(command.expect("Should parse"), Command::Categorize(15.0));
    }

    #[test]
    fn test_bad_arguments_are_errors() {
        assert!(parse(&[]).0.is_err());
        assert!(parse(&["categorize", "lots"]).0.is_err());
        assert!(parse(&["assess", "a.json", "b.json"]).0.is_err());
    }
}
