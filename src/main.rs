//! CLI entry point for the grade comparison tool.
//!
//! Provides subcommands for showing one selection's grade distribution,
//! listing the cross-filtered instructor and term options for a course, and
//! building a side-by-side comparison table from several selections.

mod infra;
mod services;

use crate::infra::api::{GradesApiClient, RatingsApiClient};
use crate::infra::files::{FileOfferingSource, is_local};
use crate::services::sources::{OfferingSource, RatingSource};
use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use grade_compare::analyzers::aggregate::aggregate;
use grade_compare::analyzers::compare::merge;
use grade_compare::analyzers::filter::{
    derive_instructor_options, derive_term_options, filter_records, validate_axis,
};
use grade_compare::analyzers::snapshots::{add_snapshot, next_snapshot_id};
use grade_compare::analyzers::types::{AddOutcome, ComparisonRow, ComparisonSnapshot, SnapshotDraft};
use grade_compare::config::{CompareConfig, ComparisonContext};
use grade_compare::fetch::BasicClient;
use grade_compare::fetch::auth::ApiKey;
use grade_compare::output::{print_json, print_pretty, write_comparison_csv};
use grade_compare::records::{AxisFilter, OfferingRecord, Selection};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "grade_compare")]
#[command(about = "Compare historical course grade distributions", long_about = None)]
struct Cli {
    /// JSON/CSV file or grades API base URL (defaults to GRADES_API_URL)
    #[arg(short, long, global = true, value_name = "FILE_OR_URL")]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the grade distribution for one course selection
    Distribution {
        /// Course code, e.g. "CS 101"
        course: String,

        /// Instructor to narrow to ("ANY" for all)
        #[arg(short, long, default_value = "ANY")]
        instructor: String,

        /// Term to narrow to ("ANY" for all)
        #[arg(short, long, default_value = "ANY")]
        term: String,

        /// Print the full distribution as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the instructor and term options for a course
    Options {
        /// Course code, e.g. "CS 101"
        course: String,

        /// Currently selected instructor ("ANY" for all)
        #[arg(short, long, default_value = "ANY")]
        instructor: String,

        /// Currently selected term ("ANY" for all)
        #[arg(short, long, default_value = "ANY")]
        term: String,
    },
    /// Build a comparison table from several selections
    Compare {
        /// Selections as "COURSE|INSTRUCTOR|TERM"; omitted or "ANY" parts match everything
        #[arg(long = "select", value_name = "SELECTION", required = true)]
        selections: Vec<String>,

        /// Which view's snapshot cap to apply
        #[arg(long, value_enum, default_value_t = ComparisonContext::Grades)]
        context: ComparisonContext,

        /// Optional JSON file overriding the cap and palette
        #[arg(long)]
        config: Option<String>,

        /// Optional CSV file to write the merged table to
        #[arg(short, long)]
        output: Option<String>,

        /// Only emit the 13 letter-grade rows
        #[arg(long, default_value_t = false)]
        letters_only: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/grade_compare.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("grade_compare.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let source = offering_source(cli.source.as_deref())?;

    match cli.command {
        Commands::Distribution {
            course,
            instructor,
            term,
            json,
        } => {
            let records = source.offerings(&course).await?;
            let selection = Selection::course(&course)
                .with_instructor(instructor)
                .with_term(term);

            let filtered = filter_records(&records, &selection);
            let distribution = aggregate(&filtered);

            info!(
                selection = %selection.label(),
                offerings = filtered.len(),
                students = distribution.total_count,
                average_gpa = distribution.average_gpa,
                letter = distribution.letter_grade.map(|l| l.as_str()).unwrap_or("-"),
                "Grade distribution"
            );
            print_pretty(&distribution);
            if json {
                print_json(&distribution)?;
            }
        }
        Commands::Options {
            course,
            instructor,
            term,
        } => {
            let records = source.offerings(&course).await?;
            report_options(&records, &instructor.into(), &term.into());
        }
        Commands::Compare {
            selections,
            context,
            config,
            output,
            letters_only,
        } => {
            let config = match config {
                Some(path) => CompareConfig::load(&path, context)
                    .with_context(|| format!("loading comparison config {path}"))?,
                None => CompareConfig::for_context(context),
            };
            let ratings = rating_source()?;

            let selections = selections
                .iter()
                .map(|s| parse_selection(s))
                .collect::<Result<Vec<_>>>()?;

            let snapshots =
                build_comparison(source.as_ref(), ratings.as_deref(), &selections, &config)
                    .await?;

            let mut rows = merge(&snapshots);
            if letters_only {
                rows = ComparisonRow::letters_only(&rows);
            }

            for snapshot in &snapshots {
                info!(
                    id = %snapshot.id,
                    label = %snapshot.label,
                    color = %snapshot.color,
                    students = snapshot.distribution.total_count,
                    average_gpa = snapshot.distribution.average_gpa,
                    "Snapshot"
                );
            }
            print_json(&rows)?;

            if let Some(path) = output {
                write_comparison_csv(&path, &snapshots, &rows)?;
                info!(path = %path, "Comparison table written");
            }
        }
    }

    Ok(())
}

/// Picks a file or HTTP offering source. Without an explicit source the
/// grades API at `GRADES_API_URL` is used, authenticated with
/// `GRADES_API_KEY` when set.
fn offering_source(source: Option<&str>) -> Result<Box<dyn OfferingSource>> {
    let source = match source {
        Some(s) => s.to_string(),
        None => std::env::var("GRADES_API_URL")
            .context("no --source given and GRADES_API_URL is not set")?,
    };

    if is_local(&source) {
        debug!(path = %source, "Using file offering source");
        return Ok(Box::new(FileOfferingSource::new(source)));
    }

    debug!(base_url = %source, "Using grades API offering source");
    let http = BasicClient::new()?;
    if let Ok(key) = std::env::var("GRADES_API_KEY") {
        return Ok(Box::new(GradesApiClient::new(
            source,
            ApiKey::bearer(http, &key)?,
        )));
    }
    Ok(Box::new(GradesApiClient::new(source, http)))
}

/// Ratings are optional; they are only fetched when `RATINGS_API_URL` is set.
fn rating_source() -> Result<Option<Box<dyn RatingSource>>> {
    let Ok(base_url) = std::env::var("RATINGS_API_URL") else {
        return Ok(None);
    };
    let client: Box<dyn RatingSource> =
        Box::new(RatingsApiClient::new(base_url, BasicClient::new()?));
    Ok(Some(client))
}

/// Logs both option lists and flags a current value that is no longer offered.
fn report_options(records: &[OfferingRecord], instructor: &AxisFilter, term: &AxisFilter) {
    let terms = derive_term_options(records, instructor);
    let instructors = derive_instructor_options(records, term);

    for option in &terms {
        info!(label = %option.label, value = %option.value, "Term option");
    }
    for option in &instructors {
        info!(label = %option.label, value = %option.value, "Instructor option");
    }

    if validate_axis(term, &terms) != *term {
        warn!(term = %term, "Selected term is not offered for this instructor, use ANY");
    }
    if validate_axis(instructor, &instructors) != *instructor {
        warn!(instructor = %instructor, "Selected instructor did not teach this term, use ANY");
    }
}

/// Aggregates each selection and adds it to the comparison set in order,
/// stopping at the configured cap.
#[tracing::instrument(skip_all, fields(selections = selections.len(), max = config.max_snapshots))]
async fn build_comparison(
    source: &dyn OfferingSource,
    ratings: Option<&dyn RatingSource>,
    selections: &[Selection],
    config: &CompareConfig,
) -> Result<Vec<ComparisonSnapshot>> {
    let mut offerings: HashMap<String, Vec<OfferingRecord>> = HashMap::new();
    let mut snapshots = Vec::new();

    for selection in selections {
        if !offerings.contains_key(&selection.course_code) {
            let records = source.offerings(&selection.course_code).await?;
            offerings.insert(selection.course_code.clone(), records);
        }
        let records = &offerings[&selection.course_code];

        let filtered = filter_records(records, selection);
        if filtered.is_empty() {
            warn!(selection = %selection.label(), "No offerings match selection");
        }
        let distribution = aggregate(&filtered);

        let rating = match (ratings, selection.instructor.as_option()) {
            (Some(ratings), Some(instructor)) => match ratings.rating(instructor).await {
                Ok(rating) => rating,
                Err(e) => {
                    warn!(instructor, error = %e, "Rating fetch failed, continuing without it");
                    None
                }
            },
            _ => None,
        };

        let id = next_snapshot_id(&snapshots, Utc::now());
        let draft = SnapshotDraft::from_selection(id, selection, distribution, rating);

        match add_snapshot(&snapshots, draft, config.max_snapshots, &config.palette) {
            AddOutcome::Added(next) => snapshots = next,
            AddOutcome::AtCapacity(_) => {
                warn!(
                    max = config.max_snapshots,
                    selection = %selection.label(),
                    "Comparison is full, remaining selections skipped"
                );
                break;
            }
            AddOutcome::DuplicateId(_) => {
                warn!(selection = %selection.label(), "Snapshot id already taken, selection skipped");
            }
        }
    }

    Ok(snapshots)
}

/// Parses `COURSE|INSTRUCTOR|TERM`. Missing, empty or `ANY` parts match
/// every value on that axis.
fn parse_selection(input: &str) -> Result<Selection> {
    let mut parts = input.split('|').map(str::trim);
    let course = parts.next().unwrap_or_default();
    if course.is_empty() {
        bail!("selection '{input}' has no course code");
    }

    let mut axis = || match parts.next() {
        Some("") | None => AxisFilter::Any,
        Some(value) => AxisFilter::from(value),
    };
    let instructor = axis();
    let term = axis();

    if parts.next().is_some() {
        bail!("selection '{input}' has more than three parts");
    }

    Ok(Selection::course(course)
        .with_instructor(instructor)
        .with_term(term))
}
