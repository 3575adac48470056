use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use internship_copilot::api::analysis_router;
use internship_copilot::config::{AppConfig, ReferenceConfig};
use internship_copilot::engine::{
    listings_from_csv_path, CompanyTierBook, DecisionEngine, EngineReport, ListingInput,
    ReferenceData, SkillVocabulary, StudentProfile,
};
use internship_copilot::error::AppError;
use internship_copilot::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Internship Decision Copilot",
    about = "Run the deterministic internship decision engine from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score listings against a profile and print the verdict report
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Student profile JSON file
    #[arg(long)]
    profile: PathBuf,
    /// Listings JSON file (array of listing inputs)
    #[arg(long)]
    listings: Option<PathBuf>,
    /// Listings CSV export (Role, Company, Required Skills, Description, Raw Text)
    #[arg(long)]
    listings_csv: Option<PathBuf>,
    /// Evaluation date stamped on the report header (defaults to today)
    #[arg(long, value_parser = parse_date)]
    evaluated_on: Option<NaiveDate>,
    /// Emit the raw report as JSON instead of the rendered summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Analyze(args) => run_analyze(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Reference vocabularies are configuration: loaded once here, read-only for
/// the engine's lifetime.
fn load_reference(config: &ReferenceConfig) -> Result<ReferenceData, AppError> {
    let mut reference = ReferenceData::builtin();
    if let Some(path) = &config.company_tiers {
        reference.tiers = CompanyTierBook::from_csv_path(path)?;
    }
    if let Some(path) = &config.skill_vocabulary {
        reference.vocabulary = SkillVocabulary::from_csv_path(path)?;
    }
    Ok(reference)
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let engine = Arc::new(DecisionEngine::new(load_reference(&config.reference)?));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(analysis_router(engine))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "internship decision copilot ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        profile,
        listings,
        listings_csv,
        evaluated_on,
        json,
    } = args;

    let profile: StudentProfile = serde_json::from_reader(File::open(profile)?)?;

    let mut inputs: Vec<ListingInput> = Vec::new();
    if let Some(path) = listings {
        let parsed: Vec<ListingInput> = serde_json::from_reader(File::open(path)?)?;
        inputs.extend(parsed);
    }
    if let Some(path) = listings_csv {
        inputs.extend(listings_from_csv_path(path)?);
    }

    let config = AppConfig::load()?;
    let engine = DecisionEngine::new(load_reference(&config.reference)?);
    let report = engine.run(&profile, &inputs)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let evaluated_on = evaluated_on.unwrap_or_else(|| Local::now().date_naive());
        render_report(&report, evaluated_on);
    }

    Ok(())
}

fn render_report(report: &EngineReport, evaluated_on: NaiveDate) {
    println!("Internship decision report (evaluated {evaluated_on})");
    println!("Profile: {}", report.profile_summary);

    if report.internships.is_empty() {
        println!("\nNo listings supplied.");
        return;
    }

    for (index, record) in report.internships.iter().enumerate() {
        println!(
            "\n[{}] {} | {}",
            index + 1,
            record.listing.company,
            record.listing.role
        );
        println!(
            "    {} (ROI {:.1}/10)",
            record.scores.classification.label(),
            record.scores.roi
        );
        println!(
            "    skill {:.1} | credibility {:.1} | acceptance {:.1} | impact {:.1}",
            record.scores.skill_match,
            record.scores.credibility,
            record.scores.acceptance_probability,
            record.scores.career_impact
        );

        println!("    Why this matters");
        for reason in &record.reasons {
            println!("    - {reason}");
        }

        println!("    Risks");
        for risk in &record.risks {
            println!("    - {risk}");
        }

        println!("    Hard verdict: {}", record.hard_verdict);
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
