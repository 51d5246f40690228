mod config;
mod core;
mod models;
mod services;

use crate::config::Settings;
use crate::core::{apply_safety_first_strategy, run_matching, summarize_results};
use crate::models::{MatchingAlgorithm, RunReport};
use crate::services::Dataset;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Admit Algo matching run...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    let args: Vec<String> = std::env::args().collect();

    let dataset_path = args
        .get(1)
        .cloned()
        .or_else(|| settings.dataset.path.clone())
        .unwrap_or_else(|| {
            error!("No dataset given: pass a JSON file argument or set dataset.path");
            std::process::exit(2);
        });

    let algorithm: MatchingAlgorithm = match args.get(2) {
        Some(raw) => raw.parse().unwrap_or_else(|e: String| {
            error!("{}", e);
            std::process::exit(2);
        }),
        None => settings.matching.algorithm,
    };

    let dataset = Dataset::from_file(&dataset_path).unwrap_or_else(|e| {
        error!("Failed to load dataset {}: {}", dataset_path, e);
        std::process::exit(1);
    });

    info!(
        students = dataset.students.len(),
        schools = dataset.schools.len(),
        "Dataset loaded from {}",
        dataset_path
    );

    let students = dataset.resolve_students(
        settings.scores.min,
        settings.scores.max,
        settings.scores.seed,
    );
    let schools = &dataset.schools;

    let outcome = if algorithm == MatchingAlgorithm::Baseline && settings.matching.safety_first {
        let strategic = apply_safety_first_strategy(&students, schools);
        info!("Applied safety-first preference truncation");
        let mut outcome = run_matching(algorithm, &strategic, schools);
        // Ranks in the summary are reported against the original,
        // untruncated wishes, not the strategic lists.
        outcome.summary = summarize_results(&outcome.results, &students);
        outcome
    } else {
        run_matching(algorithm, &students, schools)
    };

    info!(
        matched = outcome.summary.matched_students,
        unmatched = outcome.summary.unmatched_count,
        match_rate = outcome.summary.match_rate,
        "Matching complete"
    );

    let report = RunReport::new(algorithm, outcome, &students);
    let json = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        error!("Failed to serialize run report: {}", e);
        panic!("Serialization error: {}", e);
    });

    println!("{}", json);
}
