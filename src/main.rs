/// Pipeline entry point.
///
/// Linear, single-connection run: load settings → connect → four analyses
/// in sequence → run summary → final banner. Any failure after a
/// successful connection is a hard stop with the cause on stderr; there
/// are no retries.

use postgres::Client;

use medspend_service::analysis::{age_correlation, concentration, segmentation, top_medications};
use medspend_service::config::Settings;
use medspend_service::db;
use medspend_service::logging::{self, LogLevel, Stage};
use medspend_service::model::AnalysisError;
use medspend_service::report::summary::RunSummary;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    logging::init_logger(LogLevel::Info, None);

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            println!("❌ ERROR: {}", e);
            return 1;
        }
    };
    // Re-init once the configured log file is known.
    logging::init_logger(LogLevel::Info, settings.log_file.as_deref());

    println!("✅ Attempting to connect to the warehouse...");
    let mut client = match db::connect(&settings.db) {
        Ok(client) => client,
        Err(e) => {
            println!("❌ Connection failed: {}", e);
            return 1;
        }
    };
    println!("✅ Connection successful!");

    match run_analyses(&mut client, &settings) {
        Ok(()) => {
            println!("\n✅ All Analyses Completed Successfully.");
            0
        }
        Err(e) => {
            logging::error(Stage::System, &e.to_string());
            println!("\n❌ Run aborted: {}", e);
            1
        }
    }
}

fn run_analyses(client: &mut Client, settings: &Settings) -> Result<(), AnalysisError> {
    let top_medications = top_medications::run(client, settings)?;
    let correlation = age_correlation::run(client, settings)?;
    let segmentation = segmentation::run(client, settings)?;
    let concentration = concentration::run(client, settings)?;

    let summary = RunSummary {
        generated_at: chrono::Utc::now().to_rfc3339(),
        top_medications,
        correlation,
        segmentation,
        concentration,
    };
    let summary_path = settings.analysis_dir.join("run_summary.json");
    summary.write_json(&summary_path)?;
    logging::info(
        Stage::Export,
        &format!("run summary saved: {}", summary_path.display()),
    );

    Ok(())
}
