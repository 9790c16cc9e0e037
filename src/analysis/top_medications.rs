/// Analysis 1: top 10 high-cost medications.
///
/// One mart-level aggregation, a horizontal bar chart, and a printed
/// interpretation naming the single biggest cost driver.

use postgres::Client;

use crate::config::Settings;
use crate::logging::{self, Stage};
use crate::model::{AnalysisError, MedicationSpend};
use crate::report::charts;
use crate::report::summary::TopMedicationsSummary;

const CHART_FILE: &str = "top_medications.png";

const TOP_SPEND_QUERY: &str = "
    SELECT
        medication_description AS medication_name,
        SUM(total_cost)::FLOAT8 AS total_spend
    FROM mart.medications
    GROUP BY 1
    ORDER BY 2 DESC
    LIMIT 10;
";

pub fn run(client: &mut Client, settings: &Settings) -> Result<TopMedicationsSummary, AnalysisError> {
    println!("\n💊 ANALYSIS 1: Top 10 High-Cost Medications");

    let rows = fetch_top_spend(client)?;
    // An empty mart must surface as a distinct no-data condition, not an
    // index panic on the first row.
    let top = rows
        .first()
        .cloned()
        .ok_or(AnalysisError::NoData("top medications"))?;

    let chart_path = settings.viz_dir.join(CHART_FILE);
    charts::horizontal_bar("Top 10 High-Cost Medications", "Total Spend ($)", &rows, &chart_path)?;
    logging::info(
        Stage::Chart,
        &format!("🎉 Chart saved: {}", chart_path.display()),
    );

    println!("\n🧠 BUSINESS INTERPRETATION:");
    println!(
        "   - The cost driver is dominated by '{}' (${:.0}).",
        top.medication, top.total_spend
    );
    println!("   - Strategy: Negotiate volume discounts for this specific SKU.");

    Ok(TopMedicationsSummary {
        top_medication: top.medication,
        top_spend: top.total_spend,
        medications_ranked: rows.len(),
    })
}

fn fetch_top_spend(client: &mut Client) -> Result<Vec<MedicationSpend>, AnalysisError> {
    let rows = client.query(TOP_SPEND_QUERY, &[])?;
    logging::debug(Stage::Query, &format!("top-spend query returned {} rows", rows.len()));

    Ok(rows
        .iter()
        .map(|row| MedicationSpend {
            medication: row.get(0),
            total_spend: row.get(1),
        })
        .collect())
}
