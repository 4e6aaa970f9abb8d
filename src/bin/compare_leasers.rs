//! Price an equipment CSV against every configured leaser
//!
//! Loads rate tables from data/rate_tables/ and equipment lines from
//! data/equipment_sample.csv, evaluates every (leaser x duration)
//! combination in parallel, and writes a comparison CSV.

use anyhow::Context;
use leasing_engine::calc::STANDARD_DURATIONS;
use leasing_engine::offer::load_equipment_lines;
use leasing_engine::rates::LoadedRateTables;
use leasing_engine::{aggregate, CalculationResult};
use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

/// One (leaser, duration) evaluation of the offer
struct ComparisonRow {
    table_name: String,
    duration_months: u32,
    result: CalculationResult,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let start = Instant::now();

    println!("Loading rate tables from data/rate_tables/...");
    let loaded = LoadedRateTables::load_default().context("Failed to load rate tables")?;
    println!("Loaded {} rate tables", loaded.tables.len());

    let equipment_path = "data/equipment_sample.csv";
    let lines = load_equipment_lines(equipment_path)
        .with_context(|| format!("Failed to load equipment from {}", equipment_path))?;
    println!("Loaded {} equipment lines in {:?}\n", lines.len(), start.elapsed());

    // Evaluate every leaser x duration combination in parallel
    let calc_start = Instant::now();
    let mut rows: Vec<ComparisonRow> = loaded
        .tables
        .par_iter()
        .flat_map(|table| {
            let lines = &lines;
            STANDARD_DURATIONS.par_iter().map(move |&duration_months| ComparisonRow {
                table_name: table.name.clone(),
                duration_months,
                result: aggregate(lines, Some(table), duration_months),
            })
        })
        .collect();
    println!("Evaluated {} combinations in {:?}", rows.len(), calc_start.elapsed());

    rows.sort_by(|a, b| {
        a.table_name
            .cmp(&b.table_name)
            .then(a.duration_months.cmp(&b.duration_months))
    });

    // Write comparison output
    let output_path = "leaser_comparison.csv";
    let mut file = File::create(output_path).context("Failed to create output file")?;

    writeln!(
        file,
        "Table,DurationMonths,TotalPurchasePrice,FinancedAmount,GlobalCoefficient,AdjustedMonthly,NormalMonthly,NormalMargin,AdjustedMargin,MarginDifference"
    )?;

    for row in &rows {
        let r = &row.result;
        writeln!(
            file,
            "{},{},{:.2},{:.2},{:.4},{:.2},{:.2},{:.2},{:.2},{:.2}",
            row.table_name,
            row.duration_months,
            r.total_purchase_price,
            r.total_financed_amount,
            r.global_coefficient,
            r.adjusted_monthly_payment,
            r.normal_monthly_payment,
            r.normal_margin_amount,
            r.adjusted_margin_amount,
            r.margin_difference,
        )?;
    }

    println!("Output written to {}\n", output_path);

    // Print the 36-month view as the headline comparison
    println!("36-month comparison:");
    for row in rows.iter().filter(|r| r.duration_months == 36) {
        println!(
            "  {:<16} monthly={:>9.2}  margin kept={:>9.2}  (diff {:+.2})",
            row.table_name,
            row.result.adjusted_monthly_payment,
            row.result.adjusted_margin_amount,
            -row.result.margin_difference,
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
