//! Leasing Engine CLI
//!
//! Command-line demo pricing a sample offer and projecting it across durations

use anyhow::Context;
use leasing_engine::{
    aggregate, project_all, EquipmentLine, ProjectionMode, RateTable,
};
use leasing_engine::calc::STANDARD_DURATIONS;
use leasing_engine::rates::DEFAULT_DURATION_MONTHS;
use std::fs::File;
use std::io::Write;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Leasing Engine v0.1.0");
    println!("=====================\n");

    // Sample offer: a small IT equipment bundle
    let lines = vec![
        EquipmentLine::new("MacBook Pro 14\"", 1_850.0, 2, 18.0),
        EquipmentLine::new("Dell U2723QE monitor", 540.0, 2, 22.0),
        EquipmentLine::with_monthly_payment("Dock station", 220.0, 2, 25.0, 8.50),
    ];

    println!("Offer lines:");
    for line in &lines {
        println!(
            "  {:<24} {:>9.2} x{}  margin {:>5.1}%  financed {:>10.2}",
            line.title,
            line.purchase_price,
            line.quantity,
            line.margin_pct,
            line.financed_amount(),
        );
    }
    println!();

    let table = RateTable::default_reference();
    let duration = DEFAULT_DURATION_MONTHS;

    // Aggregate the offer
    let result = aggregate(&lines, Some(&table), duration);

    println!("Aggregation ({} months, table '{}'):", duration, table.name);
    println!("  Total purchase price:     {:>12.2}", result.total_purchase_price);
    println!("  Margin (normal):          {:>12.2}  ({:.2}%)", result.normal_margin_amount, result.normal_margin_pct);
    println!("  Total financed amount:    {:>12.2}", result.total_financed_amount);
    println!("  Monthly payment (normal): {:>12.2}", result.normal_monthly_payment);
    println!("  Global coefficient:       {:>12.2}", result.global_coefficient);
    println!("  Monthly payment (global): {:>12.2}", result.adjusted_monthly_payment);
    println!("  Margin (adjusted):        {:>12.2}  ({:.2}%)", result.adjusted_margin_amount, result.adjusted_margin_pct);
    println!("  Margin difference:        {:>12.2}", result.margin_difference);
    println!();

    // Project the financed amount across all candidate durations
    let projections = project_all(
        result.total_financed_amount,
        ProjectionMode::PurchasePrice,
        Some(&table),
        &STANDARD_DURATIONS,
    );

    println!("Duration projection (purchase price {:.2}):", result.total_financed_amount);
    println!("{:>10} {:>12} {:>14} {:>14}", "Months", "Coefficient", "Monthly", "Purchase");
    println!("{}", "-".repeat(54));
    for row in projections.values() {
        println!(
            "{:>10} {:>12.2} {:>14.2} {:>14.2}",
            row.duration_months, row.coefficient, row.monthly_payment, row.purchase_price,
        );
    }

    // Write full projection grid to CSV
    let csv_path = "duration_projection.csv";
    let mut file = File::create(csv_path).context("Unable to create CSV file")?;

    writeln!(file, "DurationMonths,Coefficient,MonthlyPayment,PurchasePrice")?;
    for row in projections.values() {
        writeln!(
            file,
            "{},{:.4},{:.2},{:.2}",
            row.duration_months, row.coefficient, row.monthly_payment, row.purchase_price,
        )?;
    }

    println!("\nProjection grid written to: {}", csv_path);

    // Full result dump for downstream tooling
    println!("\nCalculation result (JSON):");
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
