//! Output formatting module

use std::path::Path;

use estimate_core::mix::{mix_table, CURING_MILESTONES, RECOMMENDATIONS};
use estimate_core::report::fixed;
use estimate_core::{EstimateInput, EstimateResult, Settings};
use serde_json::json;

use crate::cli::OutputFormat;
use crate::error::Result;

/// Print an estimate breakdown
pub fn output_estimate(
    output_format: OutputFormat,
    input: &EstimateInput,
    result: &EstimateResult,
    currency: &str,
    verbose: bool,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(result)?;
        println!("{}", content);
        return Ok(());
    }

    let costs = result.costs(&input.prices);

    println!("═══════════════════════════════════════");
    println!("  CONCRETE ESTIMATE");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    if !input.label.is_empty() {
        println!("  Object:   {}", input.label);
    }
    println!("  Size:     {} x {} x {} m", input.length_m, input.width_m, input.height_m);
    println!("  Grade:    {}", input.grade);
    println!("  Volume:   {} m³", fixed(result.volume_m3, 2));
    println!();
    println!("Materials:");
    println!(
        "  Cement:   {} kg ({} bags)",
        fixed(result.cement_kg, 0),
        fixed(result.cement_bags().value(), 1)
    );
    println!("  Sand:     {} t", fixed(result.sand_tonnes().value(), 2));
    println!("  Gravel:   {} t", fixed(result.gravel_tonnes().value(), 2));
    println!("  Water:    {} L", fixed(result.water_l, 0));
    println!();
    println!("Cost:");
    println!("  Cement:   {} {}", fixed(costs.cement, 0), currency);
    println!("  Sand:     {} {}", fixed(costs.sand, 0), currency);
    println!("  Gravel:   {} {}", fixed(costs.gravel, 0), currency);
    println!();
    println!("═══════════════════════════════════════");
    println!("  TOTAL: {} {}", fixed(result.total_cost, 0), currency);
    println!("═══════════════════════════════════════");

    if verbose {
        let ratio = input.grade.ratio();
        println!();
        println!("Mix {}: {}", input.grade, ratio.notation());
        println!("Typical use: {}", input.grade.application());
        println!(
            "Prices: cement {} / bag, sand {} / t, gravel {} / t",
            input.prices.cement_per_bag, input.prices.sand_per_tonne, input.prices.gravel_per_tonne
        );
    }

    Ok(())
}

/// Print the grade table
pub fn output_grades(output_format: OutputFormat) -> Result<()> {
    let table = mix_table();

    if output_format == OutputFormat::Json {
        let rows: Vec<_> = table
            .iter()
            .map(|(grade, ratio)| {
                json!({
                    "grade": grade,
                    "ratio": ratio,
                    "application": grade.application(),
                })
            })
            .collect();
        let content = serde_json::to_string_pretty(&json!({
            "grades": rows,
            "curing": CURING_MILESTONES,
            "recommendations": RECOMMENDATIONS,
        }))?;
        println!("{}", content);
        return Ok(());
    }

    println!("{:<6} {:<28} {}", "Grade", "Cement : Sand : Gravel", "Typical use");
    println!("{}", "-".repeat(72));
    for (grade, ratio) in &table {
        println!("{:<6} {:<28} {}", grade.code(), ratio.notation(), grade.application());
    }

    println!("\nCuring:");
    for milestone in CURING_MILESTONES.iter() {
        println!("  {:<14} {}", milestone.label, milestone.age);
    }

    println!("\nRecommendations:");
    for note in RECOMMENDATIONS.iter() {
        println!("  - {}", note);
    }

    Ok(())
}

/// Print settings and where they live
pub fn output_settings(output_format: OutputFormat, settings: &Settings, path: &Path) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(settings)?;
        println!("{}", content);
        return Ok(());
    }

    println!("Settings file:   {}", path.display());
    println!("Default grade:   {}", settings.default_grade);
    println!("Cement price:    {} / bag", settings.prices.cement_per_bag);
    println!("Sand price:      {} / t", settings.prices.sand_per_tonne);
    println!("Gravel price:    {} / t", settings.prices.gravel_per_tonne);
    println!("Currency:        {}", settings.report.currency_symbol);
    println!("Object name:     {}", settings.report.object_name);
    println!("Modified:        {}", settings.modified.format("%Y-%m-%d %H:%M:%S UTC"));

    Ok(())
}
