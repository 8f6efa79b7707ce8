//! Ownership Cost CLI
//!
//! Command-line interface for vehicle ownership cost projections and the
//! vehicle catalog

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::fs::File;
use std::path::PathBuf;

use ownership_cost::projection::{OwnershipSettings, SettingsOverrides, YearlyBreakdown};
use ownership_cost::vehicle::{load_vehicles, Catalog, DEFAULT_CATALOG_PATH};
use ownership_cost::{CostCurve, ScenarioRunner, Vehicle};

#[derive(Debug, Parser)]
#[command(name = "ownership_cost", version, about = "Project the total cost of owning a vehicle")]
struct Cli {
    /// Vehicle catalog file
    #[arg(long, global = true, env = "VEHICLE_CATALOG", default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project ownership costs for a stored vehicle or an ad hoc price
    Cost(CostArgs),
    /// Add a vehicle, or update the one with the same name
    Add(AddArgs),
    /// Remove a vehicle
    Remove { name: String },
    /// Show a stored vehicle
    Show { name: String },
    /// Find vehicles whose name contains the given text
    Search { fragment: String },
    /// List all vehicles
    List,
    /// Import vehicles from a CSV file
    Import { path: PathBuf },
    /// Compare stored vehicles, cheapest first (all vehicles if none named)
    Compare(CompareArgs),
}

/// Financing and lifetime choices shared by `cost` and `compare`
#[derive(Debug, Args)]
struct ScenarioArgs {
    /// Cash paid upfront
    #[arg(long, allow_negative_numbers = true)]
    down_payment: Option<f64>,

    /// Annual loan rate as a fraction, e.g. 0.03
    #[arg(long, allow_negative_numbers = true)]
    loan_rate: Option<f64>,

    /// Loan term in years
    #[arg(long, allow_negative_numbers = true)]
    loan_years: Option<i32>,

    /// Expected ownership lifetime in years
    #[arg(long, allow_negative_numbers = true)]
    life: Option<i32>,
}

impl ScenarioArgs {
    fn runner(&self) -> ScenarioRunner {
        let mut runner = ScenarioRunner::new();
        if let Some(down_payment) = self.down_payment {
            runner = runner.with_down_payment(down_payment);
        }
        if let Some(rate) = self.loan_rate {
            runner = runner.with_loan_rate(rate);
        }
        if let Some(years) = self.loan_years {
            runner = runner.with_loan_years(years);
        }
        if let Some(life) = self.life {
            runner = runner.with_expected_life(life);
        }
        runner
    }
}

/// Cost curve and permit options shared by `cost` and `add`
#[derive(Debug, Args)]
struct CurveArgs {
    /// Yearly registration / permit cost
    #[arg(long)]
    permit_cost: Option<f64>,

    /// Insurance curve as [[year, cost], ...]
    #[arg(long, value_parser = parse_curve)]
    insurance: Option<CostCurve>,

    /// Maintenance curve as [[year, cost], ...]
    #[arg(long, value_parser = parse_curve)]
    maintenance: Option<CostCurve>,
}

#[derive(Debug, Args)]
struct CostArgs {
    /// Stored vehicle name
    #[arg(long, conflicts_with = "price", required_unless_present = "price")]
    vehicle: Option<String>,

    /// Ad hoc purchase price
    #[arg(long)]
    price: Option<f64>,

    #[command(flatten)]
    scenario: ScenarioArgs,

    #[command(flatten)]
    curves: CurveArgs,

    /// Write the yearly breakdown to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct AddArgs {
    name: String,

    /// Purchase price
    #[arg(long)]
    price: f64,

    #[command(flatten)]
    curves: CurveArgs,
}

#[derive(Debug, Args)]
struct CompareArgs {
    /// Vehicle names
    names: Vec<String>,

    #[command(flatten)]
    scenario: ScenarioArgs,
}

fn parse_curve(text: &str) -> Result<CostCurve, String> {
    CostCurve::parse(text).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut catalog = Catalog::open(&cli.catalog)
        .with_context(|| format!("failed to open catalog {}", cli.catalog.display()))?;

    match cli.command {
        Command::Cost(args) => run_cost(&catalog, args)?,
        Command::Add(args) => {
            let vehicle = Vehicle::new(args.name, args.price).with_curves(
                args.curves.insurance.as_ref(),
                args.curves.maintenance.as_ref(),
            );
            let vehicle = match args.curves.permit_cost {
                Some(permit) => vehicle.with_permit_cost(permit),
                None => vehicle,
            };
            let name = vehicle.name.clone();
            let replaced = catalog.upsert(vehicle)?;
            println!("{} '{}'", if replaced { "Updated" } else { "Added" }, name);
        }
        Command::Remove { name } => {
            catalog.remove(&name)?;
            println!("Removed '{}'", name);
        }
        Command::Show { name } => print_vehicle(catalog.require(&name)?),
        Command::Search { fragment } => {
            let matches = catalog.search(&fragment);
            if matches.is_empty() {
                println!("No vehicles match '{}'", fragment);
            }
            for vehicle in matches {
                print_vehicle_line(vehicle);
            }
        }
        Command::List => {
            for vehicle in catalog.search("") {
                print_vehicle_line(vehicle);
            }
        }
        Command::Import { path } => {
            let vehicles = load_vehicles(&path)
                .with_context(|| format!("failed to import {}", path.display()))?;
            let count = vehicles.len();
            for vehicle in vehicles {
                catalog.upsert(vehicle)?;
            }
            info!("imported {} vehicles from {}", count, path.display());
            println!("Imported {} vehicles", count);
        }
        Command::Compare(args) => run_compare(&catalog, args)?,
    }

    catalog.close().context("failed to save catalog")?;
    Ok(())
}

fn run_cost(catalog: &Catalog, args: CostArgs) -> Result<()> {
    let runner = args.scenario.runner();

    let (label, base) = match (&args.vehicle, args.price) {
        (Some(name), _) => (name.clone(), runner.overrides_for(catalog.require(name)?)),
        (None, Some(price)) => ("Ad hoc purchase".to_string(), runner.overrides_for_price(price)),
        (None, None) => bail!("either --vehicle or --price is required"),
    };

    // Command-line curves take precedence over stored ones
    let overrides = SettingsOverrides {
        yearly_permit_cost: args.curves.permit_cost.or(base.yearly_permit_cost),
        insurance_curve: args.curves.insurance.or(base.insurance_curve),
        maintenance_curve: args.curves.maintenance.or(base.maintenance_curve),
        ..base
    };

    let (settings, breakdown) = runner.run_overrides(overrides)?;

    println!("{}", label);
    println!("{}", "=".repeat(label.len().max(20)));
    print_settings(&settings);
    println!();
    print_breakdown(&breakdown);

    if let Some(path) = args.csv {
        let file = File::create(&path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        breakdown.write_csv(file)?;
        println!("\nYearly breakdown written to: {}", path.display());
    }

    Ok(())
}

fn run_compare(catalog: &Catalog, args: CompareArgs) -> Result<()> {
    let vehicles: Vec<Vehicle> = if args.names.is_empty() {
        catalog.vehicles().to_vec()
    } else {
        args.names
            .iter()
            .map(|name| catalog.require(name).cloned())
            .collect::<Result<_, _>>()?
    };

    if vehicles.is_empty() {
        println!("No vehicles to compare");
        return Ok(());
    }

    let ranked = args.scenario.runner().compare(&vehicles)?;

    println!("{:>4} {:<32} {:>12} {:>14} {:>12}", "Rank", "Vehicle", "Price", "Total", "Monthly");
    println!("{}", "-".repeat(78));
    for (rank, projection) in ranked.iter().enumerate() {
        println!("{:>4} {:<32} {:>12.2} {:>14.2} {:>12.2}",
            rank + 1,
            projection.name,
            projection.settings.cost,
            projection.breakdown.total,
            projection.breakdown.average_monthly(),
        );
    }

    Ok(())
}

fn print_settings(settings: &OwnershipSettings) {
    println!("  Price: ${:.2}", settings.cost);
    println!("  Down payment: ${:.2}", settings.down_payment);
    println!("  Loan: {:.2}% over {} years", settings.loan_rate * 100.0, settings.loan_years);
    println!("  Expected life: {} years", settings.expected_life);
    println!("  Yearly permit cost: ${:.2}", settings.yearly_permit_cost);
    println!("  Insurance curve: {}", settings.insurance_curve.to_stored());
    println!("  Maintenance curve: {}", settings.maintenance_curve.to_stored());
}

fn print_breakdown(breakdown: &YearlyBreakdown) {
    println!("{:>4} {:>12} {:>12} {:>12} {:>10} {:>12}",
        "Year", "Loan", "Insurance", "Maintenance", "Permit", "Total");
    println!("{}", "-".repeat(67));

    for row in &breakdown.years {
        println!("{:>4} {:>12.2} {:>12.2} {:>12.2} {:>10.2} {:>12.2}",
            row.year + 1,
            row.loan,
            row.insurance,
            row.maintenance,
            row.permit,
            row.total,
        );
    }

    let summary = breakdown.summary();
    println!("\nSummary:");
    println!("  Monthly loan payment: ${:.2}", breakdown.loan.monthly_payment);
    println!("  Loan interest: ${:.2}", breakdown.loan.total_interest());
    println!("  Paid upfront: ${:.2}", summary.upfront);
    println!("  Total loan: ${:.2}", summary.total_loan);
    println!("  Total insurance: ${:.2}", summary.total_insurance);
    println!("  Total maintenance: ${:.2}", summary.total_maintenance);
    println!("  Total permits: ${:.2}", summary.total_permit);
    println!("  Total cost: ${:.2}", summary.total);
    println!("  Average yearly: ${:.2}", summary.average_yearly);
    println!("  Average monthly: ${:.2}", summary.average_monthly);
}

fn print_vehicle_line(vehicle: &Vehicle) {
    println!("{:<32} {:>12.2}", vehicle.name, vehicle.cost);
}

fn print_vehicle(vehicle: &Vehicle) {
    println!("{}", vehicle.name);
    println!("  Price: ${:.2}", vehicle.cost);
    match vehicle.yearly_permit_cost {
        Some(permit) => println!("  Yearly permit cost: ${:.2}", permit),
        None => println!("  Yearly permit cost: (default)"),
    }
    println!("  Insurance curve: {}", vehicle.insurance_points.as_deref().unwrap_or("(default)"));
    println!("  Maintenance curve: {}", vehicle.maintenance_points.as_deref().unwrap_or("(default)"));
    if let Some(updated) = vehicle.updated_at {
        println!("  Updated: {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ownership_cost::CostError;

    #[test]
    fn test_negative_scenario_values_reach_validation() {
        let cli = Cli::try_parse_from([
            "ownership_cost", "cost", "--price", "30000",
            "--loan-rate", "-0.01", "--down-payment", "-500",
        ])
        .unwrap();

        let Command::Cost(args) = cli.command else {
            panic!("expected the cost command");
        };
        assert_eq!(args.scenario.loan_rate, Some(-0.01));
        assert_eq!(args.scenario.down_payment, Some(-500.0));

        let runner = args.scenario.runner();
        let err = runner
            .run_overrides(runner.overrides_for_price(30000.0))
            .unwrap_err();
        assert_eq!(err, CostError::InvalidRate(-0.01));
    }
}
