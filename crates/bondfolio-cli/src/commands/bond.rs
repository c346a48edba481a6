//! Bond command implementation.
//!
//! Stores bond definitions and values them on demand.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use bondfolio_analytics::analyze_bond;
use bondfolio_bonds::BondTerms;
use bondfolio_config::AppConfig;
use bondfolio_core::{Currency, GraceType, InterestKind};
use bondfolio_storage::{BondFilter, BondRecord, BondStore, BondUpdate, NewBond};

use crate::cli::OutputFormat;
use crate::commands::analyze::print_valuation;
use crate::commands::{percent_to_rate, resolve_bond, short_id, validate_amount, TermsArgs};
use crate::context::Context;
use crate::error::{CliError, CliResult};
use crate::export::{report_file_name, summary_file_name, write_bond_report, write_bond_summary};
use crate::output::{
    format_amount, format_percent, print_header, print_output, print_single, KeyValue,
};

/// Arguments for the bond command.
#[derive(Args, Debug)]
pub struct BondArgs {
    #[command(subcommand)]
    pub command: BondCommand,
}

/// Bond subcommands.
#[derive(Subcommand, Debug)]
pub enum BondCommand {
    /// Store a new bond
    Add(AddArgs),

    /// List stored bonds
    List(ListArgs),

    /// Average coupon and market rates of stored bonds
    Stats(ListArgs),

    /// Show a stored bond and its valuation
    Show(ShowArgs),

    /// Change a stored bond
    Update(UpdateArgs),

    /// Delete a stored bond
    Delete(DeleteArgs),

    /// Export a bond report, or a summary of all bonds, as CSV
    Export(ExportArgs),
}

/// Arguments for add subcommand.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    #[command(flatten)]
    pub terms: TermsArgs,
}

/// Filters shared by the list and stats subcommands.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only bonds whose name contains this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only bonds in this currency
    #[arg(long)]
    pub currency: Option<Currency>,

    /// Only bonds whose market rate has this interest basis
    #[arg(long)]
    pub interest: Option<InterestKind>,
}

impl From<ListArgs> for BondFilter {
    fn from(args: ListArgs) -> Self {
        Self {
            search: args.search,
            currency: args.currency,
            interest: args.interest,
        }
    }
}

/// Arguments for show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Bond ID, ID prefix, or name
    pub bond: String,

    /// Show the cash flow schedule
    #[arg(long)]
    pub cash_flow: bool,
}

/// Arguments for update subcommand. Omitted options keep their value.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Bond ID, ID prefix, or name
    pub bond: String,

    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// New currency
    #[arg(long)]
    pub currency: Option<Currency>,

    /// Nominal (face) value
    #[arg(short, long)]
    pub nominal: Option<f64>,

    /// Annual coupon rate (as percentage)
    #[arg(short, long)]
    pub coupon: Option<f64>,

    /// Number of coupon periods until maturity
    #[arg(short, long)]
    pub periods: Option<u32>,

    /// Coupon payments per year
    #[arg(long)]
    pub frequency: Option<u32>,

    /// Annual market rate (as percentage)
    #[arg(short, long)]
    pub market: Option<f64>,

    /// Number of grace periods
    #[arg(long)]
    pub grace_periods: Option<u32>,

    /// Grace type: none, partial, or total
    #[arg(long)]
    pub grace_type: Option<GraceType>,

    /// Interest basis of the market rate
    #[arg(long)]
    pub interest: Option<InterestKind>,

    /// Compounding periods per year for a nominal rate
    #[arg(long)]
    pub capitalization: Option<u32>,

    /// Issuer transaction costs (as percentage of price)
    #[arg(long)]
    pub issuer_cost: Option<f64>,

    /// Investor transaction costs (as percentage of price)
    #[arg(long)]
    pub investor_cost: Option<f64>,
}

/// Arguments for delete subcommand.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Bond ID, ID prefix, or name
    pub bond: String,
}

/// Arguments for export subcommand.
#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("target").required(true).args(["bond", "summary"]))]
pub struct ExportArgs {
    /// Bond ID, ID prefix, or name
    pub bond: Option<String>,

    /// Export the summary of all bonds instead of one report
    #[arg(long)]
    pub summary: bool,

    /// Output file [default: dated file name in the current directory]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the bond command.
pub fn execute(args: BondArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.storage()?;

    match args.command {
        BondCommand::Add(add) => {
            let config = ctx.config()?.get()?;
            let terms = add.terms.to_terms(&config)?;
            let currency = add.terms.currency_or(&config);

            let record = storage.add_bond(NewBond::new(add.name, currency, terms))?;
            tracing::info!(id = %record.id, "added bond");

            print_record(&record, ctx, &format!("Added bond '{}' ({})", record.name, record.id))?;
        }

        BondCommand::List(list) => {
            let filter = BondFilter::from(list);
            let bonds = storage.find_bonds(&filter)?;
            if bonds.is_empty() && ctx.format() == OutputFormat::Table {
                if filter.is_empty() {
                    ctx.info("No bonds stored yet; add one with `bondfolio bond add`");
                } else {
                    ctx.info("No bonds match the given filters");
                }
                return Ok(());
            }
            match ctx.format() {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bonds)?),
                OutputFormat::Minimal => {
                    for bond in &bonds {
                        println!("{}\t{}", bond.id, bond.name);
                    }
                }
                format => {
                    let rows: Vec<BondRow> = bonds.iter().map(BondRow::from).collect();
                    print_output(&rows, format)?;
                }
            }
        }

        BondCommand::Stats(list) => {
            let bonds = storage.find_bonds(&BondFilter::from(list))?;
            let stats = BondStats::from_bonds(&bonds);

            match ctx.format() {
                OutputFormat::Table => {
                    print_header("Bond statistics");
                    print_output(&stats.rows(), OutputFormat::Table)?;
                }
                OutputFormat::Json => print_single(&stats, OutputFormat::Json)?,
                OutputFormat::Csv => print_output(&stats.rows(), OutputFormat::Csv)?,
                OutputFormat::Minimal => println!(
                    "{}\t{}\t{}",
                    stats.count,
                    stats.average_coupon_rate.map_or_else(|| "-".to_string(), format_percent),
                    stats.average_market_rate.map_or_else(|| "-".to_string(), format_percent),
                ),
            }
        }

        BondCommand::Show(show) => {
            let bond = resolve_bond(&storage, &show.bond)?;
            let result = analyze_bond(&bond.terms)?;

            if ctx.format() == OutputFormat::Table {
                print_header(&format!("Bond: {}", bond.name));
                print_output(&describe(&bond), OutputFormat::Table)?;
            }
            print_valuation("Valuation", &result, bond.currency, show.cash_flow, ctx.format())?;
        }

        BondCommand::Update(update) => {
            let bond = resolve_bond(&storage, &update.bond)?;
            let config = ctx.config()?.get()?;
            let changes = update.to_update(&bond, &config)?;
            if changes.is_empty() {
                return Err(CliError::EmptyUpdate.into());
            }

            let record = storage.update_bond(bond.id, changes)?;
            tracing::info!(id = %record.id, "updated bond");

            print_record(&record, ctx, &format!("Updated bond '{}'", record.name))?;
        }

        BondCommand::Delete(delete) => {
            let bond = resolve_bond(&storage, &delete.bond)?;
            if !storage.delete_bond(bond.id)? {
                return Err(CliError::BondNotFound(delete.bond).into());
            }
            tracing::info!(id = %bond.id, "deleted bond");
            ctx.success(&format!("Deleted bond '{}'", bond.name));
        }

        BondCommand::Export(export) => {
            let today = Utc::now().date_naive();

            let path = if export.summary {
                let bonds = storage.list_bonds()?;
                let path = export
                    .output
                    .unwrap_or_else(|| PathBuf::from(summary_file_name(today)));
                let file = File::create(&path).map_err(|e| CliError::write(&path, e))?;
                write_bond_summary(BufWriter::new(file), &bonds, Utc::now())?;
                path
            } else {
                let query = export.bond.unwrap_or_default();
                let bond = resolve_bond(&storage, &query)?;
                let result = analyze_bond(&bond.terms)?;
                let path = export
                    .output
                    .unwrap_or_else(|| PathBuf::from(report_file_name(&bond.name, today)));
                let file = File::create(&path).map_err(|e| CliError::write(&path, e))?;
                write_bond_report(BufWriter::new(file), &bond, &result)?;
                path
            };

            tracing::info!(path = %path.display(), "exported CSV");
            ctx.success(&format!("Exported to {}", path.display()));
        }
    }

    Ok(())
}

/// Reports a stored bond after a change.
fn print_record(record: &BondRecord, ctx: &Context, message: &str) -> Result<()> {
    match ctx.format() {
        OutputFormat::Table => ctx.success(message),
        OutputFormat::Json => print_single(record, OutputFormat::Json)?,
        OutputFormat::Csv => print_output(&[BondRow::from(record)], OutputFormat::Csv)?,
        OutputFormat::Minimal => println!("{}", record.id),
    }
    Ok(())
}

impl UpdateArgs {
    /// Turns the options into a storage update. Terms are only included when
    /// a term option was given.
    fn to_update(&self, bond: &BondRecord, config: &AppConfig) -> CliResult<BondUpdate> {
        let mut terms: BondTerms = bond.terms.clone();
        let mut touched = false;

        if let Some(nominal) = self.nominal {
            terms.nominal_value = validate_amount("nominal value", nominal)?;
            touched = true;
        }
        if let Some(coupon) = self.coupon {
            terms.coupon_rate = percent_to_rate("coupon rate", coupon)?;
            touched = true;
        }
        if let Some(periods) = self.periods {
            terms.maturity_periods = periods;
            touched = true;
        }
        if let Some(frequency) = self.frequency {
            terms.frequency = frequency;
            touched = true;
        }
        if let Some(market) = self.market {
            terms.market_rate = percent_to_rate("market rate", market)?;
            touched = true;
        }
        if let Some(grace_periods) = self.grace_periods {
            terms.grace_periods = grace_periods;
            touched = true;
        }
        if let Some(grace_type) = self.grace_type {
            terms.grace_type = grace_type;
            touched = true;
        }
        if self.interest.is_some() || self.capitalization.is_some() {
            let kind = self.interest.unwrap_or_else(|| terms.interest_type.kind());
            let capitalization = self
                .capitalization
                .or_else(|| terms.interest_type.capitalization())
                .unwrap_or(config.capitalization);
            terms.interest_type = kind.with_capitalization(capitalization);
            touched = true;
        }
        if let Some(cost) = self.issuer_cost {
            terms.costs.issuer = percent_to_rate("issuer cost", cost)?;
            touched = true;
        }
        if let Some(cost) = self.investor_cost {
            terms.costs.investor = percent_to_rate("investor cost", cost)?;
            touched = true;
        }

        Ok(BondUpdate {
            name: self.name.clone(),
            currency: self.currency,
            terms: touched.then_some(terms),
        })
    }
}

/// One bond in `bond list`.
#[derive(Debug, Serialize, Tabled)]
struct BondRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Nominal")]
    nominal: String,
    #[tabled(rename = "Coupon")]
    coupon: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Periods")]
    periods: u32,
    #[tabled(rename = "Freq")]
    frequency: u32,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&BondRecord> for BondRow {
    fn from(bond: &BondRecord) -> Self {
        Self {
            id: short_id(&bond.id),
            name: bond.name.clone(),
            currency: bond.currency.code().to_string(),
            nominal: format_amount(bond.terms.nominal_value, bond.currency),
            coupon: format_percent(bond.terms.coupon_rate),
            market: format_percent(bond.terms.market_rate),
            periods: bond.terms.maturity_periods,
            frequency: bond.terms.frequency,
            created: bond.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Aggregates over a set of stored bonds.
#[derive(Debug, Serialize)]
struct BondStats {
    count: usize,
    average_coupon_rate: Option<f64>,
    average_market_rate: Option<f64>,
}

impl BondStats {
    fn from_bonds(bonds: &[BondRecord]) -> Self {
        let mean = |rate: fn(&BondTerms) -> f64| {
            (!bonds.is_empty())
                .then(|| bonds.iter().map(|b| rate(&b.terms)).sum::<f64>() / bonds.len() as f64)
        };
        Self {
            count: bonds.len(),
            average_coupon_rate: mean(|t| t.coupon_rate),
            average_market_rate: mean(|t| t.market_rate),
        }
    }

    fn rows(&self) -> Vec<KeyValue> {
        let rate = |key: &str, value: Option<f64>| match value {
            Some(value) => KeyValue::from_percent(key, value),
            None => KeyValue::new(key, "-"),
        };
        vec![
            KeyValue::new("Bonds", self.count.to_string()),
            rate("Average coupon rate", self.average_coupon_rate),
            rate("Average market rate", self.average_market_rate),
        ]
    }
}

/// The stored terms of a bond as key-value rows.
fn describe(bond: &BondRecord) -> Vec<KeyValue> {
    let terms = &bond.terms;
    let mut rows = vec![
        KeyValue::new("ID", bond.id.to_string()),
        KeyValue::new("Currency", bond.currency.code()),
        KeyValue::from_amount("Nominal value", terms.nominal_value, bond.currency),
        KeyValue::from_percent("Coupon rate", terms.coupon_rate),
        KeyValue::new("Periods", terms.maturity_periods.to_string()),
        KeyValue::new("Frequency", terms.frequency.to_string()),
        KeyValue::from_percent("Market rate", terms.market_rate),
        KeyValue::new("Interest type", terms.interest_type.to_string()),
    ];
    if terms.grace_periods > 0 {
        rows.push(KeyValue::new(
            "Grace",
            format!("{} periods ({})", terms.grace_periods, terms.grace_type),
        ));
    }
    if terms.costs.issuer > 0.0 || terms.costs.investor > 0.0 {
        rows.push(KeyValue::from_percent("Issuer costs", terms.costs.issuer));
        rows.push(KeyValue::from_percent("Investor costs", terms.costs.investor));
    }
    rows
}
