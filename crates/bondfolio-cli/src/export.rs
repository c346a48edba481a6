//! CSV reports.
//!
//! A bond report has three sections (bond info, financial results, cash
//! flow) separated by blank rows, so records have different lengths and the
//! writer runs in flexible mode.

use std::io;

use chrono::{DateTime, NaiveDate, Utc};

use bondfolio_analytics::{SummaryUnit, ValuationResult};
use bondfolio_storage::BondRecord;

use crate::error::CliResult;
use crate::output::format_fixed;

/// Cash flow table header.
pub const CASH_FLOW_HEADERS: [&str; 5] = ["Period", "Coupon", "Principal", "Total", "Outstanding"];

/// Bond summary table header.
pub const SUMMARY_HEADERS: [&str; 11] = [
    "Name",
    "Nominal value",
    "Coupon rate (%)",
    "Periods",
    "Frequency",
    "Market rate (%)",
    "Grace periods",
    "Grace type",
    "Currency",
    "Interest type",
    "Created",
];

fn percent(rate: f64) -> String {
    format!("{}%", format_fixed(rate * 100.0, 4))
}

fn flexible_writer<W: io::Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().flexible(true).from_writer(writer)
}

fn pair<W: io::Write>(wtr: &mut csv::Writer<W>, label: &str, value: &str) -> csv::Result<()> {
    wtr.write_record([label, value])
}

/// Writes the full report for one bond.
pub fn write_bond_report<W: io::Write>(
    writer: W,
    bond: &BondRecord,
    result: &ValuationResult,
) -> CliResult<()> {
    let terms = &bond.terms;
    let mut wtr = flexible_writer(writer);

    wtr.write_record(["BOND INFO"])?;
    pair(&mut wtr, "Name", bond.name.as_str())?;
    pair(&mut wtr, "Nominal value", &terms.nominal_value.to_string())?;
    pair(&mut wtr, "Coupon rate", &percent(terms.coupon_rate))?;
    pair(&mut wtr, "Periods", &terms.maturity_periods.to_string())?;
    pair(&mut wtr, "Frequency", &terms.frequency.to_string())?;
    pair(&mut wtr, "Market rate", &percent(terms.market_rate))?;
    pair(&mut wtr, "Grace periods", &terms.grace_periods.to_string())?;
    pair(&mut wtr, "Grace type", terms.grace_type.as_str())?;
    pair(&mut wtr, "Currency", bond.currency.code())?;
    pair(&mut wtr, "Interest type", terms.interest_type.kind().as_str())?;
    if let Some(capitalization) = terms.interest_type.capitalization() {
        pair(&mut wtr, "Capitalization", &capitalization.to_string())?;
    }
    pair(&mut wtr, "Issuer costs", &percent(terms.costs.issuer))?;
    pair(&mut wtr, "Investor costs", &percent(terms.costs.investor))?;
    wtr.write_record([""])?;

    wtr.write_record(["FINANCIAL RESULTS"])?;
    for field in result.summary() {
        let value = match field.unit {
            SummaryUnit::Percent => percent(field.value),
            SummaryUnit::Amount => format_fixed(field.value, 2),
            SummaryUnit::Years | SummaryUnit::Plain => format_fixed(field.value, 4),
        };
        wtr.write_record([field.label, value.as_str()])?;
    }
    wtr.write_record([""])?;

    wtr.write_record(["CASH FLOW"])?;
    wtr.write_record(CASH_FLOW_HEADERS)?;
    for entry in &result.cash_flow {
        wtr.write_record([
            entry.period.to_string(),
            format_fixed(entry.coupon, 2),
            format_fixed(entry.principal_payment, 2),
            format_fixed(entry.total_payment, 2),
            format_fixed(entry.outstanding_balance, 2),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes one row per stored bond.
pub fn write_bond_summary<W: io::Write>(
    writer: W,
    bonds: &[BondRecord],
    exported_at: DateTime<Utc>,
) -> CliResult<()> {
    let mut wtr = flexible_writer(writer);

    wtr.write_record(["BOND SUMMARY"])?;
    pair(&mut wtr, "Exported at", &exported_at.format("%Y-%m-%d %H:%M:%S UTC").to_string())?;
    pair(&mut wtr, "Total bonds", &bonds.len().to_string())?;
    wtr.write_record([""])?;

    wtr.write_record(SUMMARY_HEADERS)?;
    for bond in bonds {
        let terms = &bond.terms;
        wtr.write_record([
            bond.name.clone(),
            terms.nominal_value.to_string(),
            format_fixed(terms.coupon_rate * 100.0, 4),
            terms.maturity_periods.to_string(),
            terms.frequency.to_string(),
            format_fixed(terms.market_rate * 100.0, 4),
            terms.grace_periods.to_string(),
            terms.grace_type.as_str().to_string(),
            bond.currency.code().to_string(),
            terms.interest_type.kind().as_str().to_string(),
            bond.created_at.format("%Y-%m-%d").to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Default file name for a bond report, e.g. `bond_Corp_2029_2026-01-31.csv`.
pub fn report_file_name(bond_name: &str, date: NaiveDate) -> String {
    let safe: String = bond_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("bond_{}_{}.csv", safe, date.format("%Y-%m-%d"))
}

/// Default file name for the bond summary.
pub fn summary_file_name(date: NaiveDate) -> String {
    format!("bond_summary_{}.csv", date.format("%Y-%m-%d"))
}
