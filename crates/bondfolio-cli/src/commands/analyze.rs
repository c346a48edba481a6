//! Analyze command implementation.
//!
//! Values bond terms given on the command line without storing them.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondfolio_analytics::{analyze_bond, ValuationResult};
use bondfolio_bonds::CashFlowSchedule;
use bondfolio_core::Currency;

use crate::cli::OutputFormat;
use crate::commands::TermsArgs;
use crate::context::Context;
use crate::output::{format_fixed, print_header, print_output, print_warning, KeyValue};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub terms: TermsArgs,

    /// Show the cash flow schedule
    #[arg(long)]
    pub cash_flow: bool,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, ctx: &Context) -> Result<()> {
    let config = ctx.config()?.get()?;
    let terms = args.terms.to_terms(&config)?;
    let currency = args.terms.currency_or(&config);

    let result = analyze_bond(&terms)?;
    tracing::info!(
        present_value = result.present_value,
        converged = result.converged(),
        "valued ad-hoc bond"
    );

    print_valuation("Bond Valuation", &result, currency, args.cash_flow, ctx.format())
}

/// Prints a valuation in the requested format. Shared with `bond show`.
pub fn print_valuation(
    title: &str,
    result: &ValuationResult,
    currency: Currency,
    cash_flow: bool,
    format: OutputFormat,
) -> Result<()> {
    let summary: Vec<KeyValue> = result
        .summary()
        .iter()
        .map(|field| KeyValue::from_summary(field, currency))
        .collect();

    match format {
        OutputFormat::Table => {
            print_header(title);
            print_output(&summary, format)?;
            warn_if_unconverged(result);

            if cash_flow {
                print_header("Cash Flow");
                print_output(&cash_flow_rows(&result.cash_flow), format)?;
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Csv => {
            if cash_flow {
                print_output(&cash_flow_rows(&result.cash_flow), format)?;
            } else {
                print_output(&summary, format)?;
            }
        }
        OutputFormat::Minimal => {
            // Output just the price
            println!("{}", format_fixed(result.present_value, 2));
        }
    }

    Ok(())
}

fn warn_if_unconverged(result: &ValuationResult) {
    for (label, solution) in [
        ("TCEA", &result.cost_rate),
        ("TREA", &result.return_rate),
    ] {
        if !solution.converged {
            print_warning(&format!(
                "{} did not converge after {} iterations (residual {:.3e}); value is a best effort",
                label, solution.iterations, solution.residual
            ));
        }
    }
}

/// One schedule row for display.
#[derive(Debug, Serialize, Tabled)]
pub struct CashFlowRow {
    #[tabled(rename = "Period")]
    pub period: u32,
    #[tabled(rename = "Coupon")]
    pub coupon: String,
    #[tabled(rename = "Principal")]
    pub principal: String,
    #[tabled(rename = "Total")]
    pub total: String,
    #[tabled(rename = "Outstanding")]
    pub outstanding: String,
}

/// Formats a schedule for display.
pub fn cash_flow_rows(schedule: &CashFlowSchedule) -> Vec<CashFlowRow> {
    schedule
        .iter()
        .map(|entry| CashFlowRow {
            period: entry.period,
            coupon: format_fixed(entry.coupon, 2),
            principal: format_fixed(entry.principal_payment, 2),
            total: format_fixed(entry.total_payment, 2),
            outstanding: format_fixed(entry.outstanding_balance, 2),
        })
        .collect()
}
