//! CLI command implementations.

pub mod analyze;
pub mod backup;
pub mod bond;
pub mod config;
pub mod user;

// Re-export submodules for convenience
pub use analyze::AnalyzeArgs;
pub use backup::BackupArgs;
pub use bond::BondArgs;
pub use config::ConfigArgs;
pub use user::UserArgs;

use clap::Args;
use uuid::Uuid;

use bondfolio_bonds::{BondTerms, TransactionCosts};
use bondfolio_config::AppConfig;
use bondfolio_core::{Currency, GraceType, InterestKind};
use bondfolio_storage::{BondRecord, BondStore};

use crate::error::{CliError, CliResult};

/// Shortest ID prefix accepted when looking a bond up.
const MIN_ID_PREFIX: usize = 4;

/// Bond terms given on the command line. Rates are percentages.
#[derive(Args, Debug, Clone)]
pub struct TermsArgs {
    /// Nominal (face) value
    #[arg(short, long, default_value = "1000")]
    pub nominal: f64,

    /// Annual coupon rate (as percentage, e.g., 10 for 10%)
    #[arg(short, long)]
    pub coupon: f64,

    /// Number of coupon periods until maturity
    #[arg(short, long)]
    pub periods: u32,

    /// Coupon payments per year: 1=Annual, 2=SemiAnnual, 4=Quarterly, 12=Monthly
    #[arg(long, default_value = "1")]
    pub frequency: u32,

    /// Annual market (discount) rate (as percentage)
    #[arg(short, long)]
    pub market: f64,

    /// Number of grace periods at the start of the bond's life
    #[arg(long, default_value = "0")]
    pub grace_periods: u32,

    /// Grace type: none, partial (coupon paid), or total (nothing paid)
    #[arg(long, default_value = "none")]
    pub grace_type: GraceType,

    /// Interest basis of the market rate: effective or nominal [default: from config]
    #[arg(long)]
    pub interest: Option<InterestKind>,

    /// Compounding periods per year for a nominal rate [default: from config]
    #[arg(long)]
    pub capitalization: Option<u32>,

    /// Currency: PEN, USD, EUR [default: from config]
    #[arg(long)]
    pub currency: Option<Currency>,

    /// Issuer transaction costs (as percentage of price)
    #[arg(long, default_value = "0")]
    pub issuer_cost: f64,

    /// Investor transaction costs (as percentage of price)
    #[arg(long, default_value = "0")]
    pub investor_cost: f64,
}

impl TermsArgs {
    /// Builds validated terms, filling the interest basis from `config`.
    pub fn to_terms(&self, config: &AppConfig) -> CliResult<BondTerms> {
        let interest = self
            .interest
            .unwrap_or(config.interest_type)
            .with_capitalization(self.capitalization.unwrap_or(config.capitalization));

        let terms = BondTerms::builder()
            .nominal_value(validate_amount("nominal value", self.nominal)?)
            .coupon_rate(percent_to_rate("coupon rate", self.coupon)?)
            .maturity_periods(self.periods)
            .frequency(self.frequency)
            .market_rate(percent_to_rate("market rate", self.market)?)
            .grace(self.grace_periods, self.grace_type)
            .interest_type(interest)
            .costs(TransactionCosts::new(
                percent_to_rate("issuer cost", self.issuer_cost)?,
                percent_to_rate("investor cost", self.investor_cost)?,
            ))
            .build()?;

        Ok(terms)
    }

    /// The currency to display, falling back to `config`.
    pub fn currency_or(&self, config: &AppConfig) -> Currency {
        self.currency.unwrap_or(config.currency)
    }
}

/// Converts a percentage argument to a decimal rate.
pub fn percent_to_rate(name: &'static str, value: f64) -> CliResult<f64> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(CliError::InvalidPercent { name, value });
    }
    Ok(value / 100.0)
}

/// Validates a money amount.
pub fn validate_amount(name: &'static str, value: f64) -> CliResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CliError::InvalidAmount { name, value });
    }
    Ok(value)
}

/// Finds a stored bond by full ID, unique ID prefix, or exact name
/// (case-insensitive).
pub fn resolve_bond(store: &impl BondStore, query: &str) -> CliResult<BondRecord> {
    let query = query.trim();

    if let Ok(id) = Uuid::parse_str(query) {
        return store
            .get_bond(id)?
            .ok_or_else(|| CliError::BondNotFound(query.to_string()));
    }

    let bonds = store.list_bonds()?;

    let by_name: Vec<&BondRecord> = bonds
        .iter()
        .filter(|b| b.name.eq_ignore_ascii_case(query))
        .collect();
    if let [bond] = by_name.as_slice() {
        return Ok((*bond).clone());
    }

    let prefix = query.to_ascii_lowercase();
    let by_id: Vec<&BondRecord> = if prefix.len() >= MIN_ID_PREFIX {
        bonds
            .iter()
            .filter(|b| b.id.to_string().starts_with(&prefix))
            .collect()
    } else {
        Vec::new()
    };

    match (by_id.as_slice(), by_name.len()) {
        ([bond], 0) => Ok((*bond).clone()),
        ([], 0) => Err(CliError::BondNotFound(query.to_string())),
        (ids, names) => Err(CliError::AmbiguousBond {
            query: query.to_string(),
            matches: ids.len() + names,
        }),
    }
}

/// First eight characters of an ID, for tables.
pub fn short_id(id: &Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondfolio_storage::{InMemoryStorage, NewBond};
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        terms: TermsArgs,
    }

    fn parse(args: &[&str]) -> TermsArgs {
        let mut argv = vec!["harness"];
        argv.extend_from_slice(args);
        Harness::parse_from(argv).terms
    }

    #[test]
    fn test_terms_from_percentages() {
        let args = parse(&["--coupon", "10", "--periods", "4", "--market", "12"]);
        let terms = args.to_terms(&AppConfig::default()).unwrap();

        assert_eq!(terms.nominal_value, 1000.0);
        assert!((terms.coupon_rate - 0.10).abs() < 1e-15);
        assert!((terms.market_rate - 0.12).abs() < 1e-15);
        assert_eq!(terms.frequency, 1);
        assert_eq!(terms.grace_type, GraceType::None);
        assert_eq!(terms.interest_type.kind(), InterestKind::Effective);
    }

    #[test]
    fn test_terms_use_config_for_interest_basis() {
        let config = AppConfig {
            interest_type: InterestKind::Nominal,
            capitalization: 4,
            ..AppConfig::default()
        };

        let args = parse(&["-c", "8", "-p", "6", "-m", "9"]);
        let terms = args.to_terms(&config).unwrap();
        assert_eq!(terms.interest_type.capitalization(), Some(4));

        let args = parse(&["-c", "8", "-p", "6", "-m", "9", "--capitalization", "360"]);
        let terms = args.to_terms(&config).unwrap();
        assert_eq!(terms.interest_type.capitalization(), Some(360));

        let args = parse(&["-c", "8", "-p", "6", "-m", "9", "--interest", "effective"]);
        let terms = args.to_terms(&config).unwrap();
        assert_eq!(terms.interest_type.capitalization(), None);
    }

    #[test]
    fn test_terms_reject_bad_values() {
        let config = AppConfig::default();

        let args = parse(&["-c", "150", "-p", "4", "-m", "12"]);
        assert!(matches!(
            args.to_terms(&config),
            Err(CliError::InvalidPercent { name: "coupon rate", .. })
        ));

        let args = parse(&["-c", "10", "-p", "4", "-m", "12", "--grace-periods", "4"]);
        assert!(matches!(args.to_terms(&config), Err(CliError::Bond(_))));
    }

    fn store_with(names: &[&str]) -> (InMemoryStorage, Vec<BondRecord>) {
        let store = InMemoryStorage::new();
        let terms = parse(&["-c", "10", "-p", "4", "-m", "12"])
            .to_terms(&AppConfig::default())
            .unwrap();
        let records = names
            .iter()
            .map(|n| {
                store
                    .add_bond(NewBond::new(*n, Currency::PEN, terms.clone()))
                    .unwrap()
            })
            .collect();
        (store, records)
    }

    #[test]
    fn test_resolve_bond_by_id_prefix_and_name() {
        let (store, records) = store_with(&["Alpha", "Beta"]);

        let full = records[0].id.to_string();
        assert_eq!(resolve_bond(&store, &full).unwrap().name, "Alpha");
        assert_eq!(resolve_bond(&store, &full[..8]).unwrap().name, "Alpha");
        assert_eq!(resolve_bond(&store, "beta").unwrap().id, records[1].id);
    }

    #[test]
    fn test_resolve_bond_failures() {
        let (store, _) = store_with(&["Alpha", "Alpha"]);

        assert!(matches!(
            resolve_bond(&store, "Gamma"),
            Err(CliError::BondNotFound(_))
        ));
        assert!(matches!(
            resolve_bond(&store, "alpha"),
            Err(CliError::AmbiguousBond { matches: 2, .. })
        ));
        assert!(matches!(
            resolve_bond(&store, &Uuid::new_v4().to_string()),
            Err(CliError::BondNotFound(_))
        ));
    }
}
