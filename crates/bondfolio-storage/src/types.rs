//! Core storage types.
//!
//! This module defines the records kept by the persistence layer and the
//! inputs used to create and update them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bondfolio_bonds::BondTerms;
use bondfolio_core::types::{Currency, InterestKind, Role};

use crate::error::{StorageError, StorageResult};

// =============================================================================
// BONDS
// =============================================================================

/// A stored bond definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Currency the bond is denominated in.
    pub currency: Currency,
    /// Valuation inputs.
    pub terms: BondTerms,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for a new bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBond {
    /// Display name; must not be blank.
    pub name: String,
    /// Currency the bond is denominated in.
    pub currency: Currency,
    /// Valuation inputs.
    pub terms: BondTerms,
}

impl NewBond {
    /// Creates a new bond input.
    pub fn new(name: impl Into<String>, currency: Currency, terms: BondTerms) -> Self {
        Self {
            name: name.into(),
            currency,
            terms,
        }
    }

    /// Validates the input and stamps it into a record.
    pub fn into_record(self) -> StorageResult<BondRecord> {
        let name = validate_name(self.name)?;
        self.terms.validate()?;

        let now = Utc::now();
        Ok(BondRecord {
            id: Uuid::new_v4(),
            name,
            currency: self.currency,
            terms: self.terms,
            created_at: now,
            updated_at: now,
        })
    }
}

/// A partial bond update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BondUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New currency.
    pub currency: Option<Currency>,
    /// Replacement terms.
    pub terms: Option<BondTerms>,
}

impl BondUpdate {
    /// Returns true if nothing would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.currency.is_none() && self.terms.is_none()
    }
}

impl BondRecord {
    /// Applies an update, validating the result and bumping `updated_at`.
    ///
    /// On error the record is left untouched.
    pub fn apply(&mut self, update: BondUpdate) -> StorageResult<()> {
        let name = update.name.map(validate_name).transpose()?;
        if let Some(terms) = &update.terms {
            terms.validate()?;
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(terms) = update.terms {
            self.terms = terms;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Criteria for listing bonds. Unset fields match every bond.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BondFilter {
    /// Case-insensitive substring of the name.
    pub search: Option<String>,
    /// Exact currency.
    pub currency: Option<Currency>,
    /// Interest basis of the market rate.
    pub interest: Option<InterestKind>,
}

impl BondFilter {
    /// Returns true if no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.currency.is_none() && self.interest.is_none()
    }

    /// Returns true if `bond` meets every criterion.
    pub fn matches(&self, bond: &BondRecord) -> bool {
        if let Some(search) = &self.search {
            if !bond.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        if self.currency.is_some_and(|c| c != bond.currency) {
            return false;
        }
        if self.interest.is_some_and(|k| k != bond.terms.interest_type.kind()) {
            return false;
        }
        true
    }
}

fn validate_name(name: String) -> StorageResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StorageError::validation("name", "must not be empty"));
    }
    Ok(trimmed.to_string())
}

// =============================================================================
// USERS
// =============================================================================

/// Investor classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestorType {
    /// A private individual.
    Individual,
    /// A fund, bank, insurer or similar.
    Institutional,
}

/// Investor risk appetite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    /// Capital preservation first.
    Conservative,
    /// Balanced.
    Moderate,
    /// Return first.
    Aggressive,
}

macro_rules! impl_keyword_enum {
    ($ty:ident, $field:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Returns the identifier used in files and on the command line.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = StorageError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(StorageError::validation(
                        $field,
                        format!("unknown value '{}'", s),
                    )),
                }
            }
        }
    };
}

impl_keyword_enum!(InvestorType, "investor_type", {
    Individual => "individual",
    Institutional => "institutional",
});

impl_keyword_enum!(RiskProfile, "risk_profile", {
    Conservative => "conservative",
    Moderate => "moderate",
    Aggressive => "aggressive",
});

/// Role-specific profile data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UserProfile {
    /// Details of an issuing company.
    Issuer {
        /// Legal company name.
        company_name: Option<String>,
        /// Taxpayer registration number.
        ruc: Option<String>,
        /// Industry sector.
        sector: Option<String>,
    },
    /// Details of an investor.
    Investor {
        /// Individual or institutional.
        investor_type: Option<InvestorType>,
        /// Risk appetite.
        risk_profile: Option<RiskProfile>,
        /// Amount available to invest.
        investment_amount: Option<f64>,
    },
}

impl UserProfile {
    /// An empty profile for `role`.
    pub fn empty(role: Role) -> Self {
        match role {
            Role::Issuer => Self::Issuer {
                company_name: None,
                ruc: None,
                sector: None,
            },
            Role::Investor => Self::Investor {
                investor_type: None,
                risk_profile: None,
                investment_amount: None,
            },
        }
    }

    /// The role this profile belongs to.
    pub fn role(&self) -> Role {
        match self {
            Self::Issuer { .. } => Role::Issuer,
            Self::Investor { .. } => Role::Investor,
        }
    }

    fn validate(&self, role: Role) -> StorageResult<()> {
        if self.role() != role {
            return Err(StorageError::validation(
                "profile",
                format!("a {} profile cannot belong to an {}", self.role(), role),
            ));
        }
        if let Self::Investor {
            investment_amount: Some(amount),
            ..
        } = self
        {
            if !amount.is_finite() || *amount < 0.0 {
                return Err(StorageError::validation(
                    "investment_amount",
                    "must be a non-negative amount",
                ));
            }
        }
        Ok(())
    }
}

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Login name, unique across the store.
    pub username: String,
    /// Login password. Blank on every record handed out by a store.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Issuer or investor.
    pub role: Role,
    /// Contact email.
    pub email: String,
    /// Role-specific details.
    pub profile: UserProfile,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last successful login.
    pub last_login: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// A copy with the password blanked.
    #[must_use]
    pub fn without_password(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }

    /// Applies an update, validating the result.
    ///
    /// On error the record is left untouched.
    pub fn apply(&mut self, update: UserUpdate) -> StorageResult<()> {
        let name = update.name.map(validate_name).transpose()?;
        if let Some(password) = &update.password {
            validate_password(password)?;
        }
        if let Some(profile) = &update.profile {
            profile.validate(self.role)?;
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email.trim().to_string();
        }
        if let Some(password) = update.password {
            self.password = password;
        }
        if let Some(profile) = update.profile {
            self.profile = profile;
        }
        Ok(())
    }
}

/// Input for a new user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Issuer or investor.
    pub role: Role,
    /// Contact email.
    pub email: String,
    /// Role-specific details; an empty profile is used if absent.
    pub profile: Option<UserProfile>,
}

impl NewUser {
    /// Validates the input and stamps it into a record.
    pub fn into_record(self) -> StorageResult<UserRecord> {
        let username = self.username.trim().to_string();
        if username.is_empty() || username.contains(char::is_whitespace) {
            return Err(StorageError::validation(
                "username",
                "must be non-empty and contain no spaces",
            ));
        }
        validate_password(&self.password)?;
        let name = validate_name(self.name)?;

        let profile = self.profile.unwrap_or_else(|| UserProfile::empty(self.role));
        profile.validate(self.role)?;

        Ok(UserRecord {
            id: Uuid::new_v4(),
            username,
            password: self.password,
            name,
            role: self.role,
            email: self.email.trim().to_string(),
            profile,
            created_at: Utc::now(),
            last_login: None,
        })
    }
}

/// A partial user update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New password.
    pub password: Option<String>,
    /// Replacement profile; must match the user's role.
    pub profile: Option<UserProfile>,
}

fn validate_password(password: &str) -> StorageResult<()> {
    if password.is_empty() {
        return Err(StorageError::validation("password", "must not be empty"));
    }
    Ok(())
}

/// The demo accounts seeded into a fresh store.
///
/// `admin` acts as an issuer.
pub fn demo_users() -> Vec<NewUser> {
    let user = |username: &str, password: &str, name: &str, role| NewUser {
        username: username.to_string(),
        password: password.to_string(),
        name: name.to_string(),
        role,
        email: format!("{username}@bondfolio.local"),
        profile: None,
    };

    vec![
        user("emisor", "emisor123", "Empresa Emisora", Role::Issuer),
        user("inversor", "inversor123", "Inversor Demo", Role::Investor),
        user("admin", "admin123", "Administrador", Role::Issuer),
    ]
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Point-in-time copy of a store, used for JSON backups.
///
/// User passwords are always blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All bonds in creation order.
    pub bonds: Vec<BondRecord>,
    /// All users in registration order.
    pub users: Vec<UserRecord>,
    /// When the snapshot was taken.
    pub exported_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondfolio_bonds::TransactionCosts;

    fn terms() -> BondTerms {
        BondTerms::builder()
            .nominal_value(1000.0)
            .coupon_rate(0.08)
            .maturity_periods(10)
            .frequency(2)
            .market_rate(0.09)
            .costs(TransactionCosts::NONE)
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_bond_trims_name() {
        let record = NewBond::new("  Corp 2030 ", Currency::USD, terms())
            .into_record()
            .unwrap();
        assert_eq!(record.name, "Corp 2030");
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_filter_matches() {
        let record = NewBond::new("Corp Soberano", Currency::USD, terms())
            .into_record()
            .unwrap();

        assert!(BondFilter::default().is_empty());
        assert!(BondFilter::default().matches(&record));

        let by_name = BondFilter {
            search: Some("soberANO".into()),
            ..Default::default()
        };
        assert!(by_name.matches(&record));

        let wrong_currency = BondFilter {
            search: Some("corp".into()),
            currency: Some(Currency::PEN),
            ..Default::default()
        };
        assert!(!wrong_currency.matches(&record));

        let nominal_only = BondFilter {
            interest: Some(InterestKind::Nominal),
            ..Default::default()
        };
        assert!(!nominal_only.matches(&record));
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = NewBond::new("   ", Currency::PEN, terms())
            .into_record()
            .unwrap_err();
        assert!(matches!(err, StorageError::Validation { field: "name", .. }));
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let mut bad = terms();
        bad.grace_periods = 10;
        let err = NewBond::new("Bad", Currency::PEN, bad)
            .into_record()
            .unwrap_err();
        assert!(matches!(err, StorageError::Bond(_)));
    }

    #[test]
    fn test_failed_update_leaves_record() {
        let mut record = NewBond::new("Corp", Currency::PEN, terms())
            .into_record()
            .unwrap();
        let before = record.clone();

        let update = BondUpdate {
            name: Some("Renamed".to_string()),
            terms: Some(BondTerms {
                frequency: 0,
                ..terms()
            }),
            ..Default::default()
        };
        assert!(record.apply(update).is_err());
        assert_eq!(record, before);
    }

    #[test]
    fn test_profile_must_match_role() {
        let user = NewUser {
            username: "acme".to_string(),
            password: "secret".to_string(),
            name: "Acme".to_string(),
            role: Role::Issuer,
            email: "acme@example.com".to_string(),
            profile: Some(UserProfile::empty(Role::Investor)),
        };
        assert!(matches!(
            user.into_record(),
            Err(StorageError::Validation { field: "profile", .. })
        ));
    }

    #[test]
    fn test_username_without_spaces() {
        let mut user = demo_users().remove(0);
        user.username = "two words".to_string();
        assert!(user.into_record().is_err());
    }

    #[test]
    fn test_without_password() {
        let record = demo_users().remove(1).into_record().unwrap();
        assert_eq!(record.password, "inversor123");
        assert!(record.without_password().password.is_empty());
        assert_eq!(record.profile.role(), Role::Investor);
    }

    #[test]
    fn test_keyword_enums() {
        assert_eq!(
            "Institutional".parse::<InvestorType>().unwrap(),
            InvestorType::Institutional
        );
        assert_eq!(RiskProfile::Moderate.to_string(), "moderate");
        assert!("reckless".parse::<RiskProfile>().is_err());
    }

    #[test]
    fn test_profile_json_shape() {
        let profile = UserProfile::Investor {
            investor_type: Some(InvestorType::Individual),
            risk_profile: Some(RiskProfile::Aggressive),
            investment_amount: Some(5000.0),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["kind"], "investor");
        assert_eq!(json["risk_profile"], "aggressive");
    }
}
