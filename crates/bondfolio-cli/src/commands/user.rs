//! User command implementation.
//!
//! Accounts carry a role (issuer or investor) and a role-specific profile.
//! Credentials are compared as stored; this is a local tool, not an
//! authentication service.

use anyhow::Result;
use clap::{Args, Subcommand};

use bondfolio_core::Role;
use bondfolio_storage::{
    InvestorType, NewUser, RiskProfile, UserProfile, UserRecord, UserStore, UserUpdate,
};

use crate::cli::OutputFormat;
use crate::commands::validate_amount;
use crate::context::Context;
use crate::error::{CliError, CliResult};
use crate::output::{format_fixed, print_header, print_output, print_single, KeyValue};

/// Arguments for the user command.
#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands.
#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create an account
    Register(RegisterArgs),

    /// Check credentials and show the account
    Login(CredentialArgs),

    /// Change account details (requires the current password)
    Update(UpdateArgs),
}

/// Username and password.
#[derive(Args, Debug)]
pub struct CredentialArgs {
    /// Username
    #[arg(short, long)]
    pub username: String,

    /// Password
    #[arg(long, env = "BONDFOLIO_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Profile options. Issuer and investor options are mutually exclusive
/// with the other role.
#[derive(Args, Debug, Default)]
pub struct ProfileArgs {
    /// Company name (issuer)
    #[arg(long)]
    pub company_name: Option<String>,

    /// Taxpayer registration number, RUC (issuer)
    #[arg(long)]
    pub ruc: Option<String>,

    /// Industry sector (issuer)
    #[arg(long)]
    pub sector: Option<String>,

    /// Investor type: individual or institutional (investor)
    #[arg(long)]
    pub investor_type: Option<InvestorType>,

    /// Risk profile: conservative, moderate, or aggressive (investor)
    #[arg(long)]
    pub risk_profile: Option<RiskProfile>,

    /// Amount available to invest (investor)
    #[arg(long)]
    pub investment_amount: Option<f64>,
}

/// Arguments for register subcommand.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Role: issuer or investor
    #[arg(long)]
    pub role: Role,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Arguments for update subcommand.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// New password
    #[arg(long)]
    pub new_password: Option<String>,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Execute the user command.
pub fn execute(args: UserArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.storage()?;

    match args.command {
        UserCommand::Register(register) => {
            let profile = register.profile.merge_into(UserProfile::empty(register.role))?;
            let user = storage.create_user(NewUser {
                username: register.credentials.username,
                password: register.credentials.password,
                name: register.name,
                role: register.role,
                email: register.email,
                profile: Some(profile),
            })?;
            tracing::info!(username = %user.username, role = %user.role, "registered user");

            ctx.success(&format!("Registered {} as {}", user.username, user.role));
            show_user(&user, ctx.format())?;
        }

        UserCommand::Login(credentials) => {
            let user = login(&storage, &credentials)?;
            ctx.success(&format!("Welcome, {}", user.name));
            show_user(&user, ctx.format())?;
        }

        UserCommand::Update(update) => {
            let user = login(&storage, &update.credentials)?;

            let profile = if update.profile.is_empty() {
                None
            } else {
                Some(update.profile.merge_into(user.profile.clone())?)
            };
            let changes = UserUpdate {
                name: update.name,
                email: update.email,
                password: update.new_password,
                profile,
            };
            if changes == UserUpdate::default() {
                return Err(CliError::EmptyUpdate.into());
            }

            let user = storage.update_user(user.id, changes)?;
            tracing::info!(username = %user.username, "updated user");

            ctx.success(&format!("Updated {}", user.username));
            show_user(&user, ctx.format())?;
        }
    }

    Ok(())
}

fn login(store: &impl UserStore, credentials: &CredentialArgs) -> CliResult<UserRecord> {
    store
        .find_by_credentials(&credentials.username, &credentials.password)?
        .ok_or(CliError::InvalidCredentials)
}

impl ProfileArgs {
    fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.ruc.is_none()
            && self.sector.is_none()
            && self.investor_type.is_none()
            && self.risk_profile.is_none()
            && self.investment_amount.is_none()
    }

    /// Overlays the given options on `profile`, rejecting options that
    /// belong to the other role.
    fn merge_into(self, profile: UserProfile) -> CliResult<UserProfile> {
        match profile {
            UserProfile::Issuer {
                company_name,
                ruc,
                sector,
            } => {
                let stray = [
                    ("investor-type", self.investor_type.is_some()),
                    ("risk-profile", self.risk_profile.is_some()),
                    ("investment-amount", self.investment_amount.is_some()),
                ];
                if let Some(&(option, _)) = stray.iter().find(|(_, set)| *set) {
                    return Err(CliError::ProfileMismatch {
                        option,
                        role: "investor",
                    });
                }
                Ok(UserProfile::Issuer {
                    company_name: self.company_name.or(company_name),
                    ruc: self.ruc.or(ruc),
                    sector: self.sector.or(sector),
                })
            }
            UserProfile::Investor {
                investor_type,
                risk_profile,
                investment_amount,
            } => {
                let stray = [
                    ("company-name", self.company_name.is_some()),
                    ("ruc", self.ruc.is_some()),
                    ("sector", self.sector.is_some()),
                ];
                if let Some(&(option, _)) = stray.iter().find(|(_, set)| *set) {
                    return Err(CliError::ProfileMismatch {
                        option,
                        role: "issuer",
                    });
                }
                let amount = self
                    .investment_amount
                    .map(|a| validate_amount("investment amount", a))
                    .transpose()?;
                Ok(UserProfile::Investor {
                    investor_type: self.investor_type.or(investor_type),
                    risk_profile: self.risk_profile.or(risk_profile),
                    investment_amount: amount.or(investment_amount),
                })
            }
        }
    }
}

fn show_user(user: &UserRecord, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            print_header("Account");
            print_output(&describe(user), format)?;
        }
        OutputFormat::Csv => print_output(&describe(user), format)?,
        OutputFormat::Json => print_single(user, format)?,
        OutputFormat::Minimal => println!("{}", user.id),
    }
    Ok(())
}

fn describe(user: &UserRecord) -> Vec<KeyValue> {
    fn or_dash(value: Option<String>) -> String {
        value.unwrap_or_else(|| "-".to_string())
    }

    let mut rows = vec![
        KeyValue::new("Username", user.username.as_str()),
        KeyValue::new("Name", user.name.as_str()),
        KeyValue::new("Role", user.role.as_str()),
        KeyValue::new("Email", user.email.as_str()),
    ];

    match &user.profile {
        UserProfile::Issuer {
            company_name,
            ruc,
            sector,
        } => {
            rows.push(KeyValue::new("Company", or_dash(company_name.clone())));
            rows.push(KeyValue::new("RUC", or_dash(ruc.clone())));
            rows.push(KeyValue::new("Sector", or_dash(sector.clone())));
        }
        UserProfile::Investor {
            investor_type,
            risk_profile,
            investment_amount,
        } => {
            rows.push(KeyValue::new(
                "Investor type",
                or_dash(investor_type.map(|t| t.to_string())),
            ));
            rows.push(KeyValue::new(
                "Risk profile",
                or_dash(risk_profile.map(|r| r.to_string())),
            ));
            rows.push(KeyValue::new(
                "Investment amount",
                or_dash(investment_amount.map(|a| format_fixed(a, 2))),
            ));
        }
    }

    if let Some(last_login) = user.last_login {
        rows.push(KeyValue::new(
            "Last login",
            last_login.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investor() -> UserProfile {
        UserProfile::empty(Role::Investor)
    }

    #[test]
    fn test_merge_fills_role_fields() {
        let args = ProfileArgs {
            risk_profile: Some(RiskProfile::Moderate),
            investment_amount: Some(5000.0),
            ..ProfileArgs::default()
        };
        let merged = args.merge_into(investor()).unwrap();
        assert_eq!(
            merged,
            UserProfile::Investor {
                investor_type: None,
                risk_profile: Some(RiskProfile::Moderate),
                investment_amount: Some(5000.0),
            }
        );
    }

    #[test]
    fn test_merge_keeps_existing_values() {
        let existing = UserProfile::Issuer {
            company_name: Some("Acme".into()),
            ruc: Some("20123456789".into()),
            sector: None,
        };
        let args = ProfileArgs {
            sector: Some("Mining".into()),
            ..ProfileArgs::default()
        };
        let merged = args.merge_into(existing).unwrap();
        assert_eq!(
            merged,
            UserProfile::Issuer {
                company_name: Some("Acme".into()),
                ruc: Some("20123456789".into()),
                sector: Some("Mining".into()),
            }
        );
    }

    #[test]
    fn test_merge_rejects_other_role_options() {
        let args = ProfileArgs {
            ruc: Some("20123456789".into()),
            ..ProfileArgs::default()
        };
        assert!(matches!(
            args.merge_into(investor()),
            Err(CliError::ProfileMismatch { option: "ruc", .. })
        ));
    }

    #[test]
    fn test_merge_rejects_negative_amount() {
        let args = ProfileArgs {
            investment_amount: Some(-1.0),
            ..ProfileArgs::default()
        };
        assert!(matches!(
            args.merge_into(investor()),
            Err(CliError::InvalidAmount { .. })
        ));
    }
}
