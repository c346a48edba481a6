//! Domain types shared across the workspace.

mod currency;
mod grace;
mod interest;
mod role;

pub use currency::Currency;
pub use grace::GraceType;
pub use interest::{InterestKind, InterestType};
pub use role::Role;
