//! Bank accounts reported by the aggregator.

mod core;
mod handlers;

pub use core::{Account, AccountSnapshot, UNKNOWN_ACCOUNT_NAME, normalize_accounts};
pub use handlers::{get_accounts_endpoint, replace_accounts_endpoint};
