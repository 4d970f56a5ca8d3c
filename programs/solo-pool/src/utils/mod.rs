//! Shared helpers for the pool accountant.

pub mod math;
pub mod validation;

pub use validation::validate_address;

pub use math::{
    mul_div_ceil, mul_div_floor, share_to_underlying, shares_to_burn_for_distribution,
    underlying_to_share, withdrawal_amounts, WithdrawalAmounts, RATE_DENOMINATOR,
};
