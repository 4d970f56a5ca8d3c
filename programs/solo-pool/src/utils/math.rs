//! Integer conversion math between underlying value and pool-token shares.
//!
//! # Rounding Discipline
//!
//! All conversions are exact integer arithmetic with an explicit rounding
//! direction per operation:
//!
//! - underlying -> shares rounds UP (a depositor is never handed fewer
//!   shares than their value entitles them to);
//! - shares -> underlying rounds DOWN (a redemption never pays out more
//!   underlying than the shares are worth);
//! - the withdrawal fee rounds DOWN (the fee never exceeds its nominal
//!   fraction of the gross amount).
//!
//! Intermediate products are widened to `u128`; anything that cannot be
//! represented is a hard `ArithmeticOverflow` error, never a silent wrap.

use anchor_lang::prelude::*;

use crate::error::AccountantError;

/// Denominator for parts-per-million fee rates.
pub const RATE_DENOMINATOR: u64 = 1_000_000;

/// `floor(a * b / c)` with a widened intermediate product.
pub fn mul_div_floor(a: u64, b: u64, c: u64) -> Result<u64> {
    require!(c != 0, AccountantError::DivideByZero);
    let product = (a as u128)
        .checked_mul(b as u128)
        .ok_or(error!(AccountantError::ArithmeticOverflow))?;
    u64::try_from(product / c as u128)
        .map_err(|_| error!(AccountantError::ArithmeticOverflow))
}

/// `ceil(a * b / c)` with a widened intermediate product.
pub fn mul_div_ceil(a: u64, b: u64, c: u64) -> Result<u64> {
    require!(c != 0, AccountantError::DivideByZero);
    let product = (a as u128)
        .checked_mul(b as u128)
        .ok_or(error!(AccountantError::ArithmeticOverflow))?;
    let quotient = product / c as u128;
    let rounded = if product % c as u128 != 0 {
        // quotient < product <= u128::MAX, so the increment cannot wrap
        quotient + 1
    } else {
        quotient
    };
    u64::try_from(rounded).map_err(|_| error!(AccountantError::ArithmeticOverflow))
}

/// Converts pool-token shares to underlying value: `floor(share * staked / supply)`.
///
/// Returns 0 when no shares exist (there is nothing to redeem against).
pub fn share_to_underlying(share_amount: u64, staked_balance: u64, supply: u64) -> Result<u64> {
    if supply == 0 {
        return Ok(0);
    }
    mul_div_floor(share_amount, staked_balance, supply)
}

/// Converts underlying value to pool-token shares: `ceil(amount * supply / staked)`.
///
/// Takes an explicit supply/staked snapshot so callers can price against the
/// state as it stood before their own update in the same operation. A zero
/// staked balance is a caller error here; the bootstrap case (zero supply,
/// zero staked) is priced 1:1 by the funding path and never reaches this
/// function.
pub fn underlying_to_share(underlying_amount: u64, supply: u64, staked_balance: u64) -> Result<u64> {
    mul_div_ceil(underlying_amount, supply, staked_balance)
}

/// Number of self-held shares to burn so that the backing of every share
/// held outside the reserve rises by exactly `distribute_amount` underlying.
///
/// Burning reserve shares shrinks the supply without moving any underlying,
/// which lifts the implied backing of every remaining share. With
/// `S = supply`, `T = staked`, `R = self_held` and `v = distribute_amount * S`,
/// the burn amount is `floor(v * S / (v + T * (S - R)))`.
pub fn shares_to_burn_for_distribution(
    distribute_amount: u64,
    staked_balance: u64,
    supply: u64,
    self_held: u64,
) -> Result<u64> {
    if distribute_amount == 0 {
        return Ok(0);
    }
    let external_shares = supply
        .checked_sub(self_held)
        .ok_or(error!(AccountantError::ArithmeticOverflow))?;

    let v = (distribute_amount as u128)
        .checked_mul(supply as u128)
        .ok_or(error!(AccountantError::ArithmeticOverflow))?;
    let numerator = v
        .checked_mul(supply as u128)
        .ok_or(error!(AccountantError::ArithmeticOverflow))?;
    let denominator = v
        .checked_add(
            (staked_balance as u128)
                .checked_mul(external_shares as u128)
                .ok_or(error!(AccountantError::ArithmeticOverflow))?,
        )
        .ok_or(error!(AccountantError::ArithmeticOverflow))?;
    require!(denominator != 0, AccountantError::DivideByZero);

    u64::try_from(numerator / denominator)
        .map_err(|_| error!(AccountantError::ArithmeticOverflow))
}

/// Breakdown of a withdrawal into gross value, fee, and net payout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalAmounts {
    pub gross_underlying: u64,
    pub fee_underlying: u64,
    pub net_underlying: u64,
}

/// Computes the withdrawal breakdown for `share_amount` shares.
///
/// This is the single source of truth for withdrawal pricing: the withdraw
/// handler and the off-chain quote both go through here, so a pre-flight
/// quote matches the executed result given unchanged state.
pub fn withdrawal_amounts(
    share_amount: u64,
    staked_balance: u64,
    supply: u64,
    fee_ppm: u32,
) -> Result<WithdrawalAmounts> {
    let gross_underlying = share_to_underlying(share_amount, staked_balance, supply)?;
    let fee_underlying = mul_div_floor(gross_underlying, fee_ppm as u64, RATE_DENOMINATOR)?;
    let net_underlying = gross_underlying
        .checked_sub(fee_underlying)
        .ok_or(error!(AccountantError::ArithmeticOverflow))?;
    Ok(WithdrawalAmounts {
        gross_underlying,
        fee_underlying,
        net_underlying,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_floor_rounds_down() {
        assert_eq!(mul_div_floor(10, 3, 7).unwrap(), 4); // 30/7 = 4.28..
        assert_eq!(mul_div_floor(10, 7, 7).unwrap(), 10);
        assert_eq!(mul_div_floor(0, 1000, 7).unwrap(), 0);
    }

    #[test]
    fn test_mul_div_ceil_rounds_up() {
        assert_eq!(mul_div_ceil(10, 3, 7).unwrap(), 5);
        assert_eq!(mul_div_ceil(10, 7, 7).unwrap(), 10);
        assert_eq!(mul_div_ceil(0, 1000, 7).unwrap(), 0);
    }

    #[test]
    fn test_mul_div_zero_denominator() {
        assert!(mul_div_floor(1, 1, 0).is_err());
        assert!(mul_div_ceil(1, 1, 0).is_err());
    }

    #[test]
    fn test_mul_div_result_overflow() {
        // product fits u128 but the quotient does not fit u64
        assert!(mul_div_floor(u64::MAX, 2, 1).is_err());
        assert!(mul_div_ceil(u64::MAX, 2, 1).is_err());
    }

    #[test]
    fn test_share_to_underlying_empty_supply() {
        assert_eq!(share_to_underlying(1000, 0, 0).unwrap(), 0);
        assert_eq!(share_to_underlying(1000, 5000, 0).unwrap(), 0);
    }

    #[test]
    fn test_underlying_to_share_zero_staked_is_error() {
        assert!(underlying_to_share(1000, 1000, 0).is_err());
    }

    #[test]
    fn test_conversion_at_par() {
        // supply == staked means a 1:1 rate in both directions
        assert_eq!(underlying_to_share(500, 1000, 1000).unwrap(), 500);
        assert_eq!(share_to_underlying(500, 1000, 1000).unwrap(), 500);
    }

    #[test]
    fn test_conversion_appreciated_rate() {
        // 1000 shares backed by 1500 underlying: each share is worth 1.5
        assert_eq!(share_to_underlying(100, 1500, 1000).unwrap(), 150);
        assert_eq!(share_to_underlying(1, 1500, 1000).unwrap(), 1); // floor(1.5)
        // depositing 150 underlying entitles to 100 shares exactly
        assert_eq!(underlying_to_share(150, 1000, 1500).unwrap(), 100);
        // depositing 1 underlying entitles to ceil(2/3) = 1 share
        assert_eq!(underlying_to_share(1, 1000, 1500).unwrap(), 1);
    }

    #[test]
    fn test_withdrawal_amounts_fee_floor() {
        // fee = floor(gross * 1000 / 1_000_000)
        let amounts = withdrawal_amounts(500, 1000, 1000, 1000).unwrap();
        assert_eq!(amounts.gross_underlying, 500);
        assert_eq!(amounts.fee_underlying, 0);
        assert_eq!(amounts.net_underlying, 500);

        let amounts = withdrawal_amounts(5000, 1_000_000, 1_000_000, 1000).unwrap();
        assert_eq!(amounts.gross_underlying, 5000);
        assert_eq!(amounts.fee_underlying, 5);
        assert_eq!(amounts.net_underlying, 4995);
    }

    #[test]
    fn test_withdrawal_amounts_full_rate() {
        let amounts = withdrawal_amounts(100, 1000, 1000, RATE_DENOMINATOR as u32).unwrap();
        assert_eq!(amounts.fee_underlying, 100);
        assert_eq!(amounts.net_underlying, 0);
    }

    #[test]
    fn test_distribution_burn_zero_amount() {
        assert_eq!(
            shares_to_burn_for_distribution(0, 1000, 1000, 500).unwrap(),
            0
        );
    }

    #[test]
    fn test_distribution_burn_basic() {
        // S = 1000, T = 1000, R = 500, distribute 100:
        // v = 100_000, numerator = 1e8, denominator = 100_000 + 1000*500
        // => floor(100_000_000 / 600_000) = 166
        assert_eq!(
            shares_to_burn_for_distribution(100, 1000, 1000, 500).unwrap(),
            166
        );
    }

    #[test]
    fn test_distribution_burn_raises_external_backing() {
        let staked: u64 = 1_000_000;
        let supply: u64 = 1_000_000;
        let self_held: u64 = 400_000;
        let distribute: u64 = 50_000;
        let external = supply - self_held;

        let burn =
            shares_to_burn_for_distribution(distribute, staked, supply, self_held).unwrap();
        assert_eq!(burn, 76_923); // floor(5e16 / 6.5e11)

        // per-external-share backing in 1e9 fixed point: the burn lifts it
        // toward `before + distribute / external` without overshooting
        let before = staked as u128 * 1_000_000_000 / supply as u128;
        let after = staked as u128 * 1_000_000_000 / (supply - burn) as u128;
        let target = before + distribute as u128 * 1_000_000_000 / external as u128;
        assert!(after > before);
        assert!(after <= target);
    }

    #[test]
    fn test_distribution_burn_self_held_exceeds_supply() {
        assert!(shares_to_burn_for_distribution(100, 1000, 1000, 2000).is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Ceiling then floor: the depositor is never under-represented,
        /// and the excess is bounded by the value of a single rounding step.
        #[test]
        fn prop_round_trip_bounds(
            amount in 1u64..1_000_000_000,
            supply in 1u64..1_000_000_000,
            staked in 1u64..1_000_000_000,
        ) {
            let shares = underlying_to_share(amount, supply, staked).unwrap();
            let back = share_to_underlying(shares, staked, supply).unwrap();
            prop_assert!(back >= amount);
            prop_assert!(
                (back as u128) <= amount as u128 + staked as u128 / supply as u128 + 1
            );
        }

        /// Floor then ceiling never redeems into more shares than were burned.
        #[test]
        fn prop_redeem_then_restake_never_gains_shares(
            shares in 1u64..1_000_000_000,
            supply in 1u64..1_000_000_000,
            staked in 1u64..1_000_000_000,
        ) {
            let value = share_to_underlying(shares, staked, supply).unwrap();
            if value > 0 {
                let restaked = underlying_to_share(value, supply, staked).unwrap();
                prop_assert!(restaked <= shares);
            }
        }

        /// The fee never exceeds its nominal fraction and net + fee == gross.
        #[test]
        fn prop_withdrawal_fee_conserves_gross(
            shares in 0u64..1_000_000_000,
            supply in 1u64..1_000_000_000,
            staked in 0u64..1_000_000_000,
            fee_ppm in 0u32..=RATE_DENOMINATOR as u32,
        ) {
            let amounts = withdrawal_amounts(shares, staked, supply, fee_ppm).unwrap();
            prop_assert_eq!(
                amounts.gross_underlying,
                amounts.fee_underlying + amounts.net_underlying
            );
            prop_assert!(
                amounts.fee_underlying as u128
                    <= amounts.gross_underlying as u128 * fee_ppm as u128
                        / RATE_DENOMINATOR as u128
            );
        }

        /// The distribution burn never exceeds the supply, and external
        /// holders never end up with more than the distributed amount:
        /// `E*T/(S-burn) <= E*T/S + amount` cross-multiplied in u128.
        #[test]
        fn prop_distribution_burn_bounded(
            amount in 1u64..1_000_000,
            staked in 1u64..1_000_000,
            supply in 1u64..1_000_000,
            self_held_fraction in 0u64..=100,
        ) {
            let self_held = supply * self_held_fraction / 100;
            let burn =
                shares_to_burn_for_distribution(amount, staked, supply, self_held).unwrap();
            prop_assert!(burn <= supply);
            let external = (supply - self_held) as u128;
            if external > 0 && burn < supply {
                let lhs = external * staked as u128 * supply as u128;
                let rhs = (external * staked as u128 + amount as u128 * supply as u128)
                    * (supply - burn) as u128;
                prop_assert!(lhs <= rhs);
            }
        }
    }
}
