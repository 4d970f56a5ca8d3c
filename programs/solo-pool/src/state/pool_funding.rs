//! Per-Pool Funding State
//!
//! One account per external trading pool, tracking the outstanding funding
//! allocated to it, the admin-configured ceiling, and the whitelist flag.
//! The funding value is independent of the accountant's aggregate staked
//! balance: only trade-fee accrual moves both together.

use anchor_lang::prelude::*;

use crate::error::AccountantError;

/// Funding account - one per whitelistable trading pool
///
/// PDA Seeds: `[b"pool_funding", accountant.key().as_ref(), pool.as_ref()]`
#[account]
pub struct PoolFunding {
    /// Parent accountant
    pub accountant: Pubkey,

    /// External trading pool this funding belongs to
    pub pool: Pubkey,

    /// Current outstanding funding
    pub funded: u64,

    /// Ceiling on outstanding funding
    pub funding_limit: u64,

    /// Whether funding operations are allowed for this pool
    pub is_whitelisted: bool,

    /// Total funding ever requested (lifetime)
    pub total_requested: u64,

    /// Total funding ever renounced (lifetime)
    pub total_renounced: u64,

    /// Total trade fees accrued to this pool (lifetime)
    pub total_fees: u64,

    /// Registration timestamp
    pub created_at: i64,

    /// Last activity timestamp
    pub last_activity_at: i64,

    /// PDA bump seed
    pub bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 16],
}

impl PoolFunding {
    pub const LEN: usize = 8  // discriminator
        + 32                  // accountant
        + 32                  // pool
        + 8                   // funded
        + 8                   // funding_limit
        + 1                   // is_whitelisted
        + 8                   // total_requested
        + 8                   // total_renounced
        + 8                   // total_fees
        + 8                   // created_at
        + 8                   // last_activity_at
        + 1                   // bump
        + 16; // reserved

    pub fn initialize(&mut self, accountant: Pubkey, pool: Pubkey, bump: u8, timestamp: i64) {
        self.accountant = accountant;
        self.pool = pool;
        self.funded = 0;
        self.funding_limit = 0;
        self.is_whitelisted = false;
        self.total_requested = 0;
        self.total_renounced = 0;
        self.total_fees = 0;
        self.created_at = timestamp;
        self.last_activity_at = timestamp;
        self.bump = bump;
        self._reserved = [0u8; 16];
    }

    #[inline]
    pub fn require_whitelisted(&self) -> Result<()> {
        require!(self.is_whitelisted, AccountantError::PoolNotWhitelisted);
        Ok(())
    }

    /// Remaining headroom under the funding limit, floored at zero.
    pub fn available_funding(&self) -> u64 {
        self.funding_limit.saturating_sub(self.funded)
    }

    /// Raises outstanding funding by `amount`, rejecting any request that
    /// would breach the ceiling. The check and the update happen on the
    /// same account borrow, so no interleaved request can slip past the
    /// limit.
    pub fn record_request(&mut self, amount: u64, timestamp: i64) -> Result<()> {
        let new_funded = self
            .funded
            .checked_add(amount)
            .ok_or(error!(AccountantError::ArithmeticOverflow))?;
        require!(
            new_funded <= self.funding_limit,
            AccountantError::FundingLimitExceeded
        );
        self.funded = new_funded;
        self.total_requested = self
            .total_requested
            .checked_add(amount)
            .ok_or(error!(AccountantError::ArithmeticOverflow))?;
        self.last_activity_at = timestamp;
        Ok(())
    }

    /// Lowers outstanding funding by at most `amount`, clamping to the
    /// current value instead of failing. Returns the amount actually
    /// reduced.
    pub fn record_renounce(&mut self, amount: u64, timestamp: i64) -> Result<u64> {
        let reduce_amount = self.funded.min(amount);
        self.funded -= reduce_amount;
        self.total_renounced = self
            .total_renounced
            .checked_add(reduce_amount)
            .ok_or(error!(AccountantError::ArithmeticOverflow))?;
        self.last_activity_at = timestamp;
        Ok(reduce_amount)
    }

    /// Accrues a trade fee into outstanding funding. Fees are earned value,
    /// not new allocations, so they bypass the funding limit.
    pub fn record_trade_fee(&mut self, fee_amount: u64, timestamp: i64) -> Result<()> {
        self.funded = self
            .funded
            .checked_add(fee_amount)
            .ok_or(error!(AccountantError::ArithmeticOverflow))?;
        self.total_fees = self
            .total_fees
            .checked_add(fee_amount)
            .ok_or(error!(AccountantError::ArithmeticOverflow))?;
        self.last_activity_at = timestamp;
        Ok(())
    }

    pub fn set_whitelisted(&mut self, whitelisted: bool, timestamp: i64) {
        self.is_whitelisted = whitelisted;
        self.last_activity_at = timestamp;
    }

    /// The limit may be set below current funding; only future requests
    /// are constrained by it.
    pub fn set_funding_limit(&mut self, limit: u64, timestamp: i64) {
        self.funding_limit = limit;
        self.last_activity_at = timestamp;
    }
}

/// PDA seeds for PoolFunding
impl PoolFunding {
    pub const SEED_PREFIX: &'static [u8] = b"pool_funding";

    pub fn find_pda(program_id: &Pubkey, accountant: &Pubkey, pool: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Self::SEED_PREFIX, accountant.as_ref(), pool.as_ref()],
            program_id,
        )
    }
}

#[cfg(test)]
pub(crate) fn test_pool_funding(funded: u64, funding_limit: u64) -> PoolFunding {
    PoolFunding {
        accountant: Pubkey::new_unique(),
        pool: Pubkey::new_unique(),
        funded,
        funding_limit,
        is_whitelisted: true,
        total_requested: 0,
        total_renounced: 0,
        total_fees: 0,
        created_at: 0,
        last_activity_at: 0,
        bump: 255,
        _reserved: [0u8; 16],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_within_limit() {
        let mut funding = test_pool_funding(0, 1000);
        funding.record_request(600, 1).unwrap();
        assert_eq!(funding.funded, 600);
        assert_eq!(funding.available_funding(), 400);
    }

    #[test]
    fn test_request_boundary_at_limit_succeeds() {
        let mut funding = test_pool_funding(400, 1000);
        funding.record_request(600, 1).unwrap();
        assert_eq!(funding.funded, 1000);
        assert_eq!(funding.available_funding(), 0);
    }

    #[test]
    fn test_request_beyond_limit_rejected() {
        let mut funding = test_pool_funding(400, 1000);
        assert!(funding.record_request(601, 1).is_err());
        // the rejected request must leave no trace
        assert_eq!(funding.funded, 400);
        assert_eq!(funding.total_requested, 0);
    }

    #[test]
    fn test_renounce_clamps_to_funded() {
        let mut funding = test_pool_funding(300, 1000);
        let reduced = funding.record_renounce(500, 1).unwrap();
        assert_eq!(reduced, 300);
        assert_eq!(funding.funded, 0);
        assert_eq!(funding.total_renounced, 300);
    }

    #[test]
    fn test_trade_fee_bypasses_limit() {
        let mut funding = test_pool_funding(1000, 1000);
        funding.record_trade_fee(50, 1).unwrap();
        assert_eq!(funding.funded, 1050);
        assert_eq!(funding.total_fees, 50);
    }

    #[test]
    fn test_limit_below_funded_constrains_future_only() {
        let mut funding = test_pool_funding(800, 1000);
        funding.set_funding_limit(500, 1);
        assert_eq!(funding.funded, 800);
        assert_eq!(funding.available_funding(), 0);
        assert!(funding.record_request(1, 2).is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// One step of a funding sequence: request or renounce an amount.
    #[derive(Clone, Debug)]
    enum FundingOp {
        Request(u64),
        Renounce(u64),
    }

    fn funding_op() -> impl Strategy<Value = FundingOp> {
        prop_oneof![
            (0u64..2000).prop_map(FundingOp::Request),
            (0u64..2000).prop_map(FundingOp::Renounce),
        ]
    }

    proptest! {
        /// For any sequence of requests and renouncements, outstanding
        /// funding stays within [0, limit].
        #[test]
        fn prop_funding_stays_within_limit(
            limit in 0u64..5000,
            ops in prop::collection::vec(funding_op(), 1..50),
        ) {
            let mut funding = test_pool_funding(0, limit);
            for op in ops {
                match op {
                    FundingOp::Request(amount) => {
                        let _ = funding.record_request(amount, 1);
                    }
                    FundingOp::Renounce(amount) => {
                        funding.record_renounce(amount, 1).unwrap();
                    }
                }
                prop_assert!(funding.funded <= limit);
            }
        }
    }
}
