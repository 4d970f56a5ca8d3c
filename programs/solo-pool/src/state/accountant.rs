//! Pool Accountant State
//!
//! The accountant is the value-conversion engine of the single-sided pool:
//! it owns the staked-balance scalar, the withdrawal fee rate, and the role
//! configuration, and it prices every conversion between underlying value
//! and pool-token shares.
//!
//! # Custody layout
//!
//! All token movement is delegated to SPL accounts owned by the accountant's
//! token-authority PDA:
//! - `pool_token_reserve` holds the self-held shares minted at funding time
//!   and handed out to providers on deposit;
//! - `underlying_custody` receives underlying from the network ahead of a
//!   deposit, where it is burned;
//! - `claim_custody` receives claim tokens from the network ahead of a
//!   withdrawal, where they are burned;
//! - `master_vault` is the externally visible underlying balance that
//!   funding requests mint into and renouncements burn out of.
//!
//! Provider shares and self-held shares live on the same mint, so
//! `provider shares + reserve balance == pool token supply` holds by
//! construction.

use anchor_lang::prelude::*;

use crate::error::AccountantError;
use crate::utils::math;

#[account]
pub struct PoolAccountant {
    /// Admin allowed to rotate roles and configuration
    pub authority: Pubkey,

    /// Pending admin for two-step authority transfer
    pub pending_authority: Pubkey,

    /// Coordinator: sole caller of deposit/withdraw/fee notification
    pub network: Pubkey,

    /// Role allowed to request and renounce pool funding
    pub funding_manager: Pubkey,

    /// Base value unit the pool accounts for
    pub underlying_mint: Pubkey,

    /// Fungible receipt token representing proportional pool claims
    pub pool_token_mint: Pubkey,

    /// Companion claim token issued 1:1 with shares handed to providers
    pub claim_token_mint: Pubkey,

    /// Self-held share reserve (token-authority owned)
    pub pool_token_reserve: Pubkey,

    /// Underlying parked by the network ahead of deposits
    pub underlying_custody: Pubkey,

    /// Claim tokens parked by the network ahead of withdrawals
    pub claim_custody: Pubkey,

    /// External vault balance backing outstanding funding
    pub master_vault: Pubkey,

    /// Aggregate underlying value backing all outstanding shares
    pub staked_balance: u64,

    /// Withdrawal fee in parts per million
    pub withdrawal_fee_ppm: u32,

    /// Circuit breaker for all non-admin operations
    pub is_paused: bool,

    /// Number of deposits processed (lifetime)
    pub total_deposits: u64,

    /// Number of withdrawals processed (lifetime)
    pub total_withdrawals: u64,

    /// Creation timestamp
    pub created_at: i64,

    /// Last activity timestamp
    pub last_activity_at: i64,

    /// PDA bump seed
    pub bump: u8,

    /// Bump seed of the token-authority PDA
    pub token_authority_bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl PoolAccountant {
    pub const LEN: usize = 8      // discriminator
        + 32 * 11                 // pubkeys
        + 8                       // staked_balance
        + 4                       // withdrawal_fee_ppm
        + 1                       // is_paused
        + 8                       // total_deposits
        + 8                       // total_withdrawals
        + 8                       // created_at
        + 8                       // last_activity_at
        + 1                       // bump
        + 1                       // token_authority_bump
        + 32; // reserved

    /// Upper bound on the withdrawal fee rate: 10%
    pub const MAX_WITHDRAWAL_FEE_PPM: u32 = 100_000;

    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        &mut self,
        authority: Pubkey,
        network: Pubkey,
        funding_manager: Pubkey,
        underlying_mint: Pubkey,
        pool_token_mint: Pubkey,
        claim_token_mint: Pubkey,
        pool_token_reserve: Pubkey,
        underlying_custody: Pubkey,
        claim_custody: Pubkey,
        master_vault: Pubkey,
        withdrawal_fee_ppm: u32,
        bump: u8,
        token_authority_bump: u8,
        timestamp: i64,
    ) {
        self.authority = authority;
        self.pending_authority = Pubkey::default();
        self.network = network;
        self.funding_manager = funding_manager;
        self.underlying_mint = underlying_mint;
        self.pool_token_mint = pool_token_mint;
        self.claim_token_mint = claim_token_mint;
        self.pool_token_reserve = pool_token_reserve;
        self.underlying_custody = underlying_custody;
        self.claim_custody = claim_custody;
        self.master_vault = master_vault;
        self.staked_balance = 0;
        self.withdrawal_fee_ppm = withdrawal_fee_ppm;
        self.is_paused = false;
        self.total_deposits = 0;
        self.total_withdrawals = 0;
        self.created_at = timestamp;
        self.last_activity_at = timestamp;
        self.bump = bump;
        self.token_authority_bump = token_authority_bump;
        self._reserved = [0u8; 32];
    }

    // =========================================================================
    // Guard Methods
    // =========================================================================

    #[inline]
    pub fn require_not_paused(&self) -> Result<()> {
        require!(!self.is_paused, AccountantError::AccountantPaused);
        Ok(())
    }

    #[inline]
    pub fn require_network(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.network, AccountantError::AccessDenied);
        Ok(())
    }

    #[inline]
    pub fn require_funding_manager(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.funding_manager, AccountantError::AccessDenied);
        Ok(())
    }

    // =========================================================================
    // Conversion Queries
    // =========================================================================

    /// Underlying value of `share_amount` shares at the current rate.
    pub fn share_to_underlying(&self, share_amount: u64, supply: u64) -> Result<u64> {
        math::share_to_underlying(share_amount, self.staked_balance, supply)
    }

    /// Shares a deposit of `underlying_amount` entitles to, against the
    /// given supply snapshot and the current staked balance.
    pub fn underlying_to_share(&self, underlying_amount: u64, supply: u64) -> Result<u64> {
        math::underlying_to_share(underlying_amount, supply, self.staked_balance)
    }

    /// Shares to mint for a funding request of `underlying_amount`.
    ///
    /// With zero supply the pool is bootstrapping: the staked balance must
    /// also be zero (anything else is a corrupt state) and the rate is 1:1.
    pub fn funding_share_amount(&self, underlying_amount: u64, supply: u64) -> Result<u64> {
        if supply == 0 {
            require!(self.staked_balance == 0, AccountantError::InvalidState);
            return Ok(underlying_amount);
        }
        math::underlying_to_share(underlying_amount, supply, self.staked_balance)
    }

    /// Shares to burn at renouncement for a funding reduction of
    /// `reduce_amount`, priced against the pre-update snapshot.
    ///
    /// A zero reduction, an empty supply, or an empty staked balance all
    /// price to zero shares rather than tripping the division guards.
    pub fn renounce_share_amount(&self, reduce_amount: u64, supply: u64) -> Result<u64> {
        if reduce_amount == 0 || supply == 0 || self.staked_balance == 0 {
            return Ok(0);
        }
        math::underlying_to_share(reduce_amount, supply, self.staked_balance)
    }

    /// Withdrawal breakdown for `share_amount` at the configured fee rate.
    pub fn withdrawal_amounts(
        &self,
        share_amount: u64,
        supply: u64,
    ) -> Result<math::WithdrawalAmounts> {
        math::withdrawal_amounts(
            share_amount,
            self.staked_balance,
            supply,
            self.withdrawal_fee_ppm,
        )
    }

    /// Self-held shares to burn to distribute `distribute_amount` of
    /// underlying value to all externally held shares.
    pub fn shares_to_burn_for_distribution(
        &self,
        distribute_amount: u64,
        supply: u64,
        self_held: u64,
    ) -> Result<u64> {
        math::shares_to_burn_for_distribution(
            distribute_amount,
            self.staked_balance,
            supply,
            self_held,
        )
    }

    // =========================================================================
    // Balance Management
    // =========================================================================

    /// Increases the staked balance by a funding request.
    pub fn stake(&mut self, amount: u64) -> Result<()> {
        self.staked_balance = self
            .staked_balance
            .checked_add(amount)
            .ok_or(error!(AccountantError::ArithmeticOverflow))?;
        Ok(())
    }

    /// Decreases the staked balance at renouncement. Saturates at zero so
    /// a renounce path can never drive the aggregate negative.
    pub fn unstake_clamped(&mut self, amount: u64) {
        self.staked_balance = self.staked_balance.saturating_sub(amount);
    }

    /// Accrues collected fees into the staked balance, raising the backing
    /// of every outstanding share without minting new shares.
    pub fn accrue_fees(&mut self, fee_amount: u64) -> Result<()> {
        self.staked_balance = self
            .staked_balance
            .checked_add(fee_amount)
            .ok_or(error!(AccountantError::ArithmeticOverflow))?;
        Ok(())
    }

    pub fn record_deposit(&mut self, timestamp: i64) -> Result<()> {
        self.total_deposits = self
            .total_deposits
            .checked_add(1)
            .ok_or(error!(AccountantError::ArithmeticOverflow))?;
        self.last_activity_at = timestamp;
        Ok(())
    }

    pub fn record_withdrawal(&mut self, timestamp: i64) -> Result<()> {
        self.total_withdrawals = self
            .total_withdrawals
            .checked_add(1)
            .ok_or(error!(AccountantError::ArithmeticOverflow))?;
        self.last_activity_at = timestamp;
        Ok(())
    }

    #[inline]
    pub fn touch(&mut self, timestamp: i64) {
        self.last_activity_at = timestamp;
    }

    #[inline]
    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    pub fn set_withdrawal_fee(&mut self, fee_ppm: u32) -> Result<()> {
        require!(
            fee_ppm <= Self::MAX_WITHDRAWAL_FEE_PPM,
            AccountantError::FeeTooHigh
        );
        self.withdrawal_fee_ppm = fee_ppm;
        Ok(())
    }

    // =========================================================================
    // Authority Transfer
    // =========================================================================

    pub fn initiate_authority_transfer(&mut self, new_authority: Pubkey) -> Result<()> {
        require!(
            new_authority != Pubkey::default(),
            AccountantError::InvalidAuthority
        );
        require!(
            new_authority != self.authority,
            AccountantError::InvalidAuthority
        );
        self.pending_authority = new_authority;
        Ok(())
    }

    pub fn accept_authority_transfer(&mut self, acceptor: Pubkey) -> Result<()> {
        require!(
            self.pending_authority != Pubkey::default(),
            AccountantError::NoPendingAuthority
        );
        require!(
            acceptor == self.pending_authority,
            AccountantError::AccessDenied
        );
        self.authority = self.pending_authority;
        self.pending_authority = Pubkey::default();
        Ok(())
    }

    pub fn cancel_authority_transfer(&mut self) {
        self.pending_authority = Pubkey::default();
    }
}

/// PDA seeds for the accountant and its token authority
impl PoolAccountant {
    pub const SEED_PREFIX: &'static [u8] = b"accountant";
    pub const TOKEN_AUTHORITY_SEED: &'static [u8] = b"token_authority";

    pub fn find_pda(program_id: &Pubkey, underlying_mint: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Self::SEED_PREFIX, underlying_mint.as_ref()],
            program_id,
        )
    }

    pub fn find_token_authority(program_id: &Pubkey, accountant: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Self::TOKEN_AUTHORITY_SEED, accountant.as_ref()],
            program_id,
        )
    }

    pub fn token_authority_seeds<'a>(
        accountant: &'a Pubkey,
        bump: &'a [u8; 1],
    ) -> [&'a [u8]; 3] {
        [Self::TOKEN_AUTHORITY_SEED, accountant.as_ref(), bump]
    }
}

#[cfg(test)]
pub(crate) fn test_accountant(staked_balance: u64, withdrawal_fee_ppm: u32) -> PoolAccountant {
    PoolAccountant {
        authority: Pubkey::new_unique(),
        pending_authority: Pubkey::default(),
        network: Pubkey::new_unique(),
        funding_manager: Pubkey::new_unique(),
        underlying_mint: Pubkey::new_unique(),
        pool_token_mint: Pubkey::new_unique(),
        claim_token_mint: Pubkey::new_unique(),
        pool_token_reserve: Pubkey::new_unique(),
        underlying_custody: Pubkey::new_unique(),
        claim_custody: Pubkey::new_unique(),
        master_vault: Pubkey::new_unique(),
        staked_balance,
        withdrawal_fee_ppm,
        is_paused: false,
        total_deposits: 0,
        total_withdrawals: 0,
        created_at: 0,
        last_activity_at: 0,
        bump: 255,
        token_authority_bump: 255,
        _reserved: [0u8; 32],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_rate_is_one_to_one() {
        let accountant = test_accountant(0, 0);
        assert_eq!(accountant.funding_share_amount(1000, 0).unwrap(), 1000);
    }

    #[test]
    fn test_bootstrap_rejects_corrupt_state() {
        // nonzero staked balance with zero supply must never price funding
        let accountant = test_accountant(500, 0);
        assert!(accountant.funding_share_amount(1000, 0).is_err());
    }

    #[test]
    fn test_funding_share_amount_at_rate() {
        let accountant = test_accountant(2000, 0);
        // supply 1000 backed by 2000: 500 underlying -> ceil(500*1000/2000) = 250
        assert_eq!(accountant.funding_share_amount(500, 1000).unwrap(), 250);
    }

    #[test]
    fn test_renounce_share_amount_guards() {
        let accountant = test_accountant(0, 0);
        assert_eq!(accountant.renounce_share_amount(0, 1000).unwrap(), 0);
        assert_eq!(accountant.renounce_share_amount(100, 0).unwrap(), 0);
        // staked balance zero: nothing to price against
        assert_eq!(accountant.renounce_share_amount(100, 1000).unwrap(), 0);
    }

    #[test]
    fn test_unstake_clamped_saturates() {
        let mut accountant = test_accountant(100, 0);
        accountant.unstake_clamped(250);
        assert_eq!(accountant.staked_balance, 0);
    }

    #[test]
    fn test_set_withdrawal_fee_bounds() {
        let mut accountant = test_accountant(0, 0);
        accountant
            .set_withdrawal_fee(PoolAccountant::MAX_WITHDRAWAL_FEE_PPM)
            .unwrap();
        assert!(accountant
            .set_withdrawal_fee(PoolAccountant::MAX_WITHDRAWAL_FEE_PPM + 1)
            .is_err());
    }

    #[test]
    fn test_authority_transfer_two_step() {
        let mut accountant = test_accountant(0, 0);
        let old = accountant.authority;
        let new = Pubkey::new_unique();

        assert!(accountant.accept_authority_transfer(new).is_err());
        accountant.initiate_authority_transfer(new).unwrap();
        assert!(accountant.accept_authority_transfer(old).is_err());
        accountant.accept_authority_transfer(new).unwrap();
        assert_eq!(accountant.authority, new);
        assert_eq!(accountant.pending_authority, Pubkey::default());
    }

    #[test]
    fn test_authority_transfer_rejects_noop() {
        let mut accountant = test_accountant(0, 0);
        let current = accountant.authority;
        assert!(accountant.initiate_authority_transfer(current).is_err());
        assert!(accountant
            .initiate_authority_transfer(Pubkey::default())
            .is_err());
    }

    /// The concrete lifecycle from the accounting design: fund 1000 at
    /// bootstrap, deposit 500 at par, withdraw 500 at 0.1% fee.
    #[test]
    fn test_lifecycle_scenario() {
        let mut accountant = test_accountant(0, 1000);

        // bootstrap funding of 1000 mints 1000 shares 1:1
        let funded_shares = accountant.funding_share_amount(1000, 0).unwrap();
        assert_eq!(funded_shares, 1000);
        accountant.stake(1000).unwrap();
        assert_eq!(accountant.staked_balance, 1000);

        // deposit of 500 at supply 1000 / staked 1000 entitles to 500 shares
        let share_amount = accountant.underlying_to_share(500, 1000).unwrap();
        assert_eq!(share_amount, 500);

        // withdrawal of those 500 shares: gross 500, fee floor(500*1000/1e6)=0
        let amounts = accountant.withdrawal_amounts(500, 1000).unwrap();
        assert_eq!(amounts.gross_underlying, 500);
        assert_eq!(amounts.fee_underlying, 0);
        assert_eq!(amounts.net_underlying, 500);
    }
}
