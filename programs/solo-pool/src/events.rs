use anchor_lang::prelude::*;

// =========================================================================
// ADMIN EVENTS
// =========================================================================

#[event]
pub struct AccountantInitialized {
    pub accountant: Pubkey,
    pub authority: Pubkey,
    pub network: Pubkey,
    pub underlying_mint: Pubkey,
    pub pool_token_mint: Pubkey,
    pub claim_token_mint: Pubkey,
    pub withdrawal_fee_ppm: u32,
    pub timestamp: i64,
}

#[event]
pub struct NetworkUpdated {
    pub accountant: Pubkey,
    pub old_network: Pubkey,
    pub new_network: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct FundingManagerUpdated {
    pub accountant: Pubkey,
    pub old_funding_manager: Pubkey,
    pub new_funding_manager: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct WithdrawalFeeUpdated {
    pub accountant: Pubkey,
    pub old_fee_ppm: u32,
    pub new_fee_ppm: u32,
    pub timestamp: i64,
}

#[event]
pub struct AccountantPaused {
    pub accountant: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AccountantUnpaused {
    pub accountant: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityTransferInitiated {
    pub accountant: Pubkey,
    pub current_authority: Pubkey,
    pub pending_authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityTransferCompleted {
    pub accountant: Pubkey,
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityTransferCancelled {
    pub accountant: Pubkey,
    pub authority: Pubkey,
    pub cancelled_pending: Pubkey,
    pub timestamp: i64,
}

// =========================================================================
// POOL CONFIGURATION EVENTS
// =========================================================================

#[event]
pub struct PoolRegistered {
    pub accountant: Pubkey,
    pub pool: Pubkey,
    pub funding_account: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PoolWhitelistUpdated {
    pub accountant: Pubkey,
    pub pool: Pubkey,
    pub is_whitelisted: bool,
    pub timestamp: i64,
}

#[event]
pub struct FundingLimitUpdated {
    pub accountant: Pubkey,
    pub pool: Pubkey,
    pub old_limit: u64,
    pub new_limit: u64,
    pub timestamp: i64,
}

// =========================================================================
// PROVIDER EVENTS
// =========================================================================

/// Emitted when a provider position is opened or grown via the network.
///
/// `share_amount` is the exact number of pool tokens handed to the provider
/// for `underlying_amount`; `claim_amount` is the companion claim issue,
/// which can be smaller than `share_amount` for migrating positions.
#[event]
pub struct Deposited {
    pub context_id: [u8; 32],
    pub accountant: Pubkey,
    pub provider: Pubkey,
    pub underlying_amount: u64,
    pub share_amount: u64,
    pub claim_amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct Withdrawn {
    pub context_id: [u8; 32],
    pub accountant: Pubkey,
    pub provider: Pubkey,
    pub share_amount: u64,
    pub gross_underlying: u64,
    pub fee_underlying: u64,
    pub net_underlying: u64,
    pub timestamp: i64,
}

// =========================================================================
// FUNDING EVENTS
// =========================================================================

#[event]
pub struct FundingRequested {
    pub context_id: [u8; 32],
    pub accountant: Pubkey,
    pub pool: Pubkey,
    pub underlying_amount: u64,
    pub share_amount: u64,
    pub pool_funded: u64,
    pub timestamp: i64,
}

#[event]
pub struct FundingRenounced {
    pub context_id: [u8; 32],
    pub accountant: Pubkey,
    pub pool: Pubkey,
    pub requested_amount: u64,
    pub reduced_amount: u64,
    pub share_amount: u64,
    pub pool_funded: u64,
    pub timestamp: i64,
}

#[event]
pub struct FeesCollected {
    pub accountant: Pubkey,
    pub pool: Pubkey,
    pub fee_amount: u64,
    pub is_trade_fee: bool,
    pub timestamp: i64,
}

/// Emitted whenever the aggregate backing of the share supply changes.
#[event]
pub struct TotalLiquidityUpdated {
    pub accountant: Pubkey,
    pub staked_balance: u64,
    pub pool_token_supply: u64,
    pub timestamp: i64,
}
