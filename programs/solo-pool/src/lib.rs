//! Solo Pool - Single-Sided Liquidity Pool Accountant
//!
//! # Overview
//!
//! This program is the accounting core of a single-sided liquidity pool. It
//! tracks a shared balance of a base value unit (the "underlying"), issues a
//! fungible pool token representing proportional claims on that balance, and
//! lets a funding manager allocate or release per-pool "funding" without
//! disturbing providers' claims.
//!
//! # Architecture
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       PoolAccountant                         │
//! │   (authority, network, funding_manager, staked_balance,      │
//! │    withdrawal fee, token topology)                           │
//! └──────────────────────────────────────────────────────────────┘
//!                │                              │
//!                ▼                              ▼
//! ┌───────────────────────────┐     ┌──────────────────────────┐
//! │      PoolFunding[N]       │     │  token-authority PDA     │
//! │  (funded, limit,          │     │  reserve / custody /     │
//! │   whitelist, per pool)    │     │  master vault / 3 mints  │
//! └───────────────────────────┘     └──────────────────────────┘
//! ```
//!
//! # Value Flows
//!
//! - **request_funding**: staked balance and per-pool funding rise, shares
//!   are minted into the accountant's own reserve, underlying is minted
//!   into the master vault.
//! - **deposit_for**: the network parks underlying in custody; the
//!   accountant hands reserve shares to the provider (ceiling-priced),
//!   burns the custodied underlying, and issues claim tokens.
//! - **withdraw**: shares return to the reserve; claim tokens are burned
//!   and net underlying (floor-priced, fee deducted) is minted to the
//!   provider.
//! - **renounce_funding**: funding and staked balance fall (clamped),
//!   reserve shares are burned, vault underlying is destroyed.
//! - **on_fees_collected**: staked balance rises, lifting every share.
//!
//! # Rounding
//!
//! Underlying -> shares rounds up; shares -> underlying rounds down; fees
//! round down. Conversions never pay out more than shares are worth and
//! never hand a depositor fewer shares than their value entitles them to.

use anchor_lang::prelude::*;

pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
mod tests;

use instructions::*;

// Anchor's `#[program]` macro generates client/account helpers that pull
// types from `crate::*`. Re-export the **accounts structs only** (not
// instruction modules) to avoid name collisions with the macro-generated
// `crate::<ix_name>` modules.
pub use instructions::{
    // Accountant / admin
    InitializeAccountant,
    PauseAccountant,
    UnpauseAccountant,
    InitiateAuthorityTransfer,
    AcceptAuthorityTransfer,
    CancelAuthorityTransfer,
    SetNetwork,
    SetFundingManager,
    SetWithdrawalFee,
    // Pool configuration
    RegisterPool,
    SetPoolWhitelisted,
    SetFundingLimit,
    // Network flows
    DepositFor,
    Withdraw,
    OnFeesCollected,
    // Funding flows
    RequestFunding,
    RenounceFunding,
};

// ---------------------------------------------------------------------------
// Anchor client accounts shims (private)
//
// Anchor's program codegen expects `crate::__client_accounts_<ix_name>`
// modules to exist at the crate root. `#[derive(Accounts)]` generates these
// modules in the same module as the account struct; in this codebase they
// live under `instructions/*`.
//
// We create *private* crate-root aliases so Anchor's generated `accounts`
// module can resolve them without changing the public API surface.
// ---------------------------------------------------------------------------
#[allow(unused_imports)]
use instructions::admin::authority::__client_accounts_accept_authority_transfer as __client_accounts_accept_authority_transfer;
#[allow(unused_imports)]
use instructions::admin::authority::__client_accounts_cancel_authority_transfer as __client_accounts_cancel_authority_transfer;
#[allow(unused_imports)]
use instructions::admin::authority::__client_accounts_initiate_authority_transfer as __client_accounts_initiate_authority_transfer;
#[allow(unused_imports)]
use instructions::admin::configure::__client_accounts_set_funding_manager as __client_accounts_set_funding_manager;
#[allow(unused_imports)]
use instructions::admin::configure::__client_accounts_set_network as __client_accounts_set_network;
#[allow(unused_imports)]
use instructions::admin::configure::__client_accounts_set_withdrawal_fee as __client_accounts_set_withdrawal_fee;
#[allow(unused_imports)]
use instructions::admin::pause::__client_accounts_pause_accountant as __client_accounts_pause_accountant;
#[allow(unused_imports)]
use instructions::admin::pause::__client_accounts_unpause_accountant as __client_accounts_unpause_accountant;
#[allow(unused_imports)]
use instructions::configure_pool::__client_accounts_set_funding_limit as __client_accounts_set_funding_limit;
#[allow(unused_imports)]
use instructions::configure_pool::__client_accounts_set_pool_whitelisted as __client_accounts_set_pool_whitelisted;
#[allow(unused_imports)]
use instructions::deposit_for::__client_accounts_deposit_for as __client_accounts_deposit_for;
#[allow(unused_imports)]
use instructions::initialize::__client_accounts_initialize_accountant as __client_accounts_initialize_accountant;
#[allow(unused_imports)]
use instructions::on_fees_collected::__client_accounts_on_fees_collected as __client_accounts_on_fees_collected;
#[allow(unused_imports)]
use instructions::register_pool::__client_accounts_register_pool as __client_accounts_register_pool;
#[allow(unused_imports)]
use instructions::renounce_funding::__client_accounts_renounce_funding as __client_accounts_renounce_funding;
#[allow(unused_imports)]
use instructions::request_funding::__client_accounts_request_funding as __client_accounts_request_funding;
#[allow(unused_imports)]
use instructions::withdraw::__client_accounts_withdraw as __client_accounts_withdraw;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod solo_pool {
    use super::*;

    // =========================================================================
    // ACCOUNTANT ADMINISTRATION
    // =========================================================================

    /// Initialize the accountant for an underlying mint
    ///
    /// # Arguments
    /// * `network` - Coordinator allowed to call deposit/withdraw/fees
    /// * `funding_manager` - Role allowed to request/renounce funding
    /// * `withdrawal_fee_ppm` - Withdrawal fee in parts per million
    pub fn initialize_accountant(
        ctx: Context<InitializeAccountant>,
        network: Pubkey,
        funding_manager: Pubkey,
        withdrawal_fee_ppm: u32,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, network, funding_manager, withdrawal_fee_ppm)
    }

    /// Rotate the coordinator
    pub fn set_network(ctx: Context<SetNetwork>, new_network: Pubkey) -> Result<()> {
        instructions::admin::configure::set_network_handler(ctx, new_network)
    }

    /// Rotate the funding manager role
    pub fn set_funding_manager(
        ctx: Context<SetFundingManager>,
        new_funding_manager: Pubkey,
    ) -> Result<()> {
        instructions::admin::configure::set_funding_manager_handler(ctx, new_funding_manager)
    }

    /// Update the withdrawal fee rate (bounded at 10%)
    pub fn set_withdrawal_fee(ctx: Context<SetWithdrawalFee>, fee_ppm: u32) -> Result<()> {
        instructions::admin::configure::set_withdrawal_fee_handler(ctx, fee_ppm)
    }

    /// Pause all non-admin operations
    pub fn pause_accountant(ctx: Context<PauseAccountant>) -> Result<()> {
        instructions::admin::pause::pause_handler(ctx)
    }

    /// Resume operations
    pub fn unpause_accountant(ctx: Context<UnpauseAccountant>) -> Result<()> {
        instructions::admin::pause::unpause_handler(ctx)
    }

    /// Initiate authority transfer (2-step process)
    pub fn initiate_authority_transfer(
        ctx: Context<InitiateAuthorityTransfer>,
        new_authority: Pubkey,
    ) -> Result<()> {
        instructions::admin::authority::initiate_handler(ctx, new_authority)
    }

    /// Accept authority transfer
    pub fn accept_authority_transfer(ctx: Context<AcceptAuthorityTransfer>) -> Result<()> {
        instructions::admin::authority::accept_handler(ctx)
    }

    /// Cancel pending authority transfer
    pub fn cancel_authority_transfer(ctx: Context<CancelAuthorityTransfer>) -> Result<()> {
        instructions::admin::authority::cancel_handler(ctx)
    }

    // =========================================================================
    // POOL CONFIGURATION
    // =========================================================================

    /// Register a trading pool for funding
    pub fn register_pool(ctx: Context<RegisterPool>, pool: Pubkey) -> Result<()> {
        instructions::register_pool::handler(ctx, pool)
    }

    /// Enable or disable funding operations for a pool
    pub fn set_pool_whitelisted(
        ctx: Context<SetPoolWhitelisted>,
        is_whitelisted: bool,
    ) -> Result<()> {
        instructions::configure_pool::set_whitelisted_handler(ctx, is_whitelisted)
    }

    /// Update a pool's funding ceiling
    pub fn set_funding_limit(ctx: Context<SetFundingLimit>, funding_limit: u64) -> Result<()> {
        instructions::configure_pool::set_funding_limit_handler(ctx, funding_limit)
    }

    // =========================================================================
    // NETWORK FLOWS
    // =========================================================================

    /// Deposit underlying for a provider
    ///
    /// # Arguments
    /// * `context_id` - Network-assigned id correlating the wider operation
    /// * `underlying_amount` - Value already parked in the custody account
    /// * `is_migrating` - Whether the provider migrates a prior position
    /// * `original_claim_amount` - Claims already held by the migrating
    ///   position, deducted from the fresh claim issue
    pub fn deposit_for(
        ctx: Context<DepositFor>,
        context_id: [u8; 32],
        underlying_amount: u64,
        is_migrating: bool,
        original_claim_amount: u64,
    ) -> Result<()> {
        instructions::deposit_for::handler(
            ctx,
            context_id,
            underlying_amount,
            is_migrating,
            original_claim_amount,
        )
    }

    /// Withdraw a provider's shares for net underlying
    ///
    /// # Arguments
    /// * `context_id` - Network-assigned id correlating the wider operation
    /// * `share_amount` - Shares already returned to the reserve
    pub fn withdraw(ctx: Context<Withdraw>, context_id: [u8; 32], share_amount: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, context_id, share_amount)
    }

    /// Notify the accountant of collected fees
    ///
    /// # Arguments
    /// * `fee_amount` - Collected fee in underlying units (0 is a no-op)
    /// * `is_trade_fee` - Trade fees also accrue to the pool's funding
    pub fn on_fees_collected(
        ctx: Context<OnFeesCollected>,
        fee_amount: u64,
        is_trade_fee: bool,
    ) -> Result<()> {
        instructions::on_fees_collected::handler(ctx, fee_amount, is_trade_fee)
    }

    // =========================================================================
    // FUNDING FLOWS
    // =========================================================================

    /// Allocate funding to a whitelisted pool
    pub fn request_funding(
        ctx: Context<RequestFunding>,
        context_id: [u8; 32],
        underlying_amount: u64,
    ) -> Result<()> {
        instructions::request_funding::handler(ctx, context_id, underlying_amount)
    }

    /// Release funding from a whitelisted pool
    pub fn renounce_funding(
        ctx: Context<RenounceFunding>,
        context_id: [u8; 32],
        underlying_amount: u64,
    ) -> Result<()> {
        instructions::renounce_funding::handler(ctx, context_id, underlying_amount)
    }
}

// Re-exports
pub use error::AccountantError;
pub use events::*;
pub use state::{PoolAccountant, PoolFunding};
pub use utils::math::{WithdrawalAmounts, RATE_DENOMINATOR};
