//! Fee notification instruction.
//!
//! The network reports collected fees. All fees raise the staked balance,
//! lifting the backing of every outstanding share without minting any new
//! shares; trade fees additionally accrue to the originating pool's
//! outstanding funding. A zero fee is a complete no-op: no state change, no
//! event.

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::error::AccountantError;
use crate::events::{FeesCollected, TotalLiquidityUpdated};
use crate::state::{PoolAccountant, PoolFunding};

#[derive(Accounts)]
pub struct OnFeesCollected<'info> {
    /// The coordinator; sole caller of this instruction
    pub network: Signer<'info>,

    #[account(
        mut,
        has_one = network @ AccountantError::AccessDenied,
        has_one = pool_token_mint @ AccountantError::InvalidMint,
        constraint = !accountant.is_paused @ AccountantError::AccountantPaused,
    )]
    pub accountant: Account<'info, PoolAccountant>,

    #[account(
        mut,
        constraint = pool_funding.accountant == accountant.key()
            @ AccountantError::PoolMismatch,
    )]
    pub pool_funding: Account<'info, PoolFunding>,

    /// Share mint; read for the supply in the liquidity event
    pub pool_token_mint: Account<'info, Mint>,
}

pub fn handler(ctx: Context<OnFeesCollected>, fee_amount: u64, is_trade_fee: bool) -> Result<()> {
    if fee_amount == 0 {
        return Ok(());
    }

    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;
    require!(timestamp > 0, AccountantError::InvalidTimestamp);

    let accountant_key = ctx.accounts.accountant.key();

    let accountant = &mut ctx.accounts.accountant;
    accountant.accrue_fees(fee_amount)?;
    accountant.touch(timestamp);
    let staked_balance = accountant.staked_balance;

    if is_trade_fee {
        ctx.accounts
            .pool_funding
            .record_trade_fee(fee_amount, timestamp)?;
    }

    emit!(FeesCollected {
        accountant: accountant_key,
        pool: ctx.accounts.pool_funding.pool,
        fee_amount,
        is_trade_fee,
        timestamp,
    });

    emit!(TotalLiquidityUpdated {
        accountant: accountant_key,
        staked_balance,
        pool_token_supply: ctx.accounts.pool_token_mint.supply,
        timestamp,
    });

    msg!(
        "fees collected: amount={}, trade_fee={}",
        fee_amount,
        is_trade_fee
    );

    Ok(())
}
