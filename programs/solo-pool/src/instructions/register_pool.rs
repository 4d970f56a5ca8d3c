//! Pool registration.
//!
//! Creates the per-pool funding account. New pools start non-whitelisted
//! with a zero funding limit; whitelisting and the limit are configured
//! separately.

use anchor_lang::prelude::*;

use crate::error::AccountantError;
use crate::events::PoolRegistered;
use crate::state::{PoolAccountant, PoolFunding};
use crate::utils::validation::validate_address;

#[derive(Accounts)]
#[instruction(pool: Pubkey)]
pub struct RegisterPool<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(has_one = authority @ AccountantError::AccessDenied)]
    pub accountant: Account<'info, PoolAccountant>,

    #[account(
        init,
        payer = authority,
        space = PoolFunding::LEN,
        seeds = [PoolFunding::SEED_PREFIX, accountant.key().as_ref(), pool.as_ref()],
        bump
    )]
    pub pool_funding: Account<'info, PoolFunding>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<RegisterPool>, pool: Pubkey) -> Result<()> {
    validate_address(&pool)?;

    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;
    require!(timestamp > 0, AccountantError::InvalidTimestamp);

    let accountant_key = ctx.accounts.accountant.key();
    let pool_funding = &mut ctx.accounts.pool_funding;
    pool_funding.initialize(accountant_key, pool, ctx.bumps.pool_funding, timestamp);

    emit!(PoolRegistered {
        accountant: accountant_key,
        pool,
        funding_account: pool_funding.key(),
        timestamp,
    });

    msg!("pool registered: {}", pool);

    Ok(())
}
