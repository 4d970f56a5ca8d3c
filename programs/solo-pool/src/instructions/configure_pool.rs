//! Per-pool funding configuration: whitelist flag and funding limit.

use anchor_lang::prelude::*;

use crate::error::AccountantError;
use crate::events::{FundingLimitUpdated, PoolWhitelistUpdated};
use crate::state::{PoolAccountant, PoolFunding};

#[derive(Accounts)]
pub struct SetPoolWhitelisted<'info> {
    pub authority: Signer<'info>,

    #[account(has_one = authority @ AccountantError::AccessDenied)]
    pub accountant: Account<'info, PoolAccountant>,

    #[account(
        mut,
        constraint = pool_funding.accountant == accountant.key()
            @ AccountantError::PoolMismatch,
    )]
    pub pool_funding: Account<'info, PoolFunding>,
}

pub fn set_whitelisted_handler(
    ctx: Context<SetPoolWhitelisted>,
    is_whitelisted: bool,
) -> Result<()> {
    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;

    let pool_funding = &mut ctx.accounts.pool_funding;
    pool_funding.set_whitelisted(is_whitelisted, timestamp);

    emit!(PoolWhitelistUpdated {
        accountant: ctx.accounts.accountant.key(),
        pool: pool_funding.pool,
        is_whitelisted,
        timestamp,
    });

    msg!(
        "pool whitelist updated: pool={}, whitelisted={}",
        pool_funding.pool,
        is_whitelisted
    );

    Ok(())
}

#[derive(Accounts)]
pub struct SetFundingLimit<'info> {
    pub authority: Signer<'info>,

    #[account(has_one = authority @ AccountantError::AccessDenied)]
    pub accountant: Account<'info, PoolAccountant>,

    #[account(
        mut,
        constraint = pool_funding.accountant == accountant.key()
            @ AccountantError::PoolMismatch,
    )]
    pub pool_funding: Account<'info, PoolFunding>,
}

pub fn set_funding_limit_handler(ctx: Context<SetFundingLimit>, funding_limit: u64) -> Result<()> {
    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;

    let pool_funding = &mut ctx.accounts.pool_funding;
    let old_limit = pool_funding.funding_limit;
    pool_funding.set_funding_limit(funding_limit, timestamp);

    emit!(FundingLimitUpdated {
        accountant: ctx.accounts.accountant.key(),
        pool: pool_funding.pool,
        old_limit,
        new_limit: funding_limit,
        timestamp,
    });

    msg!(
        "funding limit updated: pool={}, limit={}",
        pool_funding.pool,
        funding_limit
    );

    Ok(())
}
