//! Circuit breaker: pause and unpause all non-admin operations.

use anchor_lang::prelude::*;

use crate::error::AccountantError;
use crate::events::{AccountantPaused, AccountantUnpaused};
use crate::state::PoolAccountant;

#[derive(Accounts)]
pub struct PauseAccountant<'info> {
    pub authority: Signer<'info>,

    #[account(mut, has_one = authority @ AccountantError::AccessDenied)]
    pub accountant: Account<'info, PoolAccountant>,
}

pub fn pause_handler(ctx: Context<PauseAccountant>) -> Result<()> {
    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;

    let accountant = &mut ctx.accounts.accountant;
    accountant.set_paused(true);
    accountant.touch(timestamp);

    emit!(AccountantPaused {
        accountant: accountant.key(),
        authority: ctx.accounts.authority.key(),
        timestamp,
    });

    msg!("accountant paused");

    Ok(())
}

#[derive(Accounts)]
pub struct UnpauseAccountant<'info> {
    pub authority: Signer<'info>,

    #[account(mut, has_one = authority @ AccountantError::AccessDenied)]
    pub accountant: Account<'info, PoolAccountant>,
}

pub fn unpause_handler(ctx: Context<UnpauseAccountant>) -> Result<()> {
    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;

    let accountant = &mut ctx.accounts.accountant;
    accountant.set_paused(false);
    accountant.touch(timestamp);

    emit!(AccountantUnpaused {
        accountant: accountant.key(),
        authority: ctx.accounts.authority.key(),
        timestamp,
    });

    msg!("accountant unpaused");

    Ok(())
}
