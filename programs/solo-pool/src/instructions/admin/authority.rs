//! Two-step authority transfer.
//!
//! The current authority nominates a successor; the successor must sign to
//! accept. Either side can walk away before acceptance.

use anchor_lang::prelude::*;

use crate::error::AccountantError;
use crate::events::{
    AuthorityTransferCancelled, AuthorityTransferCompleted, AuthorityTransferInitiated,
};
use crate::state::PoolAccountant;

#[derive(Accounts)]
pub struct InitiateAuthorityTransfer<'info> {
    pub authority: Signer<'info>,

    #[account(mut, has_one = authority @ AccountantError::AccessDenied)]
    pub accountant: Account<'info, PoolAccountant>,
}

pub fn initiate_handler(
    ctx: Context<InitiateAuthorityTransfer>,
    new_authority: Pubkey,
) -> Result<()> {
    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;

    let accountant = &mut ctx.accounts.accountant;
    accountant.initiate_authority_transfer(new_authority)?;
    accountant.touch(timestamp);

    emit!(AuthorityTransferInitiated {
        accountant: accountant.key(),
        current_authority: accountant.authority,
        pending_authority: new_authority,
        timestamp,
    });

    msg!("authority transfer initiated: pending={}", new_authority);

    Ok(())
}

#[derive(Accounts)]
pub struct AcceptAuthorityTransfer<'info> {
    /// The nominated successor; validated against pending_authority
    pub new_authority: Signer<'info>,

    #[account(mut)]
    pub accountant: Account<'info, PoolAccountant>,
}

pub fn accept_handler(ctx: Context<AcceptAuthorityTransfer>) -> Result<()> {
    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;

    let accountant = &mut ctx.accounts.accountant;
    let old_authority = accountant.authority;
    accountant.accept_authority_transfer(ctx.accounts.new_authority.key())?;
    accountant.touch(timestamp);

    emit!(AuthorityTransferCompleted {
        accountant: accountant.key(),
        old_authority,
        new_authority: accountant.authority,
        timestamp,
    });

    msg!("authority transfer completed");

    Ok(())
}

#[derive(Accounts)]
pub struct CancelAuthorityTransfer<'info> {
    pub authority: Signer<'info>,

    #[account(mut, has_one = authority @ AccountantError::AccessDenied)]
    pub accountant: Account<'info, PoolAccountant>,
}

pub fn cancel_handler(ctx: Context<CancelAuthorityTransfer>) -> Result<()> {
    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;

    let accountant = &mut ctx.accounts.accountant;
    let cancelled_pending = accountant.pending_authority;
    accountant.cancel_authority_transfer();
    accountant.touch(timestamp);

    emit!(AuthorityTransferCancelled {
        accountant: accountant.key(),
        authority: accountant.authority,
        cancelled_pending,
        timestamp,
    });

    msg!("authority transfer cancelled");

    Ok(())
}
