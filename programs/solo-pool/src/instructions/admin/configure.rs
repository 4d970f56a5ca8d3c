//! Role and fee configuration.

use anchor_lang::prelude::*;

use crate::error::AccountantError;
use crate::events::{FundingManagerUpdated, NetworkUpdated, WithdrawalFeeUpdated};
use crate::state::PoolAccountant;
use crate::utils::validation::validate_address;

#[derive(Accounts)]
pub struct SetNetwork<'info> {
    pub authority: Signer<'info>,

    #[account(mut, has_one = authority @ AccountantError::AccessDenied)]
    pub accountant: Account<'info, PoolAccountant>,
}

pub fn set_network_handler(ctx: Context<SetNetwork>, new_network: Pubkey) -> Result<()> {
    validate_address(&new_network)?;

    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;

    let accountant = &mut ctx.accounts.accountant;
    let old_network = accountant.network;
    accountant.network = new_network;
    accountant.touch(timestamp);

    emit!(NetworkUpdated {
        accountant: accountant.key(),
        old_network,
        new_network,
        timestamp,
    });

    msg!("network updated: {}", new_network);

    Ok(())
}

#[derive(Accounts)]
pub struct SetFundingManager<'info> {
    pub authority: Signer<'info>,

    #[account(mut, has_one = authority @ AccountantError::AccessDenied)]
    pub accountant: Account<'info, PoolAccountant>,
}

pub fn set_funding_manager_handler(
    ctx: Context<SetFundingManager>,
    new_funding_manager: Pubkey,
) -> Result<()> {
    validate_address(&new_funding_manager)?;

    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;

    let accountant = &mut ctx.accounts.accountant;
    let old_funding_manager = accountant.funding_manager;
    accountant.funding_manager = new_funding_manager;
    accountant.touch(timestamp);

    emit!(FundingManagerUpdated {
        accountant: accountant.key(),
        old_funding_manager,
        new_funding_manager,
        timestamp,
    });

    msg!("funding manager updated: {}", new_funding_manager);

    Ok(())
}

#[derive(Accounts)]
pub struct SetWithdrawalFee<'info> {
    pub authority: Signer<'info>,

    #[account(mut, has_one = authority @ AccountantError::AccessDenied)]
    pub accountant: Account<'info, PoolAccountant>,
}

pub fn set_withdrawal_fee_handler(ctx: Context<SetWithdrawalFee>, fee_ppm: u32) -> Result<()> {
    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;

    let accountant = &mut ctx.accounts.accountant;
    let old_fee_ppm = accountant.withdrawal_fee_ppm;
    accountant.set_withdrawal_fee(fee_ppm)?;
    accountant.touch(timestamp);

    emit!(WithdrawalFeeUpdated {
        accountant: accountant.key(),
        old_fee_ppm,
        new_fee_ppm: fee_ppm,
        timestamp,
    });

    msg!("withdrawal fee updated: {} ppm", fee_ppm);

    Ok(())
}
