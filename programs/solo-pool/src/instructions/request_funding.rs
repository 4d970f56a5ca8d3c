//! Funding request instruction.
//!
//! The funding manager allocates underlying value to a whitelisted trading
//! pool: outstanding funding rises (bounded by the pool's limit), the staked
//! balance grows by the same amount, matching shares are minted into the
//! accountant's own reserve (where future deposits draw from), and the
//! underlying itself is minted into the master vault.
//!
//! With an empty share supply the pool bootstraps at a 1:1 rate, and only
//! from a zero staked balance; a nonzero staked balance with no supply is a
//! corrupt state that rejects the request.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount};

use crate::error::AccountantError;
use crate::events::{FundingRequested, TotalLiquidityUpdated};
use crate::state::{PoolAccountant, PoolFunding};

#[derive(Accounts)]
pub struct RequestFunding<'info> {
    /// Role allowed to move funding
    pub funding_manager: Signer<'info>,

    #[account(
        mut,
        has_one = funding_manager @ AccountantError::AccessDenied,
        has_one = pool_token_mint @ AccountantError::InvalidMint,
        has_one = underlying_mint @ AccountantError::InvalidMint,
        has_one = pool_token_reserve @ AccountantError::InvalidTokenAccount,
        has_one = master_vault @ AccountantError::InvalidTokenAccount,
        constraint = !accountant.is_paused @ AccountantError::AccountantPaused,
    )]
    pub accountant: Account<'info, PoolAccountant>,

    #[account(
        mut,
        constraint = pool_funding.accountant == accountant.key()
            @ AccountantError::PoolMismatch,
    )]
    pub pool_funding: Account<'info, PoolFunding>,

    /// CHECK: PDA signing for share and underlying issuance
    #[account(
        seeds = [PoolAccountant::TOKEN_AUTHORITY_SEED, accountant.key().as_ref()],
        bump = accountant.token_authority_bump
    )]
    pub token_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub pool_token_mint: Account<'info, Mint>,

    #[account(mut)]
    pub underlying_mint: Account<'info, Mint>,

    #[account(mut)]
    pub pool_token_reserve: Account<'info, TokenAccount>,

    #[account(mut)]
    pub master_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(
    ctx: Context<RequestFunding>,
    context_id: [u8; 32],
    underlying_amount: u64,
) -> Result<()> {
    require!(underlying_amount > 0, AccountantError::ZeroAmount);
    ctx.accounts.pool_funding.require_whitelisted()?;

    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;
    require!(timestamp > 0, AccountantError::InvalidTimestamp);

    // =========================================================================
    // 1. FUNDING LIMIT, THEN PRICING AGAINST THE PRE-UPDATE SNAPSHOT
    // =========================================================================

    let supply = ctx.accounts.pool_token_mint.supply;

    // limit check and funding bump happen on the same borrow
    let pool_funding = &mut ctx.accounts.pool_funding;
    pool_funding.record_request(underlying_amount, timestamp)?;
    let pool_funded = pool_funding.funded;

    // supply/staked are still the pre-update snapshot here
    let share_amount = ctx
        .accounts
        .accountant
        .funding_share_amount(underlying_amount, supply)?;

    let accountant = &mut ctx.accounts.accountant;
    accountant.stake(underlying_amount)?;
    accountant.touch(timestamp);
    let staked_balance = accountant.staked_balance;

    // =========================================================================
    // 2. MINT SHARES TO THE RESERVE, UNDERLYING TO THE VAULT
    // =========================================================================

    let accountant_key = ctx.accounts.accountant.key();
    let bump = [ctx.accounts.accountant.token_authority_bump];
    let seeds = PoolAccountant::token_authority_seeds(&accountant_key, &bump);
    let signer_seeds = &[&seeds[..]];

    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.pool_token_mint.to_account_info(),
                to: ctx.accounts.pool_token_reserve.to_account_info(),
                authority: ctx.accounts.token_authority.to_account_info(),
            },
            signer_seeds,
        ),
        share_amount,
    )?;

    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.underlying_mint.to_account_info(),
                to: ctx.accounts.master_vault.to_account_info(),
                authority: ctx.accounts.token_authority.to_account_info(),
            },
            signer_seeds,
        ),
        underlying_amount,
    )?;

    // =========================================================================
    // 3. EMIT
    // =========================================================================

    let pool = ctx.accounts.pool_funding.pool;
    let pool_token_supply = supply
        .checked_add(share_amount)
        .ok_or(error!(AccountantError::ArithmeticOverflow))?;

    emit!(FundingRequested {
        context_id,
        accountant: accountant_key,
        pool,
        underlying_amount,
        share_amount,
        pool_funded,
        timestamp,
    });

    emit!(TotalLiquidityUpdated {
        accountant: accountant_key,
        staked_balance,
        pool_token_supply,
        timestamp,
    });

    msg!(
        "funding requested: underlying={}, shares={}, funded={}",
        underlying_amount,
        share_amount,
        pool_funded
    );

    Ok(())
}
