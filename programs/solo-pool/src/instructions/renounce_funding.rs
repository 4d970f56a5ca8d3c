//! Funding renouncement instruction.
//!
//! The inverse of a funding request, with one deliberate asymmetry: the
//! funding and staked-balance reduction is clamped to the pool's current
//! outstanding funding (renouncing more than is funded silently reduces to
//! the funded amount), while the vault burn destroys the FULL requested
//! amount. The clamp keeps per-pool funding from going negative; the full
//! burn lets the caller pull exactly the underlying it decided to remove.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount};

use crate::error::AccountantError;
use crate::events::{FundingRenounced, TotalLiquidityUpdated};
use crate::state::{PoolAccountant, PoolFunding};

#[derive(Accounts)]
pub struct RenounceFunding<'info> {
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

    /// CHECK: PDA signing for share and vault burns
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
    ctx: Context<RenounceFunding>,
    context_id: [u8; 32],
    underlying_amount: u64,
) -> Result<()> {
    require!(underlying_amount > 0, AccountantError::ZeroAmount);
    ctx.accounts.pool_funding.require_whitelisted()?;

    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;
    require!(timestamp > 0, AccountantError::InvalidTimestamp);

    // =========================================================================
    // 1. CLAMPED REDUCTION, PRICED AGAINST THE PRE-UPDATE SNAPSHOT
    // =========================================================================

    let supply = ctx.accounts.pool_token_mint.supply;

    let pool_funding = &mut ctx.accounts.pool_funding;
    let reduced_amount = pool_funding.record_renounce(underlying_amount, timestamp)?;
    let pool_funded = pool_funding.funded;

    // shares priced on the clamped amount, against pre-update supply/staked
    let share_amount = ctx
        .accounts
        .accountant
        .renounce_share_amount(reduced_amount, supply)?;

    let accountant = &mut ctx.accounts.accountant;
    accountant.unstake_clamped(reduced_amount);
    accountant.touch(timestamp);
    let staked_balance = accountant.staked_balance;

    // =========================================================================
    // 2. BURN SELF-HELD SHARES AND VAULT UNDERLYING
    // =========================================================================

    let accountant_key = ctx.accounts.accountant.key();
    let bump = [ctx.accounts.accountant.token_authority_bump];
    let seeds = PoolAccountant::token_authority_seeds(&accountant_key, &bump);
    let signer_seeds = &[&seeds[..]];

    // the reserve must still self-hold the full priced amount; deposits
    // that drew it down make the renouncement impossible, not smaller.
    // shrinking the burn here would strip backing from provider-held shares
    require!(
        ctx.accounts.pool_token_reserve.amount >= share_amount,
        AccountantError::InsufficientReserve
    );
    if share_amount > 0 {
        token::burn(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Burn {
                    mint: ctx.accounts.pool_token_mint.to_account_info(),
                    from: ctx.accounts.pool_token_reserve.to_account_info(),
                    authority: ctx.accounts.token_authority.to_account_info(),
                },
                signer_seeds,
            ),
            share_amount,
        )?;
    }

    // the FULL requested amount leaves the vault, not the clamped one
    token::burn(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.underlying_mint.to_account_info(),
                from: ctx.accounts.master_vault.to_account_info(),
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
    let pool_token_supply = supply.saturating_sub(share_amount);

    emit!(FundingRenounced {
        context_id,
        accountant: accountant_key,
        pool,
        requested_amount: underlying_amount,
        reduced_amount,
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
        "funding renounced: requested={}, reduced={}, shares_burned={}",
        underlying_amount,
        reduced_amount,
        share_amount
    );

    Ok(())
}
