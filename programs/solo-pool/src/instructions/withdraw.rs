//! Withdrawal instruction.
//!
//! Called by the network after it has moved the provider's pool tokens back
//! into the accountant's reserve (they become self-held again; neither the
//! share supply nor the staked balance moves). The accountant burns the
//! matching claim tokens out of its claim custody and mints the net
//! underlying to the provider.
//!
//! The withdrawal fee is never minted anywhere: the pool keeps the full
//! share backing while paying out only the net amount, which is what lifts
//! the backing of every remaining share.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, MintTo, Token, TokenAccount};

use crate::error::AccountantError;
use crate::events::Withdrawn;
use crate::state::PoolAccountant;
use crate::utils::validation::validate_address;

#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// The coordinator; sole caller of this instruction
    pub network: Signer<'info>,

    #[account(
        mut,
        has_one = network @ AccountantError::AccessDenied,
        has_one = pool_token_mint @ AccountantError::InvalidMint,
        has_one = underlying_mint @ AccountantError::InvalidMint,
        has_one = claim_token_mint @ AccountantError::InvalidMint,
        has_one = claim_custody @ AccountantError::InvalidTokenAccount,
        constraint = !accountant.is_paused @ AccountantError::AccountantPaused,
    )]
    pub accountant: Account<'info, PoolAccountant>,

    /// CHECK: PDA signing for custody burns and underlying issuance
    #[account(
        seeds = [PoolAccountant::TOKEN_AUTHORITY_SEED, accountant.key().as_ref()],
        bump = accountant.token_authority_bump
    )]
    pub token_authority: UncheckedAccount<'info>,

    /// Share mint; read for the supply snapshot
    pub pool_token_mint: Account<'info, Mint>,

    #[account(mut)]
    pub underlying_mint: Account<'info, Mint>,

    #[account(mut)]
    pub claim_token_mint: Account<'info, Mint>,

    #[account(mut)]
    pub claim_custody: Account<'info, TokenAccount>,

    /// CHECK: provider identity; owns the receiving token account
    pub provider: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = provider_underlying_account.mint == underlying_mint.key()
            @ AccountantError::InvalidTokenAccount,
        constraint = provider_underlying_account.owner == provider.key()
            @ AccountantError::InvalidTokenAccount,
    )]
    pub provider_underlying_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Withdraw>, context_id: [u8; 32], share_amount: u64) -> Result<()> {
    require!(share_amount > 0, AccountantError::ZeroAmount);
    validate_address(&ctx.accounts.provider.key())?;
    require!(
        ctx.accounts.claim_custody.amount >= share_amount,
        AccountantError::InsufficientCustody
    );

    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;
    require!(timestamp > 0, AccountantError::InvalidTimestamp);

    // =========================================================================
    // 1. PRICE THE WITHDRAWAL
    // =========================================================================

    let supply = ctx.accounts.pool_token_mint.supply;
    let amounts = ctx
        .accounts
        .accountant
        .withdrawal_amounts(share_amount, supply)?;

    // =========================================================================
    // 2. BURN CLAIMS, ISSUE NET UNDERLYING
    // =========================================================================

    let accountant_key = ctx.accounts.accountant.key();
    let bump = [ctx.accounts.accountant.token_authority_bump];
    let seeds = PoolAccountant::token_authority_seeds(&accountant_key, &bump);
    let signer_seeds = &[&seeds[..]];

    token::burn(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.claim_token_mint.to_account_info(),
                from: ctx.accounts.claim_custody.to_account_info(),
                authority: ctx.accounts.token_authority.to_account_info(),
            },
            signer_seeds,
        ),
        share_amount,
    )?;

    if amounts.net_underlying > 0 {
        token::mint_to(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                MintTo {
                    mint: ctx.accounts.underlying_mint.to_account_info(),
                    to: ctx.accounts.provider_underlying_account.to_account_info(),
                    authority: ctx.accounts.token_authority.to_account_info(),
                },
                signer_seeds,
            ),
            amounts.net_underlying,
        )?;
    }

    // =========================================================================
    // 3. RECORD AND EMIT
    // =========================================================================

    let accountant = &mut ctx.accounts.accountant;
    accountant.record_withdrawal(timestamp)?;

    emit!(Withdrawn {
        context_id,
        accountant: accountant_key,
        provider: ctx.accounts.provider.key(),
        share_amount,
        gross_underlying: amounts.gross_underlying,
        fee_underlying: amounts.fee_underlying,
        net_underlying: amounts.net_underlying,
        timestamp,
    });

    msg!(
        "withdraw: shares={}, gross={}, fee={}, net={}",
        share_amount,
        amounts.gross_underlying,
        amounts.fee_underlying,
        amounts.net_underlying
    );

    Ok(())
}
