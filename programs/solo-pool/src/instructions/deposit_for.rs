//! Deposit instruction.
//!
//! Called by the network on behalf of a provider after it has moved
//! `underlying_amount` into the accountant's underlying custody. The
//! accountant prices the deposit at the current share rate (rounding up, so
//! the provider is never handed fewer shares than the value entitles them
//! to), hands shares out of its self-held reserve, burns the custodied
//! underlying (the shares now represent the claim), and issues companion
//! claim tokens.
//!
//! Deposits can never outrun funding: shares are only ever created on the
//! funding path, so an empty reserve rejects the deposit.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::error::AccountantError;
use crate::events::Deposited;
use crate::state::PoolAccountant;
use crate::utils::validation::validate_address;

#[derive(Accounts)]
pub struct DepositFor<'info> {
    /// The coordinator; sole caller of this instruction
    pub network: Signer<'info>,

    #[account(
        mut,
        has_one = network @ AccountantError::AccessDenied,
        has_one = pool_token_mint @ AccountantError::InvalidMint,
        has_one = underlying_mint @ AccountantError::InvalidMint,
        has_one = claim_token_mint @ AccountantError::InvalidMint,
        has_one = pool_token_reserve @ AccountantError::InvalidTokenAccount,
        has_one = underlying_custody @ AccountantError::InvalidTokenAccount,
        constraint = !accountant.is_paused @ AccountantError::AccountantPaused,
    )]
    pub accountant: Account<'info, PoolAccountant>,

    /// CHECK: PDA signing for reserve transfers and custody burns
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
    pub pool_token_reserve: Account<'info, TokenAccount>,

    #[account(mut)]
    pub underlying_custody: Account<'info, TokenAccount>,

    /// CHECK: provider identity; owns the receiving token accounts
    pub provider: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = provider_share_account.mint == pool_token_mint.key()
            @ AccountantError::InvalidTokenAccount,
        constraint = provider_share_account.owner == provider.key()
            @ AccountantError::InvalidTokenAccount,
    )]
    pub provider_share_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = provider_claim_account.mint == claim_token_mint.key()
            @ AccountantError::InvalidTokenAccount,
        constraint = provider_claim_account.owner == provider.key()
            @ AccountantError::InvalidTokenAccount,
    )]
    pub provider_claim_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(
    ctx: Context<DepositFor>,
    context_id: [u8; 32],
    underlying_amount: u64,
    is_migrating: bool,
    original_claim_amount: u64,
) -> Result<()> {
    require!(underlying_amount > 0, AccountantError::ZeroAmount);
    validate_address(&ctx.accounts.provider.key())?;
    require!(
        ctx.accounts.underlying_custody.amount >= underlying_amount,
        AccountantError::InsufficientCustody
    );

    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;
    require!(timestamp > 0, AccountantError::InvalidTimestamp);

    // =========================================================================
    // 1. PRICE THE DEPOSIT AGAINST THE PRE-UPDATE SNAPSHOT
    // =========================================================================

    let supply = ctx.accounts.pool_token_mint.supply;
    let share_amount = ctx
        .accounts
        .accountant
        .underlying_to_share(underlying_amount, supply)?;

    require!(
        ctx.accounts.pool_token_reserve.amount >= share_amount,
        AccountantError::InsufficientReserve
    );

    // claim issue shrinks for migrating positions that already hold claims
    let claim_amount = if is_migrating {
        share_amount.saturating_sub(original_claim_amount)
    } else {
        share_amount
    };

    // =========================================================================
    // 2. MOVE SHARES, BURN CUSTODIED UNDERLYING, ISSUE CLAIMS
    // =========================================================================

    let accountant_key = ctx.accounts.accountant.key();
    let bump = [ctx.accounts.accountant.token_authority_bump];
    let seeds = PoolAccountant::token_authority_seeds(&accountant_key, &bump);
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.pool_token_reserve.to_account_info(),
                to: ctx.accounts.provider_share_account.to_account_info(),
                authority: ctx.accounts.token_authority.to_account_info(),
            },
            signer_seeds,
        ),
        share_amount,
    )?;

    token::burn(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.underlying_mint.to_account_info(),
                from: ctx.accounts.underlying_custody.to_account_info(),
                authority: ctx.accounts.token_authority.to_account_info(),
            },
            signer_seeds,
        ),
        underlying_amount,
    )?;

    if claim_amount > 0 {
        token::mint_to(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                MintTo {
                    mint: ctx.accounts.claim_token_mint.to_account_info(),
                    to: ctx.accounts.provider_claim_account.to_account_info(),
                    authority: ctx.accounts.token_authority.to_account_info(),
                },
                signer_seeds,
            ),
            claim_amount,
        )?;
    }

    // =========================================================================
    // 3. RECORD AND EMIT
    // =========================================================================

    let accountant = &mut ctx.accounts.accountant;
    accountant.record_deposit(timestamp)?;

    emit!(Deposited {
        context_id,
        accountant: accountant_key,
        provider: ctx.accounts.provider.key(),
        underlying_amount,
        share_amount,
        claim_amount,
        timestamp,
    });

    msg!(
        "deposit: underlying={}, shares={}, claims={}",
        underlying_amount,
        share_amount,
        claim_amount
    );

    Ok(())
}
