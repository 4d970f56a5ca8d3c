//! Accountant initialization.
//!
//! Creates the global `PoolAccountant` state and pins the token topology:
//! three mints (underlying, pool token, claim token) whose mint authority is
//! the accountant's token-authority PDA, and four token accounts (reserve,
//! two custody accounts, master vault) owned by that PDA.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::{Mint, TokenAccount};

use crate::error::AccountantError;
use crate::events::AccountantInitialized;
use crate::state::PoolAccountant;
use crate::utils::validation::validate_address;

#[derive(Accounts)]
pub struct InitializeAccountant<'info> {
    /// Admin funding the account creation
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Global accountant state, one per underlying mint
    #[account(
        init,
        payer = authority,
        space = PoolAccountant::LEN,
        seeds = [PoolAccountant::SEED_PREFIX, underlying_mint.key().as_ref()],
        bump
    )]
    pub accountant: Account<'info, PoolAccountant>,

    /// CHECK: PDA acting purely as mint and token-account authority
    #[account(
        seeds = [PoolAccountant::TOKEN_AUTHORITY_SEED, accountant.key().as_ref()],
        bump
    )]
    pub token_authority: UncheckedAccount<'info>,

    /// Base value unit the pool accounts for
    pub underlying_mint: Account<'info, Mint>,

    /// Share mint; must start with an empty supply
    pub pool_token_mint: Account<'info, Mint>,

    /// Companion claim mint; must start with an empty supply
    pub claim_token_mint: Account<'info, Mint>,

    #[account(
        constraint = pool_token_reserve.mint == pool_token_mint.key()
            @ AccountantError::InvalidTokenAccount,
        constraint = pool_token_reserve.owner == token_authority.key()
            @ AccountantError::InvalidTokenAccount,
    )]
    pub pool_token_reserve: Account<'info, TokenAccount>,

    #[account(
        constraint = underlying_custody.mint == underlying_mint.key()
            @ AccountantError::InvalidTokenAccount,
        constraint = underlying_custody.owner == token_authority.key()
            @ AccountantError::InvalidTokenAccount,
    )]
    pub underlying_custody: Account<'info, TokenAccount>,

    #[account(
        constraint = claim_custody.mint == claim_token_mint.key()
            @ AccountantError::InvalidTokenAccount,
        constraint = claim_custody.owner == token_authority.key()
            @ AccountantError::InvalidTokenAccount,
    )]
    pub claim_custody: Account<'info, TokenAccount>,

    #[account(
        constraint = master_vault.mint == underlying_mint.key()
            @ AccountantError::InvalidTokenAccount,
        constraint = master_vault.owner == token_authority.key()
            @ AccountantError::InvalidTokenAccount,
    )]
    pub master_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
}

fn require_mint_authority(mint: &Account<Mint>, expected: &Pubkey) -> Result<()> {
    match mint.mint_authority {
        COption::Some(authority) if authority == *expected => Ok(()),
        _ => err!(AccountantError::InvalidMintAuthority),
    }
}

pub fn handler(
    ctx: Context<InitializeAccountant>,
    network: Pubkey,
    funding_manager: Pubkey,
    withdrawal_fee_ppm: u32,
) -> Result<()> {
    validate_address(&network)?;
    validate_address(&funding_manager)?;
    require!(
        withdrawal_fee_ppm <= PoolAccountant::MAX_WITHDRAWAL_FEE_PPM,
        AccountantError::FeeTooHigh
    );

    let token_authority = ctx.accounts.token_authority.key();
    require_mint_authority(&ctx.accounts.underlying_mint, &token_authority)?;
    require_mint_authority(&ctx.accounts.pool_token_mint, &token_authority)?;
    require_mint_authority(&ctx.accounts.claim_token_mint, &token_authority)?;

    // fresh receipt ledgers only; an inherited supply would misprice everything
    require!(
        ctx.accounts.pool_token_mint.supply == 0,
        AccountantError::InvalidMint
    );
    require!(
        ctx.accounts.claim_token_mint.supply == 0,
        AccountantError::InvalidMint
    );

    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp;
    require!(timestamp > 0, AccountantError::InvalidTimestamp);

    let accountant_key = ctx.accounts.accountant.key();
    let accountant = &mut ctx.accounts.accountant;
    accountant.initialize(
        ctx.accounts.authority.key(),
        network,
        funding_manager,
        ctx.accounts.underlying_mint.key(),
        ctx.accounts.pool_token_mint.key(),
        ctx.accounts.claim_token_mint.key(),
        ctx.accounts.pool_token_reserve.key(),
        ctx.accounts.underlying_custody.key(),
        ctx.accounts.claim_custody.key(),
        ctx.accounts.master_vault.key(),
        withdrawal_fee_ppm,
        ctx.bumps.accountant,
        ctx.bumps.token_authority,
        timestamp,
    );

    emit!(AccountantInitialized {
        accountant: accountant_key,
        authority: accountant.authority,
        network,
        underlying_mint: accountant.underlying_mint,
        pool_token_mint: accountant.pool_token_mint,
        claim_token_mint: accountant.claim_token_mint,
        withdrawal_fee_ppm,
        timestamp,
    });

    msg!("accountant initialized: fee_ppm={}", withdrawal_fee_ppm);

    Ok(())
}
