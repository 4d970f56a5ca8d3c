
use anchor_lang::prelude::*;

#[error_code]
pub enum AccountantError {
    // =========================================================================
    // AUTHORIZATION ERRORS
    // =========================================================================

    #[msg("Access denied: signer does not hold the required role")]
    AccessDenied,

    #[msg("Invalid authority: cannot be the default or current authority")]
    InvalidAuthority,

    #[msg("No pending authority transfer")]
    NoPendingAuthority,

    // =========================================================================
    // VALIDATION ERRORS
    // =========================================================================

    #[msg("Invalid amount: must be greater than zero")]
    ZeroAmount,

    #[msg("Invalid address: the default pubkey is not allowed here")]
    InvalidAddress,

    #[msg("Pool is not whitelisted for funding")]
    PoolNotWhitelisted,

    #[msg("Funding account does not belong to this accountant or pool")]
    PoolMismatch,

    #[msg("Withdrawal fee exceeds the maximum allowed rate")]
    FeeTooHigh,

    #[msg("Token mint does not match accountant configuration")]
    InvalidMint,

    #[msg("Token account does not match accountant configuration")]
    InvalidTokenAccount,

    #[msg("Mint authority must be the accountant token authority")]
    InvalidMintAuthority,

    #[msg("Invalid timestamp from clock sysvar")]
    InvalidTimestamp,

    // =========================================================================
    // FUNDING STATE ERRORS
    // =========================================================================

    #[msg("Requested funding would exceed the pool funding limit")]
    FundingLimitExceeded,

    #[msg("Invalid state: staked balance is nonzero while share supply is zero")]
    InvalidState,

    #[msg("Insufficient self-held pool tokens in the reserve")]
    InsufficientReserve,

    #[msg("Insufficient balance in the accountant custody account")]
    InsufficientCustody,

    // =========================================================================
    // ARITHMETIC ERRORS
    // =========================================================================

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Division by zero in conversion math")]
    DivideByZero,

    // =========================================================================
    // OPERATIONAL ERRORS
    // =========================================================================

    #[msg("Accountant is paused")]
    AccountantPaused,
}
