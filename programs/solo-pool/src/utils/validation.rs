//! Input validation helpers for the pool accountant.

use anchor_lang::prelude::*;

use crate::error::AccountantError;

/// Rejects the default pubkey where a real address is required.
pub fn validate_address(address: &Pubkey) -> Result<()> {
    if *address == Pubkey::default() {
        msg!("address cannot be the default pubkey");
        return Err(error!(AccountantError::InvalidAddress));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_address_rejects_default() {
        assert!(validate_address(&Pubkey::default()).is_err());
        assert!(validate_address(&Pubkey::new_unique()).is_ok());
    }
}
