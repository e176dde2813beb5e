use anchor_lang::prelude::*;
use anchor_spl::token::{self, MintTo, Transfer};

use crate::authority::AssetAuthority;
use crate::error::PoolError;

/// Asset movement between one holder's token account and the pool vault
///
/// The engine validates an operation completely before calling into a
/// `Custody`, and writes the ledger only after the call returns `Ok`. An
/// implementation must therefore either move the full amount or fail without
/// moving anything.
pub trait Custody {
    /// Balance of the holder's external token account
    fn holder_balance(&self) -> u64;

    /// Holder -> vault, authorized by the holder's own signature
    fn deposit(&mut self, amount: u64) -> Result<()>;

    /// Vault -> holder, authorized by the asset authority
    fn release(&mut self, authority: &AssetAuthority, amount: u64) -> Result<()>;

    /// New issuance into the holder's account, authorized by the asset authority
    fn mint_to_holder(&mut self, authority: &AssetAuthority, amount: u64) -> Result<()>;
}

/// `Custody` backed by SPL Token CPIs
pub struct TokenCustody<'info> {
    pub token_program: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub asset_authority: AccountInfo<'info>,
    pub holder: AccountInfo<'info>,
    pub holder_token: AccountInfo<'info>,
    pub holder_balance: u64,
}

impl<'info> Custody for TokenCustody<'info> {
    fn holder_balance(&self) -> u64 {
        self.holder_balance
    }

    fn deposit(&mut self, amount: u64) -> Result<()> {
        let cpi_accounts = Transfer {
            from: self.holder_token.clone(),
            to: self.vault.clone(),
            authority: self.holder.clone(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.clone(), cpi_accounts);

        token::transfer(cpi_ctx, amount)?;

        self.holder_balance = self
            .holder_balance
            .checked_sub(amount)
            .ok_or(PoolError::InsufficientBalance)?;
        Ok(())
    }

    fn release(&mut self, authority: &AssetAuthority, amount: u64) -> Result<()> {
        authority.verify(self.asset_authority.key)?;

        let seeds = authority.signer_seeds();
        let signer = &[&seeds[..]];

        let cpi_accounts = Transfer {
            from: self.vault.clone(),
            to: self.holder_token.clone(),
            authority: self.asset_authority.clone(),
        };
        let cpi_ctx =
            CpiContext::new_with_signer(self.token_program.clone(), cpi_accounts, signer);

        token::transfer(cpi_ctx, amount)?;

        self.holder_balance = self
            .holder_balance
            .checked_add(amount)
            .ok_or(PoolError::Overflow)?;
        Ok(())
    }

    fn mint_to_holder(&mut self, authority: &AssetAuthority, amount: u64) -> Result<()> {
        authority.verify(self.asset_authority.key)?;

        let seeds = authority.signer_seeds();
        let signer = &[&seeds[..]];

        let cpi_accounts = MintTo {
            mint: self.mint.clone(),
            to: self.holder_token.clone(),
            authority: self.asset_authority.clone(),
        };
        let cpi_ctx =
            CpiContext::new_with_signer(self.token_program.clone(), cpi_accounts, signer);

        token::mint_to(cpi_ctx, amount)?;

        self.holder_balance = self
            .holder_balance
            .checked_add(amount)
            .ok_or(PoolError::Overflow)?;
        Ok(())
    }
}
