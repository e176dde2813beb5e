use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::{Mint, TokenAccount};

use crate::engine::{self, PoolSetup};
use crate::events::PoolInitialized;
use crate::state::Pool;

/// Bind a pool account to its mint, vault and asset authority
///
/// The asset authority is searched here, once, with the canonical bump. A
/// caller-supplied bump or authority that differs from the canonical
/// derivation is rejected, so no other bump can ever be stored.
pub fn initialize(ctx: Context<Initialize>, bump: u8) -> Result<()> {
    let mint = &ctx.accounts.mint;
    let vault = &ctx.accounts.vault;

    let setup = PoolSetup {
        pool: ctx.accounts.pool.key(),
        mint: mint.key(),
        bump,
        asset_authority: ctx.accounts.asset_authority.key(),
        mint_authority: match mint.mint_authority {
            COption::Some(key) => Some(key),
            COption::None => None,
        },
        vault: vault.key(),
        vault_mint: vault.mint,
        vault_owner: vault.owner,
    };

    let pool = &mut ctx.accounts.pool.load_init()?;
    let authority = engine::initialize(pool, &setup, ctx.program_id)?;

    emit!(PoolInitialized {
        pool: setup.pool,
        mint: setup.mint,
        vault: setup.vault,
        asset_authority: authority.address(),
        bump: authority.bump(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Pre-allocated by the client with `Pool::LEN` bytes, discriminator still zero
    #[account(zero)]
    pub pool: AccountLoader<'info, Pool>,

    pub mint: Box<Account<'info, Mint>>,

    /// CHECK: compared against the derivation from [mint, pool] in the handler
    pub asset_authority: UncheckedAccount<'info>,

    /// Token account owned by the asset authority that will hold stakes
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub payer: Signer<'info>,
}
