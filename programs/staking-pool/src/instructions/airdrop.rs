use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::authority::AssetAuthority;
use crate::custody::TokenCustody;
use crate::engine::{self, Bindings};
use crate::error::PoolError;
use crate::events::Airdropped;
use crate::state::Pool;

/// Mint `amount` of the pool asset to the signer's token account
///
/// Pure issuance: the staked total and user entries are not read or written.
/// The mint authority is the pool's asset authority, so the CPI is signed
/// with the seeds rebuilt from the stored bump.
pub fn airdrop(ctx: Context<Airdrop>, amount: u64) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let pool = ctx.accounts.pool.load()?;

    let authority = AssetAuthority::for_pool(&pool_key, &pool, ctx.program_id)?;
    let bindings = ctx.accounts.bindings();
    let mut custody = ctx.accounts.custody();

    engine::airdrop(&pool, &bindings, &authority, &mut custody, amount)?;

    emit!(Airdropped {
        pool: pool_key,
        recipient: ctx.accounts.user.key(),
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Airdrop<'info> {
    pub pool: AccountLoader<'info, Pool>,

    #[account(mut)]
    pub mint: Box<Account<'info, Mint>>,

    /// CHECK: must equal the authority rebuilt from the pool's stored bump
    pub asset_authority: UncheckedAccount<'info>,

    pub vault: Box<Account<'info, TokenAccount>>,

    /// Destination of the minted tokens
    #[account(
        mut,
        constraint = user_token.owner == user.key() @ PoolError::InvalidUserMintAccount,
        constraint = user_token.mint == mint.key() @ PoolError::InvalidUserMintAccount
    )]
    pub user_token: Box<Account<'info, TokenAccount>>,

    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

impl<'info> Airdrop<'info> {
    fn bindings(&self) -> Bindings {
        Bindings {
            mint: self.mint.key(),
            vault: self.vault.key(),
            asset_authority: self.asset_authority.key(),
        }
    }

    fn custody(&self) -> TokenCustody<'info> {
        TokenCustody {
            token_program: self.token_program.to_account_info(),
            mint: self.mint.to_account_info(),
            vault: self.vault.to_account_info(),
            asset_authority: self.asset_authority.to_account_info(),
            holder: self.user.to_account_info(),
            holder_token: self.user_token.to_account_info(),
            holder_balance: self.user_token.amount,
        }
    }
}
