use anchor_lang::prelude::*;

use crate::constants::USER_STATE_SEED;
use crate::engine;
use crate::events::UserStateInitialized;
use crate::state::{Pool, UserState};

/// Create the caller's ledger entry for a pool
///
/// `init_if_needed` lets the second call reach the handler, where the
/// `initialized` flag turns it into `AlreadyInitialized` instead of a
/// system program allocation failure.
pub fn initialize_user_state(ctx: Context<InitializeUserState>) -> Result<()> {
    let pool = ctx.accounts.pool.load()?;

    engine::initialize_user_state(
        &pool,
        &mut ctx.accounts.user_state,
        ctx.bumps.user_state,
    )?;

    msg!(
        "User state initialized for {} in pool {}",
        ctx.accounts.user.key(),
        ctx.accounts.pool.key()
    );

    emit!(UserStateInitialized {
        pool: ctx.accounts.pool.key(),
        user: ctx.accounts.user.key(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeUserState<'info> {
    pub pool: AccountLoader<'info, Pool>,

    #[account(
        init_if_needed,
        payer = user,
        space = UserState::LEN,
        seeds = [USER_STATE_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_state: Account<'info, UserState>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}
