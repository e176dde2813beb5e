use anchor_lang::prelude::*;

use crate::authority::AssetAuthority;
use crate::constants::POOL_MAGIC;
use crate::error::PoolError;

/// Pool ledger: configuration plus the aggregate staked total
///
/// Memory layout after the 8-byte discriminator (repr(C)):
/// [0..8]     magic
/// [8..40]    asset_authority
/// [40..72]   mint
/// [72..104]  vault
/// [104..112] staked_total
/// [112]      bump
/// [113..120] padding
#[account(zero_copy)]
pub struct Pool {
    /// `POOL_MAGIC` once initialized, zero before
    pub magic: u64,

    /// PDA that owns the vault and holds the mint authority
    pub asset_authority: Pubkey,

    /// The mint of the SPL token staked in this pool
    pub mint: Pubkey,

    /// Token account holding every staked unit
    pub vault: Pubkey,

    /// Sum of `staked_amount` over every user entry of this pool
    pub staked_total: u64,

    /// Bump of `asset_authority`, reused for every signed CPI
    pub bump: u8,

    pub padding: [u8; 7],
}

impl Pool {
    pub const LEN: usize = 8 + // discriminator
        8 + // magic
        32 + // asset_authority
        32 + // mint
        32 + // vault
        8 + // staked_total
        1 + // bump
        7; // padding

    pub fn is_initialized(&self) -> bool {
        self.magic == POOL_MAGIC
    }

    /// Writes the pool configuration. The staked total starts at zero.
    pub fn initialize(&mut self, authority: &AssetAuthority, vault: Pubkey) -> Result<()> {
        require!(!self.is_initialized(), PoolError::AlreadyInitialized);

        self.magic = POOL_MAGIC;
        self.asset_authority = authority.address();
        self.mint = authority.mint();
        self.vault = vault;
        self.staked_total = 0;
        self.bump = authority.bump();

        Ok(())
    }

    pub fn require_initialized(&self) -> Result<()> {
        require!(self.is_initialized(), PoolError::NotInitialized);
        Ok(())
    }
}

/// Per (pool, user) ledger entry, stored at [USER_STATE_SEED, pool, user]
#[account]
#[derive(Default, Debug)]
pub struct UserState {
    pub initialized: bool,
    pub staked_amount: u64,
    pub bump: u8,
}

impl UserState {
    pub const LEN: usize = 8 + // discriminator
        1 + // initialized
        8 + // staked_amount
        1; // bump

    pub fn status(&self) -> UserStatus {
        if self.initialized {
            UserStatus::Initialized {
                staked_amount: self.staked_amount,
            }
        } else {
            UserStatus::Uninitialized
        }
    }

    pub fn initialize(&mut self, bump: u8) -> Result<()> {
        require!(!self.initialized, PoolError::AlreadyInitialized);

        self.initialized = true;
        self.staked_amount = 0;
        self.bump = bump;

        Ok(())
    }

    /// Current stake of an initialized entry
    pub fn stake(&self) -> Result<u64> {
        match self.status() {
            UserStatus::Initialized { staked_amount } => Ok(staked_amount),
            UserStatus::Uninitialized => err!(PoolError::NotInitialized),
        }
    }
}

/// Lifecycle of a user ledger entry. There is no closing state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserStatus {
    Uninitialized,
    Initialized { staked_amount: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn blank_pool() -> Pool {
        Pool {
            magic: 0,
            asset_authority: Pubkey::default(),
            mint: Pubkey::default(),
            vault: Pubkey::default(),
            staked_total: 0,
            bump: 0,
            padding: [0; 7],
        }
    }

    #[test]
    fn pool_len_matches_layout() {
        assert_eq!(Pool::LEN, 8 + std::mem::size_of::<Pool>());
    }

    #[test]
    fn pool_initializes_once() {
        let authority = AssetAuthority::find(&key(1), &key(2), &crate::ID);
        let mut pool = blank_pool();

        pool.initialize(&authority, key(3)).unwrap();
        assert!(pool.is_initialized());
        assert_eq!(pool.magic, POOL_MAGIC);
        assert_eq!(pool.mint, key(1));
        assert_eq!(pool.vault, key(3));
        assert_eq!(pool.asset_authority, authority.address());
        assert_eq!(pool.bump, authority.bump());
        assert_eq!(pool.staked_total, 0);

        let before = pool;
        assert!(pool.initialize(&authority, key(4)).is_err());
        assert_eq!(pool.vault, before.vault);
    }

    #[test]
    fn uninitialized_pool_is_rejected() {
        assert!(blank_pool().require_initialized().is_err());
    }

    #[test]
    fn user_state_walks_its_states() {
        let mut user = UserState::default();
        assert_eq!(user.status(), UserStatus::Uninitialized);
        assert!(user.stake().is_err());

        user.initialize(254).unwrap();
        assert_eq!(user.status(), UserStatus::Initialized { staked_amount: 0 });
        assert_eq!(user.bump, 254);

        user.staked_amount = 7;
        assert!(user.initialize(254).is_err());
        assert_eq!(user.stake().unwrap(), 7);
    }
}
