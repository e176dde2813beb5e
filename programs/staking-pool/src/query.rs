//! Read-only views over raw account data, for clients and tests
//!
//! Balances of user token accounts are not covered here; read them from the
//! token program's accounts directly.

use std::mem::offset_of;

use anchor_lang::prelude::*;
use anchor_lang::Discriminator;

use crate::authority::AssetAuthority;
use crate::constants::{POOL_MAGIC, USER_STATE_SEED};
use crate::error::PoolError;
use crate::state::{Pool, UserState, UserStatus};

/// Decoded pool ledger
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolLedger {
    pub magic: u64,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub asset_authority: Pubkey,
    pub bump: u8,
    pub staked_total: u64,
}

/// Decoded user ledger entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserLedgerEntry {
    pub initialized: bool,
    pub staked_amount: u64,
}

impl From<UserStatus> for UserLedgerEntry {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Uninitialized => Self {
                initialized: false,
                staked_amount: 0,
            },
            UserStatus::Initialized { staked_amount } => Self {
                initialized: true,
                staked_amount,
            },
        }
    }
}

/// Decodes a pool account. Anything that is not an initialized pool reads as
/// `NotInitialized`.
pub fn read_pool(data: &[u8]) -> Result<PoolLedger> {
    let body = data
        .strip_prefix(Pool::DISCRIMINATOR)
        .ok_or(PoolError::NotInitialized)?;
    require!(
        body.len() >= std::mem::size_of::<Pool>(),
        PoolError::NotInitialized
    );

    let magic = read_u64(body, offset_of!(Pool, magic))?;
    require!(magic == POOL_MAGIC, PoolError::NotInitialized);

    Ok(PoolLedger {
        magic,
        mint: read_pubkey(body, offset_of!(Pool, mint))?,
        vault: read_pubkey(body, offset_of!(Pool, vault))?,
        asset_authority: read_pubkey(body, offset_of!(Pool, asset_authority))?,
        bump: body[offset_of!(Pool, bump)],
        staked_total: read_u64(body, offset_of!(Pool, staked_total))?,
    })
}

/// Decodes a user entry. An empty account (never created) reads as
/// uninitialized with no stake.
pub fn read_user_state(data: &[u8]) -> Result<UserLedgerEntry> {
    if data.is_empty() {
        return Ok(UserStatus::Uninitialized.into());
    }

    let user = UserState::try_deserialize(&mut &data[..])?;
    Ok(user.status().into())
}

pub fn user_state_address(pool: &Pubkey, user: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[USER_STATE_SEED, pool.as_ref(), user.as_ref()], &crate::ID)
}

pub fn asset_authority_address(mint: &Pubkey, pool: &Pubkey) -> (Pubkey, u8) {
    let authority = AssetAuthority::find(mint, pool, &crate::ID);
    (authority.address(), authority.bump())
}

fn read_u64(body: &[u8], offset: usize) -> Result<u64> {
    let bytes: [u8; 8] = body[offset..offset + 8]
        .try_into()
        .map_err(|_| error!(PoolError::NotInitialized))?;
    Ok(u64::from_le_bytes(bytes))
}

fn read_pubkey(body: &[u8], offset: usize) -> Result<Pubkey> {
    let bytes: [u8; 32] = body[offset..offset + 32]
        .try_into()
        .map_err(|_| error!(PoolError::NotInitialized))?;
    Ok(Pubkey::new_from_array(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn pool_account(magic: u64, staked_total: u64) -> Vec<u8> {
        let mut data = Pool::DISCRIMINATOR.to_vec();
        data.extend_from_slice(&magic.to_le_bytes());
        data.extend_from_slice(key(4).as_ref()); // asset_authority
        data.extend_from_slice(key(1).as_ref()); // mint
        data.extend_from_slice(key(3).as_ref()); // vault
        data.extend_from_slice(&staked_total.to_le_bytes());
        data.push(253); // bump
        data.extend_from_slice(&[0; 7]);
        data
    }

    #[test]
    fn reads_an_initialized_pool() {
        let data = pool_account(POOL_MAGIC, 40_000_000);
        assert_eq!(data.len(), Pool::LEN);

        let pool = read_pool(&data).unwrap();
        assert_eq!(
            pool,
            PoolLedger {
                magic: POOL_MAGIC,
                mint: key(1),
                vault: key(3),
                asset_authority: key(4),
                bump: 253,
                staked_total: 40_000_000,
            }
        );
    }

    #[test]
    fn rejects_foreign_or_blank_pool_data() {
        assert!(read_pool(&pool_account(0, 0)).is_err());
        assert!(read_pool(&vec![0; Pool::LEN]).is_err());
        assert!(read_pool(&pool_account(POOL_MAGIC, 0)[..Pool::LEN - 1]).is_err());
        assert!(read_pool(&[]).is_err());
    }

    #[test]
    fn missing_user_entry_reads_uninitialized() {
        assert_eq!(
            read_user_state(&[]).unwrap(),
            UserLedgerEntry {
                initialized: false,
                staked_amount: 0,
            }
        );
    }

    #[test]
    fn reads_a_user_entry() {
        let user = UserState {
            initialized: true,
            staked_amount: 5_000_000,
            bump: 255,
        };
        let mut data = Vec::new();
        user.try_serialize(&mut data).unwrap();

        assert_eq!(
            read_user_state(&data).unwrap(),
            UserLedgerEntry {
                initialized: true,
                staked_amount: 5_000_000,
            }
        );
    }

    #[test]
    fn user_entries_are_per_pool_and_user() {
        let (alice, _) = user_state_address(&key(1), &key(7));
        let (bob, _) = user_state_address(&key(1), &key(8));
        let (other_pool, _) = user_state_address(&key(2), &key(7));

        assert_ne!(alice, bob);
        assert_ne!(alice, other_pool);
    }

    #[test]
    fn authority_address_matches_the_canonical_derivation() {
        let (address, bump) = asset_authority_address(&key(1), &key(2));
        let rebuilt = AssetAuthority::from_seed(&key(1), &key(2), bump, &crate::ID).unwrap();

        assert_eq!(rebuilt.address(), address);
    }
}
