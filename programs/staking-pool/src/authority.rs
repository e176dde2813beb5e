use anchor_lang::prelude::*;

use crate::error::PoolError;
use crate::state::Pool;

/// Key-less signer of a pool: the PDA at seeds [mint, pool, bump]
///
/// The program is the only party able to sign for this address, by passing
/// `signer_seeds()` to `invoke_signed`. It is the mint authority of the pool
/// asset and the owner of the vault token account.
///
/// The canonical bump is searched once, at pool initialization, and stored in
/// `Pool::bump`. Every later instruction rebuilds the address from the stored
/// bump with `create_program_address` instead of searching again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetAuthority {
    address: Pubkey,
    mint: Pubkey,
    pool: Pubkey,
    bump: [u8; 1],
}

impl AssetAuthority {
    /// Canonical derivation. Only used when a pool is initialized.
    pub fn find(mint: &Pubkey, pool: &Pubkey, program_id: &Pubkey) -> Self {
        let (address, bump) =
            Pubkey::find_program_address(&[mint.as_ref(), pool.as_ref()], program_id);

        Self {
            address,
            mint: *mint,
            pool: *pool,
            bump: [bump],
        }
    }

    /// Canonical derivation checked against what an initializer supplied.
    /// Both the bump and the presented authority must match it.
    pub fn canonical(
        mint: &Pubkey,
        pool: &Pubkey,
        bump: u8,
        supplied: &Pubkey,
        program_id: &Pubkey,
    ) -> Result<Self> {
        let authority = Self::find(mint, pool, program_id);
        require!(
            bump == authority.bump() && *supplied == authority.address,
            PoolError::AuthorityMismatch
        );
        Ok(authority)
    }

    /// Rebuilds the authority from a known bump.
    /// A bump that lands on the curve yields `Unauthorized`.
    pub fn from_seed(mint: &Pubkey, pool: &Pubkey, bump: u8, program_id: &Pubkey) -> Result<Self> {
        let address =
            Pubkey::create_program_address(&[mint.as_ref(), pool.as_ref(), &[bump]], program_id)
                .map_err(|_| error!(PoolError::Unauthorized))?;

        Ok(Self {
            address,
            mint: *mint,
            pool: *pool,
            bump: [bump],
        })
    }

    /// Authority of an initialized pool, rebuilt from the stored bump and
    /// checked against the stored address.
    pub fn for_pool(pool_key: &Pubkey, pool: &Pool, program_id: &Pubkey) -> Result<Self> {
        pool.require_initialized()?;

        let authority = Self::from_seed(&pool.mint, pool_key, pool.bump, program_id)?;
        require_keys_eq!(
            authority.address,
            pool.asset_authority,
            PoolError::Unauthorized
        );

        Ok(authority)
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn mint(&self) -> Pubkey {
        self.mint
    }

    pub fn bump(&self) -> u8 {
        self.bump[0]
    }

    /// The account presented as the authority must be this PDA
    pub fn verify(&self, supplied: &Pubkey) -> Result<()> {
        require_keys_eq!(*supplied, self.address, PoolError::Unauthorized);
        Ok(())
    }

    pub fn signer_seeds(&self) -> [&[u8]; 3] {
        [self.mint.as_ref(), self.pool.as_ref(), &self.bump[..]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::POOL_MAGIC;

    fn key(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    #[test]
    fn stored_bump_rebuilds_the_same_address() {
        let found = AssetAuthority::find(&key(1), &key(2), &crate::ID);
        let rebuilt =
            AssetAuthority::from_seed(&key(1), &key(2), found.bump(), &crate::ID).unwrap();

        assert_eq!(found, rebuilt);
    }

    #[test]
    fn canonical_accepts_only_the_found_bump_and_address() {
        let found = AssetAuthority::find(&key(1), &key(2), &crate::ID);
        let address = found.address();

        let checked =
            AssetAuthority::canonical(&key(1), &key(2), found.bump(), &address, &crate::ID);
        assert_eq!(checked.unwrap(), found);

        let other_bump = found.bump().wrapping_sub(1);
        assert!(
            AssetAuthority::canonical(&key(1), &key(2), other_bump, &address, &crate::ID).is_err()
        );

        let foreign = AssetAuthority::find(&key(1), &key(99), &crate::ID).address();
        assert!(
            AssetAuthority::canonical(&key(1), &key(2), found.bump(), &foreign, &crate::ID)
                .is_err()
        );
    }

    #[test]
    fn derivation_depends_on_mint_and_pool() {
        let a = AssetAuthority::find(&key(1), &key(2), &crate::ID);
        let b = AssetAuthority::find(&key(2), &key(1), &crate::ID);
        let c = AssetAuthority::find(&key(1), &key(3), &crate::ID);

        assert_ne!(a.address(), b.address());
        assert_ne!(a.address(), c.address());
    }

    #[test]
    fn verify_rejects_a_foreign_key() {
        let authority = AssetAuthority::find(&key(1), &key(2), &crate::ID);

        assert!(authority.verify(&authority.address()).is_ok());
        assert!(authority.verify(&key(9)).is_err());
    }

    #[test]
    fn for_pool_checks_the_stored_address() {
        let pool_key = key(2);
        let authority = AssetAuthority::find(&key(1), &pool_key, &crate::ID);
        let mut pool = Pool {
            magic: POOL_MAGIC,
            asset_authority: authority.address(),
            mint: key(1),
            vault: key(3),
            staked_total: 0,
            bump: authority.bump(),
            padding: [0; 7],
        };

        assert_eq!(
            AssetAuthority::for_pool(&pool_key, &pool, &crate::ID).unwrap(),
            authority
        );

        pool.asset_authority = key(4);
        assert!(AssetAuthority::for_pool(&pool_key, &pool, &crate::ID).is_err());

        pool.magic = 0;
        assert!(AssetAuthority::for_pool(&pool_key, &pool, &crate::ID).is_err());
    }

    #[test]
    fn signer_seeds_end_with_the_bump() {
        let authority = AssetAuthority::find(&key(1), &key(2), &crate::ID);
        let seeds = authority.signer_seeds();

        assert_eq!(seeds[0], &key(1).to_bytes()[..]);
        assert_eq!(seeds[1], &key(2).to_bytes()[..]);
        assert_eq!(seeds[2], &[authority.bump()][..]);
    }
}
