mod config;
mod pool;
mod stake;
mod treasury;

pub use config::*;
pub use pool::*;
pub use stake::*;
pub use treasury::*;

use crate::consts::*;

use steel::*;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
pub enum HarvestAccount {
    Config = 100,
    Treasury = 101,
    Pool = 102,
    Stake = 103,
}

pub fn config_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG], &crate::ID)
}

pub fn treasury_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TREASURY], &crate::ID)
}

pub fn pool_pda(id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL, &id.to_le_bytes()], &crate::ID)
}

pub fn stake_pda(authority: Pubkey, pool_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[STAKE, &authority.to_bytes(), &pool_id.to_le_bytes()],
        &crate::ID,
    )
}

/// The reward reserve: the treasury's associated token account for the
/// reward mint.
pub fn treasury_tokens_address(reward_mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(&TREASURY_ADDRESS, reward_mint)
}

/// The custody account for a pool's staked asset.
pub fn pool_tokens_address(pool_id: u64, stake_mint: &Pubkey) -> Pubkey {
    let pool_address = pool_pda(pool_id).0;
    spl_associated_token_account::get_associated_token_address(&pool_address, stake_mint)
}
