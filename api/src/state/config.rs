use serde::{Deserialize, Serialize};
use steel::*;

use crate::state::config_pda;

use super::HarvestAccount;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Config {
    /// The address that can administer the ledger.
    pub admin: Pubkey,

    /// The mint of the reward token.
    pub reward_mint: Pubkey,

    /// Emission per slot in reward base units. Fixed at initialization.
    pub reward_rate: u64,

    /// The sum of all pool allocation weights.
    pub total_weight: u64,

    /// The number of registered pools. Pool ids are `0..pool_count`.
    pub pool_count: u64,
}

impl Config {
    pub fn pda() -> (Pubkey, u8) {
        config_pda()
    }
}

account!(HarvestAccount, Config);
