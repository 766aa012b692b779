use serde::{Deserialize, Serialize};
use steel::*;

use crate::error::HarvestError;
use crate::factor::Factor;
use crate::state::{stake_pda, Pool};

use super::HarvestAccount;

/// Stake records one depositor's position in one pool.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Stake {
    /// The authority of this stake account.
    pub authority: Pubkey,

    /// The id of the pool this position belongs to.
    pub pool_id: u64,

    /// The amount currently staked by this depositor in this pool.
    pub balance: u64,

    /// The portion of the pool's rewards factor already settled to this
    /// depositor, kept at the fixed-point scale: `rewards_factor × balance`
    /// as of the last settlement.
    pub reward_debt: Factor,
}

impl Stake {
    pub fn pda(&self) -> (Pubkey, u8) {
        stake_pda(self.authority, self.pool_id)
    }

    /// The reward owed to this position under the given rewards factor. The
    /// caller is responsible for passing an accrued (or projected) factor.
    pub fn pending_reward(&self, rewards_factor: Factor) -> u64 {
        (rewards_factor.times(self.balance) - self.reward_debt).to_u64()
    }

    /// Resets the reward debt to the pool's current factor. Any pending
    /// reward must have been settled first.
    pub fn checkpoint(&mut self, pool: &Pool) {
        self.reward_debt = pool.rewards_factor.times(self.balance);
    }

    /// Adds `amount` to this position. The pool must already be accrued and
    /// the pending reward settled.
    pub fn deposit(&mut self, amount: u64, pool: &mut Pool) -> Result<(), HarvestError> {
        if amount == 0 {
            return Err(HarvestError::InvalidAmount);
        }
        self.balance += amount;
        pool.total_staked += amount;
        self.checkpoint(pool);
        Ok(())
    }

    /// Removes `amount` from this position. Amounts of zero or beyond the
    /// staked balance are rejected, never clamped. The pool must already be
    /// accrued and the pending reward settled.
    pub fn withdraw(&mut self, amount: u64, pool: &mut Pool) -> Result<(), HarvestError> {
        if amount == 0 || amount > self.balance {
            return Err(HarvestError::InvalidAmount);
        }
        self.balance -= amount;
        pool.total_staked -= amount;
        self.checkpoint(pool);
        Ok(())
    }
}

account!(HarvestAccount, Stake);
