use serde::{Deserialize, Serialize};
use steel::*;

use crate::factor::Factor;
use crate::state::{pool_pda, Config, Treasury};

use super::HarvestAccount;

/// Pool holds the accumulator state for one registered stake-bearing asset.
/// Pools are append-only: they are never removed, only re-weighted to zero.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Pool {
    /// The stable integer handle of this pool.
    pub id: u64,

    /// The mint of the stake-bearing asset. Referenced, never owned: only
    /// balances deposited into the pool token account are custodied.
    pub stake_mint: Pubkey,

    /// The allocation weight. This pool's share of emission is
    /// `weight / total_weight` at the instant of accrual.
    pub weight: u64,

    /// The slot through which the accumulator has been brought current.
    pub last_accrual_slot: u64,

    /// The cumulative reward distributed per staked unit since the pool was
    /// created. Non-decreasing.
    pub rewards_factor: Factor,

    /// The sum of all depositors' staked balances in this pool.
    pub total_staked: u64,
}

impl Pool {
    pub fn pda(&self) -> (Pubkey, u8) {
        pool_pda(self.id)
    }

    /// The rewards factor this pool would hold after accruing through
    /// `slot`, without writing anything back. `accrue` is defined in terms
    /// of this projection, so a pending-reward query always agrees exactly
    /// with the settlement a later accrual produces.
    pub fn projected_rewards_factor(
        &self,
        config: &Config,
        treasury: &Treasury,
        slot: u64,
    ) -> Factor {
        if self.last_accrual_slot >= slot {
            return self.rewards_factor;
        }
        // Emission stops at the funding horizon.
        let effective_slot = slot.min(treasury.emission_end_slot);
        if effective_slot <= self.last_accrual_slot
            || self.total_staked == 0
            || self.weight == 0
            || config.total_weight == 0
        {
            return self.rewards_factor;
        }
        let elapsed = effective_slot - self.last_accrual_slot;
        let pool_reward = (config.reward_rate as u128
            * elapsed as u128
            * self.weight as u128
            / config.total_weight as u128) as u64;
        self.rewards_factor + Factor::from_fraction(pool_reward, self.total_staked)
    }

    /// Brings the accumulator current through `slot`. Idempotent. Slots
    /// during which the pool was empty (or weightless, or past the funding
    /// horizon) are forfeited for this pool, not banked: time still moves
    /// forward.
    ///
    /// Must run before any read of the rewards factor, before any
    /// `total_staked` mutation, and before any weight change.
    pub fn accrue(&mut self, config: &Config, treasury: &Treasury, slot: u64) {
        if self.last_accrual_slot >= slot {
            return;
        }
        self.rewards_factor = self.projected_rewards_factor(config, treasury, slot);
        self.last_accrual_slot = slot;
    }
}

account!(HarvestAccount, Pool);
