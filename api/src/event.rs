use serde::{Deserialize, Serialize};
use steel::*;

pub enum HarvestEvent {
    Fund = 0,
    PoolAdded = 1,
    PoolWeight = 2,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct FundEvent {
    /// The event discriminator.
    pub disc: u64,

    /// The amount of reward tokens deposited.
    pub amount: u64,

    /// The cumulative reward funding after this deposit.
    pub total_funded: u64,

    /// The slot at which emission now runs out.
    pub emission_end_slot: u64,

    /// The timestamp of the event.
    pub ts: i64,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct PoolAddedEvent {
    /// The event discriminator.
    pub disc: u64,

    /// The id of the new pool.
    pub pool_id: u64,

    /// The stake-bearing asset of the new pool.
    pub stake_mint: Pubkey,

    /// The allocation weight of the new pool.
    pub weight: u64,

    /// The total allocation weight after registration.
    pub total_weight: u64,

    /// The timestamp of the event.
    pub ts: i64,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct PoolWeightEvent {
    /// The event discriminator.
    pub disc: u64,

    /// The id of the re-weighted pool.
    pub pool_id: u64,

    /// The allocation weight before the change.
    pub old_weight: u64,

    /// The allocation weight after the change.
    pub new_weight: u64,

    /// The total allocation weight after the change.
    pub total_weight: u64,

    /// The timestamp of the event.
    pub ts: i64,
}

event!(FundEvent);
event!(PoolAddedEvent);
event!(PoolWeightEvent);
