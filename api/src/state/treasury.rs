use serde::{Deserialize, Serialize};
use steel::*;

use crate::error::HarvestError;

use super::HarvestAccount;

/// Treasury is a singleton account which custodies the reward reserve and
/// tracks the funding ledger: everything ever paid in by the admin and
/// everything ever paid out to depositors.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Treasury {
    /// The cumulative reward tokens ever deposited by the admin.
    pub total_funded: u64,

    /// The cumulative reward tokens ever released to depositors.
    pub total_paid_out: u64,

    /// The highest slot for which funding suffices. No reward accrues past
    /// this slot until more funding arrives.
    pub emission_end_slot: u64,
}

impl Treasury {
    /// Records a settlement against the funding ledger. Paying out more than
    /// was ever funded means the accounting is broken, so the whole
    /// operation must abort.
    pub fn record_payout(&mut self, amount: u64) -> Result<(), HarvestError> {
        let paid = self.total_paid_out + amount;
        if paid > self.total_funded {
            return Err(HarvestError::InsufficientReserve);
        }
        self.total_paid_out = paid;
        Ok(())
    }

    /// Extends the emission horizon for `amount` of new funding. Funding is
    /// purely additive: it never changes the already-elapsed rate. If the
    /// horizon has already passed, emission resumes from the current slot.
    /// The `amount % reward_rate` remainder never emits and stays in the
    /// reserve.
    pub fn extend_emission(&mut self, amount: u64, reward_rate: u64, slot: u64) {
        self.total_funded += amount;
        self.emission_end_slot = self.emission_end_slot.max(slot) + amount / reward_rate;
    }
}

account!(HarvestAccount, Treasury);
