use steel::*;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, TryFromPrimitive)]
pub enum HarvestInstruction {
    // Admin
    Initialize = 0,
    AddPool = 1,
    SetPoolWeight = 2,
    Fund = 3,
    SetAdmin = 4,
    Log = 8,

    // Staker
    Deposit = 10,
    Withdraw = 11,
    Claim = 12,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Initialize {
    /// Emission per slot in reward base units. Immutable after creation.
    pub reward_rate: [u8; 8],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct AddPool {
    pub weight: [u8; 8],
    /// Whether to accrue every existing pool first (1 = yes). Requires all
    /// registered pool accounts to be passed after the fixed accounts.
    pub with_update: u8,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SetPoolWeight {
    pub pool_id: [u8; 8],
    pub weight: [u8; 8],
    /// Whether to accrue every other pool as well (the target pool is always
    /// accrued before its weight changes).
    pub with_update: u8,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Fund {
    pub amount: [u8; 8],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SetAdmin {
    pub admin: [u8; 32],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Log {}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Deposit {
    pub pool_id: [u8; 8],
    pub amount: [u8; 8],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Withdraw {
    pub pool_id: [u8; 8],
    pub amount: [u8; 8],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Claim {
    pub pool_id: [u8; 8],
}

instruction!(HarvestInstruction, Initialize);
instruction!(HarvestInstruction, AddPool);
instruction!(HarvestInstruction, SetPoolWeight);
instruction!(HarvestInstruction, Fund);
instruction!(HarvestInstruction, SetAdmin);
instruction!(HarvestInstruction, Log);
instruction!(HarvestInstruction, Deposit);
instruction!(HarvestInstruction, Withdraw);
instruction!(HarvestInstruction, Claim);
