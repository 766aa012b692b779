use const_crypto::ed25519;
use solana_program::{pubkey, pubkey::Pubkey};

/// The authority allowed to initialize the ledger.
pub const ADMIN_ADDRESS: Pubkey = pubkey!("5AcFqcYnjbZZUAoprPisJjnFeNmBPVrdHq2bCyBrieuT");

/// The seed of the config account PDA.
pub const CONFIG: &[u8] = b"config";

/// The seed of the treasury account PDA.
pub const TREASURY: &[u8] = b"treasury";

/// The seed of the pool account PDA.
pub const POOL: &[u8] = b"pool";

/// The seed of the stake account PDA.
pub const STAKE: &[u8] = b"stake";

/// Program id for const pda derivations
const PROGRAM_ID: [u8; 32] = unsafe { *(&crate::id() as *const Pubkey as *const [u8; 32]) };

/// The address of the config account.
pub const CONFIG_ADDRESS: Pubkey =
    Pubkey::new_from_array(ed25519::derive_program_address(&[CONFIG], &PROGRAM_ID).0);

/// The address of the treasury account.
pub const TREASURY_ADDRESS: Pubkey =
    Pubkey::new_from_array(ed25519::derive_program_address(&[TREASURY], &PROGRAM_ID).0);
