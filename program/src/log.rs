use harvest_api::prelude::*;
use steel::*;

/// No-op, use instruction data for logging w/o truncation. Only the config
/// PDA may sign, so event payloads cannot be forged by outside callers.
pub fn process_log(accounts: &[AccountInfo<'_>], _data: &[u8]) -> ProgramResult {
    // Load accounts.
    let [signer_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    signer_info.is_signer()?;
    signer_info.as_account::<Config>(&harvest_api::ID)?;

    Ok(())
}
