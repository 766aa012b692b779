use harvest_api::prelude::*;
use steel::*;

/// Rotates the ledger admin.
pub fn process_set_admin(accounts: &[AccountInfo<'_>], data: &[u8]) -> ProgramResult {
    // Parse data.
    let args = SetAdmin::try_from_bytes(data)?;
    let new_admin =
        Pubkey::try_from(&args.admin[..]).map_err(|_| ProgramError::InvalidArgument)?;

    // Load accounts.
    let [signer_info, config_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    signer_info.is_signer()?;
    let config = config_info.as_account_mut::<Config>(&harvest_api::ID)?;
    if config.admin != *signer_info.key {
        return Err(HarvestError::Unauthorized.into());
    }

    config.admin = new_admin;

    Ok(())
}
