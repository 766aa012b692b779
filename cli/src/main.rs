use std::str::FromStr;

use harvest_api::prelude::*;
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, RpcFilterType},
};
use solana_sdk::{
    compute_budget::ComputeBudgetInstruction,
    pubkey::Pubkey,
    signature::{read_keypair_file, Signer},
    transaction::Transaction,
};
use steel::{AccountDeserialize, Clock, Discriminator, Instruction};

#[tokio::main]
async fn main() {
    // Read keypair from file
    let payer =
        read_keypair_file(&std::env::var("KEYPAIR").expect("Missing KEYPAIR env var")).unwrap();

    // Build transaction
    let rpc = RpcClient::new(std::env::var("RPC").expect("Missing RPC env var"));
    match std::env::var("COMMAND")
        .expect("Missing COMMAND env var")
        .as_str()
    {
        "initialize" => {
            initialize(&rpc, &payer).await.unwrap();
        }
        "add_pool" => {
            add_pool(&rpc, &payer).await.unwrap();
        }
        "set_pool_weight" => {
            set_pool_weight(&rpc, &payer).await.unwrap();
        }
        "set_admin" => {
            set_admin(&rpc, &payer).await.unwrap();
        }
        "fund" => {
            fund(&rpc, &payer).await.unwrap();
        }
        "deposit" => {
            deposit(&rpc, &payer).await.unwrap();
        }
        "withdraw" => {
            withdraw(&rpc, &payer).await.unwrap();
        }
        "claim" => {
            claim(&rpc, &payer).await.unwrap();
        }
        "config" => {
            log_config(&rpc).await.unwrap();
        }
        "treasury" => {
            log_treasury(&rpc).await.unwrap();
        }
        "pool" => {
            log_pool(&rpc).await.unwrap();
        }
        "pools" => {
            log_pools(&rpc).await.unwrap();
        }
        "stake" => {
            log_stake(&rpc, &payer).await.unwrap();
        }
        "pending" => {
            log_pending(&rpc, &payer).await.unwrap();
        }
        "clock" => {
            log_clock(&rpc).await.unwrap();
        }
        _ => panic!("Invalid command"),
    };
}

fn env_u64(name: &str) -> u64 {
    let value = std::env::var(name).unwrap_or_else(|_| panic!("Missing {} env var", name));
    u64::from_str(&value).unwrap_or_else(|_| panic!("Invalid {}", name))
}

fn env_pubkey(name: &str) -> Pubkey {
    let value = std::env::var(name).unwrap_or_else(|_| panic!("Missing {} env var", name));
    Pubkey::from_str(&value).unwrap_or_else(|_| panic!("Invalid {}", name))
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| v == "1" || v == "true").unwrap_or(false)
}

async fn initialize(
    rpc: &RpcClient,
    payer: &solana_sdk::signer::keypair::Keypair,
) -> Result<(), anyhow::Error> {
    let reward_mint = env_pubkey("MINT");
    let reward_rate = env_u64("RATE");
    let ix = harvest_api::sdk::initialize(payer.pubkey(), reward_mint, reward_rate);
    submit_transaction(rpc, payer, &[ix]).await?;
    Ok(())
}

async fn add_pool(
    rpc: &RpcClient,
    payer: &solana_sdk::signer::keypair::Keypair,
) -> Result<(), anyhow::Error> {
    let stake_mint = env_pubkey("STAKE_MINT");
    let weight = env_u64("WEIGHT");
    let with_update = env_flag("WITH_UPDATE");
    let config = get_config(rpc).await?;
    let ix = harvest_api::sdk::add_pool(
        payer.pubkey(),
        stake_mint,
        weight,
        with_update,
        config.pool_count,
    );
    submit_transaction(rpc, payer, &[ix]).await?;
    println!("Pool id: {}", config.pool_count);
    Ok(())
}

async fn set_pool_weight(
    rpc: &RpcClient,
    payer: &solana_sdk::signer::keypair::Keypair,
) -> Result<(), anyhow::Error> {
    let pool_id = env_u64("ID");
    let weight = env_u64("WEIGHT");
    let with_update = env_flag("WITH_UPDATE");
    let config = get_config(rpc).await?;
    let ix = harvest_api::sdk::set_pool_weight(
        payer.pubkey(),
        pool_id,
        weight,
        with_update,
        config.pool_count,
    );
    submit_transaction(rpc, payer, &[ix]).await?;
    Ok(())
}

async fn set_admin(
    rpc: &RpcClient,
    payer: &solana_sdk::signer::keypair::Keypair,
) -> Result<(), anyhow::Error> {
    let admin = env_pubkey("ADMIN");
    let ix = harvest_api::sdk::set_admin(payer.pubkey(), admin);
    submit_transaction(rpc, payer, &[ix]).await?;
    Ok(())
}

async fn fund(
    rpc: &RpcClient,
    payer: &solana_sdk::signer::keypair::Keypair,
) -> Result<(), anyhow::Error> {
    let amount = env_u64("AMOUNT");
    let config = get_config(rpc).await?;
    let ix = harvest_api::sdk::fund(
        payer.pubkey(),
        config.reward_mint,
        amount,
        config.pool_count,
    );
    submit_transaction(rpc, payer, &[ix]).await?;
    let treasury = get_treasury(rpc).await?;
    println!("Emission ends at slot {}", treasury.emission_end_slot);
    Ok(())
}

async fn deposit(
    rpc: &RpcClient,
    payer: &solana_sdk::signer::keypair::Keypair,
) -> Result<(), anyhow::Error> {
    let pool_id = env_u64("ID");
    let amount = env_u64("AMOUNT");
    let config = get_config(rpc).await?;
    let pool = get_pool(rpc, pool_id).await?;
    let ix = harvest_api::sdk::deposit(
        payer.pubkey(),
        config.reward_mint,
        pool.stake_mint,
        pool_id,
        amount,
    );
    submit_transaction(rpc, payer, &[ix]).await?;
    Ok(())
}

async fn withdraw(
    rpc: &RpcClient,
    payer: &solana_sdk::signer::keypair::Keypair,
) -> Result<(), anyhow::Error> {
    let pool_id = env_u64("ID");
    let amount = env_u64("AMOUNT");
    let config = get_config(rpc).await?;
    let pool = get_pool(rpc, pool_id).await?;
    let ix = harvest_api::sdk::withdraw(
        payer.pubkey(),
        config.reward_mint,
        pool.stake_mint,
        pool_id,
        amount,
    );
    submit_transaction(rpc, payer, &[ix]).await?;
    Ok(())
}

async fn claim(
    rpc: &RpcClient,
    payer: &solana_sdk::signer::keypair::Keypair,
) -> Result<(), anyhow::Error> {
    let pool_id = env_u64("ID");
    let config = get_config(rpc).await?;
    let ix = harvest_api::sdk::claim(payer.pubkey(), config.reward_mint, pool_id);
    submit_transaction(rpc, payer, &[ix]).await?;
    Ok(())
}

async fn log_config(rpc: &RpcClient) -> Result<(), anyhow::Error> {
    let config = get_config(rpc).await?;
    println!("Config");
    println!("  address: {}", harvest_api::state::config_pda().0);
    println!("  admin: {}", config.admin);
    println!("  reward_mint: {}", config.reward_mint);
    println!("  reward_rate: {} per slot", config.reward_rate);
    println!("  total_weight: {}", config.total_weight);
    println!("  pool_count: {}", config.pool_count);
    Ok(())
}

async fn log_treasury(rpc: &RpcClient) -> Result<(), anyhow::Error> {
    let treasury = get_treasury(rpc).await?;
    let clock = get_clock(rpc).await?;
    println!("Treasury");
    println!("  address: {}", harvest_api::state::treasury_pda().0);
    println!("  total_funded: {}", treasury.total_funded);
    println!("  total_paid_out: {}", treasury.total_paid_out);
    println!("  emission_end_slot: {}", treasury.emission_end_slot);
    println!("  current_slot: {}", clock.slot);
    Ok(())
}

fn print_pool(address: &Pubkey, pool: &Pool) {
    println!("Pool {}", pool.id);
    println!("  address: {}", address);
    println!("  stake_mint: {}", pool.stake_mint);
    println!("  weight: {}", pool.weight);
    println!("  last_accrual_slot: {}", pool.last_accrual_slot);
    println!("  rewards_factor: {}", pool.rewards_factor.to_scaled());
    println!("  total_staked: {}", pool.total_staked);
}

async fn log_pool(rpc: &RpcClient) -> Result<(), anyhow::Error> {
    let pool_id = env_u64("ID");
    let pool = get_pool(rpc, pool_id).await?;
    print_pool(&harvest_api::state::pool_pda(pool_id).0, &pool);
    Ok(())
}

async fn log_pools(rpc: &RpcClient) -> Result<(), anyhow::Error> {
    let mut pools = get_program_accounts::<Pool>(rpc, harvest_api::ID, vec![]).await?;
    pools.sort_by_key(|(_, pool)| pool.id);
    for (address, pool) in pools.iter() {
        print_pool(address, pool);
    }
    Ok(())
}

async fn log_stake(
    rpc: &RpcClient,
    payer: &solana_sdk::signer::keypair::Keypair,
) -> Result<(), anyhow::Error> {
    let pool_id = env_u64("ID");
    let authority = std::env::var("AUTHORITY").unwrap_or(payer.pubkey().to_string());
    let authority = Pubkey::from_str(&authority).expect("Invalid AUTHORITY");
    let stake_address = harvest_api::state::stake_pda(authority, pool_id).0;
    let stake = get_stake(rpc, authority, pool_id).await?;
    println!("Stake");
    println!("  address: {}", stake_address);
    println!("  authority: {}", authority);
    println!("  pool_id: {}", stake.pool_id);
    println!("  balance: {}", stake.balance);
    println!("  reward_debt: {}", stake.reward_debt.to_scaled());
    Ok(())
}

async fn log_pending(
    rpc: &RpcClient,
    payer: &solana_sdk::signer::keypair::Keypair,
) -> Result<(), anyhow::Error> {
    let pool_id = env_u64("ID");
    let authority = std::env::var("AUTHORITY").unwrap_or(payer.pubkey().to_string());
    let authority = Pubkey::from_str(&authority).expect("Invalid AUTHORITY");
    let config = get_config(rpc).await?;
    let treasury = get_treasury(rpc).await?;
    let pool = get_pool(rpc, pool_id).await?;
    let stake = get_stake(rpc, authority, pool_id).await?;
    let clock = get_clock(rpc).await?;
    let factor = pool.projected_rewards_factor(&config, &treasury, clock.slot);
    println!("Pending reward: {}", stake.pending_reward(factor));
    Ok(())
}

async fn log_clock(rpc: &RpcClient) -> Result<(), anyhow::Error> {
    let clock = get_clock(rpc).await?;
    println!("Clock");
    println!("  slot: {}", clock.slot);
    println!("  unix_timestamp: {}", clock.unix_timestamp);
    Ok(())
}

async fn get_config(rpc: &RpcClient) -> Result<Config, anyhow::Error> {
    let config_pda = harvest_api::state::config_pda();
    let account = rpc.get_account(&config_pda.0).await?;
    let config = Config::try_from_bytes(&account.data)?;
    Ok(*config)
}

async fn get_treasury(rpc: &RpcClient) -> Result<Treasury, anyhow::Error> {
    let treasury_pda = harvest_api::state::treasury_pda();
    let account = rpc.get_account(&treasury_pda.0).await?;
    let treasury = Treasury::try_from_bytes(&account.data)?;
    Ok(*treasury)
}

async fn get_pool(rpc: &RpcClient, pool_id: u64) -> Result<Pool, anyhow::Error> {
    let pool_pda = harvest_api::state::pool_pda(pool_id);
    let account = rpc
        .get_account(&pool_pda.0)
        .await
        .map_err(|e| anyhow::anyhow!("Pool {} not found (address: {}): {}", pool_id, pool_pda.0, e))?;
    let pool = Pool::try_from_bytes(&account.data)?;
    Ok(*pool)
}

async fn get_stake(
    rpc: &RpcClient,
    authority: Pubkey,
    pool_id: u64,
) -> Result<Stake, anyhow::Error> {
    let stake_pda = harvest_api::state::stake_pda(authority, pool_id);
    let account = rpc.get_account(&stake_pda.0).await?;
    let stake = Stake::try_from_bytes(&account.data)?;
    Ok(*stake)
}

async fn get_clock(rpc: &RpcClient) -> Result<Clock, anyhow::Error> {
    let data = rpc.get_account_data(&solana_sdk::sysvar::clock::ID).await?;
    let clock = bincode::deserialize::<Clock>(&data)?;
    Ok(clock)
}

pub async fn get_program_accounts<T>(
    client: &RpcClient,
    program_id: Pubkey,
    filters: Vec<RpcFilterType>,
) -> Result<Vec<(Pubkey, T)>, anyhow::Error>
where
    T: AccountDeserialize + Discriminator + Clone,
{
    let mut all_filters = vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
        0,
        &T::discriminator().to_le_bytes(),
    ))];
    all_filters.extend(filters);
    let accounts = client
        .get_program_accounts_with_config(
            &program_id,
            RpcProgramAccountsConfig {
                filters: Some(all_filters),
                account_config: RpcAccountInfoConfig {
                    encoding: Some(UiAccountEncoding::Base64),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .await
        .map_err(|err| anyhow::anyhow!("Failed to get program accounts: {}", err))?;
    Ok(accounts
        .into_iter()
        .filter_map(|(pubkey, account)| {
            T::try_from_bytes(&account.data)
                .ok()
                .map(|parsed| (pubkey, parsed.clone()))
        })
        .collect())
}

async fn submit_transaction(
    rpc: &RpcClient,
    payer: &solana_sdk::signer::keypair::Keypair,
    instructions: &[Instruction],
) -> Result<solana_sdk::signature::Signature, anyhow::Error> {
    let blockhash = rpc.get_latest_blockhash().await?;
    let mut all_instructions = vec![
        ComputeBudgetInstruction::set_compute_unit_limit(1_400_000),
        ComputeBudgetInstruction::set_compute_unit_price(1_000_000),
    ];
    all_instructions.extend_from_slice(instructions);
    let transaction = Transaction::new_signed_with_payer(
        &all_instructions,
        Some(&payer.pubkey()),
        &[payer],
        blockhash,
    );

    match rpc.send_and_confirm_transaction(&transaction).await {
        Ok(signature) => {
            println!("Transaction submitted: {:?}", signature);
            Ok(signature)
        }
        Err(e) => {
            println!("Error submitting transaction: {:?}", e);
            Err(e.into())
        }
    }
}
