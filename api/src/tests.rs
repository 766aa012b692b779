// Unit tests for the core ledger math: accrual, settlement, funding and
// registry re-weighting, exercised through the same state methods the
// instruction handlers drive. Run with: cargo test --lib
#[cfg(test)]
mod tests {
    use solana_program::pubkey::Pubkey;

    use crate::error::HarvestError;
    use crate::factor::Factor;
    use crate::state::{Config, Pool, Stake, Treasury};

    fn new_config(reward_rate: u64) -> Config {
        Config {
            admin: Pubkey::new_unique(),
            reward_mint: Pubkey::new_unique(),
            reward_rate,
            total_weight: 0,
            pool_count: 0,
        }
    }

    fn new_treasury(slot: u64) -> Treasury {
        Treasury {
            total_funded: 0,
            total_paid_out: 0,
            emission_end_slot: slot,
        }
    }

    fn add_pool(config: &mut Config, weight: u64, slot: u64) -> Pool {
        let pool = Pool {
            id: config.pool_count,
            stake_mint: Pubkey::new_unique(),
            weight,
            last_accrual_slot: slot,
            rewards_factor: Factor::ZERO,
            total_staked: 0,
        };
        config.total_weight += weight;
        config.pool_count += 1;
        pool
    }

    fn new_stake(pool: &Pool) -> Stake {
        Stake {
            authority: Pubkey::new_unique(),
            pool_id: pool.id,
            balance: 0,
            reward_debt: Factor::ZERO,
        }
    }

    /// Mirrors the deposit handler: accrue, settle, then update the
    /// position. Returns the settled payout.
    fn deposit(
        config: &Config,
        treasury: &mut Treasury,
        pool: &mut Pool,
        stake: &mut Stake,
        slot: u64,
        amount: u64,
    ) -> u64 {
        pool.accrue(config, treasury, slot);
        let owed = stake.pending_reward(pool.rewards_factor);
        treasury.record_payout(owed).unwrap();
        stake.deposit(amount, pool).unwrap();
        owed
    }

    /// Mirrors the withdraw handler. Returns the settled payout.
    fn withdraw(
        config: &Config,
        treasury: &mut Treasury,
        pool: &mut Pool,
        stake: &mut Stake,
        slot: u64,
        amount: u64,
    ) -> u64 {
        pool.accrue(config, treasury, slot);
        let owed = stake.pending_reward(pool.rewards_factor);
        treasury.record_payout(owed).unwrap();
        stake.withdraw(amount, pool).unwrap();
        owed
    }

    /// Mirrors the claim handler. Returns the settled payout.
    fn claim(
        config: &Config,
        treasury: &mut Treasury,
        pool: &mut Pool,
        stake: &mut Stake,
        slot: u64,
    ) -> u64 {
        pool.accrue(config, treasury, slot);
        let owed = stake.pending_reward(pool.rewards_factor);
        treasury.record_payout(owed).unwrap();
        stake.checkpoint(pool);
        owed
    }

    /// Mirrors the fund handler: accrue every pool under the old horizon,
    /// then extend it.
    fn fund(config: &Config, treasury: &mut Treasury, pools: &mut [&mut Pool], slot: u64, amount: u64) {
        for pool in pools.iter_mut() {
            pool.accrue(config, treasury, slot);
        }
        treasury.extend_emission(amount, config.reward_rate, slot);
    }

    /// Mirrors the re-weight handler with `with_update`: accrue everything,
    /// then swap the weight.
    fn set_weight(
        config: &mut Config,
        treasury: &Treasury,
        pools: &mut [&mut Pool],
        target: usize,
        slot: u64,
        new_weight: u64,
    ) {
        for pool in pools.iter_mut() {
            pool.accrue(config, treasury, slot);
        }
        let pool = &mut pools[target];
        config.total_weight = config.total_weight - pool.weight + new_weight;
        pool.weight = new_weight;
    }

    mod accrual {
        use super::*;

        #[test]
        fn test_accrue_is_idempotent_within_a_slot() {
            let mut config = new_config(3);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 100, 0);
            let mut stake = new_stake(&pool);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 3_000);
            deposit(&config, &mut treasury, &mut pool, &mut stake, 0, 50);

            pool.accrue(&config, &treasury, 7);
            let snapshot = pool;
            pool.accrue(&config, &treasury, 7);
            assert_eq!(pool, snapshot);
        }

        #[test]
        fn test_empty_pool_slots_are_forfeited() {
            let mut config = new_config(1);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 100, 0);
            let mut stake = new_stake(&pool);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 1_000);

            // Nobody staked for the first 10 slots.
            deposit(&config, &mut treasury, &mut pool, &mut stake, 10, 100);
            assert_eq!(pool.last_accrual_slot, 10);
            assert_eq!(pool.rewards_factor, Factor::ZERO);

            // Only the staked interval pays; the empty slots never return.
            pool.accrue(&config, &treasury, 20);
            assert_eq!(stake.pending_reward(pool.rewards_factor), 10);
        }

        #[test]
        fn test_emission_stops_at_the_horizon() {
            let mut config = new_config(1);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 100, 0);
            let mut stake = new_stake(&pool);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 10);
            deposit(&config, &mut treasury, &mut pool, &mut stake, 0, 10);

            // Only 10 slots of emission were ever funded.
            pool.accrue(&config, &treasury, 50);
            assert_eq!(stake.pending_reward(pool.rewards_factor), 10);

            // Time keeps moving even while nothing accrues.
            assert_eq!(pool.last_accrual_slot, 50);
        }

        #[test]
        fn test_zero_weight_pool_accrues_nothing() {
            let mut config = new_config(5);
            let mut treasury = new_treasury(0);
            let mut active = add_pool(&mut config, 100, 0);
            let mut idle = add_pool(&mut config, 0, 0);
            let mut stake = new_stake(&idle);
            fund(&config, &mut treasury, &mut [&mut active, &mut idle], 0, 5_000);
            deposit(&config, &mut treasury, &mut idle, &mut stake, 0, 100);

            idle.accrue(&config, &treasury, 20);
            assert_eq!(idle.rewards_factor, Factor::ZERO);
            assert_eq!(idle.last_accrual_slot, 20);
        }

        #[test]
        fn test_factor_is_monotonic() {
            let mut config = new_config(2);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 100, 0);
            let mut stake = new_stake(&pool);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 1_000);
            deposit(&config, &mut treasury, &mut pool, &mut stake, 0, 7);

            let mut last = pool.rewards_factor;
            for slot in [1, 4, 4, 9, 100, 2_000] {
                pool.accrue(&config, &treasury, slot);
                assert!(pool.rewards_factor >= last);
                last = pool.rewards_factor;
            }
        }
    }

    mod positions {
        use super::*;

        #[test]
        fn test_two_depositors_split_by_stake_and_time() {
            // Emission of 1 unit per slot, one pool holding the full weight.
            let mut config = new_config(1);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 100, 0);
            let mut a = new_stake(&pool);
            let mut b = new_stake(&pool);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 1_000);
            assert_eq!(treasury.emission_end_slot, 1_000);

            deposit(&config, &mut treasury, &mut pool, &mut a, 0, 100);

            // Ten slots alone: A has earned the full emission.
            assert_eq!(
                a.pending_reward(pool.projected_rewards_factor(&config, &treasury, 10)),
                10
            );

            // B joins with an equal stake; the next ten slots split 50/50.
            deposit(&config, &mut treasury, &mut pool, &mut b, 10, 100);
            let factor = pool.projected_rewards_factor(&config, &treasury, 20);
            assert_eq!(a.pending_reward(factor), 15);
            assert_eq!(b.pending_reward(factor), 5);

            let paid_a = withdraw(&config, &mut treasury, &mut pool, &mut a, 20, 100);
            let paid_b = claim(&config, &mut treasury, &mut pool, &mut b, 20);
            assert_eq!(paid_a, 15);
            assert_eq!(paid_b, 5);
            assert_eq!(treasury.total_paid_out, 20);
        }

        #[test]
        fn test_pending_equals_settlement() {
            let mut config = new_config(13);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 250, 0);
            let mut a = new_stake(&pool);
            let mut b = new_stake(&pool);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 100_000);
            deposit(&config, &mut treasury, &mut pool, &mut a, 0, 33);
            deposit(&config, &mut treasury, &mut pool, &mut b, 5, 71);

            for (slot, amount) in [(9u64, 12u64), (14, 3), (14, 40), (61, 1)] {
                let projected = pool.projected_rewards_factor(&config, &treasury, slot);
                let expected = a.pending_reward(projected);
                let paid = deposit(&config, &mut treasury, &mut pool, &mut a, slot, amount);
                assert_eq!(paid, expected);
            }

            let projected = pool.projected_rewards_factor(&config, &treasury, 100);
            let expected = b.pending_reward(projected);
            let paid = withdraw(&config, &mut treasury, &mut pool, &mut b, 100, 71);
            assert_eq!(paid, expected);
        }

        #[test]
        fn test_total_staked_matches_position_sum() {
            let mut config = new_config(4);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 10, 0);
            let mut a = new_stake(&pool);
            let mut b = new_stake(&pool);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 40_000);

            deposit(&config, &mut treasury, &mut pool, &mut a, 1, 500);
            deposit(&config, &mut treasury, &mut pool, &mut b, 2, 250);
            withdraw(&config, &mut treasury, &mut pool, &mut a, 3, 100);
            deposit(&config, &mut treasury, &mut pool, &mut b, 8, 50);
            withdraw(&config, &mut treasury, &mut pool, &mut b, 9, 300);

            assert_eq!(pool.total_staked, a.balance + b.balance);
            assert_eq!(pool.total_staked, 400);
        }

        #[test]
        fn test_full_exit_zeroes_the_position() {
            let mut config = new_config(1);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 100, 0);
            let mut stake = new_stake(&pool);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 1_000);
            deposit(&config, &mut treasury, &mut pool, &mut stake, 0, 100);

            withdraw(&config, &mut treasury, &mut pool, &mut stake, 10, 100);
            assert_eq!(stake.balance, 0);
            assert_eq!(stake.reward_debt, Factor::ZERO);
            assert_eq!(pool.total_staked, 0);

            // Nothing further accrues to an emptied position.
            pool.accrue(&config, &treasury, 20);
            assert_eq!(stake.pending_reward(pool.rewards_factor), 0);
        }

        #[test]
        fn test_zero_amounts_are_rejected() {
            let mut config = new_config(1);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 100, 0);
            let mut stake = new_stake(&pool);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 1_000);

            assert_eq!(stake.deposit(0, &mut pool), Err(HarvestError::InvalidAmount));
            assert_eq!(stake.withdraw(0, &mut pool), Err(HarvestError::InvalidAmount));
        }

        #[test]
        fn test_over_withdraw_is_rejected_and_state_unchanged() {
            let mut config = new_config(1);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 100, 0);
            let mut stake = new_stake(&pool);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 1_000);
            deposit(&config, &mut treasury, &mut pool, &mut stake, 0, 100);

            let pool_before = pool;
            let stake_before = stake;
            assert_eq!(
                stake.withdraw(101, &mut pool),
                Err(HarvestError::InvalidAmount)
            );
            assert_eq!(pool, pool_before);
            assert_eq!(stake, stake_before);
        }
    }

    mod funding {
        use super::*;

        #[test]
        fn test_paid_out_never_exceeds_funded() {
            let mut config = new_config(17);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 9, 0);
            let mut a = new_stake(&pool);
            let mut b = new_stake(&pool);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 1_700);

            let ops: [(u64, u64, bool); 6] = [
                (3, 10, true),
                (50, 25, true),
                (90, 10, false),
                (400, 7, true),
                (401, 25, false),
                (1_000, 7, false),
            ];
            for (slot, amount, is_deposit) in ops {
                if is_deposit {
                    deposit(&config, &mut treasury, &mut pool, &mut a, slot, amount);
                } else {
                    withdraw(&config, &mut treasury, &mut pool, &mut a, slot, amount);
                }
                claim(&config, &mut treasury, &mut pool, &mut b, slot);
                assert!(treasury.total_paid_out <= treasury.total_funded);
            }
        }

        #[test]
        fn test_funding_extends_from_the_current_horizon() {
            let mut config = new_config(10);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 1, 0);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 500);
            assert_eq!(treasury.emission_end_slot, 50);

            // Emission still running: the horizon just moves out.
            fund(&config, &mut treasury, &mut [&mut pool], 20, 300);
            assert_eq!(treasury.emission_end_slot, 80);
            assert_eq!(treasury.total_funded, 800);
        }

        #[test]
        fn test_funding_after_the_horizon_resumes_from_now() {
            let mut config = new_config(10);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 1, 0);
            let mut stake = new_stake(&pool);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 100);
            deposit(&config, &mut treasury, &mut pool, &mut stake, 0, 10);
            assert_eq!(treasury.emission_end_slot, 10);

            // Emission ended at slot 10; refunding at slot 40 resumes from
            // slot 40 and the dead slots in between are not credited.
            fund(&config, &mut treasury, &mut [&mut pool], 40, 100);
            assert_eq!(treasury.emission_end_slot, 50);
            pool.accrue(&config, &treasury, 50);
            assert_eq!(stake.pending_reward(pool.rewards_factor), 200);
        }

        #[test]
        fn test_funding_remainder_never_emits() {
            let mut config = new_config(7);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 1, 0);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 10);

            // 10 units at 7 per slot funds a single slot; 3 units stay in
            // the reserve as dust.
            assert_eq!(treasury.emission_end_slot, 1);
            assert_eq!(treasury.total_funded, 10);
        }

        #[test]
        fn test_overpayment_is_an_accounting_breach() {
            let mut treasury = new_treasury(0);
            treasury.total_funded = 5;
            assert_eq!(treasury.record_payout(5), Ok(()));
            assert_eq!(
                treasury.record_payout(1),
                Err(HarvestError::InsufficientReserve)
            );
        }
    }

    mod reweighting {
        use super::*;

        #[test]
        fn test_reweight_settles_elapsed_slots_under_the_old_weight() {
            let mut config = new_config(1);
            let mut treasury = new_treasury(0);
            let mut pool_a = add_pool(&mut config, 100, 0);
            let mut pool_b = add_pool(&mut config, 100, 0);
            let mut a = new_stake(&pool_a);
            let mut b = new_stake(&pool_b);
            fund(&config, &mut treasury, &mut [&mut pool_a, &mut pool_b], 0, 1_000);
            deposit(&config, &mut treasury, &mut pool_a, &mut a, 0, 10);
            deposit(&config, &mut treasury, &mut pool_b, &mut b, 0, 10);

            // First 10 slots split evenly, then pool A is tripled.
            set_weight(
                &mut config,
                &treasury,
                &mut [&mut pool_a, &mut pool_b],
                0,
                10,
                300,
            );
            pool_a.accrue(&config, &treasury, 30);
            pool_b.accrue(&config, &treasury, 30);

            // A: 5 under the old weights + 15 under the new (300/400 of 20).
            assert_eq!(a.pending_reward(pool_a.rewards_factor), 20);
            // B: 5 + 5 (100/400 of 20).
            assert_eq!(b.pending_reward(pool_b.rewards_factor), 10);
        }

        #[test]
        fn test_reweight_to_zero_retires_a_pool() {
            let mut config = new_config(1);
            let mut treasury = new_treasury(0);
            let mut pool = add_pool(&mut config, 100, 0);
            let mut stake = new_stake(&pool);
            fund(&config, &mut treasury, &mut [&mut pool], 0, 1_000);
            deposit(&config, &mut treasury, &mut pool, &mut stake, 0, 10);

            set_weight(&mut config, &treasury, &mut [&mut pool], 0, 10, 0);
            pool.accrue(&config, &treasury, 100);

            // Accrued rewards survive; nothing further accrues.
            assert_eq!(stake.pending_reward(pool.rewards_factor), 10);
            assert_eq!(config.total_weight, 0);
        }

        #[test]
        fn test_new_pool_does_not_dilute_accrued_slots() {
            let mut config = new_config(1);
            let mut treasury = new_treasury(0);
            let mut pool_a = add_pool(&mut config, 100, 0);
            let mut a = new_stake(&pool_a);
            fund(&config, &mut treasury, &mut [&mut pool_a], 0, 1_000);
            deposit(&config, &mut treasury, &mut pool_a, &mut a, 0, 10);

            // Registering a second pool at slot 10 accrues the first one
            // before the total weight grows.
            pool_a.accrue(&config, &treasury, 10);
            let _pool_b = add_pool(&mut config, 100, 10);

            pool_a.accrue(&config, &treasury, 20);
            assert_eq!(a.pending_reward(pool_a.rewards_factor), 15);
        }
    }
}
