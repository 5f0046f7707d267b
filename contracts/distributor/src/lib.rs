#![no_std]

pub mod accrual;
pub mod campaign;
pub mod events;
pub mod math;
pub mod pools;
pub mod positions;

use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol};

use campaign::Campaign;
use pools::Pool;

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const PERIOD: Symbol = symbol_short!("PERIOD");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAuthorized = 3,
    InvalidInput = 4,
    DuplicatePool = 5,
    UnknownPool = 6,
    CampaignActive = 7,
    CampaignNotEnded = 8,
    InsufficientFunding = 9,
    InsufficientStake = 10,
    AssetTransferFailed = 11,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct DistributorContract;

#[contractimpl]
impl DistributorContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `reward_token` – SAC address of the token emitted as rewards.
    /// * `period`       – campaign length in blocks; fixed here, immutable
    ///                    afterwards.
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_token: Address,
        period: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if period == 0 {
            return Err(ContractError::InvalidInput);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&PERIOD, &period);
        // The campaign record starts zeroed: no window, nothing remaining.
        campaign::store(
            &env,
            &Campaign {
                per_block_rate: 0,
                start_block: 0,
                end_block: 0,
                remaining: 0,
            },
        );

        events::publish_initialized(&env, admin, reward_token, period);

        Ok(())
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Register a new stake-token pool with weight `alloc_point`.
    ///
    /// Every existing pool is advanced to the current block first, so the
    /// change to the total allocation cannot reach back into
    /// already-elapsed blocks.
    pub fn register_pool(
        env: Env,
        caller: Address,
        stake_token: Address,
        alloc_point: u32,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if pools::pool_index(&env, &stake_token).is_some() {
            return Err(ContractError::DuplicatePool);
        }

        Self::advance_all_pools(&env)?;

        let pool = Pool {
            stake_token: stake_token.clone(),
            alloc_point,
            last_accrual_block: env.ledger().sequence(),
            acc_reward_per_share: 0,
            staked_supply: 0,
        };
        let index = pools::insert_pool(&env, &pool);

        events::publish_pool_registered(
            &env,
            stake_token,
            index,
            alloc_point,
            pools::total_alloc_point(&env),
        );

        Ok(index)
    }

    /// Change a pool's weight. The pool is advanced first so blocks already
    /// elapsed keep the old weight.
    pub fn reweight_pool(
        env: Env,
        caller: Address,
        stake_token: Address,
        alloc_point: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let index = Self::lookup(&env, &stake_token)?;
        let mut pool = Self::advance_pool(&env, index)?;

        let total =
            pools::total_alloc_point(&env) - u64::from(pool.alloc_point) + u64::from(alloc_point);
        pools::set_total_alloc_point(&env, total);
        pool.alloc_point = alloc_point;
        pools::store_pool(&env, index, &pool);

        events::publish_pool_reweighted(&env, stake_token, index, alloc_point, total);

        Ok(())
    }

    // ── Campaign lifecycle ──────────────────────────────────────────────────

    /// Fund and start a new campaign running `start_block` to
    /// `start_block + period`.
    ///
    /// All pools are advanced under the outgoing window first, which is
    /// what preserves pending rewards across back-to-back campaigns. The
    /// new funding is added on top of whatever the previous campaign left
    /// undistributed.
    pub fn start_campaign(
        env: Env,
        caller: Address,
        amount: i128,
        per_block_rate: i128,
        start_block: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if per_block_rate <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let current_block = env.ledger().sequence();
        if current_block < campaign::load(&env).end_block {
            return Err(ContractError::CampaignActive);
        }

        let period = Self::period(&env);
        if amount < per_block_rate * i128::from(period) {
            return Err(ContractError::InsufficientFunding);
        }

        Self::advance_all_pools(&env)?;

        let reward_token = Self::reward_token(&env)?;
        Self::transfer_in(&env, &reward_token, &caller, amount)?;

        // The mass-advance may have drawn the remainder down; reload.
        let prev = campaign::load(&env);
        let next = Campaign {
            per_block_rate,
            start_block,
            end_block: start_block + period,
            remaining: prev.remaining + amount,
        };
        campaign::store(&env, &next);

        events::publish_campaign_started(
            &env,
            amount,
            per_block_rate,
            start_block,
            next.end_block,
            next.remaining,
        );

        Ok(())
    }

    /// Sweep undistributed campaign funds back to the admin. Only allowed
    /// strictly after the campaign window has closed.
    ///
    /// Pools are advanced through the closed window first, so stake that
    /// accrued up to `end_block` keeps its reward; only the genuinely
    /// unminted portion is swept.
    pub fn reclaim_remainder(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if env.ledger().sequence() <= campaign::load(&env).end_block {
            return Err(ContractError::CampaignNotEnded);
        }

        Self::advance_all_pools(&env)?;

        let mut camp = campaign::load(&env);
        let amount = camp.remaining;
        camp.remaining = 0;
        campaign::store(&env, &camp);

        if amount > 0 {
            let reward_token = Self::reward_token(&env)?;
            Self::transfer_out(&env, &reward_token, &caller, amount)?;
        }

        events::publish_remainder_reclaimed(&env, caller, amount);

        Ok(amount)
    }

    // ── Deposits & withdrawals ──────────────────────────────────────────────

    /// Deposit `amount` of `stake_token` into its pool.
    ///
    /// Nothing is paid out here: only the newly added stake is charged
    /// against the current accumulator, so the position's pending reward
    /// is unchanged by the deposit itself and keeps accruing until an
    /// explicit harvest.
    pub fn deposit(
        env: Env,
        depositor: Address,
        stake_token: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        depositor.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        let index = Self::lookup(&env, &stake_token)?;
        let mut pool = Self::advance_pool(&env, index)?;

        Self::transfer_in(&env, &stake_token, &depositor, amount)?;

        let mut position = positions::load(&env, index, &depositor);
        position.staked += amount;
        position.reward_debt += math::debt_for(amount, pool.acc_reward_per_share);
        positions::store(&env, index, &depositor, &position);

        pool.staked_supply += amount;
        pools::store_pool(&env, index, &pool);

        events::publish_deposit(&env, depositor, stake_token, amount, position.staked);

        Ok(())
    }

    /// Withdraw `amount` of stake, harvesting pending reward along the way.
    pub fn withdraw(
        env: Env,
        depositor: Address,
        stake_token: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        depositor.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        Self::withdraw_internal(&env, depositor, stake_token, amount)
    }

    /// Withdraw the full staked amount (and harvest) in one call.
    pub fn withdraw_all(
        env: Env,
        depositor: Address,
        stake_token: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        depositor.require_auth();

        let index = Self::lookup(&env, &stake_token)?;
        let amount = positions::load(&env, index, &depositor).staked;
        Self::withdraw_internal(&env, depositor, stake_token, amount)
    }

    /// Harvest pending reward from one pool; stake is untouched.
    pub fn claim(
        env: Env,
        depositor: Address,
        stake_token: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        depositor.require_auth();

        let index = Self::lookup(&env, &stake_token)?;
        let pool = Self::advance_pool(&env, index)?;
        let reward = Self::settle(&env, index, &pool, &depositor);

        if reward > 0 {
            let reward_token = Self::reward_token(&env)?;
            Self::transfer_out(&env, &reward_token, &depositor, reward)?;
            events::publish_reward_claimed(&env, depositor, stake_token, reward);
        }

        Ok(reward)
    }

    /// Harvest across every pool in registration order; the payout is
    /// batched into a single reward-token transfer.
    pub fn claim_all(env: Env, depositor: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        depositor.require_auth();

        let mut total: i128 = 0;
        for index in 0..pools::pool_count(&env) {
            let pool = Self::advance_pool(&env, index)?;
            let reward = Self::settle(&env, index, &pool, &depositor);
            if reward > 0 {
                events::publish_reward_claimed(
                    &env,
                    depositor.clone(),
                    pool.stake_token.clone(),
                    reward,
                );
            }
            total += reward;
        }

        if total > 0 {
            let reward_token = Self::reward_token(&env)?;
            Self::transfer_out(&env, &reward_token, &depositor, total)?;
        }

        Ok(total)
    }

    /// Exit a pool immediately, forfeiting any unharvested reward.
    ///
    /// The accumulator is not advanced; the forfeited share stays in
    /// custody and is not returned to the campaign remainder.
    pub fn emergency_withdraw(
        env: Env,
        depositor: Address,
        stake_token: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        depositor.require_auth();

        let index = Self::lookup(&env, &stake_token)?;
        let mut pool = pools::get_pool(&env, index).ok_or(ContractError::UnknownPool)?;
        let mut position = positions::load(&env, index, &depositor);

        let amount = position.staked;
        position.staked = 0;
        position.reward_debt = 0;
        positions::store(&env, index, &depositor, &position);

        pool.staked_supply -= amount;
        pools::store_pool(&env, index, &pool);

        if amount > 0 {
            Self::transfer_out(&env, &stake_token, &depositor, amount)?;
        }

        events::publish_emergency_withdraw(&env, depositor, stake_token, amount);

        Ok(amount)
    }

    // ── Views ───────────────────────────────────────────────────────────────

    /// Reward claimable by `depositor` from `stake_token`'s pool right now,
    /// computed against a simulated (non-persisted) accumulator advance.
    pub fn pending_reward(
        env: Env,
        stake_token: Address,
        depositor: Address,
    ) -> Result<i128, ContractError> {
        let index = Self::lookup(&env, &stake_token)?;
        let pool = pools::get_pool(&env, index).ok_or(ContractError::UnknownPool)?;
        let camp = campaign::load(&env);
        let (simulated, _) = accrual::advance(
            &pool,
            &camp,
            pools::total_alloc_point(&env),
            env.ledger().sequence(),
        );

        let position = positions::load(&env, index, &depositor);
        Ok(math::pending(
            position.staked,
            simulated.acc_reward_per_share,
            position.reward_debt,
        ))
    }

    /// Campaign funds not yet minted into any pool, as of the current block.
    ///
    /// Best-effort lazy view: it subtracts each pool's simulated pool-level
    /// accrual from the stored remainder, so it can sit a unit or two above
    /// the per-position pendings it funds. The committed accrual path is
    /// authoritative.
    pub fn remaining_amount(env: Env) -> i128 {
        let camp = campaign::load(&env);
        let total_alloc_point = pools::total_alloc_point(&env);
        let current_block = env.ledger().sequence();

        let mut remaining = camp.remaining;
        for index in 0..pools::pool_count(&env) {
            if let Some(pool) = pools::get_pool(&env, index) {
                let (_, minted) = accrual::advance(&pool, &camp, total_alloc_point, current_block);
                remaining -= minted;
            }
        }
        remaining
    }

    /// `depositor`'s staked amount in `stake_token`'s pool.
    pub fn staked_balance(
        env: Env,
        stake_token: Address,
        depositor: Address,
    ) -> Result<i128, ContractError> {
        let index = Self::lookup(&env, &stake_token)?;
        Ok(positions::load(&env, index, &depositor).staked)
    }

    /// Registration index of `stake_token`'s pool.
    pub fn pool_index(env: Env, stake_token: Address) -> Result<u32, ContractError> {
        Self::lookup(&env, &stake_token)
    }

    /// Snapshot of a pool's bookkeeping record.
    pub fn get_pool(env: Env, stake_token: Address) -> Result<Pool, ContractError> {
        let index = Self::lookup(&env, &stake_token)?;
        pools::get_pool(&env, index).ok_or(ContractError::UnknownPool)
    }

    pub fn pool_count(env: Env) -> u32 {
        pools::pool_count(&env)
    }

    pub fn total_alloc_point(env: Env) -> u64 {
        pools::total_alloc_point(&env)
    }

    /// The stored campaign record; `remaining` here is the committed value,
    /// see `remaining_amount` for the up-to-the-block view.
    pub fn get_campaign(env: Env) -> Campaign {
        campaign::load(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        Self::reward_token(&env)
    }

    pub fn get_period(env: Env) -> u32 {
        Self::period(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: fail if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: fail if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::NotAuthorized);
        }
        Ok(())
    }

    /// Resolve a stake token to its pool index; the precondition for every
    /// pool-named operation.
    fn lookup(env: &Env, stake_token: &Address) -> Result<u32, ContractError> {
        pools::pool_index(env, stake_token).ok_or(ContractError::UnknownPool)
    }

    fn period(env: &Env) -> u32 {
        env.storage().instance().get(&PERIOD).unwrap_or(0)
    }

    fn reward_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Bring one pool current, persisting the advanced record and drawing
    /// the minted reward down from the campaign remainder.
    fn advance_pool(env: &Env, index: u32) -> Result<Pool, ContractError> {
        let pool = pools::get_pool(env, index).ok_or(ContractError::UnknownPool)?;
        let mut camp = campaign::load(env);
        let (updated, minted) = accrual::advance(
            &pool,
            &camp,
            pools::total_alloc_point(env),
            env.ledger().sequence(),
        );
        pools::store_pool(env, index, &updated);
        if minted > 0 {
            camp.remaining = camp.remaining.saturating_sub(minted);
            campaign::store(env, &camp);
        }
        Ok(updated)
    }

    /// Bring every pool current; required before anything that changes the
    /// total allocation or replaces the campaign window.
    fn advance_all_pools(env: &Env) -> Result<(), ContractError> {
        for index in 0..pools::pool_count(env) {
            Self::advance_pool(env, index)?;
        }
        Ok(())
    }

    /// Compute a position's pending reward against an already-advanced
    /// pool, re-baseline its debt, and return the payout owed.
    fn settle(env: &Env, index: u32, pool: &Pool, depositor: &Address) -> i128 {
        let mut position = positions::load(env, index, depositor);
        if position.staked == 0 && position.reward_debt == 0 {
            return 0;
        }
        let reward = math::pending(
            position.staked,
            pool.acc_reward_per_share,
            position.reward_debt,
        );
        position.reward_debt = math::debt_for(position.staked, pool.acc_reward_per_share);
        positions::store(env, index, depositor, &position);
        reward
    }

    fn withdraw_internal(
        env: &Env,
        depositor: Address,
        stake_token: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let index = Self::lookup(env, &stake_token)?;
        let mut pool = Self::advance_pool(env, index)?;
        let mut position = positions::load(env, index, &depositor);

        if amount > position.staked {
            return Err(ContractError::InsufficientStake);
        }

        let reward = math::pending(
            position.staked,
            pool.acc_reward_per_share,
            position.reward_debt,
        );
        if reward > 0 {
            let reward_token = Self::reward_token(env)?;
            Self::transfer_out(env, &reward_token, &depositor, reward)?;
        }

        position.staked -= amount;
        position.reward_debt = math::debt_for(position.staked, pool.acc_reward_per_share);
        positions::store(env, index, &depositor, &position);

        pool.staked_supply -= amount;
        pools::store_pool(env, index, &pool);

        if amount > 0 {
            Self::transfer_out(env, &stake_token, &depositor, amount)?;
        }

        events::publish_withdraw(env, depositor, stake_token, amount, reward);

        Ok(())
    }

    fn transfer_in(
        env: &Env,
        token_id: &Address,
        from: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::transfer(env, token_id, from, &env.current_contract_address(), amount)
    }

    fn transfer_out(
        env: &Env,
        token_id: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::transfer(env, token_id, &env.current_contract_address(), to, amount)
    }

    /// Move tokens, surfacing any failure as `AssetTransferFailed` so the
    /// whole operation rolls back with no partial bookkeeping.
    fn transfer(
        env: &Env,
        token_id: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        match token::Client::new(env, token_id).try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::AssetTransferFailed),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_lifecycle;
