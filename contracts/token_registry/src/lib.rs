#![no_std]

pub mod error;
pub mod events;
pub mod storage;

use error::Error;
use events::{ApprovalEvent, ItemCreatedEvent, TransferEvent};
use storage::{DataKey, Item, BASIS_POINTS};

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

#[contract]
pub struct TokenRegistry;

#[contractimpl]
impl TokenRegistry {
    /// Initialize the registry
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);

        Ok(())
    }

    /// Mint a fresh token id with `supply` copies, all owned by `creator`.
    /// The creator and royalty rate are fixed at mint time and never change.
    /// Token ids are sequential starting at 1.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: supply <= 0
    /// - `InvalidRoyalty`: royalty_bps > 10,000
    pub fn create_item(
        env: Env,
        creator: Address,
        supply: i128,
        royalty_bps: u32,
    ) -> Result<u32, Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        if supply <= 0 {
            return Err(Error::InvalidAmount);
        }

        if royalty_bps > BASIS_POINTS {
            return Err(Error::InvalidRoyalty);
        }

        creator.require_auth();

        let last_id: u32 = env
            .storage()
            .instance()
            .get(&DataKey::ItemCounter)
            .unwrap_or(0);
        let token_id = last_id + 1;

        let item = Item {
            creator: creator.clone(),
            supply,
            royalty_bps,
        };

        env.storage().instance().set(&DataKey::Item(token_id), &item);
        env.storage()
            .instance()
            .set(&DataKey::Balance(token_id, creator.clone()), &supply);
        env.storage().instance().set(&DataKey::ItemCounter, &token_id);

        env.events().publish(
            (Symbol::new(&env, "item_created"), token_id),
            ItemCreatedEvent {
                token_id,
                creator,
                supply,
                royalty_bps,
            },
        );

        Ok(token_id)
    }

    /// Grant or revoke `operator` the right to move all of `owner`'s copies
    pub fn set_approval_for_all(
        env: Env,
        owner: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        owner.require_auth();

        let key = DataKey::Approval(owner.clone(), operator.clone());
        if approved {
            env.storage().instance().set(&key, &true);
        } else {
            env.storage().instance().remove(&key);
        }

        env.events().publish(
            (Symbol::new(&env, "approval"), owner.clone()),
            ApprovalEvent {
                owner,
                operator,
                approved,
            },
        );

        Ok(())
    }

    /// Move `amount` copies of `token_id` from `from` to `to`.
    /// `operator` must authorize and must be `from` itself or
    /// approved-for-all by `from`.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotFound`: Unknown token id
    /// - `InvalidAmount`: amount <= 0
    /// - `NotApproved`: operator lacks approval from `from`
    /// - `InsufficientBalance`: `from` holds fewer than `amount`
    pub fn safe_transfer(
        env: Env,
        operator: Address,
        token_id: u32,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        if !env.storage().instance().has(&DataKey::Item(token_id)) {
            return Err(Error::NotFound);
        }

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        operator.require_auth();

        if operator != from {
            let approved = env
                .storage()
                .instance()
                .get::<DataKey, bool>(&DataKey::Approval(from.clone(), operator))
                .unwrap_or(false);
            if !approved {
                return Err(Error::NotApproved);
            }
        }

        let from_key = DataKey::Balance(token_id, from.clone());
        let from_balance = env
            .storage()
            .instance()
            .get::<DataKey, i128>(&from_key)
            .unwrap_or(0);

        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }

        let to_key = DataKey::Balance(token_id, to.clone());
        let to_balance = env
            .storage()
            .instance()
            .get::<DataKey, i128>(&to_key)
            .unwrap_or(0);

        let new_from_balance = from_balance - amount;
        let new_to_balance = to_balance
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;

        if new_from_balance == 0 {
            env.storage().instance().remove(&from_key);
        } else {
            env.storage().instance().set(&from_key, &new_from_balance);
        }
        env.storage().instance().set(&to_key, &new_to_balance);

        env.events().publish(
            (Symbol::new(&env, "transfer"), token_id),
            TransferEvent {
                token_id,
                from,
                to,
                amount,
            },
        );

        Ok(())
    }

    /// Copies of `token_id` held by `owner`
    pub fn balance_of(env: Env, token_id: u32, owner: Address) -> i128 {
        env.storage()
            .instance()
            .get::<DataKey, i128>(&DataKey::Balance(token_id, owner))
            .unwrap_or(0)
    }

    /// Whether `operator` may move all of `owner`'s copies
    pub fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Approval(owner, operator))
            .unwrap_or(false)
    }

    /// Royalty rate (basis points) registered for `token_id` at mint
    pub fn royalty_rate_of(env: Env, token_id: u32) -> Result<u32, Error> {
        let item: Item = env
            .storage()
            .instance()
            .get(&DataKey::Item(token_id))
            .ok_or(Error::NotFound)?;
        Ok(item.royalty_bps)
    }

    /// Original minting creator of `token_id`
    pub fn original_creator_of(env: Env, token_id: u32) -> Result<Address, Error> {
        let item: Item = env
            .storage()
            .instance()
            .get(&DataKey::Item(token_id))
            .ok_or(Error::NotFound)?;
        Ok(item.creator)
    }

    /// Copies minted for `token_id`
    pub fn item_supply(env: Env, token_id: u32) -> Result<i128, Error> {
        let item: Item = env
            .storage()
            .instance()
            .get(&DataKey::Item(token_id))
            .ok_or(Error::NotFound)?;
        Ok(item.supply)
    }

    /// Number of token ids minted so far
    pub fn item_count(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::ItemCounter)
            .unwrap_or(0)
    }
}
