#![no_std]

pub mod error;
mod escrow;
pub mod events;
mod pricing;
pub mod storage;

use error::Error;
use events::*;
use pricing::split_proceeds;
use storage::{Auction, DataKey, Offer, BASIS_POINTS};

use soroban_sdk::{contract, contractimpl, vec, Address, Env, IntoVal, Symbol, Vec};

/// Offer/auction engine for multi-copy collectible tokens.
///
/// Every public operation is one Soroban invocation: a returned error or a
/// trap rolls back all storage writes and token moves, so callers never
/// observe a partially applied state.
#[contract]
pub struct MarketEngine;

#[contractimpl]
impl MarketEngine {
    // ============================================
    // INITIALIZATION & TREASURY
    // ============================================

    /// Initialize the engine
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidAmount`: commission_bps above 10,000
    pub fn initialize(
        env: Env,
        admin: Address,
        payment_token: Address,
        commission_bps: u32,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        if commission_bps > BASIS_POINTS {
            return Err(Error::InvalidAmount);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::PaymentToken, &payment_token);
        env.storage()
            .instance()
            .set(&DataKey::CommissionBps, &commission_bps);
        env.storage().instance().set(&DataKey::OfferCount, &0u64);
        env.storage().instance().set(&DataKey::AuctionCount, &0u64);
        env.storage()
            .instance()
            .set(&DataKey::AccumulatedCommission, &0i128);
        env.storage().instance().set(&DataKey::TotalSales, &0i128);

        Ok(())
    }

    /// Withdraw the full accumulated commission to the platform operator.
    /// Drains the counter to zero and returns the amount paid out.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not the operator
    pub fn extract_balance(env: Env, caller: Address) -> Result<i128, Error> {
        Self::check_initialized(&env)?;

        caller.require_auth();

        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        if caller != admin {
            return Err(Error::Unauthorized);
        }

        let amount: i128 = env
            .storage()
            .instance()
            .get(&DataKey::AccumulatedCommission)
            .unwrap_or(0);

        let payment_token = Self::payment_token(&env)?;
        escrow::payout(&env, &payment_token, &caller, amount);

        env.storage()
            .instance()
            .set(&DataKey::AccumulatedCommission, &0i128);

        env.events().publish(
            (Symbol::new(&env, "balance_extracted"), caller.clone()),
            BalanceExtractedEvent {
                operator: caller,
                amount,
            },
        );

        Ok(amount)
    }

    // ============================================
    // LISTING STORE
    // ============================================

    /// Publish `quantity` copies of a token for direct sale and/or auction.
    /// The caller must hold the copies and must have approved the engine as
    /// operator in the token registry. A `start_time` of 0 means the offer
    /// starts at the current ledger time.
    ///
    /// Returns the new offer id (sequential from 0).
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: quantity <= 0, a negative price, or a time window
    ///   that overflows
    /// - `NotApproved`: Engine is not approved to move the caller's copies
    /// - `InsufficientInventory`: Caller holds fewer than `quantity` copies
    #[allow(clippy::too_many_arguments)]
    pub fn create_offer(
        env: Env,
        caller: Address,
        token_contract: Address,
        token_id: u32,
        quantity: i128,
        allow_direct_sale: bool,
        allow_auction: bool,
        min_price: i128,
        reserve_price: i128,
        start_time: u64,
        duration: u64,
    ) -> Result<u64, Error> {
        Self::check_initialized(&env)?;

        caller.require_auth();

        if quantity <= 0 || min_price < 0 || reserve_price < 0 {
            return Err(Error::InvalidAmount);
        }

        // Resolve "starts now" before the window is range-checked, so the
        // stored (start_time, duration) pair can never overflow later.
        let now = env.ledger().timestamp();
        let start_time = if start_time == 0 { now } else { start_time };
        start_time
            .checked_add(duration)
            .ok_or(Error::InvalidAmount)?;

        let engine = env.current_contract_address();
        if !Self::registry_is_approved(&env, &token_contract, &caller, &engine) {
            return Err(Error::NotApproved);
        }

        let balance = Self::registry_balance_of(&env, &token_contract, token_id, &caller);
        if balance < quantity {
            return Err(Error::InsufficientInventory);
        }

        let offer_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::OfferCount)
            .unwrap_or(0);

        let offer = Offer {
            id: offer_id,
            token_contract: token_contract.clone(),
            token_id,
            creator: caller.clone(),
            total_copies: quantity,
            available_copies: quantity,
            allows_direct_sale: allow_direct_sale,
            allows_auction: allow_auction,
            min_price,
            reserve_price,
            start_time,
            duration,
        };

        env.storage()
            .instance()
            .set(&DataKey::Offer(offer_id), &offer);
        env.storage()
            .instance()
            .set(&DataKey::OfferCount, &(offer_id + 1));

        env.events().publish(
            (Symbol::new(&env, "offer_created"), offer_id),
            OfferCreatedEvent {
                offer_id,
                token_contract,
                token_id,
                creator: caller,
                quantity,
                min_price,
                reserve_price,
            },
        );

        Ok(offer_id)
    }

    /// Buy `quantity` copies directly. `payment` is the gross amount pulled
    /// from the caller and split between royalty, commission and seller;
    /// `min_price` is the floor for the whole requested quantity.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotFound`: Offer does not exist
    /// - `NotDirectSale`: Offer does not allow direct sale
    /// - `InvalidAmount`: quantity <= 0 or negative payment
    /// - `InsufficientInventory`: Fewer than `quantity` copies left
    /// - `PriceTooLow`: payment below the offer's floor
    /// - `InsufficientBalance`: Seller no longer holds the copies
    pub fn buy(
        env: Env,
        caller: Address,
        offer_id: u64,
        quantity: i128,
        payment: i128,
    ) -> Result<(), Error> {
        Self::check_initialized(&env)?;

        caller.require_auth();

        let mut offer = Self::load_offer(&env, offer_id)?;

        if !offer.allows_direct_sale {
            return Err(Error::NotDirectSale);
        }

        if quantity <= 0 || payment < 0 {
            return Err(Error::InvalidAmount);
        }

        if quantity > offer.available_copies {
            return Err(Error::InsufficientInventory);
        }

        if payment < offer.min_price {
            return Err(Error::PriceTooLow);
        }

        let payment_token = Self::payment_token(&env)?;
        escrow::hold(&env, &payment_token, &caller, payment);
        Self::settle(&env, &offer, &caller, quantity, payment)?;

        offer.available_copies -= quantity;
        env.storage()
            .instance()
            .set(&DataKey::Offer(offer_id), &offer);

        env.events().publish(
            (Symbol::new(&env, "direct_sale"), offer_id),
            DirectSaleEvent {
                offer_id,
                buyer: caller,
                quantity,
                payment,
            },
        );

        Ok(())
    }

    /// Offer snapshot
    pub fn get_offer(env: Env, offer_id: u64) -> Result<Offer, Error> {
        Self::load_offer(&env, offer_id)
    }

    pub fn get_offers_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::OfferCount)
            .unwrap_or(0)
    }

    // ============================================
    // AUCTION STORE
    // ============================================

    /// Reserve `num_copies` out of an offer and open an auction seeded with
    /// the caller's first bid. The bid amount is escrowed; the reservation
    /// comes off `available_copies` immediately, not per bid.
    ///
    /// Returns the new auction id (sequential from 0).
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotFound`: Offer does not exist
    /// - `OfferNotAuctionable`: Offer disallows auctions or has no duration
    /// - `AuctionEnded`: The offer's auction window already elapsed
    /// - `InvalidAmount`: num_copies <= 0, a negative bid, or an end time
    ///   that overflows
    /// - `InsufficientInventory`: Fewer than `num_copies` copies left
    /// - `BidTooLow`: Bid below the offer's reserve price
    pub fn create_auction_and_bid(
        env: Env,
        caller: Address,
        offer_id: u64,
        num_copies: i128,
        bid_amount: i128,
    ) -> Result<u64, Error> {
        Self::check_initialized(&env)?;

        caller.require_auth();

        let mut offer = Self::load_offer(&env, offer_id)?;

        if !offer.allows_auction || offer.duration == 0 {
            return Err(Error::OfferNotAuctionable);
        }

        let now = env.ledger().timestamp();
        let window_end = offer
            .start_time
            .checked_add(offer.duration)
            .ok_or(Error::InvalidAmount)?;
        if now >= window_end {
            return Err(Error::AuctionEnded);
        }

        if num_copies <= 0 || bid_amount < 0 {
            return Err(Error::InvalidAmount);
        }

        if num_copies > offer.available_copies {
            return Err(Error::InsufficientInventory);
        }

        if bid_amount < offer.reserve_price {
            return Err(Error::BidTooLow);
        }

        // A window that fits from its start can still overflow from `now`
        let end_time = now.checked_add(offer.duration).ok_or(Error::InvalidAmount)?;

        let payment_token = Self::payment_token(&env)?;
        escrow::hold(&env, &payment_token, &caller, bid_amount);

        let auction_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::AuctionCount)
            .unwrap_or(0);

        let auction = Auction {
            id: auction_id,
            offer_id,
            num_copies,
            highest_bid: bid_amount,
            highest_bidder: Some(caller.clone()),
            start_time: now,
            end_time,
            active: true,
        };

        offer.available_copies -= num_copies;

        env.storage()
            .instance()
            .set(&DataKey::Auction(auction_id), &auction);
        env.storage()
            .instance()
            .set(&DataKey::AuctionCount, &(auction_id + 1));
        env.storage()
            .instance()
            .set(&DataKey::Offer(offer_id), &offer);

        let mut linked: Vec<u64> = env
            .storage()
            .instance()
            .get(&DataKey::OfferAuctions(offer_id))
            .unwrap_or(Vec::new(&env));
        linked.push_back(auction_id);
        env.storage()
            .instance()
            .set(&DataKey::OfferAuctions(offer_id), &linked);

        env.events().publish(
            (Symbol::new(&env, "auction_created"), auction_id),
            AuctionCreatedEvent {
                auction_id,
                offer_id,
                bidder: caller,
                num_copies,
                bid_amount,
                end_time,
            },
        );

        Ok(auction_id)
    }

    /// Outbid the current highest bidder. The previous escrow is refunded
    /// in full before the new amount is pulled; a failed refund rejects the
    /// new bid. A `num_copies` differing from the auction's reservation
    /// adjusts the offer's available copies by the delta, atomically with
    /// the bid.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotFound`: Auction does not exist
    /// - `AuctionEnded`: Past end time, or the auction was already closed
    /// - `InvalidAmount`: num_copies <= 0 or negative amount
    /// - `BidTooLow`: Amount does not strictly beat the highest bid (or
    ///   meet the reserve for a first bid)
    /// - `InsufficientInventory`: Reservation increase exceeds what is left
    /// - `EscrowRefundFailed`: Previous bidder could not be refunded
    pub fn bid(
        env: Env,
        caller: Address,
        auction_id: u64,
        num_copies: i128,
        amount: i128,
    ) -> Result<(), Error> {
        Self::check_initialized(&env)?;

        caller.require_auth();

        let mut auction = Self::load_auction(&env, auction_id)?;

        if !auction.active {
            return Err(Error::AuctionEnded);
        }

        let now = env.ledger().timestamp();
        if now >= auction.end_time {
            return Err(Error::AuctionEnded);
        }

        if num_copies <= 0 || amount < 0 {
            return Err(Error::InvalidAmount);
        }

        let mut offer = Self::load_offer(&env, auction.offer_id)?;

        match &auction.highest_bidder {
            Some(_) => {
                if amount <= auction.highest_bid {
                    return Err(Error::BidTooLow);
                }
            }
            None => {
                if amount < offer.reserve_price {
                    return Err(Error::BidTooLow);
                }
            }
        }

        let delta = num_copies - auction.num_copies;
        if delta > offer.available_copies {
            return Err(Error::InsufficientInventory);
        }

        let payment_token = Self::payment_token(&env)?;
        if let Some(previous) = auction.highest_bidder.clone() {
            escrow::refund(&env, &payment_token, &previous, auction.highest_bid)?;
        }
        escrow::hold(&env, &payment_token, &caller, amount);

        offer.available_copies -= delta;
        auction.num_copies = num_copies;
        auction.highest_bid = amount;
        auction.highest_bidder = Some(caller.clone());

        env.storage()
            .instance()
            .set(&DataKey::Auction(auction_id), &auction);
        env.storage()
            .instance()
            .set(&DataKey::Offer(offer.id), &offer);

        env.events().publish(
            (Symbol::new(&env, "bid_placed"), auction_id),
            BidPlacedEvent {
                auction_id,
                bidder: caller,
                num_copies,
                amount,
            },
        );

        Ok(())
    }

    /// Close an auction after its end time and settle: copies go to the
    /// winner, the escrowed bid is split between royalty, commission and
    /// seller. Anyone may trigger a close. An auction that never saw a bid
    /// releases its reservation back onto the offer.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotFound`: Auction does not exist
    /// - `AlreadyClosed`: Auction was already closed
    /// - `AuctionStillActive`: End time not reached
    /// - `InsufficientBalance`: Seller no longer holds the copies
    pub fn close_auction(env: Env, auction_id: u64) -> Result<(), Error> {
        Self::check_initialized(&env)?;

        let mut auction = Self::load_auction(&env, auction_id)?;

        if !auction.active {
            return Err(Error::AlreadyClosed);
        }

        let now = env.ledger().timestamp();
        if now < auction.end_time {
            return Err(Error::AuctionStillActive);
        }

        let mut offer = Self::load_offer(&env, auction.offer_id)?;

        auction.active = false;

        match auction.highest_bidder.clone() {
            None => {
                // Reservation was never backed by a bid; put it back.
                offer.available_copies = offer
                    .available_copies
                    .checked_add(auction.num_copies)
                    .ok_or(Error::InvalidAmount)?;
            }
            Some(winner) => {
                Self::settle(&env, &offer, &winner, auction.num_copies, auction.highest_bid)?;
            }
        }

        env.storage()
            .instance()
            .set(&DataKey::Auction(auction_id), &auction);
        env.storage()
            .instance()
            .set(&DataKey::Offer(offer.id), &offer);

        env.events().publish(
            (Symbol::new(&env, "auction_closed"), auction_id),
            AuctionClosedEvent {
                auction_id,
                offer_id: offer.id,
                winner: auction.highest_bidder,
                num_copies: auction.num_copies,
                amount: auction.highest_bid,
            },
        );

        Ok(())
    }

    /// True while at least one open auction on the offer has a bidder
    pub fn has_bids(env: Env, offer_id: u64) -> Result<bool, Error> {
        Self::load_offer(&env, offer_id)?;

        let linked: Vec<u64> = env
            .storage()
            .instance()
            .get(&DataKey::OfferAuctions(offer_id))
            .unwrap_or(Vec::new(&env));

        for auction_id in linked.iter() {
            let auction = Self::load_auction(&env, auction_id)?;
            if auction.active && auction.highest_bidder.is_some() {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Auction snapshot
    pub fn get_auction(env: Env, auction_id: u64) -> Result<Auction, Error> {
        Self::load_auction(&env, auction_id)
    }

    pub fn get_auctions_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::AuctionCount)
            .unwrap_or(0)
    }

    pub fn get_current_bid_amount(env: Env, auction_id: u64) -> Result<i128, Error> {
        let auction = Self::load_auction(&env, auction_id)?;
        Ok(auction.highest_bid)
    }

    pub fn get_end_date(env: Env, auction_id: u64) -> Result<u64, Error> {
        let auction = Self::load_auction(&env, auction_id)?;
        Ok(auction.end_time)
    }

    /// Winner of a finished auction
    ///
    /// # Errors
    /// - `NotFound`: Auction does not exist, or it never saw a bid
    /// - `AuctionStillActive`: End time not reached
    pub fn get_winner(env: Env, auction_id: u64) -> Result<Address, Error> {
        let auction = Self::load_auction(&env, auction_id)?;

        let now = env.ledger().timestamp();
        if now < auction.end_time {
            return Err(Error::AuctionStillActive);
        }

        auction.highest_bidder.ok_or(Error::NotFound)
    }

    // ============================================
    // TREASURY VIEWS
    // ============================================

    pub fn accumulated_commission(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::AccumulatedCommission)
            .unwrap_or(0)
    }

    /// Gross volume across all completed sales and settlements
    pub fn total_sales(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalSales)
            .unwrap_or(0)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn check_initialized(env: &Env) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn payment_token(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .ok_or(Error::NotInitialized)
    }

    fn load_offer(env: &Env, offer_id: u64) -> Result<Offer, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Offer(offer_id))
            .ok_or(Error::NotFound)
    }

    fn load_auction(env: &Env, auction_id: u64) -> Result<Auction, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Auction(auction_id))
            .ok_or(Error::NotFound)
    }

    /// Move `quantity` copies from the offer's seller to `buyer` and split
    /// `gross` (already held by the engine) between the token's original
    /// creator, the treasury and the seller. Shared by direct sales and
    /// auction closes.
    fn settle(
        env: &Env,
        offer: &Offer,
        buyer: &Address,
        quantity: i128,
        gross: i128,
    ) -> Result<(), Error> {
        let royalty_bps = Self::registry_royalty_rate(env, &offer.token_contract, offer.token_id);
        let royalty_recipient =
            Self::registry_original_creator(env, &offer.token_contract, offer.token_id);
        let commission_bps: u32 = env
            .storage()
            .instance()
            .get(&DataKey::CommissionBps)
            .unwrap_or(0);

        let (royalty, commission, seller_share) =
            split_proceeds(gross, royalty_bps, commission_bps).ok_or(Error::InvalidAmount)?;

        let seller_balance =
            Self::registry_balance_of(env, &offer.token_contract, offer.token_id, &offer.creator);
        if seller_balance < quantity {
            return Err(Error::InsufficientBalance);
        }

        Self::registry_safe_transfer(
            env,
            &offer.token_contract,
            offer.token_id,
            &offer.creator,
            buyer,
            quantity,
        );

        let payment_token = Self::payment_token(env)?;
        escrow::payout(env, &payment_token, &royalty_recipient, royalty);
        escrow::payout(env, &payment_token, &offer.creator, seller_share);

        let accumulated: i128 = env
            .storage()
            .instance()
            .get(&DataKey::AccumulatedCommission)
            .unwrap_or(0);
        let accumulated = accumulated
            .checked_add(commission)
            .ok_or(Error::InvalidAmount)?;
        env.storage()
            .instance()
            .set(&DataKey::AccumulatedCommission, &accumulated);

        let volume: i128 = env
            .storage()
            .instance()
            .get(&DataKey::TotalSales)
            .unwrap_or(0);
        let volume = volume.checked_add(gross).ok_or(Error::InvalidAmount)?;
        env.storage().instance().set(&DataKey::TotalSales, &volume);

        Ok(())
    }

    // ============================================
    // TOKEN REGISTRY CALLS
    // ============================================

    fn registry_balance_of(
        env: &Env,
        token_contract: &Address,
        token_id: u32,
        owner: &Address,
    ) -> i128 {
        env.invoke_contract(
            token_contract,
            &Symbol::new(env, "balance_of"),
            vec![env, token_id.into_val(env), owner.to_val()],
        )
    }

    fn registry_is_approved(
        env: &Env,
        token_contract: &Address,
        owner: &Address,
        operator: &Address,
    ) -> bool {
        env.invoke_contract(
            token_contract,
            &Symbol::new(env, "is_approved_for_all"),
            vec![env, owner.to_val(), operator.to_val()],
        )
    }

    fn registry_royalty_rate(env: &Env, token_contract: &Address, token_id: u32) -> u32 {
        env.invoke_contract(
            token_contract,
            &Symbol::new(env, "royalty_rate_of"),
            vec![env, token_id.into_val(env)],
        )
    }

    fn registry_original_creator(env: &Env, token_contract: &Address, token_id: u32) -> Address {
        env.invoke_contract(
            token_contract,
            &Symbol::new(env, "original_creator_of"),
            vec![env, token_id.into_val(env)],
        )
    }

    fn registry_safe_transfer(
        env: &Env,
        token_contract: &Address,
        token_id: u32,
        from: &Address,
        to: &Address,
        amount: i128,
    ) {
        env.invoke_contract::<()>(
            token_contract,
            &Symbol::new(env, "safe_transfer"),
            vec![
                env,
                env.current_contract_address().to_val(),
                token_id.into_val(env),
                from.to_val(),
                to.to_val(),
                amount.into_val(env),
            ],
        );
    }
}
