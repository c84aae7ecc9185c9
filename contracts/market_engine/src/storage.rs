use soroban_sdk::{contracttype, Address};

// Constants
pub const BASIS_POINTS: u32 = 10_000; // 100% = 10,000 basis points

/// A listing of `total_copies` copies of one token id from one seller.
/// Never deleted; `available_copies` is the single source of truth for
/// how many copies can still be sold or reserved for auction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Offer {
    /// Unique offer id, sequential from 0
    pub id: u64,
    /// Token registry contract holding the copies
    pub token_contract: Address,
    /// Token id within the registry
    pub token_id: u32,
    /// Seller at creation time (not necessarily the original minter)
    pub creator: Address,
    /// Copies listed at creation
    pub total_copies: i128,
    /// Copies not yet sold or reserved by an auction
    pub available_copies: i128,
    pub allows_direct_sale: bool,
    pub allows_auction: bool,
    /// Direct-sale floor for the whole requested quantity
    pub min_price: i128,
    /// Auction floor for the first bid
    pub reserve_price: i128,
    /// Start of the auction window
    pub start_time: u64,
    /// Auction window length in seconds; 0 means direct-sale only
    pub duration: u64,
}

/// One bidding round reserving `num_copies` out of an offer.
/// Reserved copies were already taken off `Offer.available_copies`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Auction {
    /// Unique auction id, sequential from 0
    pub id: u64,
    /// Offer the reservation is drawn from
    pub offer_id: u64,
    /// Copies this auction will transfer to its winner
    pub num_copies: i128,
    pub highest_bid: i128,
    pub highest_bidder: Option<Address>,
    pub start_time: u64,
    /// start_time + offer.duration, fixed at creation
    pub end_time: u64,
    /// Flips to false exactly once, on close
    pub active: bool,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    PaymentToken,
    CommissionBps,
    Offer(u64),         // offer id -> Offer
    OfferCount,         // next offer id
    Auction(u64),       // auction id -> Auction
    AuctionCount,       // next auction id
    OfferAuctions(u64), // offer id -> Vec<auction id>
    AccumulatedCommission,
    TotalSales,
    Initialized,
}
