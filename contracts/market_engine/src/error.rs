use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-9)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-19)
    // ============================================
    /// Caller is not the platform operator
    Unauthorized = 10,
    /// Engine lacks approval to move the seller's copies
    NotApproved = 11,

    // ============================================
    // LOOKUP ERRORS (20-29)
    // ============================================
    /// Offer or auction does not exist
    NotFound = 20,

    // ============================================
    // AMOUNT/INVENTORY ERRORS (30-39)
    // ============================================
    /// Quantity or amount out of range
    InvalidAmount = 30,
    /// Requested copies exceed what the seller holds or the offer has left
    InsufficientInventory = 31,
    /// Seller no longer holds the copies to settle
    InsufficientBalance = 32,

    // ============================================
    // PRICE/MODE ERRORS (40-49)
    // ============================================
    /// Payment below the offer's direct-sale floor
    PriceTooLow = 40,
    /// Bid does not beat the current highest bid (or the reserve)
    BidTooLow = 41,
    /// Offer does not allow direct sale
    NotDirectSale = 42,
    /// Offer does not allow auctions or has zero duration
    OfferNotAuctionable = 43,

    // ============================================
    // AUCTION LIFECYCLE ERRORS (50-59)
    // ============================================
    /// Auction (or the offer's auction window) has ended
    AuctionEnded = 50,
    /// Auction end time has not been reached
    AuctionStillActive = 51,
    /// Auction was already closed
    AlreadyClosed = 52,

    // ============================================
    // ESCROW ERRORS (60-69)
    // ============================================
    /// Refund of the previous highest bid could not complete
    EscrowRefundFailed = 60,
}
