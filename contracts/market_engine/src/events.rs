use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct OfferCreatedEvent {
    pub offer_id: u64,
    pub token_contract: Address,
    pub token_id: u32,
    pub creator: Address,
    pub quantity: i128,
    pub min_price: i128,
    pub reserve_price: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct DirectSaleEvent {
    pub offer_id: u64,
    pub buyer: Address,
    pub quantity: i128,
    pub payment: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct AuctionCreatedEvent {
    pub auction_id: u64,
    pub offer_id: u64,
    pub bidder: Address,
    pub num_copies: i128,
    pub bid_amount: i128,
    pub end_time: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct BidPlacedEvent {
    pub auction_id: u64,
    pub bidder: Address,
    pub num_copies: i128,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct AuctionClosedEvent {
    pub auction_id: u64,
    pub offer_id: u64,
    pub winner: Option<Address>,
    pub num_copies: i128,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct BalanceExtractedEvent {
    pub operator: Address,
    pub amount: i128,
}
