use soroban_sdk::{contracttype, Address};

// Constants
pub const BASIS_POINTS: u32 = 10_000; // 100% = 10,000 basis points

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item {
    /// Original minting creator, fixed forever (royalty recipient)
    pub creator: Address,
    /// Copies minted at creation
    pub supply: i128,
    /// Royalty rate in basis points, immutable after mint
    pub royalty_bps: u32,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Item(u32),                  // token_id -> Item
    ItemCounter,                // last assigned token_id
    Balance(u32, Address),      // (token_id, owner)
    Approval(Address, Address), // (owner, operator)
    Initialized,
}
