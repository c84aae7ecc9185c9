use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Authorization errors
    NotApproved = 3,

    // Item errors
    NotFound = 4,
    InvalidRoyalty = 5,

    // Balance errors
    InsufficientBalance = 6,
    InvalidAmount = 7,
}
