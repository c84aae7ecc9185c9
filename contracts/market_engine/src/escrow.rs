//! Bid-ledger primitives. Escrowed funds live on the engine contract's own
//! payment-token balance; at any point the engine holds exactly one amount
//! per open auction, tied to the current highest bidder.

use soroban_sdk::{token, Address, Env};

use crate::error::Error;

/// Pull `amount` from `from` into the engine. A transfer the caller cannot
/// cover traps, which rolls back the whole operation.
pub fn hold(env: &Env, payment_token: &Address, from: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(env, payment_token).transfer(
            from,
            &env.current_contract_address(),
            &amount,
        );
    }
}

/// Return a held amount to an outbid bidder. A refund that cannot complete
/// must also reject the bid that displaced it, so the failure is surfaced
/// as an error instead of a trap.
pub fn refund(env: &Env, payment_token: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }

    let client = token::Client::new(env, payment_token);
    match client.try_transfer(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::EscrowRefundFailed),
    }
}

/// Pay held funds out at settlement.
pub fn payout(env: &Env, payment_token: &Address, to: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(env, payment_token).transfer(
            &env.current_contract_address(),
            to,
            &amount,
        );
    }
}
