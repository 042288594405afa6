use crate::error::Error;
use soroban_sdk::{log, token, Address, Env};

/// Check that `holder` can fund a pull of `amount` by `spender`.
///
/// # Errors
/// - `InsufficientBalance`: holder balance below `amount`
/// - `InsufficientAllowance`: approval to `spender` below `amount`
pub fn ensure_funds(
    client: &token::Client,
    holder: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), Error> {
    if client.balance(holder) < amount {
        return Err(Error::InsufficientBalance);
    }
    if client.allowance(holder, spender) < amount {
        return Err(Error::InsufficientAllowance);
    }
    Ok(())
}

/// Pull `amount` from `from` into vault custody using the vault's allowance.
pub fn pull(env: &Env, client: &token::Client, from: &Address, amount: i128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }

    let vault = env.current_contract_address();
    match client.try_transfer_from(&vault, from, &vault, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "pull failed", client.address.clone(), from.clone(), amount);
            Err(Error::TransferFailed)
        }
    }
}

/// Push `amount` out of vault custody to `to`.
pub fn push(env: &Env, client: &token::Client, to: &Address, amount: i128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }

    let vault = env.current_contract_address();
    match client.try_transfer(&vault, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "push failed", client.address.clone(), to.clone(), amount);
            Err(Error::TransferFailed)
        }
    }
}

/// Decimals of a token contract, `InvalidAsset` if it does not answer.
pub fn decimals(client: &token::Client) -> Result<u32, Error> {
    match client.try_decimals() {
        Ok(Ok(decimals)) => Ok(decimals),
        _ => Err(Error::InvalidAsset),
    }
}
