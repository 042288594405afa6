#![no_std]

mod error;
mod events;
mod storage;

pub use error::Error;
use events::{ApproveEvent, MintEvent, TransferEvent, WhitelistEvent};
use storage::{Allowance, DataKey, Metadata};

use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol};

/// Equity-representing token whose transfers are gated by a whitelist.
///
/// Exposes the standard token surface (`balance`, `decimals`, `approve`,
/// `allowance`, `transfer`, `transfer_from`) so any contract can move it
/// through `soroban_sdk::token::Client`.
#[contract]
pub struct EquityToken;

#[contractimpl]
impl EquityToken {
    /// Initialize the token contract
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        admin: Address,
        decimal: u32,
        name: String,
        symbol: String,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(
            &DataKey::Metadata,
            &Metadata {
                decimal,
                name,
                symbol,
            },
        );

        Ok(())
    }

    /// Mint tokens to `to` (admin only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), Error> {
        let admin = Self::read_admin(&env)?;
        admin.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        Self::credit(&env, &to, amount)?;

        env.events().publish(
            (Symbol::new(&env, "mint"), to.clone()),
            MintEvent { to, amount },
        );

        Ok(())
    }

    // ============================================
    // WHITELIST GATE
    // ============================================

    /// Allow `account` to send and receive the token.
    ///
    /// The admin may whitelist anyone; any other caller may only whitelist
    /// itself.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is neither admin nor `account`
    pub fn whitelist(env: Env, caller: Address, account: Address) -> Result<(), Error> {
        let admin = Self::read_admin(&env)?;
        if caller != admin && caller != account {
            return Err(Error::Unauthorized);
        }

        caller.require_auth();

        env.storage()
            .persistent()
            .set(&DataKey::Whitelisted(account.clone()), &true);

        env.events().publish(
            (Symbol::new(&env, "whitelisted"), account.clone()),
            WhitelistEvent {
                account,
                by: caller,
            },
        );

        Ok(())
    }

    /// Revoke transfer rights from `account` (admin only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn remove_from_whitelist(env: Env, account: Address) -> Result<(), Error> {
        let admin = Self::read_admin(&env)?;
        admin.require_auth();

        env.storage()
            .persistent()
            .remove(&DataKey::Whitelisted(account.clone()));

        env.events().publish(
            (Symbol::new(&env, "unwhitelisted"), account.clone()),
            WhitelistEvent { account, by: admin },
        );

        Ok(())
    }

    pub fn whitelisted(env: Env, account: Address) -> bool {
        env.storage()
            .persistent()
            .get::<DataKey, bool>(&DataKey::Whitelisted(account))
            .unwrap_or(false)
    }

    // ============================================
    // ALLOWANCES
    // ============================================

    /// Let `spender` move up to `amount` of `from`'s balance until
    /// `expiration_ledger`.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount < 0
    /// - `InvalidExpiration`: Non-zero allowance that already expired
    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), Error> {
        Self::check_initialized(&env)?;

        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        if amount > 0 && expiration_ledger < env.ledger().sequence() {
            return Err(Error::InvalidExpiration);
        }

        let key = DataKey::Allowance(from.clone(), spender.clone());
        if amount == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(
                &key,
                &Allowance {
                    amount,
                    expiration_ledger,
                },
            );
        }

        env.events().publish(
            (Symbol::new(&env, "approve"), from.clone(), spender.clone()),
            ApproveEvent {
                from,
                spender,
                amount,
                expiration_ledger,
            },
        );

        Ok(())
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        Self::read_allowance(&env, &from, &spender)
    }

    // ============================================
    // TRANSFERS
    // ============================================

    /// Transfer tokens between whitelisted accounts
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `NotWhitelisted`: Sender or receiver is not whitelisted
    /// - `InsufficientBalance`: Not enough balance
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        Self::check_initialized(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        Self::check_whitelisted(&env, &from, &to)?;
        Self::move_balance(&env, &from, &to, amount)
    }

    /// Transfer tokens on behalf of `from` using a prior approval
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `NotWhitelisted`: Sender or receiver is not whitelisted
    /// - `InsufficientAllowance`: Spender allowance too small or expired
    /// - `InsufficientBalance`: Not enough balance
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::check_initialized(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        spender.require_auth();

        Self::check_whitelisted(&env, &from, &to)?;

        let allowance = Self::read_allowance(&env, &from, &spender);
        if allowance < amount {
            return Err(Error::InsufficientAllowance);
        }

        Self::move_balance(&env, &from, &to, amount)?;

        let key = DataKey::Allowance(from.clone(), spender.clone());
        let remaining = allowance - amount;
        if remaining == 0 {
            env.storage().persistent().remove(&key);
        } else {
            let mut stored: Allowance = env
                .storage()
                .persistent()
                .get(&key)
                .ok_or(Error::InsufficientAllowance)?;
            stored.amount = remaining;
            env.storage().persistent().set(&key, &stored);
        }

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get::<DataKey, i128>(&DataKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn decimals(env: Env) -> Result<u32, Error> {
        Ok(Self::read_metadata(&env)?.decimal)
    }

    pub fn name(env: Env) -> Result<String, Error> {
        Ok(Self::read_metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        Ok(Self::read_metadata(&env)?.symbol)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        Self::read_admin(&env)
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

    fn read_admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    fn read_metadata(env: &Env) -> Result<Metadata, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Metadata)
            .ok_or(Error::NotInitialized)
    }

    fn read_allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
        match env
            .storage()
            .persistent()
            .get::<DataKey, Allowance>(&DataKey::Allowance(from.clone(), spender.clone()))
        {
            Some(allowance) if allowance.expiration_ledger >= env.ledger().sequence() => {
                allowance.amount
            }
            _ => 0,
        }
    }

    fn check_whitelisted(env: &Env, from: &Address, to: &Address) -> Result<(), Error> {
        if !Self::whitelisted(env.clone(), from.clone())
            || !Self::whitelisted(env.clone(), to.clone())
        {
            return Err(Error::NotWhitelisted);
        }
        Ok(())
    }

    fn credit(env: &Env, to: &Address, amount: i128) -> Result<(), Error> {
        let key = DataKey::Balance(to.clone());
        let current = env
            .storage()
            .persistent()
            .get::<DataKey, i128>(&key)
            .unwrap_or(0);
        let updated = current.checked_add(amount).ok_or(Error::InvalidAmount)?;
        env.storage().persistent().set(&key, &updated);
        Ok(())
    }

    fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), Error> {
        let from_key = DataKey::Balance(from.clone());
        let from_balance = env
            .storage()
            .persistent()
            .get::<DataKey, i128>(&from_key)
            .unwrap_or(0);

        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }

        let new_from_balance = from_balance - amount;
        if new_from_balance == 0 {
            env.storage().persistent().remove(&from_key);
        } else {
            env.storage().persistent().set(&from_key, &new_from_balance);
        }

        Self::credit(env, to, amount)?;

        env.events().publish(
            (Symbol::new(env, "transfer"), from.clone(), to.clone()),
            TransferEvent {
                from: from.clone(),
                to: to.clone(),
                amount,
            },
        );

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::testutils::{Address as _, Ledger};
    use soroban_sdk::{Address, Env, String};

    const UNIT: i128 = 1_000_000_000_000_000_000; // 18 decimals

    fn setup(env: &Env) -> (EquityTokenClient<'_>, Address) {
        let contract_id = env.register_contract(None, EquityToken);
        let client = EquityTokenClient::new(env, &contract_id);

        let admin = Address::generate(env);
        client.initialize(
            &admin,
            &18,
            &String::from_str(env, "Tesla"),
            &String::from_str(env, "TS"),
        );

        (client, admin)
    }

    #[test]
    fn test_initialize() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, admin) = setup(&env);

        assert_eq!(client.decimals(), 18);
        assert_eq!(client.name(), String::from_str(&env, "Tesla"));
        assert_eq!(client.symbol(), String::from_str(&env, "TS"));
        assert_eq!(client.admin(), admin);

        let result = client.try_initialize(
            &admin,
            &18,
            &String::from_str(&env, "Tesla"),
            &String::from_str(&env, "TS"),
        );
        assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
    }

    #[test]
    fn test_mint_and_balance() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, _) = setup(&env);
        let user = Address::generate(&env);

        client.mint(&user, &(1000 * UNIT));
        assert_eq!(client.balance(&user), 1000 * UNIT);

        let result = client.try_mint(&user, &0);
        assert_eq!(result, Err(Ok(Error::InvalidAmount)));
    }

    #[test]
    fn test_transfer_requires_whitelist() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, admin) = setup(&env);
        let user1 = Address::generate(&env);
        let user2 = Address::generate(&env);

        client.mint(&user1, &(1000 * UNIT));

        let result = client.try_transfer(&user1, &user2, &(10 * UNIT));
        assert_eq!(result, Err(Ok(Error::NotWhitelisted)));

        client.whitelist(&admin, &user1);
        let result = client.try_transfer(&user1, &user2, &(10 * UNIT));
        assert_eq!(result, Err(Ok(Error::NotWhitelisted)));

        // Receiver may whitelist itself
        client.whitelist(&user2, &user2);
        client.transfer(&user1, &user2, &(10 * UNIT));

        assert_eq!(client.balance(&user1), 990 * UNIT);
        assert_eq!(client.balance(&user2), 10 * UNIT);
    }

    #[test]
    fn test_whitelist_other_account_unauthorized() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, _) = setup(&env);
        let user1 = Address::generate(&env);
        let user2 = Address::generate(&env);

        let result = client.try_whitelist(&user1, &user2);
        assert_eq!(result, Err(Ok(Error::Unauthorized)));
        assert!(!client.whitelisted(&user2));
    }

    #[test]
    fn test_remove_from_whitelist_blocks_transfers() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, admin) = setup(&env);
        let user1 = Address::generate(&env);
        let user2 = Address::generate(&env);

        client.mint(&user1, &(100 * UNIT));
        client.whitelist(&admin, &user1);
        client.whitelist(&admin, &user2);
        client.transfer(&user1, &user2, &UNIT);

        client.remove_from_whitelist(&user2);
        assert!(!client.whitelisted(&user2));

        let result = client.try_transfer(&user1, &user2, &UNIT);
        assert_eq!(result, Err(Ok(Error::NotWhitelisted)));
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, admin) = setup(&env);
        let owner = Address::generate(&env);
        let spender = Address::generate(&env);

        client.mint(&owner, &(100 * UNIT));
        client.whitelist(&admin, &owner);
        client.whitelist(&admin, &spender);

        client.approve(&owner, &spender, &(30 * UNIT), &1000);
        assert_eq!(client.allowance(&owner, &spender), 30 * UNIT);

        client.transfer_from(&spender, &owner, &spender, &(20 * UNIT));
        assert_eq!(client.allowance(&owner, &spender), 10 * UNIT);
        assert_eq!(client.balance(&spender), 20 * UNIT);

        let result = client.try_transfer_from(&spender, &owner, &spender, &(20 * UNIT));
        assert_eq!(result, Err(Ok(Error::InsufficientAllowance)));

        client.transfer_from(&spender, &owner, &spender, &(10 * UNIT));
        assert_eq!(client.allowance(&owner, &spender), 0);
        assert_eq!(client.balance(&owner), 70 * UNIT);
    }

    #[test]
    fn test_expired_allowance_reads_zero() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, admin) = setup(&env);
        let owner = Address::generate(&env);
        let spender = Address::generate(&env);

        client.mint(&owner, &(100 * UNIT));
        client.whitelist(&admin, &owner);
        client.whitelist(&admin, &spender);
        client.approve(&owner, &spender, &(30 * UNIT), &100);

        env.ledger().set_sequence_number(101);

        assert_eq!(client.allowance(&owner, &spender), 0);
        let result = client.try_transfer_from(&spender, &owner, &spender, &UNIT);
        assert_eq!(result, Err(Ok(Error::InsufficientAllowance)));

        let result = client.try_approve(&owner, &spender, &UNIT, &100);
        assert_eq!(result, Err(Ok(Error::InvalidExpiration)));
    }

    #[test]
    fn test_insufficient_balance_error() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, admin) = setup(&env);
        let user1 = Address::generate(&env);
        let user2 = Address::generate(&env);

        client.mint(&user1, &(1000 * UNIT));
        client.whitelist(&admin, &user1);
        client.whitelist(&admin, &user2);

        let result = client.try_transfer(&user1, &user2, &(1500 * UNIT));
        assert_eq!(result, Err(Ok(Error::InsufficientBalance)));
        assert_eq!(client.balance(&user1), 1000 * UNIT);
    }
}
