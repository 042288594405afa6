#![no_std]

mod custody;
mod error;
mod events;
mod guard;
pub mod pricing;
mod storage;

pub use error::Error;
use events::*;
pub use storage::Listing;

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, String, Symbol, Vec};

/// Bonding-curve vault trading listed equity tokens against a collateral
/// stablecoin.
///
/// Every listed asset carries an inverse curve: the fewer units the vault
/// holds, the higher the price. Each trade settles at a single price taken
/// from the supply before the trade.
#[contract]
pub struct EquityVault;

#[contractimpl]
impl EquityVault {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the vault with its owner and collateral token
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidAsset`: Collateral does not report its decimals
    /// - `MathOverflow`: Collateral decimals too large
    pub fn initialize(env: Env, owner: Address, collateral: Address) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        let collateral_client = token::Client::new(&env, &collateral);
        let collateral_unit = pricing::unit_for(custody::decimals(&collateral_client)?)
            .ok_or(Error::MathOverflow)?;

        storage::init_config(&env, &owner, &collateral, collateral_unit);

        Ok(())
    }

    // ============================================
    // FLOW 1: OWNER LISTS A STOCK
    // ============================================

    /// List `asset` and move its initial supply into vault custody
    ///
    /// `initial_supply` is in whole tokens, `initial_price` in whole
    /// collateral units per token. The owner must have approved the vault for
    /// `initial_supply` whole tokens beforehand.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not the owner
    /// - `InvalidAmount`: Supply not positive or price negative
    /// - `InvalidAsset`: Asset is the collateral or not a token
    /// - `AlreadyListed`: Asset already listed
    /// - `InsufficientBalance` / `InsufficientAllowance`: Owner cannot fund the deposit
    /// - `TransferFailed`: Token rejected the deposit (e.g. not whitelisted)
    pub fn list_and_deposit_initial_stock(
        env: Env,
        caller: Address,
        asset: Address,
        name: String,
        initial_supply: i128,
        initial_price: i128,
    ) -> Result<Listing, Error> {
        guard::non_reentrant(&env, || {
            Self::require_owner(&env, &caller)?;

            if initial_supply <= 0 || initial_price < 0 {
                return Err(Error::InvalidAmount);
            }

            if asset == storage::collateral(&env)? {
                return Err(Error::InvalidAsset);
            }

            if storage::has_listing(&env, &asset) {
                return Err(Error::AlreadyListed);
            }

            let stock = token::Client::new(&env, &asset);
            let unit = pricing::unit_for(custody::decimals(&stock)?).ok_or(Error::MathOverflow)?;
            let deposit = initial_supply
                .checked_mul(unit)
                .ok_or(Error::MathOverflow)?;
            let pricing_factor =
                pricing::pricing_factor(initial_price, storage::collateral_unit(&env)?, initial_supply)
                    .ok_or(Error::MathOverflow)?;

            custody::ensure_funds(&stock, &caller, &env.current_contract_address(), deposit)?;
            custody::pull(&env, &stock, &caller, deposit)?;

            let listing = Listing {
                name: name.clone(),
                pricing_factor,
                current_supply: initial_supply,
                is_supported: true,
                unit,
            };
            storage::set_listing(&env, &asset, &listing);
            storage::push_listed_asset(&env, &asset);

            env.events().publish(
                (Symbol::new(&env, "stock_listed"), asset.clone()),
                StockListedEvent {
                    asset,
                    name,
                    initial_supply,
                    initial_price,
                    pricing_factor,
                },
            );

            Ok(listing)
        })
    }

    // ============================================
    // FLOW 2: USER BUYS STOCK
    // ============================================

    /// Buy `amount` whole tokens of `asset`, paying collateral at the
    /// pre-trade price. Returns the total cost charged.
    ///
    /// # Errors
    /// - `InvalidAmount`: Amount must be positive
    /// - `UnknownAsset`: Asset not listed
    /// - `InsufficientInventory`: Vault holds fewer than `amount` units
    /// - `InsufficientBalance` / `InsufficientAllowance`: Buyer cannot fund the cost
    /// - `TransferFailed`: Collateral or asset transfer rejected
    pub fn buy_stock(env: Env, buyer: Address, asset: Address, amount: i128) -> Result<i128, Error> {
        guard::non_reentrant(&env, || {
            if amount <= 0 {
                return Err(Error::InvalidAmount);
            }

            buyer.require_auth();

            let mut listing = Self::supported_listing(&env, &asset)?;

            if amount > listing.current_supply {
                log!(&env, "buy exceeds inventory", amount, listing.current_supply);
                return Err(Error::InsufficientInventory);
            }

            let price = pricing::price_at(listing.pricing_factor, listing.current_supply)
                .ok_or(Error::MathOverflow)?;
            let total_cost = pricing::total_for(price, amount).ok_or(Error::MathOverflow)?;
            let units = amount.checked_mul(listing.unit).ok_or(Error::MathOverflow)?;

            let collateral = token::Client::new(&env, &storage::collateral(&env)?);
            let stock = token::Client::new(&env, &asset);

            custody::ensure_funds(&collateral, &buyer, &env.current_contract_address(), total_cost)?;
            custody::pull(&env, &collateral, &buyer, total_cost)?;
            custody::push(&env, &stock, &buyer, units)?;

            // Both transfers settled
            listing.current_supply -= amount;
            storage::set_listing(&env, &asset, &listing);

            env.events().publish(
                (Symbol::new(&env, "stock_bought"), asset.clone(), buyer.clone()),
                StockBoughtEvent {
                    asset,
                    buyer,
                    amount,
                    price,
                    total_cost,
                    current_supply: listing.current_supply,
                },
            );

            Ok(total_cost)
        })
    }

    // ============================================
    // FLOW 3: USER SELLS STOCK
    // ============================================

    /// Sell `amount` whole tokens of `asset` back to the vault at the
    /// pre-trade price. Returns the collateral paid out.
    ///
    /// # Errors
    /// - `InvalidAmount`: Amount must be positive
    /// - `UnknownAsset`: Asset not listed
    /// - `InsufficientBalance` / `InsufficientAllowance`: Seller cannot deliver the tokens
    /// - `InsufficientVaultCollateral`: Vault cannot cover the payout
    /// - `TransferFailed`: Asset or collateral transfer rejected
    pub fn sell_stock(env: Env, seller: Address, asset: Address, amount: i128) -> Result<i128, Error> {
        guard::non_reentrant(&env, || {
            if amount <= 0 {
                return Err(Error::InvalidAmount);
            }

            seller.require_auth();

            let mut listing = Self::supported_listing(&env, &asset)?;

            let price = pricing::price_at(listing.pricing_factor, listing.current_supply)
                .ok_or(Error::MathOverflow)?;
            let payout = pricing::total_for(price, amount).ok_or(Error::MathOverflow)?;
            let units = amount.checked_mul(listing.unit).ok_or(Error::MathOverflow)?;
            let new_supply = listing
                .current_supply
                .checked_add(amount)
                .ok_or(Error::MathOverflow)?;

            let vault = env.current_contract_address();
            let collateral = token::Client::new(&env, &storage::collateral(&env)?);
            let stock = token::Client::new(&env, &asset);

            custody::ensure_funds(&stock, &seller, &vault, units)?;

            // Solvency: the payout must be covered before anything moves
            let reserves = collateral.balance(&vault);
            if reserves < payout {
                log!(&env, "sell exceeds vault collateral", payout, reserves);
                return Err(Error::InsufficientVaultCollateral);
            }

            custody::pull(&env, &stock, &seller, units)?;
            custody::push(&env, &collateral, &seller, payout)?;

            listing.current_supply = new_supply;
            storage::set_listing(&env, &asset, &listing);

            env.events().publish(
                (Symbol::new(&env, "stock_sold"), asset.clone(), seller.clone()),
                StockSoldEvent {
                    asset,
                    seller,
                    amount,
                    price,
                    payout,
                    current_supply: new_supply,
                },
            );

            Ok(payout)
        })
    }

    // ============================================
    // FLOW 4: LIQUIDITY TOP-UP
    // ============================================

    /// Transfer collateral from `funder` into the vault so sells can be paid
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount must be positive
    /// - `TransferFailed`: Collateral transfer rejected
    pub fn add_liquidity(env: Env, funder: Address, amount: i128) -> Result<(), Error> {
        guard::non_reentrant(&env, || {
            if amount <= 0 {
                return Err(Error::InvalidAmount);
            }

            funder.require_auth();

            let collateral = token::Client::new(&env, &storage::collateral(&env)?);
            match collateral.try_transfer(&funder, &env.current_contract_address(), &amount) {
                Ok(Ok(())) => {}
                _ => return Err(Error::TransferFailed),
            }

            env.events().publish(
                (Symbol::new(&env, "liquidity_added"), funder.clone()),
                LiquidityAddedEvent { funder, amount },
            );

            Ok(())
        })
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Current price of one whole token in collateral base units
    pub fn get_price(env: Env, asset: Address) -> Result<i128, Error> {
        let listing = Self::supported_listing(&env, &asset)?;
        pricing::price_at(listing.pricing_factor, listing.current_supply).ok_or(Error::MathOverflow)
    }

    /// Collateral a buyer would pay for `amount` tokens right now
    pub fn quote_buy(env: Env, asset: Address, amount: i128) -> Result<i128, Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let listing = Self::supported_listing(&env, &asset)?;
        if amount > listing.current_supply {
            return Err(Error::InsufficientInventory);
        }
        let price = pricing::price_at(listing.pricing_factor, listing.current_supply)
            .ok_or(Error::MathOverflow)?;
        pricing::total_for(price, amount).ok_or(Error::MathOverflow)
    }

    /// Collateral a seller would receive for `amount` tokens right now
    pub fn quote_sell(env: Env, asset: Address, amount: i128) -> Result<i128, Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let listing = Self::supported_listing(&env, &asset)?;
        let price = pricing::price_at(listing.pricing_factor, listing.current_supply)
            .ok_or(Error::MathOverflow)?;
        pricing::total_for(price, amount).ok_or(Error::MathOverflow)
    }

    /// Listing for `asset`; unlisted assets yield a zeroed, unsupported record
    pub fn stock_list(env: Env, asset: Address) -> Listing {
        storage::listing(&env, &asset).unwrap_or_else(|| Listing::unsupported(&env))
    }

    pub fn is_listed(env: Env, asset: Address) -> bool {
        storage::has_listing(&env, &asset)
    }

    pub fn listed_assets(env: Env) -> Vec<Address> {
        storage::listed_assets(&env)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        storage::owner(&env)
    }

    pub fn collateral(env: Env) -> Result<Address, Error> {
        storage::collateral(&env)
    }

    /// Collateral currently held by the vault
    pub fn collateral_balance(env: Env) -> Result<i128, Error> {
        let collateral = token::Client::new(&env, &storage::collateral(&env)?);
        Ok(collateral.balance(&env.current_contract_address()))
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
        let owner = storage::owner(env)?;
        if *caller != owner {
            return Err(Error::Unauthorized);
        }
        caller.require_auth();
        Ok(())
    }

    fn supported_listing(env: &Env, asset: &Address) -> Result<Listing, Error> {
        match storage::listing(env, asset) {
            Some(listing) if listing.is_supported => Ok(listing),
            _ => Err(Error::UnknownAsset),
        }
    }
}
