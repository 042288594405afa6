use crate::error::Error;
use soroban_sdk::{contracttype, Address, Env, String, Vec};

/// Curve state and inventory of one listed asset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Listing {
    /// Display label, fixed at listing time
    pub name: String,
    /// Curve scale: price(s) = pricing_factor / max(s, 1)
    pub pricing_factor: i128,
    /// Whole units held by the vault and available to buyers
    pub current_supply: i128,
    /// True from listing onward
    pub is_supported: bool,
    /// Base units per whole token (10^decimals of the asset)
    pub unit: i128,
}

impl Listing {
    /// Zeroed record returned for assets that were never listed.
    pub fn unsupported(env: &Env) -> Self {
        Listing {
            name: String::from_str(env, ""),
            pricing_factor: 0,
            current_supply: 0,
            is_supported: false,
            unit: 0,
        }
    }
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    Collateral,
    CollateralUnit, // 10^collateral decimals
    ListedAssets,
    Listing(Address), // asset → Listing
    Initialized,
    Locked,
}

// Configuration

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn init_config(env: &Env, owner: &Address, collateral: &Address, collateral_unit: i128) {
    env.storage().instance().set(&DataKey::Initialized, &true);
    env.storage().instance().set(&DataKey::Owner, owner);
    env.storage().instance().set(&DataKey::Collateral, collateral);
    env.storage()
        .instance()
        .set(&DataKey::CollateralUnit, &collateral_unit);
    env.storage()
        .instance()
        .set(&DataKey::ListedAssets, &Vec::<Address>::new(env));
}

pub fn owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

pub fn collateral(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Collateral)
        .ok_or(Error::NotInitialized)
}

pub fn collateral_unit(env: &Env) -> Result<i128, Error> {
    env.storage()
        .instance()
        .get(&DataKey::CollateralUnit)
        .ok_or(Error::NotInitialized)
}

// Listings

pub fn has_listing(env: &Env, asset: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Listing(asset.clone()))
}

pub fn listing(env: &Env, asset: &Address) -> Option<Listing> {
    env.storage()
        .persistent()
        .get(&DataKey::Listing(asset.clone()))
}

pub fn set_listing(env: &Env, asset: &Address, listing: &Listing) {
    env.storage()
        .persistent()
        .set(&DataKey::Listing(asset.clone()), listing);
}

pub fn listed_assets(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::ListedAssets)
        .unwrap_or(Vec::new(env))
}

pub fn push_listed_asset(env: &Env, asset: &Address) {
    let mut assets = listed_assets(env);
    assets.push_back(asset.clone());
    env.storage().instance().set(&DataKey::ListedAssets, &assets);
}
