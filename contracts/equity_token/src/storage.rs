use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Metadata {
    pub decimal: u32,
    pub name: String,
    pub symbol: String,
}

/// Spending allowance granted by `from` to a spender. Reads as zero once
/// the ledger sequence passes `expiration_ledger`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Allowance {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Metadata,
    Initialized,
    Whitelisted(Address),
    Balance(Address),
    Allowance(Address, Address), // (from, spender)
}
