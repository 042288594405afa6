use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone, Debug)]
pub struct StockListedEvent {
    pub asset: Address,
    pub name: String,
    pub initial_supply: i128,
    pub initial_price: i128,
    pub pricing_factor: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct StockBoughtEvent {
    pub asset: Address,
    pub buyer: Address,
    pub amount: i128,
    pub price: i128,
    pub total_cost: i128,
    pub current_supply: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct StockSoldEvent {
    pub asset: Address,
    pub seller: Address,
    pub amount: i128,
    pub price: i128,
    pub payout: i128,
    pub current_supply: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LiquidityAddedEvent {
    pub funder: Address,
    pub amount: i128,
}
