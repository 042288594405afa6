/// Base units per whole token for a token with `decimals` decimals.
pub fn unit_for(decimals: u32) -> Option<i128> {
    10i128.checked_pow(decimals)
}

/// Derive the curve scale for a new listing
///
/// Formula: pricing_factor = initial_price × collateral_unit × initial_supply
///
/// `initial_price` is in whole collateral units, so the factor is chosen such
/// that `price_at(pricing_factor, initial_supply)` is exactly the initial
/// price expressed in collateral base units.
///
/// Example:
/// - initial_price: 1 PYUSD, collateral_unit: 10^6, initial_supply: 1,000
/// - pricing_factor: 1 × 1,000,000 × 1,000 = 1,000,000,000
pub fn pricing_factor(initial_price: i128, collateral_unit: i128, initial_supply: i128) -> Option<i128> {
    initial_price
        .checked_mul(collateral_unit)?
        .checked_mul(initial_supply)
}

/// Price of one whole token at the given vault supply, in collateral base units
///
/// Formula: price(s) = floor(pricing_factor / max(s, 1))
///
/// The price falls as inventory returns to the vault and rises as buyers
/// deplete it. An empty vault is priced as if one unit remained.
///
/// Example:
/// - pricing_factor: 1,000,000,000
/// - supply 1,000 → 1,000,000 (1.000000)
/// - supply   990 → 1,010,101 (1.010101)
pub fn price_at(pricing_factor: i128, supply: i128) -> Option<i128> {
    pricing_factor.checked_div(supply.max(1))
}

/// Settlement amount for `amount` whole tokens at a single clearing price.
pub fn total_for(price: i128, amount: i128) -> Option<i128> {
    price.checked_mul(amount)
}
