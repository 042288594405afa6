use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Caller is not the vault owner
    Unauthorized = 10,
    /// A mutating call is already in progress
    Reentrant = 11,

    // ============================================
    // LISTING ERRORS (20-29)
    // ============================================
    /// Asset already has a listing
    AlreadyListed = 20,
    /// Asset is not listed
    UnknownAsset = 21,
    /// Asset cannot be listed (collateral itself, or not a token)
    InvalidAsset = 22,

    // ============================================
    // TRADING ERRORS (30-39)
    // ============================================
    /// Amount must be positive (price must not be negative)
    InvalidAmount = 30,
    /// Buy exceeds the units held by the vault
    InsufficientInventory = 31,
    /// Vault collateral cannot cover the sell payout
    InsufficientVaultCollateral = 32,
    /// Curve arithmetic overflowed
    MathOverflow = 33,

    // ============================================
    // CUSTODY ERRORS (40-49)
    // ============================================
    /// Counterparty balance too small for the transfer
    InsufficientBalance = 40,
    /// Counterparty has not approved enough for the vault
    InsufficientAllowance = 41,
    /// Token contract rejected the transfer
    TransferFailed = 42,
}
