use crate::error::Error;
use crate::storage::DataKey;
use soroban_sdk::Env;

/// Run `op` while holding the vault-wide lock.
///
/// Any nested mutating call made while the lock is held fails with
/// `Reentrant`. Counters and balances touched by `op` are only ever written
/// after its external transfers have returned.
pub fn non_reentrant<T>(env: &Env, op: impl FnOnce() -> Result<T, Error>) -> Result<T, Error> {
    let locked = env
        .storage()
        .instance()
        .get::<DataKey, bool>(&DataKey::Locked)
        .unwrap_or(false);
    if locked {
        return Err(Error::Reentrant);
    }

    env.storage().instance().set(&DataKey::Locked, &true);
    let result = op();
    env.storage().instance().remove(&DataKey::Locked);

    result
}
