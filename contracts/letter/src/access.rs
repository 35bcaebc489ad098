//! Owner and reader predicates.
//!
//! Nothing here is cached: every gate reads the owner, the open flag and the
//! reader set from storage on each invocation.
//!
//! The reader set is one persistent entry per reader holding its position in
//! a dense `ReaderAt` index, so membership checks, grants and revocations
//! touch a constant number of entries however many readers accumulate.

use soroban_sdk::{log, panic_with_error, Address, Env, Vec};

use crate::contract::{DataKey, PageStorageKey};
use crate::{errors, events, PERSISTENT_EXTEND_AMOUNT, PERSISTENT_TTL_THRESHOLD};

pub fn owner(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Owner)
        .unwrap_or_else(|| panic_with_error!(e, errors::LetterError::NotInitialized))
}

pub fn is_open(e: &Env) -> bool {
    e.storage()
        .instance()
        .get(&DataKey::IsOpen)
        .unwrap_or_else(|| panic_with_error!(e, errors::LetterError::NotInitialized))
}

pub fn reader_count(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&DataKey::ReaderCount)
        .unwrap_or(0)
}

fn set_entry<V>(e: &Env, key: &PageStorageKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    e.storage().persistent().set(key, value);
    e.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_EXTEND_AMOUNT);
}

fn reader_position(e: &Env, account: &Address) -> Option<u32> {
    let key = PageStorageKey::Reader(account.clone());
    let position = e.storage().persistent().get::<PageStorageKey, u32>(&key);
    if position.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_EXTEND_AMOUNT);
    }
    position
}

pub fn is_reader(e: &Env, account: &Address) -> bool {
    reader_position(e, account).is_some()
}

/// Returns up to `limit` readers starting at position `start`.
pub fn readers(e: &Env, start: u32, limit: u32) -> Vec<Address> {
    let end = reader_count(e).min(start.saturating_add(limit));
    let mut readers = Vec::new(e);
    for position in start..end {
        if let Some(reader) = e
            .storage()
            .persistent()
            .get::<PageStorageKey, Address>(&PageStorageKey::ReaderAt(position))
        {
            readers.push_back(reader);
        }
    }
    readers
}

/// Adds `account` to the reader set. Returns false if it was already there.
pub fn grant_reader(e: &Env, account: &Address) -> bool {
    if reader_position(e, account).is_some() {
        return false;
    }
    let position = reader_count(e);
    let count = position
        .checked_add(1)
        .unwrap_or_else(|| panic_with_error!(e, errors::LetterError::MathOverflow));

    set_entry(e, &PageStorageKey::Reader(account.clone()), &position);
    set_entry(e, &PageStorageKey::ReaderAt(position), account);
    e.storage().instance().set(&DataKey::ReaderCount, &count);

    log!(e, "reader granted", account.clone());
    events::ReaderAdded { reader: account.clone() }.publish(e);
    true
}

/// Removes `account` from the reader set. Returns false if it was absent.
///
/// The last reader in the index moves into the freed position.
pub fn revoke_reader(e: &Env, account: &Address) -> bool {
    let Some(position) = reader_position(e, account) else {
        return false;
    };
    let last = reader_count(e) - 1;

    if position != last {
        if let Some(moved) = e
            .storage()
            .persistent()
            .get::<PageStorageKey, Address>(&PageStorageKey::ReaderAt(last))
        {
            set_entry(e, &PageStorageKey::ReaderAt(position), &moved);
            set_entry(e, &PageStorageKey::Reader(moved), &position);
        }
    }
    e.storage().persistent().remove(&PageStorageKey::ReaderAt(last));
    e.storage().persistent().remove(&PageStorageKey::Reader(account.clone()));
    e.storage().instance().set(&DataKey::ReaderCount, &last);

    log!(e, "reader revoked", account.clone());
    events::ReaderRemoved { reader: account.clone() }.publish(e);
    true
}

/// Panics unless `caller` authorized this call and owns the letter.
pub fn require_owner(e: &Env, caller: &Address) -> Address {
    let owner = owner(e);
    caller.require_auth();
    if owner != *caller {
        panic_with_error!(e, errors::LetterError::Unauthorized);
    }
    owner
}

/// Panics unless the letter is open, or `reader` authorized this call and
/// is the owner or a registered reader.
pub fn require_read(e: &Env, reader: &Address) {
    if is_open(e) {
        return;
    }
    reader.require_auth();
    if owner(e) != *reader && !is_reader(e, reader) {
        panic_with_error!(e, errors::LetterError::Unauthorized);
    }
}
