//! Letter factory - deployment and registry

use soroban_sdk::{contractimpl, contracttype, log, panic_with_error, Address, BytesN, Env, String};
use soroban_sdk::xdr::ToXdr;
use crate::{errors, events, LetterClient, LetterFactory, LetterFactoryArgs, LetterFactoryClient, LetterFactoryContract};

const DAY_IN_LEDGERS: u32 = 17280;
const EXTEND_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const TTL_THRESHOLD: u32 = EXTEND_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
pub enum DataKey {
    LetterWasmHash,
    LetterCount,
    Letter(u32),
}

fn letter_count(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&DataKey::LetterCount)
        .unwrap_or(0)
}


#[contractimpl]
impl LetterFactoryContract for LetterFactory {

    fn __constructor(e: &Env, letter_wasm_hash: BytesN<32>) {
        e.storage().instance().set(&DataKey::LetterWasmHash, &letter_wasm_hash);
        e.storage().instance().set(&DataKey::LetterCount, &0u32);
    }

    fn create_letter(e: &Env, creator: Address, title: String, first_page: String, author: String) -> (Address, u32) {
        creator.require_auth();

        let index = letter_count(e);
        let count = index
            .checked_add(1)
            .unwrap_or_else(|| panic_with_error!(e, errors::FactoryError::MathOverflow));
        let wasm_hash = Self::letter_wasm_hash(e);

        let salt: BytesN<32> = e.crypto().sha256(&index.to_xdr(e)).into();
        let letter = e
            .deployer()
            .with_current_contract(salt)
            .deploy_v2(wasm_hash, ());

        // Reverts the deployment too if the letter rejects its arguments.
        LetterClient::new(e, &letter).initialize(&title, &first_page, &author, &creator);

        let key = DataKey::Letter(index);
        e.storage().persistent().set(&key, &letter);
        e.storage().persistent().extend_ttl(&key, TTL_THRESHOLD, EXTEND_AMOUNT);
        e.storage().instance().set(&DataKey::LetterCount, &count);
        e.storage().instance().extend_ttl(TTL_THRESHOLD, EXTEND_AMOUNT);

        log!(e, "letter created", index, letter.clone());
        events::LetterCreated { creator, letter: letter.clone(), index }.publish(e);

        (letter, index)
    }

    fn view_letter_count(e: &Env) -> u32 {
        letter_count(e)
    }

    fn view_letter_addr(e: &Env, index: u32) -> Address {
        if index >= letter_count(e) {
            panic_with_error!(e, errors::FactoryError::LetterNotFound);
        }
        e.storage()
            .persistent()
            .get(&DataKey::Letter(index))
            .unwrap_or_else(|| panic_with_error!(e, errors::FactoryError::LetterNotFound))
    }

    fn letter_wasm_hash(e: &Env) -> BytesN<32> {
        e.storage()
            .instance()
            .get(&DataKey::LetterWasmHash)
            .unwrap_or_else(|| panic_with_error!(e, errors::FactoryError::NotInitialized))
    }

}
