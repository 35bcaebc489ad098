#![no_std]

use soroban_sdk::{contract, contractclient, contractmeta, Address, BytesN, Env, String};

contractmeta!(key = "Description", val = "Letter Factory");

mod contract;
pub mod errors;
pub mod events;


pub use contract::DataKey;
pub use errors::FactoryError;

#[contract]
pub struct LetterFactory;

/// The part of the Letter interface the factory calls after deployment.
#[contractclient(name = "LetterClient")]
pub trait LetterInterface {
    fn initialize(e: Env, title: String, first_page: String, author: String, owner: Address);
}

pub trait LetterFactoryContract {

    fn __constructor(e: &Env, letter_wasm_hash: BytesN<32>);

    /// Deploy a new Letter owned by `creator`.
    ///
    /// The letter is deployed from the stored wasm hash with a salt derived
    /// from its creation index, then initialized in the same invocation. If
    /// the letter rejects its arguments the whole call reverts and nothing is
    /// recorded.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `creator` - Account that becomes the letter owner.
    /// * `title` - Letter title.
    /// * `first_page` - Content of page 0.
    /// * `author` - Letter author.
    ///
    /// # Returns
    ///
    /// The new letter's address and its creation index.
    ///
    /// # Events
    ///
    /// * topics - `["letter_created", creator: Address]`
    /// * data - `[letter: Address, index: u32]`
    fn create_letter(e: &Env, creator: Address, title: String, first_page: String, author: String) -> (Address, u32);

    /// Returns the number of letters created so far.
    fn view_letter_count(e: &Env) -> u32;

    /// Returns the address of the letter created at `index`.
    ///
    /// # Notes
    ///
    /// Panics with [`FactoryError::LetterNotFound`] if `index` is out of range.
    fn view_letter_addr(e: &Env, index: u32) -> Address;

    fn letter_wasm_hash(e: &Env) -> BytesN<32>;
}
