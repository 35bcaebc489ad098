#![no_std]

use soroban_sdk::{contract, contractmeta, Address, Env, String, Vec};

contractmeta!(key = "Description", val = "Paginated Letter");

mod access;
mod contract;
pub mod errors;
pub mod events;


pub use contract::{ApprovalData, DataKey, PageStorageKey};
pub use errors::LetterError;

/// Maximum title length in bytes.
pub const MAX_TITLE_LEN: u32 = 64;
/// Maximum author length in bytes.
pub const MAX_AUTHOR_LEN: u32 = 64;
/// Maximum length of a single page in bytes.
pub const MAX_PAGE_LEN: u32 = 8192;

pub const DAY_IN_LEDGERS: u32 = 17280;
pub const INSTANCE_EXTEND_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_EXTEND_AMOUNT - DAY_IN_LEDGERS;
pub const PERSISTENT_EXTEND_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_EXTEND_AMOUNT - DAY_IN_LEDGERS;

#[contract]
pub struct Letter;

pub trait LetterContract {

    /// Initialize the letter with its title, first page and author.
    ///
    /// Page 0 is minted to `owner`. The letter starts closed with an empty
    /// reader set and a public page count. Can only be called once.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `title` - Letter title, at most [`MAX_TITLE_LEN`] bytes.
    /// * `first_page` - Content of page 0, non-empty and at most [`MAX_PAGE_LEN`] bytes.
    /// * `author` - Letter author, at most [`MAX_AUTHOR_LEN`] bytes.
    /// * `owner` - Account allowed to write pages and manage access. Must
    ///   authorize the call.
    ///
    /// # Errors
    ///
    /// * [`LetterError::AlreadyInitialized`] - The letter was already initialized.
    /// * [`LetterError::EmptyPage`] - `first_page` is empty.
    /// * [`LetterError::TitleTooLong`], [`LetterError::PageTooLong`],
    ///   [`LetterError::AuthorTooLong`] - A length limit is exceeded.
    ///
    /// # Events
    ///
    /// * topics - `["initialized", owner: Address]`
    /// * data - `[title: String, author: String]`
    fn initialize(e: &Env, title: String, first_page: String, author: String, owner: Address);

    /// Append a new page and mint its token to the owner.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `caller` - Must be the letter owner.
    /// * `content` - Page content, non-empty and at most [`MAX_PAGE_LEN`] bytes.
    ///
    /// # Returns
    ///
    /// The index of the new page.
    ///
    /// # Events
    ///
    /// * topics - `["page_written", owner: Address]`
    /// * data - `[page: u32]`
    fn append_page(e: &Env, caller: Address, content: String) -> u32;

    /// Grant `reader` read access to every page, title and author.
    ///
    /// Adding an existing reader is a no-op.
    fn add_reader(e: &Env, caller: Address, reader: Address);

    /// Revoke read access from `reader`.
    ///
    /// Removing an absent reader is a no-op.
    fn remove_reader(e: &Env, caller: Address, reader: Address);

    /// Let any account read the letter. Owner only, idempotent.
    fn open(e: &Env, caller: Address);

    /// Restrict reading to the owner and readers. Owner only, idempotent.
    fn close(e: &Env, caller: Address);

    /// Choose whether [`LetterContract::view_page_count`] bypasses the read gate.
    fn set_public_count(e: &Env, caller: Address, public: bool);

    /// Returns the content of `page`.
    ///
    /// When the letter is closed, `reader` must authorize the call and be
    /// the owner or a registered reader.
    ///
    /// # Errors
    ///
    /// * [`LetterError::Unauthorized`] - The letter is closed and `reader` may not read.
    /// * [`LetterError::PageNotFound`] - `page` is out of range.
    fn read_page(e: &Env, reader: Address, page: u32) -> String;

    /// Returns the title. Gated like [`LetterContract::read_page`].
    fn read_title(e: &Env, reader: Address) -> String;

    /// Returns the author. Gated like [`LetterContract::read_page`].
    fn read_author(e: &Env, reader: Address) -> String;

    /// Returns the number of pages.
    ///
    /// Public by default. When the count policy is private, `viewer` is
    /// checked like a reader and `None` is only accepted on an open letter.
    fn view_page_count(e: &Env, viewer: Option<Address>) -> u32;

    fn owner(e: &Env) -> Address;

    fn is_open(e: &Env) -> bool;

    fn is_reader(e: &Env, account: Address) -> bool;

    /// Returns the number of registered readers.
    fn reader_count(e: &Env) -> u32;

    /// Returns up to `limit` readers starting at position `start`.
    ///
    /// Positions are dense but not stable: removing a reader moves the last
    /// reader into the freed position.
    fn readers(e: &Env, start: u32, limit: u32) -> Vec<Address>;

    /// Transfers page token `page` from `from` to `to`.
    ///
    /// Both `from` and `to` are readers afterwards; the previous holder
    /// keeps read access.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `from` - Current holder of the page token.
    /// * `to` - Recipient.
    /// * `page` - Page index.
    ///
    /// # Errors
    ///
    /// * [`LetterError::PageNotFound`] - `page` is out of range.
    /// * [`LetterError::IncorrectHolder`] - `from` does not hold `page`.
    ///
    /// # Events
    ///
    /// * topics - `["transfer", from: Address, to: Address]`
    /// * data - `[page: u32]`
    fn transfer(e: &Env, from: Address, to: Address, page: u32);

    /// Transfers page token `page` from `from` to `to` on behalf of `from`.
    ///
    /// `spender` must be the holder, the approved account for `page`, or an
    /// operator approved for all of `from`'s pages.
    ///
    /// # Errors
    ///
    /// * [`LetterError::PageNotFound`] - `page` is out of range.
    /// * [`LetterError::IncorrectHolder`] - `from` does not hold `page`.
    /// * [`LetterError::Unauthorized`] - `spender` may not move `page`.
    fn transfer_from(e: &Env, spender: Address, from: Address, to: Address, page: u32);

    /// Approve `approved` to transfer `page` until `live_until_ledger`.
    ///
    /// A `live_until_ledger` of 0 revokes the approval.
    ///
    /// # Errors
    ///
    /// * [`LetterError::Unauthorized`] - `approver` is neither holder nor operator.
    /// * [`LetterError::InvalidLiveUntilLedger`] - `live_until_ledger` is in the past.
    ///
    /// # Events
    ///
    /// * topics - `["approve", approver: Address, page: u32]`
    /// * data - `[approved: Address, live_until_ledger: u32]`
    fn approve(e: &Env, approver: Address, approved: Address, page: u32, live_until_ledger: u32);

    /// Approve `operator` to transfer every page `holder` holds until
    /// `live_until_ledger`. A `live_until_ledger` of 0 revokes.
    fn approve_for_all(e: &Env, holder: Address, operator: Address, live_until_ledger: u32);

    fn get_approved(e: &Env, page: u32) -> Option<Address>;

    fn is_approved_for_all(e: &Env, holder: Address, operator: Address) -> bool;

    /// Returns the number of page tokens held by `holder`.
    fn balance(e: &Env, holder: Address) -> u32;

    /// Returns the current holder of page token `page`.
    ///
    /// # Notes
    ///
    /// If the page does not exist, this function panics with
    /// [`LetterError::PageNotFound`].
    fn owner_of(e: &Env, page: u32) -> Address;
}
