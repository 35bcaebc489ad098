//! Letter - pages, access gates and page tokens

use soroban_sdk::{contractimpl, contracttype, log, panic_with_error, Address, Env, String, Vec};
use crate::{
    access, errors, events, Letter, LetterArgs, LetterClient, LetterContract, INSTANCE_EXTEND_AMOUNT,
    INSTANCE_TTL_THRESHOLD, MAX_AUTHOR_LEN, MAX_PAGE_LEN, MAX_TITLE_LEN, PERSISTENT_EXTEND_AMOUNT,
    PERSISTENT_TTL_THRESHOLD,
};

#[contracttype]
pub enum DataKey {
    Owner,
    Title,
    Author,
    IsOpen,
    PageCount,
    PublicCount,
    ReaderCount,
}

#[contracttype]
pub enum PageStorageKey {
    Page(u32),
    Holder(u32),
    Balance(Address),
    Approval(u32),
    ApprovalForAll(Address /* holder */, Address /* operator */),
    Reader(Address),
    ReaderAt(u32),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApprovalData {
    pub approved: Address,
    pub live_until_ledger: u32,
}

fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_EXTEND_AMOUNT);
}

fn extend_persistent(e: &Env, key: &PageStorageKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_EXTEND_AMOUNT);
}

fn set_persistent<V>(e: &Env, key: &PageStorageKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    e.storage().persistent().set(key, value);
    extend_persistent(e, key);
}

fn page_count(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&DataKey::PageCount)
        .unwrap_or_else(|| panic_with_error!(e, errors::LetterError::NotInitialized))
}

fn check_page(e: &Env, content: &String) {
    if content.is_empty() {
        panic_with_error!(e, errors::LetterError::EmptyPage);
    }
    if content.len() > MAX_PAGE_LEN {
        panic_with_error!(e, errors::LetterError::PageTooLong);
    }
}

fn require_page(e: &Env, page: u32) {
    if page >= page_count(e) {
        panic_with_error!(e, errors::LetterError::PageNotFound);
    }
}

fn holder_of(e: &Env, page: u32) -> Address {
    require_page(e, page);
    let key = PageStorageKey::Holder(page);
    let holder = e
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(e, errors::LetterError::PageNotFound));
    extend_persistent(e, &key);
    holder
}

fn balance_of(e: &Env, holder: &Address) -> u32 {
    e.storage()
        .persistent()
        .get(&PageStorageKey::Balance(holder.clone()))
        .unwrap_or(0)
}

fn increment_balance(e: &Env, holder: &Address) {
    let balance = balance_of(e, holder)
        .checked_add(1)
        .unwrap_or_else(|| panic_with_error!(e, errors::LetterError::MathOverflow));
    set_persistent(e, &PageStorageKey::Balance(holder.clone()), &balance);
}

fn decrement_balance(e: &Env, holder: &Address) {
    let balance = balance_of(e, holder)
        .checked_sub(1)
        .unwrap_or_else(|| panic_with_error!(e, errors::LetterError::MathOverflow));
    set_persistent(e, &PageStorageKey::Balance(holder.clone()), &balance);
}

/// Stores `content` at the next index and mints its token to `owner`.
fn write_page(e: &Env, owner: &Address, content: &String) -> u32 {
    let page = e
        .storage()
        .instance()
        .get::<DataKey, u32>(&DataKey::PageCount)
        .unwrap_or(0);
    let count = page
        .checked_add(1)
        .unwrap_or_else(|| panic_with_error!(e, errors::LetterError::MathOverflow));

    set_persistent(e, &PageStorageKey::Page(page), content);
    set_persistent(e, &PageStorageKey::Holder(page), owner);
    increment_balance(e, owner);
    e.storage().instance().set(&DataKey::PageCount, &count);
    extend_instance(e);

    page
}

fn live_approval(e: &Env, page: u32) -> Option<Address> {
    e.storage()
        .temporary()
        .get::<PageStorageKey, ApprovalData>(&PageStorageKey::Approval(page))
        .filter(|data| data.live_until_ledger >= e.ledger().sequence())
        .map(|data| data.approved)
}

fn is_operator(e: &Env, holder: &Address, operator: &Address) -> bool {
    e.storage()
        .temporary()
        .get::<PageStorageKey, u32>(&PageStorageKey::ApprovalForAll(holder.clone(), operator.clone()))
        .is_some_and(|live_until_ledger| live_until_ledger >= e.ledger().sequence())
}

fn check_live_until(e: &Env, live_until_ledger: u32) -> u32 {
    let current = e.ledger().sequence();
    if live_until_ledger < current || live_until_ledger > e.ledger().max_live_until_ledger() {
        panic_with_error!(e, errors::LetterError::InvalidLiveUntilLedger);
    }
    live_until_ledger - current
}

/// Moves `page` from `from` to `to`. Callers check the spender.
fn move_page(e: &Env, from: &Address, to: &Address, page: u32) {
    if holder_of(e, page) != *from {
        panic_with_error!(e, errors::LetterError::IncorrectHolder);
    }

    e.storage().temporary().remove(&PageStorageKey::Approval(page));
    decrement_balance(e, from);
    increment_balance(e, to);
    set_persistent(e, &PageStorageKey::Holder(page), to);

    // Holders accumulate: the previous holder keeps reading.
    access::grant_reader(e, from);
    access::grant_reader(e, to);
    extend_instance(e);

    log!(e, "page transferred", page, from.clone(), to.clone());
    events::Transfer { from: from.clone(), to: to.clone(), page }.publish(e);
}


#[contractimpl]
impl LetterContract for Letter {

    fn initialize(e: &Env, title: String, first_page: String, author: String, owner: Address) {
        if e.storage().instance().has(&DataKey::Owner) {
            panic_with_error!(e, errors::LetterError::AlreadyInitialized);
        }

        if title.len() > MAX_TITLE_LEN {
            panic_with_error!(e, errors::LetterError::TitleTooLong);
        }
        check_page(e, &first_page);
        if author.len() > MAX_AUTHOR_LEN {
            panic_with_error!(e, errors::LetterError::AuthorTooLong);
        }
        owner.require_auth();

        e.storage().instance().set(&DataKey::Owner, &owner);
        e.storage().instance().set(&DataKey::Title, &title);
        e.storage().instance().set(&DataKey::Author, &author);
        e.storage().instance().set(&DataKey::IsOpen, &false);
        e.storage().instance().set(&DataKey::PublicCount, &true);
        e.storage().instance().set(&DataKey::ReaderCount, &0u32);

        write_page(e, &owner, &first_page);

        log!(e, "letter initialized", owner.clone());
        events::Initialized { owner, title, author }.publish(e);
    }

    fn append_page(e: &Env, caller: Address, content: String) -> u32 {
        let owner = access::require_owner(e, &caller);
        check_page(e, &content);

        let page = write_page(e, &owner, &content);

        log!(e, "page written", page);
        events::PageWritten { owner, page }.publish(e);

        page
    }

    fn add_reader(e: &Env, caller: Address, reader: Address) {
        access::require_owner(e, &caller);
        access::grant_reader(e, &reader);
        extend_instance(e);
    }

    fn remove_reader(e: &Env, caller: Address, reader: Address) {
        access::require_owner(e, &caller);
        access::revoke_reader(e, &reader);
        extend_instance(e);
    }

    fn open(e: &Env, caller: Address) {
        let owner = access::require_owner(e, &caller);
        e.storage().instance().set(&DataKey::IsOpen, &true);
        extend_instance(e);

        log!(e, "letter opened");
        events::Opened { owner }.publish(e);
    }

    fn close(e: &Env, caller: Address) {
        let owner = access::require_owner(e, &caller);
        e.storage().instance().set(&DataKey::IsOpen, &false);
        extend_instance(e);

        log!(e, "letter closed");
        events::Closed { owner }.publish(e);
    }

    fn set_public_count(e: &Env, caller: Address, public: bool) {
        access::require_owner(e, &caller);
        e.storage().instance().set(&DataKey::PublicCount, &public);
        extend_instance(e);
    }

    fn read_page(e: &Env, reader: Address, page: u32) -> String {
        access::require_read(e, &reader);
        require_page(e, page);
        let key = PageStorageKey::Page(page);
        let content = e
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or_else(|| panic_with_error!(e, errors::LetterError::PageNotFound));
        extend_persistent(e, &key);
        extend_instance(e);
        content
    }

    fn read_title(e: &Env, reader: Address) -> String {
        access::require_read(e, &reader);
        extend_instance(e);
        e.storage()
            .instance()
            .get(&DataKey::Title)
            .unwrap_or_else(|| panic_with_error!(e, errors::LetterError::NotInitialized))
    }

    fn read_author(e: &Env, reader: Address) -> String {
        access::require_read(e, &reader);
        extend_instance(e);
        e.storage()
            .instance()
            .get(&DataKey::Author)
            .unwrap_or_else(|| panic_with_error!(e, errors::LetterError::NotInitialized))
    }

    fn view_page_count(e: &Env, viewer: Option<Address>) -> u32 {
        let count = page_count(e);
        let public = e
            .storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::PublicCount)
            .unwrap_or(true);
        if !public {
            match viewer {
                Some(viewer) => access::require_read(e, &viewer),
                None if access::is_open(e) => {}
                None => panic_with_error!(e, errors::LetterError::Unauthorized),
            }
        }
        count
    }

    fn owner(e: &Env) -> Address {
        access::owner(e)
    }

    fn is_open(e: &Env) -> bool {
        access::is_open(e)
    }

    fn is_reader(e: &Env, account: Address) -> bool {
        access::owner(e);
        access::is_reader(e, &account)
    }

    fn reader_count(e: &Env) -> u32 {
        access::owner(e);
        access::reader_count(e)
    }

    fn readers(e: &Env, start: u32, limit: u32) -> Vec<Address> {
        access::owner(e);
        access::readers(e, start, limit)
    }

    fn transfer(e: &Env, from: Address, to: Address, page: u32) {
        from.require_auth();
        move_page(e, &from, &to, page);
    }

    fn transfer_from(e: &Env, spender: Address, from: Address, to: Address, page: u32) {
        spender.require_auth();
        if holder_of(e, page) != from {
            panic_with_error!(e, errors::LetterError::IncorrectHolder);
        }
        if spender != from
            && live_approval(e, page).as_ref() != Some(&spender)
            && !is_operator(e, &from, &spender)
        {
            panic_with_error!(e, errors::LetterError::Unauthorized);
        }
        move_page(e, &from, &to, page);
    }

    fn approve(e: &Env, approver: Address, approved: Address, page: u32, live_until_ledger: u32) {
        approver.require_auth();
        let holder = holder_of(e, page);
        if approver != holder && !is_operator(e, &holder, &approver) {
            panic_with_error!(e, errors::LetterError::Unauthorized);
        }

        let key = PageStorageKey::Approval(page);
        if live_until_ledger == 0 {
            e.storage().temporary().remove(&key);
        } else {
            let live_for = check_live_until(e, live_until_ledger);
            let data = ApprovalData { approved: approved.clone(), live_until_ledger };
            e.storage().temporary().set(&key, &data);
            e.storage().temporary().extend_ttl(&key, live_for, live_for);
        }

        events::Approve { approver, page, approved, live_until_ledger }.publish(e);
    }

    fn approve_for_all(e: &Env, holder: Address, operator: Address, live_until_ledger: u32) {
        holder.require_auth();
        access::owner(e);

        let key = PageStorageKey::ApprovalForAll(holder.clone(), operator.clone());
        if live_until_ledger == 0 {
            e.storage().temporary().remove(&key);
        } else {
            let live_for = check_live_until(e, live_until_ledger);
            e.storage().temporary().set(&key, &live_until_ledger);
            e.storage().temporary().extend_ttl(&key, live_for, live_for);
        }

        events::ApproveForAll { holder, operator, live_until_ledger }.publish(e);
    }

    fn get_approved(e: &Env, page: u32) -> Option<Address> {
        require_page(e, page);
        live_approval(e, page)
    }

    fn is_approved_for_all(e: &Env, holder: Address, operator: Address) -> bool {
        is_operator(e, &holder, &operator)
    }

    fn balance(e: &Env, holder: Address) -> u32 {
        balance_of(e, &holder)
    }

    fn owner_of(e: &Env, page: u32) -> Address {
        holder_of(e, page)
    }

}
