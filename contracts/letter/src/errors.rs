use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LetterError {
    /// Indicates an empty page, including an empty first page.
    EmptyPage = 100,
    /// Indicates the title exceeds `MAX_TITLE_LEN`.
    TitleTooLong = 101,
    /// Indicates a page exceeds `MAX_PAGE_LEN`.
    PageTooLong = 102,
    /// Indicates the author exceeds `MAX_AUTHOR_LEN`.
    AuthorTooLong = 103,
    /// Indicates an approval expiring before the current ledger.
    InvalidLiveUntilLedger = 104,
    /// Indicates the caller lacks the owner or reader role required.
    Unauthorized = 200,
    /// Indicates an error related to the holder of a particular page token.
    /// Used in transfers.
    IncorrectHolder = 201,
    /// Indicates a non-existent page index.
    PageNotFound = 300,
    /// Indicates a second initialization attempt.
    AlreadyInitialized = 400,
    /// Indicates a call on a letter that was never initialized.
    NotInitialized = 401,
    /// Indicates overflow when adding two values
    MathOverflow = 500,
}
