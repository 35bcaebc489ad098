use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FactoryError {
    /// Indicates a letter index past the end of the registry.
    LetterNotFound = 300,
    /// Indicates the factory was deployed without a letter wasm hash.
    NotInitialized = 401,
    /// Indicates all letter indices are in use.
    MathOverflow = 500,
}
