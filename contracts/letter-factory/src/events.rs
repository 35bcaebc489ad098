use soroban_sdk::{Address, contractevent};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LetterCreated {
    #[topic]
    pub creator: Address,
    pub letter: Address,
    pub index: u32,
}
