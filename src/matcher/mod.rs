pub mod extract;
pub mod trie;

pub use extract::*;
pub use trie::*;
