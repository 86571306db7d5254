pub mod crypto;
pub mod hash;
pub mod transaction;
pub mod tx_handler;
pub mod utxo_pool;

pub use self::{hash::*, transaction::*, tx_handler::*, utxo_pool::*};
