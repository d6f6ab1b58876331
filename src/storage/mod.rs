pub mod ledger;
pub mod shop;
pub mod users;

pub use ledger::{Ledger, LedgerEntry};
pub use shop::{ShopItem, ShopStore};
pub use users::{Registration, UserStore};
