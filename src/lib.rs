pub mod amount;
pub mod change;
pub mod coin;
pub mod config;
pub mod csv;
pub mod facade;
pub mod machine;
pub mod model;

pub use amount::Amount;
pub use coin::{Coins, Denomination};
pub use config::MachineConfig;
pub use machine::VendingMachine;
pub use model::{Command, Product, ShelfId};
