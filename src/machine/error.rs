//! Error types for machine operations.

use thiserror::Error;

use crate::coin::{Denomination, InventoryError};
use crate::model::{Product, ShelfId};

/// Top-level error returned by [`VendingMachine`](super::VendingMachine) operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("invalid state: {0}")]
    InvalidState(#[from] StateError),

    #[error("coin box full for {coin}: {count} coins would exceed capacity {max}")]
    CapacityExceeded {
        coin: Denomination,
        count: u32,
        max: u32,
    },

    #[error("shelf {0} does not exist")]
    ShelfOutOfRange(ShelfId),

    #[error("shelf {shelf} holds {}, cannot stock {}", .stocked.label(), .offered.label())]
    ShelfHoldsOther {
        shelf: ShelfId,
        stocked: Product,
        offered: Product,
    },

    #[error("coin inventory: {0}")]
    Inventory(#[from] InventoryError),
}

/// Operation attempted without its precondition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("no shelf selected")]
    NoShelfSelected,
    #[error("no open transaction")]
    NoTransaction,
}
