//! Core domain types for the vending machine.

use crate::Amount;
use crate::coin::Denomination;

/// Shelf slot index.
pub type ShelfId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiquidType {
    Coke,
    Water,
    Juice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnackType {
    ChocolateBar,
    Chips,
}

/// Category-specific part of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductKind {
    Liquid { flavour: LiquidType, capacity_ml: u32 },
    Snack { flavour: SnackType, weight_g: u32 },
}

/// An item sold by the machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Product {
    pub price: Amount,
    pub kind: ProductKind,
}

impl Product {
    pub fn liquid(flavour: LiquidType, capacity_ml: u32, price: Amount) -> Self {
        Self {
            price,
            kind: ProductKind::Liquid {
                flavour,
                capacity_ml,
            },
        }
    }

    pub fn snack(flavour: SnackType, weight_g: u32, price: Amount) -> Self {
        Self {
            price,
            kind: ProductKind::Snack { flavour, weight_g },
        }
    }

    pub fn price(&self) -> Amount {
        self.price
    }

    /// Short human label, e.g. "coke 250ml".
    pub fn label(&self) -> String {
        match &self.kind {
            ProductKind::Liquid {
                flavour,
                capacity_ml,
            } => {
                let name = match flavour {
                    LiquidType::Coke => "coke",
                    LiquidType::Water => "water",
                    LiquidType::Juice => "juice",
                };
                format!("{name} {capacity_ml}ml")
            }
            ProductKind::Snack { flavour, weight_g } => {
                let name = match flavour {
                    SnackType::ChocolateBar => "chocolate bar",
                    SnackType::Chips => "chips",
                };
                format!("{name} {weight_g}g")
            }
        }
    }
}

/// An operation performed on the machine, either by the operator or a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load `count` coins of every denomination.
    Feed { count: u32 },
    /// Choose the shelf to buy from.
    Select { shelf: ShelfId },
    /// Drop one coin into the slot.
    Insert { coin: Denomination },
    /// Abort the running purchase and get the money back.
    Cancel,
}
