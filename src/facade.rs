//! Role-scoped views of a machine.
//!
//! The operator refills coins and shelves; the customer buys. Neither sees the
//! other's operations.

use crate::coin::{Coins, Denomination};
use crate::machine::{InsertOutcome, MachineError, MessageBundle, Shelf, VendingMachine};
use crate::model::{Product, ShelfId};

/// Operator access.
pub struct AdminFacade<'a> {
    machine: &'a mut VendingMachine,
}

impl<'a> AdminFacade<'a> {
    pub fn new(machine: &'a mut VendingMachine) -> Self {
        Self { machine }
    }

    pub fn feed_coins(&mut self, count: u32) -> Result<(), MachineError> {
        self.machine.feed_coins(count)
    }

    /// Keys are shelf indices, values the product to fill that shelf with.
    pub fn feed_products(
        &mut self,
        products: impl IntoIterator<Item = (ShelfId, Product)>,
    ) -> Result<(), MachineError> {
        self.machine.feed_products(products)
    }
}

/// Customer access, with display messages resolved through a bundle.
pub struct UserFacade<'a> {
    machine: &'a mut VendingMachine,
    bundle: &'a MessageBundle,
}

impl<'a> UserFacade<'a> {
    pub fn new(machine: &'a mut VendingMachine, bundle: &'a MessageBundle) -> Self {
        Self { machine, bundle }
    }

    pub fn select_shelf(&mut self, shelf: ShelfId) -> Option<&Product> {
        self.machine.select_shelf(shelf)
    }

    pub fn insert_coin(&mut self, coin: Denomination) -> Result<InsertOutcome, MachineError> {
        self.machine.insert_coin(coin)
    }

    pub fn cancel(&mut self) -> Result<Coins, MachineError> {
        self.machine.cancel()
    }

    pub fn display_text(&self) -> String {
        self.bundle.render(&self.machine.display())
    }

    pub fn selected_shelf(&self) -> Option<ShelfId> {
        self.machine.selected_shelf()
    }

    pub fn shelves(&self) -> &[Shelf] {
        self.machine.shelves()
    }

    pub fn returned_product(&self) -> Option<&Product> {
        self.machine.returned_product()
    }

    pub fn returned_change(&self) -> &Coins {
        self.machine.returned_change()
    }
}
