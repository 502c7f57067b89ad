//! Vending machine controller.
//!
//! The machine owns the coin box, the shelves and the single purchase
//! transaction. Customers select a shelf and feed coins; once the price is
//! covered the product and any change land in the pickup tray. Every refusal
//! (full coin box, no change) hands back exactly the coins of the purchase, so
//! money is always either in the coin box or in the tray, never both.
//! Also supports an async stream of commands.

use rand::Rng;
use rand::seq::SliceRandom;
use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::Amount;
use crate::change::make_change;
use crate::coin::{Coins, Denomination};
use crate::config::MachineConfig;
use crate::model::{Command, Product, ShelfId};

mod display;
pub use display::{Display, MessageBundle, MessageKey};

mod error;
pub use error::{MachineError, StateError};

mod shelf;
pub use shelf::Shelf;

mod transaction;
pub use transaction::Transaction;

/// Result of inserting one coin for a selected shelf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Coin accepted, price not covered yet.
    Pending { remaining: Amount },
    /// Purchase complete; `change` was moved from the coin box to the tray.
    Dispensed { product: Product, change: Coins },
    /// Purchase called off by the machine; `refund` went to the tray.
    Refused { reason: Refusal, refund: Coins },
    /// The selected shelf ran out before the purchase started; the coin went to the tray.
    ShelfEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    CapacityExceeded,
    NoChange,
}

/// A single-customer vending machine.
pub struct VendingMachine {
    config: MachineConfig,
    coins: Coins,
    shelves: Vec<Shelf>,
    tx: Transaction,
    /// Shelf the open transaction took its product from
    tx_shelf: Option<ShelfId>,
    selected: Option<ShelfId>,
    display: Display,
    returned_product: Option<Product>,
    returned_change: Coins,
}

/// Public API
impl VendingMachine {
    pub fn new(config: MachineConfig) -> Self {
        Self {
            config,
            coins: Coins::new(),
            shelves: vec![Shelf::default(); config.shelves],
            tx: Transaction::default(),
            tx_shelf: None,
            selected: None,
            display: Display::default(),
            returned_product: None,
            returned_change: Coins::new(),
        }
    }

    /// Run the machine with the given command stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Command> + Unpin) {
        while let Some(cmd) = stream.next().await {
            // a refused command never stops the machine
            let _ = self.apply(cmd);
        }
    }

    /// Apply a single command on top of the current machine state
    pub fn apply(&mut self, cmd: Command) -> Result<(), MachineError> {
        match cmd {
            Command::Feed { count } => {
                let result = self.feed_coins(count);
                Self::log_result("feed", &count, &result);
                result?;
            }
            Command::Select { shelf } => {
                let price = self.select_shelf(shelf).map(Product::price);
                info!(shelf, price = ?price, display = ?self.display, "select applied");
            }
            Command::Insert { coin } => {
                let result = self.insert_coin(coin);
                Self::log_result("insert", &coin, &result);
                result?;
            }
            Command::Cancel => {
                let result = self.cancel();
                Self::log_result("cancel", &"-", &result);
                result?;
            }
        }
        Ok(())
    }

    /// Choose a shelf and show the price of its front product.
    ///
    /// An unknown or empty shelf clears the selection instead. Nothing is
    /// taken off the shelf until the first coin arrives. While a purchase is
    /// open the display keeps showing what is still owed on it.
    pub fn select_shelf(&mut self, shelf: ShelfId) -> Option<&Product> {
        let Some(slot) = self.shelves.get(shelf) else {
            self.display = Display::Message(MessageKey::ShelfOutOfRange);
            self.selected = None;
            return None;
        };
        let Some(product) = slot.front() else {
            self.display = Display::Message(MessageKey::NoProductOnShelf);
            self.selected = None;
            return None;
        };

        self.display = if self.tx.is_open() {
            Display::Amount(self.tx.remaining())
        } else {
            Display::Amount(product.price())
        };
        self.selected = Some(shelf);
        Some(product)
    }

    /// Insert one coin for the selected shelf.
    ///
    /// Without a selection the coin is rejected outright and nothing changes.
    pub fn insert_coin(&mut self, coin: Denomination) -> Result<InsertOutcome, MachineError> {
        let shelf = self.selected.ok_or(StateError::NoShelfSelected)?;

        if !self.tx.is_open() {
            self.tx.open();
            match self.shelves.get_mut(shelf).and_then(Shelf::take) {
                Some(product) => {
                    self.tx.bind_product(product);
                    self.tx_shelf = Some(shelf);
                }
                None => {
                    self.tx.close();
                    self.selected = None;
                    self.returned_change.add(coin, 1);
                    self.display = Display::Message(MessageKey::NoProductOnShelf);
                    return Ok(InsertOutcome::ShelfEmpty);
                }
            }
        }

        if let Err(err) = self.deposit(coin, 1) {
            warn!(reason = %err, "coin refused, returning inserted money");
            let mut refund = self.abort_transaction()?;
            refund.add(coin, 1);
            self.returned_change.add_all(&refund);
            self.display = Display::Message(MessageKey::CapacityExceeded);
            return Ok(InsertOutcome::Refused {
                reason: Refusal::CapacityExceeded,
                refund,
            });
        }

        if !self.tx.insert_coin(coin) {
            let remaining = self.tx.remaining();
            self.display = Display::Amount(remaining);
            return Ok(InsertOutcome::Pending { remaining });
        }

        let overpaid = -self.tx.remaining();
        match make_change(&self.coins, overpaid) {
            Ok(change) => {
                self.coins.remove_all(&change)?;
                self.returned_change.add_all(&change);

                let product = self.tx.close().ok_or(StateError::NoTransaction)?;
                self.returned_product = Some(product.clone());
                self.tx_shelf = None;
                self.selected = None;
                self.display = Display::Message(MessageKey::Hello);

                Ok(InsertOutcome::Dispensed { product, change })
            }
            Err(err) => {
                warn!(reason = %err, "purchase refused, returning inserted money");
                let refund = self.abort_transaction()?;
                self.returned_change.add_all(&refund);
                self.display = Display::Message(MessageKey::NoChangeAvailable);
                Ok(InsertOutcome::Refused {
                    reason: Refusal::NoChange,
                    refund,
                })
            }
        }
    }

    /// Call off the open purchase, if any, and return the coins inserted for it.
    ///
    /// The refund is also placed in the tray. Cancelling with no purchase in
    /// progress does nothing and returns no coins.
    pub fn cancel(&mut self) -> Result<Coins, MachineError> {
        if !self.tx.is_open() {
            return Ok(Coins::new());
        }

        let refund = self.abort_transaction()?;
        self.returned_change.add_all(&refund);
        self.display = Display::Message(MessageKey::Hello);
        Ok(refund)
    }

    /// Load `count` more coins of every denomination.
    ///
    /// Refused as a whole if any denomination would overflow the coin box.
    pub fn feed_coins(&mut self, count: u32) -> Result<(), MachineError> {
        for coin in Denomination::descending() {
            if let Err(err) = self.check_capacity(coin, count) {
                self.display = Display::Message(MessageKey::CapacityExceeded);
                return Err(err);
            }
        }

        self.coins.add_all(&Coins::each(count));
        Ok(())
    }

    /// Fill the listed shelves to capacity with copies of the given products.
    ///
    /// A shelf only ever holds one product. Feeding a different product to a
    /// shelf that still holds (or has an open purchase for) another one is
    /// refused. Every entry is checked before any shelf is touched.
    pub fn feed_products(
        &mut self,
        products: impl IntoIterator<Item = (ShelfId, Product)>,
    ) -> Result<(), MachineError> {
        let products: Vec<_> = products.into_iter().collect();

        let mut planned: Vec<Option<&Product>> = (0..self.shelves.len())
            .map(|shelf| self.stocked_product(shelf))
            .collect();
        for (shelf, product) in &products {
            let slot = planned
                .get_mut(*shelf)
                .ok_or(MachineError::ShelfOutOfRange(*shelf))?;
            if let Some(stocked) = *slot {
                if stocked != product {
                    return Err(MachineError::ShelfHoldsOther {
                        shelf: *shelf,
                        stocked: stocked.clone(),
                        offered: product.clone(),
                    });
                }
            }
            *slot = Some(product);
        }

        for (shelf, product) in &products {
            let capacity = self.shelf_capacity(*shelf);
            self.shelves[*shelf].restock(product, capacity);
        }
        info!(shelves = products.len(), "products fed");
        Ok(())
    }

    /// Fill every shelf to capacity.
    ///
    /// Empty shelves get one product picked at random from `choices`; shelves
    /// already holding a product are topped up with more of it.
    pub fn stock_random<R: Rng + ?Sized>(&mut self, choices: &[Product], rng: &mut R) {
        for shelf in 0..self.shelves.len() {
            let product = match self.stocked_product(shelf) {
                Some(stocked) => stocked.clone(),
                None => match choices.choose(rng) {
                    Some(choice) => choice.clone(),
                    None => continue,
                },
            };
            let capacity = self.shelf_capacity(shelf);
            self.shelves[shelf].restock(&product, capacity);
        }
    }

    pub fn clear_shelves(&mut self) {
        self.shelves.iter_mut().for_each(Shelf::clear);
    }

    /// Back to a freshly built machine: empty shelves, coin box and tray.
    pub fn reset(&mut self) {
        self.tx.close();
        self.tx_shelf = None;
        self.selected = None;
        self.clear_shelves();
        self.coins = Coins::new();
        self.returned_change = Coins::new();
        self.returned_product = None;
        self.display = Display::default();
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Coins currently held in the coin box.
    pub fn coins(&self) -> &Coins {
        &self.coins
    }

    pub fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    pub fn shelf_len(&self, shelf: ShelfId) -> Option<usize> {
        self.shelves.get(shelf).map(Shelf::len)
    }

    pub fn selected_shelf(&self) -> Option<ShelfId> {
        self.selected
    }

    pub fn display(&self) -> Display {
        self.display
    }

    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    pub fn returned_product(&self) -> Option<&Product> {
        self.returned_product.as_ref()
    }

    pub fn returned_change(&self) -> &Coins {
        &self.returned_change
    }

    /// Empty the change tray.
    pub fn take_returned_change(&mut self) -> Coins {
        self.returned_change.take()
    }

    /// Empty the product tray.
    pub fn take_returned_product(&mut self) -> Option<Product> {
        self.returned_product.take()
    }
}

/// Private API
impl VendingMachine {
    /// Small helper to log `apply` results
    fn log_result<A, T, E>(op: &str, arg: &A, result: &Result<T, E>)
    where
        A: std::fmt::Display + ?Sized,
        T: std::fmt::Debug,
        E: std::fmt::Display,
    {
        match result {
            Ok(outcome) => {
                info!(arg = %arg, outcome = ?outcome, "{op} applied");
            }
            Err(e) => {
                info!(arg = %arg, reason = %e, "{op} skipped");
            }
        }
    }

    /// Check that `count` more coins of `coin` fit in the coin box
    fn check_capacity(&self, coin: Denomination, count: u32) -> Result<(), MachineError> {
        let max = self.config.max_coins_per_denomination;
        match self.coins.get(coin).checked_add(count) {
            Some(total) if total <= max => Ok(()),
            // a count past u32::MAX is reported as u32::MAX
            total => Err(MachineError::CapacityExceeded {
                coin,
                count: total.unwrap_or(u32::MAX),
                max,
            }),
        }
    }

    /// Put one or more coins into the coin box, respecting its capacity
    fn deposit(&mut self, coin: Denomination, count: u32) -> Result<(), MachineError> {
        self.check_capacity(coin, count)?;
        self.coins.add(coin, count);
        Ok(())
    }

    /// Items a shelf may hold right now; the item of an open purchase keeps its place
    fn shelf_capacity(&self, shelf: ShelfId) -> usize {
        let max = self.config.max_products_per_shelf;
        match self.tx_shelf {
            Some(origin) if origin == shelf && self.tx.product().is_some() => max.saturating_sub(1),
            _ => max,
        }
    }

    /// The product a shelf is stocked with, counting an item taken by the open purchase
    fn stocked_product(&self, shelf: ShelfId) -> Option<&Product> {
        let in_purchase = match self.tx_shelf {
            Some(origin) if origin == shelf => self.tx.product(),
            _ => None,
        };
        self.shelves
            .get(shelf)
            .and_then(Shelf::front)
            .or(in_purchase)
    }

    /// Undo the open transaction:
    /// - Take its coins back out of the coin box
    /// - Return the product to the shelf it came from
    /// - Close the transaction and clear the selection
    ///
    /// The coins are handed back to the caller, not yet placed in the tray.
    fn abort_transaction(&mut self) -> Result<Coins, MachineError> {
        let refund = self.tx.coins().clone();
        self.coins.remove_all(&refund)?;

        let shelf = self.tx_shelf.take();
        if let Some(product) = self.tx.close() {
            let slot = shelf
                .and_then(|s| self.shelves.get_mut(s))
                .ok_or(StateError::NoTransaction)?;
            slot.put_back(product);
        }
        self.selected = None;

        Ok(refund)
    }
}
