use crate::Amount;
use crate::coin::{Coins, Denomination};
use crate::model::Product;

/// One purchase attempt.
///
/// Closed until a coin arrives for a selected shelf, open while money is
/// collected, closed again once the purchase completes or is called off.
#[derive(Debug, Default)]
pub struct Transaction {
    open: bool,
    product: Option<Product>,
    coins: Coins,
    inserted: Amount,
    remaining: Amount,
}

impl Transaction {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.inserted = Amount::ZERO;
        self.remaining = Amount::ZERO;
    }

    /// Bind the product being paid for; the full price is owed from here on.
    pub fn bind_product(&mut self, product: Product) {
        self.remaining = product.price();
        self.product = Some(product);
    }

    /// Record one inserted coin. Returns true once the price is covered.
    pub fn insert_coin(&mut self, coin: Denomination) -> bool {
        self.coins.add(coin, 1);
        self.inserted += coin.value();
        self.remaining -= coin.value();
        self.remaining <= Amount::ZERO
    }

    /// Reset to the neutral state, handing back the bound product if any.
    pub fn close(&mut self) -> Option<Product> {
        self.open = false;
        self.coins = Coins::new();
        self.inserted = Amount::ZERO;
        self.remaining = Amount::ZERO;
        self.product.take()
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    /// Coins inserted during this transaction.
    pub fn coins(&self) -> &Coins {
        &self.coins
    }

    pub fn inserted(&self) -> Amount {
        self.inserted
    }

    /// Amount still owed; zero or negative once the price is covered.
    pub fn remaining(&self) -> Amount {
        self.remaining
    }
}
