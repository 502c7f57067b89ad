use std::collections::VecDeque;

use crate::model::Product;

/// A queue of units of one product; the front item is sold first.
///
/// The machine only ever restocks a shelf with the product it already holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shelf {
    products: VecDeque<Product>,
}

impl Shelf {
    pub fn front(&self) -> Option<&Product> {
        self.products.front()
    }

    pub fn take(&mut self) -> Option<Product> {
        self.products.pop_front()
    }

    /// Return an item taken by an aborted purchase to the front of the queue.
    pub fn put_back(&mut self, product: Product) {
        self.products.push_front(product);
    }

    /// Top up with copies of `product` until the shelf holds `capacity` items.
    pub fn restock(&mut self, product: &Product, capacity: usize) {
        while self.products.len() < capacity {
            self.products.push_back(product.clone());
        }
    }

    pub fn clear(&mut self) {
        self.products.clear();
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }
}
