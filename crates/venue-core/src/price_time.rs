//! One side of one instrument's book, ordered by price-time priority.
//!
//! - Buy side: best = highest price.
//! - Sell side: best = lowest price.
//! - FIFO within each price level.
//!
//! Structure: `BTreeMap` of price levels, each a `VecDeque` of orders in
//! arrival order. Cancellation does a linear scan over the levels; depth
//! is usually small and the scan keeps the structure free of auxiliary
//! indexes that would have to stay in sync under concurrent mutation.

use std::collections::{BTreeMap, VecDeque};

use crate::order::Order;
use crate::side::Side;

/// Price-time ordered collection of resting orders for a single side of
/// a single instrument.
///
/// All mutation happens under the owning instrument's critical section;
/// the front-to-back consumption methods (`front_of_best_mut`,
/// `remove_front_of_best`) reflect live state and must be driven to
/// completion inside that same critical section.
#[derive(Debug)]
pub struct PriceTimeBook {
    side: Side,

    /// Price -> FIFO queue of orders at that price. Keys sort ascending;
    /// the side decides which end is best.
    levels: BTreeMap<u64, VecDeque<Order>>,
}

impl PriceTimeBook {
    pub fn new(side: Side) -> Self {
        PriceTimeBook {
            side,
            levels: BTreeMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of resting orders across all levels.
    pub fn order_count(&self) -> usize {
        self.levels.values().map(|q| q.len()).sum()
    }

    /// Rest an order at the back of its price level. Requires
    /// `remaining_qty > 0`; no event emission here, that is the caller's
    /// responsibility.
    pub fn insert(&mut self, order: Order) {
        debug_assert!(order.remaining_qty > 0);
        debug_assert_eq!(order.side, self.side);
        self.levels.entry(order.price).or_default().push_back(order);
    }

    /// Best price on this side, if any.
    pub fn best_price(&self) -> Option<u64> {
        match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        }
    }

    /// Total remaining quantity at the best price.
    pub fn best_quantity(&self) -> u64 {
        self.best_price()
            .and_then(|price| self.levels.get(&price))
            .map(|orders| orders.iter().map(|o| o.remaining_qty).sum())
            .unwrap_or(0)
    }

    /// The highest-priority resting order: front of the best price level.
    pub fn front_of_best_mut(&mut self) -> Option<&mut Order> {
        let price = self.best_price()?;
        self.levels.get_mut(&price).and_then(|q| q.front_mut())
    }

    /// Remove and return the front of the best level, pruning the level
    /// if it becomes empty. Used after a resting order fully fills.
    pub fn remove_front_of_best(&mut self) -> Option<Order> {
        let price = self.best_price()?;
        let queue = self.levels.get_mut(&price)?;
        let order = queue.pop_front();
        if queue.is_empty() {
            self.levels.remove(&price);
        }
        order
    }

    /// Remove and return the order with `order_id` if it is resting here.
    ///
    /// Scans every level; `None` is a normal negative result (already
    /// filled, already canceled, or never here), not an error.
    pub fn cancel(&mut self, order_id: u64) -> Option<Order> {
        let mut found: Option<(u64, usize)> = None;

        for (price, orders) in self.levels.iter() {
            if let Some(idx) = orders.iter().position(|o| o.order_id == order_id) {
                found = Some((*price, idx));
                break;
            }
        }

        let (price, idx) = found?;
        let queue = self.levels.get_mut(&price)?;
        let order = queue.remove(idx);
        if queue.is_empty() {
            self.levels.remove(&price);
        }
        order
    }
}
