//! Position — long-only holdings with weighted-average cost basis.

use rust_decimal::Decimal;
use serde::Serialize;

/// Current holdings of the simulated instrument.
///
/// Long-only by construction: quantity is unsigned and `reduce` refuses to
/// go below zero. The cost basis is the weighted average of all buy fills
/// still open; selling leaves the basis unchanged and realizes
/// `(fill − avg_cost) × quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct Position {
    quantity: u64,
    avg_cost: Decimal,
}

impl Position {
    pub fn flat() -> Self {
        Self::default()
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn avg_cost(&self) -> Decimal {
        self.avg_cost
    }

    pub fn is_flat(&self) -> bool {
        self.quantity == 0
    }

    /// Market value at the given price.
    pub fn market_value(&self, price: Decimal) -> Decimal {
        Decimal::from(self.quantity) * price
    }

    /// Add `quantity` units bought at `fill_price`, folding the fill into the
    /// weighted-average cost basis.
    pub fn add(&mut self, quantity: u64, fill_price: Decimal) {
        let new_quantity = self.quantity + quantity;
        let held = Decimal::from(self.quantity);
        let added = Decimal::from(quantity);
        self.avg_cost = (self.avg_cost * held + fill_price * added) / Decimal::from(new_quantity);
        self.quantity = new_quantity;
    }

    /// Remove `quantity` units sold at `fill_price`, returning the realized
    /// P&L. Returns `None` if the position holds fewer units than requested;
    /// the position is left untouched in that case.
    pub fn reduce(&mut self, quantity: u64, fill_price: Decimal) -> Option<Decimal> {
        if quantity > self.quantity {
            return None;
        }
        let realized = (fill_price - self.avg_cost) * Decimal::from(quantity);
        self.quantity -= quantity;
        if self.quantity == 0 {
            self.avg_cost = Decimal::ZERO;
        }
        Some(realized)
    }
}
