use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One purchasable line on the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,

    /// Unit price in currency units
    pub price: Decimal,
}

/// Price modifier attached to the order. Only eligible adjustments count
/// toward the total and toward the provider's item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub label: String,
    pub amount: Decimal,
    pub eligible: bool,
}

/// Mirror of the host platform's order, scoped to what charge creation
/// needs: totals, billable lines and adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Host-assigned order number
    pub number: String,

    /// Checkout email the invoice is issued against
    pub email: String,

    pub line_items: Vec<LineItem>,
    pub adjustments: Vec<Adjustment>,
    pub ship_total: Decimal,

    /// Derived: items + shipping + eligible adjustments
    pub total: Decimal,
}

impl Order {
    pub fn new(
        number: impl Into<String>,
        email: impl Into<String>,
        line_items: Vec<LineItem>,
        ship_total: Decimal,
    ) -> Self {
        let mut order = Self {
            number: number.into(),
            email: email.into(),
            line_items,
            adjustments: Vec::new(),
            ship_total,
            total: Decimal::ZERO,
        };
        order.recalculate_total();
        order
    }

    /// Append an eligible adjustment and re-derive the total.
    pub fn add_adjustment(&mut self, label: impl Into<String>, amount: Decimal) {
        self.adjustments.push(Adjustment {
            label: label.into(),
            amount,
            eligible: true,
        });
        self.recalculate_total();
    }

    pub fn eligible_adjustments(&self) -> impl Iterator<Item = &Adjustment> {
        self.adjustments.iter().filter(|a| a.eligible)
    }

    fn recalculate_total(&mut self) {
        let item_total: Decimal = self
            .line_items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum();
        let adjustment_total: Decimal = self.eligible_adjustments().map(|a| a.amount).sum();

        self.total = item_total + self.ship_total + adjustment_total;
    }
}
