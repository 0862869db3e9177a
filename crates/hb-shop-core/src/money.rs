use rust_decimal::{Decimal, RoundingStrategy};

/// Sales tax applied on top of the cart subtotal (8 %).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// `$12.50` style display, rounded half away from zero.
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", round_cents(amount))
}

pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Derived totals for a subtotal. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl Totals {
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    pub fn subtotal_display(&self) -> String {
        format_money(self.subtotal)
    }

    pub fn tax_display(&self) -> String {
        format_money(self.tax)
    }

    pub fn total_display(&self) -> String {
        format_money(self.total)
    }
}
