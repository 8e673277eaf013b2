use rust_decimal::Decimal;

/// The single monthly spending ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Budget {
    pub value: Decimal,
}

impl Budget {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// An unset budget counts as zero.
    pub fn value_or_zero(budget: Option<&Budget>) -> Decimal {
        budget.map(|b| b.value).unwrap_or(Decimal::ZERO)
    }
}
