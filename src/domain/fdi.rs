// src/domain/fdi.rs

use crate::domain::money::round_cents;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Amount bands for FDI points: `(lower bound of sale amount, points per $1,000)`.
/// Bands are ordered by lower bound and the rate never decreases, which keeps
/// the available points monotone in the sale amount.
pub const FDI_POINT_BANDS: [(Decimal, Decimal); 4] = [
    (dec!(0), dec!(0)),
    (dec!(10000), dec!(1.0)),
    (dec!(20000), dec!(1.5)),
    (dec!(50000), dec!(2.0)),
];

/// Dollar cost of each point given away beyond the available allotment.
pub const FDI_EXCESS_POINT_COST: Decimal = dec!(25);

/// Points the salesperson may give away for free on a sale of `sale_amount`.
pub fn available_points(sale_amount: Decimal) -> Decimal {
    let rate = FDI_POINT_BANDS
        .iter()
        .rev()
        .find(|(lower, _)| sale_amount >= *lower)
        .map(|(_, rate)| *rate)
        .unwrap_or(Decimal::ZERO);
    round_cents(sale_amount / dec!(1000) * rate)
}

/// Cost of `given_points`; only the excess over `available` is charged.
pub fn point_cost(given_points: Decimal, available: Decimal) -> Decimal {
    if given_points <= available {
        return Decimal::ZERO;
    }
    round_cents((given_points - available) * FDI_EXCESS_POINT_COST)
}
