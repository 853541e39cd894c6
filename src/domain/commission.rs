// src/domain/commission.rs

use crate::domain::money::percent_of;
use crate::domain::sale::SaleType;
use crate::domain::tier::{find_tier, CommissionTier};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Sale amount at which the base rate rises to 5%.
pub const MID_BASE_THRESHOLD: Decimal = dec!(20000);
/// Sale amount at which the base rate rises to 6%.
pub const HIGH_BASE_THRESHOLD: Decimal = dec!(50000);

/// Base commission percentage for a single sale amount.
///
/// Both sale types currently share one table; the type is accepted so the
/// call sites stay unchanged if TRUST sales ever get their own rates.
pub fn base_rate(sale_amount: Decimal, _sale_type: SaleType) -> Decimal {
    if sale_amount >= HIGH_BASE_THRESHOLD {
        dec!(6)
    } else if sale_amount >= MID_BASE_THRESHOLD {
        dec!(5)
    } else {
        dec!(4)
    }
}

/// Additional percentage from the tier containing the pre-sale volume.
pub fn additional_rate(cumulative_volume_before: Decimal, tiers: &[CommissionTier]) -> Decimal {
    find_tier(tiers, cumulative_volume_before)
        .map(|t| t.additional_commission)
        .unwrap_or(Decimal::ZERO)
}

/// Total commission percentage (base + tier additional), unrounded.
///
/// Inputs must already be validated as non-negative and bounded.
pub fn resolve_commission(
    sale_amount: Decimal,
    cumulative_volume_before: Decimal,
    sale_type: SaleType,
    tiers: &[CommissionTier],
) -> Decimal {
    base_rate(sale_amount, sale_type) + additional_rate(cumulative_volume_before, tiers)
}

/// Commission in dollars, rounded to cents half away from zero.
pub fn commission_amount(sale_amount: Decimal, percentage: Decimal) -> Decimal {
    percent_of(sale_amount, percentage)
}

/// Total rate shown for a tier row: base rate of its lower bound plus its additional.
pub fn tier_total_rate(tier: &CommissionTier) -> Decimal {
    base_rate(tier.min_amount, SaleType::Deed) + tier.additional_commission
}
