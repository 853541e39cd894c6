// src/domain/tier.rs

use crate::domain::money::check_amount;
use crate::errors::ServerError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A cumulative-volume bracket carrying an additional commission percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommissionTier {
    pub level: u32,
    /// Inclusive lower bound of cumulative volume.
    pub min_amount: Decimal,
    /// Inclusive upper bound of cumulative volume.
    pub max_amount: Decimal,
    pub additional_commission: Decimal,
}

impl CommissionTier {
    pub const fn new(
        level: u32,
        min_amount: Decimal,
        max_amount: Decimal,
        additional: Decimal,
    ) -> Self {
        Self {
            level,
            min_amount,
            max_amount,
            additional_commission: additional,
        }
    }

    pub fn contains(&self, volume: Decimal) -> bool {
        volume >= self.min_amount && volume <= self.max_amount
    }

    pub fn overlaps(&self, other: &CommissionTier) -> bool {
        self.min_amount <= other.max_amount && other.min_amount <= self.max_amount
    }

    pub fn validate(&self) -> Result<(), ServerError> {
        check_amount("tier minimum", self.min_amount)?;
        check_amount("tier maximum", self.max_amount)?;
        check_amount("additional commission", self.additional_commission)?;
        if self.min_amount > self.max_amount {
            return Err(ServerError::Validation(format!(
                "tier {}: min {} exceeds max {}",
                self.level, self.min_amount, self.max_amount
            )));
        }
        Ok(())
    }
}

/// Schedule every new project starts from. Each project receives its own copy.
pub const DEFAULT_COMMISSION_TIERS: [CommissionTier; 8] = [
    CommissionTier::new(1, dec!(162500), dec!(243749), dec!(1)),
    CommissionTier::new(2, dec!(243750), dec!(324999), dec!(2)),
    CommissionTier::new(3, dec!(325000), dec!(406249), dec!(3)),
    CommissionTier::new(4, dec!(406250), dec!(487499), dec!(3.5)),
    CommissionTier::new(5, dec!(487500), dec!(584999), dec!(4)),
    CommissionTier::new(6, dec!(585000), dec!(682499), dec!(5)),
    CommissionTier::new(7, dec!(682500), dec!(893749), dec!(5.5)),
    CommissionTier::new(8, dec!(893750), dec!(999999999), dec!(6)),
];

pub fn default_tiers() -> Vec<CommissionTier> {
    DEFAULT_COMMISSION_TIERS.to_vec()
}

/// First tier (in list order) whose range contains `volume`.
pub fn find_tier(tiers: &[CommissionTier], volume: Decimal) -> Option<&CommissionTier> {
    tiers.iter().find(|t| t.contains(volume))
}

/// Pairs of levels whose ranges overlap. Only used for diagnostics:
/// the resolver picks the first match when ranges overlap.
pub fn overlapping_levels(tiers: &[CommissionTier]) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();
    for (i, a) in tiers.iter().enumerate() {
        for b in &tiers[i + 1..] {
            if a.overlaps(b) {
                pairs.push((a.level, b.level));
            }
        }
    }
    pairs
}

/// Replace the tier with the same level, keeping list order.
pub fn replace_tier(
    tiers: &[CommissionTier],
    edited: CommissionTier,
) -> Result<Vec<CommissionTier>, ServerError> {
    if !tiers.iter().any(|t| t.level == edited.level) {
        return Err(ServerError::NotFound(format!(
            "commission level {}",
            edited.level
        )));
    }
    Ok(tiers
        .iter()
        .map(|t| if t.level == edited.level { edited } else { *t })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_is_disjoint() {
        assert!(overlapping_levels(&DEFAULT_COMMISSION_TIERS).is_empty());
    }

    #[test]
    fn bounds_are_inclusive() {
        let tiers = default_tiers();
        assert_eq!(find_tier(&tiers, dec!(162500)).map(|t| t.level), Some(1));
        assert_eq!(find_tier(&tiers, dec!(243749)).map(|t| t.level), Some(1));
        assert_eq!(find_tier(&tiers, dec!(243750)).map(|t| t.level), Some(2));
        assert!(find_tier(&tiers, dec!(162499.99)).is_none());
    }

    #[test]
    fn gaps_match_nothing() {
        let tiers = default_tiers();
        // 243_749 < x < 243_750 falls between levels 1 and 2.
        assert!(find_tier(&tiers, dec!(243749.5)).is_none());
    }

    #[test]
    fn first_match_wins_on_overlap() {
        let tiers = vec![
            CommissionTier::new(1, dec!(0), dec!(100), dec!(1)),
            CommissionTier::new(2, dec!(50), dec!(200), dec!(2)),
        ];
        assert_eq!(find_tier(&tiers, dec!(75)).map(|t| t.level), Some(1));
        assert_eq!(overlapping_levels(&tiers), vec![(1, 2)]);
    }

    #[test]
    fn replace_keeps_order_and_rejects_unknown_level() {
        let tiers = default_tiers();
        let edited = CommissionTier::new(3, dec!(300000), dec!(406249), dec!(3.25));
        let updated = replace_tier(&tiers, edited).unwrap();
        assert_eq!(updated.len(), 8);
        assert_eq!(updated[2], edited);
        assert_eq!(updated[3], tiers[3]);

        let missing = CommissionTier::new(42, dec!(0), dec!(1), dec!(1));
        assert!(matches!(
            replace_tier(&tiers, missing),
            Err(ServerError::NotFound(_))
        ));
    }

    #[test]
    fn validate_rejects_inverted_range() {
        assert!(CommissionTier::new(1, dec!(10), dec!(5), dec!(1)).validate().is_err());
        assert!(CommissionTier::new(1, dec!(0), dec!(5), dec!(-1)).validate().is_err());
        assert!(CommissionTier::new(1, dec!(0), dec!(5), dec!(1)).validate().is_ok());
    }
}
