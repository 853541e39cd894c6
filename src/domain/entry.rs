// src/domain/entry.rs

use crate::domain::commission::{commission_amount, resolve_commission};
use crate::domain::fdi::{available_points, point_cost};
use crate::domain::sale::{entry_vpg, SaleEntry, SaleRecord, SaleType, NO_MANAGER, NO_SALE};
use crate::domain::tier::CommissionTier;
use crate::errors::ServerError;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A validated, fully computed entry waiting for an id from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub project_id: i64,
    pub date: NaiveDate,
    pub client_last_name: String,
    pub lead_number: String,
    pub manager_name: String,
    pub number_of_tours: u32,
    pub sale_amount: Decimal,
    pub sale_type: SaleType,
    pub commission_percentage: Decimal,
    pub commission_amount: Decimal,
    pub fdi_points: Decimal,
    pub fdi_given_points: Decimal,
    pub fdi_cost: Decimal,
    pub sale_vpg: Decimal,
    pub notes: String,
    pub is_cancelled: bool,
    pub created_at: i64,
}

impl NewSale {
    pub fn into_record(self, id: i64) -> SaleRecord {
        SaleRecord {
            id,
            project_id: self.project_id,
            date: self.date,
            client_last_name: self.client_last_name,
            lead_number: self.lead_number,
            manager_name: self.manager_name,
            number_of_tours: self.number_of_tours,
            sale_amount: self.sale_amount,
            sale_type: self.sale_type,
            commission_percentage: self.commission_percentage,
            commission_amount: self.commission_amount,
            fdi_points: self.fdi_points,
            fdi_given_points: self.fdi_given_points,
            fdi_cost: self.fdi_cost,
            sale_vpg: self.sale_vpg,
            notes: self.notes,
            is_cancelled: self.is_cancelled,
            created_at: self.created_at,
        }
    }
}

/// Validate `entry` and freeze its commission and FDI figures.
///
/// `cumulative_volume_before` is the project's active volume prior to this
/// entry; it only selects the tier, never the base rate.
pub fn price_entry(
    entry: &SaleEntry,
    project_id: i64,
    cumulative_volume_before: Decimal,
    tiers: &[CommissionTier],
    now: i64,
) -> Result<NewSale, ServerError> {
    entry.validate()?;

    if entry.is_no_sale {
        return Ok(NewSale {
            project_id,
            date: entry.date,
            client_last_name: NO_SALE.to_string(),
            lead_number: entry.lead_number.trim().to_string(),
            manager_name: NO_MANAGER.to_string(),
            number_of_tours: entry.number_of_tours,
            sale_amount: Decimal::ZERO,
            sale_type: entry.sale_type,
            commission_percentage: Decimal::ZERO,
            commission_amount: Decimal::ZERO,
            fdi_points: Decimal::ZERO,
            fdi_given_points: Decimal::ZERO,
            fdi_cost: Decimal::ZERO,
            sale_vpg: Decimal::ZERO,
            notes: entry.notes.clone(),
            is_cancelled: entry.is_cancelled,
            created_at: now,
        });
    }

    let amount = entry.sale_amount;
    let percentage = resolve_commission(amount, cumulative_volume_before, entry.sale_type, tiers);
    let fdi_points = available_points(amount);

    Ok(NewSale {
        project_id,
        date: entry.date,
        client_last_name: entry.client_last_name.trim().to_string(),
        lead_number: entry.lead_number.trim().to_string(),
        manager_name: entry.manager_name.trim().to_string(),
        number_of_tours: entry.number_of_tours,
        sale_amount: amount,
        sale_type: entry.sale_type,
        commission_percentage: percentage,
        commission_amount: commission_amount(amount, percentage),
        fdi_points,
        fdi_given_points: entry.fdi_given_points,
        fdi_cost: point_cost(entry.fdi_given_points, fdi_points),
        sale_vpg: entry_vpg(amount, entry.number_of_tours),
        notes: entry.notes.clone(),
        is_cancelled: entry.is_cancelled,
        created_at: now,
    })
}

/// Active volume of `sales`, optionally leaving one record out (the one being edited).
pub fn cumulative_volume(sales: &[SaleRecord], excluding: Option<i64>) -> Decimal {
    sales
        .iter()
        .filter(|s| s.is_active() && Some(s.id) != excluding)
        .map(|s| s.sale_amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tier::default_tiers;
    use rust_decimal_macros::dec;

    fn entry(amount: Decimal) -> SaleEntry {
        SaleEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            client_last_name: " Jones ".into(),
            lead_number: "L-7".into(),
            manager_name: "Lisa".into(),
            number_of_tours: 2,
            sale_amount: amount,
            sale_type: SaleType::Deed,
            fdi_given_points: Decimal::ZERO,
            notes: String::new(),
            is_cancelled: false,
            is_no_sale: false,
        }
    }

    #[test]
    fn prices_a_plain_sale() {
        let sale = price_entry(&entry(dec!(15000)), 1, Decimal::ZERO, &default_tiers(), 100).unwrap();
        assert_eq!(sale.client_last_name, "Jones");
        assert_eq!(sale.commission_percentage, dec!(4));
        assert_eq!(sale.commission_amount, dec!(600));
        assert_eq!(sale.fdi_points, dec!(15));
        assert_eq!(sale.fdi_cost, Decimal::ZERO);
        assert_eq!(sale.sale_vpg, dec!(7500));
    }

    #[test]
    fn tier_comes_from_prior_volume() {
        let sale = price_entry(&entry(dec!(60000)), 1, dec!(200000), &default_tiers(), 100).unwrap();
        assert_eq!(sale.commission_percentage, dec!(7));
        assert_eq!(sale.commission_amount, dec!(4200));
    }

    #[test]
    fn no_sale_is_forced_to_zero() {
        let mut e = entry(dec!(50000));
        e.is_no_sale = true;
        e.fdi_given_points = dec!(30);
        let sale = price_entry(&e, 1, dec!(900000), &default_tiers(), 100).unwrap();
        assert_eq!(sale.client_last_name, NO_SALE);
        assert_eq!(sale.manager_name, NO_MANAGER);
        assert_eq!(sale.sale_amount, Decimal::ZERO);
        assert_eq!(sale.commission_amount, Decimal::ZERO);
        assert_eq!(sale.fdi_points, Decimal::ZERO);
        assert_eq!(sale.fdi_cost, Decimal::ZERO);
        assert_eq!(sale.number_of_tours, 2);
    }

    #[test]
    fn half_cent_commission_is_rounded_up() {
        let sale = price_entry(&entry(dec!(20484.30)), 1, Decimal::ZERO, &default_tiers(), 100).unwrap();
        assert_eq!(sale.commission_percentage, dec!(5));
        assert_eq!(sale.commission_amount, dec!(1024.22));
    }

    #[test]
    fn rejects_negative_amount_before_pricing() {
        let res = price_entry(&entry(dec!(-10)), 1, Decimal::ZERO, &default_tiers(), 100);
        assert!(matches!(res, Err(ServerError::Validation(_))));
    }

    #[test]
    fn excess_fdi_points_cost_money() {
        let mut e = entry(dec!(15000));
        e.fdi_given_points = dec!(17);
        let sale = price_entry(&e, 1, Decimal::ZERO, &default_tiers(), 100).unwrap();
        assert_eq!(sale.fdi_cost, dec!(50));
    }

    #[test]
    fn cumulative_volume_skips_inactive_and_excluded() {
        let mut records = Vec::new();
        for (id, amount, cancelled) in [(1, dec!(1000), false), (2, dec!(2000), true), (3, dec!(4000), false)] {
            let mut r = price_entry(&entry(amount), 1, Decimal::ZERO, &[], 0).unwrap().into_record(id);
            r.is_cancelled = cancelled;
            records.push(r);
        }
        assert_eq!(cumulative_volume(&records, None), dec!(5000));
        assert_eq!(cumulative_volume(&records, Some(3)), dec!(1000));
    }
}
