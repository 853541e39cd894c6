// src/forms.rs
//
// Decoding of query strings and form bodies into domain inputs.
use crate::domain::sale::{SaleEntry, SaleType};
use crate::domain::tier::CommissionTier;
use crate::errors::ServerError;
use crate::reports::YearMonth;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

pub type Fields = HashMap<String, String>;

pub fn parse_fields(raw: &str) -> Fields {
    url::form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect()
}

fn text(fields: &Fields, key: &str) -> String {
    fields.get(key).map(|v| v.trim().to_string()).unwrap_or_default()
}

fn required<'a>(fields: &'a Fields, key: &str) -> Result<&'a str, ServerError> {
    match fields.get(key).map(|v| v.trim()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ServerError::Validation(format!("{key} is required"))),
    }
}

/// Amounts are parsed straight into `Decimal`, so `20484.30` stays exact.
fn number(fields: &Fields, key: &str) -> Result<Decimal, ServerError> {
    let raw = required(fields, key)?;
    raw.parse::<Decimal>()
        .map_err(|_| ServerError::Validation(format!("{key} must be a number, got '{raw}'")))
}

fn optional_number(fields: &Fields, key: &str) -> Result<Decimal, ServerError> {
    match fields.get(key).map(|v| v.trim()) {
        None | Some("") => Ok(Decimal::ZERO),
        Some(_) => number(fields, key),
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ServerError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ServerError::Validation(format!("expected a YYYY-MM-DD date, got '{raw}'")))
}

/// `month` query parameter, falling back to `default` when absent.
pub fn month_param(fields: &Fields, default: YearMonth) -> Result<YearMonth, ServerError> {
    match fields.get("month").map(|v| v.trim()) {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse(),
    }
}

pub fn parse_sale_entry(fields: &Fields) -> Result<SaleEntry, ServerError> {
    let is_no_sale = text(fields, "entry_type") == "no-sale";

    let number_of_tours = match fields.get("number_of_tours").map(|v| v.trim()) {
        None | Some("") => 0,
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            ServerError::Validation(format!("number_of_tours must be a whole number, got '{raw}'"))
        })?,
    };

    let sale_type = match fields.get("sale_type").map(|v| v.trim()) {
        None | Some("") => SaleType::Deed,
        Some(raw) => raw.parse()?,
    };

    let sale_amount = if is_no_sale {
        Decimal::ZERO
    } else {
        number(fields, "sale_amount")?
    };

    Ok(SaleEntry {
        date: parse_date(required(fields, "date")?)?,
        client_last_name: text(fields, "client_last_name"),
        lead_number: text(fields, "lead_number"),
        manager_name: text(fields, "manager_name"),
        number_of_tours,
        sale_amount,
        sale_type,
        fdi_given_points: if is_no_sale {
            Decimal::ZERO
        } else {
            optional_number(fields, "fdi_given_points")?
        },
        notes: fields.get("notes").cloned().unwrap_or_default(),
        is_cancelled: fields.contains_key("is_cancelled"),
        is_no_sale,
    })
}

pub fn parse_tier(level: u32, fields: &Fields) -> Result<CommissionTier, ServerError> {
    let tier = CommissionTier {
        level,
        min_amount: number(fields, "min_amount")?,
        max_amount: number(fields, "max_amount")?,
        additional_commission: number(fields, "additional_commission")?,
    };
    tier.validate()?;
    Ok(tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decodes_form_encoding() {
        let f = parse_fields("client_last_name=O%27Neil+Jr&notes=a%26b");
        assert_eq!(f["client_last_name"], "O'Neil Jr");
        assert_eq!(f["notes"], "a&b");
    }

    #[test]
    fn parses_a_sale() {
        let f = parse_fields(
            "date=2024-03-05&client_last_name=Smith&number_of_tours=2&sale_amount=15000&sale_type=TRUST&is_cancelled=on",
        );
        let e = parse_sale_entry(&f).unwrap();
        assert_eq!(e.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(e.sale_amount, dec!(15000));
        assert_eq!(e.sale_type, SaleType::Trust);
        assert_eq!(e.number_of_tours, 2);
        assert!(e.is_cancelled);
        assert!(!e.is_no_sale);
    }

    #[test]
    fn no_sale_needs_no_amount() {
        let f = parse_fields("date=2024-03-05&entry_type=no-sale&number_of_tours=1");
        let e = parse_sale_entry(&f).unwrap();
        assert!(e.is_no_sale);
        assert_eq!(e.sale_amount, Decimal::ZERO);
    }

    #[test]
    fn rejects_missing_or_malformed_fields() {
        let missing_amount = parse_fields("date=2024-03-05&client_last_name=Smith");
        assert!(matches!(
            parse_sale_entry(&missing_amount),
            Err(ServerError::Validation(_))
        ));

        let bad_date = parse_fields("date=05/03/2024&sale_amount=1");
        assert!(parse_sale_entry(&bad_date).is_err());

        let bad_tours = parse_fields("date=2024-03-05&sale_amount=1&number_of_tours=-1");
        assert!(parse_sale_entry(&bad_tours).is_err());
    }

    #[test]
    fn amounts_are_parsed_exactly() {
        let f = parse_fields("date=2024-03-05&sale_amount=20484.30&fdi_given_points=12.5");
        let e = parse_sale_entry(&f).unwrap();
        assert_eq!(e.sale_amount, dec!(20484.30));
        assert_eq!(e.fdi_given_points, dec!(12.5));

        for raw in ["NaN", "inf", "1e400", "12,000"] {
            let f = parse_fields(&format!("date=2024-03-05&sale_amount={raw}"));
            assert!(
                matches!(parse_sale_entry(&f), Err(ServerError::Validation(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn month_param_defaults() {
        let default = YearMonth::new(2024, 1).unwrap();
        assert_eq!(month_param(&parse_fields(""), default).unwrap(), default);
        assert_eq!(
            month_param(&parse_fields("month=2024-07"), default).unwrap(),
            YearMonth::new(2024, 7).unwrap()
        );
        assert!(month_param(&parse_fields("month=july"), default).is_err());
    }

    #[test]
    fn tier_form_is_validated() {
        let ok = parse_tier(2, &parse_fields("min_amount=1&max_amount=5&additional_commission=2.5")).unwrap();
        assert_eq!(ok.additional_commission, dec!(2.5));
        assert!(parse_tier(2, &parse_fields("min_amount=9&max_amount=5&additional_commission=1")).is_err());
        assert!(parse_tier(2, &parse_fields("min_amount=1&max_amount=5")).is_err());
    }
}
