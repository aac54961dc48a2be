//! Display strings for amounts and dates shown in the transaction feed.

use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::transaction::{TransactionDate, UNKNOWN_DATE_LABEL, format_cents, to_cents};

const DATE_HEADING_FORMAT: &[BorrowedFormatItem] =
    format_description!("[weekday], [month repr:long] [day padding:none]");

/// Format `number` as dollars rounded to the cent, e.g. "$12.50" or "-$3.75".
///
/// Amounts are rounded to whole cents the same way the financial summary
/// rounds its totals, and are never grouped or written in exponent form.
pub fn format_currency(number: f64) -> String {
    let cents = to_cents(number);

    if cents < 0 {
        format!("-${}", format_cents(-cents))
    } else {
        format!("${}", format_cents(cents))
    }
}

/// The signed amount shown next to a transaction in the feed.
///
/// Income (a negative amount) is shown with a plus sign and everything else
/// with a minus sign, both using the absolute value: `-45.0` gives "+$45.00"
/// and `12.5` gives "-$12.50".
pub fn format_display_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { '+' } else { '-' };
    format!("{sign}{}", format_currency(amount.abs()))
}

/// The heading shown above a day's transactions, e.g. "Tuesday, January 2".
///
/// Unparseable dates share the heading [UNKNOWN_DATE_LABEL].
pub fn format_date_heading(date: TransactionDate) -> String {
    let Some(date) = date.date() else {
        return UNKNOWN_DATE_LABEL.to_owned();
    };

    date.format(DATE_HEADING_FORMAT).unwrap_or_else(|error| {
        tracing::error!("could not format date {date}: {error}");
        date.to_string()
    })
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::transaction::TransactionDate;

    use super::{format_currency, format_date_heading, format_display_amount};

    #[test]
    fn formats_currency_with_two_decimals() {
        assert_eq!(format_currency(12.5), "$12.50");
        assert_eq!(format_currency(-3.75), "-$3.75");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn rounds_to_the_nearest_cent() {
        assert_eq!(format_currency(0.999), "$1.00");
        assert_eq!(format_currency(0.004), "$0.00");
        assert_eq!(format_currency(12.345_6), "$12.35");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn never_groups_or_uses_exponents() {
        assert_eq!(format_currency(1234.5), "$1234.50");
        assert_eq!(format_currency(1e16), "$10000000000000000.00");
        assert_eq!(format_currency(-1e16), "-$10000000000000000.00");
    }

    #[test]
    fn sub_cent_amounts_keep_their_sign_in_the_feed() {
        assert_eq!(format_display_amount(-0.001), "+$0.00");
        assert_eq!(format_display_amount(0.004), "-$0.00");
        assert_eq!(format_display_amount(-0.999), "+$1.00");
    }

    #[test]
    fn income_gets_a_plus_sign() {
        assert_eq!(format_display_amount(-45.5), "+$45.50");
    }

    #[test]
    fn expenses_and_zero_get_a_minus_sign() {
        assert_eq!(format_display_amount(12.5), "-$12.50");
        assert_eq!(format_display_amount(0.0), "-$0.00");
    }

    #[test]
    fn date_heading_spells_out_weekday_and_month() {
        assert_eq!(
            format_date_heading(TransactionDate::Known(date!(2024 - 01 - 02))),
            "Tuesday, January 2"
        );
        assert_eq!(
            format_date_heading(TransactionDate::Known(date!(2023 - 12 - 25))),
            "Monday, December 25"
        );
    }

    #[test]
    fn unknown_dates_share_one_heading() {
        assert_eq!(format_date_heading(TransactionDate::Unknown), "Unknown Date");
    }
}
