#[cfg(test)]
mod tests {
    use crate::booking::{BookingForm, Quote, SERVICE_FEE_RATE};
    use proptest::prelude::*;

    fn hhmm(minutes: u32) -> String {
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }

    proptest! {
        // The fee is always the fixed share of the court price
        #[test]
        fn test_quote_total_is_price_plus_fee(
            price_cents in 0u32..100_000,
            half_hours in 1u32..32,
        ) {
            let price = price_cents as f64 / 100.0;
            let hours = half_hours as f64 / 2.0;
            let quote = Quote::for_duration(price, hours);

            prop_assert!((quote.court_price - price * hours).abs() < 1e-6);
            prop_assert!((quote.service_fee - quote.court_price * SERVICE_FEE_RATE).abs() < 1e-6);
            prop_assert!((quote.total - (quote.court_price + quote.service_fee)).abs() < 1e-6);
            prop_assert!(quote.total >= quote.court_price);
        }

        // Validation accepts exactly the forms whose end is after their start
        #[test]
        fn test_validation_matches_duration_sign(
            start in 0u32..(24 * 60),
            end in 0u32..(24 * 60),
        ) {
            let form = BookingForm {
                court_id: Some(1),
                date: "2025-06-01".to_string(),
                start_time: hhmm(start),
                end_time: hhmm(end),
                notes: None,
            };
            let result = form.validate(Some("a@b.com"));

            if end > start {
                let reservation = result.unwrap();
                prop_assert!(reservation.duration_hours() > 0.0);
                prop_assert_eq!(reservation.duration_hours(), form.duration_hours().unwrap());
            } else {
                prop_assert!(result.is_err());
            }
        }
    }
}
