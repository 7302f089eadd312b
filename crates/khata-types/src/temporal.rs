use chrono::{Local, NaiveDate};

/// Wall-clock time of day on the recording device, formatted `HH:MM`.
///
/// Display-only: ordering and balance computation use the business `date`
/// plus the entry id, never this string.
pub fn wall_clock_hm() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Today's calendar date on the recording device.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_clock_is_hh_mm() {
        let hm = wall_clock_hm();
        assert_eq!(hm.len(), 5);
        assert_eq!(hm.as_bytes()[2], b':');
        assert!(hm[..2].parse::<u8>().unwrap() < 24);
        assert!(hm[3..].parse::<u8>().unwrap() < 60);
    }

    #[test]
    fn today_is_a_valid_date() {
        let d = today();
        assert!(d.format("%Y-%m-%d").to_string().len() >= 10);
    }
}
