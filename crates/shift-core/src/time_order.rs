//! Chronological ordering of shift time-range labels.
//!
//! The reporting day logically starts at 06:00 and wraps past midnight, so
//! early-morning buckets belong to the tail of the previous day: an
//! "01:00-02:00" bucket sorts after "23:00-00:00".

/// Map a time-range label to its integer sort rank.
///
/// The hour is the integer before the first `:`. Hours below 6 are pushed
/// past the 6–23 block by adding 24. An empty or unparsable hour ranks 0.
///
/// Ranks are a total-order key; callers must use a stable sort so that
/// equal ranks keep their encounter order.
pub fn hour_rank(time_range: &str) -> u32 {
    let hour_text = time_range.split(':').next().unwrap_or("");
    let hour: u32 = match hour_text.trim().parse() {
        Ok(h) => h,
        Err(_) => return 0,
    };
    if hour < 6 {
        hour + 24
    } else {
        hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daytime_hours_rank_as_themselves() {
        assert_eq!(hour_rank("06:00-07:00"), 6);
        assert_eq!(hour_rank("14:00-15:00"), 14);
        assert_eq!(hour_rank("23:00-00:00"), 23);
    }

    #[test]
    fn test_early_morning_wraps_past_midnight() {
        assert_eq!(hour_rank("00:00-01:00"), 24);
        assert_eq!(hour_rank("05:00-06:00"), 29);
    }

    #[test]
    fn test_empty_label_ranks_zero() {
        assert_eq!(hour_rank(""), 0);
    }

    #[test]
    fn test_unparsable_hour_ranks_zero() {
        assert_eq!(hour_rank("noon-ish"), 0);
        assert_eq!(hour_rank(":30"), 0);
    }

    #[test]
    fn test_label_without_colon_uses_whole_string() {
        assert_eq!(hour_rank("14"), 14);
    }

    #[test]
    fn test_wrap_orders_early_morning_last() {
        let mut labels = vec!["08:00", "07:00", "23:00", "05:00"];
        labels.sort_by_key(|l| hour_rank(l));
        assert_eq!(labels, vec!["07:00", "08:00", "23:00", "05:00"]);
    }
}
