//! Timestamp formats used across billing records.

use chrono::{Duration, Utc};

/// Current time as `YYYY-MM-DD HH:MM:SS`.
pub(crate) fn current_stamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// The next billing cycle date, 30 days out, as `YYYY-MM-DD`.
pub(crate) fn next_billing_cycle() -> String {
    (Utc::now() + Duration::days(30)).format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Test 1: Stamp shapes match the recorded formats ----
    #[test]
    fn stamp_shapes() {
        let stamp = current_stamp();
        assert_eq!(stamp.len(), 19);
        assert_eq!(stamp.matches('-').count(), 2);
        assert_eq!(stamp.matches(':').count(), 2);

        let cycle = next_billing_cycle();
        assert_eq!(cycle.len(), 10);
    }
}
