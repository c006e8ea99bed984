use chrono::Duration;

/// Formats an elapsed duration as `1h 2m 3s`, dropping leading zero units.
#[must_use]
pub fn format_elapsed(value: Duration) -> String {
    let total_secs = value.num_seconds().max(0);
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_leading_zero_units() {
        assert_eq!(format_elapsed(Duration::seconds(7)), "7s");
        assert_eq!(format_elapsed(Duration::seconds(95)), "1m 35s");
        assert_eq!(format_elapsed(Duration::seconds(3_725)), "1h 2m 5s");
        assert_eq!(format_elapsed(Duration::seconds(-3)), "0s");
    }
}
