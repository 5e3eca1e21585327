use formato::Formato;

pub fn nice_size(val: u64) -> String {
    let val = val as f64;
    if val < 5000.0 {
        format!("{}B", val.formato("#,##0"))
    } else if val < 500.0 * 1024.0 {
        format!("{}K", (val / 1024.).formato("#,##0.0"))
    } else if val < 50000.0 * 1024.0 * 1024.0 {
        format!("{}M", (val / 1024. / 1024.).formato("#,##0.0"))
    } else {
        format!("{}G", (val / 1024. / 1024. / 1024.).formato("#,##0.0"))
    }
}

pub fn nice_time(time_seconds: u64) -> String {
    let mut secs = time_seconds;
    if secs < 60 {
        format!("{time_seconds}s")
    } else if secs < 60 * 60 {
        let m = secs / 60;
        secs -= m * 60;
        format!("{m:02}m {secs:02}s")
    } else if secs < 60 * 60 * 24 {
        let h = secs / (60 * 60);
        secs -= h * 60 * 60;
        let m = secs / 60;
        secs -= m * 60;
        format!("{h}h {m:02}m {secs:02}s")
    } else {
        let d = secs / (60 * 60 * 24);
        secs -= d * 60 * 60 * 24;
        let h = secs / (60 * 60);
        secs -= h * 60 * 60;
        let m = secs / 60;
        secs -= m * 60;
        format!("{d}d {h:02}h {m:02}m {secs:02}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_picks_largest_unit() {
        assert_eq!(nice_time(0), "0s");
        assert_eq!(nice_time(59), "59s");
        assert_eq!(nice_time(61), "01m 01s");
        assert_eq!(nice_time(3600 + 5 * 60 + 9), "1h 05m 09s");
        assert_eq!(nice_time(2 * 86400 + 3 * 3600), "2d 03h 00m 00s");
    }

    #[test]
    fn size_switches_suffix() {
        assert!(nice_size(100).ends_with('B'));
        assert!(nice_size(10 * 1024).ends_with('K'));
        assert!(nice_size(10 * 1024 * 1024).ends_with('M'));
        assert!(nice_size(60000 * 1024 * 1024).ends_with('G'));
    }
}
