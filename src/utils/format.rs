const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable byte count using binary multiples, capped at GB.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let exponent = ((bytes.ilog2() / 10) as usize).min(UNITS.len() - 1);
    let scaled = bytes as f64 / (1u64 << (10 * exponent)) as f64;
    format!("{:.2} {}", scaled, UNITS[exponent])
}

pub fn format_dimensions(width: u32, height: u32) -> String {
    format!("{} × {} px", width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_switch_units_at_1024() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1_048_575), "1024.00 KB");
        assert_eq!(format_size(2_621_440), "2.50 MB");
    }

    #[test]
    fn huge_sizes_stay_in_largest_unit() {
        assert_eq!(format_size(4 * 1024 * 1024 * 1024 * 1024), "4096.00 GB");
    }
}
