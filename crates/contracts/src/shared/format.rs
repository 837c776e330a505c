//! Chilean number formatting: `.` groups thousands, amounts are whole pesos

/// `1234567` → `"1.234.567"`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `1290` → `"$1.290"`
pub fn format_clp(amount: u64) -> String {
    format!("${}", group_thousands(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1.000");
        assert_eq!(group_thousands(1234567), "1.234.567");
        assert_eq!(group_thousands(1234567890), "1.234.567.890");
    }

    #[test]
    fn test_format_clp() {
        assert_eq!(format_clp(1290), "$1.290");
        assert_eq!(format_clp(0), "$0");
    }
}
