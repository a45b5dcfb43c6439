// Number parsing, summary statistics and display formatting.
//
// The statistics follow the usual dataframe conventions: an empty input has
// no mean, median, extreme or spread, so those come back as `NaN` rather
// than a made-up zero.
use num_format::{Locale, ToFormattedString};

/// Parse a CSV cell into `f64`, tolerating thousands separators and padding.
///
/// Returns `None` for blanks, text, or anything else that is not a number.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

pub fn mean(v: &[f64]) -> f64 {
    if v.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

pub fn median(mut v: Vec<f64>) -> f64 {
    if v.is_empty() {
        return f64::NAN;
    }
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = v.len() / 2;
    if v.len() % 2 == 1 {
        v[mid]
    } else {
        (v[mid - 1] + v[mid]) / 2.0
    }
}

/// Sample standard deviation (divisor `n - 1`); undefined below two values.
pub fn std_dev(v: &[f64]) -> f64 {
    if v.len() < 2 {
        return f64::NAN;
    }
    let m = mean(v);
    let ss: f64 = v.iter().map(|x| (x - m).powi(2)).sum();
    (ss / (v.len() - 1) as f64).sqrt()
}

pub fn max(v: impl IntoIterator<Item = f64>) -> f64 {
    v.into_iter().fold(f64::NAN, f64::max)
}

pub fn min(v: impl IntoIterator<Item = f64>) -> f64 {
    v.into_iter().fold(f64::NAN, f64::min)
}

pub fn format_number(n: f64, decimals: usize) -> String {
    if !n.is_finite() {
        return "-".to_string();
    }
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // `num-format` inserts the separators into the integer portion.
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_separated_numbers() {
        assert_eq!(parse_f64_safe(Some(" 12,345 ")), Some(12345.0));
        assert_eq!(parse_f64_safe(Some("1.5")), Some(1.5));
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(Some("n/a")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn central_tendency() {
        assert_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
        assert_eq!(median(vec![5.0, 1.0, 3.0]), 3.0);
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), 2.5);
        assert!(mean(&[]).is_nan());
        assert!(median(Vec::new()).is_nan());
    }

    #[test]
    fn sample_standard_deviation() {
        let sd = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((sd - 2.138089935).abs() < 1e-6);
        assert!(std_dev(&[3.0]).is_nan());
        assert_eq!(std_dev(&[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn extremes_ignore_nothing_but_empty() {
        assert_eq!(max([1.0, -3.0, 2.0]), 2.0);
        assert_eq!(min([1.0, -3.0, 2.0]), -3.0);
        assert!(min(std::iter::empty()).is_nan());
    }

    #[test]
    fn formatting() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-1500.0, 0), "-1,500");
        assert_eq!(format_number(f64::NAN, 2), "-");
        assert_eq!(format_int(9855), "9,855");
    }
}
