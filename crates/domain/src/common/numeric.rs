//! Numeric boundary helpers.
//!
//! Every number that enters the rules engine from a host passes through one
//! of these helpers. Malformed input (NaN, infinities, negatives where a
//! count is expected, unparsable strings) collapses to zero instead of
//! producing an error.

/// Returns `value` when it is finite, otherwise `0.0`.
///
/// # Examples
///
/// ```
/// use manaweave_domain::common::finite_or_zero;
///
/// assert_eq!(finite_or_zero(12.5), 12.5);
/// assert_eq!(finite_or_zero(-3.0), -3.0);
/// assert_eq!(finite_or_zero(f64::NAN), 0.0);
/// assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
/// ```
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Returns `value` when it is finite and not negative, otherwise `0.0`.
///
/// # Examples
///
/// ```
/// use manaweave_domain::common::non_negative_or_zero;
///
/// assert_eq!(non_negative_or_zero(4.2), 4.2);
/// assert_eq!(non_negative_or_zero(-0.1), 0.0);
/// assert_eq!(non_negative_or_zero(f64::NEG_INFINITY), 0.0);
/// ```
pub fn non_negative_or_zero(value: f64) -> f64 {
    let value = finite_or_zero(value);
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Floors a host-supplied count to a whole number, clamping malformed input
/// to zero and huge input to `u32::MAX`.
///
/// # Examples
///
/// ```
/// use manaweave_domain::common::whole_or_zero;
///
/// assert_eq!(whole_or_zero(3.9), 3);
/// assert_eq!(whole_or_zero(-2.0), 0);
/// assert_eq!(whole_or_zero(f64::NAN), 0);
/// ```
pub fn whole_or_zero(value: f64) -> u32 {
    let value = non_negative_or_zero(value).floor();
    if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}

/// Parses a decimal number from text, defaulting to `0.0` when the text is
/// empty, unparsable or not finite.
///
/// # Examples
///
/// ```
/// use manaweave_domain::common::parse_or_zero;
///
/// assert_eq!(parse_or_zero(" 37 "), 37.0);
/// assert_eq!(parse_or_zero("1.25"), 1.25);
/// assert_eq!(parse_or_zero("abc"), 0.0);
/// assert_eq!(parse_or_zero("NaN"), 0.0);
/// ```
pub fn parse_or_zero(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .map(finite_or_zero)
        .unwrap_or(0.0)
}
