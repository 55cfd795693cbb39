//! 계산 결과를 printf `%g`와 같은 일반 숫자 형식으로 표시한다.

/// 유효 숫자 자릿수 (`%g` 기본값)
const PRECISION: i32 = 6;

/// `%g` 형식으로 숫자를 문자열로 만든다.
///
/// 유효 숫자 6자리로 반올림하고 뒤쪽 0을 제거한다. 지수가 -4보다 작거나
/// 6 이상이면 `1e-05`, `1.23457e+06`처럼 지수 표기를 사용한다.
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0".into() } else { "0".into() };
    }

    // 반올림 후의 지수를 얻기 위해 먼저 지수 표기로 만든다.
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.abs())
    } else {
        let decimals = (PRECISION - 1 - exp) as usize;
        trim_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(format_general(1000.0), "1000");
        assert_eq!(format_general(0.001), "0.001");
        assert_eq!(format_general(0.0001), "0.0001");
        assert_eq!(format_general(100000.0), "100000");
        assert_eq!(format_general(2.5), "2.5");
        assert_eq!(format_general(-12.75), "-12.75");
        assert_eq!(format_general(0.0), "0");
    }

    #[test]
    fn rounds_to_six_significant_digits() {
        assert_eq!(format_general(1000.0000000000001), "1000");
        assert_eq!(format_general(0.1 + 0.2), "0.3");
        assert_eq!(format_general(3.14159265), "3.14159");
    }

    #[test]
    fn switches_to_exponent_form() {
        assert_eq!(format_general(0.00001), "1e-05");
        assert_eq!(format_general(1_000_000.0), "1e+06");
        assert_eq!(format_general(1_234_567.0), "1.23457e+06");
        assert_eq!(format_general(2.5e-9), "2.5e-09");
        assert_eq!(format_general(1e100), "1e+100");
    }

    #[test]
    fn rounding_can_bump_the_exponent() {
        assert_eq!(format_general(999_999.5), "1e+06");
        assert_eq!(format_general(0.000099999996), "0.0001");
    }
}
