//! This test suite compares conversions with the standard library at bit level.

use astro_scvt::{
    format_float, format_integer, from_signed, from_unsigned, parse_float, parse_float_exact, parse_hex_float,
    parse_integer, to_unsigned, FloatFormat, FloatStyle, FormatOptions, Radix,
};
use rand::random;

fn shortest<F: astro_scvt::Float>(v: F) -> String {
    let mut s = String::new();
    format_float(v, &FormatOptions::default(), &mut s);
    s
}

fn styled(v: f64, style: FloatStyle, p: u32) -> String {
    let mut s = String::new();
    format_float(v, &FormatOptions::default().with_float_style(style).with_precision(p), &mut s);
    s
}

/// Significant digits of a decimal number in text.
fn sig_digits(s: &str) -> String {
    let m = s.split(|c| c == 'e' || c == 'E').next().unwrap_or("");
    let d: String = m.chars().filter(|c| c.is_ascii_digit()).collect();
    d.trim_start_matches('0').trim_end_matches('0').to_owned()
}

/// Check the shortest digits `s` of `v` against the std `{:e}` output.
/// The lengths are equal; the digits differ only when `v` lies exactly halfway between
/// two shortest candidates, where std rounds up and the even candidate is taken here.
fn check_shortest_digits(s: &str, v: f64, std_text: &str) {
    let ours = sig_digits(s);
    let theirs = sig_digits(std_text);
    assert!(ours.len() == theirs.len(), "{} {}", s, std_text);
    if ours != theirs {
        let exact = sig_digits(&styled(v, FloatStyle::Scientific, 800));
        assert!(exact.len() == ours.len() + 1 && exact.ends_with('5'), "{} {}", s, std_text);
        let last = ours.as_bytes()[ours.len() - 1] - b'0';
        assert!(last % 2 == 0, "{} {}", s, std_text);
    }
}

fn random_f64() -> f64 {
    loop {
        let v = f64::from_bits(random::<u64>());
        if v.is_finite() {
            return v;
        }
    }
}

#[test]
fn shortest_round_trip_f64() {
    for _ in 0..100000 {
        let v = random_f64();
        let s = shortest(v);
        let (back, n) = parse_float::<f64>(s.as_bytes());
        assert!(n == s.len(), "{}", s);
        assert!(back.to_bits() == v.to_bits(), "{} {:e}", s, v);

        check_shortest_digits(&s, v, &format!("{:e}", v));
    }
}

#[test]
fn shortest_round_trip_f32() {
    for _ in 0..100000 {
        let v = f32::from_bits(random::<u32>());
        if !v.is_finite() {
            continue;
        }
        let s = shortest(v);
        let (back, n) = parse_float::<f32>(s.as_bytes());
        assert!(n == s.len(), "{}", s);
        assert!(back.to_bits() == v.to_bits(), "{} {:e}", s, v);
        check_shortest_digits(&s, v as f64, &format!("{:e}", v));
    }
}

#[test]
fn shortest_ties_to_even() {
    // exactly halfway between 277399765197484.12 and 277399765197484.13
    let v = 277399765197484.125f64;
    assert!(shortest(v) == "277399765197484.12");
    assert!(shortest(-v) == "-277399765197484.12");
    assert!(format!("{:e}", v) == "2.7739976519748413e14");
    check_shortest_digits(&shortest(v), v, &format!("{:e}", v));
    assert!(parse_float::<f64>(b"277399765197484.12").0 == v);

    // exactly halfway between 4002607.2 and 4002607.3
    let v = -4002607.25f32;
    assert!(shortest(v) == "-4002607.2");
    assert!(parse_float::<f32>(b"-4002607.2").0 == v);
    check_shortest_digits(&shortest(v), v as f64, &format!("{:e}", v));
}

#[test]
fn parse_against_std() {
    for _ in 0..50000 {
        let v = random_f64();
        // more digits than needed to round trip, so the rounding is nontrivial
        let s = format!("{:.*e}", (random::<u32>() % 25) as usize, v);
        let (ours, n) = parse_float::<f64>(s.as_bytes());
        assert!(n == s.len());
        assert!(ours.to_bits() == s.parse::<f64>().unwrap().to_bits(), "{}", s);

        let (ours, _) = parse_float::<f32>(s.as_bytes());
        assert!(ours.to_bits() == s.parse::<f32>().unwrap().to_bits(), "{}", s);
    }
}

#[test]
fn fixed_precision_against_std() {
    for _ in 0..20000 {
        let v = random_f64();
        let p = random::<u32>() % 30;

        let s = styled(v, FloatStyle::Scientific, p);
        let expected = format!("{:.*e}", p as usize, v);
        assert!(sig_digits(&s) == sig_digits(&expected), "{} {}", s, expected);
        let e_ours: i32 = s.split('e').nth(1).unwrap().parse().unwrap();
        let e_std: i32 = expected.split('e').nth(1).unwrap().parse().unwrap();
        assert!(e_ours == e_std, "{} {}", s, expected);

        if v.abs() < 1e30 {
            let s = styled(v, FloatStyle::Fixed, p);
            assert!(s == format!("{:.*}", p as usize, v), "{} {}", s, v);
        }
    }
}

#[test]
fn fixed_precision_is_monotonic() {
    for _ in 0..20000 {
        let v = random_f64().abs();
        let next = f64::from_bits(v.to_bits() + 1);
        if !next.is_finite() {
            continue;
        }
        let p = random::<u32>() % 20;
        for style in [FloatStyle::Fixed, FloatStyle::Scientific, FloatStyle::General] {
            let a: f64 = parse_float_exact(&styled(v, style, p)).unwrap();
            let b: f64 = parse_float_exact(&styled(next, style, p)).unwrap();
            assert!(a <= b, "{:e} {:?} {}", v, style, p);
        }
    }
}

#[test]
fn boundary_values() {
    assert!(shortest(0.0f64) == "0");
    assert!(shortest(-0.0f64) == "-0");
    assert!(shortest(f64::INFINITY) == "inf");
    assert!(shortest(f64::NEG_INFINITY) == "-inf");
    assert!(shortest(f64::NAN) == "nan");
    assert!(shortest(f64::MAX) == "1.7976931348623157e+308");
    assert!(shortest(f64::MIN_POSITIVE) == "2.2250738585072014e-308");
    assert!(shortest(5e-324f64) == "5e-324");
    assert!(shortest(f32::MAX) == "3.4028235e+38");
    assert!(shortest(1e-45f32) == "1e-45");

    // exact expansion of the smallest subnormal
    let s = styled(5e-324, FloatStyle::Fixed, 1074);
    assert!(s == format!("{:.1074}", 5e-324));
    assert!(sig_digits(&s).len() == 751);

    let s = styled(f64::MAX, FloatStyle::Fixed, 0);
    assert!(s == format!("{:.0}", f64::MAX));
    assert!(s.len() == 309);

    assert!(parse_float::<f64>(b"2.4703282292062327e-324").0 == 0.0);
    assert!(parse_float::<f64>(b"2.4703282292062328e-324").0 == 5e-324);
    assert!(parse_float::<f64>(b"1.7976931348623159e308").0 == f64::INFINITY);
    assert!(parse_float::<f64>(b"-1e99999999999").0 == f64::NEG_INFINITY);
}

#[test]
fn scenario() {
    let (v, n) = parse_float::<f64>(b"3.14159265358979");
    assert!(n == 16);
    assert!(v.to_bits() == "3.14159265358979".parse::<f64>().unwrap().to_bits());
    assert!(shortest(v) == "3.14159265358979");
}

#[test]
fn hex_round_trip() {
    let opts = FormatOptions::default().with_base(Radix::Hex);
    for _ in 0..20000 {
        let v = random_f64();
        let mut s = String::new();
        format_float(v, &opts, &mut s);
        let (b, n) = parse_hex_float(s.as_bytes(), &FloatFormat::F64);
        assert!(n == s.len() && b == v.to_bits(), "{}", s);
    }
}

#[test]
fn integers() {
    let mut s = String::new();
    format_integer(i64::MIN, &FormatOptions::default(), &mut s);
    assert!(s == "-9223372036854775808");
    assert!(parse_integer::<i64>(s.as_bytes(), Radix::Dec) == (i64::MIN, s.len()));

    assert!(to_unsigned(u64::MAX, Radix::Dec, false).as_bytes() == b"18446744073709551615");
    assert!(from_unsigned(b"18446744073709551616", Radix::Dec) == (u64::MAX, 20));
    assert!(from_signed(b"-9223372036854775809", Radix::Dec) == (i64::MIN, 20));
    assert!(parse_integer::<i16>(b"40000", Radix::Dec) == (i16::MAX, 5));
    assert!(parse_integer::<u32>(b"-5", Radix::Dec) == (0, 0));

    for v in i8::MIN..=i8::MAX {
        let mut s = String::new();
        format_integer(v, &FormatOptions::default(), &mut s);
        assert!(parse_integer::<i8>(s.as_bytes(), Radix::Dec) == (v, s.len()));
    }
    for v in 0..=u8::MAX {
        let mut s = String::new();
        format_integer(v, &FormatOptions::default().with_base(Radix::Bin), &mut s);
        assert!(parse_integer::<u8>(s.as_bytes(), Radix::Bin) == (v, s.len()));
    }
    for v in i16::MIN..=i16::MAX {
        let mut s = String::new();
        format_integer(v, &FormatOptions::default().with_base(Radix::Hex), &mut s);
        assert!(parse_integer::<i16>(s.as_bytes(), Radix::Hex) == (v, s.len()));
    }
    for _ in 0..10000 {
        let v: u64 = random();
        let mut s = String::new();
        format_integer(v, &FormatOptions::default().with_base(Radix::Oct), &mut s);
        assert!(s == format!("{:o}", v));
    }
}
