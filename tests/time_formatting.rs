use admin_utils::{format_date, format_pattern, format_relative, Padding, TimeValue};
use chrono::{DateTime, Local, TimeZone};

fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("test date is unambiguous")
}

#[test]
fn test_format_date_shape() {
    let shape = regex_lite_shape(&format_date(Some(&TimeValue::from(local(
        2024, 12, 31, 23, 59, 59,
    )))));
    assert!(shape, "formatted date must be YYYY-MM-DD HH:MM:SS");

    for value in [
        TimeValue::from("2024-01-02 03:04:05"),
        TimeValue::from("2024/01/02 03:04:05"),
        TimeValue::from("2024-01-02"),
        TimeValue::from(local(1999, 6, 1, 0, 0, 0).timestamp_millis()),
    ] {
        assert!(
            regex_lite_shape(&format_date(Some(&value))),
            "bad shape for {value:?}"
        );
    }
}

#[test]
fn test_format_date_empty_cases() {
    assert_eq!(format_date(None), "");
    assert_eq!(format_date(Some(&TimeValue::from(""))), "");
    assert_eq!(format_date(Some(&TimeValue::from("garbage"))), "");
}

#[test]
fn test_relative_bucket_boundaries() {
    let now = local(2024, 3, 7, 12, 0, 0);
    let at = |secs_ago: i64| TimeValue::Millis(now.timestamp_millis() - secs_ago * 1000);

    assert_eq!(format_relative(&at(29), None, now), "刚刚");
    assert_eq!(format_relative(&at(31), None, now), "1分钟前");
    assert_eq!(format_relative(&at(3599), None, now), "60分钟前");
    assert_eq!(format_relative(&at(3601), None, now), "2小时前");
    // Anywhere in the 1-2 day window renders exactly one day.
    assert_eq!(format_relative(&at(90_000), None, now), "1天前");
    assert_eq!(format_relative(&at(172_000), None, now), "1天前");
}

#[test]
fn test_relative_seconds_disambiguation() {
    let now = local(2024, 3, 7, 12, 0, 0);
    // A 10-digit stringified value reads as epoch seconds.
    let secs_value = (now.timestamp() - 120).to_string();
    assert_eq!(secs_value.len(), 10);
    assert_eq!(
        format_relative(&TimeValue::from(secs_value), None, now),
        "2分钟前"
    );
}

#[test]
fn test_relative_calendar_fallback_and_pattern() {
    let now = local(2024, 6, 15, 12, 0, 0);
    let then = local(2024, 6, 1, 8, 9, 0);
    let value = TimeValue::Millis(then.timestamp_millis());

    // No pattern: the unpadded short calendar form.
    assert_eq!(format_relative(&value, None, now), "6月1日8时9分");

    // With a pattern: token substitution, padded.
    assert_eq!(
        format_relative(&value, Some("{y}/{m}/{d} {h}:{i}:{s}"), now),
        "2024/06/01 08:09:00"
    );
}

#[test]
fn test_pattern_weekday_and_bare_padding() {
    // 2024-06-02 is a Sunday.
    let dt = local(2024, 6, 2, 7, 4, 0);
    assert_eq!(format_pattern(&dt, "{a}", Padding::Full), "日");
    assert_eq!(
        format_pattern(&dt, "{m}-{d} {h}:{i}", Padding::BareMonthDay),
        "6-2 07:04"
    );
}

/// Shape check for `YYYY-MM-DD HH:MM:SS`.
fn regex_lite_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 19 {
        return false;
    }
    for (i, b) in bytes.iter().enumerate() {
        let expected_digit = !matches!(i, 4 | 7 | 10 | 13 | 16);
        if expected_digit {
            if !b.is_ascii_digit() {
                return false;
            }
        } else {
            let sep = match i {
                4 | 7 => b'-',
                10 => b' ',
                _ => b':',
            };
            if *b != sep {
                return false;
            }
        }
    }
    true
}
