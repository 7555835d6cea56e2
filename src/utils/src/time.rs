use chrono::format::StrftimeItems;
use chrono::NaiveDateTime;

pub fn unix_milli_to_time(unix_milli: i64) -> NaiveDateTime {
    let secs = unix_milli.div_euclid(1000);
    let millis = unix_milli.rem_euclid(1000);
    NaiveDateTime::from_timestamp_opt(secs, (millis * 1_000_000) as u32).unwrap()
}

pub fn time_format(dt: NaiveDateTime) -> String {
    let fmt = StrftimeItems::new("%Y-%m-%d %H:%M:%S%.3f");
    format!("{}", dt.format_with_items(fmt))
}
