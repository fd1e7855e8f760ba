//! Protobuf-JSON duration strings (`"1.5s"`, `"0.000120s"`).

use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
use std::time::Duration;

pub(crate) fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => s.serialize_str(&format!("{}s", d.as_secs_f64())),
        None => s.serialize_none(),
    }
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    raw.map(|s| parse(&s).map_err(D::Error::custom))
        .transpose()
}

pub(crate) fn parse(raw: &str) -> Result<Duration, String> {
    let secs = raw
        .strip_suffix('s')
        .ok_or_else(|| format!("duration '{}' must end in 's'", raw))?;
    let (whole, fraction) = secs.split_once('.').unwrap_or((secs, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) || fraction.len() > 9 {
        return Err(format!("duration '{}' is not a number of seconds", raw));
    }

    let seconds: u64 = whole
        .parse()
        .map_err(|_| format!("duration '{}' is out of range", raw))?;
    let nanos = if fraction.is_empty() {
        0
    } else {
        format!("{:0<9}", fraction)
            .parse::<u32>()
            .map_err(|_| format!("duration '{}' is not a number of seconds", raw))?
    };
    Ok(Duration::new(seconds, nanos))
}
