//! Conversion between chunk grid indices and fanout chunk keys.
//!
//! Each coordinate is written as a count token (the number of digit groups, minus one)
//! followed by its base-10 digits in groups of [FanoutConfig::decimal_len],
//! most significant group first and zero-padded.
//! Keys start with the root segment `c`.
//!
//! With `decimal_len` 3, `[1234567, 0]` is encoded as `c/2/001/234/567/0/000`.
use crate::configuration::FanoutConfig;

/// First segment of every chunk key.
pub const ROOT: &str = "c";

const SEPARATOR: char = '/';

/// Split a single coordinate into zero-padded digit groups, most significant first.
///
/// Zero is a single group of zeros.
pub fn fanout_coordinate(config: &FanoutConfig, coordinate: u64) -> Vec<String> {
    let width = config.decimal_len();
    let base = config.base();
    let mut groups = Vec::with_capacity(config.max_groups());
    let mut rest = coordinate;
    loop {
        groups.push(format!("{:0width$}", rest % base));
        rest /= base;
        if rest == 0 {
            break;
        }
    }
    groups.reverse();
    groups
}

/// Encode chunk grid indices as a fanout chunk key.
///
/// The empty (scalar) index encodes to the bare root `c`.
pub fn encode(config: &FanoutConfig, chunk_grid_indices: &[u64]) -> String {
    let mut key = String::from(ROOT);
    for &coordinate in chunk_grid_indices {
        let groups = fanout_coordinate(config, coordinate);
        key.push(SEPARATOR);
        key.push_str(&(groups.len() - 1).to_string());
        for group in groups {
            key.push(SEPARATOR);
            key.push_str(&group);
        }
    }
    key
}

/// Decode a fanout chunk key back into chunk grid indices.
///
/// Only keys which [encode] could have produced are accepted,
/// so a successful decode always re-encodes to the same key.
/// Non-canonical padding, such as a leading group of zeros (`c/1/000/001`), is rejected
/// rather than discarded, so a hand-written key in a store may fail to decode.
pub fn decode(config: &FanoutConfig, key: &str) -> crate::Result<Vec<u64>> {
    let mut segments = key.split(SEPARATOR);
    if segments.next() != Some(ROOT) {
        return Err(crate::Error::malformed_key(
            key,
            format!("expected root segment {ROOT:?}"),
        ));
    }

    let mut coordinates = Vec::new();
    while let Some(token) = segments.next() {
        let dim = coordinates.len();
        let n_groups = parse_count_token(config, key, token)? + 1;
        let mut coordinate: u64 = 0;
        for idx in 0..n_groups {
            let Some(segment) = segments.next() else {
                return Err(crate::Error::malformed_key(
                    key,
                    format!("dimension {dim} declares {n_groups} digit groups, found {idx}"),
                ));
            };
            let group = parse_digit_group(config, key, segment)?;
            if idx == 0 && n_groups > 1 && group == 0 {
                return Err(crate::Error::malformed_key(
                    key,
                    format!("dimension {dim} has a leading group of zeros"),
                ));
            }
            coordinate = coordinate
                .checked_mul(config.base())
                .and_then(|c| c.checked_add(group))
                .ok_or_else(|| {
                    crate::Error::malformed_key(key, format!("dimension {dim} overflows u64"))
                })?;
        }
        coordinates.push(coordinate);
    }
    log::trace!("decoded chunk key {key:?} to {coordinates:?}");
    Ok(coordinates)
}

/// Parse the number of groups (minus one) preceding a coordinate's digit groups.
fn parse_count_token(config: &FanoutConfig, key: &str, token: &str) -> crate::Result<usize> {
    let canonical = !token.is_empty()
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token == "0" || !token.starts_with('0'));
    let count = if canonical {
        token.parse::<usize>().ok()
    } else {
        None
    };
    match count {
        Some(n) if n < config.max_groups() => Ok(n),
        Some(n) => Err(crate::Error::malformed_key(
            key,
            format!(
                "count token {n} exceeds the {} groups a u64 can need",
                config.max_groups()
            ),
        )),
        None => Err(crate::Error::malformed_key(
            key,
            format!("invalid count token {token:?}"),
        )),
    }
}

fn parse_digit_group(config: &FanoutConfig, key: &str, segment: &str) -> crate::Result<u64> {
    if segment.len() != config.decimal_len() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(crate::Error::malformed_key(
            key,
            format!(
                "digit group {segment:?} is not {} decimal digits",
                config.decimal_len()
            ),
        ));
    }
    segment
        .parse()
        .map_err(|e| crate::Error::malformed_key(key, format!("digit group {segment:?}: {e}")))
}
