//! Decoding of UN/LOCODE coordinate strings.
//!
//! The code list stores positions as `DDMMH DDDMMH`, e.g. `4049N 02918E`:
//! whole degrees and minutes followed by a hemisphere letter. Only an
//! uppercase `S` or `W` makes a value negative; any other letter reads as
//! north or east.

/// Parse a UN/LOCODE coordinate pair into decimal `(lat, lon)`.
///
/// Each half is decoded independently, so a malformed longitude does not
/// discard a valid latitude. Returns `(None, None)` unless the input has
/// exactly two whitespace-separated parts.
#[must_use]
pub fn parse_coordinates(coordinates: &str) -> (Option<f64>, Option<f64>) {
    let parts: Vec<&str> = coordinates.split_whitespace().collect();
    match parts.as_slice() {
        [lat, lon] => (parse_latitude(lat), parse_longitude(lon)),
        _ => (None, None),
    }
}

/// `DDMMN` / `DDMMS`
fn parse_latitude(raw: &str) -> Option<f64> {
    parse_component(raw, 2, 'S')
}

/// `DDDMME` / `DDDMMW`
fn parse_longitude(raw: &str) -> Option<f64> {
    parse_component(raw, 3, 'W')
}

fn parse_component(raw: &str, degree_digits: usize, negative: char) -> Option<f64> {
    let degrees = parse_digits(raw.get(..degree_digits)?)?;
    let minutes = parse_digits(raw.get(degree_digits..degree_digits + 2)?)?;
    let hemisphere = raw[degree_digits + 2..].chars().next()?;

    let value = f64::from(degrees) + f64::from(minutes) / 60.0;
    Some(if hemisphere == negative { -value } else { value })
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.chars().all(|c| c.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}
