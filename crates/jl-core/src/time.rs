//! Local-clock time model.
//!
//! # Design
//!
//! Flight data arrives as local wall-clock strings with no UTC offset, and
//! the engine owns no timezone database.  Every instant is therefore a
//! `chrono::NaiveDateTime` and every span is a signed minute count
//! ([`Minutes`]).
//!
//! Schedules are laid out on a single *home clock* (the first departure
//! airport's local time).  A [`ClockPair`] maps that clock to the final
//! destination's clock with a folded shift:
//!
//!   dest_time = home_time + shift        where shift ∈ (-12h, +12h]
//!
//! Only the clock-of-day is ever displayed, so folding never changes what a
//! traveller reads.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Timelike};

// ── Minutes ──────────────────────────────────────────────────────────────────

/// A signed span in whole minutes.
pub type Minutes = i64;

pub const MINUTES_PER_HOUR: Minutes = 60;
pub const MINUTES_PER_DAY: Minutes = 1_440;
pub const HALF_DAY: Minutes = 720;

/// Longest flight the engine will place: stated labels above this are
/// unparseable, inferred times are clamped to it.
pub const MAX_FLIGHT_MINUTES: Minutes = 48 * MINUTES_PER_HOUR;

/// Accepted naive timestamp layouts, tried in order.
const LOCAL_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a local wall-clock timestamp.
///
/// RFC 3339 strings with an offset are accepted too; the offset is dropped
/// and the wall-clock reading kept, since the rest of the engine never
/// mixes clocks from a single string.
pub fn parse_local(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
}

/// Signed minutes from `from` to `to`.
#[inline]
pub fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> Minutes {
    (to - from).num_minutes()
}

/// `t` moved by `minutes` (negative moves earlier), or `None` if the result
/// leaves the representable calendar.
#[inline]
pub fn checked_add_minutes(t: NaiveDateTime, minutes: Minutes) -> Option<NaiveDateTime> {
    TimeDelta::try_minutes(minutes).and_then(|delta| t.checked_add_signed(delta))
}

/// `t` moved by `minutes`, saturating at the ends of the calendar.
#[inline]
pub fn add_minutes(t: NaiveDateTime, minutes: Minutes) -> NaiveDateTime {
    checked_add_minutes(t, minutes).unwrap_or(if minutes < 0 { NaiveDateTime::MIN } else { NaiveDateTime::MAX })
}

/// Fold a clock difference into (-720, +720].
///
/// A -12 h difference and a +12 h difference describe the same clock, and
/// the engine reads it as +12 h (destination ahead).
pub fn fold_minutes(m: Minutes) -> Minutes {
    let r = m.rem_euclid(MINUTES_PER_DAY);
    if r > HALF_DAY { r - MINUTES_PER_DAY } else { r }
}

/// Minutes since local midnight.
#[inline]
pub fn clock_of_day(t: NaiveDateTime) -> Minutes {
    t.hour() as Minutes * MINUTES_PER_HOUR + t.minute() as Minutes
}

/// `HH:MM`.
pub fn format_clock(t: NaiveDateTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// `true` if the clock reading of `t` falls in `[start, end)` minutes of the
/// day.  Windows that wrap midnight (`start > end`) are supported.
pub fn within_clock_window(t: NaiveDateTime, start: Minutes, end: Minutes) -> bool {
    let c = clock_of_day(t);
    if start <= end {
        c >= start && c < end
    } else {
        c >= start || c < end
    }
}

/// Parse a free-text flight duration such as `7h 30m`, `7 hr 30 min`,
/// `7:30`, `450m`, or ISO-8601 `PT7H30M`.
///
/// Returns `None` for anything unrecognised, non-positive, or longer than
/// [`MAX_FLIGHT_MINUTES`].
pub fn parse_duration_label(label: &str) -> Option<Minutes> {
    let s = label.trim().to_ascii_lowercase();
    if s.is_empty() {
        return None;
    }

    if let Some((h, m)) = s.split_once(':') {
        let h: Minutes = h.trim().parse().ok()?;
        let m: Minutes = m.trim().parse().ok()?;
        if !(0..60).contains(&m) {
            return None;
        }
        let total = h.checked_mul(MINUTES_PER_HOUR)?.checked_add(m)?;
        return (1..=MAX_FLIGHT_MINUTES).contains(&total).then_some(total);
    }

    let body = s.strip_prefix("pt").unwrap_or(&s);
    let mut total: Minutes = 0;
    let mut digits = String::new();
    let mut gap_after_digits = false;
    let mut saw_unit = false;
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            if gap_after_digits {
                // "7 30" has two numbers and no unit between them.
                return None;
            }
            digits.push(c);
        } else if c.is_whitespace() {
            gap_after_digits = !digits.is_empty();
        } else if c.is_ascii_alphabetic() {
            let mut unit = String::from(c);
            while let Some(&n) = chars.peek() {
                if !n.is_ascii_alphabetic() {
                    break;
                }
                unit.push(n);
                chars.next();
            }
            let value: Minutes = digits.parse().ok()?;
            digits.clear();
            gap_after_digits = false;
            let minutes = match unit.as_str() {
                "h" | "hr" | "hrs" | "hour" | "hours" => value.checked_mul(MINUTES_PER_HOUR)?,
                "m" | "min" | "mins" | "minute" | "minutes" => value,
                _ => return None,
            };
            total = total.checked_add(minutes)?;
            saw_unit = true;
        } else {
            return None;
        }
    }

    if !digits.is_empty() || !saw_unit {
        return None;
    }
    (1..=MAX_FLIGHT_MINUTES).contains(&total).then_some(total)
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// Net direction of the circadian shift.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Destination clock ahead: the body clock must advance.
    #[cfg_attr(feature = "serde", serde(rename = "EAST"))]
    East,
    /// Destination clock behind: the body clock must delay.
    #[cfg_attr(feature = "serde", serde(rename = "WEST"))]
    West,
    /// No meaningful shift.
    #[cfg_attr(feature = "serde", serde(rename = "NORTH_SOUTH"))]
    NorthSouth,
}

impl Direction {
    /// Classify a folded shift.  `|shift| <= threshold` is `NorthSouth`.
    pub fn from_shift(shift: Minutes, threshold: Minutes) -> Direction {
        if shift.abs() <= threshold {
            Direction::NorthSouth
        } else if shift > 0 {
            Direction::East
        } else {
            Direction::West
        }
    }

    /// `+1` for east, `-1` for west, `0` otherwise.
    #[inline]
    pub fn sign(self) -> Minutes {
        match self {
            Direction::East => 1,
            Direction::West => -1,
            Direction::NorthSouth => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::East => "EAST",
            Direction::West => "WEST",
            Direction::NorthSouth => "NORTH_SOUTH",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ClockPair ─────────────────────────────────────────────────────────────────

/// The two clocks an event time is displayed against.
///
/// Cheap to clone; one per plan.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ClockPair {
    /// Label of the home clock, e.g. `JFK`.
    pub origin: String,
    /// Label of the destination clock, e.g. `SIN`.
    pub destination: String,
    /// Folded destination-minus-home offset.
    pub shift: Minutes,
}

impl ClockPair {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, shift: Minutes) -> Self {
        Self {
            origin:      origin.into(),
            destination: destination.into(),
            shift:       fold_minutes(shift),
        }
    }

    /// Home-clock instant read on the destination clock.
    #[inline]
    pub fn to_destination(&self, home: NaiveDateTime) -> NaiveDateTime {
        add_minutes(home, self.shift)
    }

    /// Destination-clock instant read on the home clock.
    #[inline]
    pub fn to_home(&self, dest: NaiveDateTime) -> NaiveDateTime {
        add_minutes(dest, -self.shift)
    }

    /// `true` when both clocks read the same, so one is enough.
    #[inline]
    pub fn is_single_clock(&self) -> bool {
        self.shift == 0
    }

    /// `HH:MM (ORIG) / HH:MM (DEST)`, or `HH:MM (ORIG)` for a single clock.
    pub fn render(&self, home: NaiveDateTime) -> String {
        if self.is_single_clock() {
            return format!("{} ({})", format_clock(home), self.origin);
        }
        format!(
            "{} ({}) / {} ({})",
            format_clock(home),
            self.origin,
            format_clock(self.to_destination(home)),
            self.destination,
        )
    }

    /// Like [`render`](Self::render) but for a `start-end` window.
    pub fn render_window(&self, start: NaiveDateTime, end: Option<NaiveDateTime>) -> String {
        let Some(end) = end.filter(|e| *e > start) else {
            return self.render(start);
        };
        let home = format!("{}-{}", format_clock(start), format_clock(end));
        if self.is_single_clock() {
            return format!("{home} ({})", self.origin);
        }
        let dest = format!(
            "{}-{}",
            format_clock(self.to_destination(start)),
            format_clock(self.to_destination(end)),
        );
        format!("{home} ({}) / {dest} ({})", self.origin, self.destination)
    }
}
