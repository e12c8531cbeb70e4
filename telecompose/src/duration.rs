//! Parsing of compose duration strings such as `1h30m` or `45s`.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Unit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl Unit {
    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            's' => Some(Self::Seconds),
            'm' => Some(Self::Minutes),
            'h' => Some(Self::Hours),
            'd' => Some(Self::Days),
            'w' => Some(Self::Weeks),
            _ => None,
        }
    }

    const fn seconds(self) -> u64 {
        match self {
            Self::Seconds => 1,
            Self::Minutes => 60,
            Self::Hours => 60 * 60,
            Self::Days => 24 * 60 * 60,
            Self::Weeks => 7 * 24 * 60 * 60,
        }
    }
}

/// Converts a duration string to whole seconds.
///
/// The input is a run of `<digits><unit>` segments (`s`, `m`, `h`, `d`, `w`,
/// case-insensitive). A segment without a recognized unit letter counts as
/// seconds. Characters outside of segments are skipped, and input without any
/// digits yields zero.
#[must_use]
pub fn parse_duration_seconds(text: &str) -> u64 {
    let mut total = 0_u64;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        let Some(digit) = ch.to_digit(10) else {
            continue;
        };

        let mut value = u64::from(digit);
        while let Some(next) = chars.peek().and_then(|next| next.to_digit(10)) {
            value = value.saturating_mul(10).saturating_add(u64::from(next));
            let _digit = chars.next();
        }

        let unit = chars.peek().copied().and_then(Unit::from_letter);
        if unit.is_some() {
            let _unit = chars.next();
        }

        total = total.saturating_add(value.saturating_mul(unit.unwrap_or(Unit::Seconds).seconds()));
    }

    total
}
