//! The expert-level calculator: a stateless widget that maps three counts to
//! a score and a named level.

const LANGUAGE_WEIGHT: i64 = 10;
const ALGORITHM_WEIGHT: i64 = 5;
const DATA_STRUCTURE_WEIGHT: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpertScore {
    pub score: i64,
    pub level: &'static str,
    pub emoji: &'static str,
}

impl ExpertScore {
    /// `languages * 10 + algorithms * 5 + data_structures * 7`, mapped to a
    /// level via descending threshold bands.
    pub fn compute(languages: i64, algorithms: i64, data_structures: i64) -> Self {
        let score = languages
            .saturating_mul(LANGUAGE_WEIGHT)
            .saturating_add(algorithms.saturating_mul(ALGORITHM_WEIGHT))
            .saturating_add(data_structures.saturating_mul(DATA_STRUCTURE_WEIGHT));

        let (level, emoji) = if score >= 200 {
            ("Programming Guru!", "\u{1F9D9}\u{200D}\u{2642}\u{FE0F}")
        } else if score >= 150 {
            ("Advanced Engineer", "\u{1F680}")
        } else if score >= 100 {
            ("Skilled Developer", "\u{1F4BB}")
        } else if score >= 50 {
            ("Apprentice Coder", "\u{1F527}")
        } else {
            ("Novice Programmer", "\u{1F331}")
        };

        Self {
            score,
            level,
            emoji,
        }
    }
}

/// Coerce a free-form text field to a count by taking the leading
/// signed-integer prefix ("7pts" is 7, "3.5" is 3). Absent or fully
/// non-numeric input is silently treated as zero; no error reaches the user.
pub fn coerce_count(input: &str) -> i64 {
    let trimmed = input.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let magnitude = rest
        .chars()
        .take_while(char::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(i64::from(digit as u8 - b'0'))
        });
    sign * magnitude
}
