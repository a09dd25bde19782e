use crate::model::ParsedInstruction;
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const MINUTES_PER_HOUR: f64 = 60.0;
const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

static DURATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<minutes>[0-9]{1,5}\.?[0-9]{0,5})\s*(?:minutes|minute|min)\b|(?P<hours>[0-9]{1,5}\.?[0-9]{0,5})\s*(?:hours|hour)\b|(?P<days>[0-9]{1,5}\.?[0-9]{0,5})\s*(?:days|day)\b",
    )
    .unwrap()
});

/// Adds up every "N minutes", "N hours" and "N days" mentioned in an
/// instruction line. Unit words are matched case-sensitively.
pub fn parse_instruction(text: &str) -> ParsedInstruction {
    let minutes: f64 = DURATION_REGEX
        .captures_iter(text)
        .map(|captures| {
            group_value(&captures, "minutes")
                + group_value(&captures, "hours") * MINUTES_PER_HOUR
                + group_value(&captures, "days") * MINUTES_PER_DAY
        })
        .sum();

    debug!("instruction {text:?} -> {minutes} minutes");

    ParsedInstruction {
        raw: text.to_string(),
        minutes,
    }
}

fn group_value(captures: &Captures, name: &str) -> f64 {
    captures
        .name(name)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes() {
        let parsed = parse_instruction("Do something and wait 15 minutes");
        assert_eq!(parsed.raw, "Do something and wait 15 minutes");
        assert_eq!(parsed.minutes, 15.0);
    }

    #[test]
    fn test_hours() {
        assert_eq!(parse_instruction("Do something and wait 1 hour").minutes, 60.0);
    }

    #[test]
    fn test_days() {
        assert_eq!(parse_instruction("Do something and wait 2 days").minutes, 2880.0);
    }

    #[test]
    fn test_composite() {
        let parsed = parse_instruction("Do something and wait 1 minute and 1 hour and 1 day");
        assert_eq!(parsed.minutes, 1501.0);
    }

    #[test]
    fn test_abbreviation_and_decimals() {
        assert_eq!(parse_instruction("Bake for 25min").minutes, 25.0);
        assert_eq!(parse_instruction("Simmer 1.5 hours").minutes, 90.0);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(parse_instruction("Rest 10 Minutes").minutes, 0.0);
    }

    #[test]
    fn test_requires_word_boundary() {
        assert_eq!(parse_instruction("Wait 5 minutesss").minutes, 0.0);
        assert_eq!(parse_instruction("Add 2 daylilies").minutes, 0.0);
    }

    #[test]
    fn test_no_time() {
        assert_eq!(parse_instruction("Do something").minutes, 0.0);
        let parsed = parse_instruction("");
        assert_eq!(parsed.raw, "");
        assert_eq!(parsed.minutes, 0.0);
    }

    #[test]
    fn test_fractions_not_normalized() {
        let parsed = parse_instruction("Add ½ cup and stir for 2 minutes");
        assert_eq!(parsed.raw, "Add ½ cup and stir for 2 minutes");
        assert_eq!(parsed.minutes, 2.0);
    }
}
