//! Utilities for classifying WhatsApp JIDs and turning them into dialable
//! phone digits.

pub const USER_SUFFIX: &str = "@s.whatsapp.net";
pub const GROUP_SUFFIX: &str = "@g.us";
pub const LID_SUFFIX: &str = "@lid";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JidKind {
    /// Individual contact (phone-backed)
    User,
    /// Group conversation
    Group,
    /// Privacy-preserving linked identifier, no phone number attached
    Lid,
    Other,
}

pub fn classify(jid: &str) -> JidKind {
    if jid.ends_with(USER_SUFFIX) {
        JidKind::User
    } else if jid.ends_with(GROUP_SUFFIX) {
        JidKind::Group
    } else if jid.ends_with(LID_SUFFIX) {
        JidKind::Lid
    } else {
        JidKind::Other
    }
}

/// Normalize a JID into canonical dialing digits (country code + national
/// number, no `+`, no separators).
///
/// Only user JIDs qualify; groups, LIDs and anything else return `None`.
/// The local part is first run through a strict parse that validates it as
/// a plausible international number, applying `default_country`'s calling
/// code when the digits look national. If the strict parse rejects it,
/// every non-digit is stripped and whatever remains is returned, so that a
/// malformed stored identifier still yields something dialable.
pub fn normalize_jid(jid: &str, default_country: Option<&str>) -> Option<String> {
    let local = jid.strip_suffix(USER_SUFFIX)?;

    if let Some(digits) = strict_parse(local, default_country) {
        return Some(digits);
    }

    let digits: String = local.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() { None } else { Some(digits) }
}

fn strict_parse(local: &str, default_country: Option<&str>) -> Option<String> {
    let (explicit, rest) = match local.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, local),
    };

    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if explicit {
        return plausible(rest).then(|| rest.to_string());
    }

    // 11+ digits cannot be a bare national number; treat as already
    // carrying a country code so the hint never rewrites it.
    if (11..=15).contains(&rest.len()) {
        return Some(rest.to_string());
    }

    if let Some(code) = default_country.and_then(calling_code) {
        if rest.starts_with(code) && plausible(rest) {
            return Some(rest.to_string());
        }
        let candidate = format!("{code}{rest}");
        if plausible(&candidate) {
            return Some(candidate);
        }
    }

    plausible(rest).then(|| rest.to_string())
}

/// E.164 numbers run 8..=15 digits including the country code.
fn plausible(digits: &str) -> bool {
    (8..=15).contains(&digits.len())
}

/// Calling code for an ISO 3166-1 alpha-2 country code, for the common
/// cases. Unknown countries simply disable the hint.
pub fn calling_code(country: &str) -> Option<&'static str> {
    let code = match country.to_ascii_uppercase().as_str() {
        "US" | "CA" => "1",
        "BR" => "55",
        "GB" => "44",
        "DE" => "49",
        "FR" => "33",
        "ES" => "34",
        "IT" => "39",
        "PT" => "351",
        "MX" => "52",
        "AR" => "54",
        "IN" => "91",
        "AU" => "61",
        "JP" => "81",
        "CN" => "86",
        "ZA" => "27",
        "NL" => "31",
        "RU" => "7",
        "KR" => "82",
        "NG" => "234",
        _ => return None,
    };
    Some(code)
}

/// Group a digit string for display. Presentation only: stripping the
/// separators back out always reproduces the input digits.
/// Example: "15551234567" -> "1-555-123-4567"
pub fn format_digits(digits: &str) -> String {
    match digits.len() {
        7 => format!("{}-{}", &digits[0..3], &digits[3..]),
        10 => format!("{}-{}-{}", &digits[0..3], &digits[3..6], &digits[6..]),
        11 => format!(
            "{}-{}-{}-{}",
            &digits[0..1],
            &digits[1..4],
            &digits[4..7],
            &digits[7..]
        ),
        _ => digits.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("15551234567@s.whatsapp.net"), JidKind::User);
        assert_eq!(classify("1203050607-1600000000@g.us"), JidKind::Group);
        assert_eq!(classify("abc123@lid"), JidKind::Lid);
        assert_eq!(classify("status@broadcast"), JidKind::Other);
    }

    #[test]
    fn test_normalize_international_without_hint() {
        assert_eq!(
            normalize_jid("15551234567@s.whatsapp.net", None),
            Some("15551234567".to_string())
        );
    }

    #[test]
    fn test_normalize_hint_independent_when_country_code_present() {
        for hint in [None, Some("US"), Some("BR"), Some("GB")] {
            assert_eq!(
                normalize_jid("15551234567@s.whatsapp.net", hint),
                Some("15551234567".to_string())
            );
        }
    }

    #[test]
    fn test_normalize_national_with_hint() {
        assert_eq!(
            normalize_jid("5551234567@s.whatsapp.net", Some("US")),
            Some("15551234567".to_string())
        );
    }

    #[test]
    fn test_normalize_plus_prefixed() {
        assert_eq!(
            normalize_jid("+447911123456@s.whatsapp.net", None),
            Some("447911123456".to_string())
        );
    }

    #[test]
    fn test_normalize_group_is_never_a_phone() {
        assert_eq!(normalize_jid("1203050607-1600000000@g.us", None), None);
        assert_eq!(normalize_jid("1203050607-1600000000@g.us", Some("US")), None);
    }

    #[test]
    fn test_normalize_lid_is_never_a_phone() {
        assert_eq!(normalize_jid("98765@lid", Some("US")), None);
    }

    #[test]
    fn test_normalize_falls_back_to_digit_strip() {
        assert_eq!(
            normalize_jid("555.123.4567@s.whatsapp.net", None),
            Some("5551234567".to_string())
        );
    }

    #[test]
    fn test_normalize_empty_local_part() {
        assert_eq!(normalize_jid("@s.whatsapp.net", None), None);
        assert_eq!(normalize_jid("---@s.whatsapp.net", None), None);
    }

    #[test]
    fn test_format_digits_groups() {
        assert_eq!(format_digits("5551234"), "555-1234");
        assert_eq!(format_digits("5551234567"), "555-123-4567");
        assert_eq!(format_digits("15551234567"), "1-555-123-4567");
        assert_eq!(format_digits("447911123456"), "447911123456");
    }

    #[test]
    fn test_format_digits_round_trips() {
        for digits in ["5551234", "5551234567", "15551234567"] {
            let shown = format_digits(digits);
            let back: String = shown.chars().filter(|c| c.is_ascii_digit()).collect();
            assert_eq!(back, digits);
        }
    }
}
