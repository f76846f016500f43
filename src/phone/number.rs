use lazy_static::lazy_static;
use regex::Regex;

/// E.164: leading `+`, country code starting 1-9, digits only, 8-15 digits
/// total.
pub fn is_valid_e164(number: &str) -> bool {
    lazy_static! {
        static ref E164_RE: Regex = Regex::new(r"^\+[1-9]\d{7,14}$").unwrap();
    }
    E164_RE.is_match(number)
}
