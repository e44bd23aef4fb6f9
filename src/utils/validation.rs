// src/utils/validation.rs

//! Pure input checks used by the conversation steps.

use std::sync::LazyLock;

use regex::Regex;

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 99;
pub const BIO_LIMIT: usize = 200;
pub const COUNTRY_LIMIT: usize = 60;
pub const LONG_TEXT_LIMIT: usize = 1000;
pub const RATE_LIMIT: usize = 50;
pub const SHORT_TEXT_LIMIT: usize = 100;

static PHONE_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d[\d\s-]{7,}$").expect("phone pattern is valid"));

static PUBLIC_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[DFC]_[0-9a-f]{8}$").expect("public id pattern is valid"));

/// A name is rejected when empty, when it looks like a handle, or when it looks like a phone number.
pub fn is_valid_name(name: &str) -> bool {
    if name.is_empty() || name.starts_with('@') {
        return false;
    }
    !PHONE_LIKE.is_match(name)
}

pub fn parse_age(text: &str) -> Option<u8> {
    let age = text.trim().parse::<i64>().ok()?;
    if (i64::from(MIN_AGE)..=i64::from(MAX_AGE)).contains(&age) {
        u8::try_from(age).ok()
    } else {
        None
    }
}

pub fn is_valid_age(text: &str) -> bool {
    parse_age(text).is_some()
}

pub fn is_valid_bio(bio: &str) -> bool {
    fits(bio, BIO_LIMIT)
}

/// Character count check, not bytes.
pub fn fits(text: &str, limit: usize) -> bool {
    text.chars().count() <= limit
}

/// Non-empty after trimming and within `limit` characters.
pub fn is_valid_text(text: &str, limit: usize) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && fits(trimmed, limit)
}

pub fn is_public_id(token: &str) -> bool {
    PUBLIC_ID.is_match(token)
}

/// Public identifier in `token`, which may still carry the backticks it was shown with.
pub fn parse_public_id(token: &str) -> Option<&str> {
    let id = token.trim().trim_matches('`');
    is_public_id(id).then_some(id)
}

/// Capitalizes each whitespace-separated word ("new  delhi" -> "New Delhi").
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
