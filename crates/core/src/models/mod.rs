pub mod address;
pub mod admin_email;
pub mod article;
pub mod car;
pub mod catalog;
pub mod inquiry;
pub mod order;
pub mod stnk;
pub mod user;
pub mod voucher;

use serde::{Deserialize, Serialize};

/// Envelope used by every successful JSON response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Capitalises the first letter of every whitespace separated word and
/// lowercases the rest, so "toyota  AVANZA" becomes "Toyota Avanza".
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
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

/// Trims and title-cases a list of names, dropping blanks and duplicates
/// while keeping the first-seen order.
pub fn normalize_names(names: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = title_case(name);
        if !name.is_empty() && !normalized.contains(&name) {
            normalized.push(name);
        }
    }
    normalized
}
