//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Badge class for a status wire name.
///
/// Usage in templates: `<span class="{{ booking.status|badge }}">`
#[askama::filter_fn]
pub fn badge(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(badge_class(&value.to_string()))
}

/// Turn a wire name into a heading: `house_types` becomes `House types`.
///
/// Usage in templates: `{{ user.role|humanize }}`
#[askama::filter_fn]
pub fn humanize(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(humanize_label(&value.to_string()))
}

fn badge_class(status: &str) -> String {
    let slug: String = status
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    format!("badge badge-{slug}")
}

/// Plain-Rust form of the [`humanize`] filter.
#[must_use]
pub fn humanize_label(raw: &str) -> String {
    let spaced = raw.replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |c| {
        c.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_class() {
        assert_eq!(badge_class("confirmed"), "badge badge-confirmed");
        assert_eq!(badge_class("Needs Review"), "badge badge-needs-review");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize_label("house_types"), "House types");
        assert_eq!(humanize_label("payout"), "Payout");
        assert_eq!(humanize_label(""), "");
    }
}
