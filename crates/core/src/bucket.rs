//! Bucket name rules

use crate::error::{Error, Result};

/// Check `name` against S3 bucket naming rules.
///
/// Names are 3-63 characters of lowercase letters, digits, `-` and `.`,
/// start and end with a letter or digit, and contain no `..`.
pub fn validate_bucket_name(name: &str) -> Result<()> {
    if name.len() < 3 || name.len() > 63 {
        return Err(invalid(name, "must be between 3 and 63 characters"));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(invalid(
            name,
            "only lowercase letters, digits, '-' and '.' are allowed",
        ));
    }

    let edge_ok = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric());
    if !edge_ok(name.chars().next()) || !edge_ok(name.chars().last()) {
        return Err(invalid(name, "must start and end with a letter or digit"));
    }

    if name.contains("..") {
        return Err(invalid(name, "must not contain '..'"));
    }

    Ok(())
}

fn invalid(name: &str, reason: &str) -> Error {
    Error::BucketCreation(format!("invalid bucket name '{name}': {reason}"))
}
