use anyhow::{Result, bail};

/// Validate a Kubernetes object name (DNS-1123 subdomain).
/// Rules: dot-separated labels of lowercase `[a-z0-9-]`, each starting and
/// ending with an alphanumeric, at most 253 chars overall.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("name must not be empty");
    }
    if name.len() > 253 {
        bail!("name '{}' exceeds 253 characters (got {})", name, name.len());
    }
    for label in name.split('.') {
        if label.is_empty() {
            bail!("name '{}' must not contain empty segments", name);
        }
        if label.starts_with('-') || label.ends_with('-') {
            bail!(
                "name '{}' must start and end each segment with a letter or digit",
                name
            );
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            bail!(
                "name '{}' must contain only lowercase letters, digits, '-' and '.'",
                name
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(validate_name("hello-rust").is_ok());
        assert!(validate_name("runtime-class-manager").is_ok());
        assert!(validate_name("app.v2").is_ok());
        assert!(validate_name("a").is_ok());
    }

    #[test]
    fn invalid_names() {
        assert!(validate_name("").is_err());
        assert!(validate_name("Hello").is_err());
        assert!(validate_name("my_app").is_err());
        assert!(validate_name("-leading").is_err());
        assert!(validate_name("app.-x").is_err());
        assert!(validate_name("a..b").is_err());
        assert!(validate_name("../etc").is_err());
        assert!(validate_name(&"a".repeat(254)).is_err());
    }
}
