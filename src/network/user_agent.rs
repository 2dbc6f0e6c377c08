//! User agent and accept headers

/// User agent identifying this client, with an optional operator suffix
pub fn user_agent(suffix: Option<&str>) -> String {
    match suffix.map(str::trim).filter(|s| !s.is_empty()) {
        Some(suffix) => format!("brave-research/{} {}", crate::VERSION, suffix),
        None => format!("brave-research/{}", crate::VERSION),
    }
}

/// Standard accept header for JSON requests
pub fn accept_json() -> &'static str {
    "application/json"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent() {
        let ua = user_agent(None);
        assert!(ua.starts_with("brave-research/"));
        assert_eq!(user_agent(Some("  ")), ua);
        assert!(user_agent(Some("ops@example.com")).ends_with(" ops@example.com"));
    }
}
