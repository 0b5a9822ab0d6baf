//! Account key derivation: `username|site`, under the configured case and
//! URL rules.

use std::borrow::Cow;
use std::fmt;

use url::Url;

use crate::config::DedupConfig;
use crate::row::Row;

/// Reduce a site value to `scheme://host`.
///
/// Values that do not start with `http` get `https://` prepended first. A
/// non-default port stays attached to the host. When the value still does
/// not parse, the trimmed, lowercased input is returned instead.
pub fn normalize_url(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let candidate = if raw.starts_with("http") {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(format!("https://{raw}"))
    };

    match Url::parse(&candidate) {
        Ok(url) => {
            let host = match (url.host_str(), url.port()) {
                (Some(host), Some(port)) => format!("{host}:{port}"),
                (Some(host), None) => host.to_string(),
                (None, _) => String::new(),
            };
            format!("{}://{}", url.scheme(), host)
        }
        Err(_) => raw.trim().to_lowercase(),
    }
}

/// Identity of a logical account inside one export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountKey(String);

impl AccountKey {
    pub fn for_row(row: &Row, config: &DedupConfig) -> Self {
        let username = row.username().unwrap_or("").trim();
        let username = if config.lowercase_usernames {
            Cow::Owned(username.to_lowercase())
        } else {
            Cow::Borrowed(username)
        };

        let site = row.site().unwrap_or("");
        let site = if config.normalize_url {
            Cow::Owned(normalize_url(site))
        } else {
            Cow::Borrowed(site.trim())
        };

        Self(format!("{username}|{site}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_path_query_fragment() {
        assert_eq!(normalize_url("https://x.com/login?next=/home#top"), "https://x.com");
        assert_eq!(normalize_url("http://Accounts.Example.COM/signin"), "http://accounts.example.com");
    }

    #[test]
    fn test_normalize_prepends_https() {
        assert_eq!(normalize_url("example.com/path"), "https://example.com");
        assert_eq!(normalize_url("www.example.com"), "https://www.example.com");
    }

    #[test]
    fn test_normalize_keeps_non_default_port() {
        assert_eq!(normalize_url("https://nas.local:5001/login"), "https://nas.local:5001");
        assert_eq!(normalize_url("https://x.com:443/"), "https://x.com");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn test_normalize_fallback_lowercases_raw() {
        // spaces are not valid in a host
        assert_eq!(normalize_url("  My Bank  "), "my bank");
        assert_eq!(normalize_url("http://exa mple.com"), "http://exa mple.com");
    }

    #[test]
    fn test_key_plain() {
        let row = Row::new()
            .with("username", " Alice ")
            .with("url", " https://x.com/login ");
        let key = AccountKey::for_row(&row, &DedupConfig::default());
        assert_eq!(key.as_str(), "Alice|https://x.com/login");
    }

    #[test]
    fn test_key_lowercase_and_normalize() {
        let row = Row::new()
            .with("username", "Alice")
            .with("url", "https://X.com/login");
        let config = DedupConfig::default()
            .with_lowercase_usernames(true)
            .with_normalize_url(true);
        assert_eq!(AccountKey::for_row(&row, &config).as_str(), "alice|https://x.com");
    }

    #[test]
    fn test_key_uses_name_when_url_absent() {
        let row = Row::new().with("username", "bob").with("name", "Router");
        let key = AccountKey::for_row(&row, &DedupConfig::default());
        assert_eq!(key.to_string(), "bob|Router");
    }

    #[test]
    fn test_key_missing_everything() {
        let key = AccountKey::for_row(&Row::new(), &DedupConfig::default());
        assert_eq!(key.as_str(), "|");
    }
}
