// src/core/net.rs

// Blocking page fetch for `http(s)://` sources

use std::error::Error;

use crate::config::consts::USER_AGENT;

pub fn is_url(source: &str) -> bool {
    let lc = source.trim_start().to_ascii_lowercase();
    lc.starts_with("http://") || lc.starts_with("https://")
}

pub fn http_get(url: &str) -> Result<String, Box<dyn Error>> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()?;

    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(format!("HTTP error: {} {}", status, url).into());
    }
    Ok(resp.text()?)
}

#[cfg(test)]
mod tests {
    use super::is_url;

    #[test]
    fn url_detection() {
        assert!(is_url("https://example.com/guerra.html"));
        assert!(is_url("  HTTP://example.com"));
        assert!(!is_url("pages/guerra.html"));
        assert!(!is_url("C:\\pages\\guerra.html"));
    }
}
