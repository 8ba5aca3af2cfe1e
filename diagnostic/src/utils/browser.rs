use anyhow::{Context, Result};
use url::Url;

/// Only absolute http(s) links are handed to the desktop. The URL is passed through unchanged,
/// query string included.
pub fn launch_target(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Not a valid link: {}", raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("Refusing to open non-web link: {}", raw);
    }
    Ok(url)
}

/// Open `url` in the default browser. Does not wait for the browser.
pub fn open_in_browser(url: &str) -> Result<()> {
    let target = launch_target(url)?;
    log::info!("[PHASE: browser] Opening {}", target);

    open::that_detached(target.as_str())
        .with_context(|| format!("Failed to open browser for {}", target))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_with_ampersands_is_kept_whole() {
        let raw = "https://calendly.com/x/strategy-call?utm_source=a&utm_medium=b";
        let target = launch_target(raw).expect("valid link");
        assert_eq!(target.as_str(), raw);
        assert_eq!(target.query(), Some("utm_source=a&utm_medium=b"));
    }

    #[test]
    fn non_web_links_are_rejected_before_launch() {
        assert!(open_in_browser("file:///etc/passwd").is_err());
        assert!(open_in_browser("javascript:alert(1)").is_err());
        assert!(open_in_browser("not a link").is_err());
    }
}
