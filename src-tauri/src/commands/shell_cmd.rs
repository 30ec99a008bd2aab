//! External URL Commands
//!
//! Opens links in the user's default browser or mail client.

use url::Url;

use super::results::ActionResult;

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Parse `raw` and accept only browser/mail schemes
pub fn validate_external_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("Invalid URL '{}': {}", raw, e))?;
    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(format!("Refusing to open '{}' URLs", url.scheme()));
    }
    Ok(url)
}

/// Open a URL outside the app
#[tauri::command]
pub async fn open_external_url(url: String) -> ActionResult {
    let opened = validate_external_url(&url)
        .and_then(|u| open::that(u.as_str()).map_err(|e| e.to_string()));
    match opened {
        Ok(()) => ActionResult::ok(),
        Err(e) => {
            log::error!("Error opening external URL {}: {}", url, e);
            ActionResult::failed(e)
        }
    }
}
