use crate::types::{PreviewError, REFRESH_PATH, Result};
use url::Url;

/// Converts the editor page URL into the preview socket endpoint.
///
/// Only the scheme changes (`http` → `ws`, `https` → `wss`); host and port are
/// kept and the path becomes `/refresh`. Query and fragment are dropped.
pub fn socket_endpoint(page_url: &str) -> Result<Url> {
    let mut url = Url::parse(page_url)?;

    let scheme = match url.scheme() {
        "http" => "ws",
        "https" => "wss",
        other => {
            return Err(PreviewError::Config(format!(
                "unsupported page scheme '{}', expected http or https",
                other
            )));
        }
    };

    url.set_scheme(scheme).map_err(|_| {
        PreviewError::Config(format!("cannot switch '{}' to '{}'", page_url, scheme))
    })?;
    url.set_path(REFRESH_PATH);
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// Origin of the editor page, used as the base for collaborator endpoints
pub fn page_origin(page_url: &str) -> Result<Url> {
    let mut url = Url::parse(page_url)?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(PreviewError::Config(format!(
            "unsupported page scheme '{}', expected http or https",
            url.scheme()
        )));
    }

    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}
