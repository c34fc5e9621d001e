//! Content URL resolution against a homeserver.

use murmur_core::audio::MediaResolver;

const CONTENT_SCHEME: &str = "mxc://";
const DOWNLOAD_PATH: &str = "_matrix/media/v3/download";

/// Resolves `mxc://server/media` URLs through a homeserver's download API.
#[derive(Debug, Clone)]
pub struct HomeserverMedia {
    base_url: String,
}

impl HomeserverMedia {
    /// Resolver for the homeserver at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}

impl MediaResolver for HomeserverMedia {
    fn http_url(&self, content_url: &str) -> Option<String> {
        let rest = content_url.strip_prefix(CONTENT_SCHEME)?;
        let (server, media_id) = rest.split_once('/')?;
        if server.is_empty() || media_id.is_empty() {
            return None;
        }
        Some(format!("{}/{DOWNLOAD_PATH}/{server}/{media_id}", self.base_url))
    }
}
