//! URL origin extraction and relative-link resolution.

/// Scheme, host and port of a storefront page, used to absolutize links.
///
/// `"https://shop.example/collections/all"` gives `"https://shop.example"`.
/// A URL the parser rejects is cut at the first `/` after `://`, or kept
/// whole when it has no `://`.
#[must_use]
pub fn extract_store_origin(page_url: &str) -> String {
    match reqwest::Url::parse(page_url) {
        Ok(url) => url.origin().ascii_serialization(),
        Err(err) => {
            tracing::warn!(page_url, error = %err, "unparseable storefront URL; cutting origin by hand");
            let Some(scheme_end) = page_url.find("://") else {
                return page_url.trim_end_matches('/').to_owned();
            };
            let host_start = scheme_end + 3;
            let host_end = page_url[host_start..]
                .find('/')
                .map_or(page_url.len(), |i| host_start + i);
            page_url[..host_end].to_owned()
        }
    }
}

/// Makes `href` absolute against `origin`.
///
/// Hrefs starting with `http` are returned unchanged and protocol-relative
/// `//host/...` hrefs get `https:`. Anything else is appended to the origin,
/// with a `/` inserted when the href lacks one.
#[must_use]
pub fn resolve_against_origin(href: &str, origin: &str) -> String {
    if href.starts_with("http") {
        href.to_owned()
    } else if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        format!("{origin}/{href}")
    }
}

/// Returns `true` for an absolute `http`/`https` URL with a host.
#[must_use]
pub fn is_valid_http_url(candidate: &str) -> bool {
    reqwest::Url::parse(candidate).is_ok_and(|u| {
        matches!(u.scheme(), "http" | "https") && u.host_str().is_some_and(|h| !h.is_empty())
    })
}
