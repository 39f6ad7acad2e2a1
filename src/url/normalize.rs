const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// Ensures a user-supplied URL carries an explicit scheme
///
/// If the string does not start with `http://` or `https://`, `http://` is
/// prepended. Nothing else is touched: no trimming, no percent-encoding.
///
/// # Examples
///
/// ```
/// use favicon_scout::url::normalize;
///
/// assert_eq!(normalize("example.com"), "http://example.com");
/// assert_eq!(normalize("https://example.com"), "https://example.com");
/// ```
pub fn normalize(raw: &str) -> String {
    if is_valid(raw) {
        raw.to_string()
    } else {
        format!("{}{}", HTTP_PREFIX, raw)
    }
}

/// Returns true if the URL starts with one of the supported schemes
pub fn is_valid(url: &str) -> bool {
    url.starts_with(HTTP_PREFIX) || url.starts_with(HTTPS_PREFIX)
}

/// Computes the scheme+host(+port) prefix of a URL
///
/// The prefix ends right before the first `/` that follows the `//` scheme
/// delimiter. A URL with no path is its own base. This is plain string
/// slicing; query strings, fragments, userinfo and IPv6 brackets get no
/// special treatment.
///
/// # Examples
///
/// ```
/// use favicon_scout::url::base_url;
///
/// assert_eq!(base_url("https://example.com/path/page.html"), "https://example.com");
/// assert_eq!(base_url("https://example.com"), "https://example.com");
/// ```
pub fn base_url(url: &str) -> &str {
    // Without "//" the scan starts one byte in
    let host_start = url.find("//").map_or(1, |idx| idx + 2);

    match url.get(host_start..).and_then(|rest| rest.find('/')) {
        Some(path_start) => &url[..host_start + path_start],
        None => url,
    }
}
