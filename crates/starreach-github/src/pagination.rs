//! RFC 5988 `Link` header parsing for GitHub pagination.

/// Extract the `rel="next"` URL from a `Link` header value, if present.
///
/// GitHub sends headers of the form:
/// `<https://api.github.com/...?page=2>; rel="next", <...>; rel="last"`.
#[must_use]
pub fn next_link(header: &str) -> Option<String> {
    for part in header.split(',') {
        let part = part.trim();
        let Some((target, params)) = part.split_once(';') else {
            continue;
        };
        if params
            .split(';')
            .any(|p| matches!(p.trim(), "rel=\"next\"" | "rel=next"))
        {
            let url = target.trim().trim_start_matches('<').trim_end_matches('>');
            if !url.is_empty() {
                return Some(url.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_link_present() {
        let header = "<https://api.github.com/repositories/1/stargazers?page=2>; rel=\"next\", \
                      <https://api.github.com/repositories/1/stargazers?page=9>; rel=\"last\"";
        assert_eq!(
            next_link(header).as_deref(),
            Some("https://api.github.com/repositories/1/stargazers?page=2")
        );
    }

    #[test]
    fn test_next_link_absent_on_last_page() {
        let header = "<https://api.github.com/repositories/1/stargazers?page=1>; rel=\"first\", \
                      <https://api.github.com/repositories/1/stargazers?page=8>; rel=\"prev\"";
        assert_eq!(next_link(header), None);
    }

    #[test]
    fn test_next_link_unquoted_rel() {
        let header = "<https://example.com/page/2>; rel=next";
        assert_eq!(next_link(header).as_deref(), Some("https://example.com/page/2"));
    }

    #[test]
    fn test_next_link_malformed() {
        assert_eq!(next_link(""), None);
        assert_eq!(next_link("no links here"), None);
        assert_eq!(next_link("<>; rel=\"next\""), None);
    }
}
