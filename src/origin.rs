/// Reduces a remote URL to the host part used to match profiles.
///
/// Handles `https://`, `http://` and scp-like `git@host:path` remotes. Anything
/// else is cut at the first `/`. Never fails; malformed input yields whatever
/// substring survives.
pub fn normalize(raw_url: &str) -> &str {
    let url = raw_url.trim();

    let host = if let Some(rest) = url.strip_prefix("https://") {
        rest
    } else if let Some(rest) = url.strip_prefix("http://") {
        rest
    } else if let Some(rest) = url.strip_prefix("git@") {
        rest.split_once(':').map_or(rest, |(host, _)| host)
    } else {
        url
    };

    host.split_once('/').map_or(host, |(host, _)| host)
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn strips_https_scheme_and_path() {
        assert_eq!(normalize("https://github.com/u/r.git"), "github.com");
    }

    #[test]
    fn strips_http_scheme_and_path() {
        assert_eq!(normalize("http://x.org/a/b"), "x.org");
    }

    #[test]
    fn scp_like_remote() {
        assert_eq!(normalize("git@gitlab.com:u/r.git"), "gitlab.com");
    }

    #[test]
    fn trailing_newline_from_git_output() {
        assert_eq!(normalize("https://codeberg.org/me/repo\n"), "codeberg.org");
    }

    #[test]
    fn bare_host_passes_through() {
        assert_eq!(normalize("example.com"), "example.com");
    }

    #[test]
    fn unknown_scheme_is_best_effort() {
        // ssh:// is not special-cased, so everything before the first '/' remains
        assert_eq!(normalize("ssh://git@host.xz/repo"), "ssh:");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn port_is_kept_for_https() {
        assert_eq!(normalize("https://git.local:8443/team/repo.git"), "git.local:8443");
    }
}
