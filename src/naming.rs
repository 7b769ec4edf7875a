use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

pub const DOCX_EXTENSION: &str = "docx";

static UNSAFE_FILENAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap());

/// Authority of the URL as typed (host and any port, without credentials),
/// or the raw input when it does not parse as an absolute URL with a host.
pub fn domain_of(url: &str) -> String {
    let url = url.trim();
    let has_host = Url::parse(url)
        .map(|parsed| parsed.host_str().is_some())
        .unwrap_or(false);
    if !has_host {
        return url.to_string();
    }

    // `Url` would hand back a punycode host and drop default ports.
    url.split_once("://")
        .map(|(_, rest)| {
            let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
            authority.rsplit('@').next().unwrap_or(authority).to_string()
        })
        .filter(|domain| !domain.is_empty())
        .unwrap_or_else(|| url.to_string())
}

pub fn sanitize_file_stem(domain: &str) -> String {
    UNSAFE_FILENAME_RE.replace_all(domain, "_").into_owned()
}

pub fn file_name_for(url: &str) -> String {
    format!("{}.{}", sanitize_file_stem(&domain_of(url)), DOCX_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_is_the_host() {
        assert_eq!(domain_of("https://www.example.com/a/b?c=d"), "www.example.com");
    }

    #[test]
    fn explicit_port_is_kept() {
        assert_eq!(domain_of("http://localhost:8080/x"), "localhost:8080");
    }

    #[test]
    fn unicode_host_stays_as_typed() {
        assert_eq!(domain_of("https://bücher.de/katalog"), "bücher.de");
        assert_eq!(file_name_for("https://bücher.de/katalog"), "b_cher_de.docx");
    }

    #[test]
    fn default_port_is_kept_and_credentials_dropped() {
        assert_eq!(domain_of("https://example.com:443/"), "example.com:443");
        assert_eq!(domain_of("https://user:pw@example.com/x?y#z"), "example.com");
        assert_eq!(domain_of("https://example.com?q=a/b"), "example.com");
    }

    #[test]
    fn unparsable_input_is_its_own_domain() {
        assert_eq!(domain_of("example.com/page"), "example.com/page");
    }

    #[test]
    fn file_name_replaces_unsafe_characters() {
        assert_eq!(file_name_for("https://www.example.com/path"), "www_example_com.docx");
        assert_eq!(file_name_for("http://my-site_1.org:8080/"), "my-site_1_org_8080.docx");
    }

    #[test]
    fn every_unsafe_character_becomes_one_underscore() {
        assert_eq!(sanitize_file_stem("a.b/c d~é"), "a_b_c_d__");
    }
}
