//! Link targets: root-prefix rewriting and address resolution

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use url::Url;

use crate::error::{SidebarError, SidebarResult};

static ABSOLUTE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-z+]+:)?//").expect("absolute link pattern is valid"));

/// `#section` style targets pointing into the current page
pub fn is_fragment(href: &str) -> bool {
    href.starts_with('#')
}

/// Targets with a scheme (`https://`) or protocol-relative (`//host`)
pub fn is_absolute(href: &str) -> bool {
    ABSOLUTE_LINK.is_match(href)
}

/// Prefix a tree-relative target with the page's path to root.
///
/// Fragment-only and absolute targets are returned untouched.
pub fn rewrite_href<'a>(path_to_root: &str, href: &'a str) -> Cow<'a, str> {
    if is_fragment(href) || is_absolute(href) || path_to_root.is_empty() {
        Cow::Borrowed(href)
    } else {
        Cow::Owned(format!("{path_to_root}{href}"))
    }
}

/// Path to root must be empty (page at the book root) or a directory prefix
pub fn validate_path_to_root(path_to_root: &str) -> SidebarResult<()> {
    if path_to_root.is_empty() || path_to_root.ends_with('/') {
        Ok(())
    } else {
        Err(SidebarError::InvalidPathToRoot(path_to_root.to_string()))
    }
}

/// Address of the page the sidebar is attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAddress {
    raw: Url,
    normalized: String,
    index_page: String,
}

impl PageAddress {
    /// Parse the current location; directory addresses resolve to `index_page`.
    ///
    /// Returns `None` when the location is not an absolute URL.
    pub fn parse(location: &str, index_page: &str) -> Option<Self> {
        let raw = match Url::parse(location) {
            Ok(url) => url,
            Err(err) => {
                log::warn!("Ignoring unparseable page address '{}': {}", location, err);
                return None;
            }
        };

        let normalized = if raw.as_str().ends_with('/') {
            format!("{}{}", raw.as_str(), index_page)
        } else {
            raw.as_str().to_string()
        };

        Some(Self {
            raw,
            normalized,
            index_page: index_page.to_string(),
        })
    }

    /// Address as originally supplied by the host
    pub fn raw(&self) -> &str {
        self.raw.as_str()
    }

    /// Address with the index page appended to directory URLs
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// True when the page is an index page in some directory
    pub fn is_index(&self) -> bool {
        self.normalized
            .strip_suffix(self.index_page.as_str())
            .is_some_and(|prefix| prefix.ends_with('/'))
    }

    /// Absolute address of a (rewritten) link target as seen from this page
    pub fn resolve(&self, href: &str) -> Option<String> {
        self.raw.join(href).ok().map(String::from)
    }

    /// Whether a link target points at this page
    pub fn matches(&self, href: &str) -> bool {
        self.resolve(href).is_some_and(|resolved| resolved == self.normalized)
    }
}
