//! Route access policy: every request path is Public, Protected or Denied.
//!
//! The table is static and read-only. A path that matches no entry is Denied.
//!
//! Pattern language (segments separated by `/`):
//! - literal segments match exactly
//! - `*` matches exactly one non-empty segment
//! - a trailing `**` matches zero or more segments

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessClass {
    Public,
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePolicyEntry {
    pub pattern: &'static str,
    pub class: AccessClass,
}

const fn public(pattern: &'static str) -> RoutePolicyEntry {
    RoutePolicyEntry {
        pattern,
        class: AccessClass::Public,
    }
}

const fn protected(pattern: &'static str) -> RoutePolicyEntry {
    RoutePolicyEntry {
        pattern,
        class: AccessClass::Protected,
    }
}

pub static DEFAULT_POLICY: &[RoutePolicyEntry] = &[
    // document type listing
    public("/api/v1/documents/types"),
    // probes
    public("/actuator/health"),
    public("/actuator/health/live"),
    public("/actuator/health/ready"),
    // API documentation
    public("/swagger-ui/**"),
    public("/v3/api-docs/**"),
    public("/v3/api-docs.yaml"),
    // document operations
    protected("/api/v1/documents/process"),
    protected("/api/v1/documents/batch-process"),
    protected("/api/v1/documents/status/**"),
];

#[derive(Debug, Clone)]
pub struct RoutePolicy {
    entries: &'static [RoutePolicyEntry],
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_POLICY)
    }
}

impl RoutePolicy {
    pub fn new(entries: &'static [RoutePolicyEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RoutePolicyEntry] {
        self.entries
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        if !is_canonical(path) {
            return RouteClass::Denied;
        }

        self.entries
            .iter()
            .find(|entry| pattern_matches(entry.pattern, path))
            .map(|entry| match entry.class {
                AccessClass::Public => RouteClass::Public,
                AccessClass::Protected => RouteClass::Protected,
            })
            .unwrap_or(RouteClass::Denied)
    }
}

// Rejects `//`, `/./`, `/../` and anything not rooted at `/`.
fn is_canonical(path: &str) -> bool {
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };
    rest.is_empty()
        || rest
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

pub fn pattern_matches(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.trim_start_matches('/').split('/').collect();
    let path: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    segments_match(&pattern, &path)
}

fn segments_match(pattern: &[&str], path: &[&str]) -> bool {
    match (pattern.split_first(), path.split_first()) {
        (Some((&"**", rest)), _) if rest.is_empty() => true,
        (Some((&"*", rest)), Some((segment, path_rest))) => {
            !segment.is_empty() && segments_match(rest, path_rest)
        }
        (Some((literal, rest)), Some((segment, path_rest))) => {
            literal == segment && segments_match(rest, path_rest)
        }
        (None, None) => true,
        _ => false,
    }
}
