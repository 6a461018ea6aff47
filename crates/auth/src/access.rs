//! Ordered access rules: (method, path pattern) → requirement.
//!
//! Rules are evaluated top to bottom and the first match wins. A request that
//! matches no rule must be authenticated.

use core::str::FromStr;

use crate::authorize::Requirement;

/// HTTP request method, as far as the rule table cares.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
    Connect,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
        }
    }
}

impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "HEAD" => Ok(Method::Head),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "OPTIONS" => Ok(Method::Options),
            "TRACE" => Ok(Method::Trace),
            "CONNECT" => Ok(Method::Connect),
            other => Err(format!("unsupported method '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `*`: exactly one segment.
    Single,
    /// `**`: zero or more segments.
    Multi,
}

/// Ant-style path pattern (`/admin/**`, `/Products/*`, `/guest`).
///
/// Literal segments compare case-sensitively. Empty segments are ignored on
/// both sides, so `/guest/` matches `/guest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn new(raw: &str) -> Self {
        let segments = split(raw)
            .map(|s| match s {
                "*" => Segment::Single,
                "**" => Segment::Multi,
                lit => Segment::Literal(lit.to_string()),
            })
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = split(path).collect();
        match_segments(&self.segments, &parts)
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((Segment::Multi, rest)) => {
            // Try every possible split point for `**`, shortest first.
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((Segment::Single, rest)) => !path.is_empty() && match_segments(rest, &path[1..]),
        Some((Segment::Literal(lit), rest)) => {
            path.first().is_some_and(|p| p == lit) && match_segments(rest, &path[1..])
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    pub method: Method,
    pub pattern: PathPattern,
    pub requirement: Requirement,
}

impl AccessRule {
    pub fn new(method: Method, pattern: &str, requirement: Requirement) -> Self {
        Self {
            method,
            pattern: PathPattern::new(pattern),
            requirement,
        }
    }

    pub fn matches(&self, method: Method, path: &str) -> bool {
        self.method == method && self.pattern.matches(path)
    }
}

/// Immutable, ordered rule list.
#[derive(Debug, Clone)]
pub struct AccessRules {
    rules: Vec<AccessRule>,
    fallback: Requirement,
}

impl AccessRules {
    pub fn builder() -> AccessRulesBuilder {
        AccessRulesBuilder::default()
    }

    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }

    /// Requirement applied when no rule matches.
    pub fn fallback(&self) -> &Requirement {
        &self.fallback
    }

    /// Index and rule of the first match, if any.
    pub fn first_match(&self, method: Method, path: &str) -> Option<(usize, &AccessRule)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(method, path))
    }

    /// Requirement for a request: first matching rule, else authenticated.
    pub fn evaluate(&self, method: Method, path: &str) -> &Requirement {
        self.first_match(method, path)
            .map(|(_, rule)| &rule.requirement)
            .unwrap_or(&self.fallback)
    }
}

/// Declarative builder mirroring a `requestMatchers(..)` chain.
#[derive(Debug, Default)]
pub struct AccessRulesBuilder {
    rules: Vec<AccessRule>,
}

impl AccessRulesBuilder {
    pub fn rule(mut self, method: Method, pattern: &str, requirement: Requirement) -> Self {
        self.rules.push(AccessRule::new(method, pattern, requirement));
        self
    }

    /// Close the chain; anything unmatched requires authentication.
    pub fn build(self) -> AccessRules {
        AccessRules {
            rules: self.rules,
            fallback: Requirement::Authenticated,
        }
    }
}

/// The service's rule table, in declaration order.
pub fn default_rules() -> AccessRules {
    AccessRules::builder()
        .rule(Method::Get, "/health", Requirement::PermitAll)
        .rule(Method::Get, "/getEmail", Requirement::Authenticated)
        .rule(Method::Get, "/admin/**", Requirement::has_authority("ROLE_ADMIN"))
        .rule(Method::Get, "/user/**", Requirement::has_authority("ROLE_USER"))
        .rule(Method::Get, "/guest", Requirement::PermitAll)
        .rule(Method::Post, "/register", Requirement::PermitAll)
        .rule(Method::Put, "/edit", Requirement::has_any_role(&["ROLE_ADMIN", "ROLE_USER"]))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_patterns_match_exactly() {
        let p = PathPattern::new("/guest");
        assert!(p.matches("/guest"));
        assert!(p.matches("/guest/"));
        assert!(!p.matches("/guests"));
        assert!(!p.matches("/guest/x"));
        assert!(!p.matches("/Guest"));
    }

    #[test]
    fn double_star_matches_zero_or_more_segments() {
        let p = PathPattern::new("/admin/**");
        assert!(p.matches("/admin"));
        assert!(p.matches("/admin/home"));
        assert!(p.matches("/admin/a/b/c"));
        assert!(!p.matches("/administrator"));
        assert!(!p.matches("/user/admin"));
    }

    #[test]
    fn single_star_matches_one_segment() {
        let p = PathPattern::new("/Products/*");
        assert!(p.matches("/Products/apple"));
        assert!(!p.matches("/Products"));
        assert!(!p.matches("/Products/a/b"));
    }

    #[test]
    fn double_star_in_the_middle() {
        let p = PathPattern::new("/a/**/z");
        assert!(p.matches("/a/z"));
        assert!(p.matches("/a/b/c/z"));
        assert!(!p.matches("/a/b/c"));
    }

    #[test]
    fn method_parsing_is_case_sensitive() {
        assert_eq!("PUT".parse::<Method>(), Ok(Method::Put));
        assert!("put".parse::<Method>().is_err());
    }

    #[test]
    fn first_match_wins() {
        let rules = AccessRules::builder()
            .rule(Method::Get, "/admin/public", Requirement::PermitAll)
            .rule(Method::Get, "/admin/**", Requirement::has_authority("ROLE_ADMIN"))
            .build();

        assert_eq!(rules.evaluate(Method::Get, "/admin/public"), &Requirement::PermitAll);
        assert_eq!(
            rules.evaluate(Method::Get, "/admin/home"),
            &Requirement::has_authority("ROLE_ADMIN")
        );
    }

    #[test]
    fn declaration_order_shadows_later_rules() {
        let rules = AccessRules::builder()
            .rule(Method::Get, "/admin/**", Requirement::has_authority("ROLE_ADMIN"))
            .rule(Method::Get, "/admin/public", Requirement::PermitAll)
            .build();

        assert_eq!(
            rules.evaluate(Method::Get, "/admin/public"),
            &Requirement::has_authority("ROLE_ADMIN")
        );
    }

    #[test]
    fn unmatched_requests_require_authentication() {
        let rules = default_rules();
        assert_eq!(rules.evaluate(Method::Get, "/"), &Requirement::Authenticated);
        assert_eq!(rules.evaluate(Method::Post, "/Products"), &Requirement::Authenticated);
        assert_eq!(rules.evaluate(Method::Get, "/nowhere"), &Requirement::Authenticated);
    }

    #[test]
    fn method_is_part_of_the_match() {
        let rules = default_rules();
        assert_eq!(rules.evaluate(Method::Get, "/guest"), &Requirement::PermitAll);
        // POST /guest is not covered by the GET rule.
        assert_eq!(rules.evaluate(Method::Post, "/guest"), &Requirement::Authenticated);
        assert_eq!(rules.evaluate(Method::Get, "/register"), &Requirement::Authenticated);
    }

    #[test]
    fn default_table_matches_the_documented_endpoints() {
        let rules = default_rules();
        assert_eq!(rules.evaluate(Method::Get, "/getEmail"), &Requirement::Authenticated);
        assert_eq!(
            rules.evaluate(Method::Get, "/admin/home"),
            &Requirement::has_authority("ROLE_ADMIN")
        );
        assert_eq!(
            rules.evaluate(Method::Get, "/user/home"),
            &Requirement::has_authority("ROLE_USER")
        );
        assert_eq!(rules.evaluate(Method::Post, "/register"), &Requirement::PermitAll);
        assert_eq!(
            rules.evaluate(Method::Put, "/edit"),
            &Requirement::has_any_role(&["ADMIN", "USER"])
        );
        assert_eq!(rules.evaluate(Method::Get, "/health"), &Requirement::PermitAll);

        let (idx, _) = rules.first_match(Method::Get, "/guest").unwrap();
        assert_eq!(idx, 4);
    }

    mod props {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn double_star_prefix_matches_every_extension(
                tail in proptest::collection::vec("[a-z]{1,6}", 0..5)
            ) {
                let path = format!("/admin/{}", tail.join("/"));
                prop_assert!(PathPattern::new("/admin/**").matches(&path));
            }

            #[test]
            fn literal_pattern_matches_itself(
                segs in proptest::collection::vec("[A-Za-z0-9]{1,8}", 1..5)
            ) {
                let path = format!("/{}", segs.join("/"));
                prop_assert!(PathPattern::new(&path).matches(&path));
            }
        }
    }
}
