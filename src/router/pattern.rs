use std::{borrow::Cow, collections::BTreeMap, fmt};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::RouteError;

/// Captured path parameters, keyed by the name declared in the pattern.
pub type Params = BTreeMap<String, String>;

// Unreserved characters (RFC 3986) stay literal inside an interpolated segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// One `/`-delimited piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, compared ASCII case-insensitively.
    Static(String),
    /// `:name`, captures exactly one non-empty path segment.
    Param(String),
}

/// PathPattern
///
/// A parsed URL pattern such as `/person/:personId`. Matching follows the
/// history router's defaults: case-insensitive static segments and a tolerated
/// trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

/// Ordering key used to pick the most specific of several matching patterns.
///
/// Compared segment by segment: a static segment outranks a parameter. When one
/// key is a prefix of the other, the longer key ranks higher.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(Vec<u8>);

impl PathPattern {
    pub fn parse(source: &str) -> Result<Self, RouteError> {
        let body = source
            .strip_prefix('/')
            .ok_or_else(|| RouteError::MissingLeadingSlash(source.to_string()))?;
        let body = body.strip_suffix('/').unwrap_or(body);

        let mut segments = Vec::new();
        if !body.is_empty() {
            for raw in body.split('/') {
                if raw.is_empty() {
                    return Err(RouteError::EmptySegment(source.to_string()));
                }
                match raw.strip_prefix(':') {
                    Some(name) => {
                        if name.is_empty()
                            || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                        {
                            return Err(RouteError::InvalidParamName {
                                pattern: source.to_string(),
                                name: name.to_string(),
                            });
                        }
                        let duplicate = segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                        if duplicate {
                            return Err(RouteError::DuplicateParam {
                                pattern: source.to_string(),
                                name: name.to_string(),
                            });
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Static(raw.to_string())),
                }
            }
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameters declared by this pattern, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    pub fn specificity(&self) -> Specificity {
        Specificity(
            self.segments
                .iter()
                .map(|s| match s {
                    Segment::Static(_) => 2,
                    Segment::Param(_) => 1,
                })
                .collect(),
        )
    }

    /// Matches a path (query and hash already removed) and returns the captured,
    /// percent-decoded parameters. A segment that does not decode to UTF-8 is
    /// captured as written.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts = split_path(path)?;
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(text) => {
                    if !text.eq_ignore_ascii_case(part) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = percent_decode_str(part)
                        .decode_utf8()
                        .map(Cow::into_owned)
                        .unwrap_or_else(|_| part.to_string());
                    params.insert(name.clone(), value);
                }
            }
        }
        Some(params)
    }

    /// Builds a concrete path by substituting `params` into the pattern.
    pub fn interpolate(&self, params: &Params) -> Result<String, RouteError> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(text) => path.push_str(text),
                Segment::Param(name) => {
                    let value = params.get(name).filter(|v| !v.is_empty()).ok_or_else(|| {
                        RouteError::MissingParam {
                            pattern: self.source.clone(),
                            name: name.clone(),
                        }
                    })?;
                    path.extend(utf8_percent_encode(value, SEGMENT));
                }
            }
        }
        Ok(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Splits a request path into segments. `None` when the path has an empty
/// interior segment (`//`), which no pattern can match.
fn split_path(path: &str) -> Option<Vec<&str>> {
    let body = path.strip_prefix('/').unwrap_or(path);
    let body = body.strip_suffix('/').unwrap_or(body);
    if body.is_empty() {
        return Some(Vec::new());
    }
    let parts: Vec<&str> = body.split('/').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(parts)
}
