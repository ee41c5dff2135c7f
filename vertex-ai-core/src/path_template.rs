//! # Path Templates
//!
//! Resource names and REST URI paths follow slash-separated templates with
//! named captures, e.g.
//! `projects/{project}/locations/{location}/customJobs/{custom_job}` or
//! `/v1/{parent=projects/*/locations/*}/customJobs`.
//!
//! A template is compiled once into a [`PathTemplate`]; rendering and parsing
//! are mutual inverses: `parse(render(vars)) == vars` and
//! `render(parse(path)) == path` whenever parsing succeeds.
//!
//! Capture patterns support `*` (exactly one segment) and a trailing `**`
//! (all remaining segments). A bare `{field}` is shorthand for `{field=*}`.

use crate::error::Error;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Capture { field: String, pattern: Vec<Pat> },
}

#[derive(Debug, Clone, PartialEq)]
enum Pat {
    Literal(String),
    Wildcard,
    Rest,
}

/// A compiled path template with named captures.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    template: String,
    leading_slash: bool,
    segments: Vec<Segment>,
    /// Custom-verb suffix (`:cancel`) on the final segment, if any.
    verb: Option<String>,
}

impl PathTemplate {
    /// Compiles a template. Fails with `invalid-argument` on malformed input:
    /// unbalanced braces, empty field names, duplicate fields, or segments
    /// after a `**`.
    pub fn new(template: &str) -> Result<Self, Error> {
        let leading_slash = template.starts_with('/');
        let body = template.strip_prefix('/').unwrap_or(template);
        let (body, verb) = split_verb(body)?;

        let mut segments = Vec::new();
        let mut fields_seen = Vec::new();
        let mut saw_rest = false;

        for piece in split_top_level(body)? {
            if saw_rest {
                return Err(Error::invalid_argument(format!(
                    "path template '{template}' has segments after '**'"
                )));
            }
            if let Some(inner) = piece.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                let (field, raw_pattern) = match inner.split_once('=') {
                    Some((field, pattern)) => (field, pattern),
                    None => (inner, "*"),
                };
                if field.is_empty() {
                    return Err(Error::invalid_argument(format!(
                        "path template '{template}' has a capture with an empty field name"
                    )));
                }
                if fields_seen.contains(&field.to_string()) {
                    return Err(Error::invalid_argument(format!(
                        "path template '{template}' captures '{field}' twice"
                    )));
                }
                fields_seen.push(field.to_string());

                let mut pattern = Vec::new();
                for (idx, seg) in raw_pattern.split('/').enumerate() {
                    match seg {
                        "*" => pattern.push(Pat::Wildcard),
                        "**" => {
                            if idx + 1 != raw_pattern.split('/').count() {
                                return Err(Error::invalid_argument(format!(
                                    "path template '{template}' uses '**' before the end"
                                )));
                            }
                            pattern.push(Pat::Rest);
                            saw_rest = true;
                        }
                        "" => {
                            return Err(Error::invalid_argument(format!(
                                "path template '{template}' has an empty pattern segment"
                            )));
                        }
                        literal => pattern.push(Pat::Literal(literal.to_string())),
                    }
                }
                segments.push(Segment::Capture {
                    field: field.to_string(),
                    pattern,
                });
            } else if piece.contains(['{', '}']) {
                return Err(Error::invalid_argument(format!(
                    "path template '{template}' has unbalanced braces in '{piece}'"
                )));
            } else if piece.is_empty() {
                return Err(Error::invalid_argument(format!(
                    "path template '{template}' has an empty segment"
                )));
            } else {
                segments.push(Segment::Literal(piece));
            }
        }

        Ok(Self {
            template: template.to_string(),
            leading_slash,
            segments,
            verb,
        })
    }

    /// The raw template string this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Names of the captured fields, in template order.
    pub fn variables(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Capture { field, .. } => Some(field.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Renders the template with the given field values, validating each
    /// value against its capture pattern.
    pub fn render(&self, vars: &BTreeMap<String, String>) -> Result<String, Error> {
        let mut out = Vec::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => out.push(lit.clone()),
                Segment::Capture { field, pattern } => {
                    let value = vars.get(field).ok_or_else(|| {
                        Error::invalid_argument(format!(
                            "missing value for '{field}' in path template '{}'",
                            self.template
                        ))
                    })?;
                    let parts: Vec<&str> = value.split('/').collect();
                    if !matches_pattern(pattern, &parts) {
                        return Err(Error::invalid_argument(format!(
                            "value '{value}' for '{field}' does not match '{}'",
                            self.template
                        )));
                    }
                    out.push(value.clone());
                }
            }
        }
        let mut joined = out.join("/");
        if let Some(verb) = &self.verb {
            joined.push(':');
            joined.push_str(verb);
        }
        Ok(if self.leading_slash {
            format!("/{joined}")
        } else {
            joined
        })
    }

    /// Parses a path against the template, returning captured field values.
    /// Returns `None` when the path does not match.
    pub fn parse(&self, path: &str) -> Option<BTreeMap<String, String>> {
        if path.starts_with('/') != self.leading_slash {
            return None;
        }
        let mut body = path.strip_prefix('/').unwrap_or(path);
        if let Some(verb) = &self.verb {
            body = body.strip_suffix(verb.as_str())?.strip_suffix(':')?;
        }
        let parts: Vec<&str> = if body.is_empty() {
            Vec::new()
        } else {
            body.split('/').collect()
        };
        let mut vars = BTreeMap::new();

        let mut remaining = parts.as_slice();
        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => {
                    let (head, tail) = remaining.split_first()?;
                    if head != lit {
                        return None;
                    }
                    remaining = tail;
                }
                Segment::Capture { field, pattern } => {
                    let consumed = if pattern.last() == Some(&Pat::Rest) {
                        remaining.len()
                    } else {
                        pattern.len()
                    };
                    if remaining.len() < consumed {
                        return None;
                    }
                    let (captured, tail) = remaining.split_at(consumed);
                    if !matches_pattern(pattern, captured) {
                        return None;
                    }
                    vars.insert(field.clone(), captured.join("/"));
                    remaining = tail;
                }
            }
        }

        remaining.is_empty().then_some(vars)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

fn matches_pattern(pattern: &[Pat], parts: &[&str]) -> bool {
    let fixed = if pattern.last() == Some(&Pat::Rest) {
        &pattern[..pattern.len() - 1]
    } else {
        pattern
    };
    let has_rest = fixed.len() != pattern.len();

    if has_rest {
        if parts.len() < fixed.len() {
            return false;
        }
    } else if parts.len() != fixed.len() {
        return false;
    }

    fixed.iter().zip(parts).all(|(pat, part)| match pat {
        Pat::Literal(lit) => lit == part,
        Pat::Wildcard => !part.is_empty(),
        Pat::Rest => unreachable!(),
    }) && parts.iter().all(|p| !p.is_empty())
}

/// Splits a trailing `:verb` (outside braces) off the template body.
fn split_verb(body: &str) -> Result<(&str, Option<String>), Error> {
    let mut depth = 0usize;
    let mut verb_at = None;
    for (idx, ch) in body.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => verb_at = None,
            ':' if depth == 0 => verb_at = Some(idx),
            _ => {}
        }
    }
    match verb_at {
        None => Ok((body, None)),
        Some(idx) => {
            let verb = &body[idx + 1..];
            if verb.is_empty() || verb.contains(['/', '{', '}']) {
                return Err(Error::invalid_argument(format!(
                    "invalid verb suffix in path template '{body}'"
                )));
            }
            Ok((&body[..idx], Some(verb.to_string())))
        }
    }
}

/// Splits on `/` outside braces; a capture like `{parent=projects/*}` stays
/// one piece.
fn split_top_level(body: &str) -> Result<Vec<String>, Error> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in body.chars() {
        match ch {
            '{' => {
                depth += 1;
                current.push(ch);
            }
            '}' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::invalid_argument(format!("unbalanced '}}' in path template '{body}'"))
                })?;
                current.push(ch);
            }
            '/' if depth == 0 => {
                pieces.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    if depth != 0 {
        return Err(Error::invalid_argument(format!(
            "unbalanced '{{' in path template '{body}'"
        )));
    }
    pieces.push(current);
    Ok(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn resource_name_round_trip() {
        let template =
            PathTemplate::new("projects/{project}/locations/{location}/customJobs/{custom_job}")
                .unwrap();

        let fields = vars(&[
            ("project", "p"),
            ("location", "us-central1"),
            ("custom_job", "123"),
        ]);
        let rendered = template.render(&fields).unwrap();
        assert_eq!(rendered, "projects/p/locations/us-central1/customJobs/123");
        assert_eq!(template.parse(&rendered).unwrap(), fields);
    }

    #[test]
    fn parse_then_render_is_identity() {
        let template = PathTemplate::new("projects/{project}/locations/{location}").unwrap();
        let path = "projects/alpha/locations/europe-west4";
        let parsed = template.parse(path).unwrap();
        assert_eq!(template.render(&parsed).unwrap(), path);
    }

    #[test]
    fn rest_template_with_multi_segment_capture() {
        let template =
            PathTemplate::new("/v1/{parent=projects/*/locations/*}/customJobs").unwrap();
        assert_eq!(template.variables(), vec!["parent"]);

        let rendered = template
            .render(&vars(&[("parent", "projects/p/locations/l")]))
            .unwrap();
        assert_eq!(rendered, "/v1/projects/p/locations/l/customJobs");

        let parsed = template.parse("/v1/projects/p/locations/l/customJobs").unwrap();
        assert_eq!(parsed.get("parent").unwrap(), "projects/p/locations/l");
    }

    #[test]
    fn pattern_validation_rejects_foreign_resources() {
        let template =
            PathTemplate::new("/v1/{parent=projects/*/locations/*}/customJobs").unwrap();
        let err = template
            .render(&vars(&[("parent", "folders/f/locations/l")]))
            .unwrap_err();
        assert!(err.to_string().contains("does not match"));

        assert!(template.parse("/v1/folders/f/locations/l/customJobs").is_none());
    }

    #[test]
    fn double_wildcard_captures_the_rest() {
        let template = PathTemplate::new("/v1/{name=projects/*/locations/*/operations/**}").unwrap();
        let parsed = template
            .parse("/v1/projects/p/locations/l/operations/123/child/456")
            .unwrap();
        assert_eq!(
            parsed.get("name").unwrap(),
            "projects/p/locations/l/operations/123/child/456"
        );
    }

    #[test]
    fn custom_verb_round_trip() {
        let template =
            PathTemplate::new("/v1/{name=projects/*/locations/*/customJobs/*}:cancel").unwrap();

        let rendered = template
            .render(&vars(&[("name", "projects/p/locations/l/customJobs/9")]))
            .unwrap();
        assert_eq!(rendered, "/v1/projects/p/locations/l/customJobs/9:cancel");

        let parsed = template.parse(&rendered).unwrap();
        assert_eq!(
            parsed.get("name").unwrap(),
            "projects/p/locations/l/customJobs/9"
        );
        assert!(
            template
                .parse("/v1/projects/p/locations/l/customJobs/9")
                .is_none()
        );
    }

    #[test]
    fn mismatches_do_not_parse() {
        let template = PathTemplate::new("projects/{project}").unwrap();
        assert!(template.parse("organizations/o").is_none());
        assert!(template.parse("projects/p/extra").is_none());
        assert!(template.parse("projects").is_none());
    }

    #[test]
    fn malformed_templates_are_rejected() {
        assert!(PathTemplate::new("projects/{project").is_err());
        assert!(PathTemplate::new("projects/{}").is_err());
        assert!(PathTemplate::new("projects/{p}/x/{p}").is_err());
        assert!(PathTemplate::new("{name=**}/suffix").is_err());
    }
}
