/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Declarative path-pattern compiler.
//!
//! Turns a path specification into a matcher: a compiled regex, an ordered
//! list of parameter descriptors, and an ellipsis flag. Capture-group order
//! in the regex equals descriptor order in the list. Pure and stateless.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::error::Error;
use std::fmt::{Display, Formatter};

lazy_static! {
    /// One parameter token: optional leading slash, optional format dot,
    /// `:name`, optional inline capture, optional `?` marker, optional `*`.
    static ref PARAM_TOKEN: Regex =
        Regex::new(r"(/)?(\.)?:(\w+)(\(.*?\))?(\?)?(\*)?").expect("parameter token regex");
}

/// Path specification accepted at route registration.
#[derive(Clone, Debug)]
pub enum PathSpec {
    /// Declarative path with parameter tokens, wildcards, and ellipsis.
    Path(String),
    /// Pre-built regex, wrapped unchanged; the caller owns capture semantics.
    Regex(Regex),
}

impl From<&str> for PathSpec {
    fn from(path: &str) -> Self {
        PathSpec::Path(path.to_string())
    }
}

impl From<String> for PathSpec {
    fn from(path: String) -> Self {
        PathSpec::Path(path)
    }
}

impl From<Regex> for PathSpec {
    fn from(regex: Regex) -> Self {
        PathSpec::Regex(regex)
    }
}

impl PathSpec {
    /// Declarative path string, when this spec is not a native regex.
    pub fn as_path(&self) -> Option<&str> {
        match self {
            PathSpec::Path(path) => Some(path),
            PathSpec::Regex(_) => None,
        }
    }
}

/// Matching options in force at compile time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MatchOptions {
    /// Case-sensitive matching when set.
    pub sensitive: bool,
    /// When unset, a single trailing slash is tolerated.
    pub strict: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            sensitive: false,
            strict: true,
        }
    }
}

/// One named parameter descriptor, in capture-group order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamKey {
    pub name: String,
    pub optional: bool,
}

/// Compiled path pattern.
#[derive(Clone, Debug)]
pub struct PathPattern {
    source: String,
    regex: Regex,
    keys: Vec<ParamKey>,
    ellipsis: bool,
}

impl PathPattern {
    /// Original path specification text.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Named parameter descriptors; index `i` corresponds to capture group
    /// `i + 1`.
    pub fn keys(&self) -> &[ParamKey] {
        &self.keys
    }

    /// True when the pattern ends in a rest-of-path ellipsis and the compiled
    /// regex is not end-anchored.
    pub fn has_ellipsis(&self) -> bool {
        self.ellipsis
    }
}

/// Pattern compilation failures.
#[derive(Debug)]
pub enum PatternError {
    Compile { path: String, source: regex::Error },
}

impl Display for PatternError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternError::Compile { path, source } => {
                write!(f, "failed to compile path pattern {path:?}: {source}")
            }
        }
    }
}

impl Error for PatternError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PatternError::Compile { source, .. } => Some(source),
        }
    }
}

/// Compiles a path specification into a [`PathPattern`].
///
/// A native regex is wrapped unchanged (no parameters, no ellipsis). A
/// declarative path goes through the rewrite passes in a fixed order; each
/// pass operates on the accumulated text of the previous one, so the
/// compiled regex accepts exactly the strings the declarative form accepts
/// under `options`.
pub fn compile(spec: &PathSpec, options: &MatchOptions) -> Result<PathPattern, PatternError> {
    let path = match spec {
        PathSpec::Regex(regex) => {
            return Ok(PathPattern {
                source: regex.as_str().to_string(),
                regex: regex.clone(),
                keys: Vec::new(),
                ellipsis: false,
            });
        }
        PathSpec::Path(path) => path,
    };

    let mut keys = Vec::new();

    let mut text = escape_chars(path, &['\\', '(', ')', '^', '$']);
    if !options.strict {
        text.push_str("/?");
    }
    let text = text.replace("/(", "(?:/");
    let text = PARAM_TOKEN
        .replace_all(&text, |caps: &Captures<'_>| {
            expand_param_token(caps, &mut keys)
        })
        .into_owned();
    let text = escape_chars(&text, &['/', '.']);
    let mut text = text.replace('*', "(.*)");

    let ellipsis = text.ends_with(r"\.\.\.");
    if ellipsis {
        text.truncate(text.len() - 6);
    }

    let anchored = format!(
        "{}^{}{}",
        if options.sensitive { "" } else { "(?i)" },
        text,
        if ellipsis { "" } else { "$" },
    );
    let regex = Regex::new(&anchored).map_err(|source| PatternError::Compile {
        path: path.clone(),
        source,
    })?;

    Ok(PathPattern {
        source: path.clone(),
        regex,
        keys,
        ellipsis,
    })
}

/// Expands one parameter token into its matching group, recording the key.
fn expand_param_token(caps: &Captures<'_>, keys: &mut Vec<ParamKey>) -> String {
    let slash = caps.get(1).map_or("", |m| m.as_str());
    let format = caps.get(2).map_or("", |m| m.as_str());
    let name = &caps[3];
    let capture = caps.get(4).map(|m| m.as_str());
    let optional = caps.get(5).is_some();
    let star = caps.get(6).is_some();

    keys.push(ParamKey {
        name: name.to_string(),
        optional,
    });

    // A parameter right after a literal dot must not swallow further dots.
    let default_capture = if format.is_empty() {
        "([^/]+?)"
    } else {
        "([^/.]+?)"
    };

    let mut out = String::new();
    if !optional {
        out.push_str(slash);
    }
    out.push_str("(?:");
    if optional {
        out.push_str(slash);
    }
    out.push_str(format);
    out.push_str(capture.unwrap_or(default_capture));
    out.push(')');
    if optional {
        out.push('?');
    }
    if star {
        out.push_str("(/*)?");
    }
    out
}

fn escape_chars(text: &str, chars: &[char]) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if chars.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
