//! Redirect-target interpolation.

use crate::routing::route_match::RouteParams;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"(\w+)(.*)").expect("placeholder regex");
}

/// Interpolates `:name` placeholders in a redirect path template against
/// `params`, consuming each referenced key so the caller can publish the
/// remainder as the redirect query without duplicating path-baked values.
/// Missing placeholders interpolate as empty.
pub(crate) fn interpolate(template: &str, params: &mut RouteParams) -> String {
    let mut result = String::new();
    for (index, segment) in template.split(':').enumerate() {
        if index == 0 {
            result.push_str(segment);
            continue;
        }
        match PLACEHOLDER.captures(segment) {
            Some(caps) => {
                if let Some(value) = params.remove(&caps[1]) {
                    result.push_str(&value);
                }
                result.push_str(caps.get(2).map_or("", |m| m.as_str()));
            }
            None => result.push_str(segment),
        }
    }
    result
}
