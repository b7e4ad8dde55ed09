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

//! Location-to-route dispatch: first-match-wins over a table's entries.

use crate::control_plane::route_table::RouteTable;
use crate::routing::pattern::PathPattern;
use crate::routing::route_match::{RouteMatch, RouteParams};
use std::borrow::Cow;
use std::sync::Arc;

/// Matches a location against `table` and builds the candidate next-route
/// snapshot. Entries are tried strictly in registration order; when none
/// match, the table's fallback entry (if any) is used with empty params.
pub(crate) async fn match_route(
    table: &RouteTable,
    path: &str,
    search: &RouteParams,
) -> Option<Arc<RouteMatch>> {
    for entry in table.entries_snapshot().await {
        let Some(pattern) = entry.pattern() else {
            continue;
        };
        if let Some((path_params, base)) = extract_params(pattern, path) {
            let mut params = search.clone();
            params.extend(path_params.clone());
            return Some(RouteMatch::new(entry, path_params, params, base));
        }
    }

    table
        .fallback()
        .await
        .map(|fallback| RouteMatch::new(fallback, RouteParams::new(), RouteParams::new(), None))
}

/// Extracts parameters from one pattern. Capture group `i` maps to key
/// `i - 1`; groups beyond the key list get an independent positional index.
fn extract_params(pattern: &PathPattern, path: &str) -> Option<(RouteParams, Option<String>)> {
    let caps = pattern.regex().captures(path)?;

    let base = pattern
        .has_ellipsis()
        .then(|| caps.get(0).map(|m| m.as_str().to_string()))
        .flatten();

    let mut params = RouteParams::new();
    let mut positional = 0usize;
    for index in 1..caps.len() {
        let key = pattern.keys().get(index - 1);
        let capture = caps.get(index);
        // An unmatched optional group stores no value, but an unnamed one
        // still occupies its positional slot so later groups keep their
        // index.
        match (key, capture) {
            (Some(key), Some(capture)) => {
                params.insert(key.name.clone(), decode_component(capture.as_str()));
            }
            (None, Some(capture)) => {
                params.insert(positional.to_string(), decode_component(capture.as_str()));
                positional += 1;
            }
            (None, None) => {
                positional += 1;
            }
            (Some(_), None) => {}
        }
    }

    Some((params, base))
}

/// Percent-decodes a captured value; text that does not decode cleanly is
/// kept verbatim.
fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}
