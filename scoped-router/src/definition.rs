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

//! Caller-supplied route definition: what a matched route should resolve
//! and render, and how navigation-only changes are treated.

use crate::boundary::ResolveFactory;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// One entry of the `resolve` dependency map.
#[derive(Clone)]
pub enum ResolveEntry {
    /// Alias for a named service, looked up through the injection boundary.
    Service(String),
    /// Factory invoked through the injection boundary; its (possibly
    /// asynchronous) result becomes the dependency value.
    Factory(Arc<dyn ResolveFactory>),
}

impl Debug for ResolveEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveEntry::Service(name) => write!(f, "Service({name:?})"),
            ResolveEntry::Factory(_) => write!(f, "Factory(..)"),
        }
    }
}

/// Computes a redirect url from `(path_params, current_path, current_search)`.
pub trait RedirectFn: Send + Sync {
    fn redirect(
        &self,
        path_params: &HashMap<String, String>,
        path: &str,
        search: &HashMap<String, String>,
    ) -> String;
}

/// Redirect target of a route definition.
#[derive(Clone)]
pub enum RedirectTarget {
    /// Literal path template; `:name` placeholders are interpolated against
    /// the matched params before the replace-navigation is issued.
    Path(String),
    /// Host-supplied function returning the full redirect url.
    Compute(Arc<dyn RedirectFn>),
}

impl Debug for RedirectTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RedirectTarget::Path(path) => write!(f, "Path({path:?})"),
            RedirectTarget::Compute(_) => write!(f, "Compute(..)"),
        }
    }
}

/// Mapping information assigned to the committed route on match.
#[derive(Clone, Debug)]
pub struct RouteDefinition {
    /// Name of the controller/component the view layer should instantiate.
    pub controller: Option<String>,
    /// Literal template content; takes precedence over `template_url`.
    pub template: Option<String>,
    /// Url of the template to fetch through the template boundary.
    pub template_url: Option<String>,
    /// Dependencies resolved before the change is announced as succeeded.
    pub resolve: HashMap<String, ResolveEntry>,
    /// When set, a matching navigation replace-navigates elsewhere.
    pub redirect_to: Option<RedirectTarget>,
    /// Reload the route when only the query changes. Defaults to `true`;
    /// when `false`, query-only changes refresh params and announce an
    /// update instead of a full transition.
    pub reload_on_search: bool,
}

impl Default for RouteDefinition {
    fn default() -> Self {
        Self {
            controller: None,
            template: None,
            template_url: None,
            resolve: HashMap::new(),
            redirect_to: None,
            reload_on_search: true,
        }
    }
}

impl RouteDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controller(mut self, name: impl Into<String>) -> Self {
        self.controller = Some(name.into());
        self
    }

    pub fn template(mut self, content: impl Into<String>) -> Self {
        self.template = Some(content.into());
        self
    }

    pub fn template_url(mut self, url: impl Into<String>) -> Self {
        self.template_url = Some(url.into());
        self
    }

    pub fn resolve(mut self, key: impl Into<String>, entry: ResolveEntry) -> Self {
        self.resolve.insert(key.into(), entry);
        self
    }

    pub fn redirect_to(mut self, target: RedirectTarget) -> Self {
        self.redirect_to = Some(target);
        self
    }

    pub fn reload_on_search(mut self, reload: bool) -> Self {
        self.reload_on_search = reload;
        self
    }
}
