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

//! The navigation state machine.
//!
//! One [`RouteTransition`] drives one location change against one table:
//! match, reuse-or-transition decision, redirect, asynchronous resolution,
//! staleness guard, terminal broadcast. The table's committed cell is the
//! only shared state; every await re-checks it by snapshot identity so a
//! newer navigation silently wins over a slower one.

use crate::boundary::{DependencyResolver, LocationSource, TemplateLoader};
use crate::control_plane::route_table::RouteTable;
use crate::definition::RedirectTarget;
use crate::events::{OwnerId, OwnerTree, RouteEvent};
use crate::observability::events;
use crate::resolution::locals::resolve_locals;
use crate::routing::matcher::match_route;
use crate::routing::redirect::interpolate;
use crate::routing::route_match::RouteMatch;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "transition";

/// Borrowed-collaborator driver for a single navigation attempt.
pub(crate) struct RouteTransition<'a> {
    pub(crate) table: &'a Arc<RouteTable>,
    pub(crate) owners: &'a OwnerTree,
    pub(crate) location: &'a Arc<dyn LocationSource>,
    pub(crate) resolver: &'a Arc<dyn DependencyResolver>,
    pub(crate) templates: &'a Arc<dyn TemplateLoader>,
    pub(crate) force_reload: &'a AtomicBool,
}

impl RouteTransition<'_> {
    /// Runs the navigation against the current location, broadcasting
    /// lifecycle events from `origin` down the owner tree.
    pub(crate) async fn trigger(&self, origin: OwnerId) {
        let path = self.location.path().await;
        let search = self.location.search().await;

        let next = match_route(self.table, &path, &search).await;
        let last = self.table.current().await;

        if let (Some(next), Some(last)) = (next.as_ref(), last.as_ref()) {
            if self.is_reuse(next, last) {
                // `next` is discarded; the committed snapshot keeps its
                // identity and only the params refresh.
                last.set_params(next.params());
                debug!(
                    event = events::REUSE_PARAMS_REFRESH,
                    component = COMPONENT,
                    path = %path,
                    "route reused, params refreshed"
                );
                self.owners.broadcast(
                    origin,
                    &RouteEvent::Update {
                        current: last.clone(),
                    },
                );
                return;
            }
        }

        // Nothing matched and nothing was committed: not a transition.
        if next.is_none() && last.is_none() {
            return;
        }

        self.force_reload.store(false, Ordering::SeqCst);

        debug!(
            event = events::ROUTE_CHANGE_START,
            component = COMPONENT,
            path = %path,
            "route change starting"
        );
        self.owners.broadcast(
            origin,
            &RouteEvent::ChangeStart {
                next: next.clone(),
                last: last.clone(),
            },
        );

        // Optimistic commit; continuations below re-check this cell.
        self.table.set_current(next.clone()).await;

        let Some(next) = next else {
            self.owners.broadcast(
                origin,
                &RouteEvent::ChangeSuccess { next: None, last },
            );
            return;
        };

        if let Some(target) = &next.definition().redirect_to {
            // The replace-navigation does not abort this transition; the
            // redirecting route resolves and settles below unless the host's
            // follow-up location change supersedes it first.
            self.redirect(target, &next, &path, &search).await;
        }

        debug!(
            event = events::RESOLVE_START,
            component = COMPONENT,
            path = %path,
            "resolving route dependencies"
        );
        match resolve_locals(self.resolver, self.templates, next.definition()).await {
            Ok(locals) => {
                if !self.table.current_is(Some(&next)).await {
                    debug!(
                        event = events::RESOLVE_STALE_DROPPED,
                        component = COMPONENT,
                        path = %path,
                        "resolution superseded, result dropped"
                    );
                    return;
                }
                next.set_locals(locals);
                debug!(
                    event = events::RESOLVE_OK,
                    component = COMPONENT,
                    path = %path,
                    "route change succeeded"
                );
                self.owners.broadcast(
                    origin,
                    &RouteEvent::ChangeSuccess {
                        next: Some(next),
                        last,
                    },
                );
            }
            Err(error) => {
                if !self.table.current_is(Some(&next)).await {
                    debug!(
                        event = events::RESOLVE_STALE_DROPPED,
                        component = COMPONENT,
                        path = %path,
                        "failed resolution superseded, result dropped"
                    );
                    return;
                }
                warn!(
                    event = events::RESOLVE_FAILED,
                    component = COMPONENT,
                    path = %path,
                    err = %error,
                    "route change failed"
                );
                self.owners.broadcast(
                    origin,
                    &RouteEvent::ChangeError {
                        next: Some(next),
                        last,
                        error: Arc::new(error),
                    },
                );
            }
        }
    }

    /// A navigation reuses the committed route when it resolves to the same
    /// registered entry with identical path params, and either the full
    /// params are identical too or the route opted out of query reloads.
    /// A pending force-reload defeats reuse entirely.
    fn is_reuse(&self, next: &RouteMatch, last: &RouteMatch) -> bool {
        if self.force_reload.load(Ordering::SeqCst) {
            return false;
        }
        next.same_entry(last)
            && next.path_params() == last.path_params()
            && (next.params() == last.params() || !next.definition().reload_on_search)
    }

    /// Issues the replace-navigation for a redirecting route. Interpolation
    /// consumes placeholders from a copy of the matched params; the leftover
    /// copy becomes the redirect's query and `next` keeps its params intact.
    async fn redirect(
        &self,
        target: &RedirectTarget,
        next: &Arc<RouteMatch>,
        path: &str,
        search: &HashMap<String, String>,
    ) {
        let outcome = match target {
            RedirectTarget::Path(template) => {
                let mut params = next.params();
                let new_path = interpolate(template, &mut params);
                debug!(
                    event = events::REDIRECT_ISSUED,
                    component = COMPONENT,
                    path = %path,
                    route = %new_path,
                    "redirecting"
                );
                self.location.replace_with(&new_path, &params).await
            }
            RedirectTarget::Compute(compute) => {
                let url = compute.redirect(next.path_params(), path, search);
                debug!(
                    event = events::REDIRECT_ISSUED,
                    component = COMPONENT,
                    path = %path,
                    route = %url,
                    "redirecting"
                );
                self.location.replace_url(&url).await
            }
        };
        if let Err(err) = outcome {
            warn!(
                event = events::REDIRECT_ISSUED,
                component = COMPONENT,
                path = %path,
                err = %err,
                "redirect navigation failed"
            );
        }
    }
}
