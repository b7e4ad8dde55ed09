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

//! The router facade: configuration, owner lifecycle, and navigation entry
//! points, plus per-owner scoped routers.

use crate::boundary::{DependencyResolver, LocationSource, TemplateLoader};
use crate::control_plane::route_registry::{RegistryError, RouteRegistry};
use crate::control_plane::route_table::RouteTable;
use crate::definition::RouteDefinition;
use crate::events::{OwnerId, OwnerTree, OwnerTreeError, RouteEvent, RouteListener};
use crate::observability::{events, fields};
use crate::resolution::transition::RouteTransition;
use crate::routing::pattern::{MatchOptions, PathSpec, PatternError};
use crate::routing::route_match::RouteMatch;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

const COMPONENT: &str = "router";

const LIFECYCLE_EVENTS: [&str; 4] = [
    events::ROUTE_CHANGE_START,
    events::ROUTE_CHANGE_SUCCESS,
    events::ROUTE_CHANGE_ERROR,
    events::ROUTE_UPDATE,
];

/// Why a scoped router could not be attached to an owner.
#[derive(Debug)]
pub enum AttachError {
    /// The owner is not part of this router's owner tree.
    UnknownOwner(OwnerId),
    /// The owner already carries a route table.
    AlreadyAttached(OwnerId),
    /// Another listener for a lifecycle event was registered on the owner
    /// first; it would observe events twice once the scoped router re-emits
    /// them, so attachment is refused.
    DuplicateListener { event: &'static str },
}

impl Display for AttachError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachError::UnknownOwner(owner) => write!(f, "unknown owner {owner}"),
            AttachError::AlreadyAttached(owner) => {
                write!(f, "owner {owner} already has a scoped router")
            }
            AttachError::DuplicateListener { event } => {
                write!(
                    f,
                    "a scoped router must be the owner's first listener, but '{event}' already has one"
                )
            }
        }
    }
}

impl Error for AttachError {}

/// Hierarchical url router.
///
/// One `Router` owns the owner tree, the per-owner route tables, and the
/// collaborator boundaries. Hosts feed it location changes through
/// [`Router::handle_location_change`]; consumers observe transitions through
/// owner-tree listeners or [`Router::scoped_router`] handles.
pub struct Router {
    location: Arc<dyn LocationSource>,
    resolver: Arc<dyn DependencyResolver>,
    templates: Arc<dyn TemplateLoader>,
    owners: OwnerTree,
    registry: RouteRegistry,
    options: Mutex<MatchOptions>,
    force_reload: AtomicBool,
}

impl Router {
    pub fn new(
        location: Arc<dyn LocationSource>,
        resolver: Arc<dyn DependencyResolver>,
        templates: Arc<dyn TemplateLoader>,
    ) -> Arc<Self> {
        Arc::new(Self {
            location,
            resolver,
            templates,
            owners: OwnerTree::new(),
            registry: RouteRegistry::new(),
            options: Mutex::new(MatchOptions::default()),
            force_reload: AtomicBool::new(false),
        })
    }

    /// Pattern-compilation options applied to subsequent registrations.
    pub fn set_options(&self, options: MatchOptions) {
        *self.options.lock().unwrap_or_else(PoisonError::into_inner) = options;
    }

    fn options(&self) -> MatchOptions {
        *self.options.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a route on the root table.
    pub async fn when(
        &self,
        spec: impl Into<PathSpec>,
        definition: RouteDefinition,
    ) -> Result<(), PatternError> {
        let options = self.options();
        self.registry
            .root_table()
            .await
            .add_route(spec.into(), definition, &options, None)
            .await
    }

    /// Registers a route on the root table with explicit options.
    pub async fn when_with_options(
        &self,
        spec: impl Into<PathSpec>,
        definition: RouteDefinition,
        options: MatchOptions,
    ) -> Result<(), PatternError> {
        self.registry
            .root_table()
            .await
            .add_route(spec.into(), definition, &options, None)
            .await
    }

    /// Sets the root table's fallback route, matched when nothing else does.
    pub async fn otherwise(&self, definition: RouteDefinition) {
        self.registry.root_table().await.set_fallback(definition).await;
    }

    /// The committed route of the root table.
    pub async fn current(&self) -> Option<Arc<RouteMatch>> {
        self.registry.root_table().await.current().await
    }

    /// The committed route governing `owner` (its own table, the nearest
    /// registered ancestor's, or the root table).
    pub async fn current_for(&self, owner: OwnerId) -> Option<Arc<RouteMatch>> {
        self.registry.lookup(&self.owners, owner).await.current().await
    }

    /// Number of routes registered on the root table, redirect aliases
    /// included.
    pub async fn route_count(&self) -> usize {
        self.registry.root_table().await.route_count().await
    }

    /// The permanent root owner.
    pub fn root_owner(&self) -> OwnerId {
        self.owners.root()
    }

    pub fn create_owner(&self, parent: OwnerId) -> Result<OwnerId, OwnerTreeError> {
        self.owners.create_owner(parent)
    }

    /// Destroys `owner` and its subtree; scoped routers attached anywhere in
    /// the subtree tear down their tables on the way out.
    pub async fn destroy_owner(&self, owner: OwnerId) -> Result<(), OwnerTreeError> {
        self.owners.destroy(owner).await
    }

    /// Registers a lifecycle listener on an owner.
    pub fn subscribe(
        &self,
        owner: OwnerId,
        event: &'static str,
        listener: RouteListener,
    ) -> Result<(), OwnerTreeError> {
        self.owners.subscribe(owner, event, listener)
    }

    /// Entry point for the host's location layer: re-evaluates the root
    /// table against the current location.
    pub async fn handle_location_change(self: &Arc<Self>) {
        self.update_route(None).await;
    }

    /// Re-runs navigation for the root table (`None`) or an attached owner's
    /// table. A missing owner table is a no-op.
    pub async fn update_route(self: &Arc<Self>, owner: Option<OwnerId>) {
        let (table, origin) = match owner {
            Some(owner) => match self.registry.table_for_owner(owner).await {
                Some(table) => (table, owner),
                None => return,
            },
            None => (self.registry.root_table().await, self.owners.root()),
        };
        self.run_transition(&table, origin).await;
    }

    async fn run_transition(&self, table: &Arc<RouteTable>, origin: OwnerId) {
        let transition = RouteTransition {
            table,
            owners: &self.owners,
            location: &self.location,
            resolver: &self.resolver,
            templates: &self.templates,
            force_reload: &self.force_reload,
        };
        transition.trigger(origin).await;
    }

    /// Forces the next navigation to run a full transition even when the
    /// location did not change, and schedules that navigation.
    pub fn reload(self: &Arc<Self>) {
        self.force_reload.store(true, Ordering::SeqCst);
        debug!(
            event = events::RELOAD_REQUESTED,
            component = COMPONENT,
            "reload requested"
        );
        let router = Arc::downgrade(self);
        tokio::spawn(async move {
            if let Some(router) = router.upgrade() {
                router.update_route(None).await;
            }
        });
    }

    /// Attaches a scoped router to `owner`: its own route table, plus
    /// listeners that shield the owner's subtree from ancestor lifecycle
    /// events and re-run navigation against the scoped table instead.
    ///
    /// The scoped router must be the owner's first lifecycle listener;
    /// anything registered earlier would see both the ancestor event and the
    /// scoped re-emission.
    pub async fn scoped_router(self: &Arc<Self>, owner: OwnerId) -> Result<ScopedRouter, AttachError> {
        if !self.owners.contains(owner) {
            return Err(AttachError::UnknownOwner(owner));
        }
        for event in LIFECYCLE_EVENTS {
            if self.owners.has_listeners(owner, event) {
                return Err(AttachError::DuplicateListener { event });
            }
        }

        let base = self.parent_base(owner).await;

        let table = match self.registry.register(owner).await {
            Ok(table) => table,
            Err(RegistryError::AlreadyRegistered(owner)) => {
                return Err(AttachError::AlreadyAttached(owner));
            }
        };

        self.wire_scope_listeners(owner)
            .map_err(|_| AttachError::UnknownOwner(owner))?;

        let router = Arc::downgrade(self);
        let teardown = self
            .owners
            .on_destroy(
                owner,
                Box::new(move |owner| {
                    let router = router.clone();
                    Box::pin(async move {
                        if let Some(router) = router.upgrade() {
                            debug!(
                                event = events::SCOPED_ROUTER_TEARDOWN,
                                component = COMPONENT,
                                owner = %fields::format_owner(Some(owner)),
                                "scoped router torn down"
                            );
                            router.registry.unregister(owner).await;
                        }
                    })
                }),
            );
        if teardown.is_err() {
            return Err(AttachError::UnknownOwner(owner));
        }

        debug!(
            event = events::SCOPED_ROUTER_ATTACH,
            component = COMPONENT,
            owner = %fields::format_owner(Some(owner)),
            path = %fields::format_optional_path(base.as_deref()),
            "scoped router attached"
        );

        Ok(ScopedRouter {
            router: self.clone(),
            table,
            owner,
            base,
        })
    }

    /// Matched-prefix base inherited from the table governing the owner's
    /// parent; present only when that table's committed route carried an
    /// ellipsis pattern.
    async fn parent_base(&self, owner: OwnerId) -> Option<String> {
        let parent = self.owners.parent(owner).ok().flatten()?;
        let table = self.registry.lookup(&self.owners, parent).await;
        let current = table.current().await?;
        current.base().map(str::to_string)
    }

    fn wire_scope_listeners(self: &Arc<Self>, owner: OwnerId) -> Result<(), OwnerTreeError> {
        // Ancestor transitions stop here; the scoped table re-evaluates and
        // re-emits from this owner instead. Events the scoped router itself
        // emits (target == owner) pass through to the subtree untouched.
        let shield: RouteListener = Arc::new(move |_evt: &RouteEvent, ctl| {
            if ctl.target() != owner {
                ctl.stop_descent();
            }
        });
        self.owners
            .subscribe(owner, events::ROUTE_CHANGE_START, shield)?;

        for event in [
            events::ROUTE_CHANGE_SUCCESS,
            events::ROUTE_CHANGE_ERROR,
            events::ROUTE_UPDATE,
        ] {
            let router = Arc::downgrade(self);
            let listener: RouteListener = Arc::new(move |_evt: &RouteEvent, ctl| {
                if ctl.target() == owner {
                    return;
                }
                ctl.stop_descent();
                let router = router.clone();
                tokio::spawn(async move {
                    if let Some(router) = router.upgrade() {
                        router.update_route(Some(owner)).await;
                    }
                });
            });
            self.owners.subscribe(owner, event, listener)?;
        }
        Ok(())
    }
}

/// Handle returned by [`Router::scoped_router`]: configuration and
/// navigation scoped to one owner's table.
pub struct ScopedRouter {
    router: Arc<Router>,
    table: Arc<RouteTable>,
    owner: OwnerId,
    base: Option<String>,
}

impl ScopedRouter {
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Prefix inherited from the parent's committed ellipsis route; relative
    /// paths registered here are resolved against it.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Registers a route on this owner's table. Relative paths are prefixed
    /// with [`ScopedRouter::base`].
    pub async fn when(
        &self,
        spec: impl Into<PathSpec>,
        definition: RouteDefinition,
    ) -> Result<(), PatternError> {
        let options = self.router.options();
        self.table
            .add_route(spec.into(), definition, &options, self.base.as_deref())
            .await
    }

    /// Sets this table's fallback route.
    pub async fn otherwise(&self, definition: RouteDefinition) {
        self.table.set_fallback(definition).await;
    }

    /// The committed route of this owner's table.
    pub async fn current(&self) -> Option<Arc<RouteMatch>> {
        self.table.current().await
    }

    /// Re-evaluates this owner's table against the current location.
    pub async fn update_route(&self) {
        self.router.run_transition(&self.table, self.owner).await;
    }
}
