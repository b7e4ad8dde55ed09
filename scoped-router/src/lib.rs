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

//! # scoped-router
//!
//! `scoped-router` is a hierarchical url router: declarative route patterns
//! compiled to regexes, per-owner route tables arranged in a tree, and an
//! asynchronous navigation state machine that resolves a route's
//! dependencies and template before announcing the change.
//!
//! Typical usage is API-first and remains centered on [`Router`] and
//! [`RouteDefinition`]. The host environment is injected at construction as
//! three trait-object boundaries ([`LocationSource`], [`DependencyResolver`],
//! [`TemplateLoader`]); internal modules are organized by domain layer to
//! keep behavior ownership explicit.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use scoped_router::{RouteDefinition, Router};
//!
//! # pub mod mock_host {
//! #     use async_trait::async_trait;
//! #     use scoped_router::{
//! #         BoundaryError, DependencyResolver, LocalValue, LocationSource, ResolveFactory,
//! #         TemplateLoader,
//! #     };
//! #     use std::collections::HashMap;
//! #     use std::sync::Arc;
//! #
//! #     pub struct FixedLocation(pub String);
//! #
//! #     #[async_trait]
//! #     impl LocationSource for FixedLocation {
//! #         async fn path(&self) -> String {
//! #             self.0.clone()
//! #         }
//! #         async fn search(&self) -> HashMap<String, String> {
//! #             HashMap::new()
//! #         }
//! #         async fn replace_with(
//! #             &self,
//! #             _path: &str,
//! #             _search: &HashMap<String, String>,
//! #         ) -> Result<(), BoundaryError> {
//! #             Ok(())
//! #         }
//! #         async fn replace_url(&self, _url: &str) -> Result<(), BoundaryError> {
//! #             Ok(())
//! #         }
//! #     }
//! #
//! #     pub struct NoInjector;
//! #
//! #     #[async_trait]
//! #     impl DependencyResolver for NoInjector {
//! #         async fn get(&self, name: &str) -> Result<LocalValue, BoundaryError> {
//! #             Err(format!("no service '{name}'").into())
//! #         }
//! #         async fn invoke(
//! #             &self,
//! #             factory: Arc<dyn ResolveFactory>,
//! #         ) -> Result<LocalValue, BoundaryError> {
//! #             factory.resolve().await
//! #         }
//! #     }
//! #
//! #     pub struct InlineTemplates;
//! #
//! #     #[async_trait]
//! #     impl TemplateLoader for InlineTemplates {
//! #         async fn load(&self, url: &str) -> Result<String, BoundaryError> {
//! #             Ok(format!("<div>{url}</div>"))
//! #         }
//! #     }
//! # }
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let router = Router::new(
//!     Arc::new(mock_host::FixedLocation("/books/42".to_string())),
//!     Arc::new(mock_host::NoInjector),
//!     Arc::new(mock_host::InlineTemplates),
//! );
//!
//! router
//!     .when(
//!         "/books/:bookId",
//!         RouteDefinition::new()
//!             .controller("BookCtrl")
//!             .template("<book/>"),
//!     )
//!     .await
//!     .unwrap();
//!
//! router.handle_location_change().await;
//!
//! let current = router.current().await.unwrap();
//! assert_eq!(current.path_params()["bookId"], "42");
//! # });
//! ```
//!
//! ## Scoped routers
//!
//! [`Router::scoped_router`] attaches an independent route table to an owner
//! in the owner tree. Route events from ancestors stop at the attachment
//! point; the scoped table re-evaluates the location and re-emits its own
//! events into the subtree, so nested parts of an application route
//! themselves without seeing each other's transitions. Destroying an owner
//! tears its scoped router down.
//!
//! ## Internal architecture map
//!
//! - API facade: outward [`Router`]/[`ScopedRouter`] surface
//! - Control plane: route registration and per-owner table ownership
//! - Routing: pattern compilation, matching, and redirect interpolation
//! - Resolution: dependency/template fan-out and the transition state machine
//! - Events: the owner tree and tree-scoped lifecycle broadcast
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events.
//! Library code emits events and does not unconditionally initialize a
//! global subscriber. Binaries and tests are responsible for one-time
//! `tracing_subscriber` initialization at process boundaries.

mod boundary;
pub use boundary::{
    BoundaryError, DependencyResolver, LocalValue, Locals, LocationSource, ResolveFactory,
    TemplateLoader, TEMPLATE_KEY,
};

mod control_plane;
pub use control_plane::{RegistryError, RouteEntry};

mod definition;
pub use definition::{RedirectFn, RedirectTarget, ResolveEntry, RouteDefinition};

mod events;
pub use events::{EventControl, OwnerId, OwnerTreeError, RouteEvent, RouteListener};

#[doc(hidden)]
pub mod observability;

mod resolution;
pub use resolution::ResolutionError;

mod routing;
pub use routing::pattern::{MatchOptions, ParamKey, PathPattern, PathSpec, PatternError};
pub use routing::route_match::{RouteMatch, RouteParams};

mod router;
pub use router::{AttachError, Router, ScopedRouter};
