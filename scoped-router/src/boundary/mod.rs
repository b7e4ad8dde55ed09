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

//! Consumed collaborator boundaries.
//!
//! The router never talks to the host environment directly. The location
//! source, the dependency injector, and the template loader are injected at
//! construction as `Arc<dyn …>` trait objects; hosts and tests provide their
//! own implementations.

mod injector;
mod location;
mod template;

pub use injector::{DependencyResolver, LocalValue, Locals, ResolveFactory, TEMPLATE_KEY};
pub use location::LocationSource;
pub use template::TemplateLoader;

/// Opaque error type carried across the collaborator boundaries.
pub type BoundaryError = Box<dyn std::error::Error + Send + Sync>;
