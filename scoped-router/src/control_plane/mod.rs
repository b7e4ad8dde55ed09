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

//! Control plane: route registration at rest.
//!
//! The data model is a set of [`route_table::RouteTable`]s, one per attached
//! owner, held in a [`route_registry::RouteRegistry`] keyed by owner with a
//! root alias. The data plane ([`crate::routing`]) consumes these tables
//! read-only; only configuration calls and the committed-route cell mutate
//! them.

pub(crate) mod route_registry;
pub mod route_table;

pub use route_registry::RegistryError;
pub use route_table::RouteEntry;
