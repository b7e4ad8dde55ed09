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

//! Registry of per-owner route tables.
//!
//! Tables are keyed by `Option<OwnerId>`; the `None` key is the root table
//! serving owners with no registered ancestor. The first table registered
//! under an owner also claims the root slot if it is vacant, so a single
//! scoped router behaves like an unscoped one.

use crate::control_plane::route_table::RouteTable;
use crate::events::{OwnerId, OwnerTree};
use crate::observability::{events, fields};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

const COMPONENT: &str = "route_registry";

/// Registry failures.
#[derive(Debug, Eq, PartialEq)]
pub enum RegistryError {
    /// The owner already has a table registered for it.
    AlreadyRegistered(OwnerId),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::AlreadyRegistered(owner) => {
                write!(f, "owner {owner} already has a route table")
            }
        }
    }
}

impl Error for RegistryError {}

pub(crate) struct RouteRegistry {
    tables: Mutex<HashMap<Option<OwnerId>, Arc<RouteTable>>>,
}

impl RouteRegistry {
    pub(crate) fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
        }
    }

    /// The root table, created on first use.
    pub(crate) async fn root_table(&self) -> Arc<RouteTable> {
        let mut tables = self.tables.lock().await;
        tables
            .entry(None)
            .or_insert_with(|| RouteTable::new(None))
            .clone()
    }

    /// Registers a fresh table for `owner`. While the root slot is vacant the
    /// same table is aliased there, so matching falls through to it from
    /// anywhere in the tree.
    pub(crate) async fn register(&self, owner: OwnerId) -> Result<Arc<RouteTable>, RegistryError> {
        let mut tables = self.tables.lock().await;
        if tables.contains_key(&Some(owner)) {
            return Err(RegistryError::AlreadyRegistered(owner));
        }
        let table = RouteTable::new(Some(owner));
        tables.insert(Some(owner), table.clone());
        let claimed_root = if !tables.contains_key(&None) {
            tables.insert(None, table.clone());
            true
        } else {
            false
        };
        debug!(
            event = events::TABLE_REGISTER,
            component = COMPONENT,
            owner = %fields::format_owner(Some(owner)),
            claimed_root,
            "route table registered"
        );
        Ok(table)
    }

    /// Drops `owner`'s table and any root alias pointing at it.
    pub(crate) async fn unregister(&self, owner: OwnerId) {
        let mut tables = self.tables.lock().await;
        let Some(table) = tables.remove(&Some(owner)) else {
            return;
        };
        let root_cleared = match tables.get(&None) {
            Some(root) if Arc::ptr_eq(root, &table) => {
                tables.remove(&None);
                true
            }
            _ => false,
        };
        debug!(
            event = events::TABLE_UNREGISTER,
            component = COMPONENT,
            owner = %fields::format_owner(Some(owner)),
            root_cleared,
            "route table unregistered"
        );
    }

    pub(crate) async fn table_for_owner(&self, owner: OwnerId) -> Option<Arc<RouteTable>> {
        self.tables.lock().await.get(&Some(owner)).cloned()
    }

    /// Resolves the table governing `owner`: its own table if registered,
    /// else the nearest registered ancestor's, else the root table. The
    /// root table is created on first use, so every owner resolves to some
    /// table and lookup is infallible.
    pub(crate) async fn lookup(&self, tree: &OwnerTree, owner: OwnerId) -> Arc<RouteTable> {
        let tables = self.tables.lock().await;
        let mut cursor = Some(owner);
        while let Some(id) = cursor {
            if let Some(table) = tables.get(&Some(id)) {
                return table.clone();
            }
            cursor = tree.parent(id).ok().flatten();
        }
        drop(tables);
        self.root_table().await
    }

    pub(crate) async fn all_tables(&self) -> Vec<Arc<RouteTable>> {
        let tables = self.tables.lock().await;
        let mut seen: Vec<Arc<RouteTable>> = Vec::new();
        for table in tables.values() {
            if !seen.iter().any(|t| Arc::ptr_eq(t, table)) {
                seen.push(table.clone());
            }
        }
        seen
    }
}
