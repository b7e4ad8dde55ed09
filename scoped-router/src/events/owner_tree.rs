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

//! Owner hierarchy and tree-scoped event broadcast.
//!
//! Owners form a tree rooted at a permanent root owner. Each owner carries
//! an explicit listener registry per event name; a broadcast starts at a
//! target owner and descends depth-first unless a listener stops descent
//! below the owner it ran on.

use crate::events::route_event::RouteEvent;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Unique owner identity, usable as a mapping key.
pub type OwnerId = u64;

/// Listener invoked for every route event delivered to its owner.
pub type RouteListener = Arc<dyn Fn(&RouteEvent, &mut EventControl) + Send + Sync>;
/// Teardown hook run while an owner's subtree is being destroyed.
pub type DestroyHook = Box<dyn FnOnce(OwnerId) -> BoxFuture<'static, ()> + Send>;

/// Propagation-control token handed to each listener invocation.
pub struct EventControl {
    target: OwnerId,
    stop: bool,
}

impl EventControl {
    /// Owner the broadcast was targeted at (its origin in the tree).
    pub fn target(&self) -> OwnerId {
        self.target
    }

    /// Stops propagation to descendants of the owner this listener ran on.
    pub fn stop_descent(&mut self) {
        self.stop = true;
    }
}

/// Owner-tree failures.
#[derive(Debug, Eq, PartialEq)]
pub enum OwnerTreeError {
    UnknownOwner(OwnerId),
    RootOwner,
}

impl Display for OwnerTreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnerTreeError::UnknownOwner(owner) => write!(f, "unknown owner {owner}"),
            OwnerTreeError::RootOwner => write!(f, "the root owner cannot be destroyed"),
        }
    }
}

impl Error for OwnerTreeError {}

struct OwnerNode {
    parent: Option<OwnerId>,
    children: Vec<OwnerId>,
    listeners: HashMap<&'static str, Vec<RouteListener>>,
    destroy_hooks: Vec<DestroyHook>,
}

impl OwnerNode {
    fn new(parent: Option<OwnerId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            listeners: HashMap::new(),
            destroy_hooks: Vec::new(),
        }
    }
}

/// The owner hierarchy plus its per-owner listener registries.
pub struct OwnerTree {
    nodes: Mutex<HashMap<OwnerId, OwnerNode>>,
    next_id: AtomicU64,
    root: OwnerId,
}

impl OwnerTree {
    pub(crate) fn new() -> Self {
        let root: OwnerId = 0;
        let mut nodes = HashMap::new();
        nodes.insert(root, OwnerNode::new(None));
        Self {
            nodes: Mutex::new(nodes),
            next_id: AtomicU64::new(root + 1),
            root,
        }
    }

    fn nodes(&self) -> MutexGuard<'_, HashMap<OwnerId, OwnerNode>> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The permanent root owner.
    pub fn root(&self) -> OwnerId {
        self.root
    }

    pub(crate) fn contains(&self, owner: OwnerId) -> bool {
        self.nodes().contains_key(&owner)
    }

    /// Parent of `owner`; `None` at the root.
    pub(crate) fn parent(&self, owner: OwnerId) -> Result<Option<OwnerId>, OwnerTreeError> {
        self.nodes()
            .get(&owner)
            .map(|node| node.parent)
            .ok_or(OwnerTreeError::UnknownOwner(owner))
    }

    pub(crate) fn create_owner(&self, parent: OwnerId) -> Result<OwnerId, OwnerTreeError> {
        let mut nodes = self.nodes();
        if !nodes.contains_key(&parent) {
            return Err(OwnerTreeError::UnknownOwner(parent));
        }
        let owner = self.next_id.fetch_add(1, Ordering::SeqCst);
        nodes.insert(owner, OwnerNode::new(Some(parent)));
        if let Some(parent_node) = nodes.get_mut(&parent) {
            parent_node.children.push(owner);
        }
        Ok(owner)
    }

    pub(crate) fn subscribe(
        &self,
        owner: OwnerId,
        event: &'static str,
        listener: RouteListener,
    ) -> Result<(), OwnerTreeError> {
        let mut nodes = self.nodes();
        let node = nodes
            .get_mut(&owner)
            .ok_or(OwnerTreeError::UnknownOwner(owner))?;
        node.listeners.entry(event).or_default().push(listener);
        Ok(())
    }

    pub(crate) fn has_listeners(&self, owner: OwnerId, event: &str) -> bool {
        self.nodes()
            .get(&owner)
            .map(|node| node.listeners.get(event).is_some_and(|l| !l.is_empty()))
            .unwrap_or(false)
    }

    pub(crate) fn on_destroy(
        &self,
        owner: OwnerId,
        hook: DestroyHook,
    ) -> Result<(), OwnerTreeError> {
        let mut nodes = self.nodes();
        let node = nodes
            .get_mut(&owner)
            .ok_or(OwnerTreeError::UnknownOwner(owner))?;
        node.destroy_hooks.push(hook);
        Ok(())
    }

    /// Delivers `event` to `target` and then depth-first to its descendants.
    /// Each owner's listeners get a fresh control token; descent below an
    /// owner stops when any of its listeners asked for it. The node lock is
    /// not held across listener invocations.
    pub(crate) fn broadcast(&self, target: OwnerId, event: &RouteEvent) {
        self.deliver(target, target, event);
    }

    fn deliver(&self, owner: OwnerId, target: OwnerId, event: &RouteEvent) {
        let (listeners, children) = {
            let nodes = self.nodes();
            let Some(node) = nodes.get(&owner) else {
                return;
            };
            (
                node.listeners.get(event.name()).cloned().unwrap_or_default(),
                node.children.clone(),
            )
        };

        let mut control = EventControl {
            target,
            stop: false,
        };
        for listener in &listeners {
            listener(event, &mut control);
        }
        if control.stop {
            return;
        }
        for child in children {
            self.deliver(child, target, event);
        }
    }

    /// Destroys `owner` and its whole subtree, running destroy hooks
    /// children-first. The root owner is permanent.
    pub(crate) async fn destroy(&self, owner: OwnerId) -> Result<(), OwnerTreeError> {
        if owner == self.root {
            return Err(OwnerTreeError::RootOwner);
        }

        let hooks = {
            let mut nodes = self.nodes();
            if !nodes.contains_key(&owner) {
                return Err(OwnerTreeError::UnknownOwner(owner));
            }

            // Post-order list of the subtree.
            let mut order = Vec::new();
            collect_subtree(&nodes, owner, &mut order);

            if let Some(parent) = nodes.get(&owner).and_then(|node| node.parent) {
                if let Some(parent_node) = nodes.get_mut(&parent) {
                    parent_node.children.retain(|child| *child != owner);
                }
            }

            let mut hooks = Vec::new();
            for id in order {
                if let Some(node) = nodes.remove(&id) {
                    for hook in node.destroy_hooks {
                        hooks.push((id, hook));
                    }
                }
            }
            hooks
        };

        for (id, hook) in hooks {
            hook(id).await;
        }
        Ok(())
    }
}

fn collect_subtree(nodes: &HashMap<OwnerId, OwnerNode>, owner: OwnerId, order: &mut Vec<OwnerId>) {
    if let Some(node) = nodes.get(&owner) {
        for child in &node.children {
            collect_subtree(nodes, *child, order);
        }
    }
    order.push(owner);
}
