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

//! Canonical structured field keys and value-format helpers.

use crate::events::OwnerId;

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const OWNER: &str = "owner";
pub const PATH: &str = "path";
pub const ROUTE: &str = "route";
pub const ERR: &str = "err";
pub const REASON: &str = "reason";

pub const NONE: &str = "none";
pub const ROOT: &str = "root";

pub fn format_owner(owner: Option<OwnerId>) -> String {
    owner
        .map(|id| id.to_string())
        .unwrap_or_else(|| ROOT.to_string())
}

pub fn format_optional_path(path: Option<&str>) -> String {
    path.unwrap_or(NONE).to_string()
}
