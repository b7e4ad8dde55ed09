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

//! Dependency fan-out for a route's `resolve` map plus its template.

use crate::boundary::{
    BoundaryError, DependencyResolver, Locals, LocalValue, TemplateLoader, TEMPLATE_KEY,
};
use crate::definition::{ResolveEntry, RouteDefinition};
use futures::future::{try_join, try_join_all};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Why a transition failed after its route had already matched.
#[derive(Debug)]
pub enum ResolutionError {
    /// A `resolve` entry could not be materialized.
    Dependency {
        key: String,
        source: BoundaryError,
    },
    /// The route's template could not be loaded.
    Template {
        url: String,
        source: BoundaryError,
    },
}

impl Display for ResolutionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionError::Dependency { key, source } => {
                write!(f, "failed to resolve dependency '{key}': {source}")
            }
            ResolutionError::Template { url, source } => {
                write!(f, "failed to load template '{url}': {source}")
            }
        }
    }
}

impl Error for ResolutionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ResolutionError::Dependency { source, .. } => Some(source.as_ref()),
            ResolutionError::Template { source, .. } => Some(source.as_ref()),
        }
    }
}

/// Materializes every `resolve` entry and the template concurrently. The
/// first failure wins; a literal template takes precedence over a template
/// url, and whichever is present lands in the bag under [`TEMPLATE_KEY`].
pub(crate) async fn resolve_locals(
    resolver: &Arc<dyn DependencyResolver>,
    templates: &Arc<dyn TemplateLoader>,
    definition: &RouteDefinition,
) -> Result<Locals, ResolutionError> {
    let dependencies = try_join_all(definition.resolve.iter().map(|(key, entry)| async move {
        let value = materialize(resolver, entry)
            .await
            .map_err(|source| ResolutionError::Dependency {
                key: key.clone(),
                source,
            })?;
        Ok::<_, ResolutionError>((key.clone(), value))
    }));

    let template = async {
        if let Some(content) = &definition.template {
            return Ok(Some(content.clone()));
        }
        match &definition.template_url {
            Some(url) => templates
                .load(url)
                .await
                .map(Some)
                .map_err(|source| ResolutionError::Template {
                    url: url.clone(),
                    source,
                }),
            None => Ok(None),
        }
    };

    let (resolved, template) = try_join(dependencies, template).await?;

    let mut locals: Locals = resolved.into_iter().collect();
    if let Some(content) = template {
        let value: LocalValue = Arc::new(content);
        locals.insert(TEMPLATE_KEY.to_string(), value);
    }
    Ok(locals)
}

async fn materialize(
    resolver: &Arc<dyn DependencyResolver>,
    entry: &ResolveEntry,
) -> Result<LocalValue, BoundaryError> {
    match entry {
        ResolveEntry::Service(name) => resolver.get(name).await,
        ResolveEntry::Factory(factory) => resolver.invoke(factory.clone()).await,
    }
}
