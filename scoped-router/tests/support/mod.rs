// Shared by every integration-test binary; not all of them use every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use scoped_router::{
    BoundaryError, DependencyResolver, LocalValue, LocationSource, OwnerId, ResolveFactory,
    RouteEvent, Router, TemplateLoader,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use tokio::time::sleep;

pub(crate) fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// A replace-navigation the router issued through the location boundary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Replacement {
    PathAndSearch {
        path: String,
        search: HashMap<String, String>,
    },
    Url(String),
}

/// Settable location with a record of every replace-navigation.
pub(crate) struct MockLocation {
    path: Mutex<String>,
    search: Mutex<HashMap<String, String>>,
    replacements: Mutex<Vec<Replacement>>,
}

impl MockLocation {
    pub(crate) fn new(path: &str) -> Arc<Self> {
        Arc::new(Self {
            path: Mutex::new(path.to_string()),
            search: Mutex::new(HashMap::new()),
            replacements: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn set_path(&self, path: &str) {
        *self.path.lock().unwrap() = path.to_string();
    }

    pub(crate) fn set_search(&self, pairs: &[(&str, &str)]) {
        *self.search.lock().unwrap() = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
    }

    pub(crate) fn replacements(&self) -> Vec<Replacement> {
        self.replacements.lock().unwrap().clone()
    }
}

#[async_trait]
impl LocationSource for MockLocation {
    async fn path(&self) -> String {
        self.path.lock().unwrap().clone()
    }

    async fn search(&self) -> HashMap<String, String> {
        self.search.lock().unwrap().clone()
    }

    async fn replace_with(
        &self,
        path: &str,
        search: &HashMap<String, String>,
    ) -> Result<(), BoundaryError> {
        self.replacements.lock().unwrap().push(Replacement::PathAndSearch {
            path: path.to_string(),
            search: search.clone(),
        });
        Ok(())
    }

    async fn replace_url(&self, url: &str) -> Result<(), BoundaryError> {
        self.replacements
            .lock()
            .unwrap()
            .push(Replacement::Url(url.to_string()));
        Ok(())
    }
}

/// Injector over a fixed service map; factories run inline.
pub(crate) struct MockInjector {
    services: HashMap<String, LocalValue>,
}

impl MockInjector {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            services: HashMap::new(),
        })
    }

    pub(crate) fn with_service(name: &str, value: LocalValue) -> Arc<Self> {
        let mut services = HashMap::new();
        services.insert(name.to_string(), value);
        Arc::new(Self { services })
    }
}

#[async_trait]
impl DependencyResolver for MockInjector {
    async fn get(&self, name: &str) -> Result<LocalValue, BoundaryError> {
        self.services
            .get(name)
            .cloned()
            .ok_or_else(|| format!("no service '{name}'").into())
    }

    async fn invoke(&self, factory: Arc<dyn ResolveFactory>) -> Result<LocalValue, BoundaryError> {
        factory.resolve().await
    }
}

pub(crate) struct FailingFactory(pub(crate) &'static str);

#[async_trait]
impl ResolveFactory for FailingFactory {
    async fn resolve(&self) -> Result<LocalValue, BoundaryError> {
        Err(self.0.into())
    }
}

/// Template loader over a fixed url map, with an optional per-load delay.
pub(crate) struct MockTemplates {
    templates: HashMap<String, String>,
    delays: HashMap<String, Duration>,
}

impl MockTemplates {
    pub(crate) fn new() -> MockTemplatesBuilder {
        MockTemplatesBuilder {
            templates: HashMap::new(),
            delays: HashMap::new(),
        }
    }
}

pub(crate) struct MockTemplatesBuilder {
    templates: HashMap<String, String>,
    delays: HashMap<String, Duration>,
}

impl MockTemplatesBuilder {
    pub(crate) fn with(mut self, url: &str, content: &str) -> Self {
        self.templates.insert(url.to_string(), content.to_string());
        self
    }

    pub(crate) fn with_delayed(mut self, url: &str, content: &str, delay: Duration) -> Self {
        self.templates.insert(url.to_string(), content.to_string());
        self.delays.insert(url.to_string(), delay);
        self
    }

    pub(crate) fn build(self) -> Arc<MockTemplates> {
        Arc::new(MockTemplates {
            templates: self.templates,
            delays: self.delays,
        })
    }
}

#[async_trait]
impl TemplateLoader for MockTemplates {
    async fn load(&self, url: &str) -> Result<String, BoundaryError> {
        if let Some(delay) = self.delays.get(url) {
            sleep(*delay).await;
        }
        self.templates
            .get(url)
            .cloned()
            .ok_or_else(|| format!("template '{url}' not found").into())
    }
}

pub(crate) fn make_router(path: &str) -> (Arc<Router>, Arc<MockLocation>) {
    init_logging();
    let location = MockLocation::new(path);
    let router = Router::new(
        location.clone(),
        MockInjector::new(),
        MockTemplates::new().build(),
    );
    (router, location)
}

/// Subscribes to all four lifecycle events on `owner` and records their
/// names in delivery order.
pub(crate) fn record_events(router: &Arc<Router>, owner: OwnerId) -> Arc<Mutex<Vec<&'static str>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    for event in [
        "route_change_start",
        "route_change_success",
        "route_change_error",
        "route_update",
    ] {
        let seen = seen.clone();
        let listener: scoped_router::RouteListener = Arc::new(move |evt: &RouteEvent, _ctl| {
            seen.lock().unwrap().push(evt.name());
        });
        router
            .subscribe(owner, event, listener)
            .expect("listener registration should succeed");
    }
    seen
}
