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

mod support;

use scoped_router::{
    RedirectFn, RedirectTarget, ResolveEntry, RouteDefinition, Router, TEMPLATE_KEY,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use support::{
    record_events, FailingFactory, MockInjector, MockLocation, MockTemplates, Replacement,
};
use tokio::time::sleep;

fn template_of(route: &Arc<scoped_router::RouteMatch>) -> String {
    route
        .locals()
        .expect("locals should be attached")
        .get(TEMPLATE_KEY)
        .expect("template local should be present")
        .downcast_ref::<String>()
        .expect("template local should be a String")
        .clone()
}

#[tokio::test]
async fn full_transition_commits_route_with_resolved_template() {
    let (router, _location) = support::make_router("/books/42");
    router
        .when(
            "/books/:bookId",
            RouteDefinition::new().controller("BookCtrl").template("<book/>"),
        )
        .await
        .unwrap();
    let events = record_events(&router, router.root_owner());

    router.handle_location_change().await;

    let current = router.current().await.expect("route should be committed");
    assert_eq!(current.path_params()["bookId"], "42");
    assert_eq!(current.definition().controller.as_deref(), Some("BookCtrl"));
    assert_eq!(template_of(&current), "<book/>");
    assert_eq!(
        *events.lock().unwrap(),
        ["route_change_start", "route_change_success"]
    );
}

#[tokio::test]
async fn no_route_and_nothing_committed_is_a_no_op() {
    let (router, _location) = support::make_router("/nowhere");
    router
        .when("/books/:bookId", RouteDefinition::new().template("<book/>"))
        .await
        .unwrap();
    let events = record_events(&router, router.root_owner());

    router.handle_location_change().await;

    assert!(router.current().await.is_none());
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn fallback_catches_unmatched_locations() {
    let (router, _location) = support::make_router("/nowhere");
    router
        .when("/books/:bookId", RouteDefinition::new().template("<book/>"))
        .await
        .unwrap();
    router
        .otherwise(RouteDefinition::new().template("<missing/>"))
        .await;

    router.handle_location_change().await;

    let current = router.current().await.expect("fallback should be committed");
    assert!(current.path_params().is_empty());
    assert_eq!(template_of(&current), "<missing/>");
}

#[tokio::test]
async fn query_only_change_reuses_route_when_reload_on_search_is_off() {
    let (router, location) = support::make_router("/books/42");
    router
        .when(
            "/books/:bookId",
            RouteDefinition::new()
                .template("<book/>")
                .reload_on_search(false),
        )
        .await
        .unwrap();

    router.handle_location_change().await;
    let first = router.current().await.unwrap();

    let events = record_events(&router, router.root_owner());
    location.set_search(&[("page", "2")]);
    router.handle_location_change().await;

    let second = router.current().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.params()["page"], "2");
    assert_eq!(*events.lock().unwrap(), ["route_update"]);
}

#[tokio::test]
async fn query_only_change_runs_full_transition_by_default() {
    let (router, location) = support::make_router("/books/42");
    router
        .when("/books/:bookId", RouteDefinition::new().template("<book/>"))
        .await
        .unwrap();

    router.handle_location_change().await;
    let first = router.current().await.unwrap();

    let events = record_events(&router, router.root_owner());
    location.set_search(&[("page", "2")]);
    router.handle_location_change().await;

    let second = router.current().await.unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(
        *events.lock().unwrap(),
        ["route_change_start", "route_change_success"]
    );
}

#[tokio::test]
async fn reload_forces_a_fresh_transition_for_the_same_location() {
    let (router, _location) = support::make_router("/books/42");
    router
        .when("/books/:bookId", RouteDefinition::new().template("<book/>"))
        .await
        .unwrap();

    router.handle_location_change().await;
    let first = router.current().await.unwrap();

    let events = record_events(&router, router.root_owner());
    router.reload();
    sleep(Duration::from_millis(50)).await;

    let second = router.current().await.unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(
        *events.lock().unwrap(),
        ["route_change_start", "route_change_success"]
    );
}

#[tokio::test]
async fn superseded_resolution_is_dropped_silently() {
    support::init_logging();
    let location = MockLocation::new("/slow");
    let templates = MockTemplates::new()
        .with_delayed("slow.html", "<slow/>", Duration::from_millis(80))
        .with("fast.html", "<fast/>")
        .build();
    let router = Router::new(location.clone(), MockInjector::new(), templates);
    router
        .when("/slow", RouteDefinition::new().template_url("slow.html"))
        .await
        .unwrap();
    router
        .when("/fast", RouteDefinition::new().template_url("fast.html"))
        .await
        .unwrap();
    let events = record_events(&router, router.root_owner());

    let slow_navigation = {
        let router = router.clone();
        tokio::spawn(async move { router.handle_location_change().await })
    };
    sleep(Duration::from_millis(20)).await;

    location.set_path("/fast");
    router.handle_location_change().await;
    slow_navigation.await.unwrap();

    let current = router.current().await.unwrap();
    assert_eq!(template_of(&current), "<fast/>");
    // The slow navigation announced its start but its resolution lost the
    // race and never announced success.
    assert_eq!(
        *events.lock().unwrap(),
        [
            "route_change_start",
            "route_change_start",
            "route_change_success"
        ]
    );
}

#[tokio::test]
async fn failed_resolution_announces_error_and_leaves_route_committed() {
    support::init_logging();
    let location = MockLocation::new("/books/42");
    let router = Router::new(
        location,
        MockInjector::new(),
        MockTemplates::new().build(),
    );
    router
        .when(
            "/books/:bookId",
            RouteDefinition::new()
                .template("<book/>")
                .resolve("data", ResolveEntry::Factory(Arc::new(FailingFactory("boom")))),
        )
        .await
        .unwrap();
    let events = record_events(&router, router.root_owner());

    router.handle_location_change().await;

    let current = router.current().await.expect("failed route stays committed");
    assert!(current.locals().is_none());
    assert_eq!(
        *events.lock().unwrap(),
        ["route_change_start", "route_change_error"]
    );
}

#[tokio::test]
async fn missing_service_dependency_fails_the_transition() {
    support::init_logging();
    let location = MockLocation::new("/books/42");
    let router = Router::new(
        location,
        MockInjector::with_service("catalog", Arc::new("shelf".to_string())),
        MockTemplates::new().build(),
    );
    router
        .when(
            "/books/:bookId",
            RouteDefinition::new()
                .template("<book/>")
                .resolve("gone", ResolveEntry::Service("unregistered".to_string())),
        )
        .await
        .unwrap();
    let events = record_events(&router, router.root_owner());

    router.handle_location_change().await;

    assert_eq!(
        *events.lock().unwrap(),
        ["route_change_start", "route_change_error"]
    );
}

#[tokio::test]
async fn literal_redirect_interpolates_and_replace_navigates() {
    let (router, location) = support::make_router("/foo/7");
    router
        .when(
            "/foo/:id",
            RouteDefinition::new().redirect_to(RedirectTarget::Path("/bar/:id".to_string())),
        )
        .await
        .unwrap();
    router
        .when("/bar/:id", RouteDefinition::new().template("<bar/>"))
        .await
        .unwrap();
    let events = record_events(&router, router.root_owner());

    router.handle_location_change().await;

    assert_eq!(
        location.replacements(),
        [Replacement::PathAndSearch {
            path: "/bar/7".to_string(),
            search: HashMap::new(),
        }]
    );
    // Consumption happened on a copy; the committed match keeps its params.
    let current = router.current().await.unwrap();
    assert_eq!(current.params()["id"], "7");

    // The host applies the replacement and reports it back.
    location.set_path("/bar/7");
    router.handle_location_change().await;
    assert_eq!(template_of(&router.current().await.unwrap()), "<bar/>");
    assert_eq!(
        *events.lock().unwrap(),
        [
            "route_change_start",
            "route_change_success",
            "route_change_start",
            "route_change_success"
        ]
    );
}

#[tokio::test]
async fn redirecting_route_still_settles_while_it_stays_current() {
    let (router, location) = support::make_router("/old/3");
    router
        .when(
            "/old/:id",
            RouteDefinition::new().redirect_to(RedirectTarget::Path("/new/:id".to_string())),
        )
        .await
        .unwrap();
    let events = record_events(&router, router.root_owner());

    // No follow-up navigation arrives, so the redirecting route remains
    // committed and its own resolution runs to completion.
    router.handle_location_change().await;

    assert_eq!(location.replacements().len(), 1);
    assert_eq!(
        *events.lock().unwrap(),
        ["route_change_start", "route_change_success"]
    );
}

#[tokio::test]
async fn leftover_params_become_the_redirect_query() {
    let (router, location) = support::make_router("/foo/7");
    location.set_search(&[("lang", "en")]);
    router
        .when(
            "/foo/:id",
            RouteDefinition::new().redirect_to(RedirectTarget::Path("/bar/:id".to_string())),
        )
        .await
        .unwrap();

    router.handle_location_change().await;

    let mut expected_search = HashMap::new();
    expected_search.insert("lang".to_string(), "en".to_string());
    assert_eq!(
        location.replacements(),
        [Replacement::PathAndSearch {
            path: "/bar/7".to_string(),
            search: expected_search,
        }]
    );
}

struct ComputedRedirect;

impl RedirectFn for ComputedRedirect {
    fn redirect(
        &self,
        path_params: &HashMap<String, String>,
        _path: &str,
        _search: &HashMap<String, String>,
    ) -> String {
        format!("/computed/{}", path_params["id"])
    }
}

#[tokio::test]
async fn computed_redirect_replaces_the_whole_url() {
    let (router, location) = support::make_router("/foo/9");
    router
        .when(
            "/foo/:id",
            RouteDefinition::new().redirect_to(RedirectTarget::Compute(Arc::new(ComputedRedirect))),
        )
        .await
        .unwrap();

    router.handle_location_change().await;

    assert_eq!(
        location.replacements(),
        [Replacement::Url("/computed/9".to_string())]
    );
}

#[tokio::test]
async fn trailing_slash_form_redirects_to_the_registered_path() {
    let (router, location) = support::make_router("/books/42/");
    router
        .when("/books/:bookId", RouteDefinition::new().template("<book/>"))
        .await
        .unwrap();

    router.handle_location_change().await;

    assert_eq!(
        location.replacements(),
        [Replacement::PathAndSearch {
            path: "/books/42".to_string(),
            search: HashMap::new(),
        }]
    );
}
