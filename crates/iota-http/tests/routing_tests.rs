use iota_http::{
    FileRouteSource, HttpError, RequestContext, RouteSource, RouteTable, Router, RoutingConfig,
};
use std::fs;

fn no_params() -> Vec<(String, String)> {
    Vec::new()
}

#[test]
fn test_static_route_matches_and_query_is_ignored() {
    let router = Router::new(RouteTable::from_patterns([("/test", "TestController")]));

    let mut request = RequestContext::get("/test?x=1");
    let matched = router.route(&mut request).unwrap();
    assert_eq!(matched.controller, "TestController");
    assert_eq!(request.param("x"), Some("1"));

    let mut request = RequestContext::get("/foobar");
    assert!(router.route(&mut request).is_none());
    assert!(request.matched_route().is_none());
}

#[test]
fn test_variables_are_stored_in_request() {
    let router = Router::new(RouteTable::from_patterns([(
        "/test/:var1/:var2",
        "TestController",
    )]));

    let mut request = RequestContext::get("/test/foo/bar");
    assert_eq!(router.route(&mut request).unwrap().controller, "TestController");
    assert_eq!(request.param("var1"), Some("foo"));
    assert_eq!(request.param("var2"), Some("bar"));

    assert!(router.route(&mut RequestContext::get("/baz")).is_none());
    assert!(router.route(&mut RequestContext::get("/test")).is_none());
}

#[test]
fn test_most_specific_route_wins() {
    let router = Router::new(RouteTable::from_patterns([
        ("/test/:var1/:var2", "TestController1"),
        ("/test/static/:var1", "TestController2"),
    ]));

    let mut request = RequestContext::get("/test/static/foo");
    let matched = router.route(&mut request).unwrap();
    assert_eq!(matched.controller, "TestController2");
    assert_eq!(matched.variables.len(), 1);
    assert_eq!(request.param("var1"), Some("foo"));
    assert_eq!(request.matched_route(), Some("/test/static/:var1"));
}

#[test]
fn test_equally_specific_routes_resolve_to_first_declared() {
    let router = Router::new(
        RouteTable::new()
            .route("by-section", "/:section/latest", "SectionController")
            .route("by-id", "/news/:id", "NewsController"),
    );

    let mut request = RequestContext::get("/news/latest");
    assert_eq!(router.route(&mut request).unwrap().route_name, "by-section");
}

#[test]
fn test_routes_under_base_url() {
    let router = Router::new(RouteTable::from_patterns([
        ("/static", "TestController1"),
        ("/:with/:vars", "TestController2"),
    ]))
    .with_base_url("/test");

    let mut request = RequestContext::get("/test/static");
    assert_eq!(router.route(&mut request).unwrap().controller, "TestController1");

    let mut request = RequestContext::get("/test/foo/bar");
    assert_eq!(router.route(&mut request).unwrap().controller, "TestController2");

    assert!(router.route(&mut RequestContext::get("/static")).is_none());
    assert!(router.route(&mut RequestContext::get("/foo/bar")).is_none());
}

#[test]
fn test_url_recreates_route() {
    let router = Router::new(RouteTable::from_patterns([(
        "/test/:var1/:var2",
        "TestController",
    )]));

    assert_eq!(
        router
            .url("TestController", [("var1", "foo"), ("var2", "bar")])
            .unwrap(),
        "/test/foo/bar"
    );
}

#[test]
fn test_url_appends_leftover_params_in_order() {
    let router = Router::new(RouteTable::from_patterns([(
        "/test/:var1/:var2",
        "TestController",
    )]));

    let url = router
        .url(
            "TestController",
            [("var1", "foo"), ("var2", "bar"), ("q", "p"), ("alpha", "omega")],
        )
        .unwrap();
    assert_eq!(url, "/test/foo/bar?q=p&alpha=omega");
}

#[test]
fn test_url_encodes_params() {
    let router = Router::new(RouteTable::from_patterns([(
        "/test/:var1/:var2",
        "TestController",
    )]));

    let url = router
        .url(
            "TestController",
            [
                ("var1", "a path"),
                ("var2", "a=\"b\""),
                ("q", "/here"),
                ("alpha", "there?"),
            ],
        )
        .unwrap();
    assert_eq!(url, "/test/a%20path/a%3D%22b%22?q=%2Fhere&alpha=there%3F");
}

#[test]
fn test_url_index_selects_route_for_controller() {
    let router = Router::new(RouteTable::from_patterns([
        ("/resource", "TestController"),
        ("/alias", "TestController"),
        ("/shortcut", "TestController"),
    ]));

    assert_eq!(router.url("TestController", no_params()).unwrap(), "/resource");
    assert_eq!(router.url_at("TestController", no_params(), 1).unwrap(), "/alias");
    assert_eq!(router.url_at("TestController", no_params(), 2).unwrap(), "/shortcut");
    assert!(matches!(
        router.url_at("TestController", no_params(), 3),
        Err(HttpError::RouteIndexOutOfRange { available: 3, .. })
    ));
}

#[test]
fn test_url_round_trips_through_route() {
    let router = Router::new(
        RouteTable::new()
            .route("article", "/blog/:year/:slug", "ArticleController")
            .route("archive", "/blog/:year/archive", "ArchiveController"),
    )
    .with_base_url("/site");

    let url = router
        .url("article", [("year", "2008"), ("slug", "hello")])
        .unwrap();
    assert_eq!(url, "/site/blog/2008/hello");

    let mut request = RequestContext::get(url);
    let matched = router.route(&mut request).unwrap();
    assert_eq!(matched.route_name, "article");
    assert_eq!(request.param("slug"), Some("hello"));
}

#[test]
fn test_url_round_trips_values_needing_encoding() {
    let router = Router::new(RouteTable::new().route("item", "/items/:name", "ItemController"));

    for value in ["a b", "a/b", "a&b=c", "café", "50%+1", "?#"] {
        let url = router.url("item", [("name", value)]).unwrap();
        assert_eq!(url.matches('/').count(), 2, "{} encoded as {}", value, url);

        let mut request = RequestContext::get(url);
        let matched = router.route(&mut request).unwrap();
        assert_eq!(matched.route_name, "item");
        assert_eq!(request.param("name"), Some(value));
        assert_eq!(matched.variables["name"], value);
    }
}

#[test]
fn test_unknown_route_is_an_error() {
    let router = Router::new(RouteTable::from_patterns([("/test", "TestController")]));
    assert!(matches!(
        router.url("NoSuchController", no_params()),
        Err(HttpError::RouteNotFound { .. })
    ));
}

#[test]
fn test_abs_url_uses_request_host_and_scheme() {
    let router = Router::new(RouteTable::new().route("login", "/login", "LoginController"));
    let request = RequestContext::get("/").with_host("www.example.com");

    assert_eq!(
        router.abs_url(&request, "login", no_params(), None).unwrap(),
        "http://www.example.com/login"
    );
    assert_eq!(
        router.abs_url(&request, "login", no_params(), Some(true)).unwrap(),
        "https://www.example.com/login"
    );
}

#[test]
fn test_file_route_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("testRoutes.txt");
    fs::write(
        &path,
        "# routes\n\
         valid   /this/is/a/valid/route   MapsToThisController\n\
         broken\n",
    )
    .unwrap();

    let table = FileRouteSource::new(&path).load_routes().unwrap();
    assert_eq!(table.len(), 1);
    let route = table.get("valid").unwrap();
    assert_eq!(route.pattern, "/this/is/a/valid/route");
    assert_eq!(route.controller, "MapsToThisController");

    let missing = FileRouteSource::new(dir.path().join("nonExistent"));
    assert!(matches!(
        missing.load_routes(),
        Err(HttpError::RouteSource { .. })
    ));
}

#[test]
fn test_router_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.txt");
    fs::write(&path, "home / HomeController\nuser /users/:id UserController\n").unwrap();

    let config = RoutingConfig::default()
        .with_base_url("/app")
        .with_routes_file(&path)
        .with_default_https(true);
    let router = Router::from_config(&config).unwrap();

    assert_eq!(router.url("user", [("id", "3")]).unwrap(), "/app/users/3");
    let request = RequestContext::get("/").with_host("example.com");
    assert_eq!(
        router.abs_url(&request, "home", no_params(), None).unwrap(),
        "https://example.com/app/"
    );

    assert!(Router::from_config(&RoutingConfig::default()).is_err());
}
