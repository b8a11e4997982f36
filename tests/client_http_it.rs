// crates.io
use httpmock::prelude::*;
// self
use upgates_client::{
	client::{Client, ClientBuilder},
	error::Error,
	http::ReqwestHttpClient,
	request::QueryParams,
	reqwest::{blocking::Client as BlockingClient, redirect::Policy},
};

const CLIENT_ID: &str = "it-client";
const CLIENT_SECRET: &str = "it-secret";
const AUTHORIZATION: &str = "Basic aXQtY2xpZW50Oml0LXNlY3JldA==";

/// Reqwest transport that accepts the self-signed certificates produced by `httpmock`.
fn test_http_client() -> ReqwestHttpClient {
	let client = BlockingClient::builder()
		.danger_accept_invalid_certs(true)
		.redirect(Policy::none())
		.build()
		.expect("Failed to build insecure reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

fn build_client(server: &MockServer) -> Client {
	ClientBuilder::new()
		.base_url(server.url("/api/v2"))
		.credentials(CLIENT_ID, CLIENT_SECRET)
		.allow_http(true)
		.build_with(test_http_client())
		.expect("Client should build against the mock server.")
}

fn page_body(data_key: &str, items: &str, total_pages: u64, total_items: u64) -> String {
	format!(
		"{{\"{data_key}\":{items},\"number_of_pages\":{total_pages},\"number_of_items\":{total_items}}}"
	)
}

#[test]
fn products_are_enumerated_across_pages_with_basic_auth() {
	let server = MockServer::start();
	let client = build_client(&server);
	let first = server.mock(|when, then| {
		when.method(GET)
			.path("/api/v2/products")
			.query_param("page", "1")
			.header("authorization", AUTHORIZATION)
			.header("content-type", "application/json");
		then.status(200)
			.header("content-type", "application/json")
			.body(page_body("products", "[{\"code\":\"A\"},{\"code\":\"B\"}]", 3, 5));
	});
	let middle = server.mock(|when, then| {
		when.method(GET).path("/api/v2/products").query_param("page", "2");
		then.status(200)
			.header("content-type", "application/json")
			.body(page_body("products", "[{\"code\":\"C\"},{\"code\":\"D\"}]", 3, 5));
	});
	let last = server.mock(|when, then| {
		when.method(GET).path("/api/v2/products").query_param("page", "3");
		then.status(200)
			.header("content-type", "application/json")
			.body(page_body("products", "[{\"code\":\"E\"}]", 3, 5));
	});
	let products = client.products(QueryParams::new().with("page", 1));
	let codes = products
		.iter()
		.map(|item| item.map(|value| value["code"].as_str().unwrap_or_default().to_owned()))
		.collect::<Result<Vec<_>, _>>()
		.expect("Traversal should succeed.");

	assert_eq!(codes, ["A", "B", "C", "D", "E"]);
	assert_eq!(products.size().expect("Size should be cached."), Some(5));

	products.collect_all().expect("Second traversal should succeed.");

	first.assert_calls(1);
	middle.assert_calls(2);
	last.assert_calls(1);
}

#[test]
fn redirects_are_followed_up_to_four_hops() {
	let server = MockServer::start();
	let client = build_client(&server);
	let hops = (1..=4)
		.map(|hop| {
			let from = if hop == 1 { "/api/v2/categories".to_owned() } else { format!("/hop{}", hop - 1) };
			let to = server.url(format!("/hop{hop}"));

			server.mock(move |when, then| {
				when.method(GET).path(from);
				then.status(301).header("location", to);
			})
		})
		.collect::<Vec<_>>();
	let target = server.mock(|when, then| {
		when.method(GET).path("/hop4").header("authorization", AUTHORIZATION);
		then.status(200)
			.header("content-type", "application/json")
			.body(page_body("categories", "[{\"id\":1}]", 1, 1));
	});
	let categories = client
		.categories(QueryParams::new())
		.collect_all()
		.expect("Four redirect hops should be followed.");

	assert_eq!(categories.len(), 1);

	for hop in &hops {
		hop.assert();
	}

	target.assert();
}

#[test]
fn fifth_redirect_hop_fails() {
	let server = MockServer::start();
	let client = build_client(&server);
	let looping = server.mock(|when, then| {
		when.method(GET).path("/api/v2/loop");
		then.status(301).header("location", server.url("/api/v2/loop"));
	});
	let err = client.get("/loop", &QueryParams::new()).expect_err("Redirect loop should fail.");

	assert!(matches!(err, Error::TooManyRedirects { limit: 4 }));

	looping.assert_calls(5);
}

#[test]
fn rate_limit_is_not_retried() {
	let server = MockServer::start();
	let client = build_client(&server);
	let throttled = server.mock(|when, then| {
		when.method(GET).path("/api/v2/products");
		then.status(429).header("retry-after", "3");
	});
	let err = client
		.products(QueryParams::new())
		.collect_all()
		.expect_err("Rate limiting should surface to the caller.");

	match err {
		Error::TooManyRequests { retry_after } => {
			assert_eq!(retry_after, Some(std::time::Duration::from_secs(3)));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	throttled.assert_calls(1);
}

#[test]
fn unknown_errors_include_status_body_and_headers() {
	let server = MockServer::start();
	let client = build_client(&server);
	let failing = server.mock(|when, then| {
		when.method(GET).path("/api/v2/orders");
		then.status(500).header("x-request-id", "req-500").body("database unavailable");
	});
	let err = client.get("/orders", &QueryParams::new()).expect_err("500 should fail.");
	let message = err.to_string();

	assert!(message.starts_with("500: database unavailable: "), "{message}");
	assert!(message.contains("x-request-id"), "{message}");
	assert!(message.contains("req-500"), "{message}");

	failing.assert();
}

#[test]
fn valid_credentials_treats_root_404_as_accepted() {
	let server = MockServer::start();
	let client = build_client(&server);
	let root = server.mock(|when, then| {
		when.method(GET).path("/api/v2").header("authorization", AUTHORIZATION);
		then.status(404).body("{\"message\":\"Not found\"}");
	});

	assert!(client.valid_credentials().expect("Probe should succeed."));

	root.assert();
}

#[test]
fn valid_credentials_rejects_unauthorized() {
	let server = MockServer::start();
	let client = build_client(&server);
	let root = server.mock(|when, then| {
		when.method(GET).path("/api/v2");
		then.status(401).body("Unauthorized");
	});

	assert!(!client.valid_credentials().expect("401 should map to false."));

	root.assert();
}
