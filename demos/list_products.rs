//! Demonstrates enumerating a paginated collection and probing credentials against a mock
//! Upgates API served by `httpmock`.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use upgates_client::{
	client::ClientBuilder,
	http::ReqwestHttpClient,
	request::QueryParams,
	reqwest::{blocking::Client, redirect::Policy},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start();
	let root_mock = server.mock(|when, then| {
		when.method(GET).path("/api/v2");
		then.status(404).body("{\"message\":\"Not found\"}");
	});
	let first_mock = server.mock(|when, then| {
		when.method(GET).path("/api/v2/products").query_param("language", "cs");
		then.status(200).header("content-type", "application/json").body(
			"{\"products\":[{\"code\":\"TSHIRT-RED\"},{\"code\":\"TSHIRT-BLUE\"}],\"number_of_pages\":1,\"number_of_items\":2}",
		);
	});
	let http_client = ReqwestHttpClient::with_client(
		Client::builder().danger_accept_invalid_certs(true).redirect(Policy::none()).build()?,
	);
	let client = ClientBuilder::new()
		.base_url(server.url("/api/v2"))
		.credentials("demo-login", "demo-api-key")
		.allow_http(true)
		.build_with(http_client)?;

	println!("Credentials accepted: {}.", client.valid_credentials()?);

	let products = client.products(QueryParams::new().with("language", "cs"));

	println!("{:?} products across {} page(s):", products.size()?, products.total_pages()?);

	for product in &products {
		println!("- {}", product?["code"]);
	}

	root_mock.assert();
	first_mock.assert();

	Ok(())
}
