//! HTTP clients for the browser.
//!
//! `FetchTransport` runs the shared API clients on `fetch` via gloo-net.

use anyhow::anyhow;
use async_trait::async_trait;
use gloo_net::http::{Method as HttpMethod, RequestBuilder};
use hb_api_client::{
    AdminClient, ApiRequest, ApiResponse, ClientConfig, HttpTransport, Method, StorefrontClient,
};
use hb_api_types::{CheckoutRequest, Order};
use hb_storage::JsonStore;
use std::rc::Rc;
use tracing::{info, warn};

/// Storefront calls fall back to canned data while there is no backend.
pub const DEV_MODE: bool = true;

#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> anyhow::Result<ApiResponse> {
        let method = match request.method {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
            Method::Put => HttpMethod::PUT,
            Method::Patch => HttpMethod::PATCH,
            Method::Delete => HttpMethod::DELETE,
        };

        let mut builder = RequestBuilder::new(&request.url).method(method);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| anyhow!("build request: {e}"))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| anyhow!("fetch: {e}"))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| anyhow!("read body: {e}"))?;
        Ok(ApiResponse { status, body })
    }
}

pub fn storefront() -> StorefrontClient {
    StorefrontClient::new(ClientConfig::storefront(DEV_MODE), Rc::new(FetchTransport))
}

pub fn admin(store: JsonStore) -> AdminClient {
    AdminClient::new(ClientConfig::admin(), Rc::new(FetchTransport), store)
}

/// Tell the backend about an order placed locally. Failures only log: the
/// order is already in the local history.
pub async fn sync_checkout(order: Order) {
    let request = CheckoutRequest {
        items: order
            .items
            .iter()
            .map(|line| hb_api_types::CartItem {
                name: line.name.clone(),
                price: line.price,
                image: String::new(),
                quantity: line.qty,
            })
            .collect(),
        total: order.total,
    };
    match storefront().checkout(&request).await {
        Ok(_) => info!(order = %order.id, "order sent to backend"),
        Err(err) => warn!(order = %order.id, "order not sent to backend: {err}"),
    }
}
