// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ApiError, AuthMode, AuthRequest, AuthResponse, FinanceApi};
use crate::auth::AuthStore;
use crate::models::{
    CategorySummary, NewTransaction, Period, PeriodSummary, TransactionFilter, TransactionPatch,
    TransactionRecord,
};
use chrono::NaiveDate;
use reqwest::blocking::{Client, Request, RequestBuilder, Response};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, warn};

const UA: &str = concat!(
    "fintrack/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/fintrack)"
);

pub fn http_client(timeout: Duration) -> Result<Client, ApiError> {
    let c = Client::builder().timeout(timeout).user_agent(UA).build()?;
    Ok(c)
}

/// Hook run on every outgoing request after it is built and before it is sent.
pub trait RequestInterceptor {
    fn intercept(&self, req: &mut Request);
}

/// Attaches the session's bearer token, read from the store per request.
pub struct RequestAuthenticator {
    auth: Rc<AuthStore>,
}

impl RequestAuthenticator {
    pub fn new(auth: Rc<AuthStore>) -> Self {
        Self { auth }
    }
}

impl RequestInterceptor for RequestAuthenticator {
    fn intercept(&self, req: &mut Request) {
        let headers = req.headers_mut();
        headers.remove(AUTHORIZATION);
        let Some(token) = self.auth.token() else {
            return;
        };
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut v) => {
                v.set_sensitive(true);
                headers.insert(AUTHORIZATION, v);
            }
            Err(_) => warn!("stored token is not a valid header value; sending request without it"),
        }
    }
}

pub struct ApiClient {
    http: Client,
    base: Url,
    interceptors: Vec<Box<dyn RequestInterceptor>>,
}

impl ApiClient {
    pub fn new(http: Client, base: Url) -> Self {
        Self {
            http,
            base,
            interceptors: Vec::new(),
        }
    }

    pub fn with_interceptor(mut self, i: impl RequestInterceptor + 'static) -> Self {
        self.interceptors.push(Box::new(i));
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self
            .base
            .join(path)
            .map_err(|_| ApiError::Endpoint(path.to_string()))?;
        Ok(self.http.request(method, url))
    }

    /// Builds the request and runs every interceptor over it.
    pub fn finalize(&self, rb: RequestBuilder) -> Result<Request, ApiError> {
        let mut req = rb.build()?;
        for i in &self.interceptors {
            i.intercept(&mut req);
        }
        Ok(req)
    }

    pub fn dispatch(&self, rb: RequestBuilder) -> Result<Response, ApiError> {
        let req = self.finalize(rb)?;
        debug!(
            method = %req.method(),
            url = %req.url(),
            authenticated = req.headers().contains_key(AUTHORIZATION),
            "dispatching request"
        );
        Ok(self.http.execute(req)?)
    }
}

fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = error_message(resp).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// The `error` field of a JSON failure body, if there is one.
fn error_message(resp: Response) -> Option<String> {
    let v: Value = serde_json::from_str(&resp.text().ok()?).ok()?;
    v.get("error")?.as_str().map(str::to_string)
}

/// A non-array body is read as an empty list.
pub fn normalize_transaction_list(v: Value) -> Result<Vec<TransactionRecord>, ApiError> {
    if !v.is_array() {
        debug!("transaction list payload is not an array; treating as empty");
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(v)?)
}

fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let body = resp.text()?;
    Ok(serde_json::from_str(&body)?)
}

impl FinanceApi for ApiClient {
    fn authenticate(&self, mode: AuthMode, req: &AuthRequest) -> Result<AuthResponse, ApiError> {
        let resp = self.dispatch(self.request(Method::POST, mode.path())?.json(req))?;
        if !resp.status().is_success() {
            let msg = error_message(resp).unwrap_or_else(|| "Failed".to_string());
            return Err(ApiError::Authentication(msg));
        }
        read_json(resp)
    }

    fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRecord>, ApiError> {
        let rb = self
            .request(Method::GET, "api/transactions")?
            .query(&filter.query_pairs());
        let v: Value = read_json(check_status(self.dispatch(rb)?)?)?;
        normalize_transaction_list(v)
    }

    fn create_transaction(&self, tx: &NewTransaction) -> Result<TransactionRecord, ApiError> {
        let rb = self.request(Method::POST, "api/transactions")?.json(tx);
        read_json(check_status(self.dispatch(rb)?)?)
    }

    fn update_transaction(
        &self,
        id: i64,
        patch: &TransactionPatch,
    ) -> Result<TransactionRecord, ApiError> {
        let rb = self
            .request(Method::PUT, &format!("api/transactions/{}", id))?
            .json(patch);
        read_json(check_status(self.dispatch(rb)?)?)
    }

    fn delete_transaction(&self, id: i64) -> Result<(), ApiError> {
        let rb = self.request(Method::DELETE, &format!("api/transactions/{}", id))?;
        check_status(self.dispatch(rb)?)?;
        Ok(())
    }

    fn summary(&self, period: Period) -> Result<PeriodSummary, ApiError> {
        let rb = self
            .request(Method::GET, "api/summary")?
            .query(&[("period", period.as_str())]);
        let v: Value = read_json(check_status(self.dispatch(rb)?)?)?;
        if v.is_null() {
            return Ok(PeriodSummary::default());
        }
        Ok(serde_json::from_value(v)?)
    }

    fn category_summary(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<CategorySummary, ApiError> {
        let mut q = Vec::new();
        if let Some(d) = from {
            q.push(("from", d.to_string()));
        }
        if let Some(d) = to {
            q.push(("to", d.to_string()));
        }
        let rb = self.request(Method::GET, "api/category-summary")?.query(&q);
        let v: Value = read_json(check_status(self.dispatch(rb)?)?)?;
        if v.is_null() {
            return Ok(CategorySummary::default());
        }
        Ok(serde_json::from_value(v)?)
    }

    fn health(&self) -> Result<(), ApiError> {
        let rb = self.request(Method::GET, "api/health")?;
        check_status(self.dispatch(rb)?)?;
        Ok(())
    }
}
