#[cfg(test)]
pub mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use reqwest::Method;
    use serde_json::Value;

    use crate::api::client::mock::{register_mock, MockResponse, TestResponder};
    use crate::api::types::ApiError;

    pub const GET: Method = Method::GET;
    pub const POST: Method = Method::POST;
    pub const PATCH: Method = Method::PATCH;
    pub const DELETE: Method = Method::DELETE;

    /// In-process stand-in for the backend: routes are matched on method and
    /// path, and every answered request is recorded so tests can assert
    /// which calls were (or were not) made.
    #[derive(Clone)]
    pub struct MockServer {
        inner: Arc<Mutex<Inner>>,
        base: String,
    }

    #[derive(Default)]
    struct Inner {
        routes: Vec<Route>,
        hits: Vec<(Method, String)>,
    }

    #[derive(Clone)]
    struct Route {
        method: Method,
        path: String,
        status: u16,
        body: Value,
    }

    impl MockServer {
        pub fn start() -> Self {
            static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
            let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
            Self {
                inner: Arc::new(Mutex::new(Inner::default())),
                base: format!("http://mock-{}", id),
            }
        }

        /// Registers this server for `base + path` and returns the full
        /// base URL to hand to `ApiClient::new_with_base_url`.
        pub fn url(&self, path: &str) -> String {
            let base_url = format!("{}{}", self.base, path);
            register_mock(base_url.clone(), Arc::new(self.clone()));
            base_url
        }

        pub fn mock<F>(&self, f: F)
        where
            F: FnOnce(&mut When, &mut Then),
        {
            let mut when = When::default();
            let mut then = Then::default();
            f(&mut when, &mut then);

            let mut inner = self.inner.lock().expect("mock lock");
            inner.routes.push(Route {
                method: when.method.expect("mock requires method"),
                path: when.path.expect("mock requires path"),
                status: then.status.unwrap_or(200),
                body: then.body.unwrap_or_else(|| serde_json::json!({})),
            });
        }

        /// Requests answered so far, in arrival order, as (method, full URL).
        pub fn received(&self) -> Vec<(Method, String)> {
            self.inner.lock().expect("mock lock").hits.clone()
        }
    }

    impl TestResponder for MockServer {
        fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError> {
            let method = request.method().clone();
            let path = request.url().path().to_string();
            let mut inner = self.inner.lock().map_err(|_| ApiError::unknown("mock lock"))?;
            inner.hits.push((method.clone(), request.url().to_string()));

            let route = inner
                .routes
                .iter()
                .rev()
                .find(|route| route.method == method && route.path == path)
                .cloned();

            route
                .map(|route| MockResponse::json(route.status, route.body))
                .ok_or_else(|| ApiError::unknown(format!("No mock for {} {}", method, path)))
        }
    }

    #[derive(Default)]
    pub struct When {
        method: Option<Method>,
        path: Option<String>,
    }

    impl When {
        pub fn method(&mut self, method: Method) -> &mut Self {
            self.method = Some(method);
            self
        }

        pub fn path(&mut self, path: &str) -> &mut Self {
            self.path = Some(path.to_string());
            self
        }
    }

    #[derive(Default)]
    pub struct Then {
        status: Option<u16>,
        body: Option<Value>,
    }

    impl Then {
        pub fn status(&mut self, status: u16) -> &mut Self {
            self.status = Some(status);
            self
        }

        pub fn json_body(&mut self, body: Value) -> &mut Self {
            self.body = Some(body);
            self
        }
    }
}
