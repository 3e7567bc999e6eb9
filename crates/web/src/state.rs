use client::ApiClient;

/// Shared by every request. Holds no page data: page state is rebuilt from
/// each submitted form and dropped once the response is rendered.
#[derive(Clone, Debug)]
pub struct AppState {
    client: ApiClient,
}

impl AppState {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}
