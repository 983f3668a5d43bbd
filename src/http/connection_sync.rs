use std::fmt::Debug;
use std::time::Duration;

use thirtyfour::RequestData;

use crate::error::HarnessResult;

/// Parameters used to construct an HTTP client for the WebDriver server.
#[derive(Debug, Clone)]
pub struct HttpClientCreateParams {
    pub server_url: String,
    pub timeout: Option<Duration>,
}

/// Trait for executing HTTP requests to selenium/webdriver.
/// As long as you have some struct that implements WebDriverHttpClientSync,
/// you can turn it into a WebDriver like this:
///
/// ```ignore
/// // Assuming MyHttpClient implements WebDriverHttpClientSync.
/// pub type MyWebDriver = GenericWebDriver<MyHttpClient>;
/// ```
pub trait WebDriverHttpClientSync: Debug + Send + Sync {
    fn create(params: HttpClientCreateParams) -> HarnessResult<Self>
    where
        Self: Sized;

    /// Execute the request and return the full JSON response body.
    fn execute(&self, request_data: RequestData) -> HarnessResult<serde_json::Value>;
}
