use thiserror::Error;
use thirtyfour::error::WebDriverError;

/// Errors raised while driving the appliance UI.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// A UI element is missing: the page structure changed or is not loaded yet.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A polled condition never became true.
    #[error("Timed out after {elapsed:?}: {message}")]
    Timeout { message: String, elapsed: std::time::Duration },

    /// Malformed image payload.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A navigation target (accordion link, quadicon, provider) is absent.
    #[error("Candidate not found: {0}")]
    CandidateNotFound(String),

    #[error("No alert present: {0}")]
    NoSuchAlert(String),

    #[error("No flash message matching {expected:?} (found: {found:?})")]
    FlashMessageMissing { expected: String, found: Vec<String> },

    /// Any other error reported by the WebDriver server.
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] WebDriverError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;

impl HarnessError {
    /// Map an error response from the WebDriver server. Missing elements
    /// and alerts get their own variants; everything else is wrapped.
    pub fn from_response(status: u16, body: String) -> Self {
        match WebDriverError::parse(status, body) {
            e @ WebDriverError::NoSuchElement(_) => HarnessError::ElementNotFound(e.to_string()),
            e @ WebDriverError::StaleElementReference(_) => {
                HarnessError::ElementNotFound(e.to_string())
            }
            e @ WebDriverError::NoSuchAlert(_) => HarnessError::NoSuchAlert(e.to_string()),
            e => HarnessError::WebDriver(e),
        }
    }

    /// True for the "thing is not on the page" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(self, HarnessError::ElementNotFound(_) | HarnessError::CandidateNotFound(_))
    }
}

pub(crate) fn no_such_element(what: &str) -> HarnessError {
    HarnessError::ElementNotFound(what.to_string())
}
