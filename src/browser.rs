use std::fmt::Debug;

use serde_json::Value;
use thirtyfour::common::types::{ElementId, WindowHandle};
use thirtyfour::{By, ScriptArgs};

use crate::error::HarnessResult;

/// The browser automation capability the page objects are written against.
///
/// [`WebDriverSession`](crate::WebDriverSession) implements this by talking
/// to a W3C WebDriver server. Anything else that implements it (an
/// in-memory fake for tests, a recording proxy) can drive the same page
/// objects.
pub trait Browser: Debug {
    /// Load a URL in the focused window.
    fn get(&self, url: &str) -> HarnessResult<()>;

    fn refresh(&self) -> HarnessResult<()>;

    /// Find the first element matching `by`. Fails with
    /// [`HarnessError::ElementNotFound`](crate::HarnessError::ElementNotFound)
    /// if there is none.
    fn find_element(&self, by: By<'_>) -> HarnessResult<ElementId>;

    /// Find every element matching `by`. An empty vec is not an error.
    fn find_elements(&self, by: By<'_>) -> HarnessResult<Vec<ElementId>>;

    fn click(&self, element: &ElementId) -> HarnessResult<()>;

    fn send_keys(&self, element: &ElementId, text: &str) -> HarnessResult<()>;

    fn text(&self, element: &ElementId) -> HarnessResult<String>;

    fn attribute(&self, element: &ElementId, name: &str) -> HarnessResult<Option<String>>;

    fn is_displayed(&self, element: &ElementId) -> HarnessResult<bool>;

    fn is_selected(&self, element: &ElementId) -> HarnessResult<bool>;

    /// Run a synchronous script and return its result.
    fn execute_script(&self, script: &str, args: &ScriptArgs) -> HarnessResult<Value>;

    fn current_window_handle(&self) -> HarnessResult<WindowHandle>;

    fn window_handles(&self) -> HarnessResult<Vec<WindowHandle>>;

    fn switch_to_window(&self, handle: &WindowHandle) -> HarnessResult<()>;

    fn accept_alert(&self) -> HarnessResult<()>;

    fn dismiss_alert(&self) -> HarnessResult<()>;

    fn alert_text(&self) -> HarnessResult<String>;
}
