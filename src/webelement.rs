use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use thirtyfour::common::command::MAGIC_ELEMENTID;
use thirtyfour::common::types::ElementId;
use thirtyfour::{By, ScriptArgs};

use crate::browser::Browser;
use crate::error::HarnessResult;

/// The WebElement struct encapsulates a single element on a page.
///
/// WebElement structs are generally not constructed manually, but rather
/// they are returned from [`WebElement::find`] or one of the
/// [`Appliance`](crate::Appliance) lookup helpers.
#[derive(Debug, Clone)]
pub struct WebElement<'a> {
    pub element_id: ElementId,
    browser: &'a dyn Browser,
}

impl<'a> WebElement<'a> {
    pub fn new(browser: &'a dyn Browser, element_id: ElementId) -> Self {
        WebElement {
            element_id,
            browser,
        }
    }

    /// Find the first element matching `by` in the focused window.
    pub fn find(browser: &'a dyn Browser, by: By<'_>) -> HarnessResult<Self> {
        let id = browser.find_element(by)?;
        Ok(WebElement::new(browser, id))
    }

    /// Find every element matching `by` in the focused window.
    pub fn find_all(browser: &'a dyn Browser, by: By<'_>) -> HarnessResult<Vec<Self>> {
        let ids = browser.find_elements(by)?;
        Ok(ids.into_iter().map(|id| WebElement::new(browser, id)).collect())
    }

    /// Get the text contents for this WebElement.
    pub fn text(&self) -> HarnessResult<String> {
        self.browser.text(&self.element_id)
    }

    pub fn get_attribute(&self, name: &str) -> HarnessResult<Option<String>> {
        self.browser.attribute(&self.element_id, name)
    }

    /// Click the WebElement.
    pub fn click(&self) -> HarnessResult<()> {
        self.browser.click(&self.element_id)
    }

    /// Send the specified input.
    pub fn send_keys(&self, keys: &str) -> HarnessResult<()> {
        self.browser.send_keys(&self.element_id, keys)
    }

    pub fn is_displayed(&self) -> HarnessResult<bool> {
        self.browser.is_displayed(&self.element_id)
    }

    pub fn is_selected(&self) -> HarnessResult<bool> {
        self.browser.is_selected(&self.element_id)
    }

    /// Run `script` with this element bound to `arguments[0]`.
    pub fn execute_script(&self, script: &str) -> HarnessResult<Value> {
        let mut args = ScriptArgs::new();
        args.push(&self)?;
        self.browser.execute_script(script, &args)
    }

    /// Set a checkbox to the given state, clicking only when it differs.
    pub fn fill_checkbox(&self, checked: bool) -> HarnessResult<()> {
        if self.is_selected()? != checked {
            self.click()?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for WebElement<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"(element="{}")"#, self.element_id)
    }
}

impl<'a> Serialize for WebElement<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(MAGIC_ELEMENTID, &self.element_id.to_string())?;
        map.end()
    }
}
