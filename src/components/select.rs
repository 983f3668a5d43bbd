// This wrapper is a fairly direct port of the Select class from the python
// selenium library at:
// https://github.com/SeleniumHQ/selenium/blob/trunk/py/selenium/webdriver/support/select.py

// Copyright 2021 Stephen Pryde and the thirtyfour_sync contributors
// Derived (and modified) from the Selenium project at https://github.com/SeleniumHQ/selenium.
//
// Copyright 2011-2020 Software Freedom Conservancy
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thirtyfour::By;

use crate::browser::Browser;
use crate::error::{no_such_element, HarnessResult};
use crate::webelement::WebElement;

/// Escape the specified string for use as an XPath string literal.
pub fn escape_string(value: &str) -> String {
    let contains_single = value.contains('\'');
    let contains_double = value.contains('\"');
    if contains_single && contains_double {
        let mut result = vec![String::from("concat(")];
        for substring in value.split('\"') {
            result.push(format!("\"{}\"", substring));
            result.push(String::from(", '\"', "));
        }
        result.pop();
        return result.join("") + ")";
    }

    if contains_double {
        format!("'{}'", value)
    } else {
        format!("\"{}\"", value)
    }
}

/// Get the longest word in the specified string.
fn get_longest_token(value: &str) -> &str {
    let mut longest = "";
    for item in value.split(' ') {
        if item.len() > longest.len() {
            longest = item;
        }
    }
    longest
}

/// Convenience wrapper for `<select>` elements, addressed by XPath so that
/// options can be located without element-relative lookups.
#[derive(Debug, Clone)]
pub struct SelectElement<'a> {
    browser: &'a dyn Browser,
    xpath: String,
    multiple: bool,
}

impl<'a> SelectElement<'a> {
    /// Wrap the `<select>` element with the given id.
    pub fn by_id(browser: &'a dyn Browser, id: &str) -> HarnessResult<SelectElement<'a>> {
        let xpath = format!("//select[@id={}]", escape_string(id));
        let element = WebElement::find(browser, By::XPath(&xpath))?;
        let multiple = element.get_attribute("multiple")?.filter(|x| x != "false").is_some();
        Ok(SelectElement {
            browser,
            xpath,
            multiple,
        })
    }

    fn find_options(&self, condition: &str) -> HarnessResult<Vec<WebElement<'a>>> {
        WebElement::find_all(self.browser, By::XPath(&format!("{}//option[{}]", self.xpath, condition)))
    }

    /// Return a vec of all options belonging to this select tag.
    pub fn options(&self) -> HarnessResult<Vec<WebElement<'a>>> {
        WebElement::find_all(self.browser, By::XPath(&format!("{}//option", self.xpath)))
    }

    /// Select options with visible text matching the specified text.
    /// That is, when given "Bar" this would select an option like:
    ///
    /// `<option value="foo">Bar</option>`
    pub fn select_by_visible_text(&self, text: &str) -> HarnessResult<()> {
        let options = self.find_options(&format!("normalize-space(.) = {}", escape_string(text)))?;

        let mut matched = false;
        for option in &options {
            option.fill_checkbox(true)?;
            if !self.multiple {
                return Ok(());
            }
            matched = true;
        }

        if options.is_empty() && text.contains(' ') {
            let substring_without_space = get_longest_token(text);
            let candidates = if substring_without_space.is_empty() {
                self.options()?
            } else {
                self.find_options(&format!("contains(., {})", escape_string(substring_without_space)))?
            };
            for candidate in candidates {
                if text == candidate.text()? {
                    candidate.fill_checkbox(true)?;
                    if !self.multiple {
                        return Ok(());
                    }
                    matched = true;
                }
            }
        }

        if !matched {
            Err(no_such_element(&format!("Could not locate element with visible text: {}", text)))
        } else {
            Ok(())
        }
    }
}
