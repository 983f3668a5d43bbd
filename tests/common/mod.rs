#![allow(dead_code)]

//! An in-memory browser for driving the page objects without Selenium.
//!
//! Pages are named sets of elements registered under the exact locator
//! the page objects build. Each window shows one page; clicks can load a
//! page, open a window, raise an alert or toggle selection. Element text
//! and presence can change over time, measured on the shared ManualClock.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use cfme_console::prelude::*;
use cfme_console::web_ui::css_id;
use cfme_console::{ConsoleSession, ElementId, ScriptArgs, WindowHandle};
use serde_json::{json, Value};
use thirtyfour::common::command::MAGIC_ELEMENTID;

pub const APPLIANCE_WINDOW: &str = "appliance-window";
pub const CONSOLE_WINDOW: &str = "console-window";
pub const BASE_URL: &str = "https://cfme.test";

/// A 1x1 transparent PNG.
pub const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Load(&'static str),
    OpenWindow(&'static str, &'static str),
    Alert(&'static str),
    Toggle,
}

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    text: Vec<(Duration, String)>,
    attrs: HashMap<String, String>,
    hidden: bool,
    selected: bool,
    from: Duration,
    until: Option<Duration>,
    on_click: Vec<Action>,
    script_result: Option<Value>,
}

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(self, text: &str) -> Self {
        self.text_at(Duration::ZERO, text)
    }

    /// From `at` onwards the element reads `text`.
    pub fn text_at(mut self, at: Duration, text: &str) -> Self {
        self.text.push((at, text.to_string()));
        self.text.sort_by_key(|(t, _)| *t);
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn appears_at(mut self, at: Duration) -> Self {
        self.from = at;
        self
    }

    pub fn gone_after(mut self, at: Duration) -> Self {
        self.until = Some(at);
        self
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.on_click.push(action);
        self
    }

    pub fn script_result(mut self, value: Value) -> Self {
        self.script_result = Some(value);
        self
    }

    fn present(&self, now: Duration) -> bool {
        now >= self.from && self.until.map_or(true, |until| now < until)
    }

    fn current_text(&self, now: Duration) -> String {
        self.text.iter().rev().find(|(t, _)| *t <= now).map(|(_, s)| s.clone()).unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct State {
    pub current: String,
    pub windows: Vec<String>,
    pub window_page: HashMap<String, String>,
    pub urls: HashMap<String, String>,
    /// Page name to `(locator, label)` pairs. Locators are keyed by their debug form.
    pub pages: HashMap<String, Vec<(String, String)>>,
    pub elements: HashMap<String, FakeElement>,
    pub alert: Option<String>,
    pub switches: Vec<String>,
    pub visited: Vec<String>,
    pub clicked: Vec<String>,
    pub typed: Vec<String>,
    pub accepted: Vec<String>,
    pub dismissed: Vec<String>,
    pub refreshes: u32,
}

#[derive(Debug)]
pub struct FakeBrowser {
    pub clock: ManualClock,
    pub state: RefCell<State>,
}

fn locator_key(by: By<'_>) -> String {
    format!("{:?}", by)
}

fn webdriver_error(error: &str, message: String) -> HarnessError {
    let body = json!({ "value": { "error": error, "message": message } });
    HarnessError::from_response(500, body.to_string())
}

impl FakeBrowser {
    pub fn new(clock: ManualClock) -> Self {
        let mut state = State::default();
        state.current = APPLIANCE_WINDOW.to_string();
        state.windows.push(APPLIANCE_WINDOW.to_string());
        state.window_page.insert(APPLIANCE_WINDOW.to_string(), String::from("blank"));
        FakeBrowser {
            clock,
            state: RefCell::new(state),
        }
    }

    /// Make `path` (relative to the appliance) load page `name`.
    pub fn route(&self, path: &str, name: &str) {
        self.state.borrow_mut().urls.insert(format!("{}{}", BASE_URL, path), name.to_string());
    }

    /// Register element `label` on page `page` under locator `by`.
    pub fn add(&self, page: &str, label: &str, by: By<'_>, element: FakeElement) {
        let mut state = self.state.borrow_mut();
        state.pages.entry(page.to_string()).or_default().push((locator_key(by), label.to_string()));
        state.elements.insert(label.to_string(), element);
    }

    /// Also match an already registered element under `by`.
    pub fn alias(&self, page: &str, label: &str, by: By<'_>) {
        let mut state = self.state.borrow_mut();
        state.pages.entry(page.to_string()).or_default().push((locator_key(by), label.to_string()));
    }

    pub fn remove(&self, label: &str) {
        let mut state = self.state.borrow_mut();
        for entries in state.pages.values_mut() {
            entries.retain(|(_, e)| e != label);
        }
        state.elements.remove(label);
    }

    pub fn show(&self, window: &str, page: &str) {
        let mut state = self.state.borrow_mut();
        if !state.windows.iter().any(|w| w == window) {
            state.windows.push(window.to_string());
        }
        state.window_page.insert(window.to_string(), page.to_string());
    }

    pub fn current_window(&self) -> String {
        self.state.borrow().current.clone()
    }

    pub fn current_page(&self) -> String {
        let state = self.state.borrow();
        state.window_page[&state.current].clone()
    }

    pub fn is_selected_label(&self, label: &str) -> bool {
        self.state.borrow().elements[label].selected
    }

    pub fn clicked(&self) -> Vec<String> {
        self.state.borrow().clicked.clone()
    }

    pub fn typed(&self) -> Vec<String> {
        self.state.borrow().typed.clone()
    }

    pub fn switches(&self) -> Vec<String> {
        self.state.borrow().switches.clone()
    }

    fn with_element<T, F>(&self, id: &ElementId, f: F) -> HarnessResult<T>
    where
        F: FnOnce(&FakeElement) -> T,
    {
        let state = self.state.borrow();
        match state.elements.get(&id.to_string()) {
            Some(element) if element.present(self.clock.now()) => Ok(f(element)),
            _ => Err(HarnessError::ElementNotFound(format!("stale element {}", id))),
        }
    }
}

impl FakeBrowser {
    /// Elements of the current page registered under `key` and present now.
    fn lookup(&self, key: &str) -> Vec<ElementId> {
        let state = self.state.borrow();
        let now = self.clock.now();
        let page = &state.window_page[&state.current];
        state
            .pages
            .get(page)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(b, label)| b == key && state.elements[label].present(now))
                    .map(|(_, label)| ElementId::from(label.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Browser for FakeBrowser {
    fn get(&self, url: &str) -> HarnessResult<()> {
        let mut state = self.state.borrow_mut();
        let page = state
            .urls
            .get(url)
            .cloned()
            .ok_or_else(|| webdriver_error("unknown url", url.to_string()))?;
        let current = state.current.clone();
        state.window_page.insert(current, page);
        state.visited.push(url.to_string());
        Ok(())
    }

    fn refresh(&self) -> HarnessResult<()> {
        self.state.borrow_mut().refreshes += 1;
        Ok(())
    }

    fn find_element(&self, by: By<'_>) -> HarnessResult<ElementId> {
        let key = locator_key(by);
        self.lookup(&key).into_iter().next().ok_or(HarnessError::ElementNotFound(key))
    }

    fn find_elements(&self, by: By<'_>) -> HarnessResult<Vec<ElementId>> {
        Ok(self.lookup(&locator_key(by)))
    }

    fn click(&self, element: &ElementId) -> HarnessResult<()> {
        if let Some(alert) = self.state.borrow().alert.clone() {
            return Err(webdriver_error("unexpected alert open", alert));
        }
        let actions = self.with_element(element, |e| e.on_click.clone())?;
        let mut state = self.state.borrow_mut();
        state.clicked.push(element.to_string());
        for action in actions {
            match action {
                Action::Load(page) => {
                    let current = state.current.clone();
                    state.window_page.insert(current, page.to_string());
                }
                Action::OpenWindow(handle, page) => {
                    state.windows.push(handle.to_string());
                    state.window_page.insert(handle.to_string(), page.to_string());
                }
                Action::Alert(text) => state.alert = Some(text.to_string()),
                Action::Toggle => {
                    if let Some(e) = state.elements.get_mut(&element.to_string()) {
                        e.selected = !e.selected;
                    }
                }
            }
        }
        Ok(())
    }

    fn send_keys(&self, element: &ElementId, text: &str) -> HarnessResult<()> {
        self.with_element(element, |_| ())?;
        self.state.borrow_mut().typed.push(text.to_string());
        Ok(())
    }

    fn text(&self, element: &ElementId) -> HarnessResult<String> {
        let now = self.clock.now();
        self.with_element(element, |e| e.current_text(now))
    }

    fn attribute(&self, element: &ElementId, name: &str) -> HarnessResult<Option<String>> {
        self.with_element(element, |e| e.attrs.get(name).cloned())
    }

    fn is_displayed(&self, element: &ElementId) -> HarnessResult<bool> {
        self.with_element(element, |e| !e.hidden)
    }

    fn is_selected(&self, element: &ElementId) -> HarnessResult<bool> {
        self.with_element(element, |e| e.selected)
    }

    fn execute_script(&self, script: &str, args: &ScriptArgs) -> HarnessResult<Value> {
        let target = args.get_args()[0][MAGIC_ELEMENTID]
            .as_str()
            .map(|id| ElementId::from(id.to_string()))
            .ok_or_else(|| webdriver_error("javascript error", script.to_string()))?;
        self.with_element(&target, |e| e.script_result.clone())?
            .ok_or_else(|| webdriver_error("javascript error", script.to_string()))
    }

    fn current_window_handle(&self) -> HarnessResult<WindowHandle> {
        Ok(WindowHandle::from(self.current_window()))
    }

    fn window_handles(&self) -> HarnessResult<Vec<WindowHandle>> {
        Ok(self.state.borrow().windows.iter().map(|w| WindowHandle::from(w.clone())).collect())
    }

    fn switch_to_window(&self, handle: &WindowHandle) -> HarnessResult<()> {
        let mut state = self.state.borrow_mut();
        let handle = handle.to_string();
        if !state.windows.contains(&handle) {
            return Err(webdriver_error("no such window", handle));
        }
        state.current = handle.clone();
        state.switches.push(handle);
        Ok(())
    }

    fn accept_alert(&self) -> HarnessResult<()> {
        let mut state = self.state.borrow_mut();
        let text = state.alert.take().ok_or_else(|| HarnessError::NoSuchAlert(String::new()))?;
        state.accepted.push(text);
        Ok(())
    }

    fn dismiss_alert(&self) -> HarnessResult<()> {
        let mut state = self.state.borrow_mut();
        let text = state.alert.take().ok_or_else(|| HarnessError::NoSuchAlert(String::new()))?;
        state.dismissed.push(text);
        Ok(())
    }

    fn alert_text(&self) -> HarnessResult<String> {
        self.state.borrow().alert.clone().ok_or_else(|| HarnessError::NoSuchAlert(String::new()))
    }
}

pub fn config(version: &str) -> HarnessConfig {
    let mut config = HarnessConfig::default();
    config.appliance_url = BASE_URL.to_string();
    config.appliance_version = version.parse().unwrap();
    config
}

pub fn png_data_url() -> String {
    format!("data:image/png;base64,{}", TINY_PNG_BASE64)
}

/// Put the noVNC console page in a second window. The banner reads
/// `Connecting` until `connected_at`, then `Connected (unencrypted) to: vm`.
pub fn add_console_page(fake: &FakeBrowser, connected_at: Duration, data_url: &str) {
    fake.add(
        "console",
        "banner",
        By::Css(&css_id("noVNC_status")),
        FakeElement::new()
            .text("Connecting")
            .text_at(connected_at, "Connected (unencrypted) to: vm"),
    );
    fake.add(
        "console",
        "canvas",
        By::Css(&css_id("noVNC_canvas")),
        FakeElement::new().script_result(Value::String(data_url.to_string())),
    );
    fake.add("console", "ctrl-alt-del", By::Css(&css_id("sendCtrlAltDelButton")), FakeElement::new());
}

pub fn console_session() -> ConsoleSession {
    ConsoleSession {
        appliance_handle: WindowHandle::from(APPLIANCE_WINDOW.to_string()),
        console_handle: WindowHandle::from(CONSOLE_WINDOW.to_string()),
        name: String::from("vm"),
    }
}
