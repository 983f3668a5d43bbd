use std::sync::Arc;

use log::debug;
use serde::Serialize;
use serde_json::Value;
use thirtyfour::common::command::{Command, FormatRequestData};
use thirtyfour::common::types::{ElementId, ElementRef, WindowHandle};
use thirtyfour::{By, ScriptArgs, SessionId, TypingData};

use crate::browser::Browser;
use crate::error::{HarnessError, HarnessResult};
use crate::http::connection_sync::WebDriverHttpClientSync;

/// Unwrap a W3C element reference.
fn convert_element(value: &Value) -> HarnessResult<ElementId> {
    let elem_ref: ElementRef = serde_json::from_value(value.clone())?;
    Ok(ElementId::from(elem_ref.id))
}

fn convert_elements(value: &Value) -> HarnessResult<Vec<ElementId>> {
    let refs: Vec<ElementRef> = serde_json::from_value(value.clone())?;
    Ok(refs.into_iter().map(|x| ElementId::from(x.id)).collect())
}

/// Open a new session and return its id and the capabilities the server
/// granted. Both the W3C reply (`{"value": {"sessionId": ..}}`) and the
/// legacy Selenium reply (`{"sessionId": .., "value": {caps}}`) are accepted.
pub(crate) fn start_session<T, C>(conn: &T, capabilities: C) -> HarnessResult<(SessionId, Value)>
where
    T: WebDriverHttpClientSync + ?Sized,
    C: Serialize,
{
    let caps = serde_json::to_value(capabilities)?;
    let no_session = SessionId::from(String::new());
    let v = conn.execute(Command::NewSession(caps).format_request(&no_session))?;

    let (id, session_caps) = match v["sessionId"].as_str() {
        Some(id) => {
            debug!("Legacy new session reply");
            (id, v["value"].clone())
        }
        None => (v["value"]["sessionId"].as_str().unwrap_or_default(), v["value"]["capabilities"].clone()),
    };
    if id.is_empty() {
        return Err(HarnessError::Decode(format!("no sessionId in new session reply: {}", v)));
    }
    Ok((SessionId::from(id.to_string()), session_caps))
}

/// A live WebDriver session. All commands are sent through the shared
/// HTTP connection.
#[derive(Debug, Clone)]
pub struct WebDriverSession {
    session_id: SessionId,
    conn: Arc<dyn WebDriverHttpClientSync>,
}

impl WebDriverSession {
    pub fn new(session_id: SessionId, conn: Arc<dyn WebDriverHttpClientSync>) -> Self {
        Self {
            session_id,
            conn,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Execute a command and return the `value` member of the response.
    pub fn cmd(&self, command: Command) -> HarnessResult<Value> {
        let mut v = self.conn.execute(command.format_request(&self.session_id))?;
        Ok(v["value"].take())
    }
}

impl Browser for WebDriverSession {
    fn get(&self, url: &str) -> HarnessResult<()> {
        self.cmd(Command::NavigateTo(url.to_string()))?;
        Ok(())
    }

    fn refresh(&self) -> HarnessResult<()> {
        self.cmd(Command::Refresh)?;
        Ok(())
    }

    fn find_element(&self, by: By<'_>) -> HarnessResult<ElementId> {
        let v = self.cmd(Command::FindElement(by.get_w3c_selector()))?;
        convert_element(&v)
    }

    fn find_elements(&self, by: By<'_>) -> HarnessResult<Vec<ElementId>> {
        let v = self.cmd(Command::FindElements(by.get_w3c_selector()))?;
        convert_elements(&v)
    }

    fn click(&self, element: &ElementId) -> HarnessResult<()> {
        self.cmd(Command::ElementClick(element.clone()))?;
        Ok(())
    }

    fn send_keys(&self, element: &ElementId, text: &str) -> HarnessResult<()> {
        self.cmd(Command::ElementSendKeys(element.clone(), TypingData::from(text)))?;
        Ok(())
    }

    fn text(&self, element: &ElementId) -> HarnessResult<String> {
        let v = self.cmd(Command::GetElementText(element.clone()))?;
        Ok(serde_json::from_value(v)?)
    }

    fn attribute(&self, element: &ElementId, name: &str) -> HarnessResult<Option<String>> {
        let v = self.cmd(Command::GetElementAttribute(element.clone(), name.to_string()))?;
        Ok(serde_json::from_value(v)?)
    }

    fn is_displayed(&self, element: &ElementId) -> HarnessResult<bool> {
        let v = self.cmd(Command::IsElementDisplayed(element.clone()))?;
        Ok(serde_json::from_value(v)?)
    }

    fn is_selected(&self, element: &ElementId) -> HarnessResult<bool> {
        let v = self.cmd(Command::IsElementSelected(element.clone()))?;
        Ok(serde_json::from_value(v)?)
    }

    fn execute_script(&self, script: &str, args: &ScriptArgs) -> HarnessResult<Value> {
        self.cmd(Command::ExecuteScript(script.to_string(), args.get_args()))
    }

    fn current_window_handle(&self) -> HarnessResult<WindowHandle> {
        let v = self.cmd(Command::GetWindowHandle)?;
        let handle: String = serde_json::from_value(v)?;
        Ok(WindowHandle::from(handle))
    }

    fn window_handles(&self) -> HarnessResult<Vec<WindowHandle>> {
        let v = self.cmd(Command::GetWindowHandles)?;
        let handles: Vec<String> = serde_json::from_value(v)?;
        Ok(handles.into_iter().map(WindowHandle::from).collect())
    }

    fn switch_to_window(&self, handle: &WindowHandle) -> HarnessResult<()> {
        self.cmd(Command::SwitchToWindow(handle.clone()))?;
        Ok(())
    }

    fn accept_alert(&self) -> HarnessResult<()> {
        self.cmd(Command::AcceptAlert)?;
        Ok(())
    }

    fn dismiss_alert(&self) -> HarnessResult<()> {
        self.cmd(Command::DismissAlert)?;
        Ok(())
    }

    fn alert_text(&self) -> HarnessResult<String> {
        let v = self.cmd(Command::GetAlertText)?;
        Ok(serde_json::from_value(v)?)
    }
}
