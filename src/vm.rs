use log::{debug, info};

use crate::appliance::Appliance;
use crate::console::{ConsoleSession, VmConsole};
use crate::error::HarnessResult;
use crate::provider::ProviderRef;
use crate::web_ui::{toolbar, Quadicon};

/// A VM (or cloud instance) already known to the appliance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vm {
    pub name: String,
    pub provider: ProviderRef,
}

impl Vm {
    pub fn new(name: &str, provider: ProviderRef) -> Self {
        Vm {
            name: name.to_string(),
            provider,
        }
    }

    pub fn quadicon(&self) -> Quadicon {
        Quadicon::new(&self.name, self.provider.kind.vm_quadicon_kind())
    }

    /// Open the VM summary page from the VMs (or instances) list.
    pub fn load_details(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        debug!("Loading details of {}", self.name);
        app.navigate(self.provider.kind.vms_path(&app.config().paths))?;
        self.quadicon().click(app)
    }

    /// Open the HTML5 console from the Access menu. The console opens in a
    /// new window; focus is returned to the appliance window.
    pub fn open_console(&self, app: &Appliance<'_>) -> HarnessResult<VmConsole> {
        let browser = app.browser();
        let appliance_handle = browser.current_window_handle()?;
        let before: Vec<String> = browser.window_handles()?.iter().map(|h| h.to_string()).collect();

        self.load_details(app)?;
        toolbar::select(app, "Access", "VM Console")?;

        let console_handle = app
            .wait(app.config().waits.window())
            .message(&format!("console window for {} to open", self.name))
            .until_some(|| {
                Ok(browser.window_handles()?.into_iter().find(|h| !before.contains(&h.to_string())))
            })?;
        info!("Console for {} opened in window {}", self.name, console_handle);

        browser.switch_to_window(&appliance_handle)?;
        Ok(VmConsole::new(ConsoleSession {
            appliance_handle,
            console_handle,
            name: self.name.clone(),
        }))
    }
}
