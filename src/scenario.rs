//! End-to-end check of the HTML5 VM console against one provider.
//!
//! For a given VM the console is opened, and then:
//!
//! - the console must reach the connected state,
//! - the screen must be readable as a PNG,
//! - a login and a command creating a marker file are typed in,
//! - the marker file is checked out of band,
//! - ctrl-alt-delete is sent and the console must reconnect.

use std::time::Duration;

use log::{info, warn};
use thirtyfour::By;

use crate::appliance::Appliance;
use crate::components::select::SelectElement;
use crate::console::{is_png, VmConsole};
use crate::error::HarnessResult;
use crate::provider::ProviderKind;
use crate::version::Version;
use crate::vm::Vm;
use crate::web_ui::flash;

/// File the scenario creates in the guest.
pub const MARKER_FILE: &str = "/tmp/blather";

const SAVE_BUTTON_XPATH: &str = "//div[@id='buttons_on']//button[normalize-space(.)='Save']";

/// Out-of-band access to the guest, typically over SSH.
pub trait GuestAccess {
    fn file_exists(&self, path: &str) -> HarnessResult<bool>;
}

/// The HTML5 console needs appliance 5.8 or later.
pub fn minimum_version() -> Version {
    Version::new(&[5, 8])
}

/// Switch the server's VMware console support to `console_type` (the HTML5
/// console needs `VNC`).
pub fn configure_vmware_console(app: &Appliance<'_>, console_type: &str) -> HarnessResult<()> {
    info!("Setting VMware console type to {}", console_type);
    app.navigate(&app.config().paths.server_settings)?;
    SelectElement::by_id(app.browser(), "console_type")?.select_by_visible_text(console_type)?;
    app.click(By::XPath(SAVE_BUTTON_XPATH))?;
    flash::assert_message_contain(app, "saved")
}

/// Timings and checks of a completed run.
///
/// A marker file that never showed up in the guest does not fail the run:
/// it is reported through `marker_file_created` and [`passed`](Self::passed).
/// Console and browser failures are returned as errors instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub provider: ProviderKind,
    pub connect_time: Duration,
    pub screen_bytes: usize,
    pub marker_file_created: bool,
    pub reconnect_time: Duration,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.marker_file_created
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    Skipped(String),
    Completed(ScenarioReport),
}

/// The console scenario for one VM.
pub struct ConsoleScenario<'p> {
    vm: Vm,
    guest: &'p dyn GuestAccess,
}

impl<'p> ConsoleScenario<'p> {
    pub fn new(vm: Vm, guest: &'p dyn GuestAccess) -> Self {
        ConsoleScenario {
            vm,
            guest,
        }
    }

    pub fn run(&self, app: &Appliance<'_>) -> HarnessResult<ScenarioOutcome> {
        let provider = self.vm.provider.kind;
        if app.version() < &minimum_version() {
            let reason = format!("console needs appliance >= {}, found {}", minimum_version(), app.version());
            warn!("Skipping {} console scenario: {}", provider, reason);
            return Ok(ScenarioOutcome::Skipped(reason));
        }

        if provider == ProviderKind::VMware {
            configure_vmware_console(app, "VNC")?;
        }

        let console = self.vm.open_console(app)?;
        let connect_time = timed(app, || console.wait_for_connect(app))?;

        let screen = console.screen(app)?;
        debug_assert!(is_png(&screen));

        let marker_file_created = self.login_and_touch(app, &console)?;

        console.send_ctrl_alt_delete(app)?;
        let reconnect_time = timed(app, || console.wait_for_connect(app))?;

        let report = ScenarioReport {
            provider,
            connect_time,
            screen_bytes: screen.len(),
            marker_file_created,
            reconnect_time,
        };
        info!("Console scenario for {} finished: {:?}", self.vm.name, report);
        Ok(ScenarioOutcome::Completed(report))
    }

    fn login_and_touch(&self, app: &Appliance<'_>, console: &VmConsole) -> HarnessResult<bool> {
        let guest = &app.config().console;
        console.send_keys(app, &format!("{}\n", guest.guest_username))?;
        console.send_keys(app, &format!("{}\n", guest.guest_password))?;
        console.send_keys(app, &format!("touch {}\n", MARKER_FILE))?;
        self.guest.file_exists(MARKER_FILE)
    }
}

fn timed<F>(app: &Appliance<'_>, f: F) -> HarnessResult<Duration>
where
    F: FnOnce() -> HarnessResult<()>,
{
    let start = app.clock().now();
    f()?;
    Ok(app.clock().now().saturating_sub(start))
}
