//! A model of an infrastructure datastore.
//!
//! With a provider, navigation goes through the provider's summary page
//! instead of the direct Datastores list.

use log::{debug, info};
use thirtyfour::By;

use crate::appliance::Appliance;
use crate::error::HarnessResult;
use crate::provider::ProviderRef;
use crate::web_ui::alert::handle_alert;
use crate::web_ui::{accordion, flash, is_displayed_text, summary_title, toolbar};
use crate::web_ui::{InfoBlock, Quadicon, QuadiconKind};

/// Container of the quadicon and list views.
pub const LIST_CONTAINER_XPATH: &str = "//div[@id='main_div']";

/// Where the browser is relative to a datastore's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    NotLoaded,
    Loaded,
    HostsSubview,
    VmsSubview,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datastore {
    pub name: String,
    pub provider: Option<ProviderRef>,
    /// Storage type as shown by the appliance, e.g. `VMFS` or `NFS`.
    pub kind: Option<String>,
}

impl Datastore {
    pub fn new(name: &str) -> Self {
        Datastore {
            name: name.to_string(),
            provider: None,
            kind: None,
        }
    }

    pub fn with_provider(mut self, provider: ProviderRef) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.to_string());
        self
    }

    pub fn quadicon(&self) -> Quadicon {
        Quadicon::new(&self.name, QuadiconKind::Datastore)
    }

    fn hosts_title(&self) -> String {
        format!("{} (All Registered Hosts)", self.name)
    }

    fn vms_title(&self) -> String {
        format!("{} (All Registered VMs)", self.name)
    }

    /// Show the list this datastore's quadicon appears in.
    fn navigate_to_list(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        match &self.provider {
            Some(provider) => {
                provider.navigate_to_details(app)?;
                accordion::select(app, "Relationships", "Datastores", true)
            }
            None => app.navigate(&app.config().paths.datastores),
        }
    }

    /// Navigate to the summary page, whatever page is currently shown.
    pub fn navigate_to_details(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        self.navigate_to_list(app)?;
        self.quadicon().click(app)
    }

    pub fn page_state(&self, app: &Appliance<'_>) -> HarnessResult<PageState> {
        let title = match summary_title(app)? {
            Some(title) => title,
            None => return Ok(PageState::NotLoaded),
        };
        let detail_title = app.config().ui_text.datastore_detail_title(app.version(), &self.name)?;
        Ok(if title == detail_title {
            PageState::Loaded
        } else if title == self.hosts_title() {
            PageState::HostsSubview
        } else if title == self.vms_title() {
            PageState::VmsSubview
        } else {
            PageState::NotLoaded
        })
    }

    pub fn on_detail_page(&self, app: &Appliance<'_>) -> HarnessResult<bool> {
        Ok(self.page_state(app)? == PageState::Loaded)
    }

    /// Remove the datastore from the VMDB. With `cancel` the confirmation
    /// is dismissed instead.
    ///
    /// The datastore must have no hosts and no VMs for this to work.
    pub fn delete(&self, app: &Appliance<'_>, cancel: bool) -> HarnessResult<()> {
        self.navigate_to_details(app)?;
        toolbar::select(app, "Configuration", "Remove from the VMDB")?;
        handle_alert(app, cancel)?;
        Ok(())
    }

    pub fn wait_for_delete(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        app.navigate(&app.config().paths.datastores)?;
        app.wait(app.config().waits.delete())
            .message("datastore to disappear")
            .fail_func(|| app.refresh())
            .until(|| self.exists(app).map(|exists| !exists))
    }

    pub fn wait_for_appear(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        app.navigate(&app.config().paths.datastores)?;
        app.wait(app.config().waits.appear())
            .message("datastore to appear")
            .fail_func(|| app.refresh())
            .until(|| self.exists(app))
    }

    pub fn load_details(&self, app: &Appliance<'_>, refresh: bool) -> HarnessResult<()> {
        if !self.on_detail_page(app)? {
            debug!("load_details: not on details already, navigating");
            self.navigate_to_details(app)
        } else {
            debug!("load_details: already on details, refreshing: {}", refresh);
            if refresh {
                toolbar::refresh(app)?;
            }
            Ok(())
        }
    }

    /// Value of `key` in info block `title` on the summary page.
    pub fn get_detail(&self, app: &Appliance<'_>, title: &str, key: &str) -> HarnessResult<String> {
        self.load_details(app, false)?;
        InfoBlock::new(title, key).text(app)
    }

    /// Names of the hosts using this datastore.
    pub fn get_hosts(&self, app: &Appliance<'_>) -> HarnessResult<Vec<String>> {
        if self.page_state(app)? != PageState::HostsSubview {
            self.navigate_to_details(app)?;
            InfoBlock::new("Relationships", "Hosts").click(app)?;
        }
        quadicon_names(app, QuadiconKind::Host)
    }

    /// Names of the VMs using this datastore.
    pub fn get_vms(&self, app: &Appliance<'_>) -> HarnessResult<Vec<String>> {
        if self.page_state(app)? != PageState::VmsSubview {
            self.navigate_to_details(app)?;
            match accordion::select(app, "Relationships", "VMs", true) {
                Err(e) if e.is_not_found() => {
                    InfoBlock::new("Relationships", "Managed VMs").click(app)?
                }
                other => other?,
            }
        }
        quadicon_names(app, QuadiconKind::Vm)
    }

    pub fn delete_all_attached_vms(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        self.load_details(app, false)?;
        InfoBlock::new("Relationships", "Managed VMs").click(app)?;
        check_all(app, QuadiconKind::Vm)?;
        toolbar::select(app, "Configuration", "Remove selected items from the VMDB")?;
        handle_alert(app, false)?;
        Ok(())
    }

    pub fn delete_all_attached_hosts(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        self.load_details(app, false)?;
        InfoBlock::new("Relationships", "Hosts").click(app)?;
        check_all(app, QuadiconKind::Host)?;
        let item = app.config().ui_text.remove_hosts_item(app.version())?;
        toolbar::select(app, "Configuration", &item)?;
        handle_alert(app, false)?;
        Ok(())
    }

    /// Whether the current list has been emptied. A page without the list
    /// container is `false`.
    pub fn wait_for_delete_all(&self, app: &Appliance<'_>) -> HarnessResult<bool> {
        app.refresh()?;
        match app.find(By::XPath(LIST_CONTAINER_XPATH)) {
            Ok(_) => is_displayed_text(app, "No Records Found"),
            Err(e) if e.is_not_found() => {
                debug!("wait_for_delete_all: no list on the page");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Whether the datastore's quadicon can be reached. Absence is `false`.
    pub fn exists(&self, app: &Appliance<'_>) -> HarnessResult<bool> {
        match self.navigate_to_list(app) {
            Ok(()) => self.quadicon().is_displayed(app),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Start a SmartState analysis and check the appliance acknowledged it.
    pub fn run_smartstate_analysis(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        self.navigate_to_details(app)?;
        toolbar::select(app, "Configuration", "Perform SmartState Analysis")?;
        handle_alert(app, false)?;
        info!("SmartState analysis requested for datastore {}", self.name);
        flash::assert_message_contain(app, &format!("\"{}\": scan successfully initiated", self.name))
    }
}

fn quadicon_names(app: &Appliance<'_>, kind: QuadiconKind) -> HarnessResult<Vec<String>> {
    Ok(Quadicon::all(app, kind)?.into_iter().map(|q| q.name).collect())
}

fn check_all(app: &Appliance<'_>, kind: QuadiconKind) -> HarnessResult<()> {
    for quadicon in Quadicon::all(app, kind)? {
        quadicon.check(app, true)?;
    }
    Ok(())
}

/// Names of all datastores in the Datastores list.
pub fn get_all_datastores(app: &Appliance<'_>, navigate: bool) -> HarnessResult<Vec<String>> {
    if navigate {
        app.navigate(&app.config().paths.datastores)?;
    }
    quadicon_names(app, QuadiconKind::Datastore)
}
