use std::fmt;

use serde::{Deserialize, Serialize};

use crate::appliance::Appliance;
use crate::config::PathConfig;
use crate::error::HarnessResult;
use crate::web_ui::{Quadicon, QuadiconKind};

/// Provider types the console scenario runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "openstack")]
    OpenStack,
    #[serde(rename = "rhv")]
    Rhv,
    #[serde(rename = "vmware")]
    VMware,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [ProviderKind::OpenStack, ProviderKind::Rhv, ProviderKind::VMware];

    /// Cloud providers expose instances rather than VMs.
    pub fn is_cloud(&self) -> bool {
        matches!(self, ProviderKind::OpenStack)
    }

    pub fn vm_quadicon_kind(&self) -> QuadiconKind {
        if self.is_cloud() {
            QuadiconKind::Instance
        } else {
            QuadiconKind::Vm
        }
    }

    pub fn vms_path<'a>(&self, paths: &'a PathConfig) -> &'a str {
        if self.is_cloud() {
            &paths.cloud_instances
        } else {
            &paths.infra_vms
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::OpenStack => "OpenStack",
            ProviderKind::Rhv => "RHV",
            ProviderKind::VMware => "VMware",
        };
        f.write_str(name)
    }
}

/// A provider as configured in the appliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRef {
    pub key: String,
    pub name: String,
    pub kind: ProviderKind,
}

impl ProviderRef {
    pub fn new(key: &str, name: &str, kind: ProviderKind) -> Self {
        ProviderRef {
            key: key.to_string(),
            name: name.to_string(),
            kind,
        }
    }

    pub fn quadicon(&self) -> Quadicon {
        Quadicon::new(&self.name, QuadiconKind::InfraProvider)
    }

    /// Open the provider's summary page from the providers list.
    pub fn navigate_to_details(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        app.navigate(&app.config().paths.infra_providers)?;
        self.quadicon().click(app)
    }
}
