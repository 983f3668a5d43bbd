use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, HarnessResult};
use crate::version::{Version, VersionPick};

/// Element ids and timings for the HTML5 (noVNC) console page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub banner_id: String,
    pub canvas_id: String,
    pub ctrl_alt_del_id: String,
    pub connect_timeout_secs: u64,
    pub poll_interval_secs: u64,
    /// Guest login used by the console scenario.
    pub guest_username: String,
    pub guest_password: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            banner_id: String::from("noVNC_status"),
            canvas_id: String::from("noVNC_canvas"),
            ctrl_alt_del_id: String::from("sendCtrlAltDelButton"),
            connect_timeout_secs: 5,
            poll_interval_secs: 1,
            guest_username: String::from("cirros"),
            guest_password: String::from("cubswin:)"),
        }
    }
}

impl ConsoleConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Upper bounds for the page-level waits, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    pub delete_secs: u64,
    pub appear_secs: u64,
    pub alert_secs: u64,
    pub window_secs: u64,
    pub interval_secs: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        WaitConfig {
            delete_secs: 500,
            appear_secs: 1000,
            alert_secs: 30,
            window_secs: 30,
            interval_secs: 1,
        }
    }
}

impl WaitConfig {
    pub fn delete(&self) -> Duration {
        Duration::from_secs(self.delete_secs)
    }

    pub fn appear(&self) -> Duration {
        Duration::from_secs(self.appear_secs)
    }

    pub fn alert(&self) -> Duration {
        Duration::from_secs(self.alert_secs)
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Appliance URLs, relative to `appliance_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub datastores: String,
    pub infra_providers: String,
    pub infra_vms: String,
    pub cloud_instances: String,
    pub server_settings: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        PathConfig {
            datastores: String::from("/storage/show_list"),
            infra_providers: String::from("/ems_infra/show_list"),
            infra_vms: String::from("/vm_infra/explorer"),
            cloud_instances: String::from("/vm_cloud/explorer"),
            server_settings: String::from("/ops/explorer"),
        }
    }
}

/// Page text that differs between appliance versions. `{name}` in a
/// template is replaced with the resource name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiText {
    pub datastore_detail_title: VersionPick<String>,
    pub remove_hosts_item: VersionPick<String>,
}

impl Default for UiText {
    fn default() -> Self {
        UiText {
            datastore_detail_title: VersionPick::new(vec![
                (Version::LOWEST, String::from("{name} (Datastore)")),
                (Version::new(&[5, 6]), String::from("Datastore \"{name}\"")),
            ]),
            remove_hosts_item: VersionPick::new(vec![
                (Version::LOWEST, String::from("Remove Hosts from the VMDB")),
                (Version::new(&[5, 4]), String::from("Remove items from the VMDB")),
            ]),
        }
    }
}

fn pick_text(table: &VersionPick<String>, what: &str, version: &Version) -> HarnessResult<String> {
    table
        .pick(version)
        .cloned()
        .ok_or_else(|| HarnessError::Config(format!("no {} for version {}", what, version)))
}

impl UiText {
    pub fn datastore_detail_title(&self, version: &Version, name: &str) -> HarnessResult<String> {
        let template = pick_text(&self.datastore_detail_title, "datastore title", version)?;
        Ok(template.replace("{name}", name))
    }

    pub fn remove_hosts_item(&self, version: &Version) -> HarnessResult<String> {
        pick_text(&self.remove_hosts_item, "remove hosts item", version)
    }
}

/// Top-level harness configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub webdriver_url: String,
    pub appliance_url: String,
    pub appliance_version: Version,
    pub headless: bool,
    pub console: ConsoleConfig,
    pub waits: WaitConfig,
    pub paths: PathConfig,
    pub ui_text: UiText,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            webdriver_url: String::from("http://localhost:4444"),
            appliance_url: String::from("https://localhost"),
            appliance_version: Version::new(&[5, 8]),
            headless: true,
            console: ConsoleConfig::default(),
            waits: WaitConfig::default(),
            paths: PathConfig::default(),
            ui_text: UiText::default(),
        }
    }
}

impl HarnessConfig {
    pub fn from_json(json: &str) -> HarnessResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file, then apply environment overrides.
    pub fn from_file<P: AsRef<Path>>(path: P) -> HarnessResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let mut config = Self::from_json(&text)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from `CFME_WEBDRIVER_URL`, `CFME_APPLIANCE_URL` and
    /// `CFME_APPLIANCE_VERSION` when set.
    pub fn apply_env(&mut self) -> HarnessResult<()> {
        if let Ok(url) = env::var("CFME_WEBDRIVER_URL") {
            debug!("webdriver_url overridden from environment: {}", url);
            self.webdriver_url = url;
        }
        if let Ok(url) = env::var("CFME_APPLIANCE_URL") {
            debug!("appliance_url overridden from environment: {}", url);
            self.appliance_url = url;
        }
        if let Ok(version) = env::var("CFME_APPLIANCE_VERSION") {
            self.appliance_version = version.parse()?;
        }
        Ok(())
    }

    /// Absolute URL for a path relative to the appliance.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.appliance_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = HarnessConfig::from_json(
            r#"{
                "appliance_url": "https://cfme.example.com/",
                "appliance_version": "5.9.1",
                "console": { "connect_timeout_secs": 10 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.appliance_version, Version::new(&[5, 9, 1]));
        assert_eq!(config.console.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.console.banner_id, "noVNC_status");
        assert_eq!(config.waits.delete(), Duration::from_secs(500));
        assert_eq!(config.url("/storage/show_list"), "https://cfme.example.com/storage/show_list");
    }

    #[test]
    fn ui_text_is_version_picked() {
        let text = UiText::default();
        let old = Version::new(&[5, 5]);
        let new = Version::new(&[5, 8]);
        assert_eq!(text.datastore_detail_title(&old, "ds1").unwrap(), "ds1 (Datastore)");
        assert_eq!(text.datastore_detail_title(&new, "ds1").unwrap(), "Datastore \"ds1\"");
        assert_eq!(text.remove_hosts_item(&Version::new(&[5, 3])).unwrap(), "Remove Hosts from the VMDB");
        assert_eq!(text.remove_hosts_item(&new).unwrap(), "Remove items from the VMDB");
    }

    #[test]
    fn ui_text_overrides_from_json() {
        let config = HarnessConfig::from_json(
            r#"{ "ui_text": { "remove_hosts_item": { "5.9": "Remove selected Hosts" } } }"#,
        )
        .unwrap();
        let v = Version::new(&[5, 10]);
        assert_eq!(config.ui_text.remove_hosts_item(&v).unwrap(), "Remove selected Hosts");
        assert!(config.ui_text.remove_hosts_item(&Version::new(&[5, 8])).is_err());
        assert_eq!(config.ui_text.datastore_detail_title(&v, "x").unwrap(), "Datastore \"x\"");
    }
}
