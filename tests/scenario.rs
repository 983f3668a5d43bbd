mod common;

use std::cell::RefCell;
use std::time::Duration;

use cfme_console::components::select::escape_string;
use cfme_console::prelude::*;
use cfme_console::scenario::{ConsoleScenario, GuestAccess, ScenarioOutcome, MARKER_FILE};
use cfme_console::web_ui::{flash, toolbar, Quadicon};
use common::*;

#[derive(Debug, Default)]
struct FakeGuest {
    present: bool,
    asked: RefCell<Vec<String>>,
}

impl GuestAccess for FakeGuest {
    fn file_exists(&self, path: &str) -> HarnessResult<bool> {
        self.asked.borrow_mut().push(path.to_string());
        Ok(self.present)
    }
}

fn vm_ui(fake: &FakeBrowser, config: &HarnessConfig, vm: &Vm) {
    fake.route(vm.provider.kind.vms_path(&config.paths), "vms");
    fake.add(
        "vms",
        "vm-quadicon",
        By::XPath(&vm.quadicon().xpath()),
        FakeElement::new().on_click(Action::Load("vm-details")),
    );
    fake.add("vm-details", "access", By::XPath(&toolbar::button_xpath("Access")), FakeElement::new());
    fake.add(
        "vm-details",
        "vm-console",
        By::XPath(&toolbar::item_xpath("VM Console")),
        FakeElement::new().on_click(Action::OpenWindow(CONSOLE_WINDOW, "console")),
    );
    add_console_page(fake, Duration::from_secs(2), &png_data_url());
}

fn settings_ui(fake: &FakeBrowser, config: &HarnessConfig) {
    fake.route(&config.paths.server_settings, "settings");
    let select = format!("//select[@id={}]", escape_string("console_type"));
    fake.add("settings", "console-type", By::XPath(&select), FakeElement::new());
    fake.add(
        "settings",
        "vmrc-option",
        By::XPath(&format!("{}//option[normalize-space(.) = {}]", select, escape_string("VMware VMRC Plugin"))),
        FakeElement::new().selected().on_click(Action::Toggle),
    );
    fake.add(
        "settings",
        "vnc-option",
        By::XPath(&format!("{}//option[normalize-space(.) = {}]", select, escape_string("VNC"))),
        FakeElement::new().on_click(Action::Toggle),
    );
    fake.add(
        "settings",
        "save",
        By::XPath("//div[@id='buttons_on']//button[normalize-space(.)='Save']"),
        FakeElement::new(),
    );
    fake.add(
        "settings",
        "flash",
        By::XPath(flash::MESSAGES_XPATH),
        FakeElement::new().text("Configuration settings saved for CFME Server \"EVM\""),
    );
}

#[test]
fn rhv_console_scenario_completes() -> color_eyre::Result<()> {
    let clock = ManualClock::new();
    let fake = FakeBrowser::new(clock.clone());
    let config = config("5.8");
    let vm = Vm::new("cirros-1", ProviderRef::new("rhv", "RHV 4", ProviderKind::Rhv));
    vm_ui(&fake, &config, &vm);
    let guest = FakeGuest {
        present: true,
        ..FakeGuest::default()
    };
    let app = Appliance::new(&fake, &config).with_clock(clock);

    let outcome = ConsoleScenario::new(vm, &guest).run(&app)?;
    let report = match outcome {
        ScenarioOutcome::Completed(report) => report,
        other => panic!("unexpected outcome {:?}", other),
    };

    assert!(report.passed());
    assert_eq!(report.provider, ProviderKind::Rhv);
    assert_eq!(report.connect_time, Duration::from_secs(2));
    assert!(report.screen_bytes > 8);
    assert_eq!(report.reconnect_time, Duration::ZERO);
    assert_eq!(fake.typed(), vec!["cirros\n", "cubswin:)\n", "touch /tmp/blather\n"]);
    assert_eq!(*guest.asked.borrow(), vec![MARKER_FILE]);
    assert!(fake.clicked().contains(&String::from("ctrl-alt-del")));
    assert_eq!(fake.current_window(), APPLIANCE_WINDOW);
    Ok(())
}

#[test]
fn vmware_scenario_switches_console_to_vnc() -> color_eyre::Result<()> {
    let clock = ManualClock::new();
    let fake = FakeBrowser::new(clock.clone());
    let config = config("5.9");
    let vm = Vm::new("cirros-2", ProviderRef::new("vsphere", "vSphere 6.5", ProviderKind::VMware));
    vm_ui(&fake, &config, &vm);
    settings_ui(&fake, &config);
    let guest = FakeGuest::default();
    let app = Appliance::new(&fake, &config).with_clock(clock);

    let outcome = ConsoleScenario::new(vm, &guest).run(&app)?;
    match outcome {
        ScenarioOutcome::Completed(report) => {
            assert!(!report.marker_file_created);
            assert!(!report.passed());
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    let clicked = fake.clicked();
    assert_eq!(&clicked[..2], &["vnc-option", "save"]);
    assert!(fake.is_selected_label("vnc-option"));
    Ok(())
}

#[test]
fn old_appliances_are_skipped() -> color_eyre::Result<()> {
    let clock = ManualClock::new();
    let fake = FakeBrowser::new(clock.clone());
    let config = config("5.7.3");
    let vm = Vm::new("cirros-1", ProviderRef::new("osp", "OSP 10", ProviderKind::OpenStack));
    let guest = FakeGuest::default();
    let app = Appliance::new(&fake, &config).with_clock(clock);

    let outcome = ConsoleScenario::new(vm, &guest).run(&app)?;
    assert!(matches!(outcome, ScenarioOutcome::Skipped(_)));
    assert!(fake.clicked().is_empty());
    assert!(guest.asked.borrow().is_empty());
    Ok(())
}

#[test]
fn instance_quadicon_is_used_for_cloud_vms() {
    let vm = Vm::new("inst", ProviderRef::new("osp", "OSP 10", ProviderKind::OpenStack));
    assert_eq!(vm.quadicon(), Quadicon::new("inst", cfme_console::web_ui::QuadiconKind::Instance));
}
