//! Requires a selenium server (or chromedriver) running on port 4444 and an
//! appliance whose UI session is already authenticated:
//!
//!     chromedriver --port=4444
//!
//! Run as follows:
//!
//!     cargo run --example console_smoke -- --config harness.json cirros-1 rhv
//!
//! The config file is optional; `CFME_*` environment variables override it.

use std::path::{Path, PathBuf};

use cfme_console::prelude::*;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Openstack,
    Rhv,
    Vmware,
}

impl From<Kind> for ProviderKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Openstack => ProviderKind::OpenStack,
            Kind::Rhv => ProviderKind::Rhv,
            Kind::Vmware => ProviderKind::VMware,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Open the HTML5 console of a VM and save a screenshot")]
struct Args {
    /// JSON harness config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name of the VM (or instance) to open the console of
    #[arg(default_value = "cirros-1")]
    vm: String,

    /// Provider type the VM belongs to
    #[arg(value_enum, default_value_t = Kind::Rhv)]
    provider: Kind,

    /// Selenium server URL
    #[arg(long, env = "CFME_WEBDRIVER_URL")]
    webdriver_url: Option<String>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => HarnessConfig::from_file(path)?,
        None => {
            let mut config = HarnessConfig::default();
            config.apply_env()?;
            config
        }
    };
    if let Some(url) = args.webdriver_url {
        config.webdriver_url = url;
    }

    let driver = WebDriver::new(&config.webdriver_url, chrome_capabilities(config.headless)?)?;
    let app = Appliance::new(&*driver, &config);

    let vm = Vm::new(&args.vm, ProviderRef::new("smoke", "Smoke provider", args.provider.into()));
    let console = vm.open_console(&app)?;
    console.wait_for_connect(&app)?;
    println!("Banner: {}", console.banner(&app)?);

    // Save a screenshot of the canvas next to the working directory.
    console.save_screen(&app, Path::new("console.png"))?;

    drop(app);
    driver.quit()?;

    Ok(())
}
