use std::fmt;

use thirtyfour::By;

use crate::appliance::Appliance;
use crate::components::select::escape_string;
use crate::error::HarnessResult;
use crate::webelement::WebElement;

/// The kind of resource a quadicon tile stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuadiconKind {
    Datastore,
    Host,
    Vm,
    Instance,
    InfraProvider,
}

impl QuadiconKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuadiconKind::Datastore => "datastore",
            QuadiconKind::Host => "host",
            QuadiconKind::Vm => "vm",
            QuadiconKind::Instance => "instance",
            QuadiconKind::InfraProvider => "infra_prov",
        }
    }
}

impl fmt::Display for QuadiconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn tile_xpath(kind: QuadiconKind) -> String {
    format!(
        "//div[@id='records_div']//div[contains(@class, 'quadicon') and @data-type={}]",
        escape_string(kind.as_str())
    )
}

/// A grid tile representing a named resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quadicon {
    pub name: String,
    pub kind: QuadiconKind,
}

impl Quadicon {
    pub fn new(name: &str, kind: QuadiconKind) -> Self {
        Quadicon {
            name: name.to_string(),
            kind,
        }
    }

    /// The tile's link.
    pub fn xpath(&self) -> String {
        format!("{}//a[@title={}]", tile_xpath(self.kind), escape_string(&self.name))
    }

    pub fn checkbox_xpath(&self) -> String {
        format!(
            "{}[.//a[@title={}]]//input[@type='checkbox']",
            tile_xpath(self.kind),
            escape_string(&self.name)
        )
    }

    /// Links of every tile of `kind`.
    pub fn all_xpath(kind: QuadiconKind) -> String {
        format!("{}//a[@title]", tile_xpath(kind))
    }

    /// Every tile of `kind` on the current page.
    pub fn all(app: &Appliance<'_>, kind: QuadiconKind) -> HarnessResult<Vec<Quadicon>> {
        let mut icons = Vec::new();
        for link in app.find_all(By::XPath(&Self::all_xpath(kind)))? {
            if let Some(name) = link.get_attribute("title")? {
                icons.push(Quadicon::new(&name, kind));
            }
        }
        Ok(icons)
    }

    pub fn element<'a>(&self, app: &Appliance<'a>) -> HarnessResult<WebElement<'a>> {
        app.find(By::XPath(&self.xpath()))
    }

    pub fn is_displayed(&self, app: &Appliance<'_>) -> HarnessResult<bool> {
        app.is_displayed(By::XPath(&self.xpath()))
    }

    pub fn click(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        self.element(app)?.click()
    }

    pub fn check(&self, app: &Appliance<'_>, checked: bool) -> HarnessResult<()> {
        app.find(By::XPath(&self.checkbox_xpath()))?.fill_checkbox(checked)
    }
}
