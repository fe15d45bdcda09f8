use std::time::Duration;

use crate::error::Result;
use crate::fragment::{self, Template};
use crate::net;
use crate::paths::SystemPaths;
use crate::runner::Runner;

/// Budget for the interface to associate and obtain an address before the
/// next block (often a download) starts.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(150);

/// Security type labels as the visual editor emits them.
pub const SECURITY_OPEN: &str = "Open (no password)";
pub const SECURITY_WEP: &str = "WEP";
pub const SECURITY_WPA: &str = "WPA/WPA2";

const OPEN: Template = Template {
    body: "\n\ncountry=WIFI-RD\n\nnetwork={\n    ssid=\"WIFI-SSID\"\n    scan_ssid=1\n    key_mgmt=NONE\n}",
    placeholders: &["WIFI-SSID", "WIFI-RD"],
};

const WEP: Template = Template {
    body: "\n\ncountry=WIFI-RD\n\nnetwork={\n    ssid=\"WIFI-SSID\"\n    scan_ssid=1\n    key_mgmt=NONE\n    wep_key0=\"WIFI-PSK\"\n}",
    placeholders: &["WIFI-SSID", "WIFI-PSK", "WIFI-RD"],
};

const WPA: Template = Template {
    body: "\n\ncountry=WIFI-RD\n\nnetwork={\n    ssid=\"WIFI-SSID\"\n    scan_ssid=1\n    key_mgmt=WPA-PSK\n    psk=\"WIFI-PSK\"\n}",
    placeholders: &["WIFI-SSID", "WIFI-PSK", "WIFI-RD"],
};

/// Appends a network block to the wpa_supplicant config, sets the
/// regulatory domain, and reconfigures the supplicant.
#[derive(Debug, Clone)]
pub struct WifiSetup {
    pub ssid: String,
    pub psk: String,
    pub security: String,
    pub regulatory_domain: String,
}

impl WifiSetup {
    fn template(&self) -> Option<&'static Template> {
        // No passphrase always means an open network, whatever the label.
        if self.psk.is_empty() || self.security == SECURITY_OPEN {
            Some(&OPEN)
        } else if self.security == SECURITY_WEP {
            Some(&WEP)
        } else if self.security == SECURITY_WPA {
            Some(&WPA)
        } else {
            None
        }
    }

    /// The rendered network block, or None when the arguments make this a
    /// no-op (missing ssid/type, unrecognized security label).
    pub fn fragment(&self) -> Option<String> {
        if self.ssid.is_empty() || self.security.is_empty() {
            return None;
        }
        let template = self.template()?;
        Some(template.render(&[
            ("WIFI-SSID", &self.ssid),
            ("WIFI-PSK", &self.psk),
            ("WIFI-RD", &self.regulatory_domain),
        ]))
    }

    pub fn run(&self, paths: &SystemPaths, runner: &Runner) -> Result<()> {
        let Some(network) = self.fragment() else {
            tracing::warn!(
                security = %self.security,
                "missing ssid/type or unrecognized security; {} untouched",
                paths.wpa_supplicant_conf.display()
            );
            return Ok(());
        };

        if fragment::append_unless_present(&paths.wpa_supplicant_conf, &network)? {
            tracing::info!(ssid = %self.ssid, "wrote network block to {}", paths.wpa_supplicant_conf.display());
        } else {
            tracing::info!(ssid = %self.ssid, "network block already present; append skipped");
        }

        if !self.regulatory_domain.is_empty() {
            runner.run("iw", &["reg", "set", &self.regulatory_domain])?;
        }
        runner.run("wpa_cli", &["reconfigure"])?;

        if !runner.dry_run && !net::wait_for_network(None, CONNECT_TIMEOUT) {
            tracing::warn!(
                ssid = %self.ssid,
                "no connection after {}s; continuing",
                CONNECT_TIMEOUT.as_secs()
            );
        }
        Ok(())
    }
}
