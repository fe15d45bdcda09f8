use std::time::Duration;

use crate::error::Result;
use crate::fragment::{self, Template};
use crate::net;
use crate::paths::SystemPaths;
use crate::runner::Runner;

const RESTART_TIMEOUT: Duration = Duration::from_secs(30);

const ETH0: Template = Template {
    body: "\n\ninterface eth0\nstatic ip_address=myip\nstatic routers=mygw\nstatic domain_name_servers=mydns\n",
    placeholders: &["myip", "mygw", "mydns"],
};

const WLAN0: Template = Template {
    body: "\n\ninterface wlan0\nstatic ip_address=myip\nstatic routers=mygw\nstatic domain_name_servers=mydns\n",
    placeholders: &["myip", "mygw", "mydns"],
};

const WLAN1: Template = Template {
    body: "\n\ninterface wlan1\nstatic ip_address=myip\nstatic routers=mygw\nstatic domain_name_servers=mydns\n",
    placeholders: &["myip", "mygw", "mydns"],
};

/// Appends a static-address stanza for one interface to the dhcpcd config
/// and bounces networking.
#[derive(Debug, Clone)]
pub struct IpChange {
    pub interface: String,
    pub ip: String,
    pub gateway: String,
    pub dns: String,
}

impl IpChange {
    fn template(&self) -> Option<&'static Template> {
        match self.interface.as_str() {
            "eth0" => Some(&ETH0),
            "wlan0" => Some(&WLAN0),
            "wlan1" => Some(&WLAN1),
            _ => None,
        }
    }

    /// The rendered stanza, or None when the arguments make this block a
    /// no-op (empty address, unknown interface).
    pub fn fragment(&self) -> Option<String> {
        if self.ip.trim().is_empty() {
            return None;
        }
        let template = self.template()?;
        Some(template.render(&[
            ("myip", &self.ip),
            ("mygw", &self.gateway),
            ("mydns", &self.dns),
        ]))
    }

    pub fn run(&self, paths: &SystemPaths, runner: &Runner) -> Result<()> {
        let Some(stanza) = self.fragment() else {
            tracing::warn!(
                interface = %self.interface,
                "no address or unrecognized interface; {} untouched",
                paths.dhcpcd_conf.display()
            );
            return Ok(());
        };

        if fragment::append_unless_present(&paths.dhcpcd_conf, &stanza)? {
            tracing::info!(
                interface = %self.interface,
                "wrote static address to {}",
                paths.dhcpcd_conf.display()
            );
        } else {
            tracing::info!("static address stanza already present; append skipped");
        }

        runner.run("/etc/init.d/networking", &["restart"])?;
        runner.run("/etc/init.d/networking", &["reload"])?;

        if !runner.dry_run && !net::wait_for_network(Some(&self.interface), RESTART_TIMEOUT) {
            tracing::warn!(
                interface = %self.interface,
                "network not up after {}s; continuing",
                RESTART_TIMEOUT.as_secs()
            );
        }
        Ok(())
    }
}
