use std::fs;

use boot_blocks::blocks::wifi_setup::{SECURITY_OPEN, SECURITY_WEP, SECURITY_WPA, WifiSetup};
use boot_blocks::paths::SystemPaths;
use boot_blocks::runner::Runner;

fn wifi(ssid: &str, psk: &str, security: &str) -> WifiSetup {
    WifiSetup {
        ssid: ssid.to_string(),
        psk: psk.to_string(),
        security: security.to_string(),
        regulatory_domain: "GB".to_string(),
    }
}

#[test]
fn open_network_has_no_key_line() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let paths = SystemPaths::rooted_at(tmp.path());

    wifi("Home", "", SECURITY_OPEN)
        .run(&paths, &Runner::new(true))
        .expect("run");

    let conf = fs::read_to_string(&paths.wpa_supplicant_conf).expect("read supplicant conf");
    assert!(conf.contains("ssid=\"Home\""));
    assert!(conf.contains("key_mgmt=NONE"));
    assert!(conf.contains("country=GB"));
    assert!(conf.contains("scan_ssid=1"));
    assert!(!conf.contains("psk"));
    assert!(!conf.contains("wep_key0"));
}

#[test]
fn wpa_network_carries_the_passphrase() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let paths = SystemPaths::rooted_at(tmp.path());

    wifi("Home", "secret", SECURITY_WPA)
        .run(&paths, &Runner::new(true))
        .expect("run");

    let conf = fs::read_to_string(&paths.wpa_supplicant_conf).expect("read supplicant conf");
    assert!(conf.contains("key_mgmt=WPA-PSK"));
    assert!(conf.contains("psk=\"secret\""));
}

#[test]
fn wep_network_uses_wep_key0() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let paths = SystemPaths::rooted_at(tmp.path());

    wifi("Legacy", "0123456789", SECURITY_WEP)
        .run(&paths, &Runner::new(true))
        .expect("run");

    let conf = fs::read_to_string(&paths.wpa_supplicant_conf).expect("read supplicant conf");
    assert!(conf.contains("key_mgmt=NONE"));
    assert!(conf.contains("wep_key0=\"0123456789\""));
    assert!(!conf.contains("key_mgmt=WPA-PSK"));
}

#[test]
fn empty_psk_falls_back_to_open_whatever_the_label() {
    let net = wifi("Cafe", "", SECURITY_WPA);
    let fragment = net.fragment().expect("fragment");
    assert!(fragment.contains("key_mgmt=NONE"));
    assert!(!fragment.contains("psk=\""));
}

#[test]
fn no_rendered_mode_leaks_a_placeholder() {
    for security in [SECURITY_OPEN, SECURITY_WEP, SECURITY_WPA] {
        let fragment = wifi("Home", "secret", security)
            .fragment()
            .expect("fragment");
        assert!(
            !fragment.contains("WIFI-"),
            "placeholder survived for {security}: {fragment}"
        );
    }
}

#[test]
fn empty_ssid_leaves_an_absent_file_absent() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let paths = SystemPaths::rooted_at(tmp.path());

    wifi("", "secret", SECURITY_WPA)
        .run(&paths, &Runner::new(true))
        .expect("run");

    assert!(!paths.wpa_supplicant_conf.exists());
}

#[test]
fn unknown_security_leaves_an_existing_file_byte_identical() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let paths = SystemPaths::rooted_at(tmp.path());
    fs::create_dir_all(paths.wpa_supplicant_conf.parent().expect("parent")).expect("mkdir");
    fs::write(&paths.wpa_supplicant_conf, "country=GB\n").expect("seed");

    wifi("Home", "secret", "EAP-TLS")
        .run(&paths, &Runner::new(true))
        .expect("run");

    assert_eq!(
        fs::read_to_string(&paths.wpa_supplicant_conf).expect("read"),
        "country=GB\n"
    );
}

#[test]
fn rerunning_the_block_does_not_duplicate_the_network() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let paths = SystemPaths::rooted_at(tmp.path());
    let runner = Runner::new(true);

    let net = wifi("Home", "secret", SECURITY_WPA);
    net.run(&paths, &runner).expect("first run");
    let after_first = fs::read_to_string(&paths.wpa_supplicant_conf).expect("read");
    net.run(&paths, &runner).expect("second run");
    assert_eq!(
        fs::read_to_string(&paths.wpa_supplicant_conf).expect("read"),
        after_first
    );
}
