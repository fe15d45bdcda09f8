pub mod authorize_key;
pub mod change_pass;
pub mod ip_change;
pub mod samba_mount;
pub mod set_display;
pub mod wifi_setup;
