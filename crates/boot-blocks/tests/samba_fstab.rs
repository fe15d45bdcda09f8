use std::fs;

use boot_blocks::blocks::samba_mount::SambaMount;
use boot_blocks::paths::SystemPaths;
use boot_blocks::runner::Runner;

fn share(server: &str, local_dir: &str, domain: &str) -> SambaMount {
    SambaMount {
        server: server.to_string(),
        local_dir: local_dir.to_string(),
        username: "pi".to_string(),
        password: "raspberry".to_string(),
        domain: domain.to_string(),
        file_mode: "0755".to_string(),
        dir_mode: "0755".to_string(),
    }
}

#[test]
fn entry_is_appended_and_mount_point_created() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let paths = SystemPaths::rooted_at(tmp.path());
    let local = tmp.path().join("mnt/media");

    share("//nas/media", local.to_str().expect("utf8 path"), "")
        .run(&paths, &Runner::new(true))
        .expect("run");

    assert!(local.is_dir());
    let fstab = fs::read_to_string(&paths.fstab).expect("read fstab");
    let line = format!(
        "//nas/media {} cifs username=pi,password=raspberry,file_mode=0755,dir_mode=0755,users,x-systemd.automount,noauto,user_xattr 0 0\n",
        local.display()
    );
    assert_eq!(fstab, line);
}

#[test]
fn domain_contributes_an_option_only_when_set() {
    let with = share("//nas/media", "/mnt/media", "WORKGROUP")
        .fstab_entry()
        .expect("entry");
    assert!(with.contains(",domain=WORKGROUP,"));

    let without = share("//nas/media", "/mnt/media", "")
        .fstab_entry()
        .expect("entry");
    assert!(!without.contains("domain="));
    assert!(!without.contains("SMB-"), "placeholder survived: {without}");
}

#[test]
fn missing_server_is_a_no_op() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let paths = SystemPaths::rooted_at(tmp.path());

    share("", "/mnt/media", "")
        .run(&paths, &Runner::new(true))
        .expect("run");

    assert!(!paths.fstab.exists());
}

#[test]
fn rerunning_does_not_duplicate_the_entry() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let paths = SystemPaths::rooted_at(tmp.path());
    let local = tmp.path().join("mnt/media");
    let runner = Runner::new(true);

    let s = share("//nas/media", local.to_str().expect("utf8 path"), "HOME");
    s.run(&paths, &runner).expect("first run");
    let after_first = fs::read_to_string(&paths.fstab).expect("read");
    s.run(&paths, &runner).expect("second run");
    assert_eq!(fs::read_to_string(&paths.fstab).expect("read"), after_first);
}
