//! Argument construction tests for the jpackage command builder.

use distpack::packager::error::Error;
use distpack::packager::jpackage::jpackage_args;
use distpack::packager::settings::{
    LinuxSettings, MacOsSettings, MacSigningSettings, PackageSettings, PackageSpec,
    PackageSpecBuilder, Platform, TargetFormat, WindowsSettings,
};
use std::path::Path;

fn base_spec(format: TargetFormat) -> PackageSpecBuilder {
    PackageSpecBuilder::new()
        .target_format(format)
        .package_settings(PackageSettings {
            name: "Sample App".into(),
            description: Some("A sample application".into()),
            version: Some("1.2.3".into()),
            vendor: Some("Acme Corp".into()),
            copyright: Some("(c) Acme Corp".into()),
        })
        .main_jar("build/libs/sample.jar")
        .main_class("com.acme.Main")
}

fn args_for(spec: &PackageSpec, os: Platform) -> Vec<String> {
    jpackage_args(spec, os, Path::new("work/staging"), Path::new("dist"), false)
        .expect("argument construction should succeed")
}

fn has_option(args: &[String], name: &str, value: &str) -> bool {
    args.windows(2).any(|w| w[0] == name && w[1] == value)
}

#[test]
fn app_image_never_carries_installer_args() {
    let spec = base_spec(TargetFormat::AppImage)
        .license_file("LICENSE.txt")
        .installation_dir("/opt/sample")
        .build()
        .expect("valid spec");
    let args = args_for(&spec, Platform::Linux);

    assert!(has_option(&args, "--input", "work/staging"));
    assert!(has_option(&args, "--main-jar", "sample.jar"));
    assert!(has_option(&args, "--main-class", "com.acme.Main"));
    assert!(!args.contains(&"--install-dir".to_string()));
    assert!(!args.contains(&"--license-file".to_string()));
    assert!(!args.contains(&"--app-image".to_string()));
}

#[test]
fn installer_from_app_image_never_carries_build_args() {
    let spec = base_spec(TargetFormat::Deb)
        .app_image("build/image/sample")
        .license_file("LICENSE.txt")
        .installation_dir("/opt/sample")
        .build()
        .expect("valid spec");
    let args = args_for(&spec, Platform::Linux);

    assert!(has_option(&args, "--app-image", "build/image/sample"));
    assert!(has_option(&args, "--install-dir", "/opt/sample"));
    assert!(has_option(&args, "--license-file", "LICENSE.txt"));
    assert!(!args.contains(&"--input".to_string()));
    assert!(!args.contains(&"--main-jar".to_string()));
    assert!(!args.contains(&"--main-class".to_string()));
}

#[test]
fn installer_without_app_image_builds_from_scratch() {
    let spec = base_spec(TargetFormat::Deb)
        .installation_dir("/opt/sample")
        .build()
        .expect("valid spec");
    let args = args_for(&spec, Platform::Linux);

    // Both subsets apply: the launcher is built and the installer wraps it.
    assert!(has_option(&args, "--input", "work/staging"));
    assert!(has_option(&args, "--install-dir", "/opt/sample"));
    assert!(!args.contains(&"--app-image".to_string()));
}

#[test]
fn common_metadata_is_always_emitted() {
    let spec = base_spec(TargetFormat::Rpm).build().expect("valid spec");
    let args = args_for(&spec, Platform::Linux);

    assert!(has_option(&args, "--type", "rpm"));
    assert!(has_option(&args, "--dest", "dist"));
    assert!(has_option(&args, "--name", "Sample App"));
    assert!(has_option(&args, "--description", "A sample application"));
    assert!(has_option(&args, "--app-version", "1.2.3"));
    assert!(has_option(&args, "--vendor", "Acme Corp"));
    assert!(!args.contains(&"--verbose".to_string()));
}

#[test]
fn verbose_emits_a_bare_flag() {
    let spec = base_spec(TargetFormat::AppImage).build().expect("valid spec");
    let args = jpackage_args(&spec, Platform::Linux, Path::new("s"), Path::new("d"), true)
        .expect("argument construction should succeed");

    assert!(args.contains(&"--verbose".to_string()));
    assert!(!args.contains(&"true".to_string()));
}

#[test]
fn launcher_args_and_jvm_args_repeat() {
    let spec = base_spec(TargetFormat::AppImage)
        .launcher_args(vec!["--data-dir=/var/sample".into(), "--headless".into()])
        .jvm_args(vec!["-Xmx1g".into()])
        .build()
        .expect("valid spec");
    let args = args_for(&spec, Platform::Linux);

    let arg_count = args.iter().filter(|a| *a == "--arguments").count();
    assert_eq!(arg_count, 2);
    assert!(has_option(&args, "--arguments", "--headless"));
    assert!(has_option(&args, "--java-options", "-Xmx1g"));
}

#[test]
fn linux_installer_flags_are_emitted() {
    let spec = base_spec(TargetFormat::Deb)
        .linux(LinuxSettings {
            shortcut: Some(true),
            package_name: Some("sample-app".into()),
            deb_maintainer: Some("dev@acme.example".into()),
            menu_group: Some("Development".into()),
            ..Default::default()
        })
        .build()
        .expect("valid spec");
    let args = args_for(&spec, Platform::Linux);

    assert!(args.contains(&"--linux-shortcut".to_string()));
    assert!(has_option(&args, "--linux-package-name", "sample-app"));
    assert!(has_option(&args, "--linux-deb-maintainer", "dev@acme.example"));
    assert!(has_option(&args, "--linux-menu-group", "Development"));
    assert!(!args.contains(&"--linux-app-release".to_string()));
}

#[test]
fn windows_installer_flags_are_emitted() {
    let spec = base_spec(TargetFormat::Exe)
        .windows(WindowsSettings {
            console: Some(true),
            dir_chooser: Some(true),
            menu: Some(true),
            menu_group: Some("Acme".into()),
            upgrade_uuid: Some("9c0b2f1e-5a52-4f84-93f2-0b53a46b74a1".into()),
            ..Default::default()
        })
        .build()
        .expect("valid spec");
    let args = args_for(&spec, Platform::Windows);

    // No pre-built app image, so the launcher flag applies too.
    assert!(args.contains(&"--win-console".to_string()));
    assert!(args.contains(&"--win-dir-chooser".to_string()));
    assert!(args.contains(&"--win-menu".to_string()));
    assert!(!args.contains(&"--win-shortcut".to_string()));
    assert!(has_option(&args, "--win-menu-group", "Acme"));
    assert!(has_option(
        &args,
        "--win-upgrade-uuid",
        "9c0b2f1e-5a52-4f84-93f2-0b53a46b74a1"
    ));
}

#[test]
fn mac_name_and_identifier_emitted_on_macos() {
    let spec = base_spec(TargetFormat::Dmg)
        .macos(MacOsSettings {
            package_name: Some("Sample".into()),
            bundle_id: Some("com.acme.sample".into()),
            ..Default::default()
        })
        .build()
        .expect("valid spec");
    let args = args_for(&spec, Platform::MacOs);

    assert!(has_option(&args, "--mac-package-name", "Sample"));
    assert!(has_option(&args, "--mac-package-identifier", "com.acme.sample"));
    assert!(!args.contains(&"--mac-sign".to_string()));
}

#[test]
fn mac_signing_args_appended_when_enabled() {
    let spec = base_spec(TargetFormat::Dmg)
        .macos(MacOsSettings {
            bundle_id: Some("com.acme.sample".into()),
            signing: MacSigningSettings {
                sign: true,
                identity: Some("Developer ID Application: Jane Doe".into()),
                keychain: Some("/tmp/build.keychain".into()),
                prefix: None,
            },
            ..Default::default()
        })
        .build()
        .expect("valid spec");
    let args = args_for(&spec, Platform::MacOs);

    assert!(args.contains(&"--mac-sign".to_string()));
    assert!(has_option(
        &args,
        "--mac-signing-key-user-name",
        "Developer ID Application: Jane Doe"
    ));
    assert!(has_option(&args, "--mac-signing-keychain", "/tmp/build.keychain"));
    assert!(has_option(&args, "--mac-package-signing-prefix", "com.acme.sample."));
}

#[test]
fn signing_without_identity_fails_before_emitting() {
    let spec = base_spec(TargetFormat::Dmg)
        .macos(MacOsSettings {
            signing: MacSigningSettings {
                sign: true,
                ..Default::default()
            },
            ..Default::default()
        })
        .build()
        .expect("valid spec");

    let result = jpackage_args(&spec, Platform::MacOs, Path::new("s"), Path::new("d"), false);
    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[test]
fn signing_settings_are_ignored_off_macos() {
    // Incomplete signing settings do not matter on other platforms.
    let spec = base_spec(TargetFormat::Deb)
        .macos(MacOsSettings {
            signing: MacSigningSettings {
                sign: true,
                ..Default::default()
            },
            ..Default::default()
        })
        .build()
        .expect("valid spec");
    let args = args_for(&spec, Platform::Linux);

    assert!(!args.contains(&"--mac-sign".to_string()));
}
