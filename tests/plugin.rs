//! Plugin lifecycle integration tests

use ts3tts::plugin::init_status;
use ts3tts::{Error, Plugin, TextMessageEvent};

mod common;

use common::{RecordingLauncher, plugin_dir_with_settings};

#[test]
fn test_init_rejects_unknown_key() {
    let dir = plugin_dir_with_settings("foo=bar\n");
    let result = Plugin::init_with_launcher(dir.path(), RecordingLauncher::default());

    assert!(matches!(result, Err(Error::Config(_))));
    assert_eq!(init_status(&result), 1);
}

#[test]
fn test_init_accepts_known_keys() {
    let dir = plugin_dir_with_settings("jpn=true\npath=C:\\x.exe\ncmd=-t\n");
    let result = Plugin::init_with_launcher(dir.path(), RecordingLauncher::default());
    assert_eq!(init_status(&result), 0);

    let plugin = result.unwrap();
    assert!(plugin.config().filter_enabled);
    assert_eq!(plugin.config().cmd, "-t");
    assert_eq!(plugin.config().path.to_str(), Some("C:\\x.exe"));
}

#[test]
fn test_init_with_comments() {
    let dir = plugin_dir_with_settings(
        "# Balabolka console\npath=/opt/balcon\n# voice\ncmd=-n Haruka\njpn=false\n",
    );
    let plugin = Plugin::init_with_launcher(dir.path(), RecordingLauncher::default()).unwrap();

    assert!(!plugin.config().filter_enabled);
    assert_eq!(plugin.config().cmd, "-n Haruka");
}

#[test]
fn test_full_lifecycle() {
    let dir = plugin_dir_with_settings("path=/opt/balcon\ncmd=-n Haruka\njpn=true\n");
    let mut plugin = Plugin::init_with_launcher(dir.path(), RecordingLauncher::default()).unwrap();
    plugin.register_plugin_id("ts3tts");

    let status = plugin.on_text_message(&TextMessageEvent::from_text("おはよう everyone"));
    assert_eq!(status.code(), 0);

    let launches = plugin.dispatcher().launcher().launches();
    assert_eq!(launches.len(), 1);
    assert_eq!(launches[0].0.to_str(), Some("/opt/balcon"));
    assert_eq!(launches[0].1, "-n Haruka -t \"おはよう\"");

    plugin.shutdown();
    assert_eq!(plugin.plugin_id(), None);
}

#[test]
fn test_init_without_settings_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = Plugin::init_with_launcher(dir.path(), RecordingLauncher::default());
    assert_eq!(init_status(&result), 0);

    let plugin = result.unwrap();
    assert!(!plugin.config().filter_enabled);
    assert!(plugin.config().cmd.is_empty());
    assert!(plugin.config().path.as_os_str().is_empty());
}

#[test]
fn test_init_rejects_padded_key() {
    let dir = plugin_dir_with_settings("path =/opt/balcon\n");
    let result = Plugin::init_with_launcher(dir.path(), RecordingLauncher::default());
    assert_eq!(init_status(&result), 1);
}
