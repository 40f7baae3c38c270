//! Message-to-speech pipeline integration tests
//!
//! Runs the dispatcher against a recording launcher, so no process is spawned

use std::path::PathBuf;
use std::sync::Arc;

use ts3tts::text::{JAPANESE_RANGES, decode_utf8, retain_japanese};
use ts3tts::{Config, Dispatcher, EventStatus, TextMessageEvent};

mod common;

use common::{RecordingLauncher, wide};

fn dispatcher(cmd: &str, filter_enabled: bool) -> Dispatcher<RecordingLauncher> {
    let config = Arc::new(Config::new("C:\\balcon\\balcon.exe", cmd, filter_enabled));
    Dispatcher::with_launcher(config, RecordingLauncher::default())
}

#[test]
fn test_say_command_for_japanese_payload() {
    let d = dispatcher("say", true);
    d.on_text_message(&TextMessageEvent::from_text("こん"));

    assert_eq!(d.launcher().wide_command_lines(), vec![wide("say -t \"こん\"")]);
    assert_eq!(
        d.launcher().launches()[0].0,
        PathBuf::from("C:\\balcon\\balcon.exe")
    );
}

#[test]
fn test_filter_mode_skips_non_japanese_messages() {
    let d = dispatcher("-n Haruka", true);

    for message in ["hello", "123 !?", "ÄÖÜ", "😀", ""] {
        let status = d.on_text_message(&TextMessageEvent::from_text(message));
        assert_eq!(status, EventStatus::Continue);
    }

    assert_eq!(d.launcher().count(), 0);
}

#[test]
fn test_filter_mode_strips_latin() {
    let d = dispatcher("-n Haruka", true);
    d.on_text_message(&TextMessageEvent::from_text("lol 草 www"));

    assert_eq!(d.launcher().launches()[0].1, "-n Haruka -t \"草\"");
}

#[test]
fn test_pass_through_keeps_every_character() {
    let d = dispatcher("say", false);
    let message = "Hello, 世界! 😀 \\path";

    assert_eq!(d.speech_text(message.as_bytes()), wide(message));

    d.on_text_message(&TextMessageEvent::from_text(message));
    assert_eq!(
        d.launcher().launches()[0].1,
        format!("say -t \"{message}\"")
    );
}

#[test]
fn test_already_ignored_messages_never_launch() {
    for filter_enabled in [true, false] {
        let d = dispatcher("say", filter_enabled);
        let event = TextMessageEvent {
            from_name: "spammer".to_string(),
            ..TextMessageEvent::from_text("こんにちは hello")
        }
        .ignored();

        assert_eq!(d.on_text_message(&event), EventStatus::Continue);
        assert_eq!(d.launcher().count(), 0);
    }
}

#[test]
fn test_one_launch_per_spoken_message() {
    let d = dispatcher("say", true);

    d.on_text_message(&TextMessageEvent::from_text("あ"));
    d.on_text_message(&TextMessageEvent::from_text("no"));
    d.on_text_message(&TextMessageEvent::from_text("い"));

    let lines: Vec<String> = d.launcher().launches().into_iter().map(|(_, l)| l).collect();
    assert_eq!(lines, vec!["say -t \"あ\"", "say -t \"い\""]);
}

#[test]
fn test_nul_terminated_message() {
    let d = dispatcher("say", false);
    let event = TextMessageEvent {
        message: b"hi\0garbage".to_vec(),
        ..TextMessageEvent::default()
    };
    d.on_text_message(&event);

    assert_eq!(d.launcher().launches()[0].1, "say -t \"hi\"");
}

#[test]
fn test_filter_idempotent_on_decoded_messages() {
    let messages = [
        "今日は良い天気ですね。",
        "mixed テキスト with ｶﾀｶﾅ and ＡＢＣ",
        "no japanese",
        "「引用」と、句読点。",
    ];

    for message in messages {
        let once = retain_japanese(&decode_utf8(message.as_bytes()));
        assert_eq!(retain_japanese(&once), once, "message: {message}");
        assert!(
            once.iter()
                .all(|u| JAPANESE_RANGES.iter().any(|r| r.contains(*u)))
        );
    }
}

#[test]
fn test_shared_config_across_dispatchers() {
    let config = Arc::new(Config::new("/usr/bin/say", "say", true));
    let first = Dispatcher::with_launcher(Arc::clone(&config), RecordingLauncher::default());
    let second = Dispatcher::with_launcher(Arc::clone(&config), RecordingLauncher::default());

    first.on_text_message(&TextMessageEvent::from_text("あ"));
    second.on_text_message(&TextMessageEvent::from_text("い"));

    assert_eq!(first.launcher().count(), 1);
    assert_eq!(second.launcher().count(), 1);
    assert_eq!(Arc::strong_count(&config), 3);
}
