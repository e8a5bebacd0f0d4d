use super::*;

struct Silent;

impl OutputHandle for Silent {
    fn load(&mut self, _uri: &str) -> Result<(), PlaybackError> {
        Ok(())
    }
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn stop(&mut self) {}
    fn set_position(&mut self, _seconds: f64) -> Result<(), PlaybackError> {
        Ok(())
    }
    fn set_volume(&mut self, _level: f32) {}
}

#[test]
fn default_poll_reports_nothing() {
    let mut out = Silent;
    out.load("file:///a.mp3").unwrap();
    assert!(out.poll().is_empty());
}

#[test]
fn playback_errors_read_as_user_messages() {
    assert_eq!(
        PlaybackError::UnsupportedUri("https://x.test/a.mp3".into()).to_string(),
        "unsupported source: https://x.test/a.mp3"
    );
    assert_eq!(
        PlaybackError::Stream("device lost".into()).to_string(),
        "device lost"
    );

    let open = PlaybackError::Open {
        path: "/music/a.mp3".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    };
    assert_eq!(open.to_string(), "cannot open /music/a.mp3: missing");
}
