//! Integration tests for the Runtime driving App through a scripted Driver.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - Session steps reach the SDK in lifecycle order
//! - Attachments are decrypted exactly once and their result is rendered
//! - The last rendered App state reflects the expected timeline

use std::{
    collections::VecDeque,
    convert::Infallible,
    sync::{Arc, Mutex},
};

use murmur_app::{App, AppEvent, Driver, KeyInput, Runtime, TimelineEntry};
use murmur_core::{
    DecryptError, EventId, Membership, MembershipEvent, UserId,
    audio::{
        AttachmentSource, AudioContent, AudioView, EncryptedFile, MediaResolver, PlaceholderImage,
    },
    lifecycle::{Credentials, Dispatch, SessionAction, SessionState},
    summary::SummaryConfig,
};

/// Side effects observed by the scripted driver.
#[derive(Default)]
struct Log {
    performed: Vec<SessionAction>,
    decrypted: Vec<EncryptedFile>,
    last_frame: Option<App>,
    stopped: bool,
}

/// Driver replaying a fixed event script, then pressing Esc.
struct ScriptedDriver {
    script: VecDeque<AppEvent>,
    decrypt_result: Result<Vec<u8>, DecryptError>,
    log: Arc<Mutex<Log>>,
}

impl ScriptedDriver {
    fn new(
        script: Vec<AppEvent>,
        decrypt_result: Result<Vec<u8>, DecryptError>,
    ) -> (Self, Arc<Mutex<Log>>) {
        let log = Arc::new(Mutex::new(Log::default()));
        let driver = Self { script: script.into(), decrypt_result, log: Arc::clone(&log) };
        (driver, log)
    }
}

impl Driver for ScriptedDriver {
    type Error = Infallible;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        Ok(Some(self.script.pop_front().unwrap_or(AppEvent::Key(KeyInput::Esc))))
    }

    async fn perform(&mut self, action: SessionAction) -> Result<Option<AppEvent>, Self::Error> {
        let follow_up = match action {
            SessionAction::RequestLogout => Some(AppEvent::LogoutCompleted { result: Ok(()) }),
            _ => None,
        };
        self.log.lock().unwrap().performed.push(action);
        Ok(follow_up)
    }

    async fn decrypt_attachment(&mut self, file: &EncryptedFile) -> Result<Vec<u8>, DecryptError> {
        self.log.lock().unwrap().decrypted.push(file.clone());
        self.decrypt_result.clone()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.log.lock().unwrap().last_frame = Some(app.clone());
        Ok(())
    }

    fn stop(&mut self) {
        self.log.lock().unwrap().stopped = true;
    }
}

struct NoResolver;

impl MediaResolver for NoResolver {
    fn http_url(&self, _content_url: &str) -> Option<String> {
        None
    }
}

fn credentials() -> Credentials {
    Credentials {
        homeserver_url: "https://hs.example.org".into(),
        identity_server_url: "https://is.example.org".into(),
        user_id: UserId::new("@me:example.org"),
        access_token: "token".into(),
        guest: false,
    }
}

fn join(id: &str, sender: &str) -> AppEvent {
    AppEvent::MembershipReceived {
        room_id: "!room:example.org".into(),
        event: MembershipEvent::new(EventId::new(id), UserId::new(sender), Membership::Join),
    }
}

fn encrypted_audio() -> AppEvent {
    AppEvent::AudioReceived {
        room_id: "!room:example.org".into(),
        event_id: EventId::new("$audio"),
        sender: UserId::new("@bob:example.org"),
        content: AudioContent {
            body: "voice.ogg".into(),
            mimetype: Some("audio/ogg".into()),
            source: AttachmentSource::Encrypted {
                file: EncryptedFile {
                    url: "mxc://example.org/voice".into(),
                    key: "key".into(),
                    iv: "iv".into(),
                    sha256: "hash".into(),
                },
            },
        },
    }
}

/// Audio view of `$audio` in the last rendered frame, as (alt or src, placeholder).
fn rendered_audio(log: &Log) -> Option<(Option<String>, Option<PlaceholderImage>)> {
    let app = log.last_frame.as_ref()?;
    let room = app.active_room_state()?;
    room.timeline.iter().find_map(|entry| match entry {
        TimelineEntry::Audio { body, .. } => Some(match body.view(&NoResolver) {
            AudioView::Player { src, .. } => (src, None),
            AudioView::Placeholder { image, .. } => (None, Some(image)),
        }),
        _ => None,
    })
}

#[tokio::test]
async fn login_summarise_and_logout() {
    let script = vec![
        join("$1", "@a:example.org"),
        join("$2", "@b:example.org"),
        join("$3", "@c:example.org"),
        AppEvent::Key(KeyInput::Up),
        AppEvent::Key(KeyInput::Enter),
        AppEvent::Key(KeyInput::Char('L')),
    ];
    let (driver, log) = ScriptedDriver::new(script, Err(DecryptError::Unsupported));

    Runtime::new(driver, SummaryConfig::default()).run(Some(credentials())).await.unwrap();

    let log = log.lock().unwrap();

    // Oracle: lifecycle steps in order
    assert!(matches!(log.performed.first(), Some(SessionAction::ReplaceClient(_))));
    let logout_at = log.performed.iter().position(|a| *a == SessionAction::RequestLogout);
    let start_at =
        log.performed.iter().position(|a| matches!(a, SessionAction::StartClient { .. }));
    assert!(start_at < logout_at, "client must start before logout");
    assert_eq!(log.performed.last(), Some(&SessionAction::Dispatch(Dispatch::OnLoggedOut)));

    // Oracle: logged out and stopped
    let app = log.last_frame.as_ref().unwrap();
    assert_eq!(app.session_state(), &SessionState::LoggedOut);
    assert!(app.rooms().is_empty());
    assert!(log.stopped);
}

#[tokio::test]
async fn encrypted_audio_decrypts_once_and_plays() {
    let (driver, log) = ScriptedDriver::new(vec![encrypted_audio()], Ok(b"ogg".to_vec()));

    Runtime::new(driver, SummaryConfig::default()).run(Some(credentials())).await.unwrap();

    let log = log.lock().unwrap();

    assert_eq!(log.decrypted.len(), 1);
    assert_eq!(log.decrypted[0].url, "mxc://example.org/voice");
    assert_eq!(rendered_audio(&log), Some((Some("data:audio/ogg;base64,b2dn".into()), None)));
}

#[tokio::test]
async fn failed_decryption_renders_warning() {
    let (driver, log) =
        ScriptedDriver::new(vec![encrypted_audio()], Err(DecryptError::Unsupported));

    Runtime::new(driver, SummaryConfig::default()).run(None).await.unwrap();

    let log = log.lock().unwrap();

    assert!(log.performed.is_empty(), "no login without credentials");
    assert_eq!(rendered_audio(&log), Some((None, Some(PlaceholderImage::Warning))));
}
