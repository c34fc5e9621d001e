//! Audio attachment bodies.
//!
//! Plain attachments play straight from their HTTP URL. Encrypted ones are
//! decrypted once, when the body is first mounted, and then played from a
//! `data:` URL built from the plaintext. Until then a spinner stands in for
//! the player; if decryption fails a warning image replaces it for good.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::DecryptError;

const FALLBACK_MIMETYPE: &str = "application/octet-stream";

/// Key material and location of an encrypted attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedFile {
    /// Content URL of the ciphertext.
    pub url: String,
    /// Unpadded base64url AES key.
    pub key: String,
    /// Unpadded base64 initialisation vector.
    pub iv: String,
    /// Unpadded base64 SHA-256 of the ciphertext.
    pub sha256: String,
}

/// Where the audio bytes come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttachmentSource {
    /// Unencrypted media at a content URL.
    Plain {
        /// Content URL (resolved through a [`MediaResolver`]).
        url: String,
    },
    /// Encrypted media that has to be decrypted client-side.
    Encrypted {
        /// Key material and ciphertext location.
        file: EncryptedFile,
    },
}

/// Content of an audio message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioContent {
    /// Human readable description, used as alt text.
    pub body: String,
    /// MIME type of the audio, if the sender supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    /// Attachment location.
    pub source: AttachmentSource,
}

/// Translates content URLs into fetchable HTTP URLs.
///
/// Implemented by the SDK layer, which knows the homeserver.
pub trait MediaResolver {
    /// HTTP URL for `content_url`. `None` if it cannot be resolved.
    fn http_url(&self, content_url: &str) -> Option<String>;
}

/// Instructions produced by [`AudioBody`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioAction {
    /// Fetch and decrypt the attachment, then report back through
    /// [`AudioBody::attachment_decrypted`].
    DecryptAttachment(EncryptedFile),
}

/// Image shown instead of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderImage {
    /// Decryption in progress.
    Spinner,
    /// Decryption failed.
    Warning,
}

/// What the frontend should draw for an audio body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioView<'a> {
    /// No playable source (yet).
    Placeholder {
        /// Alt text.
        alt: &'a str,
        /// Image to show.
        image: PlaceholderImage,
    },
    /// Audio player.
    Player {
        /// Playable URL. `None` if a plain content URL could not be resolved.
        src: Option<String>,
        /// Playback state.
        playing: bool,
        /// Decrypted bytes, for the download link of encrypted files.
        decrypted: Option<&'a [u8]>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Decryption {
    NotNeeded,
    Waiting,
    InFlight,
    Done { url: String, blob: Vec<u8> },
    Failed,
}

/// State machine for one audio attachment in the timeline.
#[derive(Debug, Clone)]
pub struct AudioBody {
    content: AudioContent,
    decryption: Decryption,
    playing: bool,
}

impl AudioBody {
    /// Create an unmounted body.
    pub fn new(content: AudioContent) -> Self {
        let decryption = match content.source {
            AttachmentSource::Plain { .. } => Decryption::NotNeeded,
            AttachmentSource::Encrypted { .. } => Decryption::Waiting,
        };
        Self { content, decryption, playing: false }
    }

    /// Attachment content.
    pub fn content(&self) -> &AudioContent {
        &self.content
    }

    /// Whether playback is on.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Body became visible. Kicks off decryption the first time an
    /// encrypted attachment is mounted.
    pub fn mount(&mut self) -> Vec<AudioAction> {
        if self.decryption != Decryption::Waiting {
            return vec![];
        }
        let AttachmentSource::Encrypted { file } = &self.content.source else {
            return vec![];
        };

        let file = file.clone();
        self.decryption = Decryption::InFlight;
        vec![AudioAction::DecryptAttachment(file)]
    }

    /// Report the outcome of [`AudioAction::DecryptAttachment`].
    ///
    /// Returns `true` if the view changed. Results arriving when no
    /// decryption is in flight are ignored.
    pub fn attachment_decrypted(&mut self, result: Result<Vec<u8>, DecryptError>) -> bool {
        if self.decryption != Decryption::InFlight {
            tracing::debug!("ignoring unexpected decryption result");
            return false;
        }

        self.decryption = match result {
            Ok(blob) => {
                let mimetype = self.content.mimetype.as_deref().unwrap_or(FALLBACK_MIMETYPE);
                Decryption::Done { url: data_url(mimetype, &blob), blob }
            },
            Err(err) => {
                tracing::warn!(%err, "unable to decrypt attachment");
                Decryption::Failed
            },
        };
        true
    }

    /// Start or pause playback.
    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    /// Current view.
    pub fn view<R: MediaResolver + ?Sized>(&self, resolver: &R) -> AudioView<'_> {
        let placeholder = |image| AudioView::Placeholder { alt: &self.content.body, image };

        match (&self.decryption, &self.content.source) {
            (Decryption::Waiting | Decryption::InFlight, _) => {
                placeholder(PlaceholderImage::Spinner)
            },
            (Decryption::Failed, _) => placeholder(PlaceholderImage::Warning),
            (Decryption::Done { url, blob }, _) => AudioView::Player {
                src: Some(url.clone()),
                playing: self.playing,
                decrypted: Some(blob.as_slice()),
            },
            (Decryption::NotNeeded, AttachmentSource::Plain { url }) => AudioView::Player {
                src: resolver.http_url(url),
                playing: self.playing,
                decrypted: None,
            },
            (Decryption::NotNeeded, AttachmentSource::Encrypted { .. }) => AudioView::Player {
                src: None,
                playing: self.playing,
                decrypted: None,
            },
        }
    }
}

/// Build a `data:` URL holding `bytes`.
pub fn data_url(mimetype: &str, bytes: &[u8]) -> String {
    format!("data:{mimetype};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Resolver;

    impl MediaResolver for Resolver {
        fn http_url(&self, content_url: &str) -> Option<String> {
            content_url
                .strip_prefix("mxc://")
                .map(|rest| format!("https://hs.example.org/_media/download/{rest}"))
        }
    }

    fn encrypted() -> AudioContent {
        AudioContent {
            body: "voice.ogg".into(),
            mimetype: Some("audio/ogg".into()),
            source: AttachmentSource::Encrypted {
                file: EncryptedFile {
                    url: "mxc://example.org/abc".into(),
                    key: "k".into(),
                    iv: "iv".into(),
                    sha256: "hash".into(),
                },
            },
        }
    }

    #[test]
    fn plain_audio_plays_from_resolved_url() {
        let mut body = AudioBody::new(AudioContent {
            body: "song.mp3".into(),
            mimetype: None,
            source: AttachmentSource::Plain { url: "mxc://example.org/song".into() },
        });

        assert!(body.mount().is_empty());
        assert_eq!(body.view(&Resolver), AudioView::Player {
            src: Some("https://hs.example.org/_media/download/example.org/song".into()),
            playing: false,
            decrypted: None,
        });
    }

    #[test]
    fn encrypted_audio_decrypts_once() {
        let mut body = AudioBody::new(encrypted());

        assert_eq!(body.view(&Resolver), AudioView::Placeholder {
            alt: "voice.ogg",
            image: PlaceholderImage::Spinner,
        });

        let actions = body.mount();
        assert!(matches!(
            actions.as_slice(),
            [AudioAction::DecryptAttachment(f)] if f.url == "mxc://example.org/abc"
        ));
        assert!(body.mount().is_empty(), "second mount must not decrypt again");

        assert!(body.attachment_decrypted(Ok(b"hi".to_vec())));
        assert_eq!(body.view(&Resolver), AudioView::Player {
            src: Some("data:audio/ogg;base64,aGk=".into()),
            playing: false,
            decrypted: Some(b"hi".as_slice()),
        });
    }

    #[test]
    fn failed_decryption_shows_warning() {
        let mut body = AudioBody::new(encrypted());
        let _ = body.mount();

        assert!(body.attachment_decrypted(Err(DecryptError::Decrypt("bad hash".into()))));
        assert_eq!(body.view(&Resolver), AudioView::Placeholder {
            alt: "voice.ogg",
            image: PlaceholderImage::Warning,
        });
    }

    #[test]
    fn unsolicited_result_ignored() {
        let mut body = AudioBody::new(encrypted());
        assert!(!body.attachment_decrypted(Ok(b"hi".to_vec())));
    }

    #[test]
    fn toggle_playing() {
        let mut body = AudioBody::new(encrypted());
        body.toggle_playing();
        assert!(body.is_playing());
    }
}
