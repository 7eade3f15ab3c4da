use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::{AudioDevice, AudioError, SoundId};

/// `rodio` output: effects go straight into the stream mixer, music gets a
/// dedicated `Sink` that is stopped and replaced on every `play_music`.
pub struct RodioAudio {
    stream: OutputStream,
    music: Option<Sink>,
    sounds: Vec<Arc<[u8]>>,
}

impl RodioAudio {
    /// Opens the default output device.
    pub fn open_default() -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| AudioError::Device(e.to_string()))?;
        stream.log_on_drop(false);

        log::info!("audio output opened");

        Ok(Self {
            stream,
            music: None,
            sounds: Vec::new(),
        })
    }

    fn decoder(&self, id: SoundId) -> Result<Decoder<Cursor<Arc<[u8]>>>, AudioError> {
        let bytes = self.sounds.get(id.0).ok_or(AudioError::UnknownSound(id))?;
        Decoder::new(Cursor::new(Arc::clone(bytes))).map_err(|e| AudioError::Decode {
            path: format!("<sound {}>", id.0).into(),
            message: e.to_string(),
        })
    }
}

impl AudioDevice for RodioAudio {
    fn load(&mut self, path: &Path) -> Result<SoundId, AudioError> {
        let bytes: Arc<[u8]> = std::fs::read(path)
            .map_err(|source| AudioError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .into();

        Decoder::new(Cursor::new(Arc::clone(&bytes))).map_err(|e| AudioError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let id = SoundId(self.sounds.len());
        self.sounds.push(bytes);
        log::info!("loaded sound {}", path.display());
        Ok(id)
    }

    fn play_effect(&mut self, id: SoundId, looped: bool) -> Result<(), AudioError> {
        let source = self.decoder(id)?;
        if looped {
            self.stream.mixer().add(source.repeat_infinite());
        } else {
            self.stream.mixer().add(source);
        }
        Ok(())
    }

    fn play_music(&mut self, id: SoundId, looped: bool) -> Result<(), AudioError> {
        let source = self.decoder(id)?;

        if let Some(old) = self.music.take() {
            old.stop();
        }

        let sink = Sink::connect_new(self.stream.mixer());
        if looped {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }
        self.music = Some(sink);
        Ok(())
    }
}
