use std::path::{Path, PathBuf};

/// Opaque handle to a sound registered with an [`AudioDevice`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SoundId(pub usize);

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio device unavailable: {0}")]
    Device(String),
    #[error("failed to read sound {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode sound {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("unknown sound {0:?}")]
    UnknownSound(SoundId),
}

/// Audio backend seam.
///
/// Implementations own every loaded sound until they are dropped.
pub trait AudioDevice {
    /// Reads and validates a sound file.
    fn load(&mut self, path: &Path) -> Result<SoundId, AudioError>;

    /// Starts an effect voice. Looping effects play until the device is dropped.
    fn play_effect(&mut self, id: SoundId, looped: bool) -> Result<(), AudioError>;

    /// Replaces the current music track.
    fn play_music(&mut self, id: SoundId, looped: bool) -> Result<(), AudioError>;
}

/// Silent device used when audio is muted or no output device exists.
///
/// Loading still checks the file is readable so scripts see the same
/// success/failure pattern either way.
#[derive(Debug, Default)]
pub struct NullAudio {
    loaded: usize,
}

impl AudioDevice for NullAudio {
    fn load(&mut self, path: &Path) -> Result<SoundId, AudioError> {
        std::fs::metadata(path).map_err(|source| AudioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let id = SoundId(self.loaded);
        self.loaded += 1;
        Ok(id)
    }

    fn play_effect(&mut self, id: SoundId, _looped: bool) -> Result<(), AudioError> {
        self.check(id)
    }

    fn play_music(&mut self, id: SoundId, _looped: bool) -> Result<(), AudioError> {
        self.check(id)
    }
}

impl NullAudio {
    fn check(&self, id: SoundId) -> Result<(), AudioError> {
        if id.0 < self.loaded { Ok(()) } else { Err(AudioError::UnknownSound(id)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_device_requires_existing_file() {
        let mut dev = NullAudio::default();
        assert!(matches!(dev.load(Path::new("missing.ogg")), Err(AudioError::Io { .. })));

        let file = tempfile::NamedTempFile::new().unwrap();
        let id = dev.load(file.path()).unwrap();
        assert!(dev.play_effect(id, false).is_ok());
        assert!(dev.play_music(id, true).is_ok());
        assert!(matches!(dev.play_music(SoundId(9), false), Err(AudioError::UnknownSound(_))));
    }
}
