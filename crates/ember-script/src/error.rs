use std::path::PathBuf;

/// Failures while creating an interpreter or loading a script into it.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load script {name}: {message}")]
    Load { name: String, message: String },
    #[error("lua error: {0}")]
    Lua(String),
}

impl From<mlua::Error> for ScriptError {
    fn from(err: mlua::Error) -> Self {
        ScriptError::Lua(err.to_string())
    }
}

/// Failures while invoking a lifecycle callback. Both variants are fatal.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("game script does not define required function `{hook}`")]
    MissingHook { hook: &'static str },
    #[error("error in `{hook}`: {message}")]
    Runtime { hook: &'static str, message: String },
}

/// Failures while running one frame of the game loop.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("failed to present frame: {0:#}")]
    Present(anyhow::Error),
}
