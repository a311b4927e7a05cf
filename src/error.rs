use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing required argument <{0}>")]
    MissingArgument(&'static str),

    #[error("at least one source file is required")]
    NoSources,

    #[error(
        "no metatypes directory at {} or {}",
        .libdir.display(),
        .prefix.display()
    )]
    MetatypesDirNotFound { libdir: PathBuf, prefix: PathBuf },

    #[error("no file matching qt6qml_*metatypes.json in {}", .0.display())]
    ForeignTypesNotFound(PathBuf),

    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to spawn {}", .tool.display())]
    Spawn {
        tool: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Tool(#[from] ToolFailure),
}

/// Nonzero exit from one of the external tools, with whatever the tool
/// wrote on either stream.
#[derive(Debug, thiserror::Error)]
#[error("command {command:?} failed with {status}")]
pub struct ToolFailure {
    pub command: Vec<String>,
    pub status: ExitStatus,
    pub output: String,
}
