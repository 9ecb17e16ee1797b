use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to launch target program: path = {}", .target.display())]
    Launch {
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait4 target program")]
    Wait {
        #[source]
        source: io::Error,
    },

    #[error("failed to write report to stdout")]
    Stdout(#[source] io::Error),

    #[error("failed to write output file: path = {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "failed to write report to stdout ({}) and to output file: path = {} ({})",
        .stdout,
        .path.display(),
        .file
    )]
    Delivery {
        stdout: io::Error,
        path: PathBuf,
        #[source]
        file: io::Error,
    },
}
