// src/exit.rs
//! Process exit codes for `crossover`.

use std::process::Termination;

use colored::Colorize;

use crate::error::{GraphError, LoadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CrossoverExit {
    /// Command completed.
    Success = 0,
    /// Generic failure (I/O, config).
    Error = 1,
    /// The input tables could not be turned into a graph.
    InvalidData = 2,
    /// The query was rejected (unknown fandom, bad radius).
    InvalidQuery = 3,
}

impl CrossoverExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for a failed command from its error chain.
    #[must_use]
    pub fn classify(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(graph) = cause.downcast_ref::<GraphError>() {
                return Self::for_graph_error(graph);
            }
            if let Some(LoadError::Graph(graph)) = cause.downcast_ref::<LoadError>() {
                return Self::for_graph_error(graph);
            }
            if let Some(LoadError::Csv { .. }) = cause.downcast_ref::<LoadError>() {
                return Self::InvalidData;
            }
        }
        Self::Error
    }

    fn for_graph_error(err: &GraphError) -> Self {
        match err {
            e if e.is_construction() => Self::InvalidData,
            GraphError::EmptyGraph | GraphError::CentralityDidNotConverge { .. } => Self::Error,
            _ => Self::InvalidQuery,
        }
    }
}

impl Termination for CrossoverExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

/// The binary's single error-reporting path: prints the error chain and
/// picks the exit code.
impl From<anyhow::Result<CrossoverExit>> for CrossoverExit {
    fn from(res: anyhow::Result<CrossoverExit>) -> Self {
        match res {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{} {e:#}", "error:".red().bold());
                Self::classify(&e)
            }
        }
    }
}
