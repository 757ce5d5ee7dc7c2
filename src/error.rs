use std::io;

use itertools::Itertools;
use thiserror::Error;

use crate::validate::{ModeKind, Unsatisfied};

/// 配置解析阶段的错误，全部为致命错误，不重试也不自动修正
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 没有任何模式的必需参数齐全
    #[error("no input provided: {}", describe_unsatisfied(.0))]
    InsufficientInput(Vec<Unsatisfied>),

    /// 多个模式的必需参数同时齐全
    #[error("ambiguous input, only one mode may be used at a time: {}", describe_modes(.0))]
    AmbiguousInput(Vec<ModeKind>),

    #[error("invalid domain {0:?}")]
    InvalidDomain(String),

    #[error("{field} file does not exist: {path}")]
    MissingPath { field: &'static str, path: String },

    #[error("{field} file is not readable: {path}: {source}")]
    UnreadablePath {
        field: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{field} is not a regular file: {path}")]
    NotAFile { field: &'static str, path: String },

    #[error("{field} is not a directory: {path}")]
    NotADirectory { field: &'static str, path: String },

    #[error("flags {0} and {1} cannot be used together")]
    ConflictingFlags(&'static str, &'static str),

    #[error("{field} is out of range: {value} (must be >= {min})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
    },

    #[error("could not read stdin: {0}")]
    Stdin(#[from] io::Error),
}

fn describe_modes(modes: &[ModeKind]) -> String {
    modes.iter().join(" and ")
}

fn describe_unsatisfied(modes: &[Unsatisfied]) -> String {
    modes
        .iter()
        .map(|u| format!("{} (missing {})", u.mode, u.missing.iter().join(", ")))
        .join("; ")
}
