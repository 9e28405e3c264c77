//! JSON persistence for the organization graph.
//!
//! # Responsibility
//! - Convert employees to and from flat tagged field maps.
//! - Save and load single departments and whole companies.
//! - Rebuild project team links from stored id lists after every entity
//!   has been materialized.
//!
//! # Invariants
//! - Projects are persisted with `team_ids` only, never inline employees.
//! - Whole-file failures (missing file, bad JSON, I/O) are always fatal.
//! - One malformed employee never aborts loading the rest of the graph.
//! - Writes go to a sibling temp file first; the target is replaced only by
//!   a completed file.

use crate::model::company::CompanyError;
use crate::model::project::ProjectId;
use crate::model::validate::ValidationError;
use log::error;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub mod codec;
pub mod company_store;
pub mod department_store;
pub mod factory;
pub mod link_resolver;

/// Flat field map carrying one encoded employee.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence boundary error.
#[derive(Debug)]
pub enum StoreError {
    /// Source file does not exist.
    NotFound(PathBuf),
    /// File exists but is not a valid document of the expected shape.
    Malformed { path: PathBuf, message: String },
    /// Filesystem failure while reading or writing.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Project carries a status outside the allowed set.
    InvalidStatus {
        project_id: i64,
        value: String,
        source: ValidationError,
    },
    /// Project identity, name or deadline is invalid.
    InvalidProject {
        project_id: i64,
        source: ValidationError,
    },
    /// Department name is invalid.
    InvalidDepartment {
        name: String,
        source: ValidationError,
    },
    /// Company name is invalid.
    InvalidCompany(ValidationError),
    /// Loaded entities violate a company invariant (duplicate names or ids).
    Company(CompanyError),
    /// In-memory graph could not be encoded.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "file not found: {}", path.display()),
            Self::Malformed { path, message } => {
                write!(f, "malformed file `{}`: {message}", path.display())
            }
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::InvalidStatus {
                project_id,
                value,
                source,
            } => write!(
                f,
                "project {project_id} has invalid status `{value}`: {source}"
            ),
            Self::InvalidProject { project_id, source } => {
                write!(f, "project {project_id} is invalid: {source}")
            }
            Self::InvalidDepartment { name, source } => {
                write!(f, "department `{name}` is invalid: {source}")
            }
            Self::InvalidCompany(err) => write!(f, "company is invalid: {err}"),
            Self::Company(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode company: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidStatus { source, .. } => Some(source),
            Self::InvalidProject { source, .. } => Some(source),
            Self::InvalidDepartment { source, .. } => Some(source),
            Self::InvalidCompany(err) => Some(err),
            Self::Company(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::NotFound(_) | Self::Malformed { .. } => None,
        }
    }
}

impl From<CompanyError> for StoreError {
    fn from(value: CompanyError) -> Self {
        Self::Company(value)
    }
}

/// Employee entry dropped during a bulk load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEmployee {
    pub department: String,
    /// Zero-based index inside the department's `employees` array.
    pub position: usize,
    pub reason: String,
}

/// Project team id with no matching employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedLink {
    pub project_id: ProjectId,
    pub project_name: String,
    pub employee_id: i64,
}

/// Non-fatal findings collected while loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub skipped_employees: Vec<SkippedEmployee>,
    pub unresolved_links: Vec<UnresolvedLink>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped_employees.is_empty() && self.unresolved_links.is_empty()
    }
}

pub(crate) fn read_source(path: &Path) -> StoreResult<String> {
    std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound(path.to_path_buf())
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    })
}

pub(crate) fn parse_document<T: serde::de::DeserializeOwned>(
    path: &Path,
    raw: &str,
) -> StoreResult<T> {
    serde_json::from_str(raw).map_err(|err| StoreError::Malformed {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Serializes `value` as pretty JSON and atomically replaces `path`.
///
/// Parent directories are created as needed. An existing target keeps its
/// permissions. On any failure the previous content of `path` is left
/// untouched.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let io_err = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(io_err)?;

    let mut temp = NamedTempFile::new_in(&parent).map_err(io_err)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, value).map_err(StoreError::Encode)?;
        writer.write_all(b"\n").map_err(io_err)?;
        writer.flush().map_err(io_err)?;
    }
    temp.as_file().sync_all().map_err(io_err)?;

    // Replacing an existing file keeps its permissions.
    if let Ok(existing) = std::fs::metadata(path) {
        if existing.is_file() {
            temp.as_file()
                .set_permissions(existing.permissions())
                .map_err(io_err)?;
        }
    }

    temp.persist(path).map_err(|err| {
        error!(
            "event=file_persist module=store status=error path={} error={}",
            path.display(),
            err.error
        );
        io_err(err.error)
    })?;
    Ok(())
}
