//! Idempotent prerequisite handlers (check + create pattern).
//!
//! Each rule's `type` tag selects one handler. The handler checks whether
//! the resource exists and creates it only when it does not. Rules are
//! processed strictly in file order and the first fatal error aborts the
//! whole pass.
pub mod file;
pub mod folder;
pub mod group;
pub mod none;
pub mod user;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;

use crate::config::Rule;
use crate::context::Context;
use crate::error::PrerequisiteError;

/// Minimal interface for an OS-level prerequisite.
pub trait Prerequisite {
    /// Human-readable description of this prerequisite.
    fn description(&self) -> String;

    /// Return `true` if the resource already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the existence check itself cannot be run.
    fn check(&self) -> Result<bool>;

    /// Create the resource.
    ///
    /// Implementations backed by external tools do not verify that the
    /// tool succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if a filesystem operation fails.
    fn create(&self) -> Result<()>;

    /// Create the resource only if [`check`](Self::check) reports it missing.
    ///
    /// # Errors
    ///
    /// Propagates errors from `check()` and `create()`.
    fn ensure(&self) -> Result<ResourceChange> {
        if self.check()? {
            Ok(ResourceChange::AlreadyPresent)
        } else {
            self.create()?;
            Ok(ResourceChange::Created)
        }
    }
}

/// Result of ensuring a prerequisite.
///
/// # Examples
///
/// ```
/// use rulerunner::prerequisites::ResourceChange;
///
/// assert_ne!(ResourceChange::Created, ResourceChange::AlreadyPresent);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    /// The resource was missing and `create()` was invoked.
    Created,
    /// The resource already existed; nothing was done.
    AlreadyPresent,
}

/// Known prerequisite tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrerequisiteKind {
    /// A local user account.
    User,
    /// A local group.
    Group,
    /// A regular file.
    File,
    /// A directory.
    Folder,
    /// No prerequisite.
    None,
}

impl PrerequisiteKind {
    /// Whether handlers of this kind need the rule's `value`.
    #[must_use]
    pub const fn requires_value(self) -> bool {
        !matches!(self, Self::None)
    }

    /// The tag as written in the rule file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::File => "file",
            Self::Folder => "folder",
            Self::None => "none",
        }
    }
}

impl fmt::Display for PrerequisiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a tag does not name a known prerequisite kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl FromStr for PrerequisiteKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "group" => Ok(Self::Group),
            "file" => Ok(Self::File),
            "folder" => Ok(Self::Folder),
            "none" => Ok(Self::None),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Format a tool's captured stderr for a debug line, or nothing if empty.
fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Select the handler for `rule`.
///
/// # Errors
///
/// Returns [`PrerequisiteError::UnknownType`] for an unrecognized tag and
/// [`PrerequisiteError::MissingValue`] when a resource handler has no value.
pub fn handler_for<'a>(
    rule: &'a Rule,
    ctx: &'a Context,
) -> Result<Box<dyn Prerequisite + 'a>, PrerequisiteError> {
    let kind: PrerequisiteKind = rule.kind.parse().map_err(|UnknownKind(kind)| {
        PrerequisiteError::UnknownType {
            rule: rule.name.clone(),
            kind,
        }
    })?;

    let value = || {
        rule.value().ok_or_else(|| PrerequisiteError::MissingValue {
            rule: rule.name.clone(),
            kind: kind.to_string(),
        })
    };

    Ok(match kind {
        PrerequisiteKind::User => Box::new(user::UserPrerequisite::new(
            value()?,
            ctx.executor.as_ref(),
            ctx.log.as_ref(),
        )),
        PrerequisiteKind::Group => Box::new(group::GroupPrerequisite::new(
            value()?,
            ctx.executor.as_ref(),
            ctx.log.as_ref(),
        )),
        PrerequisiteKind::File => Box::new(file::FilePrerequisite::new(
            value()?,
            ctx.fs_ops.as_ref(),
            ctx.log.as_ref(),
        )),
        PrerequisiteKind::Folder => Box::new(folder::FolderPrerequisite::new(
            value()?,
            ctx.fs_ops.as_ref(),
            ctx.log.as_ref(),
        )),
        PrerequisiteKind::None => Box::new(none::NoPrerequisite::new(&rule.name, ctx.log.as_ref())),
    })
}

/// Ensure the prerequisite declared by one rule.
///
/// # Errors
///
/// Returns an error if the handler cannot be selected or its check/create
/// fails.
pub fn ensure(rule: &Rule, ctx: &Context) -> Result<ResourceChange> {
    let handler = handler_for(rule, ctx)?;
    let change = handler.ensure()?;
    ctx.log.debug(&format!(
        "rule #{} {}: {} ({})",
        rule.id,
        rule.name,
        handler.description(),
        match change {
            ResourceChange::Created => "created",
            ResourceChange::AlreadyPresent => "already present",
        }
    ));
    Ok(change)
}

/// Counters for one prerequisite pass.
///
/// # Examples
///
/// ```
/// use rulerunner::prerequisites::ResolveStats;
///
/// let stats = ResolveStats { created: 2, already_present: 3 };
/// assert_eq!(stats.summary(), "2 created, 3 already present");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolveStats {
    /// Number of prerequisites that were created.
    pub created: u32,
    /// Number of prerequisites that already existed.
    pub already_present: u32,
}

impl ResolveStats {
    /// Format the summary string (e.g. "2 created, 3 already present").
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} created, {} already present",
            self.created, self.already_present
        )
    }
}

/// Ensure every rule's prerequisite, in order.
///
/// Stops at the first error; rules after it are not processed and nothing
/// already created is rolled back.
///
/// # Errors
///
/// Returns the first error raised by [`ensure`].
pub fn resolve_all(rules: &[Rule], ctx: &Context) -> Result<ResolveStats> {
    let mut stats = ResolveStats::default();
    for rule in rules {
        match ensure(rule, ctx)? {
            ResourceChange::Created => stats.created += 1,
            ResourceChange::AlreadyPresent => stats.already_present += 1,
        }
    }
    ctx.log.debug(&stats.summary());
    Ok(stats)
}
