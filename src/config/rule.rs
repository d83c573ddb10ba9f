//! The rule record and the command builder.
use serde::Deserialize;
use serde_json::Value;

/// Identifier used when a rule has no integer `id`.
pub const DEFAULT_ID: i64 = -1;

/// Display name used when a rule has no string `name`.
pub const DEFAULT_NAME: &str = "Unnamed";

/// Prerequisite tag used when a rule has no `type`.
pub const DEFAULT_KIND: &str = "none";

/// Shape of a rule's `command` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// No `command` field, or an explicit `null`.
    Missing,
    /// A single space-delimited template.
    Single(String),
    /// An ordered list of templates.
    Multiple(Vec<String>),
    /// Present but neither a string nor a list of strings.
    Malformed,
}

impl CommandSpec {
    fn from_json(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::String(s)) => Self::Single(s),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map_or(Self::Malformed, Self::Multiple),
            Some(_) => Self::Malformed,
        }
    }

    /// Templates in declaration order (empty unless `Single` or `Multiple`).
    #[must_use]
    pub fn templates(&self) -> &[String] {
        match self {
            Self::Single(s) => std::slice::from_ref(s),
            Self::Multiple(list) => list,
            Self::Missing | Self::Malformed => &[],
        }
    }
}

/// Raw rule entry as it appears in the JSON file.
///
/// Every field is captured as an untyped [`Value`] so that an entry with a
/// field of the wrong shape still loads and falls back to defaults instead
/// of rejecting the whole file.
#[derive(Debug, Default, Deserialize)]
struct RawRule {
    id: Option<Value>,
    name: Option<Value>,
    #[serde(rename = "type")]
    kind: Option<Value>,
    value: Option<Value>,
    command: Option<Value>,
}

/// One configuration entry: a prerequisite plus zero or more commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Identifier, not required to be unique.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Raw prerequisite tag (`user`, `group`, `file`, `folder`, `none`, ...).
    pub kind: String,
    /// Resource name/path, also appended to every derived command.
    pub value: Option<String>,
    /// Command templates.
    pub command: CommandSpec,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            id: DEFAULT_ID,
            name: DEFAULT_NAME.to_string(),
            kind: DEFAULT_KIND.to_string(),
            value: None,
            command: CommandSpec::Missing,
        }
    }
}

impl From<RawRule> for Rule {
    fn from(raw: RawRule) -> Self {
        let id = raw.id.as_ref().and_then(Value::as_i64).unwrap_or(DEFAULT_ID);
        let name = match raw.name {
            Some(Value::String(s)) => s,
            _ => DEFAULT_NAME.to_string(),
        };
        let kind = match raw.kind {
            None => DEFAULT_KIND.to_string(),
            Some(Value::String(s)) => s,
            // Keep the JSON text (including `null`) so the prerequisite stage
            // reports it as unknown.
            Some(other) => other.to_string(),
        };
        let value = match raw.value {
            Some(Value::String(s)) => Some(s),
            Some(v) if is_falsy(&v) => None,
            Some(v @ (Value::Number(_) | Value::Bool(_))) => Some(v.to_string()),
            _ => None,
        };
        Self {
            id,
            name,
            kind,
            value,
            command: CommandSpec::from_json(raw.command),
        }
    }
}

/// Zero and `false` count as "no value", like an empty string.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        _ => false,
    }
}

impl Rule {
    /// Build a rule from one JSON object.
    ///
    /// Returns `None` for entries that are not objects; such entries are
    /// dropped by the loader.
    #[must_use]
    pub fn from_json(entry: Value) -> Option<Self> {
        if !entry.is_object() {
            return None;
        }
        let raw: RawRule = serde_json::from_value(entry).unwrap_or_default();
        Some(raw.into())
    }

    /// Whether the rule carries a usable command (a string or a list of strings).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(
            self.command,
            CommandSpec::Single(_) | CommandSpec::Multiple(_)
        )
    }

    /// Whether the command was declared as a list.
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        matches!(self.command, CommandSpec::Multiple(_))
    }

    /// The non-empty value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    /// Build one argument list per command template.
    ///
    /// Each template is split on whitespace with no quoting rules, and the
    /// rule's value (when non-empty) is appended as a single trailing
    /// argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use rulerunner::config::rule::{CommandSpec, Rule};
    ///
    /// let rule = Rule {
    ///     command: CommandSpec::Multiple(vec!["echo hi".into(), "echo bye".into()]),
    ///     value: Some("X".into()),
    ///     ..Rule::default()
    /// };
    /// assert_eq!(
    ///     rule.get_commands(),
    ///     vec![vec!["echo", "hi", "X"], vec!["echo", "bye", "X"]]
    /// );
    /// ```
    #[must_use]
    pub fn get_commands(&self) -> Vec<Vec<String>> {
        let value = self.value();
        self.command
            .templates()
            .iter()
            .map(|template| {
                let mut parts: Vec<String> =
                    template.split_whitespace().map(String::from).collect();
                if let Some(v) = value {
                    parts.push(v.to_string());
                }
                parts
            })
            .collect()
    }
}
