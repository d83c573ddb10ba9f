//! Load-time checks for likely mistakes in the rule file.
use std::collections::HashMap;

use super::rule::{CommandSpec, DEFAULT_ID, Rule};
use crate::prerequisites::PrerequisiteKind;

/// A validation warning detected after loading the rule file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Identifier of the rule that triggered the warning.
    pub id: i64,
    /// Display name of the rule that triggered the warning.
    pub rule: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    #[must_use]
    fn new(rule: &Rule, message: impl Into<String>) -> Self {
        Self {
            id: rule.id,
            rule: rule.name.clone(),
            message: message.into(),
        }
    }
}

/// Check every rule for problems that would surface later in the run.
///
/// None of these are fatal at load time: the execution stage skips invalid
/// commands and the prerequisite stage reports unknown types itself.
#[must_use]
pub fn validate_rules(rules: &[Rule]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for rule in rules {
        match rule.command {
            CommandSpec::Missing => {
                warnings.push(ValidationWarning::new(rule, "no command defined"));
            }
            CommandSpec::Malformed => warnings.push(ValidationWarning::new(
                rule,
                "command must be a string or a list of strings",
            )),
            CommandSpec::Single(_) | CommandSpec::Multiple(_) => {}
        }

        match rule.kind.parse::<PrerequisiteKind>() {
            Err(_) => warnings.push(ValidationWarning::new(
                rule,
                format!("unrecognized type '{}'", rule.kind),
            )),
            Ok(kind) if kind.requires_value() && rule.value().is_none() => {
                warnings.push(ValidationWarning::new(
                    rule,
                    format!("type '{kind}' requires a value"),
                ));
            }
            Ok(_) => {}
        }
    }

    // Rules without an id all share the default, which is not a clash.
    let identified = || rules.iter().filter(|rule| rule.id != DEFAULT_ID);
    let mut seen: HashMap<i64, usize> = HashMap::new();
    for rule in identified() {
        *seen.entry(rule.id).or_default() += 1;
    }
    let mut reported = Vec::new();
    for rule in identified() {
        if seen.get(&rule.id).copied().unwrap_or_default() > 1 && !reported.contains(&rule.id) {
            reported.push(rule.id);
            warnings.push(ValidationWarning::new(
                rule,
                format!("id {} is used by more than one rule", rule.id),
            ));
        }
    }

    warnings
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn rule(id: i64, kind: &str, value: Option<&str>, command: CommandSpec) -> Rule {
        Rule {
            id,
            name: format!("rule-{id}"),
            kind: kind.to_string(),
            value: value.map(String::from),
            command,
        }
    }

    fn echo() -> CommandSpec {
        CommandSpec::Single("echo ok".to_string())
    }

    #[test]
    fn clean_rules_produce_no_warnings() {
        let rules = vec![
            rule(1, "none", None, echo()),
            rule(2, "folder", Some("/tmp/x"), echo()),
        ];
        assert!(validate_rules(&rules).is_empty());
    }

    #[test]
    fn missing_command_is_reported() {
        let warnings = validate_rules(&[rule(1, "none", None, CommandSpec::Missing)]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "no command defined");
        assert_eq!(warnings[0].id, 1);
    }

    #[test]
    fn malformed_command_is_reported() {
        let warnings = validate_rules(&[rule(1, "none", None, CommandSpec::Malformed)]);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("string or a list"));
    }

    #[test]
    fn unknown_type_is_reported() {
        let warnings = validate_rules(&[rule(1, "widget", None, echo())]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "unrecognized type 'widget'");
    }

    #[test]
    fn missing_value_is_reported_for_resource_types() {
        let warnings = validate_rules(&[
            rule(1, "user", None, echo()),
            rule(2, "file", Some(""), echo()),
            rule(3, "none", None, echo()),
        ]);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].message, "type 'user' requires a value");
        assert_eq!(warnings[1].message, "type 'file' requires a value");
    }

    #[test]
    fn rules_without_ids_are_not_duplicates() {
        let rules = vec![
            rule(DEFAULT_ID, "none", None, echo()),
            rule(DEFAULT_ID, "none", None, echo()),
        ];
        assert!(validate_rules(&rules).is_empty());
    }

    #[test]
    fn duplicate_ids_are_reported_once() {
        let warnings = validate_rules(&[
            rule(7, "none", None, echo()),
            rule(7, "none", None, echo()),
            rule(7, "none", None, echo()),
            rule(8, "none", None, echo()),
        ]);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("id 7"));
    }
}
