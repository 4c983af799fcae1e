//! Declarative selection rules
//!
//! Each mode other than `semantics` maps to a list of class groups. A group
//! selects every element carrying any of its classes and says how the label
//! for those elements is derived.

use serde::{Deserialize, Serialize};

use crate::modes::HighlightMode;

/// Elements excluded from highlighting, usually because they duplicate the
/// bounds of a sibling or ancestor.
pub const DEFAULT_IGNORE_SELECTORS: &str = "\
    div:not(.grid):not(.unit):not(.embed), script, span, br, \
    li:not(:first-child), dt:not(:first-child), dd:not(:nth-child(2)), \
    p + p, \
    blockquote + blockquote, blockquote + blockquote *, \
    figure + figure, figure + figure *";

/// Containers expected to carry internal padding. Their outline and label are
/// pushed outward by the inset.
pub const DEFAULT_OFFSET_SELECTORS: &str = "\
    ol, dl, \
    blockquote, \
    main, article, section, aside, footer, nav";

/// How label text is derived for a selected element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSource {
    /// Uppercased tag name (`SECTION`)
    #[default]
    TagName,
    /// The element's classes that belong to the group, as `.a .b`
    MatchedClasses,
}

/// A named group of classes selected by one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGroup {
    pub classes: Vec<String>,
    #[serde(default)]
    pub label: LabelSource,
}

impl RuleGroup {
    pub fn new(classes: &[&str], label: LabelSource) -> Self {
        Self {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            label,
        }
    }

    /// Group selecting by class, labelled with the matched classes.
    pub fn classes(classes: &[&str]) -> Self {
        Self::new(classes, LabelSource::MatchedClasses)
    }

    /// Whether an element with these classes belongs to the group
    pub fn matches<S: AsRef<str>>(&self, element_classes: &[S]) -> bool {
        element_classes
            .iter()
            .any(|c| self.classes.iter().any(|g| g == c.as_ref()))
    }

    /// Label text for an element with the given tag and class list.
    pub fn label_for<S: AsRef<str>>(&self, tag: &str, element_classes: &[S]) -> String {
        match self.label {
            LabelSource::TagName => tag.to_uppercase(),
            LabelSource::MatchedClasses => {
                let matched: Vec<&str> = element_classes
                    .iter()
                    .map(AsRef::as_ref)
                    .filter(|c| self.classes.iter().any(|g| g == c))
                    .collect();
                format!(".{}", matched.join(" ."))
            }
        }
    }
}

/// Mapping from mode to its rule groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTable {
    pub module: Vec<RuleGroup>,
    pub grid: Vec<RuleGroup>,
}

impl RuleTable {
    /// Rule groups queried for a mode. `semantics` has none: it walks the
    /// whole body instead.
    pub fn groups(&self, mode: HighlightMode) -> &[RuleGroup] {
        match mode {
            HighlightMode::Semantics => &[],
            HighlightMode::Module => &self.module,
            HighlightMode::Grid => &self.grid,
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            module: vec![
                RuleGroup::classes(&["img-flex"]),
                RuleGroup::classes(&["list-group", "list-group-inline"]),
                RuleGroup::classes(&["btn", "btn-ghost", "btn-light"]),
                RuleGroup::classes(&[
                    "embed",
                    "embed-16by9",
                    "embed-1by1",
                    "embed-4by3",
                    "embed-iso216",
                    "embed-3by2",
                    "embed-2by3",
                    "embed-golden",
                    "embed-185by100",
                    "embed-24by10",
                    "embed-3by1",
                    "embed-4by1",
                    "embed-5by1",
                ]),
                RuleGroup::classes(&[
                    "media",
                    "media-img",
                    "media-body",
                    "media-img-reversed",
                    "media-img-stacked",
                ]),
            ],
            grid: vec![
                RuleGroup::classes(&["grid", "grid-gutters", "grid-full", "grid-center"]),
                RuleGroup::classes(&[
                    "unit", "unit-1-2", "unit-1-3", "unit-2-3", "unit-1-4", "unit-3-4", "unit-full",
                ]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matched_classes_label_keeps_element_order() {
        let group = RuleGroup::classes(&["btn", "btn-ghost", "btn-light"]);
        let label = group.label_for("a", &["btn-light", "active", "btn"]);
        assert_eq!(label, ".btn-light .btn");
    }

    #[test]
    fn test_tag_name_label_is_uppercased() {
        let group = RuleGroup::new(&["card"], LabelSource::TagName);
        assert_eq!(group.label_for("article", &["card"]), "ARTICLE");
    }

    #[test]
    fn test_group_membership() {
        let group = RuleGroup::classes(&["media", "media-body"]);
        assert!(group.matches(&["x", "media-body"]));
        assert!(!group.matches(&["mediabody"]));
        assert!(!group.matches::<&str>(&[]));
    }

    #[test]
    fn test_semantics_has_no_groups() {
        let table = RuleTable::default();
        assert!(table.groups(HighlightMode::Semantics).is_empty());
        assert_eq!(table.groups(HighlightMode::Module).len(), 5);
        assert_eq!(table.groups(HighlightMode::Grid).len(), 2);
    }
}
