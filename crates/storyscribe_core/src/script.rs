//! Scripts and the script index.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Title given to scripts created without one.
pub const DEFAULT_TITLE: &str = "New script";

/// Opaque script identifier, derived from the creation time.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use storyscribe_core::ScriptId;
///
/// let at = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(14, 3, 22).unwrap();
/// assert_eq!(ScriptId::from_time(&at).as_str(), "20240501140322");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct ScriptId(String);

impl ScriptId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for a script created at `at`.
    pub fn from_time(at: &NaiveDateTime) -> Self {
        Self(at.format("%Y%m%d%H%M%S").to_string())
    }

    /// Identifier for a script created at `at` that collides with none of `taken`.
    ///
    /// A `-N` suffix with the smallest free `N >= 2` is appended when the plain
    /// time-derived id is already in use.
    pub fn unique_from_time<'a>(
        at: &NaiveDateTime,
        taken: impl IntoIterator<Item = &'a ScriptId> + Clone,
    ) -> Self {
        let base = Self::from_time(at);
        let in_use = |candidate: &ScriptId| taken.clone().into_iter().any(|id| id == candidate);
        if !in_use(&base) {
            return base;
        }
        let mut n = 2u32;
        loop {
            let candidate = Self(format!("{}-{}", base.0, n));
            if !in_use(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ScriptId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A story being drafted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Script {
    id: ScriptId,
    title: String,
    #[serde(default)]
    brief: String,
    #[serde(with = "crate::timestamp")]
    created_at: NaiveDateTime,
    #[serde(with = "crate::timestamp")]
    updated_at: NaiveDateTime,
}

impl Script {
    /// Create a script. A blank title becomes [`DEFAULT_TITLE`].
    pub fn new(
        id: ScriptId,
        title: impl Into<String>,
        brief: impl Into<String>,
        at: NaiveDateTime,
    ) -> Self {
        let title = title.into();
        Self {
            id,
            title: if title.trim().is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title
            },
            brief: brief.into(),
            created_at: at,
            updated_at: at,
        }
    }

    /// Apply a title and/or brief change, bumping `updated_at` when anything changed.
    ///
    /// Returns whether the script was modified.
    pub fn apply_edit(
        &mut self,
        title: Option<String>,
        brief: Option<String>,
        at: NaiveDateTime,
    ) -> bool {
        let mut changed = false;
        if let Some(title) = title.filter(|t| *t != self.title) {
            self.title = title;
            changed = true;
        }
        if let Some(brief) = brief.filter(|b| *b != self.brief) {
            self.brief = brief;
            changed = true;
        }
        if changed {
            self.updated_at = at.max(self.created_at);
        }
        changed
    }
}

/// On-disk shape of the script collection: `{"scripts": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptIndex {
    /// Scripts in insertion order
    #[serde(default)]
    pub scripts: Vec<Script>,
}

impl From<Vec<Script>> for ScriptIndex {
    fn from(scripts: Vec<Script>) -> Self {
        Self { scripts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .expect("valid time")
    }

    #[test]
    fn test_unique_id_appends_suffix() {
        let taken = vec![
            ScriptId::new("20240501100000"),
            ScriptId::new("20240501100000-2"),
        ];
        let id = ScriptId::unique_from_time(&at(10, 0, 0), &taken);
        assert_eq!(id.as_str(), "20240501100000-3");

        let fresh = ScriptId::unique_from_time(&at(10, 0, 1), &taken);
        assert_eq!(fresh.as_str(), "20240501100001");
    }

    #[test]
    fn test_blank_title_defaults() {
        let script = Script::new(ScriptId::new("a"), "  ", "", at(1, 0, 0));
        assert_eq!(script.title(), DEFAULT_TITLE);
        assert_eq!(script.created_at(), script.updated_at());
    }

    #[test]
    fn test_apply_edit_bumps_only_on_change() {
        let mut script = Script::new(ScriptId::new("a"), "Title", "Brief", at(1, 0, 0));

        assert!(!script.apply_edit(Some("Title".into()), None, at(2, 0, 0)));
        assert_eq!(*script.updated_at(), at(1, 0, 0));

        assert!(script.apply_edit(None, Some("New brief".into()), at(3, 0, 0)));
        assert_eq!(script.brief(), "New brief");
        assert_eq!(*script.updated_at(), at(3, 0, 0));
    }

    #[test]
    fn test_updated_never_before_created() {
        let mut script = Script::new(ScriptId::new("a"), "T", "", at(5, 0, 0));
        script.apply_edit(Some("U".into()), None, at(4, 0, 0));
        assert_eq!(*script.updated_at(), at(5, 0, 0));
    }

    #[test]
    fn test_index_json_shape() {
        let script = Script::new(ScriptId::new("20240501010000"), "Ночь", "", at(1, 0, 0));
        let json = serde_json::to_value(ScriptIndex::from(vec![script])).expect("serializes");
        assert_eq!(json["scripts"][0]["id"], "20240501010000");
        assert_eq!(json["scripts"][0]["title"], "Ночь");
        assert_eq!(json["scripts"][0]["created_at"], "2024-05-01 01:00:00");
    }
}
