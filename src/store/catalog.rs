use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::RecordsStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseInfo {
    pub name: String,
    /// Assigned instructor id, if any. Not validated against the credential
    /// directory at assignment time; cleaned up at faculty deletion.
    pub faculty: Option<String>,
}

impl RecordsStore {
    pub fn course_ids(&self) -> Vec<String> {
        self.catalog.keys().cloned().collect()
    }

    /// Display name for a course, falling back to the id itself so callers
    /// can always render something.
    pub fn course_name(&self, course_id: &str) -> String {
        self.catalog
            .get(course_id)
            .map(|info| info.name.clone())
            .unwrap_or_else(|| course_id.to_string())
    }

    pub fn courses_taught_by(&self, faculty_id: &str) -> BTreeMap<String, String> {
        self.catalog
            .iter()
            .filter(|(_, info)| info.faculty.as_deref() == Some(faculty_id))
            .map(|(id, info)| (id.clone(), info.name.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::store::{RecordsStore, StoreDefaults};

    #[test]
    fn course_name_falls_back_to_the_id() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = RecordsStore::open(tmp.path(), StoreDefaults::default()).expect("open store");

        assert_eq!(store.course_name("MATH201"), "Calculus I");
        assert_eq!(store.course_name("UNKNOWN42"), "UNKNOWN42");
    }

    #[test]
    fn courses_taught_by_filters_the_catalog() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = RecordsStore::open(tmp.path(), StoreDefaults::default()).expect("open store");

        let taught = store.courses_taught_by("Prabhu");
        assert_eq!(
            taught.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["CS101", "PHYS101"]
        );
        assert!(store.courses_taught_by("nobody").is_empty());
    }
}
