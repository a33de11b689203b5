use std::collections::BTreeMap;

use super::catalog::CourseInfo;
use super::credentials::Role;

/// Bootstrap configuration: the seed set written out the first time a
/// workspace is opened, and again whenever a document on disk is unreadable.
/// Supplied at construction so deployments can ship their own set instead of
/// the built-in one.
#[derive(Debug, Clone)]
pub struct StoreDefaults {
    pub credentials: BTreeMap<Role, BTreeMap<String, String>>,
    pub catalog: BTreeMap<String, CourseInfo>,
}

impl Default for StoreDefaults {
    fn default() -> Self {
        let mut credentials: BTreeMap<Role, BTreeMap<String, String>> = BTreeMap::new();
        credentials.insert(
            Role::Admin,
            BTreeMap::from([("admin".to_string(), "admin12".to_string())]),
        );
        credentials.insert(
            Role::Student,
            BTreeMap::from([
                ("Harshit".to_string(), "harshit12".to_string()),
                ("SHILAJIT".to_string(), "SHILAJIT12".to_string()),
                ("Shourya".to_string(), "shourya12".to_string()),
            ]),
        );
        credentials.insert(
            Role::Faculty,
            BTreeMap::from([
                ("Prabhu".to_string(), "prabhu12".to_string()),
                ("Sukanta".to_string(), "sukanta12".to_string()),
                ("Diddy".to_string(), "oiloiloil".to_string()),
            ]),
        );

        let catalog = BTreeMap::from([
            (
                "CS101".to_string(),
                CourseInfo {
                    name: "Intro to Python".to_string(),
                    faculty: Some("Prabhu".to_string()),
                },
            ),
            (
                "MATH201".to_string(),
                CourseInfo {
                    name: "Calculus I".to_string(),
                    faculty: Some("Sukanta".to_string()),
                },
            ),
            (
                "PHYS101".to_string(),
                CourseInfo {
                    name: "Basic Engineering".to_string(),
                    faculty: Some("Prabhu".to_string()),
                },
            ),
            (
                "CHEM101".to_string(),
                CourseInfo {
                    name: "Chemistry".to_string(),
                    faculty: Some("Diddy".to_string()),
                },
            ),
        ]);

        StoreDefaults {
            credentials,
            catalog,
        }
    }
}
