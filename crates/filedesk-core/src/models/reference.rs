use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Kind of business entity that owns uploaded files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceType {
    Store,
    Menu,
    Organization,
    Member,
}

impl ReferenceType {
    pub const ALL: [ReferenceType; 4] = [
        ReferenceType::Store,
        ReferenceType::Menu,
        ReferenceType::Organization,
        ReferenceType::Member,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceType::Store => "STORE",
            ReferenceType::Menu => "MENU",
            ReferenceType::Organization => "ORGANIZATION",
            ReferenceType::Member => "MEMBER",
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        ReferenceType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| ModelError::UnknownReferenceType(s.to_string()))
    }
}

/// Owning entity of a file: a type tag plus a positive numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference {
    reference_type: ReferenceType,
    id: i64,
}

impl Reference {
    pub fn new(reference_type: ReferenceType, id: i64) -> Result<Self, ModelError> {
        if id <= 0 {
            return Err(ModelError::InvalidReferenceId(id));
        }
        Ok(Self { reference_type, id })
    }

    pub fn reference_type(&self) -> ReferenceType {
        self.reference_type
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Query pairs identifying this reference on list endpoints.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("referenceType", self.reference_type.as_str().to_string()),
            ("referenceId", self.id.to_string()),
        ]
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.reference_type, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_ids() {
        assert_eq!(
            Reference::new(ReferenceType::Store, 0),
            Err(ModelError::InvalidReferenceId(0))
        );
        assert!(Reference::new(ReferenceType::Menu, -4).is_err());
        let reference = Reference::new(ReferenceType::Member, 9).unwrap();
        assert_eq!(reference.id(), 9);
        assert_eq!(reference.to_string(), "MEMBER#9");
    }

    #[test]
    fn parses_reference_type_case_insensitively() {
        assert_eq!(
            "organization".parse::<ReferenceType>().unwrap(),
            ReferenceType::Organization
        );
        assert!("TENANT".parse::<ReferenceType>().is_err());
    }

    #[test]
    fn query_pairs_use_wire_names() {
        let reference = Reference::new(ReferenceType::Store, 1).unwrap();
        assert_eq!(
            reference.query_pairs(),
            vec![
                ("referenceType", "STORE".to_string()),
                ("referenceId", "1".to_string())
            ]
        );
    }
}
