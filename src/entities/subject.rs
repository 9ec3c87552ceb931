//! Subjects: the academic courses classes are scheduled for

use crate::core::field::FieldValue;
use crate::core::record::Record;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Department a subject belongs to, serialized as its short code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Cs,
    Math,
    Phy,
}

impl Department {
    /// Every department, in display order
    pub const ALL: [Department; 3] = [Department::Cs, Department::Math, Department::Phy];

    /// Short code used in records and filters
    pub fn code(&self) -> &'static str {
        match self {
            Department::Cs => "cs",
            Department::Math => "math",
            Department::Phy => "phy",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Department::Cs => "Computer Science",
            Department::Math => "Mathematics",
            Department::Phy => "Physics",
        }
    }

    /// Look a department up by its code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A subject record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub department: Department,
    pub description: String,
    #[serde(with = "rfc3339_millis", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Record for Subject {
    fn resource_name() -> &'static str {
        "subjects"
    }

    fn fields() -> &'static [&'static str] {
        &["id", "code", "name", "department", "description", "createdAt"]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Integer(self.id)),
            "code" => Some(FieldValue::from(self.code.as_str())),
            "name" => Some(FieldValue::from(self.name.as_str())),
            "department" => Some(FieldValue::from(self.department.code())),
            "description" => Some(FieldValue::from(self.description.as_str())),
            "createdAt" => Some(FieldValue::DateTime(self.created_at)),
            _ => None,
        }
    }
}

/// The fixed seed collection served by the mock provider
pub fn seed_subjects() -> Vec<Subject> {
    let created_at = Utc
        .with_ymd_and_hms(2026, 2, 24, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    vec![
        Subject {
            id: 1,
            code: "CS101".to_string(),
            name: "Introduction to Programming".to_string(),
            department: Department::Cs,
            description: "Covers programming fundamentals, problem-solving, and basic software \
                          design using modern languages."
                .to_string(),
            created_at,
        },
        Subject {
            id: 2,
            code: "MATH201".to_string(),
            name: "Calculus II".to_string(),
            department: Department::Math,
            description: "Focuses on integration techniques, sequences, series, and practical \
                          applications in engineering and science."
                .to_string(),
            created_at,
        },
        Subject {
            id: 3,
            code: "PHY150".to_string(),
            name: "General Physics".to_string(),
            department: Department::Phy,
            description: "Introduces mechanics, energy, waves, and laboratory-based analysis for \
                          foundational physical principles."
                .to_string(),
            created_at,
        },
    ]
}

// Timestamps travel as `2026-02-24T00:00:00.000Z`.
mod rfc3339_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
