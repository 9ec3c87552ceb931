//! Classes: scheduled sections of a subject, created through a form

use crate::core::error::ValidationError;
use crate::core::validation::filters::{coerce_integer, empty_as_null, trim, uppercase};
use crate::core::validation::validators::{
    in_list, integer_range, optional, positive, required, string_length, time_format, url,
};
use crate::core::validation::{FieldRule, FormSchema, ValidatableForm};
use crate::upload::UploadedImage;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether a class accepts enrolments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    #[default]
    Active,
    Inactive,
}

impl ClassStatus {
    pub const ALL: [ClassStatus; 2] = [ClassStatus::Active, ClassStatus::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::Active => "active",
            ClassStatus::Inactive => "inactive",
        }
    }
}

/// A weekly meeting slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

/// The create-class form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub subject_id: i64,
    pub teacher_id: String,
    #[serde(default = "default_capacity")]
    pub capacity: i64,
    #[serde(default)]
    pub status: ClassStatus,
    #[serde(default)]
    pub banner_url: String,
    #[serde(default)]
    pub banner_cld_pub_id: String,
    #[serde(default)]
    pub invite_code: Option<String>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

fn default_capacity() -> i64 {
    30
}

impl Default for ClassForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            subject_id: 0,
            teacher_id: String::new(),
            capacity: default_capacity(),
            status: ClassStatus::Active,
            banner_url: String::new(),
            banner_cld_pub_id: String::new(),
            invite_code: None,
            schedules: Vec::new(),
        }
    }
}

impl ClassForm {
    /// Store an uploaded banner, or clear both banner fields on `None`
    pub fn set_banner(&mut self, image: Option<UploadedImage>) {
        match image {
            Some(image) => {
                self.banner_url = image.url;
                self.banner_cld_pub_id = image.public_id;
            }
            None => {
                self.banner_url.clear();
                self.banner_cld_pub_id.clear();
            }
        }
    }

    /// The banner as an upload value, if one is set
    pub fn banner(&self) -> Option<UploadedImage> {
        (!self.banner_url.is_empty()).then(|| UploadedImage {
            url: self.banner_url.clone(),
            public_id: self.banner_cld_pub_id.clone(),
        })
    }

    /// Validate a raw payload and build the form from it
    pub fn from_payload(payload: Value) -> Result<Self, ValidationError> {
        let cleaned = Self::schema().validate_and_filter(payload)?;
        Self::from_validated(cleaned)
    }

    /// Build the form from a payload that already passed the schema
    pub fn from_validated(cleaned: Value) -> Result<Self, ValidationError> {
        serde_json::from_value(cleaned).map_err(|e| ValidationError::FieldErrors(vec![e.to_string()]))
    }
}

const TIME_FORMAT: &str = "%H:%M";

fn schedules() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    let time = time_format(TIME_FORMAT);
    move |field: &str, value: &Value| {
        let Some(items) = value.as_array() else {
            return Err(format!("'{}' must be a list", field));
        };
        for (i, item) in items.iter().enumerate() {
            let entry = format!("{}[{}]", field, i);
            let Some(obj) = item.as_object() else {
                return Err(format!("'{}' must be an object", entry));
            };
            let get = |key: &str| obj.get(key).unwrap_or(&Value::Null);
            for key in ["day", "startTime", "endTime"] {
                required()(&format!("{}.{}", entry, key), get(key))?;
            }
            for key in ["startTime", "endTime"] {
                time(&format!("{}.{}", entry, key), get(key))?;
            }
            let parse = |key: &str| {
                get(key)
                    .as_str()
                    .and_then(|s| NaiveTime::parse_from_str(s, TIME_FORMAT).ok())
            };
            if matches!((parse("startTime"), parse("endTime")), (Some(start), Some(end)) if start >= end)
            {
                return Err(format!("'{}' must end after it starts", entry));
            }
        }
        Ok(())
    }
}

impl ValidatableForm for ClassForm {
    fn schema() -> FormSchema {
        FormSchema::new("class")
            .field(
                "name",
                FieldRule::new()
                    .filter(trim())
                    .validate(required())
                    .validate(string_length(2, 50)),
            )
            .field(
                "description",
                FieldRule::new()
                    .filter(trim())
                    .validate(required())
                    .validate(string_length(5, 500)),
            )
            .field(
                "subjectId",
                FieldRule::new()
                    .filter(coerce_integer())
                    .validate(required())
                    .validate(positive()),
            )
            .field(
                "teacherId",
                FieldRule::new().filter(trim()).validate(required()),
            )
            .field(
                "capacity",
                FieldRule::new()
                    .default_value(default_capacity())
                    .filter(coerce_integer())
                    .validate(integer_range(1, 500)),
            )
            .field(
                "status",
                FieldRule::new()
                    .default_value(ClassStatus::Active.as_str())
                    .validate(in_list(
                        ClassStatus::ALL.iter().map(|s| s.as_str().to_string()).collect(),
                    )),
            )
            .field(
                "bannerUrl",
                FieldRule::new()
                    .filter(trim())
                    .validate(required())
                    .validate(url()),
            )
            .field(
                "bannerCldPubId",
                FieldRule::new().filter(trim()).validate(required()),
            )
            .field(
                "inviteCode",
                FieldRule::new()
                    .filter(trim())
                    .filter(empty_as_null())
                    .filter(uppercase())
                    .validate(optional())
                    .validate(string_length(0, 20)),
            )
            .field(
                "schedules",
                FieldRule::new().default_value(Value::Array(vec![])).validate(schedules()),
            )
    }
}
