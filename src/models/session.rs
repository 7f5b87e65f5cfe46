use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A scheduled climbing event. `capacity` of 0 means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub date: String,
    pub location: String,
    pub start: String,
    pub end: String,
    pub discipline: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub notes: String,
}

/// Request body for session create/update.
#[derive(Debug, Deserialize)]
pub struct SessionForm {
    pub date: String,
    pub location: String,
    pub start: String,
    pub end: String,
    pub discipline: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub notes: String,
}

impl SessionForm {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        let required = [
            ("date", &self.date),
            ("location", &self.location),
            ("start", &self.start),
            ("end", &self.end),
            ("discipline", &self.discipline),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(format!("Missing required field: {field}"));
            }
        }
        let date = self.date.trim();
        if !date.is_empty() && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            errors.push("Invalid date format. Use YYYY-MM-DD".to_string());
        }
        for time in [self.start.trim(), self.end.trim()] {
            if !time.is_empty() && NaiveTime::parse_from_str(time, "%H:%M").is_err() {
                errors.push("Invalid time format. Use HH:MM".to_string());
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors.join("; ")))
        }
    }

    pub fn into_session(self, id: String) -> Session {
        Session {
            id,
            date: self.date.trim().to_string(),
            location: self.location.trim().to_string(),
            start: self.start.trim().to_string(),
            end: self.end.trim().to_string(),
            discipline: self.discipline.trim().to_string(),
            capacity: self.capacity,
            notes: self.notes.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SessionForm;

    fn valid_form() -> SessionForm {
        SessionForm {
            date: "2026-09-02".to_string(),
            location: "Grip Sluppen".to_string(),
            start: "19:00".to_string(),
            end: "23:00".to_string(),
            discipline: "Bouldering".to_string(),
            capacity: 12,
            notes: String::new(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn missing_location_fails() {
        let mut form = valid_form();
        form.location = "  ".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn bad_date_fails() {
        let mut form = valid_form();
        form.date = "02.09.2026".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn bad_time_fails() {
        let mut form = valid_form();
        form.end = "7pm".to_string();
        assert!(form.validate().is_err());
    }
}
