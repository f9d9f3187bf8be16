//! User account and profile models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use crate::error::{Result, ValidationError};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Authenticated user's profile as returned by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Backend user id
    #[serde(default)]
    pub id: Option<i64>,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Email address
    #[serde(default)]
    pub email: String,

    /// Injury type, e.g. "knee"
    #[serde(default)]
    pub injury_type: Option<String>,

    /// Fitness goal
    #[serde(default)]
    pub fitness_goal: Option<String>,

    /// Age in years
    #[serde(default)]
    pub age: Option<u32>,

    /// Weight in kg
    #[serde(default)]
    pub weight: Option<f64>,

    /// Height in cm
    #[serde(default)]
    pub height: Option<f64>,

    /// sedentary, light, moderate, active or athlete
    #[serde(default)]
    pub activity_level: Option<String>,

    /// Free-text injury description
    #[serde(default)]
    pub injury_description: Option<String>,

    /// Date of injury
    #[serde(default)]
    pub injury_date: Option<NaiveDate>,

    /// Account creation time
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl UserProfile {
    /// User id as a cache/display key.
    pub fn id_string(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }

    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or("User")
    }

    /// Date recovery tracking started: injury date, else account creation.
    pub fn recovery_start(&self) -> Option<NaiveDate> {
        self.injury_date.or_else(|| self.created_at.map(|t| t.date()))
    }
}

/// Editable profile fields sent to `PUT /auth/profile`.
///
/// Blank text fields are sent as null.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Display name
    pub name: Option<String>,

    /// Injury type
    pub injury_type: Option<String>,

    /// Fitness goal
    pub fitness_goal: Option<String>,

    /// Age in years
    pub age: Option<u32>,

    /// Weight in kg
    pub weight: Option<f64>,

    /// Height in cm
    pub height: Option<f64>,

    /// Activity level
    pub activity_level: Option<String>,

    /// Free-text injury description
    pub injury_description: Option<String>,
}

impl ProfileUpdate {
    /// Start an update pre-filled from the current profile.
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            injury_type: profile.injury_type.clone(),
            fitness_goal: profile.fitness_goal.clone(),
            age: profile.age,
            weight: profile.weight,
            height: profile.height,
            activity_level: profile.activity_level.clone(),
            injury_description: profile.injury_description.clone(),
        }
    }

    /// Replace blank strings with `None`.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.name,
            &mut self.injury_type,
            &mut self.fitness_goal,
            &mut self.activity_level,
            &mut self.injury_description,
        ] {
            if field.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *field = None;
            }
        }
        self
    }
}

/// Email/password credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email
    pub email: String,

    /// Plain-text password
    pub password: String,
}

/// Registration form, validated before submission.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    /// Full name, required
    pub name: String,

    /// Account email, required
    pub email: String,

    /// Password, required
    pub password: String,

    /// Must equal `password`
    pub confirm_password: String,

    /// Injury type, optional
    pub injury_type: Option<String>,

    /// Fitness goal, optional
    pub fitness_goal: Option<String>,
}

/// Registration payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Trimmed name
    pub name: String,

    /// Trimmed email
    pub email: String,

    /// Password as entered
    pub password: String,

    /// Injury type
    pub injury_type: Option<String>,

    /// Fitness goal
    pub fitness_goal: Option<String>,
}

impl Registration {
    /// Check required fields and password rules.
    pub fn validate(&self) -> Result<RegisterRequest> {
        if [&self.name, &self.email, &self.password, &self.confirm_password]
            .iter()
            .any(|s| s.trim().is_empty())
        {
            return Err(ValidationError::MissingAccountFields);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
        }

        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            injury_type: self.injury_type.clone(),
            fitness_goal: self.fitness_goal.clone(),
        })
    }
}
