use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Technology tags a job may carry
pub const TECH_TAGS: &[&str] = &[
    "React",
    "TypeScript",
    "JavaScript",
    "Node.js",
    "Python",
    "Java",
    "Rust",
    "Go",
    "SQL",
    "AWS",
    "Docker",
    "Kubernetes",
    "CSS/SASS",
    "REST APIs",
    "GraphQL",
];

/// Geographic coordinate pair, serialized as `[lat, lng]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseCoordinatesError {
    #[error("expected \"lat,lng\", got {0:?}")]
    Format(String),

    #[error("coordinates out of range: {0}")]
    OutOfRange(String),
}

impl FromStr for Coordinates {
    type Err = ParseCoordinatesError;

    /// Parse the `"lat,lng"` encoding used by query strings and job locations
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| ParseCoordinatesError::Format(s.to_string()))?;

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| ParseCoordinatesError::Format(s.to_string()))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| ParseCoordinatesError::Format(s.to_string()))?;

        let coords = Coordinates { lat, lng };
        if !coords.is_valid() {
            return Err(ParseCoordinatesError::OutOfRange(s.to_string()));
        }

        Ok(coords)
    }
}

/// Highest degree held by a job seeker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Education {
    Bachelor,
    Master,
    #[serde(rename = "PHD")]
    Phd,
}

impl Education {
    /// Wire name, also the string compared against job tags
    pub fn as_str(&self) -> &'static str {
        match self {
            Education::Bachelor => "Bachelor",
            Education::Master => "Master",
            Education::Phd => "PHD",
        }
    }
}

/// Fields only present on job seekers
///
/// Unknown keys, recruiter fields included, are rejected rather than dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct JobSeekerProfile {
    #[validate(required)]
    #[serde(default)]
    pub education: Option<Education>,
    #[validate(required, range(min = 0.0))]
    #[serde(default)]
    pub experience_years: Option<f64>,
    #[validate(required, custom(function = "validate_coordinates"))]
    #[serde(default)]
    pub location: Option<Coordinates>,
    #[serde(rename = "swipedJobsID", default)]
    pub swiped_jobs_id: Vec<String>,
}

/// Fields only present on recruiters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RecruiterProfile {
    #[validate(required, length(min = 1))]
    #[serde(rename = "companyID", default)]
    pub company_id: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(rename = "companySize", default)]
    pub company_size: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(rename = "salaryRange", default)]
    pub salary_range: Option<String>,
    #[validate(required)]
    #[serde(rename = "likesReceivedCompany", default)]
    pub likes_received_company: Option<u32>,
    #[serde(rename = "swipedApplicantsEmail", default)]
    pub swiped_applicants_email: Vec<String>,
}

/// Variant part of a user, discriminated by `userType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "userType")]
pub enum UserKind {
    #[serde(rename = "jobSeeker")]
    JobSeeker(JobSeekerProfile),
    #[serde(rename = "recruiter")]
    Recruiter(RecruiterProfile),
}

impl UserKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            UserKind::JobSeeker(_) => "jobSeeker",
            UserKind::Recruiter(_) => "recruiter",
        }
    }
}

impl Validate for UserKind {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        match self {
            UserKind::JobSeeker(profile) => profile.validate(),
            UserKind::Recruiter(profile) => profile.validate(),
        }
    }
}

/// Stored user document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: UserKind,
}

impl User {
    pub fn job_seeker(&self) -> Option<&JobSeekerProfile> {
        match &self.kind {
            UserKind::JobSeeker(profile) => Some(profile),
            UserKind::Recruiter(_) => None,
        }
    }

    pub fn recruiter(&self) -> Option<&RecruiterProfile> {
        match &self.kind {
            UserKind::Recruiter(profile) => Some(profile),
            UserKind::JobSeeker(_) => None,
        }
    }
}

/// Closed set of job titles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobRole {
    #[serde(rename = "Software Engineer")]
    SoftwareEngineer,
    #[serde(rename = "Frontend Engineer")]
    FrontendEngineer,
    #[serde(rename = "Backend Engineer")]
    BackendEngineer,
    #[serde(rename = "Full Stack Developer")]
    FullStackDeveloper,
    #[serde(rename = "Senior React Developer")]
    SeniorReactDeveloper,
    #[serde(rename = "Mobile Developer")]
    MobileDeveloper,
    #[serde(rename = "Data Scientist")]
    DataScientist,
    #[serde(rename = "DevOps Engineer")]
    DevOpsEngineer,
    #[serde(rename = "QA Engineer")]
    QaEngineer,
    #[serde(rename = "Product Manager")]
    ProductManager,
}

/// Stored job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub role: JobRole,
    pub pay: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Job {
    /// Location string, treating blank values as absent
    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

/// A job scored for one user, never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct RankedJob {
    pub job: Job,
    pub score: i32,
}

/// Points awarded by each ranking rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPoints {
    pub education: i32,
    pub pay: i32,
    pub unseen: i32,
    pub near: i32,
    pub nearby: i32,
    /// Distances strictly below this earn `near`
    pub near_radius_m: f64,
    /// Distances strictly below this (and not near) earn `nearby`
    pub nearby_radius_m: f64,
    /// Expected pay per year of experience
    pub pay_per_experience_year: f64,
}

impl Default for ScoringPoints {
    fn default() -> Self {
        Self {
            education: 10,
            pay: 5,
            unseen: 15,
            near: 20,
            nearby: 10,
            near_radius_m: 5_000.0,
            nearby_radius_m: 20_000.0,
            pay_per_experience_year: 10_000.0,
        }
    }
}

/// Transport mode understood by the mapping provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One turn of an assistant conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

fn validate_coordinates(coords: &Coordinates) -> Result<(), ValidationError> {
    if coords.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::new("coordinates_out_of_range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coordinates_from_str() {
        let coords: Coordinates = "45.4852608, -73.5838208".parse().unwrap();
        assert_eq!(coords, Coordinates::new(45.4852608, -73.5838208));

        assert!("Los Angeles, CA".parse::<Coordinates>().is_err());
        assert!("45.5".parse::<Coordinates>().is_err());
        assert_eq!(
            "95.0,10.0".parse::<Coordinates>(),
            Err(ParseCoordinatesError::OutOfRange("95.0,10.0".to_string()))
        );
    }

    #[test]
    fn test_job_seeker_deserializes_from_document() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "createdAt": "2024-01-01T00:00:00Z",
            "userType": "jobSeeker",
            "education": "PHD",
            "experience_years": 4,
            "location": [45.5, -73.6],
            "swipedJobsID": ["j1"]
        }))
        .unwrap();

        let profile = user.job_seeker().unwrap();
        assert_eq!(profile.education, Some(Education::Phd));
        assert_eq!(profile.experience_years, Some(4.0));
        assert_eq!(profile.location, Some(Coordinates::new(45.5, -73.6)));
        assert_eq!(profile.swiped_jobs_id, vec!["j1"]);
    }

    #[test]
    fn test_user_serializes_type_tag_and_location_array() {
        let user = User {
            id: "u2".to_string(),
            name: "Rex".to_string(),
            email: "rex@corp.io".to_string(),
            created_at: Utc::now(),
            kind: UserKind::Recruiter(RecruiterProfile {
                company_id: Some("c1".to_string()),
                ..Default::default()
            }),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["userType"], "recruiter");
        assert_eq!(value["_id"], "u2");
        assert_eq!(value["companyID"], "c1");

        let seeker = UserKind::JobSeeker(JobSeekerProfile {
            location: Some(Coordinates::new(1.5, 2.5)),
            ..Default::default()
        });
        let value = serde_json::to_value(&seeker).unwrap();
        assert_eq!(value["location"], json!([1.5, 2.5]));
    }

    #[test]
    fn test_fields_of_the_other_user_type_are_rejected() {
        let recruiter_with_location = serde_json::from_value::<User>(json!({
            "_id": "u3",
            "name": "Rex",
            "email": "rex@corp.io",
            "createdAt": "2024-01-01T00:00:00Z",
            "userType": "recruiter",
            "companyID": "c1",
            "location": [45.5, -73.6]
        }));
        assert!(recruiter_with_location.is_err());

        let seeker_with_company = serde_json::from_value::<UserKind>(json!({
            "userType": "jobSeeker",
            "education": "Master",
            "companyID": "c1"
        }));
        assert!(seeker_with_company.is_err());
    }

    #[test]
    fn test_partial_job_seeker_is_readable_but_invalid() {
        let kind: UserKind = serde_json::from_value(json!({
            "userType": "jobSeeker",
            "education": "Master"
        }))
        .unwrap();

        assert!(kind.validate().is_err());
    }

    #[test]
    fn test_job_location_blank_is_absent() {
        let mut job: Job = serde_json::from_value(json!({
            "_id": "j1",
            "role": "Frontend Engineer",
            "pay": 90000,
            "location": "   "
        }))
        .unwrap();
        assert_eq!(job.location(), None);

        job.location = Some(" Remote ".to_string());
        assert_eq!(job.location(), Some("Remote"));
    }
}
