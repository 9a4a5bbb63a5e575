// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ChatMessage, ChatRole, Coordinates, Education, Job, JobRole, JobSeekerProfile, RankedJob,
    RecruiterProfile, ScoringPoints, TravelMode, User, UserKind, TECH_TAGS,
};
pub use requests::{ChatRequest, NewJob, NewUser, TravelTimeQuery};
pub use responses::{ChatResponse, ErrorResponse, HealthResponse, MessageResponse, TravelTimeResponse};
