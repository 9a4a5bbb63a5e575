use crate::models::{Coordinates, Education, Job, ScoringPoints, User};

/// The parts of a user the ranking rules look at
///
/// Every criterion is optional so recruiters and partially filled job seekers
/// can still be ranked; an absent criterion earns nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingCriteria<'a> {
    pub education: Option<Education>,
    pub experience_years: Option<f64>,
    pub location: Option<Coordinates>,
    pub swiped_jobs: &'a [String],
}

impl<'a> RankingCriteria<'a> {
    pub fn from_user(user: &'a User) -> Self {
        match user.job_seeker() {
            Some(profile) => Self {
                education: profile.education,
                experience_years: profile.experience_years,
                location: profile.location,
                swiped_jobs: &profile.swiped_jobs_id,
            },
            None => Self::default(),
        }
    }
}

/// Education rule: the degree name appears verbatim among the job tags
///
/// Degrees and technology tags are different vocabularies, so this only fires
/// for jobs that carry a degree name as a tag. Plain string membership.
#[inline]
pub fn education_matches_tags(education: Option<Education>, tags: &[String]) -> bool {
    match education {
        Some(education) => tags.iter().any(|tag| tag == education.as_str()),
        None => false,
    }
}

/// Pay rule: the job pays at least the expected rate for the user's experience
#[inline]
pub fn meets_pay_expectation(pay: f64, experience_years: Option<f64>, pay_per_year: f64) -> bool {
    match experience_years {
        Some(years) => pay >= years * pay_per_year,
        None => false,
    }
}

/// Unseen rule: the user has not swiped this job yet
#[inline]
pub fn is_unseen(job_id: &str, swiped_jobs: &[String]) -> bool {
    !swiped_jobs.iter().any(|id| id == job_id)
}

/// Distance rule: closer jobs earn more, unknown distances earn nothing
#[inline]
pub fn distance_points(distance_m: Option<f64>, points: &ScoringPoints) -> i32 {
    match distance_m {
        Some(d) if d < points.near_radius_m => points.near,
        Some(d) if d < points.nearby_radius_m => points.nearby,
        _ => 0,
    }
}

/// Sum of all rule contributions for one job
///
/// Distance points need both ends: a user without a location, or a job
/// without one, earns nothing for `distance_m` whatever its value.
pub fn score_job(
    criteria: &RankingCriteria<'_>,
    job: &Job,
    distance_m: Option<f64>,
    points: &ScoringPoints,
) -> i32 {
    let mut score = 0;

    if education_matches_tags(criteria.education, &job.tags) {
        score += points.education;
    }

    if meets_pay_expectation(job.pay, criteria.experience_years, points.pay_per_experience_year) {
        score += points.pay;
    }

    if is_unseen(&job.id, criteria.swiped_jobs) {
        score += points.unseen;
    }

    if criteria.location.is_some() && job.location().is_some() {
        score += distance_points(distance_m, points);
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobRole;

    fn create_job(id: &str, pay: f64, tags: &[&str]) -> Job {
        Job {
            id: id.to_string(),
            role: JobRole::SoftwareEngineer,
            pay,
            location: Some("45.51,-73.6".to_string()),
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_education_is_literal_membership() {
        let tags = vec!["Bachelor".to_string(), "Rust".to_string()];
        assert!(education_matches_tags(Some(Education::Bachelor), &tags));
        assert!(!education_matches_tags(Some(Education::Master), &tags));
        assert!(!education_matches_tags(None, &tags));

        // No case folding
        let tags = vec!["bachelor".to_string()];
        assert!(!education_matches_tags(Some(Education::Bachelor), &tags));
    }

    #[test]
    fn test_pay_expectation_boundary() {
        assert!(meets_pay_expectation(30_000.0, Some(3.0), 10_000.0));
        assert!(!meets_pay_expectation(29_999.0, Some(3.0), 10_000.0));
        assert!(meets_pay_expectation(0.0, Some(0.0), 10_000.0));
        assert!(!meets_pay_expectation(1_000_000.0, None, 10_000.0));
    }

    #[test]
    fn test_distance_bands() {
        let points = ScoringPoints::default();
        assert_eq!(distance_points(Some(0.0), &points), 20);
        assert_eq!(distance_points(Some(4_999.9), &points), 20);
        assert_eq!(distance_points(Some(5_000.0), &points), 10);
        assert_eq!(distance_points(Some(19_999.0), &points), 10);
        assert_eq!(distance_points(Some(20_000.0), &points), 0);
        assert_eq!(distance_points(Some(f64::NAN), &points), 0);
        assert_eq!(distance_points(None, &points), 0);
    }

    #[test]
    fn test_score_job_sums_rules() {
        let swiped = vec!["seen".to_string()];
        let criteria = RankingCriteria {
            education: Some(Education::Bachelor),
            experience_years: Some(3.0),
            location: Some(Coordinates::new(45.5, -73.6)),
            swiped_jobs: &swiped,
        };
        let points = ScoringPoints::default();

        let job = create_job("a", 40_000.0, &["Bachelor"]);
        assert_eq!(score_job(&criteria, &job, Some(1_000.0), &points), 50);

        let job = create_job("b", 20_000.0, &[]);
        assert_eq!(score_job(&criteria, &job, Some(30_000.0), &points), 15);

        let job = create_job("seen", 20_000.0, &[]);
        assert_eq!(score_job(&criteria, &job, None, &points), 0);
    }

    #[test]
    fn test_distance_needs_both_locations() {
        let criteria = RankingCriteria {
            location: Some(Coordinates::new(45.5, -73.6)),
            ..RankingCriteria::default()
        };
        let points = ScoringPoints::default();

        let placed = create_job("a", 0.0, &[]);
        assert_eq!(score_job(&criteria, &placed, Some(100.0), &points), 35);

        let unplaced = Job {
            location: Some("   ".to_string()),
            ..create_job("b", 0.0, &[])
        };
        assert_eq!(score_job(&criteria, &unplaced, Some(100.0), &points), 15);

        let no_origin = RankingCriteria::default();
        assert_eq!(score_job(&no_origin, &placed, Some(100.0), &points), 15);
    }

    #[test]
    fn test_empty_criteria_only_earns_unseen() {
        let criteria = RankingCriteria::default();
        let job = create_job("a", 100_000.0, &["Bachelor"]);

        assert_eq!(score_job(&criteria, &job, None, &ScoringPoints::default()), 15);
    }
}
