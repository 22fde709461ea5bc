use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The hackathon's fixed track catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Track {
    SmartCampus,
    AiSocialImpact,
    Edtech,
    Healthcare,
    #[serde(rename = "industry-4")]
    Industry4,
    Greentech,
    DisasterManagement,
    AssistiveTech,
    SmartCities,
    OpenInnovation,
}

impl Track {
    pub fn as_str(&self) -> &'static str {
        match self {
            Track::SmartCampus => "smart-campus",
            Track::AiSocialImpact => "ai-social-impact",
            Track::Edtech => "edtech",
            Track::Healthcare => "healthcare",
            Track::Industry4 => "industry-4",
            Track::Greentech => "greentech",
            Track::DisasterManagement => "disaster-management",
            Track::AssistiveTech => "assistive-tech",
            Track::SmartCities => "smart-cities",
            Track::OpenInnovation => "open-innovation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Track::SmartCampus => "Smart & Sustainable Campus",
            Track::AiSocialImpact => "AI & Data Science for Social Impact",
            Track::Edtech => "Future of Engineering Education (EdTech)",
            Track::Healthcare => "Healthcare Engineering",
            Track::Industry4 => "Industry 4.0 & Automation",
            Track::Greentech => "Climate Resilience & GreenTech",
            Track::DisasterManagement => "Disaster Management & Infrastructure",
            Track::AssistiveTech => "Assistive Technologies for Disabilities",
            Track::SmartCities => "Smart Cities & Urban Mobility",
            Track::OpenInnovation => "Open Innovation",
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RSubmissionCreate {
    pub track: Track,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SubmissionView {
    pub id: Uuid,
    pub team_id: Uuid,
    pub track: String,
    pub track_name: String,
    pub description: String,
    pub submitted_by: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<entity::submission::Model> for SubmissionView {
    fn from(s: entity::submission::Model) -> Self {
        Self {
            id: s.id,
            team_id: s.team_id,
            track: s.track,
            track_name: s.track_name,
            description: s.description,
            submitted_by: s.submitted_by,
            status: s.status,
            created_at: s.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_ids_roundtrip_through_serde() {
        for track in [
            Track::SmartCampus,
            Track::AiSocialImpact,
            Track::Industry4,
            Track::OpenInnovation,
        ] {
            let json = serde_json::to_string(&track).unwrap();
            assert_eq!(json, format!("\"{}\"", track.as_str()));
            let back: Track = serde_json::from_str(&json).unwrap();
            assert_eq!(back, track);
        }
    }

    #[test]
    fn unknown_track_is_rejected() {
        assert!(serde_json::from_str::<Track>("\"blockchain\"").is_err());
    }

    #[test]
    fn every_track_has_a_display_name() {
        for track in [
            Track::SmartCampus,
            Track::AiSocialImpact,
            Track::Edtech,
            Track::Healthcare,
            Track::Industry4,
            Track::Greentech,
            Track::DisasterManagement,
            Track::AssistiveTech,
            Track::SmartCities,
            Track::OpenInnovation,
        ] {
            assert!(!track.display_name().is_empty());
        }
    }
}
