//! Display classifications derived from backend scores.

/// Number of indicator marks in the presence rating.
pub const PRESENCE_MARKS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreLevel {
    High,
    Medium,
    Low,
}

impl ScoreLevel {
    /// `>= 70` high, `>= 40` medium, anything else low.
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 70 => ScoreLevel::High,
            s if s >= 40 => ScoreLevel::Medium,
            _ => ScoreLevel::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreLevel::High => "Alto Potencial",
            ScoreLevel::Medium => "Médio Potencial",
            ScoreLevel::Low => "Baixo Potencial",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceLevel {
    High,
    Medium,
    Low,
    /// No score was supplied. Distinct from a score of zero.
    NoData,
}

impl PresenceLevel {
    pub fn from_score(score: Option<i32>) -> Self {
        match score {
            None => PresenceLevel::NoData,
            Some(s) if s >= 70 => PresenceLevel::High,
            Some(s) if s >= 40 => PresenceLevel::Medium,
            Some(_) => PresenceLevel::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PresenceLevel::High => "Alta",
            PresenceLevel::Medium => "Média",
            PresenceLevel::Low => "Baixa",
            PresenceLevel::NoData => "Sem dados",
        }
    }

    /// Filled marks out of [`PRESENCE_MARKS`].
    pub fn marks(&self) -> u8 {
        match self {
            PresenceLevel::High => 3,
            PresenceLevel::Medium => 2,
            PresenceLevel::Low => 1,
            PresenceLevel::NoData => 0,
        }
    }

    /// Marks as text, e.g. `★★☆`.
    pub fn indicator(&self) -> String {
        (0..PRESENCE_MARKS)
            .map(|i| if i < self.marks() { '★' } else { '☆' })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialPlatform {
    Instagram,
    LinkedIn,
    GitHub,
    Other,
}

impl SocialPlatform {
    pub fn detect(platform: &str) -> Self {
        let lower = platform.to_lowercase();
        if lower.contains("instagram") {
            SocialPlatform::Instagram
        } else if lower.contains("linkedin") {
            SocialPlatform::LinkedIn
        } else if lower.contains("github") {
            SocialPlatform::GitHub
        } else {
            SocialPlatform::Other
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            SocialPlatform::Instagram => "[IG]",
            SocialPlatform::LinkedIn => "[in]",
            SocialPlatform::GitHub => "[GH]",
            SocialPlatform::Other => "[@]",
        }
    }
}
