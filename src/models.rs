use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============ Wire Models ============

/// Opportunity analysis returned by `GET /api/opportunity/{cpf}`.
///
/// Taken as-is from the backend; the client never reshapes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Analysis ID.
    pub id: Uuid,
    /// Customer the analysis belongs to.
    pub customer_id: Uuid,
    /// Opportunity score (0-100).
    pub potential_score: i32,
    /// Estimated monthly loss from staying informal.
    pub monthly_loss: BigDecimal,
    /// Pre-approved credit limit.
    pub shadow_limit: BigDecimal,
    /// Commercial revenue identified in the customer's transactions.
    pub identified_revenue: BigDecimal,
    /// Free-text recommendation.
    pub recommendation: String,
    /// Optional enrichment; `null` and missing are equivalent.
    #[serde(default)]
    pub market_intelligence: Option<MarketIntelligence>,
}

/// Inferred business characteristics attached to an analysis.
///
/// Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketIntelligence {
    pub id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    /// Probable activity, e.g. "Confeitaria / Doces".
    pub business_niche: Option<String>,
    /// Digital presence score (0-100).
    pub digital_presence_score: Option<i32>,
    pub estimated_maturity: Option<String>,
    pub recommended_approach: Option<String>,
    pub social_media_platform: Option<String>,
    pub social_media_followers: Option<i64>,
    pub has_google_maps_presence: Option<bool>,
}

/// Body of a non-2xx response. Only `message` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl AnalysisResult {
    /// Name shown for the account opened from this analysis.
    ///
    /// First segment of the business niche (before any `/`) followed by "MEI",
    /// or "Empresa MEI" when no niche is known.
    pub fn company_name(&self) -> String {
        self.market_intelligence
            .as_ref()
            .and_then(|mi| mi.business_niche.as_deref())
            .and_then(|niche| niche.split('/').next())
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| format!("{} MEI", segment))
            .unwrap_or_else(|| "Empresa MEI".to_string())
    }
}
