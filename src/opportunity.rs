use crate::api_client::ApiClient;
use crate::config::Config;
use crate::cpf::Cpf;
use crate::errors::ClientError;
use crate::models::AnalysisResult;

/// Analysis query service: one GET per CPF, no retry, no caching.
#[derive(Clone)]
pub struct OpportunityService {
    client: ApiClient,
}

impl OpportunityService {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        Ok(Self {
            client: ApiClient::new(config)?,
        })
    }

    pub fn from_client(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches the opportunity analysis for a CPF.
    ///
    /// The identifier may carry formatting; it must reduce to 11 digits or the
    /// call fails with `ClientError::Validation` before touching the network.
    pub async fn analyze(&self, identifier: &str) -> Result<AnalysisResult, ClientError> {
        let cpf = Cpf::parse(identifier)?;
        tracing::info!("Requesting opportunity analysis for CPF {}", cpf.masked());

        let result: AnalysisResult = self
            .client
            .get_json(
                &format!("/api/opportunity/{}", cpf.digits()),
                &format!("opportunity analysis of CPF {}", cpf.masked()),
            )
            .await?;

        tracing::info!(
            "✓ Analysis received for CPF {} (score {})",
            cpf.masked(),
            result.potential_score
        );
        Ok(result)
    }
}
