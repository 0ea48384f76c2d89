//! View state controller.
//!
//! Owns the single query lifecycle (`Idle -> Loading -> Success | Error`), the
//! screen selector and the overlay slot. A result and an error can never be held
//! at the same time, and neither can coexist with `Loading`: all three live in
//! one [`ViewState`] value.

use crate::cpf::CpfInput;
use crate::errors::{ClientError, QUERY_ERROR_FALLBACK};
use crate::models::AnalysisResult;
use crate::opportunity::OpportunityService;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Success(AnalysisResult),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Analysis,
    Hub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Account activation confirmation, opened from the dashboard.
    Activation,
    /// Invoice issuing mock-up (hub).
    Invoice,
    /// Working-capital usage mock-up (hub).
    Credit,
    /// Pix collection over WhatsApp mock-up (hub).
    PixCollection,
}

/// Handle for one submitted query. Only the latest ticket may resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket(u64);

impl QueryTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Account shown after activation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionedAccount {
    pub company_name: String,
    /// Company tax number. Not issued by any backend yet, so always `None` for now.
    pub cnpj: Option<String>,
    pub credit_limit: BigDecimal,
    /// Status cards shown on the hub.
    pub hub: HubSnapshot,
}

/// Last invoice issued by the account.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSummary {
    pub amount: BigDecimal,
    pub client: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthPlan {
    pub provider: String,
    pub active: bool,
}

/// Monthly DAS (simplified tax) payment status.
#[derive(Debug, Clone, PartialEq)]
pub struct DasStatus {
    pub paid: bool,
    pub next_due: NaiveDate,
}

/// Figures on the hub cards and quick stats.
///
/// No backend serves these yet; [`HubSnapshot::demo`] holds fixed sample values.
#[derive(Debug, Clone, PartialEq)]
pub struct HubSnapshot {
    pub last_invoice: InvoiceSummary,
    pub pending_receivables: BigDecimal,
    pub health_plan: HealthPlan,
    pub das: DasStatus,
    pub monthly_revenue: BigDecimal,
    pub invoices_this_month: u32,
    pub account_status: String,
}

impl HubSnapshot {
    pub fn demo() -> Self {
        Self {
            last_invoice: InvoiceSummary {
                amount: BigDecimal::from(500),
                client: "Ana Silva".to_string(),
                date: demo_date(2024, 12, 15),
            },
            pending_receivables: BigDecimal::from(1200),
            health_plan: HealthPlan {
                provider: "Unimed".to_string(),
                active: true,
            },
            das: DasStatus {
                paid: true,
                next_due: demo_date(2024, 12, 20),
            },
            monthly_revenue: BigDecimal::from(5000),
            invoices_this_month: 12,
            account_status: "Ativo".to_string(),
        }
    }
}

impl Default for HubSnapshot {
    fn default() -> Self {
        Self::demo()
    }
}

fn demo_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[derive(Debug)]
pub struct ViewController {
    state: ViewState,
    screen: Screen,
    overlay: Option<Overlay>,
    last_issued: u64,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewController {
    pub fn new() -> Self {
        Self {
            state: ViewState::Idle,
            screen: Screen::Analysis,
            overlay: None,
            last_issued: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            ViewState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ViewState::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether the submit control is enabled for this input.
    pub fn can_submit(&self, input: &CpfInput) -> bool {
        input.is_complete() && !self.is_loading()
    }

    /// Starts a query from any state, dropping any held result or error.
    ///
    /// Also returns to the analysis screen and closes overlays, since neither
    /// the hub nor an overlay is meaningful without a result.
    pub fn submit(&mut self) -> QueryTicket {
        self.last_issued += 1;
        self.state = ViewState::Loading;
        self.screen = Screen::Analysis;
        self.overlay = None;
        tracing::debug!("Query #{} submitted", self.last_issued);
        QueryTicket(self.last_issued)
    }

    /// Applies the outcome of a query. Returns false when the ticket is stale and
    /// the outcome was discarded.
    pub fn resolve(
        &mut self,
        ticket: QueryTicket,
        outcome: Result<AnalysisResult, ClientError>,
    ) -> bool {
        if ticket.0 != self.last_issued || !self.is_loading() {
            tracing::warn!(
                "Discarding stale query #{} (latest is #{})",
                ticket.0,
                self.last_issued
            );
            return false;
        }

        self.state = match outcome {
            Ok(result) => ViewState::Success(result),
            Err(err) => {
                let message = match err.message() {
                    "" => QUERY_ERROR_FALLBACK.to_string(),
                    msg => msg.to_string(),
                };
                ViewState::Error(message)
            }
        };
        true
    }

    /// Submits, runs the query and resolves it.
    pub async fn run(&mut self, service: &OpportunityService, identifier: &str) -> bool {
        let ticket = self.submit();
        let outcome = service.analyze(identifier).await;
        self.resolve(ticket, outcome)
    }

    /// Clears a displayed error. Has nothing to do while a result is held.
    pub fn retry(&mut self) {
        if let ViewState::Error(_) = self.state {
            self.state = ViewState::Idle;
        }
    }

    /// Opens the activation overlay. Requires a result on the analysis screen.
    pub fn activate(&mut self) -> bool {
        if self.screen != Screen::Analysis || self.result().is_none() {
            return false;
        }
        self.overlay = Some(Overlay::Activation);
        true
    }

    /// Confirms activation: switches to the hub and closes the overlay.
    pub fn confirm_activation(&mut self) -> bool {
        if self.overlay != Some(Overlay::Activation) {
            return false;
        }
        self.overlay = None;
        self.screen = Screen::Hub;
        tracing::info!("Account activated, switching to hub");
        true
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn use_credit(&mut self) -> bool {
        self.open_hub_overlay(Overlay::Credit)
    }

    pub fn emit_invoice(&mut self) -> bool {
        self.open_hub_overlay(Overlay::Invoice)
    }

    pub fn collect_pix(&mut self) -> bool {
        self.open_hub_overlay(Overlay::PixCollection)
    }

    fn open_hub_overlay(&mut self, overlay: Overlay) -> bool {
        if self.screen != Screen::Hub {
            return false;
        }
        self.overlay = Some(overlay);
        true
    }

    /// Leaves the hub and forgets the held result, so a fresh query is required.
    pub fn back_to_analysis(&mut self) {
        self.screen = Screen::Analysis;
        self.overlay = None;
        self.state = ViewState::Idle;
    }

    /// Account derived from the held result.
    pub fn account(&self) -> Option<ProvisionedAccount> {
        self.result().map(|result| ProvisionedAccount {
            company_name: result.company_name(),
            cnpj: None,
            credit_limit: result.shadow_limit.clone(),
            hub: HubSnapshot::demo(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarketIntelligence;
    use std::str::FromStr;
    use uuid::Uuid;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            potential_score: 82,
            monthly_loss: BigDecimal::from_str("450.75").unwrap(),
            shadow_limit: BigDecimal::from(15000),
            identified_revenue: BigDecimal::from_str("8500.50").unwrap(),
            recommendation: "Formalizar como MEI".to_string(),
            market_intelligence: Some(MarketIntelligence {
                business_niche: Some("Confeitaria / Doces".to_string()),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_submit_then_success() {
        let mut ctl = ViewController::new();
        assert_eq!(ctl.state(), &ViewState::Idle);

        let ticket = ctl.submit();
        assert!(ctl.is_loading());
        assert!(ctl.resolve(ticket, Ok(sample_result())));
        assert_eq!(ctl.result().unwrap().potential_score, 82);
        assert!(ctl.error().is_none());
    }

    #[test]
    fn test_submit_clears_previous_result_and_error() {
        let mut ctl = ViewController::new();
        let ticket = ctl.submit();
        ctl.resolve(ticket, Ok(sample_result()));

        let ticket = ctl.submit();
        assert!(ctl.result().is_none());
        ctl.resolve(ticket, Err(ClientError::Unreachable));
        assert!(ctl.error().is_some());

        ctl.submit();
        assert!(ctl.error().is_none());
        assert!(ctl.is_loading());
    }

    #[test]
    fn test_failure_shows_error_message() {
        let mut ctl = ViewController::new();
        let ticket = ctl.submit();
        ctl.resolve(
            ticket,
            Err(ClientError::server(400, Some("CPF inválido".to_string()))),
        );
        assert_eq!(ctl.error(), Some("CPF inválido"));
    }

    #[test]
    fn test_empty_error_message_uses_fallback() {
        let mut ctl = ViewController::new();
        let ticket = ctl.submit();
        ctl.resolve(ticket, Err(ClientError::Validation(String::new())));
        assert_eq!(ctl.error(), Some(QUERY_ERROR_FALLBACK));
    }

    #[test]
    fn test_stale_resolution_is_discarded() {
        let mut ctl = ViewController::new();
        let first = ctl.submit();
        let second = ctl.submit();
        assert_eq!(second.sequence(), first.sequence() + 1);

        assert!(ctl.resolve(second, Err(ClientError::Unreachable)));
        assert!(!ctl.resolve(first, Ok(sample_result())));
        assert!(ctl.result().is_none());
        assert!(ctl.error().is_some());
    }

    #[test]
    fn test_resolution_after_reset_is_discarded() {
        let mut ctl = ViewController::new();
        let ticket = ctl.submit();
        ctl.back_to_analysis();
        assert!(!ctl.resolve(ticket, Ok(sample_result())));
        assert_eq!(ctl.state(), &ViewState::Idle);
    }

    #[test]
    fn test_retry_clears_error_only() {
        let mut ctl = ViewController::new();
        let ticket = ctl.submit();
        ctl.resolve(ticket, Err(ClientError::Unreachable));
        ctl.retry();
        assert_eq!(ctl.state(), &ViewState::Idle);

        let ticket = ctl.submit();
        ctl.resolve(ticket, Ok(sample_result()));
        ctl.retry();
        assert!(ctl.result().is_some());
    }

    #[test]
    fn test_activation_flow_reaches_hub() {
        let mut ctl = ViewController::new();
        assert!(!ctl.activate());

        let ticket = ctl.submit();
        ctl.resolve(ticket, Ok(sample_result()));
        assert!(!ctl.confirm_activation());
        assert!(ctl.activate());
        assert_eq!(ctl.overlay(), Some(Overlay::Activation));

        ctl.close_overlay();
        assert_eq!(ctl.overlay(), None);
        assert_eq!(ctl.screen(), Screen::Analysis);

        ctl.activate();
        assert!(ctl.confirm_activation());
        assert_eq!(ctl.screen(), Screen::Hub);
        assert_eq!(ctl.overlay(), None);

        let account = ctl.account().unwrap();
        assert_eq!(account.company_name, "Confeitaria MEI");
        assert_eq!(account.cnpj, None);
        assert_eq!(account.credit_limit, BigDecimal::from(15000));
        assert_eq!(account.hub.pending_receivables, BigDecimal::from(1200));
        assert_eq!(account.hub.last_invoice.client, "Ana Silva");
    }

    #[test]
    fn test_demo_hub_snapshot() {
        let hub = HubSnapshot::demo();
        assert_eq!(hub.last_invoice.amount, BigDecimal::from(500));
        assert_eq!(hub.last_invoice.date, NaiveDate::from_ymd_opt(2024, 12, 15).unwrap());
        assert_eq!(hub.das.next_due, NaiveDate::from_ymd_opt(2024, 12, 20).unwrap());
        assert!(hub.das.paid);
        assert_eq!(hub.health_plan.provider, "Unimed");
        assert!(hub.health_plan.active);
        assert_eq!(hub.monthly_revenue, BigDecimal::from(5000));
        assert_eq!(hub.invoices_this_month, 12);
        assert_eq!(hub.account_status, "Ativo");
    }

    #[test]
    fn test_hub_overlays_only_on_hub() {
        let mut ctl = ViewController::new();
        let ticket = ctl.submit();
        ctl.resolve(ticket, Ok(sample_result()));
        assert!(!ctl.use_credit());

        ctl.activate();
        ctl.confirm_activation();
        assert!(ctl.use_credit());
        assert_eq!(ctl.overlay(), Some(Overlay::Credit));
        assert!(ctl.emit_invoice());
        assert_eq!(ctl.overlay(), Some(Overlay::Invoice));
        assert!(ctl.collect_pix());
        assert_eq!(ctl.overlay(), Some(Overlay::PixCollection));
        assert!(!ctl.activate());
    }

    #[test]
    fn test_back_from_hub_clears_result() {
        let mut ctl = ViewController::new();
        let ticket = ctl.submit();
        ctl.resolve(ticket, Ok(sample_result()));
        ctl.activate();
        ctl.confirm_activation();
        ctl.use_credit();

        ctl.back_to_analysis();
        assert_eq!(ctl.screen(), Screen::Analysis);
        assert_eq!(ctl.overlay(), None);
        assert!(ctl.result().is_none());
        assert!(ctl.error().is_none());
        assert!(ctl.account().is_none());
    }

    #[test]
    fn test_can_submit_requires_full_cpf_and_idle_query() {
        let mut ctl = ViewController::new();
        let mut input = CpfInput::new();
        input.set("1234567890");
        assert!(!ctl.can_submit(&input));

        input.set("12345678901");
        assert!(ctl.can_submit(&input));

        ctl.submit();
        assert!(!ctl.can_submit(&input));
    }
}
