//! Line-driven interaction for the terminal session.
//!
//! Each input line maps to one [`Action`]; [`apply`] feeds it to the controller
//! and tells the caller whether a query must be issued. Queries run on their own
//! task via [`spawn_query`] so input keeps flowing while one is in flight.

use crate::controller::{QueryTicket, ViewController};
use crate::cpf::CpfInput;
use crate::errors::ClientError;
use crate::models::AnalysisResult;
use crate::opportunity::OpportunityService;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// A finished query, tagged with the ticket it was issued under.
pub type QueryOutcome = (QueryTicket, Result<AnalysisResult, ClientError>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Empty line: press the submit control.
    Submit,
    /// Replace the search field content.
    Type(String),
    Activate,
    Confirm,
    Close,
    Retry,
    Back,
    UseCredit,
    EmitInvoice,
    CollectPix,
    Quit,
    Unknown(String),
}

impl Action {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => Action::Submit,
            "ativar" => Action::Activate,
            "confirmar" => Action::Confirm,
            "fechar" => Action::Close,
            "tentar" => Action::Retry,
            "voltar" => Action::Back,
            "credito" | "crédito" => Action::UseCredit,
            "nota" => Action::EmitInvoice,
            "pix" => Action::CollectPix,
            "sair" | "q" => Action::Quit,
            _ if line.chars().any(|c| c.is_ascii_digit()) => Action::Type(line.to_string()),
            _ => Action::Unknown(line.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing beyond a redraw.
    Redraw,
    /// The caller must run a query for these digits.
    Query(String),
    /// The action was not available; carries a short notice.
    Rejected(String),
    Quit,
}

/// Applies one action. Typing a complete CPF submits right away.
pub fn apply(controller: &mut ViewController, input: &mut CpfInput, action: Action) -> Effect {
    let accepted = match action {
        Action::Submit => return submit(controller, input),
        Action::Type(text) => {
            if controller.is_loading() {
                return Effect::Rejected("Aguarde a análise em andamento".to_string());
            }
            if !input.set(&text) {
                return Effect::Rejected("CPF deve conter no máximo 11 dígitos".to_string());
            }
            if input.is_complete() {
                return submit(controller, input);
            }
            true
        }
        Action::Activate => controller.activate(),
        Action::Confirm => controller.confirm_activation(),
        Action::Close => {
            controller.close_overlay();
            true
        }
        Action::Retry => {
            controller.retry();
            true
        }
        Action::Back => {
            controller.back_to_analysis();
            input.clear();
            true
        }
        Action::UseCredit => controller.use_credit(),
        Action::EmitInvoice => controller.emit_invoice(),
        Action::CollectPix => controller.collect_pix(),
        Action::Quit => return Effect::Quit,
        Action::Unknown(cmd) => return Effect::Rejected(format!("Comando desconhecido: {}", cmd)),
    };

    if accepted {
        Effect::Redraw
    } else {
        Effect::Rejected("Ação indisponível nesta tela".to_string())
    }
}

fn submit(controller: &ViewController, input: &CpfInput) -> Effect {
    if controller.can_submit(input) {
        Effect::Query(input.digits().to_string())
    } else if controller.is_loading() {
        Effect::Rejected("Aguarde a análise em andamento".to_string())
    } else {
        Effect::Rejected(crate::errors::INVALID_CPF_MESSAGE.to_string())
    }
}

/// Runs the analysis for `digits` in the background.
///
/// The outcome is sent on `tx` together with `ticket`; the receiver hands both
/// to [`ViewController::resolve`], which drops anything superseded.
pub fn spawn_query(
    service: OpportunityService,
    ticket: QueryTicket,
    digits: String,
    tx: UnboundedSender<QueryOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = service.analyze(&digits).await;
        if tx.send((ticket, outcome)).is_err() {
            tracing::debug!("Session closed before query {} finished", ticket.sequence());
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Action::parse(""), Action::Submit);
        assert_eq!(Action::parse("  ATIVAR "), Action::Activate);
        assert_eq!(Action::parse("crédito"), Action::UseCredit);
        assert_eq!(Action::parse("123.456"), Action::Type("123.456".to_string()));
        assert_eq!(Action::parse("q"), Action::Quit);
        assert_eq!(Action::parse("foo"), Action::Unknown("foo".to_string()));
    }

    #[test]
    fn test_typing_full_cpf_requests_query() {
        let mut ctl = ViewController::new();
        let mut input = CpfInput::new();

        assert_eq!(
            apply(&mut ctl, &mut input, Action::Type("123.456".into())),
            Effect::Redraw
        );
        assert!(matches!(
            apply(&mut ctl, &mut input, Action::Submit),
            Effect::Rejected(_)
        ));
        assert_eq!(
            apply(&mut ctl, &mut input, Action::Type("123.456.789-01".into())),
            Effect::Query("12345678901".to_string())
        );
    }

    #[test]
    fn test_submit_rejected_while_loading() {
        let mut ctl = ViewController::new();
        let mut input = CpfInput::new();
        input.set("12345678901");
        ctl.submit();
        assert!(matches!(
            apply(&mut ctl, &mut input, Action::Submit),
            Effect::Rejected(_)
        ));
    }

    #[test]
    fn test_unavailable_actions_are_rejected() {
        let mut ctl = ViewController::new();
        let mut input = CpfInput::new();
        assert!(matches!(
            apply(&mut ctl, &mut input, Action::Activate),
            Effect::Rejected(_)
        ));
        assert!(matches!(
            apply(&mut ctl, &mut input, Action::CollectPix),
            Effect::Rejected(_)
        ));
        assert_eq!(apply(&mut ctl, &mut input, Action::Quit), Effect::Quit);
    }

    #[test]
    fn test_back_clears_input() {
        let mut ctl = ViewController::new();
        let mut input = CpfInput::new();
        input.set("123");
        apply(&mut ctl, &mut input, Action::Back);
        assert_eq!(input.digits(), "");
    }
}
