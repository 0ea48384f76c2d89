//! Text renderers for every screen and overlay.
//!
//! Pure functions of their inputs; nothing here touches the controller.

use super::format::{format_brl, format_count, format_percent};
use super::levels::{PresenceLevel, ScoreLevel, SocialPlatform};
use crate::controller::{Overlay, ProvisionedAccount, Screen, ViewController, ViewState};
use crate::cpf::CpfInput;
use crate::models::{AnalysisResult, MarketIntelligence};

const GAUGE_WIDTH: usize = 20;
const DATE_FORMAT: &str = "%d/%m/%Y";
const NO_DATA: &str = "Sem dados";

fn heading(title: &str) -> Vec<String> {
    vec![title.to_string(), "=".repeat(title.chars().count())]
}

fn field(label: &str, value: impl AsRef<str>) -> String {
    format!("  {:<28} {}", format!("{}:", label), value.as_ref())
}

pub fn render_search(input: &CpfInput, can_submit: bool, loading: bool) -> String {
    let status = if loading {
        "Analisando..."
    } else if can_submit {
        "[enter] Buscar Oportunidades"
    } else {
        "Buscar Oportunidades (informe 11 dígitos)"
    };
    let shown = input.display();
    [
        format!(
            "CPF: {}",
            if shown.is_empty() {
                "___.___.___-__"
            } else {
                shown.as_str()
            }
        ),
        status.to_string(),
    ]
    .join("\n")
}

pub fn render_welcome() -> String {
    [
        "Bem-vindo ao MEI-Mentor",
        "Digite o CPF do cliente para iniciar a análise de oportunidades de formalização MEI.",
    ]
    .join("\n")
}

pub fn render_loading() -> String {
    "Carregando análise...".to_string()
}

pub fn render_error(message: &str) -> String {
    let mut lines = heading("Erro ao buscar análise");
    lines.push(message.to_string());
    lines.push("[tentar] Tentar novamente".to_string());
    lines.join("\n")
}

/// Horizontal gauge, e.g. `[################----] 82%`.
pub fn render_score_gauge(score: i32) -> String {
    let clamped = score.clamp(0, 100) as usize;
    let filled = (clamped * GAUGE_WIDTH + 50) / 100;
    let level = ScoreLevel::from_score(score);
    [
        format!(
            "[{}{}] {}",
            "#".repeat(filled),
            "-".repeat(GAUGE_WIDTH - filled),
            format_percent(score)
        ),
        format!("{} · Score de Oportunidade", level.label()),
    ]
    .join("\n")
}

pub fn render_market_intelligence(intelligence: Option<&MarketIntelligence>) -> String {
    let mut lines = heading("Raio-X de Mercado");

    let Some(mi) = intelligence else {
        lines.push("Dados de inteligência de mercado não disponíveis".to_string());
        return lines.join("\n");
    };

    lines.push(field(
        "Atividade provável",
        mi.business_niche.as_deref().unwrap_or(NO_DATA),
    ));

    let presence = PresenceLevel::from_score(mi.digital_presence_score);
    let score = mi
        .digital_presence_score
        .map(|s| format!(" (score {}/100)", s))
        .unwrap_or_default();
    lines.push(field(
        "Presença digital",
        format!("{} {}{}", presence.indicator(), presence.label(), score),
    ));

    let social = match (&mi.social_media_platform, mi.social_media_followers) {
        (None, None) => NO_DATA.to_string(),
        (Some(platform), None) => {
            format!("{} {}", SocialPlatform::detect(platform).tag(), platform)
        }
        (None, Some(followers)) => format!("{} seguidores", format_count(followers)),
        (Some(platform), Some(followers)) => format!(
            "{} {} · {} seguidores",
            SocialPlatform::detect(platform).tag(),
            platform,
            format_count(followers)
        ),
    };
    lines.push(field("Rede social", social));

    lines.push(field(
        "Cadastro no Google Maps",
        match mi.has_google_maps_presence {
            Some(true) => "Sim",
            Some(false) => "Não",
            None => NO_DATA,
        },
    ));
    lines.push(field(
        "Maturidade",
        mi.estimated_maturity.as_deref().unwrap_or(NO_DATA),
    ));
    lines.push(field(
        "Dica da IA",
        mi.recommended_approach
            .as_deref()
            .map(|tip| format!("\"{}\"", tip))
            .unwrap_or_else(|| NO_DATA.to_string()),
    ));

    lines.join("\n")
}

pub fn render_dashboard(result: &AnalysisResult) -> String {
    let mut sections = Vec::new();

    let mut cards = heading("Oportunidade");
    cards.push(field(
        "Dinheiro deixado na mesa",
        format_brl(&result.monthly_loss),
    ));
    cards.push(field(
        "Limite pré-aprovado",
        format_brl(&result.shadow_limit),
    ));
    cards.push(field(
        "Potencial empreendedor",
        format_percent(result.potential_score),
    ));
    sections.push(cards.join("\n"));

    sections.push(render_market_intelligence(
        result.market_intelligence.as_ref(),
    ));

    let mut analysis = heading("Análise de Potencial");
    analysis.push(render_score_gauge(result.potential_score));
    analysis.push(field("Recomendação", &result.recommendation));
    analysis.push(field(
        "Receita identificada",
        format_brl(&result.identified_revenue),
    ));
    sections.push(analysis.join("\n"));

    sections.push("[ativar] Ativar Conta MEI".to_string());
    sections.join("\n\n")
}

fn cnpj_label(account: &ProvisionedAccount) -> String {
    account
        .cnpj
        .clone()
        .unwrap_or_else(|| "não provisionado".to_string())
}

pub fn render_activation(account: &ProvisionedAccount) -> String {
    let mut lines = heading("Conta MEI Ativada com Sucesso!");
    lines.push(field("Empresa", &account.company_name));
    lines.push(field("CNPJ", cnpj_label(account)));
    lines.push(field(
        "Limite pré-aprovado",
        format_brl(&account.credit_limit),
    ));
    lines.push(String::new());
    lines.push("[confirmar] Acessar Minha Conta   [fechar] Fechar".to_string());
    lines.join("\n")
}

pub fn render_hub(account: &ProvisionedAccount) -> String {
    let hub = &account.hub;
    let mut lines = heading("MEI-HUB · Área do Cliente");
    lines.push(field("Empresa", &account.company_name));
    lines.push(field("CNPJ", cnpj_label(account)));
    lines.push(field(
        "Capital de giro pré-aprovado",
        format_brl(&account.credit_limit),
    ));

    lines.push(String::new());
    lines.push(field(
        "Última nota emitida",
        format!(
            "{} · {} · {}",
            format_brl(&hub.last_invoice.amount),
            hub.last_invoice.client,
            hub.last_invoice.date.format(DATE_FORMAT)
        ),
    ));
    lines.push(field(
        "A receber",
        format_brl(&hub.pending_receivables),
    ));
    lines.push(field(
        "Plano de saúde",
        format!(
            "{} · {}",
            hub.health_plan.provider,
            if hub.health_plan.active { "Ativo" } else { "Inativo" }
        ),
    ));
    lines.push(field(
        "DAS",
        format!(
            "{} · próximo vencimento {}",
            if hub.das.paid { "Pago" } else { "Em aberto" },
            hub.das.next_due.format(DATE_FORMAT)
        ),
    ));

    lines.push(String::new());
    lines.push(field("Faturamento Mensal", format_brl(&hub.monthly_revenue)));
    lines.push(field(
        "Notas Emitidas",
        format!("{} · Este mês", hub.invoices_this_month),
    ));
    lines.push(field(
        "Status",
        format!("{} · Conta verificada", hub.account_status),
    ));

    lines.push(String::new());
    lines.push("  [credito] Usar Crédito".to_string());
    lines.push("  [nota]    Emissor de Nota Fácil".to_string());
    lines.push("  [pix]     Cobrança Pix no WhatsApp".to_string());
    lines.push("  [voltar]  Nova Análise".to_string());
    lines.join("\n")
}

/// Read-only mock-ups opened from the hub.
pub fn render_hub_overlay(overlay: Overlay, account: &ProvisionedAccount) -> String {
    let mut lines = match overlay {
        Overlay::Credit => {
            let mut lines = heading("Usar Crédito");
            lines.push(field("Disponível", format_brl(&account.credit_limit)));
            lines
        }
        Overlay::Invoice => heading("Emitir NFS-e"),
        Overlay::PixCollection => {
            let mut lines = heading("Cobrar Cliente no WhatsApp");
            lines.push(field(
                "Total a Receber",
                format_brl(&account.hub.pending_receivables),
            ));
            lines
        }
        Overlay::Activation => return render_activation(account),
    };
    lines.push("Demonstração: integração com o backend ainda não disponível.".to_string());
    lines.push("[fechar] Fechar".to_string());
    lines.join("\n")
}

/// Composes the full screen for the controller's current state.
pub fn render(controller: &ViewController, input: &CpfInput) -> String {
    let account = controller.account();

    if let (Screen::Hub, Some(account)) = (controller.screen(), account.as_ref()) {
        let mut out = render_hub(account);
        if let Some(overlay) = controller.overlay() {
            out.push_str("\n\n");
            out.push_str(&render_hub_overlay(overlay, account));
        }
        return out;
    }

    let mut sections = vec![render_search(
        input,
        controller.can_submit(input),
        controller.is_loading(),
    )];

    match controller.state() {
        ViewState::Idle => sections.push(render_welcome()),
        ViewState::Loading => sections.push(render_loading()),
        ViewState::Error(message) => sections.push(render_error(message)),
        ViewState::Success(result) => {
            sections.push(render_dashboard(result));
            if let (Some(Overlay::Activation), Some(account)) =
                (controller.overlay(), account.as_ref())
            {
                sections.push(render_activation(account));
            }
        }
    }

    sections.join("\n\n")
}
