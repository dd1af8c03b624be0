use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use vms_core::ports::InvestmentPort;
use vms_core::{InvestmentForm, InvestorId, Locale, ValidationError};

const STATUS_OK: u16 = 200;

#[derive(Debug, thiserror::Error)]
pub enum InvestmentError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// `message` is user-facing and already localized.
    #[error("{message}")]
    SubmissionFailed {
        message: String,
        status: Option<u16>,
    },
}

/// Why a submission did not go through, before localization.
#[derive(Debug, Clone, Copy)]
enum FailureKind {
    Rejected,
    Transport,
}

fn failure_message(locale: Locale, kind: FailureKind) -> &'static str {
    match (locale, kind) {
        (Locale::Ko, FailureKind::Rejected) => "수정 요청이 실패했습니다.",
        (Locale::Ko, FailureKind::Transport) => "투자 수정 중 오류가 발생했습니다.",
        (Locale::En, FailureKind::Rejected) => "The update request failed.",
        (Locale::En, FailureKind::Transport) => {
            "An error occurred while updating the investment."
        }
    }
}

/// Validate an investment form and submit it. Not retried.
pub struct SubmitInvestment {
    port: Arc<dyn InvestmentPort>,
    locale: Locale,
}

impl SubmitInvestment {
    pub fn new(port: Arc<dyn InvestmentPort>, locale: Locale) -> Self {
        Self { port, locale }
    }

    pub async fn execute(
        &self,
        investor: InvestorId,
        form: InvestmentForm,
    ) -> Result<(), InvestmentError> {
        let span = info_span!("usecase.submit_investment.execute", investor = %investor);
        async {
            let record = form.validate()?;
            match self.port.submit_investment(investor, &record).await {
                Ok(STATUS_OK) => {
                    info!(amount = record.invest_amount, "investment submitted");
                    Ok(())
                }
                Ok(status) => {
                    warn!(status, "investment submission rejected");
                    Err(InvestmentError::SubmissionFailed {
                        message: failure_message(self.locale, FailureKind::Rejected).to_string(),
                        status: Some(status),
                    })
                }
                Err(err) => {
                    warn!(error = %err, "investment submission failed");
                    Err(InvestmentError::SubmissionFailed {
                        message: failure_message(self.locale, FailureKind::Transport).to_string(),
                        status: None,
                    })
                }
            }
        }
        .instrument(span)
        .await
    }
}
