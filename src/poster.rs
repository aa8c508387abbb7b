use std::time::Duration;

use crate::logger::RunLogger;
use crate::model::error::PipelineError;
use crate::model::invoice::Invoice;
use crate::model::outcome::PostOutcome;

const POST_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote submission capability, selected once at configuration time.
/// `Disabled` keeps the pipeline interface identical while guaranteeing no
/// network call is made.
pub enum Poster {
    Http {
        client: reqwest::blocking::Client,
        endpoint: String,
    },
    Disabled,
}

impl Poster {
    pub fn http(endpoint: &str) -> Result<Self, PipelineError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(POST_TIMEOUT)
            .build()?;
        Ok(Poster::Http {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn disabled() -> Self {
        Poster::Disabled
    }

    /// One synchronous POST of the invoice's serialized form. Transport
    /// errors and non-2xx responses are captured in the outcome; the run
    /// always continues. No retry.
    pub fn post(&self, invoice: &Invoice, logger: &RunLogger) -> PostOutcome {
        let (client, endpoint) = match self {
            Poster::Disabled => return PostOutcome::Skipped,
            Poster::Http { client, endpoint } => (client, endpoint),
        };

        match client.post(endpoint).json(invoice).send() {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    logger.info(&format!(
                        "posted invoice {}: status {}",
                        invoice.display_id(),
                        status.as_u16()
                    ));
                    PostOutcome::Success(status.as_u16())
                } else {
                    logger.warn(&format!(
                        "post rejected for invoice {}: status {}",
                        invoice.display_id(),
                        status.as_u16()
                    ));
                    PostOutcome::Failed(format!("status {}", status.as_u16()))
                }
            }
            Err(err) => {
                logger.warn(&format!(
                    "post failed for invoice {}: {}",
                    invoice.display_id(),
                    err
                ));
                PostOutcome::Failed(err.to_string())
            }
        }
    }
}
