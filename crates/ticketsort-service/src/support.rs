//! `HELP_AND_SUPPORT`: recommend a ticket category for a support request.

use async_trait::async_trait;
use serde_json::{Value, json};
use ticketsort_ai::CategoryResolver;
use ticketsort_core::{Envelope, HelpAndSupportData};
use tracing::{debug, error, warn};

use crate::handler::ServiceHandler;

pub const SUCCESS_MESSAGE: &str = "Ticket Category Recommended Successfully";
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: description or options";

pub struct HelpAndSupportHandler {
    resolver: CategoryResolver,
}

impl HelpAndSupportHandler {
    pub fn new(resolver: CategoryResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ServiceHandler for HelpAndSupportHandler {
    async fn handle(&self, data: Value) -> Envelope {
        let payload = match HelpAndSupportData::from_value(data) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "rejecting malformed help-and-support data");
                return Envelope::bad_request(format!("Invalid request data: {e}"));
            }
        };

        let Some(request) = payload.validate() else {
            return Envelope::bad_request(MISSING_FIELDS_MESSAGE);
        };
        debug!(
            membership_type = %request.membership_type.as_ref().unwrap_or(&serde_json::Value::Null),
            options = request.categories.len(),
            "classifying ticket"
        );

        match self
            .resolver
            .resolve(&request.description, &request.categories)
            .await
        {
            Ok(category) => Envelope::ok(
                SUCCESS_MESSAGE,
                json!({
                    "option": [
                        { "id": category.id, "value": category.label }
                    ]
                }),
            ),
            Err(e) => {
                error!(error = %e, "ticket classification failed");
                Envelope::internal_error(format!("Failed to classify ticket: {e}"))
            }
        }
    }
}
