//! Payment processor adapter.
//!
//! Amounts are handled in major currency units everywhere in this API and
//! converted to the processor's minor units at this boundary. Invoice
//! creation is a two-step call (line item, then header) and the two steps
//! are not transactional: a failure between them leaves an orphaned line
//! item on the processor side.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use super::error::ServiceError;
use super::{expect_status, http_client, transport};
use crate::config::StripeConfig;
use crate::models::{CustomerCreate, PaymentIntentRequest, ProcessorInvoiceRequest};

const SERVICE: &str = "Stripe";
const BASE_URL: &str = "https://api.stripe.com/v1";

#[derive(Debug)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug)]
pub struct CreatedCustomer {
    pub id: String,
    pub data: Value,
}

#[derive(Debug)]
pub struct CreatedInvoice {
    pub id: String,
    pub data: Value,
}

pub struct StripeService {
    config: StripeConfig,
    base_url: String,
    timeout: Duration,
}

impl StripeService {
    pub fn new(config: StripeConfig, timeout: Duration) -> Self {
        Self {
            config,
            base_url: BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled()
    }

    fn secret_key(&self) -> Result<&str, ServiceError> {
        self.config
            .secret_key
            .as_deref()
            .ok_or(ServiceError::NotConfigured(SERVICE))
    }

    async fn post_form(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<Value, ServiceError> {
        let key = self.secret_key()?;

        let res = http_client(SERVICE, self.timeout)?
            .post(format!("{}/{}", self.base_url, path))
            .bearer_auth(key)
            .form(form)
            .send()
            .await
            .map_err(transport(SERVICE))?;

        expect_status(SERVICE, res, StatusCode::OK).await
    }

    pub async fn create_payment_intent(
        &self,
        req: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ServiceError> {
        let mut form = vec![
            ("amount".to_string(), to_minor_units(req.amount).to_string()),
            ("currency".to_string(), req.currency.clone()),
        ];
        if let Some(customer) = &req.customer_id {
            form.push(("customer".to_string(), customer.clone()));
        }
        if let Some(metadata) = &req.metadata {
            for (key, value) in metadata {
                form.push((format!("metadata[{}]", key), value.clone()));
            }
        }

        let data = self.post_form("payment_intents", &form).await?;
        Ok(PaymentIntent {
            id: string_field(&data, "id"),
            client_secret: string_field(&data, "client_secret"),
        })
    }

    pub async fn create_customer(
        &self,
        req: &CustomerCreate,
    ) -> Result<CreatedCustomer, ServiceError> {
        let mut form = vec![("email".to_string(), req.email.clone())];
        if let Some(name) = &req.name {
            form.push(("name".to_string(), name.clone()));
        }
        if let Some(phone) = &req.phone {
            form.push(("phone".to_string(), phone.clone()));
        }

        let data = self.post_form("customers", &form).await?;
        Ok(CreatedCustomer {
            id: string_field(&data, "id"),
            data,
        })
    }

    /// Two calls: line item, then invoice header. Not transactional.
    pub async fn create_invoice(
        &self,
        req: &ProcessorInvoiceRequest,
    ) -> Result<CreatedInvoice, ServiceError> {
        let item_form = vec![
            ("customer".to_string(), req.customer_id.clone()),
            ("amount".to_string(), to_minor_units(req.amount).to_string()),
            ("currency".to_string(), "usd".to_string()),
            ("description".to_string(), req.description.clone()),
        ];
        self.post_form("invoiceitems", &item_form).await?;

        let mut invoice_form = vec![
            ("customer".to_string(), req.customer_id.clone()),
            ("auto_advance".to_string(), "true".to_string()),
        ];
        if let Some(due_date) = &req.due_date {
            invoice_form.push(("due_date".to_string(), due_date.timestamp().to_string()));
        }

        let data = self.post_form("invoices", &invoice_form).await?;
        Ok(CreatedInvoice {
            id: string_field(&data, "id"),
            data,
        })
    }
}

/// Major currency units to the processor's integer minor units.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn string_field(data: &Value, field: &str) -> String {
    data.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn disabled() -> StripeService {
        StripeService::new(StripeConfig { secret_key: None }, Duration::from_secs(5))
    }

    #[test]
    fn minor_unit_conversion_rounds() {
        assert_eq!(to_minor_units(49.99), 4999);
        assert_eq!(to_minor_units(0.1), 10);
        assert_eq!(to_minor_units(10.005), 1001);
        assert_eq!(to_minor_units(1200.0), 120000);
    }

    #[tokio::test]
    async fn intent_fails_fast_when_disabled() {
        let req: PaymentIntentRequest =
            serde_json::from_value(json!({ "amount": 25.0 })).expect("deserialize");
        let err = disabled().create_payment_intent(&req).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotConfigured("Stripe")));
    }

    #[tokio::test]
    async fn invoice_fails_fast_when_disabled() {
        let req: ProcessorInvoiceRequest = serde_json::from_value(json!({
            "customer_id": "cus_123",
            "amount": 100.0,
            "description": "June retainer"
        }))
        .expect("deserialize");
        let err = disabled().create_invoice(&req).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotConfigured("Stripe")));
    }
}
