// Request bodies for every route, with their field constraints.

pub mod analytics;
pub mod appointment;
pub mod billing;
pub mod calendar;
pub mod client;
pub mod invoice;
pub mod messaging;
pub mod payment;
pub mod project;
pub mod voice_agent;

pub use analytics::AnalyticsRequest;
pub use appointment::AppointmentCreate;
pub use billing::{CustomerCreate, PaymentIntentRequest, ProcessorInvoiceRequest};
pub use calendar::CalendarCallback;
pub use client::ClientCreate;
pub use invoice::InvoiceCreate;
pub use messaging::SmsSendRequest;
pub use payment::PaymentCreate;
pub use project::ProjectCreate;
pub use voice_agent::{CallRequest, VoiceAgentCreate, VoiceAgentUpdate};
