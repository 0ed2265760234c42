// Protected handlers - every route here sits behind the bearer gate and
// receives the resolved caller identity as a request extension.
//
// Each handler is the same fixed pipeline: validate (via ValidJson) ->
// invoke at most one adapter and/or gateway operation -> schedule an
// activity record -> build the success envelope. Any raised condition
// short-circuits into the uniform error envelope.

pub mod activities;
pub mod analytics;
pub mod appointments;
pub mod billing;
pub mod calendar;
pub mod clients;
pub mod invoices;
pub mod messaging;
pub mod payments;
pub mod projects;
pub mod utils;
pub mod voice_agents;
