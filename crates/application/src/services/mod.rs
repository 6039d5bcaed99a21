//! Application services - routing, orchestration, and accounting

pub mod chat_service;
pub mod interpreter_service;
pub mod router;
pub mod scenarios;
pub mod usage_logger;

pub use chat_service::{ChatReply, ChatRequest, ChatService};
pub use interpreter_service::{
    InterpretOutcome, InterpretRequest, InterpreterService, UNINTELLIGIBLE_REPLY,
};
pub use router::{ProviderRegistry, ProviderRouter, RouteFailure, RouterConfig};
pub use scenarios::{DEFAULT_SCENARIO_ID, Scenario, ScenarioCatalog};
pub use usage_logger::{
    CharRates, PricingTable, TransactionDraft, UsageLogger, UsageLoggerTask,
};
