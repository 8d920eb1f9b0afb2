// ============================================================================
// Storefront - role-scoped command dispatch over a demo shop
// ============================================================================
//
// Layers, leaf-first:
// - domain:   users, products, orders and their business rules
// - store:    repository traits plus in-memory implementations
// - dispatch: roles, operation registry, dispatch tables, authorization gate,
//             per-session state
// - metrics:  Prometheus counters for dispatch outcomes
// - shell:    line-oriented front end used by the binary
//
// ============================================================================

pub mod app;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod metrics;
pub mod shell;
pub mod store;

pub use app::Storefront;
pub use dispatch::{
    AuthorizationGate, DispatchTable, DispatchTables, Dispatcher, Outcome, Rejection, Request,
    Role, Session, SessionState,
};
