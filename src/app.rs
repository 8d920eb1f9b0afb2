use std::sync::Arc;

use crate::dispatch::{AuthorizationGate, DispatchTables, Dispatcher, OperationProvider, Session};
use crate::domain::order::OrderCommandHandler;
use crate::domain::product::ProductCommandHandler;
use crate::domain::user::UserCommandHandler;
use crate::metrics::Metrics;
use crate::store::Stores;

// ============================================================================
// Storefront - wiring
// ============================================================================
//
// Registers every operation provider, builds the three dispatch tables once,
// and hands out sessions that share the dispatcher and metrics registry.
// A malformed registry aborts startup.
//
// ============================================================================

pub struct Storefront {
    stores: Stores,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<Metrics>,
}

impl Storefront {
    pub fn new(stores: Stores) -> anyhow::Result<Self> {
        let gate = AuthorizationGate::new(stores.users.clone());

        let providers: Vec<Arc<dyn OperationProvider>> = vec![
            Arc::new(UserCommandHandler::new(stores.clone(), gate.clone())),
            Arc::new(ProductCommandHandler::new(stores.clone())),
            Arc::new(OrderCommandHandler::new(stores.clone())),
        ];
        let tables = DispatchTables::build(providers)?;

        let metrics = Arc::new(Metrics::new()?);
        tracing::debug!(
            metric_families = metrics.registry().gather().len(),
            "Metrics registry created"
        );

        Ok(Self {
            stores,
            dispatcher: Arc::new(Dispatcher::new(tables, gate)),
            metrics,
        })
    }

    /// Fresh unauthenticated session.
    pub fn session(&self) -> Session {
        Session::new(self.dispatcher.clone(), self.metrics.clone())
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{Outcome, Rejection, Request, Role, SessionState};
    use crate::domain::order::{OrderCommand, OrderLine, OrderStatus, ORDER_OPERATIONS};
    use crate::domain::product::{ProductCommand, PRODUCT_OPERATIONS};
    use crate::domain::user::{Credentials, UserCommand, USER_OPERATIONS};
    use crate::domain::{OrderId, ProductId};
    use crate::store::{Repository, UserRepository};
    use proptest::prelude::*;

    fn storefront() -> Storefront {
        Storefront::new(Stores::seeded()).unwrap()
    }

    fn login(session: &mut Session, login: &str, password: &str) -> Outcome {
        session
            .dispatch(UserCommand::Login(Credentials::new(login, password)).into())
            .unwrap()
    }

    fn one_hat() -> Request {
        OrderCommand::CreateOrder {
            lines: vec![OrderLine {
                product_id: ProductId(2),
                amount: 1,
            }],
        }
        .into()
    }

    #[test]
    fn test_tables_follow_declared_roles() {
        let app = storefront();
        let tables = app.dispatcher().tables();

        for spec in USER_OPERATIONS
            .iter()
            .chain(PRODUCT_OPERATIONS)
            .chain(ORDER_OPERATIONS)
        {
            for role in Role::ALL {
                assert_eq!(
                    tables.table(role).contains(spec.command),
                    spec.roles.contains(&role),
                    "{} in {} table",
                    spec.command,
                    role
                );
            }
        }

        assert_eq!(tables.guest().len(), 4);
        assert_eq!(tables.user().len(), 10);
        assert_eq!(tables.admin().len(), 10);
    }

    #[test]
    fn test_new_session_is_guest() {
        let app = storefront();
        let session = app.session();
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert_eq!(session.active_table().role(), Role::Guest);
    }

    #[test]
    fn test_login_switches_table_and_sign_out_resets() {
        let app = storefront();
        let mut session = app.session();

        login(&mut session, "admin", "admin");
        assert_eq!(session.role(), Role::Admin);
        assert!(session.active_table().contains("changeOrderStatus"));

        let outcome = session.dispatch(UserCommand::SignOut.into()).unwrap();
        assert!(matches!(outcome, Outcome::Session(_)));
        assert_eq!(session.state(), &SessionState::Unauthenticated);

        let rejection = session.dispatch(one_hat()).unwrap_err();
        assert_eq!(
            rejection,
            Rejection::UnknownCommand {
                command: "createOrder".to_string(),
                role: Role::Guest
            }
        );
    }

    #[test]
    fn test_failed_login_keeps_guest_table() {
        let app = storefront();
        let mut session = app.session();

        login(&mut session, "admin", "nope");
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert_eq!(
            app.metrics().logins_total.with_label_values(&["failure"]).get(),
            1
        );
    }

    #[test]
    fn test_role_scoped_commands_are_unknown_elsewhere() {
        let app = storefront();
        let mut session = app.session();
        login(&mut session, "mykytko", "password");

        let rejection = session
            .dispatch(
                OrderCommand::ChangeOrderStatus {
                    order_id: OrderId(1),
                    status: OrderStatus::Completed,
                }
                .into(),
            )
            .unwrap_err();
        assert!(matches!(rejection, Rejection::UnknownCommand { role: Role::RegisteredUser, .. }));

        let rejection = session
            .dispatch(UserCommand::Login(Credentials::new("admin", "admin")).into())
            .unwrap_err();
        assert!(matches!(rejection, Rejection::UnknownCommand { .. }));
    }

    #[test]
    fn test_credential_change_invalidates_cached_identity() {
        let app = storefront();
        let mut session = app.session();
        login(&mut session, "mykytko", "password");

        let outcome = session
            .dispatch(UserCommand::ChangeCredentials(Credentials::new("mykytko", "fresh")).into())
            .unwrap();
        assert_eq!(outcome, Outcome::message("Credentials have been successfully changed"));

        let rejection = session.dispatch(one_hat()).unwrap_err();
        assert_eq!(
            rejection,
            Rejection::AuthorizationDenied {
                command: "createOrder".to_string()
            }
        );
        assert_eq!(
            app.metrics()
                .authorization_denied
                .with_label_values(&["createOrder"])
                .get(),
            1
        );

        // Open operations stay reachable, so the caller can still sign out.
        session.dispatch(UserCommand::SignOut.into()).unwrap();
        login(&mut session, "mykytko", "fresh");
        assert!(session.dispatch(one_hat()).is_ok());
    }

    #[test]
    fn test_validation_runs_before_the_gate() {
        let app = storefront();
        let mut session = app.session();
        login(&mut session, "mykytko", "password");

        let mut user = app.stores().users.get_by_login("mykytko").unwrap();
        user.password = "rotated elsewhere".to_string();
        app.stores().users.update(user);

        let rejection = session
            .dispatch(OrderCommand::CreateOrder { lines: vec![] }.into())
            .unwrap_err();
        assert!(matches!(rejection, Rejection::InvalidArgument(_)));
    }

    #[test]
    fn test_unknown_command_wins_over_bad_arguments() {
        let app = storefront();
        let mut session = app.session();

        let rejection = session
            .dispatch(OrderCommand::CreateOrder { lines: vec![] }.into())
            .unwrap_err();
        assert!(matches!(rejection, Rejection::UnknownCommand { .. }));
    }

    #[test]
    fn test_customer_pays_sent_order() {
        let app = storefront();
        let mut session = app.session();
        login(&mut session, "mykytko", "password");

        let outcome = session
            .dispatch(OrderCommand::PayOrder { order_id: OrderId(1) }.into())
            .unwrap();
        assert_eq!(outcome, Outcome::message("Payment received"));
        assert_eq!(
            app.stores().orders.get_by_id(OrderId(1)).unwrap().status,
            OrderStatus::PaymentReceived
        );
        assert_eq!(
            app.metrics()
                .dispatch_total
                .with_label_values(&["payOrder", "ok"])
                .get(),
            1
        );
    }

    #[test]
    fn test_guest_browses_catalog() {
        let app = storefront();
        let mut session = app.session();

        let outcome = session.dispatch(ProductCommand::ViewProducts.into()).unwrap();
        assert!(matches!(outcome, Outcome::Products(ref products) if products.len() == 5));
    }

    #[test]
    fn test_deleted_account_loses_gated_access() {
        let app = storefront();
        let mut session = app.session();
        login(&mut session, "tpouhuk", "bomjour");

        let user = app.stores().users.get_by_login("tpouhuk").unwrap();
        app.stores().users.remove_by_id(user.id);

        let rejection = session
            .dispatch(OrderCommand::ReviewOrderHistory.into())
            .unwrap_err();
        assert!(matches!(rejection, Rejection::AuthorizationDenied { .. }));
    }

    proptest! {
        #[test]
        fn prop_unseeded_credentials_never_sign_in(
            login_name in "[a-z]{1,12}",
            password in "[a-z0-9]{1,12}",
        ) {
            let seeded = [("admin", "admin"), ("mykytko", "password"), ("tpouhuk", "bomjour")];
            prop_assume!(!seeded.contains(&(login_name.as_str(), password.as_str())));

            let app = storefront();
            let mut session = app.session();
            login(&mut session, &login_name, &password);

            prop_assert_eq!(session.role(), Role::Guest);
            prop_assert!(session.identity().is_none());
        }
    }
}
