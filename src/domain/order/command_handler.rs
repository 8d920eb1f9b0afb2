use chrono::Utc;
use std::sync::Arc;

use super::aggregate::Order;
use super::commands::OrderCommand;
use super::errors::OrderError;
use super::value_objects::{LineItem, OrderLine, OrderStatus};
use crate::dispatch::roles::{ADMINS, CUSTOMERS};
use crate::dispatch::{
    bind_operations, BusinessError, Caller, OperationDescriptor, OperationProvider,
    OperationSpec, Outcome, Rejection, Request,
};
use crate::domain::user::{User, UserError};
use crate::domain::OrderId;
use crate::store::{OrderRepository, Repository, Stores, UserRepository};

// ============================================================================
// Order Command Handler
// ============================================================================
//
// Customer operations (create, pay, cancel, receive, history) and the
// administrator status change. Only `changeOrderStatus` consults the
// transition graph; pay/receive/cancel apply their fixed transitions.
//
// ============================================================================

pub const ORDER_OPERATIONS: &[OperationSpec] = &[
    OperationSpec::gated("createOrder", CUSTOMERS),
    OperationSpec::gated("payOrder", CUSTOMERS),
    OperationSpec::gated("cancelOrder", CUSTOMERS),
    OperationSpec::gated("reviewOrderHistory", CUSTOMERS),
    OperationSpec::gated("setOrderStatusReceived", CUSTOMERS),
    OperationSpec::gated("changeOrderStatus", ADMINS),
];

pub struct OrderCommandHandler {
    stores: Stores,
}

impl OrderCommandHandler {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    fn route(&self, caller: Caller<'_>, request: Request) -> Result<Outcome, Rejection> {
        let command = match request {
            Request::Order(command) => command,
            other => {
                return Err(Rejection::InvalidArgument(format!(
                    "'{}' is not an order command",
                    other.command_name()
                )))
            }
        };

        let outcome = match command {
            OrderCommand::CreateOrder { lines } => self.create_order(caller, &lines).into(),
            OrderCommand::PayOrder { order_id } => self
                .update_owned(caller, order_id, |order| {
                    order.record_payment();
                    Ok("Payment received")
                })
                .into(),
            OrderCommand::CancelOrder { order_id } => self
                .update_owned(caller, order_id, |order| {
                    order.cancel_by_owner()?;
                    Ok("The order has been successfully canceled")
                })
                .into(),
            OrderCommand::SetOrderStatusReceived { order_id } => self
                .update_owned(caller, order_id, |order| {
                    order.mark_received();
                    Ok("Order status successfully set to Received")
                })
                .into(),
            OrderCommand::ReviewOrderHistory => match self.order_history(caller) {
                Ok(orders) => Outcome::Orders(orders),
                Err(error) => Outcome::refused(error),
            },
            OrderCommand::ChangeOrderStatus { order_id, status } => {
                self.change_order_status(order_id, status).into()
            }
        };

        Ok(outcome)
    }

    fn current_user(&self, caller: Caller<'_>) -> Result<User, UserError> {
        caller
            .and_then(|credentials| self.stores.users.get_by_login(&credentials.login))
            .ok_or(UserError::CallerMissing)
    }

    fn create_order(&self, caller: Caller<'_>, lines: &[OrderLine]) -> Result<String, BusinessError> {
        let customer = self.current_user(caller)?;

        // Resolve every product before writing anything.
        let products = lines
            .iter()
            .map(|line| {
                self.stores
                    .products
                    .get_by_id(line.product_id)
                    .map(|product| (product, line.amount))
                    .ok_or(OrderError::ProductNotFound(line.product_id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let items = products
            .into_iter()
            .map(|(product, amount)| self.stores.line_items.add(LineItem::snapshot(product, amount)))
            .collect();

        let order = self
            .stores
            .orders
            .add(Order::place(customer.id, items, Utc::now()));
        tracing::info!(
            order_id = %order.id,
            customer_id = %customer.id,
            item_count = order.items.len(),
            "Order created"
        );

        Ok("Order created successfully".to_string())
    }

    /// Load an order the caller owns, apply `change`, and store it.
    fn update_owned<F>(
        &self,
        caller: Caller<'_>,
        order_id: OrderId,
        change: F,
    ) -> Result<String, BusinessError>
    where
        F: FnOnce(&mut Order) -> Result<&'static str, OrderError>,
    {
        let customer = self.current_user(caller)?;
        let mut order = self
            .stores
            .orders
            .get_by_id(order_id)
            .ok_or(OrderError::NotFound(order_id))?;

        if !order.is_owned_by(customer.id) {
            return Err(OrderError::NotOwner(order_id).into());
        }

        let previous = order.status;
        let message = change(&mut order)?;
        let status = order.status;
        if !self.stores.orders.update(order) {
            return Err(OrderError::NotFound(order_id).into());
        }
        tracing::info!(%order_id, from = %previous, to = %status, "Order status set");

        Ok(message.to_string())
    }

    /// Caller's orders, newest first.
    fn order_history(&self, caller: Caller<'_>) -> Result<Vec<Order>, UserError> {
        let customer = self.current_user(caller)?;
        let mut orders = self.stores.orders.get_by_customer_id(customer.id);
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    fn change_order_status(&self, order_id: OrderId, status: OrderStatus) -> Result<String, OrderError> {
        let mut order = self
            .stores
            .orders
            .get_by_id(order_id)
            .ok_or(OrderError::NotFound(order_id))?;

        let previous = order.status;
        if let Err(error) = order.change_status(status) {
            tracing::warn!(%order_id, from = %previous, to = %status, "Illegal status change");
            return Err(error);
        }
        if !self.stores.orders.update(order) {
            return Err(OrderError::NotFound(order_id));
        }
        tracing::info!(%order_id, from = %previous, to = %status, "Order status changed by admin");

        Ok("The order status has been changed".to_string())
    }
}

impl OperationProvider for OrderCommandHandler {
    fn provider_name(&self) -> &'static str {
        "orders"
    }

    fn operations(self: Arc<Self>) -> Vec<OperationDescriptor> {
        bind_operations(self, ORDER_OPERATIONS, Self::route)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Credentials;
    use crate::domain::{ProductId, UserId};
    use crate::store::Update;

    /// Loses every order it is asked to write.
    struct VanishingOrders(Arc<dyn OrderRepository>);

    impl Repository<Order> for VanishingOrders {
        fn get_by_id(&self, id: OrderId) -> Option<Order> {
            self.0.get_by_id(id)
        }
        fn get_all(&self) -> Vec<Order> {
            self.0.get_all()
        }
        fn add(&self, item: Order) -> Order {
            self.0.add(item)
        }
        fn update(&self, item: Order) -> bool {
            self.0.remove_by_id(item.id);
            false
        }
        fn remove_by_id(&self, id: OrderId) -> Option<Order> {
            self.0.remove_by_id(id)
        }
        fn add_unless(&self, item: Order, conflicts: &dyn Fn(&Order) -> bool) -> Option<Order> {
            self.0.add_unless(item, conflicts)
        }
        fn update_unless(&self, item: Order, _conflicts: &dyn Fn(&Order) -> bool) -> Update {
            self.0.remove_by_id(item.id);
            Update::Missing
        }
    }

    impl OrderRepository for VanishingOrders {
        fn get_by_customer_id(&self, customer_id: UserId) -> Vec<Order> {
            self.0.get_by_customer_id(customer_id)
        }
    }

    fn setup() -> (Stores, OrderCommandHandler) {
        let stores = Stores::seeded();
        (stores.clone(), OrderCommandHandler::new(stores))
    }

    fn mykytko() -> Credentials {
        Credentials::new("mykytko", "password")
    }

    fn run(handler: &OrderCommandHandler, caller: &Credentials, command: OrderCommand) -> Outcome {
        handler.route(Some(caller), Request::Order(command)).unwrap()
    }

    fn status_of(stores: &Stores, order_id: u64) -> OrderStatus {
        stores.orders.get_by_id(OrderId(order_id)).unwrap().status
    }

    #[test]
    fn test_create_order_snapshots_products() {
        let (stores, handler) = setup();
        let lines = vec![
            OrderLine {
                product_id: ProductId(3),
                amount: 1,
            },
            OrderLine {
                product_id: ProductId(4),
                amount: 2,
            },
        ];

        let outcome = run(&handler, &mykytko(), OrderCommand::CreateOrder { lines });
        assert_eq!(outcome, Outcome::message("Order created successfully"));

        let orders = stores.orders.get_by_customer_id(UserId(1));
        let created = orders.iter().find(|o| o.status == OrderStatus::New).unwrap();
        assert_eq!(created.items.len(), 2);
        assert_eq!(created.items[0].product.name, "iPhone 14");
        assert_eq!(created.items[1].amount, 2);
        assert_eq!(stores.line_items.get_all().len(), 5);
    }

    #[test]
    fn test_create_order_with_unknown_product_writes_nothing() {
        let (stores, handler) = setup();
        let lines = vec![
            OrderLine {
                product_id: ProductId(0),
                amount: 1,
            },
            OrderLine {
                product_id: ProductId(99),
                amount: 1,
            },
        ];

        let outcome = run(&handler, &mykytko(), OrderCommand::CreateOrder { lines });
        assert_eq!(outcome, Outcome::refused(OrderError::ProductNotFound(ProductId(99))));
        assert_eq!(stores.orders.get_all().len(), 2);
        assert_eq!(stores.line_items.get_all().len(), 3);
    }

    #[test]
    fn test_pay_sent_order_ignores_transition_graph() {
        let (stores, handler) = setup();
        assert_eq!(status_of(&stores, 1), OrderStatus::Sent);

        let outcome = run(&handler, &mykytko(), OrderCommand::PayOrder { order_id: OrderId(1) });
        assert_eq!(outcome, Outcome::message("Payment received"));
        assert_eq!(status_of(&stores, 1), OrderStatus::PaymentReceived);
    }

    #[test]
    fn test_pay_missing_order() {
        let (_, handler) = setup();
        let outcome = run(&handler, &mykytko(), OrderCommand::PayOrder { order_id: OrderId(9) });
        assert_eq!(outcome, Outcome::refused(OrderError::NotFound(OrderId(9))));
    }

    #[test]
    fn test_cancel_someone_elses_order() {
        let (stores, handler) = setup();
        let outcome = run(&handler, &mykytko(), OrderCommand::CancelOrder { order_id: OrderId(0) });
        assert_eq!(outcome, Outcome::refused(OrderError::NotOwner(OrderId(0))));
        assert_eq!(status_of(&stores, 0), OrderStatus::New);
    }

    #[test]
    fn test_cancel_received_then_new() {
        let (stores, handler) = setup();

        run(
            &handler,
            &mykytko(),
            OrderCommand::SetOrderStatusReceived { order_id: OrderId(1) },
        );
        let outcome = run(&handler, &mykytko(), OrderCommand::CancelOrder { order_id: OrderId(1) });
        assert_eq!(
            outcome,
            Outcome::refused(OrderError::AlreadyReceived(OrderStatus::Received))
        );
        assert_eq!(status_of(&stores, 1), OrderStatus::Received);

        run(
            &handler,
            &mykytko(),
            OrderCommand::CreateOrder {
                lines: vec![OrderLine {
                    product_id: ProductId(2),
                    amount: 1,
                }],
            },
        );
        let outcome = run(&handler, &mykytko(), OrderCommand::CancelOrder { order_id: OrderId(2) });
        assert_eq!(outcome, Outcome::message("The order has been successfully canceled"));
        assert_eq!(status_of(&stores, 2), OrderStatus::CanceledByUser);
    }

    #[test]
    fn test_set_received() {
        let (stores, handler) = setup();
        let outcome = run(
            &handler,
            &mykytko(),
            OrderCommand::SetOrderStatusReceived { order_id: OrderId(1) },
        );
        assert_eq!(outcome, Outcome::message("Order status successfully set to Received"));
        assert_eq!(status_of(&stores, 1), OrderStatus::Received);
    }

    #[test]
    fn test_history_is_newest_first() {
        let (_, handler) = setup();
        for product in [0, 1] {
            run(
                &handler,
                &mykytko(),
                OrderCommand::CreateOrder {
                    lines: vec![OrderLine {
                        product_id: ProductId(product),
                        amount: 1,
                    }],
                },
            );
        }

        let Outcome::Orders(orders) = run(&handler, &mykytko(), OrderCommand::ReviewOrderHistory)
        else {
            panic!("expected orders");
        };
        let ids: Vec<_> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![OrderId(3), OrderId(2), OrderId(1)]);
        assert!(orders.iter().all(|o| o.customer_id == UserId(1)));
    }

    #[test]
    fn test_admin_status_change_follows_graph() {
        let (stores, handler) = setup();
        let admin = Credentials::new("admin", "admin");

        let outcome = run(
            &handler,
            &admin,
            OrderCommand::ChangeOrderStatus {
                order_id: OrderId(0),
                status: OrderStatus::PaymentReceived,
            },
        );
        assert_eq!(
            outcome,
            Outcome::refused(OrderError::IllegalTransition {
                from: OrderStatus::New,
                to: OrderStatus::PaymentReceived
            })
        );
        assert_eq!(status_of(&stores, 0), OrderStatus::New);

        let outcome = run(
            &handler,
            &admin,
            OrderCommand::ChangeOrderStatus {
                order_id: OrderId(0),
                status: OrderStatus::Sent,
            },
        );
        assert_eq!(outcome, Outcome::message("The order status has been changed"));
        assert_eq!(status_of(&stores, 0), OrderStatus::Sent);
    }

    #[test]
    fn test_admin_completed_order() {
        let (stores, handler) = setup();
        let admin = Credentials::new("admin", "admin");
        let mut order = stores.orders.get_by_id(OrderId(1)).unwrap();
        order.status = OrderStatus::Completed;
        stores.orders.update(order);

        let to_sent = run(
            &handler,
            &admin,
            OrderCommand::ChangeOrderStatus {
                order_id: OrderId(1),
                status: OrderStatus::Sent,
            },
        );
        assert!(matches!(
            to_sent,
            Outcome::Refused(BusinessError::Order(OrderError::IllegalTransition { .. }))
        ));

        let idempotent = run(
            &handler,
            &admin,
            OrderCommand::ChangeOrderStatus {
                order_id: OrderId(1),
                status: OrderStatus::Completed,
            },
        );
        assert_eq!(idempotent, Outcome::message("The order status has been changed"));
        assert_eq!(status_of(&stores, 1), OrderStatus::Completed);
    }

    #[test]
    fn test_lost_order_writes_report_not_found() {
        let mut stores = Stores::seeded();
        stores.orders = Arc::new(VanishingOrders(stores.orders.clone()));
        let handler = OrderCommandHandler::new(stores.clone());

        let outcome = run(&handler, &mykytko(), OrderCommand::PayOrder { order_id: OrderId(1) });
        assert_eq!(outcome, Outcome::refused(OrderError::NotFound(OrderId(1))));

        let outcome = run(
            &handler,
            &Credentials::new("admin", "admin"),
            OrderCommand::ChangeOrderStatus {
                order_id: OrderId(0),
                status: OrderStatus::Sent,
            },
        );
        assert_eq!(outcome, Outcome::refused(OrderError::NotFound(OrderId(0))));
        assert!(stores.orders.get_all().is_empty());
    }
}
