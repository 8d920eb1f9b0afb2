use rust_decimal::Decimal;
use std::str::FromStr;

use crate::dispatch::{DispatchTable, Rejection, Request};
use crate::domain::order::{OrderCommand, OrderLine, OrderStatus};
use crate::domain::product::{ProductCommand, ProductDetails};
use crate::domain::user::{Credentials, PersonalDetails, UserCommand};

// ============================================================================
// Line Parser
// ============================================================================
//
// `command arg1 arg2 ...`, with single or double quotes grouping words.
// The command word is looked up in the active table before any argument
// is parsed, so a command outside the caller's role is always reported as
// unknown, whatever its arguments look like.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ShellInput {
    Empty,
    Help,
    Metrics,
    Exit,
    Request(Request),
}

pub fn parse_line(line: &str, table: &DispatchTable) -> Result<ShellInput, Rejection> {
    let tokens = tokenize(line)?;
    let Some((command, args)) = tokens.split_first() else {
        return Ok(ShellInput::Empty);
    };

    match command.as_str() {
        "help" => return Ok(ShellInput::Help),
        "metrics" => return Ok(ShellInput::Metrics),
        "exit" | "quit" => return Ok(ShellInput::Exit),
        _ => {}
    }

    if !table.contains(command) {
        return Err(Rejection::UnknownCommand {
            command: command.clone(),
            role: table.role(),
        });
    }

    parse_request(command, args).map(ShellInput::Request)
}

/// Split on whitespace, keeping quoted runs together.
pub fn tokenize(line: &str) -> Result<Vec<String>, Rejection> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(Rejection::InvalidArgument("Unterminated quote".to_string()));
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

fn parse_request(command: &str, args: &[String]) -> Result<Request, Rejection> {
    let request: Request = match command {
        "login" => {
            let [login, password] = exact::<2>(command, args, "<login> <password>")?;
            UserCommand::Login(Credentials::new(login, password)).into()
        }
        "register" => {
            let [login, password] = exact::<2>(command, args, "<login> <password>")?;
            UserCommand::Register(Credentials::new(login, password)).into()
        }
        "signOut" => {
            let [] = exact::<0>(command, args, "")?;
            UserCommand::SignOut.into()
        }
        "changePersonalInformation" => {
            let [name, surname, email, phone] =
                exact::<4>(command, args, "<name> <surname> <email> <phone>")?;
            UserCommand::ChangePersonalInformation(personal(name, surname, email, phone)).into()
        }
        "changeCredentials" => {
            let [login, password] = exact::<2>(command, args, "<login> <password>")?;
            UserCommand::ChangeCredentials(Credentials::new(login, password)).into()
        }
        "changeUserPersonalInformation" => {
            let [user_id, name, surname, email, phone] =
                exact::<5>(command, args, "<userId> <name> <surname> <email> <phone>")?;
            UserCommand::ChangeUserPersonalInformation {
                user_id: number(user_id, "user id")?,
                details: personal(name, surname, email, phone),
            }
            .into()
        }
        "viewUsersPersonalInformation" => {
            let [] = exact::<0>(command, args, "")?;
            UserCommand::ViewUsersPersonalInformation.into()
        }
        "viewProducts" => {
            let [] = exact::<0>(command, args, "")?;
            ProductCommand::ViewProducts.into()
        }
        "searchProductByName" => {
            let [name] = exact::<1>(command, args, "<name>")?;
            ProductCommand::SearchProductByName {
                name: name.to_string(),
            }
            .into()
        }
        "addNewProduct" => {
            let [name, category, description, cost] =
                exact::<4>(command, args, "<name> <category> <description> <cost>")?;
            ProductCommand::AddNewProduct(product(name, category, description, cost)?).into()
        }
        "changeProductInformation" => {
            let [product_id, name, category, description, cost] = exact::<5>(
                command,
                args,
                "<productId> <name> <category> <description> <cost>",
            )?;
            ProductCommand::ChangeProductInformation {
                product_id: number(product_id, "product id")?,
                details: product(name, category, description, cost)?,
            }
            .into()
        }
        "createOrder" => OrderCommand::CreateOrder {
            lines: args
                .iter()
                .map(|arg| order_line(arg))
                .collect::<Result<_, _>>()?,
        }
        .into(),
        "payOrder" => {
            let [order_id] = exact::<1>(command, args, "<orderId>")?;
            OrderCommand::PayOrder {
                order_id: number(order_id, "order id")?,
            }
            .into()
        }
        "cancelOrder" => {
            let [order_id] = exact::<1>(command, args, "<orderId>")?;
            OrderCommand::CancelOrder {
                order_id: number(order_id, "order id")?,
            }
            .into()
        }
        "setOrderStatusReceived" => {
            let [order_id] = exact::<1>(command, args, "<orderId>")?;
            OrderCommand::SetOrderStatusReceived {
                order_id: number(order_id, "order id")?,
            }
            .into()
        }
        "reviewOrderHistory" => {
            let [] = exact::<0>(command, args, "")?;
            OrderCommand::ReviewOrderHistory.into()
        }
        "changeOrderStatus" => {
            let [order_id, status] = exact::<2>(command, args, "<orderId> <status>")?;
            OrderCommand::ChangeOrderStatus {
                order_id: number(order_id, "order id")?,
                status: OrderStatus::from_str(status).map_err(Rejection::InvalidArgument)?,
            }
            .into()
        }
        other => {
            return Err(Rejection::InvalidArgument(format!(
                "No parser for command '{other}'"
            )))
        }
    };

    Ok(request)
}

fn exact<'a, const N: usize>(
    command: &str,
    args: &'a [String],
    usage: &str,
) -> Result<[&'a str; N], Rejection> {
    let words: Vec<&str> = args.iter().map(String::as_str).collect();
    words.try_into().map_err(|_| {
        Rejection::InvalidArgument(format!("usage: {command} {usage}").trim_end().to_string())
    })
}

fn number<T: FromStr>(raw: &str, what: &str) -> Result<T, Rejection> {
    raw.parse()
        .map_err(|_| Rejection::InvalidArgument(format!("'{raw}' is not a valid {what}")))
}

fn personal(name: &str, surname: &str, email: &str, phone: &str) -> PersonalDetails {
    PersonalDetails {
        name: name.to_string(),
        surname: surname.to_string(),
        email: email.to_string(),
        phone_number: phone.to_string(),
    }
}

fn product(
    name: &str,
    category: &str,
    description: &str,
    cost: &str,
) -> Result<ProductDetails, Rejection> {
    Ok(ProductDetails {
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        cost: Decimal::from_str(cost)
            .map_err(|_| Rejection::InvalidArgument(format!("'{cost}' is not a valid cost")))?,
    })
}

/// `<productId>:<amount>`
fn order_line(raw: &str) -> Result<OrderLine, Rejection> {
    let (product_id, amount) = raw.split_once(':').ok_or_else(|| {
        Rejection::InvalidArgument(format!("'{raw}' is not <productId>:<amount>"))
    })?;

    Ok(OrderLine {
        product_id: number(product_id, "product id")?,
        amount: number(amount, "amount")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Storefront;
    use crate::dispatch::Role;
    use crate::domain::{OrderId, ProductId, UserId};
    use crate::store::Stores;

    fn parse_as(role: Role, line: &str) -> Result<ShellInput, Rejection> {
        let app = Storefront::new(Stores::in_memory()).unwrap();
        parse_line(line, app.dispatcher().tables().table(role))
    }

    #[test]
    fn test_tokenize_quotes() {
        let tokens = tokenize(r#"addNewProduct "Red Hat" 'Hats' "" 12.5"#).unwrap();
        assert_eq!(tokens, vec!["addNewProduct", "Red Hat", "Hats", "", "12.5"]);
        assert!(tokenize("login \"admin").is_err());
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn test_builtins() {
        assert_eq!(parse_as(Role::Guest, "").unwrap(), ShellInput::Empty);
        assert_eq!(parse_as(Role::Guest, "help").unwrap(), ShellInput::Help);
        assert_eq!(parse_as(Role::Admin, "metrics").unwrap(), ShellInput::Metrics);
        assert_eq!(parse_as(Role::RegisteredUser, "exit").unwrap(), ShellInput::Exit);
    }

    #[test]
    fn test_parse_login() {
        let input = parse_as(Role::Guest, "login admin admin").unwrap();
        assert_eq!(
            input,
            ShellInput::Request(UserCommand::Login(Credentials::new("admin", "admin")).into())
        );
    }

    #[test]
    fn test_command_outside_table_is_unknown() {
        let rejection = parse_as(Role::Guest, "payOrder not-a-number").unwrap_err();
        assert_eq!(
            rejection,
            Rejection::UnknownCommand {
                command: "payOrder".to_string(),
                role: Role::Guest
            }
        );
        assert!(matches!(
            parse_as(Role::Admin, "frobnicate").unwrap_err(),
            Rejection::UnknownCommand { .. }
        ));
    }

    #[test]
    fn test_bad_arguments_are_invalid() {
        for line in [
            "payOrder",
            "payOrder x",
            "payOrder 1 2",
            "createOrder 1-2",
            "createOrder 1:many",
        ] {
            assert!(
                matches!(
                    parse_as(Role::RegisteredUser, line).unwrap_err(),
                    Rejection::InvalidArgument(_)
                ),
                "{line}"
            );
        }
        assert!(matches!(
            parse_as(Role::Admin, "changeOrderStatus 1 Lost").unwrap_err(),
            Rejection::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_parse_create_order() {
        let input = parse_as(Role::RegisteredUser, "createOrder 2:5 0:1").unwrap();
        let expected: Request = OrderCommand::CreateOrder {
            lines: vec![
                OrderLine {
                    product_id: ProductId(2),
                    amount: 5,
                },
                OrderLine {
                    product_id: ProductId(0),
                    amount: 1,
                },
            ],
        }
        .into();
        assert_eq!(input, ShellInput::Request(expected));
    }

    #[test]
    fn test_parse_admin_commands() {
        let input = parse_as(Role::Admin, "changeOrderStatus 1 completed").unwrap();
        assert_eq!(
            input,
            ShellInput::Request(
                OrderCommand::ChangeOrderStatus {
                    order_id: OrderId(1),
                    status: OrderStatus::Completed
                }
                .into()
            )
        );

        let input = parse_as(
            Role::Admin,
            "changeUserPersonalInformation 2 Ada Lovelace ada@engine.org +380501234567",
        )
        .unwrap();
        let ShellInput::Request(Request::User(UserCommand::ChangeUserPersonalInformation {
            user_id,
            details,
        })) = input
        else {
            panic!("expected admin profile change");
        };
        assert_eq!(user_id, UserId(2));
        assert_eq!(details.phone_number, "+380501234567");

        let input = parse_as(Role::Admin, "addNewProduct Scarf Clothes 'Warm wool' 12.50").unwrap();
        let ShellInput::Request(Request::Product(ProductCommand::AddNewProduct(details))) = input
        else {
            panic!("expected new product");
        };
        assert_eq!(details.description, "Warm wool");
        assert_eq!(details.cost, Decimal::new(1250, 2));
    }
}
