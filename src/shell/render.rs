use serde_json::{json, Value};

use crate::dispatch::{Outcome, Rejection, SessionChange};
use crate::domain::order::Order;
use crate::domain::product::Product;
use crate::domain::user::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render(format: OutputFormat, result: &Result<Outcome, Rejection>) -> String {
    match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => render_json(result).to_string(),
    }
}

pub fn render_text(result: &Result<Outcome, Rejection>) -> String {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(rejection) => return rejection.to_string(),
    };

    match outcome {
        Outcome::Message(message) => message.clone(),
        Outcome::Refused(error) => error.to_string(),
        Outcome::Product(Some(product)) => product_line(product),
        Outcome::Product(None) => "No product with that name".to_string(),
        Outcome::Products(products) if products.is_empty() => "No products".to_string(),
        Outcome::Products(products) => lines(products.iter().map(product_line)),
        Outcome::Orders(orders) if orders.is_empty() => "No orders".to_string(),
        Outcome::Orders(orders) => lines(orders.iter().map(order_block)),
        Outcome::Profiles(profiles) if profiles.is_empty() => "No registered users".to_string(),
        Outcome::Profiles(profiles) => lines(profiles.iter().map(profile_line)),
        Outcome::Session(SessionChange::SignedIn { role, identity }) => {
            format!("Signed in as {} ({role})", identity.login)
        }
        Outcome::Session(SessionChange::LoginFailed) => "Login failed".to_string(),
        Outcome::Session(SessionChange::SignedOut) => "Signed out".to_string(),
    }
}

pub fn render_json(result: &Result<Outcome, Rejection>) -> Value {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(rejection) => {
            return json!({
                "status": "rejected",
                "reason": rejection.label(),
                "message": rejection.to_string(),
            })
        }
    };

    match outcome {
        Outcome::Message(message) => json!({ "status": "ok", "message": message }),
        Outcome::Refused(error) => json!({
            "status": "refused",
            "kind": error.kind(),
            "message": error.to_string(),
        }),
        Outcome::Product(product) => json!({ "status": "ok", "product": product }),
        Outcome::Products(products) => json!({ "status": "ok", "products": products }),
        Outcome::Orders(orders) => json!({ "status": "ok", "orders": orders }),
        Outcome::Profiles(profiles) => json!({ "status": "ok", "profiles": profiles }),
        Outcome::Session(SessionChange::SignedIn { role, identity }) => json!({
            "status": "ok",
            "session": "signed_in",
            "role": role.as_str(),
            "login": identity.login,
        }),
        Outcome::Session(SessionChange::LoginFailed) => {
            json!({ "status": "ok", "session": "login_failed" })
        }
        Outcome::Session(SessionChange::SignedOut) => {
            json!({ "status": "ok", "session": "signed_out" })
        }
    }
}

fn lines(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join("\n")
}

fn product_line(product: &Product) -> String {
    format!(
        "#{} {} [{}] {} - {}",
        product.id, product.name, product.category, product.description, product.cost
    )
}

fn order_block(order: &Order) -> String {
    let mut block = format!(
        "Order #{} ({}) placed {}",
        order.id,
        order.status,
        order.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    for item in &order.items {
        block.push_str(&format!("\n  {} x {}", item.amount, product_line(&item.product)));
    }
    block
}

fn profile_line(profile: &UserProfile) -> String {
    let info = &profile.personal_information;
    format!(
        "#{} {}: {} {} <{}> {}",
        profile.user_id, profile.login, info.name, info.surname, info.email, info.phone_number
    )
}
