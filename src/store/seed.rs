use chrono::Utc;
use rust_decimal::Decimal;

use super::{Repository, Stores};
use crate::domain::order::{LineItem, Order, OrderStatus};
use crate::domain::product::{Product, ProductDetails};
use crate::domain::user::{Credentials, PersonalDetails, User};

fn details(name: &str, category: &str, description: &str, cost: i64) -> ProductDetails {
    ProductDetails {
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        cost: Decimal::from(cost),
    }
}

fn person(name: &str, surname: &str, email: &str, phone: &str) -> PersonalDetails {
    PersonalDetails {
        name: name.to_string(),
        surname: surname.to_string(),
        email: email.to_string(),
        phone_number: phone.to_string(),
    }
}

/// Demo accounts, catalog and two orders.
///
/// Users: `admin`/`admin` (id 0), `mykytko`/`password` (id 1),
/// `tpouhuk`/`bomjour` (id 2). Order 0 is `New` and belongs to the admin,
/// order 1 is `Sent` and belongs to `mykytko`.
pub fn seed_demo_data(stores: &Stores) {
    let accounts = [
        (
            User::admin(&Credentials::new("admin", "admin")),
            person("James", "Bond", "james@bond.com", "380680000000"),
        ),
        (
            User::register(&Credentials::new("mykytko", "password")),
            person("John", "Jackson", "john@jackson.org", "380681300000"),
        ),
        (
            User::register(&Credentials::new("tpouhuk", "bomjour")),
            person("Oleh", "Odnookyi", "oleh@odnookyi.net", "380761309999"),
        ),
    ];
    let users: Vec<User> = accounts
        .into_iter()
        .map(|(mut user, info)| {
            user.personal_information.replace_with(&info);
            stores.users.add(user)
        })
        .collect();

    let catalog: Vec<Product> = [
        details("Pants", "Clothes", "Cotton", 8),
        details("Skirt", "Clothes", "Synthetic", 11),
        details("Hat", "Clothes", "Linen", 4),
        details("iPhone 14", "Phones", "Shiny", 1100),
        details("Xiaomi Mi 10", "Phones", "White", 700),
    ]
    .iter()
    .map(|entry| stores.products.add(Product::from_details(entry)))
    .collect();

    let line = |index: usize, amount: u32| {
        stores
            .line_items
            .add(LineItem::snapshot(catalog[index].clone(), amount))
    };
    let first_items = vec![line(2, 5)];
    let second_items = vec![line(0, 1), line(1, 3)];

    stores
        .orders
        .add(Order::place(users[0].id, first_items, Utc::now()));

    let mut sent = Order::place(users[1].id, second_items, Utc::now());
    sent.status = OrderStatus::Sent;
    stores.orders.add(sent);

    tracing::debug!(
        users = users.len(),
        products = catalog.len(),
        "Seeded demo data"
    );
}
