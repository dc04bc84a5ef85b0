use anyhow::Result;
use chrono::NaiveDate;
use httpmock::prelude::*;
use scoop_fund::config::load_site_config;
use scoop_fund::domain::ports::OrderStore;
use scoop_fund::{
    Cart, FundError, FundraisingProgress, Money, Newsletter, OrderDesk, OrderForm, RestStore,
    SignupForm,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn site_config(server: &MockServer) -> scoop_fund::SiteConfig {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[store]
url = "{}"
key = "anon-key"

[fundraiser]
name = "Test Social"
goal = 100

[[menu]]
name = "Vanilla Cone"
price = 3.50

[[menu]]
name = "Sundae"
price = 5.00
"#,
        server.base_url()
    )
    .unwrap();

    load_site_config(file.path(), None, None).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
}

fn order_form() -> OrderForm {
    OrderForm {
        name: "Pat Doe".to_string(),
        email: "pat@example.org".to_string(),
        phone: "555-123-4567".to_string(),
        pickup_date: "2026-07-02".to_string(),
        special_requests: Some("Extra napkins".to_string()),
    }
}

fn header_row(id: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "customer_name": "Pat Doe",
        "customer_email": "pat@example.org",
        "customer_phone": "555-123-4567",
        "pickup_date": "2026-07-02",
        "special_requests": "Extra napkins",
        "subtotal": 12.0,
        "donation_amount": 1.2,
        "total_amount": 13.2,
        "order_date": "2026-07-01T15:00:00+00:00",
        "status": "pending"
    })
}

#[tokio::test]
async fn test_end_to_end_order_clears_cart() -> Result<()> {
    let server = MockServer::start();
    let header_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/rest/v1/orders")
            .header("apikey", "anon-key")
            .body_contains("\"customer_name\":\"Pat Doe\"")
            .body_contains("\"pickup_date\":\"2026-07-02\"")
            .body_contains("\"subtotal\":12.0")
            .body_contains("\"donation_amount\":1.2")
            .body_contains("\"total_amount\":13.2");
        then.status(201).json_body(serde_json::json!([header_row(501)]));
    });
    let items_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/rest/v1/order_items")
            .json_body(serde_json::json!([
                {"order_id": 501, "item_name": "Vanilla Cone", "quantity": 2,
                 "unit_price": 3.5, "total_price": 7.0},
                {"order_id": 501, "item_name": "Sundae", "quantity": 1,
                 "unit_price": 5.0, "total_price": 5.0}
            ]));
        then.status(201);
    });

    let config = site_config(&server);
    let menu = config.menu();
    let mut cart = Cart::new();
    menu.fill_cart(
        &mut cart,
        &["vanilla cone=2".parse().unwrap(), "Sundae".parse().unwrap()],
    )?;

    let desk = OrderDesk::new(RestStore::new(&config)?);
    let receipt = desk.submit_form(&mut cart, &order_form(), today()).await?;

    header_mock.assert();
    items_mock.assert();
    assert!(cart.is_empty());
    assert_eq!(receipt.order_id.to_string(), "501");
    assert_eq!(receipt.items.len(), 2);
    assert!(receipt.confirmation_message().ends_with("Total: $13.20"));
    Ok(())
}

#[tokio::test]
async fn test_store_outage_keeps_cart() -> Result<()> {
    let server = MockServer::start();
    let header_mock = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/orders");
        then.status(503)
            .json_body(serde_json::json!({"message": "Service Unavailable"}));
    });

    let config = site_config(&server);
    let mut cart = Cart::new();
    cart.add_item("Sundae", Money::from_cents(500));
    let before = cart.clone();

    let desk = OrderDesk::new(RestStore::new(&config)?);
    let err = desk
        .submit_form(&mut cart, &order_form(), today())
        .await
        .unwrap_err();

    header_mock.assert();
    assert!(matches!(err, FundError::StoreError { status: 503, .. }));
    assert_eq!(cart, before);
    Ok(())
}

#[tokio::test]
async fn test_empty_cart_makes_no_requests() -> Result<()> {
    let server = MockServer::start();
    let any_mock = server.mock(|when, then| {
        when.path_contains("/rest/v1/");
        then.status(201).json_body(serde_json::json!([]));
    });

    let config = site_config(&server);
    let desk = OrderDesk::new(RestStore::new(&config)?);
    let mut cart = Cart::new();

    let err = desk
        .submit_form(&mut cart, &order_form(), today())
        .await
        .unwrap_err();

    assert!(matches!(err, FundError::EmptyCart));
    any_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_newsletter_signup_is_write_only() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/rest/v1/subscribers")
            .header("Prefer", "return=minimal")
            .body_contains("\"subscription_source\":\"website_optin\"");
        then.status(201);
    });

    let config = site_config(&server);
    let newsletter = Newsletter::new(RestStore::new(&config)?);
    let subscriber = newsletter
        .subscribe(&SignupForm {
            name: "Sam".to_string(),
            email: "sam@example.org".to_string(),
            consent: true,
        })
        .await?;

    mock.assert();
    assert_eq!(subscriber.name, "Sam");
    assert!(subscriber.consent);
    assert!(subscriber.id.is_none());
    Ok(())
}

#[tokio::test]
async fn test_progress_from_listed_orders() -> Result<()> {
    let server = MockServer::start();
    let mut second = header_row(502);
    second["total_amount"] = serde_json::json!(77.0);
    second["donation_amount"] = serde_json::json!(7.0);
    let rows = serde_json::json!([second, header_row(501)]);
    server.mock(|when, then| {
        when.method(GET).path("/rest/v1/orders");
        then.status(200).json_body(rows.clone());
    });

    let config = site_config(&server);
    let store = RestStore::new(&config)?;
    let orders = store.list_orders().await?;
    let progress = FundraisingProgress::from_orders(config.fundraising_goal(), &orders);

    assert_eq!(orders.len(), 2);
    assert_eq!(progress.raised, Money::from_cents(9020));
    assert_eq!(progress.donations, Money::from_cents(820));
    assert_eq!(progress.remaining(), Money::from_cents(980));
    Ok(())
}

#[tokio::test]
async fn test_list_subscribers_error_surfaces_message() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/subscribers")
            .query_param("order", "created_at.desc");
        then.status(404).json_body(serde_json::json!({
            "code": "42P01",
            "message": "relation \"public.subscribers\" does not exist"
        }));
    });

    let config = site_config(&server);
    let err = RestStore::new(&config)?.list_subscribers().await.unwrap_err();

    match err {
        FundError::StoreError { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("does not exist"));
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}
