use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

use pos_orders::app_system::{setup_tracing, Config, OrderSystem};
use pos_orders::domain::{AddressFields, Identity, NewCustomer, NewOrder, NewProduct, OrderPatch, OrderStatus};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = Config::load(None).map_err(|e| e.to_string())?;
    setup_tracing(&config.logging);

    info!("Starting order system");
    let system = OrderSystem::new(&config);
    let admin = Identity::admin(1);

    let product = system
        .product_client
        .create_product(
            &admin,
            NewProduct {
                name: "Iced Latte".to_string(),
                price: Decimal::new(1099, 2),
                product_type: "drink".to_string(),
                description: Some("Double shot over ice".to_string()),
                category: Some("coffee".to_string()),
                image_signed_id: None,
            },
        )
        .await;
    let product = product.entity.ok_or_else(|| format!("Product setup failed: {:?}", product.errors))?;

    let customer = system
        .customer_client
        .create_customer(
            &admin,
            NewCustomer {
                first_name: "Alice".to_string(),
                last_name: "Reyes".to_string(),
                email: "alice@example.com".to_string(),
                phone_number: None,
                delivery_id: None,
            },
        )
        .await;
    let customer = customer.entity.ok_or_else(|| format!("Customer setup failed: {:?}", customer.errors))?;

    let span = tracing::info_span!("checkout");
    let placed = async {
        info!("Placing order");
        system
            .order_client
            .create_order(
                &Identity::user(customer.id),
                NewOrder {
                    product_id: product.id,
                    customer_id: customer.id,
                    quantity: 3,
                    payment_method: Some("cash".to_string()),
                    group_id: Some("checkout-1".to_string()),
                    address: AddressFields {
                        city: Some("Makati".to_string()),
                        street: Some("Ayala Ave".to_string()),
                        ..AddressFields::default()
                    },
                    ..NewOrder::default()
                },
            )
            .await
    }
    .instrument(span)
    .await;

    let Some(order) = placed.entity.clone() else {
        error!(errors = ?placed.errors, "Order placement failed");
        system.shutdown().await?;
        return Err("Order placement failed".to_string());
    };
    println!("{}", serde_json::to_string_pretty(&placed).map_err(|e| e.to_string())?);

    let updated = system
        .order_client
        .update_order(
            &admin,
            order.id,
            OrderPatch {
                status: Some(OrderStatus::ForDelivery),
                ..OrderPatch::default()
            },
        )
        .await;
    println!("{}", serde_json::to_string_pretty(&updated).map_err(|e| e.to_string())?);

    let emailed = system
        .notification_client
        .send_order_emails(&admin, vec![order.id], None, None)
        .await;
    info!(success = emailed.success, "Confirmation email");

    // The delivery is now the customer's default address, so this is refused.
    let deleted = system
        .order_client
        .delete_order(&admin, None, Some("checkout-1".to_string()))
        .await;
    println!("{}", serde_json::to_string_pretty(&deleted).map_err(|e| e.to_string())?);

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
