//! `furnish checkout` command implementation.
//!
//! Walks the full wizard in one invocation: address, payment, optional
//! coupon, review, and simulated order submission. Coupon validation
//! failures print an inline message and the checkout continues, matching
//! the wizard's side-channel semantics.

use crate::config::load_config;
use crate::core::cart::CartStore;
use crate::core::checkout::{
    CheckoutState, DELIVERY_OPTIONS, MockGateway, Order, PAYMENT_METHODS, SAVED_ADDRESSES,
};
use crate::error::{Error, Result};
use crate::storage::FileBackend;
use std::thread;
use std::time::Duration;

/// Run the checkout wizard end to end.
///
/// # Errors
///
/// Returns an error for unknown address/payment/delivery selections or
/// when storage setup fails. Coupon problems are not errors here.
pub fn run(
    address_id: &str,
    payment_id: &str,
    delivery_method: &str,
    coupon_code: Option<&str>,
    instructions: Option<&str>,
) -> Result<()> {
    let config = load_config()?;
    let storage = FileBackend::new(config.storage.path.clone())?;
    let mut cart = CartStore::hydrate(storage);

    if cart.is_empty() {
        println!("Your cart is empty. Add something before checking out.");
        return Ok(());
    }

    let address = SAVED_ADDRESSES
        .iter()
        .find(|addr| addr.id == address_id)
        .ok_or_else(|| Error::InvalidSelection(format!("address {address_id}")))?;
    let payment = PAYMENT_METHODS
        .iter()
        .find(|method| method.id == payment_id)
        .ok_or_else(|| Error::InvalidSelection(format!("payment method {payment_id}")))?;
    if !DELIVERY_OPTIONS.iter().any(|opt| opt.id == delivery_method) {
        return Err(Error::InvalidSelection(format!(
            "delivery method {delivery_method}"
        )));
    }

    let mut wizard = CheckoutState::new();
    wizard.selected_address = Some(address.id.to_string());
    wizard.delivery_method = delivery_method.to_string();
    wizard.special_instructions = instructions.unwrap_or_default().to_string();

    let subtotal = cart.total_price();

    // Step 1 -> 2
    wizard.next_step()?;
    wizard.selected_payment = Some(payment.id.to_string());

    // Coupon side channel: failures are inline messages, not aborts
    if let Some(code) = coupon_code {
        thread::sleep(Duration::from_millis(config.checkout.coupon_delay_ms));
        match wizard.apply_coupon(code, subtotal) {
            Ok(coupon) => println!("Coupon applied: {} ({})", coupon.code, coupon.description),
            Err(e) => println!("{e}"),
        }
    }

    // Step 2 -> 3
    wizard.next_step()?;

    let pricing = wizard.summary(subtotal, &config.checkout);

    println!();
    println!("Order Review");
    println!("{}", "─".repeat(44));
    println!("Deliver to: {} ({})", address.label, address.address_line);
    println!("Payment:    {}", payment.name);
    println!("{}", "─".repeat(44));
    println!("{:<28} \u{9f3}{:>12.2}", "Subtotal", pricing.subtotal);
    if pricing.delivery.abs() < f64::EPSILON {
        println!("{:<28} {:>13}", "Delivery", "Free");
    } else {
        println!("{:<28} \u{9f3}{:>12.2}", "Delivery", pricing.delivery);
    }
    if pricing.discount > 0.0 {
        println!("{:<28} -\u{9f3}{:>11.2}", "Coupon discount", pricing.discount);
    }
    println!("{:<28} \u{9f3}{:>12.2}", "Tax (5%)", pricing.tax);
    println!("{}", "─".repeat(44));
    println!("{:<28} \u{9f3}{:>12.2}", "Total", pricing.total);
    println!();

    let order = Order {
        items: cart.items().to_vec(),
        address_id: address.id.to_string(),
        payment_id: payment.id.to_string(),
        delivery_method: delivery_method.to_string(),
        special_instructions: wizard.special_instructions.clone(),
        pricing,
    };

    println!("Processing...");
    let gateway = MockGateway::new(Duration::from_millis(config.checkout.order_delay_ms));
    let confirmation = wizard.place_order(&gateway, &order)?;

    println!("Order Placed Successfully!");
    println!("Order ID: #{}", confirmation.order_id);

    // Successful order empties the cart
    cart.clear();
    Ok(())
}
