//! Checkout from the terminal.
//!
//! `place` runs the whole wizard in one go: address, delivery, review and
//! the order itself. Online orders then wait in session state until `pay`
//! confirms them.

use std::io::Write;

use threadline_core::models::Order;
use threadline_core::{CurrencyCode, DeliveryOptionId, PaymentMethod, Price};
use threadline_storefront::address::AddressForm;
use threadline_storefront::checkout::{Checkout, CheckoutStep, PaymentPage};
use tracing::debug;

use crate::context::Context;
use crate::error::Result;

/// Address fields given on the command line; unset fields keep the
/// pre-filled value.
#[derive(Debug, Default)]
pub struct AddressArgs {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl AddressArgs {
    fn apply(self, form: &mut AddressForm) {
        let fields = [
            (self.full_name, &mut form.full_name),
            (self.phone, &mut form.phone),
            (self.line1, &mut form.line1),
            (self.line2, &mut form.line2),
            (self.city, &mut form.city),
            (self.state, &mut form.state),
            (self.postal_code, &mut form.postal_code),
            (self.country, &mut form.country),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

fn money(amount: rust_decimal::Decimal) -> String {
    Price::new(amount, CurrencyCode::default()).display()
}

pub(crate) fn print_order(out: &mut impl Write, order: &Order) -> std::io::Result<()> {
    writeln!(out, "Order {} ({})", order.reference(), order.status)?;
    for item in &order.items {
        writeln!(out, "  {:>3} x {:<36} {}", item.quantity, item.title(), money(item.price))?;
    }
    writeln!(out, "Subtotal  {}", money(order.subtotal))?;
    writeln!(out, "Delivery  {}", money(order.delivery_charge))?;
    writeln!(out, "Total     {}", money(order.total))?;
    writeln!(out, "Payment   {} ({})", order.payment_method, order.payment_status)
}

/// List the delivery options on offer.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn delivery(ctx: &Context) -> Result<()> {
    let options = ctx.client.delivery().options().await?;
    let mut out = std::io::stdout().lock();
    if options.is_empty() {
        writeln!(out, "No delivery options available")?;
    }
    for option in &options {
        let days = option
            .estimated_days
            .map(|d| format!(", {d} days"))
            .unwrap_or_default();
        writeln!(out, "{:<12} {} ({}{days})", option.id, option.name, money(option.charge))?;
    }
    Ok(())
}

/// Place an order for the current cart.
///
/// # Errors
///
/// Returns error if the shopper is not signed in, the cart is empty, the
/// address is incomplete, the delivery option is unavailable, or the
/// backend rejects the order.
pub async fn place(
    ctx: &Context,
    address: AddressArgs,
    delivery: &str,
    payment: PaymentMethod,
) -> Result<()> {
    let mut checkout = Checkout::start(ctx.client.clone(), ctx.store.clone()).await?;
    let mut form = checkout.address_form()?;
    address.apply(&mut form);
    checkout.set_address(&form)?;
    checkout
        .choose_delivery(&DeliveryOptionId::new(delivery))
        .await?;
    checkout.choose_payment(payment)?;
    debug!(step = %checkout.step(), "Placing order");
    let summary = checkout.summary();
    let order = checkout.place_order().await?.clone();

    let mut out = std::io::stdout().lock();
    print_order(&mut out, &order)?;
    if checkout.step() == CheckoutStep::Payment {
        writeln!(
            out,
            "\n{} due. Run `tl checkout pay --reference <ref>` once paid.",
            money(summary.total)
        )?;
    } else {
        writeln!(out, "\nThank you! Your order is confirmed.")?;
    }
    Ok(())
}

/// Show the order waiting for payment.
///
/// # Errors
///
/// Returns error if session state cannot be read.
pub fn status(ctx: &Context) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match ctx.store.checkout_data()? {
        Some(data) => {
            let number = data.order_number.as_deref().unwrap_or(data.order_id.as_str());
            writeln!(out, "Order {number} awaiting {} payment", data.payment_method)?;
            writeln!(out, "Subtotal  {}", money(data.subtotal))?;
            writeln!(out, "Delivery  {}", money(data.delivery_charge))?;
            writeln!(out, "Total     {}", data.total_label())?;
        }
        None => writeln!(out, "No pending checkout")?,
    }
    Ok(())
}

/// Confirm payment for the pending order.
///
/// # Errors
///
/// Returns error if nothing is pending or the backend rejects the payment.
pub async fn pay(ctx: &Context, reference: &str, provider: Option<&str>) -> Result<()> {
    let page = PaymentPage::load(ctx.client.clone(), ctx.store.clone())?;
    let order = page.confirm(reference, provider).await?;
    let mut out = std::io::stdout().lock();
    print_order(&mut out, &order)?;
    writeln!(out, "\nPayment received. Thank you!")?;
    Ok(())
}
