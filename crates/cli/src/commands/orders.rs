//! The signed-in shopper's orders.

use std::io::Write;

use threadline_core::{CurrencyCode, OrderId, Price};
use threadline_storefront::account::Account;

use crate::context::Context;
use crate::error::Result;
use crate::output;

/// List past orders, newest first as the backend returns them.
///
/// # Errors
///
/// Returns `NotSignedIn` or the backend error.
pub async fn list(ctx: &Context) -> Result<()> {
    let orders = Account::new(ctx.client.clone(), ctx.store.clone())
        .orders()
        .await?;
    let mut out = std::io::stdout().lock();
    if orders.is_empty() {
        writeln!(out, "You have not placed any orders yet")?;
    }
    for order in &orders {
        let placed = order
            .created_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        writeln!(
            out,
            "{:<14} {placed:<10} {:<10} {:>3} items  {}",
            order.reference(),
            order.status,
            order.item_count(),
            Price::new(order.total, CurrencyCode::default()).display()
        )?;
    }
    Ok(())
}

/// Show one order.
///
/// # Errors
///
/// Returns `NotSignedIn` or the backend error.
pub async fn show(ctx: &Context, id: &str) -> Result<()> {
    let order = Account::new(ctx.client.clone(), ctx.store.clone())
        .order(&OrderId::new(id))
        .await?;
    let mut out = std::io::stdout().lock();
    super::checkout::print_order(&mut out, &order)?;
    if let Some(address) = &order.shipping_address {
        writeln!(out, "Ship to   {}", address.one_line())?;
    }
    Ok(())
}

/// Cancel an order after confirming on the terminal.
///
/// # Errors
///
/// Returns `NotSignedIn` or the backend error.
pub async fn cancel(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    if !yes && !output::confirm(&format!("Cancel order {id}?"))? {
        writeln!(std::io::stdout().lock(), "Kept order {id}")?;
        return Ok(());
    }
    let order = Account::new(ctx.client.clone(), ctx.store.clone())
        .cancel_order(&OrderId::new(id))
        .await?;
    writeln!(
        std::io::stdout().lock(),
        "Order {} is now {}",
        order.reference(),
        order.status
    )?;
    Ok(())
}
