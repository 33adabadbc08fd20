//! Cart commands.

use std::io::Write;

use threadline_core::{AttributeId, VariantId};
use threadline_storefront::cart::{CartPage, CartView};
use threadline_storefront::catalog::Catalog;

use crate::context::Context;
use crate::error::Result;

fn print_cart(view: &CartView) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    if let Some(message) = view.empty_state() {
        return writeln!(out, "{message}");
    }
    for (n, line) in view.lines.iter().enumerate() {
        let title = match &line.variant_title {
            Some(variant) => format!("{} ({variant})", line.title),
            None => line.title.clone(),
        };
        writeln!(
            out,
            "{:>2}. {title:<36} {:>3} x {:<10} {}",
            n + 1,
            line.quantity,
            line.price,
            line.line_price
        )?;
    }
    writeln!(out, "{} items, subtotal {}", view.item_count, view.subtotal)
}

/// Show the cart.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn show(ctx: &Context) -> Result<()> {
    let view = CartPage::new(ctx.client.clone()).view().await?;
    print_cart(&view)?;
    Ok(())
}

/// Which variant of a product to add.
#[derive(Debug, Default)]
pub struct VariantChoice {
    pub variant: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Add a product by slug, resolving the variant from an id or a size/color
/// pair.
///
/// # Errors
///
/// Returns error if the product is unknown, the variant cannot be resolved
/// or is out of stock, or the request fails.
pub async fn add(ctx: &Context, slug: &str, choice: VariantChoice, quantity: u32) -> Result<()> {
    let mut page = Catalog::new(ctx.client.clone()).product(slug).await?;
    let variant = match choice.variant {
        Some(id) => Some(VariantId::new(id)),
        None => {
            if choice.size.is_some() || choice.color.is_some() {
                page.select_variant(
                    choice.size.map(AttributeId::new),
                    choice.color.map(AttributeId::new),
                );
            }
            page.selected().map(|v| v.id.clone())
        }
    };
    let view = CartPage::new(ctx.client.clone())
        .add(&page.product, variant.as_ref(), quantity)
        .await?;
    writeln!(std::io::stdout().lock(), "Added {} to your cart", page.product.name)?;
    print_cart(&view)?;
    Ok(())
}

/// Change a line's quantity; zero removes it.
///
/// # Errors
///
/// Returns error if the line does not exist or the request fails.
pub async fn set(ctx: &Context, line: &str, quantity: u32) -> Result<()> {
    let page = CartPage::new(ctx.client.clone());
    let current = page.view().await?;
    let id = current.line(line)?.id.clone();
    let view = page.set_quantity(&id, quantity).await?;
    print_cart(&view)?;
    Ok(())
}

/// Remove a line by id or position.
///
/// # Errors
///
/// Returns error if the line does not exist or the request fails.
pub async fn remove(ctx: &Context, line: &str) -> Result<()> {
    let page = CartPage::new(ctx.client.clone());
    let current = page.view().await?;
    let id = current.line(line)?.id.clone();
    let view = page.remove(&id).await?;
    print_cart(&view)?;
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn clear(ctx: &Context) -> Result<()> {
    let view = CartPage::new(ctx.client.clone()).clear().await?;
    print_cart(&view)?;
    Ok(())
}
