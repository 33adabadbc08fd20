//! Catalog browsing.

use std::io::Write;

use threadline_core::models::{AttributeValue, Product, ProductQuery};
use threadline_core::{AttributeId, CurrencyCode, Price, Ref};
use threadline_storefront::catalog::{Availability, Catalog};

use crate::context::Context;
use crate::error::Result;

fn option_list(refs: &[&Ref<AttributeValue>]) -> String {
    refs.iter()
        .map(|r| format!("{} [{}]", r.label_or_id(), r.id()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn product_line(product: &Product) -> String {
    let price = Price::new(product.effective_price(), CurrencyCode::default()).display();
    let sale = if product.is_on_sale() {
        format!(" (was {})", Price::new(product.price, CurrencyCode::default()).display())
    } else {
        String::new()
    };
    format!("{:<28} {}{sale}  [{}]", product.name, price, product.slug)
}

/// Featured products and categories.
///
/// # Errors
///
/// Returns error if either request fails.
pub async fn home(ctx: &Context) -> Result<()> {
    let home = Catalog::new(ctx.client.clone()).home().await?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "Featured")?;
    if home.featured.is_empty() {
        writeln!(out, "  Nothing featured right now")?;
    }
    for product in &home.featured {
        writeln!(out, "  {}", product_line(product))?;
    }
    writeln!(out, "Categories")?;
    for category in &home.categories {
        writeln!(out, "  {:<28} [{}]", category.name, category.id)?;
    }
    Ok(())
}

/// One page of matching products.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn browse(ctx: &Context, query: &ProductQuery) -> Result<()> {
    let page = Catalog::new(ctx.client.clone()).browse(query).await?;
    let mut out = std::io::stdout().lock();
    if page.is_empty() {
        writeln!(out, "No products match")?;
        return Ok(());
    }
    for product in &page.items {
        writeln!(out, "{}", product_line(product))?;
    }
    writeln!(out, "Page {} of {} ({} products)", page.page, page.pages, page.total)?;
    Ok(())
}

/// A product with its options and the availability of a selection.
///
/// # Errors
///
/// Returns error if the product is not found.
pub async fn product(
    ctx: &Context,
    slug: &str,
    size: Option<String>,
    color: Option<String>,
) -> Result<()> {
    let mut page = Catalog::new(ctx.client.clone()).product(slug).await?;
    if size.is_some() || color.is_some() {
        page.select_variant(size.map(AttributeId::new), color.map(AttributeId::new));
    }

    let mut out = std::io::stdout().lock();
    let product = &page.product;
    writeln!(out, "{}", product.name)?;
    if let Some(brand) = product.brand.as_ref().and_then(Ref::label) {
        writeln!(out, "by {brand}")?;
    }
    writeln!(out, "{}", page.price_label())?;
    if let Some(description) = &product.description {
        writeln!(out, "\n{description}\n")?;
    }

    let sizes = page.sizes();
    if !sizes.is_empty() {
        writeln!(out, "Sizes:  {}", option_list(&sizes))?;
    }
    let colors = page.colors();
    if !colors.is_empty() {
        writeln!(out, "Colors: {}", option_list(&colors))?;
    }

    let availability = match page.availability() {
        Availability::InStock(n) => format!("In stock ({n} left)"),
        Availability::Available => "Available".to_owned(),
        Availability::OutOfStock => "Out of stock".to_owned(),
        Availability::Unavailable => "This combination is not available".to_owned(),
        Availability::ChooseOptions => "Choose a size and color".to_owned(),
    };
    writeln!(out, "{availability}")?;
    if let Some(variant) = page.selected() {
        writeln!(out, "Variant {} ({})", variant.id, variant.sku)?;
    }
    Ok(())
}
