//! Back-office commands.
//!
//! # Usage
//!
//! ```bash
//! # List brands, or the values of one attribute taxonomy
//! tl admin list brands
//! tl admin list attributes --kind colors
//!
//! # Create a record, or update one by id; updates only change the flags given
//! tl admin brand --name "Northbound" --logo ./logo.png
//! tl admin product p1 --sale-price 89.90 --attr fit=relaxed
//!
//! # Delete asks first unless --yes is given
//! tl admin delete variants v1 --product p1
//!
//! # Orders
//! tl admin order status o1 shipped --note "Tracking 1Z999"
//! ```

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use threadline_admin::orders::OrdersScreen;
use threadline_admin::resources::{
    Attributes, Brands, Categories, Customers, ProductForm, Products, VariantForm, Variants,
};
use threadline_admin::{AdminError, CrudScreen, IdOf, Resource};
use threadline_client::{ApiClient, ImageUpload};
use threadline_core::models::AttributeKind;
use threadline_core::{Entity, OrderId, OrderStatus, ProductId};
use tracing::debug;

use crate::context::Context;
use crate::error::{CliError, Result};
use crate::output;

/// Back-office collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Products,
    Variants,
    Categories,
    Brands,
    Attributes,
    Customers,
    Orders,
}

/// Narrows a collection that lives under a parent.
#[derive(Debug, Default, Args)]
pub struct Scope {
    /// Parent product (variants)
    #[arg(long)]
    pub product: Option<String>,

    /// Attribute taxonomy, e.g. `colors` or `collar-type` (attributes)
    #[arg(long)]
    pub kind: Option<AttributeKind>,
}

impl Scope {
    fn product(&self) -> Result<ProductId> {
        self.product
            .clone()
            .map(ProductId::new)
            .ok_or_else(|| CliError::Usage("--product is required for variants".into()))
    }

    fn kind(&self) -> Result<AttributeKind> {
        self.kind
            .ok_or_else(|| CliError::Usage("--kind is required for attributes".into()))
    }
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List a collection
    List {
        resource: ResourceKind,
        #[command(flatten)]
        scope: Scope,
        /// Only rows whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Order status filter (orders)
        #[arg(long)]
        status: Option<OrderStatus>,
        /// Page of the listing (orders)
        #[arg(long)]
        page: Option<u32>,
    },
    /// Delete a record
    Delete {
        resource: ResourceKind,
        id: String,
        #[command(flatten)]
        scope: Scope,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Create a product, or update one when an id is given
    Product {
        id: Option<String>,
        #[command(flatten)]
        args: ProductArgs,
    },
    /// Create or update a product's variant
    Variant {
        /// Parent product
        #[arg(long)]
        product: String,
        id: Option<String>,
        #[command(flatten)]
        args: VariantArgs,
    },
    /// Create or update a category
    Category {
        id: Option<String>,
        #[command(flatten)]
        args: CatalogArgs,
    },
    /// Create or update a brand
    Brand {
        id: Option<String>,
        #[command(flatten)]
        args: CatalogArgs,
    },
    /// Create or update an attribute value
    Attribute {
        /// Attribute taxonomy
        #[arg(long)]
        kind: AttributeKind,
        id: Option<String>,
        #[command(flatten)]
        args: AttributeArgs,
    },
    /// Edit a customer account
    Customer {
        id: String,
        #[command(flatten)]
        args: CustomerArgs,
    },
    /// Inspect and update orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

/// Fields shared by categories and brands.
#[derive(Debug, Default, Args)]
pub struct CatalogArgs {
    #[arg(long)]
    pub name: Option<String>,
    /// Defaults to the slugified name
    #[arg(long)]
    pub slug: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
    /// Parent category id (categories only)
    #[arg(long)]
    pub parent: Option<String>,
    /// Image or logo file to upload
    #[arg(long, alias = "logo")]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Default, Args)]
pub struct AttributeArgs {
    #[arg(long)]
    pub name: Option<String>,
    /// Hex code for colors, free text otherwise
    #[arg(long)]
    pub value: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Args)]
pub struct VariantArgs {
    #[arg(long)]
    pub sku: Option<String>,
    /// Size attribute id
    #[arg(long)]
    pub size: Option<String>,
    /// Color attribute id
    #[arg(long)]
    pub color: Option<String>,
    /// Overrides the product price; empty to clear
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub stock: Option<String>,
}

#[derive(Debug, Default, Args)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub slug: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Brand id
    #[arg(long)]
    pub brand: Option<String>,
    /// Category id
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    /// Empty to clear
    #[arg(long)]
    pub sale_price: Option<String>,
    /// Attribute value as `kind=id`, e.g. `fit=relaxed`; repeatable
    #[arg(long = "attr", value_parser = parse_attribute)]
    pub attributes: Vec<(AttributeKind, String)>,
    #[arg(long)]
    pub active: Option<bool>,
    #[arg(long)]
    pub featured: Option<bool>,
    /// Image file to upload; repeatable
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
}

#[derive(Debug, Default, Args)]
pub struct CustomerArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// `customer` or `admin`
    #[arg(long)]
    pub role: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum OrderAction {
    /// Show one order
    Show { id: String },
    /// Move an order to a new status
    Status {
        id: String,
        status: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Cancel an order
    Cancel {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_attribute(s: &str) -> std::result::Result<(AttributeKind, String), String> {
    let (kind, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected kind=value, got {s}"))?;
    Ok((kind.parse()?, value.trim().to_owned()))
}

fn set(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

async fn uploads(paths: Vec<PathBuf>) -> Result<Vec<ImageUpload>> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        images.push(ImageUpload::from_path(&path).await?);
    }
    Ok(images)
}

/// Run an admin command.
///
/// # Errors
///
/// Returns error if the arguments are incomplete, a form is invalid or the
/// backend rejects the request.
pub async fn run(ctx: &Context, command: AdminCommand) -> Result<()> {
    let client = ctx.client.clone();
    match command {
        AdminCommand::List {
            resource,
            scope,
            search,
            status,
            page,
        } => {
            let search = search.as_deref();
            match resource {
                ResourceKind::Products => list(Products::new(client), search).await,
                ResourceKind::Variants => list(Variants::new(client, scope.product()?), search).await,
                ResourceKind::Categories => list(Categories::new(client), search).await,
                ResourceKind::Brands => list(Brands::new(client), search).await,
                ResourceKind::Attributes => {
                    list(Attributes::new(client, scope.kind()?), search).await
                }
                ResourceKind::Customers => list(Customers::new(client), search).await,
                ResourceKind::Orders => list_orders(client, status, page).await,
            }
        }
        AdminCommand::Delete {
            resource,
            id,
            scope,
            yes,
        } => match resource {
            ResourceKind::Products => delete(Products::new(client), id, yes).await,
            ResourceKind::Variants => delete(Variants::new(client, scope.product()?), id, yes).await,
            ResourceKind::Categories => delete(Categories::new(client), id, yes).await,
            ResourceKind::Brands => delete(Brands::new(client), id, yes).await,
            ResourceKind::Attributes => {
                delete(Attributes::new(client, scope.kind()?), id, yes).await
            }
            ResourceKind::Customers => delete(Customers::new(client), id, yes).await,
            ResourceKind::Orders => Err(CliError::Usage(
                "orders cannot be deleted; use `tl admin order cancel`".into(),
            )),
        },
        AdminCommand::Product { id, args } => save_product(client, id, args).await,
        AdminCommand::Variant { product, id, args } => {
            save(Variants::new(client, ProductId::new(product)), id, |form: &mut VariantForm| {
                set(&mut form.sku, args.sku);
                set(&mut form.size, args.size);
                set(&mut form.color, args.color);
                set(&mut form.price, args.price);
                set(&mut form.stock, args.stock);
            })
            .await
        }
        AdminCommand::Category { id, args } => {
            let image = match &args.image {
                Some(path) => Some(ImageUpload::from_path(path).await?),
                None => None,
            };
            save(Categories::new(client), id, |form| {
                set(&mut form.name, args.name);
                set(&mut form.slug, args.slug);
                set(&mut form.description, args.description);
                set(&mut form.parent, args.parent);
                if let Some(active) = args.active {
                    form.is_active = active;
                }
                if image.is_some() {
                    form.image = image;
                }
            })
            .await
        }
        AdminCommand::Brand { id, args } => {
            if args.parent.is_some() {
                return Err(CliError::Usage("brands have no parent".into()));
            }
            let logo = match &args.image {
                Some(path) => Some(ImageUpload::from_path(path).await?),
                None => None,
            };
            save(Brands::new(client), id, |form| {
                set(&mut form.name, args.name);
                set(&mut form.slug, args.slug);
                set(&mut form.description, args.description);
                if let Some(active) = args.active {
                    form.is_active = active;
                }
                if logo.is_some() {
                    form.logo = logo;
                }
            })
            .await
        }
        AdminCommand::Attribute { kind, id, args } => {
            save(Attributes::new(client, kind), id, |form| {
                set(&mut form.name, args.name);
                set(&mut form.value, args.value);
                set(&mut form.description, args.description);
            })
            .await
        }
        AdminCommand::Customer { id, args } => {
            save(Customers::new(client), Some(id), |form| {
                set(&mut form.name, args.name);
                set(&mut form.email, args.email);
                set(&mut form.phone, args.phone);
                set(&mut form.role, args.role);
            })
            .await
        }
        AdminCommand::Order { action } => order(client, action).await,
    }
}

async fn list<R: Resource>(resource: R, search: Option<&str>) -> Result<()> {
    let mut screen = CrudScreen::new(resource);
    screen.load().await?;
    let view = screen.list_view(search);
    output::list(&mut std::io::stdout().lock(), &view)?;
    Ok(())
}

async fn list_orders(client: ApiClient, status: Option<OrderStatus>, page: Option<u32>) -> Result<()> {
    let mut screen = OrdersScreen::new(client);
    screen.set_status_filter(status);
    if let Some(page) = page {
        screen.set_page(page);
    }
    let listing = screen.load().await?;
    let footer = (listing.pages > 1).then(|| format!("Page {} of {}", listing.page, listing.pages));
    let mut out = std::io::stdout().lock();
    output::list(&mut out, &screen.list_view())?;
    if let Some(footer) = footer {
        writeln!(out, "{footer}")?;
    }
    Ok(())
}

async fn delete<R>(resource: R, id: String, yes: bool) -> Result<()>
where
    R: Resource,
    IdOf<R>: From<String>,
{
    let mut screen = CrudScreen::new(resource);
    screen.load().await?;
    let pending = screen.request_delete(&IdOf::<R>::from(id))?;
    if !yes && !output::confirm(&pending.prompt())? {
        pending.cancel();
        writeln!(std::io::stdout().lock(), "Nothing deleted")?;
        return Ok(());
    }
    let label = pending.label().to_owned();
    screen.confirm_delete(pending.confirm()).await?;
    writeln!(std::io::stdout().lock(), "Deleted {} \"{label}\"", R::NAME)?;
    Ok(())
}

/// Open a create form, or an edit form pre-filled from the record.
async fn open<R>(screen: &mut CrudScreen<R>, id: Option<String>) -> Result<&mut R::Form>
where
    R: Resource,
    IdOf<R>: From<String>,
{
    Ok(match id {
        Some(id) => {
            screen.load().await?;
            screen.open_edit(&IdOf::<R>::from(id))?
        }
        None => screen.open_create()?,
    })
}

async fn submit<R: Resource>(screen: &mut CrudScreen<R>) -> Result<()> {
    match screen.submit().await {
        Ok(record) => {
            writeln!(
                std::io::stdout().lock(),
                "Saved {} \"{}\" ({})",
                R::NAME,
                record.label(),
                record.id()
            )?;
            Ok(())
        }
        Err(AdminError::Form(errors)) => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "The {} was not saved:", R::NAME)?;
            output::form_errors(&mut out, &errors)?;
            Err(AdminError::Form(errors).into())
        }
        Err(e) => Err(e.into()),
    }
}

async fn save<R>(resource: R, id: Option<String>, apply: impl FnOnce(&mut R::Form)) -> Result<()>
where
    R: Resource,
    IdOf<R>: From<String>,
{
    let mut screen = CrudScreen::new(resource);
    apply(open(&mut screen, id).await?);
    submit(&mut screen).await
}

/// Products also check brand, category and attribute ids against the
/// option lists before anything is sent.
async fn save_product(client: ApiClient, id: Option<String>, args: ProductArgs) -> Result<()> {
    let images = uploads(args.images).await?;
    let resource = Products::new(client);
    let options = resource.form_options().await?;
    let mut screen = CrudScreen::new(resource);

    let form: &mut ProductForm = open(&mut screen, id).await?;
    set(&mut form.name, args.name);
    set(&mut form.slug, args.slug);
    set(&mut form.description, args.description);
    set(&mut form.brand, args.brand);
    set(&mut form.category, args.category);
    set(&mut form.price, args.price);
    set(&mut form.sale_price, args.sale_price);
    for (kind, value) in args.attributes {
        form.attributes.insert(kind, value);
    }
    if let Some(active) = args.active {
        form.is_active = active;
    }
    if let Some(featured) = args.featured {
        form.is_featured = featured;
    }
    form.images.extend(images);

    if let Err(errors) = options.check(form) {
        let mut out = std::io::stdout().lock();
        writeln!(out, "The product was not saved:")?;
        output::form_errors(&mut out, &errors)?;
        return Err(AdminError::Form(errors).into());
    }
    debug!(uploads = form.images.len(), "Submitting product");
    submit(&mut screen).await
}

async fn order(client: ApiClient, action: OrderAction) -> Result<()> {
    let mut screen = OrdersScreen::new(client);
    match action {
        OrderAction::Show { id } => {
            let order = screen.open(&OrderId::new(id)).await?;
            let mut out = std::io::stdout().lock();
            super::checkout::print_order(&mut out, order)?;
            if let Some(customer) = &order.user {
                writeln!(out, "Customer  {}", customer.label_or_id())?;
            }
            if let Some(address) = &order.shipping_address {
                writeln!(out, "Ship to   {}", address.one_line())?;
            }
        }
        OrderAction::Status { id, status, note } => {
            screen.open(&OrderId::new(id)).await?;
            let form = screen.status_form_mut()?;
            form.status = status;
            set(&mut form.note, note);
            let order = screen.update_status().await?;
            writeln!(
                std::io::stdout().lock(),
                "Order {} is now {}",
                order.reference(),
                order.status
            )?;
        }
        OrderAction::Cancel { id, yes } => {
            let question = format!("Cancel order {id}?");
            screen.open(&OrderId::new(id)).await?;
            if !yes && !output::confirm(&question)? {
                writeln!(std::io::stdout().lock(), "Order left as is")?;
                return Ok(());
            }
            let order = screen.cancel().await?;
            writeln!(
                std::io::stdout().lock(),
                "Order {} is now {}",
                order.reference(),
                order.status
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        command: AdminCommand,
    }

    fn parse(args: &[&str]) -> AdminCommand {
        Harness::try_parse_from(std::iter::once("tl").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_parse_attribute_pair() {
        assert_eq!(
            parse_attribute("collar-type=mandarin").unwrap(),
            (AttributeKind::CollarType, "mandarin".to_owned())
        );
        assert!(parse_attribute("fit").is_err());
        assert!(parse_attribute("flavour=sweet").is_err());
    }

    #[test]
    fn test_list_attributes_with_kind() {
        let AdminCommand::List {
            resource, scope, ..
        } = parse(&["list", "attributes", "--kind", "colors"])
        else {
            panic!("expected list");
        };
        assert_eq!(resource, ResourceKind::Attributes);
        assert_eq!(scope.kind().unwrap(), AttributeKind::Color);
    }

    #[test]
    fn test_variants_need_a_product() {
        let AdminCommand::Delete { scope, yes, .. } = parse(&["delete", "variants", "v1", "-y"])
        else {
            panic!("expected delete");
        };
        assert!(yes);
        assert!(matches!(scope.product(), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_update_only_carries_given_flags() {
        let AdminCommand::Product { id, args } =
            parse(&["product", "p1", "--sale-price", "89.90", "--attr", "fit=relaxed"])
        else {
            panic!("expected product");
        };
        assert_eq!(id.as_deref(), Some("p1"));
        assert_eq!(args.sale_price.as_deref(), Some("89.90"));
        assert!(args.name.is_none());
        assert_eq!(args.attributes, vec![(AttributeKind::Fit, "relaxed".to_owned())]);
    }
}
