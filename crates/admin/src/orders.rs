//! Order management.
//!
//! Orders are created by checkout, so this screen only lists, inspects,
//! re-statuses and cancels them.

use threadline_client::ApiClient;
use threadline_core::forms::optional;
use threadline_core::models::{Order, OrderFilter, OrderStatusUpdate, Page};
use threadline_core::{CurrencyCode, FormErrors, OrderId, OrderStatus, Price, Ref};
use tracing::{info, instrument};

use crate::components::{DataTableConfig, ListView, TableRow, orders_table_config};
use crate::error::{AdminError, Result};

/// Status change form for the open order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusForm {
    /// New status, by wire name (`shipped`).
    pub status: String,
    /// Optional note stored with the change.
    pub note: String,
    current: OrderStatus,
}

impl StatusForm {
    /// Pre-populate from the order's current status.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            status: order.status.to_string(),
            note: String::new(),
            current: order.status,
        }
    }

    /// The status must parse and differ from the current one.
    ///
    /// # Errors
    ///
    /// Returns the failing fields.
    pub fn validate(&self) -> std::result::Result<OrderStatusUpdate, FormErrors> {
        let mut errors = FormErrors::new();
        let status = errors.required("status", &self.status);
        let parsed = if status.is_empty() {
            None
        } else {
            status
                .parse::<OrderStatus>()
                .map_err(|e| errors.push("status", e))
                .ok()
        };
        if parsed == Some(self.current) {
            errors.push("status", format!("order is already {}", self.current));
        }
        match parsed {
            Some(status) if errors.is_empty() => Ok(OrderStatusUpdate {
                status,
                note: optional(&self.note),
            }),
            _ => Err(errors),
        }
    }
}

/// The orders list and one open order.
#[derive(Debug, Clone)]
pub struct OrdersScreen {
    client: ApiClient,
    filter: OrderFilter,
    page: Page<Order>,
    selected: Option<Order>,
    status_form: Option<StatusForm>,
}

impl OrdersScreen {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            filter: OrderFilter::default(),
            page: Page::default(),
            selected: None,
            status_form: None,
        }
    }

    #[must_use]
    pub const fn filter(&self) -> &OrderFilter {
        &self.filter
    }

    /// Show only orders in `status` (or all), starting from the first page.
    pub const fn set_status_filter(&mut self, status: Option<OrderStatus>) {
        self.filter.status = status;
        self.filter.page = None;
    }

    /// Jump to a page of the listing.
    pub const fn set_page(&mut self, page: u32) {
        self.filter.page = Some(page);
    }

    /// Fetch the listing for the current filter.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(status = ?self.filter.status))]
    pub async fn load(&mut self) -> Result<&Page<Order>> {
        self.page = self.client.orders().list(&self.filter).await?;
        info!(count = self.page.items.len(), total = self.page.total, "Loaded orders");
        Ok(&self.page)
    }

    #[must_use]
    pub const fn page(&self) -> &Page<Order> {
        &self.page
    }

    #[must_use]
    pub fn table(&self) -> DataTableConfig {
        orders_table_config()
    }

    /// The loaded page as a table.
    #[must_use]
    pub fn list_view(&self) -> ListView {
        ListView::new(&self.table(), self.page.items.iter().map(order_row).collect())
    }

    /// Fetch one order and open it with a status form.
    ///
    /// # Errors
    ///
    /// Returns error if the order is not found or the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn open(&mut self, id: &OrderId) -> Result<&Order> {
        let order = self.client.orders().get(id).await?;
        self.status_form = Some(StatusForm::from_order(&order));
        Ok(self.selected.insert(order))
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&Order> {
        self.selected.as_ref()
    }

    /// The open order's status form.
    ///
    /// # Errors
    ///
    /// Returns `NoOrderSelected` when no order is open.
    pub fn status_form_mut(&mut self) -> Result<&mut StatusForm> {
        self.status_form.as_mut().ok_or(AdminError::NoOrderSelected)
    }

    /// Apply the status form to the open order.
    ///
    /// # Errors
    ///
    /// Returns `NoOrderSelected`, `Form` for an invalid or unchanged status,
    /// or the backend error.
    #[instrument(skip(self))]
    pub async fn update_status(&mut self) -> Result<&Order> {
        let (Some(order), Some(form)) = (&self.selected, &self.status_form) else {
            return Err(AdminError::NoOrderSelected);
        };
        let update = form.validate()?;
        let updated = self
            .client
            .orders()
            .update_status(&order.id, &update)
            .await?;
        info!(order_id = %updated.id, status = %updated.status, "Order status changed");
        Ok(self.replace(updated))
    }

    /// Cancel the open order.
    ///
    /// # Errors
    ///
    /// Returns `NoOrderSelected`, `NotCancellable` once the order has
    /// shipped, or the backend error.
    #[instrument(skip(self))]
    pub async fn cancel(&mut self) -> Result<&Order> {
        let order = self.selected.as_ref().ok_or(AdminError::NoOrderSelected)?;
        if !order.status.is_cancellable() {
            return Err(AdminError::NotCancellable(order.status));
        }
        let cancelled = self.client.orders().cancel(&order.id).await?;
        info!(order_id = %cancelled.id, "Order cancelled");
        Ok(self.replace(cancelled))
    }

    /// Close the open order.
    pub fn close(&mut self) {
        self.selected = None;
        self.status_form = None;
    }

    fn replace(&mut self, order: Order) -> &Order {
        if let Some(slot) = self.page.items.iter_mut().find(|o| o.id == order.id) {
            slot.clone_from(&order);
        }
        self.status_form = Some(StatusForm::from_order(&order));
        self.selected.insert(order)
    }
}

fn order_row(order: &Order) -> TableRow {
    let customer = order
        .user
        .as_ref()
        .map(Ref::label_or_id)
        .or_else(|| order.shipping_address.as_ref().map(|a| a.full_name.clone()))
        .unwrap_or_else(|| "-".to_owned());
    TableRow::new(order.id.as_str())
        .cell("number", order.reference())
        .cell("customer", customer)
        .cell("items", order.item_count().to_string())
        .cell(
            "total",
            Price::new(order.total, CurrencyCode::default()).display(),
        )
        .cell(
            "payment",
            format!("{} / {}", order.payment_method, order.payment_status),
        )
        .cell("status", order.status.as_str())
        .cell(
            "created",
            order
                .created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use threadline_client::ClientConfig;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn order(status: &str) -> serde_json::Value {
        json!({
            "_id": "o1", "orderNumber": "TL-1001",
            "user": {"_id": "u1", "name": "Ada", "email": "ada@example.com"},
            "items": [{"product": "p1", "quantity": 2, "price": 10}],
            "paymentMethod": "online", "paymentStatus": "paid",
            "status": status, "total": 20
        })
    }

    fn screen(server: &MockServer) -> OrdersScreen {
        OrdersScreen::new(ApiClient::new(&ClientConfig::new(&server.uri()).unwrap()).unwrap())
    }

    #[test]
    fn test_status_form_rejects_unknown_and_unchanged() {
        let order: Order = serde_json::from_value(order("processing")).unwrap();
        let mut form = StatusForm::from_order(&order);
        assert_eq!(form.status, "processing");
        assert_eq!(
            form.validate().unwrap_err().get("status"),
            Some("order is already processing")
        );

        form.status = "lost".into();
        assert_eq!(
            form.validate().unwrap_err().get("status"),
            Some("invalid order status: lost")
        );

        form.status = "shipped".into();
        form.note = " via courier ".into();
        let update = form.validate().unwrap();
        assert_eq!(update.status, OrderStatus::Shipped);
        assert_eq!(update.note.as_deref(), Some("via courier"));
    }

    #[test]
    fn test_row_cells() {
        let order: Order = serde_json::from_value(order("pending")).unwrap();
        let row = order_row(&order);
        assert_eq!(row.get("number"), Some("TL-1001"));
        assert_eq!(row.get("customer"), Some("Ada"));
        assert_eq!(row.get("items"), Some("2"));
        assert_eq!(row.get("payment"), Some("online / paid"));
    }

    #[tokio::test]
    async fn test_status_filter_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .and(query_param("status", "shipped"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"orders": []})))
            .expect(1)
            .mount(&server)
            .await;

        let mut screen = screen(&server);
        screen.set_status_filter(Some(OrderStatus::Shipped));
        assert!(screen.load().await.unwrap().is_empty());
        assert!(screen.list_view().is_empty());
    }

    #[tokio::test]
    async fn test_update_status_refreshes_open_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders/o1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order("processing")))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/orders/o1/status"))
            .and(body_json(json!({"status": "shipped"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(order("shipped")))
            .expect(1)
            .mount(&server)
            .await;

        let mut screen = screen(&server);
        screen.open(&OrderId::new("o1")).await.unwrap();
        screen.status_form_mut().unwrap().status = "shipped".into();
        let updated = screen.update_status().await.unwrap();
        assert_eq!(updated.status, OrderStatus::Shipped);
        assert_eq!(screen.status_form_mut().unwrap().status, "shipped");
    }

    #[tokio::test]
    async fn test_shipped_order_cannot_be_cancelled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders/o1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order("shipped")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/orders/o1/cancel"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut screen = screen(&server);
        screen.open(&OrderId::new("o1")).await.unwrap();
        let err = screen.cancel().await.unwrap_err();
        assert!(matches!(err, AdminError::NotCancellable(OrderStatus::Shipped)));
    }
}
