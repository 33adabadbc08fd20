//! Checkout wizard.
//!
//! Steps run in order: Address, Delivery, Review, Payment, Complete. Going
//! back to an earlier step is allowed until the order is placed; skipping
//! ahead is not.
//!
//! Placing the order creates a pending order on the backend and writes a
//! [`CheckoutData`] summary to session storage under `checkoutData`. The
//! payment step is a separate page: [`PaymentPage::load`] reads that summary
//! back and, once payment is confirmed, removes it. Cash-on-delivery orders
//! skip the payment call.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use threadline_client::ApiClient;
use threadline_core::models::{
    Cart, CheckoutRequest, DeliveryCheck, DeliveryOption, Order, PaymentConfirmation,
    ShippingAddress,
};
use threadline_core::{CurrencyCode, DeliveryOptionId, OrderId, PaymentMethod, Price};
use tracing::{info, instrument, warn};

use crate::address::AddressForm;
use crate::error::{Result, StorefrontError};
use crate::storage::SessionStore;

/// Wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckoutStep {
    Address,
    Delivery,
    Review,
    Payment,
    Complete,
}

impl CheckoutStep {
    /// Step title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Address => "Shipping address",
            Self::Delivery => "Delivery",
            Self::Review => "Review",
            Self::Payment => "Payment",
            Self::Complete => "Complete",
        }
    }

    /// Whether the order has been placed by the time this step is reached.
    #[must_use]
    pub const fn is_after_order(self) -> bool {
        matches!(self, Self::Payment | Self::Complete)
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary of a placed order, kept in session storage for the payment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutData {
    pub order_id: OrderId,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_charge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub payment_method: PaymentMethod,
}

impl CheckoutData {
    /// Amounts come from the order; a backend that omits totals falls back
    /// to the locally computed summary.
    fn from_order(order: &Order, fallback: &OrderSummary, method: PaymentMethod) -> Self {
        let (subtotal, delivery_charge, total) = if order.total.is_zero() {
            (fallback.subtotal, fallback.delivery_charge, fallback.total)
        } else {
            (order.subtotal, order.delivery_charge, order.total)
        };
        Self {
            order_id: order.id.clone(),
            order_number: order.order_number.clone(),
            subtotal,
            delivery_charge,
            total,
            payment_method: method,
        }
    }

    /// Amount due, formatted.
    #[must_use]
    pub fn total_label(&self) -> String {
        Price::new(self.total, CurrencyCode::default()).display()
    }
}

/// Chosen delivery option with the serviceability result for the address.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliverySelection {
    pub option: DeliveryOption,
    pub check: DeliveryCheck,
    pub charge: Decimal,
}

/// Money breakdown shown on the review step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub delivery_charge: Decimal,
    pub total: Decimal,
}

/// The checkout wizard.
#[derive(Debug)]
pub struct Checkout {
    client: ApiClient,
    store: SessionStore,
    step: CheckoutStep,
    cart: Cart,
    address: Option<ShippingAddress>,
    delivery: Option<DeliverySelection>,
    payment_method: Option<PaymentMethod>,
    order: Option<Order>,
}

impl Checkout {
    /// Begin checkout for the signed-in shopper's cart.
    ///
    /// # Errors
    ///
    /// Returns `NotSignedIn` without a stored user and token, `EmptyCart` when
    /// the cart has no lines, or the backend error.
    #[instrument(skip(client, store))]
    pub async fn start(client: ApiClient, store: SessionStore) -> Result<Self> {
        if store.user()?.is_none() || !client.has_token().await {
            return Err(StorefrontError::NotSignedIn);
        }
        let cart = client.cart().get().await?;
        if cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        info!(items = cart.item_count(), "Checkout started");
        Ok(Self {
            client,
            store,
            step: CheckoutStep::Address,
            cart,
            address: None,
            delivery: None,
            payment_method: None,
            order: None,
        })
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn address(&self) -> Option<&ShippingAddress> {
        self.address.as_ref()
    }

    /// Address form pre-filled with what was entered before, else the
    /// shopper's default saved address.
    ///
    /// # Errors
    ///
    /// Returns error if local storage cannot be read.
    pub fn address_form(&self) -> Result<AddressForm> {
        if let Some(address) = &self.address {
            return Ok(AddressForm::from_address(address));
        }
        Ok(self
            .store
            .user()?
            .and_then(|user| user.default_address().map(|a| AddressForm::from_address(&a.address)))
            .unwrap_or_default())
    }

    #[must_use]
    pub const fn delivery(&self) -> Option<&DeliverySelection> {
        self.delivery.as_ref()
    }

    #[must_use]
    pub const fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// The placed order, once `place_order` has succeeded.
    #[must_use]
    pub const fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    /// Cart subtotal, delivery charge and total.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        let subtotal = self.cart.subtotal();
        let delivery_charge = self.delivery.as_ref().map_or(Decimal::ZERO, |d| d.charge);
        OrderSummary {
            subtotal,
            delivery_charge,
            total: subtotal + delivery_charge,
        }
    }

    /// Move to `target`. Earlier steps are allowed before the order is
    /// placed; later steps are reached only through their actions.
    ///
    /// # Errors
    ///
    /// Returns `StepOrder` when skipping ahead or leaving a placed order.
    pub fn go_to(&mut self, target: CheckoutStep) -> Result<()> {
        if target == self.step {
            return Ok(());
        }
        if target > self.step || self.step.is_after_order() {
            return Err(self.out_of_order(target));
        }
        self.step = target;
        Ok(())
    }

    /// Step: Address. Validate and record the shipping address.
    ///
    /// # Errors
    ///
    /// Returns `Form` with every missing field, or `StepOrder` if not on the
    /// address step.
    pub fn set_address(&mut self, form: &AddressForm) -> Result<()> {
        self.expect_step(CheckoutStep::Address)?;
        let address = form.validate()?;
        if self
            .address
            .as_ref()
            .is_some_and(|old| old.postal_code != address.postal_code)
        {
            self.delivery = None;
        }
        self.address = Some(address);
        self.step = CheckoutStep::Delivery;
        Ok(())
    }

    /// Delivery options on offer.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    pub async fn delivery_options(&self) -> Result<Vec<DeliveryOption>> {
        Ok(self.client.delivery().options().await?)
    }

    /// Step: Delivery. Check the address is serviceable and record the
    /// option and its charge.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDeliveryOption`, `NotServiceable`, `StepOrder` or the
    /// backend error.
    #[instrument(skip(self), fields(option_id = %option_id))]
    pub async fn choose_delivery(&mut self, option_id: &DeliveryOptionId) -> Result<()> {
        self.expect_step(CheckoutStep::Delivery)?;
        let postal_code = self
            .address
            .as_ref()
            .map(|a| a.postal_code.clone())
            .ok_or_else(|| self.out_of_order(CheckoutStep::Delivery))?;

        let delivery = self.client.delivery();
        let (options, check) = tokio::join!(delivery.options(), delivery.check(&postal_code));
        let option = options?
            .into_iter()
            .find(|o| &o.id == option_id)
            .ok_or_else(|| StorefrontError::UnknownDeliveryOption(option_id.to_string()))?;
        let check = check?;
        if !check.serviceable {
            warn!(%postal_code, "Postal code not serviceable");
            return Err(StorefrontError::NotServiceable {
                postal_code,
                message: check
                    .message
                    .clone()
                    .unwrap_or_else(|| "delivery is not available".to_owned()),
            });
        }

        let charge = check.charge.unwrap_or(option.charge);
        self.delivery = Some(DeliverySelection {
            option,
            check,
            charge,
        });
        self.step = CheckoutStep::Review;
        Ok(())
    }

    /// Step: Review. Pick cash on delivery or online payment.
    ///
    /// # Errors
    ///
    /// Returns `StepOrder` if not on the review step.
    pub fn choose_payment(&mut self, method: PaymentMethod) -> Result<()> {
        self.expect_step(CheckoutStep::Review)?;
        self.payment_method = Some(method);
        Ok(())
    }

    /// Step: Review. Create the pending order and store `checkoutData`.
    ///
    /// Online orders move to the payment step. Cash-on-delivery orders are
    /// complete at once and their `checkoutData` is cleared.
    ///
    /// # Errors
    ///
    /// Returns `PaymentMethodRequired`, `StepOrder`, a storage error or the
    /// backend error.
    #[instrument(skip(self))]
    pub async fn place_order(&mut self) -> Result<&Order> {
        self.expect_step(CheckoutStep::Review)?;
        let method = self
            .payment_method
            .ok_or(StorefrontError::PaymentMethodRequired)?;
        let (Some(address), Some(delivery)) = (&self.address, &self.delivery) else {
            return Err(self.out_of_order(CheckoutStep::Review));
        };

        let request = CheckoutRequest {
            shipping_address: address.clone(),
            delivery_option: Some(delivery.option.id.clone()),
            payment_method: method,
        };
        let order = self.client.orders().initiate_checkout(&request).await?;
        let data = CheckoutData::from_order(&order, &self.summary(), method);
        self.store.set_checkout_data(&data)?;
        info!(order_id = %order.id, %method, total = %data.total, "Order placed");

        if method.requires_payment_step() {
            self.step = CheckoutStep::Payment;
        } else {
            self.store.remove_checkout_data()?;
            self.step = CheckoutStep::Complete;
        }
        Ok(&*self.order.insert(order))
    }

    /// Step: Payment. Confirm payment through the payment page.
    ///
    /// # Errors
    ///
    /// Returns `StepOrder` if not on the payment step, `MissingCheckoutData`
    /// if the session lost the pending order, or the backend error.
    pub async fn confirm_payment(
        &mut self,
        reference: &str,
        provider: Option<&str>,
    ) -> Result<&Order> {
        self.expect_step(CheckoutStep::Payment)?;
        let page = PaymentPage::load(self.client.clone(), self.store.clone())?;
        let order = page.confirm(reference, provider).await?;
        self.step = CheckoutStep::Complete;
        Ok(&*self.order.insert(order))
    }

    fn expect_step(&self, step: CheckoutStep) -> Result<()> {
        if self.step == step {
            Ok(())
        } else {
            Err(self.out_of_order(step))
        }
    }

    const fn out_of_order(&self, to: CheckoutStep) -> StorefrontError {
        StorefrontError::StepOrder {
            from: self.step,
            to,
        }
    }
}

/// The payment page, opened with a pending order in session storage.
#[derive(Debug)]
pub struct PaymentPage {
    client: ApiClient,
    store: SessionStore,
    data: CheckoutData,
}

impl PaymentPage {
    /// Read the pending order from session storage.
    ///
    /// # Errors
    ///
    /// Returns `MissingCheckoutData` when there is no pending order.
    pub fn load(client: ApiClient, store: SessionStore) -> Result<Self> {
        let data = store
            .checkout_data()?
            .ok_or(StorefrontError::MissingCheckoutData)?;
        Ok(Self {
            client,
            store,
            data,
        })
    }

    /// The pending order summary.
    #[must_use]
    pub const fn data(&self) -> &CheckoutData {
        &self.data
    }

    /// Record the payment and clear the pending order.
    ///
    /// Cash-on-delivery orders need no payment call; the stored order is
    /// fetched instead.
    ///
    /// # Errors
    ///
    /// Returns the backend error; `checkoutData` is kept so payment can be
    /// retried.
    #[instrument(skip(self), fields(order_id = %self.data.order_id))]
    pub async fn confirm(self, reference: &str, provider: Option<&str>) -> Result<Order> {
        let orders = self.client.orders();
        let order = if self.data.payment_method.requires_payment_step() {
            let confirmation = PaymentConfirmation {
                reference: reference.to_owned(),
                provider: provider.map(str::to_owned),
                amount: self.data.total,
            };
            orders
                .confirm_payment(&self.data.order_id, &confirmation)
                .await?
        } else {
            orders.get(&self.data.order_id).await?
        };
        self.store.remove_checkout_data()?;
        info!(status = %order.payment_status, "Payment confirmed");
        Ok(order)
    }
}
