//! Checkout wizard: a linear address → payment → review flow with coupon
//! validation and deterministic pricing.
//!
//! Coupons, addresses, payment methods, and delivery options are static
//! in-memory data; there is no backend. Order submission goes through the
//! [`OrderGateway`] trait, whose only real implementation simulates a
//! gateway with a fixed delay and unconditional success.

use crate::config::CheckoutConfig;
use crate::core::cart::CartLineItem;
use chrono::{DateTime, Utc};
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// The three numbered wizard steps. Order submission is an ephemeral
/// processing phase entered from `Review`, not a step of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    Address,
    Payment,
    Review,
}

/// Why the wizard refused to advance or submit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepBlocked {
    #[error("Select a delivery address first")]
    AddressRequired,

    #[error("Select a payment method first")]
    PaymentRequired,

    #[error("Review the order before placing it")]
    ReviewRequired,
}

/// Coupon validation failures. These are surfaced to the user as inline
/// messages; they never block wizard progression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CouponError {
    #[error("Invalid coupon code")]
    InvalidCode,

    #[error("Minimum order amount of \u{9f3}{min} required for this coupon")]
    MinimumNotMet { min: f64 },

    #[error("This coupon is already applied")]
    AlreadyApplied,
}

/// Discount shape of a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponKind {
    /// `discount` is a percentage of the subtotal.
    Percentage,
    /// `discount` is a flat amount.
    Fixed,
}

/// A coupon code with a minimum-order threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Coupon {
    pub code: &'static str,
    pub discount: f64,
    pub kind: CouponKind,
    pub description: &'static str,
    pub min_amount: f64,
}

impl Coupon {
    /// Discount this coupon yields on a given subtotal.
    #[must_use]
    pub fn discount_on(&self, subtotal: f64) -> f64 {
        match self.kind {
            CouponKind::Percentage => subtotal * (self.discount / 100.0),
            CouponKind::Fixed => self.discount,
        }
    }
}

/// Available coupon codes.
pub const COUPONS: &[Coupon] = &[
    Coupon {
        code: "SAVE10",
        discount: 10.0,
        kind: CouponKind::Percentage,
        description: "10% off on orders above \u{9f3}2000",
        min_amount: 2000.0,
    },
    Coupon {
        code: "FLAT500",
        discount: 500.0,
        kind: CouponKind::Fixed,
        description: "\u{9f3}500 off on orders above \u{9f3}5000",
        min_amount: 5000.0,
    },
    Coupon {
        code: "NEWUSER",
        discount: 15.0,
        kind: CouponKind::Percentage,
        description: "15% off for new users",
        min_amount: 1000.0,
    },
    Coupon {
        code: "FURNITURE20",
        discount: 20.0,
        kind: CouponKind::Percentage,
        description: "20% off on furniture",
        min_amount: 3000.0,
    },
    Coupon {
        code: "WELCOME",
        discount: 200.0,
        kind: CouponKind::Fixed,
        description: "\u{9f3}200 off on first order",
        min_amount: 1500.0,
    },
];

/// Look up a coupon by code, case-insensitively.
#[must_use]
pub fn find_coupon(code: &str) -> Option<&'static Coupon> {
    COUPONS.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// A delivery option with a fixed fee.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryOption {
    pub id: &'static str,
    pub name: &'static str,
    pub time: &'static str,
    pub cost: f64,
    pub description: &'static str,
}

/// Available delivery options.
pub const DELIVERY_OPTIONS: &[DeliveryOption] = &[
    DeliveryOption {
        id: "standard",
        name: "Standard Delivery",
        time: "5-7 business days",
        cost: 100.0,
        description: "Free for orders over \u{9f3}5000",
    },
    DeliveryOption {
        id: "express",
        name: "Express Delivery",
        time: "2-3 business days",
        cost: 200.0,
        description: "Faster delivery",
    },
    DeliveryOption {
        id: "premium",
        name: "Premium Delivery",
        time: "Next business day",
        cost: 500.0,
        description: "White glove service",
    },
];

/// A saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: &'static str,
    pub label: &'static str,
    pub address_line: &'static str,
    pub region: &'static str,
    pub city: &'static str,
    pub area: &'static str,
    pub zone: &'static str,
    pub postal_code: &'static str,
    pub phone: &'static str,
    pub extra_phone: Option<&'static str>,
    pub additional_info: Option<&'static str>,
    pub is_default: bool,
}

/// Saved addresses. In a real system these would come from an account
/// service; here they are a static fixture.
pub const SAVED_ADDRESSES: &[Address] = &[
    Address {
        id: "1",
        label: "Home",
        address_line: "Jl. Sudirman No. 123, Apartment Block A, Unit 15",
        region: "Dhaka",
        city: "Dhaka",
        area: "Dhanmondi",
        zone: "Dhanmondi 15",
        postal_code: "1209",
        phone: "+880 1711 111111",
        extra_phone: Some("+880 1611 111111"),
        additional_info: Some("Near the main gate, blue building"),
        is_default: true,
    },
    Address {
        id: "2",
        label: "Office",
        address_line: "House 45, Road 12, Block C, Banani",
        region: "Dhaka",
        city: "Dhaka",
        area: "Banani",
        zone: "Banani Commercial Area",
        postal_code: "1213",
        phone: "+880 1722 222222",
        extra_phone: None,
        additional_info: None,
        is_default: false,
    },
];

/// Kind of payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentKind {
    Card,
    Mobile,
    Bank,
}

/// A payment method choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethod {
    pub id: &'static str,
    pub kind: PaymentKind,
    pub name: &'static str,
    pub details: Option<&'static str>,
}

/// Available payment methods.
pub const PAYMENT_METHODS: &[PaymentMethod] = &[
    PaymentMethod {
        id: "bkash",
        kind: PaymentKind::Mobile,
        name: "bKash",
        details: Some("**** **** **** 1234"),
    },
    PaymentMethod {
        id: "nagad",
        kind: PaymentKind::Mobile,
        name: "Nagad",
        details: Some("**** **** **** 5678"),
    },
    PaymentMethod {
        id: "rocket",
        kind: PaymentKind::Mobile,
        name: "Rocket",
        details: Some("**** **** **** 9012"),
    },
    PaymentMethod {
        id: "card",
        kind: PaymentKind::Card,
        name: "Credit/Debit Card",
        details: None,
    },
    PaymentMethod {
        id: "bank",
        kind: PaymentKind::Bank,
        name: "Bank Transfer",
        details: None,
    },
    PaymentMethod {
        id: "cod",
        kind: PaymentKind::Mobile,
        name: "Cash on Delivery",
        details: None,
    },
];

/// Delivery cost for a method at a given subtotal.
///
/// Standard delivery is free at or above the threshold; an unknown method
/// id costs nothing.
#[must_use]
pub fn delivery_cost(method: &str, subtotal: f64, config: &CheckoutConfig) -> f64 {
    if method == "standard" && subtotal >= config.free_delivery_threshold {
        return 0.0;
    }
    DELIVERY_OPTIONS
        .iter()
        .find(|opt| opt.id == method)
        .map_or(0.0, |opt| opt.cost)
}

/// Fully priced order summary.
///
/// The discount is applied before tax; that order of operations is
/// contractual.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub subtotal: f64,
    pub delivery: f64,
    pub discount: f64,
    pub tax: f64,
    pub total: f64,
}

/// Compute the order total: `subtotal + delivery + tax - discount`, with
/// `tax = rate x (subtotal - discount)`.
#[must_use]
pub fn price_order(
    subtotal: f64,
    delivery_method: &str,
    coupon: Option<&Coupon>,
    config: &CheckoutConfig,
) -> PriceBreakdown {
    let discount = coupon.map_or(0.0, |c| c.discount_on(subtotal));
    let tax = (subtotal - discount) * config.tax_rate;
    let delivery = delivery_cost(delivery_method, subtotal, config);

    PriceBreakdown {
        subtotal,
        delivery,
        discount,
        tax,
        total: subtotal + delivery + tax - discount,
    }
}

/// Component-local state of the checkout wizard.
#[derive(Debug, Clone)]
pub struct CheckoutState {
    step: CheckoutStep,
    pub selected_address: Option<String>,
    pub selected_payment: Option<String>,
    pub delivery_method: String,
    pub special_instructions: String,
    pub applied_coupon: Option<&'static Coupon>,
}

impl CheckoutState {
    /// Start the wizard at the address step, preselecting the default
    /// saved address.
    #[must_use]
    pub fn new() -> Self {
        let default_address = SAVED_ADDRESSES
            .iter()
            .find(|addr| addr.is_default)
            .map(|addr| addr.id.to_string());

        Self {
            step: CheckoutStep::Address,
            selected_address: default_address,
            selected_payment: None,
            delivery_method: "standard".to_string(),
            special_instructions: String::new(),
            applied_coupon: None,
        }
    }

    #[must_use]
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Advance one step, enforcing the guard conditions.
    ///
    /// # Errors
    ///
    /// Returns what is missing when a guard fails; the wizard stays put.
    pub fn next_step(&mut self) -> Result<CheckoutStep, StepBlocked> {
        match self.step {
            CheckoutStep::Address => {
                if self.selected_address.is_none() {
                    return Err(StepBlocked::AddressRequired);
                }
                self.step = CheckoutStep::Payment;
            }
            CheckoutStep::Payment => {
                if self.selected_payment.is_none() {
                    return Err(StepBlocked::PaymentRequired);
                }
                self.step = CheckoutStep::Review;
            }
            CheckoutStep::Review => {}
        }
        Ok(self.step)
    }

    /// Go back one step, saturating at the address step.
    pub fn prev_step(&mut self) -> CheckoutStep {
        self.step = match self.step {
            CheckoutStep::Review => CheckoutStep::Payment,
            CheckoutStep::Payment | CheckoutStep::Address => CheckoutStep::Address,
        };
        self.step
    }

    /// Validate and apply a coupon against the current subtotal.
    ///
    /// A different valid coupon replaces the currently applied one.
    ///
    /// # Errors
    ///
    /// Returns a distinct [`CouponError`] for an unknown code, an unmet
    /// minimum, or a duplicate application. The wizard itself is
    /// unaffected by a failure.
    pub fn apply_coupon(
        &mut self,
        code: &str,
        subtotal: f64,
    ) -> Result<&'static Coupon, CouponError> {
        let Some(coupon) = find_coupon(code) else {
            return Err(CouponError::InvalidCode);
        };

        if subtotal < coupon.min_amount {
            return Err(CouponError::MinimumNotMet {
                min: coupon.min_amount,
            });
        }

        if self.applied_coupon.is_some_and(|c| c.code == coupon.code) {
            return Err(CouponError::AlreadyApplied);
        }

        self.applied_coupon = Some(coupon);
        Ok(coupon)
    }

    /// Drop the applied coupon, if any.
    pub fn remove_coupon(&mut self) {
        self.applied_coupon = None;
    }

    /// Price the order as it stands.
    #[must_use]
    pub fn summary(&self, subtotal: f64, config: &CheckoutConfig) -> PriceBreakdown {
        price_order(
            subtotal,
            &self.delivery_method,
            self.applied_coupon,
            config,
        )
    }

    /// Submit the order through a gateway. Only valid from the review
    /// step; the processing phase is the gateway call itself.
    ///
    /// # Errors
    ///
    /// Returns [`StepBlocked::ReviewRequired`] when called early.
    pub fn place_order<G: OrderGateway>(
        &self,
        gateway: &G,
        order: &Order,
    ) -> Result<OrderConfirmation, StepBlocked> {
        if self.step != CheckoutStep::Review {
            return Err(StepBlocked::ReviewRequired);
        }
        Ok(gateway.submit(order))
    }
}

impl Default for CheckoutState {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully assembled order, ready for submission.
#[derive(Debug, Clone)]
pub struct Order {
    pub items: Vec<CartLineItem>,
    pub address_id: String,
    pub payment_id: String,
    pub delivery_method: String,
    pub special_instructions: String,
    pub pricing: PriceBreakdown,
}

/// Confirmation returned by the order gateway.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    pub order_id: String,
    pub placed_at: DateTime<Utc>,
}

/// External order-submission collaborator.
///
/// The contract is trivial by design: submission always succeeds. No real
/// payment protocol exists behind this seam.
pub trait OrderGateway {
    fn submit(&self, order: &Order) -> OrderConfirmation;
}

/// Gateway stand-in: waits a fixed delay, then confirms.
#[derive(Debug)]
pub struct MockGateway {
    delay: Duration,
}

impl MockGateway {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl OrderGateway for MockGateway {
    fn submit(&self, _order: &Order) -> OrderConfirmation {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let placed_at = Utc::now();
        OrderConfirmation {
            order_id: format!("CTH-{}", placed_at.timestamp_millis()),
            placed_at,
        }
    }
}
