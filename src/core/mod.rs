//! Core storefront state: cart, recently-viewed tracker, checkout wizard.

pub mod cart;
pub mod checkout;
pub mod recently_viewed;

pub use cart::{CART_SLOT, CartAction, CartLineItem, CartStore, NewCartItem, apply};
pub use checkout::{
    CheckoutState, CheckoutStep, Coupon, CouponError, MockGateway, Order, OrderConfirmation,
    OrderGateway, PriceBreakdown, StepBlocked,
};
pub use recently_viewed::{
    DEFAULT_CAPACITY, RECENTLY_VIEWED_SLOT, RecentlyViewedEntry, RecentlyViewedStore,
    ViewedProduct,
};
