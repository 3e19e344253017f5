//! [`Command`] definition.

pub mod apply_order_coupon;
pub mod cancel_order;
pub mod create_coupon;
pub mod create_movie;
pub mod create_order;
pub mod create_room;
pub mod create_user;
pub mod pay_order;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    apply_order_coupon::ApplyOrderCoupon, cancel_order::CancelOrder,
    create_coupon::CreateCoupon, create_movie::CreateMovie,
    create_order::CreateOrder, create_room::CreateRoom,
    create_user::CreateUser, pay_order::PayOrder,
};
