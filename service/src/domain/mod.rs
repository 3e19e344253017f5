//! Domain definitions.

pub mod coupon;
pub mod movie;
pub mod order;
pub mod room;
pub mod seat;
pub mod user;

pub use self::{
    coupon::Coupon, movie::Movie, order::Order, room::Room, seat::Seat,
    user::User,
};
