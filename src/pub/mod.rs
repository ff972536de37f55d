//! Legacy official account subscriber client
//!
//! [`Subscriber`] predates the action facades: each method takes the access
//! token and performs the request directly.

mod subscriber;

pub use subscriber::{Subscriber, SubscriberInfo, SubscriberList, MAX_SUBSCRIBER_LIST_COUNT};
