//! Customer service accounts
//!
//! # Endpoints
//!
//! - [`get_account_list`] - all customer service accounts
//! - [`get_online_list`] - accounts currently online
//! - [`add_account`] / [`update_account`] / [`delete_account`]
//! - [`invite_worker`] - bind a personal WeChat to an account
//! - [`upload_avatar`] - set an account's avatar

mod account;

pub use account::{
    add_account, delete_account, get_account_list, get_online_list, invite_worker,
    update_account, upload_avatar, upload_avatar_bytes, Account, InviteStatus, Online,
};
