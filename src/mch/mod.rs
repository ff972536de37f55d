//! Payment gateway constants
//!
//! Only the enumerated values used in payment requests and notifications
//! live here. Request signing is not provided.

mod consts;

pub use consts::*;

use serde::{Deserialize, Serialize};

/// Trade type of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    /// In-app payment
    App,
    /// JSAPI or mini-program payment
    Jsapi,
    /// H5 payment
    Mweb,
    /// QR code payment
    Native,
    /// Contract renewal
    Pap,
    /// Payment code scanned by the merchant
    Micropay,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::App => "APP",
            TradeType::Jsapi => "JSAPI",
            TradeType::Mweb => "MWEB",
            TradeType::Native => "NATIVE",
            TradeType::Pap => "PAP",
            TradeType::Micropay => "MICROPAY",
        }
    }
}

/// Signature algorithm of a payment request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignType {
    #[default]
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "HMAC-SHA256")]
    HmacSha256,
}

impl SignType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignType::Md5 => "MD5",
            SignType::HmacSha256 => "HMAC-SHA256",
        }
    }
}

/// Order state returned by order queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeState {
    #[serde(rename = "SUCCESS")]
    Success,
    /// Refund started
    #[serde(rename = "REFUND")]
    Refund,
    #[serde(rename = "NOTPAY")]
    NotPay,
    #[serde(rename = "CLOSED")]
    Closed,
    /// Revoked micropay order
    #[serde(rename = "REVOKED")]
    Revoked,
    #[serde(rename = "USERPAYING")]
    UserPaying,
    /// Accepted, waiting for deduction
    #[serde(rename = "ACCEPT")]
    Accept,
    #[serde(rename = "PAYERROR")]
    PayError,
    /// Failed for other reasons, e.g. rejected by the bank
    #[serde(rename = "PAY_FAIL")]
    PayFail,
}

impl TradeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeState::Success => "SUCCESS",
            TradeState::Refund => "REFUND",
            TradeState::NotPay => "NOTPAY",
            TradeState::Closed => "CLOSED",
            TradeState::Revoked => "REVOKED",
            TradeState::UserPaying => "USERPAYING",
            TradeState::Accept => "ACCEPT",
            TradeState::PayError => "PAYERROR",
            TradeState::PayFail => "PAY_FAIL",
        }
    }

    /// No further transition will happen
    pub fn is_final(&self) -> bool {
        !matches!(
            self,
            TradeState::NotPay | TradeState::UserPaying | TradeState::Accept
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefundStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "REFUNDCLOSE")]
    Closed,
    #[serde(rename = "PROCESSING")]
    Processing,
    /// Refund failed and needs manual handling
    #[serde(rename = "CHANGE")]
    Change,
}

impl RefundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundStatus::Success => "SUCCESS",
            RefundStatus::Closed => "REFUNDCLOSE",
            RefundStatus::Processing => "PROCESSING",
            RefundStatus::Change => "CHANGE",
        }
    }
}

/// Where refunded money goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundChannel {
    Original,
    Balance,
    OtherBalance,
    #[serde(rename = "OTHER_BANKCARD")]
    OtherBankCard,
}

impl RefundChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundChannel::Original => "ORIGINAL",
            RefundChannel::Balance => "BALANCE",
            RefundChannel::OtherBalance => "OTHER_BALANCE",
            RefundChannel::OtherBankCard => "OTHER_BANKCARD",
        }
    }
}

/// Daily bill selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillType {
    /// All orders except recharge refunds
    #[default]
    All,
    Success,
    Refund,
    RechargeRefund,
}

impl BillType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillType::All => "ALL",
            BillType::Success => "SUCCESS",
            BillType::Refund => "REFUND",
            BillType::RechargeRefund => "RECHARGE_REFUND",
        }
    }
}

/// Merchant fund account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Basic,
    Operation,
    Fees,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Basic => "Basic",
            AccountType::Operation => "Operation",
            AccountType::Fees => "Fees",
        }
    }
}
