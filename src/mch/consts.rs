// Return and result codes
pub const RESULT_SUCCESS: &str = "SUCCESS";
pub const RESULT_FAIL: &str = "FAIL";
/// Query matched nothing
pub const RESULT_NULL: &str = "RESULT NULL";
pub const NOT_FOUND: &str = "NOT_FOUND";
/// Gateway busy, retry later
pub const SYSTEM_ERROR: &str = "SYSTEMERROR";
pub const ORDER_NOT_EXIST: &str = "ORDERNOTEXIST";
pub const REFUND_NOT_EXIST: &str = "REFUNDNOTEXIST";

/// Value of `limit_pay` forbidding credit cards
pub const NO_CREDIT: &str = "no_credit";
pub const COUPON_TYPE_CASH: &str = "CASH";
pub const COUPON_TYPE_NO_CASH: &str = "NO_CASH";

// Contract change type
pub const CONTRACT_ADD: &str = "ADD";
pub const CONTRACT_DELETE: &str = "DELETE";

// Contract entrust state
pub const CONTRACT_ENTRUST_OK: &str = "0";
pub const CONTRACT_ENTRUST_UNDO: &str = "1";
pub const CONTRACT_ENTRUST_PROCESSING: &str = "9";

// Contract termination mode
pub const CONTRACT_DELETE_UNDO: &str = "0";
pub const CONTRACT_DELETE_EXPIRED: &str = "1";
pub const CONTRACT_DELETE_USER: &str = "2";
pub const CONTRACT_DELETE_API: &str = "3";
pub const CONTRACT_DELETE_PLATFORM: &str = "4";
pub const CONTRACT_DELETE_LOGOUT: &str = "5";
/// Terminated through customer service
pub const CONTRACT_DELETE_CONTACT: &str = "7";

// Transfer real-name check
pub const TRANSFER_NO_CHECK: &str = "NO_CHECK";
pub const TRANSFER_FORCE_CHECK: &str = "FORCE_CHECK";

// Transfer status
pub const TRANSFER_STATUS_PROCESSING: &str = "PROCESSING";
pub const TRANSFER_STATUS_SUCCESS: &str = "SUCCESS";
pub const TRANSFER_STATUS_FAILED: &str = "FAILED";
pub const TRANSFER_STATUS_BANK_FAIL: &str = "BANK_FAIL";

// Redpack scene
pub const REDPACK_SCENE_PROMOTION: &str = "PRODUCT_1";
pub const REDPACK_SCENE_LOTTERY: &str = "PRODUCT_2";
pub const REDPACK_SCENE_VIRTUAL_PRIZE: &str = "PRODUCT_3";
pub const REDPACK_SCENE_EMPLOYEE_WELFARE: &str = "PRODUCT_4";
pub const REDPACK_SCENE_CHANNEL_SHARE: &str = "PRODUCT_5";
pub const REDPACK_SCENE_INSURANCE: &str = "PRODUCT_6";
pub const REDPACK_SCENE_LOTTERY_PRIZE: &str = "PRODUCT_7";
pub const REDPACK_SCENE_TAX_SCRATCH: &str = "PRODUCT_8";

// Redpack status
pub const REDPACK_STATUS_SENDING: &str = "SENDING";
/// Sent, waiting to be received
pub const REDPACK_STATUS_SENT: &str = "SENT";
pub const REDPACK_STATUS_FAILED: &str = "FAILED";
pub const REDPACK_STATUS_RECEIVED: &str = "RECEIVED";
/// The gateway spells it this way
pub const REDPACK_STATUS_REFUNDING: &str = "RFUND_ING";
pub const REDPACK_STATUS_REFUND: &str = "REFUND";

pub const REDPACK_TYPE_NORMAL: &str = "NORMAL";
pub const REDPACK_TYPE_GROUP: &str = "GROUP";

pub const REDPACK_SEND_TYPE_API: &str = "API";
pub const REDPACK_SEND_TYPE_UPLOAD: &str = "UPLOAD";
pub const REDPACK_SEND_TYPE_ACTIVITY: &str = "ACTIVITY";

// Work wechat payment message
pub const WORK_WX_NORMAL_MSG: &str = "NORMAL_MSG";
pub const WORK_WX_APPROVAL_MSG: &str = "APPROVAL_MSG";
