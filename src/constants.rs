// Audit actions
pub const GROUP_CREATED: &str = "GROUP_CREATED";
pub const MEMBER_ADDED: &str = "MEMBER_ADDED";
pub const EXPENSE_ADDED: &str = "EXPENSE_ADDED";
pub const EXPENSE_REMOVED: &str = "EXPENSE_REMOVED";
pub const SETTLEMENT_RECORDED: &str = "SETTLEMENT_RECORDED";
pub const SETTLEMENT_REJECTED: &str = "SETTLEMENT_REJECTED";
pub const SETTLEMENTS_CLEARED: &str = "SETTLEMENTS_CLEARED";

// Input limits
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 255;
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Shares may differ from the expense amount by at most this much.
pub const SPLIT_TOLERANCE: f64 = 0.01;
