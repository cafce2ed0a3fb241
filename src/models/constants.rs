// 网关常量定义
// 支付方式代码、交易状态码、订阅周期类型

/// 支付方式代码
pub mod payment_method {
    // 虚拟账户
    /// BCA Virtual Account
    pub const BCA: &str = "BC";
    /// Mandiri Virtual Account
    pub const MANDIRI: &str = "M2";
    /// Permata Virtual Account
    pub const PERMATA: &str = "BT";
    /// BNI Virtual Account
    pub const BNI: &str = "I1";
    /// BRI Virtual Account
    pub const BRI: &str = "BR";
    /// CIMB Niaga Virtual Account
    pub const CIMB: &str = "B1";
    /// Danamon Virtual Account
    pub const DANAMON: &str = "DN";
    /// Maybank Virtual Account
    pub const MAYBANK: &str = "VA";
    /// Sahabat Sampoerna Virtual Account
    pub const SAHABAT_SAMPOERNA: &str = "SA";
    /// BSI Virtual Account
    pub const BSI: &str = "S1";

    // 电子钱包
    /// OVO
    pub const OVO: &str = "OV";
    /// ShopeePay
    pub const SHOPEE_PAY: &str = "SP";
    /// LinkAja
    pub const LINK_AJA: &str = "LA";
    /// DANA
    pub const DANA: &str = "DA";

    /// QRIS
    pub const QRIS: &str = "QR";

    // 零售网点
    /// Alfamart
    pub const ALFAMART: &str = "A1";
    /// Indomaret
    pub const INDOMARET: &str = "IR";

    /// Credit Card
    pub const CREDIT_CARD: &str = "VC";

    // 先享后付
    /// Akulaku
    pub const AKULAKU: &str = "AK";
    /// Kredivo
    pub const KREDIVO: &str = "K1";
    /// Atome
    pub const ATOME: &str = "AT";
}

/// 交易/回调状态码
pub mod status {
    pub const SUCCESS: &str = "00";
    pub const PENDING: &str = "01";
    pub const FAILED: &str = "02";
    pub const CANCELLED: &str = "03";
    pub const EXPIRED: &str = "04";
}

/// 信用卡订阅周期类型
pub mod frequency {
    pub const DAILY: i32 = 1;
    pub const WEEKLY: i32 = 2;
    pub const MONTHLY: i32 = 3;
    pub const YEARLY: i32 = 4;
}

/// 判断状态码是否表示成功
///
/// 只有字符串 "00" 视为成功，保留前导零，不做数字比较。
pub fn is_success_code(code: &str) -> bool {
    code == status::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success_code() {
        assert!(is_success_code("00"));
        for code in ["", "0", "000", "01", "02", "03", "04", " 00"] {
            assert!(!is_success_code(code), "code {:?} should not be success", code);
        }
    }
}
