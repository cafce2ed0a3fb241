// 工具函数模块
// 包含签名、验证、二维码生成等通用工具

pub mod crypto;
pub mod qr;
pub mod validation;

// 重新导出常用函数
pub use crypto::*;
pub use qr::*;
pub use validation::*;
