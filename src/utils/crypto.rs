// 签名工具函数
// 按固定字段顺序拼接参数并追加商户API密钥，计算MD5/SHA256摘要，以及回调签名比较

use md5::Md5;
use sha2::{Digest, Sha256};

/// 摘要算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// MD5 (交易创建、交易查询、回调验证)
    Md5,
    /// SHA-256 (支付方式查询)
    Sha256,
}

/// 计算请求签名
///
/// 按传入顺序直接拼接所有字段 (不插入分隔符)，最后追加 `secret`，
/// 对拼接结果的UTF-8字节计算摘要。
///
/// # Arguments
/// * `algorithm` - 摘要算法
/// * `secret` - 商户API密钥
/// * `fields` - 按接口约定顺序排列的字段
///
/// # Returns
/// * 小写十六进制签名字符串
pub fn compute_digest(algorithm: DigestAlgorithm, secret: &str, fields: &[&str]) -> String {
    let capacity = fields.iter().map(|f| f.len()).sum::<usize>() + secret.len();
    let mut combined = String::with_capacity(capacity);
    for field in fields {
        combined.push_str(field);
    }
    combined.push_str(secret);

    match algorithm {
        DigestAlgorithm::Md5 => hex_digest::<Md5>(combined.as_bytes()),
        DigestAlgorithm::Sha256 => hex_digest::<Sha256>(combined.as_bytes()),
    }
}

/// 生成MD5签名
pub fn sign_md5(secret: &str, fields: &[&str]) -> String {
    compute_digest(DigestAlgorithm::Md5, secret, fields)
}

/// 生成SHA256签名
pub fn sign_sha256(secret: &str, fields: &[&str]) -> String {
    compute_digest(DigestAlgorithm::Sha256, secret, fields)
}

fn hex_digest<D: Digest>(input: &[u8]) -> String {
    hex::encode(D::digest(input))
}

/// 比较期望签名与收到的签名
///
/// 不区分大小写，逐字节异或累积后再判断，比较耗时与首个差异位置无关。
///
/// # Arguments
/// * `expected` - 本地重新计算的签名
/// * `received` - 回调中携带的签名
///
/// # Returns
/// * 签名是否一致
pub fn signatures_match(expected: &str, received: &str) -> bool {
    if expected.len() != received.len() {
        return false;
    }

    let mut result = 0u8;
    for (byte_a, byte_b) in expected.bytes().zip(received.bytes()) {
        result |= byte_a.to_ascii_lowercase() ^ byte_b.to_ascii_lowercase();
    }

    result == 0
}
