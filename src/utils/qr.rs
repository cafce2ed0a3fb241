// 二维码生成工具
// 将网关返回的QRIS qrString渲染为可直接嵌入页面的PNG图片

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageEncoder, Luma};
use qrcode::QrCode;

/// 渲染QRIS二维码
///
/// # Arguments
/// * `qr_string` - 创建交易响应中的 `qrString`
///
/// # Returns
/// * `data:image/png;base64,...` 格式的图片数据
pub fn qr_string_to_data_url(qr_string: &str) -> Result<String> {
    if !is_qris_payload(qr_string) {
        anyhow::bail!("Not a QRIS payload");
    }

    let qr_code = QrCode::new(qr_string.as_bytes()).context("Failed to create QR code")?;

    let image = qr_code
        .render::<Luma<u8>>()
        .min_dimensions(300, 300)
        .build();

    let mut png_data = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png_data)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::L8,
        )
        .context("Failed to encode PNG")?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png_data)))
}

/// 检查是否为EMVCo格式的QRIS内容
///
/// 载荷以 "000201" (格式版本) 开头，以 "6304" + 4位CRC结尾。
pub fn is_qris_payload(content: &str) -> bool {
    if !content.is_ascii() || !content.starts_with("000201") || content.len() < 14 {
        return false;
    }

    let crc_tag = &content[content.len() - 8..content.len() - 4];
    let crc = &content[content.len() - 4..];

    crc_tag == "6304" && crc.chars().all(|c| c.is_ascii_hexdigit())
}
