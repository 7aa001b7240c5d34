//! 画像解析プロンプト
//!
//! 視覚言語モデルに病名だけを返させ、眼が写っていない場合は決まった文言を返させる。

use crate::condition::{conditions, Category};

/// 眼が写っていない場合にモデルへ返させる文言
pub const NO_EYE_DETECTED: &str = "No eye detected";

/// 眼画像用プロンプト
///
/// # Arguments
/// * `image_count` - 送信する画像の枚数（2枚なら左眼・右眼の順）
pub fn build_eye_prompt(image_count: usize) -> String {
    let known = conditions(Category::Eye)
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ");

    let subject = if image_count >= 2 {
        "these two eye images (left eye first, then right eye)"
    } else {
        "this eye image"
    };

    format!(
        "Only return the name of the eye disease visible in {subject}. \
         Prefer one of: {known}. \
         If there is no human eye in the image, return exactly \"{NO_EYE_DETECTED}\". \
         Do not give extra text."
    )
}
