//! # 尺寸决策模块
//!
//! 纯函数：根据原生尺寸与外框约束计算输出尺寸，保持宽高比且绝不放大。
//!
//! 比例 `req / native` 用整数交叉相乘比较，向下取整也在整数域完成，
//! 避免浮点误差让受约束轴少一个像素。

use super::source::{Dimensions, ScaleRequest};

/// 有理数比例 `num / den`，`den > 0`。
#[derive(Debug, Clone, Copy)]
struct Ratio {
    num: u64,
    den: u64,
}

impl Ratio {
    fn of(requested: u32, native: u32) -> Self {
        Self {
            num: requested as u64,
            den: native as u64,
        }
    }

    /// `self < other`
    fn less_than(self, other: Self) -> bool {
        // 最大值约 2^64 以内：u32 * u32 不会溢出 u64。
        self.num * other.den < other.num * self.den
    }

    fn below_one(self) -> bool {
        self.num < self.den
    }

    fn apply_floor(self, value: u32) -> u32 {
        (value as u64 * self.num / self.den) as u32
    }
}

/// 计算输出尺寸。
///
/// - 未约束的轴不参与取最小值（等价于比例为无穷大）。
/// - `Some(0)` 的比例为 0，结果退化为零面积，这里不视为错误。
/// - 比例 >= 1 或两轴都未约束时返回原尺寸。
///
/// # Panics
///
/// 原生尺寸任一边为 0 时 panic；成功解码的图像不会出现这种情况。
///
/// # 示例
/// ```rust
/// use image_scale::scaler::{resolve, Dimensions, ScaleRequest};
///
/// let out = resolve(Dimensions::new(1920, 1080), ScaleRequest::new(Some(960), None));
/// assert_eq!(out, Dimensions::new(960, 540));
/// ```
pub fn resolve(native: Dimensions, request: ScaleRequest) -> Dimensions {
    assert!(
        !native.is_empty(),
        "原生尺寸必须为正数，实际为 {}",
        native
    );

    let width_ratio = request.width.map(|w| Ratio::of(w, native.width));
    let height_ratio = request.height.map(|h| Ratio::of(h, native.height));

    let ratio = match (width_ratio, height_ratio) {
        (None, None) => return native,
        (Some(r), None) | (None, Some(r)) => r,
        (Some(w), Some(h)) => {
            if h.less_than(w) {
                h
            } else {
                w
            }
        }
    };

    if !ratio.below_one() {
        return native;
    }

    Dimensions::new(ratio.apply_floor(native.width), ratio.apply_floor(native.height))
}
