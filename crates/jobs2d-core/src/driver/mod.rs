//! Driver model (point, driver trait, built-in variants).
//!
//! driver は座標コマンドを受け取るだけで、描画や I/O は行いません。
//! - logger: コマンドを tracing に記録
//! - animated: 線分を補間して内側の driver に渡す decorator
//! - line: `LineDrawer` を driver として使う adapter
//! - composite: 複数 driver への一斉転送

pub mod logger;
pub mod animated;
pub mod line;
pub mod composite;

use serde::{Deserialize, Serialize};

use crate::dispatch::variant::Variant;

pub use self::logger::LoggerDriver;
pub use self::animated::AnimatedDriverDecorator;
pub use self::line::{LineDrawer, LineDriverAdapter, RecordingLineDrawer, Segment};
pub use self::composite::DriverComposite;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `self` から `to` への線分上で `step / steps` の位置（整数に丸める）
    pub fn lerp(self, to: Point, step: u32, steps: u32) -> Point {
        if steps == 0 || step >= steps {
            return to;
        }
        let t = f64::from(step) / f64::from(steps);
        // 差分は i32 に収まらないことがあるので f64 で計算する
        let x = f64::from(self.x) + (f64::from(to.x) - f64::from(self.x)) * t;
        let y = f64::from(self.y) + (f64::from(to.y) - f64::from(self.y)) * t;
        // `as` は飽和変換なので i32 の範囲外にはならない
        Point::new(x.round() as i32, y.round() as i32)
    }
}

/// Job2dDriver は 2D ジョブの座標コマンドを受け取る
///
/// `Variant` は blanket impl されるので、実装側は 3 メソッドだけ書けばよい。
/// 具象型ごとの処理は `DriverVisitor` + `dispatch()` で行います。
pub trait Job2dDriver: Variant {
    /// ペンを上げたまま移動
    fn set_position(&mut self, to: Point);

    /// 現在位置から `to` まで操作（線を引く）
    fn operate_to(&mut self, to: Point);

    fn position(&self) -> Point;
}
