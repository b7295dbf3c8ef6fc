//! LineDriverAdapter - 線分単位の描画器を driver として使う adapter

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::{Job2dDriver, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// LineDrawer は始点と終点で線を受け取る
pub trait LineDrawer: Send + Sync {
    fn draw(&mut self, segment: Segment);

    /// 診断用の名前
    fn name(&self) -> &str;
}

/// 受け取った線分をメモリに溜める LineDrawer
///
/// clone はバッファを共有するので、adapter に渡した後も中身を確認できる。
#[derive(Debug, Clone, Default)]
pub struct RecordingLineDrawer {
    segments: Arc<Mutex<Vec<Segment>>>,
}

impl RecordingLineDrawer {
    pub fn segments(&self) -> Vec<Segment> {
        match self.segments.lock() {
            Ok(segments) => segments.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LineDrawer for RecordingLineDrawer {
    fn draw(&mut self, segment: Segment) {
        match self.segments.lock() {
            Ok(mut segments) => segments.push(segment),
            Err(poisoned) => poisoned.into_inner().push(segment),
        }
    }

    fn name(&self) -> &str {
        "recording"
    }
}

pub struct LineDriverAdapter {
    drawer: Box<dyn LineDrawer>,
    start: Point,
    lines: usize,
}

impl LineDriverAdapter {
    pub fn new(drawer: impl LineDrawer + 'static) -> Self {
        Self {
            drawer: Box::new(drawer),
            start: Point::ORIGIN,
            lines: 0,
        }
    }

    pub fn drawer(&self) -> &dyn LineDrawer {
        self.drawer.as_ref()
    }

    /// drawer に渡した線分の数
    pub fn lines(&self) -> usize {
        self.lines
    }
}

impl Job2dDriver for LineDriverAdapter {
    fn set_position(&mut self, to: Point) {
        self.start = to;
    }

    fn operate_to(&mut self, to: Point) {
        self.drawer.draw(Segment::new(self.start, to));
        self.start = to;
        self.lines += 1;
    }

    fn position(&self) -> Point {
        self.start
    }
}
