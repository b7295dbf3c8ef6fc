//! AnimatedDriverDecorator - 線分を補間して段階的に送る decorator

use super::{Job2dDriver, Point};

pub struct AnimatedDriverDecorator {
    inner: Box<dyn Job2dDriver>,
    steps: u32,
}

impl AnimatedDriverDecorator {
    /// `steps` は 1 未満なら 1 に切り上げる
    pub fn new(inner: Box<dyn Job2dDriver>, steps: u32) -> Self {
        Self {
            inner,
            steps: steps.max(1),
        }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn inner(&self) -> &dyn Job2dDriver {
        self.inner.as_ref()
    }

    pub fn into_inner(self) -> Box<dyn Job2dDriver> {
        self.inner
    }
}

impl Job2dDriver for AnimatedDriverDecorator {
    fn set_position(&mut self, to: Point) {
        self.inner.set_position(to);
    }

    fn operate_to(&mut self, to: Point) {
        let from = self.inner.position();
        for step in 1..=self.steps {
            self.inner.operate_to(from.lerp(to, step, self.steps));
        }
    }

    fn position(&self) -> Point {
        self.inner.position()
    }
}
