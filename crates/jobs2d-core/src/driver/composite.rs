use super::{Job2dDriver, Point};

/// 全ての子 driver にコマンドを転送する composite
#[derive(Default)]
pub struct DriverComposite {
    drivers: Vec<Box<dyn Job2dDriver>>,
    position: Point,
}

impl DriverComposite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, driver: impl Job2dDriver) -> Self {
        self.add(Box::new(driver));
        self
    }

    pub fn add(&mut self, driver: Box<dyn Job2dDriver>) {
        self.drivers.push(driver);
    }

    pub fn iter(&self) -> impl Iterator<Item = &(dyn Job2dDriver + 'static)> {
        self.drivers.iter().map(|d| &**d)
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

impl Job2dDriver for DriverComposite {
    fn set_position(&mut self, to: Point) {
        for driver in &mut self.drivers {
            driver.set_position(to);
        }
        self.position = to;
    }

    fn operate_to(&mut self, to: Point) {
        for driver in &mut self.drivers {
            driver.operate_to(to);
        }
        self.position = to;
    }

    fn position(&self) -> Point {
        self.position
    }
}
