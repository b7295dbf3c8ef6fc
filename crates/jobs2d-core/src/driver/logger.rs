use super::{Job2dDriver, Point};

/// コマンドを tracing に記録するだけの driver
#[derive(Debug, Clone)]
pub struct LoggerDriver {
    name: String,
    position: Point,
    commands: usize,
}

impl LoggerDriver {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Point::ORIGIN,
            commands: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 受け取ったコマンド数
    pub fn commands(&self) -> usize {
        self.commands
    }
}

impl Job2dDriver for LoggerDriver {
    fn set_position(&mut self, to: Point) {
        tracing::info!(driver = %self.name, x = to.x, y = to.y, "set position");
        self.position = to;
        self.commands += 1;
    }

    fn operate_to(&mut self, to: Point) {
        tracing::info!(
            driver = %self.name,
            from_x = self.position.x,
            from_y = self.position.y,
            x = to.x,
            y = to.y,
            "operate to"
        );
        self.position = to;
        self.commands += 1;
    }

    fn position(&self) -> Point {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_position_and_commands() {
        let mut driver = LoggerDriver::new("log");
        driver.set_position(Point::new(1, 2));
        driver.operate_to(Point::new(5, 2));

        assert_eq!(driver.position(), Point::new(5, 2));
        assert_eq!(driver.commands(), 2);
        assert_eq!(driver.name(), "log");
    }
}
