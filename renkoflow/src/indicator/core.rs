use rust_decimal::Decimal;

use crate::bar::RenkoBrick;

pub trait Indicator: Send {
    fn name(&self) -> &str;
    fn reset(&mut self);
    fn update(&mut self, brick: &RenkoBrick) -> Option<Decimal>;
    fn value(&self) -> Option<Decimal>;

    /// Recomputes from scratch over `bricks`, one output per brick.
    fn backfill(&mut self, bricks: &[RenkoBrick]) -> Vec<Option<Decimal>> {
        self.reset();
        bricks.iter().map(|brick| self.update(brick)).collect()
    }
}
